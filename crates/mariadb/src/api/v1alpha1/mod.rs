use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scheme::Scheme;
use crate::util::Result;

pub mod mariadb;

pub use self::mariadb::{MariaDB, MariaDBSpec, MariaDBStatus};

pub const GROUP: &str = "mariadb.mmontes.io";
pub const VERSION: &str = "v1alpha1";

/// Registers every kind of this API version into the scheme.
///
/// Called explicitly from the process entry point; registering twice is a no-op.
pub fn add_to_scheme(scheme: &mut Scheme) -> Result<()> {
    scheme.register::<MariaDB>()?;
    Ok(())
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Registry and name, e.g. `mariadb` or `prom/mysqld-exporter`
    pub repository: String,
    #[serde(default = "default_image_tag")]
    pub tag: String,
    #[serde(default = "default_image_pull_policy")]
    pub pull_policy: String,
}

fn default_image_tag() -> String {
    "latest".to_string()
}
fn default_image_pull_policy() -> String {
    "IfNotPresent".to_string()
}

impl Image {
    /// Reference usable in a container spec, `repository:tag`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Persistent volume settings for the data directory.
///
/// Treated as immutable once the volume has been provisioned.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    /// Storage class to use for persistent volume claims
    pub class_name: String,
    /// Size of the persistent volume
    pub size: Quantity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_modes: Vec<String>,
}

pub fn conditions_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    serde_json::from_value(serde_json::json!({
        "type": "array",
        "x-kubernetes-list-type": "map",
        "x-kubernetes-list-map-keys": ["type"],
        "items": {
            "type": "object",
            "properties": {
                "lastTransitionTime": { "format": "date-time", "type": "string" },
                "message": { "type": "string" },
                "observedGeneration": { "type": "integer", "format": "int64", "default": 0 },
                "reason": { "type": "string" },
                "status": { "type": "string", "enum": ["True", "False", "Unknown"] },
                "type": { "type": "string" }
            },
            "required": [
                "lastTransitionTime",
                "message",
                "reason",
                "status",
                "type"
            ],
        },
    }))
    .unwrap()
}
