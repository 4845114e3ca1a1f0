use k8s_openapi::api::core::v1::{
    EnvFromSource, EnvVar, LocalObjectReference, ResourceRequirements, SecretKeySelector,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};
use kube::core::params::{Patch, PatchParams};
use kube::{CustomResource, Resource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::api::v1alpha1::{conditions_schema, Image, Storage};
use crate::util::conditions::{ConditionStatus, ConditionType};
use crate::util::status::{find_condition, is_condition_true, set_status_condition};

pub const MARIADB_FINALIZER: &str = "mariadb.mmontes.io/finalizer";

// Field manager for status updates
pub const STATUS_FIELD_MANAGER: &str = "mariadb-status-manager";

pub const DEFAULT_PORT: i32 = 3306;

/// Generate the Kubernetes wrapper struct `MariaDB` from our Spec and Status struct
///
/// This provides a hook for generating the CRD yaml (in crdgen)
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[cfg_attr(test, derive(Default))]
#[kube(kind = "MariaDB", group = "mariadb.mmontes.io", version = "v1alpha1", namespaced)]
#[kube(status = "MariaDBStatus", shortname = "mdb")]
#[kube(
    printcolumn = r#"{"name":"Ready","type":"string","jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#,
    printcolumn = r#"{"name":"Status","type":"string","jsonPath":".status.conditions[?(@.type==\"Ready\")].message"}"#,
    printcolumn = r#"{"name":"Storage Class","type":"string","jsonPath":".spec.storage.className"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MariaDBSpec {
    pub root_password_secret_key_ref: SecretKeySelector,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_secret_key_ref: Option<SecretKeySelector>,

    pub image: Image,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,

    #[serde(default = "default_port")]
    pub port: i32,

    pub storage: Storage,

    /// Initialize the data directory from a backup instead of starting empty.
    /// Only honoured until the `Bootstrapped` condition becomes true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_from_backup: Option<BootstrapFromBackup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_from: Vec<EnvFromSource>,
}

fn default_port() -> i32 {
    DEFAULT_PORT
}

impl MariaDBSpec {
    /// Port the server listens on, 3306 when unset
    pub fn port(&self) -> i32 {
        if self.port == 0 {
            DEFAULT_PORT
        } else {
            self.port
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapFromBackup {
    pub backup_ref: LocalObjectReference,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exporter {
    pub image: Image,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub exporter: Exporter,
    #[serde(default)]
    pub create_service_monitor: bool,
}

/// The status object of `MariaDB`
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MariaDBStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(schema_with = "conditions_schema")]
    pub conditions: Vec<Condition>,
}

impl MariaDBStatus {
    /// Upserts a condition by type and returns whether anything changed.
    ///
    /// A `Bootstrapped=True` record is never moved back to another status.
    pub fn set_condition(&mut self, condition: Condition) -> bool {
        let condition_type = ConditionType::from(&condition);
        let status = ConditionStatus::from(condition.status.as_str());

        if condition_type.is_monotonic()
            && status != ConditionStatus::True
            && is_condition_true(&self.conditions, &condition_type)
        {
            warn!(
                "refusing to move condition {} from True to {}",
                condition_type, status
            );
            return false;
        }

        let (conditions, changed) = set_status_condition(&self.conditions, condition);
        self.conditions = conditions;
        if changed {
            debug!("updated condition {} to {}", condition_type, status);
        }
        changed
    }

    /// By-value form of [`MariaDBStatus::set_condition`]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.set_condition(condition);
        self
    }

    pub fn condition(&self, condition_type: &ConditionType) -> Option<&Condition> {
        find_condition(&self.conditions, condition_type)
    }

    pub fn is_condition_true(&self, condition_type: &ConditionType) -> bool {
        is_condition_true(&self.conditions, condition_type)
    }
}

/// Values shown by `kubectl get mariadbs`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrinterColumns {
    pub ready: Option<String>,
    pub status: Option<String>,
    pub storage_class: String,
    pub creation_timestamp: Option<Time>,
}

impl MariaDB {
    pub fn conditions(&self) -> &[Condition] {
        self.status.as_ref().map(|s| s.conditions.as_slice()).unwrap_or(&[])
    }

    pub fn is_ready(&self) -> bool {
        is_condition_true(self.conditions(), &ConditionType::Ready)
    }

    pub fn is_bootstrapped(&self) -> bool {
        is_condition_true(self.conditions(), &ConditionType::Bootstrapped)
    }

    /// True once the deletion timestamp is set, whatever the conditions say
    pub fn is_being_deleted(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    /// Records a condition on the status, creating the status if needed.
    ///
    /// Conditions without an observed generation are stamped with the current one.
    pub fn set_condition(&mut self, mut condition: Condition) -> bool {
        if condition.observed_generation.is_none() {
            condition.observed_generation = self.metadata.generation;
        }
        self.status.get_or_insert_with(MariaDBStatus::default).set_condition(condition)
    }

    /// The backup to restore from, as long as it has not been consumed yet
    pub fn bootstrap_source(&self) -> Option<&LocalObjectReference> {
        if self.is_bootstrapped() {
            return None;
        }
        self.spec.bootstrap_from_backup.as_ref().map(|b| &b.backup_ref)
    }

    pub fn needs_bootstrap(&self) -> bool {
        self.bootstrap_source().is_some()
    }

    pub fn columns(&self) -> PrinterColumns {
        let ready = find_condition(self.conditions(), &ConditionType::Ready);
        PrinterColumns {
            ready: ready.map(|c| c.status.clone()),
            status: ready.map(|c| c.message.clone()),
            storage_class: self.spec.storage.class_name.clone(),
            creation_timestamp: self.metadata.creation_timestamp.clone(),
        }
    }

    /// Server side apply document carrying the full status
    pub fn status_patch(&self) -> Patch<serde_json::Value> {
        Patch::Apply(json!({
            "apiVersion": MariaDB::api_version(&()),
            "kind": MariaDB::kind(&()),
            "metadata": {
                "name": self.name_any(),
                "namespace": self.namespace(),
            },
            "status": self.status.clone().unwrap_or_default(),
        }))
    }

    pub fn status_patch_params() -> PatchParams {
        PatchParams::apply(STATUS_FIELD_MANAGER)
    }
}
