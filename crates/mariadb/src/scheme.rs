use std::collections::BTreeMap;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::GroupVersionKind;
use kube::CustomResourceExt;
use tracing::debug;

use crate::util::errors::{Error, Result};

/// Everything generic tooling needs to know about a registered kind
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub gvk: GroupVersionKind,
    pub plural: String,
    pub list_kind: String,
    pub short_names: Vec<String>,
    pub crd: CustomResourceDefinition,
}

impl TypeDescriptor {
    pub fn of<K: CustomResourceExt>() -> Self {
        let api_resource = K::api_resource();
        TypeDescriptor {
            gvk: GroupVersionKind::gvk(&api_resource.group, &api_resource.version, &api_resource.kind),
            list_kind: format!("{}List", api_resource.kind),
            plural: api_resource.plural,
            short_names: K::shortnames().iter().map(|s| s.to_string()).collect(),
            crd: K::crd(),
        }
    }

    fn key(&self) -> String {
        scheme_key(&self.gvk.group, &self.gvk.version, &self.gvk.kind)
    }
}

fn scheme_key(group: &str, version: &str, kind: &str) -> String {
    format!("{group}/{version}/{kind}")
}

/// Registry of resource kinds, owned by the process entry point.
///
/// Nothing registers itself; callers fill the scheme explicitly, usually through
/// an `add_to_scheme` function of an API version module.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    types: BTreeMap<String, TypeDescriptor>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `K` and returns whether it was newly added.
    pub fn register<K: CustomResourceExt>(&mut self) -> Result<bool> {
        self.register_descriptor(TypeDescriptor::of::<K>())
    }

    /// Registering an identical descriptor again is a no-op; a different descriptor
    /// for an already registered group/version/kind is rejected.
    pub fn register_descriptor(&mut self, descriptor: TypeDescriptor) -> Result<bool> {
        let key = descriptor.key();
        match self.types.get(&key) {
            Some(existing) if *existing == descriptor => Ok(false),
            Some(_) => Err(Error::ConflictingRegistration(key)),
            None => {
                debug!("registered {} in scheme", key);
                self.types.insert(key, descriptor);
                Ok(true)
            }
        }
    }

    pub fn lookup(&self, group: &str, version: &str, kind: &str) -> Option<&TypeDescriptor> {
        self.types.get(&scheme_key(group, version, kind))
    }

    pub fn is_registered(&self, group: &str, version: &str, kind: &str) -> bool {
        self.lookup(group, version, kind).is_some()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn crds(&self) -> impl Iterator<Item = &CustomResourceDefinition> {
        self.descriptors().map(|d| &d.crd)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Multi document YAML of every registered CRD
    pub fn to_yaml(&self) -> Result<String> {
        let documents = self
            .crds()
            .map(|crd| serde_yaml::to_string(crd).map_err(Error::YamlSerializationError))
            .collect::<Result<Vec<_>>>()?;
        Ok(documents.join("---\n"))
    }
}
