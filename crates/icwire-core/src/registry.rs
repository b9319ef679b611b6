//! Process-wide registry of runtime record types.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{IcWireError, Result};
use crate::payload::{FieldMapping, RecordType, TypeFactory};

static GLOBAL: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::default()));

/// What to do when a name is redefined with a different field mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    #[default]
    Reject,
    Replace,
}

/// Type registry:
/// - `class_name -> RecordType`
///
/// Definitions of one name go through the map entry lock, so two
/// incompatible definitions can never both be installed.
#[derive(Default)]
pub struct TypeRegistry {
    types: DashMap<String, Arc<RecordType>>,
    policy: ConflictPolicy,
}

impl TypeRegistry {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            types: DashMap::new(),
            policy,
        }
    }

    /// Shared process-wide registry (rejects conflicting definitions).
    pub fn global() -> Arc<TypeRegistry> {
        Arc::clone(&GLOBAL)
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn get(&self, class_name: &str) -> Option<Arc<RecordType>> {
        self.types.get(class_name).map(|r| Arc::clone(r.value()))
    }

    pub fn names(&self) -> Vec<String> {
        self.types.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeFactory for TypeRegistry {
    fn define(&self, class_name: &str, mapping: &FieldMapping) -> Result<Arc<RecordType>> {
        if class_name.trim().is_empty() {
            return Err(IcWireError::Reconstruction("class name must not be empty".into()));
        }

        match self.types.entry(class_name.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().fields() == mapping {
                    return Ok(Arc::clone(slot.get()));
                }
                match self.policy {
                    ConflictPolicy::Reject => Err(IcWireError::Reconstruction(format!(
                        "type `{class_name}` already defined with a different field mapping"
                    ))),
                    ConflictPolicy::Replace => {
                        tracing::warn!(
                            class = %class_name,
                            fields = mapping.len(),
                            "record type redefined"
                        );
                        let ty = Arc::new(RecordType::new(class_name, mapping.clone()));
                        slot.insert(Arc::clone(&ty));
                        Ok(ty)
                    }
                }
            }
            Entry::Vacant(slot) => {
                tracing::debug!(class = %class_name, fields = mapping.len(), "record type defined");
                let ty = Arc::new(RecordType::new(class_name, mapping.clone()));
                slot.insert(Arc::clone(&ty));
                Ok(ty)
            }
        }
    }
}
