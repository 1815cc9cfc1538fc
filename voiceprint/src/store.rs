use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VoiceprintError;
use crate::features::FeatureVector;

/// A registered voiceprint template with its registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceprintRecord {
    pub user_id: String,
    pub features: FeatureVector,
    pub created_at: DateTime<Utc>,
}

/// Storage of registered voiceprint templates, keyed by user id.
///
/// The store is the single source of truth: a record exists for a user
/// exactly while that user is registered. Implementations must be safe for
/// concurrent use; writes to the same user id are serialized so overlapping
/// registrations cannot interleave.
pub trait VoiceprintStore: Send + Sync {
    /// Registers `features` for `user_id`, replacing any existing record
    /// wholesale. No history is kept.
    fn register(&self, user_id: &str, features: FeatureVector) -> Result<(), VoiceprintError>;

    /// Returns a copy of the registered record, if any.
    fn lookup(&self, user_id: &str) -> Result<Option<VoiceprintRecord>, VoiceprintError>;

    /// Removes the record for `user_id`. Returns whether a record existed;
    /// removing an absent user is a no-op, not an error.
    fn remove(&self, user_id: &str) -> Result<bool, VoiceprintError>;

    /// Number of registered users.
    fn len(&self) -> usize;

    /// True when no user is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`VoiceprintStore`]. Records live for the process lifetime;
/// persistence, when required, belongs to a backend implementing the same
/// trait.
pub struct MemoryStore {
    records: RwLock<HashMap<String, VoiceprintRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceprintStore for MemoryStore {
    fn register(&self, user_id: &str, features: FeatureVector) -> Result<(), VoiceprintError> {
        let record = VoiceprintRecord {
            user_id: user_id.to_string(),
            features,
            created_at: Utc::now(),
        };
        let mut records = self
            .records
            .write()
            .map_err(|_| VoiceprintError::StorePoisoned)?;
        records.insert(record.user_id.clone(), record);
        Ok(())
    }

    fn lookup(&self, user_id: &str) -> Result<Option<VoiceprintRecord>, VoiceprintError> {
        let records = self
            .records
            .read()
            .map_err(|_| VoiceprintError::StorePoisoned)?;
        Ok(records.get(user_id).cloned())
    }

    fn remove(&self, user_id: &str) -> Result<bool, VoiceprintError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| VoiceprintError::StorePoisoned)?;
        Ok(records.remove(user_id).is_some())
    }

    fn len(&self) -> usize {
        // Advisory count; a poisoned store reads as empty.
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(first: f32) -> FeatureVector {
        FeatureVector::from([first, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn register_and_lookup() {
        let store = MemoryStore::new();
        store.register("alice", fv(1.0)).unwrap();

        let record = store.lookup("alice").unwrap().unwrap();
        assert_eq!(record.user_id, "alice");
        assert_eq!(record.features, fv(1.0));
        assert!(record.created_at <= Utc::now());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookup_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.lookup("nobody").unwrap().is_none());
    }

    #[test]
    fn reregistration_overwrites_wholesale() {
        let store = MemoryStore::new();
        store.register("alice", fv(1.0)).unwrap();
        store.register("alice", fv(2.0)).unwrap();

        let record = store.lookup("alice").unwrap().unwrap();
        assert_eq!(record.features, fv(2.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_existence() {
        let store = MemoryStore::new();
        store.register("alice", fv(1.0)).unwrap();

        assert!(store.remove("alice").unwrap());
        assert!(store.lookup("alice").unwrap().is_none());
        // Removing an absent user is a no-op.
        assert!(!store.remove("alice").unwrap());
        assert!(!store.remove("nobody").unwrap());
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        a.register("alice", fv(1.0)).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn usable_as_trait_object() {
        let store: Box<dyn VoiceprintStore> = Box::new(MemoryStore::new());
        store.register("42", fv(1.0)).unwrap();
        assert_eq!(store.len(), 1);
    }
}
