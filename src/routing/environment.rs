use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A shared dependency stored by its concrete type
#[derive(Clone)]
struct Entry {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// Shared dependencies handed to resolved content, at most one per type.
///
/// Inserting a value whose type is already present replaces the earlier value.
#[derive(Clone, Default)]
pub struct EnvironmentObjects {
    entries: HashMap<TypeId, Entry>,
}

impl EnvironmentObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value`, replacing any earlier value of the same type
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.insert_shared(Arc::new(value))
    }

    /// Register an already shared value
    pub fn insert_shared<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> &mut Self {
        let replaced = self
            .entries
            .insert(
                TypeId::of::<T>(),
                Entry {
                    type_name: std::any::type_name::<T>(),
                    value,
                },
            )
            .is_some();
        if replaced {
            tracing::debug!(
                "Replaced environment object of type {}",
                std::any::type_name::<T>()
            );
        }
        self
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| Arc::clone(&entry.value).downcast::<T>().ok())
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<Arc<T>> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast::<T>().ok())
    }

    /// Copy every object of `other` into this set, `other` winning on conflicts
    pub fn merge(&mut self, other: &EnvironmentObjects) {
        for (type_id, entry) in &other.entries {
            self.entries.insert(*type_id, entry.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Type names of the registered objects, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.entries.values().map(|entry| entry.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for EnvironmentObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_names()).finish()
    }
}
