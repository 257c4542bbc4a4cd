//! Group Registry
//!
//! Owns every group created by the process, keyed by name. Built once by
//! the application's entry point and shared with the HTTP handlers, which
//! look groups up by the name in the request path.

use super::getter::Getter;
use super::group::Group;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates and registers a group.
    ///
    /// # Arguments
    /// * `name` - Unique group name, also used in peer request paths.
    /// * `cache_bytes` - Byte budget for the local cache, `0` for unbounded.
    /// * `getter` - Loader invoked on a miss that no peer can serve.
    ///
    /// # Panics
    /// If a group with the same name already exists.
    pub fn new_group<G>(&self, name: &str, cache_bytes: usize, getter: G) -> Arc<Group>
    where
        G: Getter + 'static,
    {
        let mut groups = self.groups.write();
        if groups.contains_key(name) {
            drop(groups);
            panic!("group {} registered more than once", name);
        }

        let group = Arc::new(Group::new(name, cache_bytes, Arc::new(getter)));
        groups.insert(name.to_string(), group.clone());

        tracing::info!("Registered group {} (cache_bytes={})", name, cache_bytes);
        group
    }

    /// Looks up a group by name.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Names of all registered groups, sorted.
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
        }
    }
}
