//! Plugin-owned side data.
//!
//! Each plugin stores its state in the environment under its short name. The
//! state is reachable only through a `PluginKey<S>`: when `S` is private to the
//! plugin, no other plugin can name the key, so only that plugin's own passes
//! can read or write the state.

use crate::{MetaEdEnvironment, PluginEnvironment, SideDataError, SideDataResult, EntityGraph};
use metaed_core::EntityId;
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Typed capability for one plugin's state.
pub struct PluginKey<S> {
    short_name: &'static str,
    _state: PhantomData<fn() -> S>,
}

impl<S> PluginKey<S> {
    /// Create a key for the plugin with the given short name.
    pub const fn new(short_name: &'static str) -> Self {
        Self {
            short_name,
            _state: PhantomData,
        }
    }

    /// The plugin short name this key unlocks.
    pub fn short_name(&self) -> &'static str {
        self.short_name
    }
}

impl<S> Clone for PluginKey<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for PluginKey<S> {}

impl<S> fmt::Debug for PluginKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginKey")
            .field("short_name", &self.short_name)
            .field("state", &type_name::<S>())
            .finish()
    }
}

/// Per-entity plugin data, keyed by arena id.
#[derive(Debug, Clone, PartialEq)]
pub struct SideTable<T> {
    rows: BTreeMap<EntityId, T>,
}

impl<T> Default for SideTable<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T> SideTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach data to an entity, returning what was there before.
    pub fn insert(&mut self, entity: EntityId, value: T) -> Option<T> {
        self.rows.insert(entity, value)
    }

    /// Data attached to an entity.
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.rows.get(&entity)
    }

    /// Mutable data attached to an entity.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.rows.get_mut(&entity)
    }

    /// Data attached to an entity, attaching a default first if absent.
    pub fn get_or_insert_with(&mut self, entity: EntityId, f: impl FnOnce() -> T) -> &mut T {
        self.rows.entry(entity).or_insert_with(f)
    }

    /// Check if an entity has data attached.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.rows.contains_key(&entity)
    }

    /// Rows in entity-id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.rows.iter().map(|(id, value)| (*id, value))
    }

    /// Number of entities with data attached.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no entity has data attached.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl MetaEdEnvironment {
    /// Install a plugin's state. Allowed exactly once per short name.
    pub fn install_plugin_state<S: Any + Send + Sync>(
        &mut self,
        key: &PluginKey<S>,
        state: S,
    ) -> SideDataResult<&mut S> {
        let short_name = key.short_name();
        let plugin = self
            .plugin
            .entry(short_name.to_string())
            .or_insert_with(|| PluginEnvironment::new(short_name));
        if plugin.state.is_some() {
            return Err(SideDataError::AlreadyInstalled(short_name.to_string()));
        }
        let slot = plugin.state.insert(Box::new(state));
        slot.downcast_mut::<S>()
            .ok_or_else(|| type_mismatch::<S>(short_name))
    }

    /// Check if a plugin's state has been installed.
    pub fn has_plugin_state<S>(&self, key: &PluginKey<S>) -> bool {
        self.plugin
            .get(key.short_name())
            .map(|plugin| plugin.state.is_some())
            .unwrap_or(false)
    }

    /// Read a plugin's state.
    pub fn plugin_state<S: Any + Send + Sync>(&self, key: &PluginKey<S>) -> SideDataResult<&S> {
        let short_name = key.short_name();
        let state = self
            .plugin
            .get(short_name)
            .and_then(|plugin| plugin.state.as_ref())
            .ok_or_else(|| SideDataError::NotInstalled(short_name.to_string()))?;
        state
            .downcast_ref::<S>()
            .ok_or_else(|| type_mismatch::<S>(short_name))
    }

    /// Write a plugin's state.
    pub fn plugin_state_mut<S: Any + Send + Sync>(
        &mut self,
        key: &PluginKey<S>,
    ) -> SideDataResult<&mut S> {
        let (state, _) = self.plugin_state_with_graph(key)?;
        Ok(state)
    }

    /// Write a plugin's state while reading the entity graph.
    pub fn plugin_state_with_graph<S: Any + Send + Sync>(
        &mut self,
        key: &PluginKey<S>,
    ) -> SideDataResult<(&mut S, &EntityGraph)> {
        let short_name = key.short_name();
        let state = self
            .plugin
            .get_mut(short_name)
            .and_then(|plugin| plugin.state.as_mut())
            .ok_or_else(|| SideDataError::NotInstalled(short_name.to_string()))?;
        let state = state
            .downcast_mut::<S>()
            .ok_or_else(|| type_mismatch::<S>(short_name))?;
        Ok((state, &self.graph))
    }
}

fn type_mismatch<S>(short_name: &str) -> SideDataError {
    SideDataError::TypeMismatch {
        short_name: short_name.to_string(),
        expected: type_name::<S>(),
    }
}
