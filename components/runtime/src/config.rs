//! Context configuration.

use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// Settings of a [`Context`](crate::Context).
///
/// # Examples
///
/// ```
/// use runtime::ContextConfig;
///
/// let config = ContextConfig::default()
///     .with_max_call_depth(64)
///     .with_collect_on_scope_exit(false);
/// let json = config.to_json().unwrap();
/// assert_eq!(ContextConfig::from_json(&json).unwrap(), config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Frames allowed on the call stack before RANGE is raised
    pub max_call_depth: usize,
    /// Run the collector every time a scope is popped
    pub collect_on_scope_exit: bool,
    /// Name of the frame seeded at the bottom of the call stack
    pub entry_function: String,
    /// Slots reserved up front in the atom heap
    pub initial_heap_capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 1024,
            collect_on_scope_exit: true,
            entry_function: "<main>".to_string(),
            initial_heap_capacity: 256,
        }
    }
}

impl ContextConfig {
    /// Set the maximum call depth
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Enable or disable collection on scope exit
    pub fn with_collect_on_scope_exit(mut self, enabled: bool) -> Self {
        self.collect_on_scope_exit = enabled;
        self
    }

    /// Set the entry frame name
    pub fn with_entry_function(mut self, name: impl Into<String>) -> Self {
        self.entry_function = name.into();
        self
    }

    /// Set the initial heap capacity
    pub fn with_initial_heap_capacity(mut self, capacity: usize) -> Self {
        self.initial_heap_capacity = capacity;
        self
    }

    /// Serialize to a JSON document
    pub fn to_json(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, RuntimeError> {
        Ok(serde_json::from_str(json)?)
    }
}
