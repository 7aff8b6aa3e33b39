//! The flat configuration mapping threaded into every collaborator call.
//!
//! Replaces the implicit process-global environment of a shell-based
//! orchestrator with an explicit object: each key is bound exactly once,
//! during its owning stage, and read-only afterwards. Binding order is
//! preserved so the run log shows configuration in the order it was
//! accumulated.

/// Accumulated stage configuration, exported to collaborators as child
/// process environment variables.
#[derive(Debug, Clone, Default)]
pub struct StageEnv {
    vars: Vec<(&'static str, String)>,
}

impl StageEnv {
    pub fn new() -> StageEnv {
        StageEnv::default()
    }

    /// Bind a key. Keys are write-once per run; binding one twice is a
    /// bug in the stage definitions.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        debug_assert!(
            self.get(key).is_none(),
            "stage environment key '{key}' bound twice"
        );
        self.vars.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.vars.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
