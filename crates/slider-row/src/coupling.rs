//! Coupling suppression: hiding one entity's slider while a related entity
//! is remembered in some state (e.g. a shutter must not be driven while the
//! window behind it is open).
//!
//! Key derivation is purely textual on entity ids:
//! - `track`: ids starting with `prefix` are remembered while their state is
//!   `state`, and forgotten otherwise.
//! - `partner`: for ids starting with `prefix`, the suffix after the last `_`
//!   is appended to `partner_prefix` (`cover.shutter_5` → `cover.window_5`).
//! - `group`: ids starting with `prefix` look for any remembered key starting
//!   with `scan_prefix`.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::memory::{KeyValueStore, VisibilityMemory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CouplingRule {
    Track { prefix: String, state: String },
    Partner { prefix: String, partner_prefix: String },
    Group { prefix: String, scan_prefix: String },
}

impl CouplingRule {
    pub fn track(prefix: impl Into<String>, state: impl Into<String>) -> Self {
        Self::Track {
            prefix: prefix.into(),
            state: state.into(),
        }
    }

    pub fn partner(prefix: impl Into<String>, partner_prefix: impl Into<String>) -> Self {
        Self::Partner {
            prefix: prefix.into(),
            partner_prefix: partner_prefix.into(),
        }
    }

    pub fn group(prefix: impl Into<String>, scan_prefix: impl Into<String>) -> Self {
        Self::Group {
            prefix: prefix.into(),
            scan_prefix: scan_prefix.into(),
        }
    }
}

/// The coupling table a row applies.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingRules(Vec<CouplingRule>);

impl Default for CouplingRules {
    /// Shutters are locked while their window is open; the roof shutter
    /// group is locked while any window is open.
    fn default() -> Self {
        Self(vec![
            CouplingRule::track("cover.window_", "open"),
            CouplingRule::partner("cover.shutter_", "cover.window_"),
            CouplingRule::group("cover.roof_shutters", "cover.window_"),
        ])
    }
}

impl CouplingRules {
    pub fn new(rules: Vec<CouplingRule>) -> Self {
        Self(rules)
    }

    pub fn rules(&self) -> &[CouplingRule] {
        &self.0
    }

    /// Write side: update `entity`'s own entry if it is a tracked entity.
    pub fn observe<S: KeyValueStore>(
        &self,
        memory: &mut VisibilityMemory<S>,
        entity: &EntityId,
        state: &str,
    ) {
        let id = entity.as_str();
        for rule in &self.0 {
            if let CouplingRule::Track {
                prefix,
                state: tracked,
            } = rule
            {
                if !id.starts_with(prefix.as_str()) {
                    continue;
                }
                if state == tracked {
                    memory.remember(id, state);
                } else {
                    memory.forget(id);
                }
            }
        }
    }

    /// Read side: whether a remembered related entity hides `entity`'s slider.
    pub fn hides_slider<S: KeyValueStore>(
        &self,
        memory: &VisibilityMemory<S>,
        entity: &EntityId,
    ) -> bool {
        let id = entity.as_str();
        self.0.iter().any(|rule| match rule {
            CouplingRule::Track { .. } => false,
            CouplingRule::Partner {
                prefix,
                partner_prefix,
            } => {
                id.starts_with(prefix.as_str())
                    && memory.recall(&partner_key(id, partner_prefix)).is_some()
            }
            CouplingRule::Group {
                prefix,
                scan_prefix,
            } => id.starts_with(prefix.as_str()) && memory.any_with_prefix(scan_prefix),
        })
    }
}

/// `cover.shutter_5` with partner prefix `cover.window_` → `cover.window_5`.
fn partner_key(id: &str, partner_prefix: &str) -> String {
    let suffix = id.rsplit('_').next().unwrap_or(id);
    format!("{partner_prefix}{suffix}")
}
