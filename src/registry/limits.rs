/// Registry guardrails and runtime configuration.
///
/// The constants bound batch sizes and the reset sweep so that no single
/// operation does unbounded work. `RegistryConfig` carries the tunable
/// copies plus the two policy switches (pause enforcement and gating of the
/// conditional limit update).

use serde::{Deserialize, Serialize};

use crate::registry::error::{RegistryError, Result};

/// Member limit a fresh registry starts with.
pub const DEFAULT_MAX_MEMBERS: u64 = 100;

/// Max principals per `batch_add_members` call.
pub const MAX_BATCH_ADD: usize = 100;

/// Max principals per `batch_remove_members` call.
pub const MAX_BATCH_REMOVE: usize = 10;

/// Index slots visited by one `reset_dao_system` sweep.
pub const RESET_SWEEP_SLOTS: usize = 100;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Registry configuration.
///
/// Missing fields fall back to their defaults when loaded from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initial `maxMemberLimit`.
    pub max_members: u64,
    /// Max principals accepted by one batch add.
    pub max_batch_add: usize,
    /// Max principals accepted by one batch remove.
    pub max_batch_remove: usize,
    /// Ordinals `[0, reset_sweep_slots)` are cleared by a system reset.
    pub reset_sweep_slots: usize,
    /// Reject every mutation except `toggle_pause` while paused.
    pub enforce_pause: bool,
    /// Require the admin for `update_limit_conditionally`.
    pub gate_conditional_limit: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_members: DEFAULT_MAX_MEMBERS,
            max_batch_add: MAX_BATCH_ADD,
            max_batch_remove: MAX_BATCH_REMOVE,
            reset_sweep_slots: RESET_SWEEP_SLOTS,
            enforce_pause: true,
            gate_conditional_limit: false,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RegistryConfig =
            serde_json::from_str(json).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::Config(e.to_string()))
    }

    /// Reject configurations no registry could operate under.
    pub fn validate(&self) -> Result<()> {
        if self.max_members == 0 {
            return Err(RegistryError::InvalidLimit);
        }
        if self.max_batch_add == 0 || self.max_batch_remove == 0 {
            return Err(RegistryError::Config(
                "batch sizes must be non-zero".into(),
            ));
        }
        if self.reset_sweep_slots == 0 {
            return Err(RegistryError::Config(
                "reset_sweep_slots must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
