/// Thread-safe registry handle.
///
/// `SharedRegistry` owns one `DaoRegistry` behind `Arc<Mutex<_>>`. Every
/// method takes the lock exactly once for its whole duration, so the
/// counter/map pair is never observed torn and batches are indivisible with
/// respect to other callers. Clones share the same registry.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::registry::error::{RegistryError, Result};
use crate::registry::ids::Principal;
use crate::registry::limits::RegistryConfig;
use crate::registry::state::{DaoRegistry, ResetReport};

#[derive(Clone, Debug)]
pub struct SharedRegistry {
    inner: Arc<Mutex<DaoRegistry>>,
}

impl SharedRegistry {
    pub fn new(admin: Principal, config: RegistryConfig) -> Result<Self> {
        Ok(Self::from_registry(DaoRegistry::new(admin, config)?))
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: DaoRegistry) -> Self {
        SharedRegistry {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DaoRegistry>> {
        self.inner.lock().map_err(|_| {
            log::error!("Registry lock poisoned");
            RegistryError::LockPoisoned
        })
    }

    /// Run `f` against the registry inside the critical section.
    pub fn with_registry<T>(&self, f: impl FnOnce(&DaoRegistry) -> T) -> Result<T> {
        let guard = self.lock()?;
        Ok(f(&*guard))
    }

    /// Copy of the current state, taken atomically.
    pub fn snapshot(&self) -> Result<DaoRegistry> {
        self.with_registry(|r| r.clone())
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    pub fn add_dao_member(&self, caller: &Principal, new_member: Principal) -> Result<()> {
        self.lock()?.add_dao_member(caller, new_member)
    }

    pub fn remove_dao_member(&self, caller: &Principal, member: &Principal) -> Result<()> {
        self.lock()?.remove_dao_member(caller, member)
    }

    pub fn set_member_limit(&self, caller: &Principal, limit: u64) -> Result<()> {
        self.lock()?.set_member_limit(caller, limit)
    }

    pub fn set_max_members(&self, caller: &Principal, limit: u64) -> Result<()> {
        self.lock()?.set_max_members(caller, limit)
    }

    pub fn update_limit_conditionally(&self, caller: &Principal, limit: u64) -> Result<()> {
        self.lock()?.update_limit_conditionally(caller, limit)
    }

    pub fn reset_member_count(&self, caller: &Principal) -> Result<()> {
        self.lock()?.reset_member_count(caller)
    }

    pub fn reset_dao_system(&self, caller: &Principal) -> Result<ResetReport> {
        self.lock()?.reset_dao_system(caller)
    }

    pub fn clear_member_at_index(&self, caller: &Principal, ordinal: u64) -> Result<Principal> {
        self.lock()?.clear_member_at_index(caller, ordinal)
    }

    pub fn batch_add_members(&self, caller: &Principal, members: &[Principal]) -> Result<()> {
        self.lock()?.batch_add_members(caller, members)
    }

    pub fn batch_remove_members(&self, caller: &Principal, members: &[Principal]) -> Result<()> {
        self.lock()?.batch_remove_members(caller, members)
    }

    pub fn toggle_pause(&self, caller: &Principal) -> Result<bool> {
        self.lock()?.toggle_pause(caller)
    }

    pub fn delegate_votes(&self, caller: &Principal, to: Principal) -> Result<()> {
        self.lock()?.delegate_votes(caller, to)
    }

    pub fn revoke_delegation(&self, caller: &Principal) -> Result<Principal> {
        self.lock()?.revoke_delegation(caller)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn check_is_member(&self, principal: &Principal) -> Result<bool> {
        self.with_registry(|r| r.check_is_member(principal))
    }

    pub fn check_is_not_member(&self, principal: &Principal) -> Result<bool> {
        self.with_registry(|r| r.check_is_not_member(principal))
    }

    pub fn dao_admin(&self) -> Result<Principal> {
        self.with_registry(|r| r.dao_admin())
    }

    pub fn max_members(&self) -> Result<u64> {
        self.with_registry(|r| r.max_members())
    }

    pub fn current_member_count(&self) -> Result<u64> {
        self.with_registry(|r| r.current_member_count())
    }

    pub fn remaining_slots(&self) -> Result<i64> {
        self.with_registry(|r| r.remaining_slots())
    }

    pub fn is_paused(&self) -> Result<bool> {
        self.with_registry(|r| r.is_paused())
    }

    pub fn delegate_of(&self, principal: &Principal) -> Result<Option<Principal>> {
        self.with_registry(|r| r.delegate_of(principal))
    }

    pub fn members(&self) -> Result<Vec<Principal>> {
        self.with_registry(|r| r.members())
    }

    pub fn state_hash(&self) -> Result<[u8; 32]> {
        self.with_registry(|r| r.state_hash())
    }
}
