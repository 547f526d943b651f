/// Registry engine: the single entry point for every registry operation.
///
/// `DaoRegistry` holds the full in-memory state for one organization: the
/// access gate, the membership store (map + counter + index), the delegation
/// map, and the pause flag. Every mutation flows through the same pipeline:
///
/// 1. Access gate (`caller == admin`) for admin-gated operations
/// 2. Pause policy (`RegistryConfig::enforce_pause`)
/// 3. Input validation
/// 4. Store mutation, counter and index updated in the same step
///
/// **Atomicity guarantee:** an operation that returns `Err` leaves the state
/// (and therefore `state_hash`) unchanged. Batches run against a staged copy
/// of the store that only replaces the live one once every element applied.

use crate::registry::delegation::DelegationMap;
use crate::registry::error::{RegistryError, Result};
use crate::registry::gate::AccessGate;
use crate::registry::ids::Principal;
use crate::registry::limits::RegistryConfig;
use crate::registry::store::MembershipStore;

// ---------------------------------------------------------------------------
// ResetReport
// ---------------------------------------------------------------------------

/// Outcome of a `reset_dao_system` sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetReport {
    /// Members cleared from the swept window.
    pub cleared: usize,
    /// Members still active beyond the window (0 unless membership exceeded
    /// it). These are not reflected in the zeroed counter.
    pub remaining: usize,
}

// ---------------------------------------------------------------------------
// DaoRegistry
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct DaoRegistry {
    gate: AccessGate,
    config: RegistryConfig,
    store: MembershipStore,
    delegations: DelegationMap,
    paused: bool,
}

impl DaoRegistry {
    /// Create an empty registry administered by `admin`.
    pub fn new(admin: Principal, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Registry created: admin={:?} max_members={} enforce_pause={}",
            admin,
            config.max_members,
            config.enforce_pause
        );
        Ok(DaoRegistry {
            gate: AccessGate::new(admin),
            store: MembershipStore::new(config.max_members),
            delegations: DelegationMap::new(),
            paused: false,
            config,
        })
    }

    /// Create with default configuration.
    pub fn with_defaults(admin: Principal) -> Result<Self> {
        Self::new(admin, RegistryConfig::default())
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Read-only access to the membership store.
    pub fn store(&self) -> &MembershipStore {
        &self.store
    }

    /// Read-only access to the delegation map.
    pub fn delegations(&self) -> &DelegationMap {
        &self.delegations
    }

    // -----------------------------------------------------------------------
    // Gates
    // -----------------------------------------------------------------------

    fn require_unpaused(&self) -> Result<()> {
        if self.config.enforce_pause && self.paused {
            return Err(RegistryError::Paused);
        }
        Ok(())
    }

    /// Admin gate first, then the pause policy.
    fn authorize(&self, caller: &Principal) -> Result<()> {
        self.gate.require_admin(caller)?;
        self.require_unpaused()
    }

    fn check_batch_size(size: usize, max: usize) -> Result<()> {
        if size > max {
            return Err(RegistryError::BatchTooLarge { size, max });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Admin-gated mutations
    // -----------------------------------------------------------------------

    /// Grant membership to `new_member`. The caller may not target itself.
    pub fn add_dao_member(&mut self, caller: &Principal, new_member: Principal) -> Result<()> {
        self.authorize(caller)?;
        if new_member == *caller {
            return Err(RegistryError::InvalidUser);
        }

        let ordinal = self.store.add_member(new_member)?;
        log::info!(
            "Member added: {:?} at index {} ({}/{})",
            new_member,
            ordinal,
            self.store.member_count(),
            self.store.max_members()
        );
        Ok(())
    }

    /// Revoke membership from `member`. The caller may not target itself.
    pub fn remove_dao_member(&mut self, caller: &Principal, member: &Principal) -> Result<()> {
        self.authorize(caller)?;
        if member == caller {
            return Err(RegistryError::InvalidUser);
        }

        self.store.remove_member(member)?;
        log::info!(
            "Member removed: {:?} ({}/{})",
            member,
            self.store.member_count(),
            self.store.max_members()
        );
        Ok(())
    }

    /// Set `maxMemberLimit`. Zero is rejected; a limit below the current
    /// count is allowed and blocks adds until membership drops under it.
    pub fn set_member_limit(&mut self, caller: &Principal, limit: u64) -> Result<()> {
        self.authorize(caller)?;
        self.store.set_max_members(limit)?;
        if limit < self.store.member_count() {
            log::warn!(
                "Member limit {} is below current count {}",
                limit,
                self.store.member_count()
            );
        }
        log::info!("Member limit set to {}", limit);
        Ok(())
    }

    /// Alias of [`set_member_limit`](Self::set_member_limit).
    pub fn set_max_members(&mut self, caller: &Principal, limit: u64) -> Result<()> {
        self.set_member_limit(caller, limit)
    }

    /// Raise or lower the limit, provided it stays strictly above the
    /// current count. Open to any caller unless
    /// `RegistryConfig::gate_conditional_limit` is set.
    pub fn update_limit_conditionally(&mut self, caller: &Principal, limit: u64) -> Result<()> {
        if self.config.gate_conditional_limit {
            self.gate.require_admin(caller)?;
        }
        self.require_unpaused()?;
        if self.store.member_count() >= limit {
            return Err(RegistryError::InvalidLimit);
        }

        self.store.set_max_members(limit)?;
        log::info!("Member limit updated to {} by {:?}", limit, caller);
        Ok(())
    }

    /// Zero the counter only. Membership flags and the index are untouched,
    /// so the counter no longer reflects the map until the next full reset.
    pub fn reset_member_count(&mut self, caller: &Principal) -> Result<()> {
        self.authorize(caller)?;
        let previous = self.store.member_count();
        self.store.reset_count();
        log::warn!("Member count reset from {} to 0 (membership map untouched)", previous);
        Ok(())
    }

    /// Clear every member in the first `reset_sweep_slots` index slots and
    /// zero the counter. Any slot that does not reference an active member
    /// aborts the whole sweep.
    pub fn reset_dao_system(&mut self, caller: &Principal) -> Result<ResetReport> {
        self.authorize(caller)?;

        let (cleared, remaining) = self.store.sweep(self.config.reset_sweep_slots)?;
        if remaining > 0 {
            log::warn!(
                "Reset swept {} slots; {} members remain active beyond the window (count zeroed)",
                self.config.reset_sweep_slots,
                remaining
            );
        }
        log::info!("Registry reset: {} members cleared", cleared);
        Ok(ResetReport { cleared, remaining })
    }

    /// Remove whichever member occupies `ordinal` in the index.
    pub fn clear_member_at_index(&mut self, caller: &Principal, ordinal: u64) -> Result<Principal> {
        self.authorize(caller)?;
        let principal = self.store.remove_at(ordinal)?;
        log::info!("Member {:?} cleared from index {}", principal, ordinal);
        Ok(principal)
    }

    // -----------------------------------------------------------------------
    // Batch operator
    // -----------------------------------------------------------------------

    /// Add every principal in order. The first failure aborts the batch and
    /// nothing is committed.
    pub fn batch_add_members(&mut self, caller: &Principal, members: &[Principal]) -> Result<()> {
        self.authorize(caller)?;
        Self::check_batch_size(members.len(), self.config.max_batch_add)?;

        let mut staged = self.store.clone();
        for (position, member) in members.iter().enumerate() {
            if let Err(e) = staged.add_member(*member) {
                log::debug!("Batch add aborted at position {} ({:?}): {}", position, member, e);
                return Err(e);
            }
        }

        self.store = staged;
        log::info!(
            "Batch added {} members ({}/{})",
            members.len(),
            self.store.member_count(),
            self.store.max_members()
        );
        Ok(())
    }

    /// Remove every principal in order. The first non-member aborts the
    /// batch and nothing is committed.
    pub fn batch_remove_members(&mut self, caller: &Principal, members: &[Principal]) -> Result<()> {
        self.authorize(caller)?;
        Self::check_batch_size(members.len(), self.config.max_batch_remove)?;

        let mut staged = self.store.clone();
        for (position, member) in members.iter().enumerate() {
            if let Err(e) = staged.remove_member(member) {
                log::debug!("Batch remove aborted at position {} ({:?}): {}", position, member, e);
                return Err(e);
            }
        }

        self.store = staged;
        log::info!(
            "Batch removed {} members ({}/{})",
            members.len(),
            self.store.member_count(),
            self.store.max_members()
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Auxiliary state
    // -----------------------------------------------------------------------

    /// Flip the pause flag and return its new value. Allowed while paused.
    pub fn toggle_pause(&mut self, caller: &Principal) -> Result<bool> {
        self.gate.require_admin(caller)?;
        self.paused = !self.paused;
        log::info!("Registry pause set to {}", self.paused);
        Ok(self.paused)
    }

    /// Record that `caller` delegates its vote to `to`. Both must be active
    /// members. Replaces any earlier delegation by `caller`.
    pub fn delegate_votes(&mut self, caller: &Principal, to: Principal) -> Result<()> {
        self.require_unpaused()?;
        if !self.store.is_active_member(caller) || !self.store.is_active_member(&to) {
            return Err(RegistryError::NotMember);
        }

        if let Some(previous) = self.delegations.delegate(*caller, to) {
            log::debug!("Delegation {:?} → {:?} replaced", caller, previous);
        }
        log::info!("Delegation recorded: {:?} → {:?}", caller, to);
        Ok(())
    }

    /// Drop the caller's delegation and return the former delegate.
    pub fn revoke_delegation(&mut self, caller: &Principal) -> Result<Principal> {
        self.require_unpaused()?;
        let previous = self
            .delegations
            .revoke(caller)
            .ok_or(RegistryError::NotMember)?;
        log::info!("Delegation revoked: {:?} → {:?}", caller, previous);
        Ok(previous)
    }

    // -----------------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------------

    pub fn check_is_member(&self, principal: &Principal) -> bool {
        self.store.is_active_member(principal)
    }

    pub fn check_is_not_member(&self, principal: &Principal) -> bool {
        !self.store.is_active_member(principal)
    }

    pub fn dao_admin(&self) -> Principal {
        *self.gate.admin()
    }

    pub fn max_members(&self) -> u64 {
        self.store.max_members()
    }

    pub fn current_member_count(&self) -> u64 {
        self.store.member_count()
    }

    /// `max_members - current_member_count`, negative when the limit was
    /// lowered below the current count.
    pub fn remaining_slots(&self) -> i64 {
        let diff = self.store.max_members() as i128 - self.store.member_count() as i128;
        diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    pub fn is_full(&self) -> bool {
        self.store.member_count() >= self.store.max_members()
    }

    pub fn has_capacity(&self) -> bool {
        !self.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.store.member_count() == 0
    }

    /// Count reaches `threshold`.
    pub fn has_at_least(&self, threshold: u64) -> bool {
        self.store.member_count() >= threshold
    }

    /// Count strictly exceeds `threshold`.
    pub fn has_more_than(&self, threshold: u64) -> bool {
        self.store.member_count() > threshold
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn delegate_of(&self, principal: &Principal) -> Option<Principal> {
        self.delegations.delegate_of(principal).copied()
    }

    pub fn delegators_of(&self, principal: &Principal) -> Vec<Principal> {
        self.delegations.delegators_of(principal)
    }

    /// Active members in index order.
    pub fn members(&self) -> Vec<Principal> {
        self.store.index().iter().map(|(_, p)| *p).collect()
    }

    pub fn member_at(&self, ordinal: u64) -> Option<Principal> {
        self.store.index().get(ordinal).copied()
    }

    pub fn index_of(&self, principal: &Principal) -> Option<u64> {
        self.store.index().position(principal)
    }

    /// Counter, index, and map agree.
    pub fn is_consistent(&self) -> bool {
        self.store.is_consistent()
    }

    /// Deterministic fingerprint of the full registry state.
    ///
    /// Hashes the admin, every flag (BTreeMap order), counter, limit, index
    /// (ordinal order), delegations, and the pause flag.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();

        hasher.update(b"A");
        hasher.update(self.gate.admin().as_bytes());

        // --- Membership ---
        hasher.update(b"M");
        for (principal, active) in self.store.flags() {
            hasher.update(principal.as_bytes());
            hasher.update(&[*active as u8]);
        }
        hasher.update(&self.store.member_count().to_le_bytes());
        hasher.update(&self.store.max_members().to_le_bytes());

        // --- Index ---
        hasher.update(b"I");
        for (ordinal, principal) in self.store.index().iter() {
            hasher.update(&ordinal.to_le_bytes());
            hasher.update(principal.as_bytes());
        }

        // --- Delegations ---
        hasher.update(b"D");
        for (from, to) in self.delegations.delegations() {
            hasher.update(from.as_bytes());
            hasher.update(to.as_bytes());
        }

        hasher.update(b"P");
        hasher.update(&[self.paused as u8]);

        *hasher.finalize().as_bytes()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
