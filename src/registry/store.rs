/// Membership store: principal → flag map, authoritative counter, and the
/// enumeration index, mutated only in pairs.
///
/// - A remove flips the flag to `false`; keys are never deleted.
/// - `member_count` is the source of truth for count queries and is never
///   recomputed from the map. `active_member_count` rescans for audits.
/// - Every add appends to the index; every remove swap-removes from it, so
///   the index always enumerates exactly the active members.

use std::collections::BTreeMap;

use crate::registry::error::{RegistryError, Result};
use crate::registry::ids::Principal;
use crate::registry::index::MemberIndex;

#[derive(Clone, Debug)]
pub struct MembershipStore {
    flags: BTreeMap<Principal, bool>,
    member_count: u64,
    max_members: u64,
    index: MemberIndex,
}

impl MembershipStore {
    pub fn new(max_members: u64) -> Self {
        MembershipStore {
            flags: BTreeMap::new(),
            member_count: 0,
            max_members,
            index: MemberIndex::new(),
        }
    }

    /// Read-only access to every principal ever seen and its flag.
    pub fn flags(&self) -> &BTreeMap<Principal, bool> {
        &self.flags
    }

    /// Read-only access to the enumeration index.
    pub fn index(&self) -> &MemberIndex {
        &self.index
    }

    pub fn is_active_member(&self, principal: &Principal) -> bool {
        self.flags.get(principal).copied().unwrap_or(false)
    }

    pub fn member_count(&self) -> u64 {
        self.member_count
    }

    pub fn max_members(&self) -> u64 {
        self.max_members
    }

    /// Count of `true` flags, by scanning the map.
    pub fn active_member_count(&self) -> u64 {
        self.flags.values().filter(|active| **active).count() as u64
    }

    /// Counter and index both agree with the map.
    pub fn is_consistent(&self) -> bool {
        let active = self.active_member_count();
        self.member_count == active
            && self.index.len() as u64 == active
            && self.index.iter().all(|(_, p)| self.is_active_member(p))
    }

    // -----------------------------------------------------------------------
    // Paired mutators
    // -----------------------------------------------------------------------

    /// Activate `principal`, bump the counter, and index it.
    /// Returns the ordinal assigned in the index.
    pub fn add_member(&mut self, principal: Principal) -> Result<u64> {
        if self.is_active_member(&principal) {
            return Err(RegistryError::AlreadyMember);
        }
        if self.member_count >= self.max_members {
            return Err(RegistryError::MemberLimitReached);
        }

        self.flags.insert(principal, true);
        self.member_count += 1;
        Ok(self.index.push(principal))
    }

    /// Deactivate `principal`, drop the counter, and unindex it.
    pub fn remove_member(&mut self, principal: &Principal) -> Result<()> {
        if !self.is_active_member(principal) {
            return Err(RegistryError::NotMember);
        }

        self.flags.insert(*principal, false);
        // Saturating: the counter may have been zeroed by `reset_count`.
        self.member_count = self.member_count.saturating_sub(1);
        let unindexed = self.index.swap_remove(principal);
        debug_assert!(unindexed.is_some(), "active member missing from the index");
        Ok(())
    }

    /// Remove whichever member sits at `ordinal`.
    pub fn remove_at(&mut self, ordinal: u64) -> Result<Principal> {
        let principal = *self
            .index
            .get(ordinal)
            .ok_or(RegistryError::EmptySlot(ordinal))?;
        if !self.is_active_member(&principal) {
            return Err(RegistryError::IndexCorrupted { ordinal });
        }
        self.remove_member(&principal)?;
        Ok(principal)
    }

    /// Clear the first `slots` index entries.
    ///
    /// Every visited slot must reference an active member; otherwise nothing
    /// is touched and `IndexCorrupted` names the first bad ordinal. The counter
    /// is zeroed unconditionally. Survivors beyond the window stay active and
    /// are shifted down, leaving the counter behind the map until they are
    /// swept too. Returns `(cleared, remaining)`.
    pub fn sweep(&mut self, slots: usize) -> Result<(usize, usize)> {
        if let Some(ordinal) = self
            .index
            .window(slots)
            .iter()
            .position(|p| !self.is_active_member(p))
        {
            return Err(RegistryError::IndexCorrupted {
                ordinal: ordinal as u64,
            });
        }

        let cleared = self.index.drain_front(slots);
        for principal in &cleared {
            self.flags.insert(*principal, false);
        }
        self.member_count = 0;
        Ok((cleared.len(), self.index.len()))
    }

    pub fn set_max_members(&mut self, limit: u64) -> Result<()> {
        if limit == 0 {
            return Err(RegistryError::InvalidLimit);
        }
        self.max_members = limit;
        Ok(())
    }

    /// Zero the counter without touching the map or the index.
    pub fn reset_count(&mut self) {
        self.member_count = 0;
    }

    /// Flip a flag to `false` while leaving the index entry in place.
    #[cfg(test)]
    pub(crate) fn deactivate_unindexed(&mut self, principal: &Principal) {
        self.flags.insert(*principal, false);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> Principal {
        Principal::from_bytes([n; 32])
    }

    #[test]
    fn test_add_then_query() {
        let mut store = MembershipStore::new(10);
        assert!(!store.is_active_member(&p(1)));
        assert_eq!(store.add_member(p(1)).unwrap(), 0);
        assert!(store.is_active_member(&p(1)));
        assert_eq!(store.member_count(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_double_add_rejected() {
        let mut store = MembershipStore::new(10);
        store.add_member(p(1)).unwrap();
        assert_eq!(store.add_member(p(1)), Err(RegistryError::AlreadyMember));
        assert_eq!(store.member_count(), 1);
    }

    #[test]
    fn test_limit_enforced() {
        let mut store = MembershipStore::new(2);
        store.add_member(p(1)).unwrap();
        store.add_member(p(2)).unwrap();
        assert_eq!(store.add_member(p(3)), Err(RegistryError::MemberLimitReached));
        assert_eq!(store.member_count(), 2);
        assert!(!store.is_active_member(&p(3)));
    }

    #[test]
    fn test_remove_flips_flag_but_keeps_key() {
        let mut store = MembershipStore::new(10);
        store.add_member(p(1)).unwrap();
        store.remove_member(&p(1)).unwrap();
        assert!(!store.is_active_member(&p(1)));
        assert_eq!(store.flags().get(&p(1)), Some(&false));
        assert_eq!(store.member_count(), 0);
        assert!(store.index().is_empty());
        assert!(store.is_consistent());
    }

    #[test]
    fn test_remove_non_member_rejected() {
        let mut store = MembershipStore::new(10);
        assert_eq!(store.remove_member(&p(1)), Err(RegistryError::NotMember));
        store.add_member(p(1)).unwrap();
        store.remove_member(&p(1)).unwrap();
        assert_eq!(store.remove_member(&p(1)), Err(RegistryError::NotMember));
    }

    #[test]
    fn test_readd_after_remove() {
        let mut store = MembershipStore::new(10);
        store.add_member(p(1)).unwrap();
        store.add_member(p(2)).unwrap();
        store.remove_member(&p(1)).unwrap();
        // p2 was swapped into ordinal 0, so p1 comes back at ordinal 1
        assert_eq!(store.add_member(p(1)).unwrap(), 1);
        assert_eq!(store.index().position(&p(2)), Some(0));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_remove_at() {
        let mut store = MembershipStore::new(10);
        store.add_member(p(1)).unwrap();
        store.add_member(p(2)).unwrap();
        assert_eq!(store.remove_at(0).unwrap(), p(1));
        assert_eq!(store.remove_at(5), Err(RegistryError::EmptySlot(5)));
        assert_eq!(store.member_count(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_sweep_clears_window() {
        let mut store = MembershipStore::new(10);
        for n in 1..=3 {
            store.add_member(p(n)).unwrap();
        }
        assert_eq!(store.sweep(100).unwrap(), (3, 0));
        assert_eq!(store.member_count(), 0);
        for n in 1..=3 {
            assert!(!store.is_active_member(&p(n)));
        }
        assert!(store.is_consistent());
    }

    #[test]
    fn test_sweep_leaves_survivors_beyond_window() {
        let mut store = MembershipStore::new(10);
        for n in 1..=5 {
            store.add_member(p(n)).unwrap();
        }
        assert_eq!(store.sweep(2).unwrap(), (2, 3));
        assert_eq!(store.member_count(), 0);
        assert_eq!(store.active_member_count(), 3);
        assert!(!store.is_active_member(&p(1)));
        assert!(store.is_active_member(&p(3)));
        assert_eq!(store.index().position(&p(3)), Some(0));
        assert!(!store.is_consistent());
    }

    #[test]
    fn test_sweep_aborts_on_stale_slot() {
        let mut store = MembershipStore::new(10);
        for n in 1..=4 {
            store.add_member(p(n)).unwrap();
        }
        store.deactivate_unindexed(&p(3));

        assert_eq!(
            store.sweep(100),
            Err(RegistryError::IndexCorrupted { ordinal: 2 })
        );
        // Nothing before the bad slot was cleared
        assert!(store.is_active_member(&p(1)));
        assert!(store.is_active_member(&p(2)));
        assert_eq!(store.member_count(), 4);
        assert_eq!(store.index().len(), 4);

        // A window that stops short of the bad slot still sweeps
        assert_eq!(store.sweep(2).unwrap(), (2, 2));
    }

    #[test]
    fn test_remove_at_stale_slot_rejected() {
        let mut store = MembershipStore::new(10);
        store.add_member(p(1)).unwrap();
        store.add_member(p(2)).unwrap();
        store.deactivate_unindexed(&p(2));

        assert_eq!(
            store.remove_at(1),
            Err(RegistryError::IndexCorrupted { ordinal: 1 })
        );
        assert_eq!(store.member_count(), 2);
        assert_eq!(store.index().get(1), Some(&p(2)));
    }

    #[test]
    fn test_reset_count_decouples_counter() {
        let mut store = MembershipStore::new(2);
        store.add_member(p(1)).unwrap();
        store.add_member(p(2)).unwrap();
        store.reset_count();

        assert_eq!(store.member_count(), 0);
        assert_eq!(store.active_member_count(), 2);
        assert!(store.is_active_member(&p(1)));
        assert!(!store.is_consistent());

        // Removing with a zeroed counter does not underflow
        store.remove_member(&p(1)).unwrap();
        assert_eq!(store.member_count(), 0);
    }

    #[test]
    fn test_set_max_members_zero_rejected() {
        let mut store = MembershipStore::new(5);
        assert_eq!(store.set_max_members(0), Err(RegistryError::InvalidLimit));
        assert_eq!(store.max_members(), 5);
        store.set_max_members(1).unwrap();
        assert_eq!(store.max_members(), 1);
    }
}
