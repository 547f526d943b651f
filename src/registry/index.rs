/// Enumeration index: dense ordinal → principal table.
///
/// Ordinals `[0, len)` are always occupied. Appends take the next ordinal;
/// removals swap the last entry into the vacated slot so the table never has
/// holes. A reverse map keeps `position` and removal logarithmic.
///
/// The index is only ever mutated through `MembershipStore`, which keeps it
/// equal to the set of active members.

use std::collections::BTreeMap;

use crate::registry::ids::Principal;

#[derive(Clone, Debug, Default)]
pub struct MemberIndex {
    slots: Vec<Principal>,
    positions: BTreeMap<Principal, u64>,
}

impl MemberIndex {
    pub fn new() -> Self {
        MemberIndex {
            slots: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Principal stored at `ordinal`, if occupied.
    pub fn get(&self, ordinal: u64) -> Option<&Principal> {
        usize::try_from(ordinal).ok().and_then(|i| self.slots.get(i))
    }

    /// Ordinal currently held by `principal`.
    pub fn position(&self, principal: &Principal) -> Option<u64> {
        self.positions.get(principal).copied()
    }

    pub fn contains(&self, principal: &Principal) -> bool {
        self.positions.contains_key(principal)
    }

    /// Entries in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Principal)> {
        self.slots.iter().enumerate().map(|(i, p)| (i as u64, p))
    }

    /// The first `n` slots (or fewer, if the index is shorter).
    pub fn window(&self, n: usize) -> &[Principal] {
        &self.slots[..n.min(self.slots.len())]
    }

    /// Append `principal` at the next free ordinal and return it.
    /// An already-indexed principal keeps its existing ordinal.
    pub fn push(&mut self, principal: Principal) -> u64 {
        if let Some(existing) = self.position(&principal) {
            return existing;
        }
        let ordinal = self.slots.len() as u64;
        self.slots.push(principal);
        self.positions.insert(principal, ordinal);
        ordinal
    }

    /// Drop `principal` from the index, moving the last entry into its slot.
    /// Returns the ordinal it occupied.
    pub fn swap_remove(&mut self, principal: &Principal) -> Option<u64> {
        let ordinal = self.positions.remove(principal)?;
        let i = ordinal as usize;
        self.slots.swap_remove(i);
        if let Some(moved) = self.slots.get(i) {
            self.positions.insert(*moved, ordinal);
        }
        Some(ordinal)
    }

    /// Remove the first `n` slots and shift the survivors down to `[0, len - n)`.
    pub fn drain_front(&mut self, n: usize) -> Vec<Principal> {
        let n = n.min(self.slots.len());
        let drained: Vec<Principal> = self.slots.drain(..n).collect();
        for p in &drained {
            self.positions.remove(p);
        }
        for (i, p) in self.slots.iter().enumerate() {
            self.positions.insert(*p, i as u64);
        }
        drained
    }
}
