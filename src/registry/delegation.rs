/// Delegation map: principal → delegate principal.
///
/// At most one outgoing delegation per principal; a new delegation replaces
/// the old one. No cycle detection and no vote tallying. Membership checks
/// are done by the caller (`DaoRegistry`), not here.

use std::collections::BTreeMap;

use crate::registry::ids::Principal;

#[derive(Clone, Debug, Default)]
pub struct DelegationMap {
    delegations: BTreeMap<Principal, Principal>,
}

impl DelegationMap {
    pub fn new() -> Self {
        DelegationMap {
            delegations: BTreeMap::new(),
        }
    }

    /// Read-only access to every delegation.
    pub fn delegations(&self) -> &BTreeMap<Principal, Principal> {
        &self.delegations
    }

    pub fn len(&self) -> usize {
        self.delegations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegations.is_empty()
    }

    /// Record `from → to`, returning the delegate it replaced.
    pub fn delegate(&mut self, from: Principal, to: Principal) -> Option<Principal> {
        self.delegations.insert(from, to)
    }

    /// Drop the delegation held by `from`.
    pub fn revoke(&mut self, from: &Principal) -> Option<Principal> {
        self.delegations.remove(from)
    }

    pub fn delegate_of(&self, from: &Principal) -> Option<&Principal> {
        self.delegations.get(from)
    }

    /// Principals that currently delegate to `to`.
    pub fn delegators_of(&self, to: &Principal) -> Vec<Principal> {
        self.delegations
            .iter()
            .filter(|(_, delegate)| *delegate == to)
            .map(|(from, _)| *from)
            .collect()
    }
}
