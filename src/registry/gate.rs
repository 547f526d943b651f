//! Access-control gate: the single predicate `caller == admin`.
//! The admin identity is captured once at construction and never changes.

use subtle::ConstantTimeEq;

use crate::registry::error::{RegistryError, Result};
use crate::registry::ids::Principal;

#[derive(Clone, Debug)]
pub struct AccessGate {
    admin: Principal,
}

impl AccessGate {
    pub fn new(admin: Principal) -> Self {
        AccessGate { admin }
    }

    /// The admin fixed at construction.
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Constant-time identity comparison against the admin.
    #[inline(always)]
    pub fn is_admin(&self, caller: &Principal) -> bool {
        self.admin.as_bytes().ct_eq(caller.as_bytes()).into()
    }

    /// Fail with `NotAdmin` unless `caller` is the admin.
    pub fn require_admin(&self, caller: &Principal) -> Result<()> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            log::warn!("Rejected admin-gated call from {:?}", caller);
            Err(RegistryError::NotAdmin)
        }
    }
}
