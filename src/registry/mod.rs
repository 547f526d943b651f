/// Membership registry: admin-gated, capacity-bounded membership ledger.
///
/// A registry holds one admin identity (fixed at construction), a membership
/// map with its authoritative counter, a dense ordinal index used for bounded
/// sweeps, a pause flag, and a delegation map. Every mutation is admin-gated
/// except vote delegation (member-gated) and, by default, the conditional
/// limit update.
///
/// # Module structure
/// - `ids`: Principal identity type
/// - `error`: RegistryError taxonomy and Result alias
/// - `limits`: Default bounds and RegistryConfig
/// - `gate`: AccessGate (caller == admin)
/// - `index`: MemberIndex (ordinal ↔ principal)
/// - `store`: MembershipStore (map + counter + index, paired mutators)
/// - `delegation`: DelegationMap (principal → delegate)
/// - `state`: DaoRegistry: public operations, batches, reset sweep, queries
/// - `shared`: SharedRegistry: one critical section per operation
pub mod delegation;
pub mod error;
pub mod gate;
pub mod ids;
pub mod index;
pub mod limits;
pub mod shared;
pub mod state;
pub mod store;

// Re-export core types for convenience
pub use delegation::DelegationMap;
pub use error::{RegistryError, Result};
pub use gate::AccessGate;
pub use ids::Principal;
pub use index::MemberIndex;
pub use limits::{
    RegistryConfig, DEFAULT_MAX_MEMBERS, MAX_BATCH_ADD, MAX_BATCH_REMOVE, RESET_SWEEP_SLOTS,
};
pub use shared::SharedRegistry;
pub use state::{DaoRegistry, ResetReport};
pub use store::MembershipStore;
