//! # DAO Registry
//!
//! **A capacity-bounded, admin-controlled membership ledger.**
//!
//! Principals are granted or revoked membership by a single admin fixed at
//! construction. The registry enforces an upper bound on simultaneous
//! membership, keeps an ordinal index of members for bounded sweeps, and
//! records vote delegations between members. Any caller may query state.
//!
//! ## Quick Start
//!
//! ```rust
//! use dao_registry::{DaoRegistry, Principal, RegistryConfig};
//!
//! let admin = Principal::from_bytes([1u8; 32]);
//! let alice = Principal::from_bytes([2u8; 32]);
//!
//! let mut registry = DaoRegistry::new(admin, RegistryConfig::default()).unwrap();
//! registry.add_dao_member(&admin, alice).unwrap();
//! assert!(registry.check_is_member(&alice));
//! assert_eq!(registry.current_member_count(), 1);
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`registry`] | Membership store, enumeration index, admin gate, batches, delegation |
//!
//! The caller identity is always supplied by the embedder; the registry never
//! authenticates, it only compares identities. Use [`SharedRegistry`] when
//! more than one thread drives the same registry.

// Crate-level lint configuration: suppress stylistic warnings that don't affect correctness.
#![allow(
    clippy::empty_line_after_doc_comments,
    clippy::doc_lazy_continuation,
    clippy::new_without_default
)]

// ── Public modules ──────────────────────────────────────────────────────────

/// Membership registry: identities, limits, access gate, store, index,
/// delegation, and the thread-safe handle.
pub mod registry;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use registry::{
    DaoRegistry, DelegationMap, MemberIndex, MembershipStore, Principal, RegistryConfig,
    RegistryError, ResetReport, SharedRegistry,
};

// ── Library metadata ────────────────────────────────────────────────────────

/// DAO Registry version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────
