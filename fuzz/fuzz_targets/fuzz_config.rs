#![no_main]
use dao_registry::{DaoRegistry, Principal, RegistryConfig};
use libfuzzer_sys::fuzz_target;

/// Fuzz JSON configuration parsing.
///
/// Any document that parses and validates must produce a registry; nothing
/// may panic on malformed input.
fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = RegistryConfig::from_json(json) {
        assert!(config.max_members > 0);
        let registry = DaoRegistry::new(Principal::from_bytes([0u8; 32]), config);
        assert!(registry.is_ok());
    }
});
