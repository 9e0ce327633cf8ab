//! BMS application library
//!
//! The `book` and `collection` modules, and the registry that wires them to a
//! shared storage handle.

pub mod modules;

use bms_db::SharedStorage;
use bms_kernel::ModuleRegistry;

pub use modules::register_all;

/// Registry holding every BMS module, all backed by `storage`
pub fn registry(storage: SharedStorage) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    register_all(&mut registry, storage);
    registry
}
