//! sm-models: the Model Registry (C1) and the built-in Model Library
//! (C2, §4.2) — ~24 deterministic position functions behind one trait.

pub mod builtin;
mod model;
mod registry;

pub use builtin::register_all;
pub use model::*;
pub use registry::*;

/// Convenience constructor: a registry pre-populated with every
/// built-in model, ready for lookup.
pub fn with_builtins() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    register_all(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_builtins_registers_every_model() {
        let registry = with_builtins();
        assert_eq!(registry.len(), 24);
    }
}
