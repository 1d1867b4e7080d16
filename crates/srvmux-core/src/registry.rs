//! Case-insensitive name → interface constructor lookup.
//!
//! The registry is populated from an explicit list of builtin variants at
//! startup; there is no dynamic discovery. By the time `resolve` is
//! called, every intended variant must already be registered.

use std::collections::HashMap;

use crate::config::InterfaceOptions;
use crate::error::Error;
use crate::interface::ConsoleInterface;

/// Builds a concrete interface from the interface-specific fields of a
/// config section.
pub type InterfaceConstructor = fn(&InterfaceOptions) -> Result<Box<dyn ConsoleInterface>, Error>;

/// Pure name → constructor mapping; holds no transport state.
#[derive(Debug, Default)]
pub struct InterfaceRegistry {
    constructors: HashMap<String, InterfaceConstructor>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from an explicit `(name, constructor)` list.
    /// Later entries win on case-folded name collisions.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, InterfaceConstructor)>,
    ) -> Self {
        let mut registry = Self::new();
        for (name, constructor) in entries {
            registry.register(name, constructor);
        }
        registry
    }

    /// Store `constructor` under the case-folded `name`; the last
    /// registration for a given name wins.
    pub fn register(&mut self, name: &str, constructor: InterfaceConstructor) {
        self.constructors.insert(name.to_lowercase(), constructor);
    }

    /// Look up a constructor by case-folded name.
    pub fn resolve(&self, name: &str) -> Result<InterfaceConstructor, Error> {
        self.constructors
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| {
                let mut available: Vec<&str> =
                    self.constructors.keys().map(String::as_str).collect();
                available.sort_unstable();
                Error::UnknownInterface {
                    name: name.to_string(),
                    available: available.join(", "),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::Target;

    struct Dummy(Target);

    impl ConsoleInterface for Dummy {
        fn send(&self, _text: &str) -> Result<(), Error> {
            Ok(())
        }
        fn invoke_interface(&self, _command: &str) -> Result<(), Error> {
            Ok(())
        }
        fn target(&self) -> &Target {
            &self.0
        }
    }

    fn dummy_a(_options: &InterfaceOptions) -> Result<Box<dyn ConsoleInterface>, Error> {
        Ok(Box::new(Dummy(Target::new("a", "0"))))
    }

    fn dummy_b(_options: &InterfaceOptions) -> Result<Box<dyn ConsoleInterface>, Error> {
        Ok(Box::new(Dummy(Target::new("b", "0"))))
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let mut registry = InterfaceRegistry::new();
        registry.register("Tmux", dummy_a);

        for name in ["tmux", "TMUX", "Tmux"] {
            let ctor = registry.resolve(name).expect("registered");
            assert!(std::ptr::fn_addr_eq(ctor, dummy_a as InterfaceConstructor));
        }
    }

    #[test]
    fn last_registration_wins() {
        let registry = InterfaceRegistry::from_entries([
            ("tmux", dummy_a as InterfaceConstructor),
            ("TMUX", dummy_b as InterfaceConstructor),
        ]);
        let ctor = registry.resolve("tmux").expect("registered");
        assert!(std::ptr::fn_addr_eq(ctor, dummy_b as InterfaceConstructor));
    }

    #[test]
    fn unknown_interface_lists_available_names() {
        let registry =
            InterfaceRegistry::from_entries([("tmux", dummy_a as InterfaceConstructor)]);
        let err = registry.resolve("screen").expect_err("not registered");
        match err {
            Error::UnknownInterface { name, available } => {
                assert_eq!(name, "screen");
                assert_eq!(available, "tmux");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
