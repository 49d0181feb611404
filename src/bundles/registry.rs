//! Explicit name → factory registration table.

use std::collections::HashMap;

use crate::error::BundleError;

type BundleFactory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Table of factories for the bundles a host knows how to construct.
///
/// Populated by explicit [`register`](BundleRegistry::register) calls — there
/// is no scanning or dynamic loading behind it. The type parameter is the
/// host's plugin interface, typically a boxed trait object:
///
/// ```
/// use outmux::BundleRegistry;
///
/// trait Search { fn run(&self) -> u32; }
/// struct Greedy;
/// impl Search for Greedy { fn run(&self) -> u32 { 1 } }
///
/// let mut registry: BundleRegistry<Box<dyn Search>> = BundleRegistry::new();
/// registry.register("greedy", || Box::new(Greedy)).unwrap();
///
/// let plugin = registry.instantiate("greedy").unwrap();
/// assert_eq!(plugin.run(), 1);
/// ```
pub struct BundleRegistry<T> {
    factories: HashMap<String, BundleFactory<T>>,
}

impl<T> Default for BundleRegistry<T> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<T> BundleRegistry<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`.
    ///
    /// Fails with [`BundleError::Duplicate`] if the name is taken; existing
    /// registrations are never silently replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> T + Send + Sync + 'static,
    ) -> Result<(), BundleError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(BundleError::Duplicate { name });
        }
        self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Runs the factory registered under `name`.
    pub fn instantiate(&self, name: &str) -> Result<T, BundleError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(BundleError::Unknown {
                name: name.to_string(),
            }),
        }
    }

    /// True if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Sorted list of registered names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_instantiate() {
        let mut registry: BundleRegistry<u32> = BundleRegistry::new();
        registry.register("one", || 1).unwrap();
        registry.register("two", || 2).unwrap();

        assert_eq!(registry.instantiate("one").unwrap(), 1);
        assert_eq!(registry.instantiate("two").unwrap(), 2);
        assert_eq!(registry.names(), vec!["one", "two"]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry: BundleRegistry<u32> = BundleRegistry::new();
        registry.register("x", || 1).unwrap();

        let err = registry.register("x", || 2).unwrap_err();
        assert_eq!(err.as_label(), "bundle_duplicate");
        // The original factory survives.
        assert_eq!(registry.instantiate("x").unwrap(), 1);
    }

    #[test]
    fn unknown_name_fails_with_its_name() {
        let registry: BundleRegistry<u32> = BundleRegistry::new();
        let err = registry.instantiate("ghost").unwrap_err();
        match err {
            BundleError::Unknown { name } => assert_eq!(name, "ghost"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn each_instantiation_runs_the_factory() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry: BundleRegistry<usize> = BundleRegistry::new();
        let counter = calls.clone();
        registry
            .register("count", move || counter.fetch_add(1, Ordering::SeqCst))
            .unwrap();

        registry.instantiate("count").unwrap();
        registry.instantiate("count").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
