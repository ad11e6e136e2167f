//! Provider modules: groups of related registrations.
//!
//! # Examples
//! ```rust
//! use trellis_container::prelude::*;
//!
//! trait Storage {}
//! struct MemoryStorage;
//! impl Storage for MemoryStorage {}
//!
//! struct StorageProvider;
//!
//! impl Provider for StorageProvider {
//!     fn register(&self, registrar: &mut dyn Registrar) {
//!         registrar.add(Component::new(|| Ok(MemoryStorage)).provides::<dyn Storage>(|c| c));
//!     }
//! }
//!
//! let container = Container::builder()
//!     .add_provider(&StorageProvider)
//!     .build()
//!     .unwrap();
//! assert!(container.resolve_raw::<dyn Storage>().is_ok());
//! ```

use crate::component::Component;
use crate::registry::ComponentDescriptor;

/// A module that registers related components.
///
/// Split registrations by concern instead of one long builder chain:
///
/// ```rust,ignore
/// Container::builder()
///     .add_provider(&NetworkProvider)
///     .add_provider(&StorageProvider)
///     .build()?;
/// ```
pub trait Provider {
    /// Adds this module's components. Called once per `add_provider`.
    fn register(&self, registrar: &mut dyn Registrar);

    /// Human-readable name for log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Sink for registrations, implemented by
/// [`ContainerBuilder`](crate::container::ContainerBuilder).
///
/// Providers only see this trait, so they can be tested against a mock.
pub trait Registrar {
    fn add_descriptor(&mut self, descriptor: ComponentDescriptor);
}

impl dyn Registrar + '_ {
    /// Adds a typed component registration.
    pub fn add<T: 'static>(&mut self, component: Component<T>) {
        self.add_descriptor(component.into_descriptor());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Records what providers register.
    #[derive(Default)]
    struct MockRegistrar {
        components: Vec<&'static str>,
    }

    impl Registrar for MockRegistrar {
        fn add_descriptor(&mut self, descriptor: ComponentDescriptor) {
            self.components.push(descriptor.component());
        }
    }

    trait Transport {}
    struct Tcp;
    impl Transport for Tcp {}

    struct NetworkProvider;

    impl Provider for NetworkProvider {
        fn register(&self, registrar: &mut dyn Registrar) {
            registrar.add(Component::new(|| Ok(Tcp)).provides::<dyn Transport>(|c| c));
            registrar.add(Component::new(|| Ok(8080u16)));
        }
    }

    #[test]
    fn provider_registers_components() {
        let mut registrar = MockRegistrar::default();
        NetworkProvider.register(&mut registrar);

        assert_eq!(registrar.components.len(), 2);
        assert!(registrar.components[0].ends_with("Tcp"));
        assert_eq!(registrar.components[1], "u16");
    }

    #[test]
    fn provider_has_name() {
        assert!(NetworkProvider.name().contains("NetworkProvider"));
    }
}
