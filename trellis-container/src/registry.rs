//! Component registry: the immutable table a container resolves against.
//!
//! Each [`ComponentDescriptor`] binds one concrete component type to the
//! interfaces it is registered under. The [`Registry`] keeps descriptors in
//! declaration order and indexes them by interface key.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::container::Resolver;
use crate::error::{DuplicateInterfaceError, Result, TrellisError};
use crate::key::DependencyKey;
use crate::lifetime::Lifetime;

/// A type-erased component instance.
pub(crate) type Instance = Rc<dyn Any>;

/// Converts an erased instance into a boxed `Rc<I>` for one interface `I`.
pub(crate) type CastFn = Box<dyn Fn(&Instance) -> Option<Box<dyn Any>>>;

/// Builds an instance. Receives the resolution context and the
/// constructor arguments, explicit or bound, if any.
pub(crate) type ConstructFn = Box<dyn Fn(&Resolver<'_>, Option<Box<dyn Any>>) -> Result<Instance>>;

/// Produces a fresh copy of the arguments bound at registration.
pub(crate) type BoundArgsFn = Box<dyn Fn() -> Box<dyn Any>>;

/// Lifecycle hook receiving the erased component.
pub(crate) type HookFn = Box<dyn Fn(&dyn Any)>;

/// One interface a component is reachable under.
pub(crate) struct InterfaceBinding {
    pub key: DependencyKey,
    pub cast: CastFn,
}

/// Where instances of a descriptor come from.
pub(crate) enum Source {
    Construct(ConstructFn),
    External(Instance),
}

/// Registration record for a single component.
///
/// Produced from a [`Component`](crate::component::Component); opaque to
/// users except through [`Provider`](crate::provider::Provider) plumbing.
pub struct ComponentDescriptor {
    pub(crate) component: &'static str,
    pub(crate) interfaces: Vec<InterfaceBinding>,
    pub(crate) lifetime: Lifetime,
    pub(crate) source: Source,
    pub(crate) bound_args: Option<BoundArgsFn>,
    pub(crate) dependencies: Vec<DependencyKey>,
    pub(crate) on_created: Option<HookFn>,
    pub(crate) on_will_destroy: Option<HookFn>,
}

impl ComponentDescriptor {
    /// Fully qualified name of the component type.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Interfaces in registration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &DependencyKey> {
        self.interfaces.iter().map(|b| &b.key)
    }

    /// Lifetime kind of the component.
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Dependencies declared for build-time validation.
    pub fn dependencies(&self) -> &[DependencyKey] {
        &self.dependencies
    }

    /// Casts an instance of this component to the interface `key`.
    pub(crate) fn cast(&self, key: &DependencyKey, instance: &Instance) -> Option<Box<dyn Any>> {
        self.interfaces
            .iter()
            .find(|b| b.key == *key)
            .and_then(|b| (b.cast)(instance))
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("component", &self.component)
            .field("interfaces", &self.interfaces.iter().map(|b| b.key).collect::<Vec<_>>())
            .field("lifetime", &self.lifetime)
            .field("bound_args", &self.bound_args.is_some())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Ordered descriptors plus the interface index.
///
/// Populated once when the container is built and immutable afterwards.
#[derive(Debug)]
pub(crate) struct Registry {
    descriptors: Vec<ComponentDescriptor>,
    index: HashMap<DependencyKey, usize>,
}

impl Registry {
    /// Indexes `descriptors` by interface.
    ///
    /// # Errors
    /// Returns [`TrellisError::DuplicateInterface`] for the first interface
    /// claimed by two descriptors.
    pub fn new(descriptors: Vec<ComponentDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(descriptors.len());

        for (position, descriptor) in descriptors.iter().enumerate() {
            for binding in &descriptor.interfaces {
                if let Some(&first) = index.get(&binding.key) {
                    let first: &ComponentDescriptor = &descriptors[first];
                    return Err(TrellisError::DuplicateInterface(DuplicateInterfaceError {
                        interface: binding.key,
                        first: first.component,
                        second: descriptor.component,
                    }));
                }
                index.insert(binding.key, position);
            }
            debug!(
                component = descriptor.component,
                lifetime = %descriptor.lifetime,
                interfaces = descriptor.interfaces.len(),
                "Registered component"
            );
        }

        Ok(Self { descriptors, index })
    }

    /// Looks up the descriptor index serving `key`.
    pub fn index_of(&self, key: &DependencyKey) -> Option<usize> {
        let found = self.index.get(key).copied();
        trace!(key = %key, found = found.is_some(), "Registry lookup");
        found
    }

    pub fn descriptor(&self, index: usize) -> &ComponentDescriptor {
        &self.descriptors[index]
    }

    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        &self.descriptors
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Every interface key, in declaration order.
    pub fn interface_keys(&self) -> Vec<DependencyKey> {
        self.descriptors
            .iter()
            .flat_map(|d| d.interfaces.iter().map(|b| b.key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Reader {}
    trait Writer {}
    struct File;

    fn no_cast(_: &Instance) -> Option<Box<dyn Any>> {
        None
    }

    fn descriptor(component: &'static str, keys: Vec<DependencyKey>) -> ComponentDescriptor {
        ComponentDescriptor {
            component,
            interfaces: keys
                .into_iter()
                .map(|key| InterfaceBinding {
                    key,
                    cast: Box::new(no_cast),
                })
                .collect(),
            lifetime: Lifetime::Owned,
            source: Source::External(Rc::new(0u8)),
            bound_args: None,
            dependencies: vec![],
            on_created: None,
            on_will_destroy: None,
        }
    }

    #[test]
    fn index_by_every_interface() {
        let registry = Registry::new(vec![
            descriptor("File", vec![DependencyKey::of::<dyn Reader>(), DependencyKey::of::<dyn Writer>()]),
            descriptor("Other", vec![DependencyKey::of::<File>()]),
        ])
        .unwrap();

        assert_eq!(registry.index_of(&DependencyKey::of::<dyn Reader>()), Some(0));
        assert_eq!(registry.index_of(&DependencyKey::of::<dyn Writer>()), Some(0));
        assert_eq!(registry.index_of(&DependencyKey::of::<File>()), Some(1));
        assert_eq!(registry.index_of(&DependencyKey::of::<u8>()), None);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.interface_keys().len(), 3);
    }

    #[test]
    fn duplicate_interface_is_rejected() {
        let result = Registry::new(vec![
            descriptor("First", vec![DependencyKey::of::<dyn Reader>()]),
            descriptor("Second", vec![DependencyKey::of::<dyn Writer>(), DependencyKey::of::<dyn Reader>()]),
        ]);

        match result.unwrap_err() {
            TrellisError::DuplicateInterface(err) => {
                assert_eq!(err.interface, DependencyKey::of::<dyn Reader>());
                assert_eq!(err.first, "First");
                assert_eq!(err.second, "Second");
            }
            other => panic!("Expected DuplicateInterface, got: {other:?}"),
        }
    }

    #[test]
    fn same_component_type_under_disjoint_interfaces() {
        let registry = Registry::new(vec![
            descriptor("File", vec![DependencyKey::of::<dyn Reader>()]),
            descriptor("File", vec![DependencyKey::of::<dyn Writer>()]),
        ]);
        assert!(registry.is_ok());
    }
}
