//! Interface identification keys.
//!
//! [`DependencyKey`] identifies an interface inside a container. Resolution
//! is always requested by interface, which is usually a `dyn Trait` type but
//! may also be a concrete component type registered as itself.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use trellis_support::rendering::shorten_type_name;

/// Uniquely identifies an interface in the container.
///
/// Two keys are equal when their [`TypeId`]s are equal; the type name is
/// carried along for diagnostics only.
///
/// # Examples
/// ```
/// use trellis_container::key::DependencyKey;
///
/// trait Logger {}
///
/// let key = DependencyKey::of::<dyn Logger>();
/// assert!(key.type_name().contains("Logger"));
/// assert_eq!(key, DependencyKey::of::<dyn Logger>());
/// assert_ne!(key, DependencyKey::of::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct DependencyKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl DependencyKey {
    /// Creates a key for interface `I`.
    #[inline]
    pub fn of<I: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<I>(),
            type_name: type_name::<I>(),
        }
    }

    /// Returns the [`TypeId`] of this interface.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the type name with module paths stripped, for log output.
    pub fn short_name(&self) -> String {
        shorten_type_name(self.type_name)
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyKey({})", self.type_name)
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
