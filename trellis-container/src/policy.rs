//! What a container does when an interface was never registered.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::key::DependencyKey;

/// User callback producing a fallback for an unregistered interface.
///
/// The returned box must hold an `Rc<I>` for the requested interface `I`;
/// anything else surfaces as [`TrellisError::FallbackMismatch`](crate::error::TrellisError::FallbackMismatch).
/// Returning `None` reports the interface as not registered.
pub type MissingHandler = Rc<dyn Fn(&DependencyKey) -> Option<Box<dyn Any>>>;

/// Behaviour on a request for an interface that neither the container nor
/// its bases registered.
#[derive(Clone, Default)]
pub enum MissingDependencyPolicy {
    /// Fail with [`TrellisError::NotRegistered`](crate::error::TrellisError::NotRegistered).
    /// `find` returns nothing.
    #[default]
    Error,
    /// Panic with the not-registered diagnostic.
    Panic,
    /// Ask a handler for an externally owned fallback.
    ///
    /// Fallbacks are not owned by the container: it never destroys them and
    /// never runs lifecycle hooks on them.
    Handler(MissingHandler),
}

impl MissingDependencyPolicy {
    /// Wraps a handler closure.
    pub fn handler(handler: impl Fn(&DependencyKey) -> Option<Box<dyn Any>> + 'static) -> Self {
        Self::Handler(Rc::new(handler))
    }

    /// Whether unregistered interfaces may still be served.
    pub fn serves_fallbacks(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

impl fmt::Debug for MissingDependencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("Error"),
            Self::Panic => f.write_str("Panic"),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl fmt::Display for MissingDependencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Panic => write!(f, "panic"),
            Self::Handler(_) => write!(f, "handler"),
        }
    }
}

/// Typed table of fallback instances, turned into a
/// [`MissingDependencyPolicy::Handler`].
///
/// ```
/// use std::rc::Rc;
/// use trellis_container::policy::{Fallbacks, MissingDependencyPolicy};
///
/// trait Clock {
///     fn now(&self) -> u64;
/// }
///
/// struct Frozen;
/// impl Clock for Frozen {
///     fn now(&self) -> u64 { 0 }
/// }
///
/// let policy: MissingDependencyPolicy = Fallbacks::new()
///     .with::<dyn Clock>(Rc::new(Frozen))
///     .into();
/// assert_eq!(policy.to_string(), "handler");
/// ```
#[derive(Default)]
pub struct Fallbacks {
    entries: HashMap<DependencyKey, Box<dyn Fn() -> Box<dyn Any>>>,
}

impl Fallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `instance` whenever `I` is missing.
    pub fn with<I: ?Sized + 'static>(mut self, instance: Rc<I>) -> Self {
        self.entries.insert(
            DependencyKey::of::<I>(),
            Box::new(move || Box::new(Rc::clone(&instance)) as Box<dyn Any>),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Fallbacks> for MissingDependencyPolicy {
    fn from(fallbacks: Fallbacks) -> Self {
        let entries = fallbacks.entries;
        Self::handler(move |key| entries.get(key).map(|make| make()))
    }
}

impl fmt::Debug for Fallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Clock {
        fn now(&self) -> u64;
    }

    struct Frozen(u64);

    impl Clock for Frozen {
        fn now(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn default_is_error() {
        assert!(matches!(MissingDependencyPolicy::default(), MissingDependencyPolicy::Error));
    }

    #[test]
    fn fallbacks_serve_registered_interfaces_only() {
        let frozen: Rc<dyn Clock> = Rc::new(Frozen(7));
        let fallbacks = Fallbacks::new().with::<dyn Clock>(Rc::clone(&frozen));
        assert_eq!(fallbacks.len(), 1);

        let MissingDependencyPolicy::Handler(handler) = MissingDependencyPolicy::from(fallbacks) else {
            panic!("Expected a handler policy");
        };

        let served = handler(&DependencyKey::of::<dyn Clock>())
            .and_then(|b| b.downcast::<Rc<dyn Clock>>().ok())
            .unwrap();
        assert_eq!(served.now(), 7);
        assert!(Rc::ptr_eq(&served, &frozen));

        assert!(handler(&DependencyKey::of::<String>()).is_none());
    }

    #[test]
    fn only_handlers_serve_fallbacks() {
        assert!(!MissingDependencyPolicy::Error.serves_fallbacks());
        assert!(!MissingDependencyPolicy::Panic.serves_fallbacks());
        assert!(MissingDependencyPolicy::from(Fallbacks::new()).serves_fallbacks());
    }

    #[test]
    fn debug_hides_handler() {
        let policy = MissingDependencyPolicy::handler(|_| None);
        assert_eq!(format!("{policy:?}"), "Handler(..)");
    }
}
