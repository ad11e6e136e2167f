//! Error types for trellis container operations.
//!
//! Almost every error here is a configuration error: it points at a
//! mistake in how the container was set up, not at a transient condition.
//! Nothing is retried.

use std::fmt;

use trellis_support::rendering::{render_bullets, render_chain};

use crate::key::DependencyKey;

/// Main error type for all trellis operations.
#[derive(Debug, thiserror::Error)]
pub enum TrellisError {
    /// Requested interface was never registered, locally or in a base.
    #[error("{}", .0)]
    NotRegistered(NotRegisteredError),

    /// Resolving an interface required that same interface again.
    #[error("{}", .0)]
    DependencyCycle(DependencyCycleError),

    /// Two registrations claim the same interface.
    #[error("{}", .0)]
    DuplicateInterface(DuplicateInterfaceError),

    /// Constructor arguments have a different type than the constructor takes.
    #[error("Wrong constructor arguments for {key}: {component} expects {expected}")]
    ArgumentMismatch {
        key: DependencyKey,
        component: &'static str,
        expected: &'static str,
    },

    /// Constructor takes arguments but none were bound or passed.
    #[error(
        "No constructor arguments for {key}\n  Hint: bind them with .bind_args(..) or pass them to resolve_with"
    )]
    MissingArguments { key: DependencyKey },

    /// A component constructor returned an error.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: DependencyKey,
        #[source]
        source: Box<dyn std::error::Error + 'static>,
    },

    /// A narrowed slice asked for interfaces its source does not expose.
    #[error("Slice is not a subset of its source; missing:{}", render_bullets(.missing))]
    NotASubset { missing: Vec<String> },

    /// A weak slice or view was used after its container was dropped.
    #[error("Container was dropped before {key} could be reached")]
    ContainerDropped { key: DependencyKey },

    /// A missing-dependency handler returned a value of the wrong type.
    #[error("Fallback for {key} has the wrong type")]
    FallbackMismatch { key: DependencyKey },
}

impl TrellisError {
    /// Wraps a constructor failure.
    pub fn construction<E>(key: DependencyKey, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + 'static>>,
    {
        TrellisError::ConstructionFailed {
            key,
            source: source.into(),
        }
    }
}

/// Error when an interface was not registered.
#[derive(Debug)]
pub struct NotRegisteredError {
    /// The interface that was requested.
    pub requested: DependencyKey,
    /// The component that required it, if known.
    pub required_by: Option<DependencyKey>,
    /// Registered interfaces with similar names.
    pub suggestions: Vec<String>,
}

impl fmt::Display for NotRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interface not registered: {}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:{}", render_bullets(&self.suggestions))?;
        }

        write!(
            f,
            "\n  Hint: register a component with .provides::<{}>(..) in this container or its base",
            self.requested.short_name()
        )
    }
}

/// Error when a dependency cycle is detected.
///
/// The last entry of `chain` is the interface that closes the cycle. A
/// cycle may close through another interface of a component already in
/// the chain, so that key need not appear earlier.
#[derive(Debug)]
pub struct DependencyCycleError {
    pub chain: Vec<DependencyKey>,
}

impl DependencyCycleError {
    /// The interface that would have closed the cycle.
    pub fn closing(&self) -> Option<&DependencyKey> {
        self.chain.last()
    }
}

impl fmt::Display for DependencyCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.chain.iter().map(|k| k.short_name()).collect();
        write!(f, "Dependency cycle detected:\n  {}", render_chain(&names))?;
        write!(
            f,
            "\n  Hint: hand one side a lazy slice or a Factory instead of resolving it in the constructor"
        )
    }
}

/// Error when the same interface is registered twice.
#[derive(Debug)]
pub struct DuplicateInterfaceError {
    pub interface: DependencyKey,
    /// Component type of the first registration.
    pub first: &'static str,
    /// Component type of the offending registration.
    pub second: &'static str,
}

impl fmt::Display for DuplicateInterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interface registered twice: {}\n  First by: {}\n  Again by: {}",
            self.interface, self.first, self.second
        )
    }
}

/// Convenient Result type for trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;
