//! Component lifetime kinds.
//!
//! A component is either created and destroyed by the container
//! ([`Lifetime::Owned`]) or handed in already built by the caller
//! ([`Lifetime::External`]).

use std::fmt;

/// Who is responsible for creating and destroying a component.
///
/// # Examples
/// ```
/// use trellis_container::lifetime::Lifetime;
///
/// assert!(Lifetime::Owned.is_constructed());
/// assert!(!Lifetime::External.is_constructed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Constructed on first resolve, destroyed with the container in
    /// reverse creation order.
    Owned,

    /// Supplied at registration time. Available from the start, never
    /// constructed, never destroyed by the container, and its lifecycle
    /// hooks never run.
    External,
}

impl Lifetime {
    /// Returns `true` if the container builds instances of this lifetime.
    #[inline]
    pub fn is_constructed(&self) -> bool {
        matches!(self, Lifetime::Owned)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Owned => write!(f, "Owned"),
            Lifetime::External => write!(f, "External"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_display() {
        assert_eq!(Lifetime::Owned.to_string(), "Owned");
        assert_eq!(Lifetime::External.to_string(), "External");
    }

    #[test]
    fn only_owned_is_constructed() {
        assert!(Lifetime::Owned.is_constructed());
        assert!(!Lifetime::External.is_constructed());
    }
}
