//! The in-flight dependency chain used for cycle detection.
//!
//! A chain lists what is being constructed on the current call stack,
//! outermost first. It only lives for one resolve call tree.

use crate::key::DependencyKey;

/// One component under construction.
///
/// `owner` is the address of the container that owns the descriptor; it
/// only serves as an identity, so a derived container and its base may
/// both register the same interface without tripping the cycle check.
#[derive(Debug, Clone, Copy)]
struct Frame {
    owner: usize,
    index: usize,
    key: DependencyKey,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DependencyChain {
    frames: Vec<Frame>,
}

impl DependencyChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the component `index` of container `owner` is already under
    /// construction.
    pub fn contains(&self, owner: usize, index: usize) -> bool {
        self.frames
            .iter()
            .any(|f| f.owner == owner && f.index == index)
    }

    /// Returns a chain extended by one frame.
    pub fn push(&self, owner: usize, index: usize, key: DependencyKey) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.extend_from_slice(&self.frames);
        frames.push(Frame { owner, index, key });
        Self { frames }
    }

    /// The interface currently being constructed.
    pub fn last_key(&self) -> Option<DependencyKey> {
        self.frames.last().map(|f| f.key)
    }

    /// Keys from the first frame of the repeated component to the top of
    /// the chain, followed by `closing`.
    pub fn cycle(&self, owner: usize, index: usize, closing: DependencyKey) -> Vec<DependencyKey> {
        let start = self
            .frames
            .iter()
            .position(|f| f.owner == owner && f.index == index)
            .unwrap_or(0);

        self.frames[start..]
            .iter()
            .map(|f| f.key)
            .chain(std::iter::once(closing))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;
    struct C;

    #[test]
    fn empty_chain() {
        let chain = DependencyChain::new();
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.last_key(), None);
        assert!(!chain.contains(1, 0));
    }

    #[test]
    fn push_does_not_touch_parent() {
        let root = DependencyChain::new();
        let child = root.push(1, 0, DependencyKey::of::<A>());
        assert_eq!(root.len(), 0);
        assert_eq!(child.len(), 1);
        assert_eq!(child.last_key(), Some(DependencyKey::of::<A>()));
    }

    #[test]
    fn identity_includes_owner() {
        let chain = DependencyChain::new().push(1, 0, DependencyKey::of::<A>());
        assert!(chain.contains(1, 0));
        assert!(!chain.contains(2, 0));
        assert!(!chain.contains(1, 1));
    }

    #[test]
    fn cycle_starts_at_repeated_component() {
        let chain = DependencyChain::new()
            .push(1, 0, DependencyKey::of::<A>())
            .push(1, 1, DependencyKey::of::<B>())
            .push(1, 2, DependencyKey::of::<C>());

        let cycle = chain.cycle(1, 1, DependencyKey::of::<B>());
        assert_eq!(
            cycle,
            vec![
                DependencyKey::of::<B>(),
                DependencyKey::of::<C>(),
                DependencyKey::of::<B>(),
            ]
        );
    }
}
