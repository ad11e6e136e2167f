//! Lifetime wrappers tying component handles to their container.
//!
//! - [`SharedRef`]: never empty, keeps the container alive.
//! - [`SharedPtr`]: may be empty; keeps the container alive only while it
//!   points at a component.
//! - [`WeakPtr`]: keeps nothing alive; [`WeakPtr::lock`] yields an empty
//!   [`SharedPtr`] once the container is gone.
//!
//! Holding the container keeps every component it owns alive and postpones
//! its teardown, so prefer short-lived wrappers.

use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::container::Container;

/// Non-null component handle that keeps its container alive.
pub struct SharedRef<T: ?Sized> {
    ptr: Rc<T>,
    owner: Rc<Container>,
}

impl<T: ?Sized> SharedRef<T> {
    pub(crate) fn new(ptr: Rc<T>, owner: Rc<Container>) -> Self {
        Self { ptr, owner }
    }

    /// The component.
    pub fn get(&self) -> &T {
        &self.ptr
    }

    /// The component as a plain `Rc`, detached from the container.
    pub fn as_rc(&self) -> &Rc<T> {
        &self.ptr
    }

    /// The container this handle keeps alive.
    pub fn container(&self) -> &Rc<Container> {
        &self.owner
    }

    /// Weak counterpart of this handle.
    pub fn downgrade(&self) -> WeakPtr<T> {
        WeakPtr {
            ptr: Some(Rc::downgrade(&self.ptr)),
            owner: Rc::downgrade(&self.owner),
        }
    }
}

impl<T: ?Sized> Deref for SharedRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.ptr
    }
}

impl<T: ?Sized> Clone for SharedRef<T> {
    fn clone(&self) -> Self {
        Self {
            ptr: Rc::clone(&self.ptr),
            owner: Rc::clone(&self.owner),
        }
    }
}

impl<T: ?Sized> PartialEq for SharedRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ptr, &other.ptr)
    }
}

impl<T: ?Sized> Eq for SharedRef<T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SharedRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRef").field(&&*self.ptr).finish()
    }
}

/// Nullable component handle.
///
/// The container is only held while the pointer is set: a `SharedPtr`
/// obtained from `find` before the component exists is empty and does not
/// keep the container alive.
pub struct SharedPtr<T: ?Sized> {
    ptr: Option<Rc<T>>,
    owner: Option<Rc<Container>>,
}

impl<T: ?Sized> SharedPtr<T> {
    pub(crate) fn new(ptr: Option<Rc<T>>, owner: &Rc<Container>) -> Self {
        let owner = ptr.as_ref().map(|_| Rc::clone(owner));
        Self { ptr, owner }
    }

    /// An empty pointer.
    pub fn empty() -> Self {
        Self { ptr: None, owner: None }
    }

    /// The component, if set.
    pub fn get(&self) -> Option<&T> {
        self.ptr.as_deref()
    }

    /// The component as a plain `Rc`, if set.
    pub fn as_rc(&self) -> Option<&Rc<T>> {
        self.ptr.as_ref()
    }

    pub fn is_some(&self) -> bool {
        self.ptr.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.ptr.is_none()
    }

    /// Empties the pointer, releasing the container.
    pub fn reset(&mut self) {
        self.ptr = None;
        self.owner = None;
    }

    /// Converts into a [`SharedRef`] when set.
    pub fn to_shared_ref(&self) -> Option<SharedRef<T>> {
        match (&self.ptr, &self.owner) {
            (Some(ptr), Some(owner)) => Some(SharedRef::new(Rc::clone(ptr), Rc::clone(owner))),
            _ => None,
        }
    }

    /// Weak counterpart of this pointer.
    pub fn downgrade(&self) -> WeakPtr<T> {
        WeakPtr {
            ptr: self.ptr.as_ref().map(Rc::downgrade),
            owner: self.owner.as_ref().map(Rc::downgrade).unwrap_or_default(),
        }
    }
}

impl<T: ?Sized> Default for SharedPtr<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> Clone for SharedPtr<T> {
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<T: ?Sized> From<SharedRef<T>> for SharedPtr<T> {
    fn from(shared: SharedRef<T>) -> Self {
        Self {
            ptr: Some(shared.ptr),
            owner: Some(shared.owner),
        }
    }
}

impl<T: ?Sized> PartialEq for SharedPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.ptr, &other.ptr) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SharedPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedPtr").field(&self.get()).finish()
    }
}

/// Component handle that keeps nothing alive.
pub struct WeakPtr<T: ?Sized> {
    ptr: Option<Weak<T>>,
    owner: Weak<Container>,
}

impl<T: ?Sized> WeakPtr<T> {
    /// An empty pointer; `lock` always fails.
    pub fn empty() -> Self {
        Self {
            ptr: None,
            owner: Weak::new(),
        }
    }

    /// Upgrades to a [`SharedPtr`]; empty once the container is gone.
    pub fn lock(&self) -> SharedPtr<T> {
        let owner = self.owner.upgrade();
        let ptr = self.ptr.as_ref().and_then(Weak::upgrade);
        match (ptr, owner) {
            (Some(ptr), Some(owner)) => SharedPtr {
                ptr: Some(ptr),
                owner: Some(owner),
            },
            _ => SharedPtr::empty(),
        }
    }

    /// Whether `lock` would currently succeed.
    pub fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0 && self.ptr.as_ref().is_some_and(|p| p.strong_count() > 0)
    }

    pub fn reset(&mut self) {
        self.ptr = None;
        self.owner = Weak::new();
    }
}

impl<T: ?Sized> Default for WeakPtr<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> Clone for WeakPtr<T> {
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<T: ?Sized> From<&SharedPtr<T>> for WeakPtr<T> {
    fn from(shared: &SharedPtr<T>) -> Self {
        shared.downgrade()
    }
}

impl<T: ?Sized> From<&SharedRef<T>> for WeakPtr<T> {
    fn from(shared: &SharedRef<T>) -> Self {
        shared.downgrade()
    }
}

impl<T: ?Sized> fmt::Debug for WeakPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakPtr").field("alive", &self.is_alive()).finish()
    }
}
