//! Slices and views: handles exposing a fixed subset of a container's
//! interfaces.
//!
//! An interface set is a marker type declared with [`interface_set!`]. A
//! handle over set `S` only offers queries for interfaces `I` with
//! `S: Exposes<I>`; asking for anything else does not compile.
//!
//! Three ownership kinds exist:
//!
//! | Handle                  | Keeps the container alive | Typical holder            |
//! |-------------------------|---------------------------|---------------------------|
//! | [`ContainerSlice`]      | yes                       | application code          |
//! | [`ContainerView`]       | no, fails once it is gone | components                |
//! | [`ContainerSliceWeak`]  | no, must be `lock`ed      | long-lived observers      |
//!
//! A component storing a `ContainerSlice` of its own container keeps that
//! container alive forever. Components should hold views or weak slices.
//!
//! Handles built eagerly resolve every interface of the set up front;
//! lazy handles resolve on demand. Narrowing to a subset never resolves
//! anything the wider handle already resolved.

use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::chain::DependencyChain;
use crate::container::Container;
use crate::error::{Result, TrellisError};
use crate::key::DependencyKey;
use crate::ptr::{SharedPtr, SharedRef};

/// A fixed, ordered set of interfaces.
///
/// Implemented by the marker types [`interface_set!`] declares.
pub trait InterfaceSet: 'static {
    /// Interface keys in declaration order.
    fn keys() -> Vec<DependencyKey>;
}

/// Marks `I` as a member of the interface set.
pub trait Exposes<I: ?Sized + 'static>: InterfaceSet {}

/// `Self` exposes nothing that `S` does not.
///
/// Generated by the `in` clause of [`interface_set!`]; the generated impl
/// only compiles when `S` exposes every interface of `Self`. Bounds the
/// infallible `narrow` methods.
pub trait SubsetOf<S: InterfaceSet>: InterfaceSet {}

impl<S: InterfaceSet> SubsetOf<S> for S {}

/// Declares an interface set marker type.
///
/// ```
/// use trellis_container::interface_set;
/// use trellis_container::slice::InterfaceSet;
///
/// trait Reader {}
/// trait Writer {}
///
/// interface_set! {
///     /// Everything a file copier needs.
///     pub CopyDeps { dyn Reader, dyn Writer }
/// }
///
/// // Narrowable from `CopyDeps`, checked at compile time.
/// interface_set! { pub ReadDeps { dyn Reader } in CopyDeps }
///
/// assert_eq!(CopyDeps::keys().len(), 2);
/// ```
///
/// Declaring a subset of a set that lacks one of its interfaces does not
/// compile:
///
/// ```compile_fail
/// use trellis_container::interface_set;
///
/// trait Reader {}
/// trait Writer {}
///
/// interface_set! { ReadOnly { dyn Reader } }
/// interface_set! { WriteOnly { dyn Writer } in ReadOnly }
/// ```
#[macro_export]
macro_rules! interface_set {
    (@define [$(#[$meta:meta])*] $vis:vis $name:ident { $($iface:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name;

        impl $crate::slice::InterfaceSet for $name {
            fn keys() -> ::std::vec::Vec<$crate::key::DependencyKey> {
                ::std::vec![$($crate::key::DependencyKey::of::<$iface>()),*]
            }
        }

        $(impl $crate::slice::Exposes<$iface> for $name {})*
    };

    (@subset $name:ident $super:ty; { $($iface:ty),* $(,)? }) => {
        impl $crate::slice::SubsetOf<$super> for $name
        where
            $($super: $crate::slice::Exposes<$iface>,)*
        {
        }
    };

    ($(#[$meta:meta])* $vis:vis $name:ident $set:tt $(in $($super:ty),+ $(,)?)?) => {
        $crate::interface_set!(@define [$(#[$meta])*] $vis $name $set);
        $($($crate::interface_set!(@subset $name $super; $set);)+)?
    };
}

/// Declares an extension trait with named getters for one interface.
///
/// The getters are available on every slice, view and weak slice whose
/// set exposes the interface. Both resolve, so they also work on lazy
/// handles.
///
/// ```
/// use std::rc::Rc;
/// use trellis_container::prelude::*;
///
/// trait HttpClient {
///     fn base_url(&self) -> &str;
/// }
/// struct Client;
/// impl HttpClient for Client {
///     fn base_url(&self) -> &str { "https://example.org" }
/// }
///
/// dependency_getter! { HttpClientDependency: http_client, http_client_raw => dyn HttpClient }
/// interface_set! { Net { dyn HttpClient } }
///
/// let container = Container::builder()
///     .register(Component::new(|| Ok(Client)).provides::<dyn HttpClient>(|c| c))
///     .build()
///     .unwrap();
///
/// let net = container.view::<Net>().unwrap();
/// assert_eq!(net.http_client().unwrap().base_url(), "https://example.org");
/// let raw: Rc<dyn HttpClient> = net.http_client_raw().unwrap();
/// assert_eq!(raw.base_url(), "https://example.org");
/// ```
#[macro_export]
macro_rules! dependency_getter {
    (@impl $trait_name:ident $getter:ident $raw:ident ($iface:ty) for $handle:ident) => {
        impl<S: $crate::slice::Exposes<$iface>> $trait_name for $crate::slice::$handle<S> {
            fn $getter(&self) -> $crate::error::Result<$crate::ptr::SharedRef<$iface>> {
                self.resolve::<$iface>()
            }

            fn $raw(&self) -> $crate::error::Result<::std::rc::Rc<$iface>> {
                self.resolve_raw::<$iface>()
            }
        }
    };

    ($(#[$meta:meta])* $vis:vis $trait_name:ident: $getter:ident, $raw:ident => $iface:ty) => {
        $(#[$meta])*
        $vis trait $trait_name {
            fn $getter(&self) -> $crate::error::Result<$crate::ptr::SharedRef<$iface>>;
            fn $raw(&self) -> $crate::error::Result<::std::rc::Rc<$iface>>;
        }

        $crate::dependency_getter!(@impl $trait_name $getter $raw ($iface) for ContainerSlice);
        $crate::dependency_getter!(@impl $trait_name $getter $raw ($iface) for ContainerView);
        $crate::dependency_getter!(@impl $trait_name $getter $raw ($iface) for ContainerSliceWeak);
    };
}

/// When a handle resolves the interfaces of its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Everything is resolved when the handle is created.
    #[default]
    Eager,
    /// Interfaces are resolved when queried through `resolve`.
    Lazy,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMode::Eager => write!(f, "eager"),
            ResolveMode::Lazy => write!(f, "lazy"),
        }
    }
}

// ── Shared helpers ──

/// Fails fast when `S` names an interface the container cannot serve.
///
/// Skipped under a fallback-producing policy, which may serve anything;
/// the panic policy panics here.
fn ensure_servable<S: InterfaceSet>(container: &Container) -> Result<()> {
    if container.settings().missing_dependency.serves_fallbacks() {
        return Ok(());
    }

    match S::keys().into_iter().find(|key| !container.can_serve(key)) {
        Some(key) => container.handle_missing(&key, None).map(drop),
        None => Ok(()),
    }
}

fn ensure_subset<S: InterfaceSet, N: InterfaceSet>() -> Result<()> {
    let source = S::keys();
    let missing: Vec<String> = N::keys()
        .into_iter()
        .filter(|key| !source.contains(key))
        .map(|key| key.short_name())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TrellisError::NotASubset { missing })
    }
}

fn resolve_set<S: InterfaceSet>(container: &Container) -> Result<()> {
    for key in S::keys() {
        container.resolve_key(&key, &DependencyChain::new(), None)?;
    }
    debug!(set = %DependencyKey::of::<S>(), "Resolved interface set");
    Ok(())
}

fn live<S: InterfaceSet>(container: &Weak<Container>) -> Result<Rc<Container>> {
    container.upgrade().ok_or(TrellisError::ContainerDropped {
        key: DependencyKey::of::<S>(),
    })
}

// ═══════════════════════════════════════════
// ContainerSlice
// ═══════════════════════════════════════════

/// Shared handle to a subset of a container's interfaces.
///
/// Queries outside the set are rejected at compile time:
///
/// ```compile_fail
/// use std::rc::Rc;
/// use trellis_container::prelude::*;
///
/// trait Reader {}
/// trait Writer {}
/// struct Disk;
/// impl Reader for Disk {}
/// impl Writer for Disk {}
///
/// interface_set! { ReadOnly { dyn Reader } }
///
/// let container = Container::builder()
///     .register(Component::new(|| Ok(Disk)).provides::<dyn Reader>(|c| c).provides::<dyn Writer>(|c| c))
///     .build()
///     .unwrap();
/// let slice = container.slice::<ReadOnly>().unwrap();
/// let writer: Rc<dyn Writer> = slice.resolve_raw().unwrap();
/// ```
pub struct ContainerSlice<S> {
    container: Rc<Container>,
    mode: ResolveMode,
    _set: PhantomData<fn() -> S>,
}

impl<S: InterfaceSet> ContainerSlice<S> {
    /// Eager slice: resolves every interface of `S` before returning.
    pub fn new(container: Rc<Container>) -> Result<Self> {
        ensure_servable::<S>(&container)?;
        resolve_set::<S>(&container)?;
        Ok(Self::from_parts(container, ResolveMode::Eager))
    }

    /// Lazy slice: checks `S` can be served but resolves nothing.
    pub fn lazy(container: Rc<Container>) -> Result<Self> {
        ensure_servable::<S>(&container)?;
        Ok(Self::from_parts(container, ResolveMode::Lazy))
    }

    pub(crate) fn from_parts(container: Rc<Container>, mode: ResolveMode) -> Self {
        Self {
            container,
            mode,
            _set: PhantomData,
        }
    }

    pub fn find_raw<I: ?Sized + 'static>(&self) -> Option<Rc<I>>
    where
        S: Exposes<I>,
    {
        self.container.find_raw()
    }

    pub fn find<I: ?Sized + 'static>(&self) -> SharedPtr<I>
    where
        S: Exposes<I>,
    {
        self.container.find()
    }

    pub fn resolve_raw<I: ?Sized + 'static>(&self) -> Result<Rc<I>>
    where
        S: Exposes<I>,
    {
        self.container.resolve_raw()
    }

    pub fn resolve<I: ?Sized + 'static>(&self) -> Result<SharedRef<I>>
    where
        S: Exposes<I>,
    {
        self.container.resolve()
    }

    /// Resolves every interface of `S`.
    pub fn resolve_all(&self) -> Result<()> {
        resolve_set::<S>(&self.container)
    }

    /// Interfaces of `S`, in declaration order.
    pub fn keys(&self) -> Vec<DependencyKey> {
        S::keys()
    }

    /// A slice over the subset `N`, keeping this slice's mode.
    ///
    /// Resolves nothing. `N` must be declared `in S` with
    /// [`interface_set!`], so a wider `N` is a compile error.
    pub fn narrow<N: SubsetOf<S>>(&self) -> ContainerSlice<N> {
        ContainerSlice::from_parts(Rc::clone(&self.container), self.mode)
    }

    /// Like [`narrow`](Self::narrow) for sets without a declared relation,
    /// checked when called.
    ///
    /// # Errors
    /// [`TrellisError::NotASubset`] if `N` has interfaces `S` lacks.
    pub fn try_narrow<N: InterfaceSet>(&self) -> Result<ContainerSlice<N>> {
        ensure_subset::<S, N>()?;
        Ok(ContainerSlice::from_parts(Rc::clone(&self.container), self.mode))
    }

    /// An eager slice over the subset `N`.
    ///
    /// Resolves `N` only when this slice is lazy.
    pub fn narrow_eager<N: SubsetOf<S>>(&self) -> Result<ContainerSlice<N>> {
        let narrowed = self.narrow::<N>();
        if self.mode == ResolveMode::Lazy {
            narrowed.resolve_all()?;
        }
        Ok(ContainerSlice::from_parts(narrowed.container, ResolveMode::Eager))
    }

    /// Non-owning view over the same set.
    pub fn view(&self) -> ContainerView<S> {
        ContainerView::from_parts(Rc::downgrade(&self.container), self.mode)
    }

    /// Weak slice over the same set.
    pub fn downgrade(&self) -> ContainerSliceWeak<S> {
        ContainerSliceWeak::from_parts(Rc::downgrade(&self.container), self.mode)
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    pub fn container(&self) -> &Rc<Container> {
        &self.container
    }
}

impl<S> Clone for ContainerSlice<S> {
    fn clone(&self) -> Self {
        Self {
            container: Rc::clone(&self.container),
            mode: self.mode,
            _set: PhantomData,
        }
    }
}

impl<S> fmt::Debug for ContainerSlice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSlice")
            .field("set", &std::any::type_name::<S>())
            .field("mode", &self.mode)
            .finish()
    }
}

// ═══════════════════════════════════════════
// ContainerView
// ═══════════════════════════════════════════

/// Non-owning handle to a subset of a container's interfaces.
///
/// Every query upgrades the container for its own duration and fails with
/// [`TrellisError::ContainerDropped`] once the container is gone.
pub struct ContainerView<S> {
    container: Weak<Container>,
    mode: ResolveMode,
    _set: PhantomData<fn() -> S>,
}

impl<S: InterfaceSet> ContainerView<S> {
    /// Eager view: resolves every interface of `S` before returning.
    pub fn new(container: &Rc<Container>) -> Result<Self> {
        Ok(ContainerSlice::<S>::new(Rc::clone(container))?.view())
    }

    pub fn lazy(container: &Rc<Container>) -> Result<Self> {
        Ok(ContainerSlice::<S>::lazy(Rc::clone(container))?.view())
    }

    pub(crate) fn from_parts(container: Weak<Container>, mode: ResolveMode) -> Self {
        Self {
            container,
            mode,
            _set: PhantomData,
        }
    }

    /// Empty once the container is gone.
    pub fn find_raw<I: ?Sized + 'static>(&self) -> Option<Rc<I>>
    where
        S: Exposes<I>,
    {
        self.container.upgrade()?.find_raw()
    }

    pub fn find<I: ?Sized + 'static>(&self) -> SharedPtr<I>
    where
        S: Exposes<I>,
    {
        self.container
            .upgrade()
            .map(|container| container.find())
            .unwrap_or_default()
    }

    pub fn resolve_raw<I: ?Sized + 'static>(&self) -> Result<Rc<I>>
    where
        S: Exposes<I>,
    {
        live::<S>(&self.container)?.resolve_raw()
    }

    pub fn resolve<I: ?Sized + 'static>(&self) -> Result<SharedRef<I>>
    where
        S: Exposes<I>,
    {
        live::<S>(&self.container)?.resolve()
    }

    pub fn resolve_all(&self) -> Result<()> {
        let container = live::<S>(&self.container)?;
        resolve_set::<S>(&container)
    }

    pub fn keys(&self) -> Vec<DependencyKey> {
        S::keys()
    }

    /// A view over the subset `N`, keeping this view's mode. Resolves nothing.
    pub fn narrow<N: SubsetOf<S>>(&self) -> ContainerView<N> {
        ContainerView::from_parts(self.container.clone(), self.mode)
    }

    /// Runtime-checked [`narrow`](Self::narrow).
    pub fn try_narrow<N: InterfaceSet>(&self) -> Result<ContainerView<N>> {
        ensure_subset::<S, N>()?;
        Ok(ContainerView::from_parts(self.container.clone(), self.mode))
    }

    /// An owning slice over the same set, if the container is still alive.
    pub fn upgrade(&self) -> Option<ContainerSlice<S>> {
        let container = self.container.upgrade()?;
        Some(ContainerSlice::from_parts(container, self.mode))
    }

    pub fn is_alive(&self) -> bool {
        self.container.strong_count() > 0
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }
}

impl<S> Clone for ContainerView<S> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            mode: self.mode,
            _set: PhantomData,
        }
    }
}

impl<S> fmt::Debug for ContainerView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerView")
            .field("set", &std::any::type_name::<S>())
            .field("mode", &self.mode)
            .field("alive", &(self.container.strong_count() > 0))
            .finish()
    }
}

// ═══════════════════════════════════════════
// ContainerSliceWeak
// ═══════════════════════════════════════════

/// Weak handle to a subset of a container's interfaces.
///
/// [`lock`](Self::lock) yields a [`ContainerSlice`] while the container is
/// alive; it never resolves anything again.
pub struct ContainerSliceWeak<S> {
    container: Weak<Container>,
    mode: ResolveMode,
    _set: PhantomData<fn() -> S>,
}

impl<S: InterfaceSet> ContainerSliceWeak<S> {
    /// Eager weak slice: resolves every interface of `S` before returning.
    pub fn new(container: &Rc<Container>) -> Result<Self> {
        Ok(ContainerSlice::<S>::new(Rc::clone(container))?.downgrade())
    }

    pub fn lazy(container: &Rc<Container>) -> Result<Self> {
        Ok(ContainerSlice::<S>::lazy(Rc::clone(container))?.downgrade())
    }

    pub(crate) fn from_parts(container: Weak<Container>, mode: ResolveMode) -> Self {
        Self {
            container,
            mode,
            _set: PhantomData,
        }
    }

    pub fn lock(&self) -> Option<ContainerSlice<S>> {
        let container = self.container.upgrade()?;
        Some(ContainerSlice::from_parts(container, self.mode))
    }

    pub fn find_raw<I: ?Sized + 'static>(&self) -> Option<Rc<I>>
    where
        S: Exposes<I>,
    {
        self.container.upgrade()?.find_raw()
    }

    pub fn resolve_raw<I: ?Sized + 'static>(&self) -> Result<Rc<I>>
    where
        S: Exposes<I>,
    {
        live::<S>(&self.container)?.resolve_raw()
    }

    pub fn resolve<I: ?Sized + 'static>(&self) -> Result<SharedRef<I>>
    where
        S: Exposes<I>,
    {
        live::<S>(&self.container)?.resolve()
    }

    pub fn resolve_all(&self) -> Result<()> {
        let container = live::<S>(&self.container)?;
        resolve_set::<S>(&container)
    }

    pub fn narrow<N: SubsetOf<S>>(&self) -> ContainerSliceWeak<N> {
        ContainerSliceWeak::from_parts(self.container.clone(), self.mode)
    }

    /// Runtime-checked [`narrow`](Self::narrow).
    pub fn try_narrow<N: InterfaceSet>(&self) -> Result<ContainerSliceWeak<N>> {
        ensure_subset::<S, N>()?;
        Ok(ContainerSliceWeak::from_parts(self.container.clone(), self.mode))
    }

    pub fn is_alive(&self) -> bool {
        self.container.strong_count() > 0
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }
}

impl<S> Clone for ContainerSliceWeak<S> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            mode: self.mode,
            _set: PhantomData,
        }
    }
}

impl<S> fmt::Debug for ContainerSliceWeak<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSliceWeak")
            .field("set", &std::any::type_name::<S>())
            .field("mode", &self.mode)
            .field("alive", &(self.container.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use std::cell::Cell;

    trait Reader {
        fn read(&self) -> &str;
    }

    trait Writer {
        fn written(&self) -> usize;
    }

    trait Clock {}

    struct Disk;

    impl Reader for Disk {
        fn read(&self) -> &str {
            "bytes"
        }
    }

    impl Writer for Disk {
        fn written(&self) -> usize {
            5
        }
    }

    struct SystemClock;
    impl Clock for SystemClock {}

    crate::interface_set! { Io { dyn Reader, dyn Writer } }
    crate::interface_set! { ReadOnly { dyn Reader } in Io }
    crate::interface_set! { Timed { dyn Reader, dyn Clock } }

    fn container(built: &Rc<Cell<u32>>) -> Rc<Container> {
        let built = Rc::clone(built);
        Container::builder()
            .register(
                Component::new(move || {
                    built.set(built.get() + 1);
                    Ok(Disk)
                })
                .provides::<dyn Reader>(|c| c)
                .provides::<dyn Writer>(|c| c),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn eager_slice_resolves_set() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);

        let slice = ContainerSlice::<Io>::new(Rc::clone(&container)).unwrap();
        assert_eq!(built.get(), 1);
        assert_eq!(slice.mode(), ResolveMode::Eager);
        assert_eq!(slice.find_raw::<dyn Reader>().unwrap().read(), "bytes");
        assert_eq!(slice.resolve_raw::<dyn Writer>().unwrap().written(), 5);
    }

    #[test]
    fn lazy_slice_defers() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);

        let slice = container.slice_lazy::<Io>().unwrap();
        assert_eq!(built.get(), 0);
        assert!(slice.find::<dyn Reader>().is_none());

        slice.resolve::<dyn Reader>().unwrap();
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn narrowing_keeps_mode_and_resolves_nothing() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);

        let lazy = container.slice_lazy::<Io>().unwrap();
        let narrowed: ContainerSlice<ReadOnly> = lazy.narrow();
        assert_eq!(narrowed.mode(), ResolveMode::Lazy);
        assert_eq!(built.get(), 0);

        let eager = lazy.narrow_eager::<ReadOnly>().unwrap();
        assert_eq!(eager.mode(), ResolveMode::Eager);
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn views_and_weak_slices_narrow() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);

        let view = ContainerView::<Io>::lazy(&container).unwrap();
        let narrowed: ContainerView<ReadOnly> = view.narrow();
        assert_eq!(narrowed.mode(), ResolveMode::Lazy);
        assert!(narrowed.try_narrow::<Io>().is_err());
        assert_eq!(built.get(), 0);

        let weak = view.upgrade().unwrap().downgrade().narrow::<ReadOnly>();
        assert_eq!(weak.resolve_raw::<dyn Reader>().unwrap().read(), "bytes");
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn narrowing_to_a_wider_set_fails() {
        let built = Rc::new(Cell::new(0));
        let slice = container(&built).slice::<ReadOnly>().unwrap();

        match slice.try_narrow::<Io>().unwrap_err() {
            TrellisError::NotASubset { missing } => assert_eq!(missing, vec!["dyn Writer".to_string()]),
            other => panic!("Expected NotASubset, got: {other:?}"),
        }
    }

    #[test]
    fn unservable_set_is_rejected_up_front() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);

        let err = ContainerSlice::<Timed>::new(Rc::clone(&container)).unwrap_err();
        assert!(matches!(err, TrellisError::NotRegistered(_)));
        assert_eq!(built.get(), 0);
    }

    #[test]
    fn view_does_not_keep_container_alive() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);
        let view = ContainerView::<Io>::new(&container).unwrap();

        assert!(view.is_alive());
        assert!(view.resolve_raw::<dyn Reader>().is_ok());

        drop(container);
        assert!(!view.is_alive());
        assert!(view.find_raw::<dyn Reader>().is_none());
        assert!(matches!(
            view.resolve_raw::<dyn Reader>(),
            Err(TrellisError::ContainerDropped { .. })
        ));
        assert!(view.upgrade().is_none());
    }

    #[test]
    fn weak_slice_lock() {
        let built = Rc::new(Cell::new(0));
        let container = container(&built);
        let weak = ContainerSliceWeak::<Io>::lazy(&container).unwrap();

        let locked = weak.lock().unwrap();
        assert_eq!(locked.mode(), ResolveMode::Lazy);
        assert_eq!(built.get(), 0);
        assert_eq!(Rc::strong_count(&container), 2);
        drop(locked);

        drop(container);
        assert!(weak.lock().is_none());
        assert!(!weak.is_alive());
    }
}
