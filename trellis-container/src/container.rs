//! # The Container
//!
//! Owns one instance per registered component, builds them on demand in
//! dependency order and tears them down in reverse creation order.
//!
//! # Architecture
//! ```text
//! ContainerBuilder ──build()──> Rc<Container> ──base──> Rc<Container>
//!                                     │
//!                  resolve / find / resolve_all / slices
//!                                     │
//!                                     ▼
//!                   Resolver (one per construction, carries the chain)
//! ```
//!
//! # Examples
//! ```rust
//! use std::rc::Rc;
//! use trellis_container::prelude::*;
//!
//! trait Logger {
//!     fn log(&self, msg: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, msg: &str) -> String { format!("[console] {msg}") }
//! }
//!
//! struct UserService {
//!     logger: Rc<dyn Logger>,
//! }
//!
//! let container = Container::builder()
//!     .register(Component::new(|| Ok(ConsoleLogger)).provides::<dyn Logger>(|c| c))
//!     .register(
//!         Component::with_context(|r| Ok(UserService { logger: r.resolve()? }))
//!             .depends_on::<dyn Logger>(),
//!     )
//!     .build()
//!     .expect("Failed to build container");
//!
//! let service = container.resolve::<UserService>().expect("Failed to resolve");
//! assert_eq!(service.logger.log("hi"), "[console] hi");
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use once_cell::unsync::OnceCell;
use tracing::{debug, info, instrument, trace, warn};
use trellis_support::rendering::suggest_similar;

use crate::chain::DependencyChain;
use crate::component::Component;
use crate::error::{DependencyCycleError, NotRegisteredError, Result, TrellisError};
use crate::graph::{DependencyInfo, GraphValidator};
use crate::key::DependencyKey;
use crate::policy::MissingDependencyPolicy;
use crate::provider::{Provider, Registrar};
use crate::ptr::{SharedPtr, SharedRef};
use crate::registry::{ComponentDescriptor, Instance, Registry, Source};
use crate::slice::{ContainerSlice, ContainerSliceWeak, ContainerView, InterfaceSet, ResolveMode};

const MAX_SUGGESTIONS: usize = 3;

// ═══════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════

/// Container-wide configuration, set through [`ContainerBuilder`].
#[derive(Debug, Clone)]
pub struct ContainerSettings {
    /// What to do with requests for interfaces nobody registered.
    pub missing_dependency: MissingDependencyPolicy,
    /// Validate declared dependencies when building.
    pub validate_graph: bool,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            missing_dependency: MissingDependencyPolicy::Error,
            validate_graph: true,
        }
    }
}

// ═══════════════════════════════════════════
// ContainerBuilder
// ═══════════════════════════════════════════

/// Collects registrations, then builds a [`Container`].
///
/// # Examples
/// ```rust,ignore
/// let container = Container::builder()
///     .base(&app_container)
///     .register(Component::new(|| Ok(Session::default())))
///     .missing_dependency_policy(MissingDependencyPolicy::Panic)
///     .build()?;
/// ```
pub struct ContainerBuilder {
    descriptors: Vec<ComponentDescriptor>,
    base: Option<BaseContainer>,
    settings: ContainerSettings,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            base: None,
            settings: ContainerSettings::default(),
        }
    }

    /// Adds a component. Declaration order is the `resolve_all` order.
    pub fn register<T: 'static>(mut self, component: Component<T>) -> Self {
        self.descriptors.push(component.into_descriptor());
        self
    }

    /// Sets the base container consulted for interfaces not registered here.
    ///
    /// Accepts a container or a slice of one; a slice restricts the base to
    /// its interface set. The new container keeps its base alive.
    pub fn base(mut self, base: impl Into<BaseContainer>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Adds every registration of a [`Provider`] module.
    pub fn add_provider(mut self, provider: &dyn Provider) -> Self {
        debug!(provider = provider.name(), "Adding provider");
        provider.register(&mut self);
        self
    }

    // ── Settings ──

    pub fn missing_dependency_policy(mut self, policy: impl Into<MissingDependencyPolicy>) -> Self {
        self.settings.missing_dependency = policy.into();
        self
    }

    /// Enables or disables declared-dependency validation in `build`.
    pub fn validate_graph(mut self, validate: bool) -> Self {
        self.settings.validate_graph = validate;
        self
    }

    pub fn settings(mut self, settings: ContainerSettings) -> Self {
        self.settings = settings;
        self
    }

    // ── Build ──

    /// Builds the container.
    ///
    /// No component is constructed here; external instances are installed.
    ///
    /// # Errors
    /// - [`TrellisError::DuplicateInterface`]: two registrations share an interface
    /// - [`TrellisError::DependencyCycle`]: declared dependencies form a cycle
    /// - [`TrellisError::NotRegistered`]: a declared dependency nobody serves
    #[instrument(skip(self), name = "container_build")]
    pub fn build(self) -> Result<Rc<Container>> {
        info!(
            registered = self.descriptors.len(),
            has_base = self.base.is_some(),
            "Building container"
        );

        let registry = Registry::new(self.descriptors)?;

        if self.settings.validate_graph {
            let infos: Vec<DependencyInfo> = registry
                .descriptors()
                .iter()
                .flat_map(|descriptor| {
                    descriptor.interfaces().map(move |key| DependencyInfo {
                        key: *key,
                        component: descriptor.component(),
                        dependencies: descriptor.dependencies().to_vec(),
                    })
                })
                .collect();

            let inherited = self.base.as_ref().map(BaseContainer::keys).unwrap_or_default();
            GraphValidator::new(infos, inherited)
                .fallbacks_may_serve(self.settings.missing_dependency.serves_fallbacks())
                .validate()?;
        }

        let slots = registry
            .descriptors()
            .iter()
            .map(|descriptor| match &descriptor.source {
                Source::External(instance) => OnceCell::with_value(Rc::clone(instance)),
                Source::Construct(_) => OnceCell::new(),
            })
            .collect();

        let constructing = registry.descriptors().iter().map(|_| Cell::new(false)).collect();

        let container = Rc::new_cyclic(|this| Container {
            registry,
            slots,
            constructing,
            creation_log: RefCell::new(Vec::new()),
            base: self.base,
            settings: self.settings,
            this: this.clone(),
        });

        info!(components = container.len(), "Container built");
        Ok(container)
    }
}

impl Registrar for ContainerBuilder {
    fn add_descriptor(&mut self, descriptor: ComponentDescriptor) {
        self.descriptors.push(descriptor);
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("registered", &self.descriptors.len())
            .field("base", &self.base.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

// ═══════════════════════════════════════════
// BaseContainer
// ═══════════════════════════════════════════

/// A base container, possibly restricted to a slice's interfaces.
#[derive(Clone)]
pub struct BaseContainer {
    container: Rc<Container>,
    visible: Option<Vec<DependencyKey>>,
}

impl BaseContainer {
    pub fn container(&self) -> &Rc<Container> {
        &self.container
    }

    fn is_visible(&self, key: &DependencyKey) -> bool {
        self.visible.as_ref().is_none_or(|keys| keys.contains(key))
    }

    fn locate(&self, key: &DependencyKey) -> Option<(&Container, usize)> {
        if self.is_visible(key) {
            self.container.locate(key)
        } else {
            None
        }
    }

    /// Every key this base can serve.
    fn keys(&self) -> HashSet<DependencyKey> {
        match &self.visible {
            Some(keys) => keys.iter().copied().collect(),
            None => self.container.reachable_keys(),
        }
    }

    fn resolve_all(&self) -> Result<()> {
        match &self.visible {
            None => self.container.resolve_all(),
            Some(keys) => {
                for key in keys {
                    self.container.resolve_key(key, &DependencyChain::new(), None)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Rc<Container>> for BaseContainer {
    fn from(container: Rc<Container>) -> Self {
        Self {
            container,
            visible: None,
        }
    }
}

impl From<&Rc<Container>> for BaseContainer {
    fn from(container: &Rc<Container>) -> Self {
        Rc::clone(container).into()
    }
}

impl<S: InterfaceSet> From<ContainerSlice<S>> for BaseContainer {
    fn from(slice: ContainerSlice<S>) -> Self {
        Self {
            container: Rc::clone(slice.container()),
            visible: Some(S::keys()),
        }
    }
}

impl<S: InterfaceSet> From<&ContainerSlice<S>> for BaseContainer {
    fn from(slice: &ContainerSlice<S>) -> Self {
        Self {
            container: Rc::clone(slice.container()),
            visible: Some(S::keys()),
        }
    }
}

impl fmt::Debug for BaseContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseContainer")
            .field("container", &self.container)
            .field("visible", &self.visible)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Dependency injection container.
///
/// Always handled through `Rc<Container>`, as returned by
/// [`ContainerBuilder::build`]. Single threaded: it is neither `Send` nor
/// `Sync`.
///
/// Dropping the last `Rc` destroys every constructed component in reverse
/// creation order, then releases the base.
pub struct Container {
    registry: Registry,
    /// One write-once slot per descriptor.
    slots: Vec<OnceCell<Instance>>,
    /// Set while a slot's constructor runs, whatever chain reached it.
    constructing: Vec<Cell<bool>>,
    /// Descriptor indices in creation order.
    creation_log: RefCell<Vec<usize>>,
    base: Option<BaseContainer>,
    settings: ContainerSettings,
    this: Weak<Container>,
}

impl Container {
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    // ── Resolve ──

    /// Returns the component serving `I`, constructing it and everything it
    /// needs first if necessary.
    ///
    /// ```rust,ignore
    /// let db: Rc<dyn Database> = container.resolve_raw()?;
    /// ```
    pub fn resolve_raw<I: ?Sized + 'static>(&self) -> Result<Rc<I>> {
        let key = DependencyKey::of::<I>();
        trace!(key = %key, "Resolving");
        let boxed = self.resolve_key(&key, &DependencyChain::new(), None)?;
        unbox(key, boxed)
    }

    /// Like [`resolve_raw`](Self::resolve_raw), passing constructor
    /// arguments that take precedence over bound ones.
    ///
    /// The arguments are ignored when the component already exists.
    pub fn resolve_raw_with<I: ?Sized + 'static, A: 'static>(&self, args: A) -> Result<Rc<I>> {
        let key = DependencyKey::of::<I>();
        trace!(key = %key, "Resolving with explicit arguments");
        let boxed = self.resolve_key(&key, &DependencyChain::new(), Some(Box::new(args)))?;
        unbox(key, boxed)
    }

    /// Resolves `I` into a handle that keeps this container alive.
    pub fn resolve<I: ?Sized + 'static>(self: &Rc<Self>) -> Result<SharedRef<I>> {
        Ok(SharedRef::new(self.resolve_raw()?, Rc::clone(self)))
    }

    pub fn resolve_with<I: ?Sized + 'static, A: 'static>(self: &Rc<Self>, args: A) -> Result<SharedRef<I>> {
        Ok(SharedRef::new(self.resolve_raw_with(args)?, Rc::clone(self)))
    }

    /// Resolves the base, then every local component in declaration order.
    ///
    /// Components that already exist are skipped, so this can be called
    /// repeatedly.
    #[instrument(skip(self), fields(components = self.registry.len()))]
    pub fn resolve_all(&self) -> Result<()> {
        if let Some(base) = &self.base {
            base.resolve_all()?;
        }

        for (index, descriptor) in self.registry.descriptors().iter().enumerate() {
            for key in descriptor.interfaces() {
                self.instantiate(index, key, &DependencyChain::new(), None)?;
            }
        }

        debug!(created = self.created(), "Resolved all components");
        Ok(())
    }

    // ── Find ──

    /// Returns the component serving `I` if it was already constructed.
    ///
    /// Never constructs anything.
    pub fn find_raw<I: ?Sized + 'static>(&self) -> Option<Rc<I>> {
        let key = DependencyKey::of::<I>();
        self.find_key(&key)?.downcast::<Rc<I>>().ok().map(|rc| *rc)
    }

    /// Like [`find_raw`](Self::find_raw); the pointer only keeps the
    /// container alive when it is non-empty.
    pub fn find<I: ?Sized + 'static>(self: &Rc<Self>) -> SharedPtr<I> {
        SharedPtr::new(self.find_raw(), self)
    }

    // ── Slices ──

    /// Eager slice over `S`: every interface of `S` is resolved now.
    pub fn slice<S: InterfaceSet>(self: &Rc<Self>) -> Result<ContainerSlice<S>> {
        ContainerSlice::new(Rc::clone(self))
    }

    /// Lazy slice over `S`: nothing is resolved until asked.
    pub fn slice_lazy<S: InterfaceSet>(self: &Rc<Self>) -> Result<ContainerSlice<S>> {
        ContainerSlice::lazy(Rc::clone(self))
    }

    /// Non-owning view over `S`, resolved eagerly.
    pub fn view<S: InterfaceSet>(self: &Rc<Self>) -> Result<ContainerView<S>> {
        Ok(self.slice::<S>()?.view())
    }

    // ── Introspection ──

    /// Whether this container or a base can serve `key`.
    pub fn can_serve(&self, key: &DependencyKey) -> bool {
        self.locate(key).is_some()
    }

    /// Whether the component serving `I` has been constructed.
    pub fn is_created<I: ?Sized + 'static>(&self) -> bool {
        self.locate(&DependencyKey::of::<I>())
            .is_some_and(|(owner, index)| owner.slots[index].get().is_some())
    }

    /// Number of local registrations.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Number of components this container constructed so far.
    pub fn created(&self) -> usize {
        self.creation_log.borrow().len()
    }

    /// Component type names in creation order.
    pub fn creation_order(&self) -> Vec<&'static str> {
        self.creation_log
            .borrow()
            .iter()
            .map(|&index| self.registry.descriptor(index).component())
            .collect()
    }

    /// Local interface keys in declaration order.
    pub fn interfaces(&self) -> Vec<DependencyKey> {
        self.registry.interface_keys()
    }

    pub fn base(&self) -> Option<&Rc<Container>> {
        self.base.as_ref().map(BaseContainer::container)
    }

    pub fn settings(&self) -> &ContainerSettings {
        &self.settings
    }

    // ── Internal ──

    fn address(&self) -> usize {
        self as *const Container as usize
    }

    /// Finds the container owning the descriptor for `key`, walking bases.
    fn locate(&self, key: &DependencyKey) -> Option<(&Container, usize)> {
        match self.registry.index_of(key) {
            Some(index) => Some((self, index)),
            None => self.base.as_ref().and_then(|base| base.locate(key)),
        }
    }

    fn reachable_keys(&self) -> HashSet<DependencyKey> {
        let mut keys: HashSet<DependencyKey> = self.registry.interface_keys().into_iter().collect();
        if let Some(base) = &self.base {
            keys.extend(base.keys());
        }
        keys
    }

    pub(crate) fn resolve_key(
        &self,
        key: &DependencyKey,
        chain: &DependencyChain,
        args: Option<Box<dyn Any>>,
    ) -> Result<Box<dyn Any>> {
        match self.locate(key) {
            Some((owner, index)) => owner.instantiate(index, key, chain, args),
            None => self.handle_missing(key, chain.last_key()),
        }
    }

    pub(crate) fn find_key(&self, key: &DependencyKey) -> Option<Box<dyn Any>> {
        match self.locate(key) {
            Some((owner, index)) => {
                let instance = owner.slots[index].get()?;
                owner.registry.descriptor(index).cast(key, instance)
            }
            None => match self.settings.missing_dependency {
                MissingDependencyPolicy::Error => None,
                _ => self.handle_missing(key, None).ok(),
            },
        }
    }

    /// Returns the instance of descriptor `index` cast to `key`, building it
    /// first if needed.
    fn instantiate(
        &self,
        index: usize,
        key: &DependencyKey,
        chain: &DependencyChain,
        args: Option<Box<dyn Any>>,
    ) -> Result<Box<dyn Any>> {
        let descriptor = self.registry.descriptor(index);

        if let Some(instance) = self.slots[index].get() {
            trace!(key = %key, "Already constructed");
            return cast(descriptor, key, instance);
        }

        // A lazy handle resolves on a fresh chain, so the chain alone can
        // miss a slot that is already being constructed.
        let owner = self.address();
        if chain.contains(owner, index) || self.constructing[index].get() {
            let cycle = chain.cycle(owner, index, *key);
            warn!(key = %key, depth = chain.len(), "Dependency cycle detected");
            return Err(TrellisError::DependencyCycle(DependencyCycleError { chain: cycle }));
        }

        let construct = match &descriptor.source {
            Source::Construct(construct) => construct,
            Source::External(instance) => return cast(descriptor, key, instance),
        };

        let chain = chain.push(owner, index, *key);
        let args = args.or_else(|| descriptor.bound_args.as_ref().map(|bound| bound()));
        let resolver = Resolver {
            container: self,
            chain: &chain,
        };

        let in_progress = InProgress::enter(&self.constructing[index]);
        let mut created = false;
        let instance = self.slots[index].get_or_try_init(|| {
            created = true;
            construct(&resolver, args)
        });
        drop(in_progress);
        let instance = instance?;

        if created {
            self.creation_log.borrow_mut().push(index);
            if let Some(hook) = &descriptor.on_created {
                hook(instance.as_ref());
            }
            debug!(
                component = descriptor.component,
                key = %key,
                depth = chain.len(),
                "Constructed component"
            );
        }

        cast(descriptor, key, instance)
    }

    pub(crate) fn handle_missing(
        &self,
        key: &DependencyKey,
        required_by: Option<DependencyKey>,
    ) -> Result<Box<dyn Any>> {
        match &self.settings.missing_dependency {
            MissingDependencyPolicy::Error => Err(self.not_registered(key, required_by)),
            MissingDependencyPolicy::Panic => panic!("{}", self.not_registered(key, required_by)),
            MissingDependencyPolicy::Handler(handler) => {
                debug!(key = %key, "Asking missing-dependency handler");
                handler(key).ok_or_else(|| self.not_registered(key, required_by))
            }
        }
    }

    pub(crate) fn not_registered(&self, key: &DependencyKey, required_by: Option<DependencyKey>) -> TrellisError {
        let mut names: Vec<&str> = self.reachable_keys().iter().map(|k| k.type_name()).collect();
        names.sort_unstable();
        TrellisError::NotRegistered(NotRegisteredError {
            requested: *key,
            required_by,
            suggestions: suggest_similar(key.type_name(), &names, MAX_SUGGESTIONS),
        })
    }

    fn upgrade(&self, key: &DependencyKey) -> Result<Rc<Container>> {
        self.this
            .upgrade()
            .ok_or(TrellisError::ContainerDropped { key: *key })
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        let log = std::mem::take(self.creation_log.get_mut());
        if !log.is_empty() {
            debug!(components = log.len(), "Destroying container");
        }

        for &index in log.iter().rev() {
            let descriptor = self.registry.descriptor(index);
            if let Some(instance) = self.slots[index].take() {
                if let Some(hook) = &descriptor.on_will_destroy {
                    hook(instance.as_ref());
                }
                trace!(component = descriptor.component, "Destroyed component");
            }
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.registry.len())
            .field("created", &self.creation_log.borrow().len())
            .field("has_base", &self.base.is_some())
            .finish()
    }
}

/// Marks a slot as under construction until dropped.
struct InProgress<'a>(&'a Cell<bool>);

impl<'a> InProgress<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

fn cast(descriptor: &ComponentDescriptor, key: &DependencyKey, instance: &Instance) -> Result<Box<dyn Any>> {
    descriptor.cast(key, instance).ok_or_else(|| {
        TrellisError::construction(
            *key,
            format!("{} cannot be viewed as {key}", descriptor.component()),
        )
    })
}

fn unbox<I: ?Sized + 'static>(key: DependencyKey, boxed: Box<dyn Any>) -> Result<Rc<I>> {
    boxed
        .downcast::<Rc<I>>()
        .map(|rc| *rc)
        .map_err(|_| TrellisError::FallbackMismatch { key })
}

// ═══════════════════════════════════════════
// Resolver
// ═══════════════════════════════════════════

/// Resolution context handed to contextual constructors.
///
/// Everything resolved through it joins the current dependency chain, so
/// cycles are reported instead of recursing forever.
pub struct Resolver<'a> {
    container: &'a Container,
    chain: &'a DependencyChain,
}

impl Resolver<'_> {
    /// Resolves a dependency of the component under construction.
    pub fn resolve<I: ?Sized + 'static>(&self) -> Result<Rc<I>> {
        let key = DependencyKey::of::<I>();
        let boxed = self.container.resolve_key(&key, self.chain, None)?;
        unbox(key, boxed)
    }

    /// Like [`resolve`](Self::resolve), with explicit constructor arguments.
    pub fn resolve_with<I: ?Sized + 'static, A: 'static>(&self, args: A) -> Result<Rc<I>> {
        let key = DependencyKey::of::<I>();
        let boxed = self.container.resolve_key(&key, self.chain, Some(Box::new(args)))?;
        unbox(key, boxed)
    }

    /// Returns an already constructed dependency without building it.
    pub fn find<I: ?Sized + 'static>(&self) -> Option<Rc<I>> {
        self.container.find_raw()
    }

    /// The interface whose construction is in progress.
    pub fn requested(&self) -> DependencyKey {
        self.chain
            .last_key()
            .unwrap_or_else(DependencyKey::of::<()>)
    }

    /// Eager slice over `S`, resolved inside the current chain.
    ///
    /// Storing a `ContainerSlice` inside a component makes the component
    /// keep its own container alive; prefer [`view`](Self::view) or
    /// [`slice_weak`](Self::slice_weak) for that.
    pub fn slice<S: InterfaceSet>(&self) -> Result<ContainerSlice<S>> {
        self.resolve_set::<S>()?;
        Ok(ContainerSlice::from_parts(self.owner::<S>()?, ResolveMode::Eager))
    }

    /// Lazy slice over `S`; nothing is resolved now.
    pub fn slice_lazy<S: InterfaceSet>(&self) -> Result<ContainerSlice<S>> {
        Ok(ContainerSlice::from_parts(self.owner::<S>()?, ResolveMode::Lazy))
    }

    /// Non-owning view over `S`, resolved inside the current chain.
    pub fn view<S: InterfaceSet>(&self) -> Result<ContainerView<S>> {
        self.resolve_set::<S>()?;
        Ok(ContainerView::from_parts(self.container.this.clone(), ResolveMode::Eager))
    }

    /// Non-owning lazy view over `S`.
    pub fn view_lazy<S: InterfaceSet>(&self) -> ContainerView<S> {
        ContainerView::from_parts(self.container.this.clone(), ResolveMode::Lazy)
    }

    /// Weak slice over `S`, resolved inside the current chain.
    pub fn slice_weak<S: InterfaceSet>(&self) -> Result<ContainerSliceWeak<S>> {
        self.resolve_set::<S>()?;
        Ok(ContainerSliceWeak::from_parts(self.container.this.clone(), ResolveMode::Eager))
    }

    fn resolve_set<S: InterfaceSet>(&self) -> Result<()> {
        for key in S::keys() {
            self.container.resolve_key(&key, self.chain, None)?;
        }
        Ok(())
    }

    fn owner<S: InterfaceSet>(&self) -> Result<Rc<Container>> {
        let key = S::keys().first().copied().unwrap_or_else(|| self.requested());
        self.container.upgrade(&key)
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("requested", &self.chain.last_key())
            .field("depth", &self.chain.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder, ContainerSettings, Resolver};
    pub use crate::component::{Component, Lifecycle};
    pub use crate::error::{Result, TrellisError};
    pub use crate::factory::Factory;
    pub use crate::{dependency_getter, interface_set};
    pub use crate::key::DependencyKey;
    pub use crate::policy::{Fallbacks, MissingDependencyPolicy};
    pub use crate::provider::{Provider, Registrar};
    pub use crate::ptr::{SharedPtr, SharedRef, WeakPtr};
    pub use crate::slice::{ContainerSlice, ContainerSliceWeak, ContainerView, Exposes, InterfaceSet, SubsetOf};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
