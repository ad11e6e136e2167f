//! Component registrations.
//!
//! A [`Component`] describes how one concrete type is built and which
//! interfaces it is reachable under. It is handed to
//! [`ContainerBuilder::register`](crate::container::ContainerBuilder::register).
//!
//! # Examples
//! ```rust
//! use std::rc::Rc;
//! use trellis_container::prelude::*;
//!
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English {
//!     name: String,
//! }
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         format!("Hello, {}!", self.name)
//!     }
//! }
//!
//! let container = Container::builder()
//!     .register(
//!         Component::with_args(|name: String| Ok(English { name }))
//!             .provides::<dyn Greeter>(|c| c)
//!             .bind_args(String::from("world")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let greeter: Rc<dyn Greeter> = container.resolve_raw().unwrap();
//! assert_eq!(greeter.greet(), "Hello, world!");
//! ```

use std::any::{Any, type_name};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::container::Resolver;
use crate::error::{Result, TrellisError};
use crate::key::DependencyKey;
use crate::lifetime::Lifetime;
use crate::registry::{
    BoundArgsFn, ComponentDescriptor, ConstructFn, HookFn, Instance, InterfaceBinding, Source,
};
use crate::slice::{ContainerView, InterfaceSet};

/// Optional construction and teardown callbacks.
///
/// Both methods default to no-ops. Implement the ones you need and opt in
/// with [`Component::with_lifecycle`].
pub trait Lifecycle {
    /// Runs right after the container constructed the component.
    fn on_created(&self) {}

    /// Runs right before the container releases the component.
    fn on_will_destroy(&self) {}
}

/// Registration of a concrete component type `T`.
///
/// Without any [`provides`](Component::provides) call the component is
/// registered under its own type.
pub struct Component<T> {
    interfaces: Vec<InterfaceBinding>,
    lifetime: Lifetime,
    source: Source,
    bound_args: Option<BoundArgsFn>,
    dependencies: Vec<DependencyKey>,
    on_created: Option<HookFn>,
    on_will_destroy: Option<HookFn>,
    _component: PhantomData<fn() -> T>,
}

impl<T: 'static> Component<T> {
    /// A component built without arguments and without dependencies.
    pub fn new(construct: impl Fn() -> Result<T> + 'static) -> Self {
        let unit: fn() = || ();
        Self::owned(erase(move |_: &Resolver<'_>, ()| construct(), Some(unit)))
    }

    /// A component built with [`Default::default`].
    pub fn default_constructed() -> Self
    where
        T: Default,
    {
        Self::new(|| Ok(T::default()))
    }

    /// A component built from arguments of type `A`.
    ///
    /// The arguments come from [`bind_args`](Component::bind_args) or from
    /// an explicit `resolve_with` call, the latter taking precedence.
    pub fn with_args<A: 'static>(construct: impl Fn(A) -> Result<T> + 'static) -> Self {
        Self::owned(erase(move |_: &Resolver<'_>, args: A| construct(args), None))
    }

    /// A component that resolves its own dependencies through the
    /// [`Resolver`] it receives.
    pub fn with_context(construct: impl Fn(&Resolver<'_>) -> Result<T> + 'static) -> Self {
        let unit: fn() = || ();
        Self::owned(erase(move |resolver: &Resolver<'_>, ()| construct(resolver), Some(unit)))
    }

    /// Like [`with_context`](Component::with_context), plus arguments.
    pub fn with_context_args<A: 'static>(
        construct: impl Fn(&Resolver<'_>, A) -> Result<T> + 'static,
    ) -> Self {
        Self::owned(erase(construct, None))
    }

    /// A component receiving a [`ContainerView`] of the interface set `S`.
    ///
    /// Every interface of `S` is resolved before `construct` runs, and `S`
    /// is recorded as the component's declared dependencies.
    pub fn with_view<S: InterfaceSet>(construct: impl Fn(ContainerView<S>) -> Result<T> + 'static) -> Self {
        let unit: fn() = || ();
        let mut component = Self::owned(erase(
            move |resolver: &Resolver<'_>, ()| construct(resolver.view::<S>()?),
            Some(unit),
        ));
        component.dependencies.extend(S::keys());
        component
    }

    /// Like [`with_view`](Component::with_view), plus arguments.
    pub fn with_view_args<S: InterfaceSet, A: 'static>(
        construct: impl Fn(ContainerView<S>, A) -> Result<T> + 'static,
    ) -> Self {
        let mut component = Self::owned(erase(
            move |resolver: &Resolver<'_>, args: A| construct(resolver.view::<S>()?, args),
            None,
        ));
        component.dependencies.extend(S::keys());
        component
    }

    /// An instance owned by the caller.
    ///
    /// It is available from the start, is never constructed or destroyed
    /// by the container, and its lifecycle hooks never run.
    pub fn external(instance: Rc<T>) -> Self {
        let mut component = Self::owned(Source::External(instance as Instance));
        component.lifetime = Lifetime::External;
        component
    }

    fn owned(source: Source) -> Self {
        Self {
            interfaces: Vec::new(),
            lifetime: Lifetime::Owned,
            source,
            bound_args: None,
            dependencies: Vec::new(),
            on_created: None,
            on_will_destroy: None,
            _component: PhantomData,
        }
    }

    /// Registers the component under interface `I`.
    ///
    /// `cast` is almost always the identity closure `|c| c`, which lets the
    /// compiler coerce `Rc<T>` into `Rc<dyn Trait>`.
    pub fn provides<I: ?Sized + 'static>(mut self, cast: impl Fn(Rc<T>) -> Rc<I> + 'static) -> Self {
        self.interfaces.push(InterfaceBinding {
            key: DependencyKey::of::<I>(),
            cast: Box::new(move |instance: &Instance| {
                let concrete = Rc::clone(instance).downcast::<T>().ok()?;
                Some(Box::new(cast(concrete)) as Box<dyn Any>)
            }),
        });
        self
    }

    /// Binds constructor arguments at registration time.
    ///
    /// The container hands the constructor a clone; explicit arguments
    /// passed to `resolve_with` win over these.
    pub fn bind_args<A: Clone + 'static>(mut self, args: A) -> Self {
        self.bound_args = Some(Box::new(move || Box::new(args.clone()) as Box<dyn Any>));
        self
    }

    /// Declares a dependency for build-time graph validation.
    pub fn depends_on<I: ?Sized + 'static>(mut self) -> Self {
        self.dependencies.push(DependencyKey::of::<I>());
        self
    }

    /// Runs `hook` after the component is constructed.
    pub fn on_created(mut self, hook: impl Fn(&T) + 'static) -> Self {
        self.on_created = Some(typed_hook(hook));
        self
    }

    /// Runs `hook` before the component is released.
    pub fn on_will_destroy(mut self, hook: impl Fn(&T) + 'static) -> Self {
        self.on_will_destroy = Some(typed_hook(hook));
        self
    }

    /// Wires both [`Lifecycle`] methods as hooks.
    pub fn with_lifecycle(self) -> Self
    where
        T: Lifecycle,
    {
        self.on_created(<T as Lifecycle>::on_created)
            .on_will_destroy(<T as Lifecycle>::on_will_destroy)
    }

    pub(crate) fn into_descriptor(mut self) -> ComponentDescriptor {
        if self.interfaces.is_empty() {
            self = self.provides::<T>(|c| c);
        }

        ComponentDescriptor {
            component: type_name::<T>(),
            interfaces: self.interfaces,
            lifetime: self.lifetime,
            source: self.source,
            bound_args: self.bound_args,
            dependencies: self.dependencies,
            on_created: self.on_created,
            on_will_destroy: self.on_will_destroy,
        }
    }
}

fn typed_hook<T: 'static>(hook: impl Fn(&T) + 'static) -> HookFn {
    Box::new(move |component: &dyn Any| {
        if let Some(component) = component.downcast_ref::<T>() {
            hook(component);
        }
    })
}

/// Erases a typed constructor.
///
/// `default_args` supplies arguments when neither explicit nor bound ones
/// exist; only argument-less shapes have one.
fn erase<T, A, F>(construct: F, default_args: Option<fn() -> A>) -> Source
where
    T: 'static,
    A: 'static,
    F: Fn(&Resolver<'_>, A) -> Result<T> + 'static,
{
    let construct: ConstructFn = Box::new(move |resolver: &Resolver<'_>, args: Option<Box<dyn Any>>| {
        let args = match args {
            Some(boxed) => *boxed.downcast::<A>().map_err(|_| TrellisError::ArgumentMismatch {
                key: resolver.requested(),
                component: type_name::<T>(),
                expected: type_name::<A>(),
            })?,
            None => match default_args {
                Some(default_args) => default_args(),
                None => {
                    return Err(TrellisError::MissingArguments {
                        key: resolver.requested(),
                    });
                }
            },
        };

        let component = construct(resolver, args)?;
        Ok(Rc::new(component) as Instance)
    });
    Source::Construct(construct)
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape {
        fn area(&self) -> u32;
    }

    trait Named {
        fn name(&self) -> &str;
    }

    struct Square(u32);

    impl Shape for Square {
        fn area(&self) -> u32 {
            self.0 * self.0
        }
    }

    impl Named for Square {
        fn name(&self) -> &str {
            "square"
        }
    }

    #[test]
    fn defaults_to_own_type() {
        let descriptor = Component::new(|| Ok(Square(2))).into_descriptor();
        let keys: Vec<_> = descriptor.interfaces().copied().collect();
        assert_eq!(keys, vec![DependencyKey::of::<Square>()]);
        assert_eq!(descriptor.lifetime(), Lifetime::Owned);
        assert!(descriptor.component().contains("Square"));
    }

    #[test]
    fn provides_several_interfaces() {
        let descriptor = Component::new(|| Ok(Square(3)))
            .provides::<dyn Shape>(|c| c)
            .provides::<dyn Named>(|c| c)
            .into_descriptor();

        let instance: Instance = Rc::new(Square(3));

        let shape = descriptor
            .cast(&DependencyKey::of::<dyn Shape>(), &instance)
            .and_then(|b| b.downcast::<Rc<dyn Shape>>().ok())
            .unwrap();
        assert_eq!(shape.area(), 9);

        let named = descriptor
            .cast(&DependencyKey::of::<dyn Named>(), &instance)
            .and_then(|b| b.downcast::<Rc<dyn Named>>().ok())
            .unwrap();
        assert_eq!(named.name(), "square");

        assert!(descriptor.cast(&DependencyKey::of::<Square>(), &instance).is_none());
    }

    #[test]
    fn external_component() {
        let descriptor = Component::external(Rc::new(Square(1))).into_descriptor();
        assert_eq!(descriptor.lifetime(), Lifetime::External);
        assert!(matches!(descriptor.source, Source::External(_)));
    }

    #[test]
    fn depends_on_records_keys() {
        let descriptor = Component::new(|| Ok(Square(1)))
            .depends_on::<dyn Named>()
            .into_descriptor();
        assert_eq!(descriptor.dependencies(), &[DependencyKey::of::<dyn Named>()]);
    }
}
