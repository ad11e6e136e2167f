//! Factories for objects the container does not own.
//!
//! A [`Factory`] captures a handle (usually a slice or view) and builds a
//! fresh object on every call. It is the way out of constructor cycles:
//! a component holding a factory defers resolution until it is actually
//! needed, after its own construction has finished.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;

/// Builds unregistered `T`s from a captured handle.
///
/// Whether the factory keeps the container alive depends on the handle:
/// a [`ContainerSlice`](crate::slice::ContainerSlice) does, a
/// [`ContainerView`](crate::slice::ContainerView) does not.
///
/// ```
/// use trellis_container::prelude::*;
///
/// trait Clock {
///     fn now(&self) -> u64;
/// }
/// struct Fixed;
/// impl Clock for Fixed {
///     fn now(&self) -> u64 { 42 }
/// }
///
/// struct Stamp(u64);
///
/// interface_set! { ClockOnly { dyn Clock } }
///
/// let container = Container::builder()
///     .register(Component::new(|| Ok(Fixed)).provides::<dyn Clock>(|c| c))
///     .build()
///     .unwrap();
///
/// let stamps = Factory::new(container.view::<ClockOnly>().unwrap(), |view: &ContainerView<ClockOnly>| {
///     Ok(Stamp(view.resolve_raw::<dyn Clock>()?.now()))
/// });
/// assert_eq!(stamps.make().unwrap().0, 42);
/// ```
pub struct Factory<T> {
    make: Rc<dyn Fn() -> Result<T>>,
}

impl<T: 'static> Factory<T> {
    pub fn new<H: 'static>(handle: H, make: impl Fn(&H) -> Result<T> + 'static) -> Self {
        Self {
            make: Rc::new(move || make(&handle)),
        }
    }

    /// Builds a new `T`.
    pub fn make(&self) -> Result<T> {
        (self.make)()
    }

    pub fn make_rc(&self) -> Result<Rc<T>> {
        self.make().map(Rc::new)
    }

    pub fn make_box(&self) -> Result<Box<T>> {
        self.make().map(Box::new)
    }
}

impl<T> Clone for Factory<T> {
    fn clone(&self) -> Self {
        Self {
            make: Rc::clone(&self.make),
        }
    }
}

impl<T> fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("product", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::container::Container;
    use crate::slice::{ContainerSlice, ContainerView};
    use std::cell::Cell;

    struct Counter(Cell<u32>);

    struct Ticket(u32);

    crate::interface_set! { Counting { Counter } }

    fn container() -> Rc<Container> {
        Container::builder()
            .register(Component::new(|| Ok(Counter(Cell::new(0)))))
            .build()
            .unwrap()
    }

    fn next_ticket(counter: &Counter) -> Ticket {
        counter.0.set(counter.0.get() + 1);
        Ticket(counter.0.get())
    }

    #[test]
    fn makes_fresh_objects() {
        let container = container();
        let factory = Factory::new(container.slice::<Counting>().unwrap(), |slice: &ContainerSlice<Counting>| {
            Ok(next_ticket(&*slice.resolve_raw::<Counter>()?))
        });

        assert_eq!(factory.make().unwrap().0, 1);
        assert_eq!(factory.make_rc().unwrap().0, 2);
        assert_eq!(factory.clone().make_box().unwrap().0, 3);
    }

    #[test]
    fn slice_factory_keeps_container_alive() {
        let container = container();
        let factory = Factory::new(container.slice::<Counting>().unwrap(), |slice: &ContainerSlice<Counting>| {
            Ok(next_ticket(&*slice.resolve_raw::<Counter>()?))
        });

        let weak = Rc::downgrade(&container);
        drop(container);
        assert!(weak.upgrade().is_some());
        assert!(factory.make().is_ok());
    }

    #[test]
    fn view_factory_fails_after_container_drop() {
        let container = container();
        let factory = Factory::new(container.view::<Counting>().unwrap(), |view: &ContainerView<Counting>| {
            Ok(next_ticket(&*view.resolve_raw::<Counter>()?))
        });

        assert!(factory.make().is_ok());
        drop(container);
        assert!(factory.make().is_err());
    }
}
