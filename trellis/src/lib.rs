//! # trellis: runtime dependency injection
//!
//! Register components under the interfaces they implement, let the
//! container build them in dependency order, and get them torn down in
//! reverse order when the container is dropped.
//!
//! ```rust
//! use std::rc::Rc;
//! use trellis::prelude::*;
//!
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Plain;
//! impl Greeter for Plain {
//!     fn greet(&self) -> String { "hello".into() }
//! }
//!
//! let container = Container::builder()
//!     .register(Component::new(|| Ok(Plain)).provides::<dyn Greeter>(|c| c))
//!     .build()?;
//!
//! container.resolve_all()?;
//! let greeter: Rc<dyn Greeter> = container.find_raw().unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! # Ok::<(), trellis::TrellisError>(())
//! ```

pub use trellis_container::*;
pub use trellis_support::*;
