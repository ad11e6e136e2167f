//! Runtime dependency injection container for single-threaded programs.
//!
//! Components are registered under one or more interfaces, built on first
//! use in dependency order, and destroyed in reverse creation order when
//! the container goes away.
//!
//! Start with [`prelude`].

mod chain;

pub mod component;
pub mod container;
pub mod error;
pub mod factory;
pub(crate) mod graph;
pub mod key;
pub mod lifetime;
pub mod policy;
pub mod provider;
pub mod ptr;
pub mod registry;
pub mod slice;

pub use component::{Component, Lifecycle};
pub use container::{prelude, Container, ContainerBuilder, ContainerSettings, Resolver};
pub use error::{Result, TrellisError};
pub use key::DependencyKey;
pub use lifetime::Lifetime;
