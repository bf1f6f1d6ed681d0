//! A small dependency-injection container
//!
//! Types opt in by implementing [`Injectable`] (by hand or with
//! `#[injectable]`). Interfaces are trait objects; bindings map an interface to
//! a concrete type or a fixed instance, optionally under a qualifier. When a
//! type is constructed through the injector, every declared dependency the
//! caller did not supply is resolved from the bindings.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kit_injector::{injectable, provide, Container};
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[injectable(implements(dyn Greeter))]
//! pub struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! #[injectable]
//! pub struct Welcome {
//!     #[inject]
//!     greeter: Arc<dyn Greeter>,
//! }
//!
//! provide!(dyn Greeter => English)?;
//! let welcome = Container::make::<Welcome>(None)?;
//! ```

// Lets the generated `::kit_injector::...` paths resolve inside this crate
extern crate self as kit_injector;

pub mod arguments;
pub mod config;
pub mod container;
pub mod dependency;
pub mod error;
pub mod injectable;
pub mod testing;

pub use arguments::{Arguments, Instance};
pub use config::InjectorConfig;
pub use container::{Container, Injector};
pub use dependency::{named, Dependencies, Dependency, Requirement};
pub use error::InjectError;
pub use injectable::{Injectable, Interfaces, Scope};

// Re-export the attribute macros
pub use kit_injector_macros::{injectable, service};

// Used by `#[service(...)]` expansions
#[doc(hidden)]
pub use inventory;
