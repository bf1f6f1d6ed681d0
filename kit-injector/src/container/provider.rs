//! Binding auto-registration
//!
//! `#[service(Impl)]` on a trait submits a [`BindingEntry`] at compile time;
//! [`bootstrap`] replays every collected entry against an injector.
//!
//! # Example
//!
//! ```rust,ignore
//! use kit_injector::{injectable, service, Container};
//!
//! // Auto-register: dyn Greeter -> English
//! #[service(English)]
//! pub trait Greeter: Send + Sync + 'static {
//!     fn greet(&self) -> String;
//! }
//!
//! #[injectable(implements(dyn Greeter))]
//! pub struct English;
//!
//! Container::boot()?;
//! ```

use tracing::{debug, info};

use crate::container::Injector;
use crate::error::InjectError;

/// Entry for inventory-collected bindings (interface -> class)
///
/// Used internally by the `#[service(...)]` macro.
pub struct BindingEntry {
    /// Function to register the binding
    pub register: fn(&Injector) -> Result<(), InjectError>,
    /// Interface name for debugging/logging
    pub name: &'static str,
}

inventory::collect!(BindingEntry);

/// Register all bindings from inventory
///
/// Stops at the first entry that fails to register. Returns the number of
/// bindings registered.
pub fn bootstrap(injector: &Injector) -> Result<usize, InjectError> {
    let mut registered = 0;
    for entry in inventory::iter::<BindingEntry> {
        (entry.register)(injector)?;
        debug!(service = entry.name, "Auto-registered binding");
        registered += 1;
    }
    info!(registered, "Booted service bindings");
    Ok(registered)
}
