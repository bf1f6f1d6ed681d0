//! Procedural macros for kit-injector
//!
//! This crate provides:
//! - `#[injectable]` to implement `Injectable` from a struct definition
//! - `#[service]` for service traits and their auto-registration

use proc_macro::TokenStream;

mod injectable;
mod service;

/// Mark a trait as a service for the injector
///
/// This attribute macro automatically adds `Send + Sync + 'static` bounds
/// to your trait, making it suitable for use as an interface.
///
/// # Example
///
/// ```rust,ignore
/// use kit_injector::service;
///
/// #[service]
/// pub trait Mailer {
///     fn send(&self, to: &str, body: &str) -> bool;
/// }
///
/// // This expands to:
/// pub trait Mailer: Send + Sync + 'static {
///     fn send(&self, to: &str, body: &str) -> bool;
/// }
/// ```
///
/// With an implementation, the binding is registered by `Container::boot()`:
///
/// ```rust,ignore
/// #[service(SmtpMailer)]
/// pub trait Mailer { ... }
///
/// Container::boot()?;
/// let mailer: Arc<dyn Mailer> = Container::get_instance::<dyn Mailer>(None)?;
/// ```
#[proc_macro_attribute]
pub fn service(attr: TokenStream, input: TokenStream) -> TokenStream {
    service::service_impl(attr, input)
}

/// Implement `Injectable` for a struct
///
/// # Attributes
///
/// - `singleton`: the first constructed instance is reused
/// - `implements(dyn A, dyn B)`: interfaces the type may be bound to
///
/// # Fields
///
/// - `#[inject]`: an `Arc<T>` filled by injection unless the caller supplies it
/// - `#[inject(named = "q")]`: as above, looked up under qualifier `q`
/// - `#[inject(interface)]`: require a binding even for a concrete `T`
/// - anything else: the caller's argument of that name, or `Default`
///
/// # Example
///
/// ```rust,ignore
/// use kit_injector::injectable;
///
/// #[injectable(singleton, implements(dyn Mailer))]
/// pub struct SmtpMailer {
///     #[inject]
///     settings: Arc<SmtpSettings>,
/// }
/// ```
#[proc_macro_attribute]
pub fn injectable(attr: TokenStream, input: TokenStream) -> TokenStream {
    injectable::injectable_impl(attr, input)
}
