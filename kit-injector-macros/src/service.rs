//! Service trait macro
//!
//! Provides the `#[service]` attribute macro that:
//! 1. Adds `Send + Sync + 'static` bounds to trait definitions
//! 2. Optionally auto-registers a concrete implementation with the injector
//! 3. Optionally generates a `fake()` method for testing

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Ident, ItemTrait, LitStr, Path, Token};

/// Parsed arguments from the service attribute
struct ServiceArgs {
    impl_type: Option<Path>,
    fake_type: Option<Path>,
    named: Option<LitStr>,
}

impl Parse for ServiceArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ServiceArgs {
            impl_type: None,
            fake_type: None,
            named: None,
        };

        if input.is_empty() {
            return Ok(args);
        }

        // Positional form: the first argument is the impl type
        let fork = input.fork();
        let is_named = fork.call(Ident::parse_any).is_ok() && fork.peek(Token![=]);
        if !is_named {
            args.impl_type = Some(input.parse()?);
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        while !input.is_empty() {
            // `impl` is a keyword, so parse any identifier
            let name: Ident = input.call(Ident::parse_any)?;
            input.parse::<Token![=]>()?;

            match name.to_string().as_str() {
                "impl" => args.impl_type = Some(input.parse()?),
                "fake" => args.fake_type = Some(input.parse()?),
                "named" => args.named = Some(input.parse()?),
                _ => {
                    return Err(syn::Error::new(
                        name.span(),
                        format!(
                            "unknown parameter '{}', expected 'impl', 'fake' or 'named'",
                            name
                        ),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// Add a bound to the trait unless one with the same last path segment exists
fn ensure_trait_bound(item_trait: &mut ItemTrait, bound: &str) {
    let present = item_trait.supertraits.iter().any(|existing| match existing {
        syn::TypeParamBound::Trait(trait_bound) => trait_bound
            .path
            .segments
            .last()
            .map(|s| s.ident == bound)
            .unwrap_or(false),
        _ => false,
    });
    if !present {
        let ident = Ident::new(bound, proc_macro2::Span::call_site());
        item_trait.supertraits.push(syn::parse_quote!(#ident));
    }
}

/// Implements the `#[service]` attribute macro
///
/// # Without arguments (just adds bounds)
///
/// ```rust,ignore
/// #[service]
/// pub trait Clock {
///     fn now(&self) -> u64;
/// }
/// ```
///
/// # With impl type (auto-registration on boot)
///
/// ```rust,ignore
/// #[service(SystemClock)]  // or #[service(impl = SystemClock)]
/// pub trait Clock {
///     fn now(&self) -> u64;
/// }
///
/// // Under a qualifier
/// #[service(impl = UtcClock, named = "utc")]
/// pub trait Clock { ... }
/// ```
///
/// # With fake type (generates fake() method for testing)
///
/// ```rust,ignore
/// #[service(impl = SystemClock, fake = FrozenClock)]
/// pub trait Clock {
///     fn now(&self) -> u64;
/// }
///
/// // In tests:
/// let _guard = <dyn Clock>::fake()?;  // Binds FrozenClock in a fresh test injector
/// ```
pub fn service_impl(attr: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ServiceArgs);
    let mut item_trait = parse_macro_input!(input as ItemTrait);

    ensure_trait_bound(&mut item_trait, "Send");
    ensure_trait_bound(&mut item_trait, "Sync");

    let has_static = item_trait
        .supertraits
        .iter()
        .any(|bound| matches!(bound, syn::TypeParamBound::Lifetime(lt) if lt.ident == "static"));
    if !has_static {
        item_trait.supertraits.push(syn::parse_quote!('static));
    }

    let trait_name = &item_trait.ident;
    let trait_name_str = trait_name.to_string();
    let qualifier = match &args.named {
        Some(name) => quote! { ::std::option::Option::Some(#name) },
        None => quote! { ::std::option::Option::None },
    };

    let impl_registration = args.impl_type.as_ref().map(|concrete_type| {
        quote! {
            ::kit_injector::inventory::submit! {
                ::kit_injector::container::provider::BindingEntry {
                    register: |injector| injector.provide::<dyn #trait_name, #concrete_type>(#qualifier),
                    name: #trait_name_str,
                }
            }
        }
    });

    let fake_impl = args.fake_type.as_ref().map(|fake_type| {
        quote! {
            impl dyn #trait_name {
                /// Install a test injector with the fake implementation bound.
                ///
                /// The previous injector comes back when the guard drops.
                pub fn fake() -> ::std::result::Result<
                    ::kit_injector::testing::TestInjectorGuard,
                    ::kit_injector::InjectError,
                > {
                    let guard = ::kit_injector::testing::TestInjector::fake();
                    ::kit_injector::testing::TestInjector::provide::<dyn #trait_name, #fake_type>(#qualifier)?;
                    ::std::result::Result::Ok(guard)
                }
            }
        }
    });

    let expanded = quote! {
        #item_trait
        #impl_registration
        #fake_impl
    };

    TokenStream::from(expanded)
}
