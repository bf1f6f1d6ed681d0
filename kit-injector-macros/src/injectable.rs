//! Injectable attribute macro
//!
//! Provides the `#[injectable]` attribute macro that implements
//! `kit_injector::Injectable` for a struct.
//!
//! Supports constructor injection via the `#[inject]` field attribute.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parse;
use syn::{
    parse_macro_input, Fields, GenericArgument, ItemStruct, LitStr, PathArguments, Token, Type,
};

/// Parsed arguments from the injectable attribute
#[derive(Default)]
struct InjectableArgs {
    singleton: bool,
    interfaces: Vec<Type>,
}

/// Parsed `#[inject(...)]` options for one field
struct InjectOptions {
    named: Option<LitStr>,
    interface: bool,
}

/// Read the `#[inject]` attribute of a field, if present
fn inject_options(field: &syn::Field) -> syn::Result<Option<InjectOptions>> {
    let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("inject")) else {
        return Ok(None);
    };

    let mut options = InjectOptions {
        named: None,
        interface: false,
    };
    if let syn::Meta::List(_) = attr.meta {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("named") {
                options.named = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("interface") {
                options.interface = true;
                Ok(())
            } else {
                Err(meta.error("expected `named = \"...\"` or `interface`"))
            }
        })?;
    }
    Ok(Some(options))
}

/// The `T` in `Arc<T>`
fn arc_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Implements the `#[injectable]` attribute macro
///
/// Fields marked `#[inject]` must be `Arc<T>` and become declared
/// dependencies. A trait object `T` is required from the bindings; a concrete
/// `T` builds itself when unbound (use `#[inject(interface)]` to require a
/// binding instead). Every other field takes the caller's argument of the same
/// name or falls back to `Default`.
///
/// # Example
///
/// ```rust,ignore
/// use kit_injector::injectable;
///
/// #[injectable(singleton, implements(dyn Notifier))]
/// pub struct EmailNotifier {
///     #[inject]
///     mailer: Arc<dyn Mailer>,
///     #[inject(named = "audit")]
///     log: Arc<dyn Log>,
///     retries: u32,
/// }
/// ```
pub fn injectable_impl(attr: TokenStream, input: TokenStream) -> TokenStream {
    let mut args = InjectableArgs::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("singleton") {
            args.singleton = true;
            Ok(())
        } else if meta.path.is_ident("implements") {
            let content;
            syn::parenthesized!(content in meta.input);
            let types = content.parse_terminated(Type::parse, Token![,])?;
            args.interfaces.extend(types);
            Ok(())
        } else {
            Err(meta.error("expected `singleton` or `implements(...)`"))
        }
    });
    parse_macro_input!(attr with parser);

    let mut item = parse_macro_input!(input as ItemStruct);

    match generate(&args, &mut item) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn generate(args: &InjectableArgs, item: &mut ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let mut dependencies = Vec::new();
    let mut initializers = Vec::new();

    match &mut item.fields {
        Fields::Named(fields_named) => {
            for field in fields_named.named.iter_mut() {
                let options = inject_options(field)?;
                field.attrs.retain(|attr| !attr.path().is_ident("inject"));

                let field_name = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new_spanned(&field.ty, "expected a named field"))?;
                let param = field_name.to_string();
                let field_ty = &field.ty;

                match options {
                    Some(options) => {
                        let inner = arc_inner(field_ty).ok_or_else(|| {
                            syn::Error::new_spanned(field_ty, "#[inject] fields must be `Arc<T>`")
                        })?;
                        let requirement = if options.interface || matches!(inner, Type::TraitObject(_)) {
                            quote! { ::kit_injector::Requirement::<#inner>::interface() }
                        } else {
                            quote! { ::kit_injector::Requirement::<#inner>::class() }
                        };
                        let requirement = match &options.named {
                            Some(qualifier) => quote! { #requirement.named(#qualifier) },
                            None => requirement,
                        };
                        dependencies.push(quote! { .with(#param, #requirement) });
                        initializers.push(quote! {
                            #field_name: args.param::<#inner>(#param)?
                        });
                    }
                    None => {
                        initializers.push(quote! {
                            #field_name: args.param_or_default::<#field_ty>(#param)?
                        });
                    }
                }
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &item.ident,
                "injectable does not support tuple structs. Use named fields instead.",
            ))
        }
    }

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    let body = match &item.fields {
        Fields::Unit => quote! { Self },
        _ => quote! { Self { #(#initializers),* } },
    };

    let scope = if args.singleton {
        quote! {
            fn scope() -> ::kit_injector::Scope {
                ::kit_injector::Scope::Singleton
            }
        }
    } else {
        quote! {}
    };

    let interfaces = &args.interfaces;
    let interfaces_fn = if interfaces.is_empty() {
        quote! {}
    } else {
        quote! {
            fn interfaces() -> ::kit_injector::Interfaces<Self> {
                ::kit_injector::Interfaces::new()
                    #(.implements::<#interfaces>(|this| this))*
            }
        }
    };

    // An unused `args` is expected for structs without fields
    Ok(quote! {
        #item

        impl #impl_generics ::kit_injector::Injectable for #name #ty_generics #where_clause {
            fn dependencies() -> ::kit_injector::Dependencies {
                ::kit_injector::Dependencies::new()
                    #(#dependencies)*
            }

            #interfaces_fn

            #scope

            #[allow(unused_variables)]
            fn construct(
                args: &mut ::kit_injector::Arguments,
            ) -> ::std::result::Result<Self, ::kit_injector::InjectError> {
                ::std::result::Result::Ok(#body)
            }
        }
    })
}
