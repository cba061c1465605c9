use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, AttributeArgs, ItemFn, Lit, Meta, MetaNameValue, NestedMeta};

/// Register a Rust function as a lowlevel routine.
///
/// Example:
/// ```rust,ignore
/// use distla_lowlevel::{FlatArg, Result};
/// use distla_macros::lowlevel_routine;
///
/// /// Report the number of flat arguments as the status.
/// #[lowlevel_routine(name = "pdcount", family = "pblas")]
/// fn pdcount(args: &[FlatArg]) -> Result<i32> {
///     Ok(args.len() as i32)
/// }
/// ```
///
/// The function must take the flat argument slice and return the status
/// code. It is submitted to the `distla-lowlevel` inventory so that
/// `RoutineTable::from_inventory()` finds it without any further wiring.
/// `family` is one of `pblas`, `scalapack` (the default) or `redist`.
#[proc_macro_attribute]
pub fn lowlevel_routine(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as AttributeArgs);
    let mut name: Option<String> = None;
    let mut family: Option<String> = None;
    for arg in args {
        match arg {
            NestedMeta::Meta(Meta::NameValue(MetaNameValue {
                path,
                lit: Lit::Str(s),
                ..
            })) => {
                if path.is_ident("name") {
                    name = Some(s.value());
                } else if path.is_ident("family") {
                    family = Some(s.value());
                } else {
                    return compile_error(&path, "unknown parameter; expected `name` or `family`");
                }
            }
            other => return compile_error(&other, "expected `name = \"...\"` or `family = \"...\"`"),
        }
    }

    let func = parse_macro_input!(input as ItemFn);
    let ident = &func.sig.ident;
    let name = name.unwrap_or_else(|| ident.to_string());

    if func.sig.inputs.len() != 1 {
        return compile_error(
            &func.sig,
            "a lowlevel routine takes exactly one parameter: `&[FlatArg]`",
        );
    }

    let family_variant = match family.as_deref().unwrap_or("scalapack") {
        "pblas" => format_ident!("Pblas"),
        "scalapack" => format_ident!("Scalapack"),
        "redist" => format_ident!("Redist"),
        other => {
            return compile_error(
                &func.sig.ident,
                &format!("unknown routine family `{other}`; expected pblas, scalapack or redist"),
            )
        }
    };

    // Gather documentation from existing #[doc] attributes
    let mut docs = Vec::new();
    for attr in &func.attrs {
        if attr.path.is_ident("doc") {
            if let Ok(Meta::NameValue(MetaNameValue {
                lit: Lit::Str(s), ..
            })) = attr.parse_meta()
            {
                docs.push(s.value());
            }
        }
    }
    let joined_docs = docs.join("\n");

    let register = quote! {
        distla_lowlevel::inventory::submit! {
            distla_lowlevel::NativeEntry::new(
                #name,
                distla_lowlevel::RoutineFamily::#family_variant,
                #joined_docs,
                #ident,
            )
        }
    };

    TokenStream::from(quote! {
        #func
        #register
    })
}

fn compile_error<T: quote::ToTokens>(tokens: &T, message: &str) -> TokenStream {
    syn::Error::new_spanned(tokens, message)
        .to_compile_error()
        .into()
}
