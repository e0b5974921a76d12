//! Procedural macros for `flagtag`.
//!
//! `#[derive(Tagged)]` turns the `#[tag("...")]` attributes on a struct's
//! fields into an implementation of `flagtag::Tagged`, producing one field
//! binding per tagged field in declaration order. Fields without a tag are
//! left out and may have any type.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `flagtag::Tagged`.
///
/// Field attribute:
///
/// - `#[tag("...")]` carries the `key:"value"` tag. Raw string literals keep
///   the embedded quotes readable: `#[tag(r#"long:"name" short:"n""#)]`.
///
/// Struct attribute:
///
/// - `#[tagged(name = "...")]` overrides the command name used in help
///   output. The default is the struct name in kebab case.
/// - `#[tagged(crate = "...")]` names the path of a renamed `flagtag`
///   dependency.
#[proc_macro_derive(Tagged, attributes(tag, tagged))]
pub fn derive_tagged(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
