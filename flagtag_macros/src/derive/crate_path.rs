//! Crate path resolution for renamed dependencies.
//!
//! Generated code refers to `::flagtag` unless the struct carries
//! `#[tagged(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), ":: flagtag");
///
/// let path: syn::Path = syn::parse_str("my_alias").unwrap();
/// assert_eq!(resolve(Some(&path)).to_string(), "my_alias");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::flagtag }, |path| quote! { #path })
}
