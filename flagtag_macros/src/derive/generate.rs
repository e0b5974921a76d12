//! Token generation for `#[derive(Tagged)]`.

use heck::ToKebabCase;
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::DeriveInput;
use syn::ext::IdentExt;
use syn::spanned::Spanned;

use super::parse::{ParsedInput, TaggedField};

/// Generates the `Tagged` implementation for `input`.
pub(crate) fn tagged_impl(input: &DeriveInput, parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let name = parsed.attrs.name.as_ref().map_or_else(
        || ident.unraw().to_string().to_kebab_case(),
        syn::LitStr::value,
    );
    let bindings = parsed.fields.iter().map(|field| binding(field, krate));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Tagged for #ident #ty_generics #where_clause {
            fn command_name() -> &'static str {
                #name
            }

            fn fields(&mut self) -> ::std::vec::Vec<#krate::FieldBinding<'_>> {
                ::std::vec![#(#bindings),*]
            }
        }
    }
}

/// One `FieldBinding::new(...)` expression. The `bind` call carries the
/// field type's span so an unsupported type is reported on the field.
fn binding(field: &TaggedField, krate: &TokenStream) -> TokenStream {
    let member = &field.ident;
    let name = field.ident.unraw().to_string();
    let tag = &field.tag;
    let bind = quote_spanned! {field.ty.span()=>
        #krate::Bindable::bind(&mut self.#member)
    };
    quote! {
        #krate::FieldBinding::new(#name, #tag, #bind)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for generated tokens.

    use super::*;
    use crate::derive::crate_path;
    use crate::derive::parse::parse_input;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    fn expand(input: &DeriveInput) -> Result<String> {
        let parsed = parse_input(input).map_err(|err| anyhow!(err.to_string()))?;
        let krate = crate_path::resolve(parsed.attrs.crate_path.as_ref());
        Ok(tagged_impl(input, &parsed, &krate).to_string())
    }

    #[rstest]
    fn binds_each_tagged_field() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct HelloOptions {
                #[tag(r#"long:"name""#)]
                name: String,
                skipped: Vec<u8>,
                #[tag(r#"short:"v""#)]
                r#verbose: bool,
            }
        };
        let tokens = expand(&input)?;
        ensure!(tokens.contains(":: flagtag :: Tagged for HelloOptions"), "{tokens}");
        ensure!(tokens.contains("\"hello-options\""), "command name: {tokens}");
        ensure!(tokens.contains("\"name\""), "name binding: {tokens}");
        ensure!(tokens.contains("\"verbose\""), "raw ident should be unraw: {tokens}");
        ensure!(!tokens.contains("skipped"), "untagged field bound: {tokens}");
        ensure!(
            tokens.matches("FieldBinding :: new").count() == 2,
            "expected two bindings: {tokens}"
        );
        Ok(())
    }

    #[rstest]
    fn honours_name_and_crate_overrides() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            #[tagged(name = "hello_world", crate = "deps::flagtag")]
            struct Options<'a> {
                #[tag(r#"long:"name""#)]
                name: String,
                marker: std::marker::PhantomData<&'a ()>,
            }
        };
        let tokens = expand(&input)?;
        ensure!(tokens.contains("deps :: flagtag :: Tagged for Options < 'a >"), "{tokens}");
        ensure!(tokens.contains("\"hello_world\""), "command name: {tokens}");
        Ok(())
    }

    #[rstest]
    fn struct_without_tags_yields_empty_list() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Empty {
                plain: u8,
            }
        };
        let tokens = expand(&input)?;
        ensure!(tokens.contains(":: std :: vec ! []"), "{tokens}");
        Ok(())
    }
}
