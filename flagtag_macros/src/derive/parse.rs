//! Input parsing for `#[derive(Tagged)]`.
//!
//! Collects the struct-level `#[tagged(...)]` options and the tag of every
//! field in one pass, so expansion fails fast with a spanned error.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Field, Fields, Lit, LitStr};

const TAG_ATTR: &str = "tag";
const TAGGED_ATTR: &str = "tagged";

/// Options from `#[tagged(...)]`.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Command name override.
    pub name: Option<LitStr>,
    /// Path of a renamed `flagtag` dependency.
    pub crate_path: Option<syn::Path>,
}

/// A field carrying a non-blank tag.
pub(crate) struct TaggedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub tag: LitStr,
}

/// Everything expansion needs from the input struct.
pub(crate) struct ParsedInput {
    pub attrs: StructAttrs,
    pub fields: Vec<TaggedField>,
}

/// Parses the derive input.
///
/// Enums, unions, tuple structs, and unit structs are rejected. Fields
/// without a `#[tag]` attribute, or with a blank one, are skipped.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Tagged requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Tagged can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        if let Some(tagged) = tagged_field(field)? {
            fields.push(tagged);
        }
    }
    Ok(ParsedInput { attrs, fields })
}

fn tagged_field(field: &Field) -> syn::Result<Option<TaggedField>> {
    let mut found: Option<LitStr> = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident(TAG_ATTR)) {
        let tag = attr.parse_args::<LitStr>()?;
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[tag] attribute"));
        }
        found = Some(tag);
    }
    let Some(tag) = found.filter(|lit| !lit.value().trim().is_empty()) else {
        return Ok(None);
    };
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "tagged fields must be named"));
    };
    Ok(Some(TaggedField {
        ident,
        ty: field.ty.clone(),
        tag,
    }))
}

/// Extracts `#[tagged(...)]` options. Unknown keys are rejected.
fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident(TAGGED_ATTR)) {
        attr.parse_nested_meta(|meta| {
            match meta.path.get_ident().map(ToString::to_string).as_deref() {
                Some("name") => {
                    out.name = Some(lit_str(&meta, "name")?);
                    Ok(())
                }
                Some("crate") => {
                    let lit = lit_str(&meta, "crate")?;
                    let path: syn::Path =
                        syn::parse_str(&lit.value()).map_err(|e| syn::Error::new(lit.span(), e))?;
                    out.crate_path = Some(path);
                    Ok(())
                }
                _ => Err(meta.error("unsupported tagged attribute; expected `name` or `crate`")),
            }
        })?;
    }
    Ok(out)
}

fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for derive input parsing.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    fn parse(input: &DeriveInput) -> Result<ParsedInput> {
        parse_input(input).map_err(|err| anyhow!(err.to_string()))
    }

    #[rstest]
    fn collects_tagged_fields_in_order() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            struct Options {
                #[tag(r#"positional:"true""#)]
                args: Vec<String>,
                cache: std::collections::HashMap<String, String>,
                #[tag(r#"long:"name" short:"n""#)]
                name: String,
                #[tag("  ")]
                blank: u8,
            }
        };
        let parsed = parse(&input)?;
        let names: Vec<String> = parsed.fields.iter().map(|f| f.ident.to_string()).collect();
        ensure!(names == ["args", "name"], "fields: {names:?}");
        let tag = parsed
            .fields
            .get(1)
            .map(|f| f.tag.value())
            .ok_or_else(|| anyhow!("missing name field"))?;
        ensure!(tag == r#"long:"name" short:"n""#, "tag: {tag}");
        Ok(())
    }

    #[rstest]
    fn reads_struct_attributes() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            #[tagged(name = "hello", crate = "deps::flagtag")]
            struct Options {}
        };
        let parsed = parse(&input)?;
        let name = parsed.attrs.name.map(|lit| lit.value());
        ensure!(name.as_deref() == Some("hello"), "name: {name:?}");
        ensure!(parsed.attrs.crate_path.is_some(), "crate path missing");
        Ok(())
    }

    #[rstest]
    #[case::enum_input(parse_quote! { enum Options { A } }, "can only be derived for structs")]
    #[case::tuple_struct(parse_quote! { struct Options(String); }, "named fields")]
    #[case::unit_struct(parse_quote! { struct Options; }, "named fields")]
    #[case::unknown_key(parse_quote! { #[tagged(prefix = "x")] struct Options {} }, "unsupported tagged attribute")]
    #[case::non_string_name(parse_quote! { #[tagged(name = 1)] struct Options {} }, "name must be a string")]
    #[case::duplicate_tag(
        parse_quote! { struct Options { #[tag("a")] #[tag("b")] name: String } },
        "duplicate #[tag] attribute"
    )]
    #[case::non_literal_tag(parse_quote! { struct Options { #[tag(name)] name: String } }, "expected string literal")]
    #[expect(
        clippy::needless_pass_by_value,
        reason = "rstest passes case values by value"
    )]
    fn rejects_invalid_input(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
        let Err(err) = parse_input(&input) else {
            return Err(anyhow!("expected parse failure"));
        };
        ensure!(
            err.to_string().contains(message),
            "unexpected error: {err}"
        );
        Ok(())
    }
}
