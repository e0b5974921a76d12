//! Registers one [`TaggedOption`] as a flag.
//!
//! Registration validates everything before touching either the field or the
//! engine: the kind, the default, and the flag names. The engine owns the
//! rules for well-formed and unique names; this module only turns the tag
//! text into a [`FlagSpec`]. A failed registration
//! therefore leaves both unchanged. On success the default is written through
//! to the field, so a struct that is never parsed still observes its
//! defaults.

use tracing::debug;

use crate::engine::{FlagEngine, FlagSpec};
use crate::error::{FlagTagError, FlagTagResult};
use crate::option::TaggedOption;

/// Registers `option` with `engine` under its short and long names.
///
/// Options with neither name are accepted and register nothing.
///
/// # Errors
///
/// - [`FlagTagError::UnsupportedType`] for sequence kinds.
/// - [`FlagTagError::DefaultValueParse`] when the default does not parse.
/// - [`FlagTagError::InvalidFlagName`] for malformed names.
/// - [`FlagTagError::DuplicateFlag`] when a name is taken.
///
/// # Examples
///
/// ```
/// use flagtag::{Bindable, FieldBinding, FlagEngine, TaggedOption, register};
///
/// let mut count = 0_u32;
/// let binding = FieldBinding::new("count", r#"long:"count" default:"10""#, count.bind());
/// let mut option = TaggedOption::build(binding).unwrap();
/// let mut engine = FlagEngine::new("demo");
/// register(&mut option, &mut engine).unwrap();
/// drop(option);
/// assert_eq!(count, 10);
/// assert!(engine.lookup_long("count").is_some());
/// ```
pub fn register(option: &mut TaggedOption<'_>, engine: &mut FlagEngine) -> FlagTagResult<()> {
    if !option.kind.is_scalar() {
        return Err(FlagTagError::UnsupportedType {
            option: option.name.clone(),
            kind: option.kind,
        });
    }
    let default = option.parsed_default()?;
    let short = short_name(option)?;
    let long = long_name(option);

    if short.is_none() && long.is_none() {
        debug!(option = %option.name, "option has no flag name; nothing registered");
        return Ok(());
    }

    let mut spec = FlagSpec::new(option.name.clone(), option.kind)
        .with_default(option.default.clone())
        .with_description(option.description.clone())
        .with_help(option.help.clone());
    spec.short = short;
    spec.long = long;
    engine.check_available(&spec)?;

    option.store(default)?;
    engine.register(spec)
}

fn short_name(option: &TaggedOption<'_>) -> FlagTagResult<Option<char>> {
    if option.short.is_empty() {
        return Ok(None);
    }
    let mut chars = option.short.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(FlagTagError::InvalidFlagName {
            option: option.name.clone(),
            name: option.short.clone(),
            reason: "short names must be a single character",
        }),
    }
}

fn long_name(option: &TaggedOption<'_>) -> Option<String> {
    (!option.long.is_empty()).then(|| option.long.clone())
}
