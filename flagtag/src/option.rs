//! Building a [`TaggedOption`] from one field binding.
//!
//! The builder merges three sources of defaults, in order of precedence: an
//! environment variable named by the `env` tag, the explicit `default` tag,
//! and finally the field's current value. The last rule lets callers seed
//! defaults programmatically by initialising the struct before parsing.
//!
//! A variable that is set but empty counts as unset. So does one whose value
//! is not valid Unicode; that case is logged at debug level and the next
//! source applies.

use std::env::{self, VarError};

use tracing::debug;

use crate::error::{FlagTagError, FlagTagResult};
use crate::field::{FieldBinding, FieldRef};
use crate::kind::{OptionKind, Value};
use crate::tag_set::{self, TagSet};

/// Where an option's default text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    /// Value of the environment variable named by the `env` tag.
    Env,
    /// The `default` tag.
    Tag,
    /// The field's value before parsing.
    Current,
    /// No default; the kind's zero value applies.
    None,
}

/// A configuration field bound to its flag metadata.
#[derive(Debug)]
pub struct TaggedOption<'a> {
    /// Field identifier.
    pub name: String,
    /// Kind of the field.
    pub kind: OptionKind,
    /// Short flag name, empty when absent.
    pub short: String,
    /// Long flag name, empty when absent.
    pub long: String,
    /// Default value in text form, empty when absent.
    pub default: String,
    /// Where [`TaggedOption::default`] came from.
    pub default_source: DefaultSource,
    /// Help text shown next to the flag.
    pub description: String,
    /// Longer free-form help.
    pub help: String,
    /// Environment variable consulted for the default, if any.
    pub env: Option<String>,
    /// Whether this option receives the leftover arguments.
    pub positional: bool,
    pub(crate) field: FieldRef<'a>,
}

impl<'a> TaggedOption<'a> {
    /// Builds an option from a binding, parsing its tag and resolving the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::InvalidPositionalType`] when a field tagged
    /// `positional:"true"` is not a `Vec<String>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtag::{Bindable, FieldBinding, TaggedOption};
    ///
    /// let mut verbose = true;
    /// let binding = FieldBinding::new("verbose", r#"long:"verbose" short:"v""#, verbose.bind());
    /// let option = TaggedOption::build(binding).unwrap();
    /// assert_eq!(option.default, "true");
    /// assert_eq!(option.short, "v");
    /// ```
    pub fn build(binding: FieldBinding<'a>) -> FlagTagResult<Self> {
        let FieldBinding { name, tag, field } = binding;
        let tags = TagSet::parse(tag);
        let kind = field.kind();
        let positional = tags.get(tag_set::POSITIONAL) == Some("true");

        if positional && kind != OptionKind::TextList {
            return Err(FlagTagError::InvalidPositionalType {
                option: name.to_owned(),
                kind,
            });
        }

        let env = tags
            .get(tag_set::ENV)
            .filter(|var| !var.is_empty())
            .map(str::to_owned);
        let (default, default_source) = resolve_default(&tags, env.as_deref(), &field);

        debug!(
            option = name,
            %kind,
            positional,
            source = ?default_source,
            "built option"
        );

        Ok(Self {
            name: name.to_owned(),
            kind,
            short: tags.get_or_empty(tag_set::SHORT).to_owned(),
            long: tags.get_or_empty(tag_set::LONG).to_owned(),
            default,
            default_source,
            description: tags.get_or_empty(tag_set::DESCRIPTION).to_owned(),
            help: tags.get_or_empty(tag_set::HELP).to_owned(),
            env,
            positional,
            field,
        })
    }

    /// Returns `true` if this option stores the leftover arguments.
    #[must_use]
    pub const fn is_positional(&self) -> bool {
        self.positional
    }

    /// Returns `true` if the option has a short or long flag name.
    #[must_use]
    pub fn has_flag_name(&self) -> bool {
        !self.short.is_empty() || !self.long.is_empty()
    }

    /// Parses the default text, falling back to the kind's zero value when
    /// it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::UnsupportedType`] for sequence kinds and
    /// [`FlagTagError::DefaultValueParse`] when the text does not parse.
    pub fn parsed_default(&self) -> FlagTagResult<Value> {
        let unsupported = || FlagTagError::UnsupportedType {
            option: self.name.clone(),
            kind: self.kind,
        };
        if self.default.is_empty() {
            return self.kind.zero().ok_or_else(unsupported);
        }
        if !self.kind.is_scalar() {
            return Err(unsupported());
        }
        self.kind
            .parse(&self.default)
            .map_err(|err| FlagTagError::DefaultValueParse {
                option: self.name.clone(),
                kind: self.kind,
                value: self.default.clone(),
                reason: err.to_string(),
            })
    }

    /// Writes `value` through to the bound field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::UnsupportedType`] naming the value's kind when
    /// it does not match the field.
    pub fn store(&mut self, value: Value) -> FlagTagResult<()> {
        self.field
            .assign(value)
            .map_err(|rejected| FlagTagError::UnsupportedType {
                option: self.name.clone(),
                kind: rejected.kind(),
            })
    }

    /// Replaces the bound sequence with `values`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::InvalidPositionalType`] when the field is not
    /// a sequence.
    pub fn store_list(&mut self, values: Vec<String>) -> FlagTagResult<()> {
        self.field
            .assign_list(values)
            .map_err(|_| FlagTagError::InvalidPositionalType {
                option: self.name.clone(),
                kind: self.kind,
            })
    }
}

fn resolve_default(
    tags: &TagSet,
    env_var: Option<&str>,
    field: &FieldRef<'_>,
) -> (String, DefaultSource) {
    if field.kind() == OptionKind::TextList {
        return (String::new(), DefaultSource::None);
    }
    if let Some(value) = env_var.and_then(env_default) {
        return (value, DefaultSource::Env);
    }
    if let Some(value) = tags.get(tag_set::DEFAULT).filter(|value| !value.is_empty()) {
        return (value.to_owned(), DefaultSource::Tag);
    }
    field
        .current_text()
        .map_or((String::new(), DefaultSource::None), |text| {
            (text, DefaultSource::Current)
        })
}

fn env_default(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) | Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            debug!(env = var, "ignoring environment variable with non-Unicode value");
            None
        }
    }
}
