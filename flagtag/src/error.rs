//! Error types produced while building and parsing option sets.

use thiserror::Error;

use crate::kind::OptionKind;

/// Convenience alias for results returned by this crate.
pub type FlagTagResult<T> = Result<T, FlagTagError>;

/// Errors raised while turning a tagged struct into flags or parsing
/// arguments against it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagTagError {
    /// A field marked `positional:"true"` is not a `Vec<String>`.
    #[error("invalid type for positional arguments on '{option}': {kind}")]
    InvalidPositionalType {
        /// Field that carries the positional tag.
        option: String,
        /// Declared kind of the field.
        kind: OptionKind,
    },

    /// More than one field claims the leftover arguments.
    #[error("only one positional field is allowed, found '{first}' and '{second}'")]
    MultiplePositional {
        /// Positional field seen first in declaration order.
        first: String,
        /// Positional field that triggered the failure.
        second: String,
    },

    /// Two bindings or flag specs share a name.
    #[error("option '{name}' is declared more than once")]
    DuplicateOption {
        /// Field name that appears twice.
        name: String,
    },

    /// The default text does not parse as the option's kind.
    #[error("invalid default '{value}' for option '{option}' of type {kind}: {reason}")]
    DefaultValueParse {
        /// Field whose default failed to parse.
        option: String,
        /// Kind the default was parsed as.
        kind: OptionKind,
        /// Offending default text.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The option's kind cannot be bound to a named flag.
    #[error("type {kind} of option '{option}' cannot be handled as a flag")]
    UnsupportedType {
        /// Field that could not be registered.
        option: String,
        /// Kind that was rejected.
        kind: OptionKind,
    },

    /// A `short` or `long` tag is not a usable flag name.
    #[error("invalid flag name '{name}' for option '{option}': {reason}")]
    InvalidFlagName {
        /// Field carrying the bad name.
        option: String,
        /// Name as written in the tag.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A flag name is already registered by another option.
    #[error("flag '{name}' of option '{option}' is already defined by '{existing}'")]
    DuplicateFlag {
        /// Name registered twice.
        name: String,
        /// Option that registered the name first.
        existing: String,
        /// Option that attempted to register it again.
        option: String,
    },

    /// The flag engine rejected the arguments (unknown flag, bad value, or a
    /// help request).
    #[error("failed to parse command-line arguments: {0}")]
    FlagEngine(#[from] Box<clap::Error>),
}

impl FlagTagError {
    /// Returns `true` when the error is a request to display help rather
    /// than a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtag::Tagged;
    ///
    /// #[derive(Default, Tagged)]
    /// struct Options {
    ///     #[tag(r#"long:"name""#)]
    ///     name: String,
    /// }
    ///
    /// let mut options = Options::default();
    /// let err = flagtag::parse_from(&mut options, ["--help"]).unwrap_err();
    /// assert!(err.is_help_request());
    /// ```
    #[must_use]
    pub fn is_help_request(&self) -> bool {
        match self {
            Self::FlagEngine(err) => matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ),
            _ => false,
        }
    }
}

impl From<clap::Error> for FlagTagError {
    fn from(err: clap::Error) -> Self {
        Self::FlagEngine(Box::new(err))
    }
}
