//! Bind tag-annotated structs to command-line flags.
//!
//! Each field of a configuration struct carries a small tag in the
//! `key:"value"` mini-language describing how it is exposed on the command
//! line:
//!
//! - `short` and `long` name the flag (`-n`, `--name`).
//! - `default` supplies a default value; `env` names an environment variable
//!   that overrides it. Without either, the field's current value is used.
//! - `description` and `help` feed the generated help text.
//! - `positional:"true"` marks the `Vec<String>` field that collects the
//!   arguments left over after flag parsing.
//!
//! The [`Tagged`](macro@Tagged) derive turns the tags into a list of field bindings.
//! [`OptionSet`] builds an option per tagged field, registers the named ones
//! with a `clap`-backed [`FlagEngine`], and writes parsed values back into
//! the struct.
//!
//! ```
//! use flagtag::Tagged;
//!
//! #[derive(Default, Tagged)]
//! struct Options {
//!     #[tag(r#"positional:"true""#)]
//!     args: Vec<String>,
//!     #[tag(r#"
//!         default:"foo"
//!         description:"Who to greet."
//!         long:"name"
//!         short:"n""#)]
//!     name: String,
//!     #[tag(r#"
//!         default:"false"
//!         description:"Use verbose logging."
//!         long:"verbose"
//!         short:"v""#)]
//!     verbose: bool,
//! }
//!
//! let mut options = Options::default();
//! flagtag::parse_from(&mut options, ["-v", "--name", "bar", "duck", "sauce"])?;
//! assert!(options.verbose);
//! assert_eq!(options.name, "bar");
//! assert_eq!(options.args, ["duck", "sauce"]);
//! # Ok::<(), flagtag::FlagTagError>(())
//! ```

pub use flagtag_macros::Tagged;

mod engine;
mod error;
mod field;
mod kind;
mod option;
mod option_set;
mod register;
pub mod tag_set;

pub use engine::{FlagEngine, FlagSpec, ParsedFlags};
pub use error::{FlagTagError, FlagTagResult};
pub use field::{Bindable, FieldBinding, FieldRef, Tagged};
pub use kind::{OptionKind, ParseValueError, Value};
pub use option::{DefaultSource, TaggedOption};
pub use option_set::OptionSet;
pub use register::register;
pub use tag_set::TagSet;

/// Parses the process arguments into `config`.
///
/// The program name is skipped. This is [`OptionSet::build`] followed by
/// [`OptionSet::parse`].
///
/// # Errors
///
/// Returns any error raised while building the option set or parsing the
/// arguments. A help request surfaces as an error for which
/// [`FlagTagError::is_help_request`] is `true`.
pub fn parse<T: Tagged>(config: &mut T) -> FlagTagResult<()> {
    OptionSet::build(config)?.parse()
}

/// Parses `args` into `config`.
///
/// `args` must not include the program name.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_from<T, I, S>(config: &mut T, args: I) -> FlagTagResult<()>
where
    T: Tagged,
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    OptionSet::build(config)?.parse_from(args)
}
