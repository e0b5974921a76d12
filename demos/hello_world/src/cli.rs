//! Command-line options for the `hello_world` example.

use std::ffi::OsString;

use flagtag::Tagged;

use crate::error::Result;

/// Options accepted by the example binary.
#[derive(Debug, Default, Clone, PartialEq, Eq, Tagged)]
#[tagged(name = "hello_world")]
pub struct Options {
    /// Arguments left after the flags.
    #[tag(r#"positional:"true""#)]
    pub args: Vec<String>,

    /// Name to greet.
    #[tag(r#"
        default:"foo"
        description:"The name to use"
        help:"What do you want to name this thing?"
        long:"name"
        short:"n"
        env:"HELLO_WORLD_NAME""#)]
    pub name: String,

    /// Whether to log verbosely.
    #[tag(r#"
        default:"false"
        description:"Use verbose logging."
        help:"Be very talkative when logging"
        long:"verbose"
        short:"v""#)]
    pub verbose: bool,
}

impl Options {
    /// Parses `args`, which must not include the program name.
    ///
    /// # Errors
    ///
    /// Returns an error when the arguments do not match the options, or when
    /// help was requested.
    pub fn parse_from<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let mut options = Self::default();
        flagtag::parse_from(&mut options, args)?;
        Ok(options)
    }
}
