//! Renders the parsed options.

use std::io::{self, Write};

use crate::cli::Options;

/// Writes one line per option to `out`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_report(options: &Options, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Options.Args: {:?}", options.args)?;
    writeln!(out, "Options.Name: {}", options.name)?;
    writeln!(out, "Options.Verbose: {}", options.verbose)
}

#[cfg(test)]
mod tests {
    //! Tests for report rendering.

    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;

    #[rstest]
    fn renders_each_option() -> Result<()> {
        let options = Options {
            args: vec!["duck".to_owned()],
            name: "bar".to_owned(),
            verbose: true,
        };
        let mut out = Vec::new();
        write_report(&options, &mut out)?;
        let text = String::from_utf8(out)?;
        ensure!(
            text == "Options.Args: [\"duck\"]\nOptions.Name: bar\nOptions.Verbose: true\n",
            "unexpected report:\n{text}"
        );
        Ok(())
    }
}
