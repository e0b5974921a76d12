//! Hello World example entry-point: parse the tagged options and print them.

use std::io::Write;

use flagtag::OptionSet;

use hello_world::cli::Options;
use hello_world::error::{HelloWorldError, Result};
use hello_world::report::write_report;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let mut options = Options::default();
    let mut stdout = std::io::stdout().lock();
    {
        let mut set = OptionSet::build(&mut options)?;
        if let Err(parse_err) = set.parse() {
            let err = HelloWorldError::from(parse_err);
            if err.is_help_request() {
                set.write_help(&mut stdout)?;
                return Ok(());
            }
            return Err(err);
        }
    }
    write_report(&options, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
