//! End-to-end tests for the one-shot `parse_from` entry point.

use anyhow::{Result, anyhow, ensure};
use flagtag::{FlagTagError, OptionKind, Tagged};
use rstest::rstest;

#[derive(Debug, Default, Tagged)]
struct ParseOptions {
    #[tag(r#"positional:"true""#)]
    args: Vec<String>,

    #[tag(r#"
        default:"foo"
        description:"The name to use"
        help:"What do you want to name this thing?"
        long:"name"
        short:"n""#)]
    name: String,

    #[tag(r#"
        default:"false"
        description:"Use verbose logging."
        help:"Be very talkative when logging"
        long:"verbose"
        short:"v""#)]
    verbose: bool,
}

#[derive(Debug, Default, Tagged)]
struct InvalidPositional {
    #[tag(r#"positional:"true""#)]
    args: String,

    #[tag(r#"default:"foo" long:"name" short:"n""#)]
    name: String,
}

#[derive(Debug, Default, Tagged)]
struct LongHelpFlag {
    #[tag(r#"long:"help""#)]
    help: bool,
}

fn parse(args: &[&str]) -> Result<ParseOptions> {
    let mut options = ParseOptions::default();
    flagtag::parse_from(&mut options, args).map_err(|err| anyhow!(err))?;
    Ok(options)
}

#[rstest]
fn flags_and_leftovers_are_written_back() -> Result<()> {
    let options = parse(&["-v", "--name", "bar", "duck", "sauce"])?;
    ensure!(options.verbose, "verbose should be set");
    ensure!(options.name == "bar", "name: {}", options.name);
    ensure!(options.args == ["duck", "sauce"], "args: {:?}", options.args);
    Ok(())
}

#[rstest]
fn no_arguments_applies_defaults() -> Result<()> {
    let options = parse(&[])?;
    ensure!(options.name == "foo", "name: {}", options.name);
    ensure!(!options.verbose, "verbose should default to false");
    ensure!(options.args.is_empty(), "args: {:?}", options.args);
    Ok(())
}

#[rstest]
#[case::short(&["-v", "-n", "bar"])]
#[case::long(&["--verbose", "--name", "bar"])]
#[case::attached(&["--verbose=true", "--name=bar"])]
#[case::repeated(&["--name", "baz", "-v", "-n", "bar"])]
fn short_and_long_names_share_storage(#[case] args: &[&str]) -> Result<()> {
    let options = parse(args)?;
    ensure!(options.name == "bar", "name: {}", options.name);
    ensure!(options.verbose, "verbose should be set");
    Ok(())
}

#[rstest]
fn leftovers_keep_flag_like_tokens_after_first_positional() -> Result<()> {
    let options = parse(&["--verbose", "--name", "bar", "far", "zar", "-v"])?;
    ensure!(options.args == ["far", "zar", "-v"], "args: {:?}", options.args);
    Ok(())
}

#[rstest]
fn explicit_false_for_bool() -> Result<()> {
    let options = parse(&["-v=false", "duck"])?;
    ensure!(!options.verbose, "verbose should be false");
    ensure!(options.args == ["duck"], "args: {:?}", options.args);
    Ok(())
}

#[rstest]
#[case::undeclared(&["-ducks"])]
#[case::undeclared_long(&["--ducks"])]
#[case::missing_value(&["--name"])]
#[case::bad_bool(&["--verbose=Nein"])]
fn malformed_arguments_fail(#[case] args: &[&str]) {
    let mut options = ParseOptions::default();
    let result = flagtag::parse_from(&mut options, args);
    assert!(
        matches!(result, Err(FlagTagError::FlagEngine(_))),
        "expected engine error for {args:?}, got {result:?}"
    );
}

#[rstest]
fn positional_on_scalar_fails_before_parsing() {
    let mut options = InvalidPositional::default();
    let result = flagtag::parse_from(&mut options, ["-n", "bar", "ducks"]);
    assert!(matches!(
        result,
        Err(FlagTagError::InvalidPositionalType {
            kind: OptionKind::Text,
            ..
        })
    ));
    assert!(options.name.is_empty(), "no field may be written");
}

#[rstest]
#[case::long(&["--help"])]
#[case::short(&["-h"])]
fn help_requests_are_reported(#[case] args: &[&str]) {
    let mut options = ParseOptions::default();
    let result = flagtag::parse_from(&mut options, args);
    assert!(result.is_err_and(|err| err.is_help_request()));
}

#[rstest]
fn short_help_survives_claimed_long_help() -> Result<()> {
    let mut options = LongHelpFlag::default();
    let result = flagtag::parse_from(&mut options, ["-h"]);
    ensure!(
        result.as_ref().is_err_and(FlagTagError::is_help_request),
        "-h should still request help: {result:?}"
    );
    flagtag::parse_from(&mut options, ["--help"]).map_err(|err| anyhow!(err))?;
    ensure!(options.help, "--help should set the field");
    Ok(())
}

#[rstest]
fn long_help_includes_help_tag() -> Result<()> {
    let mut options = ParseOptions::default();
    let Err(err) = flagtag::parse_from(&mut options, ["--help"]) else {
        return Err(anyhow!("expected a help request"));
    };
    let rendered = match err {
        FlagTagError::FlagEngine(inner) => inner.render().to_string(),
        other => return Err(anyhow!("unexpected error: {other}")),
    };
    ensure!(
        rendered.contains("What do you want to name this thing?"),
        "long help missing help tag:\n{rendered}"
    );
    Ok(())
}
