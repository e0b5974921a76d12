//! The flag engine: a registry of flag specifications backed by `clap`.
//!
//! Specifications are kept as plain data and a fresh [`clap::Command`] is
//! assembled for every parse or help render, so the registry can grow one
//! flag at a time without rebuilding anything by hand.
//!
//! Parsing follows classic single-pass flag semantics. Flags come first and
//! the first non-flag argument ends flag processing; it and everything after
//! it are returned as leftovers. A literal `--` also ends flag processing and
//! is consumed.

use std::ffi::OsString;
use std::io;

use clap::builder::ValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, trace};

use crate::error::{FlagTagError, FlagTagResult};
use crate::kind::{OptionKind, Value};

const LEFTOVERS_ID: &str = "flagtag:leftovers";
const HELP_ID: &str = "flagtag:help";
const HELP_SHORT: char = 'h';
const HELP_LONG: &str = "help";

/// One named flag as registered with the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Identifier used to read the parsed value back, usually the field name.
    pub id: String,
    /// Kind of value the flag accepts.
    pub kind: OptionKind,
    /// Single-character name, used as `-c`.
    pub short: Option<char>,
    /// Long name, used as `--name`.
    pub long: Option<String>,
    /// Default value in text form, empty when absent.
    pub default: String,
    /// One-line help text.
    pub description: String,
    /// Extended help text shown by `--help`.
    pub help: String,
}

impl FlagSpec {
    /// Creates a spec with no names, default, or help text.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            short: None,
            long: None,
            default: String::new(),
            description: String::new(),
            help: String::new(),
        }
    }

    /// Sets the short name.
    #[must_use]
    pub const fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the long name.
    #[must_use]
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Sets the default text.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the one-line help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the extended help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Checks that the spec has at least one name and that each name is
    /// usable on a command line.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::InvalidFlagName`] naming the offending name.
    pub fn validate(&self) -> FlagTagResult<()> {
        let invalid = |name: String, reason| FlagTagError::InvalidFlagName {
            option: self.id.clone(),
            name,
            reason,
        };
        if self.short.is_none() && self.long.is_none() {
            return Err(invalid(String::new(), "flags need a short or a long name"));
        }
        if let Some(short) = self.short {
            if short == '-' {
                return Err(invalid(short.to_string(), "short names cannot be '-'"));
            }
            if short.is_whitespace() {
                return Err(invalid(short.to_string(), "short names cannot be whitespace"));
            }
        }
        if let Some(long) = self.long.as_deref() {
            let reason = if long.is_empty() {
                Some("long names cannot be empty")
            } else if long.starts_with('-') {
                Some("long names cannot start with '-'")
            } else if long.contains('=') {
                Some("long names cannot contain '='")
            } else if long.chars().any(char::is_whitespace) {
                Some("long names cannot contain whitespace")
            } else {
                None
            };
            if let Some(why) = reason {
                return Err(invalid(long.to_owned(), why));
            }
        }
        Ok(())
    }

    fn to_arg(&self) -> Arg {
        let kind = self.kind;
        let mut arg = Arg::new(self.id.clone())
            .value_name(kind.value_name())
            .value_parser(ValueParser::new(move |raw: &str| kind.parse(raw)));
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(long) = &self.long {
            arg = arg.long(long.clone());
        }
        arg = if kind == OptionKind::Bool {
            arg.action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.action(ArgAction::Set)
                .num_args(1)
                .allow_hyphen_values(true)
        };
        if !self.default.is_empty() {
            arg = arg.default_value(self.default.clone());
        }
        if !self.description.is_empty() {
            arg = arg.help(self.description.clone());
        }
        if !self.help.is_empty() {
            arg = arg.long_help(self.help.clone());
        }
        arg
    }
}

/// Registry of named flags plus the leftover-argument slot.
#[derive(Debug, Clone)]
pub struct FlagEngine {
    name: String,
    specs: Vec<FlagSpec>,
}

impl FlagEngine {
    /// Creates an empty engine for a command called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specs: Vec::new(),
        }
    }

    /// Command name shown in usage lines.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered specs in registration order.
    #[must_use]
    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    /// Number of registered flags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` when no flag has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Finds the spec registered under `short`.
    #[must_use]
    pub fn lookup_short(&self, short: char) -> Option<&FlagSpec> {
        self.specs.iter().find(|spec| spec.short == Some(short))
    }

    /// Finds the spec registered under `long`.
    #[must_use]
    pub fn lookup_long(&self, long: &str) -> Option<&FlagSpec> {
        self.specs
            .iter()
            .find(|spec| spec.long.as_deref() == Some(long))
    }

    /// Finds the spec registered under `name`, trying the long names first
    /// and then, for a one-character name, the short names.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FlagSpec> {
        self.lookup_long(name).or_else(|| {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(short), None) => self.lookup_short(short),
                _ => None,
            }
        })
    }

    /// Checks that `spec` is well formed and that neither of its names is
    /// already taken.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::InvalidFlagName`] as for
    /// [`FlagSpec::validate`], or [`FlagTagError::DuplicateFlag`] naming the
    /// first clash. A spec reusing another spec's id fails with
    /// [`FlagTagError::DuplicateOption`].
    pub fn check_available(&self, spec: &FlagSpec) -> FlagTagResult<()> {
        spec.validate()?;
        if self.specs.iter().any(|existing| existing.id == spec.id) {
            return Err(FlagTagError::DuplicateOption {
                name: spec.id.clone(),
            });
        }
        let short_clash = spec
            .short
            .and_then(|short| self.lookup_short(short).map(|found| (short.to_string(), found)));
        let long_clash = || {
            spec.long
                .as_deref()
                .and_then(|long| self.lookup_long(long).map(|found| (long.to_owned(), found)))
        };
        match short_clash.or_else(long_clash) {
            Some((name, existing)) => Err(FlagTagError::DuplicateFlag {
                name,
                existing: existing.id.clone(),
                option: spec.id.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Adds a flag.
    ///
    /// # Errors
    ///
    /// As for [`FlagEngine::check_available`]; a rejected spec leaves the
    /// engine unchanged.
    pub fn register(&mut self, spec: FlagSpec) -> FlagTagResult<()> {
        self.check_available(&spec)?;
        debug!(
            flag = %spec.id,
            short = ?spec.short,
            long = ?spec.long,
            kind = %spec.kind,
            "registered flag"
        );
        self.specs.push(spec);
        Ok(())
    }

    /// Builds the `clap` command describing every registered flag.
    #[must_use]
    pub fn command(&self) -> Command {
        let leftovers = Arg::new(LEFTOVERS_ID)
            .action(ArgAction::Append)
            .num_args(1..)
            .trailing_var_arg(true)
            .value_name("ARGS")
            .value_parser(ValueParser::string())
            .hide(true);
        Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_version_flag(true)
            .disable_help_flag(true)
            .args_override_self(true)
            .args(self.specs.iter().map(FlagSpec::to_arg))
            .args(self.help_arg())
            .arg(leftovers)
    }

    /// Help flag under whichever of `-h` and `--help` no spec claims.
    fn help_arg(&self) -> Option<Arg> {
        let short = self.lookup_short(HELP_SHORT).is_none().then_some(HELP_SHORT);
        let long = self.lookup_long(HELP_LONG).is_none().then_some(HELP_LONG);
        if short.is_none() && long.is_none() {
            return None;
        }
        Some(
            Arg::new(HELP_ID)
                .short(short)
                .long(long)
                .action(ArgAction::Help)
                .help("Print help"),
        )
    }

    /// Parses `args`, which must not include the program name.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::FlagEngine`] for unknown flags, values that do
    /// not parse, and help requests.
    pub fn parse_from<I, T>(&self, args: I) -> FlagTagResult<ParsedFlags>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        debug!(command = %self.name, flags = self.specs.len(), "parsed arguments");
        Ok(ParsedFlags { matches })
    }

    /// Writes the help text to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_help(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let help = self.command().render_help();
        write!(out, "{help}")
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedFlags {
    matches: ArgMatches,
}

impl ParsedFlags {
    /// Value for the flag registered as `id`, including defaults.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&Value> {
        self.matches.try_get_one::<Value>(id).ok().flatten()
    }

    /// Returns `true` when the flag appeared on the command line.
    #[must_use]
    pub fn was_given(&self, id: &str) -> bool {
        matches!(
            self.matches.value_source(id),
            Some(ValueSource::CommandLine)
        )
    }

    /// Arguments left over after flag processing, in order.
    #[must_use]
    pub fn leftovers(&self) -> Vec<String> {
        let leftovers: Vec<String> = self
            .matches
            .try_get_many::<String>(LEFTOVERS_ID)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        trace!(count = leftovers.len(), "collected leftover arguments");
        leftovers
    }
}

#[cfg(test)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest injects the engine fixture by value"
)]
mod tests {
    //! Tests for the flag engine.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::{fixture, rstest};

    #[fixture]
    fn engine() -> FlagEngine {
        let mut engine = FlagEngine::new("demo");
        let specs = [
            FlagSpec::new("verbose", OptionKind::Bool)
                .with_short('v')
                .with_long("verbose")
                .with_default("true")
                .with_description("Use verbose logging."),
            FlagSpec::new("name", OptionKind::Text)
                .with_short('n')
                .with_default("foo"),
            FlagSpec::new("count", OptionKind::Int32).with_long("count"),
        ];
        for spec in specs {
            if let Err(err) = engine.register(spec) {
                panic!("fixture registration failed: {err}");
            }
        }
        engine
    }

    fn parse(engine: &FlagEngine, args: &[&str]) -> Result<ParsedFlags> {
        engine.parse_from(args).map_err(|err| anyhow!(err))
    }

    #[rstest]
    fn defaults_apply_without_arguments(engine: FlagEngine) -> Result<()> {
        let parsed = parse(&engine, &[])?;
        ensure!(parsed.value("verbose") == Some(&Value::Bool(true)), "verbose");
        ensure!(
            parsed.value("name") == Some(&Value::Text("foo".to_owned())),
            "name"
        );
        ensure!(parsed.value("count").is_none(), "count has no default");
        ensure!(!parsed.was_given("name"), "name was not given");
        ensure!(parsed.leftovers().is_empty(), "no leftovers expected");
        Ok(())
    }

    #[rstest]
    #[case::bare_short(&["-v"], true)]
    #[case::short_equals(&["-v=false"], false)]
    #[case::long_equals(&["--verbose=0"], false)]
    #[case::last_wins(&["-v=false", "--verbose"], true)]
    fn bool_flags_take_optional_attached_values(
        engine: FlagEngine,
        #[case] args: &[&str],
        #[case] expected: bool,
    ) -> Result<()> {
        let parsed = parse(&engine, args)?;
        ensure!(
            parsed.value("verbose") == Some(&Value::Bool(expected)),
            "verbose: {:?}",
            parsed.value("verbose")
        );
        Ok(())
    }

    #[rstest]
    fn values_may_start_with_hyphen(engine: FlagEngine) -> Result<()> {
        let parsed = parse(&engine, &["--count", "-10"])?;
        ensure!(parsed.value("count") == Some(&Value::Int32(-10)), "count");
        ensure!(parsed.was_given("count"), "count was given");
        Ok(())
    }

    #[rstest]
    fn first_non_flag_ends_flag_processing(engine: FlagEngine) -> Result<()> {
        let parsed = parse(&engine, &["-n", "bar", "duck", "-v", "goose"])?;
        ensure!(
            parsed.value("name") == Some(&Value::Text("bar".to_owned())),
            "name"
        );
        ensure!(
            parsed.leftovers() == ["duck", "-v", "goose"],
            "leftovers: {:?}",
            parsed.leftovers()
        );
        Ok(())
    }

    #[rstest]
    fn double_dash_is_consumed(engine: FlagEngine) -> Result<()> {
        let parsed = parse(&engine, &["--", "-v"])?;
        ensure!(parsed.leftovers() == ["-v"], "leftovers: {:?}", parsed.leftovers());
        Ok(())
    }

    #[rstest]
    #[case::unknown_cluster(&["-ducks"])]
    #[case::unknown_long(&["--ducks"])]
    #[case::bad_int(&["--count", "many"])]
    #[case::bad_bool(&["-v=Nein"])]
    fn rejects_bad_arguments(engine: FlagEngine, #[case] args: &[&str]) {
        let result = engine.parse_from(args);
        assert!(
            matches!(result, Err(FlagTagError::FlagEngine(_))),
            "expected engine error for {args:?}"
        );
    }

    #[rstest]
    fn help_flag_is_reported(engine: FlagEngine) {
        let result = engine.parse_from(["--help"]);
        assert!(result.is_err_and(|err| err.is_help_request()));
    }

    #[rstest]
    fn duplicate_names_are_rejected(mut engine: FlagEngine) {
        let clash = FlagSpec::new("other", OptionKind::Bool).with_short('v');
        let result = engine.register(clash);
        assert!(matches!(
            result,
            Err(FlagTagError::DuplicateFlag { ref name, ref existing, .. })
                if name == "v" && existing == "verbose"
        ));
        assert_eq!(engine.len(), 3);
    }

    #[rstest]
    fn reused_ids_are_rejected(mut engine: FlagEngine) {
        let reused = FlagSpec::new("name", OptionKind::Text).with_long("other-name");
        let result = engine.register(reused);
        assert!(matches!(
            result,
            Err(FlagTagError::DuplicateOption { ref name }) if name == "name"
        ));
        assert_eq!(engine.len(), 3);
    }

    #[rstest]
    fn claiming_h_disables_builtin_help() -> Result<()> {
        let mut engine = FlagEngine::new("demo");
        engine
            .register(FlagSpec::new("host", OptionKind::Text).with_short('h'))
            .map_err(|err| anyhow!(err))?;
        let parsed = parse(&engine, &["-h", "localhost"])?;
        ensure!(
            parsed.value("host") == Some(&Value::Text("localhost".to_owned())),
            "host"
        );
        Ok(())
    }

    #[rstest]
    #[case::nameless(FlagSpec::new("x", OptionKind::Text))]
    #[case::dash_short(FlagSpec::new("x", OptionKind::Text).with_short('-'))]
    #[case::space_short(FlagSpec::new("x", OptionKind::Bool).with_short(' '))]
    #[case::empty_long(FlagSpec::new("x", OptionKind::Text).with_long(""))]
    #[case::dashed_long(FlagSpec::new("x", OptionKind::Text).with_long("--x"))]
    #[case::equals_long(FlagSpec::new("x", OptionKind::Text).with_long("a=b"))]
    fn malformed_specs_are_rejected(mut engine: FlagEngine, #[case] spec: FlagSpec) -> Result<()> {
        let result = engine.register(spec);
        ensure!(
            matches!(result, Err(FlagTagError::InvalidFlagName { ref option, .. }) if option == "x"),
            "unexpected result: {result:?}"
        );
        ensure!(engine.len() == 3, "engine changed: {}", engine.len());
        let parsed = parse(&engine, &["duck", "sauce"])?;
        ensure!(parsed.value("x").is_none(), "rejected spec took a value");
        ensure!(
            parsed.leftovers() == ["duck", "sauce"],
            "leftovers: {:?}",
            parsed.leftovers()
        );
        Ok(())
    }

    #[rstest]
    #[case::short(&["-h"], true)]
    #[case::long(&["--help"], false)]
    fn free_help_name_survives_claimed_one(
        #[case] args: &[&str],
        #[case] requests_help: bool,
    ) -> Result<()> {
        let mut engine = FlagEngine::new("demo");
        engine
            .register(FlagSpec::new("help", OptionKind::Bool).with_long("help"))
            .map_err(|err| anyhow!(err))?;
        let result = engine.parse_from(args);
        if requests_help {
            ensure!(
                result.as_ref().is_err_and(FlagTagError::is_help_request),
                "-h should request help: {result:?}"
            );
        } else {
            let parsed = result.map_err(|err| anyhow!(err))?;
            ensure!(parsed.value("help") == Some(&Value::Bool(true)), "--help should set the flag");
        }
        Ok(())
    }

    #[rstest]
    fn claiming_both_help_names_removes_builtin_help() -> Result<()> {
        let mut engine = FlagEngine::new("demo");
        engine
            .register(
                FlagSpec::new("help", OptionKind::Bool)
                    .with_short('h')
                    .with_long("help"),
            )
            .map_err(|err| anyhow!(err))?;
        let parsed = parse(&engine, &["-h"])?;
        ensure!(parsed.value("help") == Some(&Value::Bool(true)), "-h should set the flag");
        let mut out = Vec::new();
        engine.write_help(&mut out)?;
        let text = String::from_utf8(out)?;
        ensure!(!text.contains("Print help"), "built-in help still listed:\n{text}");
        Ok(())
    }

    #[rstest]
    fn help_lists_flags_and_defaults(engine: FlagEngine) -> Result<()> {
        let mut out = Vec::new();
        engine.write_help(&mut out)?;
        let text = String::from_utf8(out)?;
        ensure!(text.contains("--verbose"), "missing --verbose:\n{text}");
        ensure!(text.contains("Use verbose logging."), "missing description:\n{text}");
        ensure!(text.contains("[default: foo]"), "missing default:\n{text}");
        ensure!(!text.contains(LEFTOVERS_ID), "leftovers must stay hidden:\n{text}");
        Ok(())
    }
}
