//! The option set: every tagged field of one struct, bound to a flag engine.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;

use tracing::{debug, trace};

use crate::engine::FlagEngine;
use crate::error::{FlagTagError, FlagTagResult};
use crate::field::{FieldBinding, Tagged};
use crate::option::TaggedOption;
use crate::register::register;

/// All options built from one configuration struct.
///
/// The set mutably borrows the struct for `'a`. Parsed values are written
/// straight into its fields, and dropping the set hands the struct back.
///
/// # Examples
///
/// ```
/// use flagtag::{OptionSet, Tagged};
///
/// #[derive(Default, Tagged)]
/// struct Options {
///     #[tag(r#"positional:"true""#)]
///     args: Vec<String>,
///     #[tag(r#"long:"name" short:"n" default:"foo""#)]
///     name: String,
/// }
///
/// let mut options = Options::default();
/// let mut set = OptionSet::build(&mut options).unwrap();
/// set.parse_from(["-n", "bar", "duck"]).unwrap();
/// drop(set);
/// assert_eq!(options.name, "bar");
/// assert_eq!(options.args, ["duck"]);
/// ```
#[derive(Debug)]
pub struct OptionSet<'a> {
    options: BTreeMap<String, TaggedOption<'a>>,
    positional: Option<String>,
    engine: FlagEngine,
}

impl<'a> OptionSet<'a> {
    /// Builds an option set over `config`, registering every named flag.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building or registering a field;
    /// no partial set is returned.
    pub fn build<T: Tagged>(config: &'a mut T) -> FlagTagResult<Self> {
        Self::from_bindings(T::command_name(), config.fields())
    }

    /// Builds an option set from an explicit binding list.
    ///
    /// Bindings with a blank tag are skipped.
    ///
    /// # Errors
    ///
    /// As for [`OptionSet::build`], plus [`FlagTagError::DuplicateOption`]
    /// when two bindings share a name.
    pub fn from_bindings(
        name: impl Into<String>,
        bindings: Vec<FieldBinding<'a>>,
    ) -> FlagTagResult<Self> {
        let mut set = Self {
            options: BTreeMap::new(),
            positional: None,
            engine: FlagEngine::new(name),
        };
        for binding in bindings {
            if binding.is_untagged() {
                trace!(field = binding.name, "skipping untagged field");
                continue;
            }
            set.insert(TaggedOption::build(binding)?)?;
        }
        debug!(
            command = set.engine.name(),
            options = set.options.len(),
            flags = set.engine.len(),
            "built option set"
        );
        Ok(set)
    }

    fn insert(&mut self, mut option: TaggedOption<'a>) -> FlagTagResult<()> {
        if self.options.contains_key(&option.name) {
            return Err(FlagTagError::DuplicateOption { name: option.name });
        }
        if option.is_positional() {
            if let Some(first) = &self.positional {
                return Err(FlagTagError::MultiplePositional {
                    first: first.clone(),
                    second: option.name,
                });
            }
            self.positional = Some(option.name.clone());
        } else {
            register(&mut option, &mut self.engine)?;
        }
        self.options.insert(option.name.clone(), option);
        Ok(())
    }

    /// Parses the process arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// See [`OptionSet::parse_from`].
    pub fn parse(&mut self) -> FlagTagResult<()> {
        self.parse_from(std::env::args_os().skip(1))
    }

    /// Parses `args` and writes the results into the bound struct.
    ///
    /// Flag values (or their defaults) are stored in their fields and the
    /// positional field, if any, receives the leftover arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FlagTagError::FlagEngine`] for unknown flags, malformed
    /// values, and help requests.
    pub fn parse_from<I, S>(&mut self, args: I) -> FlagTagResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let parsed = self.engine.parse_from(args)?;
        for option in self.options.values_mut() {
            if let Some(value) = parsed.value(&option.name) {
                option.store(value.clone())?;
            }
        }
        if let Some(option) = self
            .positional
            .as_ref()
            .and_then(|name| self.options.get_mut(name))
        {
            let leftovers = parsed.leftovers();
            trace!(option = %option.name, count = leftovers.len(), "assigning leftovers");
            option.store_list(leftovers)?;
        }
        Ok(())
    }

    /// Writes help for every registered flag to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_help(&self, out: &mut dyn io::Write) -> io::Result<()> {
        self.engine.write_help(out)
    }

    /// Returns the option built for field `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TaggedOption<'a>> {
        self.options.get(name)
    }

    /// Iterates over the options ordered by field name.
    pub fn options(&self) -> impl Iterator<Item = &TaggedOption<'a>> {
        self.options.values()
    }

    /// Number of options, positional included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` when no field was tagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns `true` when at least one named flag was registered.
    #[must_use]
    pub const fn has_options(&self) -> bool {
        !self.engine.is_empty()
    }

    /// The option receiving leftover arguments, if any.
    #[must_use]
    pub fn positional(&self) -> Option<&TaggedOption<'a>> {
        self.positional
            .as_ref()
            .and_then(|name| self.options.get(name))
    }

    /// The underlying flag engine.
    #[must_use]
    pub const fn engine(&self) -> &FlagEngine {
        &self.engine
    }
}
