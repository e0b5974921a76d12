//! Write-through field references and the declarative binding list.
//!
//! A configuration struct exposes its tagged fields through [`Tagged`], which
//! hands out one [`FieldBinding`] per field. Each binding carries the field
//! name, its raw tag, and a [`FieldRef`] that mutably borrows the field, so
//! option sets can write parsed values straight back into the struct.

use crate::kind::{OptionKind, Value};

/// Mutable reference to a field of one of the supported kinds.
#[derive(Debug)]
pub enum FieldRef<'a> {
    /// Reference to a `bool` field.
    Bool(&'a mut bool),
    /// Reference to an `f64` field.
    Float64(&'a mut f64),
    /// Reference to an `i32` field.
    Int32(&'a mut i32),
    /// Reference to an `i64` field.
    Int64(&'a mut i64),
    /// Reference to a `String` field.
    Text(&'a mut String),
    /// Reference to a `u32` field.
    Uint32(&'a mut u32),
    /// Reference to a `u64` field.
    Uint64(&'a mut u64),
    /// Reference to a `Vec<String>` field.
    TextList(&'a mut Vec<String>),
}

impl FieldRef<'_> {
    /// Kind of the referenced field.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Float64(_) => OptionKind::Float64,
            Self::Int32(_) => OptionKind::Int32,
            Self::Int64(_) => OptionKind::Int64,
            Self::Text(_) => OptionKind::Text,
            Self::Uint32(_) => OptionKind::Uint32,
            Self::Uint64(_) => OptionKind::Uint64,
            Self::TextList(_) => OptionKind::TextList,
        }
    }

    /// Canonical text of the field's current value.
    ///
    /// Sequences have no scalar text form and yield `None`.
    #[must_use]
    pub fn current_text(&self) -> Option<String> {
        match self {
            Self::Bool(v) => Some(v.to_string()),
            Self::Float64(v) => Some(v.to_string()),
            Self::Int32(v) => Some(v.to_string()),
            Self::Int64(v) => Some(v.to_string()),
            Self::Text(v) => Some((**v).clone()),
            Self::Uint32(v) => Some(v.to_string()),
            Self::Uint64(v) => Some(v.to_string()),
            Self::TextList(_) => None,
        }
    }

    /// Stores `value` in the referenced field.
    ///
    /// # Errors
    ///
    /// Hands the value back when its kind differs from the field's kind.
    pub fn assign(&mut self, value: Value) -> Result<(), Value> {
        match (self, value) {
            (Self::Bool(slot), Value::Bool(v)) => **slot = v,
            (Self::Float64(slot), Value::Float64(v)) => **slot = v,
            (Self::Int32(slot), Value::Int32(v)) => **slot = v,
            (Self::Int64(slot), Value::Int64(v)) => **slot = v,
            (Self::Text(slot), Value::Text(v)) => **slot = v,
            (Self::Uint32(slot), Value::Uint32(v)) => **slot = v,
            (Self::Uint64(slot), Value::Uint64(v)) => **slot = v,
            (_, other) => return Err(other),
        }
        Ok(())
    }

    /// Replaces the contents of a sequence field.
    ///
    /// # Errors
    ///
    /// Hands the values back when the field is not a sequence.
    pub fn assign_list(&mut self, values: Vec<String>) -> Result<(), Vec<String>> {
        match self {
            Self::TextList(slot) => {
                **slot = values;
                Ok(())
            }
            _ => Err(values),
        }
    }
}

/// Types that can be bound to a flag or to the positional slot.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be bound to a command-line option",
    note = "tagged fields must be one of bool, f64, i32, i64, String, u32, u64 or Vec<String>"
)]
pub trait Bindable {
    /// Borrows `self` as a write-through field reference.
    fn bind(&mut self) -> FieldRef<'_>;
}

macro_rules! impl_bindable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn bind(&mut self) -> FieldRef<'_> {
                    FieldRef::$variant(self)
                }
            }
        )*
    };
}

impl_bindable! {
    bool => Bool,
    f64 => Float64,
    i32 => Int32,
    i64 => Int64,
    String => Text,
    u32 => Uint32,
    u64 => Uint64,
    Vec<String> => TextList,
}

/// One field of a configuration struct: its name, raw tag, and storage.
#[derive(Debug)]
pub struct FieldBinding<'a> {
    /// Field identifier.
    pub name: &'static str,
    /// Raw tag text in the `key:"value"` mini-language.
    pub tag: &'static str,
    /// Write-through reference to the field.
    pub field: FieldRef<'a>,
}

impl<'a> FieldBinding<'a> {
    /// Creates a binding.
    #[must_use]
    pub const fn new(name: &'static str, tag: &'static str, field: FieldRef<'a>) -> Self {
        Self { name, tag, field }
    }

    /// Returns `true` when the field carries no tag text and should be
    /// ignored.
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.tag.trim().is_empty()
    }
}

/// Structs whose fields can be bound to command-line flags.
///
/// Usually derived with [`macro@crate::Tagged`]; implement it by hand when a
/// derive is not an option.
///
/// # Examples
///
/// ```
/// use flagtag::{Bindable, FieldBinding, Tagged};
///
/// struct Options {
///     name: String,
///     args: Vec<String>,
/// }
///
/// impl Tagged for Options {
///     fn command_name() -> &'static str {
///         "Options"
///     }
///
///     fn fields(&mut self) -> Vec<FieldBinding<'_>> {
///         vec![
///             FieldBinding::new("name", r#"long:"name" default:"foo""#, self.name.bind()),
///             FieldBinding::new("args", r#"positional:"true""#, self.args.bind()),
///         ]
///     }
/// }
///
/// let mut options = Options { name: String::new(), args: Vec::new() };
/// flagtag::parse_from(&mut options, ["--name", "bar", "duck"]).unwrap();
/// assert_eq!(options.name, "bar");
/// assert_eq!(options.args, ["duck"]);
/// ```
pub trait Tagged {
    /// Name used for the generated command in help output.
    fn command_name() -> &'static str
    where
        Self: Sized;

    /// Returns one binding per field, in declaration order.
    fn fields(&mut self) -> Vec<FieldBinding<'_>>;
}
