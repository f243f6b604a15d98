//! Runtime values.
//!
//! A [`Value`] is a copyable tag plus payload. Scalars carry their payload
//! inline; strings, functions, classes, objects, and element arrays carry a
//! stable index into the owning table, so passing a Value around never
//! copies the thing it names. Equality compares tag first, then the numeric
//! reading of the payload with an epsilon; an Error never equals anything,
//! itself included.

use std::mem;

use skiff_ir::{Name, StringInterner};

/// Defines a stable table index newtype.
///
/// Construction stays inside the crate: only the interpreter's tables hand
/// out ids, which keeps every id valid for the interpreter's lifetime.
macro_rules! table_id {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => { $(
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub struct $name(u32);

        impl $name {
            pub(crate) const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub(crate) const fn raw(self) -> u32 {
                self.0
            }

            /// Position of this entry in its table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    )* };
}

table_id!(
    /// Stable index into the function table.
    FuncId,
    /// Stable index into the class table.
    ClassId,
    /// Stable index into the object table.
    ObjId,
    /// Stable index into the elements table.
    ElemsId,
);

/// A runtime value.
///
/// The index-carrying variants stay valid for the lifetime of the
/// interpreter that produced them; tables are append-only arenas.
#[derive(Copy, Clone, Debug)]
pub enum Value {
    /// Sentinel for a runtime failure. Statement lists halt on it.
    Error,
    Nil,
    Bool(bool),
    Number(f64),
    /// Interned string; two equal literals share one name.
    Str(Name),
    Function(FuncId),
    Class(ClassId),
    Object(ObjId),
    Elements(ElemsId),
}

impl Value {
    /// Tolerance for numeric comparison and zero checks.
    pub const EPSILON: f64 = 1e-8;

    /// The numeric reading of the payload: `Number` is itself, `Bool` is
    /// 1/0, `Nil` and `Error` are 0, reference values read as their table
    /// index.
    pub fn numeric(self) -> f64 {
        match self {
            Self::Error | Self::Nil => 0.0,
            Self::Bool(b) => f64::from(u8::from(b)),
            Self::Number(n) => n,
            Self::Str(name) => name.index() as f64,
            Self::Function(id) => id.index() as f64,
            Self::Class(id) => id.index() as f64,
            Self::Object(id) => id.index() as f64,
            Self::Elements(id) => id.index() as f64,
        }
    }

    /// Condition truthiness: not numerically zero.
    #[inline]
    pub fn is_truthy(self) -> bool {
        self.numeric().abs() > Self::EPSILON
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Tag name for runtime-error messages.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "numeric",
            Self::Str(_) => "string",
            Self::Function(_) => "function",
            Self::Class(_) => "class",
            Self::Object(_) => "object",
            Self::Elements(_) => "elements",
        }
    }

    /// Source-facing rendering, as `print` and string concatenation see it.
    pub fn render(self, interner: &StringInterner) -> String {
        match self {
            Self::Error => "error".to_owned(),
            Self::Nil => "nil".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Str(name) => interner.lookup(name).to_owned(),
            Self::Function(id) => format!("<fn:{}>", id.index()),
            Self::Class(id) => format!("<class:{}>", id.index()),
            Self::Object(id) => format!("<object:{}>", id.index()),
            Self::Elements(id) => format!("<elements:{}>", id.index()),
        }
    }
}

/// Tag-then-payload equality with epsilon tolerance; Error is equal to
/// nothing, which is why this is `PartialEq` and not `Eq`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Error, _) | (_, Self::Error) => false,
            (Self::Nil, Self::Nil) => true,
            _ if mem::discriminant(self) == mem::discriminant(other) => {
                (self.numeric() - other.numeric()).abs() <= Self::EPSILON
            }
            _ => false,
        }
    }
}
