//! Interned identifiers.
//!
//! Identifiers compare and hash by their interned symbol, so ordering follows interning order
//! rather than the lexical order of the names.

use std::fmt::{self, Display};

use crate::interner::{self, Symbol};

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[repr(transparent)]
        pub struct $name(Symbol);

        impl $name {
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(interner::get_or_intern(id.as_ref()))
            }

            pub fn resolve(&self) -> String {
                interner::resolve(self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.resolve())
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

interned_id!(
    /// A logical variable, scoped to a single rule.
    VarId
);

interned_id!(
    /// The name of a relation referenced by an atom.
    RelationId
);

interned_id!(
    /// The constructor tag of a branch (ADT) value.
    ConstructorId
);
