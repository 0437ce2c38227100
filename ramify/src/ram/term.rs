use derive_more::{From, IsVariant};
use pretty::RcDoc;

use crate::{id::ConstructorId, location::Location, pretty::Pretty, value::Val};

#[derive(Clone, Debug, Eq, PartialEq, From, IsVariant)]
pub enum Term {
    Lit(Val),
    Element(Location),
    #[from(ignore)]
    PackRecord(Vec<Term>),
    #[from(ignore)]
    PackBranch(ConstructorId, Vec<Term>),
    #[from(ignore)]
    Undefined,
}

impl Term {
    /// The deepest loop level this term reads from, if any.
    pub fn level(&self) -> Option<usize> {
        match self {
            Term::Element(location) => Some(location.level()),
            Term::PackRecord(args) | Term::PackBranch(_, args) => {
                args.iter().filter_map(Term::level).max()
            }
            Term::Lit(_) | Term::Undefined => None,
        }
    }
}

impl Pretty for Term {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        fn args_doc(args: &[Term]) -> RcDoc<'_, ()> {
            RcDoc::intersperse(args.iter().map(|arg| arg.to_doc()), RcDoc::text(", "))
        }

        match self {
            Term::Lit(value) => RcDoc::as_string(value),
            Term::Element(location) => RcDoc::concat([
                RcDoc::text("t"),
                RcDoc::as_string(location.level()),
                RcDoc::text("."),
                RcDoc::as_string(location.column()),
            ]),
            Term::PackRecord(args) => RcDoc::concat([
                RcDoc::text("["),
                args_doc(args),
                RcDoc::text("]"),
            ]),
            Term::PackBranch(constructor, args) => RcDoc::concat([
                RcDoc::text("$"),
                RcDoc::as_string(constructor),
                RcDoc::text("("),
                args_doc(args),
                RcDoc::text(")"),
            ]),
            Term::Undefined => RcDoc::text("_"),
        }
    }
}
