use derive_more::IsVariant;
use pretty::RcDoc;

use crate::{id::RelationId, logic::ast::ConstraintOp, pretty::Pretty};

use super::Term;

#[derive(Clone, Debug, Eq, PartialEq, IsVariant)]
pub enum Condition {
    Equality(Term, Term),
    Constraint(ConstraintOp, Term, Term),
    NotExists(RelationId, Vec<Term>),
}

impl Condition {
    pub fn equality(left: impl Into<Term>, right: impl Into<Term>) -> Self {
        Self::Equality(left.into(), right.into())
    }

    /// The deepest loop level this condition reads from, if any.
    pub fn level(&self) -> Option<usize> {
        match self {
            Condition::Equality(left, right) | Condition::Constraint(_, left, right) => {
                left.level().max(right.level())
            }
            Condition::NotExists(_, args) => args.iter().filter_map(Term::level).max(),
        }
    }
}

impl Pretty for Condition {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        match self {
            Condition::Equality(left, right) => {
                RcDoc::concat([left.to_doc(), RcDoc::text(" = "), right.to_doc()]).group()
            }
            Condition::Constraint(op, left, right) => RcDoc::concat([
                left.to_doc(),
                RcDoc::text(" "),
                RcDoc::as_string(op),
                RcDoc::text(" "),
                right.to_doc(),
            ])
            .group(),
            Condition::NotExists(relation, args) => {
                let args_doc =
                    RcDoc::intersperse(args.iter().map(|arg| arg.to_doc()), RcDoc::text(", "));

                RcDoc::concat([
                    RcDoc::text("("),
                    args_doc,
                    RcDoc::text(") notin "),
                    RcDoc::as_string(relation),
                ])
            }
        }
    }
}
