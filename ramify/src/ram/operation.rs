use derive_more::IsVariant;
use pretty::RcDoc;

use crate::{
    id::{ConstructorId, RelationId},
    logic::ast::AggregateFunction,
    pretty::Pretty,
};

use super::{Condition, Term};

/// One level of a rule's loop nest, nested around the operation it guards.
///
/// Each level binds a tuple `t<level>` whose columns are read by `Term::Element`.
#[derive(Clone, Debug, Eq, PartialEq, IsVariant)]
pub enum Operation {
    /// Iterate every tuple of `relation` satisfying `when`.
    Scan {
        relation: RelationId,
        level: usize,
        when: Vec<Condition>,
        operation: Box<Operation>,
    },
    /// Bind the first tuple of `relation` satisfying `when`, if there is one.
    IfExists {
        relation: RelationId,
        level: usize,
        when: Vec<Condition>,
        operation: Box<Operation>,
    },
    UnpackRecord {
        record: Term,
        arity: usize,
        level: usize,
        when: Vec<Condition>,
        operation: Box<Operation>,
    },
    UnpackBranch {
        branch: Term,
        constructor: ConstructorId,
        arity: usize,
        level: usize,
        when: Vec<Condition>,
        operation: Box<Operation>,
    },
    /// Aggregate the tuples `t<level>` of `relation` satisfying `when`, then bind the result
    /// to `t<level>.0` for the nested operation.
    Aggregate {
        function: AggregateFunction,
        target: Option<Term>,
        relation: RelationId,
        level: usize,
        when: Vec<Condition>,
        operation: Box<Operation>,
    },
    Filter {
        when: Vec<Condition>,
        operation: Box<Operation>,
    },
    Project {
        relation: RelationId,
        values: Vec<Term>,
    },
}

impl Operation {
    /// The operation nested inside this one, if any.
    pub fn nested(&self) -> Option<&Operation> {
        match self {
            Operation::Scan { operation, .. }
            | Operation::IfExists { operation, .. }
            | Operation::UnpackRecord { operation, .. }
            | Operation::UnpackBranch { operation, .. }
            | Operation::Aggregate { operation, .. }
            | Operation::Filter { operation, .. } => Some(operation),
            Operation::Project { .. } => None,
        }
    }

    /// The number of operations from this one down to the projection, inclusive.
    pub fn depth(&self) -> usize {
        1 + self.nested().map_or(0, Operation::depth)
    }
}

fn conditions_doc(when: &[Condition]) -> RcDoc<'_, ()> {
    RcDoc::text("(")
        .append(
            RcDoc::intersperse(
                when.iter().map(|condition| condition.to_doc()),
                RcDoc::text(" and "),
            )
            .nest(1)
            .group(),
        )
        .append(RcDoc::text(")"))
}

fn when_doc(when: &[Condition]) -> RcDoc<'_, ()> {
    if when.is_empty() {
        RcDoc::nil()
    } else {
        RcDoc::text(" where")
            .append(RcDoc::hardline())
            .append(conditions_doc(when))
    }
}

fn nested_doc<'a>(header: RcDoc<'a, ()>, operation: &'a Operation) -> RcDoc<'a, ()> {
    header
        .append(RcDoc::text(" do"))
        .append(RcDoc::hardline().append(operation.to_doc()).nest(2).group())
}

impl Pretty for Operation {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        match self {
            Operation::Scan {
                relation,
                level,
                when,
                operation,
            } => nested_doc(
                RcDoc::concat([
                    RcDoc::text("for t"),
                    RcDoc::as_string(level),
                    RcDoc::text(" in "),
                    RcDoc::as_string(relation),
                    when_doc(when),
                ]),
                operation,
            ),
            Operation::IfExists {
                relation,
                level,
                when,
                operation,
            } => nested_doc(
                RcDoc::concat([
                    RcDoc::text("if exists t"),
                    RcDoc::as_string(level),
                    RcDoc::text(" in "),
                    RcDoc::as_string(relation),
                    when_doc(when),
                ]),
                operation,
            ),
            Operation::UnpackRecord {
                record,
                arity,
                level,
                when,
                operation,
            } => nested_doc(
                RcDoc::concat([
                    RcDoc::text("unpack t"),
                    RcDoc::as_string(level),
                    RcDoc::text(" arity "),
                    RcDoc::as_string(arity),
                    RcDoc::text(" from "),
                    record.to_doc(),
                    when_doc(when),
                ]),
                operation,
            ),
            Operation::UnpackBranch {
                branch,
                constructor,
                arity,
                level,
                when,
                operation,
            } => nested_doc(
                RcDoc::concat([
                    RcDoc::text("unpack t"),
                    RcDoc::as_string(level),
                    RcDoc::text(" arity "),
                    RcDoc::as_string(arity),
                    RcDoc::text(" from $"),
                    RcDoc::as_string(constructor),
                    RcDoc::text(" "),
                    branch.to_doc(),
                    when_doc(when),
                ]),
                operation,
            ),
            Operation::Aggregate {
                function,
                target,
                relation,
                level,
                when,
                operation,
            } => {
                let target_doc = match target {
                    Some(target) => RcDoc::text(" ").append(target.to_doc()),
                    None => RcDoc::nil(),
                };

                nested_doc(
                    RcDoc::concat([
                        RcDoc::text("t"),
                        RcDoc::as_string(level),
                        RcDoc::text(".0 = "),
                        RcDoc::as_string(function),
                        target_doc,
                        RcDoc::text(" for t"),
                        RcDoc::as_string(level),
                        RcDoc::text(" in "),
                        RcDoc::as_string(relation),
                        when_doc(when),
                    ]),
                    operation,
                )
            }
            Operation::Filter { when, operation } => {
                nested_doc(RcDoc::text("if ").append(conditions_doc(when)), operation)
            }
            Operation::Project { relation, values } => {
                let values_doc = RcDoc::intersperse(
                    values.iter().map(|value| value.to_doc()),
                    RcDoc::text(",").append(RcDoc::line()),
                )
                .nest(2)
                .group();

                RcDoc::concat([
                    RcDoc::text("project ("),
                    values_doc,
                    RcDoc::text(") into "),
                    RcDoc::as_string(relation),
                ])
            }
        }
    }
}
