use derive_more::Display;

use crate::id::{RelationId, VarId};

use super::{AggregatorId, Argument};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Atom {
    relation: RelationId,
    args: Vec<Argument>,
}

impl Atom {
    pub fn new(relation: impl Into<RelationId>, args: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            relation: relation.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn relation(&self) -> RelationId {
        self.relation
    }

    pub fn args(&self) -> &Vec<Argument> {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum ConstraintOp {
    #[display(fmt = "=")]
    Eq,
    #[display(fmt = "!=")]
    Ne,
    #[display(fmt = "<")]
    Lt,
    #[display(fmt = "<=")]
    Le,
    #[display(fmt = ">")]
    Gt,
    #[display(fmt = ">=")]
    Ge,
}

/// A binary constraint between two arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constraint {
    op: ConstraintOp,
    lhs: Argument,
    rhs: Argument,
}

impl Constraint {
    pub fn new(op: ConstraintOp, lhs: impl Into<Argument>, rhs: impl Into<Argument>) -> Self {
        Self {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn op(&self) -> ConstraintOp {
        self.op
    }

    pub fn lhs(&self) -> &Argument {
        &self.lhs
    }

    pub fn rhs(&self) -> &Argument {
        &self.rhs
    }

    /// The variable and aggregate of an `X = <aggregate>` constraint, in either orientation.
    pub fn aggregate_binding(&self) -> Option<(VarId, AggregatorId)> {
        match (self.op, &self.lhs, &self.rhs) {
            (ConstraintOp::Eq, Argument::Var(var), Argument::Aggregate(id))
            | (ConstraintOp::Eq, Argument::Aggregate(id), Argument::Var(var)) => Some((*var, *id)),
            _ => None,
        }
    }
}
