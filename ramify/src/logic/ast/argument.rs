use derive_more::IsVariant;

use crate::{id::VarId, value::Val};

use super::{AggregatorId, BranchId, RecordId};

/// An argument slot of an atom, constraint, or compound term.
///
/// Compound terms and aggregates are referred to by their arena handle, which is what gives two
/// syntactically identical aggregates at different positions distinct identities.
#[derive(Clone, Debug, Eq, PartialEq, IsVariant)]
pub enum Argument {
    Var(VarId),
    Lit(Val),
    Unnamed,
    Record(RecordId),
    Branch(BranchId),
    Aggregate(AggregatorId),
}

impl Argument {
    pub fn var(id: &str) -> Self {
        Self::Var(VarId::new(id))
    }

    pub fn lit(value: impl Into<Val>) -> Self {
        Self::Lit(value.into())
    }
}

impl From<VarId> for Argument {
    fn from(value: VarId) -> Self {
        Self::Var(value)
    }
}

impl From<Val> for Argument {
    fn from(value: Val) -> Self {
        Self::Lit(value)
    }
}

impl From<RecordId> for Argument {
    fn from(value: RecordId) -> Self {
        Self::Record(value)
    }
}

impl From<BranchId> for Argument {
    fn from(value: BranchId) -> Self {
        Self::Branch(value)
    }
}

impl From<AggregatorId> for Argument {
    fn from(value: AggregatorId) -> Self {
        Self::Aggregate(value)
    }
}
