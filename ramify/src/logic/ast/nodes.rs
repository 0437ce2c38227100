use std::fmt::{self, Debug};

use anyhow::Result;
use derive_more::Display;
use id_arena::{Arena, Id};

use crate::{
    error::{error, Error},
    id::ConstructorId,
};

use super::{Argument, Atom};

pub type RecordId = Id<RecordInit>;
pub type BranchId = Id<BranchInit>;
pub type AggregatorId = Id<Aggregator>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordInit {
    args: Vec<Argument>,
}

impl RecordInit {
    pub fn new(args: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            args: args.into_iter().collect(),
        }
    }

    pub fn args(&self) -> &Vec<Argument> {
        &self.args
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BranchInit {
    constructor: ConstructorId,
    args: Vec<Argument>,
}

impl BranchInit {
    pub fn new(
        constructor: impl Into<ConstructorId>,
        args: impl IntoIterator<Item = Argument>,
    ) -> Self {
        Self {
            constructor: constructor.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn constructor(&self) -> ConstructorId {
        self.constructor
    }

    pub fn args(&self) -> &Vec<Argument> {
        &self.args
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum AggregateFunction {
    #[display(fmt = "count")]
    Count,
    #[display(fmt = "sum")]
    Sum,
    #[display(fmt = "min")]
    Min,
    #[display(fmt = "max")]
    Max,
    #[display(fmt = "mean")]
    Mean,
}

/// An aggregate over the tuples of a single atom, e.g. `sum Y : { edge(X, Y) }`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Aggregator {
    function: AggregateFunction,
    target: Option<Argument>,
    body: Atom,
}

impl Aggregator {
    pub fn new(function: AggregateFunction, target: Option<Argument>, body: Atom) -> Self {
        Self {
            function,
            target,
            body,
        }
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn target(&self) -> Option<&Argument> {
        self.target.as_ref()
    }

    pub fn body(&self) -> &Atom {
        &self.body
    }
}

/// Owns the compound-term and aggregate nodes of a rule.
///
/// Every node gets a process-unique handle when allocated; the handles are the identity keys
/// used by [`crate::ram::ValueIndex`].
pub struct Nodes {
    records: Arena<RecordInit>,
    branches: Arena<BranchInit>,
    aggregators: Arena<Aggregator>,
}

impl Nodes {
    pub fn new() -> Self {
        Self {
            records: Arena::new(),
            branches: Arena::new(),
            aggregators: Arena::new(),
        }
    }

    pub fn alloc_record(&mut self, record: RecordInit) -> RecordId {
        self.records.alloc(record)
    }

    pub fn alloc_branch(&mut self, branch: BranchInit) -> BranchId {
        self.branches.alloc(branch)
    }

    pub fn alloc_aggregator(&mut self, aggregator: Aggregator) -> AggregatorId {
        self.aggregators.alloc(aggregator)
    }

    pub fn record(&self, id: RecordId) -> Result<&RecordInit> {
        match self.records.get(id) {
            Some(record) => Ok(record),
            None => error(Error::InternalError(format!(
                "record #{} does not belong to this rule",
                id.index()
            ))),
        }
    }

    pub fn branch(&self, id: BranchId) -> Result<&BranchInit> {
        match self.branches.get(id) {
            Some(branch) => Ok(branch),
            None => error(Error::InternalError(format!(
                "branch #{} does not belong to this rule",
                id.index()
            ))),
        }
    }

    pub fn aggregator(&self, id: AggregatorId) -> Result<&Aggregator> {
        match self.aggregators.get(id) {
            Some(aggregator) => Ok(aggregator),
            None => error(Error::InternalError(format!(
                "aggregator #{} does not belong to this rule",
                id.index()
            ))),
        }
    }
}

impl Debug for Nodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nodes")
            .field("records", &self.records.len())
            .field("branches", &self.branches.len())
            .field("aggregators", &self.aggregators.len())
            .finish()
    }
}

impl Default for Nodes {
    fn default() -> Self {
        Self::new()
    }
}
