pub mod argument;
pub mod atom;
pub mod body_term;
pub mod nodes;
pub mod program;
pub mod rule;

pub use argument::Argument;
pub use atom::{Atom, Constraint, ConstraintOp};
pub use body_term::BodyTerm;
pub use nodes::{
    AggregateFunction, Aggregator, AggregatorId, BranchId, BranchInit, Nodes, RecordId, RecordInit,
};
pub use program::Program;
pub use rule::Rule;
