use anyhow::Result;

use crate::{
    error::{error, Error},
    id::{ConstructorId, RelationId},
    logic::ast::{
        AggregateFunction, Aggregator, AggregatorId, Argument, Atom, BodyTerm, BranchId,
        BranchInit, Constraint, ConstraintOp, Nodes, RecordId, RecordInit, Rule,
    },
};

/// Assembles a [`Rule`] together with the arena owning its compound terms and aggregates.
///
/// Records, branches and aggregates are allocated first and then referred to by handle from
/// the head or body. Each allocation is a distinct node, even when two of them are
/// structurally identical.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    head: Option<Atom>,
    body: Vec<BodyTerm>,
    nodes: Nodes,
}

impl RuleBuilder {
    pub fn build<F>(f: F) -> Result<Rule>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut builder = Self::default();

        f(&mut builder)?;

        builder.finalize()
    }

    pub fn finalize(self) -> Result<Rule> {
        let Some(head) = self.head else {
            return error(Error::RuleMissingHead);
        };

        Ok(Rule::new(head, self.body, self.nodes))
    }

    pub fn record(&mut self, args: impl IntoIterator<Item = Argument>) -> RecordId {
        self.nodes.alloc_record(RecordInit::new(args))
    }

    pub fn branch(
        &mut self,
        constructor: impl Into<ConstructorId>,
        args: impl IntoIterator<Item = Argument>,
    ) -> BranchId {
        self.nodes.alloc_branch(BranchInit::new(constructor, args))
    }

    pub fn aggregate(
        &mut self,
        function: AggregateFunction,
        target: Option<Argument>,
        body: Atom,
    ) -> AggregatorId {
        self.nodes.alloc_aggregator(Aggregator::new(function, target, body))
    }

    pub fn head(
        &mut self,
        relation: impl Into<RelationId>,
        args: impl IntoIterator<Item = Argument>,
    ) -> Result<()> {
        let atom = Atom::new(relation, args);

        if let Some(head) = &self.head {
            return error(Error::DuplicateDefinition(format!(
                "rule head is already {}, cannot set it to {}",
                head.relation(),
                atom.relation()
            )));
        }

        self.head = Some(atom);

        Ok(())
    }

    pub fn atom(
        &mut self,
        relation: impl Into<RelationId>,
        args: impl IntoIterator<Item = Argument>,
    ) {
        self.body.push(BodyTerm::Atom(Atom::new(relation, args)));
    }

    pub fn negation(
        &mut self,
        relation: impl Into<RelationId>,
        args: impl IntoIterator<Item = Argument>,
    ) {
        self.body.push(BodyTerm::Negation(Atom::new(relation, args)));
    }

    pub fn constraint(
        &mut self,
        op: ConstraintOp,
        lhs: impl Into<Argument>,
        rhs: impl Into<Argument>,
    ) {
        self.body.push(Constraint::new(op, lhs, rhs).into());
    }
}
