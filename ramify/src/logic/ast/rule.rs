use anyhow::Result;

use super::{AggregatorId, Argument, Atom, BodyTerm, Constraint, Nodes};

#[derive(Debug)]
pub struct Rule {
    head: Atom,
    body: Vec<BodyTerm>,
    nodes: Nodes,
}

impl Rule {
    pub fn new(head: Atom, body: Vec<BodyTerm>, nodes: Nodes) -> Self {
        Self { head, body, nodes }
    }

    pub fn head(&self) -> &Atom {
        &self.head
    }

    pub fn body(&self) -> &Vec<BodyTerm> {
        &self.body
    }

    pub fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.body.iter().filter_map(|term| match term {
            BodyTerm::Atom(atom) => Some(atom),
            _ => None,
        })
    }

    pub fn negations(&self) -> impl Iterator<Item = &Atom> {
        self.body.iter().filter_map(|term| match term {
            BodyTerm::Negation(atom) => Some(atom),
            _ => None,
        })
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.body.iter().filter_map(|term| match term {
            BodyTerm::Constraint(constraint) => Some(constraint),
            _ => None,
        })
    }

    /// Aggregates evaluated by this rule, in order of first occurrence: head arguments first,
    /// then negations and constraints in body order. Aggregates nested in records or branches
    /// are included.
    pub fn aggregators(&self) -> Result<Vec<AggregatorId>> {
        let mut found = Vec::default();

        self.collect_aggregators(self.head.args(), &mut found)?;

        for term in &self.body {
            match term {
                BodyTerm::Atom(_) => continue,
                BodyTerm::Negation(atom) => self.collect_aggregators(atom.args(), &mut found)?,
                BodyTerm::Constraint(constraint) => {
                    self.collect_aggregators([constraint.lhs(), constraint.rhs()], &mut found)?
                }
            }
        }

        Ok(found)
    }

    fn collect_aggregators<'a>(
        &self,
        args: impl IntoIterator<Item = &'a Argument>,
        found: &mut Vec<AggregatorId>,
    ) -> Result<()> {
        for arg in args {
            match arg {
                Argument::Aggregate(id) if !found.contains(id) => found.push(*id),
                Argument::Record(id) => {
                    self.collect_aggregators(self.nodes.record(*id)?.args(), found)?
                }
                Argument::Branch(id) => {
                    self.collect_aggregators(self.nodes.branch(*id)?.args(), found)?
                }
                _ => continue,
            }
        }

        Ok(())
    }
}
