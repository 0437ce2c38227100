use derive_more::IsVariant;

use super::{Atom, Constraint};

#[derive(Clone, Debug, Eq, PartialEq, IsVariant)]
pub enum BodyTerm {
    Atom(Atom),
    Negation(Atom),
    Constraint(Constraint),
}

impl From<Constraint> for BodyTerm {
    fn from(value: Constraint) -> Self {
        Self::Constraint(value)
    }
}
