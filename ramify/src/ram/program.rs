use pretty::RcDoc;

use crate::pretty::Pretty;

use super::{Operation, Statement};

/// The lowered form of a whole program: input declarations, one query per rule, then the
/// remaining declarations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn queries(&self) -> impl Iterator<Item = &Operation> {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::Query(operation) => Some(operation),
            Statement::Io(_) => None,
        })
    }
}

impl Pretty for Program {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        RcDoc::intersperse(
            self.statements().iter().map(|statement| statement.to_doc()),
            RcDoc::text(";")
                .append(RcDoc::hardline())
                .append(RcDoc::hardline()),
        )
        .append(RcDoc::text(";"))
    }
}
