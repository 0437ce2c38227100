use derive_more::{From, IsVariant};
use pretty::RcDoc;

use crate::{io::IoDirectives, pretty::Pretty};

use super::Operation;

#[derive(Clone, Debug, Eq, PartialEq, From, IsVariant)]
pub enum Statement {
    Io(IoDirectives),
    Query(Operation),
}

impl Pretty for Statement {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        match self {
            Statement::Io(io) => io.to_doc(),
            Statement::Query(operation) => RcDoc::text("query").append(
                RcDoc::hardline()
                    .append(operation.to_doc())
                    .nest(2)
                    .group(),
            ),
        }
    }
}
