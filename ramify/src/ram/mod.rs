pub mod condition;
pub mod operation;
pub mod program;
pub mod statement;
pub mod term;
pub mod value_index;

pub use condition::Condition;
pub use operation::Operation;
pub use program::Program;
pub use statement::Statement;
pub use term::Term;
pub use value_index::ValueIndex;
