mod program;
mod rule;

pub use program::ProgramBuilder;
pub use rule::RuleBuilder;
