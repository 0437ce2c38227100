pub mod ast;
mod builder;
pub mod lower_to_ram;

pub use builder::{ProgramBuilder, RuleBuilder};
pub use lower_to_ram::{lower_rule_to_ram, lower_to_ram, LoweringOptions};
