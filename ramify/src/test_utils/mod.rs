use proptest::prelude::*;

use crate::{id::VarId, location::Location};

/// Locations within a loop nest of at most eight levels of eight columns each.
pub fn arb_location() -> impl Strategy<Value = Location> {
    (0..8usize, 0..8usize).prop_map(|(level, column)| Location::new(level, column))
}

pub fn arb_var() -> impl Strategy<Value = VarId> {
    "[a-z][a-z0-9_]{0,3}".prop_map(VarId::new)
}

#[macro_export]
macro_rules! assert_lowers {
    ($rule_closure:expr, $expected:expr) => {
        let rule = match $crate::logic::RuleBuilder::build($rule_closure) {
            std::result::Result::Ok(v) => v,
            std::result::Result::Err(e) => {
                panic!("Failed to build rule: {:?}", e);
            }
        };

        let operation = match $crate::logic::lower_rule_to_ram(
            &rule,
            $crate::logic::LoweringOptions::default(),
        ) {
            std::result::Result::Ok(v) => v,
            std::result::Result::Err(e) => {
                panic!("Failed to lower rule: {:?}", e);
            }
        };

        assert_eq!(
            $expected,
            $crate::pretty::Pretty::to_pretty(&operation, 80)
        );
    };
}
