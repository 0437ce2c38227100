//! Process-wide string table behind the identifier types in [`crate::id`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use string_interner::{DefaultSymbol, StringInterner};

pub(crate) type Symbol = DefaultSymbol;

static NAMES: Lazy<Mutex<StringInterner>> = Lazy::new(Mutex::default);

fn names() -> MutexGuard<'static, StringInterner> {
    // Interning is a single insert, so a poisoned table is still consistent.
    NAMES.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn get_or_intern(name: &str) -> Symbol {
    names().get_or_intern(name)
}

/// Symbols only come from [`get_or_intern`], so every symbol resolves.
pub(crate) fn resolve(symbol: Symbol) -> String {
    names()
        .resolve(symbol)
        .map(str::to_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test() {
        let edge = get_or_intern("edge");

        assert_eq!(edge, get_or_intern("edge"));
        assert_ne!(edge, get_or_intern("path"));
        assert_eq!("edge", resolve(edge));
    }
}
