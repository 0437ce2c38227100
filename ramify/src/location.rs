use derive_more::Display;

/// A binding site inside a loop nest: the tuple bound at nesting `level`, and a `column` of it.
///
/// Locations order by level first and column second, so the least location of a set is the
/// earliest point in the nest at which a value is available.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[display(fmt = "({},{})", level, column)]
pub struct Location {
    level: usize,
    column: usize,
}

impl Location {
    pub fn new(level: usize, column: usize) -> Self {
        Self { level, column }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl From<(usize, usize)> for Location {
    fn from((level, column): (usize, usize)) -> Self {
        Self::new(level, column)
    }
}
