use std::fmt::{self, Display};

use ordered_float::OrderedFloat;

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Val {
    Bool(bool),
    S64(i64),
    U64(u64),
    F64(OrderedFloat<f64>),
    Char(char),
    String(Box<str>),
}

impl From<bool> for Val {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Val {
    fn from(value: i32) -> Self {
        Self::S64(value.into())
    }
}

impl From<i64> for Val {
    fn from(value: i64) -> Self {
        Self::S64(value)
    }
}

impl From<u32> for Val {
    fn from(value: u32) -> Self {
        Self::U64(value.into())
    }
}

impl From<u64> for Val {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<f64> for Val {
    fn from(value: f64) -> Self {
        Self::F64(OrderedFloat(value))
    }
}

impl From<char> for Val {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for Val {
    fn from(value: &str) -> Self {
        Self::String(value.to_string().into_boxed_str())
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Bool(v) => Display::fmt(v, f),
            Val::S64(v) => Display::fmt(v, f),
            Val::U64(v) => Display::fmt(v, f),
            Val::F64(v) => Display::fmt(v, f),
            Val::Char(v) => f.write_fmt(format_args!("{v:?}")),
            Val::String(v) => f.write_fmt(format_args!("{v:?}")),
        }
    }
}
