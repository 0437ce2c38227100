//! Relation I/O declarations.
//!
//! These are carried through lowering untouched and handed to code emission, which generates
//! the concrete load and store operations from them.

mod parser;

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use anyhow::Result;
use derive_more::{Display, IsVariant};
use pretty::RcDoc;

use crate::{
    error::{error, Error},
    pretty::Pretty,
};

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Ord, PartialOrd, IsVariant)]
pub enum IoKind {
    #[display(fmt = "input")]
    Input,
    #[display(fmt = "output")]
    Output,
    #[display(fmt = "printsize")]
    Printsize,
    #[display(fmt = "limitsize")]
    Limitsize,
}

impl FromStr for IoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            "printsize" => Ok(Self::Printsize),
            "limitsize" => Ok(Self::Limitsize),
            other => error(Error::IoParseError(format!("unknown I/O kind: {other}"))),
        }
    }
}

/// A dotted relation name, e.g. `graph.edge`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct QualifiedName(Vec<String>);

impl QualifiedName {
    pub fn new<S>(segments: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &Vec<String> {
        &self.0
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name.split('.'))
    }
}

/// An I/O declaration for one relation: its kind, the relation name, and its key/value
/// directives.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IoDirectives {
    kind: IoKind,
    name: QualifiedName,
    directives: BTreeMap<String, String>,
}

impl IoDirectives {
    pub fn new(kind: IoKind, name: impl Into<QualifiedName>) -> Self {
        Self {
            kind,
            name: name.into(),
            directives: BTreeMap::default(),
        }
    }

    pub fn kind(&self) -> IoKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: IoKind) {
        self.kind = kind;
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<QualifiedName>) {
        self.name = name.into();
    }

    /// Fails if the key is absent; check [`IoDirectives::has_directive`] first.
    pub fn directive(&self, key: &str) -> Result<&str> {
        match self.directives.get(key) {
            Some(value) => Ok(value),
            None => error(Error::DirectiveNotFound(key.to_owned())),
        }
    }

    /// Adds a directive, replacing any previous value for `key`.
    pub fn add_directive(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.directives.insert(key.into(), value.into());
    }

    pub fn with_directive(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_directive(key, value);

        self
    }

    pub fn has_directive(&self, key: &str) -> bool {
        self.directives.contains_key(key)
    }

    pub fn directives(&self) -> &BTreeMap<String, String> {
        &self.directives
    }
}

impl Display for IoDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{} {}", self.kind, self.name)?;

        if !self.directives.is_empty() {
            let directives = self
                .directives
                .iter()
                .map(|(k, v)| format!("{k}=\"{}\"", escape(v)))
                .collect::<Vec<_>>();

            write!(f, "({})", directives.join(","))?;
        }

        Ok(())
    }
}

impl FromStr for IoDirectives {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}

impl Pretty for IoDirectives {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        RcDoc::as_string(self)
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }

    escaped
}
