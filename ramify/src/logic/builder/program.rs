use anyhow::Result;

use crate::{
    error::{error, Error},
    io::{IoDirectives, IoKind, QualifiedName},
    logic::ast::{Program, Rule},
};

use super::RuleBuilder;

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    io: Vec<IoDirectives>,
    rules: Vec<Rule>,
}

impl ProgramBuilder {
    pub fn build<F>(f: F) -> Result<Program>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut builder = Self::default();

        f(&mut builder)?;

        builder.finalize()
    }

    pub fn finalize(self) -> Result<Program> {
        Ok(Program::new(self.io, self.rules))
    }

    /// Declares an I/O directive. A relation may carry at most one declaration of each kind.
    pub fn io(&mut self, io: IoDirectives) -> Result<()> {
        if self
            .io
            .iter()
            .any(|existing| existing.kind() == io.kind() && existing.name() == io.name())
        {
            return error(Error::DuplicateDefinition(format!(
                "relation {} is already declared as {}",
                io.name(),
                io.kind()
            )));
        }

        self.io.push(io);

        Ok(())
    }

    pub fn input<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(IoDirectives) -> IoDirectives,
    {
        self.declare(IoKind::Input, name, f)
    }

    pub fn output<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(IoDirectives) -> IoDirectives,
    {
        self.declare(IoKind::Output, name, f)
    }

    pub fn rule<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut RuleBuilder) -> Result<()>,
    {
        let rule = RuleBuilder::build(f)?;

        self.rules.push(rule);

        Ok(())
    }

    fn declare<F>(&mut self, kind: IoKind, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(IoDirectives) -> IoDirectives,
    {
        let io = f(IoDirectives::new(kind, QualifiedName::from(name)));

        self.io(io)
    }
}
