use crate::io::IoDirectives;

use super::Rule;

#[derive(Debug, Default)]
pub struct Program {
    io: Vec<IoDirectives>,
    rules: Vec<Rule>,
}

impl Program {
    pub fn new(io: Vec<IoDirectives>, rules: Vec<Rule>) -> Self {
        Self { io, rules }
    }

    pub fn io(&self) -> &Vec<IoDirectives> {
        &self.io
    }

    pub fn rules(&self) -> &Vec<Rule> {
        &self.rules
    }
}
