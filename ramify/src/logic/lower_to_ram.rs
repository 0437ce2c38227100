//! Lowering of rules into RAM loop nests.
//!
//! A rule is lowered in two passes over a fresh [`ValueIndex`]. Indexing assigns every positive
//! atom, every destructured record or branch, and every aggregate its own nesting level, and
//! registers where each value becomes available. Emission then builds the loop nest from the
//! innermost projection outwards, resolving every argument through the index.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::{debug, trace};

use crate::{
    error::{error, Error},
    id::VarId,
    location::Location,
    ram::{self, Condition, Operation, Statement, Term, ValueIndex},
};

use super::ast::{
    AggregateFunction, AggregatorId, Argument, Atom, BranchId, BranchInit, ConstraintOp, Program,
    RecordId, RecordInit, Rule,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoweringOptions {
    /// Lower atoms that bind nothing new to an existence check instead of a full scan.
    pub prune_empty_levels: bool,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            prune_empty_levels: true,
        }
    }
}

pub fn lower_to_ram(program: &Program, options: LoweringOptions) -> Result<ram::Program> {
    let mut statements = Vec::default();

    for io in program.io().iter().filter(|io| io.kind().is_input()) {
        statements.push(Statement::Io(io.clone()));
    }

    for rule in program.rules() {
        statements.push(Statement::Query(lower_rule_to_ram(rule, options)?));
    }

    for io in program.io().iter().filter(|io| !io.kind().is_input()) {
        statements.push(Statement::Io(io.clone()));
    }

    debug!(
        rules = program.rules().len(),
        statements = statements.len(),
        "lowered program"
    );

    Ok(ram::Program::new(statements))
}

pub fn lower_rule_to_ram(rule: &Rule, options: LoweringOptions) -> Result<Operation> {
    let mut lowering = RuleLowering::new(rule, options);

    lowering.build_index()?;

    trace!(head = %rule.head().relation(), "indexed rule\n{}", lowering.index);

    let operation = lowering.emit()?;

    debug!(
        head = %rule.head().relation(),
        levels = lowering.levels.len(),
        "lowered rule"
    );

    Ok(operation)
}

#[derive(Clone, Copy, Debug)]
enum Level<'a> {
    Atom(&'a Atom),
    Record(RecordId, &'a RecordInit),
    Branch(BranchId, &'a BranchInit),
    Generator(AggregatorId),
}

impl<'a> Level<'a> {
    fn args(self) -> &'a [Argument] {
        match self {
            Level::Atom(atom) => atom.args(),
            Level::Record(_, record) => record.args(),
            Level::Branch(_, branch) => branch.args(),
            Level::Generator(_) => &[],
        }
    }
}

#[derive(Debug)]
struct RuleLowering<'a> {
    rule: &'a Rule,
    options: LoweringOptions,
    index: ValueIndex,
    levels: Vec<Level<'a>>,
}

impl<'a> RuleLowering<'a> {
    fn new(rule: &'a Rule, options: LoweringOptions) -> Self {
        Self {
            rule,
            options,
            index: ValueIndex::new(),
            levels: Vec::default(),
        }
    }

    fn push_level(&mut self, level: Level<'a>) -> usize {
        self.levels.push(level);

        self.levels.len() - 1
    }

    fn build_index(&mut self) -> Result<()> {
        let rule = self.rule;

        for atom in rule.atoms() {
            let level = self.push_level(Level::Atom(atom));

            self.index_args(atom.args(), level)?;
        }

        for id in rule.aggregators()? {
            let level = self.push_level(Level::Generator(id));

            self.index.set_generator_location(id, Location::new(level, 0))?;
        }

        for constraint in rule.constraints() {
            if let Some((var, id)) = constraint.aggregate_binding() {
                if !self.index.is_defined(var) {
                    let location = self.index.generator_location(id)?;

                    self.index.add_var_reference(var, location);
                }
            }
        }

        Ok(())
    }

    fn index_args(&mut self, args: &'a [Argument], level: usize) -> Result<()> {
        let rule = self.rule;
        let nodes = rule.nodes();

        for (column, arg) in args.iter().enumerate() {
            match arg {
                Argument::Var(var) => self
                    .index
                    .add_var_reference(*var, Location::new(level, column)),
                Argument::Record(id) => {
                    self.index.set_record_location(*id, level, column)?;

                    let record = nodes.record(*id)?;
                    let unpacked = self.push_level(Level::Record(*id, record));

                    self.index_args(record.args(), unpacked)?;
                }
                Argument::Branch(id) => {
                    self.index.set_branch_location(*id, level, column)?;

                    let branch = nodes.branch(*id)?;
                    let unpacked = self.push_level(Level::Branch(*id, branch));

                    self.index_args(branch.args(), unpacked)?;
                }
                Argument::Aggregate(_) => {
                    return error(Error::UnsupportedArgument(format!(
                        "aggregate in column {column} of a positive literal"
                    )));
                }
                Argument::Lit(_) | Argument::Unnamed => continue,
            }
        }

        Ok(())
    }

    fn emit(&self) -> Result<Operation> {
        let head = self.rule.head();
        let mut when: Vec<Vec<Condition>> = vec![Vec::default(); self.levels.len()];
        let mut unleveled = Vec::default();

        for condition in self.conditions()? {
            match condition.level() {
                Some(level) => match when.get_mut(level) {
                    Some(conditions) => conditions.push(condition),
                    None => {
                        return error(Error::InternalError(format!(
                            "condition reads level {level} of a {} level nest",
                            self.levels.len()
                        )))
                    }
                },
                None => unleveled.push(condition),
            }
        }

        let mut operation = Operation::Project {
            relation: head.relation(),
            values: self.resolve_all(head.args())?,
        };

        for (level, when) in when.into_iter().enumerate().rev() {
            let inner = Box::new(operation);

            operation = match self.levels[level] {
                Level::Atom(atom) => {
                    if self.options.prune_empty_levels
                        && !self.index.is_something_defined_on(level)
                        && !self.index.is_branch_defined_on(level)
                    {
                        Operation::IfExists {
                            relation: atom.relation(),
                            level,
                            when,
                            operation: inner,
                        }
                    } else {
                        Operation::Scan {
                            relation: atom.relation(),
                            level,
                            when,
                            operation: inner,
                        }
                    }
                }
                Level::Record(id, record) => Operation::UnpackRecord {
                    record: Term::Element(self.index.record_location(id)?),
                    arity: record.args().len(),
                    level,
                    when,
                    operation: inner,
                },
                Level::Branch(id, branch) => Operation::UnpackBranch {
                    branch: Term::Element(self.index.branch_location(id)?),
                    constructor: branch.constructor(),
                    arity: branch.args().len(),
                    level,
                    when,
                    operation: inner,
                },
                Level::Generator(id) => self.emit_aggregate(id, level, when, inner)?,
            };
        }

        if !unleveled.is_empty() {
            operation = Operation::Filter {
                when: unleveled,
                operation: Box::new(operation),
            };
        }

        Ok(operation)
    }

    /// Conditions of the rule body, not yet assigned to a level.
    fn conditions(&self) -> Result<Vec<Condition>> {
        let mut conditions = Vec::default();

        for (level, layout) in self.levels.iter().enumerate() {
            for (column, arg) in layout.args().iter().enumerate() {
                let location = Location::new(level, column);

                match arg {
                    Argument::Var(var) => {
                        let definition = self.index.definition_point(*var)?;

                        if definition != location {
                            conditions.push(Condition::equality(location, definition));
                        }
                    }
                    Argument::Lit(value) => {
                        conditions.push(Condition::equality(location, value.clone()));
                    }
                    _ => continue,
                }
            }
        }

        for atom in self.rule.negations() {
            conditions.push(Condition::NotExists(
                atom.relation(),
                self.resolve_all(atom.args())?,
            ));
        }

        for constraint in self.rule.constraints() {
            if let Some((var, id)) = constraint.aggregate_binding() {
                if self.index.definition_point(var)? == self.index.generator_location(id)? {
                    continue;
                }
            }

            let lhs = self.resolve(constraint.lhs())?;
            let rhs = self.resolve(constraint.rhs())?;

            conditions.push(match constraint.op() {
                ConstraintOp::Eq => Condition::Equality(lhs, rhs),
                op => Condition::Constraint(op, lhs, rhs),
            });
        }

        Ok(conditions)
    }

    /// The tuple `t<level>` ranges over the aggregate's body atom; the nested operation sees
    /// the aggregate's result at `(level, 0)`. Conditions of the rule that read the result are
    /// applied to the nested operation.
    fn emit_aggregate(
        &self,
        id: AggregatorId,
        level: usize,
        outer: Vec<Condition>,
        inner: Box<Operation>,
    ) -> Result<Operation> {
        if !self.index.is_generator(level) {
            return error(Error::InternalError(format!(
                "level {level} does not evaluate an aggregate"
            )));
        }

        let aggregator = self.rule.nodes().aggregator(id)?;
        let body = aggregator.body();
        let mut locals: BTreeMap<VarId, Location> = BTreeMap::default();
        let mut when = Vec::default();

        for (column, arg) in body.args().iter().enumerate() {
            let location = Location::new(level, column);

            match arg {
                Argument::Var(var) => {
                    if let Some(bound) = locals.get(var) {
                        when.push(Condition::equality(location, *bound));
                    } else if self.index.is_defined(*var) {
                        let definition = self.index.definition_point(*var)?;

                        if definition.level() >= level {
                            return error(Error::UnsupportedArgument(format!(
                                "variable {var} in the body of an aggregate is bound by a later aggregate"
                            )));
                        }

                        when.push(Condition::equality(location, definition));
                    } else {
                        locals.insert(*var, location);
                    }
                }
                Argument::Lit(value) => when.push(Condition::equality(location, value.clone())),
                Argument::Unnamed => continue,
                Argument::Record(_) | Argument::Branch(_) | Argument::Aggregate(_) => {
                    return error(Error::UnsupportedArgument(format!(
                        "compound term in column {column} of the body of an aggregate"
                    )));
                }
            }
        }

        let target = match (aggregator.function(), aggregator.target()) {
            (AggregateFunction::Count, None) => None,
            (AggregateFunction::Count, Some(_)) => {
                return error(Error::UnsupportedArgument(
                    "count does not take a target".to_owned(),
                ));
            }
            (function, None) => {
                return error(Error::UnsupportedArgument(format!(
                    "{function} requires a target"
                )));
            }
            (_, Some(Argument::Var(var))) => match locals.get(var) {
                Some(location) => Some(Term::Element(*location)),
                None => Some(Term::Element(self.index.definition_point(*var)?)),
            },
            (_, Some(Argument::Lit(value))) => Some(Term::Lit(value.clone())),
            (function, Some(_)) => {
                return error(Error::UnsupportedArgument(format!(
                    "the target of {function} must be a variable or a literal"
                )));
            }
        };

        let operation = if outer.is_empty() {
            inner
        } else {
            Box::new(Operation::Filter {
                when: outer,
                operation: inner,
            })
        };

        Ok(Operation::Aggregate {
            function: aggregator.function(),
            target,
            relation: body.relation(),
            level,
            when,
            operation,
        })
    }

    fn resolve(&self, arg: &Argument) -> Result<Term> {
        let nodes = self.rule.nodes();

        match arg {
            Argument::Var(var) => Ok(Term::Element(self.index.definition_point(*var)?)),
            Argument::Lit(value) => Ok(Term::Lit(value.clone())),
            Argument::Unnamed => Ok(Term::Undefined),
            Argument::Record(id) if self.index.has_record_location(*id) => {
                Ok(Term::Element(self.index.record_location(*id)?))
            }
            Argument::Record(id) => Ok(Term::PackRecord(
                self.resolve_all(nodes.record(*id)?.args())?,
            )),
            Argument::Branch(id) if self.index.has_branch_location(*id) => {
                Ok(Term::Element(self.index.branch_location(*id)?))
            }
            Argument::Branch(id) => {
                let branch = nodes.branch(*id)?;

                Ok(Term::PackBranch(
                    branch.constructor(),
                    self.resolve_all(branch.args())?,
                ))
            }
            Argument::Aggregate(id) => Ok(Term::Element(self.index.generator_location(*id)?)),
        }
    }

    fn resolve_all(&self, args: &[Argument]) -> Result<Vec<Term>> {
        args.iter().map(|arg| self.resolve(arg)).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::{
        assert_lowers,
        id::RelationId,
        io::{IoDirectives, IoKind},
        logic::{ProgramBuilder, RuleBuilder},
        pretty::Pretty,
        test_utils::arb_var,
        value::Val,
    };

    use super::*;

    fn var(id: &str) -> Argument {
        Argument::var(id)
    }

    fn at(level: usize, column: usize) -> Term {
        Term::Element(Location::new(level, column))
    }

    #[test]
    fn test_join() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            b.head("path", [var("x"), var("z")])?;
            b.atom("edge", [var("x"), var("y")]);
            b.atom("edge", [var("y"), var("z")]);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            Operation::Scan {
                relation: RelationId::new("edge"),
                level: 0,
                when: vec![],
                operation: Box::new(Operation::Scan {
                    relation: RelationId::new("edge"),
                    level: 1,
                    when: vec![Condition::equality(at(1, 0), at(0, 1))],
                    operation: Box::new(Operation::Project {
                        relation: RelationId::new("path"),
                        values: vec![at(0, 0), at(1, 1)],
                    }),
                }),
            },
            operation
        );

        assert_eq!(
            r#"for t0 in edge do
  for t1 in edge where
  (t1.0 = t0.1) do
    project (t0.0, t1.1) into path"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_literals_and_repeated_variables() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            b.head("self_loop", [var("x")])?;
            b.atom("edge", [var("x"), var("x"), Argument::lit("red")]);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            Operation::Scan {
                relation: RelationId::new("edge"),
                level: 0,
                when: vec![
                    Condition::equality(at(0, 1), at(0, 0)),
                    Condition::equality(at(0, 2), Val::from("red")),
                ],
                operation: Box::new(Operation::Project {
                    relation: RelationId::new("self_loop"),
                    values: vec![at(0, 0)],
                }),
            },
            operation
        );

        Ok(())
    }

    #[test]
    fn test_existence_check() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            b.head("linked", [var("x")])?;
            b.atom("node", [var("x")]);
            b.atom("edge", [var("x"), Argument::Unnamed]);

            Ok(())
        })?;

        let pruned = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            r#"for t0 in node do
  if exists t1 in edge where
  (t1.0 = t0.0) do
    project (t0.0) into linked"#,
            pruned.to_pretty(80)
        );

        let scanned = lower_rule_to_ram(
            &rule,
            LoweringOptions {
                prune_empty_levels: false,
            },
        )?;

        assert_eq!(
            r#"for t0 in node do
  for t1 in edge where
  (t1.0 = t0.0) do
    project (t0.0) into linked"#,
            scanned.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_unresolved_head_variable() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            b.head("p", [var("x"), var("y")])?;
            b.atom("q", [var("x")]);

            Ok(())
        })?;

        assert_eq!(
            Some(&Error::UnresolvedVariable(VarId::new("y"))),
            lower_rule_to_ram(&rule, LoweringOptions::default())
                .unwrap_err()
                .downcast_ref()
        );

        Ok(())
    }

    #[test]
    fn test_negation() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            b.head("root", [var("x")])?;
            b.atom("node", [var("x")]);
            b.negation("edge", [Argument::Unnamed, var("x")]);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            Operation::Scan {
                relation: RelationId::new("node"),
                level: 0,
                when: vec![Condition::NotExists(
                    RelationId::new("edge"),
                    vec![Term::Undefined, at(0, 0)]
                )],
                operation: Box::new(Operation::Project {
                    relation: RelationId::new("root"),
                    values: vec![at(0, 0)],
                }),
            },
            operation
        );

        Ok(())
    }

    #[test]
    fn test_negation_rendering() {
        assert_lowers!(
            |b| {
                b.head("root", [var("x")])?;
                b.atom("node", [var("x")]);
                b.negation("edge", [Argument::Unnamed, var("x")]);

                Ok(())
            },
            r#"for t0 in node where
((_, t0.0) notin edge) do
  project (t0.0) into root"#
        );
    }

    #[test]
    fn test_unleveled_constraint() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            b.head("p", [var("x")])?;
            b.atom("q", [var("x")]);
            b.constraint(ConstraintOp::Lt, Argument::lit(1), Argument::lit(2));
            b.constraint(ConstraintOp::Ne, var("x"), Argument::lit(0));

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            Operation::Filter {
                when: vec![Condition::Constraint(
                    ConstraintOp::Lt,
                    Term::Lit(Val::from(1)),
                    Term::Lit(Val::from(2))
                )],
                operation: Box::new(Operation::Scan {
                    relation: RelationId::new("q"),
                    level: 0,
                    when: vec![Condition::Constraint(
                        ConstraintOp::Ne,
                        at(0, 0),
                        Term::Lit(Val::from(0))
                    )],
                    operation: Box::new(Operation::Project {
                        relation: RelationId::new("p"),
                        values: vec![at(0, 0)],
                    }),
                }),
            },
            operation
        );

        Ok(())
    }

    #[test]
    fn test_records() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let pair = b.record([var("a"), var("b")]);
            let swapped = b.record([var("b"), var("a")]);

            b.head("swapped", [Argument::from(swapped)])?;
            b.atom("pairs", [Argument::from(pair)]);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            Operation::Scan {
                relation: RelationId::new("pairs"),
                level: 0,
                when: vec![],
                operation: Box::new(Operation::UnpackRecord {
                    record: at(0, 0),
                    arity: 2,
                    level: 1,
                    when: vec![],
                    operation: Box::new(Operation::Project {
                        relation: RelationId::new("swapped"),
                        values: vec![Term::PackRecord(vec![at(1, 1), at(1, 0)])],
                    }),
                }),
            },
            operation
        );

        assert_eq!(
            r#"for t0 in pairs do
  unpack t1 arity 2 from t0.0 do
    project ([t1.1, t1.0]) into swapped"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_nested_records() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let inner = b.record([var("x"), Argument::lit(0)]);
            let outer = b.record([Argument::from(inner), var("y")]);

            b.head("p", [var("x"), var("y")])?;
            b.atom("q", [Argument::from(outer), var("z")]);
            b.atom("r", [var("z")]);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            r#"for t0 in q do
  unpack t1 arity 2 from t0.0 do
    unpack t2 arity 2 from t1.0 where
    (t2.1 = 0) do
      if exists t3 in r where
      (t3.0 = t0.1) do
        project (t2.0, t1.1) into p"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_branches() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let some = b.branch("Some", [var("v")]);
            let wrapped = b.branch("Ok", [var("v")]);

            b.head("values", [Argument::from(wrapped)])?;
            b.atom("options", [Argument::from(some)]);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        // The branch column is the only content of level 0, which must still be scanned.
        assert_eq!(
            r#"for t0 in options do
  unpack t1 arity 1 from $Some t0.0 do
    project ($Ok(t1.0)) into values"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_count() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let count = b.aggregate(
                AggregateFunction::Count,
                None,
                Atom::new("edge", [var("x"), Argument::Unnamed]),
            );

            b.head("degree", [var("x"), var("c")])?;
            b.atom("node", [var("x")]);
            b.constraint(ConstraintOp::Eq, var("c"), count);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            r#"for t0 in node do
  t1.0 = count for t1 in edge where
  (t1.0 = t0.0) do
    project (t0.0, t1.0) into degree"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_aggregate_result_constraint() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let sum = b.aggregate(
                AggregateFunction::Sum,
                Some(var("w")),
                Atom::new("weight", [var("x"), var("w")]),
            );

            b.head("heavy", [var("x")])?;
            b.atom("node", [var("x")]);
            b.constraint(ConstraintOp::Eq, sum, var("s"));
            b.constraint(ConstraintOp::Gt, var("s"), Argument::lit(10));

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            Operation::Scan {
                relation: RelationId::new("node"),
                level: 0,
                when: vec![],
                operation: Box::new(Operation::Aggregate {
                    function: AggregateFunction::Sum,
                    target: Some(at(1, 1)),
                    relation: RelationId::new("weight"),
                    level: 1,
                    when: vec![Condition::equality(at(1, 0), at(0, 0))],
                    operation: Box::new(Operation::Filter {
                        when: vec![Condition::Constraint(
                            ConstraintOp::Gt,
                            at(1, 0),
                            Term::Lit(Val::from(10))
                        )],
                        operation: Box::new(Operation::Project {
                            relation: RelationId::new("heavy"),
                            values: vec![at(0, 0)],
                        }),
                    }),
                }),
            },
            operation
        );

        assert_eq!(
            r#"for t0 in node do
  t1.0 = sum t1.1 for t1 in weight where
  (t1.0 = t0.0) do
    if (t1.0 > 10) do
      project (t0.0) into heavy"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_aggregate_compared_to_bound_variable() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let count = b.aggregate(
                AggregateFunction::Count,
                None,
                Atom::new("item", [Argument::Unnamed]),
            );

            b.head("expected", [var("n")])?;
            b.atom("size", [var("n")]);
            b.constraint(ConstraintOp::Eq, var("n"), count);

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            r#"for t0 in size do
  t1.0 = count for t1 in item do
    if (t0.0 = t1.0) do
      project (t0.0) into expected"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_identical_aggregates() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let first = b.aggregate(
                AggregateFunction::Count,
                None,
                Atom::new("r", [Argument::Unnamed]),
            );
            let second = b.aggregate(
                AggregateFunction::Count,
                None,
                Atom::new("r", [Argument::Unnamed]),
            );

            b.head("counts", [Argument::from(first), Argument::from(second)])?;

            Ok(())
        })?;

        let operation = lower_rule_to_ram(&rule, LoweringOptions::default())?;

        assert_eq!(
            r#"t0.0 = count for t0 in r do
  t1.0 = count for t1 in r do
    project (t0.0, t1.0) into counts"#,
            operation.to_pretty(80)
        );

        Ok(())
    }

    #[test]
    fn test_unsupported_arguments() -> Result<()> {
        let in_atom = RuleBuilder::build(|b| {
            let count = b.aggregate(
                AggregateFunction::Count,
                None,
                Atom::new("r", [Argument::Unnamed]),
            );

            b.head("p", [var("x")])?;
            b.atom("q", [var("x"), Argument::from(count)]);

            Ok(())
        })?;

        let missing_target = RuleBuilder::build(|b| {
            let max = b.aggregate(AggregateFunction::Max, None, Atom::new("r", [var("y")]));

            b.head("p", [Argument::from(max)])?;

            Ok(())
        })?;

        let count_target = RuleBuilder::build(|b| {
            let count = b.aggregate(
                AggregateFunction::Count,
                Some(var("y")),
                Atom::new("r", [var("y")]),
            );

            b.head("p", [Argument::from(count)])?;

            Ok(())
        })?;

        for rule in [in_atom, missing_target, count_target] {
            assert!(matches!(
                lower_rule_to_ram(&rule, LoweringOptions::default())
                    .unwrap_err()
                    .downcast_ref::<Error>(),
                Some(Error::UnsupportedArgument(_))
            ));
        }

        Ok(())
    }

    #[test]
    fn test_record_destructured_twice() -> Result<()> {
        let rule = RuleBuilder::build(|b| {
            let pair = b.record([var("a"), var("b")]);

            b.head("p", [var("a")])?;
            b.atom("q", [Argument::from(pair)]);
            b.atom("r", [Argument::from(pair)]);

            Ok(())
        })?;

        assert!(matches!(
            lower_rule_to_ram(&rule, LoweringOptions::default())
                .unwrap_err()
                .downcast_ref::<Error>(),
            Some(Error::DuplicateDefinition(_))
        ));

        Ok(())
    }

    #[test]
    fn test_program() -> Result<()> {
        let program = ProgramBuilder::build(|p| {
            p.output("path", |io| io)?;
            p.input("edge", |io| io.with_directive("IO", "file"))?;
            p.rule(|b| {
                b.head("path", [var("x"), var("y")])?;
                b.atom("edge", [var("x"), var("y")]);

                Ok(())
            })?;

            Ok(())
        })?;

        let lowered = lower_to_ram(&program, LoweringOptions::default())?;

        assert_eq!(3, lowered.statements().len());
        assert_eq!(1, lowered.queries().count());
        assert_eq!(
            &Statement::Io(IoDirectives::new(IoKind::Input, "edge").with_directive("IO", "file")),
            &lowered.statements()[0]
        );
        assert_eq!(
            &Statement::Io(IoDirectives::new(IoKind::Output, "path")),
            &lowered.statements()[2]
        );

        assert_eq!(
            r#".input edge(IO="file");

query
  for t0 in edge do
    project (t0.0, t0.1) into path;

.output path;"#,
            lowered.to_pretty(80)
        );

        Ok(())
    }

    proptest! {
        #[test]
        fn test_variable_resolves_to_its_column(
            v in arb_var(),
            (arity, column) in (1..6usize).prop_flat_map(|arity| (Just(arity), 0..arity)),
        ) {
            let args = (0..arity)
                .map(|i| if i == column { Argument::Var(v) } else { Argument::Unnamed })
                .collect::<Vec<_>>();

            let rule = RuleBuilder::build(|b| {
                b.head("p", [Argument::Var(v)])?;
                b.atom("q", args);

                Ok(())
            })
            .unwrap();

            let operation = lower_rule_to_ram(&rule, LoweringOptions::default()).unwrap();

            prop_assert_eq!(
                Operation::Scan {
                    relation: RelationId::new("q"),
                    level: 0,
                    when: vec![],
                    operation: Box::new(Operation::Project {
                        relation: RelationId::new("p"),
                        values: vec![at(0, column)],
                    }),
                },
                operation
            );
        }
    }
}
