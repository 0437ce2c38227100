use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
};

use anyhow::Result;
use pretty::RcDoc;
use tracing::trace;

use crate::{
    error::{error, Error},
    id::VarId,
    location::Location,
    logic::ast::{AggregatorId, BranchId, RecordId},
    pretty::Pretty,
};

/// Where the values of one rule become available in its loop nest.
///
/// Variables may be referenced at many locations; the least one, in level-then-column order,
/// is where the variable is bound and every other occurrence reads it. Aggregates, records and
/// branches each materialize at exactly one location, keyed by the handle of their AST node.
///
/// A `ValueIndex` is built for one rule, filled while the loop nest is laid out, and then
/// queried to resolve each argument. Looking up something that was never indexed is an
/// internal error: earlier analyses must have rejected the rule.
#[derive(Debug, Clone, Default)]
pub struct ValueIndex {
    var_references: BTreeMap<VarId, BTreeSet<Location>>,
    generator_locations: im::HashMap<AggregatorId, Location>,
    record_locations: im::HashMap<RecordId, Location>,
    branch_locations: im::HashMap<BranchId, Location>,
}

impl ValueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_var_reference(&mut self, var: VarId, location: Location) {
        trace!(%var, %location, "indexing variable reference");

        self.var_references.entry(var).or_default().insert(location);
    }

    pub fn is_defined(&self, var: VarId) -> bool {
        self.var_references
            .get(&var)
            .map_or(false, |locations| !locations.is_empty())
    }

    pub fn definition_point(&self, var: VarId) -> Result<Location> {
        match self
            .var_references
            .get(&var)
            .and_then(|locations| locations.first())
        {
            Some(location) => Ok(*location),
            None => error(Error::UnresolvedVariable(var)),
        }
    }

    pub fn var_references(&self, var: VarId) -> Result<&BTreeSet<Location>> {
        match self.var_references.get(&var) {
            Some(locations) => Ok(locations),
            None => error(Error::UnresolvedVariable(var)),
        }
    }

    pub fn set_generator_location(&mut self, id: AggregatorId, location: Location) -> Result<()> {
        if let Some(existing) = self.generator_locations.get(&id) {
            return error(Error::DuplicateDefinition(format!(
                "generator #{} is already evaluated at {existing}",
                id.index()
            )));
        }

        trace!(generator = id.index(), %location, "indexing generator");

        self.generator_locations.insert(id, location);

        Ok(())
    }

    pub fn generator_location(&self, id: AggregatorId) -> Result<Location> {
        match self.generator_locations.get(&id) {
            Some(location) => Ok(*location),
            None => error(Error::UnresolvedGenerator(id)),
        }
    }

    /// Whether some aggregate is evaluated at `level`.
    pub fn is_generator(&self, level: usize) -> bool {
        self.generator_locations
            .values()
            .any(|location| location.level() == level)
    }

    pub fn set_record_location(&mut self, id: RecordId, level: usize, column: usize) -> Result<()> {
        let location = Location::new(level, column);

        if let Some(existing) = self.record_locations.get(&id) {
            return error(Error::DuplicateDefinition(format!(
                "record #{} is already defined at {existing}",
                id.index()
            )));
        }

        trace!(record = id.index(), %location, "indexing record");

        self.record_locations.insert(id, location);

        Ok(())
    }

    pub fn record_location(&self, id: RecordId) -> Result<Location> {
        match self.record_locations.get(&id) {
            Some(location) => Ok(*location),
            None => error(Error::UnresolvedRecord(id)),
        }
    }

    pub fn has_record_location(&self, id: RecordId) -> bool {
        self.record_locations.contains_key(&id)
    }

    pub fn set_branch_location(&mut self, id: BranchId, level: usize, column: usize) -> Result<()> {
        let location = Location::new(level, column);

        if let Some(existing) = self.branch_locations.get(&id) {
            return error(Error::DuplicateDefinition(format!(
                "branch #{} is already defined at {existing}",
                id.index()
            )));
        }

        trace!(branch = id.index(), %location, "indexing branch");

        self.branch_locations.insert(id, location);

        Ok(())
    }

    pub fn branch_location(&self, id: BranchId) -> Result<Location> {
        match self.branch_locations.get(&id) {
            Some(location) => Ok(*location),
            None => error(Error::UnresolvedBranch(id)),
        }
    }

    pub fn has_branch_location(&self, id: BranchId) -> bool {
        self.branch_locations.contains_key(&id)
    }

    /// Whether some branch value is found at `level`.
    pub fn is_branch_defined_on(&self, level: usize) -> bool {
        self.branch_locations
            .values()
            .any(|location| location.level() == level)
    }

    /// Whether `level` binds a variable or a record value.
    ///
    /// Aggregates and branches are not considered here; use [`ValueIndex::is_generator`] and
    /// [`ValueIndex::is_branch_defined_on`] for those.
    pub fn is_something_defined_on(&self, level: usize) -> bool {
        let defines_var = self
            .var_references
            .values()
            .filter_map(|locations| locations.first())
            .any(|location| location.level() == level);

        defines_var
            || self
                .record_locations
                .values()
                .any(|location| location.level() == level)
    }
}

impl Pretty for ValueIndex {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        let mut vars = self
            .var_references
            .iter()
            .map(|(var, locations)| (var.resolve(), locations))
            .collect::<Vec<_>>();

        vars.sort_by(|(a, _), (b, _)| a.cmp(b));

        let vars_doc = RcDoc::concat(vars.into_iter().map(|(name, locations)| {
            let locations_doc =
                RcDoc::intersperse(locations.iter().map(RcDoc::as_string), RcDoc::text(", "));

            RcDoc::hardline().append(RcDoc::concat([
                RcDoc::text(name),
                RcDoc::text(": {"),
                locations_doc,
                RcDoc::text("}"),
            ]))
        }))
        .nest(2);

        RcDoc::text("Variables:").append(vars_doc)
    }
}

impl Display for ValueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_doc().render_fmt(80, f)
    }
}
