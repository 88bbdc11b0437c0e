use super::select::Top;
use super::traits::{Statement, StatementKind};
use crate::error::{BuildError, BuildResult};
use crate::expr::{CompareOp, Predicate, Ref};
use crate::options::QualifyOptions;
use crate::table::TableDefinition;

/// Column accessor for single-table WHERE callbacks.
///
/// Columns come back unqualified, since UPDATE targets carry no alias.
#[derive(Debug, Clone, Copy)]
pub struct ColumnComparator<'t> {
    table: &'t TableDefinition,
}

impl<'t> ColumnComparator<'t> {
    pub(crate) fn new(table: &'t TableDefinition) -> Self {
        Self { table }
    }

    /// Reference to a column of the target table.
    pub fn get(&self, column: &str) -> Ref {
        Ref::column(None, self.table.column_name(column))
    }

    /// `column op value`
    pub fn compare(&self, column: &str, op: CompareOp, value: impl Into<Ref>) -> Predicate {
        self.get(column).compare(op, value)
    }
}

/// Accessor handed to [`UpdateBuilder::update`].
#[derive(Debug)]
pub struct UpdateTarget<'t> {
    table: &'t TableDefinition,
    assignments: Vec<(String, Ref)>,
}

impl<'t> UpdateTarget<'t> {
    /// Reference to a column, usable on the right-hand side of `set`.
    pub fn get(&self, column: &str) -> Ref {
        Ref::column(None, self.table.column_name(column))
    }

    /// Record `column = value`. A second assignment to the same column
    /// replaces the first.
    pub fn set(&mut self, column: &str, value: impl Into<Ref>) -> &mut Self {
        let name = self.table.column_name(column).to_string();
        let value = value.into();
        match self.assignments.iter_mut().find(|(c, _)| *c == name) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((name, value)),
        }
        self
    }
}

/// UPDATE statement builder.
///
/// Renders `UPDATE [TOP (n) [PERCENT] ]<table> SET col = val, ... [WHERE ..]`.
/// Nothing checks that an assignment was registered; without one the SET
/// list is left empty.
#[derive(Debug, Clone)]
pub struct UpdateBuilder<'t> {
    /// Target table
    table: &'t TableDefinition,
    /// Qualification flags
    options: QualifyOptions,
    /// TOP modifier
    top: Option<Top>,
    /// SET assignments, in registration order
    assignments: Vec<(String, Ref)>,
    /// WHERE predicate
    where_clause: Option<Predicate>,
    /// First registration error
    build_error: Option<BuildError>,
}

impl<'t> UpdateBuilder<'t> {
    /// Create a new UPDATE builder.
    pub fn new(table: &'t TableDefinition, options: QualifyOptions) -> Self {
        Self {
            table,
            options,
            top: None,
            assignments: Vec::new(),
            where_clause: None,
            build_error: None,
        }
    }

    fn record(&mut self, error: BuildError) {
        if self.build_error.is_none() {
            self.build_error = Some(error);
        }
    }

    /// Register assignments through a target accessor.
    ///
    /// ```
    /// use tsqlb::{functions, QualifyOptions, Statement, TableDefinition, UpdateBuilder};
    ///
    /// let address = TableDefinition::new("AdventureWorks2022", "Person", "Address");
    /// let mut ub = UpdateBuilder::new(&address, QualifyOptions::new().database_name(false));
    /// ub.update(|t| {
    ///     t.set("ModifiedDate", functions::getdate());
    /// });
    /// assert_eq!(ub.build().unwrap(), "UPDATE Person.Address SET ModifiedDate = GETDATE()");
    /// ```
    pub fn update<F>(&mut self, assign: F) -> &mut Self
    where
        F: FnOnce(&mut UpdateTarget<'t>),
    {
        let mut target = UpdateTarget {
            table: self.table,
            assignments: std::mem::take(&mut self.assignments),
        };
        assign(&mut target);
        self.assignments = target.assignments;
        self
    }

    /// `column = value` without a callback.
    pub fn set(&mut self, column: &str, value: impl Into<Ref>) -> &mut Self {
        self.update(|t| {
            t.set(column, value);
        })
    }

    /// Set `TOP (n) [PERCENT]`.
    pub fn top(&mut self, top: Top) -> &mut Self {
        if self.top.is_some() {
            self.record(BuildError::ClauseAlreadySet("TOP"));
            return self;
        }
        self.top = Some(top);
        self
    }

    /// Set the WHERE predicate through a column comparator.
    pub fn where_clause<F>(&mut self, condition: F) -> &mut Self
    where
        F: FnOnce(&ColumnComparator<'t>) -> Predicate,
    {
        let predicate = condition(&ColumnComparator::new(self.table));
        self.where_predicate(predicate)
    }

    /// Set the WHERE predicate directly.
    pub fn where_predicate(&mut self, predicate: Predicate) -> &mut Self {
        if self.where_clause.is_some() {
            self.record(BuildError::ClauseAlreadySet("WHERE"));
            return self;
        }
        self.where_clause = Some(predicate);
        self
    }
}

impl Statement for UpdateBuilder<'_> {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn validate(&self) -> BuildResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        Ok(())
    }

    fn build_sql(&self) -> String {
        let mut sql = String::from("UPDATE ");

        if let Some(top) = &self.top {
            top.write_sql(&mut sql);
            sql.push(' ');
        }

        sql.push_str(&self.table.render(self.options));
        sql.push_str(" SET ");

        for (i, (column, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(column);
            sql.push_str(" = ");
            value.write_sql(&mut sql);
        }

        if let Some(predicate) = &self.where_clause {
            sql.push_str(" WHERE ");
            predicate.write_sql(&mut sql);
        }

        sql
    }
}
