use super::traits::{Statement, StatementKind};
use crate::error::{BuildError, BuildResult};
use crate::expr::Ref;
use crate::options::InsertOptions;
use crate::table::TableDefinition;

/// One row of an INSERT: column keys mapped to values, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertRow {
    values: Vec<(String, Ref)>,
}

impl InsertRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value. Setting the same column again replaces the value
    /// but keeps its original position.
    pub fn value(mut self, column: impl Into<String>, value: impl Into<Ref>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Ref>) {
        let column = column.into();
        let value = value.into();
        match self.values.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Ref> {
        self.values.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Column keys in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Ref>> FromIterator<(K, V)> for InsertRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = InsertRow::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

/// INSERT statement builder (multi-row VALUES).
///
/// The column list is the explicit `columns(..)` list when one was given,
/// otherwise the key order of the first row. Every row is rendered in that
/// order; a row without a value for a listed column gets `DEFAULT`. An empty
/// column list is rejected like an empty row list.
#[derive(Debug, Clone)]
pub struct InsertBuilder<'t> {
    /// Target table
    table: &'t TableDefinition,
    /// Qualification and column-list flags
    options: InsertOptions,
    /// Explicit column list
    columns: Vec<String>,
    /// Rows to insert
    rows: Vec<InsertRow>,
}

impl<'t> InsertBuilder<'t> {
    /// Create a new INSERT builder.
    pub fn new(table: &'t TableDefinition, options: InsertOptions) -> Self {
        Self {
            table,
            options,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Fix the column list (and the value order of every row).
    pub fn columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one row.
    pub fn row(&mut self, row: InsertRow) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Add several rows.
    pub fn rows(&mut self, rows: impl IntoIterator<Item = InsertRow>) -> &mut Self {
        self.rows.extend(rows);
        self
    }

    fn column_list(&self) -> Vec<&str> {
        if !self.columns.is_empty() {
            return self.columns.iter().map(String::as_str).collect();
        }
        self.rows
            .first()
            .map(|row| row.columns().collect())
            .unwrap_or_default()
    }
}

impl Statement for InsertBuilder<'_> {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn validate(&self) -> BuildResult<()> {
        let columns = self.column_list();
        if self.rows.is_empty() || columns.is_empty() {
            return Err(BuildError::EmptyInsert);
        }
        for (i, row) in self.rows.iter().enumerate() {
            if let Some(extra) = row.columns().find(|c| !columns.contains(c)) {
                return Err(BuildError::InsertColumnMismatch {
                    row: i,
                    column: extra.to_string(),
                });
            }
        }
        Ok(())
    }

    fn build_sql(&self) -> String {
        let columns = self.column_list();
        let mut sql = format!("INSERT INTO {}", self.table.render(self.options.qualify));

        if !self.options.omit_column_list && !columns.is_empty() {
            sql.push_str(" (");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(self.table.column_name(column));
            }
            sql.push(')');
        }

        sql.push_str(" VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for (j, column) in columns.iter().enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                match row.get(column) {
                    Some(value) => value.write_sql(&mut sql),
                    None => sql.push_str("DEFAULT"),
                }
            }
            sql.push(')');
        }

        sql
    }
}
