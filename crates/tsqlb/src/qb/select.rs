use super::traits::{Statement, StatementKind};
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnRef, Predicate, Ref, Subquery};
use crate::options::{BuildOptions, QualifyOptions};
use crate::table::Source;
use std::fmt::Write;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// Row-limiting modifier: `TOP (n)` or `TOP (n) PERCENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Top {
    value: u64,
    percent: bool,
}

impl Top {
    /// `TOP (n)`
    pub fn rows(n: u64) -> Self {
        Self {
            value: n,
            percent: false,
        }
    }

    /// `TOP (n) PERCENT`
    pub fn percent(n: u64) -> Self {
        Self {
            value: n,
            percent: true,
        }
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        let _ = write!(out, "TOP ({})", self.value);
        if self.percent {
            out.push_str(" PERCENT");
        }
    }
}

/// Join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    table_alias: String,
    on: Predicate,
}

/// SELECT statement builder.
///
/// Tables are addressed by the alias they were registered under in the
/// [`Source`]. Clauses may be registered in any order; `build()` always emits
/// them in T-SQL order:
///
/// `SELECT [DISTINCT] [TOP (n) [PERCENT]] <list> [INTO <t>] FROM <t>[ AS a]
/// [<joins>] [WHERE ..] [GROUP BY ..] [HAVING ..] [ORDER BY ..]
/// [OFFSET n ROWS [FETCH NEXT m ROWS ONLY]]`
///
/// # Example
/// ```
/// use tsqlb::{BuildOptions, Order, SelectBuilder, Source, Statement, TableDefinition};
///
/// let source = Source::new().with(
///     "p",
///     TableDefinition::new("AdventureWorks2022", "Production", "Product"),
/// );
/// let mut qb = SelectBuilder::new(&source, BuildOptions::new().database_name(false));
/// let name = qb.column("p", "name");
/// qb.select_all_from("p").from("p").order_by(&name, Order::Asc);
///
/// assert_eq!(
///     qb.build().unwrap(),
///     "SELECT p.* FROM Production.Product AS p ORDER BY p.name ASC"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectBuilder<'a> {
    /// Tables addressable by alias
    source: &'a Source,
    /// Qualification flags
    options: BuildOptions,
    /// Select list
    selected: Vec<Ref>,
    /// DISTINCT flag
    distinct: bool,
    /// TOP modifier
    top: Option<Top>,
    /// INTO target alias and its qualification
    into: Option<(String, QualifyOptions)>,
    /// Main table alias
    from: Option<String>,
    /// JOIN clauses
    joins: Vec<Join>,
    /// WHERE predicate
    where_clause: Option<Predicate>,
    /// GROUP BY references
    group_by: Vec<Ref>,
    /// HAVING predicate
    having: Option<Predicate>,
    /// ORDER BY items
    order_by: Vec<(Ref, Option<Order>)>,
    /// OFFSET rows
    offset: Option<u64>,
    /// FETCH NEXT rows
    fetch: Option<u64>,
    /// First registration error (reported by validate/build)
    build_error: Option<BuildError>,
}

impl<'a> SelectBuilder<'a> {
    /// Create a new SELECT builder over `source`.
    pub fn new(source: &'a Source, options: BuildOptions) -> Self {
        Self {
            source,
            options,
            selected: Vec::new(),
            distinct: false,
            top: None,
            into: None,
            from: None,
            joins: Vec::new(),
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            offset: None,
            fetch: None,
            build_error: None,
        }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn source(&self) -> &'a Source {
        self.source
    }

    fn record(&mut self, error: BuildError) {
        if self.build_error.is_none() {
            self.build_error = Some(error);
        }
    }

    // ==================== Column references ====================

    fn column_ref(&self, table_alias: &str, column: &str) -> ColumnRef {
        let name = self
            .source
            .get(table_alias)
            .map_or(column, |t| t.column_name(column));
        let qualifier = self.options.use_table_alias.then_some(table_alias);
        ColumnRef::new(qualifier, name)
    }

    /// Column of the table registered as `table_alias`.
    ///
    /// The alias prefix is dropped when `use_table_alias` is off. Named column
    /// mappings translate the key to the physical column name.
    pub fn column(&self, table_alias: &str, column: &str) -> Ref {
        Ref::Column(self.column_ref(table_alias, column))
    }

    /// Column carrying an output alias: `t.col AS alias`.
    pub fn column_as(&self, table_alias: &str, column: &str, alias: &str) -> Ref {
        Ref::Column(self.column_ref(table_alias, column).with_alias(alias))
    }

    /// `t.*` (or `*` without table aliases).
    pub fn all_columns(&self, table_alias: &str) -> Ref {
        Ref::Column(self.column_ref(table_alias, "*"))
    }

    // ==================== Select list ====================

    /// Append any reference to the select list.
    pub fn select(&mut self, expr: impl Into<Ref>) -> &mut Self {
        self.selected.push(expr.into());
        self
    }

    /// Append a reference under an output alias.
    pub fn select_as(&mut self, expr: impl Into<Ref>, alias: &str) -> &mut Self {
        let aliased = expr.into().alias(alias);
        self.selected.push(aliased);
        self
    }

    /// Append several references.
    pub fn select_refs<I, T>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ref>,
    {
        self.selected.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Append one column of a registered table.
    pub fn select_column(&mut self, table_alias: &str, column: &str) -> &mut Self {
        let r = self.column(table_alias, column);
        self.select(r)
    }

    /// Append one column under an output alias.
    pub fn select_column_as(&mut self, table_alias: &str, column: &str, alias: &str) -> &mut Self {
        let r = self.column_as(table_alias, column, alias);
        self.select(r)
    }

    /// Append several columns of one table.
    pub fn select_columns(&mut self, table_alias: &str, columns: &[&str]) -> &mut Self {
        for column in columns {
            self.select_column(table_alias, column);
        }
        self
    }

    /// Append `t.*`.
    pub fn select_all_from(&mut self, table_alias: &str) -> &mut Self {
        let r = self.all_columns(table_alias);
        self.select(r)
    }

    /// Append an unqualified `*`.
    pub fn select_all(&mut self) -> &mut Self {
        self.select(ColumnRef::star(None))
    }

    /// Set DISTINCT.
    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
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

    // ==================== Tables ====================

    /// `INTO <table>`. The target never carries an alias suffix.
    pub fn into_table(&mut self, table_alias: &str, options: QualifyOptions) -> &mut Self {
        if self.into.is_some() {
            self.record(BuildError::ClauseAlreadySet("INTO"));
            return self;
        }
        self.into = Some((table_alias.to_string(), options));
        self
    }

    /// Set the main table.
    pub fn from(&mut self, table_alias: &str) -> &mut Self {
        if self.from.is_some() {
            self.record(BuildError::ClauseAlreadySet("FROM"));
            return self;
        }
        self.from = Some(table_alias.to_string());
        self
    }

    fn join(&mut self, kind: JoinKind, table_alias: &str, on: Predicate) -> &mut Self {
        self.joins.push(Join {
            kind,
            table_alias: table_alias.to_string(),
            on,
        });
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(&mut self, table_alias: &str, on: Predicate) -> &mut Self {
        self.join(JoinKind::Inner, table_alias, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(&mut self, table_alias: &str, on: Predicate) -> &mut Self {
        self.join(JoinKind::Left, table_alias, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(&mut self, table_alias: &str, on: Predicate) -> &mut Self {
        self.join(JoinKind::Right, table_alias, on)
    }

    /// Add FULL OUTER JOIN.
    pub fn full_join(&mut self, table_alias: &str, on: Predicate) -> &mut Self {
        self.join(JoinKind::Full, table_alias, on)
    }

    // ==================== Filtering / grouping ====================

    /// Set the WHERE predicate. Combine conditions with `and`/`or` first.
    pub fn where_clause(&mut self, predicate: Predicate) -> &mut Self {
        if self.where_clause.is_some() {
            self.record(BuildError::ClauseAlreadySet("WHERE"));
            return self;
        }
        self.where_clause = Some(predicate);
        self
    }

    /// Add GROUP BY references.
    pub fn group_by<I, T>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ref>,
    {
        self.group_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Add one GROUP BY column.
    pub fn group_by_column(&mut self, table_alias: &str, column: &str) -> &mut Self {
        let r = self.column(table_alias, column);
        self.group_by.push(r);
        self
    }

    /// Set the HAVING predicate.
    pub fn having(&mut self, predicate: Predicate) -> &mut Self {
        if self.having.is_some() {
            self.record(BuildError::ClauseAlreadySet("HAVING"));
            return self;
        }
        self.having = Some(predicate);
        self
    }

    // ==================== Ordering / paging ====================

    /// Add an ORDER BY item. `None` leaves the direction to the server default.
    pub fn order_by(&mut self, expr: impl Into<Ref>, order: impl Into<Option<Order>>) -> &mut Self {
        self.order_by.push((expr.into(), order.into()));
        self
    }

    /// Add an ORDER BY column.
    pub fn order_by_column(
        &mut self,
        table_alias: &str,
        column: &str,
        order: impl Into<Option<Order>>,
    ) -> &mut Self {
        let r = self.column(table_alias, column);
        self.order_by(r, order)
    }

    /// `OFFSET n ROWS`
    pub fn offset(&mut self, rows: u64) -> &mut Self {
        if self.offset.is_some() {
            self.record(BuildError::ClauseAlreadySet("OFFSET"));
            return self;
        }
        self.offset = Some(rows);
        self
    }

    /// `FETCH NEXT n ROWS ONLY` (emits `OFFSET 0 ROWS` when no offset is set).
    pub fn fetch(&mut self, rows: u64) -> &mut Self {
        if self.fetch.is_some() {
            self.record(BuildError::ClauseAlreadySet("FETCH"));
            return self;
        }
        self.fetch = Some(rows);
        self
    }

    // ==================== Subqueries ====================

    /// A fresh builder over the same source and options.
    pub fn nested(&self) -> SelectBuilder<'a> {
        SelectBuilder::new(self.source, self.options)
    }

    /// Build a nested SELECT and wrap it as a subquery.
    ///
    /// The nested builder shares nothing with `self` except the source and
    /// options. Correlate by capturing references made from this builder.
    pub fn subquery<F>(&self, build: F) -> BuildResult<Subquery>
    where
        F: FnOnce(&mut SelectBuilder<'a>),
    {
        let mut nested = self.nested();
        build(&mut nested);
        nested.as_subquery()
    }

    /// This statement, built and wrapped as a subquery.
    pub fn as_subquery(&self) -> BuildResult<Subquery> {
        self.build().map(Subquery::new)
    }

    // ==================== Rendering ====================

    fn write_table(&self, out: &mut String, table_alias: &str, opts: QualifyOptions) {
        match self.source.get(table_alias) {
            Some(table) => out.push_str(&table.render(opts)),
            None => out.push_str(table_alias),
        }
    }

    fn write_target(&self, out: &mut String, table_alias: &str) {
        self.write_table(out, table_alias, self.options.qualify());
        if self.options.use_table_alias {
            out.push_str(" AS ");
            out.push_str(table_alias);
        }
    }

    fn referenced_tables(&self) -> impl Iterator<Item = &str> {
        self.from
            .iter()
            .map(String::as_str)
            .chain(self.joins.iter().map(|j| j.table_alias.as_str()))
            .chain(self.into.iter().map(|(alias, _)| alias.as_str()))
    }
}

// GROUP BY / ORDER BY name an aliased reference by its alias.
fn write_grouping_ref(out: &mut String, expr: &Ref) {
    match expr.alias_token() {
        Some(alias) => out.push_str(alias),
        None => expr.write_sql(out),
    }
}

fn write_list<'r>(out: &mut String, exprs: impl IntoIterator<Item = &'r Ref>, grouping: bool) {
    for (i, expr) in exprs.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if grouping {
            write_grouping_ref(out, expr);
        } else {
            expr.write_sql(out);
        }
    }
}

impl Statement for SelectBuilder<'_> {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn validate(&self) -> BuildResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        if self.selected.is_empty() {
            return Err(BuildError::EmptySelection);
        }
        if self.from.is_none() {
            return Err(BuildError::MissingFrom);
        }
        if let Some(unknown) = self.referenced_tables().find(|a| !self.source.contains(a)) {
            return Err(BuildError::UnknownTable(unknown.to_string()));
        }
        if self.offset.is_some() || self.fetch.is_some() {
            if self.top.is_some() {
                return Err(BuildError::TopWithOffset);
            }
            if self.order_by.is_empty() {
                return Err(BuildError::OffsetWithoutOrderBy);
            }
        }
        Ok(())
    }

    fn build_sql(&self) -> String {
        let mut sql = String::from("SELECT");

        if self.distinct {
            sql.push_str(" DISTINCT");
        }

        if let Some(top) = &self.top {
            sql.push(' ');
            top.write_sql(&mut sql);
        }

        sql.push(' ');
        write_list(&mut sql, &self.selected, false);

        if let Some((alias, opts)) = &self.into {
            sql.push_str(" INTO ");
            self.write_table(&mut sql, alias, *opts);
        }

        if let Some(from) = &self.from {
            sql.push_str(" FROM ");
            self.write_target(&mut sql, from);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join.kind.as_str());
            sql.push(' ');
            self.write_target(&mut sql, &join.table_alias);
            sql.push_str(" ON ");
            join.on.write_sql(&mut sql);
        }

        if let Some(predicate) = &self.where_clause {
            sql.push_str(" WHERE ");
            predicate.write_sql(&mut sql);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            write_list(&mut sql, &self.group_by, true);
        }

        if let Some(predicate) = &self.having {
            sql.push_str(" HAVING ");
            predicate.write_sql(&mut sql);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, (expr, order)) in self.order_by.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                write_grouping_ref(&mut sql, expr);
                if let Some(order) = order {
                    sql.push(' ');
                    sql.push_str(order.as_str());
                }
            }
        }

        if self.offset.is_some() || self.fetch.is_some() {
            let _ = write!(sql, " OFFSET {} ROWS", self.offset.unwrap_or(0));
            if let Some(fetch) = self.fetch {
                let _ = write!(sql, " FETCH NEXT {fetch} ROWS ONLY");
            }
        }

        sql
    }
}
