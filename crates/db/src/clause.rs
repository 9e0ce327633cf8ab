//! Conditional WHERE/SET clause construction.
//!
//! Callers list `(column, operator, value)` triples in a fixed order; every
//! triple whose value was supplied becomes one `column op ?N` fragment and one
//! bound value. Column names are `'static` identifiers chosen by the caller,
//! values only ever travel as bound parameters.

use chrono::NaiveDate;
use thiserror::Error;

/// A column name known at compile time.
pub type Column = &'static str;

/// How fragments are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// WHERE predicates joined with `AND`
    Filter,
    /// SET assignments joined with `,`
    Update,
}

impl Mode {
    fn separator(self) -> &'static str {
        match self {
            Mode::Filter => " AND ",
            Mode::Update => ", ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ge,
    Le,
}

impl Op {
    fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ge => ">=",
            Op::Le => "<=",
        }
    }
}

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Date(NaiveDate),
}

impl SqlValue {
    fn is_blank(&self) -> bool {
        matches!(self, SqlValue::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("No fields to update")]
    NoFields,

    #[error("{column} range start {start} is after its end {end}")]
    InvalidRange {
        column: Column,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Accumulates fragments and bound values in call order.
#[derive(Debug, Clone)]
pub struct ClauseBuilder {
    mode: Mode,
    fragments: Vec<String>,
    values: Vec<SqlValue>,
}

impl ClauseBuilder {
    pub fn filter() -> Self {
        Self::new(Mode::Filter)
    }

    pub fn update() -> Self {
        Self::new(Mode::Update)
    }

    fn new(mode: Mode) -> Self {
        Self {
            mode,
            fragments: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Add `column op ?N` when `value` is present and not a blank string.
    pub fn push<V: Into<SqlValue>>(mut self, column: Column, op: Op, value: Option<V>) -> Self {
        let Some(value) = value else {
            return self;
        };
        let value: SqlValue = value.into();
        if value.is_blank() {
            return self;
        }

        let placeholder = self.values.len() + 1;
        self.fragments
            .push(format!("{} {} ?{}", column, op.as_sql(), placeholder));
        self.values.push(value);
        self
    }

    /// Equality predicate.
    pub fn eq<V: Into<SqlValue>>(self, column: Column, value: Option<V>) -> Self {
        self.push(column, Op::Eq, value)
    }

    /// Assignment, for update clauses.
    pub fn set<V: Into<SqlValue>>(self, column: Column, value: Option<V>) -> Self {
        debug_assert_eq!(self.mode, Mode::Update, "assignments belong in update clauses");
        self.push(column, Op::Eq, value)
    }

    /// Inclusive date range; either bound may be absent.
    pub fn range(
        self,
        column: Column,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ClauseError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ClauseError::InvalidRange { column, start, end });
            }
        }

        Ok(self.push(column, Op::Ge, start).push(column, Op::Le, end))
    }

    /// Finish the clause. Update clauses need at least one assignment.
    pub fn build(self) -> Result<Clause, ClauseError> {
        if self.mode == Mode::Update && self.fragments.is_empty() {
            return Err(ClauseError::NoFields);
        }

        Ok(Clause {
            mode: self.mode,
            fragments: self.fragments,
            values: self.values,
        })
    }
}

/// A finished list of fragments with their bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    mode: Mode,
    fragments: Vec<String>,
    values: Vec<SqlValue>,
}

impl Clause {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Bound values, in placeholder order.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments joined for the clause's mode.
    pub fn sql(&self) -> String {
        self.fragments.join(self.mode.separator())
    }

    /// ` WHERE …`, or nothing when no predicate was supplied.
    pub fn where_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.sql())
        }
    }

    /// Index of the first placeholder a caller may append after this clause.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}
