//! Assembly of the statements a page runs: an optional row count followed by
//! the page's own parameterised queries.

use crate::error::NorthwindDbError;
use crate::executor::{QueryExecutor, Statement};
use crate::placeholders::placeholder_arity;
use crate::types::RowValues;

/// Whether a `SELECT COUNT(*)` over a table should lead the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountTarget<'a> {
    /// No count requested.
    None,
    /// Count rows of this table; the name is inserted verbatim, so quoted
    /// identifiers such as `"Order"` are passed through as written.
    Table(&'a str),
}

/// A missing or blank table name means no count.
impl<'a> From<Option<&'a str>> for CountTarget<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(table) if !table.trim().is_empty() => CountTarget::Table(table),
            _ => CountTarget::None,
        }
    }
}

impl CountTarget<'_> {
    /// The synthesized count statement, if any.
    #[must_use]
    pub fn sql(&self) -> Option<String> {
        match self {
            CountTarget::None => None,
            CountTarget::Table(table) => Some(format!("SELECT COUNT(*) AS total FROM {table}")),
        }
    }
}

/// Statements ready to execute together with their SQL text, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBatch {
    pub statements: Vec<Statement>,
    pub sql: Vec<String>,
    /// True when `statements[0]` is the synthesized count.
    pub counted: bool,
}

impl PreparedBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Compile `templates[i]` with `params[i]`, prefixed by the count statement
/// when `count` names a table.
///
/// Every template's placeholder arity must match its parameter tuple, and the
/// two slices must have the same length.
///
/// ```rust
/// use northwind_sql::prelude::*;
///
/// struct Compiler;
/// # #[async_trait::async_trait]
/// # impl QueryExecutor for Compiler {
/// #     async fn execute_single(&self, _: &Statement) -> Result<ResultSet, NorthwindDbError> { unreachable!() }
/// #     async fn execute_batch(&self, _: &[Statement]) -> Result<Vec<ResultSet>, NorthwindDbError> { unreachable!() }
/// # }
/// let batch = prepare_statements(
///     &Compiler,
///     CountTarget::Table("Product"),
///     &["SELECT Id FROM Product LIMIT ?1 OFFSET ?2"],
///     &[vec![RowValues::Int(20), RowValues::Int(0)]],
/// )?;
/// assert_eq!(batch.sql[0], "SELECT COUNT(*) AS total FROM Product");
/// # Ok::<(), NorthwindDbError>(())
/// ```
///
/// # Errors
/// Returns `NorthwindDbError::ParameterError` on a length or arity mismatch.
pub fn prepare_statements<E, S>(
    executor: &E,
    count: CountTarget<'_>,
    templates: &[S],
    params: &[Vec<RowValues>],
) -> Result<PreparedBatch, NorthwindDbError>
where
    E: QueryExecutor + ?Sized,
    S: AsRef<str>,
{
    if templates.len() != params.len() {
        return Err(NorthwindDbError::ParameterError(format!(
            "{} statement templates but {} parameter tuples",
            templates.len(),
            params.len()
        )));
    }
    for (i, (template, tuple)) in templates.iter().zip(params).enumerate() {
        let expected = placeholder_arity(template.as_ref());
        if expected != tuple.len() {
            return Err(NorthwindDbError::ParameterError(format!(
                "statement {i} expects {expected} parameters, got {}",
                tuple.len()
            )));
        }
    }
    Ok(prepare_statements_unchecked(executor, count, templates, params))
}

/// Pure assembly without arity checks; a mismatch surfaces later from the
/// executor. Templates without a matching tuple are compiled with no
/// parameters.
pub fn prepare_statements_unchecked<E, S>(
    executor: &E,
    count: CountTarget<'_>,
    templates: &[S],
    params: &[Vec<RowValues>],
) -> PreparedBatch
where
    E: QueryExecutor + ?Sized,
    S: AsRef<str>,
{
    let count_sql = count.sql();
    let counted = count_sql.is_some();
    let capacity = templates.len() + usize::from(counted);
    let mut statements = Vec::with_capacity(capacity);
    let mut sql = Vec::with_capacity(capacity);

    if let Some(count_sql) = count_sql {
        statements.push(executor.compile(&count_sql, &[]));
        sql.push(count_sql);
    }

    for (i, template) in templates.iter().enumerate() {
        let template = template.as_ref();
        let tuple = params.get(i).map_or(&[][..], Vec::as_slice);
        statements.push(executor.compile(template, tuple));
        sql.push(template.to_owned());
    }

    PreparedBatch {
        statements,
        sql,
        counted,
    }
}
