use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::NorthwindDbError;
use crate::executor::{QueryExecutor, Statement};
use crate::results::ResultSet;
use crate::types::RowValues;

/// Which entry point a statement came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Single,
    Batch,
}

/// Executor answering every statement with a canned result set and
/// remembering what it was asked to run.
#[derive(Default)]
pub struct FakeExecutor {
    responses: Mutex<Vec<ResultSet>>,
    pub seen: Arc<Mutex<Vec<(Call, Statement)>>>,
}

impl FakeExecutor {
    /// Responses are handed out in order.
    pub fn answering(responses: Vec<ResultSet>) -> Self {
        Self {
            responses: Mutex::new(responses),
            seen: Arc::default(),
        }
    }

    pub fn statements(&self) -> Vec<(Call, Statement)> {
        self.seen.lock().unwrap().clone()
    }

    fn next(&self, call: Call, stmt: &Statement) -> Result<ResultSet, NorthwindDbError> {
        self.seen.lock().unwrap().push((call, stmt.clone()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(NorthwindDbError::ExecutionError("no canned response".into()));
        }
        Ok(responses.remove(0))
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn execute_single(&self, stmt: &Statement) -> Result<ResultSet, NorthwindDbError> {
        self.next(Call::Single, stmt)
    }

    async fn execute_batch(&self, stmts: &[Statement]) -> Result<Vec<ResultSet>, NorthwindDbError> {
        stmts.iter().map(|stmt| self.next(Call::Batch, stmt)).collect()
    }
}

/// Result set with the given columns and rows, served by `colo`.
pub fn rows(columns: &[&str], values: Vec<Vec<RowValues>>, colo: &str, ms: f64) -> ResultSet {
    let mut rs = ResultSet::with_capacity(values.len());
    rs.set_column_names(Arc::new(columns.iter().map(|c| (*c).to_string()).collect()));
    for row in values {
        rs.add_row_values(row);
    }
    rs.with_meta(colo, ms)
}

pub fn total(n: i64) -> ResultSet {
    rows(&["total"], vec![vec![RowValues::Int(n)]], "colo-A", 1.0)
}
