use crate::executor::CommandExecutor;
use async_trait::async_trait;
use lockbox_core::{reshape_checked, NormalizedResult, ProxyError, Statement};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, error};

/// Driver contract the ORM calls into: one statement, or many in one
/// round-trip with one result per input.
#[async_trait]
pub trait RemoteDriver: Send + Sync {
    async fn execute_one(&self, stmt: &Statement) -> Result<NormalizedResult, ProxyError>;

    async fn execute_batch(&self, stmts: &[Statement]) -> Result<Vec<NormalizedResult>, ProxyError>;
}

/// Forwards statements to a [`CommandExecutor`] and reshapes the rows.
///
/// Holds no state between calls and never retries. Failures reach the
/// caller as-is so an empty result always means "no rows".
#[derive(Debug)]
pub struct StatementProxy<E: ?Sized> {
    executor: Arc<E>,
}

impl<E: ?Sized> Clone for StatementProxy<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl<E: CommandExecutor + ?Sized> StatementProxy<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }
}

fn record_failure(sql: &str, err: &ProxyError) {
    counter!("proxy_statement_error_total").increment(1);
    match err {
        ProxyError::ProtocolViolation(_) => error!(sql, "executor broke the protocol: {err}"),
        _ => error!(sql, "statement failed: {err}"),
    }
}

#[async_trait]
impl<E: CommandExecutor + ?Sized> RemoteDriver for StatementProxy<E> {
    async fn execute_one(&self, stmt: &Statement) -> Result<NormalizedResult, ProxyError> {
        counter!("proxy_statement_total").increment(1);
        debug!(method = stmt.method.as_str(), params = stmt.params.len(), "executing statement");
        let rows = self
            .executor
            .execute_single(&stmt.sql, &stmt.params)
            .await
            .inspect_err(|err| record_failure(&stmt.sql, err))?;
        reshape_checked(rows, stmt.method).inspect_err(|err| record_failure(&stmt.sql, err))
    }

    async fn execute_batch(&self, stmts: &[Statement]) -> Result<Vec<NormalizedResult>, ProxyError> {
        counter!("proxy_statement_total").increment(stmts.len() as u64);
        debug!(statements = stmts.len(), "executing batch");
        let results = self
            .executor
            .execute_batch(stmts)
            .await
            .inspect_err(|err| record_failure("<batch>", err))?;
        if results.len() != stmts.len() {
            let err = ProxyError::ProtocolViolation(format!(
                "batch of {} statements answered with {} results",
                stmts.len(),
                results.len()
            ));
            record_failure("<batch>", &err);
            return Err(err);
        }
        stmts
            .iter()
            .zip(results)
            .map(|(stmt, rows)| {
                reshape_checked(rows, stmt.method).inspect_err(|err| record_failure(&stmt.sql, err))
            })
            .collect()
    }
}
