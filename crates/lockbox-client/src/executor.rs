use async_trait::async_trait;
use lockbox_core::{ProxyError, RawRow, Statement, Value};

/// The privileged process as seen from this side of the channel.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute_single(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, ProxyError>;

    /// One row set per statement, in request order.
    async fn execute_batch(&self, statements: &[Statement]) -> Result<Vec<Vec<RawRow>>, ProxyError>;

    async fn is_ready(&self) -> Result<bool, ProxyError>;

    async fn initialize(&self, encryption_key: &str) -> Result<(), ProxyError>;

    async fn reset(&self, purge_data: bool) -> Result<(), ProxyError>;
}
