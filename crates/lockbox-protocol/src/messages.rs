use lockbox_core::{BatchQuery, RawRow, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of an `execute_single_sql` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Query {
    pub sql: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

/// Encryption key on the wire. Never printed.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Command {
    ExecuteSingleSql { query: Query },
    ExecuteBatchSql { queries: Vec<BatchQuery> },
    IsDbReady,
    InitDb { encryption_key: SecretKey },
    ResetDb { purge_data: bool },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ExecuteSingleSql { .. } => "execute_single_sql",
            Command::ExecuteBatchSql { .. } => "execute_batch_sql",
            Command::IsDbReady => "is_db_ready",
            Command::InitDb { .. } => "init_db",
            Command::ResetDb { .. } => "reset_db",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    pub id: u64,
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reply {
    Rows(Vec<RawRow>),
    /// One row set per batched statement, positional.
    Batch(Vec<Vec<RawRow>>),
    Ready(bool),
    Done,
}

impl Reply {
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Rows(_) => "rows",
            Reply::Batch(_) => "batch",
            Reply::Ready(_) => "ready",
            Reply::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok { reply: Reply },
    Err { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: u64,
    pub outcome: Outcome,
}

impl Response {
    pub fn ok(id: u64, reply: Reply) -> Self {
        Self {
            id,
            outcome: Outcome::Ok { reply },
        }
    }

    pub fn err(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            outcome: Outcome::Err {
                message: message.into(),
            },
        }
    }
}
