use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

/// Bindable parameter or returned cell, carried as a plain JSON scalar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// BLOB cells travel as base64 text.
    pub fn from_blob(bytes: &[u8]) -> Self {
        Value::Text(general_purpose::STANDARD.encode(bytes))
    }

    pub fn as_blob(&self) -> Option<Vec<u8>> {
        match self {
            Value::Text(encoded) => general_purpose::STANDARD.decode(encoded).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Result shape the ORM expects back. Does not affect the executed SQL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Run,
    #[default]
    All,
    Values,
    Get,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Run => "run",
            Method::All => "all",
            Method::Values => "values",
            Method::Get => "get",
        }
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "run" => Ok(Method::Run),
            "all" => Ok(Method::All),
            "values" => Ok(Method::Values),
            "get" => Ok(Method::Get),
            other => Err(format!("unknown method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub sql: String,
    #[serde(default)]
    pub params: Vec<Value>,
    #[serde(default)]
    pub method: Method,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>, method: Method) -> Self {
        Self {
            sql: sql.into(),
            params,
            method,
        }
    }
}

/// One element of an `execute_batch_sql` request.
pub type BatchQuery = Statement;

/// One matched row as the executor returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRow {
    pub columns: Vec<String>,
    #[serde(rename = "rows")]
    pub values: Vec<Value>,
}

impl RawRow {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NormalizedResult {
    /// GET: the first matched row, empty when nothing matched.
    Row(Vec<Value>),
    /// RUN / ALL / VALUES: every row in executor order.
    Rows(Vec<Vec<Value>>),
}

impl NormalizedResult {
    pub fn row(&self) -> Option<&[Value]> {
        match self {
            NormalizedResult::Row(row) => Some(row),
            NormalizedResult::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> Option<&[Vec<Value>]> {
        match self {
            NormalizedResult::Row(_) => None,
            NormalizedResult::Rows(rows) => Some(rows),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Unknown,
    NotReady,
    Ready,
}

impl ReadinessState {
    pub fn from_ready(ready: bool) -> Self {
        if ready {
            ReadinessState::Ready
        } else {
            ReadinessState::NotReady
        }
    }

    /// `None` while unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ReadinessState::Unknown => None,
            ReadinessState::NotReady => Some(false),
            ReadinessState::Ready => Some(true),
        }
    }

    pub fn to_bits(self) -> u64 {
        match self {
            ReadinessState::Unknown => 0,
            ReadinessState::NotReady => 1,
            ReadinessState::Ready => 2,
        }
    }

    pub fn from_bits(bits: u64) -> Self {
        match bits {
            1 => ReadinessState::NotReady,
            2 => ReadinessState::Ready,
            _ => ReadinessState::Unknown,
        }
    }
}
