use crate::executor::CommandExecutor;
use async_trait::async_trait;
use lockbox_core::{ProxyError, RawRow, Statement, Value};
use lockbox_protocol::backend::read_response;
use lockbox_protocol::frontend::write_request;
use lockbox_protocol::{Command, Outcome, Query, Reply, Request, Response, SecretKey};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

const REQUEST_QUEUE_DEPTH: usize = 128;

struct PendingRequest {
    request: Request,
    response: oneshot::Sender<Result<Response, ProxyError>>,
}

/// [`CommandExecutor`] over a framed byte stream.
///
/// A background task owns the stream and performs one round-trip at a
/// time; handles queue requests to it and wait on a oneshot reply. The
/// first transport failure stops the task, failing every later call.
#[derive(Debug, Clone)]
pub struct StreamExecutor {
    tx: mpsc::Sender<PendingRequest>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("id", &self.request.id)
            .field("command", &self.request.command.name())
            .finish()
    }
}

impl StreamExecutor {
    pub fn spawn<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
        tokio::spawn(run_channel(stream, rx));
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub async fn connect(addr: &str) -> Result<Self, ProxyError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|err| ProxyError::Transport(format!("connect {addr}: {err}")))?;
        info!("connected to command executor at {addr}");
        Ok(Self::spawn(stream))
    }

    async fn call(&self, command: Command) -> Result<Reply, ProxyError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                request: Request { id, command },
                response: tx,
            })
            .await
            .map_err(|_| ProxyError::Transport("command channel is closed".into()))?;
        let response = rx
            .await
            .map_err(|_| ProxyError::Transport("command channel dropped the request".into()))??;
        if response.id != id {
            return Err(ProxyError::ProtocolViolation(format!(
                "response id {} does not match request id {}",
                response.id, id
            )));
        }
        match response.outcome {
            Outcome::Ok { reply } => Ok(reply),
            Outcome::Err { message } => Err(ProxyError::Executor(message)),
        }
    }
}

async fn run_channel<S>(mut stream: S, mut rx: mpsc::Receiver<PendingRequest>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(pending) = rx.recv().await {
        debug!(?pending, "sending command");
        let result = round_trip(&mut stream, &pending.request)
            .await
            .map_err(|err| ProxyError::Transport(err.to_string()));
        let failed = result.is_err();
        if let Err(err) = &result {
            error!("command channel failed: {err}");
        }
        let _ = pending.response.send(result);
        if failed {
            break;
        }
    }
    debug!("command channel task finished");
}

async fn round_trip<S>(stream: &mut S, request: &Request) -> anyhow::Result<Response>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    write_request(stream, request).await?;
    read_response(stream)
        .await?
        .ok_or_else(|| anyhow::anyhow!("executor closed the channel"))
}

fn unexpected_reply(command: &str, reply: &Reply) -> ProxyError {
    ProxyError::ProtocolViolation(format!(
        "{command} answered with a {} reply",
        reply.kind()
    ))
}

#[async_trait]
impl CommandExecutor for StreamExecutor {
    async fn execute_single(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, ProxyError> {
        let query = Query {
            sql: sql.to_string(),
            params: params.to_vec(),
        };
        match self.call(Command::ExecuteSingleSql { query }).await? {
            Reply::Rows(rows) => Ok(rows),
            other => Err(unexpected_reply("execute_single_sql", &other)),
        }
    }

    async fn execute_batch(&self, statements: &[Statement]) -> Result<Vec<Vec<RawRow>>, ProxyError> {
        let queries = statements.to_vec();
        match self.call(Command::ExecuteBatchSql { queries }).await? {
            Reply::Batch(results) => Ok(results),
            other => Err(unexpected_reply("execute_batch_sql", &other)),
        }
    }

    async fn is_ready(&self) -> Result<bool, ProxyError> {
        match self.call(Command::IsDbReady).await? {
            Reply::Ready(ready) => Ok(ready),
            other => Err(unexpected_reply("is_db_ready", &other)),
        }
    }

    async fn initialize(&self, encryption_key: &str) -> Result<(), ProxyError> {
        let encryption_key = SecretKey::new(encryption_key);
        match self.call(Command::InitDb { encryption_key }).await? {
            Reply::Done => Ok(()),
            other => Err(unexpected_reply("init_db", &other)),
        }
    }

    async fn reset(&self, purge_data: bool) -> Result<(), ProxyError> {
        match self.call(Command::ResetDb { purge_data }).await? {
            Reply::Done => Ok(()),
            other => Err(unexpected_reply("reset_db", &other)),
        }
    }
}
