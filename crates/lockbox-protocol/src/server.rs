use crate::backend::write_response;
use crate::frame::read_frame;
use crate::frontend::decode_request;
use crate::messages::{Command, Query, Reply, Request, Response};
use anyhow::Result;
use async_trait::async_trait;
use lockbox_core::{BatchQuery, RawRow};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Privileged side of the command channel.
///
/// Errors are sent back to the caller as their display text.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute_single(&self, query: Query) -> Result<Vec<RawRow>>;
    async fn execute_batch(&self, queries: Vec<BatchQuery>) -> Result<Vec<Vec<RawRow>>>;
    async fn is_ready(&self) -> Result<bool>;
    async fn initialize(&self, encryption_key: &str) -> Result<()>;
    async fn reset(&self, purge_data: bool) -> Result<()>;
}

pub async fn dispatch<H: CommandHandler + ?Sized>(handler: &H, request: Request) -> Response {
    let Request { id, command } = request;
    let name = command.name();
    debug!(id, command = name, "dispatching command");
    let result = match command {
        Command::ExecuteSingleSql { query } => handler.execute_single(query).await.map(Reply::Rows),
        Command::ExecuteBatchSql { queries } => {
            handler.execute_batch(queries).await.map(Reply::Batch)
        }
        Command::IsDbReady => handler.is_ready().await.map(Reply::Ready),
        Command::InitDb { encryption_key } => handler
            .initialize(encryption_key.expose())
            .await
            .map(|_| Reply::Done),
        Command::ResetDb { purge_data } => handler.reset(purge_data).await.map(|_| Reply::Done),
    };
    match result {
        Ok(reply) => Response::ok(id, reply),
        Err(err) => {
            warn!(id, command = name, "command failed: {err}");
            Response::err(id, err.to_string())
        }
    }
}

/// Answers requests on `stream` until the peer closes it.
///
/// Undecodable frames get an error response addressed to id 0.
pub async fn serve_connection<S, H>(stream: &mut S, handler: &H) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: CommandHandler + ?Sized,
{
    while let Some(frame) = read_frame(stream).await? {
        let response = match decode_request(&frame) {
            Ok(request) => dispatch(handler, request).await,
            Err(err) => {
                warn!("malformed request: {err}");
                Response::err(0, format!("malformed request: {err}"))
            }
        };
        write_response(stream, &response).await?;
    }
    debug!("command channel closed by peer");
    Ok(())
}

pub async fn serve<H: CommandHandler + 'static>(listener: TcpListener, handler: Arc<H>) -> Result<()> {
    info!("command channel listening on {}", listener.local_addr()?);
    loop {
        let (mut socket, peer) = listener.accept().await?;
        let handler = handler.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_connection(&mut socket, handler.as_ref()).await {
                error!("connection {peer} failed: {err}");
            }
        });
    }
}
