use crate::frame::{read_frame, write_frame};
use crate::messages::Response;
use anyhow::Result;
use tokio::io::{AsyncRead, AsyncWrite};

pub fn encode_response(response: &Response) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(response)?)
}

pub fn decode_response(payload: &[u8]) -> Result<Response> {
    Ok(serde_json::from_slice(payload)?)
}

pub async fn write_response<S: AsyncWrite + Unpin>(
    stream: &mut S,
    response: &Response,
) -> Result<()> {
    let payload = encode_response(response)?;
    write_frame(stream, &payload).await
}

pub async fn read_response<S: AsyncRead + Unpin>(stream: &mut S) -> Result<Option<Response>> {
    match read_frame(stream).await? {
        Some(payload) => Ok(Some(decode_response(&payload)?)),
        None => Ok(None),
    }
}
