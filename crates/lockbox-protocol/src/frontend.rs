use crate::frame::{read_frame, write_frame};
use crate::messages::Request;
use anyhow::Result;
use tokio::io::{AsyncRead, AsyncWrite};

pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(request)?)
}

pub fn decode_request(payload: &[u8]) -> Result<Request> {
    Ok(serde_json::from_slice(payload)?)
}

pub async fn write_request<S: AsyncWrite + Unpin>(stream: &mut S, request: &Request) -> Result<()> {
    let payload = encode_request(request)?;
    write_frame(stream, &payload).await
}

pub async fn read_request<S: AsyncRead + Unpin>(stream: &mut S) -> Result<Option<Request>> {
    match read_frame(stream).await? {
        Some(payload) => Ok(Some(decode_request(&payload)?)),
        None => Ok(None),
    }
}
