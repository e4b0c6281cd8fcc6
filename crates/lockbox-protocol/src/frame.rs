use anyhow::{anyhow, Result};
use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single JSON payload.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Reads one length-prefixed frame. `None` only when the peer closed before
/// sending any byte of the header; a partial header is an error.
pub async fn read_frame<S: AsyncRead + Unpin>(stream: &mut S) -> Result<Option<Vec<u8>>> {
    let mut header = [0u8; 4];
    let mut filled = 0;
    while filled < header.len() {
        let n = stream.read(&mut header[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(anyhow!("stream closed after {filled} of 4 frame header bytes"));
        }
        filled += n;
    }
    let len = u32::from_be_bytes(header) as usize;
    if len > MAX_FRAME_LEN {
        return Err(anyhow!("frame of {len} bytes exceeds limit of {MAX_FRAME_LEN}"));
    }
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(Some(buf))
}

pub async fn write_frame<S: AsyncWrite + Unpin>(stream: &mut S, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(anyhow!(
            "frame of {} bytes exceeds limit of {MAX_FRAME_LEN}",
            payload.len()
        ));
    }
    let mut buf = BytesMut::with_capacity(payload.len() + 4);
    buf.put_u32(payload.len() as u32);
    buf.extend_from_slice(payload);
    stream.write_all(&buf).await?;
    stream.flush().await?;
    Ok(())
}
