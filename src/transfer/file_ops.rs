//! Payload streaming
//!
//! Writes a payload over an open data connection. Both entry points consume
//! the stream and shut it down before returning, so the data channel is
//! always closed by the time the outcome line goes out on the control
//! channel. End-of-transfer is signaled by the close; there is no framing.

use std::io;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Sends an in-memory payload (a rendered directory listing) and closes the
/// data connection. Returns the number of bytes written.
pub async fn stream_payload(mut data_stream: TcpStream, payload: &[u8]) -> io::Result<u64> {
    data_stream.write_all(payload).await?;
    data_stream.shutdown().await?;
    Ok(payload.len() as u64)
}

/// Streams a file over the data connection in `buffer_size` chunks until
/// EOF, then closes the connection. Returns the number of bytes streamed.
pub async fn stream_file(
    mut data_stream: TcpStream,
    mut file: File,
    buffer_size: usize,
) -> io::Result<u64> {
    let mut buffer = vec![0u8; buffer_size];
    let mut total_bytes = 0u64;

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break; // EOF
        }
        data_stream.write_all(&buffer[..n]).await?;
        total_bytes += n as u64;
    }

    data_stream.shutdown().await?;
    Ok(total_bytes)
}
