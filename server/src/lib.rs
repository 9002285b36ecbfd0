//! Line-oriented TCP query server.
//!
//! One thread serves every client: the binary runs a current-thread tokio
//! runtime and each connection becomes a task on the same `LocalSet`. All
//! query work runs on the I/O thread and the index is never locked. A slow
//! query head-of-line-blocks other clients; this is a known limitation.
//!
//! Wire protocol: on connect the server sends a welcome banner. Each
//! request is one newline-terminated line of UTF-8; surrounding ASCII
//! whitespace is stripped and the rest is analyzed and run as a
//! conjunction. The response is one matching document ID per line, capped
//! at the configured maximum, with no terminator beyond the per-line
//! newlines. A final unterminated line at EOF is still served before the
//! connection closes.

pub mod loader;

use std::future::Future;
use std::net::SocketAddr;
use std::rc::Rc;
use std::time::Instant;

use poisk_core::{Analyzer, BooleanIndex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task;
use tracing::{info, warn};

pub const WELCOME_BANNER: &str = "Welcome to async server!\n";

const READ_BUFFER_SIZE: usize = 4096;

/// Everything a client task needs, shared by `Rc` across the `LocalSet`.
pub struct SearchContext {
    pub index: BooleanIndex<String>,
    pub analyzer: Analyzer,
    /// Cap on document IDs written per response; 0 means unbounded.
    pub max_response_count: usize,
}

/// Accepts clients until `shutdown` resolves. Accept errors are logged and
/// non-fatal; per-client I/O errors close only that client.
pub async fn serve<F>(
    listener: TcpListener,
    context: Rc<SearchContext>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutting down server");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    info!(%peer, "new client connected");
                    let context = Rc::clone(&context);
                    task::spawn_local(async move {
                        if let Err(err) = handle_client(stream, peer, context).await {
                            info!(%peer, %err, "client connection closed");
                        }
                    });
                }
                Err(err) => warn!(%err, "accept failed"),
            }
        }
    }

    Ok(())
}

async fn handle_client(
    stream: TcpStream,
    peer: SocketAddr,
    context: Rc<SearchContext>,
) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, reader);
    writer.write_all(WELCOME_BANNER.as_bytes()).await?;

    let mut request = Vec::with_capacity(READ_BUFFER_SIZE);
    loop {
        request.clear();
        if reader.read_until(b'\n', &mut request).await? == 0 {
            info!(%peer, "client disconnected");
            return Ok(());
        }

        let query = String::from_utf8_lossy(&request);
        let query = query.trim_matches(|c: char| c.is_ascii_whitespace());
        if query.is_empty() {
            continue;
        }
        info!(%peer, query, "search request");

        let started = Instant::now();
        let terms = context.analyzer.analyze(query);
        let matches = context.index.and_query(&terms);
        info!(took_us = started.elapsed().as_micros() as u64, "search took");

        let cap = if context.max_response_count == 0 {
            matches.len()
        } else {
            context.max_response_count
        };
        let mut response = String::with_capacity(1024);
        for doc_id in matches.iter().take(cap) {
            response.push_str(doc_id);
            response.push('\n');
        }
        writer.write_all(response.as_bytes()).await?;
    }
}
