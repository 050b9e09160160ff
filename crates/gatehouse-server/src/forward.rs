//! TCP forwarder: the standalone forwarding collaborator.
//!
//! Relays bytes between the session terminal and the resource address
//! until either side closes. Production deployments substitute their
//! own `Forwarder` (protocol-aware proxying, recording, etc.); the
//! session only sees the trait.

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use gatehouse_core::constants::{FORWARD_BUFFER_SIZE, MAX_READ_CHUNK};
use gatehouse_core::error::{Error, Result};
use gatehouse_core::forward::Forwarder;
use gatehouse_core::inventory::Resource;
use gatehouse_core::terminal::Terminal;

/// Forwarder dialing the resource address over plain TCP.
#[derive(Debug, Default, Clone)]
pub struct TcpForwarder;

impl TcpForwarder {
    /// Create a TCP forwarder.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Forwarder for TcpForwarder {
    async fn connect(
        &self,
        resource: &Resource,
        identity: &str,
        term: &mut dyn Terminal,
    ) -> Result<()> {
        let addr = resource.dial_addr();
        info!(
            host = %resource.hostname,
            identity = %identity,
            addr = %addr,
            "Opening forwarded connection"
        );

        let mut upstream = TcpStream::connect(&addr).await.map_err(|e| Error::Forward {
            message: format!("connect {addr}: {e}"),
        })?;

        let notice = format!(
            "Connecting to {} ({}) as {}...\r\n",
            resource.hostname, addr, identity
        );
        term.write_all(notice.as_bytes()).await?;

        let mut buf = vec![0u8; FORWARD_BUFFER_SIZE];
        loop {
            tokio::select! {
                chunk = term.read_chunk(MAX_READ_CHUNK) => {
                    let chunk = chunk?;
                    if chunk.is_empty() {
                        debug!(host = %resource.hostname, "Terminal closed during forward");
                        break;
                    }
                    upstream.write_all(&chunk).await.map_err(|e| Error::Forward {
                        message: format!("write {addr}: {e}"),
                    })?;
                }
                read = upstream.read(&mut buf) => {
                    match read {
                        Ok(0) => {
                            debug!(host = %resource.hostname, "Target closed forwarded connection");
                            break;
                        }
                        Ok(n) => term.write_all(&buf[..n]).await?,
                        Err(e) => {
                            return Err(Error::Forward {
                                message: format!("read {addr}: {e}"),
                            });
                        }
                    }
                }
            }
        }

        info!(host = %resource.hostname, "Forwarded session ended");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_test_utils::ScriptedTerminal;
    use tokio::net::TcpListener;

    fn resource_at(addr: std::net::SocketAddr) -> Resource {
        Resource {
            hostname: "target".to_string(),
            address: addr.ip().to_string(),
            port: addr.port(),
            identities: vec!["root".to_string()],
            comment: String::new(),
        }
    }

    #[tokio::test]
    async fn relays_both_directions_until_target_closes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Echo one payload back, then close.
        let target = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 5];
            stream.read_exact(&mut buf).await.unwrap();
            stream.write_all(b"echo:").await.unwrap();
            stream.write_all(&buf).await.unwrap();
            buf
        });

        // Keep the terminal open so the relay ends when the target
        // closes, not when the script drains.
        let mut term = ScriptedTerminal::with_script(&[b"hello"]).hold_open();
        let forwarder = TcpForwarder::new();
        forwarder
            .connect(&resource_at(addr), "root", &mut term)
            .await
            .unwrap();

        assert_eq!(&target.await.unwrap(), b"hello");
        let output = term.output_string();
        assert!(output.contains("Connecting to target"), "output: {output:?}");
        assert!(output.contains("echo:hello"), "output: {output:?}");
    }

    #[tokio::test]
    async fn unreachable_target_is_a_forward_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut term = ScriptedTerminal::new();
        let forwarder = TcpForwarder::new();
        let err = forwarder
            .connect(&resource_at(addr), "root", &mut term)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forward { .. }));
    }
}
