//! TCP listener serving one interactive session per connection.
//!
//! Each accepted connection gets its own session task; sessions share
//! nothing but the inventory service and forwarder handles. The raw
//! socket is the terminal transport here; production deployments put
//! an authenticated transport in front and only need to implement the
//! `Terminal` trait against it.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use gatehouse_core::config::SessionOptions;
use gatehouse_core::error::Result;
use gatehouse_core::forward::Forwarder;
use gatehouse_core::inventory::InventoryService;
use gatehouse_core::terminal::Terminal;

use crate::session::InteractiveSession;

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Options handed to every session.
    pub options: SessionOptions,
    /// User label attached to sessions (authentication is out of scope
    /// for the standalone listener).
    pub user: String,
}

/// Accept loop spawning one interactive session per client.
pub struct GatewayListener {
    listener: TcpListener,
    local_addr: SocketAddr,
    config: ServerConfig,
    inventory: Arc<dyn InventoryService>,
    forwarder: Arc<dyn Forwarder>,
}

impl GatewayListener {
    /// Bind the listener to the configured address.
    pub async fn bind(
        config: ServerConfig,
        inventory: Arc<dyn InventoryService>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
            config,
            inventory,
            forwarder,
        })
    }

    /// The address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Run the accept loop.
    pub async fn run(self) -> Result<()> {
        info!(addr = %self.local_addr, "Gateway listening");

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    info!(addr = %peer, "Connection established");
                    let session = InteractiveSession::new(
                        TcpTerminal::new(stream),
                        self.config.user.clone(),
                        self.config.options.clone(),
                        Arc::clone(&self.inventory),
                        Arc::clone(&self.forwarder),
                    );
                    tokio::spawn(async move {
                        if let Err(e) = session.run().await {
                            warn!(addr = %peer, error = %e, "Session ended with error");
                        }
                    });
                }
                Err(e) => {
                    debug!(error = %e, "Accept error");
                }
            }
        }
    }
}

// =============================================================================
// TCP Terminal Adapter
// =============================================================================

/// `Terminal` over a raw TCP stream.
pub struct TcpTerminal {
    stream: TcpStream,
}

impl TcpTerminal {
    /// Wrap an accepted stream.
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl Terminal for TcpTerminal {
    async fn read_chunk(&mut self, max: usize) -> Result<Bytes> {
        let mut buf = vec![0u8; max];
        let n = self.stream.read(&mut buf).await?;
        buf.truncate(n);
        Ok(Bytes::from(buf))
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data).await?;
        self.stream.flush().await?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tcp_terminal_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"ping").await.unwrap();
            let mut buf = [0u8; 4];
            stream.read_exact(&mut buf).await.unwrap();
            buf
        });

        let (stream, _) = listener.accept().await.unwrap();
        let mut term = TcpTerminal::new(stream);
        let chunk = term.read_chunk(16).await.unwrap();
        assert_eq!(&chunk[..], b"ping");
        term.write_all(b"pong").await.unwrap();

        assert_eq!(&client.await.unwrap(), b"pong");
    }

    #[tokio::test]
    async fn tcp_terminal_reads_empty_on_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).await.unwrap();
        let (stream, _) = listener.accept().await.unwrap();
        drop(client);

        let mut term = TcpTerminal::new(stream);
        let chunk = term.read_chunk(16).await.unwrap();
        assert!(chunk.is_empty());
    }
}
