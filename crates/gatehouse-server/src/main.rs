//! gatehouse server binary entry point.
//!
//! Serves the interactive access gateway over TCP with a file-backed
//! inventory and a plain TCP forwarder.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use gatehouse_server::forward::TcpForwarder;
use gatehouse_server::inventory_file::FileInventory;
use gatehouse_server::{Cli, GatewayListener, ServerConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_format = cli.log_format.into();
    if let Err(e) = gatehouse_core::init_logging(cli.verbose, cli.log_file.as_deref(), log_format)
    {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "gatehouse-server starting");
    info!(
        inventory = %cli.inventory_file.display(),
        user = %cli.user,
        "Using file-backed inventory"
    );

    let config = ServerConfig {
        bind_addr: cli.socket_addr(),
        options: cli.session_options(),
        user: cli.user.clone(),
    };
    let inventory = Arc::new(FileInventory::new(&cli.inventory_file));
    let forwarder = Arc::new(TcpForwarder::new());

    let listener = match GatewayListener::bind(config, inventory, forwarder).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {e}", cli.socket_addr());
            std::process::exit(1);
        }
    };

    if let Err(e) = listener.run().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
