//! Standalone process supervision.
//!
//! # Responsibilities
//! - Own the server task in standalone mode
//! - Trigger graceful shutdown on SIGINT/SIGTERM and wait for the drain
//! - Fail fast on any failure escaping the pipeline: log identity and
//!   message, stop accepting connections, exit non-zero
//!
//! # Design Decisions
//! - No attempt to keep serving after an escaped failure; a possibly
//!   corrupted process must not silently drop future requests
//! - Exit code is returned to `main`, which performs the actual exit

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::http::GatewayServer;
use crate::lifecycle::{signals, Shutdown};

/// Run the server under supervision. Returns the process exit code.
pub async fn run_standalone(server: GatewayServer, listener: TcpListener) -> i32 {
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let mut server_task: JoinHandle<Result<(), std::io::Error>> =
        tokio::spawn(async move { server.run(listener, server_shutdown).await });

    tokio::select! {
        joined = &mut server_task => exit_code(joined),
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            exit_code(server_task.await)
        }
    }
}

fn exit_code(joined: Result<Result<(), std::io::Error>, tokio::task::JoinError>) -> i32 {
    match joined {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "server failed, shutting down");
            1
        }
        Err(join_err) => {
            // A panic escaped the pipeline entirely.
            tracing::error!(error = %join_err, "server task aborted, shutting down");
            1
        }
    }
}
