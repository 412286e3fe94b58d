// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `estatekeep serve` command implementation.
//!
//! Opens SQLite storage, builds the follow-up, communication, and record
//! services, starts the periodic escalation sweep when configured, and serves
//! the REST API until SIGINT or SIGTERM.

use std::time::Duration;

use estatekeep_config::EstatekeepConfig;
use estatekeep_core::EstateError;
use estatekeep_gateway::{GatewayConfig, start_server};
use tracing::{info, warn};

use crate::shutdown;
use crate::stack::Stack;
use crate::sweep::run_sweep_loop;

/// Runs the `estatekeep serve` command.
pub async fn run_serve(config: EstatekeepConfig) -> Result<(), EstateError> {
    init_tracing(&config.logging.level);

    info!("starting estatekeep serve");

    let stack = Stack::open(&config).await?;
    let cancel = shutdown::install_signal_handler();

    let sweep_task = config.follow_up.sweep_interval_secs.map(|secs| {
        tokio::spawn(run_sweep_loop(
            stack.communications.clone(),
            Duration::from_secs(secs),
            cancel.clone(),
        ))
    });
    if sweep_task.is_none() {
        info!("periodic escalation sweep disabled");
    }

    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        bearer_token: config.server.bearer_token.clone(),
    };
    let served = start_server(&gateway_config, stack.app_state(), cancel.clone()).await;

    // A bind failure returns before any signal; stop the sweep too.
    cancel.cancel();
    if let Some(task) = sweep_task
        && let Err(e) = task.await
    {
        warn!(error = %e, "escalation sweep task ended abnormally");
    }

    if let Err(e) = stack.close().await {
        warn!(error = %e, "failed to close storage cleanly");
    }

    info!("estatekeep stopped");
    served
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over the config level.
///
/// Keeps any subscriber that is already installed.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("estatekeep={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
