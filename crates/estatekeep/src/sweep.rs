// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `estatekeep sweep` and the periodic sweep task run by `serve`.

use std::sync::Arc;
use std::time::Duration;

use estatekeep_config::EstatekeepConfig;
use estatekeep_core::EstateError;
use estatekeep_services::CommunicationService;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::serve::init_tracing;
use crate::stack::Stack;

/// Run the no-response escalation sweep once and print what it opened.
pub async fn run_sweep(config: &EstatekeepConfig) -> Result<(), EstateError> {
    init_tracing(&config.logging.level);

    let stack = Stack::open(config).await?;
    let created = stack.communications.sweep_escalations().await?;
    info!(created = created.len(), "one-shot sweep finished");

    if created.is_empty() {
        println!("no new escalations");
    } else {
        for escalation in &created {
            println!(
                "escalated asset {} (level {}): {}",
                escalation.asset_id, escalation.level, escalation.reason
            );
        }
        println!("{} escalation(s) opened", created.len());
    }

    stack.close().await
}

/// Sweep every `every` until `shutdown` is cancelled. The first sweep runs immediately.
pub async fn run_sweep_loop(
    communications: Arc<CommunicationService>,
    every: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_secs = every.as_secs(), "escalation sweep scheduled");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = communications.sweep_escalations().await {
                    warn!(error = %e, "escalation sweep failed");
                }
            }
        }
    }

    info!("escalation sweep stopped");
}
