//! The long-polling loop: pulls update batches, dispatches them in arrival
//! order and applies the retry policy when polling fails.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::dispatch::Dispatcher;
use crate::errors::Error;
use crate::render;
use crate::telegram::TelegramApi;

/// Consecutive polling failures tolerated before exiting for the process
/// supervisor to restart.
const MAX_CONSECUTIVE_FAILURES: u32 = 6;
/// First retry delay; doubles per failure up to the cap.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);
/// A second instance holds the token; poll again much later.
const CONFLICT_BACKOFF: Duration = Duration::from_secs(30);

pub async fn run(api: &TelegramApi, dispatcher: &Dispatcher) -> Result<(), Error> {
    run_with_backoff(api, dispatcher, INITIAL_BACKOFF, CONFLICT_BACKOFF).await
}

pub async fn run_with_backoff(
    api: &TelegramApi,
    dispatcher: &Dispatcher,
    initial_backoff: Duration,
    conflict_backoff: Duration,
) -> Result<(), Error> {
    let mut offset = 0i64;
    let mut failures = 0u32;

    info!("polling for updates");
    loop {
        let updates = match api.get_updates(offset).await {
            Ok(updates) => {
                failures = 0;
                updates
            }
            Err(err) => {
                failures += 1;
                if failures >= MAX_CONSECUTIVE_FAILURES {
                    error!("giving up after {failures} consecutive polling failures: {err}");
                    return Err(err);
                }
                let delay = backoff_delay(&err, failures, initial_backoff, conflict_backoff);
                warn!("polling failed (attempt {failures}): {err}; retrying in {delay:?}");
                sleep(delay).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(inbound) = update.inbound() else {
                continue;
            };
            if let Err(err) = dispatcher.handle(api, &inbound).await {
                error!(user_id = inbound.user_id, "handler failed: {err}");
                // Best effort; the original press is not retried.
                if let Err(send_err) = api
                    .send_message(inbound.chat_id, render::GENERIC_FAILURE, None)
                    .await
                {
                    warn!("failed to deliver failure notice: {send_err}");
                }
            }
        }
    }
}

fn backoff_delay(err: &Error, failures: u32, initial: Duration, conflict: Duration) -> Duration {
    if matches!(err, Error::Conflict) {
        return conflict;
    }
    initial
        .saturating_mul(1 << (failures - 1).min(6))
        .min(MAX_BACKOFF)
}
