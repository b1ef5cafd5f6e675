//! Long-poll driver: pulls updates from the chat platform and fans them out
//! to per-user lanes until shutdown is requested.

mod backoff;
mod lanes;
mod replying;

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::domain::ports::ChatTransport;

pub use backoff::PollBackoff;
pub use lanes::{Dispatch, LaneConfig, MessageHandler, UserLanes};
pub use replying::ReplyingHandler;

/// Receive loop over a [`ChatTransport`].
pub struct PollingRunner<H> {
    transport: Arc<dyn ChatTransport>,
    lanes: UserLanes<H>,
    backoff: PollBackoff,
}

impl<H: MessageHandler> PollingRunner<H> {
    /// Build a runner dispatching to `handler`.
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        handler: Arc<H>,
        lanes: LaneConfig,
        backoff: PollBackoff,
    ) -> Self {
        Self {
            transport,
            lanes: UserLanes::new(handler, lanes),
            backoff,
        }
    }

    /// Poll until `shutdown` resolves, then wait for in-flight messages.
    ///
    /// A failed poll is logged and retried after a backoff delay; it never
    /// ends the loop.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);
        let mut failures: u32 = 0;
        info!("polling for chat updates");

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                polled = self.transport.poll() => match polled {
                    Ok(messages) => {
                        failures = 0;
                        for message in messages {
                            self.lanes.dispatch(message);
                        }
                        self.lanes.reap_idle(Instant::now());
                    }
                    Err(err) => {
                        failures = failures.saturating_add(1);
                        let delay = self.backoff.delay(failures);
                        warn!(
                            kind = err.kind(),
                            error = %err,
                            failures,
                            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                            "poll failed; backing off"
                        );
                        tokio::select! {
                            () = &mut shutdown => break,
                            () = tokio::time::sleep(delay) => {}
                        }
                    }
                },
            }
        }

        info!("shutdown requested; draining lanes");
        self.lanes.shutdown().await;
        info!("all lanes drained");
    }
}
