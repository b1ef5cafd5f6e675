//! Per-user serial lanes.
//!
//! Each user gets a task fed by its own channel, so one user's messages are
//! handled strictly in arrival order while different users proceed
//! concurrently. Dispatch never waits on a lane: a user whose backlog has
//! reached the configured limit has further messages dropped (and logged)
//! instead of stalling the poll loop for everyone else. Lanes idle for
//! longer than the configured period are retired. When a retired user
//! writes again, the new lane waits for the retired task to drain first so
//! ordering holds across the hand-over.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{InboundMessage, UserId};

/// Processes one message to completion.
#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    /// Handle `message`. Failures are the handler's to report.
    async fn handle(&self, message: InboundMessage);
}

/// Lane sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneConfig {
    /// Messages a user may have queued or in flight; further messages from
    /// that user are dropped until the lane catches up.
    pub capacity: usize,
    /// Idle period after which a lane is retired.
    pub idle_after: Duration,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            idle_after: Duration::from_secs(300),
        }
    }
}

/// Result of offering a message to a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The message was queued on the sender's lane.
    Queued,
    /// The sender's backlog was full; the message was discarded.
    Dropped,
}

struct Lane {
    sender: mpsc::UnboundedSender<InboundMessage>,
    pending: Arc<AtomicUsize>,
    task: JoinHandle<()>,
    last_used: Instant,
}

/// Routes messages to per-user lanes.
pub struct UserLanes<H> {
    handler: Arc<H>,
    config: LaneConfig,
    active: HashMap<UserId, Lane>,
    retiring: HashMap<UserId, JoinHandle<()>>,
}

impl<H: MessageHandler> UserLanes<H> {
    /// Create an empty router.
    pub fn new(handler: Arc<H>, config: LaneConfig) -> Self {
        Self {
            handler,
            config: LaneConfig {
                capacity: config.capacity.max(1),
                ..config
            },
            active: HashMap::new(),
            retiring: HashMap::new(),
        }
    }

    /// Number of users with a live lane.
    pub fn active_lanes(&self) -> usize {
        self.active.len()
    }

    /// Queue `message` on its sender's lane, opening one when needed.
    ///
    /// Never waits: a full backlog drops the message.
    pub fn dispatch(&mut self, message: InboundMessage) -> Dispatch {
        let user_id = message.user_id;
        let capacity = self.config.capacity;
        let mut pending = message;
        // A second attempt covers a lane whose task died; a fresh lane
        // cannot be closed yet.
        for _ in 0..2 {
            let lane = self.lane_for(user_id);
            if lane.pending.load(Ordering::Acquire) >= capacity {
                warn!(
                    user_id = user_id.get(),
                    capacity, "lane backlog full; message dropped"
                );
                return Dispatch::Dropped;
            }
            lane.pending.fetch_add(1, Ordering::AcqRel);
            match lane.sender.send(pending) {
                Ok(()) => {
                    lane.last_used = Instant::now();
                    return Dispatch::Queued;
                }
                Err(mpsc::error::SendError(returned)) => {
                    lane.pending.fetch_sub(1, Ordering::AcqRel);
                    warn!(user_id = user_id.get(), "lane closed unexpectedly; reopening");
                    if let Some(dead) = self.active.remove(&user_id) {
                        self.retiring.insert(user_id, dead.task);
                    }
                    pending = returned;
                }
            }
        }
        warn!(user_id = user_id.get(), "message dropped; lane could not be reopened");
        Dispatch::Dropped
    }

    fn lane_for(&mut self, user_id: UserId) -> &mut Lane {
        self.active.entry(user_id).or_insert_with(|| {
            let predecessor = self.retiring.remove(&user_id);
            debug!(user_id = user_id.get(), "lane opened");
            spawn_lane(Arc::clone(&self.handler), predecessor)
        })
    }

    /// Retire lanes idle since before `now - idle_after` and forget retired
    /// tasks that have finished. Returns how many lanes were retired.
    pub fn reap_idle(&mut self, now: Instant) -> usize {
        let idle_after = self.config.idle_after;
        let idle: Vec<UserId> = self
            .active
            .iter()
            .filter(|(_, lane)| now.saturating_duration_since(lane.last_used) >= idle_after)
            .map(|(user_id, _)| *user_id)
            .collect();

        for user_id in &idle {
            if let Some(lane) = self.active.remove(user_id) {
                // Dropping the sender lets the task finish its backlog and exit.
                drop(lane.sender);
                self.retiring.insert(*user_id, lane.task);
            }
        }
        self.retiring.retain(|_, task| !task.is_finished());

        if !idle.is_empty() {
            debug!(retired = idle.len(), active = self.active.len(), "idle lanes retired");
        }
        idle.len()
    }

    /// Close every lane and wait for queued messages to finish.
    pub async fn shutdown(self) {
        let Self {
            active, retiring, ..
        } = self;
        let mut tasks: Vec<JoinHandle<()>> = retiring.into_values().collect();
        for lane in active.into_values() {
            drop(lane.sender);
            tasks.push(lane.task);
        }
        for outcome in join_all(tasks).await {
            if let Err(err) = outcome {
                warn!(error = %err, "lane task ended abnormally");
            }
        }
    }
}

fn spawn_lane<H: MessageHandler>(handler: Arc<H>, predecessor: Option<JoinHandle<()>>) -> Lane {
    let (sender, mut receiver) = mpsc::unbounded_channel::<InboundMessage>();
    let pending = Arc::new(AtomicUsize::new(0));
    let in_flight = Arc::clone(&pending);
    let task = tokio::spawn(async move {
        if let Some(previous) = predecessor {
            if let Err(err) = previous.await {
                warn!(error = %err, "previous lane task ended abnormally");
            }
        }
        while let Some(message) = receiver.recv().await {
            handler.handle(message).await;
            in_flight.fetch_sub(1, Ordering::AcqRel);
        }
    });
    Lane {
        sender,
        pending,
        task,
        last_used: Instant::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatId;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(i64, String)>>,
    }

    impl Recorder {
        fn seen(&self) -> Vec<(i64, String)> {
            self.seen.lock().expect("recorder lock").clone()
        }
    }

    #[async_trait]
    impl MessageHandler for Recorder {
        async fn handle(&self, message: InboundMessage) {
            // Earlier messages sleep longer, so any reordering would show.
            let delay = 10_u64.saturating_sub(message.text.len() as u64);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.seen
                .lock()
                .expect("recorder lock")
                .push((message.user_id.get(), message.text));
        }
    }

    fn message(user: i64, text: &str) -> InboundMessage {
        InboundMessage::new(UserId::new(user), ChatId::new(user), text)
    }

    #[tokio::test]
    async fn messages_from_one_user_keep_their_order() {
        let recorder = Arc::new(Recorder::default());
        let mut lanes = UserLanes::new(Arc::clone(&recorder), LaneConfig::default());

        for text in ["a", "bb", "ccc", "dddd"] {
            lanes.dispatch(message(1, text));
        }
        lanes.shutdown().await;

        let texts: Vec<String> = recorder.seen().into_iter().map(|(_, text)| text).collect();
        assert_eq!(texts, vec!["a", "bb", "ccc", "dddd"]);
    }

    #[tokio::test]
    async fn each_user_gets_a_lane() {
        let recorder = Arc::new(Recorder::default());
        let mut lanes = UserLanes::new(Arc::clone(&recorder), LaneConfig::default());

        lanes.dispatch(message(1, "x"));
        lanes.dispatch(message(2, "y"));
        lanes.dispatch(message(1, "z"));
        assert_eq!(lanes.active_lanes(), 2);

        lanes.shutdown().await;
        assert_eq!(recorder.seen().len(), 3);
    }

    #[tokio::test]
    async fn reaped_lane_hands_over_in_order() {
        let recorder = Arc::new(Recorder::default());
        let config = LaneConfig {
            capacity: 4,
            idle_after: Duration::ZERO,
        };
        let mut lanes = UserLanes::new(Arc::clone(&recorder), config);

        lanes.dispatch(message(7, "a"));
        lanes.dispatch(message(7, "bb"));
        assert_eq!(lanes.reap_idle(Instant::now()), 1);
        assert_eq!(lanes.active_lanes(), 0);

        lanes.dispatch(message(7, "ccccccc"));
        lanes.shutdown().await;

        let texts: Vec<String> = recorder.seen().into_iter().map(|(_, text)| text).collect();
        assert_eq!(texts, vec!["a", "bb", "ccccccc"]);
    }

    #[tokio::test]
    async fn recently_used_lanes_are_kept() {
        let recorder = Arc::new(Recorder::default());
        let mut lanes = UserLanes::new(Arc::clone(&recorder), LaneConfig::default());

        lanes.dispatch(message(3, "hola"));
        assert_eq!(lanes.reap_idle(Instant::now()), 0);
        assert_eq!(lanes.active_lanes(), 1);
        lanes.shutdown().await;
    }

    struct Blocked {
        gate: tokio::sync::Semaphore,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageHandler for Blocked {
        async fn handle(&self, message: InboundMessage) {
            if message.user_id == UserId::new(1) {
                let _permit = self.gate.acquire().await.expect("gate open");
            }
            self.seen.lock().expect("seen lock").push(message.text);
        }
    }

    #[tokio::test]
    async fn busy_user_never_blocks_dispatch_for_others() {
        let handler = Arc::new(Blocked {
            gate: tokio::sync::Semaphore::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let config = LaneConfig {
            capacity: 2,
            ..LaneConfig::default()
        };
        let mut lanes = UserLanes::new(Arc::clone(&handler), config);

        assert_eq!(lanes.dispatch(message(1, "uno")), Dispatch::Queued);
        assert_eq!(lanes.dispatch(message(1, "dos")), Dispatch::Queued);
        assert_eq!(lanes.dispatch(message(1, "tres")), Dispatch::Dropped);
        assert_eq!(lanes.dispatch(message(2, "hola")), Dispatch::Queued);

        tokio::time::timeout(Duration::from_secs(5), async {
            while !handler.seen.lock().expect("seen lock").contains(&"hola".to_owned()) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("other user is served while user 1 is stuck");

        handler.gate.add_permits(2);
        lanes.shutdown().await;
        let seen = handler.seen.lock().expect("seen lock").clone();
        assert_eq!(seen, vec!["hola", "uno", "dos"]);
    }
}
