//! Tick sources backed by tokio intervals

use std::time::Duration;

use tokio::{
    runtime::Handle,
    sync::mpsc,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::controller::{TickEvent, TickHandle, TickId, TickKind, TickScheduler};

/// Spawns one interval task per tick source and sends its ticks down a
/// channel. Dropping the returned handle aborts the task.
#[derive(Debug, Clone)]
pub struct IntervalTickScheduler {
    tx: mpsc::UnboundedSender<TickEvent>,
    runtime: Handle,
}

impl IntervalTickScheduler {
    /// Create a scheduler bound to the current runtime, together with the
    /// receiving end of its tick channel.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            runtime: Handle::current(),
        };
        (scheduler, rx)
    }
}

impl TickScheduler for IntervalTickScheduler {
    fn start(&self, id: TickId, kind: TickKind, period: Duration) -> TickHandle {
        debug!("Starting {:?} tick source {} every {:?}", kind, id, period);

        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(TickEvent { id, kind }).is_err() {
                    break;
                }
            }
        });

        TickHandle::new(id, kind, move || {
            debug!("Stopping tick source {}", id);
            task.abort();
        })
    }
}
