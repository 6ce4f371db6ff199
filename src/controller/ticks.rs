//! Tick sources driving the countdown
//!
//! The controller never sleeps or spawns anything itself. It asks a
//! [`TickScheduler`] for a repeating source and gets back a [`TickHandle`];
//! the source delivers [`TickEvent`]s to whoever feeds them back into the
//! controller. Dropping the handle stops the source.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// Identifies one tick source for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl std::fmt::Display for TickId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a tick source is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Once per second while arming or counting down
    Countdown,
    /// One pulse of a heavy vibration burst
    Pulse,
}

/// A single tick delivered by a tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub id: TickId,
    pub kind: TickKind,
}

/// Owning handle to a running tick source. The source stops when the handle
/// is dropped.
pub struct TickHandle {
    id: TickId,
    kind: TickKind,
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(id: TickId, kind: TickKind, stop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            kind,
            stop: Some(Box::new(stop)),
        }
    }

    pub fn id(&self) -> TickId {
        self.id
    }

    pub fn kind(&self) -> TickKind {
        self.kind
    }

    /// Whether an event was produced by this source
    pub fn owns(&self, event: &TickEvent) -> bool {
        self.id == event.id && self.kind == event.kind
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

/// Starts repeating tick sources
pub trait TickScheduler: Send {
    /// Start a source that emits `TickEvent { id, kind }` every `period`,
    /// first one `period` after the call.
    fn start(&self, id: TickId, kind: TickKind, period: Duration) -> TickHandle;
}

/// A source registered with a [`ManualTickScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualSource {
    pub id: TickId,
    pub kind: TickKind,
    pub period: Duration,
}

/// Scheduler that never fires on its own. Embedders drive the controller by
/// calling `tick()` / `pulse()` directly and use this to observe which
/// sources are alive.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Debug, Default)]
struct ManualInner {
    live: Vec<ManualSource>,
    started: usize,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources started and not yet stopped
    pub fn live(&self) -> Vec<ManualSource> {
        self.inner
            .lock()
            .map(|inner| inner.live.clone())
            .unwrap_or_default()
    }

    pub fn live_count(&self, kind: TickKind) -> usize {
        self.live().iter().filter(|s| s.kind == kind).count()
    }

    /// Event the live source of `kind` would emit next, if any
    pub fn next_event(&self, kind: TickKind) -> Option<TickEvent> {
        self.live()
            .into_iter()
            .find(|s| s.kind == kind)
            .map(|s| TickEvent { id: s.id, kind: s.kind })
    }

    /// Total number of sources ever started
    pub fn started(&self) -> usize {
        self.inner.lock().map(|inner| inner.started).unwrap_or(0)
    }
}

impl TickScheduler for ManualTickScheduler {
    fn start(&self, id: TickId, kind: TickKind, period: Duration) -> TickHandle {
        if let Ok(mut inner) = self.inner.lock() {
            inner.live.push(ManualSource { id, kind, period });
            inner.started += 1;
        }

        let inner = Arc::clone(&self.inner);
        TickHandle::new(id, kind, move || {
            if let Ok(mut inner) = inner.lock() {
                inner.live.retain(|s| s.id != id);
            }
        })
    }
}
