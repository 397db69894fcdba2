//! Component context
//!
//! [`LumenContext`] owns everything components share: the reactive graph, the
//! rebuild flag, the timer scheduler, the document listener registry and the
//! configuration. Components are built from a `&LumenContext` and keep only
//! weak handles to the scheduler and document, so dropping the context
//! silently disarms every pending timer and listener.
//!
//! ```ignore
//! use lumen_core::LumenContext;
//!
//! let ctx = LumenContext::new();
//! let open = ctx.use_state(false);
//! open.set_rebuild(true);
//! assert!(ctx.take_needs_rebuild());
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::LumenConfig;
use crate::controlled::Controllable;
use crate::document::{Document, DocumentHandle};
use crate::reactive::{
    lock_graph, DirtyFlag, ReactiveGraph, ReactiveStats, SharedReactiveGraph, State,
};
use crate::timer::{TimerHandle, TimerScheduler};

pub struct LumenContext {
    reactive: SharedReactiveGraph,
    dirty_flag: DirtyFlag,
    timers: TimerScheduler,
    document: Document,
    config: Arc<LumenConfig>,
    next_id: AtomicU64,
}

impl LumenContext {
    /// Create a context with the standard configuration
    pub fn new() -> Self {
        Self::with_config(LumenConfig::standard())
    }

    pub fn with_config(config: LumenConfig) -> Self {
        Self {
            reactive: Arc::new(Mutex::new(ReactiveGraph::new())),
            dirty_flag: Arc::new(AtomicBool::new(false)),
            timers: TimerScheduler::new(),
            document: Document::new(),
            config: Arc::new(config),
            next_id: AtomicU64::new(0),
        }
    }

    /// Create a state value
    pub fn use_state<T: Clone + Send + 'static>(&self, initial: T) -> State<T> {
        let signal = lock_graph(&self.reactive).create_signal(initial);
        State::new(signal, Arc::clone(&self.reactive), Arc::clone(&self.dirty_flag))
    }

    /// Create an uncontrolled value seeded with `default`
    pub fn controllable<T>(&self, default: T) -> Controllable<T>
    where
        T: Clone + Default + Send + Sync + 'static,
    {
        Controllable::new(&self.reactive, &self.dirty_flag, default)
    }

    /// Allocate a unique element id, e.g. `autocomplete-3`
    pub fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }

    pub fn reactive(&self) -> &SharedReactiveGraph {
        &self.reactive
    }

    /// Snapshot of the reactive graph, e.g. how many signals are alive
    pub fn stats(&self) -> ReactiveStats {
        lock_graph(&self.reactive).stats()
    }

    pub fn config(&self) -> &LumenConfig {
        &self.config
    }

    pub fn timers(&self) -> &TimerScheduler {
        &self.timers
    }

    pub fn timer_handle(&self) -> TimerHandle {
        self.timers.handle()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_handle(&self) -> DocumentHandle {
        self.document.handle()
    }

    /// Advance the timer clock, returning how many timers fired
    pub fn advance(&self, dt: Duration) -> usize {
        self.timers.advance(dt)
    }

    /// Check and clear the rebuild flag
    pub fn take_needs_rebuild(&self) -> bool {
        self.dirty_flag.swap(false, Ordering::SeqCst)
    }
}

impl Default for LumenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LumenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LumenContext")
            .field("timers", &self.timers)
            .field("document", &self.document)
            .finish()
    }
}
