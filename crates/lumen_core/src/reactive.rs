//! Reactive signal store
//!
//! Signals hold component-local values (an internal checkbox flag, an open
//! menu, a visible tooltip). The graph stores them type-erased behind
//! slotmap keys and bumps a version on every write, so a rendering layer can
//! poll for change without subscribing.
//!
//! # State
//!
//! The [`State<T>`] type wraps a signal with shared access to the reactive
//! graph. It's the primary API for component state: cheap to clone, so timer
//! callbacks and document listeners can hold their own handle to the value
//! they mutate. A `State` owns its signal: when the last clone drops, the
//! signal is removed from the graph.
//!
//! ```ignore
//! use lumen_core::LumenContext;
//!
//! let ctx = LumenContext::new();
//! let open = ctx.use_state(false);
//!
//! open.set(true);
//! assert!(open.get());
//! ```

use slotmap::{new_key_type, SlotMap};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
}

/// A reactive signal handle (cheap to copy)
#[derive(Debug)]
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> Signal<T> {
    /// Get the signal's internal ID
    pub fn id(&self) -> SignalId {
        self.id
    }
}

type ErasedValue = Box<dyn Any + Send>;

/// Internal signal node storage
struct SignalNode {
    /// The signal value (type-erased)
    value: ErasedValue,
    /// Version counter for change detection
    version: u64,
}

/// The reactive graph that owns all signals
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    /// Global version counter
    global_version: u64,
}

impl ReactiveGraph {
    /// Create a new reactive graph
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            global_version: 0,
        }
    }

    /// Create a new signal with an initial value
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            version: 0,
        });
        Signal {
            id,
            _marker: PhantomData,
        }
    }

    /// Get the current value of a signal
    ///
    /// Returns `None` if the signal was disposed or holds another type.
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.signals
            .get(signal.id)
            .and_then(|node| node.value.downcast_ref::<T>().cloned())
    }

    /// Set the value of a signal
    pub fn set<T: Send + 'static>(&mut self, signal: Signal<T>, value: T) {
        drop(self.replace(signal.id, Box::new(value)));
    }

    /// Get the version of a signal (for change detection)
    pub fn signal_version(&self, id: SignalId) -> Option<u64> {
        self.signals.get(id).map(|n| n.version)
    }

    /// Remove a signal from the graph
    pub fn dispose_signal<T>(&mut self, signal: Signal<T>) {
        drop(self.remove(signal.id));
    }

    /// Store a new value and hand back the old one
    ///
    /// The caller drops the old value, which lets [`State`] do it after
    /// releasing the graph lock.
    fn replace(&mut self, id: SignalId, value: ErasedValue) -> Option<ErasedValue> {
        let Some(node) = self.signals.get_mut(id) else {
            tracing::trace!("set on disposed signal {:?}", id);
            return None;
        };
        node.version += 1;
        self.global_version += 1;
        Some(std::mem::replace(&mut node.value, value))
    }

    fn remove(&mut self, id: SignalId) -> Option<ErasedValue> {
        self.signals.remove(id).map(|node| node.value)
    }

    /// Get statistics about the reactive graph
    pub fn stats(&self) -> ReactiveStats {
        ReactiveStats {
            signal_count: self.signals.len(),
            global_version: self.global_version,
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the reactive graph
#[derive(Debug, Clone)]
pub struct ReactiveStats {
    pub signal_count: usize,
    pub global_version: u64,
}

// =============================================================================
// STATE - High-level API for component state management
// =============================================================================

/// Shared reactive graph
pub type SharedReactiveGraph = Arc<Mutex<ReactiveGraph>>;

/// Shared dirty flag for requesting a rebuild from the rendering layer
pub type DirtyFlag = Arc<AtomicBool>;

/// Lock the shared graph, recovering from a poisoned lock
pub(crate) fn lock_graph(graph: &SharedReactiveGraph) -> MutexGuard<'_, ReactiveGraph> {
    graph.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes its signal from the graph when the last `State` clone drops
struct SignalOwner {
    id: SignalId,
    reactive: SharedReactiveGraph,
}

impl Drop for SignalOwner {
    fn drop(&mut self) {
        // The value may itself hold a State; drop it with the lock released
        let value = lock_graph(&self.reactive).remove(self.id);
        drop(value);
    }
}

/// A bound state value with direct get/set methods
///
/// Clones share the same underlying signal.
pub struct State<T> {
    signal: Signal<T>,
    owner: Arc<SignalOwner>,
    dirty_flag: DirtyFlag,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal,
            owner: Arc::clone(&self.owner),
            dirty_flag: Arc::clone(&self.dirty_flag),
        }
    }
}

impl<T> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("signal", &self.signal.id())
            .finish()
    }
}

impl<T> State<T> {
    /// Get the underlying signal (for advanced use cases)
    pub fn signal(&self) -> Signal<T> {
        self.signal
    }

    /// Get the signal ID (for dependency tracking)
    pub fn signal_id(&self) -> SignalId {
        self.signal.id()
    }
}

impl<T: Clone + Send + 'static> State<T> {
    /// Wrap `signal`, taking ownership of it
    ///
    /// The signal is disposed when the last clone of this state drops.
    pub fn new(signal: Signal<T>, reactive: SharedReactiveGraph, dirty_flag: DirtyFlag) -> Self {
        Self {
            signal,
            owner: Arc::new(SignalOwner {
                id: signal.id(),
                reactive,
            }),
            dirty_flag,
        }
    }

    /// Get the current value
    pub fn get(&self) -> T
    where
        T: Default,
    {
        self.try_get().unwrap_or_default()
    }

    /// Get the current value, returning None if the signal was disposed
    pub fn try_get(&self) -> Option<T> {
        lock_graph(&self.owner.reactive).get(self.signal)
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        let previous = lock_graph(&self.owner.reactive).replace(self.signal.id(), Box::new(value));
        drop(previous);
    }

    /// Set a new value AND flag the tree for rebuild
    pub fn set_rebuild(&self, value: T) {
        self.set(value);
        self.dirty_flag.store(true, Ordering::SeqCst);
    }

    /// Version of the value, bumped on every write
    pub fn version(&self) -> Option<u64> {
        lock_graph(&self.owner.reactive).signal_version(self.signal.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> (SharedReactiveGraph, DirtyFlag) {
        (
            Arc::new(Mutex::new(ReactiveGraph::new())),
            Arc::new(AtomicBool::new(false)),
        )
    }

    fn new_state<T: Clone + Send + 'static>(
        reactive: &SharedReactiveGraph,
        dirty: &DirtyFlag,
        initial: T,
    ) -> State<T> {
        let signal = lock_graph(reactive).create_signal(initial);
        State::new(signal, reactive.clone(), dirty.clone())
    }

    #[test]
    fn test_signal_create_get_set() {
        let mut graph = ReactiveGraph::new();

        let count = graph.create_signal(0i32);
        assert_eq!(graph.get(count), Some(0));

        graph.set(count, 42);
        assert_eq!(graph.get(count), Some(42));
        assert_eq!(graph.signal_version(count.id()), Some(1));
        assert_eq!(graph.stats().global_version, 1);
    }

    #[test]
    fn test_wrong_type_reads_none() {
        let mut graph = ReactiveGraph::new();
        let count = graph.create_signal(1u8);
        let wrong: Signal<String> = Signal {
            id: count.id(),
            _marker: PhantomData,
        };
        assert_eq!(graph.get(wrong), None);
    }

    #[test]
    fn test_dispose_signal() {
        let mut graph = ReactiveGraph::new();
        let a = graph.create_signal(1i32);
        let _b = graph.create_signal(2i32);
        graph.dispose_signal(a);
        assert_eq!(graph.get(a), None);
        assert_eq!(graph.signal_version(a.id()), None);
        assert_eq!(graph.stats().signal_count, 1);
    }

    #[test]
    fn test_state_shares_signal_between_clones() {
        let (reactive, dirty) = shared();
        let state = new_state(&reactive, &dirty, false);
        let other = state.clone();

        other.set(true);
        assert!(state.get());
        assert!(!dirty.load(Ordering::SeqCst));

        state.set_rebuild(false);
        assert!(!other.get());
        assert!(dirty.load(Ordering::SeqCst));
        assert_eq!(state.version(), Some(2));
    }

    #[test]
    fn test_state_disposed_signal_reads_default() {
        let (reactive, dirty) = shared();
        let state = new_state(&reactive, &dirty, 7u32);

        lock_graph(&reactive).dispose_signal(state.signal());
        assert_eq!(state.try_get(), None);
        assert_eq!(state.get(), 0);

        // Writes to a disposed signal are dropped
        state.set(3);
        assert_eq!(state.try_get(), None);
    }

    #[test]
    fn test_last_clone_disposes_signal() {
        let (reactive, dirty) = shared();
        let state = new_state(&reactive, &dirty, 1u32);
        let other = state.clone();
        assert_eq!(lock_graph(&reactive).stats().signal_count, 1);

        drop(state);
        assert_eq!(lock_graph(&reactive).stats().signal_count, 1);
        assert_eq!(other.get(), 1);

        drop(other);
        assert_eq!(lock_graph(&reactive).stats().signal_count, 0);
    }

    #[test]
    fn test_state_holding_state_disposes_both() {
        let (reactive, dirty) = shared();
        let inner = new_state(&reactive, &dirty, 5u8);
        let outer = new_state(&reactive, &dirty, Some(inner));
        assert_eq!(lock_graph(&reactive).stats().signal_count, 2);

        // Replacing the value drops the inner state outside the lock
        outer.set(None);
        assert_eq!(lock_graph(&reactive).stats().signal_count, 1);

        let inner = new_state(&reactive, &dirty, 6u8);
        outer.set(Some(inner));
        drop(outer);
        assert_eq!(lock_graph(&reactive).stats().signal_count, 0);
    }
}
