//! Controlled/uncontrolled value resolution
//!
//! Every input-like component (checkbox, select, tabs, menu, ...) can either
//! own its value or have it dictated by the caller. [`Controllable<T>`]
//! captures that once:
//!
//! - the internal value is seeded at construction and never reset by props
//! - the caller's value is re-supplied on every render through
//!   [`Controllable::set_external`]; `Some` means controlled for that render
//! - reads return the caller's value when present, otherwise the internal one
//! - writes notify the caller, and touch the internal value only while
//!   uncontrolled
//!
//! ```ignore
//! let ctx = LumenContext::new();
//! let checked = ctx.controllable(true).with_on_change(|v| println!("{v}"));
//!
//! checked.write(false);          // uncontrolled: commits and notifies
//! checked.set_external(Some(true));
//! checked.write(false);          // controlled: notifies only
//! assert!(checked.get());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::reactive::{lock_graph, DirtyFlag, SharedReactiveGraph, State};

/// Callback invoked with the new value on every accepted write
pub type ChangeCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Who owns the effective value for the current render
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// The component owns its value
    Uncontrolled,
    /// The caller supplied a value this render
    Controlled,
}

/// What a write did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Read-only: nothing changed and nobody was notified
    Suppressed,
    /// Uncontrolled: the internal value was updated and the callback ran
    Committed,
    /// Controlled: only the callback ran
    Notified,
}

impl WriteOutcome {
    /// Whether the write reached the caller's callback
    pub fn notified(self) -> bool {
        !matches!(self, WriteOutcome::Suppressed)
    }
}

/// A value that is either caller-controlled or component-owned
///
/// Clones share the same state, so timer callbacks and document listeners
/// can hold one.
pub struct Controllable<T> {
    internal: State<T>,
    external: State<Option<T>>,
    read_only: Arc<AtomicBool>,
    on_change: Arc<Mutex<Option<ChangeCallback<T>>>>,
}

impl<T> Clone for Controllable<T> {
    fn clone(&self) -> Self {
        Self {
            internal: self.internal.clone(),
            external: self.external.clone(),
            read_only: Arc::clone(&self.read_only),
            on_change: Arc::clone(&self.on_change),
        }
    }
}

impl<T> std::fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controllable")
            .field("internal", &self.internal.signal_id())
            .field("external", &self.external.signal_id())
            .field("read_only", &self.read_only.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T> Controllable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Create an uncontrolled value seeded with `default`
    pub fn new(reactive: &SharedReactiveGraph, dirty_flag: &DirtyFlag, default: T) -> Self {
        let (internal, external) = {
            let mut graph = lock_graph(reactive);
            (graph.create_signal(default), graph.create_signal(None::<T>))
        };
        Self {
            internal: State::new(internal, Arc::clone(reactive), Arc::clone(dirty_flag)),
            external: State::new(external, Arc::clone(reactive), Arc::clone(dirty_flag)),
            read_only: Arc::new(AtomicBool::new(false)),
            on_change: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the change callback (builder form)
    pub fn with_on_change<F>(self, f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.set_on_change(Some(Arc::new(f)));
        self
    }

    /// Replace the change callback; `None` removes it
    pub fn set_on_change(&self, callback: Option<ChangeCallback<T>>) {
        *self.on_change.lock().unwrap_or_else(PoisonError::into_inner) = callback;
    }

    /// Supply the caller's value for this render
    pub fn set_external(&self, value: Option<T>) {
        self.external.set(value);
    }

    /// The caller's value, if any
    pub fn external(&self) -> Option<T> {
        self.external.get()
    }

    pub fn mode(&self) -> ControlMode {
        if self.is_controlled() {
            ControlMode::Controlled
        } else {
            ControlMode::Uncontrolled
        }
    }

    pub fn is_controlled(&self) -> bool {
        self.external.get().is_some()
    }

    /// The effective value
    pub fn get(&self) -> T {
        self.external.get().unwrap_or_else(|| self.internal.get())
    }

    /// The component-owned value, regardless of mode
    pub fn internal(&self) -> T {
        self.internal.get()
    }

    /// Overwrite the internal value without notifying anyone
    ///
    /// Meant for seeding a default before the component is first shown.
    pub fn seed(&self, value: T) {
        self.internal.set(value);
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.load(Ordering::SeqCst)
    }

    /// Apply a user-initiated change
    pub fn write(&self, value: T) -> WriteOutcome {
        if self.is_read_only() {
            tracing::trace!("write to {:?} suppressed: read-only", self.internal.signal_id());
            return WriteOutcome::Suppressed;
        }

        let outcome = if self.is_controlled() {
            WriteOutcome::Notified
        } else {
            self.internal.set_rebuild(value.clone());
            WriteOutcome::Committed
        };

        // Clone the callback out so it runs without the lock held
        let callback = self
            .on_change
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(callback) = callback {
            callback(value);
        }
        outcome
    }
}
