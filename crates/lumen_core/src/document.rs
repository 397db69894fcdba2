//! Document-level listeners
//!
//! The one resource components share: a single global target for key-down
//! and pointer-down listeners. A menu listens for Escape and an autocomplete
//! listens for clicks outside itself, each only while it is open.
//!
//! Registration hands back a [`ListenerGuard`]; dropping the guard removes
//! the listener. Components that attach and detach with their open state
//! keep the guard in a [`ListenerSlot`].
//!
//! Dispatch snapshots the matching listeners and releases the registry before
//! calling them, so a listener may detach itself (or others) while running.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::events::{KeyEvent, PointerEvent};

new_key_type! {
    /// Handle to a registered document listener
    pub struct ListenerId;
}

/// Listener for key-down events
pub type KeyListener = Arc<dyn Fn(&KeyEvent) + Send + Sync>;

/// Listener for pointer-down events
pub type PointerListener = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

#[derive(Clone)]
enum Listener {
    KeyDown(KeyListener),
    PointerDown(PointerListener),
}

#[derive(Default)]
struct DocumentInner {
    listeners: SlotMap<ListenerId, Listener>,
}

fn lock(inner: &Mutex<DocumentInner>) -> MutexGuard<'_, DocumentInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The global listener target
pub struct Document {
    inner: Arc<Mutex<DocumentInner>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DocumentInner::default())),
        }
    }

    /// Get a weak handle for components
    pub fn handle(&self) -> DocumentHandle {
        DocumentHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    /// Register a key-down listener
    pub fn add_key_listener<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        self.register(Listener::KeyDown(Arc::new(listener)))
    }

    /// Register a pointer-down listener
    pub fn add_pointer_down_listener<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        self.register(Listener::PointerDown(Arc::new(listener)))
    }

    fn register(&self, listener: Listener) -> ListenerGuard {
        let id = lock(&self.inner).listeners.insert(listener);
        tracing::trace!("document listener {:?} attached", id);
        ListenerGuard {
            id,
            document: self.handle(),
        }
    }

    /// Deliver a key-down event to every key listener
    ///
    /// Returns how many listeners received it.
    pub fn dispatch_key(&self, event: &KeyEvent) -> usize {
        let listeners: Vec<KeyListener> = lock(&self.inner)
            .listeners
            .values()
            .filter_map(|l| match l {
                Listener::KeyDown(f) => Some(Arc::clone(f)),
                Listener::PointerDown(_) => None,
            })
            .collect();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    /// Deliver a pointer-down event to every pointer listener
    pub fn dispatch_pointer_down(&self, event: &PointerEvent) -> usize {
        let listeners: Vec<PointerListener> = lock(&self.inner)
            .listeners
            .values()
            .filter_map(|l| match l {
                Listener::PointerDown(f) => Some(Arc::clone(f)),
                Listener::KeyDown(_) => None,
            })
            .collect();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// A weak handle to the document
#[derive(Clone)]
pub struct DocumentHandle {
    inner: Weak<Mutex<DocumentInner>>,
}

impl DocumentHandle {
    /// Register a key-down listener, returning `None` if the document is gone
    pub fn add_key_listener<F>(&self, listener: F) -> Option<ListenerGuard>
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        self.register(Listener::KeyDown(Arc::new(listener)))
    }

    /// Register a pointer-down listener, returning `None` if the document is gone
    pub fn add_pointer_down_listener<F>(&self, listener: F) -> Option<ListenerGuard>
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        self.register(Listener::PointerDown(Arc::new(listener)))
    }

    fn register(&self, listener: Listener) -> Option<ListenerGuard> {
        let inner = self.inner.upgrade()?;
        let id = lock(&inner).listeners.insert(listener);
        tracing::trace!("document listener {:?} attached", id);
        Some(ListenerGuard {
            id,
            document: self.clone(),
        })
    }

    fn remove(&self, id: ListenerId) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        // Captured state is released after the registry lock
        let removed = lock(&inner).listeners.remove(id);
        removed.is_some()
    }

    /// Check if the document is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// A registered listener, removed from the document when dropped
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    document: DocumentHandle,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self.document.remove(self.id) {
            tracing::trace!("document listener {:?} detached", self.id);
        }
    }
}

/// Shared cell holding at most one listener
///
/// Clones share the cell, so a listener can detach itself through the slot
/// it was stored in.
#[derive(Clone, Debug, Default)]
pub struct ListenerSlot {
    guard: Arc<Mutex<Option<ListenerGuard>>>,
}

impl ListenerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ListenerGuard>> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a listener is currently attached
    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    /// Store a guard, detaching any previous listener
    pub fn attach(&self, guard: ListenerGuard) {
        let previous = self.lock().replace(guard);
        drop(previous);
    }

    /// Detach the current listener, if any
    pub fn detach(&self) {
        // Take the guard out before dropping it so the slot isn't locked
        // while the document is.
        let previous = self.lock().take();
        drop(previous);
    }
}
