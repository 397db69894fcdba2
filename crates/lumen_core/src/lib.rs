//! Lumen Core Runtime
//!
//! Foundational primitives for the Lumen component library:
//!
//! - **Reactive Signals**: component-local state, disposed with its last handle
//! - **Controlled Values**: one resolver for caller-owned vs component-owned values
//! - **Timers**: cancellable one-shot callbacks on a host-driven clock
//! - **Document Listeners**: the shared key-down/pointer-down target
//! - **Configuration**: component defaults loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use lumen_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//! let count = graph.create_signal(0i32);
//!
//! graph.set(count, 5);
//! assert_eq!(graph.get(count), Some(5));
//! ```

pub mod config;
pub mod context;
pub mod controlled;
pub mod document;
pub mod error;
pub mod events;
pub mod reactive;
pub mod timer;

pub use config::{
    AutocompleteConfig, LumenConfig, NumberFieldConfig, PaginationConfig, ToastConfig,
    TooltipConfig,
};
pub use context::LumenContext;
pub use controlled::{ChangeCallback, ControlMode, Controllable, WriteOutcome};
pub use document::{
    Document, DocumentHandle, KeyListener, ListenerGuard, ListenerId, ListenerSlot,
    PointerListener,
};
pub use error::{LumenError, Result};
pub use events::{KeyCode, KeyEvent, PointerEvent};
pub use reactive::{
    DirtyFlag, ReactiveGraph, ReactiveStats, SharedReactiveGraph, Signal, SignalId, State,
};
pub use timer::{ScopedTimer, TimerCallback, TimerHandle, TimerId, TimerScheduler, TimerSlot};
