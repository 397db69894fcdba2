//! Toast notification with auto-dismiss
//!
//! A toast schedules its own dismissal when built. `on_close` runs exactly
//! once, whether the timer fires or the user closes the toast first. Dropping
//! the toast cancels a pending dismissal.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//! use std::time::Duration;
//!
//! let ctx = LumenContext::new();
//! let saved = cn::toast(&ctx, "Saved")
//!     .variant(ToastVariant::Success)
//!     .auto_close(Duration::from_secs(3))
//!     .on_close(|| println!("gone"))
//!     .build_component();
//!
//! ctx.advance(Duration::from_secs(3)); // prints "gone"
//! assert!(saved.is_dismissed());
//! ```

use lumen_core::{LumenContext, State, TimerSlot};
use std::sync::Arc;
use std::time::Duration;

use super::Component;

/// Toast size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Toast severity variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

/// How assertively assistive technology announces the toast
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPoliteness {
    #[default]
    Polite,
    Assertive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    pub id: String,
    pub message_id: String,
    pub message: String,
    pub dismissed: bool,
    pub variant: ToastVariant,
    pub size: ToastSize,
    pub politeness: ToastPoliteness,
}

type CloseCallback = Arc<dyn Fn() + Send + Sync>;

/// Mark the toast dismissed and run `on_close`, once
fn dismiss(id: &str, dismissed: &State<bool>, on_close: Option<&CloseCallback>) -> bool {
    if dismissed.get() {
        return false;
    }
    tracing::debug!("{}: dismissed", id);
    dismissed.set_rebuild(true);
    if let Some(on_close) = on_close {
        on_close();
    }
    true
}

/// Toast component
pub struct Toast {
    id: String,
    message: String,
    dismissed: State<bool>,
    timer: TimerSlot,
    on_close: Option<CloseCallback>,
    variant: ToastVariant,
    size: ToastSize,
    politeness: ToastPoliteness,
}

impl Toast {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.get()
    }

    /// Whether an auto-dismiss is still scheduled
    pub fn auto_close_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Close button; returns `false` if already dismissed
    pub fn close(&mut self) -> bool {
        self.timer.cancel();
        dismiss(&self.id, &self.dismissed, self.on_close.as_ref())
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

impl Component for Toast {
    type View = ToastView;

    fn view(&self) -> ToastView {
        ToastView {
            id: self.id.clone(),
            message_id: format!("{}-message", self.id),
            message: self.message.clone(),
            dismissed: self.is_dismissed(),
            variant: self.variant,
            size: self.size,
            politeness: self.politeness,
        }
    }
}

/// Builder for toast component
pub struct ToastBuilder {
    id: String,
    message: String,
    dismissed: State<bool>,
    timer: TimerSlot,
    auto_close: Duration,
    on_close: Option<CloseCallback>,
    variant: ToastVariant,
    size: ToastSize,
    politeness: ToastPoliteness,
}

impl ToastBuilder {
    pub fn new(ctx: &LumenContext, message: impl Into<String>) -> Self {
        Self {
            id: ctx.next_id("toast"),
            message: message.into(),
            dismissed: ctx.use_state(false),
            timer: TimerSlot::new(ctx.timer_handle()),
            auto_close: ctx.config().toast.auto_close(),
            on_close: None,
            variant: ToastVariant::default(),
            size: ToastSize::default(),
            politeness: ToastPoliteness::default(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Delay before the toast dismisses itself; zero keeps it until closed
    pub fn auto_close(mut self, duration: Duration) -> Self {
        self.auto_close = duration;
        self
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ToastSize) -> Self {
        self.size = size;
        self
    }

    pub fn politeness(mut self, politeness: ToastPoliteness) -> Self {
        self.politeness = politeness;
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn build_component(mut self) -> Toast {
        if !self.auto_close.is_zero() {
            let id = self.id.clone();
            let dismissed = self.dismissed.clone();
            let on_close = self.on_close.clone();
            self.timer.schedule(self.auto_close, move || {
                dismiss(&id, &dismissed, on_close.as_ref());
            });
        }
        Toast {
            id: self.id,
            message: self.message,
            dismissed: self.dismissed,
            timer: self.timer,
            on_close: self.on_close,
            variant: self.variant,
            size: self.size,
            politeness: self.politeness,
        }
    }
}

/// Create a toast
pub fn toast(ctx: &LumenContext, message: impl Into<String>) -> ToastBuilder {
    ToastBuilder::new(ctx, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_auto_close_after_config_duration() {
        let ctx = LumenContext::new();
        let (closes, on_close) = counter();
        let t = toast(&ctx, "Saved").on_close(on_close).build_component();

        ctx.advance(Duration::from_millis(4999));
        assert!(!t.is_dismissed());
        ctx.advance(Duration::from_millis(1));
        assert!(t.is_dismissed());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_early_runs_on_close_once() {
        let ctx = LumenContext::new();
        let (closes, on_close) = counter();
        let mut t = toast(&ctx, "Saved")
            .auto_close(Duration::from_millis(100))
            .on_close(on_close)
            .build_component();

        assert!(t.close());
        assert!(!t.close());
        assert!(!t.auto_close_pending());
        ctx.advance(Duration::from_secs(1));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_duration_never_auto_closes() {
        let ctx = LumenContext::new();
        let (closes, on_close) = counter();
        let t = toast(&ctx, "Sticky")
            .auto_close(Duration::ZERO)
            .on_close(on_close)
            .build_component();

        assert!(!t.auto_close_pending());
        ctx.advance(Duration::from_secs(60));
        assert!(!t.is_dismissed());
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_cancels_auto_close() {
        let ctx = LumenContext::new();
        let (closes, on_close) = counter();
        let t = toast(&ctx, "Bye").on_close(on_close).build_component();
        drop(t);
        assert_eq!(ctx.timers().pending_count(), 0);
        ctx.advance(Duration::from_secs(10));
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_view() {
        let ctx = LumenContext::new();
        let t = toast(&ctx, "Disk full")
            .id("disk")
            .variant(ToastVariant::Error)
            .build_component();
        let view = t.view();
        assert_eq!(view.message_id, "disk-message");
        assert_eq!(view.variant, ToastVariant::Error);
        assert_eq!(view.politeness, ToastPoliteness::Polite);
    }
}
