//! Tooltip component with delayed show and hide
//!
//! Hovering the trigger schedules the tooltip to appear after `delay_show`;
//! leaving schedules it to disappear after `delay_hide`. Each kind of timer
//! lives in its own [`TimerSlot`], so a new hover cycle replaces the pending
//! timer of that kind instead of stacking another one. Keyboard focus shows
//! and hides immediately.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//! use std::time::Duration;
//!
//! let ctx = LumenContext::new();
//! let mut tip = cn::tooltip(&ctx, "Copy to clipboard").build_component();
//!
//! tip.hover_enter();
//! ctx.advance(Duration::from_millis(200));
//! assert!(tip.is_visible());
//! ```

use lumen_core::{LumenContext, State, TimerSlot};
use std::time::Duration;

use super::Component;

/// Tooltip size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TooltipSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Where the tooltip sits relative to its trigger
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TooltipPlacement {
    #[default]
    Top,
    TopStart,
    TopEnd,
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
    Right,
    RightStart,
    RightEnd,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipView {
    pub id: String,
    pub title: String,
    pub visible: bool,
    /// Set on the trigger while the tooltip is showing
    pub described_by: Option<String>,
    pub placement: TooltipPlacement,
    pub size: TooltipSize,
}

/// Tooltip component
pub struct Tooltip {
    id: String,
    title: String,
    visible: State<bool>,
    show_timer: TimerSlot,
    hide_timer: TimerSlot,
    delay_show: Duration,
    delay_hide: Duration,
    disabled: bool,
    placement: TooltipPlacement,
    size: TooltipSize,
}

impl Tooltip {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the tooltip is showing
    ///
    /// A disabled tooltip never shows, whatever its internal state.
    pub fn is_visible(&self) -> bool {
        !self.disabled && self.visible.get()
    }

    pub fn show_pending(&self) -> bool {
        self.show_timer.is_pending()
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_pending()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.show_timer.cancel();
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Pointer entered the trigger
    pub fn hover_enter(&mut self) {
        if self.disabled {
            return;
        }
        self.hide_timer.cancel();
        let visible = self.visible.clone();
        let id = self.id.clone();
        self.show_timer.schedule(self.delay_show, move || {
            tracing::trace!("{}: show", id);
            visible.set_rebuild(true);
        });
    }

    /// Pointer left the trigger
    pub fn hover_leave(&mut self) {
        self.show_timer.cancel();
        let visible = self.visible.clone();
        let id = self.id.clone();
        self.hide_timer.schedule(self.delay_hide, move || {
            tracing::trace!("{}: hide", id);
            visible.set_rebuild(false);
        });
    }

    pub fn focus(&mut self) {
        if self.disabled {
            return;
        }
        self.visible.set_rebuild(true);
    }

    pub fn blur(&mut self) {
        self.visible.set_rebuild(false);
    }
}

impl Drop for Tooltip {
    fn drop(&mut self) {
        self.show_timer.cancel();
        self.hide_timer.cancel();
    }
}

impl Component for Tooltip {
    type View = TooltipView;

    fn view(&self) -> TooltipView {
        let visible = self.is_visible();
        TooltipView {
            id: self.id.clone(),
            title: self.title.clone(),
            visible,
            described_by: visible.then(|| self.id.clone()),
            placement: self.placement,
            size: self.size,
        }
    }
}

/// Builder for tooltip component
pub struct TooltipBuilder {
    id: String,
    title: String,
    visible: State<bool>,
    show_timer: TimerSlot,
    hide_timer: TimerSlot,
    delay_show: Duration,
    delay_hide: Duration,
    disabled: bool,
    placement: TooltipPlacement,
    size: TooltipSize,
}

impl TooltipBuilder {
    pub fn new(ctx: &LumenContext, title: impl Into<String>) -> Self {
        let config = &ctx.config().tooltip;
        Self {
            id: ctx.next_id("tooltip"),
            title: title.into(),
            visible: ctx.use_state(false),
            show_timer: TimerSlot::new(ctx.timer_handle()),
            hide_timer: TimerSlot::new(ctx.timer_handle()),
            delay_show: config.delay_show(),
            delay_hide: config.delay_hide(),
            disabled: false,
            placement: TooltipPlacement::default(),
            size: TooltipSize::default(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn delay_show(mut self, delay: Duration) -> Self {
        self.delay_show = delay;
        self
    }

    pub fn delay_hide(mut self, delay: Duration) -> Self {
        self.delay_hide = delay;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placement(mut self, placement: TooltipPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn size(mut self, size: TooltipSize) -> Self {
        self.size = size;
        self
    }

    pub fn build_component(self) -> Tooltip {
        Tooltip {
            id: self.id,
            title: self.title,
            visible: self.visible,
            show_timer: self.show_timer,
            hide_timer: self.hide_timer,
            delay_show: self.delay_show,
            delay_hide: self.delay_hide,
            disabled: self.disabled,
            placement: self.placement,
            size: self.size,
        }
    }
}

/// Create a tooltip
pub fn tooltip(ctx: &LumenContext, title: impl Into<String>) -> TooltipBuilder {
    TooltipBuilder::new(ctx, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_show_after_delay() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();

        tip.hover_enter();
        ctx.advance(ms(199));
        assert!(!tip.is_visible());
        ctx.advance(ms(1));
        assert!(tip.is_visible());
        assert_eq!(tip.view().described_by.as_deref(), Some(tip.id()));
    }

    #[test]
    fn test_quick_leave_never_shows() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();

        tip.hover_enter();
        ctx.advance(ms(50));
        tip.hover_leave();
        assert!(!tip.show_pending());

        ctx.advance(ms(1000));
        assert!(!tip.is_visible());
        assert_eq!(ctx.timers().pending_count(), 0);
    }

    #[test]
    fn test_hide_after_delay() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();

        tip.hover_enter();
        ctx.advance(ms(200));
        tip.hover_leave();
        ctx.advance(ms(99));
        assert!(tip.is_visible());
        ctx.advance(ms(1));
        assert!(!tip.is_visible());
    }

    #[test]
    fn test_reenter_cancels_hide() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();

        tip.hover_enter();
        ctx.advance(ms(200));
        tip.hover_leave();
        ctx.advance(ms(50));
        tip.hover_enter();
        assert!(!tip.hide_pending());
        ctx.advance(ms(500));
        assert!(tip.is_visible());
    }

    #[test]
    fn test_at_most_one_timer_per_kind() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();

        tip.hover_enter();
        tip.hover_enter();
        tip.hover_enter();
        assert_eq!(ctx.timers().pending_count(), 1);

        tip.hover_leave();
        tip.hover_leave();
        assert_eq!(ctx.timers().pending_count(), 1);
    }

    #[test]
    fn test_focus_and_blur_are_immediate() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();
        tip.focus();
        assert!(tip.is_visible());
        tip.blur();
        assert!(!tip.is_visible());
    }

    #[test]
    fn test_disabled_never_shows() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").disabled(true).build_component();
        tip.hover_enter();
        tip.focus();
        ctx.advance(ms(1000));
        assert!(!tip.is_visible());
        assert!(!tip.view().visible);
    }

    #[test]
    fn test_drop_cancels_timers() {
        let ctx = LumenContext::new();
        let mut tip = tooltip(&ctx, "Help").build_component();
        tip.hover_enter();
        assert_eq!(ctx.timers().pending_count(), 1);
        drop(tip);
        assert_eq!(ctx.timers().pending_count(), 0);
    }

    #[test]
    fn test_config_delays() {
        let ctx = LumenContext::with_config(lumen_core::LumenConfig::instant());
        let mut tip = tooltip(&ctx, "Help").build_component();
        tip.hover_enter();
        ctx.advance(Duration::ZERO);
        assert!(tip.is_visible());
    }
}
