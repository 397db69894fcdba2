//! Checkbox component for boolean input
//!
//! A toggleable checkbox with optional label. Either owns its checked state
//! (`default_checked`) or follows the caller's value (`checked`).
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let remember = cn::checkbox(&ctx)
//!     .label("Remember me")
//!     .default_checked(true)
//!     .on_change(|checked| println!("Checked: {}", checked))
//!     .build_component();
//!
//! remember.toggle();
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext, WriteOutcome};
use std::sync::Arc;

use super::Component;

/// Checkbox size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckboxSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Checkbox color variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckboxVariant {
    #[default]
    Primary,
    Success,
    Warning,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckboxView {
    pub id: String,
    pub name: Option<String>,
    pub label: Option<String>,
    pub checked: bool,
    pub disabled: bool,
    pub required: bool,
    pub tooltip: Option<String>,
    pub size: CheckboxSize,
    pub variant: CheckboxVariant,
}

/// Checkbox component
pub struct Checkbox {
    id: String,
    checked: Controllable<bool>,
    name: Option<String>,
    label: Option<String>,
    disabled: bool,
    required: bool,
    tooltip: Option<String>,
    size: CheckboxSize,
    variant: CheckboxVariant,
}

impl Checkbox {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    /// Supply the caller's checked state for this render
    pub fn set_checked(&self, checked: Option<bool>) {
        self.checked.set_external(checked);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Flip the checked state, as a click would
    pub fn toggle(&self) -> WriteOutcome {
        if self.disabled {
            tracing::trace!("{}: toggle ignored, disabled", self.id);
            return WriteOutcome::Suppressed;
        }
        let next = !self.checked.get();
        tracing::debug!("{}: checked -> {}", self.id, next);
        self.checked.write(next)
    }
}

impl Component for Checkbox {
    type View = CheckboxView;

    fn view(&self) -> CheckboxView {
        CheckboxView {
            id: self.id.clone(),
            name: self.name.clone(),
            label: self.label.clone(),
            checked: self.is_checked(),
            disabled: self.disabled,
            required: self.required,
            tooltip: self.tooltip.clone(),
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Builder for checkbox component
pub struct CheckboxBuilder {
    id: String,
    checked: Controllable<bool>,
    controlled: Option<bool>,
    name: Option<String>,
    label: Option<String>,
    disabled: bool,
    required: bool,
    tooltip: Option<String>,
    size: CheckboxSize,
    variant: CheckboxVariant,
    on_change: Option<ChangeCallback<bool>>,
}

impl CheckboxBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("checkbox"),
            checked: ctx.controllable(false),
            controlled: None,
            name: None,
            label: None,
            disabled: false,
            required: false,
            tooltip: None,
            size: CheckboxSize::default(),
            variant: CheckboxVariant::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Control the checked state from outside
    pub fn checked(mut self, checked: bool) -> Self {
        self.controlled = Some(checked);
        self
    }

    pub fn default_checked(self, checked: bool) -> Self {
        self.checked.seed(checked);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn size(mut self, size: CheckboxSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: CheckboxVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Checkbox {
        self.checked.set_external(self.controlled);
        self.checked.set_on_change(self.on_change);
        Checkbox {
            id: self.id,
            checked: self.checked,
            name: self.name,
            label: self.label,
            disabled: self.disabled,
            required: self.required,
            tooltip: self.tooltip,
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Create a checkbox
pub fn checkbox(ctx: &LumenContext) -> CheckboxBuilder {
    CheckboxBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorded(ctx: &LumenContext) -> (Arc<Mutex<Vec<bool>>>, CheckboxBuilder) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let builder = checkbox(ctx).on_change(move |v| sink.lock().unwrap().push(v));
        (log, builder)
    }

    #[test]
    fn test_default_checked_toggles() {
        let ctx = LumenContext::new();
        let (log, builder) = recorded(&ctx);
        let cb = builder.default_checked(true).build_component();

        assert!(cb.is_checked());
        assert_eq!(cb.toggle(), WriteOutcome::Committed);
        assert!(!cb.is_checked());
        assert_eq!(*log.lock().unwrap(), vec![false]);
    }

    #[test]
    fn test_controlled_ignoring_callback_stays_checked() {
        let ctx = LumenContext::new();
        let (log, builder) = recorded(&ctx);
        let cb = builder.checked(true).build_component();

        assert_eq!(cb.toggle(), WriteOutcome::Notified);
        assert_eq!(*log.lock().unwrap(), vec![false]);
        assert!(cb.is_checked());

        // Caller re-renders with the same prop; still checked
        cb.set_checked(Some(true));
        assert!(cb.view().checked);
    }

    #[test]
    fn test_controlled_write_leaves_internal_untouched() {
        let ctx = LumenContext::new();
        let cb = checkbox(&ctx).checked(true).build_component();
        cb.toggle();
        cb.toggle();

        cb.set_checked(None);
        assert!(!cb.is_checked());
    }

    #[test]
    fn test_disabled_suppresses_toggle() {
        let ctx = LumenContext::new();
        let (log, builder) = recorded(&ctx);
        let mut cb = builder.disabled(true).build_component();

        assert_eq!(cb.toggle(), WriteOutcome::Suppressed);
        assert!(!cb.is_checked());
        assert!(log.lock().unwrap().is_empty());

        cb.set_disabled(false);
        assert_eq!(cb.toggle(), WriteOutcome::Committed);
    }

    #[test]
    fn test_view_carries_props() {
        let ctx = LumenContext::new();
        let view = checkbox(&ctx)
            .id("terms")
            .label("Accept terms")
            .required(true)
            .variant(CheckboxVariant::Success)
            .size(CheckboxSize::Large)
            .build_component()
            .view();

        assert_eq!(view.id, "terms");
        assert_eq!(view.label.as_deref(), Some("Accept terms"));
        assert!(view.required);
        assert_eq!(view.variant, CheckboxVariant::Success);
        assert_eq!(view.size, CheckboxSize::Large);
    }
}
