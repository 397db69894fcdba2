//! Number field component
//!
//! A numeric input with optional bounds and a step for increment/decrement.
//! An empty field holds no value; text that doesn't parse is ignored.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let qty = cn::number_field(&ctx)
//!     .label("Quantity")
//!     .min(1.0)
//!     .max(10.0)
//!     .default_value(1.0)
//!     .on_change(|v| println!("{:?}", v))
//!     .build_component();
//!
//! qty.step_up();
//! qty.input("7");
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext, WriteOutcome};
use std::sync::Arc;

use super::Component;

/// Number field size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberFieldSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Number field visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberFieldVariant {
    #[default]
    Default,
    Outlined,
    Filled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumberFieldView {
    pub id: String,
    pub label_id: String,
    pub label: Option<String>,
    pub value: Option<f64>,
    /// Text to show in the input
    pub text: String,
    pub placeholder: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
    pub error: Option<String>,
    /// Error present or value outside the bounds
    pub invalid: bool,
    pub can_increment: bool,
    pub can_decrement: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub size: NumberFieldSize,
    pub variant: NumberFieldVariant,
}

/// Number field component
pub struct NumberField {
    id: String,
    value: Controllable<Option<f64>>,
    min: Option<f64>,
    max: Option<f64>,
    step: f64,
    label: Option<String>,
    placeholder: Option<String>,
    error: Option<String>,
    disabled: bool,
    required: bool,
    size: NumberFieldSize,
    variant: NumberFieldVariant,
}

impl NumberField {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> Option<f64> {
        self.value.get()
    }

    pub fn set_value(&self, value: Option<Option<f64>>) {
        self.value.set_external(value);
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.value.set_read_only(read_only);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn clamp(&self, value: f64) -> f64 {
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }

    fn in_range(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// The user edited the text
    ///
    /// Empty text clears the value. Text that is not a number is ignored.
    /// Out-of-range numbers are accepted and reported as invalid by the view.
    pub fn input(&self, text: &str) -> WriteOutcome {
        if self.disabled {
            return WriteOutcome::Suppressed;
        }
        let text = text.trim();
        let parsed = if text.is_empty() {
            None
        } else {
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                _ => {
                    tracing::trace!("{}: ignoring non-numeric input {:?}", self.id, text);
                    return WriteOutcome::Suppressed;
                }
            }
        };
        self.value.write(parsed)
    }

    pub fn step_up(&self) -> WriteOutcome {
        self.step_by(self.step)
    }

    pub fn step_down(&self) -> WriteOutcome {
        self.step_by(-self.step)
    }

    fn step_by(&self, delta: f64) -> WriteOutcome {
        if self.disabled {
            return WriteOutcome::Suppressed;
        }
        let current = self.value();
        let base = current.or(self.min).unwrap_or(0.0);
        let next = self.clamp(if current.is_some() { base + delta } else { base });
        if current == Some(next) {
            return WriteOutcome::Suppressed;
        }
        tracing::debug!("{}: {:?} -> {}", self.id, current, next);
        self.value.write(Some(next))
    }
}

impl Component for NumberField {
    type View = NumberFieldView;

    fn view(&self) -> NumberFieldView {
        let value = self.value();
        let read_only = self.value.is_read_only();
        let editable = !self.disabled && !read_only;
        NumberFieldView {
            id: self.id.clone(),
            label_id: format!("{}-label", self.id),
            label: self.label.clone(),
            value,
            text: value.map(|v| v.to_string()).unwrap_or_default(),
            placeholder: self.placeholder.clone(),
            min: self.min,
            max: self.max,
            step: self.step,
            error: self.error.clone(),
            invalid: self.error.is_some() || value.is_some_and(|v| !self.in_range(v)),
            can_increment: editable && value.map_or(true, |v| self.max.map_or(true, |max| v < max)),
            can_decrement: editable && value.map_or(true, |v| self.min.map_or(true, |min| v > min)),
            disabled: self.disabled,
            read_only,
            required: self.required,
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Builder for number field component
pub struct NumberFieldBuilder {
    id: String,
    value: Controllable<Option<f64>>,
    controlled: Option<Option<f64>>,
    min: Option<f64>,
    max: Option<f64>,
    step: f64,
    label: Option<String>,
    placeholder: Option<String>,
    error: Option<String>,
    disabled: bool,
    read_only: bool,
    required: bool,
    size: NumberFieldSize,
    variant: NumberFieldVariant,
    on_change: Option<ChangeCallback<Option<f64>>>,
}

impl NumberFieldBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("number-field"),
            value: ctx.controllable(None),
            controlled: None,
            min: None,
            max: None,
            step: ctx.config().number_field.step,
            label: None,
            placeholder: None,
            error: None,
            disabled: false,
            read_only: false,
            required: false,
            size: NumberFieldSize::default(),
            variant: NumberFieldVariant::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Control the value from outside; `None` is an empty field
    pub fn value(mut self, value: Option<f64>) -> Self {
        self.controlled = Some(value);
        self
    }

    pub fn default_value(self, value: f64) -> Self {
        self.value.seed(Some(value));
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Increment for step up/down; non-positive steps are ignored
    pub fn step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn size(mut self, size: NumberFieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: NumberFieldVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<f64>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> NumberField {
        self.value.set_external(self.controlled);
        self.value.set_read_only(self.read_only);
        self.value.set_on_change(self.on_change);
        NumberField {
            id: self.id,
            value: self.value,
            min: self.min,
            max: self.max,
            step: self.step,
            label: self.label,
            placeholder: self.placeholder,
            error: self.error,
            disabled: self.disabled,
            required: self.required,
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Create a number field
pub fn number_field(ctx: &LumenContext) -> NumberFieldBuilder {
    NumberFieldBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_input_parses() {
        let ctx = LumenContext::new();
        let field = number_field(&ctx).build_component();

        assert_eq!(field.input(" 42.5 "), WriteOutcome::Committed);
        assert_eq!(field.value(), Some(42.5));
        assert_eq!(field.input("abc"), WriteOutcome::Suppressed);
        assert_eq!(field.value(), Some(42.5));
        assert_eq!(field.input(""), WriteOutcome::Committed);
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_step_clamps_to_bounds() {
        let ctx = LumenContext::new();
        let field = number_field(&ctx)
            .min(0.0)
            .max(2.0)
            .step(0.5)
            .default_value(1.5)
            .build_component();

        assert_eq!(field.step_up(), WriteOutcome::Committed);
        assert_eq!(field.value(), Some(2.0));
        assert_eq!(field.step_up(), WriteOutcome::Suppressed);
        assert!(!field.view().can_increment);

        field.step_down();
        assert_eq!(field.value(), Some(1.5));
    }

    #[test]
    fn test_step_from_empty_starts_at_min() {
        let ctx = LumenContext::new();
        let field = number_field(&ctx).min(3.0).build_component();
        field.step_up();
        assert_eq!(field.value(), Some(3.0));

        let ctx = LumenContext::new();
        let field = number_field(&ctx).build_component();
        field.step_down();
        assert_eq!(field.value(), Some(0.0));
    }

    #[test]
    fn test_out_of_range_input_is_invalid() {
        let ctx = LumenContext::new();
        let field = number_field(&ctx).max(10.0).build_component();
        field.input("12");
        let view = field.view();
        assert_eq!(view.text, "12");
        assert!(view.invalid);
    }

    #[test]
    fn test_read_only_and_disabled() {
        let ctx = LumenContext::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut field = number_field(&ctx)
            .read_only(true)
            .default_value(5.0)
            .on_change(move |v| sink.lock().unwrap().push(v))
            .build_component();

        assert_eq!(field.input("6"), WriteOutcome::Suppressed);
        assert_eq!(field.step_up(), WriteOutcome::Suppressed);

        field.set_read_only(false);
        field.set_disabled(true);
        assert_eq!(field.step_up(), WriteOutcome::Suppressed);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(field.value(), Some(5.0));
    }

    #[test]
    fn test_step_uses_config_default() {
        let mut config = lumen_core::LumenConfig::standard();
        config.number_field.step = 0.25;
        let ctx = LumenContext::with_config(config);
        let field = number_field(&ctx).default_value(1.0).build_component();
        field.step_up();
        assert_eq!(field.value(), Some(1.25));
    }

    #[test]
    fn test_controlled_empty_value() {
        let ctx = LumenContext::new();
        let field = number_field(&ctx).value(None).build_component();
        assert_eq!(field.input("3"), WriteOutcome::Notified);
        assert_eq!(field.value(), None);
        assert_eq!(field.view().text, "");
    }
}
