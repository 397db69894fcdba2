//! Radio group component for single selection
//!
//! A group of options where exactly one value is selected at a time.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let plan = cn::radio_group(&ctx)
//!     .label("Plan")
//!     .option("free", "Free")
//!     .option("pro", "Pro")
//!     .option_disabled("team", "Team")
//!     .default_value("free")
//!     .on_change(|value| println!("Selected: {}", value))
//!     .build_component();
//!
//! plan.select("pro");
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext, WriteOutcome};
use std::sync::Arc;

use super::Component;

/// Radio size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RadioSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Layout direction of the options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RadioLayout {
    Horizontal,
    #[default]
    Vertical,
}

/// A single radio option
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioOption {
    pub id: Option<String>,
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl RadioOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Render snapshot of one option
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioOptionView {
    pub id: String,
    pub value: String,
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioView {
    pub id: String,
    pub label: Option<String>,
    pub error: Option<String>,
    pub value: String,
    pub options: Vec<RadioOptionView>,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub size: RadioSize,
    pub layout: RadioLayout,
}

/// Radio group component
pub struct RadioGroup {
    id: String,
    value: Controllable<String>,
    options: Vec<RadioOption>,
    label: Option<String>,
    error: Option<String>,
    disabled: bool,
    required: bool,
    size: RadioSize,
    layout: RadioLayout,
}

impl RadioGroup {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn options(&self) -> &[RadioOption] {
        &self.options
    }

    /// Supply the caller's value for this render
    pub fn set_value(&self, value: Option<String>) {
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

    /// Element id of the option at `index`
    pub fn option_id(&self, index: usize) -> String {
        match self.options.get(index).and_then(|o| o.id.clone()) {
            Some(id) => id,
            None => format!("{}-option-{}", self.id, index),
        }
    }

    /// Select the option with `value`
    ///
    /// Unknown and disabled options are ignored, as is everything while the
    /// group is disabled.
    pub fn select(&self, value: &str) -> WriteOutcome {
        if self.disabled {
            return WriteOutcome::Suppressed;
        }
        match self.options.iter().find(|o| o.value == value) {
            Some(option) if !option.disabled => {
                tracing::debug!("{}: selected {:?}", self.id, value);
                self.value.write(value.to_string())
            }
            _ => {
                tracing::trace!("{}: {:?} is not selectable", self.id, value);
                WriteOutcome::Suppressed
            }
        }
    }
}

impl Component for RadioGroup {
    type View = RadioView;

    fn view(&self) -> RadioView {
        let value = self.value();
        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| RadioOptionView {
                id: self.option_id(index),
                value: option.value.clone(),
                label: option.label.clone(),
                checked: option.value == value,
                disabled: self.disabled || option.disabled,
            })
            .collect();

        RadioView {
            id: self.id.clone(),
            label: self.label.clone(),
            error: self.error.clone(),
            value,
            options,
            disabled: self.disabled,
            read_only: self.value.is_read_only(),
            required: self.required,
            size: self.size,
            layout: self.layout,
        }
    }
}

/// Builder for radio group component
pub struct RadioGroupBuilder {
    id: String,
    value: Controllable<String>,
    controlled: Option<String>,
    options: Vec<RadioOption>,
    label: Option<String>,
    error: Option<String>,
    disabled: bool,
    read_only: bool,
    required: bool,
    size: RadioSize,
    layout: RadioLayout,
    on_change: Option<ChangeCallback<String>>,
}

impl RadioGroupBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("radiogroup"),
            value: ctx.controllable(String::new()),
            controlled: None,
            options: Vec::new(),
            label: None,
            error: None,
            disabled: false,
            read_only: false,
            required: false,
            size: RadioSize::default(),
            layout: RadioLayout::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add an option
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(RadioOption::new(value, label));
        self
    }

    /// Add a disabled option
    pub fn option_disabled(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(RadioOption::new(value, label).disabled());
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = RadioOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Control the selected value from outside
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.controlled = Some(value.into());
        self
    }

    pub fn default_value(self, value: impl Into<String>) -> Self {
        self.value.seed(value.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
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

    pub fn size(mut self, size: RadioSize) -> Self {
        self.size = size;
        self
    }

    pub fn layout(mut self, layout: RadioLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.layout = RadioLayout::Horizontal;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> RadioGroup {
        self.value.set_external(self.controlled);
        self.value.set_read_only(self.read_only);
        self.value.set_on_change(self.on_change);
        RadioGroup {
            id: self.id,
            value: self.value,
            options: self.options,
            label: self.label,
            error: self.error,
            disabled: self.disabled,
            required: self.required,
            size: self.size,
            layout: self.layout,
        }
    }
}

/// Create a radio group
pub fn radio_group(ctx: &LumenContext) -> RadioGroupBuilder {
    RadioGroupBuilder::new(ctx)
}
