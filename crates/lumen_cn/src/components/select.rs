//! Select component for choosing one value from a list
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let fruit = cn::select(&ctx)
//!     .label("Fruit")
//!     .option("apple", "Apple")
//!     .option("banana", "Banana")
//!     .option_disabled("cherry", "Cherry (sold out)")
//!     .on_change(|v| println!("Picked {}", v))
//!     .build_component();
//!
//! fruit.select("banana");
//! fruit.select_next(); // skips the disabled cherry
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext, WriteOutcome};
use std::sync::Arc;

use super::Component;

/// Select size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Select visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectVariant {
    #[default]
    Default,
    Outlined,
    Filled,
}

/// A select option
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectView {
    pub id: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub error: Option<String>,
    pub value: String,
    /// Label of the selected option, if the value matches one
    pub selected_label: Option<String>,
    pub options: Vec<SelectOption>,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub size: SelectSize,
    pub variant: SelectVariant,
}

/// Select component
pub struct Select {
    id: String,
    value: Controllable<String>,
    options: Vec<SelectOption>,
    label: Option<String>,
    placeholder: Option<String>,
    error: Option<String>,
    disabled: bool,
    required: bool,
    size: SelectSize,
    variant: SelectVariant,
}

impl Select {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

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

    /// Choose `value`
    ///
    /// With options present, only enabled options are accepted. A select
    /// without options accepts any value.
    pub fn select(&self, value: &str) -> WriteOutcome {
        if self.disabled {
            return WriteOutcome::Suppressed;
        }
        if !self.options.is_empty() && !self.is_selectable(value) {
            tracing::trace!("{}: {:?} is not an enabled option", self.id, value);
            return WriteOutcome::Suppressed;
        }
        tracing::debug!("{}: selected {:?}", self.id, value);
        self.value.write(value.to_string())
    }

    /// Move to the next enabled option
    pub fn select_next(&self) -> WriteOutcome {
        self.step(1)
    }

    /// Move to the previous enabled option
    pub fn select_previous(&self) -> WriteOutcome {
        self.step(-1)
    }

    fn is_selectable(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value && !o.disabled)
    }

    fn step(&self, direction: isize) -> WriteOutcome {
        let current = self.value();
        let position = self.options.iter().position(|o| o.value == current);
        let len = self.options.len() as isize;

        let mut index = match position {
            Some(i) => i as isize + direction,
            None if direction > 0 => 0,
            None => len - 1,
        };
        while (0..len).contains(&index) {
            let option = &self.options[index as usize];
            if !option.disabled {
                return self.select(&option.value);
            }
            index += direction;
        }
        WriteOutcome::Suppressed
    }
}

impl Component for Select {
    type View = SelectView;

    fn view(&self) -> SelectView {
        let value = self.value();
        let selected_label = self
            .options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.clone());

        SelectView {
            id: self.id.clone(),
            label: self.label.clone(),
            placeholder: self.placeholder.clone(),
            error: self.error.clone(),
            value,
            selected_label,
            options: self.options.clone(),
            disabled: self.disabled,
            read_only: self.value.is_read_only(),
            required: self.required,
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Builder for select component
pub struct SelectBuilder {
    id: String,
    value: Controllable<String>,
    controlled: Option<String>,
    options: Vec<SelectOption>,
    label: Option<String>,
    placeholder: Option<String>,
    error: Option<String>,
    disabled: bool,
    read_only: bool,
    required: bool,
    size: SelectSize,
    variant: SelectVariant,
    on_change: Option<ChangeCallback<String>>,
}

impl SelectBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("select"),
            value: ctx.controllable(String::new()),
            controlled: None,
            options: Vec::new(),
            label: None,
            placeholder: None,
            error: None,
            disabled: false,
            read_only: false,
            required: false,
            size: SelectSize::default(),
            variant: SelectVariant::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, label));
        self
    }

    pub fn option_disabled(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, label).disabled());
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Control the value from outside
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

    pub fn size(mut self, size: SelectSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: SelectVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Select {
        self.value.set_external(self.controlled);
        self.value.set_read_only(self.read_only);
        self.value.set_on_change(self.on_change);
        Select {
            id: self.id,
            value: self.value,
            options: self.options,
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

/// Create a select
pub fn select(ctx: &LumenContext) -> SelectBuilder {
    SelectBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn fruit(ctx: &LumenContext) -> (Arc<Mutex<Vec<String>>>, SelectBuilder) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let builder = select(ctx)
            .option("apple", "Apple")
            .option_disabled("banana", "Banana")
            .option("cherry", "Cherry")
            .on_change(move |v| sink.lock().unwrap().push(v));
        (log, builder)
    }

    #[test]
    fn test_read_only_select_changes_nothing() {
        let ctx = LumenContext::new();
        let (log, builder) = fruit(&ctx);
        let sel = builder.default_value("apple").read_only(true).build_component();

        assert_eq!(sel.select("cherry"), WriteOutcome::Suppressed);
        assert_eq!(sel.value(), "apple");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_select_known_option() {
        let ctx = LumenContext::new();
        let (log, builder) = fruit(&ctx);
        let sel = builder.build_component();

        assert_eq!(sel.select("cherry"), WriteOutcome::Committed);
        assert_eq!(sel.view().selected_label.as_deref(), Some("Cherry"));
        assert_eq!(sel.select("banana"), WriteOutcome::Suppressed);
        assert_eq!(sel.select("durian"), WriteOutcome::Suppressed);
        assert_eq!(*log.lock().unwrap(), vec!["cherry".to_string()]);
    }

    #[test]
    fn test_stepping_skips_disabled() {
        let ctx = LumenContext::new();
        let (_, builder) = fruit(&ctx);
        let sel = builder.build_component();

        assert_eq!(sel.select_next(), WriteOutcome::Committed);
        assert_eq!(sel.value(), "apple");
        sel.select_next();
        assert_eq!(sel.value(), "cherry");
        assert_eq!(sel.select_next(), WriteOutcome::Suppressed);
        sel.select_previous();
        assert_eq!(sel.value(), "apple");
        assert_eq!(sel.select_previous(), WriteOutcome::Suppressed);
    }

    #[test]
    fn test_select_previous_from_empty_picks_last() {
        let ctx = LumenContext::new();
        let (_, builder) = fruit(&ctx);
        let sel = builder.build_component();
        sel.select_previous();
        assert_eq!(sel.value(), "cherry");
    }

    #[test]
    fn test_without_options_accepts_anything() {
        let ctx = LumenContext::new();
        let sel = select(&ctx).build_component();
        assert_eq!(sel.select("free-form"), WriteOutcome::Committed);
        assert_eq!(sel.value(), "free-form");
    }

    #[test]
    fn test_controlled_select() {
        let ctx = LumenContext::new();
        let (log, builder) = fruit(&ctx);
        let sel = builder.value("apple").build_component();

        assert_eq!(sel.select("cherry"), WriteOutcome::Notified);
        assert_eq!(sel.value(), "apple");

        sel.set_value(Some("cherry".to_string()));
        assert_eq!(sel.value(), "cherry");
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
