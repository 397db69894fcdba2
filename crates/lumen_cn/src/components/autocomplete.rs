//! Autocomplete component with a filtered suggestion list
//!
//! A text input whose dropdown shows the options containing the typed text
//! (case-insensitive). While the dropdown is open the component listens for
//! pointer-down events on the document and closes when one lands outside it.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let city = cn::autocomplete(&ctx)
//!     .options(["Amsterdam", "Berlin", "Bern"])
//!     .on_change(|v| println!("value: {}", v))
//!     .build_component();
//!
//! city.input("ber");                 // opens with Berlin, Bern
//! ctx.document().dispatch_pointer_down(&PointerEvent::outside()); // closes
//! ```

use lumen_core::{
    ChangeCallback, Controllable, DocumentHandle, KeyCode, ListenerSlot, LumenContext, State,
    WriteOutcome,
};
use std::sync::Arc;

use super::Component;

/// Options containing `query`, ignoring case
///
/// An empty query matches nothing.
pub fn filter_options(options: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Autocomplete size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutocompleteSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutocompleteView {
    pub id: String,
    pub listbox_id: String,
    pub value: String,
    pub placeholder: String,
    pub label: Option<String>,
    pub tooltip: Option<String>,
    /// Whether the suggestion list is shown
    pub open: bool,
    pub suggestions: Vec<String>,
    pub highlighted: Option<usize>,
    pub show_clear: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub size: AutocompleteSize,
}

/// Autocomplete component
pub struct Autocomplete {
    id: String,
    value: Controllable<String>,
    options: Vec<String>,
    open: State<bool>,
    suggestions: State<Vec<String>>,
    highlighted: State<Option<usize>>,
    outside_click: ListenerSlot,
    document: DocumentHandle,
    placeholder: String,
    label: Option<String>,
    tooltip: Option<String>,
    disabled: bool,
    required: bool,
    disable_clearable: bool,
    size: AutocompleteSize,
    on_input_change: Option<ChangeCallback<String>>,
    on_reset: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Autocomplete {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn set_value(&self, value: Option<String>) {
        self.value.set_external(value);
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.value.set_read_only(read_only);
    }

    /// Whether the suggestion list is shown
    pub fn is_open(&self) -> bool {
        self.open.get() && !self.suggestions.get().is_empty()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.suggestions.get()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted.get()
    }

    fn accepts_input(&self) -> bool {
        !self.disabled && !self.value.is_read_only()
    }

    fn notify_input(&self, text: &str) {
        if let Some(on_input_change) = &self.on_input_change {
            on_input_change(text.to_string());
        }
    }

    /// The user typed `text` into the field
    pub fn input(&self, text: &str) -> WriteOutcome {
        if !self.accepts_input() {
            return WriteOutcome::Suppressed;
        }
        let outcome = self.value.write(text.to_string());
        self.notify_input(text);

        let matches = filter_options(&self.options, text);
        let open = !matches.is_empty();
        tracing::trace!("{}: {:?} matches {} options", self.id, text, matches.len());
        self.suggestions.set(matches);
        self.highlighted.set(None);
        self.set_open(open);
        outcome
    }

    /// The user picked `option` from the list
    pub fn select_option(&self, option: &str) -> WriteOutcome {
        if !self.accepts_input() {
            return WriteOutcome::Suppressed;
        }
        tracing::debug!("{}: selected {:?}", self.id, option);
        let outcome = self.value.write(option.to_string());
        self.notify_input(option);
        self.close();
        outcome
    }

    /// Reset the field to empty
    pub fn clear(&self) -> WriteOutcome {
        if self.disable_clearable || !self.accepts_input() {
            return WriteOutcome::Suppressed;
        }
        tracing::debug!("{}: cleared", self.id);
        let outcome = self.value.write(String::new());
        self.notify_input("");
        if let Some(on_reset) = &self.on_reset {
            on_reset();
        }
        self.close();
        outcome
    }

    /// Focus re-opens the list for a non-empty value with matches
    pub fn focus(&self) {
        if self.disabled {
            return;
        }
        let value = self.value();
        if value.is_empty() {
            return;
        }
        let matches = filter_options(&self.options, &value);
        let open = !matches.is_empty();
        self.suggestions.set(matches);
        self.set_open(open);
    }

    /// Blur keeps the list open so a pointer-down on an option still lands;
    /// the outside-click listener closes it otherwise.
    pub fn blur(&self) {
        tracing::trace!("{}: blur", self.id);
    }

    /// Keyboard handling while the input has focus
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key(&self, key: KeyCode) -> bool {
        let count = self.suggestions.get().len();
        match key {
            KeyCode::ArrowDown if self.is_open() => {
                let next = self.highlighted.get().map_or(0, |i| (i + 1) % count);
                self.highlighted.set_rebuild(Some(next));
                true
            }
            KeyCode::ArrowUp if self.is_open() => {
                let prev = self
                    .highlighted
                    .get()
                    .map_or(count - 1, |i| (i + count - 1) % count);
                self.highlighted.set_rebuild(Some(prev));
                true
            }
            KeyCode::ArrowDown => {
                self.focus();
                self.is_open()
            }
            KeyCode::Enter => {
                let chosen = self
                    .highlighted
                    .get()
                    .filter(|_| self.is_open())
                    .and_then(|i| self.suggestions.get().get(i).cloned());
                match chosen {
                    Some(option) => self.select_option(&option).notified(),
                    None => false,
                }
            }
            KeyCode::Escape if self.is_open() => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Close the list and stop listening for outside clicks
    pub fn close(&self) {
        self.suggestions.set(Vec::new());
        self.highlighted.set(None);
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        if self.open.get() != open {
            tracing::debug!("{}: open -> {}", self.id, open);
            self.open.set_rebuild(open);
        }
        if open {
            self.attach_outside_click();
        } else {
            self.outside_click.detach();
        }
    }

    fn attach_outside_click(&self) {
        if self.outside_click.is_attached() {
            return;
        }
        let id = self.id.clone();
        let open = self.open.clone();
        let suggestions = self.suggestions.clone();
        let highlighted = self.highlighted.clone();
        let slot = self.outside_click.clone();
        let guard = self.document.add_pointer_down_listener(move |event| {
            if !event.hits(&id) {
                tracing::debug!("{}: outside click, closing", id);
                suggestions.set(Vec::new());
                highlighted.set(None);
                open.set_rebuild(false);
                slot.detach();
            }
        });
        if let Some(guard) = guard {
            self.outside_click.attach(guard);
        }
    }

    /// Whether the outside-click listener is registered
    pub fn is_listening(&self) -> bool {
        self.outside_click.is_attached()
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        self.outside_click.detach();
    }
}

impl Component for Autocomplete {
    type View = AutocompleteView;

    fn view(&self) -> AutocompleteView {
        let value = self.value();
        let read_only = self.value.is_read_only();
        AutocompleteView {
            id: self.id.clone(),
            listbox_id: format!("{}-listbox", self.id),
            show_clear: !value.is_empty() && !self.disable_clearable && !self.disabled && !read_only,
            value,
            placeholder: self.placeholder.clone(),
            label: self.label.clone(),
            tooltip: self.tooltip.clone(),
            open: self.is_open(),
            suggestions: self.suggestions.get(),
            highlighted: self.highlighted.get(),
            disabled: self.disabled,
            read_only,
            required: self.required,
            size: self.size,
        }
    }
}

/// Builder for autocomplete component
pub struct AutocompleteBuilder {
    id: String,
    value: Controllable<String>,
    controlled: Option<String>,
    options: Vec<String>,
    open: State<bool>,
    suggestions: State<Vec<String>>,
    highlighted: State<Option<usize>>,
    document: DocumentHandle,
    placeholder: String,
    label: Option<String>,
    tooltip: Option<String>,
    disabled: bool,
    read_only: bool,
    required: bool,
    disable_clearable: bool,
    size: AutocompleteSize,
    on_change: Option<ChangeCallback<String>>,
    on_input_change: Option<ChangeCallback<String>>,
    on_reset: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl AutocompleteBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("autocomplete"),
            value: ctx.controllable(String::new()),
            controlled: None,
            options: Vec::new(),
            open: ctx.use_state(false),
            suggestions: ctx.use_state(Vec::new()),
            highlighted: ctx.use_state(None),
            document: ctx.document_handle(),
            placeholder: ctx.config().autocomplete.placeholder.clone(),
            label: None,
            tooltip: None,
            disabled: false,
            read_only: false,
            required: false,
            disable_clearable: false,
            size: AutocompleteSize::default(),
            on_change: None,
            on_input_change: None,
            on_reset: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Control the text from outside
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.controlled = Some(value.into());
        self
    }

    pub fn default_value(self, value: impl Into<String>) -> Self {
        self.value.seed(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
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

    /// Hide the clear button and ignore `clear()`
    pub fn disable_clearable(mut self, disable: bool) -> Self {
        self.disable_clearable = disable;
        self
    }

    pub fn size(mut self, size: AutocompleteSize) -> Self {
        self.size = size;
        self
    }

    /// Called with the new value on typing, selection and clear
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Called with the input text on typing, selection and clear
    pub fn on_input_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_input_change = Some(Arc::new(callback));
        self
    }

    pub fn on_reset<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_reset = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Autocomplete {
        self.value.set_external(self.controlled);
        self.value.set_read_only(self.read_only);
        self.value.set_on_change(self.on_change);
        Autocomplete {
            id: self.id,
            value: self.value,
            options: self.options,
            open: self.open,
            suggestions: self.suggestions,
            highlighted: self.highlighted,
            outside_click: ListenerSlot::new(),
            document: self.document,
            placeholder: self.placeholder,
            label: self.label,
            tooltip: self.tooltip,
            disabled: self.disabled,
            required: self.required,
            disable_clearable: self.disable_clearable,
            size: self.size,
            on_input_change: self.on_input_change,
            on_reset: self.on_reset,
        }
    }
}

/// Create an autocomplete input
pub fn autocomplete(ctx: &LumenContext) -> AutocompleteBuilder {
    AutocompleteBuilder::new(ctx)
}
