//! Accordion component for expandable content sections
//!
//! [`Accordion`] is a single collapsible section. [`AccordionGroup`] is a set
//! of keyed sections that supports single-open (only one section open at a
//! time) or multi-open modes.
//!
//! # Example - Single Section
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let faq = cn::accordion(&ctx, "What is Lumen?")
//!     .default_open(true)
//!     .on_click(|| println!("clicked"))
//!     .build_component();
//!
//! faq.toggle();
//! ```
//!
//! # Multi-Open Group
//!
//! ```ignore
//! let group = cn::accordion_group(&ctx)
//!     .multi_open()
//!     .item("a", "First Section")
//!     .item("b", "Second Section")
//!     .build_component();
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext, WriteOutcome};
use rustc_hash::FxHashSet;
use std::sync::Arc;

use super::Component;

/// Accordion size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccordionSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Accordion visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccordionVariant {
    #[default]
    Default,
    Outlined,
    Minimal,
    Filled,
}

/// Accordion mode - single or multi open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccordionMode {
    /// Only one section can be open at a time (default)
    #[default]
    Single,
    /// Multiple sections can be open simultaneously
    Multi,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccordionView {
    pub id: String,
    pub trigger_id: String,
    pub content_id: String,
    pub title: String,
    pub open: bool,
    pub tooltip: Option<String>,
    pub size: AccordionSize,
    pub variant: AccordionVariant,
}

/// A single collapsible section
pub struct Accordion {
    id: String,
    title: String,
    open: Controllable<bool>,
    tooltip: Option<String>,
    size: AccordionSize,
    variant: AccordionVariant,
    on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Accordion {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn set_expanded(&self, expanded: Option<bool>) {
        self.open.set_external(expanded);
    }

    /// Flip the open state, as a click on the trigger would
    pub fn toggle(&self) -> WriteOutcome {
        let next = !self.open.get();
        tracing::debug!("{}: open -> {}", self.id, next);
        let outcome = self.open.write(next);
        if let Some(on_click) = &self.on_click {
            on_click();
        }
        outcome
    }
}

impl Component for Accordion {
    type View = AccordionView;

    fn view(&self) -> AccordionView {
        AccordionView {
            id: self.id.clone(),
            trigger_id: format!("{}-trigger", self.id),
            content_id: format!("{}-content", self.id),
            title: self.title.clone(),
            open: self.is_open(),
            tooltip: self.tooltip.clone(),
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Builder for a single accordion section
pub struct AccordionBuilder {
    id: String,
    title: String,
    open: Controllable<bool>,
    controlled: Option<bool>,
    tooltip: Option<String>,
    size: AccordionSize,
    variant: AccordionVariant,
    on_toggle: Option<ChangeCallback<bool>>,
    on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl AccordionBuilder {
    pub fn new(ctx: &LumenContext, title: impl Into<String>) -> Self {
        Self {
            id: ctx.next_id("accordion"),
            title: title.into(),
            open: ctx.controllable(false),
            controlled: None,
            tooltip: None,
            size: AccordionSize::default(),
            variant: AccordionVariant::default(),
            on_toggle: None,
            on_click: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Control the open state from outside
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.controlled = Some(expanded);
        self
    }

    pub fn default_open(self, open: bool) -> Self {
        self.open.seed(open);
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn size(mut self, size: AccordionSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: AccordionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Called with the requested open state on every toggle
    pub fn on_toggle<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle = Some(Arc::new(callback));
        self
    }

    /// Called after every click on the trigger
    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Accordion {
        self.open.set_external(self.controlled);
        self.open.set_on_change(self.on_toggle);
        Accordion {
            id: self.id,
            title: self.title,
            open: self.open,
            tooltip: self.tooltip,
            size: self.size,
            variant: self.variant,
            on_click: self.on_click,
        }
    }
}

/// Create a single accordion section
pub fn accordion(ctx: &LumenContext, title: impl Into<String>) -> AccordionBuilder {
    AccordionBuilder::new(ctx, title)
}

#[derive(Clone, Debug)]
struct GroupItem {
    key: String,
    title: String,
}

/// A keyed set of sections with shared open state
pub struct AccordionGroup {
    id: String,
    items: Vec<GroupItem>,
    open: Controllable<Vec<String>>,
    mode: AccordionMode,
    size: AccordionSize,
    variant: AccordionVariant,
}

impl AccordionGroup {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> AccordionMode {
        self.mode
    }

    /// Keys of the open sections, in opening order
    pub fn open_keys(&self) -> Vec<String> {
        self.open.get()
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open.get().iter().any(|k| k == key)
    }

    pub fn set_open_keys(&self, keys: Option<Vec<String>>) {
        self.open.set_external(keys);
    }

    /// Open or close the section with `key`
    ///
    /// In single mode opening a section closes every other one.
    pub fn toggle(&self, key: &str) -> WriteOutcome {
        if !self.items.iter().any(|i| i.key == key) {
            return WriteOutcome::Suppressed;
        }
        let current = self.open.get();
        let next: Vec<String> = if current.iter().any(|k| k == key) {
            current.into_iter().filter(|k| k != key).collect()
        } else {
            match self.mode {
                AccordionMode::Single => vec![key.to_string()],
                AccordionMode::Multi => {
                    let mut next = current;
                    next.push(key.to_string());
                    next
                }
            }
        };
        tracing::debug!("{}: open sections -> {:?}", self.id, next);
        self.open.write(next)
    }

    /// Per-section views in declaration order
    pub fn sections(&self) -> Vec<AccordionView> {
        let open: FxHashSet<String> = self.open.get().into_iter().collect();
        self.items
            .iter()
            .map(|item| {
                let id = format!("{}-{}", self.id, item.key);
                AccordionView {
                    trigger_id: format!("{id}-trigger"),
                    content_id: format!("{id}-content"),
                    id,
                    title: item.title.clone(),
                    open: open.contains(&item.key),
                    tooltip: None,
                    size: self.size,
                    variant: self.variant,
                }
            })
            .collect()
    }
}

impl Component for AccordionGroup {
    type View = Vec<AccordionView>;

    fn view(&self) -> Vec<AccordionView> {
        self.sections()
    }
}

/// Builder for an accordion group
pub struct AccordionGroupBuilder {
    id: String,
    items: Vec<GroupItem>,
    open: Controllable<Vec<String>>,
    controlled: Option<Vec<String>>,
    default_open: Vec<String>,
    mode: AccordionMode,
    size: AccordionSize,
    variant: AccordionVariant,
    on_change: Option<ChangeCallback<Vec<String>>>,
}

impl AccordionGroupBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("accordion-group"),
            items: Vec::new(),
            open: ctx.controllable(Vec::new()),
            controlled: None,
            default_open: Vec::new(),
            mode: AccordionMode::default(),
            size: AccordionSize::default(),
            variant: AccordionVariant::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Allow multiple sections open at once
    pub fn multi_open(mut self) -> Self {
        self.mode = AccordionMode::Multi;
        self
    }

    pub fn mode(mut self, mode: AccordionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a section
    pub fn item(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.items.push(GroupItem {
            key: key.into(),
            title: title.into(),
        });
        self
    }

    /// Open a section initially
    pub fn default_open(mut self, key: impl Into<String>) -> Self {
        self.default_open.push(key.into());
        self
    }

    /// Control the open sections from outside
    pub fn open_keys(mut self, keys: Vec<String>) -> Self {
        self.controlled = Some(keys);
        self
    }

    pub fn size(mut self, size: AccordionSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: AccordionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Vec<String>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> AccordionGroup {
        let mut initial = self.default_open;
        if self.mode == AccordionMode::Single {
            initial.truncate(1);
        }
        self.open.seed(initial);
        self.open.set_external(self.controlled);
        self.open.set_on_change(self.on_change);
        AccordionGroup {
            id: self.id,
            items: self.items,
            open: self.open,
            mode: self.mode,
            size: self.size,
            variant: self.variant,
        }
    }
}

/// Create an accordion group
pub fn accordion_group(ctx: &LumenContext) -> AccordionGroupBuilder {
    AccordionGroupBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_toggle_calls_on_click() {
        let ctx = LumenContext::new();
        let clicks = Arc::new(AtomicUsize::new(0));
        let toggles = Arc::new(Mutex::new(Vec::new()));
        let (c, t) = (clicks.clone(), toggles.clone());
        let section = accordion(&ctx, "FAQ")
            .on_click(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .on_toggle(move |open| t.lock().unwrap().push(open))
            .build_component();

        assert!(!section.is_open());
        section.toggle();
        assert!(section.is_open());
        section.toggle();
        assert!(!section.is_open());
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
        assert_eq!(*toggles.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_default_open_and_ids() {
        let ctx = LumenContext::new();
        let section = accordion(&ctx, "Shipping")
            .id("shipping")
            .default_open(true)
            .build_component();

        let view = section.view();
        assert!(view.open);
        assert_eq!(view.trigger_id, "shipping-trigger");
        assert_eq!(view.content_id, "shipping-content");
    }

    #[test]
    fn test_expanded_is_controlled() {
        let ctx = LumenContext::new();
        let section = accordion(&ctx, "Returns").expanded(false).build_component();
        assert_eq!(section.toggle(), WriteOutcome::Notified);
        assert!(!section.is_open());
    }

    fn group(ctx: &LumenContext) -> AccordionGroupBuilder {
        accordion_group(ctx)
            .item("a", "First")
            .item("b", "Second")
            .item("c", "Third")
    }

    #[test]
    fn test_single_mode_closes_others() {
        let ctx = LumenContext::new();
        let g = group(&ctx).default_open("a").build_component();

        assert!(g.is_open("a"));
        g.toggle("b");
        assert_eq!(g.open_keys(), vec!["b".to_string()]);
        g.toggle("b");
        assert!(g.open_keys().is_empty());
    }

    #[test]
    fn test_multi_mode_keeps_others() {
        let ctx = LumenContext::new();
        let g = group(&ctx).multi_open().build_component();

        g.toggle("a");
        g.toggle("c");
        assert_eq!(g.open_keys(), vec!["a".to_string(), "c".to_string()]);
        g.toggle("a");
        assert_eq!(g.open_keys(), vec!["c".to_string()]);

        let open: Vec<bool> = g.view().iter().map(|s| s.open).collect();
        assert_eq!(open, vec![false, false, true]);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let ctx = LumenContext::new();
        let g = group(&ctx).build_component();
        assert_eq!(g.toggle("zzz"), WriteOutcome::Suppressed);
    }

    #[test]
    fn test_single_mode_trims_default_open() {
        let ctx = LumenContext::new();
        let g = group(&ctx).default_open("a").default_open("b").build_component();
        assert_eq!(g.open_keys(), vec!["a".to_string()]);
    }

    #[test]
    fn test_controlled_group_notifies() {
        let ctx = LumenContext::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let g = group(&ctx)
            .open_keys(vec!["a".to_string()])
            .on_change(move |keys| sink.lock().unwrap().push(keys))
            .build_component();

        assert_eq!(g.toggle("b"), WriteOutcome::Notified);
        assert!(g.is_open("a"));
        assert_eq!(*seen.lock().unwrap(), vec![vec!["b".to_string()]]);
    }
}
