//! Tabs component for switching between panels
//!
//! A row (or column) of tab buttons with one active panel. Tab ids default to
//! `tab-{index}` when not given.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let tabs = cn::tabs(&ctx)
//!     .tab("Account")
//!     .tab("Password")
//!     .tab_item(tab_item("Billing").id("billing").disabled())
//!     .on_change(|id| println!("Active: {}", id))
//!     .build_component();
//!
//! tabs.handle_key(KeyCode::ArrowRight);
//! assert_eq!(tabs.active(), "tab-1");
//! ```

use lumen_core::{ChangeCallback, Controllable, KeyCode, LumenContext, WriteOutcome};
use std::sync::Arc;

use super::Component;

/// Tabs size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabsSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Tabs visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabsVariant {
    #[default]
    Default,
    Bordered,
    Pills,
    Underlined,
}

/// Direction of the tab list; decides which arrow keys move the selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabsOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A tab definition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabItem {
    id: Option<String>,
    label: String,
    disabled: bool,
}

impl TabItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
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

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Create a tab item
pub fn tab_item(label: impl Into<String>) -> TabItem {
    TabItem::new(label)
}

/// Render snapshot of one tab button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabView {
    pub id: String,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabsView {
    pub id: String,
    pub tabs: Vec<TabView>,
    /// Id of the panel to show, `panel-{active}`, if a tab matches
    pub panel_id: Option<String>,
    pub disabled: bool,
    pub full_width: bool,
    pub size: TabsSize,
    pub variant: TabsVariant,
    pub orientation: TabsOrientation,
}

/// Tabs component
pub struct Tabs {
    id: String,
    active: Controllable<String>,
    items: Vec<TabItem>,
    disabled: bool,
    full_width: bool,
    size: TabsSize,
    variant: TabsVariant,
    orientation: TabsOrientation,
}

impl Tabs {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Effective id of the tab at `index`
    pub fn tab_id(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| item_id(item, index))
    }

    /// Id of the active tab
    pub fn active(&self) -> String {
        self.active.get()
    }

    /// Index of the active tab, if one matches
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active();
        (0..self.items.len()).find(|&i| self.tab_id(i).as_deref() == Some(active.as_str()))
    }

    pub fn active_tab(&self) -> Option<&TabItem> {
        self.active_index().and_then(|i| self.items.get(i))
    }

    pub fn set_value(&self, value: Option<String>) {
        self.active.set_external(value);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Activate the tab with `id`
    pub fn select_tab(&self, id: &str) -> WriteOutcome {
        if self.disabled {
            tracing::trace!("{}: tab change ignored, disabled", self.id);
            return WriteOutcome::Suppressed;
        }
        let index = (0..self.items.len()).find(|&i| self.tab_id(i).as_deref() == Some(id));
        match index {
            Some(i) if !self.items[i].disabled => {
                tracing::debug!("{}: active tab -> {}", self.id, id);
                self.active.write(id.to_string())
            }
            _ => WriteOutcome::Suppressed,
        }
    }

    /// Keyboard navigation across the tab list
    ///
    /// Arrow keys along the orientation move to the neighbouring enabled tab,
    /// wrapping at either end; Home and End jump to the first and last enabled
    /// tab.
    pub fn handle_key(&self, key: KeyCode) -> WriteOutcome {
        let (back, forward) = match self.orientation {
            TabsOrientation::Horizontal => (KeyCode::ArrowLeft, KeyCode::ArrowRight),
            TabsOrientation::Vertical => (KeyCode::ArrowUp, KeyCode::ArrowDown),
        };
        let target = if key == forward {
            self.neighbour(true)
        } else if key == back {
            self.neighbour(false)
        } else if key == KeyCode::Home {
            self.items.iter().position(|t| !t.disabled)
        } else if key == KeyCode::End {
            self.items.iter().rposition(|t| !t.disabled)
        } else {
            None
        };

        match target.and_then(|i| self.tab_id(i)) {
            Some(id) if id != self.active() => self.select_tab(&id),
            _ => WriteOutcome::Suppressed,
        }
    }

    fn neighbour(&self, forward: bool) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let start = self.active_index().unwrap_or(if forward { len - 1 } else { 0 });
        (1..=len)
            .map(|step| {
                if forward {
                    (start + step) % len
                } else {
                    (start + len - step % len) % len
                }
            })
            .find(|&i| !self.items[i].disabled)
    }
}

fn item_id(item: &TabItem, index: usize) -> String {
    item.id.clone().unwrap_or_else(|| format!("tab-{index}"))
}

impl Component for Tabs {
    type View = TabsView;

    fn view(&self) -> TabsView {
        let active = self.active();
        let tabs: Vec<TabView> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let id = item_id(item, index);
                TabView {
                    active: id == active,
                    id,
                    label: item.label.clone(),
                    disabled: self.disabled || item.disabled,
                }
            })
            .collect();
        let panel_id = tabs
            .iter()
            .any(|t| t.active)
            .then(|| format!("panel-{active}"));

        TabsView {
            id: self.id.clone(),
            tabs,
            panel_id,
            disabled: self.disabled,
            full_width: self.full_width,
            size: self.size,
            variant: self.variant,
            orientation: self.orientation,
        }
    }
}

/// Builder for tabs component
pub struct TabsBuilder {
    id: String,
    active: Controllable<String>,
    controlled: Option<String>,
    default_value: Option<String>,
    items: Vec<TabItem>,
    disabled: bool,
    full_width: bool,
    size: TabsSize,
    variant: TabsVariant,
    orientation: TabsOrientation,
    on_change: Option<ChangeCallback<String>>,
}

impl TabsBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("tabs"),
            active: ctx.controllable(String::new()),
            controlled: None,
            default_value: None,
            items: Vec::new(),
            disabled: false,
            full_width: false,
            size: TabsSize::default(),
            variant: TabsVariant::default(),
            orientation: TabsOrientation::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a tab with a generated id
    pub fn tab(mut self, label: impl Into<String>) -> Self {
        self.items.push(TabItem::new(label));
        self
    }

    pub fn tab_item(mut self, item: TabItem) -> Self {
        self.items.push(item);
        self
    }

    /// Control the active tab from outside
    pub fn value(mut self, id: impl Into<String>) -> Self {
        self.controlled = Some(id.into());
        self
    }

    /// Initially active tab when uncontrolled
    pub fn default_value(mut self, id: impl Into<String>) -> Self {
        self.default_value = Some(id.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn size(mut self, size: TabsSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: TabsVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn orientation(mut self, orientation: TabsOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.orientation = TabsOrientation::Vertical;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Tabs {
        // Explicit default, else the first tab's own id, else tab-0
        let initial = self
            .default_value
            .filter(|v| !v.is_empty())
            .or_else(|| self.items.first().and_then(|t| t.id.clone()))
            .unwrap_or_else(|| "tab-0".to_string());
        self.active.seed(initial);
        self.active.set_external(self.controlled);
        self.active.set_on_change(self.on_change);

        Tabs {
            id: self.id,
            active: self.active,
            items: self.items,
            disabled: self.disabled,
            full_width: self.full_width,
            size: self.size,
            variant: self.variant,
            orientation: self.orientation,
        }
    }
}

/// Create a tab list
pub fn tabs(ctx: &LumenContext) -> TabsBuilder {
    TabsBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn settings(ctx: &LumenContext) -> (Arc<Mutex<Vec<String>>>, TabsBuilder) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let builder = tabs(ctx)
            .tab("Account")
            .tab_item(tab_item("Password").disabled())
            .tab("Billing")
            .on_change(move |v| sink.lock().unwrap().push(v));
        (log, builder)
    }

    #[test]
    fn test_default_is_first_generated_id() {
        let ctx = LumenContext::new();
        let (_, builder) = settings(&ctx);
        let t = builder.build_component();
        assert_eq!(t.active(), "tab-0");
        assert_eq!(t.active_tab().map(TabItem::label), Some("Account"));
    }

    #[test]
    fn test_default_prefers_first_explicit_id() {
        let ctx = LumenContext::new();
        let t = tabs(&ctx)
            .tab_item(tab_item("Home").id("home"))
            .tab("About")
            .build_component();
        assert_eq!(t.active(), "home");
        assert_eq!(t.tab_id(1).as_deref(), Some("tab-1"));
    }

    #[test]
    fn test_default_value_wins() {
        let ctx = LumenContext::new();
        let (_, builder) = settings(&ctx);
        let t = builder.default_value("tab-2").build_component();
        assert_eq!(t.active_index(), Some(2));
    }

    #[test]
    fn test_select_tab_skips_disabled() {
        let ctx = LumenContext::new();
        let (log, builder) = settings(&ctx);
        let t = builder.build_component();

        assert_eq!(t.select_tab("tab-1"), WriteOutcome::Suppressed);
        assert_eq!(t.select_tab("tab-2"), WriteOutcome::Committed);
        assert_eq!(t.active(), "tab-2");
        assert_eq!(*log.lock().unwrap(), vec!["tab-2".to_string()]);
    }

    #[test]
    fn test_disabled_group_suppresses() {
        let ctx = LumenContext::new();
        let (log, builder) = settings(&ctx);
        let t = builder.disabled(true).build_component();

        assert_eq!(t.select_tab("tab-2"), WriteOutcome::Suppressed);
        assert_eq!(t.handle_key(KeyCode::ArrowRight), WriteOutcome::Suppressed);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_arrow_keys_wrap_and_skip_disabled() {
        let ctx = LumenContext::new();
        let (_, builder) = settings(&ctx);
        let t = builder.build_component();

        t.handle_key(KeyCode::ArrowRight);
        assert_eq!(t.active(), "tab-2");
        t.handle_key(KeyCode::ArrowRight);
        assert_eq!(t.active(), "tab-0");
        t.handle_key(KeyCode::ArrowLeft);
        assert_eq!(t.active(), "tab-2");

        // Vertical keys do nothing on a horizontal list
        assert_eq!(t.handle_key(KeyCode::ArrowDown), WriteOutcome::Suppressed);
    }

    #[test]
    fn test_home_end() {
        let ctx = LumenContext::new();
        let (_, builder) = settings(&ctx);
        let t = builder.vertical().build_component();

        t.handle_key(KeyCode::End);
        assert_eq!(t.active(), "tab-2");
        t.handle_key(KeyCode::Home);
        assert_eq!(t.active(), "tab-0");
        assert_eq!(t.handle_key(KeyCode::Home), WriteOutcome::Suppressed);
        t.handle_key(KeyCode::ArrowDown);
        assert_eq!(t.active(), "tab-2");
    }

    #[test]
    fn test_controlled_tabs() {
        let ctx = LumenContext::new();
        let (log, builder) = settings(&ctx);
        let t = builder.value("tab-0").build_component();

        assert_eq!(t.select_tab("tab-2"), WriteOutcome::Notified);
        assert_eq!(t.active(), "tab-0");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_view_panel() {
        let ctx = LumenContext::new();
        let (_, builder) = settings(&ctx);
        let t = builder.build_component();
        let view = t.view();
        assert_eq!(view.panel_id.as_deref(), Some("panel-tab-0"));
        assert!(view.tabs[0].active);
        assert!(view.tabs[1].disabled);

        t.set_value(Some("missing".to_string()));
        assert!(t.view().panel_id.is_none());
    }
}
