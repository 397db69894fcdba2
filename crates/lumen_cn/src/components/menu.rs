//! Menu component: a trigger button with a dropdown list of actions
//!
//! While open, the menu listens for Escape on the document and closes when it
//! sees one. The listener is removed when the menu closes or is dropped.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let actions = cn::menu(&ctx)
//!     .trigger_label("Actions")
//!     .item(MenuItem::new("Edit").on_click(|| println!("edit")))
//!     .item(MenuItem::new("Delete").disabled())
//!     .on_open_change(|open| println!("open: {}", open))
//!     .build_component();
//!
//! actions.toggle();
//! ctx.document().dispatch_key(&KeyCode::Escape.into()); // closes
//! ```

use lumen_core::{
    ChangeCallback, Controllable, DocumentHandle, KeyCode, ListenerSlot, LumenContext, State,
    WriteOutcome,
};
use std::sync::Arc;

use super::Component;

/// Menu density variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuVariant {
    #[default]
    Default,
    Compact,
    Minimal,
}

/// An entry in the menu list
#[derive(Clone)]
pub struct MenuItem {
    id: Option<String>,
    label: String,
    disabled: bool,
    on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            disabled: false,
            on_click: None,
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

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }
}

impl std::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItemView {
    pub id: String,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuView {
    pub id: String,
    pub trigger_id: String,
    pub list_id: String,
    pub trigger_label: String,
    pub open: bool,
    /// Empty while closed
    pub items: Vec<MenuItemView>,
    pub tooltip: Option<String>,
    pub disabled: bool,
    pub variant: MenuVariant,
}

/// Menu component
pub struct Menu {
    id: String,
    open: Controllable<bool>,
    selected: State<Option<usize>>,
    items: Vec<MenuItem>,
    escape: ListenerSlot,
    document: DocumentHandle,
    trigger_label: String,
    tooltip: Option<String>,
    disabled: bool,
    variant: MenuVariant,
}

impl Menu {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }

    /// Whether the Escape listener is registered
    pub fn is_listening(&self) -> bool {
        self.escape.is_attached()
    }

    /// Supply the caller's open state for this render
    pub fn set_open(&self, open: Option<bool>) {
        self.open.set_external(open);
        self.sync_listener();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Trigger click
    pub fn toggle(&self) -> WriteOutcome {
        if self.disabled {
            return WriteOutcome::Suppressed;
        }
        self.write_open(!self.is_open())
    }

    pub fn close(&self) -> WriteOutcome {
        if !self.is_open() {
            return WriteOutcome::Suppressed;
        }
        self.write_open(false)
    }

    /// Click on the item at `index`: records the selection, runs the item's
    /// callback and closes the menu
    pub fn select_item(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        if item.disabled || !self.is_open() {
            return false;
        }
        tracing::debug!("{}: item {} ({}) selected", self.id, index, item.label);
        self.selected.set_rebuild(Some(index));
        if let Some(on_click) = &item.on_click {
            on_click();
        }
        self.write_open(false);
        true
    }

    fn write_open(&self, open: bool) -> WriteOutcome {
        tracing::debug!("{}: open -> {}", self.id, open);
        let outcome = self.open.write(open);
        self.sync_listener();
        outcome
    }

    /// Listen for Escape exactly while open
    fn sync_listener(&self) {
        if !self.is_open() {
            self.escape.detach();
            return;
        }
        if self.escape.is_attached() {
            return;
        }

        let id = self.id.clone();
        let open = self.open.clone();
        let slot = self.escape.clone();
        let guard = self.document.add_key_listener(move |event| {
            if event.key == KeyCode::Escape && open.get() {
                tracing::debug!("{}: escape, closing", id);
                open.write(false);
                if !open.get() {
                    slot.detach();
                }
            }
        });
        if let Some(guard) = guard {
            self.escape.attach(guard);
        }
    }
}

impl Drop for Menu {
    fn drop(&mut self) {
        self.escape.detach();
    }
}

impl Component for Menu {
    type View = MenuView;

    fn view(&self) -> MenuView {
        let open = self.is_open();
        let selected = self.selected_index();
        let items = if open {
            self.items
                .iter()
                .enumerate()
                .map(|(index, item)| MenuItemView {
                    id: item
                        .id
                        .clone()
                        .unwrap_or_else(|| format!("{}-item-{}", self.id, index)),
                    label: item.label.clone(),
                    selected: selected == Some(index),
                    disabled: item.disabled,
                })
                .collect()
        } else {
            Vec::new()
        };

        MenuView {
            id: self.id.clone(),
            trigger_id: format!("{}-trigger", self.id),
            list_id: format!("{}-list", self.id),
            trigger_label: self.trigger_label.clone(),
            open,
            items,
            tooltip: self.tooltip.clone(),
            disabled: self.disabled,
            variant: self.variant,
        }
    }
}

/// Builder for menu component
pub struct MenuBuilder {
    id: String,
    open: Controllable<bool>,
    controlled: Option<bool>,
    selected: State<Option<usize>>,
    items: Vec<MenuItem>,
    document: DocumentHandle,
    trigger_label: String,
    tooltip: Option<String>,
    disabled: bool,
    variant: MenuVariant,
    on_open_change: Option<ChangeCallback<bool>>,
}

impl MenuBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("menu"),
            open: ctx.controllable(false),
            controlled: None,
            selected: ctx.use_state(None),
            items: Vec::new(),
            document: ctx.document_handle(),
            trigger_label: "Menu".to_string(),
            tooltip: None,
            disabled: false,
            variant: MenuVariant::default(),
            on_open_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn trigger_label(mut self, label: impl Into<String>) -> Self {
        self.trigger_label = label.into();
        self
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Control the open state from outside
    pub fn open(mut self, open: bool) -> Self {
        self.controlled = Some(open);
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

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn variant(mut self, variant: MenuVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn on_open_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_open_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Menu {
        self.open.set_external(self.controlled);
        self.open.set_on_change(self.on_open_change);
        let menu = Menu {
            id: self.id,
            open: self.open,
            selected: self.selected,
            items: self.items,
            escape: ListenerSlot::new(),
            document: self.document,
            trigger_label: self.trigger_label,
            tooltip: self.tooltip,
            disabled: self.disabled,
            variant: self.variant,
        };
        menu.sync_listener();
        menu
    }
}

/// Create a menu
pub fn menu(ctx: &LumenContext) -> MenuBuilder {
    MenuBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn escape(ctx: &LumenContext) -> usize {
        ctx.document().dispatch_key(&KeyCode::Escape.into())
    }

    #[test]
    fn test_listener_only_while_open() {
        let ctx = LumenContext::new();
        let m = menu(&ctx).item(MenuItem::new("Edit")).build_component();

        assert!(!m.is_listening());
        m.toggle();
        assert!(m.is_open());
        assert!(m.is_listening());
        assert_eq!(ctx.document().listener_count(), 1);

        m.toggle();
        assert!(!m.is_listening());
        assert_eq!(ctx.document().listener_count(), 0);
    }

    #[test]
    fn test_escape_closes_and_notifies() {
        let ctx = LumenContext::new();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let m = menu(&ctx)
            .on_open_change(move |open| sink.lock().unwrap().push(open))
            .build_component();

        m.toggle();
        assert_eq!(escape(&ctx), 1);
        assert!(!m.is_open());
        assert!(!m.is_listening());
        assert_eq!(*changes.lock().unwrap(), vec![true, false]);

        // Closed menus do not hear Escape at all
        assert_eq!(escape(&ctx), 0);
    }

    #[test]
    fn test_other_keys_ignored() {
        let ctx = LumenContext::new();
        let m = menu(&ctx).default_open(true).build_component();
        assert!(m.is_listening());
        ctx.document().dispatch_key(&KeyCode::Enter.into());
        assert!(m.is_open());
    }

    #[test]
    fn test_select_item_runs_callback_and_closes() {
        let ctx = LumenContext::new();
        let clicks = Arc::new(AtomicUsize::new(0));
        let c = clicks.clone();
        let m = menu(&ctx)
            .item(MenuItem::new("Edit").on_click(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }))
            .item(MenuItem::new("Delete").disabled())
            .build_component();

        assert!(!m.select_item(0));
        m.toggle();
        assert!(!m.select_item(1));
        assert!(!m.select_item(9));
        assert!(m.select_item(0));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(m.selected_index(), Some(0));
        assert!(!m.is_open());
        assert!(!m.is_listening());
    }

    #[test]
    fn test_drop_detaches() {
        let ctx = LumenContext::new();
        let m = menu(&ctx).default_open(true).build_component();
        assert_eq!(ctx.document().listener_count(), 1);
        drop(m);
        assert_eq!(ctx.document().listener_count(), 0);
    }

    #[test]
    fn test_controlled_open_follows_caller() {
        let ctx = LumenContext::new();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let m = menu(&ctx)
            .open(true)
            .on_open_change(move |open| sink.lock().unwrap().push(open))
            .build_component();
        assert!(m.is_listening());

        // Escape asks the caller to close; the caller has not yet agreed
        escape(&ctx);
        assert!(m.is_open());
        assert!(m.is_listening());

        m.set_open(Some(false));
        assert!(!m.is_listening());
        assert_eq!(*changes.lock().unwrap(), vec![false]);
    }

    #[test]
    fn test_view_lists_items_only_when_open() {
        let ctx = LumenContext::new();
        let m = menu(&ctx)
            .id("file")
            .item(MenuItem::new("Open"))
            .item(MenuItem::new("Save").id("save"))
            .build_component();
        assert!(m.view().items.is_empty());

        m.toggle();
        let view = m.view();
        assert_eq!(view.trigger_id, "file-trigger");
        assert_eq!(view.items[0].id, "file-item-0");
        assert_eq!(view.items[1].id, "save");
    }

    #[test]
    fn test_disabled_menu_does_not_open() {
        let ctx = LumenContext::new();
        let m = menu(&ctx).disabled(true).build_component();
        assert_eq!(m.toggle(), WriteOutcome::Suppressed);
        assert!(!m.is_open());
    }
}
