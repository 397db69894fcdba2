//! Modal dialog
//!
//! The caller owns the open flag. The modal only asks to close: through
//! `on_close` on Escape, on the close button, and on clicks that land on the
//! backdrop itself. Escape is heard only while the modal is open.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//! let mut dialog = cn::modal(&ctx)
//!     .title("Delete file?")
//!     .on_close(|| println!("close requested"))
//!     .build_component();
//!
//! dialog.set_open(true);
//! ctx.document().dispatch_key(&KeyCode::Escape.into());
//! ```

use lumen_core::{DocumentHandle, KeyCode, ListenerSlot, LumenContext};
use std::sync::Arc;

use super::Component;

/// Maximum width of the dialog panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalWidth {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
    DoubleExtraLarge,
    Full,
}

/// Maximum height of the dialog panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalHeight {
    Small,
    Medium,
    #[default]
    Large,
    ExtraLarge,
    Full,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalView {
    pub id: String,
    pub title_id: String,
    pub title: Option<String>,
    pub open: bool,
    /// Page scrolling is blocked while the dialog is up
    pub scroll_locked: bool,
    pub max_width: ModalWidth,
    pub max_height: ModalHeight,
}

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Modal component
pub struct Modal {
    id: String,
    title: Option<String>,
    open: bool,
    on_close: Option<Callback>,
    on_click: Option<Callback>,
    escape: ListenerSlot,
    document: DocumentHandle,
    max_width: ModalWidth,
    max_height: ModalHeight,
}

impl Modal {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_listening(&self) -> bool {
        self.escape.is_attached()
    }

    /// Supply the caller's open flag for this render
    pub fn set_open(&mut self, open: bool) {
        if self.open != open {
            tracing::debug!("{}: open -> {}", self.id, open);
        }
        self.open = open;
        self.sync_listener();
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Close button
    pub fn request_close(&self) {
        if let Some(on_close) = &self.on_close {
            on_close();
        }
    }

    /// Click somewhere on the overlay
    ///
    /// `hit_backdrop` is true when the click landed on the backdrop rather
    /// than inside the dialog panel. Only those clicks request a close; every
    /// click is forwarded to `on_click`.
    pub fn backdrop_click(&self, hit_backdrop: bool) -> bool {
        if !self.open {
            return false;
        }
        if hit_backdrop {
            self.request_close();
        }
        if let Some(on_click) = &self.on_click {
            on_click();
        }
        hit_backdrop
    }

    fn sync_listener(&self) {
        if !self.open {
            self.escape.detach();
            return;
        }
        if self.escape.is_attached() {
            return;
        }

        let id = self.id.clone();
        let on_close = self.on_close.clone();
        let guard = self.document.add_key_listener(move |event| {
            if event.key != KeyCode::Escape {
                return;
            }
            tracing::debug!("{}: escape", id);
            if let Some(on_close) = &on_close {
                on_close();
            }
        });
        if let Some(guard) = guard {
            self.escape.attach(guard);
        }
    }
}

impl Drop for Modal {
    fn drop(&mut self) {
        self.escape.detach();
    }
}

impl Component for Modal {
    type View = ModalView;

    fn view(&self) -> ModalView {
        ModalView {
            id: self.id.clone(),
            title_id: format!("{}-title", self.id),
            title: self.title.clone(),
            open: self.open,
            scroll_locked: self.open,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}

/// Builder for modal component
pub struct ModalBuilder {
    id: String,
    title: Option<String>,
    open: bool,
    on_close: Option<Callback>,
    on_click: Option<Callback>,
    document: DocumentHandle,
    max_width: ModalWidth,
    max_height: ModalHeight,
}

impl ModalBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("modal"),
            title: None,
            open: false,
            on_close: None,
            on_click: None,
            document: ctx.document_handle(),
            max_width: ModalWidth::default(),
            max_height: ModalHeight::default(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn max_width(mut self, width: ModalWidth) -> Self {
        self.max_width = width;
        self
    }

    pub fn max_height(mut self, height: ModalHeight) -> Self {
        self.max_height = height;
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Modal {
        let modal = Modal {
            id: self.id,
            title: self.title,
            open: self.open,
            on_close: self.on_close,
            on_click: self.on_click,
            escape: ListenerSlot::new(),
            document: self.document,
            max_width: self.max_width,
            max_height: self.max_height,
        };
        modal.sync_listener();
        modal
    }
}

/// Create a modal
pub fn modal(ctx: &LumenContext) -> ModalBuilder {
    ModalBuilder::new(ctx)
}
