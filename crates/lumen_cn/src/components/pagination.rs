//! Pagination component for navigating pages
//!
//! Displays page navigation controls with previous/next buttons and a bounded
//! window of page numbers. When there are more pages than the visible budget,
//! the window keeps the first and last page and truncates around the current
//! one with ellipsis markers.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! // Uncontrolled: the component tracks its own page
//! let pages = cn::pagination(&ctx)
//!     .total_pages(10)
//!     .on_page_change(|page| println!("Go to page {}", page))
//!     .build_component();
//!
//! // With a wider window and first/last buttons
//! let pages = cn::pagination(&ctx)
//!     .total_pages(100)
//!     .max_visible_pages(7)
//!     .show_first_last(true)
//!     .build_component();
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext};
use std::sync::Arc;

use super::Component;

/// One slot in the page window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEntry {
    /// A clickable page number
    Page(usize),
    /// An inert gap marker
    Ellipsis,
}

/// Compute the page numbers and ellipsis markers to display
///
/// Inputs are clamped first: `total` and `max_visible` to at least 1, and
/// `current` into `[1, total]`.
///
/// ```
/// use lumen_cn::components::pagination::{compute_window, PageEntry::*};
///
/// assert_eq!(
///     compute_window(1, 10, 5),
///     vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
/// );
/// ```
pub fn compute_window(current: usize, total: usize, max_visible: usize) -> Vec<PageEntry> {
    let total = total.max(1);
    let max_visible = max_visible.max(1);
    let current = current.clamp(1, total);

    if total <= max_visible {
        return (1..=total).map(PageEntry::Page).collect();
    }

    let side = (max_visible - 1) / 2;
    let mut entries = Vec::with_capacity(max_visible + 4);

    if current <= side + 1 {
        entries.extend((1..=max_visible).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total));
    } else if current > total - side - 1 {
        entries.push(PageEntry::Page(1));
        entries.push(PageEntry::Ellipsis);
        entries.extend((total - max_visible + 1..=total).map(PageEntry::Page));
    } else {
        entries.push(PageEntry::Page(1));
        entries.push(PageEntry::Ellipsis);
        entries.extend((current - side..=current + side).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total));
    }

    entries
}

/// Pagination size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaginationSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Pagination visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaginationVariant {
    #[default]
    Default,
    Compact,
    Minimal,
}

/// A previous/next/first/last control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    /// Page this button navigates to
    pub target: usize,
    pub disabled: bool,
}

/// Render snapshot of a pagination control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationView {
    pub id: String,
    pub entries: Vec<PageEntry>,
    pub current_page: usize,
    pub total_pages: usize,
    pub first: Option<NavButton>,
    pub previous: Option<NavButton>,
    pub next: Option<NavButton>,
    pub last: Option<NavButton>,
    pub disabled: bool,
    pub size: PaginationSize,
    pub variant: PaginationVariant,
}

#[derive(Clone, Debug)]
struct Labels {
    previous: String,
    next: String,
    first: String,
    last: String,
}

/// Pagination component
pub struct Pagination {
    id: String,
    page: Controllable<usize>,
    total_pages: usize,
    max_visible_pages: usize,
    show_previous_next: bool,
    show_first_last: bool,
    disabled: bool,
    labels: Labels,
    size: PaginationSize,
    variant: PaginationVariant,
}

impl Pagination {
    fn from_builder(builder: PaginationBuilder) -> Self {
        builder.page.set_external(builder.current_page);
        builder.page.set_on_change(builder.on_page_change);
        Self {
            id: builder.id,
            page: builder.page,
            total_pages: builder.total_pages.max(1),
            max_visible_pages: builder.max_visible_pages.max(1),
            show_previous_next: builder.show_previous_next,
            show_first_last: builder.show_first_last,
            disabled: builder.disabled,
            labels: builder.labels,
            size: builder.size,
            variant: builder.variant,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The page currently shown, clamped into `[1, total_pages]`
    pub fn current_page(&self) -> usize {
        self.page.get().clamp(1, self.total_pages)
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Supply the caller's page for this render (`None` = uncontrolled)
    pub fn set_current_page(&self, page: Option<usize>) {
        self.page.set_external(page);
    }

    pub fn set_total_pages(&mut self, total: usize) {
        self.total_pages = total.max(1);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The visible window for the current page
    pub fn entries(&self) -> Vec<PageEntry> {
        compute_window(self.current_page(), self.total_pages, self.max_visible_pages)
    }

    /// Navigate to `page`
    ///
    /// Returns `true` if the change was accepted. Pages outside
    /// `[1, total_pages]`, the current page, and any page while disabled are
    /// ignored.
    ///
    /// Clicking the page that is already current does not call
    /// `on_page_change`. Hosts that want a notification on every page-button
    /// press, including the current one, must hook the button themselves.
    pub fn select_page(&self, page: usize) -> bool {
        if self.disabled {
            tracing::trace!("{}: page change ignored, disabled", self.id);
            return false;
        }
        if page < 1 || page > self.total_pages || page == self.current_page() {
            return false;
        }
        tracing::debug!("{}: page {} -> {}", self.id, self.current_page(), page);
        self.page.write(page).notified()
    }

    pub fn previous(&self) -> bool {
        let current = self.current_page();
        current > 1 && self.select_page(current - 1)
    }

    pub fn next(&self) -> bool {
        let current = self.current_page();
        current < self.total_pages && self.select_page(current + 1)
    }

    pub fn first(&self) -> bool {
        self.select_page(1)
    }

    pub fn last(&self) -> bool {
        self.select_page(self.total_pages)
    }

    fn nav_button(&self, label: &str, target: usize, at_boundary: bool) -> NavButton {
        NavButton {
            label: label.to_string(),
            target,
            disabled: self.disabled || at_boundary,
        }
    }
}

impl Component for Pagination {
    type View = PaginationView;

    fn view(&self) -> PaginationView {
        let current = self.current_page();
        let total = self.total_pages;
        let at_start = current == 1;
        let at_end = current == total;

        let (first, last) = if self.show_first_last {
            (
                Some(self.nav_button(&self.labels.first, 1, at_start)),
                Some(self.nav_button(&self.labels.last, total, at_end)),
            )
        } else {
            (None, None)
        };
        let (previous, next) = if self.show_previous_next {
            (
                Some(self.nav_button(&self.labels.previous, current.saturating_sub(1).max(1), at_start)),
                Some(self.nav_button(&self.labels.next, (current + 1).min(total), at_end)),
            )
        } else {
            (None, None)
        };

        PaginationView {
            id: self.id.clone(),
            entries: self.entries(),
            current_page: current,
            total_pages: total,
            first,
            previous,
            next,
            last,
            disabled: self.disabled,
            size: self.size,
            variant: self.variant,
        }
    }
}

impl std::fmt::Debug for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pagination")
            .field("id", &self.id)
            .field("current_page", &self.current_page())
            .field("total_pages", &self.total_pages)
            .finish()
    }
}

/// Builder for pagination component
pub struct PaginationBuilder {
    id: String,
    page: Controllable<usize>,
    current_page: Option<usize>,
    total_pages: usize,
    max_visible_pages: usize,
    show_previous_next: bool,
    show_first_last: bool,
    disabled: bool,
    labels: Labels,
    size: PaginationSize,
    variant: PaginationVariant,
    on_page_change: Option<ChangeCallback<usize>>,
}

impl PaginationBuilder {
    /// Create a new pagination builder with defaults from the context config
    pub fn new(ctx: &LumenContext) -> Self {
        let config = &ctx.config().pagination;
        Self {
            id: ctx.next_id("pagination"),
            page: ctx.controllable(1),
            current_page: None,
            total_pages: 10,
            max_visible_pages: config.max_visible_pages,
            show_previous_next: config.show_previous_next,
            show_first_last: config.show_first_last,
            disabled: false,
            labels: Labels {
                previous: config.previous_label.clone(),
                next: config.next_label.clone(),
                first: config.first_label.clone(),
                last: config.last_label.clone(),
            },
            size: PaginationSize::default(),
            variant: PaginationVariant::default(),
            on_page_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn total_pages(mut self, total: usize) -> Self {
        self.total_pages = total;
        self
    }

    /// Control the current page from outside
    pub fn current_page(mut self, page: usize) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Initial page when uncontrolled
    pub fn default_page(self, page: usize) -> Self {
        self.page.seed(page);
        self
    }

    /// Set the number of visible page buttons
    pub fn max_visible_pages(mut self, count: usize) -> Self {
        self.max_visible_pages = count;
        self
    }

    pub fn show_previous_next(mut self, show: bool) -> Self {
        self.show_previous_next = show;
        self
    }

    /// Show first/last page buttons
    pub fn show_first_last(mut self, show: bool) -> Self {
        self.show_first_last = show;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn previous_label(mut self, label: impl Into<String>) -> Self {
        self.labels.previous = label.into();
        self
    }

    pub fn next_label(mut self, label: impl Into<String>) -> Self {
        self.labels.next = label.into();
        self
    }

    pub fn first_label(mut self, label: impl Into<String>) -> Self {
        self.labels.first = label.into();
        self
    }

    pub fn last_label(mut self, label: impl Into<String>) -> Self {
        self.labels.last = label.into();
        self
    }

    pub fn size(mut self, size: PaginationSize) -> Self {
        self.size = size;
        self
    }

    pub fn small(mut self) -> Self {
        self.size = PaginationSize::Small;
        self
    }

    pub fn large(mut self) -> Self {
        self.size = PaginationSize::Large;
        self
    }

    pub fn variant(mut self, variant: PaginationVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set page change callback
    pub fn on_page_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_page_change = Some(Arc::new(handler));
        self
    }

    pub fn build_component(self) -> Pagination {
        Pagination::from_builder(self)
    }
}

/// Create a pagination control
pub fn pagination(ctx: &LumenContext) -> PaginationBuilder {
    PaginationBuilder::new(ctx)
}
