//! # Lumen Component Library (lumen_cn)
//!
//! Headless interactive components built on `lumen_core` primitives.
//!
//! ## Philosophy
//!
//! Components own behavior, not pixels. Each one resolves its value from the
//! caller (controlled) or from its own state (uncontrolled), reacts to input,
//! and hands a renderer a plain view struct describing what to draw.
//!
//! - **Primitives**: `lumen_core` provides signals, controlled values, timers
//!   and the document listener target
//! - **Components**: `lumen_cn` provides the interaction logic on top
//!
//! ## Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//!
//! let pager = cn::pagination(&ctx)
//!     .total_pages(10)
//!     .default_page(5)
//!     .build_component();
//!
//! pager.next();
//! let view = pager.view();
//! ```
//!
//! ## Components
//!
//! - **Accordion** - Collapsible section, alone or in a single/multi group
//! - **Autocomplete** - Text input with filtered suggestions
//! - **Checkbox** - Boolean toggle
//! - **Menu** - Trigger button with an action list
//! - **Modal** - Dialog that asks its owner to close
//! - **NumberField** - Numeric input with bounds and step
//! - **Pagination** - Page navigation with an ellipsis window
//! - **RadioGroup** - Single choice among options
//! - **Select** - Dropdown choice
//! - **Stepper** - Progress through ordered steps
//! - **Tabs** - Tab strip with keyboard navigation
//! - **Toast** - Notification with auto-dismiss
//! - **Tooltip** - Hover hint with show/hide delays

pub mod components;

pub use components::*;

/// Convenience module for accessing components with `cn::` prefix
pub mod cn {
    pub use crate::components::accordion::{accordion, accordion_group};
    pub use crate::components::autocomplete::autocomplete;
    pub use crate::components::checkbox::checkbox;
    pub use crate::components::menu::menu;
    pub use crate::components::modal::modal;
    pub use crate::components::number_field::number_field;
    pub use crate::components::pagination::pagination;
    pub use crate::components::radio::radio_group;
    pub use crate::components::select::select;
    pub use crate::components::stepper::stepper;
    pub use crate::components::tabs::{tab_item, tabs};
    pub use crate::components::toast::toast;
    pub use crate::components::tooltip::tooltip;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::Component;
    pub use crate::components::{
        AccordionMode, AccordionSize, AccordionVariant, AutocompleteSize, CheckboxSize,
        CheckboxVariant, MenuItem, MenuVariant, ModalHeight, ModalWidth, NumberFieldSize,
        NumberFieldVariant, PageEntry, PaginationSize, PaginationVariant, RadioLayout,
        RadioOption, RadioSize, SelectOption, SelectSize, SelectVariant, StepStatus,
        StepperOrientation, TabItem, TabsOrientation, TabsSize, TabsVariant, ToastPoliteness,
        ToastSize, ToastVariant, TooltipPlacement, TooltipSize,
    };
    // Re-export the core types every component needs
    pub use lumen_core::{KeyCode, KeyEvent, LumenConfig, LumenContext, PointerEvent, WriteOutcome};
}
