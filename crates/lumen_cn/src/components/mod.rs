//! Headless components built on lumen_core primitives
//!
//! Each component follows a consistent pattern:
//! - Builder function (e.g., `cn::pagination(&ctx)`)
//! - Size and variant enums carried through to the view untouched
//! - `build_component()` producing a live instance with interaction methods
//! - Implements [`Component`] so a renderer can ask for a plain view snapshot

pub mod accordion;
pub mod autocomplete;
pub mod checkbox;
pub mod menu;
pub mod modal;
pub mod number_field;
pub mod pagination;
pub mod radio;
pub mod select;
pub mod stepper;
pub mod tabs;
pub mod toast;
pub mod tooltip;

pub use accordion::{
    accordion, accordion_group, Accordion, AccordionBuilder, AccordionGroup,
    AccordionGroupBuilder, AccordionMode, AccordionSize, AccordionVariant, AccordionView,
};
pub use autocomplete::{
    autocomplete, filter_options, Autocomplete, AutocompleteBuilder, AutocompleteSize,
    AutocompleteView,
};
pub use checkbox::{checkbox, Checkbox, CheckboxBuilder, CheckboxSize, CheckboxVariant, CheckboxView};
pub use menu::{menu, Menu, MenuBuilder, MenuItem, MenuItemView, MenuVariant, MenuView};
pub use modal::{modal, Modal, ModalBuilder, ModalHeight, ModalView, ModalWidth};
pub use number_field::{
    number_field, NumberField, NumberFieldBuilder, NumberFieldSize, NumberFieldVariant,
    NumberFieldView,
};
pub use pagination::{
    compute_window, pagination, NavButton, PageEntry, Pagination, PaginationBuilder,
    PaginationSize, PaginationVariant, PaginationView,
};
pub use radio::{
    radio_group, RadioGroup, RadioGroupBuilder, RadioLayout, RadioOption, RadioOptionView,
    RadioSize, RadioView,
};
pub use select::{select, Select, SelectBuilder, SelectOption, SelectSize, SelectVariant, SelectView};
pub use stepper::{
    stepper, StepStatus, StepView, Stepper, StepperBuilder, StepperOrientation, StepperView,
};
pub use tabs::{
    tab_item, tabs, TabItem, TabView, Tabs, TabsBuilder, TabsOrientation, TabsSize, TabsVariant,
    TabsView,
};
pub use toast::{toast, Toast, ToastBuilder, ToastPoliteness, ToastSize, ToastVariant, ToastView};
pub use tooltip::{tooltip, Tooltip, TooltipBuilder, TooltipPlacement, TooltipSize, TooltipView};

/// A live component instance that can describe itself to a renderer
pub trait Component {
    /// Plain snapshot of everything a renderer needs
    type View;

    fn view(&self) -> Self::View;
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{KeyCode, LumenContext};
    use std::time::Duration;

    #[test]
    fn test_dropped_components_release_signals() {
        let ctx = LumenContext::new();
        let before = ctx.stats().signal_count;

        for i in 0..100 {
            let mut note = toast(&ctx, "Saved").build_component();
            let agree = checkbox(&ctx).default_checked(true).build_component();
            agree.toggle();
            if i % 2 == 0 {
                note.close();
            }
        }
        assert_eq!(ctx.stats().signal_count, before);
        assert_eq!(ctx.timers().pending_count(), 0);
    }

    #[test]
    fn test_listener_and_timer_holders_release_signals() {
        let ctx = LumenContext::new();
        let before = ctx.stats().signal_count;
        {
            let city = autocomplete(&ctx).options(["Berlin", "Bern"]).build_component();
            city.input("be");
            let actions = menu(&ctx).default_open(true).build_component();
            let mut tip = tooltip(&ctx, "Help").build_component();
            tip.hover_enter();
            let _pages = pagination(&ctx).total_pages(3).build_component();
            let _steps = stepper(&ctx).steps(["a", "b"]).build_component();

            assert!(city.is_listening());
            assert!(actions.is_listening());
            assert!(ctx.stats().signal_count > before);
        }
        assert_eq!(ctx.document().listener_count(), 0);
        assert_eq!(ctx.stats().signal_count, before);

        // Toasts that already fired leave nothing behind either
        let fired = toast(&ctx, "Bye").build_component();
        ctx.advance(Duration::from_secs(10));
        assert!(fired.is_dismissed());
        drop(fired);
        assert_eq!(ctx.stats().signal_count, before);
        assert_eq!(ctx.document().dispatch_key(&KeyCode::Escape.into()), 0);
    }
}
