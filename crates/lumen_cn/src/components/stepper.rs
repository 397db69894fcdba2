//! Stepper component showing progress through an ordered list of steps
//!
//! Steps before the active one are completed and steps after it are pending.
//! Clicking a step moves there when the stepper is enabled and the step falls
//! inside `min..=max`, where `max` defaults to the last step.
//!
//! # Example
//!
//! ```ignore
//! use lumen_cn::prelude::*;
//!
//! let ctx = LumenContext::new();
//! let checkout = cn::stepper(&ctx)
//!     .steps(["Cart", "Shipping", "Payment"])
//!     .on_change(|step| println!("step {}", step))
//!     .build_component();
//!
//! checkout.click_step(1);
//! assert_eq!(checkout.status(0), StepStatus::Completed);
//! ```

use lumen_core::{ChangeCallback, Controllable, LumenContext, WriteOutcome};
use std::sync::Arc;

use super::Component;

/// Where a step sits relative to the active step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepperOrientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub label: String,
    pub status: StepStatus,
    pub clickable: bool,
    /// Whether a connector follows this step
    pub has_connector: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepperView {
    pub id: String,
    pub title: Option<String>,
    pub active_step: usize,
    pub min: usize,
    pub max: Option<usize>,
    pub steps: Vec<StepView>,
    pub disabled: bool,
    pub orientation: StepperOrientation,
}

/// Stepper component
pub struct Stepper {
    id: String,
    active: Controllable<usize>,
    steps: Vec<String>,
    min: usize,
    max: Option<usize>,
    title: Option<String>,
    disabled: bool,
    orientation: StepperOrientation,
}

impl Stepper {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn active_step(&self) -> usize {
        self.active.get()
    }

    pub fn set_active_step(&self, step: Option<usize>) {
        self.active.set_external(step);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Highest reachable step: explicit `max`, else the last step
    pub fn max(&self) -> Option<usize> {
        self.max.or_else(|| self.steps.len().checked_sub(1))
    }

    pub fn is_clickable(&self, index: usize) -> bool {
        !self.disabled && index >= self.min && self.max().is_some_and(|max| index <= max)
    }

    pub fn status(&self, index: usize) -> StepStatus {
        let active = self.active_step();
        if index < active {
            StepStatus::Completed
        } else if index == active {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    pub fn click_step(&self, index: usize) -> WriteOutcome {
        if !self.is_clickable(index) {
            tracing::trace!("{}: step {} not clickable", self.id, index);
            return WriteOutcome::Suppressed;
        }
        tracing::debug!("{}: step {}", self.id, index);
        self.active.write(index)
    }

    pub fn next(&self) -> WriteOutcome {
        self.click_step(self.active_step() + 1)
    }

    pub fn previous(&self) -> WriteOutcome {
        match self.active_step().checked_sub(1) {
            Some(index) => self.click_step(index),
            None => WriteOutcome::Suppressed,
        }
    }
}

impl Component for Stepper {
    type View = StepperView;

    fn view(&self) -> StepperView {
        let last = self.steps.len().saturating_sub(1);
        StepperView {
            id: self.id.clone(),
            title: self.title.clone(),
            active_step: self.active_step(),
            min: self.min,
            max: self.max(),
            steps: self
                .steps
                .iter()
                .enumerate()
                .map(|(index, label)| StepView {
                    index,
                    label: label.clone(),
                    status: self.status(index),
                    clickable: self.is_clickable(index),
                    has_connector: index < last,
                })
                .collect(),
            disabled: self.disabled,
            orientation: self.orientation,
        }
    }
}

/// Builder for stepper component
pub struct StepperBuilder {
    id: String,
    active: Controllable<usize>,
    controlled: Option<usize>,
    steps: Vec<String>,
    min: usize,
    max: Option<usize>,
    title: Option<String>,
    disabled: bool,
    orientation: StepperOrientation,
    on_change: Option<ChangeCallback<usize>>,
}

impl StepperBuilder {
    pub fn new(ctx: &LumenContext) -> Self {
        Self {
            id: ctx.next_id("stepper"),
            active: ctx.controllable(0),
            controlled: None,
            steps: Vec::new(),
            min: 0,
            max: None,
            title: None,
            disabled: false,
            orientation: StepperOrientation::default(),
            on_change: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn step(mut self, label: impl Into<String>) -> Self {
        self.steps.push(label.into());
        self
    }

    pub fn steps<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Control the active step from outside
    pub fn active_step(mut self, step: usize) -> Self {
        self.controlled = Some(step);
        self
    }

    pub fn default_active_step(self, step: usize) -> Self {
        self.active.seed(step);
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn orientation(mut self, orientation: StepperOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn vertical(self) -> Self {
        self.orientation(StepperOrientation::Vertical)
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build_component(self) -> Stepper {
        self.active.set_external(self.controlled);
        self.active.set_on_change(self.on_change);
        Stepper {
            id: self.id,
            active: self.active,
            steps: self.steps,
            min: self.min,
            max: self.max,
            title: self.title,
            disabled: self.disabled,
            orientation: self.orientation,
        }
    }
}

/// Create a stepper
pub fn stepper(ctx: &LumenContext) -> StepperBuilder {
    StepperBuilder::new(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_status() {
        let ctx = LumenContext::new();
        let s = stepper(&ctx)
            .steps(["a", "b", "c"])
            .default_active_step(1)
            .build_component();
        assert_eq!(s.status(0), StepStatus::Completed);
        assert_eq!(s.status(1), StepStatus::Active);
        assert_eq!(s.status(2), StepStatus::Pending);
    }

    #[test]
    fn test_click_in_range() {
        let ctx = LumenContext::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let s = stepper(&ctx)
            .steps(["a", "b", "c"])
            .min(1)
            .on_change(move |step| sink.lock().unwrap().push(step))
            .build_component();

        assert_eq!(s.click_step(0), WriteOutcome::Suppressed);
        assert_eq!(s.click_step(3), WriteOutcome::Suppressed);
        assert_eq!(s.click_step(2), WriteOutcome::Committed);
        assert_eq!(s.active_step(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_explicit_max() {
        let ctx = LumenContext::new();
        let s = stepper(&ctx).steps(["a", "b", "c"]).max(1).build_component();
        assert_eq!(s.next(), WriteOutcome::Committed);
        assert_eq!(s.next(), WriteOutcome::Suppressed);
        assert!(!s.view().steps[2].clickable);
    }

    #[test]
    fn test_disabled_ignores_clicks() {
        let ctx = LumenContext::new();
        let s = stepper(&ctx).steps(["a", "b"]).disabled(true).build_component();
        assert_eq!(s.click_step(1), WriteOutcome::Suppressed);
        assert_eq!(s.active_step(), 0);
    }

    #[test]
    fn test_controlled_notifies_only() {
        let ctx = LumenContext::new();
        let s = stepper(&ctx)
            .steps(["a", "b", "c"])
            .active_step(0)
            .build_component();
        assert_eq!(s.click_step(2), WriteOutcome::Notified);
        assert_eq!(s.active_step(), 0);
        s.set_active_step(Some(2));
        assert_eq!(s.status(1), StepStatus::Completed);
    }

    #[test]
    fn test_empty_stepper() {
        let ctx = LumenContext::new();
        let s = stepper(&ctx).build_component();
        assert!(s.is_empty());
        assert_eq!(s.max(), None);
        assert_eq!(s.click_step(0), WriteOutcome::Suppressed);
        assert_eq!(s.previous(), WriteOutcome::Suppressed);
    }

    #[test]
    fn test_view_connectors() {
        let ctx = LumenContext::new();
        let s = stepper(&ctx).steps(["a", "b", "c"]).build_component();
        let view = s.view();
        let connectors: Vec<bool> = view.steps.iter().map(|s| s.has_connector).collect();
        assert_eq!(connectors, vec![true, true, false]);
    }
}
