//! Input events delivered to components and document listeners

use smallvec::SmallVec;

/// Keys that components react to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Enter,
    Space,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Char(char),
}

/// A key-down event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self { key }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(key: KeyCode) -> Self {
        Self::new(key)
    }
}

/// A pointer-down event
///
/// `path` lists the ids of the element that was hit followed by its
/// ancestors, innermost first. An empty path means the pointer landed on
/// nothing a component owns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    pub path: SmallVec<[String; 4]>,
}

impl PointerEvent {
    /// Pointer-down on the element `target` inside the given ancestors
    pub fn on<I, S>(target: impl Into<String>, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = SmallVec::new();
        path.push(target.into());
        path.extend(ancestors.into_iter().map(Into::into));
        Self { path }
    }

    /// Pointer-down outside every component
    pub fn outside() -> Self {
        Self::default()
    }

    /// Whether the element with `id` is the target or one of its ancestors
    pub fn hits(&self, id: &str) -> bool {
        self.path.iter().any(|p| p == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_hits_target_and_ancestors() {
        let event = PointerEvent::on("option-2", ["autocomplete-1-list", "autocomplete-1"]);
        assert!(event.hits("option-2"));
        assert!(event.hits("autocomplete-1"));
        assert!(!event.hits("autocomplete-2"));
    }

    #[test]
    fn test_pointer_outside_hits_nothing() {
        assert!(!PointerEvent::outside().hits("menu-1"));
    }
}
