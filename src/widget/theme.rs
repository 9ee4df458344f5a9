//! Theme: named style elements with fallback chains.
//!
//! Widgets ask for a specific element (`ButtonTextFocused`); unset
//! elements defer to a more general one (`TextFocused`), and so on until
//! a root element. Unset roots resolve to [`Style::PLAIN`].

use crate::buffer::{Attrs, Color, Style};
use std::collections::HashMap;

/// A themable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    /// Ordinary text.
    Text,
    /// Text of the focused widget.
    TextFocused,
    /// The selected row of a focused list.
    Highlight,
    /// Borders.
    Border,
    /// Borders of a focused container.
    BorderFocused,
    /// Label text.
    LabelText,
    /// Button text.
    ButtonText,
    /// Button text when focused.
    ButtonTextFocused,
    /// Text entry content.
    EntryText,
    /// Text entry content when focused.
    EntryTextFocused,
    /// Padding dots after the content of a focused entry.
    EntryPadding,
    /// Frame title.
    FrameTitle,
    /// Frame title when focused.
    FrameTitleFocused,
    /// Frame border.
    FrameBorder,
    /// Frame border when focused.
    FrameBorderFocused,
    /// Tab header of the shown tab.
    TabActive,
    /// Tab headers of hidden tabs.
    TabInactive,
    /// Filled part of a progress bar.
    ProgressFilled,
    /// Empty part of a progress bar.
    ProgressEmpty,
}

impl StyleKey {
    /// The element consulted when this one is unset.
    pub const fn fallback(self) -> Option<Self> {
        match self {
            Self::Text | Self::TextFocused | Self::Highlight | Self::Border | Self::BorderFocused => {
                None
            }
            Self::LabelText | Self::ButtonText | Self::EntryText | Self::FrameTitle => {
                Some(Self::Text)
            }
            Self::ButtonTextFocused | Self::EntryTextFocused | Self::FrameTitleFocused => {
                Some(Self::TextFocused)
            }
            Self::EntryPadding => Some(Self::EntryTextFocused),
            Self::FrameBorder => Some(Self::Border),
            Self::FrameBorderFocused => Some(Self::BorderFocused),
            Self::TabActive => Some(Self::Highlight),
            Self::TabInactive | Self::ProgressFilled | Self::ProgressEmpty => Some(Self::Text),
        }
    }
}

/// A set of style elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    elements: HashMap<StyleKey, Style>,
}

impl Default for Theme {
    /// Cyan for focused text and borders, inverse for highlights.
    fn default() -> Self {
        Self::empty()
            .with(StyleKey::TextFocused, Style::fg(Color::Cyan))
            .with(StyleKey::BorderFocused, Style::fg(Color::Cyan))
            .with(StyleKey::Highlight, Style::PLAIN.with_attrs(Attrs::INVERSE))
    }
}

impl Theme {
    /// A theme with nothing set: everything renders plain.
    pub fn empty() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// Set an element.
    #[must_use]
    pub fn with(mut self, key: StyleKey, style: Style) -> Self {
        self.set(key, style);
        self
    }

    /// Set an element in place.
    pub fn set(&mut self, key: StyleKey, style: Style) {
        self.elements.insert(key, style);
    }

    /// Unset an element so it falls back again.
    pub fn unset(&mut self, key: StyleKey) {
        self.elements.remove(&key);
    }

    /// Resolve an element through its fallback chain.
    pub fn get(&self, key: StyleKey) -> Style {
        let mut key = Some(key);
        while let Some(k) = key {
            if let Some(style) = self.elements.get(&k) {
                return *style;
            }
            key = k.fallback();
        }
        Style::PLAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain() {
        let theme = Theme::default();
        assert_eq!(theme.get(StyleKey::ButtonTextFocused), Style::fg(Color::Cyan));
        assert_eq!(theme.get(StyleKey::EntryPadding), Style::fg(Color::Cyan));
        assert_eq!(theme.get(StyleKey::FrameBorderFocused), Style::fg(Color::Cyan));
        assert_eq!(theme.get(StyleKey::LabelText), Style::PLAIN);
    }

    #[test]
    fn test_specific_overrides_general() {
        let theme = Theme::default().with(StyleKey::ButtonTextFocused, Style::fg(Color::Yellow));
        assert_eq!(theme.get(StyleKey::ButtonTextFocused), Style::fg(Color::Yellow));
        assert_eq!(theme.get(StyleKey::EntryTextFocused), Style::fg(Color::Cyan));
    }

    #[test]
    fn test_unset_restores_fallback() {
        let mut theme = Theme::default();
        theme.set(StyleKey::FrameTitle, Style::fg(Color::Red));
        theme.unset(StyleKey::FrameTitle);
        assert_eq!(theme.get(StyleKey::FrameTitle), Style::PLAIN);
    }

    #[test]
    fn test_empty_theme_is_plain() {
        assert_eq!(Theme::empty().get(StyleKey::TextFocused), Style::PLAIN);
    }
}
