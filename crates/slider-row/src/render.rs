use serde::{Deserialize, Serialize};

/// What the host should draw for a row.
/// TypeScript receives this as JSON and renders it to DOM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RowView {
    /// The entity does not exist (yet). Rendered as a warning banner.
    #[serde(rename = "entity_not_found")]
    EntityNotFound { message: String },

    /// Render nothing at all: a full-row entity that is off and hidden.
    #[serde(rename = "empty")]
    Empty,

    /// The row content. With `chrome` set, the host wraps it in the generic
    /// entity row (icon, name, more-info) together with the raw config.
    #[serde(rename = "row")]
    Row { chrome: bool, content: RowContent },
}

/// The inline controls, left to right: slider, toggle, state label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowContent {
    pub slider: Option<SliderView>,
    pub toggle: Option<ToggleView>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderView {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    /// Stretch to the available width instead of the capped inline width.
    pub full_width: bool,
    pub dir: Direction,
}

/// Slider direction, following the user's language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleView {
    pub on: bool,
}

impl RowView {
    pub fn entity_not_found(message: impl Into<String>) -> Self {
        Self::EntityNotFound {
            message: message.into(),
        }
    }

    pub fn row(chrome: bool, content: RowContent) -> Self {
        Self::Row { chrome, content }
    }

    /// The row content, if anything is rendered.
    pub fn content(&self) -> Option<&RowContent> {
        match self {
            Self::Row { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_serialization() {
        let view = RowView::entity_not_found("Entity not available: light.attic");
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""type":"entity_not_found""#));
        assert!(json.contains("light.attic"));
    }

    #[test]
    fn test_empty_serialization() {
        let json = serde_json::to_string(&RowView::Empty).unwrap();
        assert_eq!(json, r#"{"type":"empty"}"#);
    }

    #[test]
    fn test_row_serialization() {
        let view = RowView::row(
            true,
            RowContent {
                slider: Some(SliderView {
                    min: 0.0,
                    max: 255.0,
                    step: 1.0,
                    value: 128.0,
                    full_width: false,
                    dir: Direction::Rtl,
                }),
                toggle: None,
                state: Some("50 %".into()),
            },
        );
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(r#""type":"row""#));
        assert!(json.contains(r#""chrome":true"#));
        assert!(json.contains(r#""max":255.0"#));
        assert!(json.contains(r#""toggle":null"#));
        assert!(json.contains(r#""dir":"rtl""#));
        assert!(json.contains("50 %"));
    }

    #[test]
    fn test_row_roundtrip() {
        let view = RowView::row(
            false,
            RowContent {
                slider: None,
                toggle: Some(ToggleView { on: true }),
                state: None,
            },
        );
        let json = serde_json::to_string(&view).unwrap();
        let back: RowView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
        assert_eq!(back.content().and_then(|c| c.toggle.clone()), Some(ToggleView { on: true }));
    }
}
