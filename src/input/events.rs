use serde::{Deserialize, Serialize};

/// Events an input surface delivers to the view model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The filter field changed; sent on every keystroke
    FilterInput { text: String },
    /// A marker was clicked
    MarkerClicked { index: usize },
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_from_json() {
        let event: UiEvent = serde_json::from_str(r#"{"type":"marker_clicked","index":2}"#).unwrap();
        assert_eq!(event, UiEvent::MarkerClicked { index: 2 });

        let event: UiEvent =
            serde_json::from_str(r#"{"type":"filter_input","text":"steen"}"#).unwrap();
        assert_eq!(
            event,
            UiEvent::FilterInput {
                text: "steen".to_string()
            }
        );
    }
}
