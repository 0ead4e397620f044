//! Primitive-selection rules
//!
//! Maps an observed DOM element to the field type and interaction the
//! discovery agent should record. Execution never calls this: the
//! structure stores the decision explicitly and replay dispatches on it.
//!
//! Group detection (e.g. a month/day/year triple of number inputs) is a
//! layout judgement that belongs to the external driver; each member of
//! a group still classifies individually through these rules.

use crate::browser::InputInfo;
use crate::wizard::{FieldType, Interaction};

/// Observed properties of a single element.
#[derive(Debug, Clone, Default)]
pub struct ElementProbe {
    /// Lowercase tag name ("input", "select", "textarea").
    pub tag: String,
    /// The `type` attribute for inputs.
    pub input_type: Option<String>,
    pub id: Option<String>,
    pub class_attr: Option<String>,
    /// Computed visibility.
    pub visible: bool,
}

impl From<&InputInfo> for ElementProbe {
    fn from(info: &InputInfo) -> Self {
        Self {
            tag: "input".to_string(),
            input_type: Some(info.input_type.clone()),
            id: info.id.clone(),
            class_attr: info.class_attr.clone(),
            visible: info.visible,
        }
    }
}

/// Decide field type and interaction for one element.
#[must_use]
pub fn classify(probe: &ElementProbe) -> (FieldType, Interaction) {
    if probe.tag == "select" {
        return (FieldType::Select, Interaction::Select);
    }
    if probe.tag == "textarea" {
        return (FieldType::Text, Interaction::Fill);
    }

    let input_type = probe.input_type.as_deref().unwrap_or("text");

    if input_type == "search" || is_typeahead_marker(probe) {
        return (FieldType::Typeahead, Interaction::FillEnter);
    }

    match input_type {
        "number" => (FieldType::Number, Interaction::Fill),
        "radio" => (
            FieldType::Radio,
            if probe.visible {
                Interaction::Click
            } else {
                Interaction::JavascriptClick
            },
        ),
        "checkbox" => (
            FieldType::Checkbox,
            if probe.visible {
                Interaction::Click
            } else {
                Interaction::JavascriptClick
            },
        ),
        // text, email, tel, and anything unrecognized
        _ => (FieldType::Text, Interaction::Fill),
    }
}

fn is_typeahead_marker(probe: &ElementProbe) -> bool {
    let marker = |s: &Option<String>| {
        s.as_deref().is_some_and(|v| {
            let v = v.to_ascii_lowercase();
            v.contains("typeahead") || v.contains("autocomplete")
        })
    };
    marker(&probe.id) || marker(&probe.class_attr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(input_type: &str, visible: bool) -> ElementProbe {
        ElementProbe {
            tag: "input".to_string(),
            input_type: Some(input_type.to_string()),
            visible,
            ..Default::default()
        }
    }

    #[test]
    fn number_inputs_fill() {
        assert_eq!(
            classify(&input("number", true)),
            (FieldType::Number, Interaction::Fill)
        );
    }

    #[test]
    fn search_inputs_fill_enter() {
        assert_eq!(
            classify(&input("search", true)),
            (FieldType::Typeahead, Interaction::FillEnter)
        );
    }

    #[test]
    fn typeahead_class_fill_enter() {
        let probe = ElementProbe {
            tag: "input".to_string(),
            input_type: Some("text".to_string()),
            class_attr: Some("rbt-input-main Typeahead-input".to_string()),
            visible: true,
            ..Default::default()
        };
        assert_eq!(classify(&probe), (FieldType::Typeahead, Interaction::FillEnter));
    }

    #[test]
    fn hidden_radio_javascript_click() {
        assert_eq!(
            classify(&input("radio", false)),
            (FieldType::Radio, Interaction::JavascriptClick)
        );
        assert_eq!(
            classify(&input("radio", true)),
            (FieldType::Radio, Interaction::Click)
        );
    }

    #[test]
    fn selects_select() {
        let probe = ElementProbe {
            tag: "select".to_string(),
            visible: true,
            ..Default::default()
        };
        assert_eq!(classify(&probe), (FieldType::Select, Interaction::Select));
    }

    #[test]
    fn plain_text_falls_back_to_fill() {
        assert_eq!(
            classify(&input("email", true)),
            (FieldType::Text, Interaction::Fill)
        );
        assert_eq!(
            classify(&input("tel", true)),
            (FieldType::Text, Interaction::Fill)
        );
    }
}
