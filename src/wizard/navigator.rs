use crate::form::visibility::Visibility;
use crate::schema::links::parent_link;
use crate::schema::schema_model::{Button, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    Submit,
    Reject,
    Approve,
}

impl TerminalAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submit" => Some(TerminalAction::Submit),
            "reject" => Some(TerminalAction::Reject),
            "approve" => Some(TerminalAction::Approve),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalAction::Submit => "submit",
            TerminalAction::Reject => "reject",
            TerminalAction::Approve => "approve",
        }
    }
}

/// Semantic meaning of a button's `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonValue {
    Next,
    Prev,
    Terminal(TerminalAction),
    Target(String),
}

impl ButtonValue {
    pub fn parse(value: &str) -> Self {
        match value {
            "next" => ButtonValue::Next,
            "prev" => ButtonValue::Prev,
            other => match TerminalAction::parse(other) {
                Some(action) => ButtonValue::Terminal(action),
                None => ButtonValue::Target(other.to_string()),
            },
        }
    }

    pub fn of(button: &Button) -> Self {
        button
            .value
            .as_deref()
            .map(ButtonValue::parse)
            .unwrap_or_else(|| ButtonValue::Target(String::new()))
    }
}

/// Where a button on step `grouping_index` leads.
///
/// `next` past the last step is the empty string; `prev` on the first step
/// goes one level up from the page link.
pub fn compute_next_target(
    screen: &Screen,
    page_link: &str,
    grouping_index: usize,
    value: &ButtonValue,
) -> String {
    let groupings = screen.groupings.as_deref().unwrap_or(&[]);

    match value {
        ButtonValue::Next => groupings
            .get(grouping_index + 1)
            .map(|g| g.breadcrumb_link.clone())
            .unwrap_or_default(),
        ButtonValue::Prev => {
            if grouping_index > 0 {
                groupings
                    .get(grouping_index - 1)
                    .map(|g| g.breadcrumb_link.clone())
                    .unwrap_or_default()
            } else {
                parent_link(page_link)
            }
        }
        ButtonValue::Terminal(action) => action.as_str().to_string(),
        ButtonValue::Target(target) => target.clone(),
    }
}

/// Rewrite `next`/`prev` buttons into concrete links for this step.
pub fn resolve_buttons(
    screen: &Screen,
    page_link: &str,
    grouping_index: usize,
    buttons: &[Button],
) -> Vec<Button> {
    buttons
        .iter()
        .map(|button| {
            let mut button = button.clone();
            let value = match button.value.as_deref() {
                Some(v) => ButtonValue::parse(v),
                None => return button,
            };
            let alt = match value {
                ButtonValue::Next => "Next",
                ButtonValue::Prev => "Previous",
                _ => return button,
            };
            let target = compute_next_target(screen, page_link, grouping_index, &value);
            button.value = Some(target.clone());
            button.link = Some(target);
            button.alt = Some(alt.to_string());
            button
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonBar {
    /// Section the bar renders in: the last visible one.
    pub section_id: String,
    pub buttons: Vec<Button>,
}

pub fn default_submit_button() -> Button {
    Button {
        button_id: "submitButton".to_string(),
        label: Some("Submit".to_string()),
        value: Some("submit".to_string()),
        ..Button::default()
    }
}

/// The button bar of the current step, attached to the last visible section.
///
/// Buttons come from the grouping, else from that section. Only a screen
/// without groupings falls back to a single submit button; a wizard step
/// with no buttons gets no bar.
pub fn button_bar(
    screen: &Screen,
    visibility: &Visibility,
    page_link: &str,
    grouping_index: usize,
) -> Option<ButtonBar> {
    let section_id = visibility.last_visible_section_id.clone()?;

    let section_buttons = screen
        .sections
        .iter()
        .find(|s| s.section_id == section_id)
        .map(|s| s.buttons.as_slice())
        .unwrap_or(&[]);

    let source = if !visibility.grouping.buttons.is_empty() {
        visibility.grouping.buttons.clone()
    } else if !section_buttons.is_empty() {
        section_buttons.to_vec()
    } else if visibility.show_all {
        vec![default_submit_button()]
    } else {
        return None;
    };

    Some(ButtonBar {
        section_id,
        buttons: resolve_buttons(screen, page_link, grouping_index, &source),
    })
}
