use std::collections::{BTreeMap, BTreeSet};

use crate::form::controls::ControlSet;
use crate::schema::schema_model::{MessageType, Screen, ValidationMessage};

/// Where an inline message sits: after the control, or after the label for
/// checkbox/radio groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAnchor {
    Control,
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineMessage {
    pub anchor: MessageAnchor,
    pub message_type: MessageType,
    pub text: String,
}

/// Classes and generated messages of one field's control group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlGroupState {
    pub classes: BTreeSet<MessageType>,
    pub messages: Vec<InlineMessage>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldFeedback {
    groups: BTreeMap<String, ControlGroupState>,
}

impl FieldFeedback {
    /// Drop every generated message and error/warning class.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, name: &str) -> Option<&ControlGroupState> {
        self.groups.get(name)
    }

    pub fn has_class(&self, name: &str, message_type: MessageType) -> bool {
        self.group(name).is_some_and(|g| g.classes.contains(&message_type))
    }

    pub fn messages(&self, name: &str) -> &[InlineMessage] {
        self.group(name).map(|g| g.messages.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ControlGroupState)> {
        self.groups.iter()
    }

    /// Put each item on the control group of the control it names.
    ///
    /// Items naming no control are dropped. Returns how many were placed.
    pub fn apply(&mut self, items: &[ValidationMessage], controls: &ControlSet) -> usize {
        let mut applied = 0;
        for item in items {
            let Some(name) = item.property_name.as_deref() else {
                continue;
            };
            let Some(control) = controls.first_named(name) else {
                log::debug!("Validation message for unknown field '{}'", name);
                continue;
            };
            let anchor = if control.kind.is_choice() {
                MessageAnchor::Label
            } else {
                MessageAnchor::Control
            };
            self.add(name, anchor, item);
            applied += 1;
        }
        applied
    }

    /// Show messages that came back attached to fields on load.
    pub fn seed_from_fields(&mut self, screen: &Screen, controls: &ControlSet) {
        for field in screen.sections.iter().flat_map(|s| s.fields.iter()) {
            if field.messages.is_empty() {
                continue;
            }
            let items: Vec<ValidationMessage> = field
                .messages
                .iter()
                .map(|m| ValidationMessage {
                    property_name: Some(field.name.clone()),
                    ..m.clone()
                })
                .collect();
            self.apply(&items, controls);
        }
    }

    fn add(&mut self, name: &str, anchor: MessageAnchor, item: &ValidationMessage) {
        let group = self.groups.entry(name.to_string()).or_default();
        group.classes.insert(item.message_type);
        group.messages.push(InlineMessage {
            anchor,
            message_type: item.message_type,
            text: item.message.clone(),
        });
    }
}
