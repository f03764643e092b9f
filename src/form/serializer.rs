use crate::form::controls::{ControlKind, ControlSet, FileUpload};
use crate::form::visibility::Visibility;

// ============================================================================
// Multipart payload built from the visible, enabled controls
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

impl PayloadPart {
    pub fn name(&self) -> &str {
        match self {
            PayloadPart::Text { name, .. } | PayloadPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    pub parts: Vec<PayloadPart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: &str, value: &str) {
        self.parts.push(PayloadPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn append_file(&mut self, name: &str, file: FileUpload) {
        self.parts.push(PayloadPart::File {
            name: name.to_string(),
            file,
        });
    }

    /// Text values appended under `name`, in order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                PayloadPart::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|p| p.name() == name).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Set `required` on declared-required controls of visible sections and
/// strip it from everything hidden, so hidden fields never block a submit.
pub fn mark_required(controls: &mut ControlSet, visibility: &Visibility) {
    for control in controls.iter_mut() {
        control.required = control.declared_required && visibility.is_visible(&control.section_id);
    }
}

/// Walk the visible, enabled controls and build the submission payload.
pub fn serialize(controls: &ControlSet, visibility: &Visibility) -> MultipartPayload {
    let mut payload = MultipartPayload::new();

    for control in controls.iter() {
        if control.name.is_empty() {
            continue;
        }
        if control.disabled || !visibility.is_visible(&control.section_id) {
            continue;
        }

        match control.kind {
            ControlKind::File => {
                for file in &control.files {
                    payload.append_file(&control.name, file.clone());
                }
            }
            ControlKind::Checkbox | ControlKind::Radio => {
                if control.checked {
                    if let Some(value) = &control.value {
                        payload.append_text(&control.name, value);
                    }
                }
            }
            ControlKind::SelectMultiple => {
                if control.selected.is_empty() {
                    payload.append_text(&control.name, "");
                }
                for value in &control.selected {
                    payload.append_text(&control.name, value);
                }
            }
            ControlKind::Text | ControlKind::Textarea | ControlKind::SelectOne => {
                payload.append_text(&control.name, control.value.as_deref().unwrap_or(""));
            }
        }
    }

    payload
}

/// Required-marking followed by serialization, as done right before a submit.
pub fn prepare_submission(controls: &mut ControlSet, visibility: &Visibility) -> MultipartPayload {
    mark_required(controls, visibility);
    serialize(controls, visibility)
}
