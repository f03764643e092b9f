use serde::{Deserialize, Serialize};

// ============================================================================
// Form schema as served by the REST API
// ============================================================================

/// A form instance: the screen schema plus everything the page session owns.
///
/// Fetched once when the form route activates; `grouping_index` moves as the
/// user walks the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default)]
    pub screen: Option<Screen>,
    #[serde(default)]
    pub form_data: Vec<FormValue>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub form_instance_id: Option<String>,
    #[serde(default)]
    pub grouping_index: Option<usize>,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub task: Option<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenType {
    Wizard,
    #[default]
    Single,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    #[serde(rename = "type", default)]
    pub screen_type: ScreenType,
    #[serde(default)]
    pub groupings: Option<Vec<Grouping>>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One wizard step: the sections it shows and the buttons it offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    #[serde(default)]
    pub grouping_id: String,
    #[serde(default)]
    pub ordinal: usize,
    #[serde(default)]
    pub section_ids: Vec<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
    /// Breadcrumb label
    #[serde(default)]
    pub breadcrumb: Option<String>,
    #[serde(default)]
    pub breadcrumb_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub section_id: String,
    #[serde(default)]
    pub tag_id: Option<String>,
    #[serde(rename = "type", default)]
    pub section_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ordinal: usize,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl Section {
    /// Element id the section renders under: the tag id when present.
    pub fn view_id(&self) -> &str {
        self.tag_id.as_deref().unwrap_or(&self.section_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Checkbox,
    SelectOne,
    SelectMultiple,
    Radio,
    Textarea,
    Html,
    File,
    #[default]
    #[serde(other)]
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub accept: Option<String>,
    #[serde(default)]
    pub messages: Vec<ValidationMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub label: Option<String>,
    pub value: String,
}

/// A previously submitted value for a named field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormValue {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub messages: Vec<ValidationMessage>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub accept: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonType {
    #[default]
    Button,
    ButtonLink,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    #[serde(default)]
    pub button_id: String,
    #[serde(rename = "type", default)]
    pub button_type: ButtonType,
    #[serde(default)]
    pub label: Option<String>,
    /// `next`, `prev`, a terminal action, or a literal target link
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Error,
    Warning,
}

impl MessageType {
    /// CSS class added to the enclosing control group.
    pub fn class_name(&self) -> &'static str {
        match self {
            MessageType::Error => "error",
            MessageType::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessage {
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub task_instance_id: Option<String>,
}

fn default_true() -> bool { true }

// ============================================================================
// Process and attachment listings
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    #[serde(default)]
    pub process_definition_key: String,
    #[serde(default)]
    pub process_definition_label: Option<String>,
    #[serde(default)]
    pub ordinal: usize,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
