use crate::error::FormError;
use crate::form::merge::index_form_data;
use crate::schema::schema_model::{FieldType, FormValue, Screen};

// ============================================================================
// Control view-model: the inputs a rendered form would hold
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Textarea,
    SelectOne,
    SelectMultiple,
    Checkbox,
    Radio,
    File,
}

impl ControlKind {
    pub fn is_choice(&self) -> bool {
        matches!(self, ControlKind::Checkbox | ControlKind::Radio)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// What a file control shows for a file that was already uploaded.
#[derive(Debug, Clone, PartialEq)]
pub enum FilePreview {
    Image { src: String, alt: String },
    Link { href: String, text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub name: String,
    pub kind: ControlKind,
    pub section_id: String,
    pub label: Option<String>,
    /// Current value; for checkbox/radio, the value submitted when checked.
    pub value: Option<String>,
    pub checked: bool,
    /// Selected values of a select-multiple.
    pub selected: Vec<String>,
    pub files: Vec<FileUpload>,
    pub preview: Option<FilePreview>,
    /// Declared by the schema (the `required` class).
    pub declared_required: bool,
    /// Rendered `required` / `aria-required` attributes.
    pub required: bool,
    pub disabled: bool,
}

impl Control {
    fn new(name: &str, kind: ControlKind, section_id: &str) -> Self {
        Control {
            name: name.to_string(),
            kind,
            section_id: section_id.to_string(),
            label: None,
            value: None,
            checked: false,
            selected: vec![],
            files: vec![],
            preview: None,
            declared_required: false,
            required: false,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSet {
    controls: Vec<Control>,
}

/// Build one control per input field, in schema order.
///
/// Checkbox and radio fields with options expand to one control per option;
/// `html` fields carry no input.
pub fn build_controls(screen: &Screen) -> ControlSet {
    let mut controls = Vec::new();

    for section in &screen.sections {
        for field in &section.fields {
            let kind = match field.field_type {
                FieldType::Html => continue,
                FieldType::Checkbox => ControlKind::Checkbox,
                FieldType::Radio => ControlKind::Radio,
                FieldType::SelectOne => ControlKind::SelectOne,
                FieldType::SelectMultiple => ControlKind::SelectMultiple,
                FieldType::Textarea => ControlKind::Textarea,
                FieldType::File => ControlKind::File,
                FieldType::Text => ControlKind::Text,
            };

            let mut base = Control::new(&field.name, kind, &section.section_id);
            base.label = field.label.clone();
            base.declared_required = field.required;

            if kind.is_choice() {
                if field.options.is_empty() {
                    base.value = Some("true".to_string());
                    base.checked = field.value.as_deref() == Some("true");
                    controls.push(base);
                } else {
                    for option in &field.options {
                        let mut control = base.clone();
                        control.label = option.label.clone().or_else(|| Some(option.value.clone()));
                        control.checked = field.value.as_deref() == Some(option.value.as_str());
                        control.value = Some(option.value.clone());
                        controls.push(control);
                    }
                }
                continue;
            }

            match kind {
                ControlKind::SelectMultiple => {
                    base.selected = field.value.iter().cloned().collect();
                }
                ControlKind::File => {}
                _ => base.value = field.value.clone(),
            }
            controls.push(base);
        }
    }

    ControlSet { controls }
}

impl ControlSet {
    pub fn new(controls: Vec<Control>) -> Self {
        ControlSet { controls }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.controls.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Control> + 'a {
        self.controls.iter().filter(move |c| c.name == name)
    }

    pub fn first_named(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name == name)
    }

    pub fn in_section<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Control> + 'a {
        self.controls.iter().filter(move |c| c.section_id == section_id)
    }

    /// Type into a text-like control, or pick the option of a select-one.
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| unknown_control(name))?;

        match control.kind {
            ControlKind::Text | ControlKind::Textarea | ControlKind::SelectOne => {
                control.value = Some(value.to_string());
                Ok(())
            }
            ControlKind::SelectMultiple => {
                if !control.selected.iter().any(|s| s == value) {
                    control.selected.push(value.to_string());
                }
                Ok(())
            }
            ControlKind::Checkbox | ControlKind::Radio => Err(FormError::InvalidAssignment {
                name: name.to_string(),
                reason: "choice controls are checked, not typed into".to_string(),
            }),
            ControlKind::File => Err(FormError::InvalidAssignment {
                name: name.to_string(),
                reason: "file controls take attached files".to_string(),
            }),
        }
    }

    /// Check the checkbox/radio of `name` whose value is `value`.
    ///
    /// Checking a radio unchecks its siblings.
    pub fn check(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let kind = self
            .controls
            .iter()
            .find(|c| c.name == name && c.kind.is_choice() && c.value.as_deref() == Some(value))
            .map(|c| c.kind)
            .ok_or_else(|| FormError::InvalidAssignment {
                name: name.to_string(),
                reason: format!("no checkbox or radio with value '{}'", value),
            })?;

        for control in self.controls.iter_mut().filter(|c| c.name == name) {
            if control.value.as_deref() == Some(value) {
                control.checked = true;
            } else if kind == ControlKind::Radio {
                control.checked = false;
            }
        }
        Ok(())
    }

    pub fn uncheck(&mut self, name: &str, value: &str) {
        for control in self
            .controls
            .iter_mut()
            .filter(|c| c.name == name && c.value.as_deref() == Some(value))
        {
            control.checked = false;
        }
    }

    pub fn attach_file(&mut self, name: &str, file: FileUpload) -> Result<(), FormError> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.name == name && c.kind == ControlKind::File)
            .ok_or_else(|| FormError::InvalidAssignment {
                name: name.to_string(),
                reason: "no file control with this name".to_string(),
            })?;
        control.files.push(file);
        Ok(())
    }

    pub fn disable_all(&mut self) {
        for control in self.controls.iter_mut() {
            control.disabled = true;
        }
    }

    /// Show previously submitted values on the controls.
    pub fn restore_values(&mut self, form_data: &[FormValue]) {
        for (name, form_value) in index_form_data(form_data) {
            if name.is_empty() || form_value.values.is_empty() {
                continue;
            }
            self.restore_one(form_value);
        }
    }

    fn restore_one(&mut self, form_value: &FormValue) {
        let values = &form_value.values;
        let Some(kind) = self.first_named(&form_value.name).map(|c| c.kind) else {
            log::debug!("No control for submitted value '{}'", form_value.name);
            return;
        };

        match kind {
            ControlKind::File => {
                let preview = match form_value.link.clone() {
                    Some(href) if is_image(form_value.accept.as_deref()) => FilePreview::Image {
                        src: href,
                        alt: values[0].clone(),
                    },
                    Some(href) => FilePreview::Link {
                        href,
                        text: values[0].clone(),
                    },
                    None => return,
                };
                for control in self.controls.iter_mut().filter(|c| c.name == form_value.name) {
                    control.preview = Some(preview.clone());
                }
            }
            ControlKind::Checkbox | ControlKind::Radio => {
                for control in self.controls.iter_mut().filter(|c| c.name == form_value.name) {
                    control.checked = control
                        .value
                        .as_ref()
                        .is_some_and(|v| values.contains(v));
                }
            }
            ControlKind::SelectMultiple => {
                for control in self.controls.iter_mut().filter(|c| c.name == form_value.name) {
                    control.selected = values.clone();
                }
            }
            ControlKind::Text => {
                // Extra values get their own copy of the last text control.
                let Some(last) = self.controls.iter().rposition(|c| c.name == form_value.name) else {
                    return;
                };
                let existing: Vec<usize> = self
                    .controls
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.name == form_value.name)
                    .map(|(i, _)| i)
                    .collect();

                let mut insert_at = last + 1;
                for (n, value) in values.iter().enumerate() {
                    match existing.get(n) {
                        Some(&idx) => self.controls[idx].value = Some(value.clone()),
                        None => {
                            let mut clone = self.controls[last].clone();
                            clone.value = Some(value.clone());
                            self.controls.insert(insert_at, clone);
                            insert_at += 1;
                        }
                    }
                }
            }
            ControlKind::Textarea | ControlKind::SelectOne => {
                for control in self.controls.iter_mut().filter(|c| c.name == form_value.name) {
                    control.value = Some(values[0].clone());
                }
            }
        }
    }
}

fn is_image(accept: Option<&str>) -> bool {
    accept.is_some_and(|a| a.contains("image/"))
}

fn unknown_control(name: &str) -> FormError {
    FormError::InvalidAssignment {
        name: name.to_string(),
        reason: "no control with this name".to_string(),
    }
}
