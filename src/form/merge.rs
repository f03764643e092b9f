use std::collections::HashMap;

use crate::schema::schema_model::{Field, FormValue, Screen};

/// Name → submitted value. Later entries with the same name win.
pub fn index_form_data(form_data: &[FormValue]) -> HashMap<&str, &FormValue> {
    form_data.iter().map(|v| (v.name.as_str(), v)).collect()
}

/// Attach previously returned validation messages to matching fields.
///
/// Only `messages` are carried over; submitted values are restored later on
/// the controls themselves (see `ControlSet::restore_values`).
pub fn merge_form_data(mut fields: Vec<Field>, form_data: &[FormValue]) -> Vec<Field> {
    let by_name = index_form_data(form_data);
    for field in fields.iter_mut() {
        if let Some(value) = by_name.get(field.name.as_str()) {
            field.messages = value.messages.clone();
        }
    }
    fields
}

pub fn merge_screen(screen: &mut Screen, form_data: &[FormValue]) {
    if form_data.is_empty() {
        return;
    }
    for section in screen.sections.iter_mut() {
        let fields = std::mem::take(&mut section.fields);
        section.fields = merge_form_data(fields, form_data);
    }
}
