use form_wizard::schema::schema_model::{
    Button, ButtonType, Field, FieldOption, FieldType, Form, FormValue, Grouping, Screen,
    ScreenType, Section, Task, ValidationMessage, MessageType,
};

pub const ACTION: &str = "/form/order/42";
pub const STEP_1: &str = "/form/order/42/step/1";
pub const STEP_2: &str = "/form/order/42/step/2";
pub const ATTACHMENT: &str = "/form/order/42/attachment";

pub fn field(name: &str, field_type: FieldType) -> Field {
    Field {
        name: name.to_string(),
        field_type,
        label: Some(name.to_string()),
        ..Field::default()
    }
}

pub fn required(mut field: Field) -> Field {
    field.required = true;
    field
}

pub fn with_options(mut field: Field, values: &[&str]) -> Field {
    field.options = values
        .iter()
        .map(|v| FieldOption {
            label: None,
            value: v.to_string(),
        })
        .collect();
    field
}

pub fn section(section_id: &str, fields: Vec<Field>) -> Section {
    Section {
        section_id: section_id.to_string(),
        title: Some(section_id.to_string()),
        fields,
        ..Section::default()
    }
}

pub fn grouping(grouping_id: &str, ordinal: usize, section_ids: &[&str], buttons: Vec<Button>) -> Grouping {
    Grouping {
        grouping_id: grouping_id.to_string(),
        ordinal,
        section_ids: section_ids.iter().map(|s| s.to_string()).collect(),
        buttons,
        ..Grouping::default()
    }
}

pub fn button(button_id: &str, label: &str, value: &str) -> Button {
    Button {
        button_id: button_id.to_string(),
        label: Some(label.to_string()),
        value: Some(value.to_string()),
        ..Button::default()
    }
}

pub fn link_button(button_id: &str, label: &str, link: &str) -> Button {
    Button {
        button_id: button_id.to_string(),
        button_type: ButtonType::ButtonLink,
        label: Some(label.to_string()),
        value: Some(link.to_string()),
        link: Some(link.to_string()),
        alt: None,
    }
}

pub fn message(property_name: &str, message_type: MessageType, text: &str) -> ValidationMessage {
    ValidationMessage {
        property_name: Some(property_name.to_string()),
        message_type,
        message: text.to_string(),
    }
}

pub fn form_value(name: &str, values: &[&str]) -> FormValue {
    FormValue {
        name: name.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
        ..FormValue::default()
    }
}

/// Two steps: `s1` (email, newsletter) then `s2` (color, notes, photo, tags, phone).
pub fn wizard_screen() -> Screen {
    Screen {
        screen_type: ScreenType::Wizard,
        groupings: Some(vec![
            grouping("g1", 1, &["s1"], vec![button("nextButton", "Next", "next")]),
            grouping(
                "g2",
                2,
                &["s2"],
                vec![
                    button("prevButton", "Back", "prev"),
                    button("submitButton", "Submit", "submit"),
                ],
            ),
        ]),
        sections: vec![
            section(
                "s1",
                vec![
                    required(field("email", FieldType::Text)),
                    field("newsletter", FieldType::Checkbox),
                ],
            ),
            section(
                "s2",
                vec![
                    with_options(field("color", FieldType::Radio), &["red", "blue"]),
                    field("notes", FieldType::Textarea),
                    field("photo", FieldType::File),
                    with_options(field("tags", FieldType::SelectMultiple), &["a", "b"]),
                    required(field("phone", FieldType::Text)),
                ],
            ),
        ],
    }
}

pub fn wizard_form() -> Form {
    Form {
        screen: Some(wizard_screen()),
        action: Some(ACTION.to_string()),
        link: "/form/order".to_string(),
        form_instance_id: Some("42".to_string()),
        grouping_index: Some(0),
        attachment: Some(ATTACHMENT.to_string()),
        ..Form::default()
    }
}

/// One section, no groupings.
pub fn single_form() -> Form {
    Form {
        screen: Some(Screen {
            screen_type: ScreenType::Single,
            groupings: None,
            sections: vec![section("main", vec![required(field("name", FieldType::Text))])],
        }),
        action: Some("/form/simple".to_string()),
        link: "/form/simple".to_string(),
        ..Form::default()
    }
}

pub fn suspended_form() -> Form {
    Form {
        task: Some(Task {
            active: false,
            task_instance_id: Some("t-1".to_string()),
        }),
        ..wizard_form()
    }
}
