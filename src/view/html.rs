use crate::form::controls::{Control, ControlKind, FilePreview};
use crate::schema::schema_model::{ButtonType, FieldType};
use crate::validation::feedback::{ControlGroupState, MessageAnchor};
use crate::view::form_view::{FieldView, SectionView, StepView};
use crate::wizard::wizard_model::BreadcrumbState;

// ============================================================================
// HTML projection of a step
// ============================================================================

/// Render the step as a `<form>` fragment.
///
/// Markup is derived from the view-model only:
/// - hidden sections carry the `hide` class, visible ones `selected`
/// - control groups carry `error` / `warning` from validation feedback
/// - generated inline messages are `span.help-inline.generated`
/// - the button bar sits in the footer of the last visible section
pub fn render_step_html(step: &StepView) -> String {
    let mut out = String::new();

    let form_attrs = match &step.action {
        Some(action) => format!(
            r#" action="{}.html" method="POST" enctype="multipart/form-data""#,
            escape_html(action)
        ),
        None => String::new(),
    };
    out.push_str(&format!(
        "<form id=\"main-form\"{} novalidate=\"novalidate\">\n",
        form_attrs
    ));

    if let Some(alert) = &step.alert {
        out.push_str(&format!(
            "<div class=\"alert alert-error\">{}</div>\n",
            escape_html(alert)
        ));
    }

    if let Some(notification) = &step.notification {
        out.push_str(&format!(
            "<div class=\"notifications\"><div class=\"alert alert-info\"><h4>{}</h4><p>{}</p></div></div>\n",
            escape_html(&notification.title),
            escape_html(&notification.message)
        ));
    }

    if !step.breadcrumbs.is_empty() {
        out.push_str("<ul class=\"breadcrumb\">\n");
        for item in &step.breadcrumbs {
            let label = escape_html(&item.label);
            let body = match item.state {
                BreadcrumbState::Current => format!("<span class=\"active\">{}</span>", label),
                BreadcrumbState::Link => {
                    format!("<a href=\"{}\">{}</a>", escape_html(&item.link), label)
                }
                BreadcrumbState::Inactive => {
                    format!("<span class=\"inactive-text\">{}</span>", label)
                }
            };
            out.push_str(&format!("<li>{}</li>\n", body));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("<ul class=\"sections\">\n");
    for section in &step.sections {
        render_section(&mut out, section, step);
    }
    out.push_str("</ul>\n</form>\n");
    out
}

fn render_section(out: &mut String, section: &SectionView, step: &StepView) {
    let class = if section.visible {
        "section selected"
    } else {
        "section hide"
    };
    out.push_str(&format!(
        "<li class=\"{}\" id=\"{}\">\n",
        class,
        escape_html(&section.view_id)
    ));
    if let Some(title) = &section.title {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(title)));
    }

    out.push_str("<div class=\"section-content\">\n");
    for field in &section.fields {
        render_field(out, field, step);
    }
    out.push_str("</div>\n");

    if let Some(buttons) = step
        .buttons
        .as_ref()
        .filter(|b| section.visible && b.bar.section_id == section.section_id)
    {
        out.push_str("<div class=\"section-footer\"><ul class=\"section-buttons\">\n");
        for button in buttons.buttons() {
            let label = escape_html(button.label.as_deref().or(button.alt.as_deref()).unwrap_or("Submit"));
            let value = escape_html(button.value.as_deref().unwrap_or(""));
            match button.button_type {
                ButtonType::ButtonLink => out.push_str(&format!(
                    "<li><a class=\"btn\" id=\"{}\" href=\"{}\">{}</a></li>\n",
                    escape_html(&button.button_id),
                    escape_html(button.link.as_deref().unwrap_or("")),
                    label
                )),
                ButtonType::Button => out.push_str(&format!(
                    "<li><button class=\"btn btn-primary\" type=\"submit\" id=\"{}\" value=\"{}\"{}>{}</button></li>\n",
                    escape_html(&button.button_id),
                    value,
                    if buttons.is_validated(&button.button_id) { " data-validated=\"true\"" } else { "" },
                    label
                )),
            }
        }
        out.push_str("</ul></div>\n");
    }

    out.push_str("</li>\n");
}

fn render_field(out: &mut String, field: &FieldView, step: &StepView) {
    if field.field.field_type == FieldType::Html {
        // Trusted markup from the schema.
        out.push_str(&format!(
            "<div class=\"html\">{}</div>\n",
            field.field.value.as_deref().unwrap_or("")
        ));
        return;
    }

    let group = step.feedback.group(&field.field.name);
    let mut class = String::from("control-group");
    if let Some(group) = group {
        for c in &group.classes {
            class.push(' ');
            class.push_str(c.class_name());
        }
    }
    out.push_str(&format!("<div class=\"{}\">\n", class));

    let choice = field.controls.first().is_some_and(|c| c.kind.is_choice());
    if let Some(label) = &field.field.label {
        out.push_str(&format!(
            "<label class=\"control-label\">{}</label>\n",
            escape_html(label)
        ));
        if choice {
            push_messages(out, group, MessageAnchor::Label);
        }
    }

    for control in &field.controls {
        out.push_str(&render_control(control));
        out.push('\n');
    }
    push_messages(out, group, MessageAnchor::Control);
    if choice && field.field.label.is_none() {
        push_messages(out, group, MessageAnchor::Label);
    }

    out.push_str("</div>\n");
}

fn push_messages(out: &mut String, group: Option<&ControlGroupState>, anchor: MessageAnchor) {
    let Some(group) = group else { return };
    for message in group.messages.iter().filter(|m| m.anchor == anchor) {
        out.push_str(&format!(
            "<span class=\"help-inline generated\">{}</span>\n",
            escape_html(&message.text)
        ));
    }
}

fn render_control(control: &Control) -> String {
    let mut attrs = format!("name=\"{}\"", escape_html(&control.name));
    if control.declared_required {
        attrs.push_str(" class=\"required\"");
    }
    if control.required {
        attrs.push_str(" required aria-required=\"true\"");
    }
    if control.disabled {
        attrs.push_str(" disabled");
    }
    let value = escape_html(control.value.as_deref().unwrap_or(""));

    match control.kind {
        ControlKind::Text => format!("<input type=\"text\" {} value=\"{}\">", attrs, value),
        ControlKind::Textarea => format!("<textarea {}>{}</textarea>", attrs, value),
        ControlKind::SelectOne | ControlKind::SelectMultiple => {
            let multiple = if control.kind == ControlKind::SelectMultiple {
                " multiple"
            } else {
                ""
            };
            let selected: Vec<&str> = match control.kind {
                ControlKind::SelectMultiple => control.selected.iter().map(String::as_str).collect(),
                _ => control.value.iter().map(String::as_str).collect(),
            };
            let options: String = selected
                .iter()
                .map(|v| format!("<option value=\"{0}\" selected>{0}</option>", escape_html(v)))
                .collect();
            format!("<select {}{}>{}</select>", attrs, multiple, options)
        }
        ControlKind::Checkbox | ControlKind::Radio => {
            let input_type = if control.kind == ControlKind::Checkbox {
                "checkbox"
            } else {
                "radio"
            };
            format!(
                "<label class=\"{}\"><input type=\"{}\" {} value=\"{}\"{}> {}</label>",
                input_type,
                input_type,
                attrs,
                value,
                if control.checked { " checked" } else { "" },
                escape_html(control.label.as_deref().unwrap_or(""))
            )
        }
        ControlKind::File => {
            let preview = match &control.preview {
                Some(FilePreview::Image { src, alt }) => {
                    format!("<img src=\"{}\" alt=\"{}\"/>", escape_html(src), escape_html(alt))
                }
                Some(FilePreview::Link { href, text }) => format!(
                    "<div class=\"file\"><a href=\"{}\">{}</a></div>",
                    escape_html(href),
                    escape_html(text)
                ),
                None => String::new(),
            };
            format!("{}<input type=\"file\" {}>", preview, attrs)
        }
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
