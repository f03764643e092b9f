use crate::form::controls::{Control, ControlKind};
use crate::view::form_view::StepView;
use crate::wizard::wizard_model::BreadcrumbState;

// ============================================================================
// Console projection of a step
// ============================================================================

/// Format the current step for terminal output.
///
/// Produces output like:
/// ```text
/// === Step 1 of 2 ===
/// [> Applicant] > Details
///
/// -- applicant --
///   Email* : jane@example.com
///     ! error: Invalid
///
/// Buttons: [next] Next -> /form/42/step/2
/// ```
pub fn format_step_console(step: &StepView) -> String {
    let mut out = String::new();

    let total = step.breadcrumbs.len().max(1);
    out.push_str(&format!(
        "=== Step {} of {} ===\n",
        step.grouping_index + 1,
        total
    ));

    if !step.breadcrumbs.is_empty() {
        let trail: Vec<String> = step
            .breadcrumbs
            .iter()
            .map(|b| match b.state {
                BreadcrumbState::Current => format!("[> {}]", b.label),
                BreadcrumbState::Link => b.label.clone(),
                BreadcrumbState::Inactive => format!("({})", b.label),
            })
            .collect();
        out.push_str(&trail.join(" > "));
        out.push('\n');
    }

    if let Some(alert) = &step.alert {
        out.push_str(&format!("[ALERT] {}\n", alert));
    }
    if let Some(notification) = &step.notification {
        out.push_str(&format!(
            "[NOTICE] {}: {}\n",
            notification.title, notification.message
        ));
    }

    for section in step.sections.iter().filter(|s| s.visible) {
        out.push_str(&format!(
            "\n-- {} --\n",
            section.title.as_deref().unwrap_or(&section.section_id)
        ));
        for field in &section.fields {
            if field.controls.is_empty() {
                continue;
            }
            let label = field.field.label.as_deref().unwrap_or(&field.field.name);
            let marker = if field.controls.iter().any(|c| c.required) {
                "*"
            } else {
                ""
            };
            out.push_str(&format!(
                "  {}{} : {}\n",
                label,
                marker,
                describe_controls(&field.controls)
            ));
            for message in step.feedback.messages(&field.field.name) {
                out.push_str(&format!(
                    "    ! {}: {}\n",
                    message.message_type.class_name(),
                    message.text
                ));
            }
        }
    }

    if let Some(buttons) = &step.buttons {
        let rendered: Vec<String> = buttons
            .buttons()
            .iter()
            .map(|b| {
                let label = b.label.as_deref().or(b.alt.as_deref()).unwrap_or("Submit");
                match b.value.as_deref() {
                    Some(v) if !v.is_empty() => format!("[{}] {} -> {}", b.button_id, label, v),
                    _ => format!("[{}] {}", b.button_id, label),
                }
            })
            .collect();
        out.push_str(&format!("\nButtons: {}\n", rendered.join("  ")));
    }

    out
}

fn describe_controls(controls: &[Control]) -> String {
    let first = &controls[0];
    match first.kind {
        ControlKind::Checkbox | ControlKind::Radio => controls
            .iter()
            .map(|c| {
                format!(
                    "({}) {}",
                    if c.checked { "x" } else { " " },
                    c.label.as_deref().or(c.value.as_deref()).unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join(" "),
        ControlKind::SelectMultiple => first.selected.join(", "),
        ControlKind::File => {
            let names: Vec<&str> = first.files.iter().map(|f| f.file_name.as_str()).collect();
            if names.is_empty() {
                "(no file)".to_string()
            } else {
                names.join(", ")
            }
        }
        _ => controls
            .iter()
            .map(|c| c.value.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
