use std::path::Path;

use crate::cli::config::parse_assignment;
use crate::client::api::FormApi;
use crate::error::FormError;
use crate::form::controls::FileUpload;
use crate::session::form_session::{ActivateOutcome, FormSession};
use crate::trace::logger::TraceLogger;
use crate::view::console::format_step_console;
use crate::view::html::render_step_html;

// ============================================================================
// processes subcommand
// ============================================================================

pub fn cmd_processes<A: FormApi>(api: &A) -> Result<(), FormError> {
    let processes = api.list_processes()?;
    if processes.is_empty() {
        println!("No processes available");
        return Ok(());
    }

    for process in &processes {
        println!(
            "  [{}] {} ({}) -> {}",
            process.ordinal,
            process
                .process_definition_label
                .as_deref()
                .unwrap_or(&process.process_definition_key),
            process.process_definition_key,
            process.link.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

// ============================================================================
// show subcommand
// ============================================================================

pub fn cmd_show<A: FormApi>(
    api: A,
    form: &str,
    step: usize,
    format: &str,
    output: Option<&str>,
) -> Result<(), FormError> {
    let session = FormSession::open(api, form, Some(step))?;
    let step_view = session.step_view();

    let output_content = match format {
        "html" => render_step_html(&step_view),
        _ => format_step_console(&step_view),
    };

    match output {
        Some(path) => std::fs::write(path, &output_content).map_err(|source| FormError::Io {
            context: path.to_string(),
            source,
        })?,
        None => print!("{}", output_content),
    }
    Ok(())
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Values to put on the step before pressing the button.
#[derive(Debug, Default)]
pub struct SubmitInput {
    pub fields: Vec<String>,
    pub checks: Vec<String>,
    pub files: Vec<String>,
    pub button: Option<String>,
}

/// Fill the step and activate a button; returns whether it went through.
pub fn cmd_submit<A: FormApi>(
    api: A,
    form: &str,
    step: usize,
    input: &SubmitInput,
    tracer: TraceLogger,
) -> Result<bool, FormError> {
    let mut session = FormSession::open(api, form, Some(step))?.with_tracer(tracer);

    for arg in &input.fields {
        let (name, value) = parse_assignment(arg)?;
        session.set_value(&name, &value)?;
    }
    for arg in &input.checks {
        let (name, value) = parse_assignment(arg)?;
        session.check(&name, &value)?;
    }
    for arg in &input.files {
        let (name, path) = parse_assignment(arg)?;
        session.attach_file(&name, load_file(&path)?)?;
    }

    let outcome = session.activate(input.button.as_deref())?;
    print!("{}", format_outcome(&outcome, &session));
    Ok(!matches!(
        outcome,
        ActivateOutcome::Invalid(_) | ActivateOutcome::Failed { .. }
    ))
}

fn format_outcome<A: FormApi>(outcome: &ActivateOutcome, session: &FormSession<A>) -> String {
    match outcome {
        ActivateOutcome::Advanced { .. } => format_step_console(&session.step_view()),
        ActivateOutcome::Left { link } => format!("Continue at {}\n", link),
        ActivateOutcome::DeadEnd => "Step valid; no further step\n".to_string(),
        ActivateOutcome::Submitted { action } => format!("Form submitted ({})\n", action.as_str()),
        ActivateOutcome::Invalid(items) => {
            let mut out = format!("Step is invalid ({} messages)\n", items.len());
            for item in items {
                out.push_str(&format!(
                    "  {}: {}\n",
                    item.property_name.as_deref().unwrap_or("(form)"),
                    item.message
                ));
            }
            out
        }
        ActivateOutcome::Failed { reason } => format!("Failed: {}\n", reason),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Read a file for upload; the file name is the last path component.
pub fn load_file(path: &str) -> Result<FileUpload, FormError> {
    let bytes = std::fs::read(path).map_err(|source| FormError::Io {
        context: path.to_string(),
        source,
    })?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    Ok(FileUpload {
        file_name,
        content_type: None,
        bytes,
    })
}
