use serde::Deserialize;

use crate::schema::schema_model::ValidationMessage;

/// How the form reacts to a validation (or upload) response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseAction {
    /// 204: the step is valid
    Valid,
    /// 400 with structured items: surface inline, wait for a resubmit
    Invalid(Vec<ValidationMessage>),
    /// Anything else: generic alert, no local recovery
    Failure { status: u16 },
}

#[derive(Debug, Deserialize)]
struct ValidationErrors {
    #[serde(default)]
    items: Option<Vec<ValidationMessage>>,
}

pub fn handle_response(status: u16, body: &str) -> ResponseAction {
    match status {
        204 => ResponseAction::Valid,
        400 => parse_errors(body).unwrap_or(ResponseAction::Failure { status }),
        _ => ResponseAction::Failure { status },
    }
}

/// Final submissions answer with a page or a redirect rather than 204.
pub fn classify_submission(status: u16, body: &str) -> ResponseAction {
    match status {
        200..=399 => ResponseAction::Valid,
        400 => parse_errors(body).unwrap_or(ResponseAction::Failure { status }),
        _ => ResponseAction::Failure { status },
    }
}

fn parse_errors(body: &str) -> Option<ResponseAction> {
    match serde_json::from_str::<ValidationErrors>(body) {
        Ok(errors) => Some(ResponseAction::Invalid(errors.items.unwrap_or_default())),
        Err(e) => {
            log::warn!("Unreadable validation response: {}", e);
            None
        }
    }
}
