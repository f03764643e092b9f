use serde::Deserialize;

use crate::error::FormError;
use crate::form::serializer::MultipartPayload;
use crate::schema::schema_model::{Attachment, Form, ProcessSummary};

/// Raw answer to a multipart POST; classified by `validation::response`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn no_content() -> Self {
        ApiResponse::new(204, "")
    }
}

/// The REST collaborator the form pipeline talks to.
///
/// `Err` is reserved for transport and decoding failures; any HTTP status
/// on a POST comes back as an `ApiResponse`.
pub trait FormApi {
    fn fetch_form(&self, form_url: &str) -> Result<Form, FormError>;

    fn list_processes(&self) -> Result<Vec<ProcessSummary>, FormError>;

    fn validate_step(
        &self,
        action: &str,
        grouping_id: &str,
        payload: &MultipartPayload,
    ) -> Result<ApiResponse, FormError>;

    fn submit_form(&self, action: &str, payload: &MultipartPayload) -> Result<ApiResponse, FormError>;

    fn upload_attachment(
        &self,
        attachment_url: &str,
        payload: &MultipartPayload,
    ) -> Result<ApiResponse, FormError>;

    fn list_attachments(&self, attachment_url: &str) -> Result<Vec<Attachment>, FormError>;
}

/// Collection envelope: `{ "list": [...] }`.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

/// Collections arrive either wrapped in `list` or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Wrapped(ListEnvelope<T>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Wrapped(envelope) => envelope.list,
            Listing::Bare(items) => items,
        }
    }
}

/// Unwrap the process list and order it by ordinal.
pub fn parse_process_list(body: &str) -> Result<Vec<ProcessSummary>, FormError> {
    let envelope: ListEnvelope<ProcessSummary> =
        serde_json::from_str(body).map_err(|source| FormError::JsonParse {
            context: "process list".to_string(),
            source,
        })?;
    let mut processes = envelope.list;
    processes.sort_by_key(|p| p.ordinal);
    Ok(processes)
}

pub fn parse_attachment_list(body: &str) -> Result<Vec<Attachment>, FormError> {
    let listing: Listing<Attachment> =
        serde_json::from_str(body).map_err(|source| FormError::JsonParse {
            context: "attachment list".to_string(),
            source,
        })?;
    Ok(listing.into_vec())
}

pub fn parse_form(body: &str) -> Result<Form, FormError> {
    serde_json::from_str(body).map_err(|source| FormError::JsonParse {
        context: "form".to_string(),
        source,
    })
}
