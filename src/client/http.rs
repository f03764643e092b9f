use std::time::Duration;

use reqwest::blocking::multipart::{Form as MultipartForm, Part};
use reqwest::blocking::{Client, RequestBuilder};

use crate::client::api::{
    ApiResponse, FormApi, parse_attachment_list, parse_form, parse_process_list,
};
use crate::client::endpoints::{
    PROCESS_LIST_PATH, attachment_upload_url, resolve, submission_url, validation_url,
};
use crate::error::FormError;
use crate::form::serializer::{MultipartPayload, PayloadPart};
use crate::schema::schema_model::{Attachment, Form, ProcessSummary};

// ============================================================================
// Blocking reqwest implementation of the REST collaborator
// ============================================================================

pub struct HttpFormApi {
    client: Client,
    base_url: String,
}

impl HttpFormApi {
    /// `timeout` of `None` keeps the transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FormError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| FormError::Transport {
            url: base_url.to_string(),
            source,
        })?;
        Ok(HttpFormApi {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_text(&self, path: &str) -> Result<String, FormError> {
        let url = resolve(&self.base_url, path);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|source| transport(&url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FormError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }
        response.text().map_err(|source| transport(&url, source))
    }

    fn post_multipart(&self, path: &str, payload: &MultipartPayload) -> Result<ApiResponse, FormError> {
        let url = resolve(&self.base_url, path);
        let form = to_multipart(payload).map_err(|source| transport(&url, source))?;
        log::debug!("POST {} ({} parts)", url, payload.len());
        send(self.client.post(&url).multipart(form), &url)
    }
}

fn send(request: RequestBuilder, url: &str) -> Result<ApiResponse, FormError> {
    let response = request.send().map_err(|source| transport(url, source))?;
    let status = response.status().as_u16();
    let body = response.text().map_err(|source| transport(url, source))?;
    Ok(ApiResponse { status, body })
}

fn transport(url: &str, source: reqwest::Error) -> FormError {
    FormError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Convert the payload into a reqwest multipart body, preserving part order.
pub fn to_multipart(payload: &MultipartPayload) -> Result<MultipartForm, reqwest::Error> {
    let mut form = MultipartForm::new();
    for part in &payload.parts {
        form = match part {
            PayloadPart::Text { name, value } => form.text(name.clone(), value.clone()),
            PayloadPart::File { name, file } => {
                let mut file_part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    file_part = file_part.mime_str(content_type)?;
                }
                form.part(name.clone(), file_part)
            }
        };
    }
    Ok(form)
}

impl FormApi for HttpFormApi {
    fn fetch_form(&self, form_url: &str) -> Result<Form, FormError> {
        let body = self.get_text(form_url)?;
        parse_form(&body)
    }

    fn list_processes(&self) -> Result<Vec<ProcessSummary>, FormError> {
        let body = self.get_text(PROCESS_LIST_PATH)?;
        parse_process_list(&body)
    }

    fn validate_step(
        &self,
        action: &str,
        grouping_id: &str,
        payload: &MultipartPayload,
    ) -> Result<ApiResponse, FormError> {
        self.post_multipart(&validation_url(action, grouping_id), payload)
    }

    fn submit_form(&self, action: &str, payload: &MultipartPayload) -> Result<ApiResponse, FormError> {
        self.post_multipart(&submission_url(action), payload)
    }

    fn upload_attachment(
        &self,
        attachment_url: &str,
        payload: &MultipartPayload,
    ) -> Result<ApiResponse, FormError> {
        self.post_multipart(&attachment_upload_url(attachment_url), payload)
    }

    fn list_attachments(&self, attachment_url: &str) -> Result<Vec<Attachment>, FormError> {
        let body = self.get_text(attachment_url)?;
        parse_attachment_list(&body)
    }
}
