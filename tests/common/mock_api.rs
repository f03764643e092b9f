use std::cell::RefCell;
use std::collections::VecDeque;

use form_wizard::client::api::{ApiResponse, FormApi};
use form_wizard::error::FormError;
use form_wizard::form::serializer::MultipartPayload;
use form_wizard::schema::schema_model::{Attachment, Form, ProcessSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Fetch(String),
    ListProcesses,
    Validate {
        action: String,
        grouping_id: String,
        payload: MultipartPayload,
    },
    Submit {
        action: String,
        payload: MultipartPayload,
    },
    Upload {
        url: String,
        payload: MultipartPayload,
    },
    ListAttachments(String),
}

/// Scripted API: POSTs answer from a queue (204 once it runs dry) and every
/// call is recorded.
#[derive(Default)]
pub struct MockApi {
    pub form: Option<Form>,
    pub processes: Vec<ProcessSummary>,
    pub attachments: Vec<Attachment>,
    responses: RefCell<VecDeque<Result<ApiResponse, FormError>>>,
    requests: RefCell<Vec<Recorded>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: Form) -> Self {
        MockApi {
            form: Some(form),
            ..Self::default()
        }
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn respond_err(self, error: FormError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }

    pub fn validations(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Validate { grouping_id, .. } => Some(grouping_id),
                _ => None,
            })
            .collect()
    }

    fn next_response(&self) -> Result<ApiResponse, FormError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::no_content()))
    }
}

impl FormApi for MockApi {
    fn fetch_form(&self, form_url: &str) -> Result<Form, FormError> {
        self.requests
            .borrow_mut()
            .push(Recorded::Fetch(form_url.to_string()));
        self.form.clone().ok_or(FormError::UnexpectedStatus {
            url: form_url.to_string(),
            status: 404,
        })
    }

    fn list_processes(&self) -> Result<Vec<ProcessSummary>, FormError> {
        self.requests.borrow_mut().push(Recorded::ListProcesses);
        Ok(self.processes.clone())
    }

    fn validate_step(
        &self,
        action: &str,
        grouping_id: &str,
        payload: &MultipartPayload,
    ) -> Result<ApiResponse, FormError> {
        self.requests.borrow_mut().push(Recorded::Validate {
            action: action.to_string(),
            grouping_id: grouping_id.to_string(),
            payload: payload.clone(),
        });
        self.next_response()
    }

    fn submit_form(&self, action: &str, payload: &MultipartPayload) -> Result<ApiResponse, FormError> {
        self.requests.borrow_mut().push(Recorded::Submit {
            action: action.to_string(),
            payload: payload.clone(),
        });
        self.next_response()
    }

    fn upload_attachment(
        &self,
        attachment_url: &str,
        payload: &MultipartPayload,
    ) -> Result<ApiResponse, FormError> {
        self.requests.borrow_mut().push(Recorded::Upload {
            url: attachment_url.to_string(),
            payload: payload.clone(),
        });
        self.next_response()
    }

    fn list_attachments(&self, attachment_url: &str) -> Result<Vec<Attachment>, FormError> {
        self.requests
            .borrow_mut()
            .push(Recorded::ListAttachments(attachment_url.to_string()));
        Ok(self.attachments.clone())
    }
}
