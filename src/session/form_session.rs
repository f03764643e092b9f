use crate::client::api::FormApi;
use crate::client::endpoints::{attachment_upload_url, submission_url, validation_url};
use crate::error::FormError;
use crate::events::bus::{EventBus, FormEvent};
use crate::form::controls::FileUpload;
use crate::form::serializer::{MultipartPayload, prepare_submission};
use crate::schema::links::parse_step_route;
use crate::schema::schema_model::{ButtonType, Form, ValidationMessage};
use crate::trace::{logger::TraceLogger, trace::TraceEvent};
use crate::validation::response::{ResponseAction, classify_submission, handle_response};
use crate::view::buttons_view::AttachmentsView;
use crate::view::form_view::{FormView, StepView};
use crate::view::lifecycle::Lifecycle;
use crate::wizard::navigator::{ButtonValue, TerminalAction, compute_next_target};

/// Result of activating a button.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivateOutcome {
    /// Moved to another step of this form
    Advanced { grouping_index: usize },
    /// Navigated to a link that is not a step of this form
    Left { link: String },
    /// `next` on the last step; nothing to navigate to
    DeadEnd,
    Submitted { action: TerminalAction },
    /// Server rejected the step; messages are on the feedback
    Invalid(Vec<ValidationMessage>),
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Uploaded,
    Rejected(Vec<ValidationMessage>),
    Failed { reason: String },
}

/// A form page session: fetch → render → edit → validate → navigate/submit.
pub struct FormSession<A: FormApi> {
    api: A,
    bus: EventBus,
    view: FormView,
    tracer: TraceLogger,
}

impl<A: FormApi> FormSession<A> {
    /// Fetch the form and mount it at `ordinal` (1-based), or at the step
    /// the server put it on.
    pub fn open(api: A, form_url: &str, ordinal: Option<usize>) -> Result<Self, FormError> {
        let mut form = api.fetch_form(form_url)?;
        if let Some(ordinal) = ordinal {
            form.grouping_index = Some(ordinal.saturating_sub(1));
        }
        Self::with_form(api, form)
    }

    pub fn with_form(api: A, form: Form) -> Result<Self, FormError> {
        let mut bus = EventBus::new();
        let mut view = FormView::new(form)?;
        view.mount(&mut bus);
        Ok(FormSession {
            api,
            bus,
            view,
            tracer: TraceLogger::disabled(),
        })
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut FormView {
        &mut self.view
    }

    /// For outside listeners (router, notifications).
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn step_view(&self) -> StepView {
        self.view.step_view()
    }

    /// Publish and let the view react.
    pub fn emit(&mut self, event: FormEvent) {
        self.bus.publish(&event);
        self.view.update(&mut self.bus);
    }

    /// Tear the view down; subscriptions go with it.
    pub fn close(&mut self) {
        self.view.unmount(&mut self.bus);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Route entry at a 1-based ordinal.
    pub fn enter_step(&mut self, ordinal: usize) {
        self.emit(FormEvent::GroupingIndexChanged(ordinal.saturating_sub(1)));
    }

    /// Route entry from a `step/{ordinal}` fragment. Other routes are ignored.
    pub fn enter_route(&mut self, route: &str) -> bool {
        match parse_step_route(route) {
            Some(index) => {
                self.emit(FormEvent::GroupingIndexChanged(index));
                true
            }
            None => false,
        }
    }

    /// Breadcrumb click: only steps already reached.
    pub fn follow_breadcrumb(&mut self, ordinal: usize) -> Result<(), FormError> {
        let index = ordinal
            .checked_sub(1)
            .ok_or(FormError::StepNotReached { ordinal })?;
        self.view.wizard_mut().goto(index)?;
        let link = self
            .view
            .screen()
            .groupings
            .as_deref()
            .and_then(|g| g.get(index))
            .map(|g| g.breadcrumb_link.clone())
            .unwrap_or_default();
        self.emit(FormEvent::Route(link));
        self.emit(FormEvent::GroupingIndexChanged(index));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.ensure_active()?;
        self.view.controls_mut().set_value(name, value)
    }

    pub fn check(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.ensure_active()?;
        self.view.controls_mut().check(name, value)
    }

    pub fn uncheck(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.ensure_active()?;
        self.view.controls_mut().uncheck(name, value);
        Ok(())
    }

    pub fn attach_file(&mut self, name: &str, file: FileUpload) -> Result<(), FormError> {
        self.ensure_active()?;
        self.view.controls_mut().attach_file(name, file)
    }

    fn ensure_active(&self) -> Result<(), FormError> {
        if self.view.is_suspended() {
            return Err(FormError::TaskSuspended);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Press a button of the current step (the primary one when `None`).
    ///
    /// Submit buttons validate the step first; `button-link` buttons just
    /// navigate. Nothing guards against a second activation while the
    /// first is being handled: each call sends its own request.
    pub fn activate(&mut self, button_id: Option<&str>) -> Result<ActivateOutcome, FormError> {
        self.ensure_active()?;

        let buttons = self
            .view
            .buttons()
            .ok_or_else(|| FormError::UnknownButton(button_id.unwrap_or_default().to_string()))?;
        let button = match button_id {
            Some(id) => buttons.find(id),
            None => buttons.primary(),
        }
        .cloned()
        .ok_or_else(|| FormError::UnknownButton(button_id.unwrap_or_default().to_string()))?;
        let already_validated = buttons.is_validated(&button.button_id);
        let value = ButtonValue::of(&button);

        if button.button_type == ButtonType::ButtonLink {
            let target = button.link.clone().or(button.value.clone()).unwrap_or_default();
            return Ok(self.navigate(target));
        }

        let action = self.view.form().action.clone().ok_or(FormError::MissingAction)?;
        let index = self.view.grouping_index();

        self.view.feedback_mut().clear();
        self.view.clear_alert();
        let visibility = self.view.visibility().clone();
        let payload = prepare_submission(self.view.controls_mut(), &visibility);

        if let (true, ButtonValue::Terminal(terminal)) = (already_validated, &value) {
            return self.submit_final(&action, *terminal, &payload);
        }

        let groupings = self.view.screen().groupings.as_deref().unwrap_or(&[]);
        let has_groupings = !groupings.is_empty();
        let grouping_id = match groupings.get(index).map(|g| g.grouping_id.clone()) {
            Some(grouping_id) => grouping_id,
            None if !has_groupings => {
                let terminal = match value {
                    ButtonValue::Terminal(terminal) => terminal,
                    _ => TerminalAction::Submit,
                };
                return self.submit_final(&action, terminal, &payload);
            }
            None => return Err(FormError::NoGrouping(index)),
        };

        log::info!("Validating step {} ({} parts)", index + 1, payload.len());
        let response = match self.api.validate_step(&action, &grouping_id, &payload) {
            Ok(response) => response,
            Err(e) => return Ok(self.fail(index, e.to_string())),
        };
        self.tracer.log(
            &TraceEvent::now(index, "validate")
                .with_url(validation_url(&action, &grouping_id))
                .with_status(response.status),
        );

        match handle_response(response.status, &response.body) {
            ResponseAction::Valid => {
                if let Some(buttons) = self.view.buttons_mut() {
                    buttons.mark_validated(&button.button_id);
                }
                match value {
                    ButtonValue::Terminal(terminal) => self.submit_final(&action, terminal, &payload),
                    other => {
                        let target = compute_next_target(
                            self.view.screen(),
                            self.view.page_link(),
                            index,
                            &other,
                        );
                        let outcome = self.navigate(target);
                        if let ActivateOutcome::Advanced { grouping_index } = &outcome {
                            self.view.wizard_mut().advance_to(*grouping_index);
                        }
                        Ok(outcome)
                    }
                }
            }
            ResponseAction::Invalid(items) => {
                let placed = self.view.apply_validation(&items);
                log::info!("Step {} invalid: {} messages placed", index + 1, placed);
                Ok(ActivateOutcome::Invalid(items))
            }
            ResponseAction::Failure { status } => Ok(self.fail(
                index,
                format!("Validation request failed with status {}", status),
            )),
        }
    }

    fn submit_final(
        &mut self,
        action: &str,
        terminal: TerminalAction,
        payload: &MultipartPayload,
    ) -> Result<ActivateOutcome, FormError> {
        let index = self.view.grouping_index();
        log::info!("Submitting form ({})", terminal.as_str());

        let response = match self.api.submit_form(action, payload) {
            Ok(response) => response,
            Err(e) => return Ok(self.fail(index, e.to_string())),
        };
        self.tracer.log(
            &TraceEvent::now(index, "submit")
                .with_url(submission_url(action))
                .with_status(response.status)
                .with_target(terminal.as_str()),
        );

        match classify_submission(response.status, &response.body) {
            ResponseAction::Valid => {
                self.view.wizard_mut().finish(terminal);
                self.emit(FormEvent::FormSubmitted {
                    action: terminal.as_str().to_string(),
                });
                Ok(ActivateOutcome::Submitted { action: terminal })
            }
            ResponseAction::Invalid(items) => {
                self.view.apply_validation(&items);
                Ok(ActivateOutcome::Invalid(items))
            }
            ResponseAction::Failure { status } => Ok(self.fail(
                index,
                format!("Submission failed with status {}", status),
            )),
        }
    }

    fn navigate(&mut self, target: String) -> ActivateOutcome {
        let index = self.view.grouping_index();
        if target.is_empty() {
            log::debug!("Step {} has nowhere to go", index + 1);
            return ActivateOutcome::DeadEnd;
        }

        self.tracer
            .log(&TraceEvent::now(index, "navigate").with_target(&target));
        self.emit(FormEvent::Route(target.clone()));

        let step = self
            .view
            .screen()
            .groupings
            .as_deref()
            .and_then(|g| g.iter().position(|g| g.breadcrumb_link == target));

        match step {
            Some(next) => {
                self.emit(FormEvent::GroupingIndexChanged(next));
                ActivateOutcome::Advanced {
                    grouping_index: next,
                }
            }
            None => ActivateOutcome::Left { link: target },
        }
    }

    fn fail(&mut self, index: usize, reason: String) -> ActivateOutcome {
        log::warn!("{}", reason);
        self.tracer
            .log(&TraceEvent::now(index, "failure").with_detail(&reason));
        self.view.set_alert(reason.clone());
        self.emit(FormEvent::Alert(reason.clone()));
        ActivateOutcome::Failed { reason }
    }

    // ------------------------------------------------------------------
    // Attachments
    // ------------------------------------------------------------------

    pub fn attach_comment(&mut self, comment: &str) -> Result<UploadOutcome, FormError> {
        let mut payload = MultipartPayload::new();
        payload.append_text("comment", comment);
        self.upload(payload)
    }

    /// Upload files under `name`; an empty name uploads nothing.
    pub fn attach_files(&mut self, name: &str, files: Vec<FileUpload>) -> Result<UploadOutcome, FormError> {
        let mut payload = MultipartPayload::new();
        if !name.is_empty() {
            for file in files {
                payload.append_file(name, file);
            }
        }
        self.upload(payload)
    }

    fn upload(&mut self, payload: MultipartPayload) -> Result<UploadOutcome, FormError> {
        self.ensure_active()?;
        let url = self
            .view
            .form()
            .attachment
            .clone()
            .ok_or(FormError::MissingAttachmentUrl)?;
        let index = self.view.grouping_index();

        let response = match self.api.upload_attachment(&url, &payload) {
            Ok(response) => response,
            Err(e) => {
                let reason = e.to_string();
                self.fail(index, reason.clone());
                return Ok(UploadOutcome::Failed { reason });
            }
        };
        self.tracer.log(
            &TraceEvent::now(index, "upload")
                .with_url(attachment_upload_url(&url))
                .with_status(response.status),
        );

        Ok(match handle_response(response.status, &response.body) {
            ResponseAction::Valid => UploadOutcome::Uploaded,
            ResponseAction::Invalid(items) => UploadOutcome::Rejected(items),
            ResponseAction::Failure { status } => {
                let reason = format!("Attachment upload failed with status {}", status);
                self.fail(index, reason.clone());
                UploadOutcome::Failed { reason }
            }
        })
    }

    /// Fetch the attachment list and toggle the attachment panel.
    pub fn show_attachments(&mut self) -> Result<usize, FormError> {
        let url = self
            .view
            .form()
            .attachment
            .clone()
            .ok_or(FormError::MissingAttachmentUrl)?;
        let attachments = self.api.list_attachments(&url)?;
        let count = attachments.len();

        let visible = self.view.attachments().is_some_and(|a| a.visible);
        self.view.set_attachments(AttachmentsView {
            attachments,
            visible,
        });
        self.emit(FormEvent::ShowAttachments);
        self.emit(FormEvent::AttachmentCountChanged(count));
        Ok(count)
    }
}
