use crate::error::FormError;
use crate::events::bus::{EventBus, EventKind, FormEvent, Mailbox, SubscriptionId};
use crate::form::controls::{Control, ControlSet, build_controls};
use crate::form::merge::merge_screen;
use crate::form::serializer::mark_required;
use crate::form::visibility::{Visibility, resolve_visibility};
use crate::schema::links::assign_breadcrumb_links;
use crate::schema::schema_model::{Field, Form, Screen, ValidationMessage};
use crate::validation::feedback::FieldFeedback;
use crate::view::buttons_view::{AttachmentsView, ButtonsView, Notification, NotificationView};
use crate::view::lifecycle::Lifecycle;
use crate::wizard::navigator::button_bar;
use crate::wizard::wizard_model::{BreadcrumbItem, Wizard};

// ============================================================================
// Form view-model: explicit state that every rendering is projected from
// ============================================================================

pub struct FormView {
    form: Form,
    screen: Screen,
    wizard: Wizard,
    visibility: Visibility,
    controls: ControlSet,
    feedback: FieldFeedback,
    buttons: Option<ButtonsView>,
    notification: Option<NotificationView>,
    attachments: Option<AttachmentsView>,
    attachment_count: usize,
    alert: Option<String>,
    mailbox: Mailbox,
    subscriptions: Vec<SubscriptionId>,
    values_restored: bool,
    mounted: bool,
}

/// Snapshot handed to the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub grouping_index: usize,
    pub action: Option<String>,
    pub sections: Vec<SectionView>,
    pub breadcrumbs: Vec<BreadcrumbItem>,
    pub feedback: FieldFeedback,
    pub buttons: Option<ButtonsView>,
    pub notification: Option<Notification>,
    pub inputs_disabled: bool,
    pub alert: Option<String>,
    pub attachment_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub section_id: String,
    pub view_id: String,
    pub title: Option<String>,
    pub visible: bool,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub field: Field,
    pub controls: Vec<Control>,
}

impl FormView {
    /// Prepare a fetched form: breadcrumb links, merged messages, controls.
    pub fn new(mut form: Form) -> Result<Self, FormError> {
        assign_breadcrumb_links(&mut form);
        let mut screen = form.screen.take().ok_or(FormError::MissingScreen)?;
        merge_screen(&mut screen, &form.form_data);

        let start = form.grouping_index.unwrap_or(0);
        let controls = build_controls(&screen);
        let wizard = Wizard::for_screen(&screen, start);
        let visibility = resolve_visibility(&screen, Some(start));

        Ok(FormView {
            form,
            screen,
            wizard,
            visibility,
            controls,
            feedback: FieldFeedback::default(),
            buttons: None,
            notification: None,
            attachments: None,
            attachment_count: 0,
            alert: None,
            mailbox: Mailbox::new(),
            subscriptions: vec![],
            values_restored: false,
            mounted: false,
        })
    }

    /// The form without its screen; see `screen()`.
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn page_link(&self) -> &str {
        &self.form.link
    }

    pub fn grouping_index(&self) -> usize {
        self.form.grouping_index.unwrap_or(0)
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlSet {
        &mut self.controls
    }

    pub fn feedback(&self) -> &FieldFeedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FieldFeedback {
        &mut self.feedback
    }

    pub fn buttons(&self) -> Option<&ButtonsView> {
        self.buttons.as_ref()
    }

    pub fn buttons_mut(&mut self) -> Option<&mut ButtonsView> {
        self.buttons.as_mut()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().map(|n| &n.notification)
    }

    pub fn attachments(&self) -> Option<&AttachmentsView> {
        self.attachments.as_ref()
    }

    pub fn set_attachments(&mut self, attachments: AttachmentsView) {
        self.attachments = Some(attachments);
    }

    pub fn attachment_count(&self) -> usize {
        self.attachment_count
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn set_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
    }

    /// Put server validation items onto the control groups they name.
    pub fn apply_validation(&mut self, items: &[ValidationMessage]) -> usize {
        self.feedback.apply(items, &self.controls)
    }

    pub fn is_suspended(&self) -> bool {
        self.form.task.as_ref().is_some_and(|t| !t.active)
    }

    /// Apply queued events; returns how many were handled.
    pub fn update(&mut self, bus: &mut EventBus) -> usize {
        let events = self.mailbox.drain();
        let handled = events.len();
        for event in events {
            match event {
                FormEvent::GroupingIndexChanged(index) => self.on_grouping_index_change(bus, index),
                FormEvent::ShowAttachments => {
                    let attachments = self.attachments.get_or_insert_with(AttachmentsView::default);
                    attachments.visible = !attachments.visible;
                }
                FormEvent::AttachmentCountChanged(count) => self.attachment_count = count,
                _ => {}
            }
        }
        handled
    }

    /// Show the sections of step `index` and rebuild its button bar.
    pub fn on_grouping_index_change(&mut self, bus: &mut EventBus, index: usize) {
        log::debug!("Entering step {} of {}", index + 1, self.wizard.step_count());
        self.form.grouping_index = Some(index);
        self.wizard.enter(index);
        self.visibility = resolve_visibility(&self.screen, Some(index));

        if let Some(mut buttons) = self.buttons.take() {
            buttons.unmount(bus);
        }

        self.feedback.clear();
        self.feedback.seed_from_fields(&self.screen, &self.controls);
        mark_required(&mut self.controls, &self.visibility);

        if self.is_suspended() {
            self.controls.disable_all();
            if self.notification.is_none() {
                let mut notification = NotificationView::new(Notification::suspended());
                notification.mount(bus);
                self.notification = Some(notification);
            }
            return;
        }

        if let Some(bar) = button_bar(&self.screen, &self.visibility, &self.form.link, index) {
            let mut buttons = ButtonsView::new(bar);
            buttons.mount(bus);
            self.buttons = Some(buttons);
        }
    }

    pub fn step_view(&self) -> StepView {
        let sections = self
            .screen
            .sections
            .iter()
            .map(|section| SectionView {
                section_id: section.section_id.clone(),
                view_id: section.view_id().to_string(),
                title: section.title.clone(),
                visible: self.visibility.is_visible(&section.section_id),
                fields: section
                    .fields
                    .iter()
                    .map(|field| FieldView {
                        field: field.clone(),
                        controls: self
                            .controls
                            .in_section(&section.section_id)
                            .filter(|c| !field.name.is_empty() && c.name == field.name)
                            .cloned()
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        StepView {
            grouping_index: self.grouping_index(),
            action: self.form.action.clone(),
            sections,
            breadcrumbs: self.wizard.breadcrumbs(&self.screen),
            feedback: self.feedback.clone(),
            buttons: self.buttons.clone(),
            notification: self.notification().cloned(),
            inputs_disabled: self.is_suspended(),
            alert: self.alert.clone(),
            attachment_count: self.attachment_count,
        }
    }
}

impl Lifecycle for FormView {
    fn mount(&mut self, bus: &mut EventBus) {
        if self.mounted {
            return;
        }
        for kind in [
            EventKind::GroupingIndexChanged,
            EventKind::ShowAttachments,
            EventKind::AttachmentCountChanged,
        ] {
            self.subscriptions.push(self.mailbox.listen(bus, kind));
        }

        if !self.values_restored {
            self.controls.restore_values(&self.form.form_data);
            self.values_restored = true;
        }

        self.mounted = true;
        let index = self.grouping_index();
        self.on_grouping_index_change(bus, index);
        bus.publish(&FormEvent::FormAddedToDom);
    }

    fn unmount(&mut self, bus: &mut EventBus) {
        for id in self.subscriptions.drain(..) {
            bus.unsubscribe(id);
        }
        if let Some(mut buttons) = self.buttons.take() {
            buttons.unmount(bus);
        }
        if let Some(mut notification) = self.notification.take() {
            notification.unmount(bus);
        }
        self.mailbox.drain();
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
