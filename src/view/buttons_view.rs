use crate::events::bus::EventBus;
use crate::schema::schema_model::{Attachment, Button, ButtonType};
use crate::view::lifecycle::Lifecycle;
use crate::wizard::navigator::ButtonBar;

/// Button bar of one step. Built fresh for every step; never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonsView {
    pub bar: ButtonBar,
    /// Buttons whose press passed server validation while this bar was shown.
    validated: Vec<String>,
    mounted: bool,
}

impl ButtonsView {
    pub fn new(bar: ButtonBar) -> Self {
        ButtonsView {
            bar,
            validated: Vec::new(),
            mounted: false,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.bar.buttons
    }

    pub fn find(&self, button_id: &str) -> Option<&Button> {
        self.bar.buttons.iter().find(|b| b.button_id == button_id)
    }

    pub fn is_validated(&self, button_id: &str) -> bool {
        self.validated.iter().any(|id| id == button_id)
    }

    pub fn mark_validated(&mut self, button_id: &str) {
        if !self.is_validated(button_id) {
            self.validated.push(button_id.to_string());
        }
    }

    /// Button used when none is named: the first non-link button.
    pub fn primary(&self) -> Option<&Button> {
        self.bar
            .buttons
            .iter()
            .find(|b| b.button_type == ButtonType::Button)
            .or_else(|| self.bar.buttons.first())
    }
}

impl Lifecycle for ButtonsView {
    fn mount(&mut self, _bus: &mut EventBus) {
        self.mounted = true;
    }

    fn unmount(&mut self, _bus: &mut EventBus) {
        self.mounted = false;
        self.validated.clear();
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn suspended() -> Self {
        Notification {
            title: "Process suspended".to_string(),
            message: "This process has been suspended and no other actions can be taken on it \
                      until it has been reactivated."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    pub notification: Notification,
    mounted: bool,
}

impl NotificationView {
    pub fn new(notification: Notification) -> Self {
        NotificationView {
            notification,
            mounted: false,
        }
    }
}

impl Lifecycle for NotificationView {
    fn mount(&mut self, _bus: &mut EventBus) {
        self.mounted = true;
    }

    fn unmount(&mut self, _bus: &mut EventBus) {
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// Attachment panel; toggled by `ShowAttachments`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentsView {
    pub attachments: Vec<Attachment>,
    pub visible: bool,
}
