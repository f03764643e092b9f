use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// Typed event dispatch between form components
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The wizard moved to this 0-based step.
    GroupingIndexChanged(usize),
    /// Navigate to a link (step breadcrumb or page outside the form).
    Route(String),
    /// Full-form submission was sent.
    FormSubmitted { action: String },
    ShowAttachments,
    AttachmentCountChanged(usize),
    FormAddedToDom,
    /// Blocking user-facing failure.
    Alert(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    GroupingIndexChanged,
    Route,
    FormSubmitted,
    ShowAttachments,
    AttachmentCountChanged,
    FormAddedToDom,
    Alert,
}

impl FormEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FormEvent::GroupingIndexChanged(_) => EventKind::GroupingIndexChanged,
            FormEvent::Route(_) => EventKind::Route,
            FormEvent::FormSubmitted { .. } => EventKind::FormSubmitted,
            FormEvent::ShowAttachments => EventKind::ShowAttachments,
            FormEvent::AttachmentCountChanged(_) => EventKind::AttachmentCountChanged,
            FormEvent::FormAddedToDom => EventKind::FormAddedToDom,
            FormEvent::Alert(_) => EventKind::Alert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&FormEvent)>;

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

/// Publish/subscribe service injected into each component.
///
/// Single-threaded: handlers run synchronously, in subscription order, on
/// the publishing call.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&FormEvent) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver to every subscriber of the event's kind; returns how many ran.
    pub fn publish(&mut self, event: &FormEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for subscriber in self.subscribers.iter_mut().filter(|s| s.kind == kind) {
            (subscriber.handler)(event);
            delivered += 1;
        }
        log::trace!("Published {:?} to {} subscribers", kind, delivered);
        delivered
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|s| s.kind == kind).count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Queue a component subscribes with; it drains it in its own `update`.
#[derive(Debug, Clone, Default)]
pub struct Mailbox {
    queue: Rc<RefCell<VecDeque<FormEvent>>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe this mailbox to `kind`.
    pub fn listen(&self, bus: &mut EventBus, kind: EventKind) -> SubscriptionId {
        let queue = Rc::clone(&self.queue);
        bus.subscribe(kind, move |event| queue.borrow_mut().push_back(event.clone()))
    }

    pub fn drain(&self) -> Vec<FormEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
