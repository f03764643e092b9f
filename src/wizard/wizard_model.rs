use crate::error::FormError;
use crate::schema::schema_model::Screen;
use crate::wizard::navigator::TerminalAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Step(usize),
    Terminal(TerminalAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreadcrumbState {
    /// The step on screen
    Current,
    /// A reached step, clickable
    Link,
    /// Not reached yet, shown as inert text
    Inactive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbItem {
    pub ordinal: usize,
    pub label: String,
    pub link: String,
    pub state: BreadcrumbState,
}

/// Step state machine over `step_0 .. step_N-1` plus a terminal state.
///
/// `furthest` is the highest step index reached through validation, or the
/// step the form was opened at; breadcrumbs up to it are navigable.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub state: WizardState,
    step_count: usize,
    furthest: usize,
}

impl Wizard {
    pub fn new(step_count: usize, start: usize) -> Self {
        Wizard {
            state: WizardState::Step(start),
            step_count,
            furthest: start.min(step_count.saturating_sub(1)),
        }
    }

    pub fn for_screen(screen: &Screen, start: usize) -> Self {
        Wizard::new(screen.groupings.as_ref().map_or(0, |g| g.len()), start)
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            WizardState::Step(idx) => Some(idx),
            WizardState::Terminal(_) => None,
        }
    }

    pub fn furthest(&self) -> usize {
        self.furthest
    }

    pub fn is_reached(&self, index: usize) -> bool {
        index <= self.furthest
    }

    /// Route entry: the page was opened at this step. Does not unlock it.
    pub fn enter(&mut self, index: usize) {
        self.state = WizardState::Step(index);
    }

    /// Move after the current step validated.
    pub fn advance_to(&mut self, index: usize) {
        self.state = WizardState::Step(index);
        if index < self.step_count {
            self.furthest = self.furthest.max(index);
        }
    }

    /// Breadcrumb random access; only already-reached steps.
    pub fn goto(&mut self, index: usize) -> Result<(), FormError> {
        if !self.is_reached(index) || index >= self.step_count {
            return Err(FormError::StepNotReached { ordinal: index + 1 });
        }
        self.state = WizardState::Step(index);
        Ok(())
    }

    pub fn finish(&mut self, action: TerminalAction) {
        self.state = WizardState::Terminal(action);
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, WizardState::Terminal(_))
    }

    pub fn breadcrumbs(&self, screen: &Screen) -> Vec<BreadcrumbItem> {
        let groupings = screen.groupings.as_deref().unwrap_or(&[]);
        groupings
            .iter()
            .enumerate()
            .map(|(idx, grouping)| {
                let state = if self.current() == Some(idx) {
                    BreadcrumbState::Current
                } else if self.is_reached(idx) {
                    BreadcrumbState::Link
                } else {
                    BreadcrumbState::Inactive
                };
                BreadcrumbItem {
                    ordinal: grouping.ordinal,
                    label: grouping
                        .breadcrumb
                        .clone()
                        .unwrap_or_else(|| format!("Step {}", grouping.ordinal)),
                    link: grouping.breadcrumb_link.clone(),
                    state,
                }
            })
            .collect()
    }
}
