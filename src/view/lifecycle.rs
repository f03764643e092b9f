use crate::events::bus::EventBus;

/// Mount/unmount capability shared by every view component.
///
/// A component registers its subscriptions on `mount` and must drop all of
/// them on `unmount`; nothing it subscribed to outlives it.
pub trait Lifecycle {
    fn mount(&mut self, bus: &mut EventBus);
    fn unmount(&mut self, bus: &mut EventBus);
    fn is_mounted(&self) -> bool;
}
