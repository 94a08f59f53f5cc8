use tokio::sync::mpsc;

use super::services::{Navigator, Notifier};

/// Events a wizard session emits towards its host.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Notification to display to the user.
    Notification(Notification),
    /// Route change requested by the session.
    Navigate(String),
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Shown when adding an item would exceed the pack size limit
    pub fn exceeded_items_count(max: usize, ttl_ticks: u32) -> Self {
        Self {
            message: format!("You can't add more than {max} items to a pack"),
            level: NotificationLevel::Warning,
            ttl_ticks,
        }
    }
}

/// Forwards notifications into the host event channel.
pub struct EventNotifier {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventNotifier {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for EventNotifier {
    fn notify(&self, notification: Notification) {
        log::debug!("Notification ({:?}): {}", notification.level, notification.message);
        if self.tx.send(AppEvent::Notification(notification)).is_err() {
            log::warn!("Event channel closed, notification dropped");
        }
    }
}

/// Forwards route changes into the host event channel.
pub struct EventNavigator {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventNavigator {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Navigator for EventNavigator {
    fn navigate(&self, route: &str) {
        log::info!("Navigating to {route}");
        if self.tx.send(AppEvent::Navigate(route.to_string())).is_err() {
            log::warn!("Event channel closed, navigation to {route} dropped");
        }
    }
}
