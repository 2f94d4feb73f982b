use tokio::sync::broadcast;

/// Page-level events: what the browser would deliver as `DOMContentLoaded`,
/// `change` on the selector, `click` on the update button and a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Ready,
    SelectorChanged(String),
    UpdateClicked,
    Reload,
}

pub struct EventBus {
    sender: broadcast::Sender<PageEvent>,
}

impl EventBus {
    pub fn new() -> (Self, broadcast::Receiver<PageEvent>) {
        let (tx, rx) = broadcast::channel(64);
        (Self { sender: tx }, rx)
    }

    /// Returns false when no page is listening.
    pub fn emit(&self, event: PageEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}
