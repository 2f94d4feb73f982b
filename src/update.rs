use tracing::{error, info, warn};

use crate::client::MisterClient;
use crate::controller::SharedDocument;
use crate::dom::{Document, Element};
use crate::error::MisterError;

pub const UPDATE_BUTTON_ID: &str = "update";
pub const LABEL_CLASS: &str = "button-text";
pub const SPINNER_CLASS: &str = "spinner";
pub const HIDDEN_CLASS: &str = "hidden";

/// `#update` with its label shown and spinner hidden.
pub fn update_button_element() -> Element {
    Element::new("button")
        .with_id(UPDATE_BUTTON_ID)
        .with_child(Element::new("span").with_class(LABEL_CLASS).with_text("Actualizar"))
        .with_child(Element::new("span").with_class(SPINNER_CLASS).with_class(HIDDEN_CLASS))
}

fn set_busy(doc: &mut Document, busy: bool) -> Result<(), MisterError> {
    let button = doc.element_by_id_mut(UPDATE_BUTTON_ID)?;
    let (hide, show) = if busy {
        (LABEL_CLASS, SPINNER_CLASS)
    } else {
        (SPINNER_CLASS, LABEL_CLASS)
    };
    if let Some(e) = button.find_by_class_mut(hide) {
        e.add_class(HIDDEN_CLASS);
    }
    if let Some(e) = button.find_by_class_mut(show) {
        e.remove_class(HIDDEN_CLASS);
    }
    Ok(())
}

/// True while the spinner is showing and the label is hidden.
pub fn is_busy(doc: &Document) -> bool {
    let Ok(button) = doc.element_by_id(UPDATE_BUTTON_ID) else {
        return false;
    };
    let hidden = |class: &str| button.find_by_class(class).map(|e| e.has_class(HIDDEN_CLASS));
    hidden(LABEL_CLASS) == Some(true) && hidden(SPINNER_CLASS) == Some(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { message: String },
    Failed { reason: String },
}

#[derive(Clone)]
pub struct UpdateButton {
    client: MisterClient,
    doc: SharedDocument,
}

impl UpdateButton {
    pub fn new(client: MisterClient, doc: SharedDocument) -> Self {
        Self { client, doc }
    }

    /// Shows the spinner, posts `/api/misterupdate` and restores the label
    /// whatever the result. The caller reloads the page afterwards.
    pub async fn click(&self) -> Result<UpdateOutcome, MisterError> {
        set_busy(&mut *self.doc.write().await, true)?;

        let outcome = match self.client.mister_update().await {
            Ok(resp) => {
                info!(message = %resp.message, "update finished");
                UpdateOutcome::Updated { message: resp.message }
            }
            Err(MisterError::ApiError { status, message }) => {
                warn!(status, %message, "update rejected by backend");
                UpdateOutcome::Failed { reason: message }
            }
            Err(e) => {
                error!("update request failed: {}", e);
                UpdateOutcome::Failed { reason: e.to_string() }
            }
        };

        set_busy(&mut *self.doc.write().await, false)?;
        Ok(outcome)
    }
}
