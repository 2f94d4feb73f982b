use crate::dom::{Document, Element};
use crate::error::MisterError;
use crate::models::score::PlayerScore;

pub const SCORE_TABLE_BODY_ID: &str = "cuerpo-tabla";

/// Clears `cuerpo-tabla` and appends a `name | points` row per player.
pub fn render_score_table(doc: &mut Document, scores: &[PlayerScore]) -> Result<(), MisterError> {
    let body = doc.element_by_id_mut(SCORE_TABLE_BODY_ID)?;
    body.clear_children();
    for score in scores {
        let mut row = Element::new("tr");
        row.append_child(Element::new("td").with_text(score.nombre.as_str()));
        row.append_child(Element::new("td").with_text(score.puntos_text()));
        body.append_child(row);
    }
    Ok(())
}
