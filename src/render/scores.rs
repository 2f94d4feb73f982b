use crate::dom::{Document, Element};
use crate::error::MisterError;
use crate::models::leaderboard::LeaderboardRow;
use crate::render::leaderboard::points_formatter;

pub const USER_LIST_ID: &str = "user-list";

fn user_row(position: usize, row: &LeaderboardRow) -> Element {
    Element::new("li")
        .with_class("user-row")
        .with_child(Element::new("span").with_class("rank").with_text(position.to_string()))
        .with_child(
            Element::new("img")
                .with_attr("src", row.image.as_str())
                .with_attr("alt", row.name.as_str()),
        )
        .with_child(Element::new("span").with_class("name").with_text(row.name.as_str()))
        .with_child(Element::new("span").with_class("username").with_text(row.username.as_str()))
        .with_child(Element::new("span").with_class("points").with_text(points_formatter(row.points)))
}

/// Rebuilds `user-list` with one row per player, in the order given.
pub fn render_user_list(doc: &mut Document, rows: &[LeaderboardRow]) -> Result<(), MisterError> {
    let list = doc.element_by_id_mut(USER_LIST_ID)?;
    list.clear_children();
    for (i, row) in rows.iter().enumerate() {
        list.append_child(user_row(i + 1, row));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_does_not_append() {
        let mut doc = Document::new(vec![Element::new("ul").with_id(USER_LIST_ID)]);
        let rows = vec![LeaderboardRow {
            image: "a.png".into(),
            name: "Ana".into(),
            username: "ana".into(),
            points: 12,
            debt: 0.0,
        }];

        render_user_list(&mut doc, &rows).unwrap();
        render_user_list(&mut doc, &rows).unwrap();

        let list = doc.element_by_id(USER_LIST_ID).unwrap();
        assert_eq!(list.children().len(), 1);
        assert!(list.children()[0].has_class("user-row"));
        assert_eq!(list.children()[0].text(), "1Anaana12 PTS");
    }
}
