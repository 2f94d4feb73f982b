use crate::dom::{escape_html, Document};
use crate::error::MisterError;
use crate::grid::{Align, Cell, ColumnDef, Formatter, Grid, GridOptions, GridRow, Layout, VAlign};
use crate::models::leaderboard::LeaderboardRow;
use crate::render::round_half_up;

pub const LEADERBOARD_TABLE_ID: &str = "leaderboard-table";

impl GridRow for LeaderboardRow {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "username" => Some(self.username.clone()),
            "image" => Some(self.image.clone()),
            "points" => Some(self.points.to_string()),
            "debt" => Some(self.debt.to_string()),
            _ => None,
        }
    }
}

pub fn profile_formatter(row: &LeaderboardRow) -> String {
    format!(
        concat!(
            r#"<div class="profile-info">"#,
            r#"<img src="{img}" alt="{name}">"#,
            r#"<div class="names"><div class="name">{name}</div><div class="username">{username}</div></div>"#,
            "</div>"
        ),
        img = escape_html(&row.image),
        name = escape_html(&row.name),
        username = escape_html(&row.username),
    )
}

pub fn points_formatter(points: i64) -> String {
    format!("{} PTS", points)
}

/// `0 → "--"`, anything else `"+<rounded>€"`.
pub fn debt_formatter(debt: f64) -> String {
    if debt == 0.0 {
        "--".to_string()
    } else {
        format!("+{}€", round_half_up(debt))
    }
}

pub fn leaderboard_grid() -> Grid<LeaderboardRow> {
    let columns = vec![
        ColumnDef::new("Rank", "rank")
            .h_align(Align::Center)
            .v_align(VAlign::Middle)
            .formatter(Formatter::RowNum)
            .fixed(),
        ColumnDef::new("Profile", "profile")
            .h_align(Align::Left)
            .v_align(VAlign::Middle)
            .format_with(|c: &Cell<'_, LeaderboardRow>| profile_formatter(c.row))
            .fixed(),
        ColumnDef::new("Points", "points")
            .h_align(Align::Center)
            .v_align(VAlign::Middle)
            .format_with(|c: &Cell<'_, LeaderboardRow>| points_formatter(c.row.points))
            .fixed(),
        ColumnDef::new("Debt", "debt")
            .h_align(Align::Center)
            .v_align(VAlign::Middle)
            .format_with(|c: &Cell<'_, LeaderboardRow>| debt_formatter(c.row.debt))
            .fixed(),
    ];

    Grid::new(
        columns,
        GridOptions {
            layout: Layout::FitDataTable,
            header_visible: false,
            movable_columns: false,
            resizable_columns: false,
        },
    )
}

pub fn render_leaderboard(doc: &mut Document, rows: &[LeaderboardRow]) -> Result<(), MisterError> {
    leaderboard_grid().mount(doc, LEADERBOARD_TABLE_ID, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn row(name: &str, points: i64, debt: f64) -> LeaderboardRow {
        LeaderboardRow {
            image: format!("/img/{}.png", name),
            name: name.to_string(),
            username: name.to_lowercase(),
            points,
            debt,
        }
    }

    #[test]
    fn debt_formatter_placeholder_and_rounding() {
        assert_eq!(debt_formatter(0.0), "--");
        assert_eq!(debt_formatter(3.6), "+4€");
        assert_eq!(debt_formatter(2.5), "+3€");
        assert_eq!(debt_formatter(0.2), "+0€");
    }

    #[test]
    fn points_are_suffixed() {
        assert_eq!(points_formatter(57), "57 PTS");
    }

    #[test]
    fn profile_block_is_escaped() {
        let html = profile_formatter(&row("<Ana>", 1, 0.0));
        assert!(html.contains(r#"alt="&lt;Ana&gt;""#));
        assert!(html.contains(r#"<div class="username">&lt;ana&gt;</div>"#));
    }

    #[test]
    fn columns_are_fixed_and_header_hidden() {
        let grid = leaderboard_grid();
        let titles: Vec<_> = grid.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Rank", "Profile", "Points", "Debt"]);
        assert!(grid.columns.iter().all(|c| !c.header_sort && !c.resizable));
        assert!(!grid.options.header_visible);
        assert!(!grid.options.movable_columns);
        assert_eq!(grid.options.layout, Layout::FitDataTable);
    }

    #[test]
    fn render_replaces_previous_table() {
        let mut doc = Document::new(vec![Element::new("div").with_id(LEADERBOARD_TABLE_ID)]);

        render_leaderboard(&mut doc, &[row("Ana", 40, 3.6), row("Bo", 31, 0.0)]).unwrap();
        let first = doc.element_by_id(LEADERBOARD_TABLE_ID).unwrap().to_html();
        assert!(first.contains("40 PTS"));
        assert!(first.contains("+4€"));
        assert!(first.contains(">--</td>"));
        assert!(first.contains(">2</td>"));

        render_leaderboard(&mut doc, &[row("Cy", 9, 0.0)]).unwrap();
        let second = doc.element_by_id(LEADERBOARD_TABLE_ID).unwrap().to_html();
        assert!(second.contains("9 PTS"));
        assert!(!second.contains("Ana"));
    }
}
