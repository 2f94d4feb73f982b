//! Data-grid model used by the leaderboard and debt tables.
//!
//! Mirrors the handful of column options the pages configure (alignment,
//! frozen, header sort, resizable, per-cell formatter) and renders to a plain
//! `<table>` placed inside the target element.

use std::fmt::Write;

use crate::dom::{escape_html, Document};
use crate::error::MisterError;

/// Rows expose their cells by grid field name.
pub trait GridRow {
    fn field(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

impl VAlign {
    fn css(self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    FitData,
    FitDataTable,
    FitColumns,
}

impl Layout {
    fn name(self) -> &'static str {
        match self {
            Layout::FitData => "fitData",
            Layout::FitDataTable => "fitDataTable",
            Layout::FitColumns => "fitColumns",
        }
    }
}

/// What a formatter sees: the raw field value, the whole row and its position.
pub struct Cell<'a, R> {
    pub value: Option<String>,
    pub row: &'a R,
    pub row_index: usize,
}

pub type FormatterFn<R> = Box<dyn Fn(&Cell<'_, R>) -> String + Send + Sync>;

pub enum Formatter<R> {
    /// Escaped field value.
    Plain,
    /// 1-based row position.
    RowNum,
    /// Returns markup; escaping is the formatter's job.
    Custom(FormatterFn<R>),
}

impl<R> std::fmt::Debug for Formatter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formatter::Plain => f.write_str("Plain"),
            Formatter::RowNum => f.write_str("RowNum"),
            Formatter::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[derive(Debug)]
pub struct ColumnDef<R> {
    pub title: String,
    pub field: String,
    pub h_align: Align,
    pub v_align: VAlign,
    pub header_h_align: Align,
    pub frozen: bool,
    pub header_sort: bool,
    pub resizable: bool,
    pub formatter: Formatter<R>,
}

impl<R> ColumnDef<R> {
    pub fn new(title: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field: field.into(),
            h_align: Align::Left,
            v_align: VAlign::Top,
            header_h_align: Align::Left,
            frozen: false,
            header_sort: true,
            resizable: true,
            formatter: Formatter::Plain,
        }
    }

    pub fn h_align(mut self, align: Align) -> Self {
        self.h_align = align;
        self
    }

    pub fn v_align(mut self, align: VAlign) -> Self {
        self.v_align = align;
        self
    }

    pub fn header_h_align(mut self, align: Align) -> Self {
        self.header_h_align = align;
        self
    }

    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Fixed column: no header sorting, no resizing.
    pub fn fixed(mut self) -> Self {
        self.header_sort = false;
        self.resizable = false;
        self
    }

    pub fn formatter(mut self, formatter: Formatter<R>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn format_with<F>(self, f: F) -> Self
    where
        F: Fn(&Cell<'_, R>) -> String + Send + Sync + 'static,
    {
        self.formatter(Formatter::Custom(Box::new(f)))
    }

    fn format_cell(&self, cell: &Cell<'_, R>) -> String {
        match &self.formatter {
            Formatter::Plain => escape_html(cell.value.as_deref().unwrap_or_default()),
            Formatter::RowNum => (cell.row_index + 1).to_string(),
            Formatter::Custom(f) => f(cell),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub layout: Layout,
    pub header_visible: bool,
    pub movable_columns: bool,
    pub resizable_columns: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            layout: Layout::FitData,
            header_visible: true,
            movable_columns: false,
            resizable_columns: true,
        }
    }
}

#[derive(Debug)]
pub struct Grid<R> {
    pub columns: Vec<ColumnDef<R>>,
    pub options: GridOptions,
}

impl<R: GridRow> Grid<R> {
    pub fn new(columns: Vec<ColumnDef<R>>, options: GridOptions) -> Self {
        Self { columns, options }
    }

    pub fn render(&self, rows: &[R]) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<div class="grid" data-layout="{}"><table>"#,
            self.options.layout.name()
        );

        if self.options.header_visible {
            out.push_str("<thead><tr>");
            for col in &self.columns {
                let _ = write!(
                    out,
                    r#"<th{} data-field="{}" style="text-align:{}">{}</th>"#,
                    frozen_class(col.frozen),
                    escape_html(&col.field),
                    col.header_h_align.css(),
                    escape_html(&col.title)
                );
            }
            out.push_str("</tr></thead>");
        }

        out.push_str("<tbody>");
        for (row_index, row) in rows.iter().enumerate() {
            out.push_str("<tr>");
            for col in &self.columns {
                let cell = Cell {
                    value: row.field(&col.field),
                    row,
                    row_index,
                };
                let _ = write!(
                    out,
                    r#"<td{} data-field="{}" style="text-align:{};vertical-align:{}">{}</td>"#,
                    frozen_class(col.frozen),
                    escape_html(&col.field),
                    col.h_align.css(),
                    col.v_align.css(),
                    col.format_cell(&cell)
                );
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table></div>");
        out
    }

    /// Renders into `target_id`, replacing whatever the element held.
    pub fn mount(&self, doc: &mut Document, target_id: &str, rows: &[R]) -> Result<(), MisterError> {
        let html = self.render(rows);
        doc.element_by_id_mut(target_id)?.set_inner_html(html);
        Ok(())
    }
}

fn frozen_class(frozen: bool) -> &'static str {
    if frozen {
        r#" class="frozen""#
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, &'static str);

    impl GridRow for Pair {
        fn field(&self, name: &str) -> Option<String> {
            match name {
                "a" => Some(self.0.to_string()),
                "b" => Some(self.1.to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn renders_rownum_plain_and_custom() {
        let grid = Grid::new(
            vec![
                ColumnDef::new("#", "rank").formatter(Formatter::RowNum),
                ColumnDef::new("A", "a"),
                ColumnDef::new("B", "b").format_with(|c: &Cell<'_, Pair>| format!("[{}]", c.row.1)),
            ],
            GridOptions {
                header_visible: false,
                ..GridOptions::default()
            },
        );

        let html = grid.render(&[Pair("x<", "y"), Pair("z", "w")]);
        assert!(!html.contains("<thead>"));
        assert!(html.contains(">1</td>"));
        assert!(html.contains(">2</td>"));
        assert!(html.contains(">x&lt;</td>"));
        assert!(html.contains(">[w]</td>"));
    }

    #[test]
    fn header_marks_frozen_columns() {
        let grid: Grid<Pair> = Grid::new(
            vec![ColumnDef::new("A", "a").frozen().fixed(), ColumnDef::new("B", "b")],
            GridOptions::default(),
        );
        let html = grid.render(&[]);
        assert!(html.contains(r#"<th class="frozen" data-field="a""#));
        assert!(html.contains(r#"<th data-field="b""#));
        assert!(html.contains("<tbody></tbody>"));
        assert!(!grid.columns[0].header_sort);
        assert!(!grid.columns[0].resizable);
        assert!(grid.columns[1].header_sort);
    }
}
