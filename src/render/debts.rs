use tracing::debug;

use crate::dom::{escape_html, Document};
use crate::error::MisterError;
use crate::grid::{Align, Cell, ColumnDef, Grid, GridOptions, GridRow, Layout};
use crate::models::debt::{DebtRecord, DebtRow, DebtValue};
use crate::render::round_half_up;

pub const DEBTS_TABLE_ID: &str = "debts-table";

/// Leading `user` and trailing `total` cells of every debt row.
const FIXED_COLUMNS: usize = 2;

impl GridRow for DebtRecord {
    fn field(&self, name: &str) -> Option<String> {
        DebtRecord::field(self, name)
    }
}

/// Matchday cell: the `"0.00"` marker renders as `-`, numbers are rounded.
pub fn format_matchday_debt(value: &DebtValue) -> String {
    if value.is_zero_marker() {
        return "-".to_string();
    }
    match value.as_f64() {
        Some(v) => round_half_up(v).to_string(),
        None => escape_html(&value.to_string()),
    }
}

pub fn format_total(value: &DebtValue) -> String {
    match value.as_f64() {
        Some(v) => format!("{}€", round_half_up(v)),
        None => escape_html(&value.to_string()),
    }
}

/// Column layout of the debt matrix, derived from the row width. Only
/// [`DebtColumns::from_rows`] builds one, so `transform` sees validated rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebtColumns {
    number_of_jornadas: usize,
}

impl DebtColumns {
    /// Derives the matchday count from the first row and requires every row
    /// to have the same width.
    pub fn from_rows(rows: &[DebtRow]) -> Result<Self, MisterError> {
        let Some(first) = rows.first() else {
            return Ok(Self { number_of_jornadas: 0 });
        };
        if first.len() < FIXED_COLUMNS {
            return Err(MisterError::MalformedDebtRow { row: 0, len: first.len() });
        }

        let expected = first.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(MisterError::InconsistentDebtRow { row, expected, found });
        }

        Ok(Self {
            number_of_jornadas: expected - FIXED_COLUMNS,
        })
    }

    pub fn number_of_jornadas(&self) -> usize {
        self.number_of_jornadas
    }

    pub fn columns(&self) -> Vec<ColumnDef<DebtRecord>> {
        let mut columns = Vec::with_capacity(self.number_of_jornadas + FIXED_COLUMNS);
        columns.push(
            ColumnDef::new("User", "user")
                .h_align(Align::Left)
                .header_h_align(Align::Center)
                .frozen()
                .fixed(),
        );

        for i in 1..=self.number_of_jornadas {
            columns.push(
                ColumnDef::new(format!("J{}", i), format!("jornada{}", i))
                    .h_align(Align::Center)
                    .header_h_align(Align::Center)
                    .format_with(move |c: &Cell<'_, DebtRecord>| {
                        c.row
                            .jornadas
                            .get(i - 1)
                            .map(format_matchday_debt)
                            .unwrap_or_default()
                    })
                    .fixed(),
            );
        }

        columns.push(
            ColumnDef::new("Total", "total")
                .h_align(Align::Center)
                .header_h_align(Align::Center)
                .format_with(|c: &Cell<'_, DebtRecord>| format_total(&c.row.total))
                .frozen()
                .fixed(),
        );
        columns
    }

    /// Reshapes `[user, v1..vN, total]` rows into records. Rows narrower
    /// than this layout are skipped.
    pub fn transform(&self, rows: &[DebtRow]) -> Vec<DebtRecord> {
        let n = self.number_of_jornadas;
        rows.iter()
            .filter_map(|row| {
                Some(DebtRecord {
                    user: row.first()?.to_string(),
                    jornadas: row.get(1..=n)?.to_vec(),
                    total: row.get(n + 1)?.clone(),
                })
            })
            .collect()
    }

    pub fn grid(&self) -> Grid<DebtRecord> {
        Grid::new(
            self.columns(),
            GridOptions {
                layout: Layout::FitDataTable,
                header_visible: true,
                movable_columns: false,
                resizable_columns: false,
            },
        )
    }
}

pub fn render_debts(doc: &mut Document, rows: &[DebtRow]) -> Result<(), MisterError> {
    let layout = DebtColumns::from_rows(rows)?;
    debug!(jornadas = layout.number_of_jornadas(), rows = rows.len(), "debt matrix layout");
    let records = layout.transform(rows);
    layout.grid().mount(doc, DEBTS_TABLE_ID, &records)
}
