use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of the `/api/deudas` matrix. The backend sends decimals as
/// strings (`"5.20"`) but plain numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DebtValue {
    Number(f64),
    Text(String),
}

impl DebtValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DebtValue::Number(n) => Some(*n),
            DebtValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// The backend's "no debt this matchday" marker: the string `"0.00"`,
    /// not a numeric zero.
    pub fn is_zero_marker(&self) -> bool {
        matches!(self, DebtValue::Text(s) if s == "0.00")
    }
}

impl fmt::Display for DebtValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtValue::Number(n) => write!(f, "{}", n),
            DebtValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DebtValue {
    fn from(s: &str) -> Self {
        DebtValue::Text(s.to_string())
    }
}

/// Raw wire row: `[user, v1, ..., vN, total]`.
pub type DebtRow = Vec<DebtValue>;

/// A debt row reshaped into named fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtRecord {
    pub user: String,
    pub jornadas: Vec<DebtValue>,
    pub total: DebtValue,
}

impl DebtRecord {
    /// Field lookup by grid field name: `user`, `total`, `jornada1..jornadaN`.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "user" => Some(self.user.clone()),
            "total" => Some(self.total.to_string()),
            _ => {
                let n: usize = name.strip_prefix("jornada")?.parse().ok()?;
                self.jornadas.get(n.checked_sub(1)?).map(|v| v.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_cells_deserialize() {
        let rows: Vec<DebtRow> = serde_json::from_str(r#"[["Alice", "0.00", 5.2, "5.20"]]"#).unwrap();
        assert_eq!(rows[0][0], DebtValue::from("Alice"));
        assert!(rows[0][1].is_zero_marker());
        assert_eq!(rows[0][2], DebtValue::Number(5.2));
        assert_eq!(rows[0][3].as_f64(), Some(5.2));
    }

    #[test]
    fn numeric_zero_is_not_the_marker() {
        assert!(!DebtValue::Number(0.0).is_zero_marker());
        assert!(!DebtValue::from("0").is_zero_marker());
    }
}
