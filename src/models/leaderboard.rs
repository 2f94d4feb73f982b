use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    #[serde(alias = "img")]
    pub image: String,
    pub name: String,
    pub username: String,
    #[serde(deserialize_with = "integral_points")]
    pub points: i64,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub debt: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("debt is not numeric: {:?}", s))),
    }
}

/// Points arrive as integers, but also as `41.0` or `"41"` when the backend
/// serialises a DECIMAL column. Fractional values are rejected.
fn integral_points<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number_or_numeric_string(deserializer)?;
    if value.fract() != 0.0 || !value.is_finite() {
        return Err(serde::de::Error::custom(format!("points are not whole: {}", value)));
    }
    Ok(value as i64)
}
