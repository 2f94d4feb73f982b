use serde::{Deserialize, Serialize};

/// One matchday as offered in `selector-jornada`. `index` is the option value
/// and the `jornada` query parameter; `label` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jornada {
    pub index: usize,
    pub label: String,
}

impl Jornada {
    /// Builds the ordered matchday list from `/api/numjornadas`, which answers
    /// with bare labels (strings or numbers).
    pub fn from_labels(labels: Vec<serde_json::Value>) -> Vec<Jornada> {
        labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| Jornada {
                index,
                label: match label {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect()
    }

    pub fn value(&self) -> String {
        self.index.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_keep_order_and_index() {
        let jornadas = Jornada::from_labels(vec![json!("Jornada 1"), json!(2)]);
        assert_eq!(jornadas.len(), 2);
        assert_eq!(jornadas[0].value(), "0");
        assert_eq!(jornadas[0].label, "Jornada 1");
        assert_eq!(jornadas[1].value(), "1");
        assert_eq!(jornadas[1].label, "2");
    }
}
