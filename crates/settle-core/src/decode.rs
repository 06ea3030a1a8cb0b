//! Typed decoding of raw JSON records at the fetch boundary.
//!
//! Elements that do not have the expected shape are quarantined: dropped from
//! the payload and summarized in a [`Quarantine`] so the reporter can surface
//! them. A failed outcome passes through unchanged.

use serde_json::Value;

use crate::outcome::{Outcome, Warning};
use crate::records::{PrimaryRecord, SecondaryRecord};

/// Records rejected while decoding one endpoint's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarantine {
    pub rejected: usize,
    pub first_error: Option<String>,
}

impl Quarantine {
    const fn clean() -> Self {
        Self {
            rejected: 0,
            first_error: None,
        }
    }

    fn reject(&mut self, index: usize, error: impl std::fmt::Display) {
        if self.first_error.is_none() {
            self.first_error = Some(format!("record {index}: {error}"));
        }
        self.rejected += 1;
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.rejected == 0
    }

    /// Convert into a reporter warning, or `None` if nothing was rejected.
    #[must_use]
    pub fn into_warning(self, endpoint: &str) -> Option<Warning> {
        if self.is_clean() {
            return None;
        }
        Some(Warning::Quarantined {
            endpoint: endpoint.to_string(),
            rejected: self.rejected,
            first_error: self.first_error.unwrap_or_default(),
        })
    }
}

fn decode_each<T>(
    outcome: Outcome<Value>,
    mut decode: impl FnMut(Value) -> Result<T, String>,
) -> (Outcome<T>, Quarantine) {
    let mut quarantine = Quarantine::clean();
    let decoded = match outcome {
        Outcome::Success { payload } => {
            let mut records = Vec::with_capacity(payload.len());
            for (index, raw) in payload.into_iter().enumerate() {
                match decode(raw) {
                    Ok(record) => records.push(record),
                    Err(error) => quarantine.reject(index, error),
                }
            }
            Outcome::success(records)
        }
        Outcome::Failure { reason } => Outcome::failure(reason),
    };
    (decoded, quarantine)
}

/// Decode `{ id, name }` primary records.
#[must_use]
pub fn decode_primary(outcome: Outcome<Value>) -> (Outcome<PrimaryRecord>, Quarantine) {
    decode_each(outcome, |raw| {
        serde_json::from_value::<PrimaryRecord>(raw).map_err(|e| e.to_string())
    })
}

/// Decode secondary records, lifting `foreign_key_field` out of each object.
///
/// The foreign key must be a JSON integer; numeric strings are rejected. Every
/// other field is kept as an attribute.
#[must_use]
pub fn decode_secondary(
    outcome: Outcome<Value>,
    foreign_key_field: &str,
) -> (Outcome<SecondaryRecord>, Quarantine) {
    decode_each(outcome, |raw| {
        let Value::Object(mut attributes) = raw else {
            return Err("expected a JSON object".to_string());
        };
        let foreign_key = match attributes.remove(foreign_key_field) {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| format!("'{foreign_key_field}' is not an integer: {n}"))?,
            Some(other) => {
                return Err(format!("'{foreign_key_field}' is not an integer: {other}"));
            }
            None => return Err(format!("missing foreign key '{foreign_key_field}'")),
        };
        Ok(SecondaryRecord::new(foreign_key, attributes))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::outcome::{FailureReason, HttpStatus};

    #[test]
    fn primary_quarantines_bad_shapes() {
        let raw = Outcome::success(vec![
            json!({ "id": 1, "name": "Leanne Graham" }),
            json!({ "id": "2", "name": "Ervin Howell" }),
            json!({ "name": "no id" }),
            json!({ "id": 3, "name": "Clementine Bauch" }),
        ]);

        let (decoded, quarantine) = decode_primary(raw);
        let names: Vec<_> = decoded
            .payload_or_empty()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Leanne Graham", "Clementine Bauch"]);
        assert_eq!(quarantine.rejected, 2);
        assert!(
            quarantine
                .first_error
                .as_deref()
                .is_some_and(|e| e.starts_with("record 1:"))
        );
    }

    #[test]
    fn secondary_lifts_foreign_key() {
        let raw = Outcome::success(vec![json!({
            "userId": 1,
            "id": 7,
            "title": "delectus aut autem",
            "completed": false
        })]);

        let (decoded, quarantine) = decode_secondary(raw, "userId");
        assert!(quarantine.is_clean());
        let record = &decoded.payload_or_empty()[0];
        assert_eq!(record.foreign_key, 1);
        assert!(record.attribute("userId").is_none());
        assert_eq!(record.attribute("completed"), Some(&json!(false)));
    }

    #[test]
    fn secondary_rejects_string_and_fractional_keys() {
        let raw = Outcome::success(vec![
            json!({ "userId": "1", "completed": true }),
            json!({ "userId": 1.5, "completed": true }),
            json!(["not", "an", "object"]),
            json!({ "completed": true }),
        ]);

        let (decoded, quarantine) = decode_secondary(raw, "userId");
        assert!(decoded.is_success());
        assert!(decoded.is_empty());
        assert_eq!(quarantine.rejected, 4);
    }

    #[test]
    fn failure_passes_through_without_quarantine() {
        let reason = FailureReason::Http(HttpStatus::Code(500));
        let (decoded, quarantine) = decode_primary(Outcome::failure(reason.clone()));
        assert_eq!(decoded.reason(), Some(&reason));
        assert!(quarantine.into_warning("https://example.test/users").is_none());
    }

    #[test]
    fn quarantine_becomes_warning() {
        let (_, quarantine) = decode_primary(Outcome::success(vec![json!(null)]));
        let warning = quarantine.into_warning("https://example.test/users");
        assert!(matches!(
            warning,
            Some(Warning::Quarantined { rejected: 1, .. })
        ));
    }
}
