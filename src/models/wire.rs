// src/models/wire.rs

//! Shapes of the portal's JSON responses.
//!
//! The portal is an ASP.NET WebForms site whose page methods wrap every result
//! in `{"d": "..."}`, where `d` is itself a JSON document serialized to a
//! string. Numeric columns arrive as numbers on some endpoints and as strings on
//! others, so the row types accept both.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Outer `{"d": "<json>"}` wrapper returned by every page method.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub d: String,
}

impl Envelope {
    /// Decode the outer envelope and then the JSON string it carries.
    pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
        let envelope: Envelope = serde_json::from_str(body)
            .map_err(|e| AppError::parse(format!("response is not a {{\"d\": ..}} envelope: {e}")))?;
        serde_json::from_str(&envelope.d)
            .map_err(|e| AppError::parse(format!("envelope payload is not valid JSON: {e}")))
    }
}

/// One row of the station list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRow {
    #[serde(rename = "Companyname")]
    pub company_name: String,

    #[serde(rename = "Sno", deserialize_with = "int_like")]
    pub sno: i64,

    #[serde(rename = "City", default, deserialize_with = "nullable_string")]
    pub city: String,

    #[serde(rename = "StationId", deserialize_with = "int_like")]
    pub station_id: i64,

    #[serde(rename = "CompanyId", deserialize_with = "int_like")]
    pub company_id: i64,
}

/// One row of the problem bank endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemBankRow {
    #[serde(rename = "StationId", deserialize_with = "int_like")]
    pub station_id: i64,

    #[serde(rename = "CompanyName", default, deserialize_with = "nullable_string")]
    pub company_name: String,

    #[serde(rename = "Tags", default, deserialize_with = "nullable_string")]
    pub tags: String,

    #[serde(rename = "stipend", default, deserialize_with = "int_like_or_zero")]
    pub stipend: i64,

    #[serde(rename = "IndustryDomain", default, deserialize_with = "nullable_string")]
    pub industry_domain: String,

    #[serde(rename = "City", default, deserialize_with = "nullable_string")]
    pub city: String,
}

/// One element of the array acknowledging a preference submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitAck {
    #[serde(default)]
    pub message: Option<String>,
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accept `12`, `12.0` or `"12"`.
pub fn int_like<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_to_i64(&value)
        .ok_or_else(|| de::Error::custom(format!("expected an integer, found {value}")))
}

/// Like [`int_like`], but `null` and `""` become 0.
pub fn int_like_or_zero<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(0),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        _ => value_to_i64(&value)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, found {value}"))),
    }
}

/// Treat `null` as an empty string.
pub fn nullable_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_decoded_twice() {
        let body = r#"{"d":"[{\"Companyname\":\" Acme, Pune \",\"Sno\":1,\"City\":\"Pune\",\"StationId\":\"42\",\"CompanyId\":7}]"}"#;
        let rows: Vec<StationRow> = Envelope::decode(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company_name, " Acme, Pune ");
        assert_eq!(rows[0].station_id, 42);
        assert_eq!(rows[0].company_id, 7);
    }

    #[test]
    fn envelope_without_d_is_a_parse_error() {
        let err = Envelope::decode::<Vec<StationRow>>(r#"[{"Companyname":"x"}]"#).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn single_encoded_payload_is_rejected() {
        // `d` must be a string holding JSON, not the JSON itself.
        let err = Envelope::decode::<Vec<StationRow>>(r#"{"d":[]}"#).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn problem_bank_row_tolerates_nulls() {
        let row: ProblemBankRow = serde_json::from_str(
            r#"{"StationId":5,"CompanyName":"Acme","Tags":null,"stipend":null,"IndustryDomain":null,"City":"Goa"}"#,
        )
        .unwrap();
        assert_eq!(row.stipend, 0);
        assert_eq!(row.tags, "");
        assert_eq!(row.industry_domain, "");
        assert_eq!(row.city, "Goa");
    }

    #[test]
    fn stipend_accepts_numeric_strings() {
        let row: ProblemBankRow =
            serde_json::from_str(r#"{"StationId":"5","stipend":"35000"}"#).unwrap();
        assert_eq!(row.stipend, 35000);
    }

    #[test]
    fn whole_floats_are_accepted_but_fractions_are_not() {
        let row: ProblemBankRow =
            serde_json::from_str(r#"{"StationId":5.0,"stipend":35000.0}"#).unwrap();
        assert_eq!(row.station_id, 5);
        assert_eq!(row.stipend, 35000);

        assert!(serde_json::from_str::<ProblemBankRow>(r#"{"StationId":5.7}"#).is_err());
        assert!(
            serde_json::from_str::<ProblemBankRow>(r#"{"StationId":5,"stipend":35000.9}"#)
                .is_err()
        );
    }

    #[test]
    fn non_numeric_station_id_fails() {
        let res = serde_json::from_str::<ProblemBankRow>(r#"{"StationId":"abc"}"#);
        assert!(res.is_err());
    }
}
