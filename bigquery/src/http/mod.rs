use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

pub mod bigquery_client;
pub mod bigquery_dataset_client;
pub mod bigquery_job_client;
pub mod bigquery_project_client;
pub mod bigquery_table_client;
pub mod bigquery_tabledata_client;
pub mod dataset;
pub mod error;
pub mod job;
pub mod project;
pub mod table;
pub mod tabledata;
pub mod types;

/// Int64 values arrive as JSON strings, sometimes as numbers, and may be absent or null.
fn from_str_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let s: Value = Deserialize::deserialize(deserializer)?;
    match s {
        Value::String(s) => T::from_str(&s).map_err(de::Error::custom).map(Some),
        Value::Number(num) => T::from_str(&num.to_string()).map_err(de::Error::custom).map(Some),
        Value::Null => Ok(None),
        _ => Err(de::Error::custom("Incorrect type")),
    }
}

#[cfg(test)]
mod tests {
    #[derive(serde::Deserialize, Debug)]
    struct Sample {
        #[serde(default)]
        required: u64,
        #[serde(default, deserialize_with = "crate::http::from_str_option")]
        optional: Option<i64>,
    }

    #[test]
    fn test_lenient_int64() {
        let v: Sample = serde_json::from_str(r#"{"required": 25, "optional": "-3"}"#).unwrap();
        assert_eq!(v.required, 25);
        assert_eq!(v.optional, Some(-3));

        let v: Sample = serde_json::from_str(r#"{"optional": 12}"#).unwrap();
        assert_eq!(v.optional, Some(12));

        let v: Sample = serde_json::from_str(r#"{"optional": null}"#).unwrap();
        assert_eq!(v.optional, None);

        let v: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(v.optional, None);
    }

    #[test]
    fn test_lenient_int64_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"optional": "x"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"optional": true}"#).is_err());
    }
}
