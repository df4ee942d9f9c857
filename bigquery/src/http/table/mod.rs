pub mod get;
pub mod list;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    /// Required. The ID of the project containing this table.
    pub project_id: String,
    /// Required. The ID of the dataset containing this table.
    pub dataset_id: String,
    /// Required. The ID of the table.
    /// The ID must contain only letters (a-z, A-Z), numbers (0-9), or underscores (_).
    pub table_id: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableFieldMode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableFieldType {
    #[default]
    String,
    Bytes,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Record,
    Date,
    Time,
    Datetime,
    Geography,
    Numeric,
    Bignumeric,
    Interval,
    Json,
    Range,
    // aliases
    Bool,
    Int64,
    Float64,
    Struct,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableFieldSchema {
    /// Required. The field name.
    /// The name must contain only letters (a-z, A-Z), numbers (0-9), or underscores (_),
    /// and must start with a letter or underscore.
    pub name: String,
    /// Required. The field data type.
    /// Use of RECORD/STRUCT indicates that the field contains a nested schema.
    #[serde(rename(serialize = "type", deserialize = "type"))]
    pub data_type: TableFieldType,
    /// Optional. The field mode. Possible values include NULLABLE, REQUIRED and REPEATED.
    /// The default value is NULLABLE.
    pub mode: Option<TableFieldMode>,
    /// Optional. Describes the nested schema fields if the type property is set to RECORD.
    pub fields: Option<Vec<TableFieldSchema>>,
    /// Optional. The field description. The maximum length is 1,024 characters.
    pub description: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// Describes the fields in a table.
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceFormat {
    #[default]
    Csv,
    Avro,
    NewlineDelimitedJson,
    DatastoreBackup,
    Parquet,
    Orc,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// The type of resource ID.
    #[serde(default)]
    pub kind: String,
    /// Output only. A hash of this resource.
    #[serde(default)]
    pub etag: String,
    /// Output only. An opaque ID uniquely identifying the table.
    #[serde(default)]
    pub id: String,
    /// Required. Reference describing the ID of this table.
    pub table_reference: TableReference,
    /// Optional. A descriptive name for this table.
    pub friendly_name: Option<String>,
    /// Optional. A user-friendly description of this table.
    pub description: Option<String>,
    /// Optional. Describes the schema of this table.
    pub schema: Option<TableSchema>,
    /// Output only. The number of rows of data in this table, excluding any data in the streaming buffer.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub num_rows: Option<u64>,
    /// Output only. The size of this table in logical bytes, excluding any data in the streaming buffer.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub num_bytes: Option<i64>,
    /// Output only. The time when this table was created, in milliseconds since the epoch.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub creation_time: Option<i64>,
    /// Output only. Describes the table type: TABLE, VIEW, SNAPSHOT, MATERIALIZED_VIEW or EXTERNAL.
    #[serde(rename = "type")]
    pub table_type: Option<String>,
    /// Output only. The geographic location where the table resides.
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::http::table::{Table, TableFieldMode, TableFieldType};

    #[test]
    fn test_table() {
        let json = r#"{
            "kind": "bigquery#table",
            "id": "publicdata:samples.shakespeare",
            "tableReference": {"projectId": "publicdata", "datasetId": "samples", "tableId": "shakespeare"},
            "schema": {"fields": [
                {"name": "word", "type": "STRING", "mode": "REQUIRED", "description": "A single unique word"},
                {"name": "word_count", "type": "INTEGER", "mode": "REQUIRED"},
                {"name": "meta", "type": "RECORD", "fields": [{"name": "tag", "type": "STRING"}]}
            ]},
            "numRows": "164656",
            "creationTime": "1335916045099",
            "type": "TABLE",
            "location": "US"
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.num_rows, Some(164656));
        assert_eq!(table.table_type.as_deref(), Some("TABLE"));
        let fields = table.schema.unwrap().fields;
        assert_eq!(fields[0].data_type, TableFieldType::String);
        assert_eq!(fields[0].mode, Some(TableFieldMode::Required));
        assert_eq!(fields[2].fields.as_ref().unwrap()[0].name, "tag");
    }
}
