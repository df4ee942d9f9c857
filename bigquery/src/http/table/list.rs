use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::table::TableReference;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTablesRequest {
    /// The maximum number of results to return in a single response page.
    /// Leverage the page tokens to iterate through the entire collection.
    pub max_results: Option<i64>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableOverview {
    /// The resource type.
    #[serde(default)]
    pub kind: String,
    /// An opaque ID of the table.
    #[serde(default)]
    pub id: String,
    /// A reference uniquely identifying table.
    pub table_reference: TableReference,
    /// The user-friendly name for this table.
    pub friendly_name: Option<String>,
    /// The time when this table was created, in milliseconds since the epoch.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub creation_time: Option<i64>,
    /// The type of table.
    #[serde(rename = "type")]
    pub table_type: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTablesResponse {
    /// The type of list.
    #[serde(default)]
    pub kind: String,
    /// A hash of this page of results.
    #[serde(default)]
    pub etag: String,
    /// Tables in the requested dataset.
    #[serde(default)]
    pub tables: Vec<TableOverview>,
    /// A token to request the next page of results.
    pub next_page_token: Option<String>,
    /// The total number of tables in the dataset.
    pub total_items: Option<i64>,
}

pub fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    dataset_id: &str,
    req: &ListTablesRequest,
) -> RequestBuilder {
    let url = format!("{}/projects/{}/datasets/{}/tables", base_url, project_id, dataset_id);
    client.get(url).query(req)
}
