use std::collections::HashMap;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::dataset::DatasetReference;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDatasetsRequest {
    /// The maximum number of results to return in a single response page.
    /// Leverage the page tokens to iterate through the entire collection.
    pub max_results: Option<i64>,
    /// Whether to list all datasets, including hidden ones.
    pub all: Option<bool>,
    /// An expression for filtering the results of the request by label.
    /// The syntax is "labels.<name>[:<value>]".
    pub filter: Option<String>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOverview {
    /// The resource type.
    /// This property always returns the value "bigquery#dataset"
    #[serde(default)]
    pub kind: String,
    /// The fully-qualified, unique, opaque ID of the dataset.
    #[serde(default)]
    pub id: String,
    /// The dataset reference.
    /// Use this property to access specific parts of the dataset's ID, such as project ID or dataset ID.
    pub dataset_reference: DatasetReference,
    /// The labels associated with this dataset.
    pub labels: Option<HashMap<String, String>>,
    /// An alternate name for the dataset. The friendly name is purely decorative in nature.
    pub friendly_name: Option<String>,
    /// The geographic location where the dataset resides.
    pub location: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDatasetsResponse {
    /// Output only. The resource type. This property always returns the value "bigquery#datasetList"
    #[serde(default)]
    pub kind: String,
    /// Output only. A hash value of the results page.
    #[serde(default)]
    pub etag: String,
    /// An array of the dataset resources in the project.
    /// This property is omitted when there are no datasets in the project.
    #[serde(default)]
    pub datasets: Vec<DatasetOverview>,
    /// A token that can be used to request the next results page.
    /// This property is omitted on the final results page.
    pub next_page_token: Option<String>,
}

pub fn build(base_url: &str, client: &Client, project_id: &str, req: &ListDatasetsRequest) -> RequestBuilder {
    let url = format!("{}/projects/{}/datasets", base_url, project_id);
    client.get(url).query(req)
}
