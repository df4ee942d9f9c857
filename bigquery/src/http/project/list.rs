use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::project::ProjectReference;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsRequest {
    /// The maximum number of results to return in a single response page.
    pub max_results: Option<i64>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    /// The resource type.
    #[serde(default)]
    pub kind: String,
    /// An opaque ID of this project.
    #[serde(default)]
    pub id: String,
    /// The numeric ID of this project.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub numeric_id: Option<u64>,
    /// A unique reference to this project.
    pub project_reference: ProjectReference,
    /// A descriptive name for this project.
    pub friendly_name: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsResponse {
    /// The resource type of the response.
    #[serde(default)]
    pub kind: String,
    /// A hash of the page of results.
    #[serde(default)]
    pub etag: String,
    /// Use this token to request the next page of results.
    pub next_page_token: Option<String>,
    /// Projects to which the user has at least READ access.
    #[serde(default)]
    pub projects: Vec<ProjectOverview>,
    /// The total number of projects in the page.
    pub total_items: Option<i64>,
}

pub fn build(base_url: &str, client: &Client, req: &ListProjectsRequest) -> RequestBuilder {
    let url = format!("{}/projects", base_url);
    client.get(url).query(req)
}
