pub mod list;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReference {
    /// ID of the project. Can be either the numeric ID or the assigned ID of the project.
    pub project_id: String,
}
