#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorProto {
    /// A short error code that summarizes the error.
    pub reason: Option<String>,
    /// Specifies where the error occurred, if present.
    pub location: Option<String>,
    /// Debugging information. This property is internal to Google and should not be used.
    pub debug_info: Option<String>,
    /// A human-readable description of the error.
    pub message: Option<String>,
}
