use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Reference;

/// `<Task>`: handle of a long-running operation on the API side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(rename = "@href", default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(rename = "@type", default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@operation", default, skip_serializing_if = "String::is_empty")]
    pub operation: String,
    #[serde(rename = "@operationName", default, skip_serializing_if = "String::is_empty")]
    pub operation_name: String,
    #[serde(rename = "@status", default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "@startTime", default, skip_serializing_if = "String::is_empty")]
    pub start_time: String,
    #[serde(rename = "@endTime", default, skip_serializing_if = "String::is_empty")]
    pub end_time: String,
    #[serde(rename = "@expiryTime", default, skip_serializing_if = "String::is_empty")]
    pub expiry_time: String,

    #[serde(rename = "Owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Reference>,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TaskError>,
    #[serde(rename = "User", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Reference>,
    #[serde(rename = "Organization", default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Reference>,
    #[serde(rename = "Progress", default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(rename = "Details", default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl TaskDocument {
    pub fn status(&self) -> TaskStatus {
        self.status.parse().unwrap_or(TaskStatus::Unknown)
    }
}

/// vCloud task lifecycle states, as spelled in the `status` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum TaskStatus {
    Queued,
    PreRunning,
    Running,
    Success,
    Error,
    Canceled,
    Aborted,
    Unknown,
}

impl TaskStatus {
    /// The task will not change state any more.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Error | Self::Canceled | Self::Aborted
        )
    }
}

/// `<Error>` element, both inside tasks and as a standalone error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskError {
    #[serde(rename = "@message", default)]
    pub message: String,
    #[serde(rename = "@majorErrorCode", default)]
    pub major_error_code: String,
    #[serde(rename = "@minorErrorCode", default)]
    pub minor_error_code: String,
}
