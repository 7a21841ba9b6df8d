use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::batch::{BatchSummary, OutcomeStatus};
use crate::platform::types::ProjectSpec;
use crate::workflow::types::ProjectCreationReport;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub account_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectsRequest {
    pub account_id: Option<String>,
    #[serde(default)]
    pub data: Vec<ProjectSpec>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CreateProjectsResponse {
    #[serde(rename = "Succeed")]
    pub succeed: Vec<String>,
    #[serde(rename = "Failed")]
    pub failed: Vec<String>,
}

impl From<ProjectCreationReport> for CreateProjectsResponse {
    fn from(report: ProjectCreationReport) -> Self {
        Self {
            succeed: report.succeeded,
            failed: report.failed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportUsersRequest {
    pub project_id: Option<String>,
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignProjectsRequest {
    pub project_ids: Option<Vec<String>>,
}

/// Response of `POST /api/admin/batch-assign`.
#[derive(Debug, Serialize)]
pub struct BatchAssignResponse {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<BatchAssignDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAssignDetail {
    pub project_id: String,
    pub success: bool,
    pub error: Option<String>,
}

impl From<BatchSummary<String>> for BatchAssignResponse {
    fn from(summary: BatchSummary<String>) -> Self {
        Self {
            total: summary.total,
            successful: summary.successful,
            failed: summary.failed,
            details: summary
                .details
                .into_iter()
                .map(|d| BatchAssignDetail {
                    project_id: d.key,
                    success: d.success,
                    error: d.error,
                })
                .collect(),
        }
    }
}

/// Response of `POST /users/:user_id/assign-projects`.
#[derive(Debug, Serialize)]
pub struct AssignProjectsResponse {
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<AssignProjectsDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignProjectsDetail {
    pub project_id: String,
    pub status: OutcomeStatus,
    pub error: Option<String>,
}

impl From<BatchSummary<String>> for AssignProjectsResponse {
    fn from(summary: BatchSummary<String>) -> Self {
        Self {
            successful: summary.successful,
            failed: summary.failed,
            details: summary
                .details
                .into_iter()
                .map(|d| AssignProjectsDetail {
                    project_id: d.key,
                    status: d.status,
                    error: d.error,
                })
                .collect(),
        }
    }
}
