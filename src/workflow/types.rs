use serde::Deserialize;

use crate::platform::types::Product;

/// Input to a batch user assignment, as sent by the admin UI.
///
/// Everything is optional at this level so that missing fields surface as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAssignRequest {
    pub account_id: Option<String>,
    pub user_email: Option<String>,
    pub company_id: Option<String>,
    #[serde(default)]
    pub role_ids: Option<Vec<String>>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub project_ids: Option<Vec<String>>,
    /// Overrides `role_ids` for every project when set.
    #[serde(default)]
    pub role_id: Option<String>,
}

/// A validated batch assignment, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAssignment {
    pub account_id: String,
    pub user_email: String,
    pub company_id: String,
    /// Roles applied to every project (after any override).
    pub role_ids: Vec<String>,
    /// Products after allow-list filtering.
    pub products: Vec<Product>,
    pub project_ids: Vec<String>,
}

/// Names of requested projects, split by whether provisioning finished.
///
/// Unlike the legacy admin UI, which listed a name as succeeded as soon as the
/// create call returned, a name is only reported here once the project is
/// active and the admin grant went through, so it never lands in both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCreationReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}
