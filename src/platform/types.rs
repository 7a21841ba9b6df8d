use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::batch::Activatable;

/// Status ACC reports once a project can accept members.
pub const ACTIVE_STATUS: &str = "active";

/// An ACC project. Fields we don't read are kept in `extra` and handed back
/// to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activatable for Project {
    fn resource_id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// Payload for creating a project. Only `name` is required; everything else
/// (type, jobNumber, timezone, ...) goes to ACC as given. A missing name
/// deserializes as empty so the entry fails on its own instead of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Empty when the caller sent none; never matches the allow-list.
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

impl Product {
    pub fn new(key: &str, access: &str) -> Self {
        Self {
            key: key.to_string(),
            access: Some(access.to_string()),
        }
    }
}

/// A member of a project as listed by ACC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of an add-project-user call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUserAssignment {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<String>,
    pub products: Vec<Product>,
}

/// The signed-in user, from the user profile service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}
