pub mod acc;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use types::*;

/// Calls against the ACC Admin API. Every call carries the caller's access token.
#[async_trait]
pub trait AdminPlatform: Send + Sync {
    /// List every project in an account, following pagination.
    async fn list_projects(&self, account_id: &str, token: &str) -> Result<Vec<Project>>;

    /// Fetch a single project.
    async fn get_project(&self, project_id: &str, token: &str) -> Result<Project>;

    /// Create a project. ACC activates it asynchronously.
    async fn create_project(
        &self,
        account_id: &str,
        spec: &ProjectSpec,
        token: &str,
    ) -> Result<Project>;

    /// List the members of a project, following pagination.
    async fn list_project_users(&self, project_id: &str, token: &str) -> Result<Vec<ProjectUser>>;

    /// Bulk-import users into a project. Returns ACC's response as-is.
    async fn import_project_users(
        &self,
        project_id: &str,
        users: &[Value],
        token: &str,
    ) -> Result<Value>;

    /// Add one user to a project with the given roles and products.
    async fn add_project_user(
        &self,
        project_id: &str,
        assignment: &ProjectUserAssignment,
        token: &str,
    ) -> Result<()>;

    /// Add an existing account member to a project by user id.
    async fn add_user_to_project(&self, project_id: &str, user_id: &str, token: &str)
        -> Result<()>;

    /// Make `email` a project administrator.
    async fn add_project_admin(&self, project_id: &str, email: &str, token: &str) -> Result<()>;

    /// Profile of the user the token belongs to.
    async fn get_user_profile(&self, token: &str) -> Result<UserProfile>;
}
