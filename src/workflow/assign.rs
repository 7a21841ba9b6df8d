use crate::batch::{run_batched, summarize, BatchPolicy, BatchSummary};
use crate::error::{AppError, Result};
use crate::platform::types::{Product, ProjectUserAssignment};
use crate::platform::AdminPlatform;
use crate::workflow::types::{BatchAssignRequest, BatchAssignment};

pub const MISSING_PARAMETERS: &str = "Missing required parameters";

fn required(value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(MISSING_PARAMETERS.to_string())),
    }
}

impl BatchAssignRequest {
    /// Check required fields, filter products, and resolve the role override.
    pub fn validate(self, allowed_products: &[String]) -> Result<BatchAssignment> {
        let account_id = required(self.account_id)?;
        let user_email = required(self.user_email)?;
        let company_id = required(self.company_id)?;

        let project_ids = match self.project_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Err(AppError::Validation(MISSING_PARAMETERS.to_string())),
        };

        Ok(BatchAssignment {
            account_id,
            user_email,
            company_id,
            role_ids: effective_roles(self.role_ids, self.role_id),
            products: filter_products(self.products.unwrap_or_default(), allowed_products),
            project_ids,
        })
    }
}

/// Drop products whose key isn't allowed. Unknown keys are not an error.
pub fn filter_products(products: Vec<Product>, allowed: &[String]) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| allowed.iter().any(|a| *a == p.key))
        .collect()
}

/// A non-empty `role_id` replaces the whole role list.
pub fn effective_roles(role_ids: Option<Vec<String>>, role_id: Option<String>) -> Vec<String> {
    match role_id {
        Some(id) if !id.trim().is_empty() => vec![id],
        _ => role_ids.unwrap_or_default(),
    }
}

/// Add one user to many projects, `policy.batch_size` at a time.
pub async fn assign_user_to_projects(
    platform: &dyn AdminPlatform,
    assignment: BatchAssignment,
    token: &str,
    policy: BatchPolicy,
) -> BatchSummary<String> {
    tracing::info!(
        account_id = %assignment.account_id,
        user = %assignment.user_email,
        projects = assignment.project_ids.len(),
        roles = ?assignment.role_ids,
        batch_size = policy.batch_size,
        "Starting batch assignment"
    );

    let template = ProjectUserAssignment {
        email: assignment.user_email.clone(),
        company_id: Some(assignment.company_id.clone()),
        role_ids: assignment.role_ids.clone(),
        products: assignment.products.clone(),
    };
    let template = &template;

    let outcomes = run_batched(
        assignment.project_ids.clone(),
        |project_id| async move {
            platform
                .add_project_user(&project_id, template, token)
                .await
                .inspect_err(|e| {
                    tracing::warn!(project_id = %project_id, error = %e, "Failed to assign user");
                })
        },
        policy,
    )
    .await;

    let summary = summarize(outcomes, assignment.project_ids);
    tracing::info!(
        user = %assignment.user_email,
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        "Batch assignment finished"
    );

    summary
}

/// Add an existing account member to every project at once, with no pacing.
pub async fn assign_projects_to_user(
    platform: &dyn AdminPlatform,
    user_id: &str,
    project_ids: Vec<String>,
    token: &str,
) -> BatchSummary<String> {
    tracing::info!(user_id = %user_id, projects = project_ids.len(), "Assigning projects to user");

    let outcomes = run_batched(
        project_ids.clone(),
        |project_id| async move {
            platform
                .add_user_to_project(&project_id, user_id, token)
                .await
                .inspect_err(|e| {
                    tracing::warn!(project_id = %project_id, user_id = %user_id, error = %e, "Failed to add user to project");
                })
        },
        BatchPolicy::unbounded(),
    )
    .await;

    summarize(outcomes, project_ids)
}
