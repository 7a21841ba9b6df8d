use crate::batch::{await_active, run_batched, summarize, BatchPolicy, PollPolicy};
use crate::error::{AppError, Result};
use crate::platform::types::ProjectSpec;
use crate::platform::AdminPlatform;
use crate::workflow::types::ProjectCreationReport;

/// Create every project concurrently and make the caller admin of each.
///
/// A project lands in `succeeded` only once it is active and the admin grant
/// went through. Both lists keep the order of `specs`.
pub async fn create_projects(
    platform: &dyn AdminPlatform,
    account_id: &str,
    specs: Vec<ProjectSpec>,
    token: &str,
    poll: PollPolicy,
) -> ProjectCreationReport {
    tracing::info!(account_id = %account_id, count = specs.len(), "Creating projects");

    let names: Vec<String> = specs.iter().map(|s| s.name.clone()).collect();

    let outcomes = run_batched(
        specs,
        |spec| provision_project(platform, account_id, spec, token, poll),
        BatchPolicy::unbounded(),
    )
    .await;

    let mut report = ProjectCreationReport::default();
    for detail in summarize(outcomes, names).details {
        if detail.success {
            report.succeeded.push(detail.key);
        } else {
            tracing::warn!(
                name = %detail.key,
                error = detail.error.as_deref().unwrap_or_default(),
                "Failed to create project"
            );
            report.failed.push(detail.key);
        }
    }

    tracing::info!(
        account_id = %account_id,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Project creation finished"
    );

    report
}

/// Create one project, wait for it to activate, then grant the caller admin.
async fn provision_project(
    platform: &dyn AdminPlatform,
    account_id: &str,
    spec: ProjectSpec,
    token: &str,
    poll: PollPolicy,
) -> Result<String> {
    if spec.name.trim().is_empty() {
        return Err(AppError::Validation("Project name is required".to_string()));
    }

    let created = platform.create_project(account_id, &spec, token).await?;

    let active = await_active(
        created,
        |id| async move { platform.get_project(&id, token).await },
        poll,
    )
    .await?;

    let profile = platform.get_user_profile(token).await?;
    platform
        .add_project_admin(&active.id, &profile.email, token)
        .await?;

    tracing::debug!(project_id = %active.id, admin = %profile.email, "Project provisioned");
    Ok(spec.name)
}
