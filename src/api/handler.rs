use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use crate::api::auth::AccessToken;
use crate::api::extract::JsonBody;
use crate::api::payloads::*;
use crate::error::{AppError, Result};
use crate::platform::types::{Project, ProjectUser};
use crate::server::AppState;
use crate::workflow::assign::{self, MISSING_PARAMETERS};
use crate::workflow::projects;
use crate::workflow::types::BatchAssignRequest;

fn require(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing required parameter: {name}")))
}

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<Project>>> {
    let account_id = require(query.account_id, "accountId")?;
    let projects = state
        .platform
        .list_projects(&account_id, token.as_str())
        .await?;
    Ok(Json(projects))
}

/// Single project, wrapped in a list so the admin table can render it like a search result.
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<Project>>> {
    let project_id = require(query.project_id, "projectId")?;
    let project = state
        .platform
        .get_project(&project_id, token.as_str())
        .await?;
    Ok(Json(vec![project]))
}

pub async fn create_projects(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    JsonBody(request): JsonBody<CreateProjectsRequest>,
) -> Result<Json<CreateProjectsResponse>> {
    let account_id = require(request.account_id, "accountId")?;

    let report = projects::create_projects(
        state.platform.as_ref(),
        &account_id,
        request.data,
        token.as_str(),
        state.config.poll_policy(),
    )
    .await;

    Ok(Json(report.into()))
}

pub async fn list_project_users(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<ProjectUser>>> {
    let project_id = require(query.project_id, "projectId")?;
    let users = state
        .platform
        .list_project_users(&project_id, token.as_str())
        .await?;
    Ok(Json(users))
}

pub async fn import_project_users(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    JsonBody(request): JsonBody<ImportUsersRequest>,
) -> Result<Json<Value>> {
    let project_id = require(request.project_id, "projectId")?;

    tracing::info!(project_id = %project_id, users = request.data.len(), "Importing project users");

    let response = state
        .platform
        .import_project_users(&project_id, &request.data, token.as_str())
        .await?;
    Ok(Json(response))
}

pub async fn batch_assign(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    JsonBody(request): JsonBody<BatchAssignRequest>,
) -> Result<Json<BatchAssignResponse>> {
    let assignment = request.validate(&state.config.batch.allowed_products)?;

    let summary = assign::assign_user_to_projects(
        state.platform.as_ref(),
        assignment,
        token.as_str(),
        state.config.batch_policy(),
    )
    .await;

    Ok(Json(summary.into()))
}

pub async fn assign_projects(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(user_id): Path<String>,
    JsonBody(request): JsonBody<AssignProjectsRequest>,
) -> Result<Json<AssignProjectsResponse>> {
    let project_ids = request
        .project_ids
        .ok_or_else(|| AppError::Validation(MISSING_PARAMETERS.to_string()))?;

    let summary = assign::assign_projects_to_user(
        state.platform.as_ref(),
        &user_id,
        project_ids,
        token.as_str(),
    )
    .await;

    Ok(Json(summary.into()))
}
