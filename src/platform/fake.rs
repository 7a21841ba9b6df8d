//! In-memory [`AdminPlatform`] for workflow and route tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::AdminPlatform;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProject(String),
    GetProject(String),
    AddProjectUser(String, ProjectUserAssignment),
    AddUserToProject(String, String),
    AddProjectAdmin(String, String),
    GetUserProfile,
}

#[derive(Default)]
pub struct FakePlatform {
    /// Project ids (or names, for creation) whose calls fail.
    failing: HashSet<String>,
    /// Statuses handed out by successive `get_project` calls, per id.
    statuses: Mutex<HashMap<String, VecDeque<String>>>,
    /// Per-project latency for add-user calls.
    latency: HashMap<String, Duration>,
    projects: Vec<Project>,
    users: Vec<ProjectUser>,
    calls: Mutex<Vec<Call>>,
    last_token: Mutex<Option<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Successive `get_project` calls for `project_id` report `statuses`, then active.
    pub fn with_statuses(self, project_id: &str, statuses: &[&str]) -> Self {
        self.statuses.lock().unwrap().insert(
            project_id.to_string(),
            statuses.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_latency(mut self, project_id: &str, latency: Duration) -> Self {
        self.latency.insert(project_id.to_string(), latency);
        self
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_users(mut self, users: Vec<ProjectUser>) -> Self {
        self.users = users;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    fn record(&self, call: Call, token: &str) {
        self.calls.lock().unwrap().push(call);
        *self.last_token.lock().unwrap() = Some(token.to_string());
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.contains(key) {
            return Err(AppError::RemoteApi(format!("403 Forbidden: no access to {key}")));
        }
        Ok(())
    }
}

pub fn project(id: &str, name: &str, status: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
        extra: Map::new(),
    }
}

/// Id the fake assigns to a project created with `name`.
pub fn created_id(name: &str) -> String {
    format!("id-{name}")
}

#[async_trait]
impl AdminPlatform for FakePlatform {
    async fn list_projects(&self, account_id: &str, _token: &str) -> Result<Vec<Project>> {
        self.check(account_id)?;
        Ok(self.projects.clone())
    }

    async fn get_project(&self, project_id: &str, token: &str) -> Result<Project> {
        self.record(Call::GetProject(project_id.to_string()), token);
        self.check(project_id)?;

        if let Some(found) = self.projects.iter().find(|p| p.id == project_id) {
            return Ok(found.clone());
        }

        let status = self
            .statuses
            .lock()
            .unwrap()
            .get_mut(project_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| ACTIVE_STATUS.to_string());
        let name = project_id.trim_start_matches("id-");
        Ok(project(project_id, name, &status))
    }

    async fn create_project(
        &self,
        _account_id: &str,
        spec: &ProjectSpec,
        token: &str,
    ) -> Result<Project> {
        self.record(Call::CreateProject(spec.name.clone()), token);
        self.check(&spec.name)?;
        Ok(project(&created_id(&spec.name), &spec.name, "pending"))
    }

    async fn list_project_users(&self, project_id: &str, _token: &str) -> Result<Vec<ProjectUser>> {
        self.check(project_id)?;
        Ok(self.users.clone())
    }

    async fn import_project_users(
        &self,
        project_id: &str,
        users: &[Value],
        _token: &str,
    ) -> Result<Value> {
        self.check(project_id)?;
        Ok(serde_json::json!({ "projectId": project_id, "imported": users.len() }))
    }

    async fn add_project_user(
        &self,
        project_id: &str,
        assignment: &ProjectUserAssignment,
        token: &str,
    ) -> Result<()> {
        if let Some(latency) = self.latency.get(project_id) {
            tokio::time::sleep(*latency).await;
        }
        self.record(
            Call::AddProjectUser(project_id.to_string(), assignment.clone()),
            token,
        );
        self.check(project_id)
    }

    async fn add_user_to_project(
        &self,
        project_id: &str,
        user_id: &str,
        token: &str,
    ) -> Result<()> {
        if let Some(latency) = self.latency.get(project_id) {
            tokio::time::sleep(*latency).await;
        }
        self.record(
            Call::AddUserToProject(project_id.to_string(), user_id.to_string()),
            token,
        );
        self.check(project_id)
    }

    async fn add_project_admin(&self, project_id: &str, email: &str, token: &str) -> Result<()> {
        self.record(
            Call::AddProjectAdmin(project_id.to_string(), email.to_string()),
            token,
        );
        self.check(project_id)
    }

    async fn get_user_profile(&self, token: &str) -> Result<UserProfile> {
        self.record(Call::GetUserProfile, token);
        Ok(UserProfile {
            email: "admin@example.com".to_string(),
            name: Some("Admin".to_string()),
        })
    }
}
