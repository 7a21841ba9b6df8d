use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApsConfig;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::AdminPlatform;

use super::mapper::{error_message, Page};

/// Product and access level that make a user project administrator.
const ADMIN_PRODUCT: &str = "projectAdministration";
const ADMIN_ACCESS: &str = "administrator";

pub struct AccPlatform {
    client: Client,
    config: ApsConfig,
}

impl AccPlatform {
    pub fn new(config: &ApsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// `{base}/construction/admin/{version}/{path}`
    fn admin_url(&self, version: &str, path: &str) -> String {
        format!(
            "{}/construction/admin/{version}/{path}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn project_url(&self, version: &str, project_id: &str, rest: &str) -> String {
        let id = urlencoding::encode(project_id);
        self.admin_url(version, &format!("projects/{id}{rest}"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteApi(error_message(status, &body)));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Collect every page of a list endpoint.
    async fn get_all<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<Vec<T>> {
        let limit = self.config.page_size;
        let mut offset: usize = 0;
        let mut items = Vec::new();

        loop {
            let request = self
                .client
                .get(url)
                .bearer_auth(token)
                .query(&[("limit", limit as usize), ("offset", offset)]);
            let page: Page<T> = self.send_json(request).await?;

            let more = page.has_more(limit);
            offset += page.results.len();
            items.extend(page.results);

            if !more {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl AdminPlatform for AccPlatform {
    async fn list_projects(&self, account_id: &str, token: &str) -> Result<Vec<Project>> {
        let url = self.admin_url(
            "v1",
            &format!("accounts/{}/projects", urlencoding::encode(account_id)),
        );
        self.get_all(&url, token).await
    }

    async fn get_project(&self, project_id: &str, token: &str) -> Result<Project> {
        let url = self.project_url("v1", project_id, "");
        self.send_json(self.client.get(&url).bearer_auth(token))
            .await
    }

    async fn create_project(
        &self,
        account_id: &str,
        spec: &ProjectSpec,
        token: &str,
    ) -> Result<Project> {
        let url = self.admin_url(
            "v1",
            &format!("accounts/{}/projects", urlencoding::encode(account_id)),
        );

        let project: Project = self
            .send_json(self.client.post(&url).bearer_auth(token).json(spec))
            .await?;

        tracing::info!(
            project_id = %project.id,
            name = %project.name,
            status = %project.status,
            "Created project"
        );

        Ok(project)
    }

    async fn list_project_users(&self, project_id: &str, token: &str) -> Result<Vec<ProjectUser>> {
        let url = self.project_url("v1", project_id, "/users");
        self.get_all(&url, token).await
    }

    async fn import_project_users(
        &self,
        project_id: &str,
        users: &[Value],
        token: &str,
    ) -> Result<Value> {
        let url = self.project_url("v2", project_id, "/users:import");
        let body = serde_json::json!({ "users": users });

        self.send_json(self.client.post(&url).bearer_auth(token).json(&body))
            .await
    }

    async fn add_project_user(
        &self,
        project_id: &str,
        assignment: &ProjectUserAssignment,
        token: &str,
    ) -> Result<()> {
        let url = self.project_url("v1", project_id, "/users");

        self.send(self.client.post(&url).bearer_auth(token).json(assignment))
            .await?;

        Ok(())
    }

    async fn add_user_to_project(
        &self,
        project_id: &str,
        user_id: &str,
        token: &str,
    ) -> Result<()> {
        let url = self.project_url("v1", project_id, "/users");
        let body = serde_json::json!({ "userId": user_id, "products": [] });

        self.send(self.client.post(&url).bearer_auth(token).json(&body))
            .await?;

        Ok(())
    }

    async fn add_project_admin(&self, project_id: &str, email: &str, token: &str) -> Result<()> {
        let assignment = ProjectUserAssignment {
            email: email.to_string(),
            company_id: None,
            role_ids: Vec::new(),
            products: vec![Product::new(ADMIN_PRODUCT, ADMIN_ACCESS)],
        };

        self.add_project_user(project_id, &assignment, token).await
    }

    async fn get_user_profile(&self, token: &str) -> Result<UserProfile> {
        self.send_json(self.client.get(&self.config.userinfo_url).bearer_auth(token))
            .await
    }
}
