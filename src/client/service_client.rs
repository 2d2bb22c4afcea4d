use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::constants::{PR_CREATE_PATH, TEAM_ADD_PATH};
use crate::error::{LoadError, LoadResult};
use crate::models::{PullRequestCreateRequest, TeamCreateRequest};

/// Status and latency of one completed HTTP exchange.
#[derive(Debug, Clone, Copy)]
pub struct CallOutcome {
    pub status: StatusCode,
    pub elapsed: Duration,
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: String) -> LoadResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> LoadResult<CallOutcome> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(LoadError::RequestError)?;

        let status = response.status();
        // The body is not inspected; latency covers the full exchange.
        let _ = response.bytes().await;

        Ok(CallOutcome {
            status,
            elapsed: started.elapsed(),
        })
    }

    pub async fn create_team(&self, team: &TeamCreateRequest) -> LoadResult<CallOutcome> {
        self.post_json(TEAM_ADD_PATH, team).await
    }

    pub async fn create_pull_request(
        &self,
        pr: &PullRequestCreateRequest,
    ) -> LoadResult<CallOutcome> {
        self.post_json(PR_CREATE_PATH, pr).await
    }
}
