use crate::models::filters::SearchFilters;
use crate::models::github::{Contributor, IssueSearchResponse, Repository, SearchResponse};
use crate::utils::query::build_search_query;
use lazy_static::lazy_static;
use log::{debug, error};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

lazy_static! {
    static ref LAST_PAGE_REGEX: Regex = Regex::new(r#"page=(\d+)>; rel="last""#).unwrap();
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitHub API error: {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
        }
    }
}

// Auxiliary lookups degrade rather than fail; callers only ever see a count,
// but the two cases stay distinguishable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountLookup {
    Counted(u32),
    Unavailable,
}

impl CountLookup {
    pub fn or_zero(self) -> u32 {
        match self {
            CountLookup::Counted(n) => n,
            CountLookup::Unavailable => 0,
        }
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("repo-pulse"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));

        if let Some(t) = config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", t))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            error!("GitHub API error {} for {}", status, url);
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn search_repositories(
        &self,
        text: &str,
        filters: &SearchFilters,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse, ApiError> {
        let query = build_search_query(text, filters);
        self.get_json(
            "/search/repositories",
            &[
                ("q", query),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    pub async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Repository, ApiError> {
        self.get_json(&format!("/repos/{}/{}", owner, repo), &[]).await
    }

    pub async fn good_first_issues(&self, owner: &str, repo: &str) -> u32 {
        self.lookup_good_first_issues(owner, repo).await.or_zero()
    }

    pub(crate) async fn lookup_good_first_issues(&self, owner: &str, repo: &str) -> CountLookup {
        let query = format!(r#"repo:{}/{} label:"good first issue" state:open"#, owner, repo);
        match self
            .get_json::<IssueSearchResponse>("/search/issues", &[("q", query)])
            .await
        {
            Ok(body) => CountLookup::Counted(body.total_count),
            Err(e) => {
                debug!("good first issue lookup failed for {}/{}: {}", owner, repo, e);
                CountLookup::Unavailable
            }
        }
    }

    pub async fn contributor_count(&self, owner: &str, repo: &str) -> u32 {
        self.lookup_contributor_count(owner, repo).await.or_zero()
    }

    pub(crate) async fn lookup_contributor_count(&self, owner: &str, repo: &str) -> CountLookup {
        let url = format!("{}/repos/{}/{}/contributors", self.base_url, owner, repo);
        debug!("GET {}", url);

        let response = match self
            .client
            .get(&url)
            .query(&[("per_page", "1")])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!("contributor lookup failed for {}/{}: {}", owner, repo, e);
                return CountLookup::Unavailable;
            }
        };

        if !response.status().is_success() {
            debug!(
                "contributor lookup for {}/{} returned {}",
                owner,
                repo,
                response.status()
            );
            return CountLookup::Unavailable;
        }

        // one item per page, so the last page number is the contributor total
        if let Some(link) = response.headers().get("link").and_then(|v| v.to_str().ok()) {
            if let Some(caps) = LAST_PAGE_REGEX.captures(link) {
                if let Ok(last_page) = caps[1].parse::<u32>() {
                    return CountLookup::Counted(last_page);
                }
            }
        }

        match response.json::<Vec<Contributor>>().await {
            Ok(contributors) => CountLookup::Counted(contributors.len() as u32),
            Err(e) => {
                debug!("contributor lookup failed for {}/{}: {}", owner, repo, e);
                CountLookup::Unavailable
            }
        }
    }
}
