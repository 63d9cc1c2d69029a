use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub watchers_count: u32,
    pub forks_count: u32,
    pub open_issues_count: u32,
    pub language: Option<String>,
    pub license: Option<License>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub default_branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub spdx_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub items: Vec<Repository>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssueSearchResponse {
    pub total_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub id: u64,
    pub contributions: u64,
}
