use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRepository {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub health_score: u8,
    pub last_commit: String,
    pub good_first_issues: u32,
    pub ci_status: CiStatus,
    pub language: String,
    pub license: String,
    pub contributors: u32,
    pub topics: Vec<String>,
    pub signals: Vec<String>,
    pub trend: Trend,
    pub health_breakdown: HealthBreakdown,
    pub avg_issue_response_time: String,
    pub pr_merge_rate: u8,
    pub active_contributors: u32,
    pub contributor_diversity: u32,
    pub code_coverage: u8,
    pub has_good_docs: bool,
    pub has_wiki: bool,
    pub has_website: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiStatus {
    Passing,
    Warning,
    Failing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub activity: i32,
    pub community: i32,
    pub documentation: i32,
    pub freshness: i32,
    pub compatibility: i32,
}
