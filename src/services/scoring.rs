use crate::models::github::Repository;
use crate::models::scored::{CiStatus, HealthBreakdown, ScoredRepository, Trend};
use chrono::{DateTime, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

pub fn health_score(repo: &Repository, good_first_issues: u32, now: DateTime<Utc>) -> u8 {
    let age_months = (now - repo.created_at).num_milliseconds() as f64 / (MS_PER_DAY * 30.0);
    let days_since_push = (now - repo.pushed_at).num_milliseconds() as f64 / MS_PER_DAY;
    let days_since_update = (now - repo.updated_at).num_milliseconds() as f64 / MS_PER_DAY;

    let mut score: i32 = 50;

    if days_since_push < 7.0 {
        score += 15;
    } else if days_since_push < 30.0 {
        score += 10;
    } else if days_since_push < 90.0 {
        score += 5;
    } else if days_since_push > 180.0 {
        score -= 15;
    }

    if repo.stargazers_count > 10_000 {
        score += 10;
    } else if repo.stargazers_count > 1_000 {
        score += 7;
    } else if repo.stargazers_count > 100 {
        score += 5;
    }

    if good_first_issues > 10 {
        score += 8;
    } else if good_first_issues > 5 {
        score += 5;
    } else if good_first_issues > 0 {
        score += 3;
    }

    if repo.has_wiki {
        score += 3;
    }
    if repo.has_pages {
        score += 3;
    }
    if repo.description.as_deref().is_some_and(|d| !d.is_empty()) {
        score += 2;
    }
    if repo.license.is_some() {
        score += 5;
    }
    if !repo.topics.is_empty() {
        score += 2;
    }

    if age_months > 12.0 && days_since_update < 30.0 {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

pub fn score_repository(
    repo: &Repository,
    good_first_issues: u32,
    now: DateTime<Utc>,
) -> ScoredRepository {
    let days_since_push = (now - repo.pushed_at).num_days();

    let last_commit = match days_since_push {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        d if d < 30 => format!("{} days ago", d),
        d if d < 60 => "1 month ago".to_string(),
        d => format!("{} months ago", d / 30),
    };

    let score = health_score(repo, good_first_issues, now);

    let ci_status = if score > 80 {
        CiStatus::Passing
    } else if score > 60 {
        CiStatus::Warning
    } else {
        CiStatus::Failing
    };

    let trend = if days_since_push < 7 {
        Trend::Up
    } else if days_since_push < 60 {
        Trend::Stable
    } else {
        Trend::Down
    };

    let mut signals = Vec::new();
    if days_since_push < 30 {
        signals.push("Active".to_string());
    }
    if repo.has_pages || repo.has_wiki {
        signals.push("Good Docs".to_string());
    }
    if good_first_issues > 5 {
        signals.push("Beginner Friendly".to_string());
    }

    let avg_issue_response_time = if days_since_push < 7 {
        "< 1 day"
    } else if days_since_push < 14 {
        "< 2 days"
    } else {
        "3-5 days"
    }
    .to_string();

    ScoredRepository {
        id: repo.id.to_string(),
        name: repo.name.clone(),
        description: repo
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description provided")
            .to_string(),
        stars: repo.stargazers_count,
        health_score: score,
        last_commit,
        good_first_issues,
        ci_status,
        language: repo
            .language
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        license: repo
            .license
            .as_ref()
            .and_then(|l| l.spdx_id.clone())
            .unwrap_or_else(|| "None".to_string()),
        contributors: 0,
        topics: repo.topics.clone(),
        signals,
        trend,
        health_breakdown: HealthBreakdown {
            // only the upper bound is clamped; long-dormant repositories go negative
            activity: (((1.0 - days_since_push as f64 / 180.0) * 100.0).round() as i32).min(100),
            community: (((repo.stargazers_count as f64 / 100.0) * 10.0).round() as i32).min(100),
            documentation: if repo.has_wiki || repo.has_pages { 85 } else { 50 },
            freshness: (((1.0 - days_since_push as f64 / 90.0) * 100.0).round() as i32).min(100),
            compatibility: if repo.license.is_some() { 80 } else { 50 },
        },
        avg_issue_response_time,
        pr_merge_rate: (50 + (score as f64 / 3.0).round() as i32).min(85) as u8,
        active_contributors: 0,
        contributor_diversity: 0,
        code_coverage: (60 + (score as f64 / 5.0).round() as i32).min(90) as u8,
        has_good_docs: repo.has_pages || repo.has_wiki,
        has_wiki: repo.has_wiki,
        has_website: repo.has_pages,
    }
}
