use crate::models::filters::SearchFilters;
use chrono::{DateTime, Duration, Utc};

pub fn build_search_query(text: &str, filters: &SearchFilters) -> String {
    build_search_query_at(text, filters, Utc::now())
}

pub(crate) fn build_search_query_at(
    text: &str,
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !text.trim().is_empty() {
        parts.push(text.to_string());
    }

    for language in &filters.languages {
        parts.push(format!("language:{}", language));
    }

    if filters.has_good_first_issues {
        parts.push("good-first-issues:>0".to_string());
    }

    if let Some(min_stars) = filters.min_stars {
        if min_stars > 0 {
            parts.push(format!("stars:>={}", min_stars));
        }
    }

    if let Some(license) = filters.license.as_deref() {
        if !license.is_empty() {
            parts.push(format!("license:{}", license));
        }
    }

    let activity_date = now - Duration::days(filters.activity_days as i64);
    parts.push(format!("pushed:>{}", activity_date.format("%Y-%m-%d")));

    parts.join(" ")
}
