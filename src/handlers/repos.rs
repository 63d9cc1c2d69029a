use crate::models::filters::SearchFilters;
use crate::models::scored::ScoredRepository;
use crate::services::github::{ApiError, GitHubClient};
use crate::services::scoring::score_repository;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Result as ActixResult};
use chrono::Utc;
use log::error;
use serde::{Deserialize, Serialize};

pub struct AppState {
    pub github: GitHubClient,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub languages: Option<String>,
    pub activity_days: Option<u32>,
    pub min_health: Option<u8>,
    pub max_health: Option<u8>,
    pub good_first_issues: Option<bool>,
    pub min_stars: Option<u32>,
    pub license: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchParams {
    fn filters(&self) -> SearchFilters {
        let defaults = SearchFilters::default();
        SearchFilters {
            languages: self
                .languages
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            activity_days: self.activity_days.unwrap_or(defaults.activity_days),
            health_range: (
                self.min_health.unwrap_or(defaults.health_range.0),
                self.max_health.unwrap_or(defaults.health_range.1),
            ),
            has_good_first_issues: self.good_first_issues.unwrap_or(false),
            min_stars: self.min_stars,
            license: self.license.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub total_count: u64,
    pub items: Vec<ScoredRepository>,
}

pub async fn search_repositories(
    params: web::Query<SearchParams>,
    data: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let text = params.q.clone().unwrap_or_default();
    let filters = params.filters();
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(30);

    match data
        .github
        .search_repositories(&text, &filters, page, per_page)
        .await
    {
        Ok(results) => {
            let now = Utc::now();
            let items: Vec<ScoredRepository> = results
                .items
                .iter()
                .map(|repo| score_repository(repo, 0, now))
                .collect();
            Ok(HttpResponse::Ok().json(SearchResults {
                total_count: results.total_count,
                items,
            }))
        }
        Err(e) => {
            error!("repository search failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

pub async fn repository_details(
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (owner, repo) = path.into_inner();

    let raw = match data.github.get_repository(&owner, &repo).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("repository lookup failed for {}/{}: {}", owner, repo, e);
            return Ok(error_response(&e));
        }
    };

    let good_first_issues = data.github.good_first_issues(&owner, &repo).await;
    let contributors = data.github.contributor_count(&owner, &repo).await;

    let mut scored = score_repository(&raw, good_first_issues, Utc::now());
    scored.contributors = contributors;

    Ok(HttpResponse::Ok().json(scored))
}

fn error_response(err: &ApiError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        ApiError::Status { status, .. } => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(code).json(body)
        }
        ApiError::Request(_) => HttpResponse::BadGateway().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::github::GitHubConfig;
    use actix_web::{test, App};
    use mockito::Matcher;
    use serde_json::json;

    fn repo_json() -> serde_json::Value {
        json!({
            "id": 42,
            "name": "widget",
            "full_name": "acme/widget",
            "description": "a widget",
            "stargazers_count": 15000,
            "watchers_count": 15000,
            "forks_count": 12,
            "open_issues_count": 3,
            "language": "Rust",
            "license": { "spdx_id": "MIT" },
            "created_at": "2023-01-01T00:00:00Z",
            "updated_at": "2025-06-01T00:00:00Z",
            "pushed_at": "2025-06-14T00:00:00Z",
            "topics": ["tooling"],
            "has_wiki": true,
            "has_pages": false,
            "default_branch": "main"
        })
    }

    fn state_for(server: &mockito::ServerGuard) -> web::Data<AppState> {
        let github = GitHubClient::new(GitHubConfig {
            base_url: server.url(),
            token: None,
        })
        .unwrap();
        web::Data::new(AppState { github })
    }

    macro_rules! test_app {
        ($server:expr) => {
            test::init_service(
                App::new()
                    .app_data(state_for(&$server))
                    .route("/api/search", web::get().to(search_repositories))
                    .route(
                        "/api/repos/{owner}/{repo}",
                        web::get().to(repository_details),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn search_endpoint_returns_scored_items() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/repositories")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "total_count": 1, "items": [repo_json()] }).to_string())
            .create_async()
            .await;

        let app = test_app!(server);
        let req = test::TestRequest::get()
            .uri("/api/search?q=widget&languages=rust&activity_days=30")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_count"], 1);
        let item = &body["items"][0];
        assert_eq!(item["name"], "widget");
        assert!(item["healthScore"].is_u64());
        assert_eq!(item["goodFirstIssues"], 0);
        assert_eq!(item["contributors"], 0);
    }

    #[actix_web::test]
    async fn search_endpoint_surfaces_upstream_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/repositories")
            .match_query(Matcher::Any)
            .with_status(422)
            .create_async()
            .await;

        let app = test_app!(server);
        let req = test::TestRequest::get().uri("/api/search?q=widget").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 422);
    }

    #[actix_web::test]
    async fn details_endpoint_enriches_with_auxiliary_counts() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widget")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(repo_json().to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/search/issues")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "total_count": 7 }).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/widget/contributors")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header(
                "link",
                "<https://api.github.com/repos/acme/widget/contributors?per_page=1&page=137>; rel=\"last\"",
            )
            .with_body(json!([{ "login": "alice", "id": 1, "contributions": 900 }]).to_string())
            .create_async()
            .await;

        let app = test_app!(server);
        let req = test::TestRequest::get().uri("/api/repos/acme/widget").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["goodFirstIssues"], 7);
        assert_eq!(body["contributors"], 137);
        assert!(body["signals"].as_array().unwrap().contains(&json!("Good Docs")));
    }

    #[actix_web::test]
    async fn details_endpoint_still_responds_when_enrichment_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widget")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(repo_json().to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/search/issues")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/widget/contributors")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let app = test_app!(server);
        let req = test::TestRequest::get().uri("/api/repos/acme/widget").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["goodFirstIssues"], 0);
        assert_eq!(body["contributors"], 0);
    }
}
