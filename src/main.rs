use actix_web::{web, App, HttpServer, HttpResponse, middleware};
use actix_cors::Cors;
use dotenv::dotenv;
use std::env;
use log::info;

mod models;
mod handlers;
mod services;
mod utils;

use handlers::repos::{repository_details, search_repositories, AppState};
use services::github::{GitHubClient, GitHubConfig};

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "repo-pulse"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let config = GitHubConfig {
        base_url: env::var("GITHUB_API_BASE")
            .unwrap_or_else(|_| "https://api.github.com".to_string()),
        token: env::var("GITHUB_TOKEN").ok(),
    };

    let github = GitHubClient::new(config).expect("Failed to create GitHub client");
    let app_state = web::Data::new(AppState { github });

    let bind_addr = format!("{}:{}", host, port);
    info!("Starting server on {}", bind_addr);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .route("/health", web::get().to(health_check))
            .route("/api/search", web::get().to(search_repositories))
            .route("/api/repos/{owner}/{repo}", web::get().to(repository_details))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
