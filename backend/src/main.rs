mod config;
mod intake;
mod services;
mod storage;

use crate::config::ServerConfig;
use crate::storage::state::{start_submission_writer, SubmissionsState};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Capacity of the queue between the submission handler and the writer.
const SUBMISSION_QUEUE: usize = 100;

/// Serves the embedded client. Unknown paths get `index.html` so the client
/// can handle its own routes.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.url();

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let (submissions, rx) = SubmissionsState::new(config.database.clone(), SUBMISSION_QUEUE);
    let writer_state = submissions.clone();
    tokio::spawn(async move {
        start_submission_writer(writer_state, rx).await;
    });

    info!(
        "Server running at {} (database: {})",
        url,
        config.database.display()
    );

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::PayloadConfig::default().limit(json_limit))
            .app_data(web::Data::new(submissions.clone()))
            .service(services::templates::configure_routes())
            .service(services::schemas::configure_routes())
            .service(services::submissions::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
