//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod todos;

use actix_web::{HttpResponse, http::header, web};
use chrono::NaiveDate;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Todo routes, all scoped to a yyyy-MM-dd day
            .service(
                web::scope("/todos")
                    .service(
                        web::resource("/{date}")
                            .route(web::get().to(pages::list_pages))
                            .route(web::post().to(pages::delete_page)),
                    )
                    .service(
                        web::resource("/{date}/new").route(web::post().to(pages::create_page)),
                    )
                    .service(
                        web::resource("/{date}/{page_id}")
                            .route(web::get().to(pages::get_page))
                            .route(web::post().to(todos::todo_action)),
                    ),
            ),
    );
}

/// Parse a `yyyy-MM-dd` URL segment.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{raw}', expected yyyy-MM-dd")))
}

/// 302 to a client-side location, the response every successful form
/// submission gets.
pub(crate) fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
