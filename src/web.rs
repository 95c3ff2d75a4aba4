use std::collections::BTreeMap;

use actix_files::Files;
use actix_web::http::{header, StatusCode};
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer, ResponseError};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::error::{GenerateError, RenderError};
use crate::generator::{generate_schedule, GenerateOptions, GeneratedSchedule};
use crate::import::{format_schedule_for_events, CalendarEvent};
use crate::parser::RawSchedule;
use crate::schedule::Period;

pub const WARNINGS_HEADER: &str = "X-Schedule-Warnings";

pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn options(&self, title: Option<String>, free_period_name: Option<String>, exact_dimensions: bool) -> GenerateOptions {
        GenerateOptions {
            title: title.unwrap_or_else(|| self.config.default_title.clone()),
            free_period_name: free_period_name
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| self.config.default_free_period_name.clone()),
            exact_dimensions,
            ..Default::default()
        }
    }
}

/// Form fields posted by the index page. `classes` holds the JSON payload.
#[derive(Deserialize)]
pub struct GenerateForm {
    title: Option<String>,
    free_period_name: Option<String>,
    #[serde(default = "empty_object")]
    classes: String,
}

fn empty_object() -> String {
    "{}".to_string()
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    title: Option<String>,
    free_period_name: Option<String>,
    classes: RawSchedule,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    events: Vec<CalendarEvent>,
}

#[derive(Serialize)]
pub struct ImportResponse {
    schedule: RawSchedule,
    unrecognized: Vec<String>,
}

#[derive(Serialize)]
pub struct DefaultsResponse {
    title: String,
    free_period_name: String,
    classes: BTreeMap<String, String>,
    rooms: BTreeMap<String, String>,
    teachers: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON format for classes: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::Generate(GenerateError::Validation(e)) => e.kind(),
            ApiError::Generate(GenerateError::Render(RenderError::UnsupportedCharacter { .. })) => {
                "unsupported_character"
            }
            ApiError::Generate(GenerateError::Render(_)) => "render_failed",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Generate(GenerateError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generate(GenerateError::Render(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
            "kind": self.kind(),
        }))
    }
}

// Normalization already logged each warning; the header carries the count
fn svg_response(generated: GeneratedSchedule) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("image/svg+xml")
        .insert_header((WARNINGS_HEADER, generated.warnings.len().to_string()))
        .body(generated.svg.into_string())
}

// Form submission from the index page; renders a responsive preview
async fn generate_from_form(
    form: web::Form<GenerateForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    let classes: RawSchedule = serde_json::from_str(&form.classes)?;
    let options = state.options(form.title, form.free_period_name, false);

    let generated = generate_schedule(&classes, &options)?;
    Ok(svg_response(generated))
}

async fn generate_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

async fn api_generate(
    req: web::Json<GenerateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let options = state.options(req.title, req.free_period_name, true);

    let generated = generate_schedule(&req.classes, &options)?;
    Ok(svg_response(generated))
}

async fn import_events(req: web::Json<ImportRequest>) -> HttpResponse {
    let (schedule, unrecognized) = format_schedule_for_events(&req.events);
    if !unrecognized.is_empty() {
        info!("{} calendar events were not recognized", unrecognized.len());
    }
    HttpResponse::Ok().json(ImportResponse { schedule, unrecognized })
}

async fn defaults(state: web::Data<AppState>) -> HttpResponse {
    let numbered = |label: &str| -> BTreeMap<String, String> {
        Period::all()
            .map(|p| (p.to_string(), format!("{} {}", label, p)))
            .collect()
    };

    HttpResponse::Ok().json(DefaultsResponse {
        title: state.config.default_title.clone(),
        free_period_name: state.config.default_free_period_name.clone(),
        classes: numbered("Class"),
        rooms: numbered("Room"),
        teachers: numbered("Teacher"),
    })
}

async fn index() -> HttpResponse {
    let html = include_str!("../templates/index.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "kind": "invalid_json",
        });
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Registers every route except static files
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(index))
        .service(
            web::resource("/generate")
                .route(web::post().to(generate_from_form))
                .route(web::get().to(generate_redirect)),
        )
        .route("/api/generate", web::post().to(api_generate))
        .route("/api/import_events", web::post().to(import_events))
        .route("/api/defaults", web::get().to(defaults));
}

pub async fn start_server(config: AppConfig) -> std::io::Result<()> {
    let bind = (config.host.clone(), config.port);
    let static_dir = config.static_dir.clone();
    let app_state = web::Data::new(AppState::new(config));

    info!("Starting web server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", static_dir.clone()))
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
