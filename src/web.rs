use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::allocation::{allocate, Allocation, PreferenceRecord, Worker, UNASSIGNED};
use crate::export::allocation_to_csv;
use crate::parser::read_preferences;

// In-memory storage for the latest allocation (in production, use a database)
pub struct AppState {
    pub workers: Vec<Worker>,
    pub allocation: Mutex<Option<Allocation>>,
    pub preferences: Mutex<Option<Vec<PreferenceRecord>>>,
    pub admin_password: String,
}

/// Per-request view of the caller's session, read fresh from the session
/// cookie on every call. Handlers consume this value; there is no
/// process-wide auth state.
pub struct AuthContext {
    pub email: Option<String>,
}

impl AuthContext {
    pub fn from_session(session: &Session) -> Self {
        let email = session.get::<String>("email").unwrap_or(None);
        AuthContext { email }
    }

    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct AllocateParams {
    days: i64,
    start: Option<String>, // YYYY-MM-DD; defaults to today
}

#[derive(Serialize)]
pub struct SessionResponse {
    authenticated: bool,
    email: Option<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    assignment_counts: HashMap<String, u32>,
    unassigned_days: u32,
    total_days: u32,
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized()
        .json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

// Admin login endpoint
async fn login(
    req: web::Json<LoginRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        session.insert("email", req.email.trim().to_string())?;
        info!("admin logged in: {}", req.email.trim());
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        warn!("rejected login attempt for {}", req.email.trim());
        Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Invalid credentials"})))
    }
}

async fn logout(session: Session) -> Result<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn session_info(session: Session) -> Result<HttpResponse> {
    let auth = AuthContext::from_session(&session);
    Ok(HttpResponse::Ok().json(SessionResponse {
        authenticated: auth.is_authenticated(),
        email: auth.email,
    }))
}

async fn get_workers(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let auth = AuthContext::from_session(&session);
    if !auth.is_authenticated() {
        return Ok(unauthorized());
    }

    Ok(HttpResponse::Ok().json(&state.workers))
}

// Upload-and-allocate endpoint: CSV body, days/start query parameters
async fn run_allocation(
    query: web::Query<AllocateParams>,
    body: web::Bytes,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let auth = AuthContext::from_session(&session);
    if !auth.is_authenticated() {
        return Ok(unauthorized());
    }

    let start_date = match &query.start {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "error": format!("Invalid start date: {}", raw)
                })))
            }
        },
        None => chrono::Local::now().date_naive(),
    };

    let preferences = match read_preferences(body.as_ref()) {
        Ok(preferences) => preferences,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to process spreadsheet: {}", e)
            })))
        }
    };

    match allocate(&state.workers, &preferences, query.days, start_date) {
        Ok(allocation) => {
            info!(
                "generated allocation: {} days, {} preference records, {} unassigned",
                allocation.entries.len(),
                preferences.len(),
                allocation.unassigned_count()
            );

            let response = HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "entries": allocation.entries
            }));
            *state.preferences.lock().unwrap() = Some(preferences);
            *state.allocation.lock().unwrap() = Some(allocation);
            Ok(response)
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("{}", e)
        }))),
    }
}

async fn get_allocation(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let auth = AuthContext::from_session(&session);
    if !auth.is_authenticated() {
        return Ok(unauthorized());
    }

    let allocation = state.allocation.lock().unwrap();
    if let Some(ref allocation) = *allocation {
        Ok(HttpResponse::Ok().json(serde_json::json!({"entries": allocation.entries})))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No allocation available"})))
    }
}

// CSV download of the current allocation
async fn download_allocation(
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let auth = AuthContext::from_session(&session);
    if !auth.is_authenticated() {
        return Ok(unauthorized());
    }

    let allocation = state.allocation.lock().unwrap();
    if let Some(ref allocation) = *allocation {
        let csv = allocation_to_csv(allocation)
            .map_err(|e| actix_web::error::ErrorInternalServerError(format!("{}", e)))?;
        Ok(HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"shift_allocation.csv\"",
            ))
            .body(csv))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No allocation available"})))
    }
}

// Stats endpoint
async fn get_stats(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let auth = AuthContext::from_session(&session);
    if !auth.is_authenticated() {
        return Ok(unauthorized());
    }

    let allocation = state.allocation.lock().unwrap();
    if let Some(ref allocation) = *allocation {
        let mut assignment_counts: HashMap<String, u32> = HashMap::new();
        let mut unassigned_days = 0u32;

        for entry in &allocation.entries {
            if entry.worker == UNASSIGNED {
                unassigned_days += 1;
            } else {
                *assignment_counts.entry(entry.worker.clone()).or_insert(0) += 1;
            }
        }

        Ok(HttpResponse::Ok().json(StatsResponse {
            assignment_counts,
            unassigned_days,
            total_days: allocation.entries.len() as u32,
        }))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No data available"})))
    }
}

// HTML page handlers
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn admin_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/admin.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(
    port: u16,
    admin_password: String,
    workers: Vec<Worker>,
) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState {
        workers,
        allocation: Mutex::new(None),
        preferences: Mutex::new(None),
        admin_password,
    });

    // Session cookies are signed with a per-process key; restarting the
    // server invalidates existing sessions
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/admin", web::get().to(admin_page))
            .route("/api/login", web::post().to(login))
            .route("/api/logout", web::post().to(logout))
            .route("/api/session", web::get().to(session_info))
            .route("/api/workers", web::get().to(get_workers))
            .route("/api/allocate", web::post().to(run_allocation))
            .route("/api/allocation", web::get().to(get_allocation))
            .route("/api/allocation/download", web::get().to(download_allocation))
            .route("/api/stats", web::get().to(get_stats))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
