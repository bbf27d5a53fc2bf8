use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::headers::Cookie;
use axum_extra::TypedHeader;
use formats::{read_pois, IsochroneCatalog, IsochroneSet, PoiSet};
use layers::{build_render_plan, resolve_minutes, Overlays, RenderInputs, RenderPlan, TileLayer};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use viewport::{FilterSnapshot, Viewport};

use crate::config::ViewerConfig;
use crate::error::AppError;
use crate::page;
use crate::sessions::{SessionStore, SESSION_COOKIE};

pub const PAGE_TITLE: &str = "Isochrone Map Viewer";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    pub catalog: Arc<IsochroneCatalog>,
    pub tiles: Arc<TileLayer>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let catalog = config.catalog();
        let tiles = config.tiles();
        let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            tiles: Arc::new(tiles),
            sessions: Arc::new(sessions),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/centers", get(list_centers))
        .route("/api/render", get(render))
        .route("/api/viewport", post(report_viewport))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let bootstrap = json!({
        "title": PAGE_TITLE,
        "centers": state.catalog.names().collect::<Vec<_>>(),
        "mapHeight": state.config.map_height,
    });
    Html(page::index_html(&bootstrap))
}

async fn list_centers(State(state): State<AppState>) -> Json<serde_json::Value> {
    let centers: Vec<_> = state
        .catalog
        .names()
        .map(|name| json!({ "name": name }))
        .collect();
    Json(serde_json::Value::Array(centers))
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    pub center: Option<String>,
    pub minutes: Option<u32>,
    #[serde(default)]
    pub schools: bool,
    #[serde(default)]
    pub hospitals: bool,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub center: String,
    pub minutes: u32,
    pub max_minutes: u32,
    pub viewport: Viewport,
    /// True when the page must move its map to `viewport`.
    pub filters_changed: bool,
    #[serde(flatten)]
    pub plan: RenderPlan,
}

async fn render(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, AppError> {
    let center = match query.center {
        Some(name) => name,
        None => state
            .catalog
            .first_name()
            .ok_or(AppError::NoCenters)?
            .to_string(),
    };
    let (isochrones, schools, hospitals) = {
        let catalog = state.catalog.clone();
        let center = center.clone();
        let schools = state.config.schools_path();
        let hospitals = state.config.hospitals_path();
        tokio::task::spawn_blocking(move || {
            load_render_data(&catalog, &center, &schools, &hospitals)
        })
        .await
        .map_err(|err| AppError::Internal(format!("load task failed: {err}")))??
    };

    let max_minutes = isochrones.max_minutes();
    let minutes = resolve_minutes(query.minutes, max_minutes);
    let current = FilterSnapshot {
        center: center.clone(),
        minutes,
        show_schools: query.schools,
        show_hospitals: query.hospitals,
    };
    let default = Viewport::around(isochrones.start_point(), state.config.default_zoom);

    let (session_id, fresh) = state.sessions.resolve(session_cookie(&cookie));
    let decision = state.sessions.advance(&session_id, &current, default);
    debug!(
        "session {session_id}: center={center} minutes={minutes} changed={} zoom={}",
        decision.filters_changed, decision.viewport.zoom
    );

    let plan = build_render_plan(RenderInputs {
        isochrones: &isochrones,
        schools: &schools,
        hospitals: &hospitals,
        max_minutes: minutes,
        overlays: Overlays {
            schools: query.schools,
            hospitals: query.hospitals,
        },
        tiles: &state.tiles,
    });

    let body = RenderResponse {
        center,
        minutes,
        max_minutes,
        viewport: decision.viewport,
        filters_changed: decision.filters_changed,
        plan,
    };
    let mut response = Json(body).into_response();
    if fresh {
        set_session_cookie(&mut response, &session_id);
    }
    Ok(response)
}

async fn report_viewport(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
    Json(viewport): Json<Viewport>,
) -> Result<Response, AppError> {
    viewport.validate()?;
    let (session_id, fresh) = state.sessions.resolve(session_cookie(&cookie));
    debug!(
        "session {session_id}: viewport ({:.5}, {:.5}) z{}",
        viewport.center.lat, viewport.center.lng, viewport.zoom
    );
    state.sessions.observe(&session_id, viewport);

    let mut response = StatusCode::NO_CONTENT.into_response();
    if fresh {
        set_session_cookie(&mut response, &session_id);
    }
    Ok(response)
}

fn session_cookie(cookie: &Option<TypedHeader<Cookie>>) -> Option<&str> {
    cookie.as_ref().and_then(|TypedHeader(c)| c.get(SESSION_COOKIE))
}

fn set_session_cookie(response: &mut Response, id: &str) {
    let value = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&value) {
        response
            .headers_mut()
            .insert(http::header::SET_COOKIE, value);
        info!("new session {id}");
    }
}

/// Every file a render needs, read fresh from disk.
fn load_render_data(
    catalog: &IsochroneCatalog,
    center: &str,
    schools: &Path,
    hospitals: &Path,
) -> Result<(IsochroneSet, PoiSet, PoiSet), AppError> {
    let isochrones = catalog
        .load(center)
        .ok_or_else(|| AppError::UnknownCenter(center.to_string()))??;
    Ok((isochrones, read_pois(schools)?, read_pois(hospitals)?))
}
