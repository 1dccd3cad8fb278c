use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub keyword_source: String,
    pub keyword_count: usize,
    pub refresh_interval_secs: u64,
}

#[derive(Serialize)]
pub struct KeywordList {
    pub count: usize,
    pub keywords: Vec<String>,
}

#[derive(Deserialize, Default)]
pub struct ReloadParams {
    /// Drop the conditional-fetch validators and re-fetch unconditionally.
    #[serde(default)]
    pub drop_cache: bool,
}

#[derive(Serialize)]
pub struct ReloadResult {
    pub changed: bool,
    pub keyword_count: usize,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let keywords = state.store.current().await;
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        keyword_source: state.store.source_description(),
        keyword_count: keywords.len(),
        refresh_interval_secs: state.store.refresh_interval().as_secs(),
    })
}

pub async fn get_keywords(State(state): State<AppState>) -> Json<KeywordList> {
    let keywords = state.store.current().await;
    Json(KeywordList {
        count: keywords.len(),
        keywords: keywords.as_slice().to_vec(),
    })
}

/// Forced reload trigger. The response always carries an explicit
/// changed/unchanged flag so the operator gets feedback either way.
pub async fn post_reload(
    State(state): State<AppState>,
    Query(params): Query<ReloadParams>,
) -> Json<ReloadResult> {
    let changed = state.store.force_reload(params.drop_cache).await;
    let keywords = state.store.current().await;
    Json(ReloadResult {
        changed,
        keyword_count: keywords.len(),
    })
}
