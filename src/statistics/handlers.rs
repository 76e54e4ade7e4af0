use super::service::StatisticsService;
use crate::error::CountError;

use axum::extract::Path;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct WordStatisticsResponse {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ClearStatisticsResponse {
    pub word: String,
    pub status: String,
}

pub async fn handle_get_statistics(
    Extension(statistics): Extension<Arc<StatisticsService>>,
    Path(word): Path<String>,
) -> Json<WordStatisticsResponse> {
    let count = statistics.word_count(&word);
    Json(WordStatisticsResponse { word, count })
}

pub async fn handle_clear_statistics(
    Extension(statistics): Extension<Arc<StatisticsService>>,
    Path(word): Path<String>,
) -> Result<Json<ClearStatisticsResponse>, CountError> {
    statistics.clear_word(&word)?;
    Ok(Json(ClearStatisticsResponse {
        word,
        status: "cleared".to_string(),
    }))
}
