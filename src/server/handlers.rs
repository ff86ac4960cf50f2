use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::wikipedia::{SearchResponse, Translation};
use crate::{lemmatizer, CheckResult};

#[derive(Debug, Deserialize)]
pub struct CorrectionRequest {
    pub texte: String,
}

#[derive(Debug, Deserialize)]
pub struct WordQuery {
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub word: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordCheck {
    pub word: String,
    pub exists: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordSuggestions {
    pub word: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Lemma {
    pub word: String,
    pub lemma: String,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "Backend OK".to_string(),
    })
}

/// POST /api/corriger
pub async fn corriger(
    State(state): State<AppState>,
    req: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<CheckResult>, ApiError> {
    let Json(req) = req?;
    let checker = state.checker.clone();
    let result = tokio::task::spawn_blocking(move || checker.spell_check_text(&req.texte))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(result))
}

/// GET /api/dictionary/check?word=
pub async fn check_word(
    State(state): State<AppState>,
    query: Result<Query<WordQuery>, QueryRejection>,
) -> Result<Json<WordCheck>, ApiError> {
    let Query(WordQuery { word }) = query?;
    let exists = state.words.contains(&word.trim().to_lowercase());

    Ok(Json(WordCheck { word, exists }))
}

/// GET /api/dictionary/suggestions?word=&limit=
pub async fn suggest_word(
    State(state): State<AppState>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<WordSuggestions>, ApiError> {
    let Query(SuggestionQuery { word, limit }) = query?;
    let word = word.trim().to_lowercase();

    let words = state.words.clone();
    let lookup = word.clone();
    let suggestions = tokio::task::spawn_blocking(move || {
        crate::checker::suggestions::generate(&lookup, &words, limit)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(WordSuggestions { word, suggestions }))
}

/// GET /api/lemmatize?word=
pub async fn lemmatize(
    query: Result<Query<WordQuery>, QueryRejection>,
) -> Result<Json<Lemma>, ApiError> {
    let Query(WordQuery { word }) = query?;
    let lemma = lemmatizer::lemmatize(&word);

    Ok(Json(Lemma { word, lemma }))
}

/// GET /api/wikipedia/search?q=
pub async fn wikipedia_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(SearchQuery { q }) = query?;
    Ok(Json(state.wikipedia.search(&q).await?))
}

/// GET /api/wikipedia/translate?word=
pub async fn wikipedia_translate(
    State(state): State<AppState>,
    query: Result<Query<WordQuery>, QueryRejection>,
) -> Result<Json<Translation>, ApiError> {
    let Query(WordQuery { word }) = query?;
    Ok(Json(state.wikipedia.translate(&word).await?))
}
