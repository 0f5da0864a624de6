//! Article HTTP handlers.

use super::{run_blocking, AppState};
use crate::app::{
    article_create, article_delete, article_get, article_list, article_update, ArticleCreateReq,
    ArticleDto, ArticleUpdateReq,
};
use crate::domain::markdown::render_html;
use crate::error::AppError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteResp {
    pub ok: bool,
}

/// Article routes mounted under `prefix`.
pub fn routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, get(list_articles).post(create_article))
        .route(
            &format!("{}/{{id}}", prefix),
            get(read_article).put(update_article).delete(delete_article),
        )
        .route(&format!("{}/{{id}}/html", prefix), get(read_article_html))
}

fn article_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::Validation(e.body_text()))
}

fn body<T>(json: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    json.map(|Json(v)| v)
        .map_err(|e| AppError::Validation(e.body_text()))
}

fn not_found() -> AppError {
    AppError::NotFound("Article not found".into())
}

async fn create_article(
    State(state): State<AppState>,
    req: Result<Json<ArticleCreateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<ArticleDto>), AppError> {
    let req = body(req)?;
    log::debug!("POST article {:?}", req.title);
    let article = run_blocking(&state, move |pool| article_create(pool, req)).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<ArticleDto>>, AppError> {
    log::debug!("GET articles");
    run_blocking(&state, article_list).await.map(Json)
}

async fn read_article(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ArticleDto>, AppError> {
    let id = article_id(id)?;
    log::debug!("GET article {}", id);
    run_blocking(&state, move |pool| article_get(pool, id))
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

async fn read_article_html(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = article_id(id)?;
    log::debug!("GET article {} as html", id);
    let article = run_blocking(&state, move |pool| article_get(pool, id))
        .await?
        .ok_or_else(not_found)?;
    Ok(Html(render_html(&article.content)))
}

async fn update_article(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    req: Result<Json<ArticleUpdateReq>, JsonRejection>,
) -> Result<Json<ArticleDto>, AppError> {
    let id = article_id(id)?;
    let req = body(req)?;
    log::debug!("PUT article {}", id);
    run_blocking(&state, move |pool| article_update(pool, id, req))
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

async fn delete_article(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResp>, AppError> {
    let id = article_id(id)?;
    log::debug!("DELETE article {}", id);
    if run_blocking(&state, move |pool| article_delete(pool, id)).await? {
        Ok(Json(DeleteResp { ok: true }))
    } else {
        Err(not_found())
    }
}
