//! Article use cases: create, list, get, update, delete.

use crate::domain::timestamp::parse_timestamp;
use crate::domain::Patch;
use crate::error::AppError;
use crate::infra::{with_transaction, DbPool};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const ARTICLE_COLUMNS: &str = "id, title, content, author, published, created_at";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleCreateReq {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
    /// ISO 8601; the insert time when absent.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Partial update: only `Set` fields are written.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleUpdateReq {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub content: Patch<String>,
    #[serde(default)]
    pub author: Patch<Option<String>>,
    #[serde(default)]
    pub published: Patch<bool>,
    #[serde(default)]
    pub created_at: Patch<String>,
}

/// Fully resolved row to insert.
pub(crate) struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

pub fn article_create(pool: &DbPool, req: ArticleCreateReq) -> Result<ArticleDto, AppError> {
    let created_at = match req.created_at.as_deref() {
        Some(raw) => parse_timestamp(raw).map_err(AppError::Validation)?,
        None => Utc::now(),
    };
    let new = NewArticle {
        title: req.title,
        content: req.content,
        author: req.author,
        published: req.published,
        created_at,
    };

    let article = with_transaction(pool, |tx| insert_article(tx, &new))?;
    log::debug!("created article {}", article.id);
    Ok(article)
}

/// All articles in insertion order.
pub fn article_list(pool: &DbPool) -> Result<Vec<ArticleDto>, AppError> {
    with_transaction(pool, |tx| {
        let mut stmt = tx.prepare(&format!(
            "SELECT {} FROM articles ORDER BY id",
            ARTICLE_COLUMNS
        ))?;
        let rows = stmt.query_map([], map_article)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

/// `Ok(None)` when no article has this id.
pub fn article_get(pool: &DbPool, id: i64) -> Result<Option<ArticleDto>, AppError> {
    with_transaction(pool, |tx| fetch_article(tx, id))
}

/// Overwrite the supplied fields; `Ok(None)` when no article has this id.
pub fn article_update(
    pool: &DbPool,
    id: i64,
    req: ArticleUpdateReq,
) -> Result<Option<ArticleDto>, AppError> {
    // Reject bad input before touching the store
    let created_at = match req.created_at {
        Patch::Set(raw) => Patch::Set(parse_timestamp(&raw).map_err(AppError::Validation)?),
        Patch::Unset => Patch::Unset,
    };

    let updated = with_transaction(pool, |tx| {
        let Some(current) = fetch_article(tx, id)? else {
            return Ok(None);
        };

        let title = req.title.apply(current.title);
        let content = req.content.apply(current.content);
        let author = req.author.apply(current.author);
        let published = req.published.apply(current.published);
        let created_at = created_at.apply(current.created_at);

        tx.execute(
            "UPDATE articles SET title = ?1, content = ?2, author = ?3, published = ?4, created_at = ?5 WHERE id = ?6",
            params![
                title,
                content,
                author,
                published as i32,
                created_at.to_rfc3339(),
                id
            ],
        )?;

        fetch_article(tx, id)
    })?;

    if updated.is_some() {
        log::debug!("updated article {}", id);
    }
    Ok(updated)
}

/// `Ok(false)` when no article has this id.
pub fn article_delete(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let rows = with_transaction(pool, |tx| {
        Ok(tx.execute("DELETE FROM articles WHERE id = ?1", params![id])?)
    })?;
    if rows > 0 {
        log::debug!("deleted article {}", id);
    }
    Ok(rows > 0)
}

/// Remove every article, returning how many were deleted.
pub fn article_delete_all(pool: &DbPool) -> Result<usize, AppError> {
    with_transaction(pool, |tx| delete_all_articles(tx))
}

pub(crate) fn insert_article(conn: &Connection, new: &NewArticle) -> Result<ArticleDto, AppError> {
    conn.execute(
        "INSERT INTO articles (title, content, author, published, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &new.title,
            &new.content,
            &new.author,
            new.published as i32,
            new.created_at.to_rfc3339(),
        ],
    )?;
    let id = conn.last_insert_rowid();

    // Re-read so the caller sees exactly what was stored
    fetch_article(conn, id)?.ok_or_else(|| AppError::Db(format!("article {} vanished after insert", id)))
}

pub(crate) fn delete_all_articles(conn: &Connection) -> Result<usize, AppError> {
    Ok(conn.execute("DELETE FROM articles", [])?)
}

fn fetch_article(conn: &Connection, id: i64) -> Result<Option<ArticleDto>, AppError> {
    let article = conn
        .query_row(
            &format!("SELECT {} FROM articles WHERE id = ?1", ARTICLE_COLUMNS),
            params![id],
            map_article,
        )
        .optional()?;
    Ok(article)
}

fn map_article(row: &Row<'_>) -> rusqlite::Result<ArticleDto> {
    Ok(ArticleDto {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        published: row.get::<_, i32>(4)? != 0,
        created_at: row.get(5)?,
    })
}
