//! Import use case: store a Markdown file as one article.

use super::article::{delete_all_articles, insert_article, ArticleDto, NewArticle};
use crate::domain::markdown::derive_title;
use crate::error::AppError;
use crate::infra::{with_transaction, DbPool};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ImportResult {
    /// Rows removed before the insert (0 unless clearing).
    pub cleared: usize,
    pub article: ArticleDto,
}

/// Read `path` and import it; see [`import_markdown`].
pub fn import_markdown_file(
    pool: &DbPool,
    path: &Path,
    clear_existing: bool,
) -> Result<ImportResult, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    import_markdown(pool, path, content, clear_existing)
}

/// Insert `content` as a new article titled after its first `# ` heading
/// (or the file stem of `source`). With `clear_existing`, all articles are
/// deleted first; both steps share one transaction.
pub fn import_markdown(
    pool: &DbPool,
    source: &Path,
    content: String,
    clear_existing: bool,
) -> Result<ImportResult, AppError> {
    let new = NewArticle {
        title: derive_title(&content, source),
        content,
        author: None,
        published: false,
        created_at: Utc::now(),
    };

    let result = with_transaction(pool, |tx| {
        let cleared = if clear_existing {
            delete_all_articles(tx)?
        } else {
            0
        };
        let article = insert_article(tx, &new)?;
        Ok(ImportResult { cleared, article })
    })?;

    log::info!(
        "imported {} as article {} (cleared {})",
        source.display(),
        result.article.id,
        result.cleared
    );
    Ok(result)
}
