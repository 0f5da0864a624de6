//! Application use cases and transactions.

mod article;
mod import;

pub use article::{
    article_create, article_delete, article_delete_all, article_get, article_list,
    article_update, ArticleCreateReq, ArticleDto, ArticleUpdateReq,
};
pub use import::{import_markdown, import_markdown_file, ImportResult};
