//! Converts post bodies from markdown to HTML.

use crate::htmlrenderer::push_html;
use pulldown_cmark::{Options, Parser};

/// Converts `markdown` to an HTML fragment. Tables, strikethrough, task lists,
/// and footnotes are enabled; headings get anchor ids; embedded HTML is kept
/// as-is since post sources are trusted.
pub fn to_html(markdown: &str) -> Result<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, Parser::new_ext(markdown, options))?;
    Ok(html)
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error converting markdown to HTML.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the renderer fails to write its output.
    #[error("rendering markdown: {0}")]
    Io(#[from] std::io::Error),
}
