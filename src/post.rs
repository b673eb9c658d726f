//! Defines the [`Post`] and [`PostLink`] types and their conversion into
//! template [`Value`]s.

use chrono::NaiveDate;
use gtmpl::Value;
use pulldown_cmark::escape::{escape_href, escape_html};
use std::collections::HashMap;

/// Long date format, e.g. `January 2, 2006`.
const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// ISO 8601 calendar date, e.g. `2006-01-02`.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Represents a blog post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// The source file name less its extension. Also the output file stem.
    pub slug: String,

    /// The text of the post's title heading.
    pub title: String,

    /// A short plain-text summary taken from the first paragraph.
    pub description: String,

    /// The publish date from the file name.
    pub date: NaiveDate,

    /// The rendered body HTML. This is trusted and is never escaped.
    pub body: String,

    /// The next-newer post, if any.
    pub prev: Option<PostLink>,

    /// The next-older post, if any.
    pub next: Option<PostLink>,
}

/// A reference to a neighbouring [`Post`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostLink {
    pub slug: String,
    pub title: String,
}

impl Post {
    /// The name of the post's output file relative to the output directory.
    pub fn file_name(&self) -> String {
        page_file_name(&self.slug)
    }

    pub fn date_long(&self) -> String {
        self.date.format(LONG_DATE_FORMAT).to_string()
    }

    pub fn date_iso(&self) -> String {
        self.date.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn link(&self) -> PostLink {
        PostLink {
            slug: self.slug.clone(),
            title: self.title.clone(),
        }
    }

    /// Converts a [`Post`] into a template-friendly [`Value`]. The result is
    /// a [`Value::Object`] with the fields `slug`, `url`, `title`,
    /// `description`, `date`, `date_iso`, `body`, `prev`, and `next`. Text
    /// fields are HTML-escaped and `url` is escaped for use in an `href`;
    /// `body` is not escaped. `prev` and `next` are [`Value::Nil`] at the ends
    /// of the collection.
    pub fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("slug".to_owned(), escaped(&self.slug));
        m.insert("url".to_owned(), href(&self.file_name()));
        m.insert("title".to_owned(), escaped(&self.title));
        m.insert("description".to_owned(), escaped(&self.description));
        m.insert("date".to_owned(), Value::String(self.date_long()));
        m.insert("date_iso".to_owned(), Value::String(self.date_iso()));
        m.insert("body".to_owned(), Value::String(self.body.clone()));
        m.insert("prev".to_owned(), link_to_value(&self.prev));
        m.insert("next".to_owned(), link_to_value(&self.next));
        Value::Object(m)
    }
}

impl From<&PostLink> for Value {
    /// Converts a [`PostLink`] into an object with `slug`, `url`, and `title`.
    fn from(link: &PostLink) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("slug".to_owned(), escaped(&link.slug));
        m.insert("url".to_owned(), href(&page_file_name(&link.slug)));
        m.insert("title".to_owned(), escaped(&link.title));
        Value::Object(m)
    }
}

fn link_to_value(link: &Option<PostLink>) -> Value {
    match link {
        Some(link) => link.into(),
        None => Value::Nil,
    }
}

pub fn page_file_name(slug: &str) -> String {
    format!("{}.html", slug)
}

// Writing to a `String` can't fail.
fn escaped(s: &str) -> Value {
    let mut out = String::with_capacity(s.len());
    escape_html(&mut out, s).ok();
    Value::String(out)
}

fn href(s: &str) -> Value {
    let mut out = String::with_capacity(s.len());
    escape_href(&mut out, s).ok();
    Value::String(out)
}
