use crate::post::Post;
use crate::theme::Asset;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const INDEX_FILE_NAME: &str = "index.html";

/// Responsible for templating and writing HTML pages to disk from [`Post`]s.
pub struct Writer<'a> {
    /// The template for post pages.
    pub posts_template: &'a Template,

    /// The template for the index page.
    pub index_template: &'a Template,

    /// The directory all pages and assets are written to. It must already
    /// exist.
    pub output_directory: &'a Path,

    /// The file name of the logo asset. This is made available to both post
    /// and index templates as `logo`.
    pub logo: &'a str,
}

impl Writer<'_> {
    /// Writes `index.html` followed by one `<slug>.html` page per post.
    /// `posts` must already be in presentation order.
    pub fn write_posts(&self, posts: &[Post]) -> Result<()> {
        let index = self.page_value(vec![("posts", post_list(posts, None))]);
        self.write_page(self.index_template, INDEX_FILE_NAME, index)?;

        for post in posts {
            let page = self.page_value(vec![
                ("post", post.to_value()),
                ("posts", post_list(posts, Some(&post.slug))),
            ]);
            self.write_page(self.posts_template, &post.file_name(), page)?;
        }
        Ok(())
    }

    /// Copies an asset into the output directory.
    pub fn write_asset(&self, asset: &Asset) -> Result<()> {
        let path = self.output_directory.join(&asset.file_name);
        std::fs::write(&path, &asset.contents)
            .map_err(|err| Error::Io { path, source: err })
    }

    fn page_value(&self, fields: Vec<(&str, Value)>) -> Value {
        let mut m: HashMap<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect();
        m.insert("logo".to_owned(), Value::String(self.logo.to_owned()));
        Value::Object(m)
    }

    /// Renders a single page with `template` and writes it to disk.
    fn write_page(
        &self,
        template: &Template,
        file_name: &str,
        value: Value,
    ) -> Result<()> {
        let path = self.output_directory.join(file_name);
        debug!(path = %path.display(), "writing page");

        let template_error = |message: String| Error::Template {
            page: file_name.to_owned(),
            message,
        };
        let context = gtmpl::Context::from(value).map_err(template_error)?;
        let mut file = std::fs::File::create(&path).map_err(|err| Error::Io {
            path: path.clone(),
            source: err,
        })?;
        template.execute(&mut file, &context).map_err(template_error)
    }
}

/// Converts posts to the list used by both page kinds. When rendering a post
/// page, the entry for that post has `current` set.
fn post_list(posts: &[Post], current: Option<&str>) -> Value {
    Value::Array(
        posts
            .iter()
            .map(|post| {
                let mut value = post.to_value();
                if let Value::Object(obj) = &mut value {
                    obj.insert(
                        "current".to_owned(),
                        Value::Bool(current == Some(post.slug.as_str())),
                    );
                }
                value
            })
            .collect(),
    )
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error during templating.
    #[error("rendering `{page}`: {message}")]
    Template { page: String, message: String },

    /// An error writing an output file.
    #[error("writing `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
