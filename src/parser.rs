//! Defines the [`Parser`] type and the logic for reading posts from the file
//! system into memory.

use crate::collection::order_and_link;
use crate::post::Post;
use crate::{extract, filename, markdown};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Parses [`Post`] objects from source files.
pub struct Parser<'a> {
    /// The directory holding the `YYYY-MM-DD-<slug>.md` post files.
    posts_directory: &'a Path,
}

impl<'a> Parser<'a> {
    pub fn new(posts_directory: &'a Path) -> Parser<'a> {
        Parser { posts_directory }
    }

    /// Reads every post file in the posts directory and returns the posts
    /// newest first with their `prev`/`next` links set. Files are visited in
    /// file name order and symlinks are followed. Files whose names don't
    /// follow the `YYYY-MM-DD-<slug>.md` convention are skipped; any other
    /// problem, including an impossible date in a post file name, fails the
    /// whole parse. Finding no posts at all is an error too.
    ///
    /// A post file looks like this:
    ///
    /// ```md
    /// # Hello, world!
    ///
    /// This first paragraph becomes the description.
    ///
    /// ## Details
    ///
    /// And this is the body.
    /// ```
    pub fn parse_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for result in WalkDir::new(self.posts_directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = result?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = match entry.file_name().to_str() {
                Some(file_name) => file_name,
                None => {
                    debug!(
                        path = %entry.path().display(),
                        "skipping non-UTF-8 file name"
                    );
                    continue;
                }
            };

            match filename::parse(file_name)? {
                Some(parsed) => {
                    posts.push(self.parse_post(entry.path(), parsed)?)
                }
                None => debug!(file_name, "skipping file that isn't a post"),
            }
        }

        if posts.is_empty() {
            return Err(Error::NoPosts(self.posts_directory.to_owned()));
        }

        info!(count = posts.len(), "parsed posts");
        Ok(order_and_link(posts))
    }

    /// Assembles a single [`Post`] from its source file.
    fn parse_post(
        &self,
        path: &Path,
        file_name: filename::PostFileName,
    ) -> Result<Post> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::Read {
            path: path.to_owned(),
            source: err,
        })?;

        let post = assemble(file_name, &text).map_err(|err| Error::Convert {
            path: path.to_owned(),
            source: err,
        })?;
        debug!(slug = %post.slug, title = %post.title, "parsed post");
        Ok(post)
    }
}

/// Builds an unlinked [`Post`] from a decoded file name and the file's text.
pub fn assemble(
    file_name: filename::PostFileName,
    text: &str,
) -> markdown::Result<Post> {
    let content = extract::extract(text);
    Ok(Post {
        slug: file_name.slug,
        title: content.title,
        description: content.description,
        date: file_name.date,
        body: markdown::to_html(&content.body)?,
        prev: None,
        next: None,
    })
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing [`Post`] objects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a post file name has an invalid date.
    #[error(transparent)]
    FileName(#[from] filename::Error),

    /// Returned when a post file can't be read.
    #[error("reading `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned when a post body can't be converted to HTML.
    #[error("converting `{}`: {source}", .path.display())]
    Convert {
        path: PathBuf,
        source: markdown::Error,
    },

    /// Returned when the posts directory holds no post files.
    #[error("no post files (YYYY-MM-DD-*.md) found in `{}`", .0.display())]
    NoPosts(PathBuf),

    /// Returned when the posts directory can't be listed.
    #[error("listing posts: {0}")]
    WalkDir(#[from] walkdir::Error),
}
