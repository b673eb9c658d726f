//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: parsing the posts
//! ([`crate::parser`]), rendering the index and post pages
//! ([`crate::write`]), and copying the theme's logo into the output
//! directory.

use crate::config::{Config, Error as ConfigError};
use crate::parser::{Error as ParseError, Parser as PostParser};
use crate::theme::{Error as ThemeError, Theme};
use crate::write::{Error as WriteError, Writer};
use std::path::PathBuf;
use tracing::info;

/// Builds the site described by `config` with `theme` and returns the number
/// of posts written. Posts are parsed before anything is written, so a build
/// that fails while parsing leaves no output behind. Failures after that
/// point may leave a partially written output directory.
pub fn build_site(config: &Config, theme: &Theme) -> Result<usize> {
    let posts = PostParser::new(&config.posts_directory).parse_posts()?;

    std::fs::create_dir_all(&config.output_directory).map_err(|err| {
        Error::CreateOutputDirectory {
            path: config.output_directory.clone(),
            source: err,
        }
    })?;

    let writer = Writer {
        posts_template: &theme.posts_template,
        index_template: &theme.index_template,
        output_directory: &config.output_directory,
        logo: &theme.logo.file_name,
    };
    writer.write_asset(&theme.logo)?;
    writer.write_posts(&posts)?;

    info!(
        posts = posts.len(),
        output_directory = %config.output_directory.display(),
        "built site"
    );
    Ok(posts.len())
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during loading the
/// configuration or theme, parsing, creating the output directory, or
/// writing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned for errors loading the project configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Returned for errors loading the theme.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// Returned for errors during parsing.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Returned for errors writing [`crate::post::Post`]s to disk as HTML
    /// files.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Returned when the output directory can't be created.
    #[error("creating output directory `{}`: {source}", .path.display())]
    CreateOutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}
