//! Defines the [`Theme`] type: the parsed page templates and the logo asset
//! that a build renders with. A theme is loaded once, up front, and handed to
//! [`crate::build::build_site`]. Anything a [`ThemeConfig`] leaves unset falls
//! back to the default theme compiled into the binary.

use crate::config::ThemeConfig;
use gtmpl::Template;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_INDEX_TEMPLATE: &str = include_str!("../theme/index.html");
const DEFAULT_POSTS_TEMPLATE: &str = include_str!("../theme/post.html");
const DEFAULT_LOGO: &[u8] = include_bytes!("../theme/logo.svg");
const DEFAULT_LOGO_FILE_NAME: &str = "logo.svg";

/// The templates and static asset used to render a site.
pub struct Theme {
    /// Renders `index.html` from the full post list.
    pub index_template: Template,

    /// Renders one page per post.
    pub posts_template: Template,

    /// Copied verbatim into the output directory.
    pub logo: Asset,
}

/// A file copied byte-for-byte into the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    /// The output file name, relative to the output directory.
    pub file_name: String,
    pub contents: Cow<'static, [u8]>,
}

impl Asset {
    fn default_logo() -> Asset {
        Asset {
            file_name: DEFAULT_LOGO_FILE_NAME.to_owned(),
            contents: Cow::Borrowed(DEFAULT_LOGO),
        }
    }

    fn load(path: &Path) -> Result<Asset> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidAssetPath(path.to_owned()))?;
        let contents = std::fs::read(path).map_err(|err| Error::ReadAsset {
            path: path.to_owned(),
            source: err,
        })?;
        Ok(Asset {
            file_name: file_name.to_owned(),
            contents: Cow::Owned(contents),
        })
    }
}

impl Theme {
    /// The theme compiled into the binary.
    pub fn embedded() -> Result<Theme> {
        Theme::from_sources(
            DEFAULT_INDEX_TEMPLATE,
            DEFAULT_POSTS_TEMPLATE,
            Asset::default_logo(),
        )
    }

    /// Builds a theme from template sources held in memory.
    pub fn from_sources(
        index_template: &str,
        posts_template: &str,
        logo: Asset,
    ) -> Result<Theme> {
        Ok(Theme {
            index_template: parse_template("index", index_template)?,
            posts_template: parse_template("post", posts_template)?,
            logo,
        })
    }

    /// Loads the theme described by `config`. Each template kind is read from
    /// its list of files, concatenated in order, so a theme can keep shared
    /// markup in its own file.
    pub fn load(config: &ThemeConfig) -> Result<Theme> {
        let index_template = match config.index_template.is_empty() {
            true => Cow::Borrowed(DEFAULT_INDEX_TEMPLATE),
            false => Cow::Owned(read_template_files(&config.index_template)?),
        };
        let posts_template = match config.posts_template.is_empty() {
            true => Cow::Borrowed(DEFAULT_POSTS_TEMPLATE),
            false => Cow::Owned(read_template_files(&config.posts_template)?),
        };
        let logo = match &config.logo {
            Some(path) => Asset::load(path)?,
            None => Asset::default_logo(),
        };
        Theme::from_sources(&index_template, &posts_template, logo)
    }
}

// Loads the template file contents and joins them into one template source.
fn read_template_files(template_files: &[PathBuf]) -> Result<String> {
    let mut contents = String::new();
    for template_file in template_files {
        debug!(path = %template_file.display(), "reading template file");
        let source = std::fs::read_to_string(template_file).map_err(|err| {
            Error::OpenTemplateFile {
                path: template_file.to_owned(),
                source: err,
            }
        })?;
        contents.push_str(&source);
        contents.push(' ');
    }
    Ok(contents)
}

fn parse_template(name: &str, source: &str) -> Result<Template> {
    let mut template = Template::default();
    template
        .parse(source)
        .map_err(|message| Error::ParseTemplate {
            name: name.to_owned(),
            message,
        })?;
    Ok(template)
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading a [`Theme`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    #[error("opening template file `{}`: {source}", .path.display())]
    OpenTemplateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned for errors parsing template files.
    #[error("parsing {name} template: {message}")]
    ParseTemplate { name: String, message: String },

    /// Returned when a theme asset can't be read.
    #[error("reading asset `{}`: {source}", .path.display())]
    ReadAsset {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned when a theme asset path has no usable file name.
    #[error("invalid asset path `{}`", .0.display())]
    InvalidAssetPath(PathBuf),
}
