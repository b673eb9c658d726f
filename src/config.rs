//! Defines the [`Config`] type and its loading from an optional YAML project
//! file. A project file looks like this (every key is optional):
//!
//! ```yaml
//! posts_directory: posts
//! output_directory: web
//! theme:
//!   index_template: [theme/index.html]
//!   posts_template: [theme/base.html, theme/post.html]
//!   logo: theme/logo.svg
//! ```
//!
//! Relative paths are resolved against the directory containing the project
//! file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The project file looked for in the working directory when none is given
/// explicitly.
pub const PROJECT_FILE_NAME: &str = "rugoblog.yaml";

const DEFAULT_POSTS_DIRECTORY: &str = "posts";
const DEFAULT_OUTPUT_DIRECTORY: &str = "web";

/// Everything a build needs to know about where things live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The directory holding the post source files.
    pub posts_directory: PathBuf,

    /// The directory the site is written to.
    pub output_directory: PathBuf,

    pub theme: ThemeConfig,
}

/// Theme file locations. Empty lists and a missing logo select the embedded
/// default theme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    /// The files making up the index template, concatenated in order.
    #[serde(default)]
    pub index_template: Vec<PathBuf>,

    /// The files making up the post template, concatenated in order.
    #[serde(default)]
    pub posts_template: Vec<PathBuf>,

    /// The logo image copied into the output directory.
    #[serde(default)]
    pub logo: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Project {
    posts_directory: Option<PathBuf>,
    output_directory: Option<PathBuf>,

    #[serde(default)]
    theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            posts_directory: PathBuf::from(DEFAULT_POSTS_DIRECTORY),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration for a build run from `dir`. If `dir` contains
    /// a [`PROJECT_FILE_NAME`] it's applied on top of the defaults; otherwise
    /// the defaults are returned as-is.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE_NAME);
        match path.is_file() {
            true => Config::from_project_file(&path),
            false => Ok(Config::default()),
        }
    }

    /// Loads the configuration from an explicit project file. Unlike
    /// [`Config::from_directory`], the file must exist.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| Error::ReadProject {
                path: path.to_owned(),
                source: err,
            })?;
        let project: Project =
            serde_yaml::from_str(&contents).map_err(|err| Error::ParseProject {
                path: path.to_owned(),
                source: err,
            })?;

        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let resolve = |p: PathBuf| root.join(p);
        let defaults = Config::default();
        Ok(Config {
            posts_directory: resolve(
                project.posts_directory.unwrap_or(defaults.posts_directory),
            ),
            output_directory: resolve(
                project
                    .output_directory
                    .unwrap_or(defaults.output_directory),
            ),
            theme: ThemeConfig {
                index_template: project
                    .theme
                    .index_template
                    .into_iter()
                    .map(resolve)
                    .collect(),
                posts_template: project
                    .theme
                    .posts_template
                    .into_iter()
                    .map(resolve)
                    .collect(),
                logo: project.theme.logo.map(resolve),
            },
        })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading the project configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the project file can't be read.
    #[error("reading project file `{}`: {source}", .path.display())]
    ReadProject {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned when the project file isn't valid YAML or a field has the
    /// wrong shape.
    #[error("parsing project file `{}`: {source}", .path.display())]
    ParseProject {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
