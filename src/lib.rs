//! The library code for the `rugoblog` static blog generator. A build reads a
//! directory of `YYYY-MM-DD-<slug>.md` files and writes an `index.html`, one
//! `<slug>.html` per post, and a logo image. The architecture breaks down into
//! two steps:
//!
//! 1. Parsing posts from source files on disk ([`crate::parser`])
//! 2. Rendering the posts into output files on disk ([`crate::write`])
//!
//! The first step does most of the work. Each file name is decoded into a
//! publish date and slug ([`crate::filename`]), the title, description, and
//! body are pulled out of the text ([`crate::extract`]), and the body is
//! converted to HTML ([`crate::markdown`]). Once every post is parsed the
//! collection is sorted newest first and each post is linked to its
//! neighbours ([`crate::collection`]).
//!
//! The second step is pretty straight-forward: for each page, apply the
//! template (either the post template or the index template from the
//! [`crate::theme`]) and write the result to disk.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod collection;
pub mod config;
pub mod extract;
pub mod filename;
pub mod htmlrenderer;
pub mod markdown;
pub mod parser;
pub mod post;
pub mod theme;
pub mod write;
