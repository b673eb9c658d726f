//! Decodes post source file names. A post file is named
//! `YYYY-MM-DD-<slug>.md`; the date prefix is its publish date and the whole
//! name less the extension is its slug.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

const DATE_FORMAT: &str = "%Y-%m-%d";

lazy_static! {
    static ref POST_FILE_NAME: Regex =
        Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})-(.+)\.md$").unwrap();
}

/// The decoded parts of a post file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostFileName {
    /// The publish date taken from the `YYYY-MM-DD` prefix.
    pub date: NaiveDate,

    /// The file name without its `.md` extension, date prefix included.
    pub slug: String,
}

/// Parses a file base name. Returns `Ok(None)` for names that don't follow
/// the post naming convention (those files are simply not posts) and an
/// [`Error`] when the name looks like a post but its date isn't a real
/// calendar date.
pub fn parse(file_name: &str) -> Result<Option<PostFileName>> {
    let captures = match POST_FILE_NAME.captures(file_name) {
        Some(captures) => captures,
        None => return Ok(None),
    };

    let date = NaiveDate::parse_from_str(&captures[1], DATE_FORMAT)
        .map_err(|err| Error::InvalidDate {
            file_name: file_name.to_owned(),
            source: err,
        })?;

    Ok(Some(PostFileName {
        date,
        slug: file_name.strip_suffix(".md").unwrap_or(file_name).to_owned(),
    }))
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a malformed post file name.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the `YYYY-MM-DD` prefix isn't a valid calendar date.
    #[error("parsing date from `{file_name}`: {source}")]
    InvalidDate {
        file_name: String,
        source: chrono::ParseError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_post_name() -> Result<()> {
        let parsed = parse("2024-01-15-hello-world.md")?;
        assert_eq!(
            Some(PostFileName {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                slug: String::from("2024-01-15-hello-world"),
            }),
            parsed
        );
        Ok(())
    }

    #[test]
    fn test_skips_other_names() -> Result<()> {
        for name in &[
            "README.md",
            "2024-01-15.md",
            "2024-01-15-.md",
            "2024-01-15-draft.txt",
            "2024-1-15-short.md",
            "24-01-15-short.md",
            "2024_01_15_underscores.md",
            "2024-01-15-upper.MD",
            "notes-2024-01-15-x.md",
        ] {
            assert_eq!(None, parse(name)?, "{}", name);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_calendar_date_is_an_error() {
        let names =
            ["2024-02-30-leap.md", "2024-13-01-month.md", "2023-00-10-zero.md"];
        for name in &names {
            match parse(name) {
                Err(Error::InvalidDate { file_name, .. }) => {
                    assert_eq!(*name, file_name)
                }
                other => {
                    panic!("{}: wanted InvalidDate, got {:?}", name, other)
                }
            }
        }
    }

    #[test]
    fn test_leap_day() -> Result<()> {
        let parsed = parse("2024-02-29-leap.md")?.unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), parsed.date);
        Ok(())
    }

    #[test]
    fn test_slug_keeps_inner_dots() -> Result<()> {
        let parsed = parse("2021-06-01-v1.2-release.md")?.unwrap();
        assert_eq!("2021-06-01-v1.2-release", parsed.slug);
        Ok(())
    }
}
