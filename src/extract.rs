//! Derives a post's title, description, and renderable body from its raw
//! markdown text. None of these steps fail: a missing heading yields the
//! [`UNTITLED`] title and a missing first paragraph yields an empty
//! description.
//!
//! The source text is expected to look roughly like this:
//!
//! ```md
//! # Title
//!
//! An introductory paragraph which becomes the description. It is dropped
//! from the body so it isn't repeated at the top of the article.
//!
//! ## The rest
//!
//! Everything from the first blank line, heading, or code fence onward is
//! the body.
//! ```

use lazy_static::lazy_static;
use regex::Regex;

/// The title used when a document has no `# ` heading.
pub const UNTITLED: &str = "Untitled";

/// A title heading is only stripped from the body when it starts within this
/// many bytes of the beginning of the document.
const TITLE_HEADING_WINDOW: usize = 100;

/// The maximum description length, in characters, before the ellipsis.
const DESCRIPTION_LIMIT: usize = 200;

/// A truncated description is only shortened to a word boundary when that
/// boundary falls after this many characters.
const DESCRIPTION_MIN_CUT: usize = 100;

const ELLIPSIS: char = '…';

lazy_static! {
    static ref TITLE_HEADING: Regex = Regex::new(r"(?m)^# (.+)\n*").unwrap();
}

/// The parts of a post derived from its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    pub title: String,
    pub description: String,

    /// The markdown to convert to HTML: the text after the title heading
    /// with the introductory paragraph removed.
    pub body: String,
}

/// Runs every extraction over `text`.
pub fn extract(text: &str) -> Content {
    let after_heading = strip_title_heading(text);
    Content {
        title: title(text),
        description: description(after_heading),
        body: strip_first_paragraph(after_heading),
    }
}

/// Returns the text of the first `# ` heading anywhere in `text`, or
/// [`UNTITLED`].
pub fn title(text: &str) -> String {
    match TITLE_HEADING.captures(text) {
        Some(captures) => captures[1].trim().to_owned(),
        None => String::from(UNTITLED),
    }
}

/// Removes the title heading and the blank lines after it, provided the
/// heading sits near the top of the document. A heading found further down is
/// a section heading and `text` is returned unchanged.
pub fn strip_title_heading(text: &str) -> &str {
    match TITLE_HEADING.find(text) {
        Some(m) if m.start() < TITLE_HEADING_WINDOW => &text[m.end()..],
        _ => text,
    }
}

/// Builds the description from the first paragraph of `after_heading`,
/// joining its lines with single spaces and truncating it to
/// [`DESCRIPTION_LIMIT`] characters.
pub fn description(after_heading: &str) -> String {
    let lines: Vec<&str> = after_heading
        .trim()
        .split('\n')
        .map(str::trim)
        .take_while(|line| !is_paragraph_boundary(line))
        .collect();
    truncate(lines.join(" "))
}

/// Drops the first paragraph of `after_heading`. The result starts at the
/// first blank line, heading, or code fence; if there is none, the whole text
/// was the first paragraph and the result is empty.
pub fn strip_first_paragraph(after_heading: &str) -> String {
    let lines: Vec<&str> = after_heading.trim().split('\n').collect();
    match lines
        .iter()
        .position(|line| is_paragraph_boundary(line.trim()))
    {
        Some(i) => lines[i..].join("\n"),
        None => String::new(),
    }
}

fn is_paragraph_boundary(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("```")
}

fn truncate(description: String) -> String {
    if description.chars().count() <= DESCRIPTION_LIMIT {
        return description;
    }

    let mut truncated: String =
        description.chars().take(DESCRIPTION_LIMIT).collect();
    if let Some(i) = truncated.rfind(' ') {
        if truncated[..i].chars().count() > DESCRIPTION_MIN_CUT {
            truncated.truncate(i);
        }
    }
    truncated.push(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_title() {
        assert_eq!("Hello World", title("# Hello World\n\nBody text."));
        assert_eq!("Padded", title("#   Padded  \nBody"));
        assert_eq!("Later", title("intro\n\n## Sub\n\n# Later\n"));
    }

    #[test]
    fn test_title_fallback() {
        assert_eq!(UNTITLED, title("Just some text.\n\n## Only a section\n"));
        assert_eq!(UNTITLED, title("#NoSpace\n"));
        assert_eq!(UNTITLED, title(""));
    }

    #[test]
    fn test_strip_title_heading() {
        let stripped = strip_title_heading("# Hello\n\n\nBody text.");
        assert_eq!("Body text.", stripped);
        assert_eq!(
            "  \nBody",
            strip_title_heading("# Hello\n  \nBody"),
            "only empty lines are consumed after the heading"
        );
    }

    #[test]
    fn test_strip_title_heading_outside_window() {
        let text = format!("{}\n\n# Far Down\n\nMore.", "x".repeat(120));
        assert_eq!(text, strip_title_heading(&text));
    }

    #[test]
    fn test_description() {
        let content = extract(
            "# Title\n\nFirst line\nsecond line.\n\nAnother paragraph.",
        );
        assert_eq!("First line second line.", content.description);
    }

    #[test]
    fn test_description_stops_at_heading_and_fence() {
        assert_eq!("Intro", description("Intro\n## Section\nmore"));
        assert_eq!("Intro", description("Intro\n```rust\nfn main() {}\n```"));
        assert_eq!("", description("## Straight to a section\ntext"));
    }

    #[test]
    fn test_description_truncates_at_word_boundary() {
        let paragraph = "abcdefghi ".repeat(25);
        let got = description(&paragraph);
        assert!(got.ends_with(ELLIPSIS));
        let without_ellipsis = got.trim_end_matches(ELLIPSIS);
        assert!(without_ellipsis.chars().count() <= DESCRIPTION_LIMIT);
        assert!(without_ellipsis.chars().count() > DESCRIPTION_MIN_CUT);
        assert!(without_ellipsis.ends_with("abcdefghi"));
        assert!(paragraph.starts_with(without_ellipsis));
    }

    #[test]
    fn test_description_ignores_early_spaces() {
        // The only space is before the minimum cut point, so the cut falls at
        // the limit instead.
        let paragraph = format!("a {}", "b".repeat(250));
        let got = description(&paragraph);
        assert_eq!(DESCRIPTION_LIMIT + 1, got.chars().count());
        assert!(got.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_description_multibyte() {
        let paragraph = "é".repeat(300);
        let got = description(&paragraph);
        assert_eq!(DESCRIPTION_LIMIT + 1, got.chars().count());
    }

    #[test]
    fn test_short_description_untouched() {
        let paragraph = "word ".repeat(40);
        assert_eq!(paragraph.trim(), description(&paragraph));
    }

    #[test]
    fn test_body_drops_first_paragraph() {
        let content =
            extract("# A\n\nIntro para\nstill intro.\n\n## Section\n\nText.\n");
        assert_eq!("\n## Section\n\nText.", content.body);
    }

    #[test]
    fn test_body_starts_at_fence() {
        let content = extract("# A\n\nIntro\n```\ncode\n```");
        assert_eq!("```\ncode\n```", content.body);
        assert_eq!("Intro", content.description);
    }

    #[test]
    fn test_single_paragraph_has_empty_body() {
        let content = extract("# A\n\nFirst.");
        assert_eq!("A", content.title);
        assert_eq!("First.", content.description);
        assert_eq!("", content.body);
    }

    #[test]
    fn test_no_heading() {
        let content = extract("Opening words.\n\nSecond paragraph.");
        assert_eq!(UNTITLED, content.title);
        assert_eq!("Opening words.", content.description);
        assert_eq!("\nSecond paragraph.", content.body);
    }

    #[test]
    fn test_idempotent() {
        let text = "# T\n\nSome intro.\n\n## S\n\nbody";
        assert_eq!(extract(text), extract(text));
    }
}
