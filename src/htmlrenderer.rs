//! Implements a custom [`push_html`] that gives every heading an `id`
//! attribute derived from its text, so that sections of a post can be linked
//! to directly. [`pulldown_cmark::html::push_html`] has no hook for this.
//! Raw HTML in the source is written through untouched.

use pulldown_cmark::escape::{escape_href, escape_html, StrWrite};
use pulldown_cmark::{Alignment, CodeBlockKind, CowStr, Event, LinkType, Tag};
use std::collections::HashSet;
use std::fmt::{self, Display};
use std::io;

struct Adaptor<'a, T> {
    formatter: &'a mut T,
    result: fmt::Result,
}

impl<T> Adaptor<'_, T> {
    fn handle_result(&mut self, result: fmt::Result) -> io::Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                self.result = result;
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}

impl<T: fmt::Write> StrWrite for Adaptor<'_, T> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        let result = self.formatter.write_str(s);
        self.handle_result(result)
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> io::Result<()> {
        let result = self.formatter.write_fmt(args);
        self.handle_result(result)
    }
}

struct EscapeHref<'a>(CowStr<'a>);

impl<'a> Display for EscapeHref<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };
        let _ = escape_href(&mut adaptor, &self.0);
        adaptor.result
    }
}

struct EscapeHtml<'a>(CowStr<'a>);

impl<'a> Display for EscapeHtml<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };

        let _ = escape_html(&mut adaptor, &self.0);
        adaptor.result
    }
}

enum TableState {
    Head,
    Body,
}

/// A heading whose contents are still being rendered. The opening tag can't
/// be written until the heading's text is known.
struct OpenHeading {
    level: u32,

    /// The plain text of the heading, used to derive its `id`.
    text: String,

    /// The rendered inner HTML of the heading.
    html: String,
}

/// Renders markdown [`Event`]s into HTML. This is largely modeled after
/// [`pulldown_cmark`]'s private [`HtmlWriter`
/// struct](https://github.com/raphlinus/pulldown-cmark/blob/bf0a1a4938dbd2ec41c3add069b3d361d11731f4/src/html.rs#L36-L50).
struct HtmlRenderer {
    table_alignments: Vec<Alignment>,
    table_state: TableState,
    table_cell_index: usize,

    /// Set between a heading's start and end events.
    heading: Option<OpenHeading>,

    /// Every heading `id` handed out so far in this document.
    heading_ids: HashSet<String>,

    /// How many images we're nested inside of. Text inside an image is its
    /// alt text rather than content.
    image_depth: usize,
}

impl<'a> HtmlRenderer {
    fn on_event<W: StrWrite>(
        &mut self,
        w: &mut W,
        event: Event<'a>,
    ) -> io::Result<()> {
        match (self.heading.take(), event) {
            (None, Event::Start(Tag::Heading(level))) => {
                self.heading = Some(OpenHeading {
                    level,
                    text: String::new(),
                    html: String::new(),
                });
                Ok(())
            }
            (Some(heading), Event::End(Tag::Heading(_))) => {
                self.on_heading(w, heading)
            }
            (Some(mut heading), event) => {
                if let Event::Text(text) | Event::Code(text) = &event {
                    heading.text.push_str(text);
                }
                let result = self.render(&mut heading.html, event);
                self.heading = Some(heading);
                result
            }
            (None, event) => self.render(w, event),
        }
    }

    fn render<W: StrWrite>(
        &mut self,
        w: &mut W,
        event: Event<'a>,
    ) -> io::Result<()> {
        if self.image_depth > 0 {
            return self.on_image_alt(w, event);
        }

        match event {
            Event::Start(tag) => self.on_start(w, tag),
            Event::End(tag) => self.on_end(w, tag),
            Event::Code(code) => self.on_code(w, code),
            Event::FootnoteReference(name) => write!(
                w,
                concat!(
                    r#"<sup class="footnote-reference">"#,
                    r##"<a href="#{}">{}</a></sup>"##,
                ),
                EscapeHtml(name.clone()),
                EscapeHtml(name),
            ),
            Event::HardBreak => self.on_hard_break(w),
            Event::Html(html) => self.on_html(w, html),
            Event::Rule => self.on_rule(w),
            Event::SoftBreak => self.on_soft_break(w),
            Event::TaskListMarker(checked) => {
                self.on_task_list_marker(w, checked)
            }
            Event::Text(text) => self.on_text(w, text),
        }
    }
}

impl<'a> HtmlRenderer {
    fn new() -> Self {
        HtmlRenderer {
            table_alignments: Vec::default(),
            table_state: TableState::Head,
            table_cell_index: usize::default(),
            heading: None,
            heading_ids: HashSet::new(),
            image_depth: 0,
        }
    }

    /// Derives a unique anchor id from a heading's text: the slugified text,
    /// with `-1`, `-2`, ... appended when an earlier heading already took it.
    fn heading_id(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = String::from("heading");
        }

        let mut id = base.clone();
        let mut n = 0;
        while self.heading_ids.contains(&id) {
            n += 1;
            id = format!("{}-{}", base, n);
        }
        self.heading_ids.insert(id.clone());
        id
    }

    fn on_heading<W: StrWrite>(
        &mut self,
        w: &mut W,
        heading: OpenHeading,
    ) -> io::Result<()> {
        let id = self.heading_id(&heading.text);
        write!(
            w,
            r#"<h{} id="{}">{}</h{}>"#,
            heading.level, id, heading.html, heading.level,
        )
    }

    fn on_start<W: StrWrite>(
        &mut self,
        w: &mut W,
        tag: Tag<'a>,
    ) -> io::Result<()> {
        match tag {
            Tag::BlockQuote => write!(w, "<blockquote>"),
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => {
                    match info.split(' ').next().unwrap_or_default() {
                        "" => w.write_str("<pre><code>"),
                        lang => write!(
                            w,
                            r#"<pre><code class="language-{}">"#,
                            EscapeHtml(CowStr::from(lang))
                        ),
                    }
                }
                CodeBlockKind::Indented => w.write_str("<pre><code>"),
            },
            Tag::Emphasis => w.write_str("<em>"),
            Tag::FootnoteDefinition(name) => {
                let name = EscapeHtml(name);
                write!(
                    w,
                    concat!(
                        r#"<div class="footnote-definition" id="{}">"#,
                        r#"<sup class="footnote-definition-label">{}</sup>"#,
                    ),
                    &name, &name,
                )
            }
            // Headings are intercepted in `on_event`.
            Tag::Heading(level) => write!(w, "<h{}>", level),
            Tag::Image(_link_type, dest, _title) => {
                self.image_depth += 1;
                write!(w, r#"<img src="{}" alt=""#, EscapeHref(dest))
            }
            Tag::Item => w.write_str("<li>"),
            Tag::Link(LinkType::Email, dest, title) => write!(
                w,
                r#"<a href="mailto:{}" title="{}">"#,
                EscapeHref(dest),
                EscapeHtml(title),
            ),
            Tag::Link(_link_type, dest, title) if title.is_empty() => {
                write!(w, r#"<a href="{}">"#, EscapeHref(dest))
            }
            Tag::Link(_link_type, dest, title) => write!(
                w,
                r#"<a href="{}" title="{}">"#,
                EscapeHref(dest),
                EscapeHtml(title),
            ),
            Tag::List(None) => w.write_str("<ul>"),
            Tag::List(Some(1)) => w.write_str("<ol>"),
            Tag::List(Some(start)) => write!(w, r#"<ol start="{}">"#, start),
            Tag::Paragraph => write!(w, "<p>"),
            Tag::Strikethrough => w.write_str("<del>"),
            Tag::Strong => w.write_str("<strong>"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                w.write_str("<table>")
            }
            Tag::TableHead => {
                self.table_state = TableState::Head;
                self.table_cell_index = 0;
                w.write_str("<thead><tr>")
            }
            Tag::TableRow => {
                self.table_cell_index = 0;
                w.write_str("<tr>")
            }
            Tag::TableCell => write!(
                w,
                "<{}{}>",
                match self.table_state {
                    TableState::Head => "th",
                    TableState::Body => "td",
                },
                match self.table_alignments.get(self.table_cell_index) {
                    Some(Alignment::Left) => r#" style="text-align: left""#,
                    Some(Alignment::Right) => r#" style="text-align: right""#,
                    Some(Alignment::Center) => r#" style="text-align: center""#,
                    _ => "",
                }
            ),
        }
    }

    fn on_end<W: StrWrite>(
        &mut self,
        w: &mut W,
        tag: Tag,
    ) -> io::Result<()> {
        match tag {
            Tag::BlockQuote => w.write_str("</blockquote>"),
            Tag::CodeBlock(_) => w.write_str("</code></pre>"),
            Tag::Emphasis => w.write_str("</em>"),
            Tag::FootnoteDefinition(_) => w.write_str("</div>"),
            Tag::Heading(level) => write!(w, "</h{}>", level),
            Tag::Image(_, _, _) => Ok(()), // handled in `on_image_alt`
            Tag::Item => w.write_str("</li>"),
            Tag::Link(_, _, _) => w.write_str("</a>"),
            Tag::List(Some(_)) => w.write_str("</ol>"),
            Tag::List(None) => w.write_str("</ul>"),
            Tag::Paragraph => w.write_str("</p>"),
            Tag::Strikethrough => w.write_str("</del>"),
            Tag::Strong => w.write_str("</strong>"),
            Tag::Table(_) => w.write_str("</tbody></table>"),
            Tag::TableHead => {
                self.table_state = TableState::Body;
                w.write_str("</tr></thead><tbody>")
            }
            Tag::TableRow => w.write_str("</tr>"),
            Tag::TableCell => {
                self.table_cell_index += 1;
                w.write_str(match self.table_state {
                    TableState::Head => "</th>",
                    TableState::Body => "</td>",
                })
            }
        }
    }

    /// Handles events inside an image: text becomes the escaped `alt`
    /// attribute and the closing event finishes the tag.
    fn on_image_alt<W: StrWrite>(
        &mut self,
        w: &mut W,
        event: Event<'a>,
    ) -> io::Result<()> {
        match event {
            Event::Start(Tag::Image(..)) => {
                self.image_depth += 1;
                Ok(())
            }
            Event::End(Tag::Image(_, _, title)) => {
                self.image_depth -= 1;
                if self.image_depth > 0 {
                    Ok(())
                } else if title.is_empty() {
                    w.write_str(r#"" />"#)
                } else {
                    write!(w, r#"" title="{}" />"#, EscapeHtml(title))
                }
            }
            Event::Text(text) | Event::Code(text) => escape_html(w, &text),
            Event::SoftBreak | Event::HardBreak => w.write_str(" "),
            _ => Ok(()),
        }
    }

    fn on_text<W: StrWrite>(
        &mut self,
        w: &mut W,
        s: CowStr,
    ) -> io::Result<()> {
        escape_html(w, &s)
    }

    fn on_code<W: StrWrite>(
        &mut self,
        w: &mut W,
        s: CowStr,
    ) -> io::Result<()> {
        write!(w, "<code>{}</code>", EscapeHtml(s))
    }

    fn on_html<W: StrWrite>(
        &mut self,
        w: &mut W,
        s: CowStr,
    ) -> io::Result<()> {
        w.write_str(&s)
    }

    fn on_soft_break<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_str("\n")
    }

    fn on_hard_break<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_str("<br />\n")
    }

    fn on_rule<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_str("<hr />\n")
    }

    fn on_task_list_marker<W: StrWrite>(
        &mut self,
        w: &mut W,
        checked: bool,
    ) -> io::Result<()> {
        write!(
            w,
            r#"<input disabled="" type="checkbox" {}/>"#,
            match checked {
                true => r#"checked="" "#,
                false => "",
            }
        )
    }
}

/// Converts [`Event`]s into an HTML string much like
/// `pulldown_cmark::html::push_html` except that headings get anchor ids. See
/// the module description for more details.
pub fn push_html<'a, I>(out: &mut String, events: I) -> io::Result<()>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut renderer = HtmlRenderer::new();
    for event in events {
        renderer.on_event(out, event)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use pulldown_cmark::{Options, Parser};

    fn render(markdown: &str) -> String {
        let mut out = String::new();
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
        push_html(&mut out, parser).unwrap();
        out
    }

    #[test]
    fn test_heading_ids() {
        assert_eq!(
            r#"<h2 id="getting-started">Getting <em>Started</em></h2>"#,
            render("## Getting *Started*")
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let html = render("# Notes\n\n## Notes\n\n### Notes\n");
        assert!(html.contains(r#"<h1 id="notes">"#), "{}", html);
        assert!(html.contains(r#"<h2 id="notes-1">"#), "{}", html);
        assert!(html.contains(r#"<h3 id="notes-2">"#), "{}", html);
    }

    #[test]
    fn test_heading_without_text() {
        assert!(render("## ???\n").contains(r#"<h2 id="heading">"#));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render(
            "<div class=\"note\">\n<b>hi</b>\n</div>\n\n\
             Text with <span>inline</span>.",
        );
        assert!(html.contains("<div class=\"note\">"), "{}", html);
        assert!(html.contains("<span>inline</span>"), "{}", html);
    }

    #[test]
    fn test_table() {
        let html = render("| a | b |\n|---|--:|\n| 1 | 2 |\n");
        assert!(html.starts_with("<table><thead><tr><th>a</th>"), "{}", html);
        assert!(
            html.contains(r#"<td style="text-align: right">2</td>"#),
            "{}",
            html
        );
    }

    #[test]
    fn test_image_alt_text() {
        assert_eq!(
            r#"<p><img src="cat.png" alt="cats &amp; dogs" title="Cat" /></p>"#,
            render(r#"![cats & *dogs*](cat.png "Cat")"#)
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!("<p>1 &lt; 2 &amp; 3</p>", render("1 \\< 2 & 3"));
    }
}
