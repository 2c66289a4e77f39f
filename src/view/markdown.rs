//! Markdown and text helpers for HTML output

use pulldown_cmark::{Event, Options, Parser, TagEnd, html};

/// Render markdown to sanitized HTML
pub fn markdown_to_html(input: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(input, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);
    ammonia::clean(&out)
}

/// Flatten markdown to plain text, one line per block
pub fn markdown_to_plain(input: &str) -> String {
    let mut out = String::new();

    for event in Parser::new(input) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => out.push('\n'),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Escape plain text for use in HTML text or attribute values
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}
