//! Section grammar for template catalogs
//!
//! ```text
//! catalog  := preamble section*
//! section  := heading (line | fence_block)*
//! heading  := "## " name title? EOL
//! fence_block := fence_open line* fence_close
//! ```
//!
//! The first ```` ```json ```` block of a section is its payload. Other fenced
//! blocks are skipped whole, so a heading inside any fence is content.

use super::ast::{Payload, Section, Span};
use super::lexer::{heading_text, lex, Token};

enum State {
    Prose,
    Payload { fence: Span },
    Foreign,
}

/// Split catalog text into its ordered sections
pub fn parse_sections(source: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut state = State::Prose;

    for (token, span) in lex(source) {
        state = match state {
            State::Prose => match token {
                Token::Heading => {
                    sections.push(new_section(&source[span.clone()], span));
                    State::Prose
                }
                Token::JsonFence => match sections.last() {
                    Some(section) if section.payload.is_none() => State::Payload { fence: span },
                    _ => State::Foreign,
                },
                Token::Fence => State::Foreign,
                Token::Newline | Token::Text => State::Prose,
            },
            State::Payload { fence } => match token {
                Token::Fence | Token::JsonFence => {
                    if let Some(section) = sections.last_mut() {
                        section.payload = Some(Payload {
                            body: body_span(source, &fence, span.start),
                            fence,
                            terminated: true,
                        });
                    }
                    State::Prose
                }
                _ => State::Payload { fence },
            },
            State::Foreign => match token {
                Token::Fence | Token::JsonFence => State::Prose,
                _ => State::Foreign,
            },
        };
    }

    if let State::Payload { fence } = state {
        if let Some(section) = sections.last_mut() {
            section.payload = Some(Payload {
                body: body_span(source, &fence, source.len()),
                fence,
                terminated: false,
            });
        }
    }

    sections
}

fn new_section(line: &str, heading: Span) -> Section {
    let text = heading_text(line);
    let (name, title) = match text.split_once(char::is_whitespace) {
        Some((name, title)) => (name, title.trim()),
        None => (text, ""),
    };
    Section {
        name: name.to_string(),
        title: title.to_string(),
        heading,
        payload: None,
    }
}

/// Body runs from the line after the opening fence up to `end`
fn body_span(source: &str, fence: &Span, end: usize) -> Span {
    let rest = &source[fence.end..end];
    let skipped = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    };
    (fence.end + skipped)..end
}
