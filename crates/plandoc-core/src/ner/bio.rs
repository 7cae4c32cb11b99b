//! Decoding of BIO token tags into entity spans.

use super::{Entity, EntityLabel};

#[derive(Debug, PartialEq, Eq)]
enum Tag<'t> {
    Outside,
    Begin(&'t str),
    Inside(&'t str),
}

fn parse_tag(tag: &str) -> Tag<'_> {
    let tag = tag.trim();
    if tag.is_empty() || tag.eq_ignore_ascii_case("O") {
        return Tag::Outside;
    }
    if let Some(kind) = tag.strip_prefix("B-").or_else(|| tag.strip_prefix("S-")) {
        return Tag::Begin(kind);
    }
    if let Some(kind) = tag.strip_prefix("I-").or_else(|| tag.strip_prefix("E-")) {
        return Tag::Inside(kind);
    }
    // Unprefixed tags (IO scheme) continue a span of the same kind.
    Tag::Inside(tag)
}

struct Span<'t> {
    kind: &'t str,
    start: usize,
    end: usize,
}

/// Turn per-token tags into entity spans over `text`.
///
/// `offsets` holds the byte range of each token; zero-width ranges mark
/// special tokens and are skipped. A `B-` tag directly adjacent to an open
/// span of the same kind continues it, so subword pieces that each carry a
/// `B-` tag still form one entity.
pub(crate) fn decode_entities(text: &str, offsets: &[(usize, usize)], tags: &[&str]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut open: Option<Span<'_>> = None;

    for (&(start, end), tag) in offsets.iter().zip(tags) {
        if start >= end {
            continue;
        }

        match parse_tag(tag) {
            Tag::Outside => {
                if let Some(span) = open.take() {
                    push_span(text, span, &mut entities);
                }
            }
            Tag::Begin(kind) => {
                let continues = open.as_ref().is_some_and(|s| s.kind == kind && s.end == start);
                advance(text, &mut open, continues, Span { kind, start, end }, &mut entities);
            }
            Tag::Inside(kind) => {
                let continues = open.as_ref().is_some_and(|s| s.kind == kind);
                advance(text, &mut open, continues, Span { kind, start, end }, &mut entities);
            }
        }
    }

    if let Some(span) = open {
        push_span(text, span, &mut entities);
    }
    entities
}

fn advance<'t>(
    text: &str,
    open: &mut Option<Span<'t>>,
    continues: bool,
    token: Span<'t>,
    entities: &mut Vec<Entity>,
) {
    if continues {
        if let Some(span) = open.as_mut() {
            span.end = token.end;
        }
    } else if let Some(span) = open.replace(token) {
        push_span(text, span, entities);
    }
}

fn push_span(text: &str, span: Span<'_>, entities: &mut Vec<Entity>) {
    let Some(raw) = text.get(span.start..span.end) else {
        return;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let start = span.start + (raw.len() - raw.trim_start().len());
    entities.push(Entity::new(
        trimmed,
        EntityLabel::from_tag(span.kind),
        start,
        start + trimmed.len(),
    ));
}
