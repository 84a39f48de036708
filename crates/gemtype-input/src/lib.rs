// this_file: crates/gemtype-input/src/lib.rs

//! Input classification for text/gemini documents
//!
//! The first stage of the engine. Splits a raw document into paragraphs
//! (one per markup line) and tags each with its [`LineKind`]. Nothing is
//! decoded here: paragraphs are byte views into the document, so invalid
//! UTF-8 surfaces later, during layout.
//!
//! Malformed markup is never an error. Every line gets some reasonable
//! interpretation.

use gemtype_core::types::{LineKind, Paragraph};

const PREFORMAT_TOGGLE: &[u8] = b"```";

fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn skip_space(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !is_space(*b)).unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_end_space(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| !is_space(*b)).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Byte position of `part` inside `line`; `part` must be a subslice of it
fn offset_in(line: &[u8], part: &[u8]) -> usize {
    (part.as_ptr() as usize).saturating_sub(line.as_ptr() as usize)
}

/// Split `=> target label` into target and label
///
/// Without a label the target doubles as the label.
fn split_link(rest: &[u8]) -> (&[u8], &[u8]) {
    let rest = skip_space(rest);
    let target_end = rest.iter().position(|b| is_space(*b)).unwrap_or(rest.len());
    let target = &rest[..target_end];
    let label = trim_end_space(skip_space(&rest[target_end..]));
    if label.is_empty() {
        (target, target)
    } else {
        (target, label)
    }
}

/// Classify one line given the current preformatted mode
///
/// Returns the paragraph (None for toggle lines) and the mode that holds
/// for the next line. Paragraph offsets are relative to `line`.
pub fn classify_line(line: &[u8], preformatted: bool) -> (Option<Paragraph<'_>>, bool) {
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    if line.starts_with(PREFORMAT_TOGGLE) {
        return (None, !preformatted);
    }

    let paragraph = |text, kind| Paragraph {
        text,
        link_target: None,
        kind,
        offset: offset_in(line, text),
        target_offset: 0,
    };

    let classified = if preformatted {
        paragraph(line, LineKind::Preformatted)
    } else if let Some(rest) = line.strip_prefix(b"=>") {
        let (target, label) = split_link(rest);
        Paragraph {
            text: label,
            link_target: Some(target),
            kind: LineKind::Link,
            offset: offset_in(line, label),
            target_offset: offset_in(line, target),
        }
    } else if let Some(rest) = line.strip_prefix(b"###") {
        paragraph(skip_space(rest), LineKind::HeadingSmall)
    } else if let Some(rest) = line.strip_prefix(b"##") {
        paragraph(skip_space(rest), LineKind::HeadingMedium)
    } else if let Some(rest) = line.strip_prefix(b"#") {
        paragraph(skip_space(rest), LineKind::HeadingBig)
    } else if line.starts_with(b"* ") {
        paragraph(line, LineKind::ListItem)
    } else if line.starts_with(b">") {
        paragraph(line, LineKind::Quote)
    } else {
        paragraph(line, LineKind::Text)
    };

    (Some(classified), preformatted)
}

/// Split a document into classified paragraphs
///
/// Paragraphs end at `\n`; a trailing chunk without a newline still counts.
/// The preformatted mode is threaded from line to line as a plain value.
/// Toggle lines yield no paragraph; their bytes are never looked at again.
pub fn classify(document: &[u8]) -> Vec<Paragraph<'_>> {
    let mut lines: Vec<&[u8]> = document.split(|b| *b == b'\n').collect();
    // `split` yields an empty tail after a final newline, and one empty
    // line for an empty document.
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let (paragraphs, preformatted, _) = lines.into_iter().fold(
        (Vec::new(), false, 0),
        |(mut out, preformatted, start), line| {
            let (paragraph, next) = classify_line(line, preformatted);
            out.extend(paragraph.map(|p| Paragraph {
                offset: start + p.offset,
                target_offset: start + p.target_offset,
                ..p
            }));
            (out, next, start + line.len() + 1)
        },
    );

    if preformatted {
        log::debug!("Document ends inside a preformatted block");
    }
    log::debug!("Classified {} paragraphs", paragraphs.len());
    paragraphs
}
