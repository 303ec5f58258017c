use std::ops::Range;

use super::anchor::Anchor;
use super::elements::Document;
use crate::report::Outcome;

/// Which part of the anchored element gets replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Everything between the opening and closing tag.
    Inner,
    /// Text from the opening tag up to the first child that is not inline
    /// formatting (`<em>`, `<strong>`, ...), so a line break or subtitle
    /// span after it survives.
    LeadingText,
    /// Everything between the tags, but only if it holds no markup.
    PlainText,
    /// The value of the named attribute.
    Attribute(&'static str),
}

const INLINE_TAGS: &[&str] = &[
    "b", "code", "em", "i", "mark", "s", "small", "strong", "sub", "sup", "u",
];

fn locate(doc: &Document<'_>, idx: usize, region: Region) -> Option<Range<usize>> {
    let element = doc.element(idx);
    match region {
        Region::Inner => element.inner(),
        Region::LeadingText => {
            let inner = element.inner()?;
            let end = doc
                .descendants(idx)
                .map(|child| doc.element(child))
                .find(|child| {
                    child.parent == Some(idx) && !INLINE_TAGS.contains(&child.tag.as_str())
                })
                .map_or(inner.end, |child| child.open.start);
            Some(inner.start..end)
        }
        Region::PlainText => {
            let inner = element.inner()?;
            (!doc.source()[inner.clone()].contains('<')).then_some(inner)
        }
        Region::Attribute(name) => doc.attribute(idx, name)?.span,
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Replace one region of `html`. A missing fragment or an anchor that finds
/// nothing hands `html` back untouched.
pub fn substitute(
    html: String,
    anchor: &Anchor<'_>,
    region: Region,
    fragment: Option<&str>,
) -> (String, Outcome) {
    let Some(fragment) = fragment else {
        return (html, Outcome::NoFragment);
    };

    let range = {
        let doc = Document::parse(&html);
        anchor.resolve(&doc).and_then(|idx| locate(&doc, idx, region))
    };
    let Some(range) = range else {
        return (html, Outcome::AnchorMissing);
    };

    let value = match region {
        Region::Attribute(_) => escape_attribute(fragment),
        _ => fragment.to_string(),
    };
    if html[range.clone()] == value {
        return (html, Outcome::Unchanged);
    }
    // Markup in a leading-text fragment can end the region early on the next
    // pass; text that already starts with the fragment is left as is.
    if region == Region::LeadingText
        && value.contains('<')
        && html[range.start..].starts_with(&value)
    {
        return (html, Outcome::Unchanged);
    }

    let mut out = String::with_capacity(html.len() - range.len() + value.len());
    out.push_str(&html[..range.start]);
    out.push_str(&value);
    out.push_str(&html[range.end..]);
    (out, Outcome::Updated)
}
