use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Comments, doctypes and CDATA are matched so they can be skipped; only the
/// last alternative is an element tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<[!?][^>]*>|<(/?)([A-Za-z][A-Za-z0-9:-]*)([^>]*)>")
        .unwrap()
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

#[derive(Debug, Clone)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    /// The opening tag, `<` to `>`.
    pub open: Range<usize>,
    /// Attribute text inside the opening tag.
    attrs: Range<usize>,
    /// The closing tag, if one was found.
    pub close: Option<Range<usize>>,
    pub parent: Option<usize>,
}

impl Element {
    /// Content between the opening and closing tag.
    pub fn inner(&self) -> Option<Range<usize>> {
        self.close.as_ref().map(|c| self.open.end..c.start)
    }

    /// Byte offset just past the element (its closing tag, or the opening tag
    /// for void and unclosed elements).
    pub fn end(&self) -> usize {
        self.close.as_ref().map_or(self.open.end, |c| c.end)
    }
}

/// An attribute and, when it has one, the byte range of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub value: &'a str,
    pub span: Option<Range<usize>>,
}

#[derive(Debug)]
pub struct Document<'a> {
    source: &'a str,
    elements: Vec<Element>,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut elements: Vec<Element> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        let mut pos = 0;

        while let Some(caps) = TAG_RE.captures_at(source, pos) {
            let Some(whole) = caps.get(0) else { break };
            pos = whole.end();
            let Some(name) = caps.get(2) else { continue };
            let tag = name.as_str().to_ascii_lowercase();

            if caps.get(1).is_some_and(|slash| !slash.as_str().is_empty()) {
                // Closing tag: close the nearest open element with this name,
                // implicitly closing anything left open inside it.
                if let Some(depth) = stack.iter().rposition(|&i| elements[i].tag == tag) {
                    elements[stack[depth]].close = Some(whole.range());
                    stack.truncate(depth);
                }
                continue;
            }

            let attrs = caps.get(3).map_or(whole.end()..whole.end(), |m| m.range());
            let self_closing = source[attrs.clone()].trim_end().ends_with('/');
            let is_void = self_closing || VOID_TAGS.contains(&tag.as_str());
            let is_raw = RAW_TEXT_TAGS.contains(&tag.as_str());

            let idx = elements.len();
            elements.push(Element {
                tag,
                open: whole.range(),
                attrs,
                close: None,
                parent: stack.last().copied(),
            });

            if is_void {
                continue;
            }
            if is_raw {
                // Script and style bodies are not markup; jump to their end tag.
                let closing = format!("</{}", elements[idx].tag);
                match source[pos..].to_ascii_lowercase().find(&closing) {
                    Some(offset) => {
                        let start = pos + offset;
                        let end = source[start..]
                            .find('>')
                            .map_or(source.len(), |e| start + e + 1);
                        elements[idx].close = Some(start..end);
                        pos = end;
                    }
                    None => pos = source.len(),
                }
                continue;
            }
            stack.push(idx);
        }

        Document { source, elements }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, idx: usize) -> &Element {
        &self.elements[idx]
    }

    pub fn inner_html(&self, idx: usize) -> Option<&'a str> {
        let source = self.source;
        self.elements[idx].inner().map(|r| &source[r])
    }

    /// Look up an attribute by (case-insensitive) name.
    pub fn attribute(&self, idx: usize, name: &str) -> Option<Attribute<'a>> {
        let source = self.source;
        let attrs = self.elements[idx].attrs.clone();
        let base = attrs.start;
        ATTR_RE.captures_iter(&source[attrs]).find_map(|caps| {
            let key = caps.get(1)?;
            if !key.as_str().eq_ignore_ascii_case(name) {
                return None;
            }
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4));
            Some(match value {
                Some(v) => Attribute {
                    value: &source[base + v.start()..base + v.end()],
                    span: Some(base + v.start()..base + v.end()),
                },
                None => Attribute {
                    value: "",
                    span: None,
                },
            })
        })
    }

    /// Elements nested inside `idx`, in document order.
    pub fn descendants(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let limit = self.elements[idx].close.as_ref().map_or(0, |c| c.start);
        (idx + 1..self.elements.len()).take_while(move |&i| self.elements[i].open.start < limit)
    }

    /// Elements sharing `idx`'s parent that come after it.
    pub fn following_siblings(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let parent = self.elements[idx].parent;
        (idx + 1..self.elements.len()).filter(move |&i| self.elements[i].parent == parent)
    }

    /// The next sibling element, provided only whitespace separates the two.
    pub fn adjacent_sibling(&self, idx: usize) -> Option<usize> {
        let next = self.following_siblings(idx).next()?;
        let gap = &self.source[self.elements[idx].end()..self.elements[next].open.start];
        gap.trim().is_empty().then_some(next)
    }
}
