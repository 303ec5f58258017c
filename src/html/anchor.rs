use std::borrow::Cow;

use super::elements::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatch<'a> {
    Exact(&'a str),
    Prefix(&'a str),
}

impl AttrMatch<'_> {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrMatch::Exact(v) => value == *v,
            AttrMatch::Prefix(v) => value.starts_with(v),
        }
    }
}

/// Predicate over a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    tag: &'a str,
    attrs: Vec<(&'a str, AttrMatch<'a>)>,
    text: Option<Cow<'a, str>>,
    followed_by: Option<Box<Query<'a>>>,
}

impl<'a> Query<'a> {
    pub fn tag(tag: &'a str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            followed_by: None,
        }
    }

    pub fn attr(mut self, name: &'a str, value: &'a str) -> Self {
        self.attrs.push((name, AttrMatch::Exact(value)));
        self
    }

    pub fn attr_prefix(mut self, name: &'a str, prefix: &'a str) -> Self {
        self.attrs.push((name, AttrMatch::Prefix(prefix)));
        self
    }

    pub fn id(self, id: &'a str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &'a str) -> Self {
        self.attr("class", class)
    }

    pub fn class_prefix(self, prefix: &'a str) -> Self {
        self.attr_prefix("class", prefix)
    }

    /// Trimmed inner HTML must equal `text`.
    pub fn text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The next sibling, separated by whitespace only, must match `next`.
    pub fn followed_by(mut self, next: Query<'a>) -> Self {
        self.followed_by = Some(Box::new(next));
        self
    }

    pub fn matches(&self, doc: &Document<'_>, idx: usize) -> bool {
        if !doc.element(idx).tag.eq_ignore_ascii_case(self.tag) {
            return false;
        }
        let attrs_ok = self.attrs.iter().all(|(name, want)| {
            doc.attribute(idx, name)
                .is_some_and(|a| want.matches(a.value))
        });
        if !attrs_ok {
            return false;
        }
        if let Some(text) = &self.text {
            if doc.inner_html(idx).map(str::trim) != Some(&**text) {
                return false;
            }
        }
        match &self.followed_by {
            Some(next) => doc
                .adjacent_sibling(idx)
                .is_some_and(|n| next.matches(doc, n)),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step<'a> {
    /// First match inside the current element (the whole page at the start).
    First(Query<'a>),
    /// First match anywhere after the current element ends.
    After(Query<'a>),
    /// `n`th matching sibling after the current element, not looking past
    /// the next sibling with the current element's tag.
    Sibling(Query<'a>, usize),
    /// The adjacent sibling, if it matches.
    Next(Query<'a>),
}

/// A path to one element, resolved step by step from the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<'a> {
    steps: Vec<Step<'a>>,
}

impl<'a> Anchor<'a> {
    pub fn first(query: Query<'a>) -> Self {
        Self {
            steps: vec![Step::First(query)],
        }
    }

    pub fn then_first(mut self, query: Query<'a>) -> Self {
        self.steps.push(Step::First(query));
        self
    }

    pub fn then_after(mut self, query: Query<'a>) -> Self {
        self.steps.push(Step::After(query));
        self
    }

    pub fn then_sibling(mut self, query: Query<'a>, nth: usize) -> Self {
        self.steps.push(Step::Sibling(query, nth));
        self
    }

    pub fn then_next(mut self, query: Query<'a>) -> Self {
        self.steps.push(Step::Next(query));
        self
    }

    pub fn resolve(&self, doc: &Document<'_>) -> Option<usize> {
        let mut current: Option<usize> = None;
        for step in &self.steps {
            let found = match (step, current) {
                (Step::First(q), None) => (0..doc.len()).find(|&i| q.matches(doc, i)),
                (Step::First(q), Some(c)) => doc.descendants(c).find(|&i| q.matches(doc, i)),
                (Step::After(q), None) => (0..doc.len()).find(|&i| q.matches(doc, i)),
                (Step::After(q), Some(c)) => {
                    let end = doc.element(c).end();
                    (c + 1..doc.len())
                        .filter(|&i| doc.element(i).open.start >= end)
                        .find(|&i| q.matches(doc, i))
                }
                (Step::Sibling(q, nth), Some(c)) => {
                    let tag = &doc.element(c).tag;
                    doc.following_siblings(c)
                        .take_while(|&i| doc.element(i).tag != *tag)
                        .filter(|&i| q.matches(doc, i))
                        .nth(*nth)
                }
                (Step::Next(q), Some(c)) => doc
                    .adjacent_sibling(c)
                    .filter(|&n| q.matches(doc, n)),
                (Step::Sibling(..) | Step::Next(_), None) => None,
            };
            current = Some(found?);
        }
        current
    }
}
