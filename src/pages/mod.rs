//! Substitution rule tables for the two pages.

pub mod gallery;
pub mod index;

use std::borrow::Cow;

use tracing::debug;

use crate::html::{substitute, Anchor, Region};
use crate::markdown::Fragment;
use crate::report::{FieldReport, Outcome};

/// One field's placement: where it goes and what goes there.
#[derive(Debug, Clone)]
pub struct Rule<'a> {
    pub field: String,
    pub anchor: Anchor<'a>,
    pub region: Region,
    pub value: Option<Cow<'a, str>>,
}

impl<'a> Rule<'a> {
    pub fn new(
        field: impl Into<String>,
        anchor: Anchor<'a>,
        region: Region,
        fragment: Option<&'a Fragment>,
    ) -> Self {
        Self {
            field: field.into(),
            anchor,
            region,
            value: fragment.map(|f| Cow::Borrowed(f.as_str())),
        }
    }

    /// Rule whose value is computed from a fragment rather than copied.
    pub fn derived(
        field: impl Into<String>,
        anchor: Anchor<'a>,
        region: Region,
        value: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            anchor,
            region,
            value: value.map(Cow::Owned),
        }
    }

    pub fn apply(&self, html: String) -> (String, Outcome) {
        substitute(html, &self.anchor, self.region, self.value.as_deref())
    }
}

/// Run `rules` in order, each on the previous rule's output.
pub fn apply_rules(html: String, rules: &[Rule<'_>]) -> (String, Vec<FieldReport>) {
    let mut html = html;
    let mut fields = Vec::with_capacity(rules.len());
    for rule in rules {
        let (next, outcome) = rule.apply(html);
        html = next;
        match outcome {
            Outcome::AnchorMissing => {
                debug!(field = %rule.field, "no matching element, left unchanged")
            }
            Outcome::NoFragment => debug!(field = %rule.field, "not in markdown, skipped"),
            Outcome::Updated | Outcome::Unchanged => {}
        }
        fields.push(FieldReport {
            field: rule.field.clone(),
            outcome,
        });
    }
    (html, fields)
}

/// `tel:` form of a displayed phone number: whitespace removed, exactly one
/// leading `+`.
pub fn dial_number(display: &str) -> String {
    let compact: String = display.chars().filter(|c| !c.is_whitespace()).collect();
    format!("+{}", compact.strip_prefix('+').unwrap_or(&compact))
}
