use crate::html::{Anchor, Query, Region};
use crate::markdown::site_text::SiteText;

use super::Rule;

/// Placement of every `galerii.html` field. Each `Vaip nr. N` item targets
/// the first `<p>` after the `<h3>` carrying that exact label.
pub fn rules(text: &SiteText) -> Vec<Rule<'_>> {
    let mut rules = vec![
        Rule::new(
            "gallery title",
            Anchor::first(Query::tag("h1")),
            Region::LeadingText,
            text.gallery_title.as_ref(),
        ),
        Rule::new(
            "gallery intro",
            Anchor::first(Query::tag("h1")).then_next(Query::tag("p")),
            Region::Inner,
            text.gallery_intro.as_ref(),
        ),
    ];

    rules.extend(text.gallery_items.iter().map(|(number, description)| {
        let label = format!("Vaip nr. {}", number);
        let anchor = Anchor::first(Query::tag("h3").text(label.clone()))
            .then_sibling(Query::tag("p"), 0);
        Rule::new(label, anchor, Region::Inner, Some(description))
    }));

    rules
}
