use crate::html::{Anchor, Query, Region};
use crate::markdown::site_text::{Material, SiteText};

use super::{dial_number, Rule};

/// Placement of every `index.html` field, applied top to bottom.
pub fn rules(text: &SiteText) -> Vec<Rule<'_>> {
    let mut rules = vec![
        Rule::new(
            "title",
            Anchor::first(Query::tag("title")),
            Region::Inner,
            text.title.as_ref(),
        ),
        Rule::new(
            "meta description",
            Anchor::first(Query::tag("meta").attr("name", "description")),
            Region::Attribute("content"),
            text.meta_description.as_ref(),
        ),
        Rule::new(
            "hero heading",
            Anchor::first(Query::tag("h1")),
            Region::LeadingText,
            text.hero_heading.as_ref(),
        ),
        Rule::new(
            "intro heading",
            Anchor::first(
                Query::tag("h2")
                    .class_prefix("text-center")
                    .followed_by(Query::tag("div").class_prefix("bg-white p-8")),
            ),
            Region::Inner,
            text.intro_heading.as_ref(),
        ),
        Rule::new(
            "welcome text",
            Anchor::first(Query::tag("h2").class("sr-only").text("Tervitustekst"))
                .then_after(Query::tag("p")),
            Region::Inner,
            text.welcome_text.as_ref(),
        ),
        Rule::new(
            "story heading",
            Anchor::first(Query::tag("section").id("lugu")).then_first(Query::tag("h2")),
            Region::LeadingText,
            text.story_heading.as_ref(),
        ),
        Rule::new(
            "story text",
            Anchor::first(Query::tag("section").id("lugu"))
                .then_first(Query::tag("div").class_prefix("prose"))
                .then_first(Query::tag("p")),
            Region::Inner,
            text.story_text.as_ref(),
        ),
        Rule::new(
            "materials heading",
            Anchor::first(Query::tag("div").class("text-center max-w-3xl mx-auto"))
                .then_first(Query::tag("h2")),
            Region::Inner,
            text.materials_heading.as_ref(),
        ),
    ];

    for material in &text.materials {
        rules.extend(material_rules(material));
    }

    let tel = || Anchor::first(Query::tag("a").attr_prefix("href", "tel:"));
    let mailto = || Anchor::first(Query::tag("a").attr_prefix("href", "mailto:"));
    rules.extend([
        Rule::new(
            "contact heading",
            Anchor::first(Query::tag("section").id("kontakt")).then_first(Query::tag("h2")),
            Region::Inner,
            text.contact_heading.as_ref(),
        ),
        Rule::new(
            "contact lead",
            Anchor::first(Query::tag("section").id("kontakt"))
                .then_first(Query::tag("p").class_prefix("max-w-xl text-lg")),
            Region::Inner,
            text.contact_lead.as_ref(),
        ),
        Rule::new("phone", tel(), Region::PlainText, text.phone.as_ref()),
        Rule::derived(
            "phone link",
            tel(),
            Region::Attribute("href"),
            text.phone
                .as_ref()
                .map(|p| format!("tel:{}", dial_number(p.as_str()))),
        ),
        Rule::new("email", mailto(), Region::PlainText, text.email.as_ref()),
        Rule::derived(
            "email link",
            mailto(),
            Region::Attribute("href"),
            text.email.as_ref().map(|e| format!("mailto:{}", e)),
        ),
        Rule::new(
            "location",
            Anchor::first(Query::tag("span").class("text-brand-title")),
            Region::Inner,
            text.location.as_ref(),
        ),
    ]);

    rules
}

/// Subtitle, first and second text are the 1st, 2nd and 3rd `<p>` after the
/// material's `<h3>`.
fn material_rules(material: &Material) -> Vec<Rule<'_>> {
    let heading = || Anchor::first(Query::tag("h3").text(&material.heading));
    [
        ("subtitle", &material.subtitle),
        ("text 1", &material.text_1),
        ("text 2", &material.text_2),
    ]
    .into_iter()
    .enumerate()
    .map(|(nth, (part, fragment))| {
        Rule::new(
            format!("{} {}", material.heading, part),
            heading().then_sibling(Query::tag("p"), nth),
            Region::Inner,
            fragment.as_ref(),
        )
    })
    .collect()
}
