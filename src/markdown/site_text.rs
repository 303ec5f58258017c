use std::collections::BTreeMap;

use super::grammar::{Grammar, Locator, GRAMMAR, MATERIALS};
use super::{Extractor, Fragment};

/// One `7.N)` material subsection. `heading` is always set: it falls back to
/// the default name so the matching `<h3>` can still be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub heading: String,
    pub subtitle: Option<Fragment>,
    pub text_1: Option<Fragment>,
    pub text_2: Option<Fragment>,
}

/// Everything pulled out of `site-text.md` in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteText {
    pub title: Option<Fragment>,
    pub meta_description: Option<Fragment>,
    pub hero_heading: Option<Fragment>,
    pub intro_heading: Option<Fragment>,
    pub welcome_text: Option<Fragment>,
    pub story_heading: Option<Fragment>,
    pub story_text: Option<Fragment>,
    pub materials_heading: Option<Fragment>,
    pub materials: Vec<Material>,
    pub contact_heading: Option<Fragment>,
    pub contact_lead: Option<Fragment>,
    pub phone: Option<Fragment>,
    pub email: Option<Fragment>,
    pub location: Option<Fragment>,
    pub gallery_title: Option<Fragment>,
    pub gallery_intro: Option<Fragment>,
    pub gallery_items: BTreeMap<String, Fragment>,
}

impl SiteText {
    pub fn extract(markdown: &str) -> Self {
        Self::extract_with(markdown, &GRAMMAR)
    }

    /// Line endings are normalised to `\n` first; the grammar's block
    /// patterns end at a blank line.
    pub fn extract_with(markdown: &str, grammar: &Grammar) -> Self {
        let markdown = markdown.replace("\r\n", "\n");
        let md = Extractor::new(&markdown);

        let materials = MATERIALS
            .iter()
            .map(|&(marker, ordinal, default)| {
                let section = md.section(marker);
                let field = |locator: &Locator| section.and_then(|s| s.extract_first(locator));
                let heading = field(&grammar.material.heading)
                    .map(|h| numbered_heading(ordinal, h.as_str()))
                    .unwrap_or_else(|| format!("{}. {}", ordinal, default));
                Material {
                    heading,
                    subtitle: field(&grammar.material.subtitle),
                    text_1: field(&grammar.material.text_1),
                    text_2: field(&grammar.material.text_2),
                }
            })
            .collect();

        SiteText {
            title: md.extract_first(&grammar.title),
            meta_description: md.extract_first(&grammar.meta_description),
            hero_heading: md.extract_first(&grammar.hero_heading),
            intro_heading: md.extract_first(&grammar.intro_heading),
            welcome_text: md.extract_first(&grammar.welcome_text),
            story_heading: md.extract_first(&grammar.story_heading),
            story_text: md.extract_first(&grammar.story_text),
            materials_heading: md.extract_first(&grammar.materials_heading),
            materials,
            contact_heading: md.extract_first(&grammar.contact_heading),
            contact_lead: md.extract_first(&grammar.contact_lead),
            phone: md.extract_first(&grammar.phone),
            email: md.extract_first(&grammar.email),
            location: md.extract_first(&grammar.location),
            gallery_title: md.extract_first(&grammar.gallery_title),
            gallery_intro: md.extract_first(&grammar.gallery_intro),
            gallery_items: md.extract_many(&grammar.gallery_item),
        }
    }

    /// Count of single-value fields that were found (materials and gallery
    /// items excluded).
    pub fn present_fields(&self) -> usize {
        [
            &self.title,
            &self.meta_description,
            &self.hero_heading,
            &self.intro_heading,
            &self.welcome_text,
            &self.story_heading,
            &self.story_text,
            &self.materials_heading,
            &self.contact_heading,
            &self.contact_lead,
            &self.phone,
            &self.email,
            &self.location,
            &self.gallery_title,
            &self.gallery_intro,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

/// HTML material headings carry their ordinal (`2. Kaltsuvaibad`); add it
/// when the markdown heading leaves it out.
fn numbered_heading(ordinal: u32, heading: &str) -> String {
    let prefix = format!("{}.", ordinal);
    match heading.strip_prefix(&prefix) {
        Some(rest) => format!("{} {}", prefix, rest.trim_start()),
        None => format!("{} {}", prefix, heading),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> SiteText {
        let md = std::fs::read_to_string("tests/fixtures/site-text.md").unwrap();
        SiteText::extract(&md)
    }

    fn text(f: &Option<Fragment>) -> Option<&str> {
        f.as_ref().map(|f| f.as_str())
    }

    #[test]
    fn fixture_page_fields() {
        let t = fixture();
        assert_eq!(text(&t.title), Some("Käsitöövaibad | Kadri Vaibad"));
        assert_eq!(
            text(&t.meta_description),
            Some("Käsitsi kootud puuvilla-, kaltsu- ja villavaibad Võrumaalt.")
        );
        assert_eq!(text(&t.hero_heading), Some("Kootud armastusega"));
        assert_eq!(text(&t.intro_heading), Some("Iga vaip on ainulaadne"));
        assert_eq!(
            text(&t.welcome_text),
            Some("Tere tulemast! Koon vaipu juba üle kahekümne aasta\nja iga vaip sünnib hoole ja kannatlikkusega.")
        );
        assert_eq!(text(&t.story_heading), Some("Minu lugu"));
        assert_eq!(
            text(&t.story_text),
            Some("Alustasin kudumist vanaema telgedel. Täna koon vaipu oma väikeses töökojas.")
        );
        assert_eq!(text(&t.materials_heading), Some("Vaipade materjalid"));
    }

    #[test]
    fn fixture_materials_are_scoped() {
        let t = fixture();
        assert_eq!(t.materials.len(), 3);

        let puuvill = &t.materials[0];
        assert_eq!(puuvill.heading, "1. Puuvillavaibad");
        assert_eq!(text(&puuvill.subtitle), Some("Kerged ja pestavad"));
        assert_eq!(text(&puuvill.text_1), Some("Sobivad kööki, esikusse ja lastetuppa."));
        assert_eq!(text(&puuvill.text_2), Some("Masinpestavad 40 kraadi juures."));

        // 7.2 has no "Tekst 2"; it must not borrow the one from 7.3.
        let kalts = &t.materials[1];
        assert_eq!(kalts.heading, "2. Kaltsuvaibad");
        assert!(kalts.text_2.is_none());

        let vill = &t.materials[2];
        assert_eq!(vill.heading, "3. Villavaibad");
        assert_eq!(text(&vill.text_2), Some("Villa ei tohi masinas pesta."));
    }

    #[test]
    fn fixture_contact_and_gallery() {
        let t = fixture();
        assert_eq!(text(&t.contact_heading), Some("Võta ühendust"));
        assert_eq!(
            text(&t.contact_lead),
            Some("Küsi julgelt pakkumist või tule töökotta külla.")
        );
        assert_eq!(text(&t.phone), Some("+372 5555 1234"));
        assert_eq!(text(&t.email), Some("info@example.com"));
        assert_eq!(text(&t.location), Some("Võru, Eesti"));
        assert_eq!(text(&t.gallery_title), Some("Vaipade galerii"));
        assert_eq!(
            text(&t.gallery_intro),
            Some("Valik viimastel aastatel kootud vaipadest.")
        );
        let keys: Vec<&str> = t.gallery_items.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["1", "2", "7"]);
        assert_eq!(t.gallery_items["2"].as_str(), "Värviline kaltsuvaip vanadest särkidest");
    }

    #[test]
    fn crlf_markdown_extracts_the_same() {
        let md = std::fs::read_to_string("tests/fixtures/site-text.md").unwrap();
        let crlf = md.replace("\r\n", "\n").replace('\n', "\r\n");
        let t = SiteText::extract(&crlf);
        assert_eq!(t, fixture());
        assert_eq!(text(&t.story_text).map(|s| s.contains('\r')), Some(false));

        let t = SiteText::extract("6) Sektsioon 3\r\nTekst: Alustasin.\r\n\r\n7) x");
        assert_eq!(text(&t.story_text), Some("Alustasin."));
    }

    #[test]
    fn empty_markdown_extracts_nothing() {
        let t = SiteText::extract("");
        assert_eq!(t.present_fields(), 0);
        assert!(t.gallery_items.is_empty());
        // Material headings still resolve to defaults for anchoring.
        assert_eq!(t.materials[0].heading, "1. Puuvillavaibad");
        assert!(t.materials.iter().all(|m| m.subtitle.is_none()));
    }

    #[test]
    fn heading_without_ordinal_gets_one() {
        assert_eq!(numbered_heading(2, "Kaltsuvaibad"), "2. Kaltsuvaibad");
        assert_eq!(numbered_heading(2, "2.Kaltsuvaibad"), "2. Kaltsuvaibad");
        assert_eq!(numbered_heading(3, "3. Villavaibad"), "3. Villavaibad");
    }
}
