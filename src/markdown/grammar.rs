//! The markdown phrasings the sync understands.
//!
//! Content authors write `content/site-text.md` by hand, so a few fields accept
//! more than one phrasing. Each phrasing has a name and is tried in the order
//! listed; the first one that yields non-empty text wins. Adding or reordering
//! phrasings changes what authors may write, so bump [`GRAMMAR_VERSION`] with it.

use std::sync::LazyLock;

use regex::Regex;

pub const GRAMMAR_VERSION: u32 = 1;

pub static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::v1);

/// Numbered material subsections: (marker, ordinal, default heading).
pub const MATERIALS: [(&str, u32, &str); 3] = [
    ("7.1", 1, "Puuvillavaibad"),
    ("7.2", 2, "Kaltsuvaibad"),
    ("7.3", 3, "Villavaibad"),
];

#[derive(Debug)]
pub struct Phrasing {
    pub name: &'static str,
    pub pattern: Regex,
}

/// One labelled field and its accepted phrasings, in fallback order.
#[derive(Debug)]
pub struct Locator {
    pub label: &'static str,
    phrasings: Vec<Phrasing>,
}

impl Locator {
    fn new(label: &'static str, phrasings: &[(&'static str, &str)]) -> Self {
        Self {
            label,
            phrasings: phrasings
                .iter()
                .map(|&(name, pattern)| Phrasing {
                    name,
                    pattern: Regex::new(pattern).unwrap(),
                })
                .collect(),
        }
    }

    fn single(label: &'static str, pattern: &str) -> Self {
        Self::new(label, &[("line", pattern)])
    }

    pub fn phrasings(&self) -> &[Phrasing] {
        &self.phrasings
    }
}

/// Fields looked up inside one `7.N)` material subsection.
#[derive(Debug)]
pub struct MaterialGrammar {
    pub heading: Locator,
    pub subtitle: Locator,
    pub text_1: Locator,
    pub text_2: Locator,
}

#[derive(Debug)]
pub struct Grammar {
    pub title: Locator,
    pub meta_description: Locator,
    pub hero_heading: Locator,
    pub intro_heading: Locator,
    pub welcome_text: Locator,
    pub story_heading: Locator,
    pub story_text: Locator,
    pub materials_heading: Locator,
    pub material: MaterialGrammar,
    pub contact_heading: Locator,
    pub contact_lead: Locator,
    pub phone: Locator,
    pub email: Locator,
    pub location: Locator,
    pub gallery_title: Locator,
    pub gallery_intro: Locator,
    /// `- Vaip nr. N — description`; capture 1 is N, capture 2 the text.
    pub gallery_item: Regex,
}

impl Grammar {
    pub fn v1() -> Self {
        Self {
            title: Locator::single("title", r"(?i)Lehe\s*<title>:\s*(.+)"),
            meta_description: Locator::single("meta description", r"(?i)Meta\s*description:\s*(.+)"),
            hero_heading: Locator::single("hero heading", r"(?i)H1\s*pealkiri:\s*(.+)"),
            intro_heading: Locator::single(
                "intro heading",
                r"(?i)\n4\)\s*Väike pealkiri[^\n]*\n-\s*(.+)\n",
            ),
            welcome_text: Locator::new(
                "welcome text",
                &[
                    ("block", r"(?i)5\)\s*Sektsioon 2[\s\S]*?\n-\s*([\s\S]*?)\n\n"),
                    ("line", r"(?i)5\)\s*Sektsioon 2[\s\S]*?-\s*(.+)\n"),
                ],
            ),
            story_heading: Locator::single(
                "story heading",
                r"(?i)Sektsioon\s*3\s*–\s*Tegija Lugu[\s\S]*?Pealkiri:\s*(.+)",
            ),
            story_text: Locator::single(
                "story text",
                r"(?i)Sektsioon\s*3[\s\S]*?Tekst:\s*([\s\S]*?)\n\n",
            ),
            materials_heading: Locator::single(
                "materials heading",
                r"(?i)Sektsioon\s*4[^\n]*\n-\s*(Vaipade materjalid)",
            ),
            material: MaterialGrammar {
                heading: Locator::single("material heading", r"\d+\.\d+\)[^\S\n]*([^\n]+)"),
                subtitle: Locator::single("material subtitle", r"(?i)Alapealkiri:\s*([^\n]+)"),
                text_1: Locator::single("material text 1", r"(?i)Tekst\s*1:\s*([^\n]+)"),
                text_2: Locator::single("material text 2", r"(?i)Tekst\s*2[^:\n]*:\s*([^\n]+)"),
            },
            contact_heading: Locator::single(
                "contact heading",
                r"(?i)Sektsioon\s*5\s*–\s*Võta ühendust.*?Pealkiri:\s*([^\n]+)",
            ),
            contact_lead: Locator::single("contact lead", r"(?i)Sektsioon\s*5[\s\S]*?Lause:\s*([^\n]+)"),
            phone: Locator::single("phone", r"(?i)Telefon:\s*([^\n]+)"),
            email: Locator::single("email", r"(?i)E-post:\s*([^\n]+)"),
            location: Locator::single("location", r"(?i)Asukoht:\s*([^\n]+)"),
            gallery_title: Locator::single(
                "gallery title",
                r"(?i)Galerii.*?Lehe\s*pealkiri:\s*([^\n]+)",
            ),
            gallery_intro: Locator::single("gallery intro", r"(?i)Sissejuhatus:\s*([^\n]+)"),
            gallery_item: Regex::new(r"-\s*Vaip nr\.\s*(\d+)\s*—\s*([^\n]+)").unwrap(),
        }
    }
}
