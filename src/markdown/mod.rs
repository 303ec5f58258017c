pub mod grammar;
pub mod site_text;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use grammar::Locator;

/// Start of any numbered subsection line: `5)`, `7.2)`, `## 8)`.
static NUMBERED_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[#*\s-]*\d+(?:\.\d+)*\)").unwrap());

/// Non-empty text taken from the markdown, trimmed at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Trim `raw`; text that is empty after trimming is no fragment at all.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view over the markdown source. Every lookup reports a miss as
/// `None`; nothing here fails.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    source: &'a str,
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    #[cfg(test)]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// First match of `pattern`, capture group 1.
    pub fn extract_one(&self, pattern: &Regex) -> Option<Fragment> {
        pattern
            .captures(self.source)
            .and_then(|caps| caps.get(1))
            .and_then(|m| Fragment::new(m.as_str()))
    }

    /// Try each phrasing of `locator` in order; the first non-empty match wins.
    pub fn extract_first(&self, locator: &Locator) -> Option<Fragment> {
        locator.phrasings().iter().find_map(|p| {
            let found = self.extract_one(&p.pattern)?;
            trace!(field = locator.label, phrasing = p.name, "matched");
            Some(found)
        })
    }

    /// All matches of `pattern` in document order, keyed by capture 1 with
    /// capture 2 as the value. A repeated key keeps the later value.
    pub fn extract_many(&self, pattern: &Regex) -> BTreeMap<String, Fragment> {
        let mut items = BTreeMap::new();
        for caps in pattern.captures_iter(self.source) {
            let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let key = key.as_str().trim();
            if key.is_empty() {
                continue;
            }
            if let Some(value) = Fragment::new(value.as_str()) {
                items.insert(key.to_string(), value);
            }
        }
        items
    }

    /// Narrow to the numbered subsection opened by `marker` (e.g. `7.1`),
    /// ending where the next numbered subsection starts.
    pub fn section(&self, marker: &str) -> Option<Extractor<'a>> {
        let start_re =
            Regex::new(&format!(r"(?m)^[#*\s-]*{}\)", regex::escape(marker))).ok()?;
        let start = start_re.find(self.source)?;
        let end = NUMBERED_MARKER_RE
            .find_at(self.source, start.end())
            .map(|m| m.start())
            .unwrap_or(self.source.len());
        Some(Extractor::new(&self.source[start.start()..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_trims_both_ends_only() {
        let f = Fragment::new("  Tere\n  tulemast \n").unwrap();
        assert_eq!(f.as_str(), "Tere\n  tulemast");
    }

    #[test]
    fn blank_fragment_is_absent() {
        assert!(Fragment::new(" \n\t").is_none());
        assert!(Fragment::new("").is_none());
    }

    #[test]
    fn extract_one_miss() {
        let re = Regex::new(r"Telefon:\s*([^\n]+)").unwrap();
        assert!(Extractor::new("E-post: a@b.ee").extract_one(&re).is_none());
    }

    #[test]
    fn extract_one_first_match() {
        let re = Regex::new(r"Telefon:\s*([^\n]+)").unwrap();
        let ex = Extractor::new("Telefon: 111\nTelefon: 222\n");
        assert_eq!(ex.extract_one(&re).unwrap().as_str(), "111");
    }

    #[test]
    fn extract_many_later_key_wins() {
        let re = Regex::new(r"-\s*Vaip nr\.\s*(\d+)\s*—\s*([^\n]+)").unwrap();
        let md = "- Vaip nr. 1 — esimene\n- Vaip nr. 2 — teine\n- Vaip nr. 1 — uuem\n";
        let items = Extractor::new(md).extract_many(&re);
        assert_eq!(items.len(), 2);
        assert_eq!(items["1"].as_str(), "uuem");
        assert_eq!(items["2"].as_str(), "teine");
    }

    #[test]
    fn section_stops_at_next_marker() {
        let md = "7.1) 1. Puuvill\nTekst 1: a\n\n7.2) 2. Kalts\nTekst 2: b\n";
        let section = Extractor::new(md).section("7.1").unwrap();
        assert!(section.source().contains("Tekst 1: a"));
        assert!(!section.source().contains("Tekst 2"));
    }

    #[test]
    fn section_runs_to_end_when_last() {
        let md = "7.2) 2. Kalts\n7.3) 3. Vill\nTekst 2: c";
        let section = Extractor::new(md).section("7.3").unwrap();
        assert!(section.source().ends_with("Tekst 2: c"));
    }

    #[test]
    fn missing_section() {
        assert!(Extractor::new("7.1) 1. Puuvill").section("7.4").is_none());
    }

    #[test]
    fn section_marker_needs_line_start() {
        let md = "vaata punkti 7.1) allpool\n";
        assert!(Extractor::new(md).section("7.1").is_none());
    }
}
