//! Closed identifier sets for curriculum sections, tests and pages.
//!
//! Markup and URLs hand us raw strings; these enums are the only place those
//! strings are turned into something the rest of the crate trusts.

use serde::{Deserialize, Serialize};

/// Returned when a raw identifier does not name a known item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} identifier: {value}")]
pub struct UnknownId {
    /// Which identifier family was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownId {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A topical unit of the curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Rules of the game
    Basics,
    /// The tile set
    Tiles,
    /// Winning hands
    Yaku,
    /// Point counting
    Scoring,
    /// Terminology
    Glossary,
}

impl Section {
    /// All sections, in the order the curriculum should be studied.
    pub const ALL: [Section; 5] = [
        Section::Basics,
        Section::Tiles,
        Section::Yaku,
        Section::Scoring,
        Section::Glossary,
    ];

    /// Identifier as used in markup and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Basics => "basics",
            Section::Tiles => "tiles",
            Section::Yaku => "yaku",
            Section::Scoring => "scoring",
            Section::Glossary => "glossary",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Section::Basics => "Game basics",
            Section::Tiles => "Mahjong tiles",
            Section::Yaku => "Winning hands (Yaku)",
            Section::Scoring => "Scoring system",
            Section::Glossary => "Glossary of terms",
        }
    }

    /// The page that hosts this section.
    pub fn page(self) -> Page {
        match self {
            Section::Basics => Page::Basics,
            Section::Tiles => Page::Tiles,
            Section::Yaku => Page::Yaku,
            Section::Scoring => Page::Scoring,
            Section::Glossary => Page::Glossary,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = UnknownId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basics" => Ok(Section::Basics),
            "tiles" => Ok(Section::Tiles),
            "yaku" => Ok(Section::Yaku),
            "scoring" => Ok(Section::Scoring),
            "glossary" => Ok(Section::Glossary),
            _ => Err(UnknownId::new("section", s)),
        }
    }
}

/// One of the five practice tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TestId {
    /// First test
    #[serde(rename = "test1")]
    Test1,
    /// Second test
    #[serde(rename = "test2")]
    Test2,
    /// Third test
    #[serde(rename = "test3")]
    Test3,
    /// Fourth test
    #[serde(rename = "test4")]
    Test4,
    /// Fifth test
    #[serde(rename = "test5")]
    Test5,
}

impl TestId {
    /// All tests in ordinal order.
    pub const ALL: [TestId; 5] = [
        TestId::Test1,
        TestId::Test2,
        TestId::Test3,
        TestId::Test4,
        TestId::Test5,
    ];

    /// Map a 1-based test number to its identifier.
    pub fn from_ordinal(n: u32) -> Option<Self> {
        match n {
            1 => Some(TestId::Test1),
            2 => Some(TestId::Test2),
            3 => Some(TestId::Test3),
            4 => Some(TestId::Test4),
            5 => Some(TestId::Test5),
            _ => None,
        }
    }

    /// 1-based test number.
    pub fn ordinal(self) -> u32 {
        match self {
            TestId::Test1 => 1,
            TestId::Test2 => 2,
            TestId::Test3 => 3,
            TestId::Test4 => 4,
            TestId::Test5 => 5,
        }
    }

    /// Storage key, e.g. `test3`.
    pub fn as_str(self) -> &'static str {
        match self {
            TestId::Test1 => "test1",
            TestId::Test2 => "test2",
            TestId::Test3 => "test3",
            TestId::Test4 => "test4",
            TestId::Test5 => "test5",
        }
    }
}

impl std::fmt::Display for TestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TestId {
    type Err = UnknownId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("test")
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(TestId::from_ordinal)
            .filter(|t| t.as_str() == s)
            .ok_or_else(|| UnknownId::new("test", s))
    }
}

/// A page whose visits are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Rules of the game
    Basics,
    /// The tile set
    Tiles,
    /// Winning hands
    Yaku,
    /// Point counting
    Scoring,
    /// Practice quizzes
    Practice,
    /// Terminology
    Glossary,
}

impl Page {
    /// All tracked pages.
    pub const ALL: [Page; 6] = [
        Page::Basics,
        Page::Tiles,
        Page::Yaku,
        Page::Scoring,
        Page::Practice,
        Page::Glossary,
    ];

    /// Identifier of the landing page, which is never counted.
    pub const HOME: &'static str = "index";

    /// Identifier as used in URLs and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Basics => "basics",
            Page::Tiles => "tiles",
            Page::Yaku => "yaku",
            Page::Scoring => "scoring",
            Page::Practice => "practice",
            Page::Glossary => "glossary",
        }
    }

    /// The curriculum section this page hosts, if any.
    pub fn section(self) -> Option<Section> {
        match self {
            Page::Basics => Some(Section::Basics),
            Page::Tiles => Some(Section::Tiles),
            Page::Yaku => Some(Section::Yaku),
            Page::Scoring => Some(Section::Scoring),
            Page::Glossary => Some(Section::Glossary),
            Page::Practice => None,
        }
    }

    /// Navigation target for this page.
    pub fn url(self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = UnknownId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basics" => Ok(Page::Basics),
            "tiles" => Ok(Page::Tiles),
            "yaku" => Ok(Page::Yaku),
            "scoring" => Ok(Page::Scoring),
            "practice" => Ok(Page::Practice),
            "glossary" => Ok(Page::Glossary),
            _ => Err(UnknownId::new("page", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_round_trips_through_str() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>(), Ok(section));
        }
        assert!("index".parse::<Section>().is_err());
        assert!("Basics".parse::<Section>().is_err());
    }

    #[test]
    fn test_test_id_from_ordinal() {
        assert_eq!(TestId::from_ordinal(1), Some(TestId::Test1));
        assert_eq!(TestId::from_ordinal(5), Some(TestId::Test5));
        assert_eq!(TestId::from_ordinal(0), None);
        assert_eq!(TestId::from_ordinal(6), None);
        assert_eq!(TestId::Test4.ordinal(), 4);
    }

    #[test]
    fn test_test_id_parse_rejects_padding() {
        assert_eq!("test2".parse::<TestId>(), Ok(TestId::Test2));
        assert!("test02".parse::<TestId>().is_err());
        assert!("test".parse::<TestId>().is_err());
        assert!("test6".parse::<TestId>().is_err());
    }

    #[test]
    fn test_practice_page_has_no_section() {
        assert_eq!(Page::Practice.section(), None);
        assert_eq!(Page::Yaku.section(), Some(Section::Yaku));
        assert_eq!(Section::Scoring.page(), Page::Scoring);
        assert!(Page::HOME.parse::<Page>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Section::Glossary).unwrap();
        assert_eq!(json, "\"glossary\"");
        let json = serde_json::to_string(&TestId::Test3).unwrap();
        assert_eq!(json, "\"test3\"");
    }
}
