//! EFetch metadata documents
//!
//! The EFetch XML for an article is decoded with quick-xml's serde support into
//! [`MetadataDocument`]. Only two regions are read from it:
//!
//! - `PubmedArticleSet > PubmedArticle > MedlineCitation > Article > Abstract > AbstractText`
//! - `PubmedArticleSet > PubmedArticle > MedlineCitation > Article > Journal > JournalIssue > PubDate`
//!
//! `AbstractText` comes in three shapes: a single bare element, a single element
//! carrying attributes (`Label`, `NlmCategory`), or several elements forming a
//! structured abstract. [`AbstractNode`] names those shapes explicitly.

use std::fmt;
use std::sync::OnceLock;

use quick_xml::de::from_str;
use regex::Regex;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

use crate::error::{PubMedError, Result};

/// Separator placed between abstract paragraphs
const PARAGRAPH_SEPARATOR: &str = "\n\n";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parsed EFetch XML document for one article
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "PubmedArticleSet")]
pub struct MetadataDocument {
    #[serde(rename = "PubmedArticle", default)]
    articles: Vec<PubmedArticleXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    medline_citation: Option<MedlineCitationXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct MedlineCitationXml {
    #[serde(rename = "Article")]
    article: Option<ArticleXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct ArticleXml {
    #[serde(rename = "Abstract")]
    abstract_region: Option<AbstractXml>,
    #[serde(rename = "Journal")]
    journal: Option<JournalXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct AbstractXml {
    #[serde(rename = "AbstractText", default)]
    texts: Vec<RawAbstractText>,
}

#[derive(Debug, Clone, Deserialize)]
struct JournalXml {
    #[serde(rename = "JournalIssue")]
    journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct JournalIssueXml {
    #[serde(rename = "PubDate")]
    pub_date: Option<PubDateXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct PubDateXml {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Month")]
    month: Option<String>,
    #[serde(rename = "Day")]
    day: Option<String>,
}

/// One `AbstractText` element as it appears on the wire
///
/// `structured` records whether the element carried any attribute; a bare
/// `<AbstractText>` is plain text, anything else is a structured node even
/// when it has no `Label`.
#[derive(Debug, Clone, PartialEq)]
struct RawAbstractText {
    label: Option<String>,
    text: String,
    structured: bool,
}

impl<'de> Deserialize<'de> for RawAbstractText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawAbstractTextVisitor;

        impl<'de> Visitor<'de> for RawAbstractTextVisitor {
            type Value = RawAbstractText;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("abstract text content")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<RawAbstractText, E>
            where
                E: de::Error,
            {
                Ok(RawAbstractText {
                    label: None,
                    text: value.trim().to_string(),
                    structured: false,
                })
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<RawAbstractText, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut text_parts = Vec::new();
                let mut label = None;
                let mut structured = false;

                while let Some(key) = map.next_key::<String>()? {
                    if key == "@Label" {
                        label = Some(map.next_value::<String>()?);
                        structured = true;
                    } else if key.starts_with('@') {
                        // NlmCategory and friends still make this a structured node
                        structured = true;
                        let _: IgnoredAny = map.next_value()?;
                    } else {
                        if !key.starts_with('$') {
                            debug!(element = %key, "Collecting text from nested abstract markup");
                        }
                        text_parts.push(map.next_value::<NestedText>()?.0);
                    }
                }

                Ok(RawAbstractText {
                    label,
                    text: join_text_runs(text_parts),
                    structured,
                })
            }
        }

        deserializer.deserialize_any(RawAbstractTextVisitor)
    }
}

/// Text content of an element nested inside `AbstractText`
///
/// Markup not removed by [`strip_inline_markup`] (`<sc>`, MathML, ...) arrives
/// as child elements; their text is collected recursively and attributes are
/// dropped.
struct NestedText(String);

impl<'de> Deserialize<'de> for NestedText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NestedTextVisitor;

        impl<'de> Visitor<'de> for NestedTextVisitor {
            type Value = NestedText;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("text or nested markup")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<NestedText, E>
            where
                E: de::Error,
            {
                Ok(NestedText(value.trim().to_string()))
            }

            fn visit_unit<E>(self) -> std::result::Result<NestedText, E>
            where
                E: de::Error,
            {
                Ok(NestedText(String::new()))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<NestedText, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut runs = Vec::new();
                while let Some(item) = seq.next_element::<NestedText>()? {
                    runs.push(item.0);
                }
                Ok(NestedText(join_text_runs(runs)))
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<NestedText, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut runs = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key.starts_with('@') {
                        let _: IgnoredAny = map.next_value()?;
                    } else {
                        runs.push(map.next_value::<NestedText>()?.0);
                    }
                }
                Ok(NestedText(join_text_runs(runs)))
            }
        }

        deserializer.deserialize_any(NestedTextVisitor)
    }
}

/// Join text runs split by child elements, one space between runs
///
/// The XML reader trims each run, so the separating space is restored here;
/// none is added before closing punctuation or after an opening bracket.
fn join_text_runs(runs: Vec<String>) -> String {
    let mut joined = String::new();

    for run in runs.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
        let glue = joined.is_empty()
            || joined.ends_with(['(', '['])
            || run.starts_with([',', '.', ';', ':', ')', ']', '!', '?']);
        if !glue {
            joined.push(' ');
        }
        joined.push_str(run);
    }

    joined
}

/// A labelled or unlabelled section of a structured abstract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractSection {
    pub label: Option<String>,
    pub text: String,
}

impl AbstractSection {
    /// Render as `"<label>: <text>"`, or just the text when unlabelled
    pub fn paragraph(&self) -> String {
        match &self.label {
            Some(label) => format!("{}: {}", label, self.text),
            None => self.text.clone(),
        }
    }
}

/// The shape of an abstract region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractNode {
    /// A bare text abstract
    Plain(String),
    /// A single element carrying attributes
    Structured(AbstractSection),
    /// A multi-section abstract; each item is `Plain` or `Structured`
    Sequence(Vec<AbstractNode>),
}

impl AbstractNode {
    fn from_raw(raw: RawAbstractText) -> Self {
        if raw.structured {
            AbstractNode::Structured(AbstractSection {
                label: raw.label,
                text: raw.text,
            })
        } else {
            AbstractNode::Plain(raw.text)
        }
    }

    fn from_raw_texts(mut texts: Vec<RawAbstractText>) -> Result<Self> {
        match texts.len() {
            0 => Err(PubMedError::AbstractParseError {
                message: "abstract region has no AbstractText element".to_string(),
            }),
            1 => Ok(Self::from_raw(texts.remove(0))),
            _ => Ok(AbstractNode::Sequence(
                texts.into_iter().map(Self::from_raw).collect(),
            )),
        }
    }

    /// One paragraph per node, in document order
    ///
    /// # Errors
    ///
    /// Returns `PubMedError::AbstractParseError` for an empty sequence or a
    /// sequence nested inside another sequence.
    pub fn paragraphs(&self) -> Result<Vec<String>> {
        match self {
            AbstractNode::Plain(text) => Ok(vec![text.clone()]),
            AbstractNode::Structured(section) => Ok(vec![section.paragraph()]),
            AbstractNode::Sequence(items) if items.is_empty() => {
                Err(PubMedError::AbstractParseError {
                    message: "abstract sequence is empty".to_string(),
                })
            }
            AbstractNode::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    AbstractNode::Plain(text) => Ok(text.clone()),
                    AbstractNode::Structured(section) => Ok(section.paragraph()),
                    AbstractNode::Sequence(_) => Err(PubMedError::AbstractParseError {
                        message: "nested abstract sequence".to_string(),
                    }),
                })
                .collect(),
        }
    }

    /// Paragraphs joined by a blank line
    pub fn to_text(&self) -> Result<String> {
        Ok(self.paragraphs()?.join(PARAGRAPH_SEPARATOR))
    }
}

/// Publication date split into its parts
///
/// Missing parts are empty strings; `month` is `None` unless the document
/// spells it as a three-letter abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubDate {
    pub year: String,
    pub month: Option<u32>,
    pub day: String,
}

impl MetadataDocument {
    /// Decode an EFetch XML body
    ///
    /// # Errors
    ///
    /// Returns `PubMedError::XmlError` if the XML is malformed or holds no
    /// `PubmedArticle`.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub fn from_xml(xml: &str) -> Result<Self> {
        let cleaned_xml = strip_inline_markup(xml);

        let document: MetadataDocument = from_str(&cleaned_xml)
            .map_err(|e| PubMedError::XmlError(format!("Failed to deserialize XML: {}", e)))?;

        if document.articles.is_empty() {
            return Err(PubMedError::XmlError(
                "EFetch document contains no PubmedArticle".to_string(),
            ));
        }

        Ok(document)
    }

    fn article(&self) -> Option<&ArticleXml> {
        self.articles
            .first()
            .and_then(|a| a.medline_citation.as_ref())
            .and_then(|m| m.article.as_ref())
    }

    /// The abstract region, decoded into its shape
    pub fn abstract_node(&self) -> Result<AbstractNode> {
        let texts = self
            .article()
            .and_then(|a| a.abstract_region.as_ref())
            .map(|a| a.texts.clone())
            .ok_or_else(|| PubMedError::AbstractParseError {
                message: "document has no abstract region".to_string(),
            })?;

        AbstractNode::from_raw_texts(texts)
    }

    fn pub_date_region(&self) -> Option<&PubDateXml> {
        self.article()
            .and_then(|a| a.journal.as_ref())
            .and_then(|j| j.journal_issue.as_ref())
            .and_then(|i| i.pub_date.as_ref())
    }
}

/// Extract the abstract as paragraphs separated by blank lines
///
/// # Errors
///
/// Returns `PubMedError::AbstractParseError` when the abstract region is
/// missing or has no recognisable shape.
pub fn parse_abstract(document: &MetadataDocument) -> Result<String> {
    let node = document.abstract_node()?;
    debug!(shape = ?shape_name(&node), "Decoded abstract region");
    node.to_text()
}

/// Extract year, month and day; each part falls back independently
pub fn parse_pub_date(document: &MetadataDocument) -> PubDate {
    let Some(region) = document.pub_date_region() else {
        return PubDate::default();
    };

    PubDate {
        year: region.year.clone().unwrap_or_default(),
        month: region.month.as_deref().and_then(parse_month_abbreviation),
        day: region.day.clone().unwrap_or_default(),
    }
}

/// Parse "Jan".."Dec" (any case) into 1..=12
pub fn parse_month_abbreviation(month: &str) -> Option<u32> {
    let lower = month.to_ascii_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == lower)
        .map(|index| index as u32 + 1)
}

fn shape_name(node: &AbstractNode) -> &'static str {
    match node {
        AbstractNode::Plain(_) => "plain",
        AbstractNode::Structured(_) => "structured",
        AbstractNode::Sequence(_) => "sequence",
    }
}

/// Strip inline formatting tags (`<i>`, `<sup>`, ...) so abstract text decodes as one string
fn strip_inline_markup(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold)>")
            .expect("Failed to compile inline tag regex")
    });

    let cleaned = re.replace_all(xml, "");
    if cleaned.len() != xml.len() {
        debug!(
            removed_bytes = xml.len() - cleaned.len(),
            "Stripped inline markup from EFetch XML"
        );
    }

    cleaned.into_owned()
}
