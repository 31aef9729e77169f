//! PubMed lookups: summary records, metadata documents and citations
//!
//! The flow is one-directional: a [`PubMedLookup`] resolves a query and holds
//! its ESummary record, and [`Publication::new`] adds the EFetch document and
//! DOI link before normalizing everything into a [`Publication`].

pub mod article_url;
pub mod citation;
pub mod client;
pub mod document;
pub mod lookup;
pub mod publication;
pub(crate) mod responses;
pub mod summary;

pub use article_url::{doi_url, resolve_article_url};
pub use citation::DEFAULT_MAX_AUTHORS;
pub use client::PubMedClient;
pub use document::{
    AbstractNode, AbstractSection, MetadataDocument, PubDate, parse_abstract, parse_month_abbreviation,
    parse_pub_date,
};
pub use lookup::PubMedLookup;
pub use publication::Publication;
pub use summary::SummaryRecord;
