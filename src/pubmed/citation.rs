//! Citation strings for a [`Publication`]

use std::fmt;

use crate::pubmed::publication::Publication;

/// Authors listed in full by [`Publication::cite`] before truncating
pub const DEFAULT_MAX_AUTHORS: usize = 5;

const AUTHOR_SEPARATOR: &str = ", ";
const MINI_SEPARATOR: &str = " - ";

impl Publication {
    /// All authors joined by `", "`
    pub fn authors(&self) -> String {
        self.author_list.join(AUTHOR_SEPARATOR)
    }

    /// The first `max_authors` authors, followed by `", et al."` when any were dropped
    pub fn authors_et_al(&self, max_authors: usize) -> String {
        if self.author_list.len() <= max_authors {
            return self.authors();
        }

        format!(
            "{}, et al.",
            self.author_list[..max_authors].join(AUTHOR_SEPARATOR)
        )
    }

    /// Full citation with up to [`DEFAULT_MAX_AUTHORS`] authors
    ///
    /// `"<authors> (<year>). <title> <journal> <volume>(<issue>): <pages>."`,
    /// with the volume/issue/pages tail shortened to whatever is present.
    pub fn cite(&self) -> String {
        self.cite_with_max_authors(DEFAULT_MAX_AUTHORS)
    }

    pub fn cite_with_max_authors(&self, max_authors: usize) -> String {
        let base = format!(
            "{} ({}). {} {}",
            self.authors_et_al(max_authors),
            self.year,
            self.title,
            self.journal
        );

        format!("{}{}", base, self.citation_tail())
    }

    fn citation_tail(&self) -> String {
        let (volume, issue, pages) = (&self.volume, &self.issue, &self.pages);

        match (!volume.is_empty(), !issue.is_empty(), !pages.is_empty()) {
            (true, true, true) => format!(" {}({}): {}.", volume, issue, pages),
            (true, true, false) => format!(" {}({}).", volume, issue),
            (true, false, true) => format!(" {}: {}.", volume, pages),
            (true, false, false) => format!(" {}.", volume),
            (false, _, true) => format!(" {}.", pages),
            (false, _, false) => ".".to_string(),
        }
    }

    /// Short citation: `"<first author> - <last author> - <year> - <journal>"`
    ///
    /// The last author is left out for single-author publications.
    pub fn cite_mini(&self) -> String {
        let mut parts = vec![self.first_author.as_str()];
        if self.author_list.len() > 1 {
            parts.push(self.last_author.as_str());
        }
        parts.push(self.year.as_str());
        parts.push(self.journal.as_str());

        parts.join(MINI_SEPARATOR)
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cite())
    }
}
