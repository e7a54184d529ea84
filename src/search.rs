//! Registry search client
//!
//! Issues one query against pkg.go.dev and turns the HTML result page into a
//! [`ResultSet`]. The page structure is only known to this module; everything
//! else sees candidates or a [`GkitError`].

use crate::error::{GkitError, Result};
use crate::types::{Candidate, ResultSet};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

/// Default registry endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://pkg.go.dev/";

const SUB_MEMBER_PREFIX: &str = "Other packages in module ";

/// Anything that can turn a keyword into candidates.
///
/// The driver runs implementations on a background thread, so a call may
/// block for as long as it needs.
pub trait SearchClient: Send + Sync {
    fn search(&self, keyword: &str) -> Result<ResultSet>;
}

/// Blocking HTTP client for the pkg.go.dev search page
pub struct RegistryClient {
    base: Url,
    http: reqwest::blocking::Client,
}

impl RegistryClient {
    /// `base` is treated as a directory: `http://host/mirror` searches
    /// `http://host/mirror/search`.
    pub fn new(mut base: Url, user_agent: &str) -> Result<Self> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        // No deadline: a stalled registry keeps the spinner up until the user quits.
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { base, http })
    }

    /// `{base}/search?q=<keyword>&m=package`
    pub fn search_url(&self, keyword: &str) -> Result<Url> {
        let mut url = self
            .base
            .join("search")
            .map_err(|e| GkitError::config(format!("invalid registry URL {}: {}", self.base, e)))?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("m", "package");
        Ok(url)
    }
}

impl SearchClient for RegistryClient {
    fn search(&self, keyword: &str) -> Result<ResultSet> {
        let url = self.search_url(keyword)?;
        info!("Searching registry: {}", url);

        let response = self.http.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GkitError::SearchStatus {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|e| GkitError::search_parse(format!("reading response body: {}", e)))?;
        let results = parse_search_page(&body, keyword)?;
        info!("Search for {:?} returned {} candidate(s)", keyword, results.len());
        Ok(results)
    }
}

struct PageSelectors {
    results: Selector,
    snippet: Selector,
    path: Selector,
    imported_by: Selector,
    sub_members: Selector,
}

impl PageSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            results: selector(".go-Content.SearchResults")?,
            snippet: selector(".go-Content.SearchResults .SearchSnippet")?,
            path: selector(".SearchSnippet-header-path")?,
            imported_by: selector("a[aria-label='Go to Imported By'] strong")?,
            sub_members: selector(".SearchSnippet-sub.go-textSubtle strong")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GkitError::search_parse(format!("selector {}: {}", css, e)))
}

/// Concatenated text of every element under `root` matching `sel`.
fn select_text(root: ElementRef<'_>, sel: &Selector) -> String {
    root.select(sel).flat_map(|el| el.text()).collect()
}

/// Parse a search result page into candidates.
///
/// A page with no result container, or a container with no snippets, yields
/// a single candidate named after `keyword` so the list is never empty.
pub fn parse_search_page(html: &str, keyword: &str) -> Result<ResultSet> {
    let selectors = PageSelectors::new()?;
    let document = Html::parse_document(html);

    if document.select(&selectors.results).next().is_none() {
        debug!("No result container on page, falling back to keyword");
        return Ok(vec![Candidate::bare(keyword)]);
    }

    let mut results = ResultSet::new();
    for (index, snippet) in document.select(&selectors.snippet).enumerate() {
        let raw_path = select_text(snippet, &selectors.path);
        let identifier = raw_path
            .trim()
            .trim_matches('(')
            .trim_matches(')')
            .trim()
            .to_string();
        if identifier.is_empty() {
            return Err(GkitError::search_parse(format!(
                "result {} has no import path",
                index + 1
            )));
        }

        let popularity = select_text(snippet, &selectors.imported_by).trim().to_string();
        let parent = Candidate::with_popularity(identifier, popularity);

        let children: Vec<Candidate> = snippet
            .select(&selectors.sub_members)
            .map(|strong| strong.text().collect::<String>())
            .filter_map(|text| {
                let member = text
                    .replacen(SUB_MEMBER_PREFIX, "", 1)
                    .trim()
                    .trim_matches(':')
                    .trim()
                    .to_string();
                (!member.is_empty()).then(|| Candidate::child_of(&parent, member))
            })
            .collect();

        results.push(parent);
        results.extend(children);
    }

    if results.is_empty() {
        debug!("Result container has no snippets, falling back to keyword");
        results.push(Candidate::bare(keyword));
    }
    Ok(results)
}
