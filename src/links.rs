use crate::error::ScrapeError;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Filter deciding which listing-page anchors point at detail pages
#[derive(Debug)]
pub struct LinkFilter {
    /// Substring an href must contain to qualify
    link_marker: String,

    /// Substring marking a non-data link
    exclude_marker: String,

    /// Compiled extra exclusion patterns
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a filter from the marker substrings and optional regex excludes
    pub fn new(
        link_marker: &str,
        exclude_marker: &str,
        exclude_patterns: &[String],
    ) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            link_marker: link_marker.to_string(),
            exclude_marker: exclude_marker.to_string(),
            exclude_regexes,
        })
    }

    /// True when an href points at a detail page worth visiting
    pub fn accepts(&self, href: &str) -> bool {
        if !href.contains(&self.link_marker) {
            return false;
        }
        if href.contains(&self.exclude_marker) {
            return false;
        }
        for regex in &self.exclude_regexes {
            if regex.is_match(href) {
                return false;
            }
        }
        true
    }

    /// CSS selector matching qualifying anchors, for the listing-page wait
    pub fn wait_selector(&self) -> String {
        format!("a[href*='{}']", self.link_marker)
    }
}

/// Collects detail-page URLs from the listing page HTML.
///
/// Anchors are taken in document order, resolved against `base`, and
/// capped at `max_links`. Duplicates are kept as the page presents them.
/// Zero qualifying anchors is a structural failure for the run.
pub fn collect_links(
    html: &str,
    base: &Url,
    filter: &LinkFilter,
    max_links: usize,
) -> Result<Vec<String>, ScrapeError> {
    let doc = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in doc.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let resolved = match base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                ::log::debug!("Skipping unresolvable href {}: {}", href, e);
                continue;
            }
        };
        if !filter.accepts(&resolved) {
            continue;
        }
        links.push(resolved);
        if links.len() == max_links {
            ::log::debug!("Link cap of {} reached", max_links);
            break;
        }
    }

    if links.is_empty() {
        return Err(ScrapeError::NoLinks(base.to_string()));
    }

    ::log::info!("Found {} links.", links.len());
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_page(hrefs: &[&str]) -> String {
        let anchors = hrefs
            .iter()
            .map(|h| format!("<a href=\"{}\">cable</a>", h))
            .collect::<String>();
        format!("<html><body><nav>{}</nav></body></html>", anchors)
    }

    fn default_filter() -> LinkFilter {
        LinkFilter::new("/submarine-cable/", "trivia", &[]).unwrap()
    }

    #[test]
    fn test_collects_matching_anchors_in_document_order() {
        let html = listing_page(&[
            "/submarine-cable/alpha",
            "/about",
            "/submarine-cable/beta",
        ]);
        let base = Url::parse("https://www.submarinecablemap.com/").unwrap();
        let links = collect_links(&html, &base, &default_filter(), 645).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.submarinecablemap.com/submarine-cable/alpha",
                "https://www.submarinecablemap.com/submarine-cable/beta",
            ]
        );
    }

    #[test]
    fn test_excluded_marker_links_are_dropped() {
        let html = listing_page(&[
            "/submarine-cable/alpha",
            "/submarine-cable/trivia-quiz",
        ]);
        let base = Url::parse("https://www.submarinecablemap.com/").unwrap();
        let links = collect_links(&html, &base, &default_filter(), 645).unwrap();
        assert_eq!(
            links,
            vec!["https://www.submarinecablemap.com/submarine-cable/alpha"]
        );
    }

    #[test]
    fn test_cap_limits_qualifying_links() {
        let html = listing_page(&[
            "/submarine-cable/one",
            "/submarine-cable/two",
            "/submarine-cable/three",
        ]);
        let base = Url::parse("https://www.submarinecablemap.com/").unwrap();
        let links = collect_links(&html, &base, &default_filter(), 2).unwrap();
        assert_eq!(links.len(), 2);
        assert!(links[1].ends_with("/submarine-cable/two"));
    }

    #[test]
    fn test_no_matching_anchors_is_fatal() {
        let html = listing_page(&["/about", "/contact"]);
        let base = Url::parse("https://www.submarinecablemap.com/").unwrap();
        let result = collect_links(&html, &base, &default_filter(), 645);
        assert!(matches!(result, Err(ScrapeError::NoLinks(_))));
    }

    #[test]
    fn test_extra_exclude_patterns() {
        let filter = LinkFilter::new(
            "/submarine-cable/",
            "trivia",
            &[r"/draft-".to_string()],
        )
        .unwrap();
        assert!(filter.accepts("https://example.com/submarine-cable/alpha"));
        assert!(!filter.accepts("https://example.com/submarine-cable/draft-beta"));
    }

    #[test]
    fn test_absolute_hrefs_pass_through_resolution() {
        let html =
            listing_page(&["https://www.submarinecablemap.com/submarine-cable/gamma"]);
        let base = Url::parse("https://www.submarinecablemap.com/").unwrap();
        let links = collect_links(&html, &base, &default_filter(), 645).unwrap();
        assert_eq!(
            links,
            vec!["https://www.submarinecablemap.com/submarine-cable/gamma"]
        );
    }
}
