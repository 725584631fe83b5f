use crate::error::ScrapeError;
use crate::records::{CableRecord, NOT_GIVEN};
use scraper::{ElementRef, Html, Selector};

/// Selector for the field items on a detail page
const FIELD_ITEM_SELECTOR: &str = "li.mb-2";

/// Detail page layout, classified by how many field items are present.
///
/// The directory renders between three and five items depending on which
/// fields are known for a cable; anything else means the page layout has
/// changed underneath us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    /// RFS, length and owners only
    ThreeField,
    /// RFS, length, owners and suppliers
    FourField,
    /// All five fields, including the networks link
    FiveField,
    /// Any other item count
    Unrecognized(usize),
}

impl PageShape {
    /// Classify a detail page by its field item count
    pub fn classify(count: usize) -> Self {
        match count {
            3 => PageShape::ThreeField,
            4 => PageShape::FourField,
            5 => PageShape::FiveField,
            other => PageShape::Unrecognized(other),
        }
    }
}

/// Extracts one record from a loaded detail page.
///
/// Dispatches once on the page shape: recognized layouts fill absent
/// fields with the sentinel, an unrecognized layout is a structural
/// failure that aborts the run.
pub fn extract_record(html: &str, url: &str) -> Result<CableRecord, ScrapeError> {
    let doc = Html::parse_document(html);
    let item_selector = Selector::parse(FIELD_ITEM_SELECTOR).unwrap();
    let items: Vec<ElementRef> = doc.select(&item_selector).collect();

    let (suppliers, submarine_networks_url) = match PageShape::classify(items.len()) {
        PageShape::FiveField => {
            let href = anchor_href(&items[4]).ok_or_else(|| {
                ScrapeError::MissingElement(format!("no anchor in networks item on {}", url))
            })?;
            (flattened_value(&items[3]), href)
        }
        PageShape::FourField => (flattened_value(&items[3]), NOT_GIVEN.to_string()),
        PageShape::ThreeField => (NOT_GIVEN.to_string(), NOT_GIVEN.to_string()),
        PageShape::Unrecognized(count) => {
            return Err(ScrapeError::UnrecognizedLayout {
                url: url.to_string(),
                count,
            });
        }
    };

    Ok(CableRecord {
        cable_name: cable_name_from_url(url),
        rfs: last_line_value(&items[0]),
        cable_length: strip_quotes(&last_line_value(&items[1])),
        owners: flattened_value(&items[2]),
        suppliers,
        submarine_networks_url,
        submarine_cable_map_url: url.to_string(),
    })
}

/// Cable name: the final path segment of the detail URL
fn cable_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .to_string()
}

/// Item text as trimmed non-empty lines, one per text node
fn item_lines(item: &ElementRef) -> Vec<String> {
    item.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Value for single-line fields: the content after the label line
fn last_line_value(item: &ElementRef) -> String {
    item_lines(item).last().cloned().unwrap_or_default()
}

/// Value for list fields: everything after the label line, with the
/// comma-separated names rejoined by ` - `
fn flattened_value(item: &ElementRef) -> String {
    let lines = item_lines(item);
    let value = match lines.len() {
        0 => String::new(),
        1 => lines[0].clone(),
        _ => lines[1..].join("\n"),
    };
    value
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Strip surrounding quote characters from a length value
fn strip_quotes(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Href of the first anchor nested in an item, if any
fn anchor_href(item: &ElementRef) -> Option<String> {
    let anchor_selector = Selector::parse("a").unwrap();
    item.select(&anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
