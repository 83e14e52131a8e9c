//! Scrape a dataset listing page for downloadable resources.
//!
//! CKAN listing pages render each resource as a download anchor plus,
//! elsewhere in the markup, a format badge. Nothing in the markup ties a
//! badge to its anchor. The i-th anchor is paired with the i-th badge by
//! position, so a template that drops or reorders badges silently pairs
//! the wrong formats. Mismatched counts are reported, and pairing stops at
//! the shorter list.

use crate::core::{AlClient, AlError, net};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

/// Format badges, in document order.
const LABEL_SELECTOR: &str = ".heading span.format-label";

/// One downloadable artifact advertised on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetResource {
    /// Absolute download URL (relative hrefs are resolved against the page).
    pub url: String,
    /// The paired format badge, e.g. `csv`.
    pub format_label: String,
    /// Index of the anchor among all marked anchors on the page.
    pub position: usize,
}

/// Fetch `listing_url` and return the resources whose paired format label
/// equals `wanted_format`, in document order. An empty result is not an error.
///
/// # Errors
///
/// Transport errors for the page fetch; `AlError::InvalidParams` if
/// `anchor_marker` is not a CSS class name.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn discover_resources(
    client: &AlClient,
    listing_url: &str,
    anchor_marker: &str,
    wanted_format: &str,
) -> Result<Vec<DatasetResource>, AlError> {
    let url = Url::parse(listing_url)?;

    let resp = client.http().get(url.clone()).send().await?;
    let resp = net::ensure_success(resp, listing_url)?;
    let body = net::get_text(resp, "listing", listing_url, "html").await?;

    extract_resources(&body, &url, anchor_marker, wanted_format)
}

/// Pairing step of [`discover_resources`] over an already fetched page.
///
/// Anchors are `a.{anchor_marker}`; labels are `.heading span.format-label`,
/// valued by their `data-format` attribute (or their text when the
/// attribute is missing). An anchor without `href` keeps its position but
/// yields nothing.
///
/// # Errors
///
/// `AlError::InvalidParams` if `anchor_marker` is not a CSS class name.
pub fn extract_resources(
    html: &str,
    base: &Url,
    anchor_marker: &str,
    wanted_format: &str,
) -> Result<Vec<DatasetResource>, AlError> {
    let anchor_sel = anchor_selector(anchor_marker)?;
    let label_sel = Selector::parse(LABEL_SELECTOR)
        .map_err(|e| AlError::InvalidParams(format!("label selector: {e:?}")))?;

    let doc = Html::parse_document(html);
    let hrefs: Vec<Option<&str>> = doc
        .select(&anchor_sel)
        .map(|a| a.value().attr("href"))
        .collect();
    let labels: Vec<String> = doc.select(&label_sel).map(format_label).collect();

    #[cfg(feature = "tracing")]
    if hrefs.len() != labels.len() {
        tracing::warn!(
            anchors = hrefs.len(),
            labels = labels.len(),
            "anchor/label count mismatch; pairing by position up to the shorter list"
        );
    }

    let mut out = Vec::new();
    for (position, (href, label)) in hrefs.into_iter().zip(labels).enumerate() {
        if label != wanted_format {
            continue;
        }
        let Some(href) = href else { continue };
        match base.join(href.trim()) {
            Ok(url) => out.push(DatasetResource {
                url: url.to_string(),
                format_label: label,
                position,
            }),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(href, error = %_e, "skipping unresolvable resource href");
            }
        }
    }
    Ok(out)
}

fn anchor_selector(marker: &str) -> Result<Selector, AlError> {
    let valid = marker
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
        && marker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(AlError::InvalidParams(format!(
            "anchor marker `{marker}` is not a CSS class name"
        )));
    }
    Selector::parse(&format!("a.{marker}"))
        .map_err(|e| AlError::InvalidParams(format!("anchor selector: {e:?}")))
}

fn format_label(el: ElementRef<'_>) -> String {
    match el.value().attr("data-format") {
        Some(f) => f.to_string(),
        None => el.text().collect::<String>().trim().to_string(),
    }
}
