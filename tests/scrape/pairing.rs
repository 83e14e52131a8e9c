use aletheia_rs::AlError;
use aletheia_rs::scrape::extract_resources;
use url::Url;

const MARKER: &str = "resource-url-analytics";

fn base() -> Url {
    Url::parse("https://datos.gob.do/dataset/recaudaciones").unwrap()
}

#[test]
fn keeps_only_wanted_format_with_original_positions() {
    let html = crate::common::fixture("listing_mixed.html");

    let found = extract_resources(&html, &base(), MARKER, "csv").unwrap();

    let positions: Vec<usize> = found.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![0, 2]);
    assert_eq!(found[0].url, "https://datos.gob.do/download/r1.csv");
    assert_eq!(found[1].url, "https://datos.gob.do/download/r3.csv");
    assert!(found.iter().all(|r| r.format_label == "csv"));

    let pdf = extract_resources(&html, &base(), MARKER, "pdf").unwrap();
    assert_eq!(pdf.len(), 1);
    assert_eq!(pdf[0].position, 1);
}

#[test]
fn format_match_is_exact() {
    let html = crate::common::fixture("listing_mixed.html");
    assert!(extract_resources(&html, &base(), MARKER, "CSV").unwrap().is_empty());
}

#[test]
fn no_matching_resource_is_an_empty_list() {
    let html = crate::common::fixture("listing_no_csv.html");
    assert!(extract_resources(&html, &base(), MARKER, "csv").unwrap().is_empty());
}

#[test]
fn absolute_hrefs_are_kept() {
    let html = r#"
        <div class="heading"><span class="format-label" data-format="csv">CSV</span></div>
        <a class="resource-url-analytics" href="https://cdn.example.org/files/a.csv">Descargar</a>
    "#;

    let found = extract_resources(html, &base(), MARKER, "csv").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, "https://cdn.example.org/files/a.csv");
}

#[test]
fn label_text_is_used_without_data_format() {
    let html = r#"
        <div class="heading"><span class="format-label"> csv </span></div>
        <a class="resource-url-analytics" href="a.csv">Descargar</a>
    "#;

    let found = extract_resources(html, &base(), MARKER, "csv").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, "https://datos.gob.do/dataset/a.csv");
}

#[test]
fn extra_anchors_without_labels_are_not_paired() {
    let html = r#"
        <div class="heading"><span class="format-label" data-format="csv">CSV</span></div>
        <a class="resource-url-analytics" href="/one.csv">1</a>
        <a class="resource-url-analytics" href="/two.csv">2</a>
    "#;

    let found = extract_resources(html, &base(), MARKER, "csv").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, "https://datos.gob.do/one.csv");
}

#[test]
fn anchor_without_href_keeps_its_slot() {
    let html = r#"
        <div class="heading"><span class="format-label" data-format="csv">CSV</span></div>
        <div class="heading"><span class="format-label" data-format="csv">CSV</span></div>
        <a class="resource-url-analytics">broken</a>
        <a class="resource-url-analytics" href="/two.csv">2</a>
    "#;

    let found = extract_resources(html, &base(), MARKER, "csv").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].position, 1);
}

#[test]
fn marker_must_be_a_class_name() {
    let html = crate::common::fixture("listing_mixed.html");
    for bad in ["", "a b", "x]", "9lives"] {
        let err = extract_resources(&html, &base(), bad, "csv").unwrap_err();
        assert!(matches!(err, AlError::InvalidParams(_)), "{bad:?} gave {err:?}");
    }
}
