//! Download a delimited-text resource and decode it into records.
//!
//! The bytes go through a fixed legacy codepage ([`LegacyCodepage`],
//! ISO-8859-2 unless the client was built with another [`TextDecoding`]).
//! A wrong codepage cannot be detected here; it yields wrong characters.

mod decoding;
mod model;

pub use decoding::{LegacyCodepage, TextDecoding};
pub use model::{ParsedTable, Record};

use crate::core::{AlClient, AlError, net};

/// Field separators tried on the header line, in tie-break order.
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Parse delimited text whose first row is the header.
///
/// The delimiter is whichever of `,` `;` tab `|` splits the header line
/// into the most fields (comma when none occurs). Blank lines are skipped.
/// Short rows yield records without the missing columns; cells past the
/// last header are dropped.
///
/// # Errors
///
/// Returns `AlError::Decode` when there is no header row or a row cannot be read.
pub fn parse_table(text: &str) -> Result<ParsedTable, AlError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(text))
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AlError::Decode(format!("header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(AlError::Decode("resource has no header row".into()));
    }

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| AlError::Decode(format!("row {}: {e}", idx + 1)))?;
        let mut record = Record::default();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header, cell.to_string());
        }
        records.push(record);
    }

    Ok(ParsedTable { headers, records })
}

fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut best = (DELIMITERS[0], 0);
    for delim in DELIMITERS {
        let n = count_unquoted(header, delim);
        if n > best.1 {
            best = (delim, n);
        }
    }
    best.0
}

fn count_unquoted(line: &str, delim: u8) -> usize {
    let mut quoted = false;
    line.bytes()
        .filter(|&b| {
            if b == b'"' {
                quoted = !quoted;
            }
            !quoted && b == delim
        })
        .count()
}

/// Decode raw bytes with `decoding`, then [`parse_table`].
///
/// # Errors
///
/// See [`parse_table`].
pub fn decode_table(bytes: &[u8], decoding: &dyn TextDecoding) -> Result<ParsedTable, AlError> {
    parse_table(&decoding.decode(bytes))
}

/// Download `resource_url` and decode it with the client's text decoding.
///
/// # Errors
///
/// Transport errors for the download, `AlError::Decode` for the parse.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn fetch_table(client: &AlClient, resource_url: &str) -> Result<ParsedTable, AlError> {
    let resp = client.http().get(resource_url).send().await?;
    let resp = net::ensure_success(resp, resource_url)?;
    let bytes = net::get_bytes(resp, "resource", resource_url, "csv").await?;

    let decoding = client.text_decoding();
    #[cfg(feature = "tracing")]
    tracing::debug!(bytes = bytes.len(), encoding = decoding.label(), "decoding resource");

    decode_table(&bytes, decoding)
}
