//! Byte-to-text strategies for downloaded resources.

use encoding_rs::Encoding;

/// Turns downloaded bytes into text before tabular parsing.
///
/// A decoder never fails: a wrong codepage produces wrong characters, not
/// an error. Implement this to plug in detection or a different codepage
/// via [`crate::AlClientBuilder::text_decoding`].
pub trait TextDecoding: Send + Sync + std::fmt::Debug {
    fn decode(&self, bytes: &[u8]) -> String;

    /// Name of the encoding, for diagnostics.
    fn label(&self) -> &str;
}

/// A fixed single-byte legacy codepage. Default: ISO-8859-2.
#[derive(Debug, Clone, Copy)]
pub struct LegacyCodepage {
    encoding: &'static Encoding,
}

impl LegacyCodepage {
    pub const fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Look up a codepage by its WHATWG label (`"iso-8859-2"`, `"windows-1252"`, ...).
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(Self::new)
    }
}

impl Default for LegacyCodepage {
    fn default() -> Self {
        Self::new(encoding_rs::ISO_8859_2)
    }
}

impl TextDecoding for LegacyCodepage {
    fn decode(&self, bytes: &[u8]) -> String {
        self.encoding.decode_without_bom_handling(bytes).0.into_owned()
    }

    fn label(&self) -> &str {
        self.encoding.name()
    }
}
