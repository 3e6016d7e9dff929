use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Windows-1252 maps the 0x80..=0x9F range to printable characters where
/// ISO-8859-1 has control codes. Unassigned slots fall through to the
/// corresponding C1 control, matching the WHATWG encoding tables.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Text encoding of the raw input file.
///
/// The source dataset ships as Latin-1, not UTF-8. Decoding happens exactly
/// once, at read time; whatever mojibake the source carries is passed through
/// untouched after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    #[serde(rename = "windows-1252", alias = "cp1252")]
    Windows1252,
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
}

impl TextEncoding {
    /// Decode raw file bytes into a `String`. Single-byte encodings are
    /// total functions over bytes; UTF-8 decodes lossily so a stray invalid
    /// sequence surfaces as U+FFFD rather than aborting the run.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            TextEncoding::Windows1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize],
                    _ => b as char,
                })
                .collect(),
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "windows-1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            other => Err(IngestError::Config(format!(
                "unsupported encoding '{other}' (expected latin-1, windows-1252 or utf-8)"
            ))),
        }
    }
}
