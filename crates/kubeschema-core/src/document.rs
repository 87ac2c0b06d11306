//! # Document Splitting
//!
//! Breaks a manifest stream into its YAML documents. Documents are
//! separated by a `---` line; the separator uses `\r\n` line endings only
//! when the stream itself contains `\r\n`, otherwise `\n`.
//!
//! Empty spans are kept. A trailing separator, or two adjacent ones, yield
//! empty documents that downstream reporting shows as empty slots rather
//! than dropping them. An empty stream yields exactly one empty document.

const LF_SEPARATOR: &[u8] = b"\n---\n";
const CRLF_SEPARATOR: &[u8] = b"\r\n---\r\n";

/// One YAML document of a manifest stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    /// Name of the file (or stdin label) the stream came from.
    pub file_name: &'a str,
    /// Zero-based position within the stream.
    pub index: usize,
    /// Raw document bytes, separator excluded.
    pub bytes: &'a [u8],
}

impl Document<'_> {
    /// True if the span holds no bytes at all.
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns the document separator matching the stream's line endings.
pub fn line_separator(input: &[u8]) -> &'static [u8] {
    if contains(input, b"\r\n") {
        CRLF_SEPARATOR
    } else {
        LF_SEPARATOR
    }
}

/// Splits `input` into documents, preserving empty spans.
pub fn split_documents<'a>(input: &'a [u8], file_name: &'a str) -> Vec<Document<'a>> {
    split_on(input, line_separator(input))
        .into_iter()
        .enumerate()
        .map(|(index, bytes)| Document {
            file_name,
            index,
            bytes,
        })
        .collect()
}

/// Splits on every non-overlapping occurrence of `sep`. Always returns at
/// least one span.
fn split_on<'a>(input: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos + sep.len() <= input.len() {
        if &input[pos..pos + sep.len()] == sep {
            spans.push(&input[start..pos]);
            pos += sep.len();
            start = pos;
        } else {
            pos += 1;
        }
    }
    spans.push(&input[start..]);
    spans
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
