//! Display decoding for provider text.

use tracing::warn;

// Wide enough that prompts never get wrapped by the converter.
const DECODE_WIDTH: usize = 10_000;

/// Decodes the HTML entities the provider embeds in prompts and answers.
///
/// Falls back to the raw text if the converter rejects the input.
pub fn decode_html(raw: &str) -> String {
    if !raw.contains('&') && !raw.contains('<') {
        return raw.to_string();
    }

    match html2text::from_read(raw.as_bytes(), DECODE_WIDTH) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "could not decode provider text");
            raw.to_string()
        }
    }
}
