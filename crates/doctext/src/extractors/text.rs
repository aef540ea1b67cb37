//! Plain text strategy.

use crate::text::decode_lossy_trimmed;

/// Decode a plain text buffer.
///
/// Invalid UTF-8 is replaced rather than rejected, so this never fails.
pub fn extract_txt(content: &[u8]) -> String {
    let text = decode_lossy_trimmed(content);
    tracing::debug!(bytes = content.len(), chars = text.len(), "Decoded plain text");
    text
}
