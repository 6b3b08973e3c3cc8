use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// How far into the page a `<meta charset>` declaration is looked for.
const META_SNIFF_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode a page read from disk into UTF-8 using: BOM -> meta charset -> UTF-8 -> chardetng fallback.
pub fn decode_html(bytes: &[u8]) -> Result<DecodedHtml, DecodeError> {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    // 2) <meta charset=...> near the top of the document
    if let Some(enc) = sniff_meta_charset(bytes).and_then(|l| Encoding::for_label(l.as_bytes())) {
        return decode_with(bytes, enc);
    }

    // 3) Generated sites are almost always UTF-8
    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }

    // 4) chardetng detection
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, had_errors) = enc.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_utf8_passes_through() {
        let decoded = decode_html("<p>中文</p>".as_bytes()).unwrap();
        assert_eq!(decoded.html, "<p>中文</p>");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn decode_handles_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFhello";
        let decoded = decode_html(bytes).unwrap();
        assert_eq!(decoded.html, "hello");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn decode_respects_meta_charset() {
        let mut bytes = b"<html><head><meta charset=\"gbk\"></head><body><p>".to_vec();
        bytes.extend_from_slice(b"\xD6\xD0");
        bytes.extend_from_slice(b"</p></body></html>");
        let decoded = decode_html(&bytes).unwrap();
        assert!(decoded.html.contains("<p>中</p>"));
        assert_eq!(decoded.encoding_label, "GBK");
    }

    #[test]
    fn invalid_utf8_under_declared_utf8_is_an_error() {
        let bytes = b"<meta charset=utf-8><p>\xFF\xFE\xFD</p>";
        assert!(decode_html(bytes).is_err());
    }
}
