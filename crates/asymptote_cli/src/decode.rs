use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown encoding label {0:?}")]
    UnknownLabel(String),
    #[error("failed to decode bytes with {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode page bytes into UTF-8 using: BOM -> declared label -> chardetng guess.
///
/// A byte order mark always wins over the declared label; the mark itself is
/// stripped from the text.
pub fn decode_page(bytes: &[u8], declared: Option<&str>) -> Result<DecodedText, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = declared {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| DecodeError::UnknownLabel(label.to_string()))?;
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedText, DecodeError> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: used.name().to_string(),
        });
    }
    Ok(DecodedText {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_beats_declared_label() {
        let bytes = b"\xEF\xBB\xBFCaf\xC3\xA9";
        let decoded = decode_page(bytes, Some("windows-1252")).unwrap();
        assert_eq!(decoded.text, "Café");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn declared_label_is_used_without_bom() {
        let decoded = decode_page(b"Caf\xE9", Some("latin1")).unwrap();
        assert_eq!(decoded.text, "Café");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = decode_page(b"x", Some("no-such-charset")).unwrap_err();
        assert_eq!(err, DecodeError::UnknownLabel("no-such-charset".into()));
    }

    #[test]
    fn invalid_bytes_for_declared_label_fail() {
        let err = decode_page(b"ok \xC3", Some("utf-8")).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailure { .. }));
    }
}
