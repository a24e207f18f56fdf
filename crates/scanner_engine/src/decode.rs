use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: &'static str,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw page bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
///
/// Never fails; undecodable input is replaced rather than rejected so a scan can
/// still find links in a partly broken page.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        })
        .next()
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedPage {
    let (text, _, had_errors) = enc.decode(bytes);
    DecodedPage {
        html: text.into_owned(),
        encoding_label: enc.name(),
        had_errors,
    }
}
