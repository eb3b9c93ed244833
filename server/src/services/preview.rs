//! Inline previews for the browser: PNG bytes as `data:` URLs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_has_png_prefix() {
        assert_eq!(png_data_url(b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn empty_payload_still_valid() {
        assert_eq!(png_data_url(&[]), "data:image/png;base64,");
    }
}
