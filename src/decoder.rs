//! Output decoding strategies for install command output
//!
//! `go` writes through the console code page on Windows (GBK on Chinese
//! locales), and UTF-8 everywhere else. The executor picks one decoder per
//! run and applies it to every line.

use crate::error::{GkitError, Result};
use encoding_rs::Encoding;

/// Turns one raw output line (terminator already removed) into text.
pub trait OutputDecoder: Send {
    fn decode(&self, bytes: &[u8]) -> String;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// UTF-8 passthrough; invalid sequences become U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDecoder;

impl OutputDecoder for IdentityDecoder {
    fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn name(&self) -> &'static str {
        "utf-8"
    }
}

/// Decoder for a legacy multi-byte code page.
#[derive(Debug, Clone, Copy)]
pub struct LegacyEncodingDecoder {
    encoding: &'static Encoding,
}

impl LegacyEncodingDecoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    pub fn gbk() -> Self {
        Self::new(encoding_rs::GBK)
    }
}

impl OutputDecoder for LegacyEncodingDecoder {
    fn decode(&self, bytes: &[u8]) -> String {
        let (text, _had_errors) = self.encoding.decode_without_bom_handling(bytes);
        text.into_owned()
    }

    fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

/// Decoder for the given `std::env::consts::OS` value.
pub fn for_os(os: &str) -> Box<dyn OutputDecoder> {
    if os == "windows" {
        Box::new(LegacyEncodingDecoder::gbk())
    } else {
        Box::new(IdentityDecoder)
    }
}

/// Decoder for the platform this process runs on.
pub fn for_current_platform() -> Box<dyn OutputDecoder> {
    for_os(std::env::consts::OS)
}

/// Decoder for an explicit WHATWG encoding label such as `gbk` or `utf-8`.
pub fn for_label(label: &str) -> Result<Box<dyn OutputDecoder>> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| GkitError::config(format!("unknown encoding label `{}`", label)))?;
    // Lines are split on b'\n' before decoding.
    if !encoding.is_ascii_compatible() {
        return Err(GkitError::config(format!(
            "encoding `{}` is not ASCII-compatible",
            encoding.name()
        )));
    }
    if encoding == encoding_rs::UTF_8 {
        Ok(Box::new(IdentityDecoder))
    } else {
        Ok(Box::new(LegacyEncodingDecoder::new(encoding)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "中文" in GBK
    const GBK_ZHONGWEN: &[u8] = &[0xD6, 0xD0, 0xCE, 0xC4];

    #[test]
    fn test_identity_passes_utf8_through() {
        let line = "go: downloading golang.org/x/text v0.14.0 中文";
        assert_eq!(IdentityDecoder.decode(line.as_bytes()), line);
    }

    #[test]
    fn test_identity_replaces_invalid_bytes() {
        assert_eq!(IdentityDecoder.decode(&[b'o', b'k', 0xFF]), "ok\u{FFFD}");
    }

    #[test]
    fn test_gbk_decodes_to_utf8() {
        let mut line = b"go: ".to_vec();
        line.extend_from_slice(GBK_ZHONGWEN);
        assert_eq!(LegacyEncodingDecoder::gbk().decode(&line), "go: 中文");
    }

    #[test]
    fn test_platform_selection() {
        assert_eq!(for_os("windows").name(), "GBK");
        assert_eq!(for_os("linux").name(), "utf-8");
        assert_eq!(for_os("macos").name(), "utf-8");
    }

    #[test]
    fn test_label_selection() {
        assert_eq!(for_label("gbk").unwrap().name(), "GBK");
        assert_eq!(for_label("UTF-8").unwrap().name(), "utf-8");
        assert_eq!(for_label("shift_jis").unwrap().name(), "Shift_JIS");
        assert!(matches!(for_label("klingon"), Err(GkitError::Config(_))));
    }

    #[test]
    fn test_label_rejects_encodings_that_split_badly_on_newline() {
        for label in ["utf-16le", "utf-16be", "iso-2022-jp", "replacement"] {
            assert!(
                matches!(for_label(label), Err(GkitError::Config(_))),
                "{} should be rejected",
                label
            );
        }
    }
}
