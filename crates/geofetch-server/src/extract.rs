//! Transfer-location extraction
//!
//! GEO DataSets detail records embed the FTP location of the study's
//! supplementary files as a plain `ftp://` URL inside the XML blob. We only
//! need the first one; records without a URL carry no downloadable files and
//! are skipped by the caller.

use regex::Regex;
use std::sync::LazyLock;

static FTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    // Scheme literal followed by anything up to the closing quote.
    Regex::new(r#"ftp://[^"]+"#).unwrap_or_else(|e| panic!("invalid ftp url pattern: {e}"))
});

/// Find the first embedded `ftp://` URL in a detail blob.
///
/// Returns `None` when the record carries no transfer location.
pub fn ftp_location(detail: &str) -> Option<&str> {
    FTP_URL.find(detail).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_url() {
        let xml = r#"<Item Name="FTPLink" Type="String">ftp://ftp.ncbi.nlm.nih.gov/geo/series/GSE100nnn/GSE100001/</Item>"#;
        assert_eq!(
            ftp_location(xml),
            Some("ftp://ftp.ncbi.nlm.nih.gov/geo/series/GSE100nnn/GSE100001/")
        );
    }

    #[test]
    fn test_stops_at_quote() {
        let xml = r#"before "ftp://host/path" after"#;
        assert_eq!(ftp_location(xml), Some("ftp://host/path"));
    }

    #[test]
    fn test_first_of_many() {
        let xml = r#""ftp://host/a" and "ftp://host/b""#;
        assert_eq!(ftp_location(xml), Some("ftp://host/a"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(ftp_location("<DocSum>no links here</DocSum>"), None);
        assert_eq!(ftp_location("https://ftp.ncbi.nlm.nih.gov/not-ftp"), None);
        assert_eq!(ftp_location(""), None);
    }
}
