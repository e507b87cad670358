//! Project references parsed from portal URLs.

use std::fmt;

use url::Url;

/// Base URL of the disclosure service API.
pub const API_BASE: &str = "https://disclosuresservice.ifc.org";

/// Disclosure document type carried in the portal URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    /// Summary of Project Information
    Spi,
    /// Summary of Investment Information
    Sii,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Spi => "SPI",
            DocType::Sii => "SII",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment.to_uppercase().as_str() {
            "SPI" => Some(DocType::Spi),
            "SII" => Some(DocType::Sii),
            _ => None,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project identifier and document type extracted from a disclosure URL
/// of the form `…/project-detail/<TYPE>/<id>/<slug>`.
///
/// `doc_type` stays `None` for unrecognized type segments; the amounts
/// report requires it, the exports scanner only needs the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub doc_type: Option<DocType>,
}

impl ProjectRef {
    /// Parse a portal URL. `None` when no well-formed `project-detail`
    /// path is present.
    pub fn parse(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let parts: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
        for (i, segment) in parts.iter().enumerate() {
            if *segment == "project-detail" && i + 2 < parts.len() {
                let doc_type = DocType::from_segment(parts[i + 1]);
                let raw_id = parts[i + 2];
                // all-zero ids keep their original form
                let trimmed = raw_id.trim_start_matches('0');
                let id = if trimmed.is_empty() { raw_id } else { trimmed };
                return Some(Self {
                    id: id.to_string(),
                    doc_type,
                });
            }
        }
        None
    }

    /// API endpoint serving this project's typed payload, when the
    /// document type is known.
    pub fn api_endpoint(&self) -> Option<String> {
        self.doc_type.map(|doc_type| {
            format!(
                "{API_BASE}/api/ProjectAccess/{}Project?projectId={}",
                doc_type.as_str(),
                self.id
            )
        })
    }

    /// Endpoints probed by the exports scanner, most specific first.
    pub fn scan_endpoints(&self) -> Vec<String> {
        vec![
            format!("{API_BASE}/api/ProjectAccess/SPIProject?projectId={}", self.id),
            format!("{API_BASE}/api/ProjectAccess/SIIProject?projectId={}", self.id),
            format!(
                "{API_BASE}/api/ProjectAccess/validateProjectUrl?ProjectNumber={}&documentType=SPI",
                self.id
            ),
            format!("{API_BASE}/api/searchprovider/landingPageDetails?isLanding=1"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spi_url() {
        let r = ProjectRef::parse("https://disclosures.ifc.org/project-detail/SPI/47631/acme-wind")
            .unwrap();
        assert_eq!(r.id, "47631");
        assert_eq!(r.doc_type, Some(DocType::Spi));
    }

    #[test]
    fn test_parse_strips_leading_zeros() {
        let r = ProjectRef::parse("https://disclosures.ifc.org/project-detail/SII/000123/x")
            .unwrap();
        assert_eq!(r.id, "123");
        assert_eq!(r.doc_type, Some(DocType::Sii));
    }

    #[test]
    fn test_parse_all_zero_id_is_kept() {
        let r = ProjectRef::parse("https://disclosures.ifc.org/project-detail/SPI/000/x").unwrap();
        assert_eq!(r.id, "000");
    }

    #[test]
    fn test_parse_unknown_type_keeps_id() {
        let r = ProjectRef::parse("https://disclosures.ifc.org/project-detail/XYZ/55/slug")
            .unwrap();
        assert_eq!(r.id, "55");
        assert_eq!(r.doc_type, None);
        assert_eq!(r.api_endpoint(), None);
    }

    #[test]
    fn test_parse_rejects_unrelated_urls() {
        assert!(ProjectRef::parse("https://disclosures.ifc.org/search").is_none());
        assert!(ProjectRef::parse("not a url").is_none());
        // id segment missing
        assert!(ProjectRef::parse("https://disclosures.ifc.org/project-detail/SPI").is_none());
    }

    #[test]
    fn test_api_endpoint_format() {
        let r = ProjectRef::parse("https://disclosures.ifc.org/project-detail/SPI/123/x").unwrap();
        assert_eq!(
            r.api_endpoint().unwrap(),
            "https://disclosuresservice.ifc.org/api/ProjectAccess/SPIProject?projectId=123"
        );
    }

    #[test]
    fn test_scan_endpoints_probe_order() {
        let r = ProjectRef::parse("https://disclosures.ifc.org/project-detail/SPI/123/x").unwrap();
        let endpoints = r.scan_endpoints();
        assert_eq!(endpoints.len(), 4);
        assert!(endpoints[0].contains("SPIProject?projectId=123"));
        assert!(endpoints[1].contains("SIIProject?projectId=123"));
        assert!(endpoints[2].contains("validateProjectUrl"));
        assert!(endpoints[3].contains("landingPageDetails"));
    }
}
