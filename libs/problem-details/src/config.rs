//! Renderer configuration and wire format selection.

use http::HeaderMap;
use http::header::ACCEPT;
use serde::Deserialize;

use crate::{APPLICATION_PROBLEM_JSON, APPLICATION_PROBLEM_XML};

/// Wire format of a rendered problem document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemFormat {
    #[default]
    Json,
    Xml,
}

impl ProblemFormat {
    /// Default media type for this format.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Json => APPLICATION_PROBLEM_JSON,
            Self::Xml => APPLICATION_PROBLEM_XML,
        }
    }

    /// Pick a format from the request's `Accept` headers.
    ///
    /// Quality values are honored and ties keep header order. Wildcards and
    /// unrelated media types do not count as a preference, so `default` is
    /// returned when nothing matches, unless the client refused it with
    /// `q=0` and still accepts the other format.
    #[must_use]
    pub fn negotiate(request_headers: &HeaderMap, default: Self) -> Self {
        let mut best: Option<(u16, Self)> = None;
        let mut refused: Vec<Self> = Vec::new();
        for value in request_headers.get_all(ACCEPT) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for range in value.split(',') {
                let Some((quality, format)) = parse_media_range(range) else {
                    continue;
                };
                if quality == 0 {
                    refused.push(format);
                } else if best.is_none_or(|(q, _)| quality > q) {
                    best = Some((quality, format));
                }
            }
        }
        match best {
            Some((_, format)) => format,
            None if refused.contains(&default) && !refused.contains(&default.other()) => {
                default.other()
            }
            None => default,
        }
    }

    const fn other(self) -> Self {
        match self {
            Self::Json => Self::Xml,
            Self::Xml => Self::Json,
        }
    }
}

/// Returns the quality (in thousandths) and format named by one media range.
fn parse_media_range(range: &str) -> Option<(u16, ProblemFormat)> {
    let mut parts = range.split(';');
    let media_type = parts.next()?.trim().to_ascii_lowercase();
    let format = match media_type.as_str() {
        "application/problem+json" | "application/json" => ProblemFormat::Json,
        "application/problem+xml" | "application/xml" | "text/xml" => ProblemFormat::Xml,
        _ => return None,
    };

    let mut quality = 1000;
    for param in parts {
        if let Some((name, value)) = param.split_once('=')
            && name.trim().eq_ignore_ascii_case("q")
        {
            quality = parse_quality(value.trim())?;
        }
    }
    Some((quality, format))
}

/// Parses an RFC 9110 qvalue into thousandths.
fn parse_quality(raw: &str) -> Option<u16> {
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    if frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u16 = whole.parse().ok()?;
    let frac: u16 = format!("{frac:0<3}").parse().ok()?;
    let millis = whole.checked_mul(1000)?.checked_add(frac)?;
    (millis <= 1000).then_some(millis)
}

/// Problem details renderer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProblemDetailsConfig {
    /// Format used when content negotiation finds no preference.
    /// Default: `json`
    pub default_format: ProblemFormat,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_default_config() {
        let cfg = ProblemDetailsConfig::default();
        assert_eq!(cfg.default_format, ProblemFormat::Json);
    }

    #[test]
    fn test_config_deserializes() {
        let cfg: ProblemDetailsConfig =
            serde_json::from_str(r#"{"default_format":"xml"}"#).unwrap();
        assert_eq!(cfg.default_format, ProblemFormat::Xml);

        let cfg: ProblemDetailsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.default_format, ProblemFormat::Json);

        assert!(serde_json::from_str::<ProblemDetailsConfig>(r#"{"indent":4}"#).is_err());
    }

    #[test]
    fn media_types() {
        assert_eq!(ProblemFormat::Json.media_type(), "application/problem+json");
        assert_eq!(ProblemFormat::Xml.media_type(), "application/problem+xml");
    }

    #[test]
    fn negotiate_explicit_types() {
        assert_eq!(
            ProblemFormat::negotiate(&accept("application/problem+xml"), ProblemFormat::Json),
            ProblemFormat::Xml
        );
        assert_eq!(
            ProblemFormat::negotiate(&accept("text/xml, */*"), ProblemFormat::Json),
            ProblemFormat::Xml
        );
        assert_eq!(
            ProblemFormat::negotiate(&accept("Application/JSON"), ProblemFormat::Xml),
            ProblemFormat::Json
        );
    }

    #[test]
    fn negotiate_honors_quality() {
        assert_eq!(
            ProblemFormat::negotiate(
                &accept("application/json;q=0.5, application/xml;q=0.9"),
                ProblemFormat::Json
            ),
            ProblemFormat::Xml
        );
        assert_eq!(
            ProblemFormat::negotiate(
                &accept("application/xml;q=0, application/problem+json;q=0.1"),
                ProblemFormat::Xml
            ),
            ProblemFormat::Json
        );
    }

    #[test]
    fn negotiate_ties_keep_header_order() {
        assert_eq!(
            ProblemFormat::negotiate(
                &accept("application/json, application/xml"),
                ProblemFormat::Xml
            ),
            ProblemFormat::Json
        );
    }

    #[test]
    fn negotiate_falls_back_to_default() {
        assert_eq!(
            ProblemFormat::negotiate(&HeaderMap::new(), ProblemFormat::Xml),
            ProblemFormat::Xml
        );
        assert_eq!(
            ProblemFormat::negotiate(&accept("text/html, */*;q=0.8"), ProblemFormat::Json),
            ProblemFormat::Json
        );
        assert_eq!(
            ProblemFormat::negotiate(&accept("application/xml;q=bogus"), ProblemFormat::Json),
            ProblemFormat::Json
        );
    }

    #[test]
    fn negotiate_avoids_refused_default() {
        assert_eq!(
            ProblemFormat::negotiate(&accept("application/json;q=0"), ProblemFormat::Json),
            ProblemFormat::Xml
        );
        assert_eq!(
            ProblemFormat::negotiate(
                &accept("application/problem+xml;q=0.0, text/html"),
                ProblemFormat::Xml
            ),
            ProblemFormat::Json
        );
        assert_eq!(
            ProblemFormat::negotiate(
                &accept("application/json;q=0, application/xml;q=0"),
                ProblemFormat::Json
            ),
            ProblemFormat::Json
        );
        assert_eq!(
            ProblemFormat::negotiate(
                &accept("application/json;q=0, application/problem+json;q=0.5"),
                ProblemFormat::Xml
            ),
            ProblemFormat::Json
        );
    }

    #[test]
    fn quality_parsing() {
        assert_eq!(parse_quality("1"), Some(1000));
        assert_eq!(parse_quality("0.8"), Some(800));
        assert_eq!(parse_quality("0.125"), Some(125));
        assert_eq!(parse_quality("1.5"), None);
        assert_eq!(parse_quality("0.1234"), None);
        assert_eq!(parse_quality(""), None);
    }
}
