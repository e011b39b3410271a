//! Destination URL validation.

use url::Url;

/// Errors returned for unacceptable destinations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DestinationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Returns the trimmed input unchanged so that the stored destination is
/// exactly what the caller submitted.
///
/// # Errors
///
/// Returns [`DestinationError::InvalidFormat`] for relative or malformed URLs,
/// [`DestinationError::UnsupportedProtocol`] for schemes like `javascript:` or
/// `file:`, and [`DestinationError::MissingHost`] when no host is present.
pub fn validate_destination(input: &str) -> Result<String, DestinationError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| DestinationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(DestinationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(DestinationError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_url() {
        assert_eq!(
            validate_destination("https://example.com/page").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_keeps_query_and_fragment() {
        let url = "http://example.com/a?b=c#d";
        assert_eq!(validate_destination(url).unwrap(), url);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_destination("  https://example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            validate_destination("/just/a/path"),
            Err(DestinationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validate_destination("not-a-url").is_err());
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert_eq!(
            validate_destination("javascript:alert(1)"),
            Err(DestinationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_destination("file:///etc/passwd"),
            Err(DestinationError::UnsupportedProtocol)
        );
    }
}
