use thiserror::Error;
use url::Url;

/// Errors from validating a media or poster URL.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The string could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Only http and https media can be streamed or opened.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates a media URL taken from the feed file.
///
/// Accepts absolute `http`/`https` URLs with a host. Everything else
/// (`file://`, `javascript:`, relative paths) is rejected so that the
/// "open media" action can never hand an arbitrary command to the OS.
///
/// ```
/// use reels::util::validate_url;
///
/// assert!(validate_url("https://cdn.example.com/v/1.mp4").is_ok());
/// assert!(validate_url("file:///etc/passwd").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Validates a URL before passing it to `open::that`, returning a
/// status-bar friendly message on failure.
pub fn validate_url_for_open(url_str: &str) -> Result<(), String> {
    validate_url(url_str)
        .map(|_| ())
        .map_err(|e| format!("Refusing to open URL: {}", e))
}
