use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("URL is required")]
    Empty,
    #[error("Invalid URL format")]
    Malformed,
}

/// Checks user input for `/scan`: trimmed, non-empty, with a scheme and a host.
pub fn validate_scan_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let url = Url::parse(trimmed).map_err(|_| ValidationError::Malformed)?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ValidationError::Malformed),
    }
}
