//! Domain-name validation for sites given on the command line.

use url::Host;

use crate::error::LockinError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Validate `site` as a domain name and return its normalized form.
///
/// Internationalized names are converted to ASCII (punycode) and lowercased by
/// the URL host parser; the result must then have at least two labels, each
/// 1..=63 characters of ASCII alphanumerics or `-` that neither start nor end
/// with `-`, and a top-level label that is not purely numeric.
pub fn validate_site(site: &str) -> Result<String, LockinError> {
    let invalid = || LockinError::InvalidSite {
        site: site.to_string(),
    };

    if site.is_empty() || site.chars().any(|c| c.is_whitespace()) {
        return Err(invalid());
    }

    let ascii = match Host::parse(site) {
        Ok(Host::Domain(d)) => d,
        // Bare IP addresses are not domains.
        Ok(_) | Err(_) => return Err(invalid()),
    };

    if ascii.len() > MAX_DOMAIN_LEN {
        return Err(invalid());
    }

    let labels: Vec<&str> = ascii.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| is_valid_label(l)) {
        return Err(invalid());
    }
    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid());
    }

    Ok(ascii)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
