use crate::UrlError;
use url::Url;

/// Normalizes a URL before the frontier's seen-check
///
/// Two spellings of the same page must collapse to one string, or the
/// dedup set admits both and the page is fetched twice.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not http(s)
/// 2. Lowercase the host and drop a leading `www.`
/// 3. Collapse dot segments and repeated slashes in the path
/// 4. Remove the trailing slash (except for the root `/`)
/// 5. Drop the fragment and the entire query string
///
/// The query is dropped wholesale: fight-center and fighter pages are
/// addressed purely by path, and query strings on them are tracking noise.
///
/// # Examples
///
/// ```
/// use cagecrawl::url::normalize_url;
///
/// let url = normalize_url("https://WWW.ESPN.COM/mma/fightcenter/").unwrap();
/// assert_eq!(url.as_str(), "https://espn.com/mma/fightcenter");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "only http and https are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Malformed(format!("failed to set host: {}", e)))?;

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);
    url.set_query(None);

    Ok(url)
}

/// Collapses dot segments, repeated slashes, and the trailing slash
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", segments.join("/"))
}
