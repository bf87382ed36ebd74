//! Shared HTTP plumbing for the tracking and metadata clients.

use std::time::Duration;

use url::Url;

use crate::error::ClientBuildError;

const USER_AGENT: &str = concat!("marquee/", env!("CARGO_PKG_VERSION"));
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client with a hard per-request deadline. A stalled call would
/// otherwise hold up every later poll cycle.
pub fn build_client(
    request_timeout: Duration,
) -> Result<reqwest::Client, ClientBuildError> {
    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(request_timeout.min(MAX_CONNECT_TIMEOUT))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

pub(crate) fn ensure_base(
    url: &Url,
    field: &'static str,
) -> Result<(), ClientBuildError> {
    if url.cannot_be_a_base() {
        return Err(ClientBuildError::BaseUrl {
            field,
            url: url.to_string(),
        });
    }
    Ok(())
}

/// Appends escaped path segments to `base`, keeping its existing path.
///
/// `base` must have passed [`ensure_base`].
pub(crate) fn endpoint<I, S>(base: &Url, segments: I) -> Url
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    url.set_query(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
