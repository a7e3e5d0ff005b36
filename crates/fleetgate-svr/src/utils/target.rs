use fleetgate_core::Error;
use url::Url;

/// Appends path segments to `base`, percent-encoding each one.
pub fn join_segments<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    url.set_query(None);
    Ok(url)
}
