use url::Url;

pub const ROUTING_PREFIX: &str = "oracle";
pub const API_VERSION_PREFIX: &str = "/v1";

/// Drops one leading `oracle/{id}` pair from `path`.
///
/// The result always starts with `/` and is `/` when nothing is left. Paths
/// without the prefix only get their leading slash normalized.
pub fn strip_routing_prefix(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut segments = trimmed.splitn(3, '/');
    if let (Some(ROUTING_PREFIX), Some(id)) = (segments.next(), segments.next()) {
        if !id.is_empty() {
            return format!("/{}", segments.next().unwrap_or_default());
        }
    }
    format!("/{trimmed}")
}

/// `{base}/v1{stripped}`, or `{base}/v1` when `stripped` is `/`. Percent escapes
/// in `stripped` are kept as received, query and fragment of `base` are dropped.
pub fn oracle_target(base: &Url, stripped: &str) -> Url {
    let mut target = base.clone();
    let mut path = base.path().trim_end_matches('/').to_string();
    path.push_str(API_VERSION_PREFIX);
    if stripped != "/" {
        path.push_str(stripped);
    }
    target.set_path(&path);
    target.set_query(None);
    target.set_fragment(None);
    target
}
