/// Split a request path into routing segments, dropping the API root prefix.
///
/// `/api/v1/customers/` with prefix `/api` gives `["v1", "customers"]`.
/// Paths outside the prefix are split as-is.
pub fn split_path(path: &str, root_prefix: &str) -> Vec<String> {
    let prefix = root_prefix.trim_end_matches('/');
    let rest = if prefix.is_empty() {
        path
    } else {
        match path.strip_prefix(prefix) {
            Some(r) if r.is_empty() || r.starts_with('/') => r,
            _ => path,
        }
    };

    rest.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
