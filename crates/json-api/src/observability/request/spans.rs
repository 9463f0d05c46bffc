//! Route labels for spans and metrics.

/// Collections whose child segment is an identifier.
const ID_PARENTS: &[&str] = &["orders"];

/// Replace identifier segments in `path` with `{id}` so label cardinality
/// stays bounded, whatever the client sent.
pub(super) fn route_for_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut previous = "";

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            let label = if ID_PARENTS.contains(&previous) && !segment.is_empty() {
                "{id}"
            } else {
                segment
            };

            previous = segment;

            label
        })
        .collect();

    format!("/{}", segments.join("/"))
}
