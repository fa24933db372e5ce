//! Route normalisation for span fields and metric labels.

use uuid::Uuid;

/// Collapse identifiers and trailing slashes so every request to one route shares a label.
pub(super) fn normalise_route(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
