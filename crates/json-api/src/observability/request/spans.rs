//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Collections whose child segment is a slug rather than a uuid.
const SLUG_COLLECTIONS: [&str; 1] = ["categories"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_template(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace identifiers in `path` with placeholders so every product, order
/// and category shares one label.
fn route_template(path: &str) -> String {
    let mut template = String::from("/");
    let mut previous: Option<&str> = None;

    for (index, segment) in path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .enumerate()
    {
        if index > 0 {
            template.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            template.push_str("{id}");
        } else if previous.is_some_and(|parent| SLUG_COLLECTIONS.contains(&parent)) {
            template.push_str("{slug}");
        } else {
            template.push_str(segment);
        }

        previous = Some(segment);
    }

    template
}
