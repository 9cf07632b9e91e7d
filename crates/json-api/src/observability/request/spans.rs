//! HTTP span helpers.

use uuid::Uuid;

use till_app::orders::ORDER_ID_PREFIX;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace identifiers in a path with placeholders so routes group together.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(placeholder_for)
        .collect();

    format!("/{}", segments.join("/"))
}

fn placeholder_for(segment: &str) -> &str {
    if Uuid::parse_str(segment).is_ok() {
        "{uuid}"
    } else if segment.starts_with(ORDER_ID_PREFIX) {
        "{order}"
    } else if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
        "{index}"
    } else {
        segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_replaced_with_placeholders() {
        let cart = Uuid::now_v7();

        assert_eq!(
            normalise_path_for_span_name(&format!("/carts/{cart}/items/3")),
            "/carts/{uuid}/items/{index}"
        );
        assert_eq!(
            normalise_path_for_span_name("/orders/TRX-20260315-9f3a1c07"),
            "/orders/{order}"
        );
        assert_eq!(normalise_path_for_span_name("/reports/daily"), "/reports/daily");
        assert_eq!(normalise_path_for_span_name("/"), "/");
    }

    #[test]
    fn span_name_combines_method_and_route() {
        let names = request_span_name("GET", "/products");

        assert_eq!(names.otel_span_name, "GET /products");
    }
}
