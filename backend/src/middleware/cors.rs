//! Cross-origin policy for browser clients.
//!
//! Any origin may call the API. Credentials travel in the `Authorization`
//! header, never in cookies, so the wildcard origin is sent and credentialed
//! requests are not enabled. The `trace-id` header is exposed so browser
//! clients can quote it in bug reports.

use actix_cors::Cors;

use crate::domain::TRACE_ID_HEADER;

/// Build the CORS middleware wrapped around every route.
#[must_use]
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .expose_headers([TRACE_ID_HEADER])
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::{self, HeaderMap};
    use actix_web::http::{Method, StatusCode};
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::Trace;

    async fn call(request: test::TestRequest) -> (StatusCode, HeaderMap) {
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .wrap(Trace)
                .route("/api/gadgets", web::get().to(HttpResponse::Ok)),
        )
        .await;
        let res = test::call_service(&app, request.to_request()).await;
        (res.status(), res.headers().clone())
    }

    fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    #[rstest]
    #[actix_web::test]
    async fn any_origin_may_read_responses_and_their_trace_id() {
        let (status, headers) = call(
            test::TestRequest::get()
                .uri("/api/gadgets")
                .insert_header((header::ORIGIN, "https://console.example.org")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            header_text(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(),
            Some("*")
        );
        let exposed = header_text(&headers, header::ACCESS_CONTROL_EXPOSE_HEADERS).unwrap_or_default();
        assert!(exposed.contains(TRACE_ID_HEADER), "{exposed}");
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_for_authorised_patch_is_accepted() {
        let (status, headers) = call(
            test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri("/api/gadgets")
                .insert_header((header::ORIGIN, "https://console.example.org"))
                .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
                .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, content-type")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            header_text(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(),
            Some("*")
        );
        let methods = header_text(&headers, header::ACCESS_CONTROL_ALLOW_METHODS).unwrap_or_default();
        assert!(methods.contains("PATCH"), "{methods}");
    }
}
