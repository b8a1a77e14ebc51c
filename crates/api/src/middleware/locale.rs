//! Locale selection for localized responses.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};
use cifan_core::i18n::Locale;
use serde::Deserialize;

/// The locale a response should be rendered in.
///
/// Taken from the `lang` query parameter when it names a supported locale,
/// otherwise from `Accept-Language`, otherwise English. Never rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

#[derive(Debug, Deserialize)]
struct LangParams {
    lang: Option<String>,
}

/// Resolve the response locale from a request's URI and headers.
pub fn locale_of(uri: &Uri, headers: &HeaderMap) -> Locale {
    Query::<LangParams>::try_from_uri(uri)
        .ok()
        .and_then(|Query(params)| params.lang)
        .and_then(|lang| Locale::from_tag(&lang))
        .or_else(|| {
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(Locale::from_accept_language)
        })
        .unwrap_or_default()
}

impl<S: Send + Sync> FromRequestParts<S> for RequestLocale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestLocale(locale_of(&parts.uri, &parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Locale {
        let (mut parts, _) = request.into_parts();
        let RequestLocale(locale) = RequestLocale::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        locale
    }

    #[tokio::test]
    async fn query_parameter_wins() {
        let request = Request::builder()
            .uri("/api/v1/applications?confirm=true&lang=th")
            .header(ACCEPT_LANGUAGE, "en-US")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, Locale::Th);
    }

    #[tokio::test]
    async fn percent_encoded_tag_is_decoded() {
        let request = Request::builder()
            .uri("/api/v1/applications?lang=th%2DTH")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, Locale::Th);
    }

    #[tokio::test]
    async fn falls_back_to_accept_language() {
        let request = Request::builder()
            .uri("/api/v1/applications?lang=fr")
            .header(ACCEPT_LANGUAGE, "fr-FR, th;q=0.8")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, Locale::Th);
    }

    #[tokio::test]
    async fn defaults_to_english() {
        let request = Request::builder().uri("/health").body(()).unwrap();
        assert_eq!(extract(request).await, Locale::En);
    }
}
