//! Tests for the metadata module

use super::*;
use crate::error::Error;
use test_case::test_case;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_load_protected_resource_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/.well-known/oauth-protected-resource"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resource": "https://resource.example.com",
            "authorization_servers": ["https://auth.example.com"],
            "bearer_methods_supported": ["header", "header", "body"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let loader = MetadataLoader::new();
    let url = format!("{}/.well-known/oauth-protected-resource", mock_server.uri());
    let metadata: ProtectedResourceMetadata = loader.load(&url).await.unwrap();

    assert_eq!(metadata.resource, "https://resource.example.com");
    assert_eq!(metadata.authorization_servers, vec!["https://auth.example.com"]);
    assert_eq!(metadata.bearer_methods_supported.len(), 2);
    assert!(metadata.bearer_methods_supported.contains("header"));
    assert!(metadata.scopes_supported.is_none());
}

#[tokio::test]
async fn test_load_non_success_status_includes_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such document"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/meta", mock_server.uri());
    let err = MetadataLoader::new()
        .load::<ProtectedResourceMetadata>(&url)
        .await
        .unwrap_err();

    match err {
        Error::MetadataFetch {
            url: err_url,
            message,
            source,
        } => {
            assert_eq!(err_url, url);
            assert_eq!(message, "no such document");
            assert!(source.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_load_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/meta", mock_server.uri());
    let err = MetadataLoader::new()
        .load::<ProtectedResourceMetadata>(&url)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MetadataParse { .. }));
    assert!(err.to_string().starts_with(&format!("metadata parse (url={url})")));
}

#[tokio::test]
async fn test_load_truncates_oversized_body() {
    let mock_server = MockServer::start().await;

    // Valid JSON, but only parseable when read in full
    let padding = " ".repeat(MAX_METADATA_SIZE);
    let body = format!(r#"{{"resource": "x",{padding}"authorization_servers": []}}"#);

    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let url = format!("{}/meta", mock_server.uri());
    let err = MetadataLoader::new()
        .load::<ProtectedResourceMetadata>(&url)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MetadataParse { .. }));
}

#[tokio::test]
async fn test_load_connection_failure() {
    // Nothing listens on the discard port
    let url = "http://127.0.0.1:9/meta";
    let err = MetadataLoader::new()
        .load::<ProtectedResourceMetadata>(url)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MetadataFetch { ref url, .. } if url == "http://127.0.0.1:9/meta"));

    let cause = std::error::Error::source(&err).expect("transport cause");
    assert!(cause.downcast_ref::<reqwest::Error>().is_some());
}

#[tokio::test]
async fn test_load_authorization_server_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tenant/.well-known/oauth-authorization-server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "issuer": format!("{}/tenant", mock_server.uri()),
            "authorization_endpoint": "https://auth.example.com/authorize",
            "token_endpoint": "https://auth.example.com/token"
        })))
        .mount(&mock_server)
        .await;

    let issuer = Url::parse(&format!("{}/tenant", mock_server.uri())).unwrap();
    let metadata = MetadataLoader::new()
        .load_authorization_server(&issuer)
        .await
        .unwrap();

    assert_eq!(
        metadata.authorization_endpoint,
        "https://auth.example.com/authorize"
    );
    assert_eq!(
        metadata.token_endpoint.as_deref(),
        Some("https://auth.example.com/token")
    );
}

#[test_case("https://r.example.com", "https://r.example.com/.well-known/oauth-protected-resource" ; "root")]
#[test_case("https://r.example.com/", "https://r.example.com/.well-known/oauth-protected-resource" ; "root with slash")]
#[test_case("https://r.example.com/api/v1", "https://r.example.com/api/v1/.well-known/oauth-protected-resource" ; "path")]
#[test_case("https://r.example.com/api/?q=1#f", "https://r.example.com/api/.well-known/oauth-protected-resource" ; "query and fragment dropped")]
fn test_well_known_url(base: &str, expected: &str) {
    let base = Url::parse(base).unwrap();
    let url = well_known_url(&base, PROTECTED_RESOURCE_METADATA_PATH).unwrap();
    assert_eq!(url.as_str(), expected);
}

#[test]
fn test_well_known_url_cannot_be_base() {
    let base = Url::parse("mailto:someone@example.com").unwrap();
    assert!(matches!(
        well_known_url(&base, PROTECTED_RESOURCE_METADATA_PATH),
        Err(Error::InvalidUrl(_))
    ));
}
