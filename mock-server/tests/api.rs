use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Envelope, CA_AKI};
use tower::ServiceExt;

async fn envelope(response: axum::response::Response) -> Envelope {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/cfssl{uri}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(format!("/api/v1/cfssl{uri}"))
        .body(String::new())
        .unwrap()
}

const CSR: &str = "-----BEGIN CERTIFICATE REQUEST-----\\nabc\\n-----END CERTIFICATE REQUEST-----";

// --- sign ---

#[tokio::test]
async fn sign_returns_certificate() {
    let resp = app()
        .oneshot(json_request(
            "/sign",
            &format!(r#"{{"certificate_request":"{CSR}","hosts":["example.com"],"bundle":true}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env = envelope(resp).await;
    assert!(env.success);
    assert_eq!(env.result["serial"], "01");
    assert_eq!(env.result["hosts"][0], "example.com");
    assert!(env.result["bundle"].is_object());
}

#[tokio::test]
async fn sign_rejects_bad_csr() {
    let resp = app()
        .oneshot(json_request("/sign", r#"{"certificate_request":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let env = envelope(resp).await;
    assert!(!env.success);
    assert_eq!(env.errors[0].message, "bad CSR");
}

#[tokio::test]
async fn sign_rejects_unknown_fields() {
    let resp = app()
        .oneshot(json_request(
            "/sign",
            &format!(r#"{{"certificate_request":"{CSR}","timestamp":1}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let env = envelope(resp).await;
    assert!(env.errors[0].message.starts_with("invalid request"));
}

// --- bundle ---

#[tokio::test]
async fn bundle_needs_certificate_or_domain() {
    let resp = app()
        .oneshot(json_request("/bundle", r#"{"flavor":"optimal"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let env = envelope(resp).await;
    assert_eq!(env.errors[0].message, "missing certificate or domain");
}

#[tokio::test]
async fn bundle_by_domain() {
    let resp = app()
        .oneshot(json_request("/bundle", r#"{"domain":"example.com"}"#))
        .await
        .unwrap();

    let env = envelope(resp).await;
    assert!(env.success);
    assert_eq!(env.result["source"], "domain");
}

// --- reads ---

#[tokio::test]
async fn scan_requires_host() {
    let resp = app().oneshot(get_request("/scan")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scan_reports_requested_family() {
    let resp = app()
        .oneshot(get_request("/scan?host=example.com&family=TLSHandshake"))
        .await
        .unwrap();

    let env = envelope(resp).await;
    assert!(env.result["TLSHandshake"].is_object());
}

#[tokio::test]
async fn crl_echoes_expiry() {
    let resp = app().oneshot(get_request("/crl?expiry=24h")).await.unwrap();
    let env = envelope(resp).await;
    assert_eq!(env.result["expiry"], "24h");
}

#[tokio::test]
async fn scaninfo_lists_families() {
    let resp = app().oneshot(get_request("/scaninfo")).await.unwrap();
    let env = envelope(resp).await;
    assert!(env.result["Connectivity"].is_object());
}

// --- sign then revoke ---

#[tokio::test]
async fn revoke_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("/sign", &format!(r#"{{"certificate_request":"{CSR}"}}"#)))
        .await
        .unwrap();
    let serial = envelope(resp).await.result["serial"].as_str().unwrap().to_string();

    // wrong AKI
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/revoke",
            &format!(r#"{{"serial":"{serial}","authority_key_id":"ffff","reason":"superseded"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/revoke",
            &format!(
                r#"{{"serial":"{serial}","authority_key_id":"{CA_AKI}","reason":"superseded"}}"#
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(envelope(resp).await.success);

    // the CRL now lists the serial
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/crl"))
        .await
        .unwrap();
    let env = envelope(resp).await;
    assert_eq!(env.result["crl"], format!("CRL({serial})"));
}
