use crate::mock::{credential, parse_authorization, verify, MockHttpSend};
use anyhow::Result;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use paysign_amazon_pay::canonical::{canonical_request, string_to_sign};
use paysign_amazon_pay::{
    ApiRequest, Client, Credential, Endpoint, Region, RequestSigner, SignatureAlgorithm,
};
use paysign_core::hash::hex_sha256;
use paysign_core::time::{parse_rfc3339, DateTime};
use paysign_core::{Context, SigningRequest};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn fixed_time() -> DateTime {
    parse_rfc3339("2024-05-20T10:00:00Z").unwrap()
}

fn signer() -> RequestSigner {
    RequestSigner::new().with_time(fixed_time())
}

/// Canonical request of a signed request, rebuilt without its authorization.
fn expected_string_to_sign(cred: &Credential, req: ApiRequest) -> String {
    let prepared = req.prepare(cred).unwrap();
    let mut signed: SigningRequest = signer().sign_request(cred, &prepared).unwrap();
    signed.headers.remove(AUTHORIZATION);

    let canonical = canonical_request(&signed).unwrap();
    string_to_sign(cred.algorithm(), canonical.as_bytes())
}

#[test]
fn test_get_signed_headers() -> Result<()> {
    let cred = credential("AHEGSJCM3ZRVHPLIVE");
    let client = Client::new(Context::new(), cred.clone()).with_signer(signer());
    let payload = json!({"webCheckoutDetails": {"checkoutResultReturnUrl": "https://a.com/r"}});
    let req = ApiRequest::patch("checkoutSessions/S01-1")
        .with_json(&payload)?
        .with_header("x-amz-pay-idempotency-key", HeaderValue::from_static("idem-1"));

    let headers = client.get_signed_headers(req.clone())?;
    assert_eq!(headers["x-amz-pay-date"], "2024-05-20T10:00:00Z");
    assert_eq!(headers["x-amz-pay-host"], "pay-api.amazon.com");
    assert_eq!(headers["x-amz-pay-region"], "na");
    assert_eq!(headers["x-amz-pay-idempotency-key"], "idem-1");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers[CONTENT_TYPE], "application/json");

    let (algorithm, public_key_id, signed_headers, signature) =
        parse_authorization(headers[AUTHORIZATION].to_str()?);
    assert_eq!(algorithm, "AMZN-PAY-RSASSA-PSS");
    assert_eq!(public_key_id, "AHEGSJCM3ZRVHPLIVE");
    assert_eq!(
        signed_headers,
        "accept;content-type;user-agent;x-amz-pay-date;x-amz-pay-host;x-amz-pay-idempotency-key;x-amz-pay-region"
    );

    let expected = expected_string_to_sign(&cred, req);
    assert!(verify(&cred, SignatureAlgorithm::Default, &expected, &signature));
    Ok(())
}

#[test]
fn test_query_order_does_not_matter() -> Result<()> {
    let cred = credential("LIVE-AHEGSJCM3ZRVHP");

    let a = ApiRequest::get("chargePermissions")
        .with_query("merchantReferenceId", "order #1")
        .with_query("chargePermissionStatus", "Chargeable");
    let b = ApiRequest::get("chargePermissions")
        .with_query("chargePermissionStatus", "Chargeable")
        .with_query("merchantReferenceId", "order #1");

    let signed_a = signer().sign_request(&cred, &a.clone().prepare(&cred)?)?;
    let signed_b = signer().sign_request(&cred, &b.clone().prepare(&cred)?)?;
    assert_eq!(signed_a.uri()?, signed_b.uri()?);
    assert_eq!(
        signed_a.uri()?.to_string(),
        "https://pay-api.amazon.com/v2/chargePermissions?chargePermissionStatus=Chargeable&merchantReferenceId=order%20%231"
    );

    let expected = expected_string_to_sign(&cred, a);
    assert_eq!(expected, expected_string_to_sign(&cred, b));

    let (_, _, _, signature) = parse_authorization(signed_b.headers[AUTHORIZATION].to_str()?);
    assert!(verify(&cred, SignatureAlgorithm::Default, &expected, &signature));
    Ok(())
}

#[test]
fn test_empty_query_value() -> Result<()> {
    let cred = credential("LIVE-AHEGSJCM3ZRVHP");
    let prepared = ApiRequest::get("reports")
        .with_query("reportTypes", "")
        .with_query("nextToken", "a+b/c=")
        .prepare(&cred)?;

    let signed = signer().sign_request(&cred, &prepared)?;
    assert_eq!(
        signed.query_to_string(),
        "nextToken=a%2Bb%2Fc%3D&reportTypes="
    );
    Ok(())
}

#[test_case("LIVE-AHEGSJCM3ZRVHP", false, "/v2/charges"; "unified live")]
#[test_case("SANDBOX-AHEGSJCM3ZRVHP", true, "/v2/charges"; "unified sandbox ignores flag")]
#[test_case("AHEGSJCM3ZRVHPLIVE", false, "/live/v2/charges"; "legacy live")]
#[test_case("AHEGSJCM3ZRVHPSANDBOX", true, "/sandbox/v2/charges"; "legacy sandbox")]
fn test_path_qualification(public_key_id: &str, sandbox: bool, expected: &str) {
    let cred = credential(public_key_id).with_sandbox(sandbox);
    let prepared = ApiRequest::post("/charges").prepare(&cred).unwrap();

    let signed = signer().sign_request(&cred, &prepared).unwrap();
    assert_eq!(signed.path, expected);
}

#[test_case("merchantAccounts/M01-1", true; "merchant account route")]
#[test_case("charges/C01-1", false; "regular route")]
fn test_payload_change_on_redacted_route(path: &str, redacted: bool) {
    let cred = credential("LIVE-AHEGSJCM3ZRVHP");
    let a = expected_string_to_sign(
        &cred,
        ApiRequest::patch(path).with_payload(r#"{"merchantStoreName":"A"}"#),
    );
    let b = expected_string_to_sign(
        &cred,
        ApiRequest::patch(path).with_payload(r#"{"merchantStoreName":"B"}"#),
    );

    assert_eq!(a == b, redacted);
}

#[tokio::test]
async fn test_multi_valued_header() -> Result<()> {
    let cred = credential("LIVE-AHEGSJCM3ZRVHP");
    let mock = MockHttpSend::default();
    let client = Client::new(Context::new().with_http_send(mock.clone()), cred.clone())
        .with_signer(signer());

    let mut headers = HeaderMap::new();
    headers.append("x-custom", HeaderValue::from_static("a"));
    headers.append("x-custom", HeaderValue::from_static("b"));
    let req = ApiRequest::get("buyers/B01-1").with_headers(headers);

    client.api_call(req.clone()).await?;

    let requests = mock.requests();
    let sent: Vec<_> = requests[0].headers.get_all("x-custom").iter().collect();
    assert_eq!(sent, vec!["a", "b"]);

    let prepared = req.clone().prepare(&cred)?;
    let mut signed = signer().sign_request(&cred, &prepared)?;
    signed.headers.remove(AUTHORIZATION);
    let canonical = canonical_request(&signed)?;
    assert!(canonical.contains("\nx-custom:a,b\n"), "{canonical}");

    let (_, _, signed_headers, signature) =
        parse_authorization(requests[0].headers[AUTHORIZATION].to_str()?);
    assert!(signed_headers.ends_with(";x-custom"), "{signed_headers}");
    let expected = expected_string_to_sign(&cred, req);
    assert!(verify(&cred, SignatureAlgorithm::Default, &expected, &signature));
    Ok(())
}

#[test]
fn test_deterministic_canonical_request() {
    let cred = credential("AHEGSJCM3ZRVHPLIVE");
    let first = expected_string_to_sign(&cred, ApiRequest::get("buyers/B01-1"));
    let second = expected_string_to_sign(&cred, ApiRequest::get("buyers/B01-1"));

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_redacted_route_sends_real_payload() -> Result<()> {
    let cred = credential("LIVE-AHEGSJCM3ZRVHP");
    let mock = MockHttpSend::default();
    let client = Client::new(Context::new().with_http_send(mock.clone()), cred.clone())
        .with_signer(signer());
    let payload = r#"{"merchantStoreName":"Store"}"#;

    client
        .api_call(ApiRequest::patch("merchantAccounts/M01-1").with_payload(payload))
        .await?;

    let requests = mock.requests();
    assert_eq!(requests[0].body.as_ref(), payload.as_bytes());

    let prepared = ApiRequest::patch("merchantAccounts/M01-1")
        .with_payload(payload)
        .prepare(&cred)?;
    let mut signed = signer().sign_request(&cred, &prepared)?;
    signed.headers.remove(AUTHORIZATION);
    let canonical = canonical_request(&signed)?;
    assert!(canonical.ends_with(&hex_sha256(b"")));

    let (_, _, _, signature) = parse_authorization(requests[0].headers[AUTHORIZATION].to_str()?);
    let expected = string_to_sign(SignatureAlgorithm::Default, canonical.as_bytes());
    assert!(verify(&cred, SignatureAlgorithm::Default, &expected, &signature));
    Ok(())
}

#[tokio::test]
async fn test_override_service_url() -> Result<()> {
    let endpoint = Endpoint::resolve(Region::Na, Some("https://localhost:8443/"))?;
    let cred = credential("SANDBOX-AHEGSJCM3Z").with_endpoint(endpoint);
    let mock = MockHttpSend::default();
    let client = Client::new(Context::new().with_http_send(mock.clone()), cred);

    client.api_call(ApiRequest::get("buyers/B01-1")).await?;

    let requests = mock.requests();
    assert_eq!(
        requests[0].uri.to_string(),
        "https://localhost:8443/v2/buyers/B01-1"
    );
    assert_eq!(requests[0].headers["x-amz-pay-host"], "localhost:8443");
    Ok(())
}
