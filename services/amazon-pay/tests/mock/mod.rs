use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use paysign_amazon_pay::{Credential, PrivateKey, Region, SignatureAlgorithm};
use paysign_core::hash::base64_decode;
use paysign_core::{Error, HttpSend, Result};
use rsa::pss::{Signature, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::Verifier;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

pub const PEM: &str = include_str!("../testdata/private_key.pem");
pub const PEM_PKCS1: &str = include_str!("../testdata/private_key_pkcs1.pem");

/// Reply of a single mocked attempt.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, &'static str),
    Transport,
}

/// Request as received by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<Reply>,
    requests: Vec<Recorded>,
    times: Vec<Instant>,
}

/// HttpSend that answers from a queue and records what it was sent.
///
/// Once the queue is drained every request gets `200 {}`.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        let state = State {
            replies: replies.into_iter().collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn statuses(statuses: &[u16]) -> Self {
        Self::new(statuses.iter().map(|s| Reply::Status(*s, "{}")))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.state.lock().unwrap().times.clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            let (parts, body) = req.into_parts();
            state.requests.push(Recorded {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });
            state.times.push(Instant::now());
            state.replies.pop_front()
        };

        match reply.unwrap_or(Reply::Status(200, "{}")) {
            Reply::Status(status, body) => Ok(http::Response::builder()
                .status(StatusCode::from_u16(status).unwrap())
                .body(Bytes::from_static(body.as_bytes()))
                .unwrap()),
            Reply::Transport => Err(Error::transport("connection reset by peer")),
        }
    }
}

pub fn credential(public_key_id: &str) -> Credential {
    Credential::new(public_key_id, PrivateKey::from_pem(PEM).unwrap(), Region::Na)
}

/// Verify a base64 signature over `message` with the credential's public key.
pub fn verify(
    cred: &Credential,
    algorithm: SignatureAlgorithm,
    message: &str,
    signature: &str,
) -> bool {
    let key = VerifyingKey::<Sha256>::new_with_salt_len(
        cred.private_key().public_key(),
        algorithm.salt_length(),
    );
    let Ok(bytes) = base64_decode(signature) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
        return false;
    };
    key.verify(message.as_bytes(), &signature).is_ok()
}

/// Split an authorization header into its fields.
pub fn parse_authorization(value: &str) -> (String, String, String, String) {
    let (algorithm, rest) = value.split_once(' ').unwrap();
    let mut public_key_id = String::new();
    let mut signed_headers = String::new();
    let mut signature = String::new();
    for field in rest.split(", ") {
        let (k, v) = field.split_once('=').unwrap();
        match k {
            "PublicKeyId" => public_key_id = v.to_string(),
            "SignedHeaders" => signed_headers = v.to_string(),
            // Base64 may end with '=' padding, so only the first '=' splits.
            "Signature" => signature = v.to_string(),
            _ => panic!("unexpected authorization field: {k}"),
        }
    }
    (algorithm.to_string(), public_key_id, signed_headers, signature)
}
