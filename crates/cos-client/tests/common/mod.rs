//! Shared helpers for the HTTP-level tests: a multipart reader and a fake
//! slice-upload endpoint.

#![allow(dead_code)]

use cos_client::{AuthToken, Config, CosClient, Credentials, FixedNonce};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::{Request, Respond, ResponseTemplate};

pub const APP_ID: &str = "200001";
pub const BUCKET: &str = "newbucket";
pub const SERVER_SESSION: &str = "srv-session-1";
pub const PUBLIC_URL: &str = "http://newbucket-200001.file.myqcloud.com/big.bin";

pub fn client(uri: &str) -> CosClient {
    CosClient::with_nonce_source(
        Credentials::new(APP_ID, "AKIDtest", "secret-key"),
        Config::new(format!("{uri}/files/v1")),
        Arc::new(FixedNonce(11162)),
    )
    .unwrap()
}

/// URL path of a resource under the test bucket
pub fn url_path(path: &str) -> String {
    format!("/files/v1/{APP_ID}/{BUCKET}/{path}")
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 0,
        "message": "SUCCESS",
        "data": data,
    }))
}

pub fn failure(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": code, "message": message}))
}

/// Signed payload carried in the request's Authorization header
pub fn auth_payload(request: &Request) -> String {
    let header = request
        .headers
        .get("authorization")
        .expect("request is signed")
        .to_str()
        .unwrap();
    AuthToken::from_encoded(header).payload().expect("token decodes")
}

/// A decoded multipart/form-data body
#[derive(Debug, Default)]
pub struct Form {
    pub fields: HashMap<String, String>,
    pub content: Option<Vec<u8>>,
    /// Content-Disposition of the file part
    pub content_disposition: Option<String>,
}

impl Form {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

pub fn parse_form(request: &Request) -> Form {
    let content_type = request
        .headers
        .get("content-type")
        .expect("multipart content type")
        .to_str()
        .unwrap();
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .expect("multipart boundary")
        .trim_matches('"');
    let delimiter = format!("--{boundary}");

    let mut form = Form::default();
    for part in split(&request.body, delimiter.as_bytes()) {
        let Some(header_end) = find(part, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&part[..header_end]);
        let Some(name) = headers
            .split("name=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
        else {
            continue;
        };

        let mut value = &part[header_end + 4..];
        if value.ends_with(b"\r\n") {
            value = &value[..value.len() - 2];
        }

        if name == "filecontent" {
            let disposition = headers
                .lines()
                .find(|line| line.to_ascii_lowercase().starts_with("content-disposition:"))
                .unwrap_or_default()
                .to_string();
            assert!(
                disposition.contains(r#"filename="""#),
                "file content must go out as a file part: {disposition:?}"
            );
            form.content = Some(value.to_vec());
            form.content_disposition = Some(disposition);
        } else {
            form.fields
                .insert(name.to_string(), String::from_utf8_lossy(value).into_owned());
        }
    }
    form
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn split<'a>(body: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut rest = body;
    while let Some(pos) = find(rest, delimiter) {
        parts.push(&rest[..pos]);
        rest = &rest[pos + delimiter.len()..];
    }
    parts.push(rest);
    parts
}

/// How the fake endpoint misbehaves, if at all
#[derive(Clone, Debug, Default)]
pub struct Behavior {
    /// The content is already stored: complete on negotiation
    pub already_present: bool,
    /// Offset returned by negotiation, for resumed uploads
    pub resume_offset: u64,
    /// Slice size the server asks for, 0 to accept the client's
    pub server_slice_size: u64,
    /// Reply to this chunk (0-based) with a different session
    pub corrupt_session_at: Option<usize>,
    /// Reply to this chunk (0-based) with an error envelope
    pub fail_at: Option<usize>,
    /// Never report completion
    pub never_complete: bool,
}

/// One chunk as the server saw it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub offset: u64,
    pub len: usize,
    pub session: String,
    pub sha_matches: bool,
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub negotiation: Option<HashMap<String, String>>,
    pub chunks: Vec<Chunk>,
    pub chunk_fields: Vec<HashMap<String, String>>,
}

/// Fake `upload_slice` endpoint tracking offsets the way the service does
#[derive(Clone, Default)]
pub struct FakeSliceServer {
    pub behavior: Behavior,
    pub recorded: Arc<Mutex<Recorded>>,
    filesize: Arc<Mutex<u64>>,
}

impl FakeSliceServer {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }

    pub fn chunks(&self) -> Vec<Chunk> {
        self.recorded.lock().unwrap().chunks.clone()
    }

    pub fn negotiation(&self) -> HashMap<String, String> {
        self.recorded
            .lock()
            .unwrap()
            .negotiation
            .clone()
            .expect("negotiation happened")
    }

    fn complete(&self) -> Value {
        json!({
            "access_url": PUBLIC_URL,
            "resource_path": format!("/{APP_ID}/{BUCKET}/big.bin"),
            "source_url": PUBLIC_URL,
            "url": PUBLIC_URL,
        })
    }
}

impl Respond for FakeSliceServer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let form = parse_form(request);
        if form.field("op") != Some("upload_slice") {
            return failure(-1, "unexpected op");
        }

        let mut recorded = self.recorded.lock().unwrap();

        if let Some(filesize) = form.field("filesize") {
            *self.filesize.lock().unwrap() = filesize.parse().unwrap();
            recorded.negotiation = Some(form.fields.clone());

            if self.behavior.already_present {
                return success(self.complete());
            }
            return success(json!({
                "session": SERVER_SESSION,
                "offset": self.behavior.resume_offset,
                "slice_size": self.behavior.server_slice_size,
            }));
        }

        let content = form.content.clone().unwrap_or_default();
        let offset: u64 = form.field("offset").unwrap().parse().unwrap();
        let session = form.field("session").unwrap_or_default().to_string();
        let index = recorded.chunks.len();

        recorded.chunks.push(Chunk {
            offset,
            len: content.len(),
            session: session.clone(),
            sha_matches: form.field("sha") == Some(cos_auth::sha1_hex(&content).as_str()),
        });
        recorded.chunk_fields.push(form.fields.clone());

        if self.behavior.fail_at == Some(index) {
            return failure(-4018, "slice upload failed");
        }
        if self.behavior.corrupt_session_at == Some(index) {
            return success(json!({"session": "some-other-session", "offset": offset}));
        }

        let next = offset + content.len() as u64;
        if next >= *self.filesize.lock().unwrap() && !self.behavior.never_complete {
            let mut done = self.complete();
            done["offset"] = json!(next);
            done["session"] = json!(session);
            return success(done);
        }
        success(json!({"session": session, "offset": next}))
    }
}

/// Deterministic test content that never contains a multipart delimiter
pub fn content(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}
