//! Real HTTP transport against an in-process stub server
//!
//! Each stub accepts one connection, captures the raw request and replies
//! with a canned status and body.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clinical_ner::annotate::{AnnotateError, AnnotationClient, SyncTransport, UreqTransport};
use clinical_ner::annotate::AnnotationRequest;
use clinical_ner::config::{KeyPlacement, ServiceConfig};

/// What the stub saw
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn form(&self) -> Vec<(String, String)> {
        decode_pairs(&self.body)
    }

    fn form_value(&self, name: &str) -> Option<String> {
        self.form().into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn query_value(&self, name: &str) -> Option<String> {
        let target = self.request_line.split_whitespace().nth(1)?;
        let query = target.split_once('?')?.1;
        decode_pairs(query)
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect()
}

fn read_request(stream: &mut TcpStream) -> Captured {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse::<usize>().unwrap())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    Captured {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

/// Serve one request with `status` and `body`; returns the endpoint URL
fn serve_once(status: u16, reason: &str, body: &str) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/annotate", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();
    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&mut stream);
        stream.write_all(reply.as_bytes()).unwrap();
        stream.flush().unwrap();
        let _ = tx.send(captured);
    });

    (url, rx)
}

fn request_for(url: &str, placement: KeyPlacement, text: &str) -> AnnotationRequest {
    let config = ServiceConfig::new(url, "stub-key").with_key_placement(placement);
    AnnotationRequest::build(&config, "stub-key", text)
}

const ONE_RESULT: &str = r#"[{"matchedtext":"fever","start":8,"length":5,"evlist":[{"conceptinfo":{"cui":"C0015967","preferredname":"Fever","semantictypes":["sosy"]}}]}]"#;

#[test]
fn test_posts_form_fields_and_returns_body() {
    let (url, rx) = serve_once(200, "OK", ONE_RESULT);
    let transport = UreqTransport::with_timeout(5);
    let text = "Patient fever & chills, 38.5°C";

    let body = transport
        .post_form(&request_for(&url, KeyPlacement::Body, text))
        .unwrap();
    assert_eq!(body, ONE_RESULT);

    let seen = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(seen.request_line.starts_with("POST /annotate"));
    assert!(seen
        .header("content-type")
        .unwrap()
        .starts_with("application/x-www-form-urlencoded"));
    assert_eq!(seen.header("accept"), Some("application/json"));
    assert_eq!(seen.form_value("inputtext").as_deref(), Some(text));
    assert_eq!(seen.form_value("docformat").as_deref(), Some("freetext"));
    assert_eq!(seen.form_value("resultformat").as_deref(), Some("json"));
    assert_eq!(seen.form_value("apiKey").as_deref(), Some("stub-key"));
    assert_eq!(seen.query_value("apiKey"), None);
}

#[test]
fn test_key_in_query_string() {
    let (url, rx) = serve_once(200, "OK", "[]");
    let transport = UreqTransport::with_timeout(5);

    transport
        .post_form(&request_for(&url, KeyPlacement::Query, "cough"))
        .unwrap();

    let seen = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(seen.query_value("apiKey").as_deref(), Some("stub-key"));
    assert_eq!(seen.form_value("apiKey"), None);
    assert_eq!(seen.form_value("inputtext").as_deref(), Some("cough"));
}

#[test]
fn test_server_error_maps_to_service() {
    for (status, reason) in [(500u16, "Internal Server Error"), (404, "Not Found")] {
        let (url, _rx) = serve_once(status, reason, "oops");
        let transport = UreqTransport::with_timeout(5);

        let err = transport
            .post_form(&request_for(&url, KeyPlacement::Body, "fever"))
            .unwrap_err();
        match err {
            AnnotateError::Service { status: got, .. } => assert_eq!(got, status),
            other => panic!("expected service error, got {:?}", other),
        }
    }
}

#[test]
fn test_connection_refused_maps_to_transport() {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/annotate", listener.local_addr().unwrap())
    };
    let transport = UreqTransport::with_timeout(5);

    let err = transport
        .post_form(&request_for(&url, KeyPlacement::Body, "fever"))
        .unwrap_err();
    assert!(matches!(err, AnnotateError::Transport(_)), "{:?}", err);
}

#[test]
fn test_transport_error_never_carries_query_key() {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/annotate", listener.local_addr().unwrap())
    };
    let config = ServiceConfig::new(&url, "SECRET-KEY-123")
        .with_key_placement(KeyPlacement::Query)
        .with_timeout_secs(5);
    let client = AnnotationClient::from_config(config).unwrap();

    let err = client.annotate("fever").unwrap_err();
    assert!(matches!(err, AnnotateError::Transport(_)), "{:?}", err);
    for shown in [err.user_message(), err.to_string(), format!("{:?}", err)] {
        assert!(!shown.contains("SECRET-KEY-123"), "key leaked: {}", shown);
        assert!(!shown.contains("apiKey"), "query leaked: {}", shown);
    }
    // The cause is still reported
    let message = err.user_message().to_lowercase();
    assert!(message.contains("connect"), "{}", message);
}

#[test]
fn test_silent_server_times_out_as_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/annotate", listener.local_addr().unwrap());
    thread::spawn(move || {
        // Accept, read nothing useful, never answer
        let (_stream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_secs(5));
    });

    let transport = UreqTransport::with_timeout(1);
    let err = transport
        .post_form(&request_for(&url, KeyPlacement::Body, "fever"))
        .unwrap_err();
    assert!(matches!(err, AnnotateError::Transport(_)), "{:?}", err);
}

#[test]
fn test_client_end_to_end_over_http() {
    let (url, rx) = serve_once(200, "OK", ONE_RESULT);
    let config = ServiceConfig::new(&url, "stub-key").with_timeout_secs(5);
    let client = AnnotationClient::from_config(config).unwrap();

    let results = client.annotate("Patient fever").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].matched_text, "fever");
    assert_eq!(results[0].evidence[0].concept_info.cui, "C0015967");

    let seen = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(seen.form_value("inputtext").as_deref(), Some("Patient fever"));
}

#[test]
fn test_client_rejects_html_error_page() {
    let (url, _rx) = serve_once(200, "OK", "<html><body>maintenance</body></html>");
    let client =
        AnnotationClient::from_config(ServiceConfig::new(&url, "stub-key").with_timeout_secs(5))
            .unwrap();

    let err = client.annotate("fever").unwrap_err();
    assert!(matches!(err, AnnotateError::Parse(_)), "{:?}", err);
}
