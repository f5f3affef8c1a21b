//! The OCSP client over slow and failing transports.

use std::io;
use xroad_trust::ocsp::{
    HashOcspClient, HttpRequest, HttpResponse, OcspClientConfig,
    OcspClientError, ResponseStatus, Transport, TransportError,
};


/// A reader handing out its data a few octets at a time.
///
/// Fails with the given error kind once the data is exhausted, if any.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    fail: Option<io::ErrorKind>,
}

impl io::Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() {
            return match self.fail {
                Some(kind) => Err(io::Error::new(kind, "trickle")),
                None => Ok(0)
            }
        }
        let len = buf.len().min(3).min(self.data.len() - self.pos);
        buf[..len].copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(len)
    }
}

struct TrickleTransport {
    body: Vec<u8>,
    fail: Option<io::ErrorKind>,
}

impl Transport for TrickleTransport {
    fn get(
        &self, _request: &HttpRequest
    ) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            reason: None,
            content_type: Some(
                "multipart/related; type=\"application/ocsp-response\"; \
                 boundary=\"=_batch\"".into()
            ),
            body: Box::new(Trickle {
                data: self.body.clone(), pos: 0, fail: self.fail
            }),
        })
    }
}

struct RefusingTransport;

impl Transport for RefusingTransport {
    fn get(
        &self, _request: &HttpRequest
    ) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Connect("connection refused".into()))
    }
}

fn batch(count: u8) -> Vec<u8> {
    let mut body = Vec::new();
    for idx in 0..count {
        body.extend_from_slice(b"--=_batch\r\n");
        if idx % 2 == 1 {
            body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
            body.extend_from_slice(b"filler\r\n");
        }
        body.extend_from_slice(b"--=_batch\r\n");
        body.extend_from_slice(b"Content-Type: application/ocsp-response\r\n");
        body.extend_from_slice(b"Content-Transfer-Encoding: binary\r\n\r\n");
        body.extend_from_slice(&[0x30, 0x03, 0x0a, 0x01, idx % 4]);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(b"--=_batch--\r\n");
    body
}

#[test]
fn many_parts_in_small_reads() {
    let client = HashOcspClient::new(
        TrickleTransport { body: batch(20), fail: None },
        OcspClientConfig::default()
    );
    let res = client.fetch_responses("10.0.0.1", &["00ff"]).unwrap();
    assert_eq!(res.len(), 20);
    assert_eq!(res[0].status(), ResponseStatus::Successful);
    assert_eq!(res[3].status(), ResponseStatus::TryLater);
}

#[test]
fn body_read_timeout() {
    let mut body = batch(2);
    body.truncate(body.len() - 14);
    let client = HashOcspClient::new(
        TrickleTransport { body, fail: Some(io::ErrorKind::TimedOut) },
        OcspClientConfig::default()
    );
    assert!(matches!(
        client.fetch_responses("10.0.0.1", &["00ff"]),
        Err(OcspClientError::Transport(TransportError::Timeout))
    ));
}

#[test]
fn connect_failure() {
    let client = HashOcspClient::new(
        RefusingTransport, OcspClientConfig::default()
    );
    assert!(matches!(
        client.fetch_responses("10.0.0.1", &["00ff"]),
        Err(OcspClientError::Transport(TransportError::Connect(_)))
    ));
}

#[test]
fn truncated_stream() {
    let mut body = batch(2);
    body.truncate(body.len() - 14);
    let client = HashOcspClient::new(
        TrickleTransport { body, fail: None },
        OcspClientConfig::default()
    );
    assert!(matches!(
        client.fetch_responses("10.0.0.1", &["00ff"]),
        Err(OcspClientError::MalformedMimeStream(_))
    ));
}
