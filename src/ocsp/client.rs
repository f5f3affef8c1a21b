//! Fetching OCSP responses by certificate hash.

use std::{error, fmt, io};
use std::convert::Infallible;
use std::net::Ipv6Addr;
use bcder::decode::DecodeError;
use log::{debug, warn};
use crate::crypto::CertHashAlgorithm;
use crate::util::hex;
use super::config::{MalformedPartPolicy, OcspClientConfig};
use super::multipart::{self, MultipartError, MultipartReader};
use super::response::OcspResponse;
use super::transport::{HttpRequest, Transport, TransportError};


/// The content type of parts carrying an OCSP response.
pub const OCSP_RESPONSE_TYPE: &str = "application/ocsp-response";

/// The content type requested from the responder.
pub const MULTIPART_RELATED: &str = "multipart/related";


//------------ HashOcspClient ------------------------------------------------

/// A client fetching OCSP responses from a hash-based OCSP responder.
///
/// The responder is asked for the responses of a batch of certificates
/// identified by their hashes in a single GET request of the form
/// `http://<address>:<port>/?cert=<hash>&cert=<hash>`. It replies with a
/// `multipart/related` body with one `application/ocsp-response` part per
/// certificate.
///
/// The client doesn’t retry. A failed request needs to be repeated by the
/// caller.
#[derive(Clone, Debug)]
pub struct HashOcspClient<T> {
    transport: T,
    config: OcspClientConfig,
}

impl<T> HashOcspClient<T> {
    pub fn new(transport: T, config: OcspClientConfig) -> Self {
        HashOcspClient { transport, config }
    }

    pub fn config(&self) -> &OcspClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the request URL for a responder and a set of hashes.
    ///
    /// IPv6 address literals are placed in brackets. Each hash must be a
    /// non-empty string of hex digits.
    pub fn request_url<S: AsRef<str>>(
        &self, provider_address: &str, cert_hashes: &[S]
    ) -> Result<String, OcspClientError> {
        let mut url = if provider_address.parse::<Ipv6Addr>().is_ok() {
            format!("http://[{}]:{}/", provider_address, self.config.port())
        }
        else {
            format!("http://{}:{}/", provider_address, self.config.port())
        };
        for (idx, hash) in cert_hashes.iter().enumerate() {
            let hash = hash.as_ref();
            if !hex::is_hex(hash) {
                return Err(OcspClientError::InvalidCertHash(hash.into()))
            }
            url.push_str(if idx == 0 { "?cert=" } else { "&cert=" });
            url.push_str(hash);
        }
        Ok(url)
    }
}

impl<T: Transport> HashOcspClient<T> {
    /// Fetches the responses for the certificates with the given hashes.
    ///
    /// The responses are returned in the order they appear in the
    /// response body. Parts of other types are skipped. If there are no
    /// hashes, no request is made and the result is empty.
    pub fn fetch_responses<S: AsRef<str>>(
        &self, provider_address: &str, cert_hashes: &[S]
    ) -> Result<Vec<OcspResponse>, OcspClientError> {
        if cert_hashes.is_empty() {
            return Ok(Vec::new())
        }
        let request = HttpRequest {
            url: self.request_url(provider_address, cert_hashes)?,
            headers: vec![("Accept".into(), MULTIPART_RELATED.into())],
            connect_timeout: self.config.connect_timeout(),
            read_timeout: self.config.read_timeout(),
        };
        debug!(
            "Requesting {} OCSP responses from {}",
            cert_hashes.len(), request.url
        );
        let response = self.transport.get(&request)?;
        if !response.is_success() {
            warn!(
                "OCSP responder {} returned status {}",
                provider_address, response.status
            );
            return Err(OcspClientError::UnexpectedHttpStatus {
                status: response.status,
                message: response.reason.unwrap_or_default(),
            })
        }
        let boundary = response.content_type.as_deref().and_then(
            multipart::boundary
        ).ok_or(OcspClientError::MalformedMimeStream(
            MultipartError::Malformed("not a multipart content type")
        ))?;
        let reader = MultipartReader::new(
            io::BufReader::new(response.body), &boundary
        ).with_max_part_size(self.config.max_part_size());
        self.read_responses(reader)
    }

    /// Fetches the responses for a set of DER-encoded certificates.
    pub fn fetch_for_certificates<C: AsRef<[u8]>>(
        &self,
        provider_address: &str,
        certs: &[C],
        algorithm: CertHashAlgorithm,
    ) -> Result<Vec<OcspResponse>, OcspClientError> {
        let hashes = algorithm.hex_hashes(certs);
        self.fetch_responses(provider_address, &hashes)
    }

    fn read_responses<R: io::BufRead>(
        &self, mut reader: MultipartReader<R>
    ) -> Result<Vec<OcspResponse>, OcspClientError> {
        let mut res = Vec::new();
        let mut index = 0;
        while let Some(headers) = reader.next_part()? {
            if !headers.has_media_type(OCSP_RESPONSE_TYPE) {
                debug!(
                    "Skipping part {} of type {}",
                    index, headers.content_type().unwrap_or("text/plain")
                );
                reader.skip_body()?;
                index += 1;
                continue
            }
            let body = reader.read_body()?;
            match OcspResponse::decode(body) {
                Ok(response) => res.push(response),
                Err(error) => {
                    match self.config.malformed_part_policy() {
                        MalformedPartPolicy::Fail => {
                            return Err(
                                OcspClientError::MalformedOcspResponse {
                                    index, error
                                }
                            )
                        }
                        MalformedPartPolicy::Skip => {
                            warn!(
                                "Skipping malformed OCSP response in \
                                 part {}: {}",
                                index, error
                            );
                        }
                    }
                }
            }
            index += 1;
        }
        Ok(res)
    }
}


//============ Errors ========================================================

//------------ OcspClientError -----------------------------------------------

/// Fetching OCSP responses failed.
#[derive(Debug)]
pub enum OcspClientError {
    /// The responder answered with a status other than success.
    UnexpectedHttpStatus {
        status: u16,
        message: String,
    },

    /// The request failed or reading the response body failed.
    Transport(TransportError),

    /// The response body was not a valid multipart body.
    MalformedMimeStream(MultipartError),

    /// A part could not be decoded as an OCSP response.
    ///
    /// The index is that of the part in the body, counting from zero.
    MalformedOcspResponse {
        index: usize,
        error: DecodeError<Infallible>,
    },

    /// A certificate hash was not a hex string.
    InvalidCertHash(String),
}

impl From<TransportError> for OcspClientError {
    fn from(err: TransportError) -> Self {
        OcspClientError::Transport(err)
    }
}

impl From<MultipartError> for OcspClientError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::Io(err) => {
                OcspClientError::Transport(TransportError::from(err))
            }
            err => OcspClientError::MalformedMimeStream(err)
        }
    }
}

impl fmt::Display for OcspClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OcspClientError::UnexpectedHttpStatus { status, ref message } => {
                write!(
                    f, "OCSP responder returned status {} {}", status, message
                )
            }
            OcspClientError::Transport(ref err) => {
                write!(f, "OCSP request failed: {}", err)
            }
            OcspClientError::MalformedMimeStream(ref err) => err.fmt(f),
            OcspClientError::MalformedOcspResponse { index, ref error } => {
                write!(f, "malformed OCSP response in part {}: {}", index, error)
            }
            OcspClientError::InvalidCertHash(ref hash) => {
                write!(f, "invalid certificate hash '{}'", hash)
            }
        }
    }
}

impl error::Error for OcspClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            OcspClientError::Transport(ref err) => Some(err),
            OcspClientError::MalformedMimeStream(ref err) => Some(err),
            OcspClientError::MalformedOcspResponse { ref error, .. } => {
                Some(error)
            }
            _ => None
        }
    }
}


//============ Tests =========================================================
