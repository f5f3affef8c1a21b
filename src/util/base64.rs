//! Handling of Base 64-encoded data.
//!
//! Certificates are exchanged either as raw DER or in the PEM text format
//! defined in [RFC 7468], which wraps the Base 64-encoded DER between
//! armor lines. The [`Pem`] flavor deals with the latter.
//!
//! [RFC 7468]: https://tools.ietf.org/html/rfc7468
use std::{error, fmt};
use base64::Engine;
use base64::engine::general_purpose::{GeneralPurpose, STANDARD};

pub use base64::DecodeError;


//------------ Pem -----------------------------------------------------------

/// The flavor used inside PEM armor.
///
/// This uses the standard alphabet with padding. White space between the
/// armor lines is ignored during decoding.
pub struct Pem;

impl Pem {
    const ENGINE: GeneralPurpose = STANDARD;

    /// Returns whether the data looks like PEM rather than DER.
    ///
    /// The armor may be preceded by arbitrary text, such as the output of
    /// `openssl x509 -text`.
    pub fn is_pem(data: &[u8]) -> bool {
        data.windows(11).any(|window| window == b"-----BEGIN ")
    }

    /// Decodes the first PEM block labeled `label`.
    pub fn decode_block(
        self, data: &[u8], label: &str
    ) -> Result<Vec<u8>, PemError> {
        let text = std::str::from_utf8(data).map_err(|_| PemError::NotText)?;
        let begin = format!("-----BEGIN {}-----", label);
        let end = format!("-----END {}-----", label);
        let start = text.find(&begin).ok_or(PemError::MissingBegin)?;
        let body = &text[start + begin.len()..];
        let stop = body.find(&end).ok_or(PemError::MissingEnd)?;
        let b64: String = body[..stop].chars().filter(|ch| {
            !ch.is_ascii_whitespace()
        }).collect();
        Self::ENGINE.decode(b64).map_err(PemError::Base64)
    }

    pub fn encode(self, data: &[u8]) -> String {
        Self::ENGINE.encode(data)
    }
}


//------------ PemError ------------------------------------------------------

/// Decoding a PEM block failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PemError {
    NotText,
    MissingBegin,
    MissingEnd,
    Base64(DecodeError),
}

impl fmt::Display for PemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PemError::NotText => f.write_str("PEM data is not valid text"),
            PemError::MissingBegin => f.write_str("missing PEM begin line"),
            PemError::MissingEnd => f.write_str("missing PEM end line"),
            PemError::Base64(ref err) => {
                write!(f, "invalid Base 64 in PEM block: {}", err)
            }
        }
    }
}

impl error::Error for PemError { }


//============ Tests =========================================================
