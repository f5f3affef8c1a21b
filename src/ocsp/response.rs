//! OCSP responses.
//!
//! Only the outer structure of a response is decoded. The signed response
//! data inside the response bytes is kept as is and its signature is not
//! verified.

use std::fmt;
use std::convert::Infallible;
use bcder::{decode, Mode, Oid, Tag};
use bcder::decode::DecodeError;
use bytes::Bytes;
use crate::oid;


//------------ OcspResponse --------------------------------------------------

/// A single OCSP response.
///
/// ```txt
/// OCSPResponse ::= SEQUENCE {
///     responseStatus         OCSPResponseStatus,
///     responseBytes          [0] EXPLICIT ResponseBytes OPTIONAL }
///
/// ResponseBytes ::=       SEQUENCE {
///     responseType   OBJECT IDENTIFIER,
///     response       OCTET STRING }
/// ```
///
/// See [RFC 6960] for details.
///
/// [RFC 6960]: https://tools.ietf.org/html/rfc6960
#[derive(Clone, Debug)]
pub struct OcspResponse {
    /// The complete DER encoding of the response.
    raw: Bytes,

    status: ResponseStatus,

    response_bytes: Option<ResponseBytes>,
}

impl OcspResponse {
    /// Decodes a DER-encoded response.
    pub fn decode(raw: Bytes) -> Result<Self, DecodeError<Infallible>> {
        let (status, response_bytes) = Mode::Der.decode(
            raw.clone(), Self::take_content_from
        )?;
        Ok(OcspResponse { raw, status, response_bytes })
    }

    fn take_content_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<(ResponseStatus, Option<ResponseBytes>), DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let status = cons.take_primitive_if(Tag::ENUMERATED, |prim| {
                let value = prim.to_u8()?;
                ResponseStatus::from_u8(value).ok_or_else(|| {
                    prim.content_err("invalid OCSP response status")
                })
            })?;
            let response_bytes = cons.take_opt_constructed_if(
                Tag::CTX_0, |cons| cons.take_sequence(|cons| {
                    let response_type = Oid::take_from(cons)?;
                    let response = cons.take_primitive_if(
                        Tag::OCTET_STRING, |prim| prim.take_all()
                    )?;
                    Ok(ResponseBytes { response_type, response })
                })
            )?;
            Ok((status, response_bytes))
        })
    }

    /// Returns the complete DER encoding.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn into_raw(self) -> Bytes {
        self.raw
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    pub fn response_bytes(&self) -> Option<&ResponseBytes> {
        self.response_bytes.as_ref()
    }
}

impl PartialEq for OcspResponse {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for OcspResponse { }


//------------ ResponseBytes -------------------------------------------------

/// The typed content of a response.
#[derive(Clone, Debug)]
pub struct ResponseBytes {
    response_type: Oid<Bytes>,
    response: Bytes,
}

impl ResponseBytes {
    pub fn response_type(&self) -> &Oid<Bytes> {
        &self.response_type
    }

    /// Returns whether this is a basic OCSP response.
    pub fn is_basic(&self) -> bool {
        self.response_type == oid::PKIX_OCSP_BASIC
    }

    /// Returns the content of the response octet string.
    pub fn response(&self) -> &Bytes {
        &self.response
    }
}


//------------ ResponseStatus ------------------------------------------------

/// The status of an OCSP response.
///
/// Value 4 is not used.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResponseStatus {
    Successful,
    MalformedRequest,
    InternalError,
    TryLater,
    SigRequired,
    Unauthorized,
}

impl ResponseStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ResponseStatus::Successful),
            1 => Some(ResponseStatus::MalformedRequest),
            2 => Some(ResponseStatus::InternalError),
            3 => Some(ResponseStatus::TryLater),
            5 => Some(ResponseStatus::SigRequired),
            6 => Some(ResponseStatus::Unauthorized),
            _ => None
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ResponseStatus::Successful => 0,
            ResponseStatus::MalformedRequest => 1,
            ResponseStatus::InternalError => 2,
            ResponseStatus::TryLater => 3,
            ResponseStatus::SigRequired => 5,
            ResponseStatus::Unauthorized => 6,
        }
    }

    pub fn is_successful(self) -> bool {
        matches!(self, ResponseStatus::Successful)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            ResponseStatus::Successful => "successful",
            ResponseStatus::MalformedRequest => "malformedRequest",
            ResponseStatus::InternalError => "internalError",
            ResponseStatus::TryLater => "tryLater",
            ResponseStatus::SigRequired => "sigRequired",
            ResponseStatus::Unauthorized => "unauthorized",
        })
    }
}


//============ Tests =========================================================
