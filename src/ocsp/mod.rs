//! Retrieving OCSP responses from a hash-based responder.
//!
//! The responder delivers the responses for a whole batch of certificates
//! in one `multipart/related` HTTP response. The [`HashOcspClient`] builds
//! the request, sends it through a [`Transport`], and picks the OCSP
//! responses out of the body using the [`MultipartReader`].

//--- Re-exports
//
pub use self::client::{HashOcspClient, OcspClientError};
pub use self::config::{ConfigError, MalformedPartPolicy, OcspClientConfig};
pub use self::multipart::{BodyPart, MultipartError, MultipartReader};
pub use self::response::{OcspResponse, ResponseStatus};
pub use self::transport::{
    HttpRequest, HttpResponse, Transport, TransportError
};
#[cfg(feature = "http")]
pub use self::transport::ReqwestTransport;


//--- Modules
//
pub mod client;
pub mod config;
pub mod multipart;
pub mod response;
pub mod transport;
