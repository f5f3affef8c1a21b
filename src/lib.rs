//! Certificate-based trust resolution.
//!
//! Peers of a data exchange security server identify themselves through
//! X.509 certificates. This crate provides what is necessary to decide who
//! a peer is and whether its certificate is still good:
//!
//! * [`name`] decodes the distinguished names of certificates and reads
//!   their attributes,
//! * [`identity`] derives the structured client identifier from the
//!   subject name following the conventions of the issuing jurisdiction,
//! * [`crypto`] maps between the identifiers of digest and signature
//!   algorithms and calculates certificate hashes, and
//! * [`ocsp`] fetches the OCSP responses for a batch of certificates from
//!   a hash-based OCSP responder.
//!
//! The crate has two optional features. The `http` feature enables an
//! HTTP transport for the OCSP client based on reqwest. The `serde`
//! feature enables serialization of client identifiers and of the OCSP
//! client configuration.
//!
//! The crate logs through the `log` crate but doesn’t install a logger.

pub mod crypto;
pub mod identity;
pub mod name;
pub mod ocsp;
pub mod oid;
pub mod util;
