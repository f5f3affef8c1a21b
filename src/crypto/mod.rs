//! Digest and signature algorithms and certificate hashes.
//!

pub use self::algorithm::{
    algorithm_id_for, digest, digest_algorithm_id_for, hex_digest,
    signature_algorithm_id_for, uri_for, AlgorithmId, AlgorithmKind,
    UnknownAlgorithm,
};
pub use self::certhash::CertHashAlgorithm;
pub use self::digest::{AlgorithmDescriptor, Digest, DigestAlgorithm};
pub use self::signature::{SignatureAlgorithm, SignMechanism};

pub mod algorithm;
pub mod certhash;
pub mod digest;
pub mod signature;
