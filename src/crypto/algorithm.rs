//! Looking up algorithms by their various identifiers.
//!
//! Algorithms are referred to by short identifiers such as `"SHA-256"` or
//! `"SHA256withRSA"` in configuration and by URIs in XML signatures. The
//! functions in this module translate between the two and between digest
//! and signature algorithms. They all operate on strings and fail with
//! [`UnknownAlgorithm`] if they can’t make sense of their input. The typed
//! equivalents live on [`DigestAlgorithm`] and [`SignatureAlgorithm`].

use std::{error, fmt, str};
use super::digest::{Digest, DigestAlgorithm};
use super::signature::{SignatureAlgorithm, SignMechanism};


//------------ AlgorithmId ---------------------------------------------------

/// Either a digest or a signature algorithm.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AlgorithmId {
    Digest(DigestAlgorithm),
    Signature(SignatureAlgorithm),
}

impl AlgorithmId {
    pub fn short_id(self) -> &'static str {
        match self {
            AlgorithmId::Digest(alg) => alg.short_id(),
            AlgorithmId::Signature(alg) => alg.short_id(),
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            AlgorithmId::Digest(alg) => alg.uri(),
            AlgorithmId::Signature(alg) => alg.uri(),
        }
    }

    /// Returns the algorithm identified by a URI.
    pub fn from_uri(uri: &str) -> Result<Self, UnknownAlgorithm> {
        if let Some(alg) = DigestAlgorithm::from_uri(uri) {
            Ok(AlgorithmId::Digest(alg))
        }
        else if let Some(alg) = SignatureAlgorithm::from_uri(uri) {
            Ok(AlgorithmId::Signature(alg))
        }
        else {
            Err(UnknownAlgorithm::new(AlgorithmKind::Uri, uri))
        }
    }
}

impl From<DigestAlgorithm> for AlgorithmId {
    fn from(alg: DigestAlgorithm) -> Self {
        AlgorithmId::Digest(alg)
    }
}

impl From<SignatureAlgorithm> for AlgorithmId {
    fn from(alg: SignatureAlgorithm) -> Self {
        AlgorithmId::Signature(alg)
    }
}

impl str::FromStr for AlgorithmId {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(alg) = s.parse() {
            Ok(AlgorithmId::Digest(alg))
        }
        else if let Ok(alg) = s.parse() {
            Ok(AlgorithmId::Signature(alg))
        }
        else {
            Err(UnknownAlgorithm::new(AlgorithmKind::Algorithm, s))
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.short_id())
    }
}


//------------ Lookup Functions ----------------------------------------------

/// Returns the short id of the digest used by a signature algorithm.
///
/// For instance, both `"SHA256withRSA"` and `"SHA256withRSAandMGF1"` map
/// to `"SHA-256"`.
pub fn digest_algorithm_id_for(
    signature_id: &str
) -> Result<&'static str, UnknownAlgorithm> {
    signature_id.parse::<SignatureAlgorithm>().map(|alg| {
        alg.digest_algorithm().short_id()
    })
}

/// Returns the short id of the signature algorithm for a digest.
///
/// The mechanism is given by its PKCS #11 name, e.g., `"CKM_RSA_PKCS"`.
pub fn signature_algorithm_id_for(
    digest_id: &str, mechanism: &str
) -> Result<&'static str, UnknownAlgorithm> {
    SignatureAlgorithm::for_digest(
        digest_id.parse()?, mechanism.parse()?
    ).map(SignatureAlgorithm::short_id)
}

/// Returns the short id of the digest or signature algorithm for a URI.
pub fn algorithm_id_for(uri: &str) -> Result<&'static str, UnknownAlgorithm> {
    AlgorithmId::from_uri(uri).map(AlgorithmId::short_id)
}

/// Returns the URI for a digest or signature algorithm short id.
pub fn uri_for(id: &str) -> Result<&'static str, UnknownAlgorithm> {
    id.parse::<AlgorithmId>().map(AlgorithmId::uri)
}

/// Calculates the digest of `data` with the digest given by its short id.
pub fn digest(digest_id: &str, data: &[u8]) -> Result<Digest, UnknownAlgorithm> {
    digest_id.parse::<DigestAlgorithm>().map(|alg| alg.digest(data))
}

/// Calculates a digest and returns it as a lowercase hex string.
pub fn hex_digest(
    digest_id: &str, data: &[u8]
) -> Result<String, UnknownAlgorithm> {
    digest(digest_id, data).map(|digest| digest.to_hex())
}


//============ Errors ========================================================

//------------ AlgorithmKind -------------------------------------------------

/// The kind of identifier that failed to resolve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlgorithmKind {
    /// A digest algorithm short id.
    Digest,

    /// A signature algorithm short id.
    Signature,

    /// The short id of either a digest or a signature algorithm.
    Algorithm,

    /// The name of a signing mechanism.
    Mechanism,

    /// An algorithm URI.
    Uri,

    /// A digest algorithm and signing mechanism without a signature
    /// algorithm.
    Combination,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            AlgorithmKind::Digest => "digest algorithm",
            AlgorithmKind::Signature => "signature algorithm",
            AlgorithmKind::Algorithm => "algorithm",
            AlgorithmKind::Mechanism => "signing mechanism",
            AlgorithmKind::Uri => "algorithm URI",
            AlgorithmKind::Combination => "signature algorithm for",
        })
    }
}


//------------ UnknownAlgorithm ----------------------------------------------

/// An algorithm identifier could not be resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownAlgorithm {
    kind: AlgorithmKind,
    input: String,
}

impl UnknownAlgorithm {
    pub(crate) fn new(kind: AlgorithmKind, input: impl Into<String>) -> Self {
        UnknownAlgorithm { kind, input: input.into() }
    }

    /// Returns what kind of identifier was expected.
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    /// Returns the offending input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unsupported {} '{}'", self.kind, self.input)
    }
}

impl error::Error for UnknownAlgorithm { }


//============ Tests =========================================================
