//! Digest algorithms and operations.

use std::{fmt, io, str};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use bcder::{encode, ConstOid, Mode};
use bcder::encode::{PrimitiveContent, Values};
use bytes::Bytes;
use log::trace;
use ring::digest;
use sha2::Digest as _;
use crate::oid;
use crate::util::hex;
use super::algorithm::{AlgorithmKind, UnknownAlgorithm};


//------------ DigestAlgorithm -----------------------------------------------

/// The digest algorithms known to the registry.
///
/// Each algorithm has a short identifier such as `"SHA-256"` which is used
/// for its `FromStr` and `Display` implementations, and a URI used to refer
/// to it in XML signatures.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DigestAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// All digest algorithms.
    pub const ALL: [Self; 5] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    /// Returns the short identifier of the algorithm.
    pub fn short_id(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Returns the URI identifying the algorithm in XML signatures.
    pub fn uri(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => {
                "http://www.w3.org/2000/09/xmldsig#sha1"
            }
            DigestAlgorithm::Sha224 => {
                "http://www.w3.org/2001/04/xmldsig-more#sha224"
            }
            DigestAlgorithm::Sha256 => {
                "http://www.w3.org/2001/04/xmlenc#sha256"
            }
            DigestAlgorithm::Sha384 => {
                "http://www.w3.org/2001/04/xmldsig-more#sha384"
            }
            DigestAlgorithm::Sha512 => {
                "http://www.w3.org/2001/04/xmlenc#sha512"
            }
        }
    }

    /// Returns the algorithm for a URI if there is one.
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|alg| alg.uri() == uri)
    }

    /// Returns the object identifier of the algorithm.
    pub fn oid(self) -> ConstOid {
        match self {
            DigestAlgorithm::Sha1 => oid::SHA1,
            DigestAlgorithm::Sha224 => oid::SHA224,
            DigestAlgorithm::Sha256 => oid::SHA256,
            DigestAlgorithm::Sha384 => oid::SHA384,
            DigestAlgorithm::Sha512 => oid::SHA512,
        }
    }

    /// Returns the length of a digest value in octets.
    pub fn digest_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha224 => 28,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    /// Returns the cached descriptor for the algorithm.
    pub fn descriptor(self) -> Arc<AlgorithmDescriptor> {
        AlgorithmDescriptor::cached(self)
    }
}


/// # Creating Digest Values
///
impl DigestAlgorithm {
    /// Returns the digest of `data` using this algorithm.
    pub fn digest(self, data: &[u8]) -> Digest {
        let mut context = self.start();
        context.update(data);
        context.finish()
    }

    /// Returns a digest context for multi-step calculation of the digest.
    pub fn start(self) -> Context {
        let state = match self {
            DigestAlgorithm::Sha1 => {
                State::Ring(digest::Context::new(
                    &digest::SHA1_FOR_LEGACY_USE_ONLY
                ))
            }
            DigestAlgorithm::Sha224 => State::Sha224(sha2::Sha224::new()),
            DigestAlgorithm::Sha256 => {
                State::Ring(digest::Context::new(&digest::SHA256))
            }
            DigestAlgorithm::Sha384 => {
                State::Ring(digest::Context::new(&digest::SHA384))
            }
            DigestAlgorithm::Sha512 => {
                State::Ring(digest::Context::new(&digest::SHA512))
            }
        };
        Context { algorithm: self, state }
    }
}


/// # ASN.1 Values
///
/// Digest algorithms appear in ASN.1 structures as algorithm identifiers:
///
/// ```txt
/// AlgorithmIdentifier        ::= SEQUENCE {
///      algorithm                 OBJECT IDENTIFIER,
///      parameters                ANY DEFINED BY algorithm OPTIONAL }
/// ```
///
/// [RFC 4055] allows the _parameters_ to be either absent or `NULL`. When
/// encoding, we always include the `NULL`.
///
/// [RFC 4055]: https://tools.ietf.org/html/rfc4055
impl DigestAlgorithm {
    /// Provides an encoder for the algorithm identifier.
    pub fn encode(self) -> impl encode::Values {
        encode::sequence((
            self.oid().encode(),
            ().encode(),
        ))
    }
}


//--- FromStr and Display

impl str::FromStr for DigestAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|alg| alg.short_id() == s).ok_or_else(
            || UnknownAlgorithm::new(AlgorithmKind::Digest, s)
        )
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.short_id())
    }
}


//------------ Digest --------------------------------------------------------

/// A digest value and the algorithm that produced it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    value: Bytes,
}

impl Digest {
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn as_slice(&self) -> &[u8] {
        self.value.as_ref()
    }

    pub fn into_bytes(self) -> Bytes {
        self.value
    }

    /// Returns the value as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode_lower(&self.value)
    }

    /// Returns the value as uppercase hex pairs joined by `delimiter`.
    pub fn to_delimited_hex(&self, delimiter: &str) -> String {
        hex::encode_delimited(&self.value, delimiter)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.value.as_ref()
    }
}


//------------ Context -------------------------------------------------------

/// The state of a multi-step digest calculation.
#[derive(Clone)]
pub struct Context {
    algorithm: DigestAlgorithm,
    state: State,
}

/// Ring doesn’t do SHA-224, so that one comes from the sha2 crate.
#[derive(Clone)]
enum State {
    Ring(digest::Context),
    Sha224(sha2::Sha224),
}

impl Context {
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn update(&mut self, data: &[u8]) {
        match self.state {
            State::Ring(ref mut context) => context.update(data),
            State::Sha224(ref mut context) => context.update(data),
        }
    }

    pub fn finish(self) -> Digest {
        let value = match self.state {
            State::Ring(context) => {
                Bytes::copy_from_slice(context.finish().as_ref())
            }
            State::Sha224(context) => {
                Bytes::copy_from_slice(context.finalize().as_slice())
            }
        };
        Digest { algorithm: self.algorithm, value }
    }
}

impl io::Write for Context {
    fn write(&mut self, buf: &[u8]) -> Result<usize, io::Error> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}


//------------ AlgorithmDescriptor -------------------------------------------

/// Everything needed to refer to a digest algorithm in various formats.
///
/// Descriptors are created on first use and then kept for the lifetime of
/// the process. Obtain them via [`AlgorithmDescriptor::lookup`] or
/// [`DigestAlgorithm::descriptor`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlgorithmDescriptor {
    algorithm: DigestAlgorithm,

    /// The DER encoded AlgorithmIdentifier with NULL parameters.
    identifier: Bytes,
}

type DescriptorCache = RwLock<HashMap<DigestAlgorithm, Arc<AlgorithmDescriptor>>>;

static DESCRIPTORS: OnceLock<DescriptorCache> = OnceLock::new();

impl AlgorithmDescriptor {
    /// Returns the descriptor for the digest with the given short id.
    pub fn lookup(short_id: &str) -> Result<Arc<Self>, UnknownAlgorithm> {
        short_id.parse().map(Self::cached)
    }

    /// Returns the descriptor from the cache, creating it if necessary.
    ///
    /// Descriptors never change, so a poisoned lock still holds good
    /// values. Two threads racing to create the same descriptor will
    /// produce identical values and the first one wins.
    fn cached(algorithm: DigestAlgorithm) -> Arc<Self> {
        let cache = DESCRIPTORS.get_or_init(Default::default);
        if let Some(desc) = cache.read().unwrap_or_else(
            PoisonError::into_inner
        ).get(&algorithm) {
            return desc.clone()
        }
        let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.entry(algorithm).or_insert_with(|| {
            trace!("Creating algorithm descriptor for {}.", algorithm);
            Arc::new(Self::new(algorithm))
        }).clone()
    }

    fn new(algorithm: DigestAlgorithm) -> Self {
        AlgorithmDescriptor {
            algorithm,
            identifier: algorithm.encode().to_captured(Mode::Der).into_bytes(),
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn short_id(&self) -> &'static str {
        self.algorithm.short_id()
    }

    pub fn uri(&self) -> &'static str {
        self.algorithm.uri()
    }

    /// Returns the DER encoded AlgorithmIdentifier.
    pub fn algorithm_identifier(&self) -> &[u8] {
        self.identifier.as_ref()
    }

    pub fn digest_len(&self) -> usize {
        self.algorithm.digest_len()
    }
}


//============ Tests =========================================================
