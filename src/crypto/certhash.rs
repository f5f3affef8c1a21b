//! Hashes identifying certificates.
//!
//! Certificates are identified towards the OCSP responder and in
//! configuration by the hash over their complete DER encoding. The hash is
//! SHA-256. SHA-1 hashes are still supported for talking to old responders
//! but only when explicitly asked for.

use super::digest::{Digest, DigestAlgorithm};


//------------ CertHashAlgorithm ---------------------------------------------

/// The algorithm used for hashing certificates.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CertHashAlgorithm {
    #[default]
    Sha256,

    /// SHA-1 for responders that don’t understand anything else.
    LegacySha1,
}

impl CertHashAlgorithm {
    pub fn digest_algorithm(self) -> DigestAlgorithm {
        match self {
            CertHashAlgorithm::Sha256 => DigestAlgorithm::Sha256,
            CertHashAlgorithm::LegacySha1 => DigestAlgorithm::Sha1,
        }
    }

    pub fn hash(self, der: &[u8]) -> Digest {
        self.digest_algorithm().digest(der)
    }

    /// Returns the lowercase hex hash of a certificate.
    pub fn hex_hash(self, der: &[u8]) -> String {
        self.hash(der).to_hex()
    }

    /// Returns the lowercase hex hashes of a sequence of certificates.
    pub fn hex_hashes<I>(self, certs: I) -> Vec<String>
    where I: IntoIterator, I::Item: AsRef<[u8]> {
        certs.into_iter().map(|der| self.hex_hash(der.as_ref())).collect()
    }
}


//------------ SHA-256 -------------------------------------------------------

/// Returns the SHA-256 hash of a DER-encoded certificate.
pub fn cert_hash(der: &[u8]) -> Digest {
    CertHashAlgorithm::Sha256.hash(der)
}

/// Returns the SHA-256 hash of a certificate as a lowercase hex string.
pub fn cert_hex_hash(der: &[u8]) -> String {
    CertHashAlgorithm::Sha256.hex_hash(der)
}

/// Returns the SHA-256 hash of a certificate as delimited uppercase hex.
///
/// With a delimiter of `":"` this is the format used when showing hashes
/// to humans.
pub fn cert_hex_hash_delimited(der: &[u8], delimiter: &str) -> String {
    cert_hash(der).to_delimited_hex(delimiter)
}

/// Returns the SHA-256 hex hashes of a sequence of certificates.
pub fn cert_hex_hashes<I>(certs: I) -> Vec<String>
where I: IntoIterator, I::Item: AsRef<[u8]> {
    CertHashAlgorithm::Sha256.hex_hashes(certs)
}

/// Returns the hash of a configuration anchor.
///
/// This is SHA-224 over the anchor’s bytes as colon-delimited uppercase
/// hex.
pub fn anchor_hash_delimited(data: &[u8]) -> String {
    DigestAlgorithm::Sha224.digest(data).to_delimited_hex(":")
}


//------------ SHA-1 ---------------------------------------------------------

#[deprecated(note = "use cert_hash or CertHashAlgorithm::LegacySha1")]
pub fn cert_sha1_hash(der: &[u8]) -> Digest {
    CertHashAlgorithm::LegacySha1.hash(der)
}

#[deprecated(note = "use cert_hex_hash or CertHashAlgorithm::LegacySha1")]
pub fn cert_sha1_hex_hash(der: &[u8]) -> String {
    CertHashAlgorithm::LegacySha1.hex_hash(der)
}

#[deprecated(note = "use cert_hex_hashes or CertHashAlgorithm::LegacySha1")]
pub fn cert_sha1_hex_hashes<I>(certs: I) -> Vec<String>
where I: IntoIterator, I::Item: AsRef<[u8]> {
    CertHashAlgorithm::LegacySha1.hex_hashes(certs)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    const CERT: &[u8] = b"\x30\x03\x02\x01\x01";

    #[test]
    fn hashing_is_deterministic() {
        let first = cert_hex_hash(CERT);
        assert_eq!(first.len(), 64);
        assert_eq!(first, first.to_lowercase());
        for _ in 0..3 {
            assert_eq!(cert_hex_hash(CERT), first);
        }
        assert_eq!(cert_hash(CERT).to_hex(), first);
        assert_ne!(cert_hex_hash(b"\x30\x03\x02\x01\x02"), first);
    }

    #[test]
    fn delimited_hash() {
        let plain = cert_hex_hash(CERT);
        let delimited = cert_hex_hash_delimited(CERT, ":");
        assert_eq!(delimited.len(), 32 * 3 - 1);
        assert_eq!(delimited.replace(':', ""), plain.to_uppercase());
    }

    #[test]
    fn batches() {
        let certs = vec![CERT.to_vec(), b"\x30\x00".to_vec()];
        let hashes = cert_hex_hashes(&certs);
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes[0], cert_hex_hash(CERT));
    }

    #[test]
    #[allow(deprecated)]
    fn legacy_sha1() {
        assert_eq!(
            cert_sha1_hex_hash(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(cert_sha1_hash(b"abc").as_slice().len(), 20);
        assert_eq!(
            cert_sha1_hex_hashes([b"abc"]),
            vec![String::from("a9993e364706816aba3e25717850c26c9cd0d89d")]
        );
        assert_eq!(CertHashAlgorithm::default(), CertHashAlgorithm::Sha256);
    }

    #[test]
    fn anchor_hash() {
        assert_eq!(
            anchor_hash_delimited(b"abc"),
            "23:09:7D:22:34:05:D8:22:86:42:A4:77:BD:A2:55:B3:\
             2A:AD:BC:E4:BD:A0:B3:F7:E3:6C:9D:A7"
        );
    }
}
