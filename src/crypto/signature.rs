//! Signature algorithms and signing mechanisms.

use std::{fmt, str};
use bcder::ConstOid;
use crate::oid;
use super::algorithm::{AlgorithmKind, UnknownAlgorithm};
use super::digest::DigestAlgorithm;


//------------ SignatureAlgorithm --------------------------------------------

/// The signature algorithms known to the registry.
///
/// All of them are RSA based. They either use the PKCS #1 version 1.5
/// padding or the probabilistic signature scheme (PSS) with the MGF1 mask
/// generation function. The latter is only available with the SHA-2
/// digests of at least 256 bits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SignatureAlgorithm {
    Sha1WithRsa,
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
    Sha256WithRsaAndMgf1,
    Sha384WithRsaAndMgf1,
    Sha512WithRsaAndMgf1,
}

impl SignatureAlgorithm {
    /// All signature algorithms.
    pub const ALL: [Self; 7] = [
        SignatureAlgorithm::Sha1WithRsa,
        SignatureAlgorithm::Sha256WithRsa,
        SignatureAlgorithm::Sha384WithRsa,
        SignatureAlgorithm::Sha512WithRsa,
        SignatureAlgorithm::Sha256WithRsaAndMgf1,
        SignatureAlgorithm::Sha384WithRsaAndMgf1,
        SignatureAlgorithm::Sha512WithRsaAndMgf1,
    ];

    pub fn short_id(self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1WithRsa => "SHA1withRSA",
            SignatureAlgorithm::Sha256WithRsa => "SHA256withRSA",
            SignatureAlgorithm::Sha384WithRsa => "SHA384withRSA",
            SignatureAlgorithm::Sha512WithRsa => "SHA512withRSA",
            SignatureAlgorithm::Sha256WithRsaAndMgf1 => "SHA256withRSAandMGF1",
            SignatureAlgorithm::Sha384WithRsaAndMgf1 => "SHA384withRSAandMGF1",
            SignatureAlgorithm::Sha512WithRsaAndMgf1 => "SHA512withRSAandMGF1",
        }
    }

    /// Returns the URI identifying the algorithm in XML signatures.
    pub fn uri(self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1WithRsa => {
                "http://www.w3.org/2000/09/xmldsig#rsa-sha1"
            }
            SignatureAlgorithm::Sha256WithRsa => {
                "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256"
            }
            SignatureAlgorithm::Sha384WithRsa => {
                "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384"
            }
            SignatureAlgorithm::Sha512WithRsa => {
                "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512"
            }
            SignatureAlgorithm::Sha256WithRsaAndMgf1 => {
                "http://www.w3.org/2007/05/xmldsig-more#sha256-rsa-MGF1"
            }
            SignatureAlgorithm::Sha384WithRsaAndMgf1 => {
                "http://www.w3.org/2007/05/xmldsig-more#sha384-rsa-MGF1"
            }
            SignatureAlgorithm::Sha512WithRsaAndMgf1 => {
                "http://www.w3.org/2007/05/xmldsig-more#sha512-rsa-MGF1"
            }
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|alg| alg.uri() == uri)
    }

    /// Returns the object identifier of the algorithm.
    ///
    /// The PSS variants all share one identifier. Their digest is given in
    /// the algorithm parameters.
    pub fn oid(self) -> ConstOid {
        match self {
            SignatureAlgorithm::Sha1WithRsa => oid::SHA1_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha256WithRsa => {
                oid::SHA256_WITH_RSA_ENCRYPTION
            }
            SignatureAlgorithm::Sha384WithRsa => {
                oid::SHA384_WITH_RSA_ENCRYPTION
            }
            SignatureAlgorithm::Sha512WithRsa => {
                oid::SHA512_WITH_RSA_ENCRYPTION
            }
            SignatureAlgorithm::Sha256WithRsaAndMgf1
            | SignatureAlgorithm::Sha384WithRsaAndMgf1
            | SignatureAlgorithm::Sha512WithRsaAndMgf1 => oid::RSASSA_PSS,
        }
    }

    /// Returns the digest algorithm used by the signature algorithm.
    pub fn digest_algorithm(self) -> DigestAlgorithm {
        match self {
            SignatureAlgorithm::Sha1WithRsa => DigestAlgorithm::Sha1,
            SignatureAlgorithm::Sha256WithRsa
            | SignatureAlgorithm::Sha256WithRsaAndMgf1 => {
                DigestAlgorithm::Sha256
            }
            SignatureAlgorithm::Sha384WithRsa
            | SignatureAlgorithm::Sha384WithRsaAndMgf1 => {
                DigestAlgorithm::Sha384
            }
            SignatureAlgorithm::Sha512WithRsa
            | SignatureAlgorithm::Sha512WithRsaAndMgf1 => {
                DigestAlgorithm::Sha512
            }
        }
    }

    /// Returns the signing mechanism used by the signature algorithm.
    pub fn mechanism(self) -> SignMechanism {
        match self {
            SignatureAlgorithm::Sha1WithRsa
            | SignatureAlgorithm::Sha256WithRsa
            | SignatureAlgorithm::Sha384WithRsa
            | SignatureAlgorithm::Sha512WithRsa => SignMechanism::RsaPkcs,
            _ => SignMechanism::RsaPkcsPss,
        }
    }

    /// Returns the signature algorithm combining a digest and a mechanism.
    ///
    /// Fails if there is no such algorithm. This is the case for SHA-224
    /// with either mechanism and for SHA-1 with PSS.
    pub fn for_digest(
        digest: DigestAlgorithm, mechanism: SignMechanism
    ) -> Result<Self, UnknownAlgorithm> {
        Self::ALL.iter().copied().find(|alg| {
            alg.digest_algorithm() == digest && alg.mechanism() == mechanism
        }).ok_or_else(|| {
            UnknownAlgorithm::new(
                AlgorithmKind::Combination,
                format!("{} with {}", digest, mechanism)
            )
        })
    }
}


//--- FromStr and Display

impl str::FromStr for SignatureAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|alg| alg.short_id() == s).ok_or_else(
            || UnknownAlgorithm::new(AlgorithmKind::Signature, s)
        )
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.short_id())
    }
}


//------------ SignMechanism -------------------------------------------------

/// The PKCS #11 mechanism used by a token to create a signature.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SignMechanism {
    /// `CKM_RSA_PKCS`, RSA with PKCS #1 v1.5 padding.
    RsaPkcs,

    /// `CKM_RSA_PKCS_PSS`, RSA with PSS padding.
    RsaPkcsPss,
}

impl SignMechanism {
    pub fn name(self) -> &'static str {
        match self {
            SignMechanism::RsaPkcs => "CKM_RSA_PKCS",
            SignMechanism::RsaPkcsPss => "CKM_RSA_PKCS_PSS",
        }
    }
}

impl str::FromStr for SignMechanism {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CKM_RSA_PKCS" => Ok(SignMechanism::RsaPkcs),
            "CKM_RSA_PKCS_PSS" => Ok(SignMechanism::RsaPkcsPss),
            _ => Err(UnknownAlgorithm::new(AlgorithmKind::Mechanism, s))
        }
    }
}

impl fmt::Display for SignMechanism {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn digest_and_mechanism_round_trip() {
        for alg in SignatureAlgorithm::ALL {
            assert_eq!(
                SignatureAlgorithm::for_digest(
                    alg.digest_algorithm(), alg.mechanism()
                ),
                Ok(alg)
            );
        }
    }

    #[test]
    fn unsupported_combinations() {
        assert!(SignatureAlgorithm::for_digest(
            DigestAlgorithm::Sha1, SignMechanism::RsaPkcsPss
        ).is_err());
        for mechanism in [SignMechanism::RsaPkcs, SignMechanism::RsaPkcsPss] {
            assert!(SignatureAlgorithm::for_digest(
                DigestAlgorithm::Sha224, mechanism
            ).is_err());
        }
    }

    #[test]
    fn pss_uses_one_oid() {
        assert!(
            SignatureAlgorithm::Sha384WithRsaAndMgf1.oid()
            == SignatureAlgorithm::Sha512WithRsaAndMgf1.oid()
        );
        assert!(
            SignatureAlgorithm::Sha384WithRsa.oid()
            == oid::SHA384_WITH_RSA_ENCRYPTION
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            "SHA512withRSAandMGF1".parse(),
            Ok(SignatureAlgorithm::Sha512WithRsaAndMgf1)
        );
        assert!("SHA224withRSA".parse::<SignatureAlgorithm>().is_err());
        assert_eq!("CKM_RSA_PKCS_PSS".parse(), Ok(SignMechanism::RsaPkcsPss));
        assert!("CKM_ECDSA".parse::<SignMechanism>().is_err());
    }
}
