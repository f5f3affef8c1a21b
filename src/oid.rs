//! The object identifiers used in this crate.
//!
//! This module collects all the object indentifiers used at various places
//! in this crate in one central place. They are public so you can refer to
//! them should that ever become necessary.

use bcder::{ConstOid, Oid};


//------------ Name Attributes -----------------------------------------------

/// [X.520](https://www.itu.int/rec/T-REC-X.520) `id-at-commonName`
pub const AT_COMMON_NAME: ConstOid = Oid(&[85, 4, 3]); // 2 5 4 3

/// [X.520](https://www.itu.int/rec/T-REC-X.520) `id-at-serialNumber`
///
/// Not to be confused with the serial number of the certificate itself.
/// Several jurisdictions encode structured member information here.
pub const AT_SERIAL_NUMBER: ConstOid = Oid(&[85, 4, 5]); // 2 5 4 5

/// [X.520](https://www.itu.int/rec/T-REC-X.520) `id-at-countryName`
pub const AT_COUNTRY_NAME: ConstOid = Oid(&[85, 4, 6]); // 2 5 4 6

pub const AT_LOCALITY_NAME: ConstOid = Oid(&[85, 4, 7]); // 2 5 4 7
pub const AT_STATE_OR_PROVINCE_NAME: ConstOid = Oid(&[85, 4, 8]); // 2 5 4 8

/// [X.520](https://www.itu.int/rec/T-REC-X.520) `id-at-organizationName`
pub const AT_ORGANIZATION_NAME: ConstOid = Oid(&[85, 4, 10]); // 2 5 4 10

/// [X.520](https://www.itu.int/rec/T-REC-X.520)
/// `id-at-organizationalUnitName`
pub const AT_ORGANIZATIONAL_UNIT_NAME: ConstOid
    = Oid(&[85, 4, 11]); // 2 5 4 11

/// [RFC 4519](https://tools.ietf.org/html/rfc4519) `domainComponent`
pub const AT_DOMAIN_COMPONENT: ConstOid
    = Oid(&[9, 146, 38, 137, 147, 242, 44, 100, 1, 25]);

/// [RFC 4519](https://tools.ietf.org/html/rfc4519) `uid`
pub const AT_USER_ID: ConstOid
    = Oid(&[9, 146, 38, 137, 147, 242, 44, 100, 1, 1]);

/// [RFC 2985](https://tools.ietf.org/html/rfc2985) `pkcs-9-at-emailAddress`
pub const AT_EMAIL_ADDRESS: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 1]);


//------------ Digest Algorithms ---------------------------------------------

/// [RFC 3279](https://tools.ietf.org/html/rfc3279) `id-sha1`
pub const SHA1: ConstOid = Oid(&[43, 14, 3, 2, 26]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `id-sha224`
pub const SHA224: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 4]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `id-sha256`
///
/// Identifies the SHA-256 one-way hash function.
pub const SHA256: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 1]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `id-sha384`
pub const SHA384: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 2]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `id-sha512`
pub const SHA512: ConstOid = Oid(&[96, 134, 72, 1, 101, 3, 4, 2, 3]);


//------------ Signature Algorithms ------------------------------------------

/// [RFC 3279](https://tools.ietf.org/html/rfc3279)
/// `sha1WithRSAEncryption`
pub const SHA1_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 5]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `sha256WithRSAEncryption`
///
/// Identifies the PKCS #1 version 1.5 signature algorithm with SHA-256.
pub const SHA256_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 11]);

pub const SHA384_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 12]);
pub const SHA512_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 13]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `id-RSASSA-PSS`
///
/// The digest algorithm is carried in the parameters, so all three MGF1
/// variants share this identifier.
pub const RSASSA_PSS: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 10]);


//------------ OCSP ----------------------------------------------------------

/// [RFC 6960](https://tools.ietf.org/html/rfc6960) `id-pkix-ocsp-basic`
pub const PKIX_OCSP_BASIC: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 48, 1, 1]);
