//! Hand-built DER fixtures.

#![allow(dead_code)]

use bcder::ConstOid;
use xroad_trust::oid;

/// Encodes a value with definite length.
pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut res = vec![tag];
    let len = content.len();
    if len < 0x80 {
        res.push(len as u8);
    }
    else if len < 0x100 {
        res.extend_from_slice(&[0x81, len as u8]);
    }
    else {
        res.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]);
    }
    res.extend_from_slice(content);
    res
}

pub fn sequence(items: &[&[u8]]) -> Vec<u8> {
    tlv(0x30, &items.concat())
}

/// Encodes a name with one PrintableString attribute per RDN.
///
/// The attributes are given in ASN.1 order.
pub fn name(attrs: &[(ConstOid, &str)]) -> Vec<u8> {
    let rdns: Vec<u8> = attrs.iter().flat_map(|(oid, value)| {
        let atv = sequence(&[
            &tlv(0x06, oid.0), &tlv(0x13, value.as_bytes())
        ]);
        tlv(0x31, &atv)
    }).collect();
    tlv(0x30, &rdns)
}

/// Encodes a certificate with the given issuer and subject.
///
/// Only the structure up to the subject is meaningful.
pub fn certificate(issuer: &[u8], subject: &[u8]) -> Vec<u8> {
    let algorithm = sequence(&[
        &tlv(0x06, oid::SHA256_WITH_RSA_ENCRYPTION.0), &tlv(0x05, b"")
    ]);
    let validity = sequence(&[
        &tlv(0x17, b"240101000000Z"), &tlv(0x17, b"340101000000Z")
    ]);
    let key_info = sequence(&[&algorithm, &tlv(0x03, b"\x00\x30\x00")]);
    let tbs = sequence(&[
        &tlv(0xa0, &tlv(0x02, b"\x02")),
        &tlv(0x02, b"\x01\x23"),
        &algorithm,
        issuer,
        &validity,
        subject,
        &key_info,
    ]);
    sequence(&[&tbs, &algorithm, &tlv(0x03, &[0u8; 65])])
}

pub fn issuer() -> Vec<u8> {
    name(&[(oid::AT_COUNTRY_NAME, "FI"), (oid::AT_COMMON_NAME, "Test CA")])
}
