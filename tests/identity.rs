//! Deriving identities from complete certificates.

mod common;

use xroad_trust::crypto::certhash;
use xroad_trust::identity::{
    decode_certificate_identity, ClientId, IdentityError, Jurisdiction,
    SubjectViolation,
};
use xroad_trust::name::DistinguishedName;
use xroad_trust::oid;
use xroad_trust::util::base64::Pem;
use self::common::{certificate, issuer, name};


fn finnish_cert() -> Vec<u8> {
    certificate(&issuer(), &name(&[
        (oid::AT_COUNTRY_NAME, "FI"),
        (oid::AT_ORGANIZATION_NAME, "anything"),
        (oid::AT_COMMON_NAME, "1234"),
        (oid::AT_SERIAL_NUMBER, "FI/SS1/GOV"),
    ]))
}

#[test]
fn subject_and_issuer() {
    let cert = finnish_cert();
    let subject = DistinguishedName::from_certificate_subject(&cert).unwrap();
    assert_eq!(subject.serial_number(), Some("FI/SS1/GOV"));
    assert_eq!(
        subject.to_string(), "SERIALNUMBER=FI/SS1/GOV,CN=1234,O=anything,C=FI"
    );
    let issuer = DistinguishedName::from_certificate_issuer(&cert).unwrap();
    assert_eq!(issuer.common_name(), Some("Test CA"));
}

#[test]
fn finnish_certificate() {
    assert_eq!(
        decode_certificate_identity(
            Jurisdiction::Finnish, &finnish_cert()
        ).unwrap(),
        ClientId::member("FI", "GOV", "1234").unwrap()
    );
}

#[test]
fn cambodian_certificate_from_finland() {
    let err = decode_certificate_identity(
        Jurisdiction::Cambodian, &finnish_cert()
    ).unwrap_err();
    match err {
        IdentityError::InvalidSubject {
            jurisdiction: Jurisdiction::Cambodian,
            violation: SubjectViolation::CountryMismatch { expected, found }
        } => {
            assert_eq!(expected, "KH");
            assert_eq!(found.as_deref(), Some("FI"));
        }
        err => panic!("unexpected error {}", err)
    }
}

#[test]
fn certificate_without_subject_attributes() {
    let cert = certificate(&issuer(), &name(&[]));
    let err = decode_certificate_identity(
        Jurisdiction::Default, &cert
    ).unwrap_err();
    assert_eq!(err.missing_attribute(), Some("C"));
}

#[test]
fn truncated_certificate() {
    let cert = finnish_cert();
    let err = decode_certificate_identity(
        Jurisdiction::Finnish, &cert[..cert.len() - 10]
    ).unwrap_err();
    assert!(matches!(err, IdentityError::MalformedCertificate(_)));
    assert_eq!(err.missing_attribute(), None);
}

#[test]
fn pem_certificate() {
    let cert = finnish_cert();
    let encoded = Pem.encode(&cert);
    let mut pem = String::from("-----BEGIN CERTIFICATE-----\n");
    for line in encoded.as_bytes().chunks(64) {
        pem.push_str(std::str::from_utf8(line).unwrap());
        pem.push('\n');
    }
    pem.push_str("-----END CERTIFICATE-----\n");
    assert!(Pem::is_pem(pem.as_bytes()));
    let der = Pem.decode_block(pem.as_bytes(), "CERTIFICATE").unwrap();
    assert_eq!(der, cert);
    assert_eq!(certhash::cert_hex_hash(&der), certhash::cert_hex_hash(&cert));
}
