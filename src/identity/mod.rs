//! Deriving client identities from certificates.
//!
//! A peer presenting a certificate is identified by the [`ClientId`]
//! encoded into the subject name of that certificate. How exactly the
//! identifier is encoded depends on the jurisdiction that issued the
//! certificate. The [`Jurisdiction`] type selects the convention.

//--- Re-exports
//
pub use self::client::{ClientId, InvalidClientId};
pub use self::decoder::Jurisdiction;
pub use self::error::{
    IdentityError, ParseJurisdictionError, SubjectViolation
};


//--- Modules
//
pub mod client;
pub mod decoder;
pub mod error;


use crate::name::DistinguishedName;


/// Derives the client identifier from a subject name.
pub fn decode_identity(
    jurisdiction: Jurisdiction, dn: &DistinguishedName
) -> Result<ClientId, IdentityError> {
    jurisdiction.decode(dn)
}

/// Derives the client identifier from a DER-encoded certificate.
pub fn decode_certificate_identity(
    jurisdiction: Jurisdiction, der: &[u8]
) -> Result<ClientId, IdentityError> {
    let subject = DistinguishedName::from_certificate_subject(der)?;
    jurisdiction.decode(&subject)
}
