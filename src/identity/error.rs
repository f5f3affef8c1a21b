//! Errors happening while deriving identities.

use std::{error, fmt};
use std::convert::Infallible;
use bcder::decode::DecodeError;
use super::decoder::Jurisdiction;


//------------ IdentityError -------------------------------------------------

/// A client identifier could not be derived from a certificate.
///
/// These errors are permanent. Presenting the same certificate again will
/// always fail the same way.
#[derive(Debug)]
pub enum IdentityError {
    /// A mandatory attribute is missing from the subject name.
    ///
    /// This is used by the default decoder only. All other decoders report
    /// [`IdentityError::InvalidSubject`] instead.
    MissingAttribute(&'static str),

    /// The subject doesn’t follow the conventions of a jurisdiction.
    InvalidSubject {
        jurisdiction: Jurisdiction,
        violation: SubjectViolation,
    },

    /// The certificate could not be decoded far enough to find the subject.
    MalformedCertificate(DecodeError<Infallible>),
}

impl IdentityError {
    /// Returns the short name of the missing attribute if that was the cause.
    pub fn missing_attribute(&self) -> Option<&'static str> {
        match *self {
            IdentityError::MissingAttribute(name) => Some(name),
            IdentityError::InvalidSubject {
                violation: SubjectViolation::MissingAttribute(name), ..
            } => Some(name),
            _ => None
        }
    }

    pub(crate) fn invalid(
        jurisdiction: Jurisdiction, violation: SubjectViolation
    ) -> Self {
        IdentityError::InvalidSubject { jurisdiction, violation }
    }
}

impl From<DecodeError<Infallible>> for IdentityError {
    fn from(err: DecodeError<Infallible>) -> Self {
        IdentityError::MalformedCertificate(err)
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IdentityError::MissingAttribute(name) => {
                write!(f, "certificate subject lacks attribute {}", name)
            }
            IdentityError::InvalidSubject { jurisdiction, ref violation } => {
                write!(f,
                    "invalid certificate subject for {} profile: {}",
                    jurisdiction, violation
                )
            }
            IdentityError::MalformedCertificate(ref err) => {
                write!(f, "malformed certificate: {}", err)
            }
        }
    }
}

impl error::Error for IdentityError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            IdentityError::MalformedCertificate(ref err) => Some(err),
            _ => None
        }
    }
}


//------------ SubjectViolation ----------------------------------------------

/// The way a subject name broke the conventions of a jurisdiction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubjectViolation {
    /// A mandatory attribute is missing or blank.
    MissingAttribute(&'static str),

    /// The country attribute doesn’t have the expected value.
    CountryMismatch {
        expected: &'static str,
        found: Option<String>,
    },

    /// The serial number attribute doesn’t have three non-blank components.
    MalformedSerialNumber {
        value: String,
        components: usize,
    },
}

impl fmt::Display for SubjectViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SubjectViolation::MissingAttribute(name) => {
                write!(f, "missing attribute {}", name)
            }
            SubjectViolation::CountryMismatch {
                expected, found: Some(ref found)
            } => {
                write!(f, "country must be {} but is {}", expected, found)
            }
            SubjectViolation::CountryMismatch { expected, found: None } => {
                write!(f, "country must be {} but is missing", expected)
            }
            SubjectViolation::MalformedSerialNumber {
                ref value, components: 3
            } => {
                write!(f, "serial number '{}' has a blank component", value)
            }
            SubjectViolation::MalformedSerialNumber {
                ref value, components
            } => {
                write!(f,
                    "serial number '{}' has {} instead of 3 components",
                    value, components
                )
            }
        }
    }
}


//------------ ParseJurisdictionError ----------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseJurisdictionError(pub(crate) String);

impl fmt::Display for ParseJurisdictionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown jurisdiction '{}'", self.0)
    }
}

impl error::Error for ParseJurisdictionError { }
