//! The jurisdiction-specific subject name conventions.
//!
//! Each jurisdiction encodes the client identifier into the subject name
//! of its certificates differently. Every convention is implemented by an
//! independent function taking the name and returning either the
//! identifier or the first violation encountered. The checks happen in a
//! fixed order, so the error reported for a name with several problems is
//! always the same.

use std::{fmt, str};
use log::debug;
use crate::name::DistinguishedName;
use super::client::ClientId;
use super::error::{IdentityError, ParseJurisdictionError, SubjectViolation};


//------------ Jurisdiction --------------------------------------------------

/// The conventions used for encoding the identifier into the subject.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Jurisdiction {
    /// Country is the instance, organization the class, common name the code.
    #[default]
    Default,

    /// Finland.
    ///
    /// Uses the serial number if present and falls back to the
    /// organizational unit encoding or, failing that, to the default.
    Finnish,

    /// Iceland.
    Icelandic,

    /// Cambodia (CamDX).
    Cambodian,

    /// The older Finnish organizational unit encoding on its own.
    LegacyOrganizationUnit,
}

impl Jurisdiction {
    /// Derives the client identifier from a subject name.
    pub fn decode(
        self, dn: &DistinguishedName
    ) -> Result<ClientId, IdentityError> {
        match self {
            Jurisdiction::Default => decode_default(dn),
            Jurisdiction::Finnish => decode_finnish(dn),
            Jurisdiction::Icelandic => decode_icelandic(dn),
            Jurisdiction::Cambodian => decode_cambodian(dn),
            Jurisdiction::LegacyOrganizationUnit => {
                decode_organization_unit(dn)
            }
        }
    }

    /// Returns the name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Jurisdiction::Default => "default",
            Jurisdiction::Finnish => "fi",
            Jurisdiction::Icelandic => "is",
            Jurisdiction::Cambodian => "kh",
            Jurisdiction::LegacyOrganizationUnit => "fi-legacy",
        }
    }
}

impl str::FromStr for Jurisdiction {
    type Err = ParseJurisdictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Jurisdiction::Default),
            "fi" => Ok(Jurisdiction::Finnish),
            "is" => Ok(Jurisdiction::Icelandic),
            "kh" | "camdx" => Ok(Jurisdiction::Cambodian),
            "fi-legacy" => Ok(Jurisdiction::LegacyOrganizationUnit),
            _ => Err(ParseJurisdictionError(s.into()))
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


//------------ Decoders ------------------------------------------------------

/// Decodes using the default convention.
///
/// Requires C, O, and CN, checked in that order.
pub fn decode_default(
    dn: &DistinguishedName
) -> Result<ClientId, IdentityError> {
    let instance = required(dn.country(), "C").map_err(
        IdentityError::MissingAttribute
    )?;
    let class = required(dn.organization(), "O").map_err(
        IdentityError::MissingAttribute
    )?;
    let code = required(dn.common_name(), "CN").map_err(
        IdentityError::MissingAttribute
    )?;
    Ok(member(instance, class, code))
}

/// Decodes using the Finnish conventions.
///
/// The presence of SERIALNUMBER and OU selects the encoding.
pub fn decode_finnish(
    dn: &DistinguishedName
) -> Result<ClientId, IdentityError> {
    match (dn.serial_number(), dn.organizational_unit()) {
        (None, None) => {
            debug!("Subject '{}' uses the default encoding.", dn);
            decode_default(dn)
        }
        (None, Some(_)) => {
            debug!("Subject '{}' uses the organizational unit encoding.", dn);
            finnish_organization_unit(dn).map_err(|violation| {
                IdentityError::invalid(Jurisdiction::Finnish, violation)
            })
        }
        (Some(_), _) => {
            serial_number_encoding(dn, "FI").map_err(|violation| {
                IdentityError::invalid(Jurisdiction::Finnish, violation)
            })
        }
    }
}

/// Decodes using the older Finnish organizational unit encoding.
///
/// Requires C to be `FI`, then O as the instance, OU as the member class
/// and CN as the member code.
pub fn decode_organization_unit(
    dn: &DistinguishedName
) -> Result<ClientId, IdentityError> {
    finnish_organization_unit(dn).map_err(|violation| {
        IdentityError::invalid(Jurisdiction::LegacyOrganizationUnit, violation)
    })
}

/// Decodes using the Cambodian convention.
///
/// This is the serial number encoding with a country of `KH`. There is no
/// fallback.
pub fn decode_cambodian(
    dn: &DistinguishedName
) -> Result<ClientId, IdentityError> {
    serial_number_encoding(dn, "KH").map_err(|violation| {
        IdentityError::invalid(Jurisdiction::Cambodian, violation)
    })
}

/// Decodes using the Icelandic convention.
///
/// SERIALNUMBER must be present but its value isn’t used. Then C must be
/// `IS` while O, OU, and CN provide instance, class, and code.
pub fn decode_icelandic(
    dn: &DistinguishedName
) -> Result<ClientId, IdentityError> {
    icelandic(dn).map_err(|violation| {
        IdentityError::invalid(Jurisdiction::Icelandic, violation)
    })
}

fn finnish_organization_unit(
    dn: &DistinguishedName
) -> Result<ClientId, SubjectViolation> {
    check_country(dn, "FI")?;
    let instance = required_attr(dn.organization(), "O")?;
    let class = required_attr(dn.organizational_unit(), "OU")?;
    let code = required_attr(dn.common_name(), "CN")?;
    Ok(member(instance, class, code))
}

/// The serial number encoding.
///
/// The serial number has the form `instance/server code/member class`. The
/// organization must be present but its value is ignored.
fn serial_number_encoding(
    dn: &DistinguishedName, country: &'static str
) -> Result<ClientId, SubjectViolation> {
    check_country(dn, country)?;
    required_attr(dn.organization(), "O")?;
    let code = required_attr(dn.common_name(), "CN")?;
    let serial = required_attr(dn.serial_number(), "SERIALNUMBER")?;

    // Trailing empty components don’t count, so "FI/SS1/" has two.
    let mut parts: Vec<_> = serial.split('/').collect();
    while parts.last() == Some(&"") {
        parts.pop();
    }
    if
        parts.len() != 3
        || parts[0].trim().is_empty() || parts[2].trim().is_empty()
    {
        return Err(SubjectViolation::MalformedSerialNumber {
            value: serial.into(),
            components: parts.len(),
        })
    }
    Ok(member(parts[0], parts[2], code))
}

fn icelandic(dn: &DistinguishedName) -> Result<ClientId, SubjectViolation> {
    required_attr(dn.serial_number(), "SERIALNUMBER")?;
    check_country(dn, "IS")?;
    let instance = required_attr(dn.organization(), "O")?;
    let class = required_attr(dn.organizational_unit(), "OU")?;
    let code = required_attr(dn.common_name(), "CN")?;
    Ok(member(instance, class, code))
}


//------------ Helpers -------------------------------------------------------

/// Returns a present and non-blank value or the attribute name.
fn required<'a>(
    value: Option<&'a str>, name: &'static str
) -> Result<&'a str, &'static str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(name)
    }
}

fn required_attr<'a>(
    value: Option<&'a str>, name: &'static str
) -> Result<&'a str, SubjectViolation> {
    required(value, name).map_err(SubjectViolation::MissingAttribute)
}

fn check_country(
    dn: &DistinguishedName, expected: &'static str
) -> Result<(), SubjectViolation> {
    match dn.country() {
        Some(country) if country == expected => Ok(()),
        found => {
            Err(SubjectViolation::CountryMismatch {
                expected,
                found: found.map(Into::into)
            })
        }
    }
}

/// Creates a member identifier from parts checked by `required`.
fn member(instance: &str, class: &str, code: &str) -> ClientId {
    ClientId::new_unchecked(instance.into(), class.into(), code.into(), None)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::oid;

    fn dn(s: &str) -> DistinguishedName {
        s.parse().unwrap()
    }

    fn id(instance: &str, class: &str, code: &str) -> ClientId {
        ClientId::member(instance, class, code).unwrap()
    }

    #[test]
    fn default_decoder() {
        assert_eq!(
            decode_default(&dn("CN=1234,O=COM,C=EE")).unwrap(),
            id("EE", "COM", "1234")
        );
        let err = decode_default(&dn("CN=1234,C=EE")).unwrap_err();
        assert!(matches!(err, IdentityError::MissingAttribute("O")));
        let err = decode_default(&dn("CN=1234,O=COM")).unwrap_err();
        assert_eq!(err.missing_attribute(), Some("C"));
        let err = decode_default(&dn("CN=\\ ,O=COM,C=EE")).unwrap_err();
        assert_eq!(err.missing_attribute(), Some("CN"));
    }

    #[test]
    fn finnish_legacy() {
        assert_eq!(
            decode_finnish(&dn("CN=1234,OU=GOV,O=instX,C=FI")).unwrap(),
            id("instX", "GOV", "1234")
        );
        let err = decode_finnish(&dn("CN=1234,OU=GOV,O=instX")).unwrap_err();
        assert!(matches!(
            err,
            IdentityError::InvalidSubject {
                jurisdiction: Jurisdiction::Finnish,
                violation: SubjectViolation::CountryMismatch {
                    expected: "FI", found: None
                }
            }
        ));
    }

    #[test]
    fn finnish_legacy_foreign_country() {
        let name = dn("CN=1234,OU=GOV,O=instX,C=SE");
        for jurisdiction in [
            Jurisdiction::Finnish, Jurisdiction::LegacyOrganizationUnit
        ] {
            match jurisdiction.decode(&name).unwrap_err() {
                IdentityError::InvalidSubject {
                    violation: SubjectViolation::CountryMismatch {
                        expected, found
                    },
                    ..
                } => {
                    assert_eq!(expected, "FI");
                    assert_eq!(found.as_deref(), Some("SE"));
                }
                err => panic!("unexpected error {}", err)
            }
        }
    }

    #[test]
    fn finnish_falls_back_to_default() {
        assert_eq!(
            decode_finnish(&dn("CN=1234,O=COM,C=SE")).unwrap(),
            id("SE", "COM", "1234")
        );
    }

    #[test]
    fn finnish_serial_number() {
        assert_eq!(
            decode_finnish(
                &dn("SERIALNUMBER=FI/SS1/GOV,CN=1234,O=anything,C=FI")
            ).unwrap(),
            id("FI", "GOV", "1234")
        );
        for serial in ["FI/SS1", "FI/SS1/", "FI/SS1/GOV/X", "/SS1/GOV"] {
            let name = DistinguishedName::from_attributes(vec![
                (oid::AT_COUNTRY_NAME, "FI"),
                (oid::AT_ORGANIZATION_NAME, "org"),
                (oid::AT_COMMON_NAME, "1234"),
                (oid::AT_SERIAL_NUMBER, serial),
            ]);
            let err = decode_finnish(&name).unwrap_err();
            assert!(matches!(
                err,
                IdentityError::InvalidSubject {
                    violation: SubjectViolation::MalformedSerialNumber { .. },
                    ..
                }
            ), "{}", serial);
        }
    }

    #[test]
    fn serial_number_encoding_requires_organization() {
        for (name, jurisdiction) in [
            (
                dn("SERIALNUMBER=FI/SS1/GOV,CN=1234,C=FI"),
                Jurisdiction::Finnish
            ),
            (
                dn("SERIALNUMBER=INST/SRV/CLASS,CN=5678,C=KH"),
                Jurisdiction::Cambodian
            ),
        ] {
            let err = jurisdiction.decode(&name).unwrap_err();
            assert!(matches!(
                err,
                IdentityError::InvalidSubject {
                    violation: SubjectViolation::MissingAttribute("O"),
                    ..
                }
            ), "{}", name);
            assert_eq!(err.missing_attribute(), Some("O"));
        }
    }

    #[test]
    fn organization_unit_ignores_serial_number() {
        assert_eq!(
            decode_organization_unit(
                &dn("SERIALNUMBER=x,CN=1234,OU=GOV,O=instX,C=FI")
            ).unwrap(),
            id("instX", "GOV", "1234")
        );
    }

    #[test]
    fn cambodian() {
        assert_eq!(
            decode_cambodian(
                &dn("SERIALNUMBER=INST/SRV/CLASS,CN=5678,O=org,C=KH")
            ).unwrap(),
            id("INST", "CLASS", "5678")
        );
        let err = decode_cambodian(
            &dn("SERIALNUMBER=INST/SRV/CLASS,CN=5678,O=org,C=FI")
        ).unwrap_err();
        assert!(matches!(
            err,
            IdentityError::InvalidSubject {
                jurisdiction: Jurisdiction::Cambodian,
                violation: SubjectViolation::CountryMismatch { .. }
            }
        ));
        // Country is checked before anything else.
        let err = decode_cambodian(&dn("C=FI")).unwrap_err();
        assert_eq!(err.missing_attribute(), None);
        let err = decode_cambodian(&dn("CN=5678,O=org,C=KH")).unwrap_err();
        assert_eq!(err.missing_attribute(), Some("SERIALNUMBER"));
    }

    #[test]
    fn icelandic_requires_serial_number() {
        assert_eq!(
            decode_icelandic(
                &dn("SERIALNUMBER=anything,CN=9999,OU=PRO,O=instY,C=IS")
            ).unwrap(),
            id("instY", "PRO", "9999")
        );
        let err = decode_icelandic(
            &dn("CN=9999,OU=PRO,O=instY,C=IS")
        ).unwrap_err();
        assert_eq!(err.missing_attribute(), Some("SERIALNUMBER"));
    }

    #[test]
    fn icelandic_requires_country() {
        for (subject, country) in [
            ("SERIALNUMBER=x,CN=9999,OU=PRO,O=instY,C=FI", Some("FI")),
            ("SERIALNUMBER=x,CN=9999,OU=PRO,O=instY", None),
        ] {
            match decode_icelandic(&dn(subject)).unwrap_err() {
                IdentityError::InvalidSubject {
                    jurisdiction: Jurisdiction::Icelandic,
                    violation: SubjectViolation::CountryMismatch {
                        expected, found
                    }
                } => {
                    assert_eq!(expected, "IS");
                    assert_eq!(found.as_deref(), country);
                }
                err => panic!("unexpected error {}", err)
            }
        }
    }

    #[test]
    fn missing_common_name_fails_everywhere() {
        let names = [
            dn("O=COM,C=EE"),
            dn("OU=GOV,O=instX,C=FI"),
            dn("SERIALNUMBER=FI/SS1/GOV,O=anything,C=FI"),
            dn("SERIALNUMBER=INST/SRV/CLASS,O=org,C=KH"),
            dn("SERIALNUMBER=x,OU=PRO,O=instY,C=IS"),
        ];
        let jurisdictions = [
            Jurisdiction::Default,
            Jurisdiction::Finnish,
            Jurisdiction::Finnish,
            Jurisdiction::Cambodian,
            Jurisdiction::Icelandic,
        ];
        for (name, jurisdiction) in names.iter().zip(jurisdictions) {
            let err = jurisdiction.decode(name).unwrap_err();
            assert_eq!(err.missing_attribute(), Some("CN"), "{}", name);
        }
        let err = Jurisdiction::LegacyOrganizationUnit.decode(
            &names[1]
        ).unwrap_err();
        assert_eq!(err.missing_attribute(), Some("CN"));
    }

    #[test]
    fn parse_jurisdiction() {
        assert_eq!("camdx".parse(), Ok(Jurisdiction::Cambodian));
        assert_eq!("FI".parse(), Ok(Jurisdiction::Finnish));
        assert_eq!("fi-legacy".parse(), Ok(Jurisdiction::LegacyOrganizationUnit));
        assert!("se".parse::<Jurisdiction>().is_err());
        for jurisdiction in [
            Jurisdiction::Default, Jurisdiction::Finnish,
            Jurisdiction::Icelandic, Jurisdiction::Cambodian,
            Jurisdiction::LegacyOrganizationUnit,
        ] {
            assert_eq!(jurisdiction.name().parse(), Ok(jurisdiction));
        }
    }
}
