//! Client identifiers.

use std::{error, fmt};


//------------ ClientId ------------------------------------------------------

/// The identifier of a member or subsystem of a data exchange instance.
///
/// A member is identified by the instance it belongs to, its member class
/// and its member code. A subsystem additionally carries a subsystem code.
/// None of these parts can be blank.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawClientId")
)]
pub struct ClientId {
    instance: String,
    member_class: String,
    member_code: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    subsystem_code: Option<String>,
}

impl ClientId {
    /// Creates the identifier of a member.
    pub fn member(
        instance: impl Into<String>,
        member_class: impl Into<String>,
        member_code: impl Into<String>,
    ) -> Result<Self, InvalidClientId> {
        let res = Self::new_unchecked(
            instance.into(), member_class.into(), member_code.into(), None
        );
        res.check()?;
        Ok(res)
    }

    /// Creates the identifier of a subsystem.
    pub fn subsystem(
        instance: impl Into<String>,
        member_class: impl Into<String>,
        member_code: impl Into<String>,
        subsystem_code: impl Into<String>,
    ) -> Result<Self, InvalidClientId> {
        let res = Self::new_unchecked(
            instance.into(), member_class.into(), member_code.into(),
            Some(subsystem_code.into())
        );
        res.check()?;
        Ok(res)
    }

    /// Creates an identifier from parts already known to be non-blank.
    pub(crate) fn new_unchecked(
        instance: String,
        member_class: String,
        member_code: String,
        subsystem_code: Option<String>,
    ) -> Self {
        ClientId { instance, member_class, member_code, subsystem_code }
    }

    fn check(&self) -> Result<(), InvalidClientId> {
        let parts = [
            ("instance", Some(&self.instance)),
            ("member class", Some(&self.member_class)),
            ("member code", Some(&self.member_code)),
            ("subsystem code", self.subsystem_code.as_ref()),
        ];
        for (field, value) in parts {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(InvalidClientId(field))
                }
            }
        }
        Ok(())
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn member_class(&self) -> &str {
        &self.member_class
    }

    pub fn member_code(&self) -> &str {
        &self.member_code
    }

    pub fn subsystem_code(&self) -> Option<&str> {
        self.subsystem_code.as_deref()
    }

    pub fn is_subsystem(&self) -> bool {
        self.subsystem_code.is_some()
    }

    /// Returns the identifier of the member a subsystem belongs to.
    pub fn member_id(&self) -> ClientId {
        ClientId {
            subsystem_code: None,
            .. self.clone()
        }
    }
}


//--- Display

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.subsystem_code {
            Some(ref subsystem) => {
                write!(f, "SUBSYSTEM:{}/{}/{}/{}",
                    self.instance, self.member_class, self.member_code,
                    subsystem
                )
            }
            None => {
                write!(f, "MEMBER:{}/{}/{}",
                    self.instance, self.member_class, self.member_code
                )
            }
        }
    }
}


//--- Deserialize

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawClientId {
    instance: String,
    member_class: String,
    member_code: String,
    #[serde(default)]
    subsystem_code: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawClientId> for ClientId {
    type Error = InvalidClientId;

    fn try_from(raw: RawClientId) -> Result<Self, Self::Error> {
        let res = ClientId::new_unchecked(
            raw.instance, raw.member_class, raw.member_code,
            raw.subsystem_code
        );
        res.check()?;
        Ok(res)
    }
}


//------------ InvalidClientId -----------------------------------------------

/// A part of a client identifier was blank.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidClientId(&'static str);

impl InvalidClientId {
    /// Returns the name of the offending part.
    pub fn field(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for InvalidClientId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "client identifier with blank {}", self.0)
    }
}

impl error::Error for InvalidClientId { }


//============ Tests =========================================================
