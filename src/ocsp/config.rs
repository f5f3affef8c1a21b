//! Configuration of the OCSP client.

use std::{error, fmt};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use super::multipart::DEFAULT_MAX_PART_SIZE;


//------------ Property Names ------------------------------------------------

/// The property holding the port of OCSP responders.
pub const PORT_PROPERTY: &str = "xroad.proxy.ocsp-responder-port";

/// The property holding the connect timeout in milliseconds.
pub const CONNECT_TIMEOUT_PROPERTY: &str
    = "xroad.proxy.ocsp-responder-client-connect-timeout";

/// The property holding the read timeout in milliseconds.
pub const READ_TIMEOUT_PROPERTY: &str
    = "xroad.proxy.ocsp-responder-client-read-timeout";

/// The port OCSP responders listen on by default.
pub const DEFAULT_PORT: u16 = 5577;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(20_000);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(30_000);


//------------ OcspClientConfig ----------------------------------------------

/// The configuration of a [`HashOcspClient`][super::HashOcspClient].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct OcspClientConfig {
    port: u16,
    connect_timeout: Duration,
    read_timeout: Duration,
    max_part_size: usize,
    malformed_part_policy: MalformedPartPolicy,
}

impl OcspClientConfig {
    /// Creates a configuration from a set of properties.
    ///
    /// Properties that are missing keep their default value. The timeouts
    /// are given in milliseconds.
    pub fn from_properties(
        properties: &HashMap<String, String>
    ) -> Result<Self, ConfigError> {
        let mut res = Self::default();
        if let Some(port) = property(properties, PORT_PROPERTY)? {
            res.port = port;
        }
        if let Some(millis) = property(properties, CONNECT_TIMEOUT_PROPERTY)? {
            res.connect_timeout = Duration::from_millis(millis);
        }
        if let Some(millis) = property(properties, READ_TIMEOUT_PROPERTY)? {
            res.read_timeout = Duration::from_millis(millis);
        }
        Ok(res)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the maximum size of a single OCSP response.
    pub fn with_max_part_size(mut self, size: usize) -> Self {
        self.max_part_size = size;
        self
    }

    pub fn with_malformed_part_policy(
        mut self, policy: MalformedPartPolicy
    ) -> Self {
        self.malformed_part_policy = policy;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn max_part_size(&self) -> usize {
        self.max_part_size
    }

    pub fn malformed_part_policy(&self) -> MalformedPartPolicy {
        self.malformed_part_policy
    }
}

impl Default for OcspClientConfig {
    fn default() -> Self {
        OcspClientConfig {
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_part_size: DEFAULT_MAX_PART_SIZE,
            malformed_part_policy: MalformedPartPolicy::default(),
        }
    }
}

fn property<T: FromStr>(
    properties: &HashMap<String, String>, key: &'static str
) -> Result<Option<T>, ConfigError> {
    match properties.get(key) {
        Some(value) => {
            value.trim().parse().map(Some).map_err(|_| ConfigError {
                key, value: value.clone()
            })
        }
        None => Ok(None)
    }
}


//------------ MalformedPartPolicy -------------------------------------------

/// What to do with a body part that isn’t a valid OCSP response.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum MalformedPartPolicy {
    /// Fail the whole batch.
    #[default]
    Fail,

    /// Log and drop the part, returning the remaining responses.
    Skip,
}


//------------ ConfigError ---------------------------------------------------

/// A configuration property had an invalid value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigError {
    key: &'static str,
    value: String,
}

impl ConfigError {
    pub fn key(&self) -> &str {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid value '{}' for property {}", self.value, self.key)
    }
}

impl error::Error for ConfigError { }


//============ Tests =========================================================
