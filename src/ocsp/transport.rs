//! The HTTP transport used by the OCSP client.
//!
//! The client itself doesn’t do HTTP. Instead, it hands a request to a
//! [`Transport`] and reads the response body through `std::io::Read`. An
//! implementation based on reqwest’s blocking client is available via the
//! `http` feature.

use std::{error, fmt, io};
use std::time::Duration;


//------------ Transport -----------------------------------------------------

/// A type that can perform HTTP GET requests.
pub trait Transport {
    /// Performs the request and returns the response.
    ///
    /// The implementation must honor the timeouts of the request. It must
    /// not treat an unexpected HTTP status as an error but return it as a
    /// regular response.
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<'a, T: Transport + ?Sized> Transport for &'a T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (*self).get(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.as_ref().get(request)
    }
}


//------------ HttpRequest ---------------------------------------------------

/// An HTTP GET request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub connect_timeout: Duration,

    /// The longest time to wait for data from the server.
    ///
    /// This applies to each read separately. A slow but steady response
    /// may take longer than this in total.
    pub read_timeout: Duration,
}


//------------ HttpResponse --------------------------------------------------

/// The response to an HTTP request.
pub struct HttpResponse {
    /// The status code.
    pub status: u16,

    /// The reason phrase if there was one.
    pub reason: Option<String>,

    /// The value of the Content-Type header.
    pub content_type: Option<String>,

    /// A reader for the response body.
    pub body: Box<dyn io::Read + Send>,
}

impl HttpResponse {
    /// Returns whether the status code indicates success.
    ///
    /// These are 200 to 208 and 226.
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200..=208 | 226)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}


//------------ TransportError ------------------------------------------------

/// Performing an HTTP request failed.
#[derive(Debug)]
pub enum TransportError {
    /// The connect or read timeout expired.
    Timeout,

    /// A connection to the server could not be established.
    Connect(String),

    /// Reading the response failed.
    Io(io::Error),

    /// Something else went wrong.
    Other(String),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                TransportError::Timeout
            }
            _ => TransportError::Io(err)
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransportError::Timeout => f.write_str("request timed out"),
            TransportError::Connect(ref msg) => {
                write!(f, "connection failed: {}", msg)
            }
            TransportError::Io(ref err) => err.fmt(f),
            TransportError::Other(ref msg) => f.write_str(msg),
        }
    }
}

impl error::Error for TransportError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            TransportError::Io(ref err) => Some(err),
            _ => None
        }
    }
}


//------------ ReqwestTransport ----------------------------------------------

#[cfg(feature = "http")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "http")]
mod reqwest_transport {
    use std::io;
    use std::io::Read;
    use log::debug;
    use reqwest::blocking::{Client, Response};
    use reqwest::header::CONTENT_TYPE;
    use super::{HttpRequest, HttpResponse, Transport, TransportError};

    /// A transport using reqwest’s blocking client.
    ///
    /// Both timeouts are properties of the client, so a new client is
    /// created for each request. The read timeout is given to the client
    /// rather than the request: the blocking client applies it separately
    /// to waiting for the response head and to every read of the body,
    /// whereas a request timeout is a deadline for the whole transfer.
    #[derive(Clone, Debug, Default)]
    pub struct ReqwestTransport {
        user_agent: Option<String>,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = Some(user_agent.into());
            self
        }
    }

    impl Transport for ReqwestTransport {
        fn get(
            &self, request: &HttpRequest
        ) -> Result<HttpResponse, TransportError> {
            let mut builder = Client::builder()
                .connect_timeout(request.connect_timeout)
                .timeout(request.read_timeout);
            if let Some(ref agent) = self.user_agent {
                builder = builder.user_agent(agent.as_str());
            }
            let client = builder.build().map_err(map_error)?;
            let mut req = client.get(&request.url);
            for (name, value) in &request.headers {
                req = req.header(name.as_str(), value.as_str());
            }
            debug!("GET {}", request.url);
            let response = req.send().map_err(map_error)?;
            let status = response.status();
            let content_type = response.headers().get(CONTENT_TYPE).and_then(
                |value| value.to_str().ok()
            ).map(Into::into);
            Ok(HttpResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().map(Into::into),
                content_type,
                body: Box::new(Body(response)),
            })
        }
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        }
        else if err.is_connect() {
            TransportError::Connect(err.to_string())
        }
        else {
            TransportError::Other(err.to_string())
        }
    }


    //------------ Body ------------------------------------------------------

    /// The body of a response.
    ///
    /// Reqwest reports an expired read timeout as an error of kind `Other`
    /// wrapping its own error. This turns those into `TimedOut` errors.
    struct Body(Response);

    impl Read for Body {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf).map_err(|err| {
                let timeout = err.get_ref().and_then(|inner| {
                    inner.downcast_ref::<reqwest::Error>()
                }).map(reqwest::Error::is_timeout).unwrap_or(false);
                if timeout {
                    io::Error::new(io::ErrorKind::TimedOut, err)
                }
                else {
                    err
                }
            })
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn success_statuses() {
        let response = |status| HttpResponse {
            status,
            reason: None,
            content_type: None,
            body: Box::new(io::empty()),
        };
        for status in [200, 204, 208, 226] {
            assert!(response(status).is_success(), "{}", status);
        }
        for status in [199, 209, 225, 301, 404, 500] {
            assert!(!response(status).is_success(), "{}", status);
        }
    }

    #[test]
    fn io_timeouts() {
        let err = TransportError::from(
            io::Error::new(io::ErrorKind::TimedOut, "slow")
        );
        assert!(matches!(err, TransportError::Timeout));
        let err = TransportError::from(
            io::Error::new(io::ErrorKind::ConnectionReset, "reset")
        );
        assert!(matches!(err, TransportError::Io(_)));
    }
}
