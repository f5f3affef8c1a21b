//! Reading MIME multipart bodies.
//!
//! This module implements a pull parser for the multipart media types
//! defined in [RFC 2046]. A [`MultipartReader`] wraps a buffered reader and
//! hands out the parts of the multipart body one by one. For each part,
//! [`next_part`][MultipartReader::next_part] provides the headers and the
//! caller then decides whether to buffer the body via
//! [`read_body`][MultipartReader::read_body] or to skip over it via
//! [`skip_body`][MultipartReader::skip_body]. If neither happens, the next
//! call to `next_part` skips the body.
//!
//! The reader is flat: the body of a part that is itself a multipart
//! entity is treated like any other body and is not descended into.
//!
//! The parser is lenient in the ways recommended by the RFC. It accepts
//! bare LF as well as CRLF line breaks and trailing white space after
//! boundary delimiters. Header lines can be folded. The preamble before
//! the first and the epilogue after the close delimiter are ignored. A
//! body that ends before the close delimiter is an error, though.
//!
//! [RFC 2046]: https://tools.ietf.org/html/rfc2046

use std::{error, fmt, io, mem, str};
use std::io::{BufRead, Read};
use bytes::Bytes;
use mime::Mime;


//------------ Configuration Constants ---------------------------------------

/// The default maximum size of a buffered body.
pub const DEFAULT_MAX_PART_SIZE: usize = 1024 * 1024;

/// The maximum number of octets read in one go.
///
/// Lines longer than this are processed in chunks.
const CHUNK_SIZE: u64 = 8 * 1024;

/// The maximum size of a header block.
const MAX_HEADER_SIZE: usize = 64 * 1024;


//------------ MultipartReader -----------------------------------------------

/// A pull parser for a multipart body.
pub struct MultipartReader<R> {
    /// The underlying reader.
    reader: R,

    /// The dash-boundary, i.e., two hyphens followed by the boundary.
    delimiter: Vec<u8>,

    /// The maximum size of a body returned by `read_body`.
    max_part_size: usize,

    /// Where we are.
    state: State,

    /// Did the last chunk read end a line?
    at_line_start: bool,

    /// A buffer for reading chunks.
    buf: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Before the first delimiter.
    Preamble,

    /// After a delimiter, before the headers of the part.
    Headers,

    /// After the headers, before the body of the part.
    Body,

    /// After the close delimiter.
    Done,
}

impl<R: BufRead> MultipartReader<R> {
    /// Creates a reader for a body with a known boundary.
    ///
    /// The reader must be positioned at the start of the multipart body,
    /// i.e., the headers of the entity must already have been consumed.
    /// This is the case for the body of an HTTP response.
    pub fn new(reader: R, boundary: &str) -> Self {
        let mut delimiter = Vec::with_capacity(boundary.len() + 2);
        delimiter.extend_from_slice(b"--");
        delimiter.extend_from_slice(boundary.as_bytes());
        MultipartReader {
            reader,
            delimiter,
            max_part_size: DEFAULT_MAX_PART_SIZE,
            state: State::Preamble,
            at_line_start: true,
            buf: Vec::new(),
        }
    }

    /// Creates a reader for a complete MIME entity.
    ///
    /// Reads the header block of the entity first and takes the boundary
    /// from its `Content-Type` header, which must be of a multipart type.
    pub fn from_message(reader: R) -> Result<Self, MultipartError> {
        let mut res = Self::new(reader, "");
        let headers = res.read_headers()?;
        let boundary = headers.content_type().and_then(boundary).ok_or(
            MultipartError::Malformed("missing multipart boundary")
        )?;
        res.delimiter.extend_from_slice(boundary.as_bytes());
        Ok(res)
    }

    /// Sets the maximum size of a buffered body.
    pub fn with_max_part_size(mut self, max_part_size: usize) -> Self {
        self.max_part_size = max_part_size;
        self
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Advances to the next part and returns its headers.
    ///
    /// Returns `Ok(None)` once the close delimiter has been reached.
    pub fn next_part(&mut self) -> Result<Option<PartHeaders>, MultipartError> {
        match self.state {
            State::Preamble => self.skip_preamble()?,
            State::Body => self.skip_body()?,
            State::Headers | State::Done => { }
        }
        if self.state == State::Done {
            return Ok(None)
        }
        let headers = self.read_headers()?;
        self.state = State::Body;
        Ok(Some(headers))
    }

    /// Reads the body of the current part.
    ///
    /// The line break before the delimiter belongs to the delimiter and is
    /// not part of the returned body. Fails if the body is larger than
    /// the maximum part size.
    ///
    /// Returns an empty body if called without a current part.
    pub fn read_body(&mut self) -> Result<Bytes, MultipartError> {
        if self.state != State::Body {
            return Ok(Bytes::new())
        }
        let mut body = Vec::new();
        let mut held_eol: &'static [u8] = b"";
        loop {
            if self.next_chunk()? {
                return Ok(body.into())
            }
            let (content, eol) = split_eol(&self.buf);
            if held_eol == b"\r" && content.is_empty() && eol == b"\n" {
                // A CRLF split between two chunks.
                held_eol = b"\r\n";
                continue
            }
            body.extend_from_slice(held_eol);
            body.extend_from_slice(content);
            held_eol = eol;
            if body.len() > self.max_part_size {
                return Err(MultipartError::PartTooLarge {
                    limit: self.max_part_size
                })
            }
        }
    }

    /// Skips over the body of the current part.
    pub fn skip_body(&mut self) -> Result<(), MultipartError> {
        if self.state != State::Body {
            return Ok(())
        }
        while !self.next_chunk()? { }
        Ok(())
    }

    /// Converts the reader into an iterator over buffered parts.
    pub fn parts(self) -> Parts<R> {
        Parts { reader: Some(self) }
    }

    fn skip_preamble(&mut self) -> Result<(), MultipartError> {
        self.state = State::Body;
        self.skip_body().map_err(|err| match err {
            MultipartError::Malformed(_) => {
                MultipartError::Malformed("missing first boundary delimiter")
            }
            err => err
        })
    }

    /// Reads the next chunk into the buffer.
    ///
    /// Returns whether the chunk was a delimiter line, in which case the
    /// state has been updated accordingly. Reaching the end of input is an
    /// error since a body always ends with a delimiter.
    fn next_chunk(&mut self) -> Result<bool, MultipartError> {
        self.buf.clear();
        let read = (&mut self.reader).take(CHUNK_SIZE).read_until(
            b'\n', &mut self.buf
        )?;
        if read == 0 {
            return Err(MultipartError::Malformed("missing close delimiter"))
        }
        let line_start = mem::replace(
            &mut self.at_line_start, self.buf.ends_with(b"\n")
        );
        if !line_start {
            return Ok(false)
        }
        match self.delimiter_kind() {
            Some(Delimiter::Part) => {
                self.state = State::Headers;
                Ok(true)
            }
            Some(Delimiter::Close) => {
                self.state = State::Done;
                Ok(true)
            }
            None => Ok(false)
        }
    }

    /// Checks whether the buffer contains a delimiter line.
    fn delimiter_kind(&self) -> Option<Delimiter> {
        let rest = self.buf.strip_prefix(self.delimiter.as_slice())?;
        let (rest, kind) = match rest.strip_prefix(b"--") {
            Some(rest) => (rest, Delimiter::Close),
            None => (rest, Delimiter::Part),
        };
        if rest.iter().all(u8::is_ascii_whitespace) {
            Some(kind)
        }
        else {
            None
        }
    }

    /// Reads a header block up to and including the empty line.
    fn read_headers(&mut self) -> Result<PartHeaders, MultipartError> {
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut size = 0;
        loop {
            self.buf.clear();
            let read = (&mut self.reader).take(CHUNK_SIZE).read_until(
                b'\n', &mut self.buf
            )?;
            if read == 0 {
                return Err(MultipartError::Malformed("unexpected end of headers"))
            }
            size += read;
            if !self.buf.ends_with(b"\n") || size > MAX_HEADER_SIZE {
                return Err(MultipartError::Malformed("header block too long"))
            }
            let (line, _) = split_eol(&self.buf);
            if line.is_empty() {
                self.at_line_start = true;
                return Ok(PartHeaders { headers })
            }
            let line = str::from_utf8(line).map_err(|_| {
                MultipartError::Malformed("invalid header encoding")
            })?;
            if line.starts_with(' ') || line.starts_with('\t') {
                match headers.last_mut() {
                    Some((_, value)) => {
                        value.push(' ');
                        value.push_str(line.trim());
                    }
                    None => {
                        return Err(MultipartError::Malformed(
                            "continuation line without header"
                        ))
                    }
                }
                continue
            }
            match line.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    headers.push((name.trim().into(), value.trim().into()))
                }
                _ => return Err(MultipartError::Malformed("invalid header line"))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Delimiter {
    Part,
    Close,
}

/// Splits a line into its content and its line break.
///
/// A chunk that ends in the middle of a CRLF gets the CR as its line break.
fn split_eol(line: &[u8]) -> (&[u8], &'static [u8]) {
    if let Some(content) = line.strip_suffix(b"\r\n") {
        (content, b"\r\n")
    }
    else if let Some(content) = line.strip_suffix(b"\n") {
        (content, b"\n")
    }
    else if let Some(content) = line.strip_suffix(b"\r") {
        (content, b"\r")
    }
    else {
        (line, b"")
    }
}


//------------ boundary ------------------------------------------------------

/// Returns the boundary of a multipart content type.
///
/// Returns `None` if the content type can’t be parsed, isn’t a multipart
/// type, or lacks a non-empty boundary parameter.
pub fn boundary(content_type: &str) -> Option<String> {
    let media_type = content_type.parse::<Mime>().ok()?;
    if media_type.type_() != mime::MULTIPART {
        return None
    }
    let boundary = media_type.get_param(mime::BOUNDARY)?;
    let boundary = boundary.as_str().trim_matches('"');
    if boundary.is_empty() {
        None
    }
    else {
        Some(boundary.into())
    }
}


//------------ PartHeaders ---------------------------------------------------

/// The headers of a body part.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PartHeaders {
    headers: Vec<(String, String)>,
}

impl PartHeaders {
    /// Returns the value of the first header with the given name.
    ///
    /// Header names are compared ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(key, _)| {
            key.eq_ignore_ascii_case(name)
        }).map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("Content-Type")
    }

    /// Returns the parsed content type.
    ///
    /// A part without a content type is `text/plain`. Returns `None` if
    /// the content type is present but can’t be parsed.
    pub fn media_type(&self) -> Option<Mime> {
        match self.content_type() {
            Some(content_type) => content_type.parse().ok(),
            None => Some(mime::TEXT_PLAIN),
        }
    }

    /// Returns whether the content type has the given essence.
    ///
    /// The essence is the type and subtype without parameters, e.g.,
    /// `"application/ocsp-response"`. It is compared ignoring ASCII case.
    pub fn has_media_type(&self, essence: &str) -> bool {
        self.media_type().map(|media_type| {
            media_type.essence_str().eq_ignore_ascii_case(essence)
        }).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.headers.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}


//------------ BodyPart ------------------------------------------------------

/// A body part with its headers and buffered content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BodyPart {
    pub headers: PartHeaders,
    pub body: Bytes,
}

impl BodyPart {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.content_type()
    }
}


//------------ Parts ---------------------------------------------------------

/// An iterator over the buffered parts of a multipart body.
///
/// The iterator ends after the close delimiter or after the first error.
pub struct Parts<R> {
    reader: Option<MultipartReader<R>>,
}

impl<R: BufRead> Iterator for Parts<R> {
    type Item = Result<BodyPart, MultipartError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let res = match reader.next_part() {
            Ok(Some(headers)) => {
                reader.read_body().map(|body| BodyPart { headers, body })
            }
            Ok(None) => {
                self.reader = None;
                return None
            }
            Err(err) => Err(err)
        };
        if res.is_err() {
            self.reader = None;
        }
        Some(res)
    }
}


//============ Errors ========================================================

//------------ MultipartError ------------------------------------------------

/// An error happened while reading a multipart body.
#[derive(Debug)]
pub enum MultipartError {
    /// Reading from the underlying reader failed.
    Io(io::Error),

    /// The body is not correctly formed.
    Malformed(&'static str),

    /// A part was larger than allowed.
    PartTooLarge {
        limit: usize,
    },
}

impl From<io::Error> for MultipartError {
    fn from(err: io::Error) -> Self {
        MultipartError::Io(err)
    }
}

impl fmt::Display for MultipartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MultipartError::Io(ref err) => err.fmt(f),
            MultipartError::Malformed(msg) => {
                write!(f, "malformed multipart body: {}", msg)
            }
            MultipartError::PartTooLarge { limit } => {
                write!(f, "body part exceeds {} octets", limit)
            }
        }
    }
}

impl error::Error for MultipartError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            MultipartError::Io(ref err) => Some(err),
            _ => None
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn reader(data: &'static [u8]) -> MultipartReader<&'static [u8]> {
        MultipartReader::new(data, "frontier")
    }

    #[test]
    fn two_parts() {
        let data = b"preamble\r\n\
            --frontier\r\n\
            Content-Type: application/ocsp-response\r\n\
            \r\n\
            \x30\x03\x0a\x01\x00\r\n\
            --frontier\r\n\
            Content-Type: text/plain\r\n\
            \r\n\
            hello\r\n\
            --frontier--\r\n\
            epilogue";
        let mut reader = reader(data);
        let headers = reader.next_part().unwrap().unwrap();
        assert!(headers.has_media_type("application/ocsp-response"));
        assert_eq!(reader.read_body().unwrap().as_ref(), b"\x30\x03\x0a\x01\x00");
        let headers = reader.next_part().unwrap().unwrap();
        assert_eq!(headers.content_type(), Some("text/plain"));
        assert_eq!(reader.read_body().unwrap().as_ref(), b"hello");
        assert!(reader.next_part().unwrap().is_none());
        assert!(reader.next_part().unwrap().is_none());
    }

    #[test]
    fn body_line_breaks_are_kept() {
        let data = b"--frontier\n\
            \n\
            line one\r\n\
            \r\n\
            line two\n\
            --frontier-- \n";
        let mut reader = reader(data);
        let headers = reader.next_part().unwrap().unwrap();
        assert_eq!(headers.content_type(), None);
        assert!(headers.has_media_type("text/plain"));
        assert_eq!(
            reader.read_body().unwrap().as_ref(),
            b"line one\r\n\r\nline two"
        );
        assert!(reader.next_part().unwrap().is_none());
    }

    #[test]
    fn unread_bodies_are_skipped() {
        let data = b"--frontier\r\n\r\nfirst\r\n\
            --frontier  \t\r\n\r\nsecond\r\n--frontier--";
        let mut reader = reader(data);
        reader.next_part().unwrap().unwrap();
        reader.next_part().unwrap().unwrap();
        assert_eq!(reader.read_body().unwrap().as_ref(), b"second");
        assert!(reader.next_part().unwrap().is_none());
    }

    #[test]
    fn lookalike_delimiters_are_content() {
        let data = b"--frontier\r\n\r\n--frontierX\r\n -- frontier\r\n\
            --frontier--\r\n";
        let mut reader = reader(data);
        reader.next_part().unwrap().unwrap();
        assert_eq!(
            reader.read_body().unwrap().as_ref(),
            b"--frontierX\r\n -- frontier"
        );
    }

    #[test]
    fn folded_headers() {
        let data = b"--frontier\r\n\
            Content-Type: multipart/mixed;\r\n \
            boundary=inner\r\n\
            X-Other : value \r\n\
            \r\n\
            --inner\r\n\r\nnested\r\n--inner--\r\n\
            --frontier--\r\n";
        let mut reader = reader(data);
        let headers = reader.next_part().unwrap().unwrap();
        assert_eq!(
            headers.content_type(), Some("multipart/mixed; boundary=inner")
        );
        assert_eq!(headers.get("x-other"), Some("value"));
        assert_eq!(
            reader.read_body().unwrap().as_ref(),
            b"--inner\r\n\r\nnested\r\n--inner--"
        );
    }

    #[test]
    fn malformed_bodies() {
        let mut reader = reader(b"no delimiter at all\r\n");
        assert!(matches!(
            reader.next_part(), Err(MultipartError::Malformed(_))
        ));

        let mut reader = self::reader(b"--frontier\r\n\r\ntruncated");
        reader.next_part().unwrap().unwrap();
        assert!(matches!(
            reader.read_body(), Err(MultipartError::Malformed(_))
        ));

        let mut reader = self::reader(b"--frontier\r\nbroken header\r\n\r\n");
        assert!(matches!(
            reader.next_part(), Err(MultipartError::Malformed(_))
        ));
    }

    #[test]
    fn part_size_limit() {
        let data = b"--frontier\r\n\r\n0123456789\r\n--frontier--\r\n";
        let mut reader = reader(data).with_max_part_size(5);
        reader.next_part().unwrap().unwrap();
        assert!(matches!(
            reader.read_body(), Err(MultipartError::PartTooLarge { limit: 5 })
        ));
    }

    #[test]
    fn long_lines() {
        let mut data = b"--frontier\r\n\r\n".to_vec();
        data.extend(std::iter::repeat(b'x').take(20_000));
        data.extend_from_slice(b"--frontier\r\n--frontier--\r\n");
        let mut reader = MultipartReader::new(data.as_slice(), "frontier");
        reader.next_part().unwrap().unwrap();
        let body = reader.read_body().unwrap();
        assert_eq!(body.len(), 20_000 + 10);
    }

    #[test]
    fn from_message() {
        let data = b"MIME-Version: 1.0\r\n\
            Content-Type: multipart/related; boundary=\"frontier\"\r\n\
            \r\n\
            --frontier\r\n\r\none\r\n--frontier--\r\n";
        let parts = MultipartReader::from_message(&data[..]).unwrap().parts();
        let parts = parts.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].body.as_ref(), b"one");

        let data = b"Content-Type: text/plain\r\n\r\nhello";
        assert!(MultipartReader::from_message(&data[..]).is_err());
    }

    #[test]
    fn parts_stop_after_error() {
        let mut parts = reader(b"--frontier\r\n\r\nopen").parts();
        assert!(parts.next().unwrap().is_err());
        assert!(parts.next().is_none());
    }

    #[test]
    fn boundaries() {
        assert_eq!(
            boundary("multipart/related; boundary=abc").as_deref(), Some("abc")
        );
        assert_eq!(
            boundary("Multipart/Related; type=\"x/y\"; boundary=\"a b\"")
                .as_deref(),
            Some("a b")
        );
        assert_eq!(boundary("multipart/related"), None);
        assert_eq!(boundary("text/plain; boundary=abc"), None);
        assert_eq!(boundary("not a type"), None);
    }
}
