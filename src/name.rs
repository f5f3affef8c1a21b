//! Distinguished names and the reading of their attributes.
//!
//! Certificates identify their subject and issuer through an X.500
//! distinguished name, a sequence of relative distinguished names (RDNs)
//! each holding one or more attribute type and value pairs. The
//! [`DistinguishedName`] type provides a fully decoded, immutable view of
//! such a name that can be produced from its DER encoding, directly from a
//! DER-encoded certificate, or from the string representation defined in
//! [RFC 4514].
//!
//! Reading an attribute returns the first value found for the attribute
//! type. Absence of an attribute is a regular outcome and is reported as
//! `None` rather than as an error. Identity decoding relies on this.
//!
//! [RFC 4514]: https://tools.ietf.org/html/rfc4514

use std::{error, fmt, str};
use std::convert::Infallible;
use bcder::{decode, ConstOid, Mode, Oid, Tag};
use bcder::decode::{DecodeError, IntoSource, Source};
use bytes::Bytes;
use crate::oid;


//------------ DistinguishedName ---------------------------------------------

/// A decoded X.500 distinguished name.
///
/// The relative distinguished names are kept in the order in which they
/// appear in the ASN.1 encoding. This is the reverse of the order used by
/// the string representation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DistinguishedName {
    rdns: Vec<RelativeName>,
}

/// # Creation
///
impl DistinguishedName {
    /// Creates a name from a list of relative names in ASN.1 order.
    pub fn new(rdns: Vec<RelativeName>) -> Self {
        DistinguishedName { rdns }
    }

    /// Creates a name with one single-valued RDN per attribute.
    ///
    /// The attributes are given in ASN.1 order, i.e., usually starting with
    /// the country.
    pub fn from_attributes<'a, I>(attrs: I) -> Self
    where I: IntoIterator<Item = (ConstOid, &'a str)> {
        DistinguishedName {
            rdns: attrs.into_iter().map(|(oid, value)| {
                RelativeName::single(Attribute::new(oid, value))
            }).collect()
        }
    }

    /// Appends a relative name at the end.
    pub fn push(&mut self, rdn: RelativeName) {
        self.rdns.push(rdn)
    }
}

/// # Reading Attributes
///
impl DistinguishedName {
    /// Returns the first value of the attribute with the given type.
    ///
    /// Returns `None` if the name doesn’t contain the attribute at all.
    pub fn read<T: AsRef<[u8]>>(&self, oid: &Oid<T>) -> Option<String> {
        self.read_str(oid).map(Into::into)
    }

    /// Returns a reference to the first value of an attribute.
    pub fn read_str<T: AsRef<[u8]>>(&self, oid: &Oid<T>) -> Option<&str> {
        self.attributes().find(|attr| {
            attr.oid.0.as_ref() == oid.0.as_ref()
        }).map(|attr| attr.value.as_str())
    }

    pub fn common_name(&self) -> Option<&str> {
        self.read_str(&oid::AT_COMMON_NAME)
    }

    /// Returns the value of the `serialNumber` attribute.
    ///
    /// This is the attribute of the name, not the serial number of the
    /// certificate.
    pub fn serial_number(&self) -> Option<&str> {
        self.read_str(&oid::AT_SERIAL_NUMBER)
    }

    pub fn country(&self) -> Option<&str> {
        self.read_str(&oid::AT_COUNTRY_NAME)
    }

    pub fn organization(&self) -> Option<&str> {
        self.read_str(&oid::AT_ORGANIZATION_NAME)
    }

    pub fn organizational_unit(&self) -> Option<&str> {
        self.read_str(&oid::AT_ORGANIZATIONAL_UNIT_NAME)
    }

    /// Returns an iterator over all attributes in ASN.1 order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.rdns.iter().flat_map(|rdn| rdn.attrs.iter())
    }

    /// Returns a slice of the relative names.
    pub fn rdns(&self) -> &[RelativeName] {
        &self.rdns
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }
}

/// # Decoding
///
/// ```txt
/// Name ::= CHOICE { -- only one possibility for now --
///      rdnSequence  RDNSequence }
/// RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
/// RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
/// AttributeTypeAndValue ::= SEQUENCE {
///      type     AttributeType,
///      value    AttributeValue }
/// ```
///
/// An empty RDN sequence is accepted since certificates that carry their
/// subject in the subject alternative name have one. An empty set is not.
impl DistinguishedName {
    /// Decodes a source as a DER-encoded name.
    pub fn decode<S: IntoSource>(
        source: S
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    /// Takes a name from the beginning of a constructed value.
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| { // RDNSequence
            let mut rdns = Vec::new();
            while let Some(rdn) = cons.take_opt_set(|cons| {
                let mut attrs = Vec::new();
                while let Some(attr) = cons.take_opt_sequence(|cons| {
                    let oid = Oid::take_from(cons)?;
                    let value = take_directory_string(cons)?;
                    Ok(Attribute { oid, value })
                })? {
                    attrs.push(attr);
                }
                if attrs.is_empty() {
                    return Err(cons.content_err(
                        "empty relative distinguished name"
                    ))
                }
                Ok(RelativeName { attrs })
            })? {
                rdns.push(rdn);
            }
            Ok(DistinguishedName { rdns })
        })
    }

    /// Decodes the subject name of a DER-encoded certificate.
    pub fn from_certificate_subject(
        der: &[u8]
    ) -> Result<Self, DecodeError<Infallible>> {
        Mode::Der.decode(der, take_certificate_names).map(|(_, subject)| {
            subject
        })
    }

    /// Decodes the issuer name of a DER-encoded certificate.
    pub fn from_certificate_issuer(
        der: &[u8]
    ) -> Result<Self, DecodeError<Infallible>> {
        Mode::Der.decode(der, take_certificate_names).map(|(issuer, _)| {
            issuer
        })
    }
}

/// Takes issuer and subject from a certificate.
///
/// ```txt
/// Certificate  ::=  SEQUENCE  {
///      tbsCertificate       TBSCertificate,
///      signatureAlgorithm   AlgorithmIdentifier,
///      signatureValue       BIT STRING  }
///
/// TBSCertificate  ::=  SEQUENCE  {
///      version         [0]  EXPLICIT Version DEFAULT v1,
///      serialNumber         CertificateSerialNumber,
///      signature            AlgorithmIdentifier,
///      issuer               Name,
///      validity             Validity,
///      subject              Name,
///      ... }
/// ```
///
/// Everything but the two names is skipped over without being checked.
fn take_certificate_names<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<(DistinguishedName, DistinguishedName), DecodeError<S::Error>> {
    cons.take_sequence(|cons| {
        let names = cons.take_sequence(|cons| {
            cons.take_opt_constructed_if(Tag::CTX_0, |cons| cons.skip_all())?;
            cons.take_primitive_if(Tag::INTEGER, |prim| {
                prim.take_all().map(|_| ())
            })?;
            cons.take_sequence(|cons| cons.skip_all())?;
            let issuer = DistinguishedName::take_from(cons)?;
            cons.take_sequence(|cons| cons.skip_all())?;
            let subject = DistinguishedName::take_from(cons)?;
            cons.skip_all()?;
            Ok((issuer, subject))
        })?;
        cons.skip_all()?;
        Ok(names)
    })
}

/// Takes an attribute value encoded as one of the directory string types.
///
/// TeletexString is treated as Latin-1 which is what it is used for in
/// practice.
fn take_directory_string<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<String, DecodeError<S::Error>> {
    cons.take_value(|tag, content| {
        let data = content.as_primitive()?.take_all()?;
        if
            tag == Tag::UTF8_STRING || tag == Tag::PRINTABLE_STRING
            || tag == Tag::IA5_STRING || tag == Tag::NUMERIC_STRING
            || tag == Tag::VISIBLE_STRING
        {
            String::from_utf8(data.to_vec()).map_err(|_| {
                content.content_err("invalid string in name attribute")
            })
        }
        else if tag == Tag::TELETEX_STRING {
            Ok(data.iter().map(|&ch| char::from(ch)).collect())
        }
        else if tag == Tag::BMP_STRING {
            if data.len() % 2 != 0 {
                return Err(content.content_err(
                    "invalid BMPString in name attribute"
                ))
            }
            char::decode_utf16(
                data.chunks(2).map(|c| u16::from_be_bytes([c[0], c[1]]))
            ).collect::<Result<String, _>>().map_err(|_| {
                content.content_err("invalid BMPString in name attribute")
            })
        }
        else {
            Err(content.content_err(
                "unsupported string type in name attribute"
            ))
        }
    })
}


//--- FromStr and Display

impl str::FromStr for DistinguishedName {
    type Err = ParseNameError;

    /// Parses the string representation of a name.
    ///
    /// The representation lists the RDNs starting with the last, so the
    /// order is reversed while parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = NameParser::new(s);
        let mut rdns = Vec::new();
        if parser.at_end() {
            return Ok(DistinguishedName::default())
        }
        loop {
            let mut attrs = vec![parser.attribute()?];
            loop {
                match parser.next_char() {
                    Some('+') => attrs.push(parser.attribute()?),
                    Some(',') | Some(';') => {
                        rdns.push(RelativeName { attrs });
                        break
                    }
                    None => {
                        rdns.push(RelativeName { attrs });
                        rdns.reverse();
                        return Ok(DistinguishedName { rdns })
                    }
                    Some(_) => return Err(ParseNameError::BAD_SEPARATOR)
                }
            }
        }
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, rdn) in self.rdns.iter().rev().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            rdn.fmt(f)?;
        }
        Ok(())
    }
}


//------------ RelativeName --------------------------------------------------

/// A relative distinguished name.
///
/// Almost always this holds exactly one attribute but multi-valued RDNs
/// are permitted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelativeName {
    attrs: Vec<Attribute>,
}

impl RelativeName {
    /// Creates a new relative name.
    ///
    /// Returns `None` if `attrs` is empty.
    pub fn new(attrs: Vec<Attribute>) -> Option<Self> {
        if attrs.is_empty() {
            None
        }
        else {
            Some(RelativeName { attrs })
        }
    }

    pub fn single(attr: Attribute) -> Self {
        RelativeName { attrs: vec![attr] }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attrs
    }
}

impl fmt::Display for RelativeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, attr) in self.attrs.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            attr.fmt(f)?;
        }
        Ok(())
    }
}


//------------ Attribute -----------------------------------------------------

/// An attribute type and its value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    oid: Oid<Bytes>,
    value: String,
}

impl Attribute {
    pub fn new(oid: ConstOid, value: impl Into<String>) -> Self {
        Attribute {
            oid: Oid(Bytes::from_static(oid.0)),
            value: value.into()
        }
    }

    pub fn oid(&self) -> &Oid<Bytes> {
        &self.oid
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the short name of the attribute type if there is one.
    pub fn keyword(&self) -> Option<&'static str> {
        KEYWORDS.iter().find(|(_, oid)| {
            oid.0 == self.oid.0.as_ref()
        }).map(|(keyword, _)| *keyword)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.keyword() {
            Some(keyword) => f.write_str(keyword)?,
            None => write_dotted(self.oid.0.as_ref(), f)?,
        }
        f.write_str("=")?;
        let last = self.value.chars().count().saturating_sub(1);
        for (idx, ch) in self.value.chars().enumerate() {
            let escape = matches!(ch, ',' | '+' | '"' | '\\' | '<' | '>' | ';')
                || (idx == 0 && (ch == '#' || ch == ' '))
                || (idx == last && ch == ' ');
            if escape {
                f.write_str("\\")?;
            }
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}


//------------ Attribute Keywords --------------------------------------------

/// The short names understood in the string representation.
///
/// The first entry for an OID is used when displaying.
const KEYWORDS: &[(&str, ConstOid)] = &[
    ("CN", oid::AT_COMMON_NAME),
    ("SERIALNUMBER", oid::AT_SERIAL_NUMBER),
    ("C", oid::AT_COUNTRY_NAME),
    ("L", oid::AT_LOCALITY_NAME),
    ("ST", oid::AT_STATE_OR_PROVINCE_NAME),
    ("O", oid::AT_ORGANIZATION_NAME),
    ("OU", oid::AT_ORGANIZATIONAL_UNIT_NAME),
    ("DC", oid::AT_DOMAIN_COMPONENT),
    ("UID", oid::AT_USER_ID),
    ("EMAILADDRESS", oid::AT_EMAIL_ADDRESS),
    ("E", oid::AT_EMAIL_ADDRESS),
];

/// Writes the dotted decimal form of an encoded object identifier.
fn write_dotted(oid: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    let mut first = true;
    let mut arc: u64 = 0;
    for &octet in oid {
        arc = (arc << 7) | u64::from(octet & 0x7F);
        if octet & 0x80 != 0 {
            continue
        }
        if first {
            let (top, rest) = match arc {
                0..=39 => (0, arc),
                40..=79 => (1, arc - 40),
                _ => (2, arc - 80),
            };
            write!(f, "{}.{}", top, rest)?;
            first = false;
        }
        else {
            write!(f, ".{}", arc)?;
        }
        arc = 0;
    }
    Ok(())
}

/// Encodes a dotted decimal object identifier.
fn encode_dotted(s: &str) -> Option<Oid<Bytes>> {
    let arcs = s.split('.').map(|arc| {
        if arc.is_empty() || !arc.bytes().all(|ch| ch.is_ascii_digit()) {
            None
        }
        else {
            arc.parse::<u64>().ok()
        }
    }).collect::<Option<Vec<_>>>()?;
    if arcs.len() < 2 || arcs[0] > 2 || (arcs[0] < 2 && arcs[1] > 39) {
        return None
    }
    let mut res = Vec::new();
    let first = arcs[0].checked_mul(40)?.checked_add(arcs[1])?;
    for arc in Some(first).into_iter().chain(arcs[2..].iter().copied()) {
        let mut septets = vec![(arc & 0x7F) as u8];
        let mut rest = arc >> 7;
        while rest != 0 {
            septets.push((rest & 0x7F) as u8 | 0x80);
            rest >>= 7;
        }
        res.extend(septets.iter().rev());
    }
    Some(Oid(Bytes::from(res)))
}


//------------ NameParser ----------------------------------------------------

/// A cursor over the string representation of a name.
struct NameParser {
    chars: Vec<char>,
    pos: usize,
}

impl NameParser {
    fn new(s: &str) -> Self {
        let mut res = NameParser { chars: s.chars().collect(), pos: 0 };
        res.skip_spaces();
        res
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next_char(&mut self) -> Option<char> {
        let res = self.peek();
        if res.is_some() {
            self.pos += 1;
        }
        res
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    /// Parses one `type=value` pair.
    ///
    /// Leaves the cursor at the separator following the value.
    fn attribute(&mut self) -> Result<Attribute, ParseNameError> {
        self.skip_spaces();
        let mut keyword = String::new();
        loop {
            match self.next_char() {
                Some('=') => break,
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '.' => {
                    keyword.push(ch)
                }
                Some(' ') => {
                    self.skip_spaces();
                    if self.next_char() != Some('=') {
                        return Err(ParseNameError::BAD_TYPE)
                    }
                    break
                }
                _ => return Err(ParseNameError::BAD_TYPE)
            }
        }
        let oid = Self::attribute_type(&keyword)?;
        self.skip_spaces();
        let value = self.value()?;
        Ok(Attribute { oid, value })
    }

    fn attribute_type(keyword: &str) -> Result<Oid<Bytes>, ParseNameError> {
        if let Some((_, oid)) = KEYWORDS.iter().find(|(name, _)| {
            name.eq_ignore_ascii_case(keyword)
        }) {
            return Ok(Oid(Bytes::from_static(oid.0)))
        }
        let dotted = match keyword.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("oid.") => {
                &keyword[4..]
            }
            _ => keyword
        };
        encode_dotted(dotted).ok_or(ParseNameError::BAD_TYPE)
    }

    /// Parses a plain or quoted value.
    ///
    /// Unescaped trailing spaces of a plain value are dropped.
    fn value(&mut self) -> Result<String, ParseNameError> {
        let quoted = match self.peek() {
            Some('"') => {
                self.pos += 1;
                true
            }
            Some('#') => return Err(ParseNameError::HEX_VALUE),
            _ => false
        };
        let mut value = Vec::new();
        let mut significant = 0;
        loop {
            match self.next_char() {
                Some('"') if quoted => {
                    self.skip_spaces();
                    if !matches!(self.peek(), None | Some(',' | ';' | '+')) {
                        return Err(ParseNameError::BAD_SEPARATOR)
                    }
                    break
                }
                None if quoted => {
                    return Err(ParseNameError::UNTERMINATED_QUOTE)
                }
                None => break,
                Some(',' | ';' | '+') if !quoted => {
                    self.pos -= 1;
                    break
                }
                Some('"') => return Err(ParseNameError::BAD_VALUE),
                Some('\\') => {
                    self.escape(&mut value)?;
                    significant = value.len();
                }
                Some(ch) => {
                    push_char(&mut value, ch);
                    if quoted || ch != ' ' {
                        significant = value.len();
                    }
                }
            }
        }
        value.truncate(significant);
        String::from_utf8(value).map_err(|_| ParseNameError::BAD_ESCAPE)
    }

    /// Processes the escape sequence after a backslash.
    fn escape(&mut self, value: &mut Vec<u8>) -> Result<(), ParseNameError> {
        match self.next_char() {
            Some(ch) if ch.is_ascii_hexdigit() => {
                let low = self.next_char().and_then(|ch| ch.to_digit(16));
                match (ch.to_digit(16), low) {
                    (Some(high), Some(low)) => {
                        value.push((high << 4 | low) as u8);
                        Ok(())
                    }
                    _ => Err(ParseNameError::BAD_ESCAPE)
                }
            }
            Some(ch) if ",+\"\\<>;=# ".contains(ch) => {
                push_char(value, ch);
                Ok(())
            }
            _ => Err(ParseNameError::BAD_ESCAPE)
        }
    }
}

fn push_char(value: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    value.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}


//============ Errors ========================================================

//------------ ParseNameError ------------------------------------------------

/// An error happened while parsing the string representation of a name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseNameError(&'static str);

impl ParseNameError {
    const BAD_TYPE: Self = ParseNameError("invalid attribute type");
    const BAD_VALUE: Self = ParseNameError("invalid attribute value");
    const BAD_ESCAPE: Self = ParseNameError("invalid escape sequence");
    const BAD_SEPARATOR: Self = ParseNameError("expected ',' or '+'");
    const UNTERMINATED_QUOTE: Self = ParseNameError("unterminated quote");
    const HEX_VALUE: Self = ParseNameError(
        "hex-encoded attribute values are not supported"
    );
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl error::Error for ParseNameError { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    /// Encodes a DER value with a short length.
    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        assert!(content.len() < 128);
        let mut res = vec![tag, content.len() as u8];
        res.extend_from_slice(content);
        res
    }

    fn rdn(oid: ConstOid, tag: u8, value: &[u8]) -> Vec<u8> {
        let mut atv = tlv(0x06, oid.0);
        atv.extend(tlv(tag, value));
        tlv(0x31, &tlv(0x30, &atv))
    }

    #[test]
    fn decode_der_name() {
        let mut content = rdn(oid::AT_COUNTRY_NAME, 0x13, b"FI");
        content.extend(rdn(oid::AT_ORGANIZATION_NAME, 0x0c, b"instX"));
        content.extend(rdn(oid::AT_COMMON_NAME, 0x0c, b"1234"));
        let der = tlv(0x30, &content);
        let name = DistinguishedName::decode(der.as_slice()).unwrap();
        assert_eq!(name.country(), Some("FI"));
        assert_eq!(name.organization(), Some("instX"));
        assert_eq!(name.common_name(), Some("1234"));
        assert_eq!(name.serial_number(), None);
        assert_eq!(name.to_string(), "CN=1234,O=instX,C=FI");
    }

    #[test]
    fn decode_string_types() {
        let mut content = rdn(oid::AT_COMMON_NAME, 0x1e, b"\x00J\x00\xf6");
        content.extend(rdn(oid::AT_LOCALITY_NAME, 0x14, b"Espoo \xe4"));
        let der = tlv(0x30, &content);
        let name = DistinguishedName::decode(der.as_slice()).unwrap();
        assert_eq!(name.common_name(), Some("Jö"));
        assert_eq!(name.read_str(&oid::AT_LOCALITY_NAME), Some("Espoo ä"));

        let der = tlv(0x30, &rdn(oid::AT_COMMON_NAME, 0x04, b"x"));
        assert!(DistinguishedName::decode(der.as_slice()).is_err());
    }

    #[test]
    fn decode_rejects_empty_set() {
        let der = tlv(0x30, &tlv(0x31, b""));
        assert!(DistinguishedName::decode(der.as_slice()).is_err());
        let der = tlv(0x30, b"");
        assert!(DistinguishedName::decode(der.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn first_value_wins() {
        let name = DistinguishedName::from_attributes(vec![
            (oid::AT_ORGANIZATIONAL_UNIT_NAME, "first"),
            (oid::AT_ORGANIZATIONAL_UNIT_NAME, "second"),
        ]);
        assert_eq!(name.organizational_unit(), Some("first"));
        assert_eq!(
            name.read(&oid::AT_ORGANIZATIONAL_UNIT_NAME),
            Some(String::from("first"))
        );
    }

    #[test]
    fn parse_string_reverses_order() {
        let name = DistinguishedName::from_str(
            "CN=1234, OU=GOV, O=instX, C=FI"
        ).unwrap();
        assert_eq!(
            name,
            DistinguishedName::from_attributes(vec![
                (oid::AT_COUNTRY_NAME, "FI"),
                (oid::AT_ORGANIZATION_NAME, "instX"),
                (oid::AT_ORGANIZATIONAL_UNIT_NAME, "GOV"),
                (oid::AT_COMMON_NAME, "1234"),
            ])
        );
    }

    #[test]
    fn parse_string_escapes_and_quotes() {
        let name = DistinguishedName::from_str(
            r#"CN=Acme\, Inc.\20,O="a+b, c",serialNumber=FI/SS1/GOV"#
        ).unwrap();
        assert_eq!(name.common_name(), Some("Acme, Inc. "));
        assert_eq!(name.organization(), Some("a+b, c"));
        assert_eq!(name.serial_number(), Some("FI/SS1/GOV"));

        let name = DistinguishedName::from_str(r"CN=J\C3\B6rg").unwrap();
        assert_eq!(name.common_name(), Some("Jörg"));
    }

    #[test]
    fn parse_multi_valued_and_dotted() {
        let name = DistinguishedName::from_str(
            "CN=a+2.5.4.5=b,OID.2.5.4.6=EE"
        ).unwrap();
        assert_eq!(name.rdns().len(), 2);
        assert_eq!(name.rdns()[1].attributes().len(), 2);
        assert_eq!(name.serial_number(), Some("b"));
        assert_eq!(name.country(), Some("EE"));
        assert_eq!(name.to_string(), "CN=a+SERIALNUMBER=b,C=EE");
    }

    #[test]
    fn parse_string_errors() {
        assert!(DistinguishedName::from_str("CN").is_err());
        assert!(DistinguishedName::from_str("FOO=bar").is_err());
        assert!(DistinguishedName::from_str("CN=\"open").is_err());
        assert_eq!(
            DistinguishedName::from_str("CN=\"a\" b"),
            Err(ParseNameError::BAD_SEPARATOR)
        );
        assert_eq!(
            DistinguishedName::from_str("CN=a\"b"),
            Err(ParseNameError::BAD_VALUE)
        );
        assert!(DistinguishedName::from_str("CN=#0403").is_err());
        assert!(DistinguishedName::from_str(r"CN=a\q").is_err());
        assert!(DistinguishedName::from_str("").unwrap().is_empty());
    }

    #[test]
    fn display_escapes() {
        let name = DistinguishedName::from_attributes(vec![
            (oid::AT_COMMON_NAME, " a,b "),
        ]);
        assert_eq!(name.to_string(), r"CN=\ a\,b\ ");
        assert_eq!(
            DistinguishedName::from_str(&name.to_string()).unwrap(), name
        );
    }

    #[test]
    fn dotted_oids() {
        let oid = encode_dotted("0.9.2342.19200300.100.1.25").unwrap();
        assert_eq!(oid.0.as_ref(), oid::AT_DOMAIN_COMPONENT.0);
        let oid = encode_dotted("1.2.840.113549.1.9.1").unwrap();
        assert_eq!(oid.0.as_ref(), oid::AT_EMAIL_ADDRESS.0);
        assert!(encode_dotted("3.1").is_none());
        assert!(encode_dotted("1").is_none());
        assert!(encode_dotted("1..2").is_none());

        let attr = Attribute {
            oid: encode_dotted("1.3.6.1.4.1.99999").unwrap(),
            value: "x".into()
        };
        assert_eq!(attr.to_string(), "1.3.6.1.4.1.99999=x");
    }
}
