//! Converting octets into hex strings.

use std::str;


/// Encodes an octet sequence as a hex string.
///
/// The function uses `dest` as the buffer for encoding which therefore must
/// be at least twice the length of `src`. It returns a reference to the
/// used part of this buffer as a `&str`.
///
/// # Panics
///
/// The function panics if `dest` is shorter than twice the length of `src`.
pub fn encode<'a>(src: &[u8], dest: &'a mut [u8], case: Case) -> &'a str {
    let digits = case.digits();
    let dest = &mut dest[..src.len() * 2];
    for (s, d) in src.iter().zip(dest.chunks_mut(2)) {
        d[0] = digits[usize::from(s >> 4)];
        d[1] = digits[usize::from(s & 0x0F)];
    }
    // Only ASCII digits were written.
    unsafe { str::from_utf8_unchecked(dest) }
}

/// Encodes an octet sequence into a newly allocated lowercase string.
pub fn encode_lower(src: &[u8]) -> String {
    let mut buf = vec![0u8; src.len() * 2];
    encode(src, &mut buf, Case::Lower).into()
}

/// Encodes an octet sequence into uppercase digit pairs.
///
/// The pairs are separated by `delimiter`, e.g., `"AB:CD:EF"`.
pub fn encode_delimited(src: &[u8], delimiter: &str) -> String {
    let mut res = String::with_capacity(
        src.len() * 2 + src.len().saturating_sub(1) * delimiter.len()
    );
    for (idx, ch) in src.iter().enumerate() {
        if idx > 0 {
            res.push_str(delimiter);
        }
        let pair = encode_u8(*ch, Case::Upper);
        res.push(char::from(pair[0]));
        res.push(char::from(pair[1]));
    }
    res
}

pub fn encode_u8(ch: u8, case: Case) -> [u8; 2] {
    let digits = case.digits();
    [digits[usize::from(ch >> 4)], digits[usize::from(ch & 0x0F)]]
}

/// Returns whether `s` is a non-empty string of hex digits.
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|ch| ch.is_ascii_hexdigit())
}


//------------ Case ----------------------------------------------------------

/// The letter case used for the digits above nine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Case {
    Lower,
    Upper,
}

impl Case {
    fn digits(self) -> &'static [u8; 16] {
        match self {
            Case::Lower => b"0123456789abcdef",
            Case::Upper => b"0123456789ABCDEF",
        }
    }
}


//============ Tests =========================================================
