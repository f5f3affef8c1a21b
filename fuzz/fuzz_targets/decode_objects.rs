#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use xroad_trust::name::DistinguishedName;
use xroad_trust::ocsp::{MultipartReader, OcspResponse};

fuzz_target!(|data: &[u8]| {
    let (which, data) = match data.split_first() {
        Some((first, data)) => (*first, data),
        None => return,
    };

    match which % 5 {
        0 => { let _ = DistinguishedName::decode(data); },
        1 => { let _ = DistinguishedName::from_certificate_subject(data); },
        2 => { let _ = OcspResponse::decode(Bytes::copy_from_slice(data)); },
        3 => {
            let reader = MultipartReader::new(data, "frontier");
            for part in reader.parts() {
                if part.is_err() {
                    break
                }
            }
        }
        4 => {
            if let Ok(s) = std::str::from_utf8(data) {
                let _ = s.parse::<DistinguishedName>();
            }
        }
        _ => panic!("what?"),
    }
});
