//! Prints the identity encoded in a certificate.
//!
//! Usage: `readident <jurisdiction> <path>`. The certificate can be DER or
//! PEM encoded.

use std::{env, fs};
use std::io::Read;
use xroad_trust::crypto::certhash;
use xroad_trust::identity::{decode_identity, Jurisdiction};
use xroad_trust::name::DistinguishedName;
use xroad_trust::util::base64::Pem;


fn main() {
    let mut args = env::args().skip(1);
    let (jurisdiction, path) = match (args.next(), args.next()) {
        (Some(jurisdiction), Some(path)) => (jurisdiction, path),
        _ => {
            println!("Usage: readident <jurisdiction> <path>");
            return
        }
    };
    let jurisdiction = match jurisdiction.parse::<Jurisdiction>() {
        Ok(jurisdiction) => jurisdiction,
        Err(err) => {
            println!("{}", err);
            return
        }
    };
    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            println!("Can’t open file: {}", err);
            return;
        }
    };
    let mut data = Vec::new();
    if let Err(err) = file.read_to_end(&mut data) {
        println!("Can’t read file: {}", err);
        return;
    }
    if Pem::is_pem(&data) {
        data = match Pem.decode_block(&data, "CERTIFICATE") {
            Ok(data) => data,
            Err(err) => {
                println!("Can’t decode PEM: {}", err);
                return
            }
        };
    }

    let subject = match DistinguishedName::from_certificate_subject(&data) {
        Ok(subject) => subject,
        Err(err) => {
            println!("Can’t decode cert: {}", err);
            return
        }
    };
    println!("Subject:  {}", subject);
    match decode_identity(jurisdiction, &subject) {
        Ok(id) => println!("Identity: {}", id),
        Err(err) => println!("Identity: {}", err),
    }
    println!("SHA-256:  {}", certhash::cert_hex_hash_delimited(&data, ":"));
}
