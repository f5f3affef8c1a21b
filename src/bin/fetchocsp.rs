//! Fetches OCSP responses from a hash-based responder.
//!
//! Usage: `fetchocsp <address> <hash>...`. The port and timeouts are the
//! defaults.

use std::env;
use xroad_trust::ocsp::{HashOcspClient, OcspClientConfig, ReqwestTransport};


fn main() {
    let mut args = env::args().skip(1);
    let address = match args.next() {
        Some(address) => address,
        None => {
            println!("Usage: fetchocsp <address> <hash>...");
            return
        }
    };
    let hashes: Vec<_> = args.collect();

    let client = HashOcspClient::new(
        ReqwestTransport::new(), OcspClientConfig::default()
    );
    let responses = match client.fetch_responses(&address, &hashes) {
        Ok(responses) => responses,
        Err(err) => {
            println!("Fetching responses failed: {}", err);
            return
        }
    };
    for (idx, response) in responses.iter().enumerate() {
        match response.response_bytes() {
            Some(bytes) if bytes.is_basic() => {
                println!(
                    "{}: {} (basic, {} octets)",
                    idx, response.status(), bytes.response().len()
                );
            }
            _ => println!("{}: {}", idx, response.status()),
        }
    }
}
