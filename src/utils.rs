//! Utility functions shared by the converters
use rand::Rng;

const SECRET_SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SECRET_SUFFIX_LEN: usize = 5;

/// Generate the name of the secret holding a service source's credentials
pub fn generate_auth_secret_name(service_source_name: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SECRET_SUFFIX_LEN)
        .map(|_| SECRET_SUFFIX_CHARS[rng.gen_range(0..SECRET_SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{}-auth-{}", service_source_name, suffix)
}

/// Replace a leading wildcard label so the domain can be embedded in object names and label keys
pub fn normalize_domain_name(domain: &str) -> String {
    match domain.strip_prefix("*.") {
        Some(rest) => format!("wildcard.{}", rest),
        None => domain.to_string(),
    }
}
