use std::collections::BTreeMap;

use crate::utils::normalize_domain_name;

pub const KEY_PREFIX: &str = "higress.io/";
pub const TRUE_VALUE: &str = "true";

// Route annotations
pub const CORS_ENABLED_KEY: &str = "higress.io/enable-cors";
pub const CORS_MAX_AGE_KEY: &str = "higress.io/cors-max-age";
pub const CORS_ALLOW_CREDENTIALS_KEY: &str = "higress.io/cors-allow-credentials";
pub const CORS_ALLOW_ORIGIN_KEY: &str = "higress.io/cors-allow-origin";
pub const CORS_ALLOW_HEADERS_KEY: &str = "higress.io/cors-allow-headers";
pub const CORS_ALLOW_METHODS_KEY: &str = "higress.io/cors-allow-methods";
pub const CORS_EXPOSE_HEADERS_KEY: &str = "higress.io/cors-expose-headers";
pub const REWRITE_ENABLED_KEY: &str = "higress.io/enable-rewrite";
pub const REWRITE_PATH_KEY: &str = "higress.io/rewrite-path";
pub const UPSTREAM_VHOST_KEY: &str = "higress.io/upstream-vhost";
pub const PROXY_NEXT_UPSTREAM_ENABLED_KEY: &str = "higress.io/enable-proxy-next-upstream";
pub const PROXY_NEXT_UPSTREAM_TRIES_KEY: &str = "higress.io/proxy-next-upstream-tries";
pub const PROXY_NEXT_UPSTREAM_TIMEOUT_KEY: &str = "higress.io/proxy-next-upstream-timeout";
pub const PROXY_NEXT_UPSTREAM_KEY: &str = "higress.io/proxy-next-upstream";
pub const METHOD_KEY: &str = "higress.io/match-method";
pub const DESTINATION_KEY: &str = "higress.io/destination";
pub const USE_REGEX_KEY: &str = "higress.io/use-regex";
pub const IGNORE_PATH_CASE_KEY: &str = "higress.io/ignore-path-case";

// WasmPlugin annotations
pub const WASM_PLUGIN_TITLE_KEY: &str = "higress.io/wasm-plugin-title";
pub const WASM_PLUGIN_DESCRIPTION_KEY: &str = "higress.io/wasm-plugin-description";
pub const WASM_PLUGIN_ICON_KEY: &str = "higress.io/wasm-plugin-icon";

// WasmPlugin labels
pub const WASM_PLUGIN_NAME_KEY: &str = "higress.io/wasm-plugin-name";
pub const WASM_PLUGIN_VERSION_KEY: &str = "higress.io/wasm-plugin-version";
pub const WASM_PLUGIN_CATEGORY_KEY: &str = "higress.io/wasm-plugin-category";
pub const WASM_PLUGIN_BUILT_IN_KEY: &str = "higress.io/wasm-plugin-built-in";

const DOMAIN_LABEL_PREFIX: &str = "higress.io/domain_";

/// Annotation keys owned by the gateway. Custom passthrough annotations may never use one of these,
/// and decoding never copies one of these into the custom configs.
pub const RESERVED_ANNOTATION_KEYS: &[&str] = &[
    CORS_ENABLED_KEY,
    CORS_MAX_AGE_KEY,
    CORS_ALLOW_CREDENTIALS_KEY,
    CORS_ALLOW_ORIGIN_KEY,
    CORS_ALLOW_HEADERS_KEY,
    CORS_ALLOW_METHODS_KEY,
    CORS_EXPOSE_HEADERS_KEY,
    REWRITE_ENABLED_KEY,
    REWRITE_PATH_KEY,
    UPSTREAM_VHOST_KEY,
    PROXY_NEXT_UPSTREAM_ENABLED_KEY,
    PROXY_NEXT_UPSTREAM_TRIES_KEY,
    PROXY_NEXT_UPSTREAM_TIMEOUT_KEY,
    PROXY_NEXT_UPSTREAM_KEY,
    METHOD_KEY,
    DESTINATION_KEY,
    USE_REGEX_KEY,
    IGNORE_PATH_CASE_KEY,
    WASM_PLUGIN_TITLE_KEY,
    WASM_PLUGIN_DESCRIPTION_KEY,
    WASM_PLUGIN_ICON_KEY,
];

pub fn is_reserved_annotation(key: &str) -> bool {
    RESERVED_ANNOTATION_KEYS.contains(&key)
}

/// Label marking a secret as carrying the certificate of `domain`
pub fn domain_label_key(domain: &str) -> String {
    format!("{}{}", DOMAIN_LABEL_PREFIX, normalize_domain_name(domain))
}

/// Generate the labels attached to a TLS secret, one per served domain
pub fn tls_secret_labels(domains: &[String]) -> BTreeMap<String, String> {
    domains
        .iter()
        .map(|domain| (domain_label_key(domain), TRUE_VALUE.to_string()))
        .collect()
}
