//! Encoding of typed route attributes into flat ingress annotations and back.
//!
//! Decoding never fails: a missing key leaves the field absent, an unparsable boolean reads as
//! `false` and an unparsable integer leaves the field absent.
use std::{collections::BTreeMap, str::FromStr};
use tracing::debug;

use super::labels::*;
use crate::{
    error::{Error, Result},
    model::{CorsConfig, ProxyNextUpstreamConfig, RewriteConfig},
};

pub type Annotations = BTreeMap<String, String>;

pub fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(TRUE_VALUE)
}

fn get_bool(annotations: &Annotations, key: &str) -> Option<bool> {
    annotations.get(key).map(|v| parse_bool(v))
}

fn get_int<T: FromStr>(annotations: &Annotations, key: &str) -> Option<T> {
    let value = annotations.get(key)?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!("Ignoring non-numeric annotation {}={}", key, value);
            None
        }
    }
}

fn get_list(annotations: &Annotations, key: &str, separator: char) -> Option<Vec<String>> {
    annotations.get(key).map(|v| {
        v.split(separator)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}

fn put<V: ToString>(annotations: &mut Annotations, key: &str, value: Option<V>) {
    if let Some(value) = value {
        annotations.insert(key.to_string(), value.to_string());
    }
}

fn put_list(annotations: &mut Annotations, key: &str, values: Option<&Vec<String>>, separator: &str) {
    if let Some(values) = values {
        annotations.insert(key.to_string(), values.join(separator));
    }
}

fn any_present(annotations: &Annotations, keys: &[&str]) -> bool {
    keys.iter().any(|k| annotations.contains_key(*k))
}

pub fn decode_cors(annotations: &Annotations) -> Option<CorsConfig> {
    const KEYS: &[&str] = &[
        CORS_ENABLED_KEY,
        CORS_MAX_AGE_KEY,
        CORS_ALLOW_CREDENTIALS_KEY,
        CORS_ALLOW_ORIGIN_KEY,
        CORS_ALLOW_HEADERS_KEY,
        CORS_ALLOW_METHODS_KEY,
        CORS_EXPOSE_HEADERS_KEY,
    ];
    if !any_present(annotations, KEYS) {
        return None;
    }
    Some(CorsConfig {
        enabled: get_bool(annotations, CORS_ENABLED_KEY),
        allow_origins: get_list(annotations, CORS_ALLOW_ORIGIN_KEY, ','),
        allow_methods: get_list(annotations, CORS_ALLOW_METHODS_KEY, ','),
        allow_headers: get_list(annotations, CORS_ALLOW_HEADERS_KEY, ','),
        expose_headers: get_list(annotations, CORS_EXPOSE_HEADERS_KEY, ','),
        max_age: get_int(annotations, CORS_MAX_AGE_KEY),
        allow_credentials: get_bool(annotations, CORS_ALLOW_CREDENTIALS_KEY),
    })
}

pub fn encode_cors(cors: &CorsConfig, annotations: &mut Annotations) {
    put(annotations, CORS_ENABLED_KEY, cors.enabled);
    put(annotations, CORS_MAX_AGE_KEY, cors.max_age);
    put(annotations, CORS_ALLOW_CREDENTIALS_KEY, cors.allow_credentials);
    put_list(annotations, CORS_ALLOW_ORIGIN_KEY, cors.allow_origins.as_ref(), ",");
    put_list(annotations, CORS_ALLOW_HEADERS_KEY, cors.allow_headers.as_ref(), ",");
    put_list(annotations, CORS_ALLOW_METHODS_KEY, cors.allow_methods.as_ref(), ",");
    put_list(annotations, CORS_EXPOSE_HEADERS_KEY, cors.expose_headers.as_ref(), ",");
}

pub fn decode_rewrite(annotations: &Annotations) -> Option<RewriteConfig> {
    if !any_present(annotations, &[REWRITE_ENABLED_KEY, REWRITE_PATH_KEY, UPSTREAM_VHOST_KEY]) {
        return None;
    }
    Some(RewriteConfig {
        enabled: get_bool(annotations, REWRITE_ENABLED_KEY),
        path: annotations.get(REWRITE_PATH_KEY).cloned(),
        host: annotations.get(UPSTREAM_VHOST_KEY).cloned(),
    })
}

pub fn encode_rewrite(rewrite: &RewriteConfig, annotations: &mut Annotations) {
    put(annotations, REWRITE_ENABLED_KEY, rewrite.enabled);
    put(annotations, REWRITE_PATH_KEY, rewrite.path.as_ref());
    put(annotations, UPSTREAM_VHOST_KEY, rewrite.host.as_ref());
}

pub fn decode_proxy_next_upstream(annotations: &Annotations) -> Option<ProxyNextUpstreamConfig> {
    const KEYS: &[&str] = &[
        PROXY_NEXT_UPSTREAM_ENABLED_KEY,
        PROXY_NEXT_UPSTREAM_TRIES_KEY,
        PROXY_NEXT_UPSTREAM_TIMEOUT_KEY,
        PROXY_NEXT_UPSTREAM_KEY,
    ];
    if !any_present(annotations, KEYS) {
        return None;
    }
    Some(ProxyNextUpstreamConfig {
        enabled: get_bool(annotations, PROXY_NEXT_UPSTREAM_ENABLED_KEY),
        attempts: get_int(annotations, PROXY_NEXT_UPSTREAM_TRIES_KEY),
        timeout: get_int(annotations, PROXY_NEXT_UPSTREAM_TIMEOUT_KEY),
        conditions: get_list(annotations, PROXY_NEXT_UPSTREAM_KEY, ','),
    })
}

pub fn encode_proxy_next_upstream(config: &ProxyNextUpstreamConfig, annotations: &mut Annotations) {
    put(annotations, PROXY_NEXT_UPSTREAM_ENABLED_KEY, config.enabled);
    put(annotations, PROXY_NEXT_UPSTREAM_TRIES_KEY, config.attempts);
    put(annotations, PROXY_NEXT_UPSTREAM_TIMEOUT_KEY, config.timeout);
    put_list(annotations, PROXY_NEXT_UPSTREAM_KEY, config.conditions.as_ref(), ",");
}

pub fn decode_methods(annotations: &Annotations) -> Option<Vec<String>> {
    get_list(annotations, METHOD_KEY, ' ')
}

pub fn encode_methods(methods: &[String], annotations: &mut Annotations) {
    annotations.insert(METHOD_KEY.to_string(), methods.join(" "));
}

pub fn decode_use_regex(annotations: &Annotations) -> bool {
    get_bool(annotations, USE_REGEX_KEY).unwrap_or(false)
}

/// The annotation states whether case is ignored, the predicate whether it is significant
pub fn decode_case_sensitive(annotations: &Annotations) -> Option<bool> {
    get_bool(annotations, IGNORE_PATH_CASE_KEY).map(|ignore| !ignore)
}

pub fn encode_case_sensitive(case_sensitive: Option<bool>, annotations: &mut Annotations) {
    put(annotations, IGNORE_PATH_CASE_KEY, case_sensitive.map(|sensitive| !sensitive));
}

/// Collect every annotation the gateway does not own
pub fn decode_custom(annotations: &Annotations) -> BTreeMap<String, String> {
    annotations
        .iter()
        .filter(|(k, _)| !is_reserved_annotation(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

pub fn encode_custom(custom: &BTreeMap<String, String>, annotations: &mut Annotations) -> Result<()> {
    if let Some(key) = custom.keys().find(|k| is_reserved_annotation(k)) {
        return Err(Error::validation(format!(
            "Custom annotation {} conflicts with a reserved annotation key",
            key
        )));
    }
    annotations.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(())
}
