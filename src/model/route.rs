use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::error::{Error, Result};

/// Route is the gateway's view of a single ingress
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Opaque optimistic-concurrency token (the object's resourceVersion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Absent means the domain restriction is unknown, empty means no restriction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<RoutePredicate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<UpstreamService>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<RewriteConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_next_upstream: Option<ProxyNextUpstreamConfig>,

    /// Annotations outside the reserved namespace, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_configs: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutePredicate {
    /// One of `PRE`, `EQUAL` or `REGULAR`; kept as text so unknown values can be rejected on encode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

impl RoutePredicate {
    pub fn new(match_type: RoutePredicateType, match_value: impl Into<String>) -> Self {
        Self {
            match_type: Some(match_type.to_string()),
            match_value: Some(match_value.into()),
            case_sensitive: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutePredicateType {
    Equal,
    Prefix,
    Regular,
}

impl RoutePredicateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePredicateType::Equal => "EQUAL",
            RoutePredicateType::Prefix => "PRE",
            RoutePredicateType::Regular => "REGULAR",
        }
    }
}

impl fmt::Display for RoutePredicateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutePredicateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EQUAL" => Ok(RoutePredicateType::Equal),
            "PRE" => Ok(RoutePredicateType::Prefix),
            "REGULAR" => Ok(RoutePredicateType::Regular),
            other => Err(Error::invalid_argument(format!(
                "Unsupported path match type: {}",
                other
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamService {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Percentage of traffic; absent means a plain destination without split semantics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl UpstreamService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RewriteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Retry behaviour when an upstream attempt fails
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyNextUpstreamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
}
