use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::error::{Error, Result};

/// An external service registry the gateway discovers upstreams from
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    /// Registry-type specific settings, keyed by the constants in `resources::mcp_bridge`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Value>>,
    #[serde(rename = "authN", skip_serializing_if = "Option::is_none")]
    pub auth_n: Option<ServiceSourceAuthN>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSourceAuthN {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryType {
    Nacos,
    Nacos2,
    Zookeeper,
    Consul,
    Eureka,
    Static,
    Dns,
}

impl RegistryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::Nacos => "nacos",
            RegistryType::Nacos2 => "nacos2",
            RegistryType::Zookeeper => "zookeeper",
            RegistryType::Consul => "consul",
            RegistryType::Eureka => "eureka",
            RegistryType::Static => "static",
            RegistryType::Dns => "dns",
        }
    }

    pub fn is_nacos(&self) -> bool {
        matches!(self, RegistryType::Nacos | RegistryType::Nacos2)
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nacos" => Ok(RegistryType::Nacos),
            "nacos2" => Ok(RegistryType::Nacos2),
            "zookeeper" => Ok(RegistryType::Zookeeper),
            "consul" => Ok(RegistryType::Consul),
            "eureka" => Ok(RegistryType::Eureka),
            "static" => Ok(RegistryType::Static),
            "dns" => Ok(RegistryType::Dns),
            other => Err(Error::invalid_argument(format!("Unknown registry type: {}", other))),
        }
    }
}
