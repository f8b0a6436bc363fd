use k8s_openapi::{api::core::v1::ConfigMap, apimachinery::pkg::apis::meta::v1::ObjectMeta};
use std::collections::BTreeMap;

use crate::{
    config::ConverterConfig,
    error::{Error, Result},
    model::Domain,
    utils::normalize_domain_name,
};

const CONFIG_MAP_NAME_PREFIX: &str = "domain-";

pub const DOMAIN_KEY: &str = "domain";
pub const CERT_KEY: &str = "cert";
pub const ENABLE_HTTPS_KEY: &str = "mustHttps";

/// Name of the ConfigMap storing the settings of `domain_name`
pub fn domain_name_to_config_map_name(domain_name: &str) -> String {
    format!("{}{}", CONFIG_MAP_NAME_PREFIX, normalize_domain_name(domain_name))
}

pub fn config_map_to_domain(config_map: &ConfigMap) -> Result<Domain> {
    let data = config_map
        .data
        .as_ref()
        .ok_or_else(|| Error::invalid_argument("The ConfigMap data is illegal"))?;

    Ok(Domain {
        name: data.get(DOMAIN_KEY).cloned(),
        version: config_map.metadata.resource_version.clone(),
        cert_identifier: data.get(CERT_KEY).cloned(),
        enable_https: data.get(ENABLE_HTTPS_KEY).cloned(),
    })
}

pub fn domain_to_config_map(domain: &Domain, config: &ConverterConfig) -> Result<ConfigMap> {
    let name = domain
        .name
        .as_deref()
        .ok_or_else(|| Error::invalid_argument("Domain name is required"))?;

    let mut data = BTreeMap::new();
    data.insert(DOMAIN_KEY.to_string(), name.to_string());
    if let Some(ref cert) = domain.cert_identifier {
        data.insert(CERT_KEY.to_string(), cert.clone());
    }
    if let Some(ref enable_https) = domain.enable_https {
        data.insert(ENABLE_HTTPS_KEY.to_string(), enable_https.clone());
    }

    Ok(ConfigMap {
        metadata: ObjectMeta {
            name: Some(domain_name_to_config_map_name(name)),
            namespace: config.namespace.clone(),
            resource_version: domain.version.clone(),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    })
}
