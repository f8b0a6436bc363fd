use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    crds::{McpBridge, RegistryConfig},
    model::{RegistryType, ServiceSource, ServiceSourceAuthN},
    utils::generate_auth_secret_name,
};

// ServiceSource property keys
pub const NACOS_NAMESPACE_ID: &str = "nacosNamespaceId";
pub const NACOS_GROUPS: &str = "nacosGroups";
pub const ZK_SERVICES_PATH: &str = "zkServicesPath";
pub const CONSUL_DATACENTER: &str = "consulDatacenter";
pub const CONSUL_SERVICE_TAG: &str = "consulServiceTag";
pub const CONSUL_REFRESH_INTERVAL: &str = "consulRefreshInterval";

fn registry_type(type_tag: Option<&str>) -> Option<RegistryType> {
    let type_tag = type_tag?;
    match type_tag.parse() {
        Ok(t) => Some(t),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

pub fn registry_to_service_source(registry: Option<&RegistryConfig>) -> ServiceSource {
    let Some(registry) = registry else {
        return ServiceSource::default();
    };

    let mut properties = BTreeMap::new();
    let mut put = |key: &str, value: Option<Value>| {
        if let Some(value) = value {
            properties.insert(key.to_string(), value);
        }
    };
    match registry_type(registry.r#type.as_deref()) {
        Some(t) if t.is_nacos() => {
            put(NACOS_NAMESPACE_ID, registry.nacos_namespace_id.clone().map(Value::from));
            put(NACOS_GROUPS, registry.nacos_groups.clone().map(Value::from));
        }
        Some(RegistryType::Zookeeper) => {
            put(ZK_SERVICES_PATH, registry.zk_services_path.clone().map(Value::from));
        }
        Some(RegistryType::Consul) => {
            put(CONSUL_DATACENTER, registry.consul_datacenter.clone().map(Value::from));
            put(CONSUL_SERVICE_TAG, registry.consul_service_tag.clone().map(Value::from));
            put(CONSUL_REFRESH_INTERVAL, registry.consul_refresh_interval.map(Value::from));
        }
        _ => {}
    }

    let auth_enabled = registry
        .auth_secret_name
        .as_deref()
        .is_some_and(|name| !name.is_empty());

    ServiceSource {
        name: registry.name.clone(),
        version: None,
        r#type: registry.r#type.clone(),
        domain: registry.domain.clone(),
        port: registry.port,
        properties: Some(properties),
        auth_n: Some(ServiceSourceAuthN {
            enabled: Some(auth_enabled),
        }),
    }
}

fn property_string(properties: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn property_strings(properties: &BTreeMap<String, Value>, key: &str) -> Option<Vec<String>> {
    match properties.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

fn property_int(properties: &BTreeMap<String, Value>, key: &str) -> Option<i64> {
    match properties.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn fill_registry(registry: &mut RegistryConfig, source: &ServiceSource) {
    registry.name = source.name.clone();
    registry.r#type = source.r#type.clone();
    registry.domain = source.domain.clone();
    registry.port = source.port;

    registry.nacos_namespace_id = None;
    registry.nacos_groups = None;
    registry.zk_services_path = None;
    registry.consul_datacenter = None;
    registry.consul_service_tag = None;
    registry.consul_refresh_interval = None;

    if let Some(ref properties) = source.properties {
        match registry_type(source.r#type.as_deref()) {
            Some(t) if t.is_nacos() => {
                registry.nacos_namespace_id = property_string(properties, NACOS_NAMESPACE_ID);
                registry.nacos_groups = property_strings(properties, NACOS_GROUPS);
            }
            Some(RegistryType::Zookeeper) => {
                registry.zk_services_path = property_strings(properties, ZK_SERVICES_PATH);
            }
            Some(RegistryType::Consul) => {
                registry.consul_datacenter = property_string(properties, CONSUL_DATACENTER);
                registry.consul_service_tag = property_string(properties, CONSUL_SERVICE_TAG);
                registry.consul_refresh_interval = property_int(properties, CONSUL_REFRESH_INTERVAL);
            }
            _ => {}
        }
    }

    match source.auth_n.as_ref().and_then(|auth| auth.enabled) {
        Some(true) => {
            if registry.auth_secret_name.as_deref().map_or(true, str::is_empty) {
                let name = generate_auth_secret_name(source.name.as_deref().unwrap_or_default());
                debug!("Generated auth secret name {}", name);
                registry.auth_secret_name = Some(name);
            }
        }
        Some(false) => registry.auth_secret_name = None,
        None => {}
    }
}

/// Insert or update the registry named after `source`, keeping its position in the list.
/// Returns the stored entry.
pub fn add_registry(bridge: &mut McpBridge, source: Option<&ServiceSource>) -> Option<RegistryConfig> {
    let source = source?;
    let registries = bridge
        .spec
        .get_or_insert_with(Default::default)
        .registries
        .get_or_insert_with(Vec::new);

    let registry = match registries.iter().position(|r| r.name == source.name) {
        Some(index) => &mut registries[index],
        None => {
            registries.push(RegistryConfig::default());
            let last = registries.len() - 1;
            &mut registries[last]
        }
    };
    fill_registry(registry, source);
    Some(registry.clone())
}

pub fn remove_registry(bridge: &mut McpBridge, name: &str) -> Option<RegistryConfig> {
    let registries = bridge.spec.as_mut()?.registries.as_mut()?;
    let index = registries
        .iter()
        .position(|r| r.name.as_deref() == Some(name))?;
    Some(registries.remove(index))
}

/// Give the bridge its default name and an empty registry list, keeping registries already present
pub fn init_bridge(bridge: &mut McpBridge) {
    bridge.metadata.name = Some(McpBridge::DEFAULT_NAME.to_string());
    bridge
        .spec
        .get_or_insert_with(Default::default)
        .registries
        .get_or_insert_with(Vec::new);
}
