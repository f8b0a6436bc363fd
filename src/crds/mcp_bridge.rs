use k8s_openapi::{apimachinery::pkg::apis::meta::v1::ObjectMeta, NamespaceResourceScope};
use kube::Resource;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;


/// McpBridge CRD (networking.higress.io/v1)
/// Holds the list of service registries the gateway discovers upstreams from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McpBridge {
    #[serde(default = "McpBridge::default_api_version")]
    pub api_version: String,
    #[serde(default = "McpBridge::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<McpBridgeSpec>,
}

impl McpBridge {
    pub const API_GROUP: &'static str = "networking.higress.io";
    pub const VERSION: &'static str = "v1";
    pub const KIND: &'static str = "McpBridge";
    pub const PLURAL: &'static str = "mcpbridges";
    /// The gateway only ever manages a single bridge object with this name
    pub const DEFAULT_NAME: &'static str = "default";

    fn default_api_version() -> String {
        format!("{}/{}", Self::API_GROUP, Self::VERSION)
    }

    fn default_kind() -> String {
        Self::KIND.to_string()
    }
}

impl Default for McpBridge {
    fn default() -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ObjectMeta::default(),
            spec: None,
        }
    }
}

impl Resource for McpBridge {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Self::KIND.into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        Self::API_GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        Self::VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Self::PLURAL.into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McpBridgeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registries: Option<Vec<RegistryConfig>>,
}

/// One registry connection, keyed by `name` within the bridge
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,

    // Nacos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_address_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_namespace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacos_refresh_interval: Option<i64>,

    // Zookeeper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zk_services_path: Option<Vec<String>>,

    // Consul
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consul_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consul_datacenter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consul_service_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consul_refresh_interval: Option<i64>,

    /// Secret holding the registry credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_secret_name: Option<String>,
}
