use k8s_openapi::{apimachinery::pkg::apis::meta::v1::ObjectMeta, NamespaceResourceScope};
use kube::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{borrow::Cow, collections::BTreeMap};

use crate::model::WasmPluginInstanceScope;

/// WasmPlugin CRD (extensions.higress.io/v1alpha1)
/// `spec` may be absent on objects read from the cluster
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasmPlugin {
    #[serde(default = "WasmPlugin::default_api_version")]
    pub api_version: String,
    #[serde(default = "WasmPlugin::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<WasmPluginSpec>,
}

impl WasmPlugin {
    pub const API_GROUP: &'static str = "extensions.higress.io";
    pub const VERSION: &'static str = "v1alpha1";
    pub const KIND: &'static str = "WasmPlugin";
    pub const PLURAL: &'static str = "wasmplugins";

    fn default_api_version() -> String {
        format!("{}/{}", Self::API_GROUP, Self::VERSION)
    }

    fn default_kind() -> String {
        Self::KIND.to_string()
    }

    pub fn new(metadata: ObjectMeta, spec: Option<WasmPluginSpec>) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

impl Default for WasmPlugin {
    fn default() -> Self {
        Self::new(ObjectMeta::default(), None)
    }
}

impl Resource for WasmPlugin {
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
pub struct WasmPluginSpec {
    /// Configuration applied when no match rule selects the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_config: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_config_disable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_rules: Option<Vec<MatchRule>>,
    /// Filter chain phase, e.g. UNSPECIFIED_PHASE, AUTHN, AUTHZ, STATS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_config: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// Image location, e.g. oci://registry/plugins/key-auth:1.0.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_key: Option<String>,
}

/// Binds a configuration to a set of domains or to a set of ingresses
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_disable: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<String>,
}

impl MatchRule {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: vec![domain.into()],
            ..Default::default()
        }
    }

    pub fn for_ingress(ingress: impl Into<String>) -> Self {
        Self {
            ingress: vec![ingress.into()],
            ..Default::default()
        }
    }

    /// Targets this rule is addressed by at the given scope
    pub fn targets(&self, scope: WasmPluginInstanceScope) -> &[String] {
        match scope {
            WasmPluginInstanceScope::Domain => &self.domain,
            WasmPluginInstanceScope::Route => &self.ingress,
            WasmPluginInstanceScope::Global => &[],
        }
    }

    pub fn matches(&self, scope: WasmPluginInstanceScope, target: &str) -> bool {
        self.targets(scope).iter().any(|t| t == target)
    }

    /// Two rules are the same rule when they select the same domains and the same ingresses,
    /// regardless of order
    pub fn same_identity(&self, other: &MatchRule) -> bool {
        fn as_set(list: &[String]) -> std::collections::BTreeSet<&str> {
            list.iter().map(String::as_str).collect()
        }
        as_set(&self.domain) == as_set(&other.domain) && as_set(&self.ingress) == as_set(&other.ingress)
    }
}
