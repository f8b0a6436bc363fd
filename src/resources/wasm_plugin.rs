use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;
use tracing::debug;

use super::{annotations::parse_bool, labels::*};
use crate::{
    config::ConverterConfig,
    crds::{self, MatchRule, WasmPluginSpec},
    error::{Error, Result},
    model::{WasmPlugin, WasmPluginInstance, WasmPluginInstanceScope},
};

const IMAGE_URL_SCHEME: &str = "oci://";

pub fn wasm_plugin_from_cr(cr: &crds::WasmPlugin) -> WasmPlugin {
    let metadata = &cr.metadata;
    let label = |key: &str| metadata.labels.as_ref().and_then(|l| l.get(key)).cloned();
    let annotation = |key: &str| metadata.annotations.as_ref().and_then(|a| a.get(key)).cloned();

    let mut plugin = WasmPlugin {
        name: label(WASM_PLUGIN_NAME_KEY),
        plugin_version: label(WASM_PLUGIN_VERSION_KEY),
        version: metadata.resource_version.clone(),
        category: label(WASM_PLUGIN_CATEGORY_KEY),
        built_in: label(WASM_PLUGIN_BUILT_IN_KEY).map(|v| parse_bool(&v)),
        title: annotation(WASM_PLUGIN_TITLE_KEY),
        description: annotation(WASM_PLUGIN_DESCRIPTION_KEY),
        icon: annotation(WASM_PLUGIN_ICON_KEY),
        ..Default::default()
    };

    if let Some(ref spec) = cr.spec {
        plugin.phase = spec.phase.clone();
        plugin.priority = spec.priority;
        if let Some(ref url) = spec.url {
            let (repository, version) = split_image_url(url);
            plugin.image_repository = Some(repository);
            plugin.image_version = version;
        }
    }
    plugin
}

/// Split `[scheme://]repository[:version]` where the version is a tag on the last path segment
fn split_image_url(url: &str) -> (String, Option<String>) {
    let location = url.split_once("://").map_or(url, |(_, rest)| rest);
    let segment_start = location.rfind('/').map_or(0, |i| i + 1);
    match location[segment_start..].rfind(':') {
        Some(i) => {
            let split = segment_start + i;
            let version = &location[split + 1..];
            (
                location[..split].to_string(),
                (!version.is_empty()).then(|| version.to_string()),
            )
        }
        None => (location.to_string(), None),
    }
}

pub fn wasm_plugin_to_cr(plugin: &WasmPlugin, config: &ConverterConfig) -> Result<crds::WasmPlugin> {
    let (Some(name), Some(plugin_version)) = (plugin.name.as_deref(), plugin.plugin_version.as_deref()) else {
        return Err(Error::invalid_argument("Plugin name and plugin version are required"));
    };

    let mut labels = BTreeMap::new();
    labels.insert(WASM_PLUGIN_NAME_KEY.to_string(), name.to_string());
    labels.insert(WASM_PLUGIN_VERSION_KEY.to_string(), plugin_version.to_string());
    if let Some(ref category) = plugin.category {
        labels.insert(WASM_PLUGIN_CATEGORY_KEY.to_string(), category.clone());
    }
    if let Some(built_in) = plugin.built_in {
        labels.insert(WASM_PLUGIN_BUILT_IN_KEY.to_string(), built_in.to_string());
    }

    let mut annotations = BTreeMap::new();
    for (key, value) in [
        (WASM_PLUGIN_TITLE_KEY, &plugin.title),
        (WASM_PLUGIN_DESCRIPTION_KEY, &plugin.description),
        (WASM_PLUGIN_ICON_KEY, &plugin.icon),
    ] {
        if let Some(value) = value {
            annotations.insert(key.to_string(), value.clone());
        }
    }

    let url = plugin.image_repository.as_ref().map(|repository| {
        match plugin.image_version.as_deref().filter(|v| !v.is_empty()) {
            Some(version) => format!("{}{}:{}", IMAGE_URL_SCHEME, repository, version),
            None => format!("{}{}", IMAGE_URL_SCHEME, repository),
        }
    });

    let metadata = ObjectMeta {
        name: Some(format!("{}-{}", name, plugin_version)),
        namespace: config.namespace.clone(),
        resource_version: plugin.version.clone(),
        labels: Some(labels),
        annotations: (!annotations.is_empty()).then_some(annotations),
        ..Default::default()
    };
    let spec = WasmPluginSpec {
        phase: plugin.phase.clone(),
        priority: plugin.priority,
        url,
        ..Default::default()
    };
    Ok(crds::WasmPlugin::new(metadata, Some(spec)))
}

/// Merge `src`'s spec into `dst`. Scalars are taken from `src`; match rules of `src` whose identity
/// is not yet in `dst` are appended in order, rules already in `dst` are kept as they are.
pub fn merge_wasm_plugin_spec(src: &crds::WasmPlugin, dst: &mut crds::WasmPlugin) {
    let Some(ref src_spec) = src.spec else {
        return;
    };
    match dst.spec {
        None => dst.spec = Some(src_spec.clone()),
        Some(ref mut dst_spec) => {
            dst_spec.url = src_spec.url.clone();
            dst_spec.default_config_disable = src_spec.default_config_disable;
            dst_spec.sha256 = src_spec.sha256.clone();
            dst_spec.phase = src_spec.phase.clone();
            dst_spec.priority = src_spec.priority;
            dst_spec.image_pull_policy = src_spec.image_pull_policy.clone();
            dst_spec.image_pull_secret = src_spec.image_pull_secret.clone();
            dst_spec.plugin_name = src_spec.plugin_name.clone();
            dst_spec.verification_key = src_spec.verification_key.clone();

            for rule in src_spec.match_rules.iter().flatten() {
                let dst_rules = dst_spec.match_rules.get_or_insert_with(Vec::new);
                if !dst_rules.iter().any(|existing| existing.same_identity(rule)) {
                    dst_rules.push(rule.clone());
                }
            }
        }
    }
}

fn non_empty(target: Option<&str>) -> Option<&str> {
    target.filter(|t| !t.is_empty())
}

fn with_identity(cr: &crds::WasmPlugin, mut instance: WasmPluginInstance) -> WasmPluginInstance {
    let labels = cr.metadata.labels.as_ref();
    instance.plugin_name = labels.and_then(|l| l.get(WASM_PLUGIN_NAME_KEY)).cloned();
    instance.plugin_version = labels.and_then(|l| l.get(WASM_PLUGIN_VERSION_KEY)).cloned();
    instance.version = cr.metadata.resource_version.clone();
    instance
}

fn global_instance(spec: &WasmPluginSpec) -> WasmPluginInstance {
    WasmPluginInstance {
        enabled: !spec.default_config_disable.unwrap_or(false),
        configurations: spec.default_config.clone().unwrap_or_default(),
        ..WasmPluginInstance::new(WasmPluginInstanceScope::Global, None)
    }
}

fn rule_instance(rule: &MatchRule, scope: WasmPluginInstanceScope, target: &str) -> WasmPluginInstance {
    WasmPluginInstance {
        enabled: !rule.config_disable.unwrap_or(false),
        configurations: rule.config.clone().unwrap_or_default(),
        ..WasmPluginInstance::new(scope, Some(target.to_string()))
    }
}

/// Extract the instance configured for `target` at `scope`, `None` when the plugin is not configured there
pub fn get_instance_from_cr(
    cr: &crds::WasmPlugin,
    scope: WasmPluginInstanceScope,
    target: Option<&str>,
) -> Option<WasmPluginInstance> {
    let spec = cr.spec.as_ref()?;
    let instance = match scope {
        WasmPluginInstanceScope::Global => global_instance(spec),
        WasmPluginInstanceScope::Domain | WasmPluginInstanceScope::Route => {
            let target = non_empty(target)?;
            let rule = spec
                .match_rules
                .iter()
                .flatten()
                .find(|rule| rule.matches(scope, target))?;
            rule_instance(rule, scope, target)
        }
    };
    Some(with_identity(cr, instance))
}

/// List every instance configured in the resource: the global one when a default config is set,
/// then one per domain and per ingress of each match rule, in rule order
pub fn get_instances_from_cr(cr: &crds::WasmPlugin) -> Vec<WasmPluginInstance> {
    let Some(ref spec) = cr.spec else {
        return Vec::new();
    };

    let mut instances = Vec::new();
    if spec.default_config.is_some() {
        instances.push(global_instance(spec));
    }
    for rule in spec.match_rules.iter().flatten() {
        for scope in [WasmPluginInstanceScope::Domain, WasmPluginInstanceScope::Route] {
            for target in rule.targets(scope) {
                instances.push(rule_instance(rule, scope, target));
            }
        }
    }
    instances.into_iter().map(|i| with_identity(cr, i)).collect()
}

pub fn set_instance_to_cr(cr: &mut crds::WasmPlugin, instance: &WasmPluginInstance) -> Result<()> {
    let scope = instance.scope;
    let config = Some(instance.configurations.clone());
    let disabled = Some(!instance.enabled);

    if scope == WasmPluginInstanceScope::Global {
        let spec = cr.spec.get_or_insert_with(Default::default);
        spec.default_config = config;
        spec.default_config_disable = disabled;
        return Ok(());
    }

    let target = non_empty(instance.target.as_deref())
        .ok_or_else(|| Error::invalid_argument(format!("A target is required for {:?} scoped instances", scope)))?;

    let rules = cr
        .spec
        .get_or_insert_with(Default::default)
        .match_rules
        .get_or_insert_with(Vec::new);
    let rule = match rules.iter().position(|rule| rule.matches(scope, target)) {
        Some(index) => &mut rules[index],
        None => {
            debug!("Adding match rule for {}", target);
            rules.push(match scope {
                WasmPluginInstanceScope::Route => MatchRule::for_ingress(target),
                _ => MatchRule::for_domain(target),
            });
            let last = rules.len() - 1;
            &mut rules[last]
        }
    };
    rule.config = config;
    rule.config_disable = disabled;
    Ok(())
}

/// Remove the instance configured for `target` at `scope`. Returns whether the resource changed.
/// Every rule listing `target` is dropped, so a later rule cannot keep the target configured.
pub fn remove_instance_from_cr(
    cr: &mut crds::WasmPlugin,
    scope: WasmPluginInstanceScope,
    target: Option<&str>,
) -> bool {
    let Some(ref mut spec) = cr.spec else {
        return false;
    };
    match scope {
        WasmPluginInstanceScope::Global => spec.default_config.take().is_some(),
        WasmPluginInstanceScope::Domain | WasmPluginInstanceScope::Route => {
            let (Some(target), Some(rules)) = (non_empty(target), spec.match_rules.as_mut()) else {
                return false;
            };
            let before = rules.len();
            rules.retain(|rule| !rule.matches(scope, target));
            rules.len() != before
        }
    }
}
