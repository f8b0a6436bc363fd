use k8s_openapi::{
    api::{
        core::v1::TypedLocalObjectReference,
        networking::v1::{
            HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule, IngressSpec,
        },
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::ResourceExt;
use tracing::{debug, instrument, warn};

use super::{
    annotations::{self, Annotations},
    destination::{parse_destinations, serialize_destinations},
    labels::{DESTINATION_KEY, TRUE_VALUE, USE_REGEX_KEY},
};
use crate::{
    config::ConverterConfig,
    crds::McpBridge,
    error::{Error, Result},
    model::{Route, RoutePredicate, RoutePredicateType},
};

pub const PATH_TYPE_PREFIX: &str = "Prefix";
pub const PATH_TYPE_EXACT: &str = "Exact";

/// Check whether an ingress has the single rule, single path shape a Route can represent
/// and is either unbound or bound to the gateway's bridge
pub fn is_supported(ingress: &Ingress) -> bool {
    let Some(spec) = &ingress.spec else {
        return false;
    };
    let Some([rule]) = spec.rules.as_deref() else {
        return false;
    };
    let Some([path]) = rule.http.as_ref().map(|http| http.paths.as_slice()) else {
        return false;
    };
    if path.path_type != PATH_TYPE_PREFIX && path.path_type != PATH_TYPE_EXACT {
        return false;
    }
    targets_bridge(&path.backend)
}

fn targets_bridge(backend: &IngressBackend) -> bool {
    if backend.service.is_some() {
        return false;
    }
    match &backend.resource {
        None => true,
        Some(reference) => {
            reference.api_group.as_deref() == Some(McpBridge::API_GROUP)
                && reference.kind == McpBridge::KIND
                && reference.name == McpBridge::DEFAULT_NAME
        }
    }
}

fn bridge_backend() -> IngressBackend {
    IngressBackend {
        resource: Some(TypedLocalObjectReference {
            api_group: Some(McpBridge::API_GROUP.to_string()),
            kind: McpBridge::KIND.to_string(),
            name: McpBridge::DEFAULT_NAME.to_string(),
        }),
        service: None,
    }
}

#[instrument(skip(ingress), fields(ingress = %ingress.name_any()))]
pub fn ingress_to_route(ingress: &Ingress) -> Route {
    let metadata = &ingress.metadata;
    let annotations = metadata.annotations.clone().unwrap_or_default();

    let mut route = Route {
        name: metadata.name.clone(),
        version: metadata.resource_version.clone(),
        ..Default::default()
    };

    if let Some(ref spec) = ingress.spec {
        fill_route_with_rules(&mut route, spec, &annotations);
    }

    route.services = annotations.get(DESTINATION_KEY).map(|v| parse_destinations(v));
    route.methods = annotations::decode_methods(&annotations);
    route.cors = annotations::decode_cors(&annotations);
    route.rewrite = annotations::decode_rewrite(&annotations);
    route.proxy_next_upstream = annotations::decode_proxy_next_upstream(&annotations);
    route.custom_configs = Some(annotations::decode_custom(&annotations));
    route
}

fn fill_route_with_rules(route: &mut Route, spec: &IngressSpec, annotations: &Annotations) {
    let rule = match spec.rules.as_deref() {
        Some([rule]) => rule,
        Some(rules) => {
            debug!("Ingress has {} rules, leaving domains unset", rules.len());
            return;
        }
        None => return,
    };

    route.domains = Some(rule.host.iter().cloned().collect());

    if let Some(path) = rule.http.as_ref().and_then(|http| http.paths.first()) {
        route.path = decode_path(path, annotations);
    }
}

fn decode_path(path: &HTTPIngressPath, annotations: &Annotations) -> Option<RoutePredicate> {
    let match_type = match path.path_type.as_str() {
        PATH_TYPE_EXACT => RoutePredicateType::Equal,
        PATH_TYPE_PREFIX if annotations::decode_use_regex(annotations) => RoutePredicateType::Regular,
        PATH_TYPE_PREFIX => RoutePredicateType::Prefix,
        other => {
            warn!("Unsupported ingress path type {}", other);
            return None;
        }
    };
    Some(RoutePredicate {
        match_type: Some(match_type.to_string()),
        match_value: path.path.clone(),
        case_sensitive: annotations::decode_case_sensitive(annotations),
    })
}

#[instrument(skip(route, config), fields(route = ?route.name))]
pub fn route_to_ingress(route: &Route, config: &ConverterConfig) -> Result<Ingress> {
    let host = match route.domains.as_deref() {
        Some([domain]) => Some(domain.clone()),
        Some([_, _, ..]) => {
            return Err(Error::invalid_argument("Only one domain is allowed in a route"));
        }
        _ => None,
    };

    let mut annotations = Annotations::new();

    let http = route
        .path
        .as_ref()
        .map(|predicate| encode_path(predicate, &mut annotations))
        .transpose()?;

    if let Some(ref services) = route.services {
        annotations.insert(DESTINATION_KEY.to_string(), serialize_destinations(services));
    }
    if let Some(ref methods) = route.methods {
        annotations::encode_methods(methods, &mut annotations);
    }
    if let Some(ref cors) = route.cors {
        annotations::encode_cors(cors, &mut annotations);
    }
    if let Some(ref rewrite) = route.rewrite {
        annotations::encode_rewrite(rewrite, &mut annotations);
    }
    if let Some(ref retry) = route.proxy_next_upstream {
        annotations::encode_proxy_next_upstream(retry, &mut annotations);
    }
    if let Some(ref custom) = route.custom_configs {
        annotations::encode_custom(custom, &mut annotations)?;
    }

    Ok(Ingress {
        metadata: ObjectMeta {
            name: route.name.clone(),
            namespace: config.namespace.clone(),
            resource_version: route.version.clone(),
            annotations: (!annotations.is_empty()).then_some(annotations),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            ingress_class_name: config.ingress_class.clone(),
            rules: Some(vec![IngressRule { host, http }]),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn encode_path(predicate: &RoutePredicate, annotations: &mut Annotations) -> Result<HTTPIngressRuleValue> {
    let match_type: RoutePredicateType = predicate
        .match_type
        .as_deref()
        .ok_or_else(|| Error::invalid_argument("Path match type is missing"))?
        .parse()?;

    let path_type = match match_type {
        RoutePredicateType::Equal => PATH_TYPE_EXACT,
        RoutePredicateType::Prefix => PATH_TYPE_PREFIX,
        RoutePredicateType::Regular => {
            annotations.insert(USE_REGEX_KEY.to_string(), TRUE_VALUE.to_string());
            PATH_TYPE_PREFIX
        }
    };
    annotations::encode_case_sensitive(predicate.case_sensitive, annotations);

    Ok(HTTPIngressRuleValue {
        paths: vec![HTTPIngressPath {
            backend: bridge_backend(),
            path: predicate.match_value.clone(),
            path_type: path_type.to_string(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{CorsConfig, ProxyNextUpstreamConfig, RewriteConfig, UpstreamService},
        resources::labels::*,
    };
    use k8s_openapi::api::networking::v1::{IngressServiceBackend, ServiceBackendPort};
    use std::collections::BTreeMap;

    fn basic_supported_ingress() -> Ingress {
        Ingress {
            metadata: ObjectMeta::default(),
            spec: Some(IngressSpec {
                rules: Some(vec![IngressRule {
                    host: None,
                    http: Some(HTTPIngressRuleValue {
                        paths: vec![HTTPIngressPath {
                            backend: bridge_backend(),
                            path: Some("/".to_string()),
                            path_type: PATH_TYPE_PREFIX.to_string(),
                        }],
                    }),
                }]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn basic_route() -> Route {
        Route {
            domains: Some(vec![]),
            custom_configs: Some(BTreeMap::new()),
            ..Default::default()
        }
    }

    fn set_annotation(ingress: &mut Ingress, key: &str, value: &str) {
        ingress
            .metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
    }

    fn first_path(ingress: &mut Ingress) -> &mut HTTPIngressPath {
        &mut ingress.spec.as_mut().unwrap().rules.as_mut().unwrap()[0]
            .http
            .as_mut()
            .unwrap()
            .paths[0]
    }

    #[test]
    fn test_supported() {
        assert!(is_supported(&basic_supported_ingress()));

        let mut ingress = basic_supported_ingress();
        first_path(&mut ingress).path_type = PATH_TYPE_EXACT.to_string();
        assert!(is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        first_path(&mut ingress).backend = IngressBackend::default();
        assert!(is_supported(&ingress));
    }

    #[test]
    fn test_unsupported_shapes() {
        let mut ingress = basic_supported_ingress();
        ingress.spec = None;
        assert!(!is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        ingress.spec.as_mut().unwrap().rules = None;
        assert!(!is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        let rules = ingress.spec.as_mut().unwrap().rules.as_mut().unwrap();
        rules.push(rules[0].clone());
        assert!(!is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        ingress.spec.as_mut().unwrap().rules.as_mut().unwrap()[0].http = None;
        assert!(!is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        ingress.spec.as_mut().unwrap().rules.as_mut().unwrap()[0]
            .http
            .as_mut()
            .unwrap()
            .paths
            .clear();
        assert!(!is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        let path = first_path(&mut ingress).clone();
        ingress.spec.as_mut().unwrap().rules.as_mut().unwrap()[0]
            .http
            .as_mut()
            .unwrap()
            .paths
            .push(path);
        assert!(!is_supported(&ingress));
    }

    #[test]
    fn test_unsupported_path_type() {
        let mut ingress = basic_supported_ingress();
        first_path(&mut ingress).path_type = "ImplementationSpecific".to_string();
        assert!(!is_supported(&ingress));
    }

    #[test]
    fn test_unsupported_backends() {
        let mut ingress = basic_supported_ingress();
        first_path(&mut ingress).backend = IngressBackend {
            resource: None,
            service: Some(IngressServiceBackend {
                name: "hello".to_string(),
                port: Some(ServiceBackendPort {
                    number: Some(8080),
                    name: None,
                }),
            }),
        };
        assert!(!is_supported(&ingress));

        let mut ingress = basic_supported_ingress();
        first_path(&mut ingress).backend = IngressBackend {
            resource: Some(TypedLocalObjectReference {
                api_group: Some("example.com".to_string()),
                kind: "Storage".to_string(),
                name: "default".to_string(),
            }),
            service: None,
        };
        assert!(!is_supported(&ingress));
    }

    #[test]
    fn test_ingress_to_route_prefix_path() {
        let mut ingress = basic_supported_ingress();
        ingress.metadata.name = Some("test".to_string());
        set_annotation(&mut ingress, DESTINATION_KEY, "hello.default.svc.cluster.local");

        let route = ingress_to_route(&ingress);

        let expected = Route {
            name: Some("test".to_string()),
            path: Some(RoutePredicate::new(RoutePredicateType::Prefix, "/")),
            services: Some(vec![UpstreamService::new("hello.default.svc.cluster.local")]),
            ..basic_route()
        };
        assert_eq!(route, expected);
    }

    #[test]
    fn test_ingress_to_route_exact_path() {
        let mut ingress = basic_supported_ingress();
        first_path(&mut ingress).path_type = PATH_TYPE_EXACT.to_string();
        first_path(&mut ingress).path = Some("/exact".to_string());

        let route = ingress_to_route(&ingress);
        assert_eq!(route.path, Some(RoutePredicate::new(RoutePredicateType::Equal, "/exact")));
    }

    #[test]
    fn test_ingress_to_route_regular_path() {
        let mut ingress = basic_supported_ingress();
        set_annotation(&mut ingress, USE_REGEX_KEY, TRUE_VALUE);
        first_path(&mut ingress).path = Some("/route_\\d+".to_string());

        let route = ingress_to_route(&ingress);
        assert_eq!(route.path, Some(RoutePredicate::new(RoutePredicateType::Regular, "/route_\\d+")));
        assert_eq!(route.custom_configs, Some(BTreeMap::new()));
    }

    #[test]
    fn test_ingress_to_route_weighted_services() {
        let mut ingress = basic_supported_ingress();
        ingress.metadata.name = Some("test".to_string());
        set_annotation(
            &mut ingress,
            DESTINATION_KEY,
            "20% hello1.default.svc.cluster.local:8080\n\
             30% hello2.default.svc.cluster.local:18080 v1\n\
             50% hello3.default.svc.cluster.local v2",
        );

        let route = ingress_to_route(&ingress);

        let services = route.services.unwrap();
        assert_eq!(services.len(), 3);
        assert_eq!(
            services.iter().map(|s| s.weight).collect::<Vec<_>>(),
            vec![Some(20), Some(30), Some(50)]
        );
        assert_eq!(
            services.iter().map(|s| s.port).collect::<Vec<_>>(),
            vec![Some(8080), Some(18080), None]
        );
        assert_eq!(
            services.iter().map(|s| s.version.as_deref()).collect::<Vec<_>>(),
            vec![None, Some("v1"), Some("v2")]
        );
        assert_eq!(route.path, Some(RoutePredicate::new(RoutePredicateType::Prefix, "/")));
    }

    #[test]
    fn test_ingress_to_route_without_rules() {
        let ingress = Ingress {
            metadata: ObjectMeta {
                name: Some("test-ingress".to_string()),
                resource_version: Some("1".to_string()),
                annotations: Some(BTreeMap::from([(
                    "example.com".to_string(),
                    "annotation-value".to_string(),
                )])),
                ..Default::default()
            },
            spec: Some(IngressSpec {
                default_backend: Some(IngressBackend::default()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let route = ingress_to_route(&ingress);
        assert_eq!(route.name.as_deref(), Some("test-ingress"));
        assert_eq!(route.version.as_deref(), Some("1"));
        assert_eq!(route.domains, None);
        assert_eq!(route.path, None);
        assert_eq!(route.custom_configs.unwrap()["example.com"], "annotation-value");
    }

    #[test]
    fn test_ingress_to_route_multiple_rules() {
        let ingress = Ingress {
            spec: Some(IngressSpec {
                rules: Some(vec![
                    IngressRule {
                        host: Some("example.com".to_string()),
                        http: None,
                    },
                    IngressRule {
                        host: Some("test.example.com".to_string()),
                        http: None,
                    },
                ]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(ingress_to_route(&ingress).domains, None);
    }

    #[test]
    fn test_ingress_to_route_without_spec() {
        let ingress = Ingress {
            metadata: ObjectMeta {
                name: Some("test-ingress".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let route = ingress_to_route(&ingress);
        assert_eq!(route.name.as_deref(), Some("test-ingress"));
        assert_eq!(route.version, None);
        assert_eq!(route.domains, None);
        assert_eq!(route.services, None);
    }

    #[test]
    fn test_route_to_ingress_prefix_path() {
        let route = Route {
            name: Some("test".to_string()),
            path: Some(RoutePredicate::new(RoutePredicateType::Prefix, "/")),
            services: Some(vec![UpstreamService::new("hello.default.svc.cluster.local")]),
            ..basic_route()
        };

        let ingress = route_to_ingress(&route, &ConverterConfig::default()).unwrap();

        let mut expected = basic_supported_ingress();
        expected.metadata.name = Some("test".to_string());
        set_annotation(&mut expected, DESTINATION_KEY, "hello.default.svc.cluster.local");
        assert_eq!(ingress, expected);
    }

    #[test]
    fn test_route_to_ingress_regular_path() {
        let route = Route {
            path: Some(RoutePredicate::new(RoutePredicateType::Regular, "/route_\\d+")),
            ..basic_route()
        };

        let mut ingress = route_to_ingress(&route, &ConverterConfig::default()).unwrap();

        assert_eq!(ingress.metadata.annotations.as_ref().unwrap()[USE_REGEX_KEY], "true");
        let path = first_path(&mut ingress);
        assert_eq!(path.path_type, PATH_TYPE_PREFIX);
        assert_eq!(path.path.as_deref(), Some("/route_\\d+"));
    }

    #[test]
    fn test_route_to_ingress_uses_config() {
        let config = ConverterConfig {
            ingress_class: Some("higress".to_string()),
            namespace: Some("higress-system".to_string()),
        };
        let route = Route {
            name: Some("test-route".to_string()),
            domains: Some(vec!["example.com".to_string()]),
            ..Default::default()
        };

        let ingress = route_to_ingress(&route, &config).unwrap();

        assert_eq!(ingress.metadata.namespace.as_deref(), Some("higress-system"));
        let spec = ingress.spec.unwrap();
        assert_eq!(spec.ingress_class_name.as_deref(), Some("higress"));
        let rule = &spec.rules.unwrap()[0];
        assert_eq!(rule.host.as_deref(), Some("example.com"));
        assert!(rule.http.is_none());
    }

    #[test]
    fn test_route_to_ingress_multiple_domains() {
        let route = Route {
            domains: Some(vec!["example.com".to_string(), "test.example.com".to_string()]),
            path: Some(RoutePredicate::new(RoutePredicateType::Equal, "/test")),
            ..Default::default()
        };
        let err = route_to_ingress(&route, &ConverterConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_route_to_ingress_invalid_match_type() {
        let route = Route {
            domains: Some(vec!["example.com".to_string()]),
            path: Some(RoutePredicate {
                match_type: Some("invalid".to_string()),
                match_value: Some("/test".to_string()),
                case_sensitive: None,
            }),
            ..Default::default()
        };
        let err = route_to_ingress(&route, &ConverterConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let route = Route {
            path: Some(RoutePredicate::default()),
            ..Default::default()
        };
        assert!(route_to_ingress(&route, &ConverterConfig::default()).is_err());
    }

    #[test]
    fn test_route_to_ingress_custom_annotations() {
        let route = Route {
            name: Some("test-route".to_string()),
            domains: Some(vec!["example.com".to_string()]),
            custom_configs: Some(BTreeMap::from([(
                "custom.annotation.com".to_string(),
                "value".to_string(),
            )])),
            ..Default::default()
        };
        let ingress = route_to_ingress(&route, &ConverterConfig::default()).unwrap();
        assert_eq!(ingress.metadata.name.as_deref(), Some("test-route"));
        assert_eq!(ingress.metadata.annotations.unwrap()["custom.annotation.com"], "value");

        let route = Route {
            domains: Some(vec!["example.com".to_string()]),
            custom_configs: Some(BTreeMap::from([(
                PROXY_NEXT_UPSTREAM_ENABLED_KEY.to_string(),
                "value".to_string(),
            )])),
            ..Default::default()
        };
        let err = route_to_ingress(&route, &ConverterConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_route_round_trip() {
        let route = Route {
            name: Some("full".to_string()),
            version: Some("42".to_string()),
            domains: Some(vec!["www.example.com".to_string()]),
            path: Some(RoutePredicate {
                match_type: Some("REGULAR".to_string()),
                match_value: Some("/api/v\\d+".to_string()),
                case_sensitive: Some(false),
            }),
            methods: Some(vec!["GET".to_string(), "POST".to_string()]),
            services: Some(vec![
                UpstreamService {
                    name: "a.default.svc.cluster.local".to_string(),
                    port: Some(8080),
                    version: None,
                    weight: Some(40),
                },
                UpstreamService {
                    name: "b.default.svc.cluster.local".to_string(),
                    port: None,
                    version: Some("v2".to_string()),
                    weight: Some(60),
                },
            ]),
            cors: Some(CorsConfig {
                enabled: Some(true),
                allow_origins: Some(vec!["*".to_string()]),
                max_age: Some(600),
                ..Default::default()
            }),
            rewrite: Some(RewriteConfig {
                enabled: Some(true),
                path: Some("/".to_string()),
                host: None,
            }),
            proxy_next_upstream: Some(ProxyNextUpstreamConfig {
                enabled: Some(false),
                attempts: Some(3),
                timeout: None,
                conditions: Some(vec!["error".to_string(), "timeout".to_string()]),
            }),
            custom_configs: Some(BTreeMap::from([(
                "nginx.ingress.kubernetes.io/ssl-redirect".to_string(),
                "false".to_string(),
            )])),
        };

        let ingress = route_to_ingress(&route, &ConverterConfig::default()).unwrap();
        assert!(is_supported(&ingress));
        assert_eq!(ingress_to_route(&ingress), route);
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;

        fn token() -> impl Strategy<Value = String> {
            "[A-Za-z0-9*._:/-]{1,16}"
        }

        fn token_list() -> impl Strategy<Value = Option<Vec<String>>> {
            proptest::option::of(proptest::collection::vec(token(), 0..4))
        }

        fn predicate() -> impl Strategy<Value = RoutePredicate> {
            (
                prop_oneof![
                    Just(RoutePredicateType::Prefix),
                    Just(RoutePredicateType::Equal),
                    Just(RoutePredicateType::Regular),
                ],
                proptest::option::of("/[a-z0-9/._-]{0,20}"),
                proptest::option::of(any::<bool>()),
            )
                .prop_map(|(match_type, match_value, case_sensitive)| RoutePredicate {
                    match_type: Some(match_type.to_string()),
                    match_value,
                    case_sensitive,
                })
        }

        fn upstream_service() -> impl Strategy<Value = UpstreamService> {
            (
                "[a-z][a-z0-9.-]{0,30}",
                proptest::option::of(1u16..=u16::MAX),
                proptest::option::of("[A-Za-z0-9._-]{1,12}"),
                proptest::option::of(1u32..=100),
            )
                .prop_map(|(name, port, version, weight)| UpstreamService {
                    name,
                    port,
                    version,
                    weight,
                })
        }

        // An attribute block with every field absent writes no annotation, so `enabled` is always set
        fn cors() -> impl Strategy<Value = CorsConfig> {
            (
                any::<bool>(),
                token_list(),
                token_list(),
                token_list(),
                token_list(),
                proptest::option::of(any::<u32>()),
                proptest::option::of(any::<bool>()),
            )
                .prop_map(
                    |(enabled, allow_origins, allow_methods, allow_headers, expose_headers, max_age, allow_credentials)| {
                        CorsConfig {
                            enabled: Some(enabled),
                            allow_origins,
                            allow_methods,
                            allow_headers,
                            expose_headers,
                            max_age,
                            allow_credentials,
                        }
                    },
                )
        }

        fn rewrite() -> impl Strategy<Value = RewriteConfig> {
            (
                any::<bool>(),
                proptest::option::of("/[a-z0-9/_-]{0,16}"),
                proptest::option::of("[a-z0-9.-]{1,16}"),
            )
                .prop_map(|(enabled, path, host)| RewriteConfig {
                    enabled: Some(enabled),
                    path,
                    host,
                })
        }

        fn proxy_next_upstream() -> impl Strategy<Value = ProxyNextUpstreamConfig> {
            (
                any::<bool>(),
                proptest::option::of(any::<u32>()),
                proptest::option::of(any::<u32>()),
                token_list(),
            )
                .prop_map(|(enabled, attempts, timeout, conditions)| ProxyNextUpstreamConfig {
                    enabled: Some(enabled),
                    attempts,
                    timeout,
                    conditions,
                })
        }

        fn route() -> impl Strategy<Value = Route> {
            let identity = (
                proptest::option::of("[a-z][a-z0-9-]{0,20}"),
                proptest::option::of("[0-9]{1,6}"),
                proptest::collection::vec("[a-z0-9-]{1,10}\\.example\\.com", 0..=1),
                proptest::option::of(predicate()),
                proptest::option::of(proptest::collection::vec("[A-Z]{1,7}", 0..4)),
                proptest::option::of(proptest::collection::vec(upstream_service(), 0..4)),
            );
            let attributes = (
                proptest::option::of(cors()),
                proptest::option::of(rewrite()),
                proptest::option::of(proxy_next_upstream()),
                proptest::collection::btree_map("[a-z]{1,8}\\.example\\.com/[a-z-]{1,12}", "[ -~]{0,20}", 0..4),
            );
            (identity, attributes).prop_map(
                |((name, version, domains, path, methods, services), (cors, rewrite, proxy_next_upstream, custom))| {
                    Route {
                        name,
                        version,
                        domains: Some(domains),
                        path,
                        methods,
                        services,
                        cors,
                        rewrite,
                        proxy_next_upstream,
                        custom_configs: Some(custom),
                    }
                },
            )
        }

        proptest! {
            #[test]
            fn test_generated_route_round_trip(route in route()) {
                let ingress = route_to_ingress(&route, &ConverterConfig::default()).unwrap();
                prop_assert_eq!(is_supported(&ingress), route.path.is_some());
                prop_assert_eq!(ingress_to_route(&ingress), route);
            }
        }
    }
}
