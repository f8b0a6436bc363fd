use k8s_openapi::{
    api::core::v1::Secret, apimachinery::pkg::apis::meta::v1::ObjectMeta, ByteString,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use x509_parser::{extensions::GeneralName, pem::parse_x509_pem};

use super::labels::tls_secret_labels;
use crate::{config::ConverterConfig, date_time::DateTime, model::TlsCertificate};

pub const SECRET_TYPE_TLS: &str = "kubernetes.io/tls";
pub const TLS_CRT_FIELD: &str = "tls.crt";
pub const TLS_KEY_FIELD: &str = "tls.key";

pub fn secret_to_tls_certificate(secret: &Secret) -> TlsCertificate {
    let read_field = |key: &str| -> Option<String> {
        let value = secret.data.as_ref()?.get(key)?;
        match String::from_utf8(value.0.clone()) {
            Ok(text) => Some(text),
            Err(_) => {
                warn!("Secret field {} is not valid UTF-8", key);
                None
            }
        }
    };

    let mut certificate = TlsCertificate {
        name: secret.metadata.name.clone(),
        version: secret.metadata.resource_version.clone(),
        cert: read_field(TLS_CRT_FIELD),
        key: read_field(TLS_KEY_FIELD),
        ..Default::default()
    };

    if let Some(info) = certificate.cert.as_deref().and_then(parse_certificate) {
        certificate.validity_start = info.validity_start;
        certificate.validity_end = info.validity_end;
        certificate.domains = Some(info.domains);
    }
    certificate
}

struct CertificateInfo {
    validity_start: Option<DateTime>,
    validity_end: Option<DateTime>,
    domains: Vec<String>,
}

/// Read the validity window and served domains of the leaf certificate in a PEM bundle.
/// Domains are the DNS subject alternative names, or the subject common name when there are none.
fn parse_certificate(cert_pem: &str) -> Option<CertificateInfo> {
    let (_, pem) = match parse_x509_pem(cert_pem.as_bytes()) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Certificate is not PEM encoded: {}", e);
            return None;
        }
    };
    let cert = match pem.parse_x509() {
        Ok(cert) => cert,
        Err(e) => {
            debug!("Failed to parse X.509 certificate: {}", e);
            return None;
        }
    };

    let mut domains: Vec<String> = match cert.subject_alternative_name() {
        Ok(Some(san)) => san
            .value
            .general_names
            .iter()
            .filter_map(|name| match name {
                GeneralName::DNSName(dns) => Some(dns.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    if domains.is_empty() {
        domains.extend(
            cert.subject()
                .iter_common_name()
                .next()
                .and_then(|cn| cn.as_str().ok())
                .map(str::to_string),
        );
    }

    let validity = cert.validity();
    Some(CertificateInfo {
        validity_start: DateTime::from_timestamp(validity.not_before.timestamp()),
        validity_end: DateTime::from_timestamp(validity.not_after.timestamp()),
        domains,
    })
}

pub fn tls_certificate_to_secret(certificate: &TlsCertificate, config: &ConverterConfig) -> Secret {
    let mut data = BTreeMap::new();
    if let Some(ref cert) = certificate.cert {
        data.insert(TLS_CRT_FIELD.to_string(), ByteString(cert.as_bytes().to_vec()));
    }
    if let Some(ref key) = certificate.key {
        data.insert(TLS_KEY_FIELD.to_string(), ByteString(key.as_bytes().to_vec()));
    }

    let labels = certificate
        .domains
        .as_deref()
        .filter(|domains| !domains.is_empty())
        .map(tls_secret_labels);

    Secret {
        metadata: ObjectMeta {
            name: certificate.name.clone(),
            namespace: config.namespace.clone(),
            resource_version: certificate.version.clone(),
            labels,
            ..Default::default()
        },
        data: Some(data),
        type_: Some(SECRET_TYPE_TLS.to_string()),
        ..Default::default()
    }
}
