use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Name of the TlsCertificate served for this domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_identifier: Option<String>,
    /// Kept as text: values other than "true"/"false" are carried through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_https: Option<String>,
}
