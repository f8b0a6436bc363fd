use crate::error::{Error, Result};
use std::env;

#[derive(Clone, Debug, Default)]
pub struct ConverterConfig {
    /// Ingress class stamped onto generated ingresses
    pub ingress_class: Option<String>,

    /// Namespace stamped onto generated objects
    pub namespace: Option<String>,
}

impl ConverterConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            ingress_class: non_empty(&lookup, "INGRESS_CLASS")?,
            namespace: non_empty(&lookup, "GATEWAY_NAMESPACE")?,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => {
            Err(Error::ConfigError(format!("{} must not be empty", key)))
        }
        value => Ok(value),
    }
}
