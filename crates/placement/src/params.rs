//! Parameter parsing for loosely typed callers.
//!
//! Automation tools hand over a JSON object of parameters whose values may
//! be of any type. This module performs the one runtime type check at that
//! boundary and produces a typed [`Request`].
//!
//! ```
//! use placement::params::ModuleArgs;
//! use placement::DesiredState;
//!
//! let args = ModuleArgs::from_json(r#"{"name": "web", "state": "absent", "aws_region": "eu-west-1"}"#).unwrap();
//! assert_eq!(args.request.state, DesiredState::Absent);
//! assert_eq!(args.region.as_deref(), Some("eu-west-1"));
//! ```

use crate::error::{Error, Result};
use crate::types::{DesiredState, GroupName, Request, Strategy};
use serde_json::{Map, Value};

/// Spellings accepted for the region parameter, highest precedence first.
const REGION_KEYS: &[&str] = &["region", "aws_region", "ec2_region"];

/// Endpoint override parameter.
const ENDPOINT_KEY: &str = "ec2_url";

/// Credential and transport parameters of the common EC2 argument set.
///
/// Accepted so existing argument documents keep working, but credentials
/// always come from the SDK's provider chain.
const IGNORED_KEYS: &[&str] = &[
    "aws_access_key",
    "ec2_access_key",
    "access_key",
    "aws_secret_key",
    "ec2_secret_key",
    "secret_key",
    "security_token",
    "aws_security_token",
    "access_token",
    "profile",
    "validate_certs",
];

/// Parsed invocation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleArgs {
    pub request: Request,
    /// Region, if the caller named one.
    pub region: Option<String>,
    /// Endpoint override from `ec2_url`.
    pub endpoint_url: Option<String>,
}

impl ModuleArgs {
    /// Parse a JSON argument document.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| Error::invalid("args", format!("must be valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse an already decoded argument document.
    ///
    /// `null` values count as not supplied. An empty `name` also counts as
    /// not supplied, so present/absent will then fail as missing.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::invalid("args", "must be a JSON object"));
        };

        if let Some(unknown) = map.keys().find(|k| !is_known(k)) {
            return Err(Error::invalid(
                unknown.clone(),
                "is not a supported parameter",
            ));
        }
        for key in map.keys().filter(|k| IGNORED_KEYS.contains(&k.as_str())) {
            log::warn!("Ignoring {key}: credentials and TLS settings come from the AWS SDK");
        }

        let name = match string_param(&map, "name")? {
            Some(name) if !name.is_empty() => Some(GroupName::new(name)?),
            _ => None,
        };
        let strategy = string_param(&map, "strategy")?
            .map(str::parse::<Strategy>)
            .transpose()?
            .unwrap_or_default();
        let state = string_param(&map, "state")?
            .map(str::parse::<DesiredState>)
            .transpose()?
            .unwrap_or_default();

        let mut region = None;
        for key in REGION_KEYS {
            let value = string_param(&map, key)?;
            if region.is_none() {
                region = value.map(str::to_string);
            }
        }

        let endpoint_url = string_param(&map, ENDPOINT_KEY)?
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(Self {
            request: Request::new(name, strategy, state),
            region,
            endpoint_url,
        })
    }
}

fn is_known(key: &str) -> bool {
    matches!(key, "name" | "strategy" | "state" | ENDPOINT_KEY)
        || REGION_KEYS.contains(&key)
        || IGNORED_KEYS.contains(&key)
}

/// Fetch a parameter that must be a string when present.
fn string_param<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(Error::invalid(key, "must be string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let args = ModuleArgs::from_value(json!({})).unwrap();
        assert_eq!(args, ModuleArgs::default());
        assert_eq!(args.request.state, DesiredState::Present);
        assert_eq!(args.request.strategy, Strategy::Cluster);
    }

    #[test]
    fn test_full_document() {
        let args = ModuleArgs::from_value(json!({
            "name": "example_group",
            "strategy": "cluster",
            "state": "list",
            "region": "us-east-1",
        }))
        .unwrap();

        assert_eq!(args.request.name.unwrap().as_str(), "example_group");
        assert_eq!(args.request.state, DesiredState::List);
        assert_eq!(args.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_non_string_name_is_invalid_input() {
        let err = ModuleArgs::from_value(json!({"name": 123, "state": "present"})).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "name"));
        assert_eq!(err.to_string(), "name argument must be string");
    }

    #[test]
    fn test_null_and_empty_name_are_not_supplied() {
        for name in [json!(null), json!("")] {
            let args = ModuleArgs::from_value(json!({"name": name, "state": "present"})).unwrap();
            assert!(args.request.name.is_none());
            assert!(matches!(
                args.request.target(),
                Err(Error::MissingRequiredField { .. })
            ));
        }
    }

    #[test]
    fn test_disallowed_choices() {
        let err = ModuleArgs::from_value(json!({"strategy": "spread"})).unwrap_err();
        assert!(err.to_string().starts_with("strategy argument"));

        let err = ModuleArgs::from_value(json!({"state": "running"})).unwrap_err();
        assert!(err.to_string().starts_with("state argument"));

        let err = ModuleArgs::from_value(json!({"state": true})).unwrap_err();
        assert_eq!(err.to_string(), "state argument must be string");
    }

    #[test]
    fn test_unknown_parameter() {
        let err = ModuleArgs::from_value(json!({"name": "web", "zone": "a"})).unwrap_err();
        assert_eq!(err.to_string(), "zone argument is not a supported parameter");
    }

    #[test]
    fn test_region_aliases() {
        let args = ModuleArgs::from_value(json!({"ec2_region": "ap-south-1"})).unwrap();
        assert_eq!(args.region.as_deref(), Some("ap-south-1"));

        let args = ModuleArgs::from_value(json!({
            "ec2_region": "ap-south-1",
            "region": "us-west-2",
        }))
        .unwrap();
        assert_eq!(args.region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn test_ec2_url_sets_endpoint() {
        let args = ModuleArgs::from_value(json!({
            "name": "web",
            "ec2_url": "http://localhost:4566",
        }))
        .unwrap();
        assert_eq!(args.endpoint_url.as_deref(), Some("http://localhost:4566"));

        let args = ModuleArgs::from_value(json!({"ec2_url": ""})).unwrap();
        assert!(args.endpoint_url.is_none());

        let err = ModuleArgs::from_value(json!({"ec2_url": 4566})).unwrap_err();
        assert_eq!(err.to_string(), "ec2_url argument must be string");
    }

    #[test]
    fn test_credential_parameters_are_accepted_and_ignored() {
        let args = ModuleArgs::from_value(json!({
            "name": "web",
            "aws_access_key": "AKIAEXAMPLE",
            "aws_secret_key": "secret",
            "security_token": "token",
            "profile": "staging",
            "validate_certs": false,
        }))
        .unwrap();

        assert_eq!(args.request.name.unwrap().as_str(), "web");
        assert!(args.region.is_none());
        assert!(args.endpoint_url.is_none());
    }

    #[test]
    fn test_not_an_object() {
        assert!(ModuleArgs::from_value(json!(["web"])).is_err());
        assert!(ModuleArgs::from_json("not json").is_err());
    }
}
