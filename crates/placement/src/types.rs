//! Core types for placement group reconciliation

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Name of an EC2 placement group. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupName(String);

impl GroupName {
    /// Validate and wrap a placement group name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GroupName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Placement strategy for new groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Pack instances close together inside one availability zone.
    #[default]
    Cluster,
}

impl Strategy {
    /// Accepted spellings, for help text and validation messages.
    pub const NAMES: &'static [&'static str] = &["cluster"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Cluster => "cluster",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cluster" => Ok(Strategy::Cluster),
            other => Err(Error::invalid(
                "strategy",
                format!(
                    "must be one of: {} (got {other:?})",
                    Self::NAMES.join(", ")
                ),
            )),
        }
    }
}

/// What the caller wants the placement group to look like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DesiredState {
    /// The named group must exist.
    #[default]
    Present,
    /// The named group must not exist.
    Absent,
    /// Report the inventory without changing anything.
    List,
}

impl DesiredState {
    /// Accepted spellings, for help text and validation messages.
    pub const NAMES: &'static [&'static str] = &["present", "absent", "list"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Absent => "absent",
            DesiredState::List => "list",
        }
    }

    /// Whether this state may issue a create or delete call.
    pub fn is_mutating(&self) -> bool {
        matches!(self, DesiredState::Present | DesiredState::Absent)
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesiredState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "present" => Ok(DesiredState::Present),
            "absent" => Ok(DesiredState::Absent),
            "list" => Ok(DesiredState::List),
            other => Err(Error::invalid(
                "state",
                format!(
                    "must be one of: {} (got {other:?})",
                    Self::NAMES.join(", ")
                ),
            )),
        }
    }
}

/// A placement group as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementGroup {
    pub name: String,
    /// Strategy reported by the provider, if any.
    pub strategy: Option<String>,
    /// Lifecycle state reported by the provider (`available`, `deleting`, ...).
    pub state: Option<String>,
}

impl PlacementGroup {
    /// A group known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: None,
            state: None,
        }
    }
}

/// A fully parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    /// Target group, or list filter for [`DesiredState::List`].
    pub name: Option<GroupName>,
    pub strategy: Strategy,
    pub state: DesiredState,
}

impl Request {
    pub fn new(name: Option<GroupName>, strategy: Strategy, state: DesiredState) -> Self {
        Self {
            name,
            strategy,
            state,
        }
    }

    /// Name the request mutates, enforcing that present/absent carry one.
    ///
    /// Returns `Ok(None)` only for [`DesiredState::List`].
    pub fn target(&self) -> Result<Option<&GroupName>> {
        match (&self.name, self.state.is_mutating()) {
            (None, true) => Err(Error::MissingRequiredField {
                field: "name",
                state: self.state.to_string(),
            }),
            (name, _) => Ok(name.as_ref()),
        }
    }
}

/// Whether the group is currently there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Present,
    Absent,
}

/// What reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// Already converged.
    NoChange,
    /// Group was created.
    Created,
    /// Group was deleted.
    Removed,
    /// Inventory was reported.
    Listed,
}

impl ApplyResult {
    /// Check if the result represents a change
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Created | Self::Removed)
    }
}

/// `name` field of an [`Outcome`]: one group, or the inventory for `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GroupNames {
    Single(String),
    Many(Vec<String>),
}

/// Result of a reconciliation, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// True iff a create or delete call was issued.
    pub changed: bool,
    pub msg: String,
    pub name: GroupNames,
    /// Echo of the requested strategy.
    pub strategy: Strategy,
    /// Full provider records for `list`; not part of the JSON payload.
    #[serde(skip)]
    pub groups: Vec<PlacementGroup>,
}

impl Outcome {
    /// Names in the `name` field, whether single or many.
    pub fn names(&self) -> Vec<&str> {
        match &self.name {
            GroupNames::Single(name) => vec![name.as_str()],
            GroupNames::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name_rejects_empty() {
        assert!(GroupName::new("").is_err());
        assert_eq!(GroupName::new("web").unwrap().as_str(), "web");
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("cluster".parse::<Strategy>().unwrap(), Strategy::Cluster);
        let err = "spread".parse::<Strategy>().unwrap_err();
        assert!(err.to_string().contains("cluster"));
    }

    #[test]
    fn test_desired_state_parse() {
        assert_eq!("present".parse::<DesiredState>().unwrap(), DesiredState::Present);
        assert_eq!("absent".parse::<DesiredState>().unwrap(), DesiredState::Absent);
        assert_eq!("list".parse::<DesiredState>().unwrap(), DesiredState::List);
        assert!("Present".parse::<DesiredState>().is_err());
    }

    #[test]
    fn test_defaults() {
        let request = Request::default();
        assert_eq!(request.state, DesiredState::Present);
        assert_eq!(request.strategy, Strategy::Cluster);
        assert!(request.name.is_none());
    }

    #[test]
    fn test_target_requires_name_for_mutating_states() {
        for state in [DesiredState::Present, DesiredState::Absent] {
            let request = Request::new(None, Strategy::Cluster, state);
            assert!(matches!(
                request.target(),
                Err(Error::MissingRequiredField { field: "name", .. })
            ));
        }

        let list = Request::new(None, Strategy::Cluster, DesiredState::List);
        assert!(list.target().unwrap().is_none());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = Outcome {
            changed: false,
            msg: "List of all placement groups.".to_string(),
            name: GroupNames::Many(vec!["a".to_string(), "b".to_string()]),
            strategy: Strategy::Cluster,
            groups: vec![PlacementGroup::named("a"), PlacementGroup::named("b")],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "changed": false,
                "msg": "List of all placement groups.",
                "name": ["a", "b"],
                "strategy": "cluster",
            })
        );
    }

    #[test]
    fn test_apply_result_is_change() {
        assert!(ApplyResult::Created.is_change());
        assert!(ApplyResult::Removed.is_change());
        assert!(!ApplyResult::NoChange.is_change());
        assert!(!ApplyResult::Listed.is_change());
    }
}
