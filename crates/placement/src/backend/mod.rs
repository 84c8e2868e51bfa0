//! Backend abstraction for the placement group API.
//!
//! The [`Backend`] trait is the cloud client the reconciler talks to.
//! [`ec2::Ec2Backend`] calls the real EC2 API; [`MockBackend`] keeps an
//! in-memory inventory and records every call for tests:
//!
//! ```
//! use placement::backend::{Backend, Call, MockBackend};
//!
//! let mock = MockBackend::with_groups(["web"]);
//! let groups = mock.list_placement_groups(None).unwrap();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(mock.calls(), vec![Call::List { filter: None }]);
//! ```

#[cfg(feature = "ec2")]
pub mod ec2;

use crate::error::{Error, Result};
use crate::types::{GroupName, PlacementGroup, Strategy};
use std::sync::{Arc, Mutex, PoisonError};

/// Cloud client for placement groups.
///
/// Implementations perform exactly one provider request per call and
/// never retry.
pub trait Backend: Send + Sync {
    /// List placement groups, optionally filtered server-side by exact name.
    ///
    /// The filter is an optimisation only; callers still compare names.
    fn list_placement_groups(&self, filter: Option<&GroupName>) -> Result<Vec<PlacementGroup>>;

    /// Create a placement group with the given strategy.
    fn create_placement_group(&self, name: &GroupName, strategy: Strategy) -> Result<()>;

    /// Delete a placement group.
    fn delete_placement_group(&self, name: &GroupName) -> Result<()>;
}

/// Connection settings for the real backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    /// Region to talk to. `None` defers to the SDK's default chain.
    pub region: Option<String>,
    /// Override the service endpoint (e.g. a local emulator).
    pub endpoint_url: Option<String>,
}

/// Build the default backend for these settings.
///
/// Fails with [`Error::MissingDependency`] when EC2 support is not compiled
/// in. No network request is made here.
#[cfg(feature = "ec2")]
pub fn connect(settings: &ClientSettings) -> Result<Box<dyn Backend>> {
    Ok(Box::new(ec2::Ec2Backend::new(settings)?))
}

/// Build the default backend for these settings.
///
/// Fails with [`Error::MissingDependency`] when EC2 support is not compiled
/// in. No network request is made here.
#[cfg(not(feature = "ec2"))]
pub fn connect(_settings: &ClientSettings) -> Result<Box<dyn Backend>> {
    Err(Error::MissingDependency {
        message: "EC2 support is not compiled in (enable the `ec2` feature)".to_string(),
    })
}

/// A call received by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { filter: Option<String> },
    Create { name: String, strategy: Strategy },
    Delete { name: String },
}

impl Call {
    /// Whether this call changes provider state.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::Create { .. } | Call::Delete { .. })
    }
}

/// Which operation a [`MockBackend`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOperation {
    List,
    Create,
    Delete,
}

#[derive(Debug, Default)]
struct MockState {
    groups: Vec<PlacementGroup>,
    calls: Vec<Call>,
    failing: Option<MockOperation>,
}

/// In-memory backend for testing without network access.
///
/// Behaves like EC2 for the cases the reconciler cares about: creating a
/// duplicate or deleting an unknown group is an error.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Create a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend holding the named groups, in order.
    #[must_use]
    pub fn with_groups<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for name in names {
            mock.add_group(PlacementGroup::named(name));
        }
        mock
    }

    /// Add a group to the inventory without recording a call.
    pub fn add_group(&self, group: PlacementGroup) {
        self.lock().groups.push(group);
    }

    /// Make every call to `operation` fail with a remote error.
    pub fn fail_on(&self, operation: MockOperation) {
        self.lock().failing = Some(operation);
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of create/delete calls received so far.
    pub fn mutation_count(&self) -> usize {
        self.lock().calls.iter().filter(|c| c.is_mutation()).count()
    }

    /// Names currently in the inventory.
    pub fn group_names(&self) -> Vec<String> {
        self.lock().groups.iter().map(|g| g.name.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Backend for MockBackend {
    fn list_placement_groups(&self, filter: Option<&GroupName>) -> Result<Vec<PlacementGroup>> {
        let mut state = self.lock();
        state.calls.push(Call::List {
            filter: filter.map(ToString::to_string),
        });
        if state.failing == Some(MockOperation::List) {
            return Err(Error::remote(
                "DescribePlacementGroups",
                "mock: request failed",
            ));
        }

        Ok(state
            .groups
            .iter()
            .filter(|g| filter.is_none_or(|f| g.name == f.as_str()))
            .cloned()
            .collect())
    }

    fn create_placement_group(&self, name: &GroupName, strategy: Strategy) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Create {
            name: name.to_string(),
            strategy,
        });
        if state.failing == Some(MockOperation::Create) {
            return Err(Error::remote("CreatePlacementGroup", "mock: request failed"));
        }
        if state.groups.iter().any(|g| g.name == name.as_str()) {
            return Err(Error::remote(
                "CreatePlacementGroup",
                format!("InvalidPlacementGroup.Duplicate: The placement group '{name}' already exists."),
            ));
        }

        state.groups.push(PlacementGroup {
            name: name.to_string(),
            strategy: Some(strategy.to_string()),
            state: Some("available".to_string()),
        });
        Ok(())
    }

    fn delete_placement_group(&self, name: &GroupName) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Delete {
            name: name.to_string(),
        });
        if state.failing == Some(MockOperation::Delete) {
            return Err(Error::remote("DeletePlacementGroup", "mock: request failed"));
        }

        let before = state.groups.len();
        state.groups.retain(|g| g.name != name.as_str());
        if state.groups.len() == before {
            return Err(Error::remote(
                "DeletePlacementGroup",
                format!("InvalidPlacementGroup.Unknown: The Placement Group '{name}' is unknown."),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> GroupName {
        GroupName::new(s).unwrap()
    }

    #[test]
    fn test_mock_backend_new() {
        let mock = MockBackend::new();
        assert!(mock.list_placement_groups(None).unwrap().is_empty());
        assert_eq!(mock.mutation_count(), 0);
    }

    #[test]
    fn test_mock_backend_filter_is_exact() {
        let mock = MockBackend::with_groups(["web", "web-2", "db"]);
        let groups = mock.list_placement_groups(Some(&name("web"))).unwrap();
        assert_eq!(groups, vec![PlacementGroup::named("web")]);
    }

    #[test]
    fn test_mock_backend_create_and_delete() {
        let mock = MockBackend::new();
        mock.create_placement_group(&name("web"), Strategy::Cluster)
            .unwrap();
        assert_eq!(mock.group_names(), vec!["web"]);

        let created = &mock.list_placement_groups(None).unwrap()[0];
        assert_eq!(created.strategy.as_deref(), Some("cluster"));

        mock.delete_placement_group(&name("web")).unwrap();
        assert!(mock.group_names().is_empty());
        assert_eq!(mock.mutation_count(), 2);
    }

    #[test]
    fn test_mock_backend_duplicate_create_fails() {
        let mock = MockBackend::with_groups(["web"]);
        let err = mock
            .create_placement_group(&name("web"), Strategy::Cluster)
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_mock_backend_unknown_delete_fails() {
        let mock = MockBackend::new();
        assert!(mock.delete_placement_group(&name("ghost")).is_err());
    }

    #[test]
    fn test_mock_backend_fail_on() {
        let mock = MockBackend::with_groups(["web"]);
        mock.fail_on(MockOperation::List);
        assert!(mock.list_placement_groups(None).is_err());
        assert_eq!(mock.calls(), vec![Call::List { filter: None }]);
    }

    #[test]
    fn test_mock_backend_clones_share_state() {
        let mock = MockBackend::new();
        let handle = mock.clone();
        mock.create_placement_group(&name("web"), Strategy::Cluster)
            .unwrap();
        assert_eq!(handle.group_names(), vec!["web"]);
    }

    #[cfg(not(feature = "ec2"))]
    #[test]
    fn test_connect_without_ec2_feature() {
        let err = connect(&ClientSettings::default()).err().unwrap();
        assert!(matches!(err, Error::MissingDependency { .. }));
    }
}
