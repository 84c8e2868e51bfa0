//! Reconciliation of a single placement group.
//!
//! Detect the current state from a fresh inventory, compare it with the
//! desired state, and issue at most one create or delete call.

use crate::backend::Backend;
use crate::error::Result;
use crate::types::{
    ApplyResult, DesiredState, GroupName, GroupNames, Outcome, PlacementGroup, Request,
    ResourceState, Strategy,
};

/// The single mutating call needed to converge, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Create,
    Delete,
}

/// Decide what to do for a mutating state.
fn plan(current: ResourceState, desired: DesiredState) -> Action {
    match (current, desired) {
        (ResourceState::Absent, DesiredState::Present) => Action::Create,
        (ResourceState::Present, DesiredState::Absent) => Action::Delete,
        _ => Action::None,
    }
}

/// Exact-name membership check against the inventory.
///
/// A filtered query can still return other names, so this never trusts the
/// server-side filter alone.
fn current_state(inventory: &[PlacementGroup], name: &GroupName) -> ResourceState {
    if inventory.iter().any(|g| g.name == name.as_str()) {
        ResourceState::Present
    } else {
        ResourceState::Absent
    }
}

/// Converges placement groups through a [`Backend`].
pub struct Reconciler<'a, B: Backend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: Backend + ?Sized> Reconciler<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Run one reconciliation.
    ///
    /// Input errors are raised before the backend is touched. Backend
    /// errors propagate unchanged.
    pub fn reconcile(&self, request: &Request) -> Result<Outcome> {
        let target = request.target()?;

        log::debug!(
            "Listing placement groups (filter: {})",
            request.name.as_ref().map_or("<none>", GroupName::as_str)
        );
        let inventory = self
            .backend
            .list_placement_groups(request.name.as_ref())?;
        log::debug!("Provider returned {} placement group(s)", inventory.len());

        let name = match (request.state, target) {
            (DesiredState::List, _) | (_, None) => {
                return Ok(list_outcome(inventory, request.strategy));
            }
            (_, Some(name)) => name,
        };

        let current = current_state(&inventory, name);
        let result = self.apply(plan(current, request.state), name, request.strategy)?;
        Ok(outcome(result, request.state, name, request.strategy))
    }

    fn apply(&self, action: Action, name: &GroupName, strategy: Strategy) -> Result<ApplyResult> {
        match action {
            Action::None => Ok(ApplyResult::NoChange),
            Action::Create => {
                log::info!("Creating placement group {name} ({strategy})");
                self.backend.create_placement_group(name, strategy)?;
                Ok(ApplyResult::Created)
            }
            Action::Delete => {
                log::info!("Deleting placement group {name}");
                self.backend.delete_placement_group(name)?;
                Ok(ApplyResult::Removed)
            }
        }
    }
}

/// Run one reconciliation against `backend`.
pub fn reconcile<B: Backend + ?Sized>(backend: &B, request: &Request) -> Result<Outcome> {
    Reconciler::new(backend).reconcile(request)
}

fn list_outcome(inventory: Vec<PlacementGroup>, strategy: Strategy) -> Outcome {
    let names = inventory.iter().map(|g| g.name.clone()).collect();
    Outcome {
        changed: ApplyResult::Listed.is_change(),
        msg: "List of all placement groups.".to_string(),
        name: GroupNames::Many(names),
        strategy,
        groups: inventory,
    }
}

fn outcome(
    result: ApplyResult,
    desired: DesiredState,
    name: &GroupName,
    strategy: Strategy,
) -> Outcome {
    let msg = match (result, desired) {
        (ApplyResult::Created, _) => format!("Placement group {name} created."),
        (ApplyResult::Removed, _) => format!("Placement group {name} removed."),
        (_, DesiredState::Absent) => {
            format!("Placement group with name {name} does not exist. Nothing to remove.")
        }
        _ => format!("Placement group already exists with name {name}."),
    };
    Outcome {
        changed: result.is_change(),
        msg,
        name: GroupNames::Single(name.to_string()),
        strategy,
        groups: Vec::new(),
    }
}
