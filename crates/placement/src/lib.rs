//! # placement
//!
//! Declarative management of EC2 placement groups.
//!
//! Given a desired state (`present`, `absent` or `list`) and a group name,
//! the reconciler lists the current inventory, compares, and issues at most
//! one create or delete call to converge.
//!
//! ## Example
//!
//! ```
//! use placement::backend::MockBackend;
//! use placement::{DesiredState, GroupName, Request, Strategy, reconcile};
//!
//! let backend = MockBackend::new();
//! let request = Request::new(
//!     Some(GroupName::new("example_group").unwrap()),
//!     Strategy::Cluster,
//!     DesiredState::Present,
//! );
//!
//! let outcome = reconcile(&backend, &request).unwrap();
//! assert!(outcome.changed);
//!
//! // Converged: a second run changes nothing.
//! let outcome = reconcile(&backend, &request).unwrap();
//! assert!(!outcome.changed);
//! ```
//!
//! ## Backends
//!
//! - [`backend::ec2::Ec2Backend`]: the AWS SDK, behind the default `ec2` feature
//! - [`backend::MockBackend`]: in-memory, records calls

pub mod backend;
pub mod error;
pub mod params;
pub mod reconcile;
pub mod types;

pub use backend::{Backend, ClientSettings, MockBackend, connect};
pub use error::{Error, ErrorCategory, Result};
pub use params::ModuleArgs;
pub use reconcile::{Reconciler, reconcile};
pub use types::{
    ApplyResult, DesiredState, GroupName, GroupNames, Outcome, PlacementGroup, Request,
    ResourceState, Strategy,
};
