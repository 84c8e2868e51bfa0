//! EC2 placement group backend.
//!
//! Wraps the async AWS SDK client behind the blocking [`Backend`] trait.
//! Credentials come from the SDK's default provider chain.

use crate::backend::{Backend, ClientSettings};
use crate::error::{Error, Result};
use crate::types::{GroupName, PlacementGroup, Strategy};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, PlacementStrategy};
use std::future::Future;
use tokio::runtime::Runtime;

/// Server-side filter key for exact group names.
const GROUP_NAME_FILTER: &str = "group-name";

/// EC2 backend.
///
/// ```no_run
/// use placement::backend::ec2::Ec2Backend;
/// use placement::backend::{Backend, ClientSettings};
///
/// let backend = Ec2Backend::new(&ClientSettings {
///     region: Some("us-east-1".to_string()),
///     endpoint_url: None,
/// })
/// .unwrap();
/// let groups = backend.list_placement_groups(None).unwrap();
/// println!("{} placement groups", groups.len());
/// ```
pub struct Ec2Backend {
    runtime: Runtime,
    client: Client,
}

impl Ec2Backend {
    /// Resolve configuration and build the client.
    ///
    /// Loading configuration reads the environment and profile files only;
    /// the first request goes out on the first trait call.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| Error::Runtime { source })?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let config = runtime.block_on(loader.load());

        log::debug!(
            "EC2 client configured for region {}",
            config
                .region()
                .map_or("<sdk default>", |r| r.as_ref())
        );

        Ok(Self {
            runtime,
            client: Client::new(&config),
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

impl Backend for Ec2Backend {
    fn list_placement_groups(&self, filter: Option<&GroupName>) -> Result<Vec<PlacementGroup>> {
        let mut request = self.client.describe_placement_groups();
        if let Some(name) = filter {
            request = request.filters(
                Filter::builder()
                    .name(GROUP_NAME_FILTER)
                    .values(name.as_str())
                    .build(),
            );
        }

        let response = self.block_on(request.send()).map_err(|e| {
            Error::remote("DescribePlacementGroups", DisplayErrorContext(&e).to_string())
        })?;

        Ok(response
            .placement_groups()
            .iter()
            .filter_map(|g| {
                g.group_name().map(|name| PlacementGroup {
                    name: name.to_string(),
                    strategy: g.strategy().map(|s| s.as_str().to_string()),
                    state: g.state().map(|s| s.as_str().to_string()),
                })
            })
            .collect())
    }

    fn create_placement_group(&self, name: &GroupName, strategy: Strategy) -> Result<()> {
        let strategy = match strategy {
            Strategy::Cluster => PlacementStrategy::Cluster,
        };

        self.block_on(
            self.client
                .create_placement_group()
                .group_name(name.as_str())
                .strategy(strategy)
                .send(),
        )
        .map_err(|e| Error::remote("CreatePlacementGroup", DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    fn delete_placement_group(&self, name: &GroupName) -> Result<()> {
        self.block_on(
            self.client
                .delete_placement_group()
                .group_name(name.as_str())
                .send(),
        )
        .map_err(|e| Error::remote("DeletePlacementGroup", DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
