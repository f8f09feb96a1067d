pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::AddonRsOptions;

pub mod addon;
pub use addon::AddonItem;
pub use addon::AddonVersion;

pub mod registry;
pub use registry::InstalledRegistry;

pub mod updates;
pub use updates::UpdateAvailability;

pub mod changeset;
pub use changeset::ChangeSet;

pub mod cart;
pub use cart::OperationCart;

pub mod catalog;

pub mod manager;
pub use manager::AddonManager;
