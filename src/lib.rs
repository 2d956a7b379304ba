pub mod config;
pub mod core;
pub mod domain;
pub mod services;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{toml_config::TomlConfig, ClientConfig};
pub use crate::core::auth::{
    BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator, NoAuthAuthenticator,
};
pub use crate::core::service::DetailedResponse;
pub use crate::domain::model::{
    Catalog, Feature, JsonPatchOperation, Kind, Offering, PatchOp, Plan, SearchResult, State,
    Version,
};
pub use crate::domain::ports::Authenticator;
pub use crate::services::catalog_management::CatalogManagementV1;
pub use crate::utils::error::{CatalogError, Result};
