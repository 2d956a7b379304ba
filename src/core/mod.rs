pub mod auth;
pub mod request;
pub mod service;

pub use crate::domain::model::{Catalog, Offering, Plan, SearchResult, Version};
pub use crate::domain::ports::Authenticator;
pub use crate::utils::error::Result;
pub use service::{BaseService, DetailedResponse, ServiceOptions};
