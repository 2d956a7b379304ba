pub mod catalog_management;

pub use catalog_management::CatalogManagementV1;
