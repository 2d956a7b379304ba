use super::{impl_with_header, CatalogManagementV1};
use crate::core::service::DetailedResponse;
use crate::domain::model::{Catalog, SearchResult};
use crate::utils::error::Result;
use reqwest::Method;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ListCatalogsOptions {
    pub headers: HashMap<String, String>,
}

impl ListCatalogsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateCatalogOptions {
    pub catalog: Catalog,
    pub headers: HashMap<String, String>,
}

impl CreateCatalogOptions {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetCatalogOptions {
    pub catalog_identifier: String,
    pub headers: HashMap<String, String>,
}

impl GetCatalogOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            headers: HashMap::new(),
        }
    }
}

/// 整筆取代目錄；`catalog` 需帶目前的 `id` 與 `_rev`
#[derive(Debug, Clone, Default)]
pub struct ReplaceCatalogOptions {
    pub catalog_identifier: String,
    pub catalog: Catalog,
    pub headers: HashMap<String, String>,
}

impl ReplaceCatalogOptions {
    pub fn new(catalog_identifier: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            catalog,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteCatalogOptions {
    pub catalog_identifier: String,
    pub headers: HashMap<String, String>,
}

impl DeleteCatalogOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            headers: HashMap::new(),
        }
    }
}

impl_with_header!(
    ListCatalogsOptions,
    CreateCatalogOptions,
    GetCatalogOptions,
    ReplaceCatalogOptions,
    DeleteCatalogOptions,
);

impl CatalogManagementV1 {
    /// 列出帳號下的私有目錄
    pub async fn list_catalogs(
        &self,
        options: &ListCatalogsOptions,
    ) -> Result<DetailedResponse<SearchResult<Catalog>>> {
        let builder = self.prepare(
            Method::GET,
            "list_catalogs",
            "ListCatalogs",
            "/catalogs",
            &[],
            &options.headers,
        )?;
        self.service.request(builder).await
    }

    pub async fn create_catalog(
        &self,
        options: &CreateCatalogOptions,
    ) -> Result<DetailedResponse<Catalog>> {
        let mut builder = self.prepare(
            Method::POST,
            "create_catalog",
            "CreateCatalog",
            "/catalogs",
            &[],
            &options.headers,
        )?;
        builder.set_body_content_json(&options.catalog)?;
        self.service.request(builder).await
    }

    pub async fn get_catalog(&self, options: &GetCatalogOptions) -> Result<DetailedResponse<Catalog>> {
        let builder = self.prepare(
            Method::GET,
            "get_catalog",
            "GetCatalog",
            "/catalogs/{catalog_identifier}",
            &[("catalog_identifier", options.catalog_identifier.as_str())],
            &options.headers,
        )?;
        self.service.request(builder).await
    }

    pub async fn replace_catalog(
        &self,
        options: &ReplaceCatalogOptions,
    ) -> Result<DetailedResponse<Catalog>> {
        let mut builder = self.prepare(
            Method::PUT,
            "replace_catalog",
            "ReplaceCatalog",
            "/catalogs/{catalog_identifier}",
            &[("catalog_identifier", options.catalog_identifier.as_str())],
            &options.headers,
        )?;
        builder.set_body_content_json(&options.catalog)?;
        self.service.request(builder).await
    }

    pub async fn delete_catalog(&self, options: &DeleteCatalogOptions) -> Result<DetailedResponse<()>> {
        let builder = self.prepare(
            Method::DELETE,
            "delete_catalog",
            "DeleteCatalog",
            "/catalogs/{catalog_identifier}",
            &[("catalog_identifier", options.catalog_identifier.as_str())],
            &options.headers,
        )?;
        self.service.request_no_content(builder).await
    }
}
