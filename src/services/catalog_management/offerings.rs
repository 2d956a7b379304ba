use super::{impl_with_header, CatalogManagementV1};
use crate::core::service::DetailedResponse;
use crate::domain::model::{Offering, SearchResult};
use crate::utils::error::Result;
use reqwest::Method;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ListOfferingsOptions {
    pub catalog_identifier: String,
    /// 只回傳摘要（不含 kinds 與 versions）
    pub digest: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub name: Option<String>,
    pub sort: Option<String>,
    pub include_hidden: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl ListOfferingsOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            ..Default::default()
        }
    }

    pub fn with_digest(mut self, digest: bool) -> Self {
        self.digest = Some(digest);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = Some(include_hidden);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateOfferingOptions {
    pub catalog_identifier: String,
    pub offering: Offering,
    pub headers: HashMap<String, String>,
}

impl CreateOfferingOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering: Offering) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetOfferingOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    /// 以 `type` 查詢參數送出，例如 `offering` 或 `product`
    pub offering_type: Option<String>,
    pub digest: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl GetOfferingOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, offering_type: impl Into<String>) -> Self {
        self.offering_type = Some(offering_type.into());
        self
    }

    pub fn with_digest(mut self, digest: bool) -> Self {
        self.digest = Some(digest);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplaceOfferingOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub offering: Offering,
    pub headers: HashMap<String, String>,
}

impl ReplaceOfferingOptions {
    pub fn new(
        catalog_identifier: impl Into<String>,
        offering_id: impl Into<String>,
        offering: Offering,
    ) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            offering,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteOfferingOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteOfferingOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            headers: HashMap::new(),
        }
    }
}

impl_with_header!(
    ListOfferingsOptions,
    CreateOfferingOptions,
    GetOfferingOptions,
    ReplaceOfferingOptions,
    DeleteOfferingOptions,
);

impl CatalogManagementV1 {
    pub async fn list_offerings(
        &self,
        options: &ListOfferingsOptions,
    ) -> Result<DetailedResponse<SearchResult<Offering>>> {
        let mut builder = self.prepare(
            Method::GET,
            "list_offerings",
            "ListOfferings",
            "/catalogs/{catalog_identifier}/offerings",
            &[("catalog_identifier", options.catalog_identifier.as_str())],
            &options.headers,
        )?;
        builder
            .add_optional_query("digest", options.digest.as_ref())
            .add_optional_query("limit", options.limit.as_ref())
            .add_optional_query("offset", options.offset.as_ref())
            .add_optional_query("name", options.name.as_ref())
            .add_optional_query("sort", options.sort.as_ref())
            .add_optional_query("includeHidden", options.include_hidden.as_ref());
        self.service.request(builder).await
    }

    pub async fn create_offering(
        &self,
        options: &CreateOfferingOptions,
    ) -> Result<DetailedResponse<Offering>> {
        let mut builder = self.prepare(
            Method::POST,
            "create_offering",
            "CreateOffering",
            "/catalogs/{catalog_identifier}/offerings",
            &[("catalog_identifier", options.catalog_identifier.as_str())],
            &options.headers,
        )?;
        builder.set_body_content_json(&options.offering)?;
        self.service.request(builder).await
    }

    pub async fn get_offering(
        &self,
        options: &GetOfferingOptions,
    ) -> Result<DetailedResponse<Offering>> {
        let mut builder = self.prepare(
            Method::GET,
            "get_offering",
            "GetOffering",
            "/catalogs/{catalog_identifier}/offerings/{offering_id}",
            &[
                ("catalog_identifier", options.catalog_identifier.as_str()),
                ("offering_id", options.offering_id.as_str()),
            ],
            &options.headers,
        )?;
        builder
            .add_optional_query("type", options.offering_type.as_ref())
            .add_optional_query("digest", options.digest.as_ref());
        self.service.request(builder).await
    }

    pub async fn replace_offering(
        &self,
        options: &ReplaceOfferingOptions,
    ) -> Result<DetailedResponse<Offering>> {
        let mut builder = self.prepare(
            Method::PUT,
            "replace_offering",
            "ReplaceOffering",
            "/catalogs/{catalog_identifier}/offerings/{offering_id}",
            &[
                ("catalog_identifier", options.catalog_identifier.as_str()),
                ("offering_id", options.offering_id.as_str()),
            ],
            &options.headers,
        )?;
        builder.set_body_content_json(&options.offering)?;
        self.service.request(builder).await
    }

    pub async fn delete_offering(
        &self,
        options: &DeleteOfferingOptions,
    ) -> Result<DetailedResponse<()>> {
        let builder = self.prepare(
            Method::DELETE,
            "delete_offering",
            "DeleteOffering",
            "/catalogs/{catalog_identifier}/offerings/{offering_id}",
            &[
                ("catalog_identifier", options.catalog_identifier.as_str()),
                ("offering_id", options.offering_id.as_str()),
            ],
            &options.headers,
        )?;
        self.service.request_no_content(builder).await
    }
}
