use super::{impl_with_header, CatalogManagementV1};
use crate::core::request::CONTENT_TYPE_JSON_PATCH;
use crate::core::service::DetailedResponse;
use crate::domain::model::{JsonPatchOperation, Offering};
use crate::utils::error::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

/// 從壓縮檔或 Git 倉庫匯入新版本
#[derive(Debug, Clone, Default)]
pub struct ImportOfferingVersionOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub tags: Vec<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub install_kind: Option<String>,
    pub target_kinds: Vec<String>,
    pub format_kind: Option<String>,
    pub product_kind: Option<String>,
    pub sha: Option<String>,
    pub version: Option<String>,
    pub working_directory: Option<String>,
    pub zipurl: Option<String>,
    pub target_version: Option<String>,
    pub include_config: Option<bool>,
    pub is_vsi: Option<bool>,
    pub repotype: Option<String>,
    /// 私有倉庫的存取權杖，以 `X-Auth-Token` 標頭送出
    pub x_auth_token: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ImportOfferingVersionOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            ..Default::default()
        }
    }

    pub fn with_zipurl(mut self, zipurl: impl Into<String>) -> Self {
        self.zipurl = Some(zipurl.into());
        self
    }

    pub fn with_target_version(mut self, target_version: impl Into<String>) -> Self {
        self.target_version = Some(target_version.into());
        self
    }

    pub fn with_install_kind(mut self, install_kind: impl Into<String>) -> Self {
        self.install_kind = Some(install_kind.into());
        self
    }

    pub fn with_target_kinds(mut self, target_kinds: Vec<String>) -> Self {
        self.target_kinds = target_kinds;
        self
    }

    pub fn with_format_kind(mut self, format_kind: impl Into<String>) -> Self {
        self.format_kind = Some(format_kind.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_product_kind(mut self, product_kind: impl Into<String>) -> Self {
        self.product_kind = Some(product_kind.into());
        self
    }

    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_working_directory(mut self, working_directory: impl Into<String>) -> Self {
        self.working_directory = Some(working_directory.into());
        self
    }

    pub fn with_include_config(mut self, include_config: bool) -> Self {
        self.include_config = Some(include_config);
        self
    }

    pub fn with_is_vsi(mut self, is_vsi: bool) -> Self {
        self.is_vsi = Some(is_vsi);
        self
    }

    pub fn with_repotype(mut self, repotype: impl Into<String>) -> Self {
        self.repotype = Some(repotype.into());
        self
    }

    pub fn with_x_auth_token(mut self, token: impl Into<String>) -> Self {
        self.x_auth_token = Some(token.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct ImportOfferingVersionBody<'a> {
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    install_kind: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    target_kinds: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    format_kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    working_directory: Option<&'a str>,
}

impl<'a> From<&'a ImportOfferingVersionOptions> for ImportOfferingVersionBody<'a> {
    fn from(options: &'a ImportOfferingVersionOptions) -> Self {
        Self {
            tags: &options.tags,
            name: options.name.as_deref(),
            label: options.label.as_deref(),
            install_kind: options.install_kind.as_deref(),
            target_kinds: &options.target_kinds,
            format_kind: options.format_kind.as_deref(),
            product_kind: options.product_kind.as_deref(),
            sha: options.sha.as_deref(),
            version: options.version.as_deref(),
            working_directory: options.working_directory.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetVersionOptions {
    pub version_loc_id: String,
    pub headers: HashMap<String, String>,
}

impl GetVersionOptions {
    pub fn new(version_loc_id: impl Into<String>) -> Self {
        Self {
            version_loc_id: version_loc_id.into(),
            headers: HashMap::new(),
        }
    }
}

/// 以 JSON Patch 更新版本；`if_match` 帶入目前的 `_rev` 可避免覆蓋他人的修改
#[derive(Debug, Clone, Default)]
pub struct PatchUpdateVersionOptions {
    pub version_loc_id: String,
    pub if_match: Option<String>,
    pub updates: Vec<JsonPatchOperation>,
    pub headers: HashMap<String, String>,
}

impl PatchUpdateVersionOptions {
    pub fn new(version_loc_id: impl Into<String>, updates: Vec<JsonPatchOperation>) -> Self {
        Self {
            version_loc_id: version_loc_id.into(),
            updates,
            ..Default::default()
        }
    }

    pub fn with_if_match(mut self, rev: impl Into<String>) -> Self {
        self.if_match = Some(rev.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeprecateVersionOptions {
    pub version_loc_id: String,
    /// `true` 標記為棄用，`false` 取消棄用
    pub setting: bool,
    pub description: Option<String>,
    pub days_until_deprecate: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl DeprecateVersionOptions {
    pub fn new(version_loc_id: impl Into<String>, setting: bool) -> Self {
        Self {
            version_loc_id: version_loc_id.into(),
            setting,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_days_until_deprecate(mut self, days: i64) -> Self {
        self.days_until_deprecate = Some(days);
        self
    }
}

#[derive(Debug, Serialize)]
struct DeprecateVersionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_deprecate: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteVersionOptions {
    pub version_loc_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteVersionOptions {
    pub fn new(version_loc_id: impl Into<String>) -> Self {
        Self {
            version_loc_id: version_loc_id.into(),
            headers: HashMap::new(),
        }
    }
}

impl_with_header!(
    ImportOfferingVersionOptions,
    GetVersionOptions,
    PatchUpdateVersionOptions,
    DeprecateVersionOptions,
    DeleteVersionOptions,
);

impl CatalogManagementV1 {
    /// 匯入版本，回傳更新後的產品
    pub async fn import_offering_version(
        &self,
        options: &ImportOfferingVersionOptions,
    ) -> Result<DetailedResponse<Offering>> {
        let mut builder = self.prepare(
            Method::POST,
            "import_offering_version",
            "ImportOfferingVersion",
            "/catalogs/{catalog_identifier}/offerings/{offering_id}/version",
            &[
                ("catalog_identifier", options.catalog_identifier.as_str()),
                ("offering_id", options.offering_id.as_str()),
            ],
            &options.headers,
        )?;
        if let Some(token) = &options.x_auth_token {
            builder.add_header("X-Auth-Token", token.as_str());
        }
        builder
            .add_optional_query("zipurl", options.zipurl.as_ref())
            .add_optional_query("targetVersion", options.target_version.as_ref())
            .add_optional_query("includeConfig", options.include_config.as_ref())
            .add_optional_query("isVSI", options.is_vsi.as_ref())
            .add_optional_query("repotype", options.repotype.as_ref());
        builder.set_body_content_json(&ImportOfferingVersionBody::from(options))?;
        self.service.request(builder).await
    }

    /// 取得版本；服務回傳包含該版本的整個產品
    pub async fn get_version(&self, options: &GetVersionOptions) -> Result<DetailedResponse<Offering>> {
        let builder = self.prepare(
            Method::GET,
            "get_version",
            "GetVersion",
            "/versions/{version_loc_id}",
            &[("version_loc_id", options.version_loc_id.as_str())],
            &options.headers,
        )?;
        self.service.request(builder).await
    }

    pub async fn patch_update_version(
        &self,
        options: &PatchUpdateVersionOptions,
    ) -> Result<DetailedResponse<Offering>> {
        let mut builder = self.prepare(
            Method::PATCH,
            "patch_update_version",
            "PatchUpdateVersion",
            "/versions/{version_loc_id}",
            &[("version_loc_id", options.version_loc_id.as_str())],
            &options.headers,
        )?;
        if let Some(rev) = &options.if_match {
            builder.add_header("If-Match", rev.as_str());
        }
        builder.set_body_content(&options.updates, CONTENT_TYPE_JSON_PATCH)?;
        self.service.request(builder).await
    }

    pub async fn deprecate_version(
        &self,
        options: &DeprecateVersionOptions,
    ) -> Result<DetailedResponse<()>> {
        let setting = options.setting.to_string();
        let mut builder = self.prepare(
            Method::POST,
            "deprecate_version",
            "SetDeprecateVersion",
            "/versions/{version_loc_id}/deprecate/{setting}",
            &[
                ("version_loc_id", options.version_loc_id.as_str()),
                ("setting", setting.as_str()),
            ],
            &options.headers,
        )?;
        builder.set_body_content_json(&DeprecateVersionBody {
            description: options.description.as_deref(),
            days_until_deprecate: options.days_until_deprecate,
        })?;
        self.service.request_no_content(builder).await
    }

    pub async fn delete_version(&self, options: &DeleteVersionOptions) -> Result<DetailedResponse<()>> {
        let builder = self.prepare(
            Method::DELETE,
            "delete_version",
            "DeleteVersion",
            "/versions/{version_loc_id}",
            &[("version_loc_id", options.version_loc_id.as_str())],
            &options.headers,
        )?;
        self.service.request_no_content(builder).await
    }
}
