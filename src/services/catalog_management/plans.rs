use super::{impl_with_header, CatalogManagementV1};
use crate::core::service::DetailedResponse;
use crate::domain::model::{Plan, SearchResult};
use crate::utils::error::Result;
use reqwest::Method;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ListPlansOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl ListPlansOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreatePlanOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub plan: Plan,
    pub headers: HashMap<String, String>,
}

impl CreatePlanOptions {
    pub fn new(
        catalog_identifier: impl Into<String>,
        offering_id: impl Into<String>,
        plan: Plan,
    ) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            plan,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetPlanOptions {
    pub plan_loc_id: String,
    pub headers: HashMap<String, String>,
}

impl GetPlanOptions {
    pub fn new(plan_loc_id: impl Into<String>) -> Self {
        Self {
            plan_loc_id: plan_loc_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePlanOptions {
    pub plan_loc_id: String,
    pub plan: Plan,
    pub headers: HashMap<String, String>,
}

impl UpdatePlanOptions {
    pub fn new(plan_loc_id: impl Into<String>, plan: Plan) -> Self {
        Self {
            plan_loc_id: plan_loc_id.into(),
            plan,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeletePlanOptions {
    pub plan_loc_id: String,
    pub headers: HashMap<String, String>,
}

impl DeletePlanOptions {
    pub fn new(plan_loc_id: impl Into<String>) -> Self {
        Self {
            plan_loc_id: plan_loc_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidatePlanOptions {
    pub plan_loc_id: String,
    pub headers: HashMap<String, String>,
}

impl ValidatePlanOptions {
    pub fn new(plan_loc_id: impl Into<String>) -> Self {
        Self {
            plan_loc_id: plan_loc_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublishPlanOptions {
    pub plan_loc_id: String,
    pub headers: HashMap<String, String>,
}

impl PublishPlanOptions {
    pub fn new(plan_loc_id: impl Into<String>) -> Self {
        Self {
            plan_loc_id: plan_loc_id.into(),
            headers: HashMap::new(),
        }
    }
}

impl_with_header!(
    ListPlansOptions,
    CreatePlanOptions,
    GetPlanOptions,
    UpdatePlanOptions,
    DeletePlanOptions,
    ValidatePlanOptions,
    PublishPlanOptions,
);

impl CatalogManagementV1 {
    pub async fn list_plans(
        &self,
        options: &ListPlansOptions,
    ) -> Result<DetailedResponse<SearchResult<Plan>>> {
        let mut builder = self.prepare(
            Method::GET,
            "list_plans",
            "ListPlans",
            "/catalogs/{catalog_identifier}/offerings/{offering_id}/plans",
            &[
                ("catalog_identifier", options.catalog_identifier.as_str()),
                ("offering_id", options.offering_id.as_str()),
            ],
            &options.headers,
        )?;
        builder
            .add_optional_query("limit", options.limit.as_ref())
            .add_optional_query("offset", options.offset.as_ref());
        self.service.request(builder).await
    }

    pub async fn create_plan(&self, options: &CreatePlanOptions) -> Result<DetailedResponse<Plan>> {
        let mut builder = self.prepare(
            Method::POST,
            "create_plan",
            "CreatePlan",
            "/catalogs/{catalog_identifier}/offerings/{offering_id}/plans",
            &[
                ("catalog_identifier", options.catalog_identifier.as_str()),
                ("offering_id", options.offering_id.as_str()),
            ],
            &options.headers,
        )?;
        builder.set_body_content_json(&options.plan)?;
        self.service.request(builder).await
    }

    pub async fn get_plan(&self, options: &GetPlanOptions) -> Result<DetailedResponse<Plan>> {
        let builder = self.prepare(
            Method::GET,
            "get_plan",
            "GetPlan",
            "/plans/{plan_loc_id}",
            &[("plan_loc_id", options.plan_loc_id.as_str())],
            &options.headers,
        )?;
        self.service.request(builder).await
    }

    pub async fn update_plan(&self, options: &UpdatePlanOptions) -> Result<DetailedResponse<Plan>> {
        let mut builder = self.prepare(
            Method::PUT,
            "update_plan",
            "UpdatePlan",
            "/plans/{plan_loc_id}",
            &[("plan_loc_id", options.plan_loc_id.as_str())],
            &options.headers,
        )?;
        builder.set_body_content_json(&options.plan)?;
        self.service.request(builder).await
    }

    pub async fn delete_plan(&self, options: &DeletePlanOptions) -> Result<DetailedResponse<()>> {
        let builder = self.prepare(
            Method::DELETE,
            "delete_plan",
            "DeletePlan",
            "/plans/{plan_loc_id}",
            &[("plan_loc_id", options.plan_loc_id.as_str())],
            &options.headers,
        )?;
        self.service.request_no_content(builder).await
    }

    /// 驗證方案；服務可能回傳更新後的方案，也可能沒有內容
    pub async fn validate_plan(&self, options: &ValidatePlanOptions) -> Result<DetailedResponse<Plan>> {
        let mut builder = self.prepare(
            Method::POST,
            "validate_plan",
            "ValidatePlan",
            "/plans/{plan_loc_id}/validate/true",
            &[("plan_loc_id", options.plan_loc_id.as_str())],
            &options.headers,
        )?;
        builder.set_body_content_json(&serde_json::Map::new())?;
        self.service.request(builder).await
    }

    /// 發佈已核准的方案
    pub async fn publish_plan(&self, options: &PublishPlanOptions) -> Result<DetailedResponse<Plan>> {
        let mut builder = self.prepare(
            Method::POST,
            "publish_plan",
            "PublishPlan",
            "/plans/{plan_loc_id}/publish/publish_approved/true",
            &[("plan_loc_id", options.plan_loc_id.as_str())],
            &options.headers,
        )?;
        builder.set_body_content_json(&serde_json::Map::new())?;
        self.service.request(builder).await
    }
}
