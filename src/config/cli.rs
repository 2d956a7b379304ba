use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-mgmt")]
#[command(about = "Command line client for the catalog management API")]
pub struct CliConfig {
    /// TOML 設定檔；未指定時使用 CATALOG_MANAGEMENT_* 環境變數
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the service URL")]
    pub url: Option<String>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List private catalogs
    ListCatalogs,
    GetCatalog {
        catalog_id: String,
    },
    DeleteCatalog {
        catalog_id: String,
    },
    ListOfferings {
        catalog_id: String,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        digest: bool,
    },
    GetOffering {
        catalog_id: String,
        offering_id: String,
    },
    GetVersion {
        version_loc_id: String,
    },
    DeprecateVersion {
        version_loc_id: String,
        /// Undo a previous deprecation
        #[arg(long)]
        undo: bool,
        #[arg(long)]
        description: Option<String>,
    },
    ListPlans {
        catalog_id: String,
        offering_id: String,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
    },
    GetPlan {
        plan_loc_id: String,
    },
    ValidatePlan {
        plan_loc_id: String,
    },
    PublishPlan {
        plan_loc_id: String,
    },
    DeletePlan {
        plan_loc_id: String,
    },
}

impl CliConfig {
    /// 依優先順序組合設定：設定檔或環境變數，再套用 `--url`
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.to_client_config()?,
            None => ClientConfig::from_env()?,
        };
        if let Some(url) = &self.url {
            config.service_url = url.clone();
        }
        Ok(config)
    }
}
