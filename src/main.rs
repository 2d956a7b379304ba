use catalog_mgmt::config::cli::Command;
use catalog_mgmt::services::catalog_management::*;
use catalog_mgmt::utils::logger;
use catalog_mgmt::{CatalogError, CliConfig};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let client = match cli.client_config().and_then(CatalogManagementV1::new) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&client, cli.command).await {
        tracing::error!("❌ {} failed at stage {}: {}", e.operation().unwrap_or("request"), e.stage(), e);
        eprintln!("❌ {}", e);
        if let CatalogError::HttpStatus { body: Some(body), .. } = &e {
            eprintln!("{}", serde_json::to_string_pretty(body)?);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(client: &CatalogManagementV1, command: Command) -> catalog_mgmt::Result<()> {
    match command {
        Command::ListCatalogs => print(client.list_catalogs(&ListCatalogsOptions::new()).await?.result),
        Command::GetCatalog { catalog_id } => {
            print(client.get_catalog(&GetCatalogOptions::new(catalog_id)).await?.result)
        }
        Command::DeleteCatalog { catalog_id } => {
            client
                .delete_catalog(&DeleteCatalogOptions::new(&catalog_id))
                .await?;
            println!("✅ Deleted catalog {}", catalog_id);
        }
        Command::ListOfferings {
            catalog_id,
            limit,
            offset,
            name,
            digest,
        } => {
            let mut options = ListOfferingsOptions::new(catalog_id);
            options.limit = limit;
            options.offset = offset;
            options.name = name;
            if digest {
                options.digest = Some(true);
            }
            print(client.list_offerings(&options).await?.result)
        }
        Command::GetOffering {
            catalog_id,
            offering_id,
        } => print(
            client
                .get_offering(&GetOfferingOptions::new(catalog_id, offering_id))
                .await?
                .result,
        ),
        Command::GetVersion { version_loc_id } => {
            print(client.get_version(&GetVersionOptions::new(version_loc_id)).await?.result)
        }
        Command::DeprecateVersion {
            version_loc_id,
            undo,
            description,
        } => {
            let mut options = DeprecateVersionOptions::new(&version_loc_id, !undo);
            options.description = description;
            client.deprecate_version(&options).await?;
            println!(
                "✅ Version {} {}",
                version_loc_id,
                if undo { "restored" } else { "deprecated" }
            );
        }
        Command::ListPlans {
            catalog_id,
            offering_id,
            limit,
            offset,
        } => {
            let mut options = ListPlansOptions::new(catalog_id, offering_id);
            options.limit = limit;
            options.offset = offset;
            print(client.list_plans(&options).await?.result)
        }
        Command::GetPlan { plan_loc_id } => {
            print(client.get_plan(&GetPlanOptions::new(plan_loc_id)).await?.result)
        }
        Command::ValidatePlan { plan_loc_id } => {
            let response = client
                .validate_plan(&ValidatePlanOptions::new(&plan_loc_id))
                .await?;
            println!("✅ Plan {} validated", plan_loc_id);
            print(response.result)
        }
        Command::PublishPlan { plan_loc_id } => {
            let response = client
                .publish_plan(&PublishPlanOptions::new(&plan_loc_id))
                .await?;
            println!("✅ Plan {} published", plan_loc_id);
            print(response.result)
        }
        Command::DeletePlan { plan_loc_id } => {
            client.delete_plan(&DeletePlanOptions::new(&plan_loc_id)).await?;
            println!("✅ Deleted plan {}", plan_loc_id);
        }
    }

    Ok(())
}

fn print<T: Serialize>(result: Option<T>) {
    let Some(value) = result else {
        return;
    };
    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to render response: {}", e),
    }
}
