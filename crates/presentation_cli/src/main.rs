//! Play catalog CLI
//!
//! Command-line client for a running catalog service.

#![allow(clippy::print_stdout)]

use clap::Parser;
use domain::{Item, ItemDetails, ItemId, Price};
use infrastructure::{CatalogClient, CatalogClientError, LogFormat, init_logging};
use presentation_cli::{Cli, Commands};
use tracing::debug;

fn print_item(item: &Item) {
    println!(
        "{}  {:<24} {:>10}  {}",
        item.id(),
        item.name(),
        item.price(),
        item.created_date().format("%Y-%m-%d %H:%M")
    );
    if !item.description().is_empty() {
        println!("    {}", item.description());
    }
}

fn details(name: String, description: String, price: rust_decimal::Decimal) -> anyhow::Result<ItemDetails> {
    Ok(ItemDetails::new(name, description, Price::new(price)?)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_filter(), LogFormat::Text)?;

    let client = CatalogClient::new(cli.client_config())?;
    debug!(url = %client.base_url(), "Using catalog service");

    match cli.command {
        Commands::List { json, .. } => {
            let outcome = client
                .list_items_notify(|attempt, err, delay| {
                    println!("⏳ Attempt {attempt} failed ({err}); retrying in {delay:?}");
                })
                .await;

            match outcome.result {
                Ok(items) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    } else {
                        println!(
                            "📦 {} item(s) after {} attempt(s) in {:?}",
                            items.len(),
                            outcome.attempts,
                            outcome.elapsed
                        );
                        items.iter().for_each(print_item);
                    }
                },
                Err(e) => {
                    println!("❌ Listing failed after {} attempt(s): {e}", outcome.attempts);
                    std::process::exit(1);
                },
            }
        },

        Commands::Get { id, json } => match client.get_item(&ItemId::from_uuid(id)).await {
            Ok(item) if json => println!("{}", serde_json::to_string_pretty(&item)?),
            Ok(item) => print_item(&item),
            Err(CatalogClientError::NotFound) => {
                println!("❌ Item {id} not found");
                std::process::exit(1);
            },
            Err(e) => return Err(e.into()),
        },

        Commands::Create {
            name,
            description,
            price,
        } => {
            let item = client
                .create_item(&details(name, description, price)?)
                .await?;
            println!("✅ Created item {}", item.id());
            print_item(&item);
        },

        Commands::Update {
            id,
            name,
            description,
            price,
        } => {
            let details = details(name, description, price)?;
            match client.update_item(&ItemId::from_uuid(id), &details).await {
                Ok(()) => println!("✅ Updated item {id}"),
                Err(CatalogClientError::NotFound) => {
                    println!("❌ Item {id} not found");
                    std::process::exit(1);
                },
                Err(e) => return Err(e.into()),
            }
        },

        Commands::Delete { id } => match client.delete_item(&ItemId::from_uuid(id)).await {
            Ok(()) => println!("🗑️  Deleted item {id}"),
            Err(CatalogClientError::NotFound) => {
                println!("❌ Item {id} not found");
                std::process::exit(1);
            },
            Err(e) => return Err(e.into()),
        },

        Commands::Health => match client.health().await {
            Ok(health) => {
                println!("✅ {} (v{})", health.status, health.version);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },

        Commands::ChaosStats => match client.chaos_stats().await {
            Ok(stats) => {
                println!("🧪 Fault injection:");
                println!("{}", serde_json::to_string_pretty(&stats)?);
            },
            Err(CatalogClientError::NotFound) => {
                println!("ℹ️  Fault injection is disabled on this server");
            },
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
