mod api;
mod classify;
mod config;
mod core;
mod db;
mod heuristics;
mod notifications;
mod report;
mod scamlist;

use std::path::Path;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use crate::api::ExplorerClient;
use crate::config::Config;
use crate::core::{Chain, ScanOutcome, pipeline};
use crate::db::SharedDatabase;
use crate::heuristics::HeuristicEngine;
use crate::notifications::Notifier;
use crate::scamlist::ScamList;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("chainwatch=info".parse().unwrap()),
        )
        .init();

    let matches = Command::new("chainwatch")
        .about("Heuristic scam-activity scanner for Bitcoin and Ethereum addresses")
        .arg(
            Arg::new("addresses")
                .value_name("ADDRESS")
                .num_args(1..)
                .required(true)
                .help("Bitcoin or Ethereum addresses to scan"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .default_value("config.toml")
                .help("Path to the TOML config file"),
        )
        .arg(
            Arg::new("transfers")
                .long("transfers")
                .action(ArgAction::SetTrue)
                .help("List wallet-level large transfers instead of the activity summary"),
        )
        .arg(
            Arg::new("no-notify")
                .long("no-notify")
                .action(ArgAction::SetTrue)
                .help("Disable desktop notifications for this run"),
        )
        .get_matches();

    // Load configuration
    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.toml");
    let config = Config::load(config_path);

    let addresses: Vec<String> = matches
        .get_many::<String>("addresses")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    tracing::info!("🕵️ ChainWatch scanning {} address(es)", addresses.len());

    // Open scam list cache database
    let db_path = Path::new(&config.database.path);
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!("Failed to create database directory: {e}");
        }
    }
    let db = SharedDatabase::open(db_path).expect("Failed to open scam list cache database");
    tracing::info!("Scam list cache opened at {}", config.database.path);

    let client = ExplorerClient::new(&config.api);
    let engine = HeuristicEngine::new(config.heuristics.clone());
    let notifier = Notifier::new(&config.notifications);
    let notify_enabled = !matches.get_flag("no-notify");
    let transfers_mode = matches.get_flag("transfers");

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(async {
        // Load scam lists only for the chains present in this batch
        let needs_btc = addresses
            .iter()
            .any(|a| classify::classify(a) == Some(Chain::Bitcoin));
        let needs_eth = addresses
            .iter()
            .any(|a| classify::classify(a) == Some(Chain::Ethereum));
        let btc_scam_list = if needs_btc {
            scamlist::load(Chain::Bitcoin, &db, &client, &config.scam_list).await
        } else {
            ScamList::empty()
        };
        let eth_scam_list = if needs_eth {
            scamlist::load(Chain::Ethereum, &db, &client, &config.scam_list).await
        } else {
            ScamList::empty()
        };

        for address in &addresses {
            println!("{}", "─".repeat(60));
            if transfers_mode {
                let scan =
                    pipeline::scan_large_transfers(address, &client, &config.heuristics).await;
                print!("{}", report::render_large_transfers(address, &scan));
            } else {
                let outcome = pipeline::scan_address(
                    address,
                    &client,
                    &engine,
                    &btc_scam_list,
                    &eth_scam_list,
                )
                .await;
                print!("{}", report::render(address, &outcome));
                if notify_enabled {
                    if let ScanOutcome::Report(summary) = &outcome {
                        notifier.notify(summary);
                    }
                }
            }
        }
    });
}
