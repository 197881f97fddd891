//! Skubridge CLI - Migration and catalog maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Initial catalog migration for a store
//! skubridge migrate --store DIAMOND
//!
//! # Re-run relationship metafield wiring over the whole catalog
//! skubridge relationships --store DIAMOND
//!
//! # Catalog audits
//! skubridge check-missing --store DIAMOND
//! skubridge find-duplicates --store DIAMOND
//! skubridge delete-duplicates --store DIAMOND
//!
//! # Bulk rewrites
//! skubridge update-prices --store DIAMOND
//! skubridge update-file-metafields --store DIAMOND
//!
//! # Storefront taxonomy
//! skubridge collections create --store DIAMOND
//! skubridge collections menu --store DIAMOND
//!
//! # File library hygiene
//! skubridge cleanup-images --store DIAMOND
//! ```
//!
//! Every command reads the same environment as the server binary; see
//! the sync crate's config module for the variable list.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "skubridge")]
#[command(version, about = "Supplier catalog migration and maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create every current supplier product on the platform
    Migrate {
        /// Store name as listed in the STORES environment variable
        #[arg(short, long)]
        store: String,
    },
    /// Rewrite relationship metafields across the whole catalog
    Relationships {
        #[arg(short, long)]
        store: String,
    },
    /// Report supplier SKUs with no platform product
    CheckMissing {
        #[arg(short, long)]
        store: String,
    },
    /// Report SKUs that occur on more than one platform product
    FindDuplicates {
        #[arg(short, long)]
        store: String,
    },
    /// Delete liquidation-suffixed duplicate products
    DeleteDuplicates {
        #[arg(short, long)]
        store: String,
    },
    /// Rewrite every product's prices from the current feed
    UpdatePrices {
        #[arg(short, long)]
        store: String,
    },
    /// Rewrite document metafields from the current feed
    UpdateFileMetafields {
        #[arg(short, long)]
        store: String,
    },
    /// Storefront collection and menu management
    Collections {
        #[command(subcommand)]
        action: CollectionsAction,
    },
    /// Delete thumbnail-decorated images from the file library
    CleanupImages {
        #[arg(short, long)]
        store: String,
    },
}

#[derive(Subcommand)]
enum CollectionsAction {
    /// Create one smart collection per range/subrange pair
    Create {
        #[arg(short, long)]
        store: String,
    },
    /// Create the storefront navigation menu from existing collections
    Menu {
        #[arg(short, long)]
        store: String,
    },
    /// Rewrite collection titles to their customer-facing display names
    Rename {
        #[arg(short, long)]
        store: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate { store } => commands::migrate::run(&store).await,
        Commands::Relationships { store } => commands::migrate::relationships(&store).await,
        Commands::CheckMissing { store } => commands::maintenance::check_missing(&store).await,
        Commands::FindDuplicates { store } => commands::maintenance::find_duplicates(&store).await,
        Commands::DeleteDuplicates { store } => {
            commands::maintenance::delete_duplicates(&store).await
        }
        Commands::UpdatePrices { store } => commands::maintenance::update_prices(&store).await,
        Commands::UpdateFileMetafields { store } => {
            commands::maintenance::update_file_metafields(&store).await
        }
        Commands::Collections { action } => match action {
            CollectionsAction::Create { store } => {
                commands::maintenance::create_collections(&store).await
            }
            CollectionsAction::Menu { store } => commands::maintenance::create_menu(&store).await,
            CollectionsAction::Rename { store } => {
                commands::maintenance::rename_collections(&store).await
            }
        },
        Commands::CleanupImages { store } => commands::maintenance::cleanup_images(&store).await,
    }
}
