//! Command-line parsing for the `wishlist` binary.

use clap::{Args, Parser, Subcommand};
use storefront::shared::ProductSnapshot;
use storefront::wishlist::{SortBy, SortOrder};

#[derive(Parser, Debug)]
#[command(
    name = "wishlist",
    version,
    about = "Per-user wishlist backed by local storage",
    long_about = None,
    after_help = "ENVIRONMENT:\n    WISHLIST_CONFIG       TOML config file\n    WISHLIST_DATA_DIR     Storage directory\n    WISHLIST_STORAGE_KEY, WISHLIST_USER_KEY, WISHLIST_TOKEN_KEY, WISHLIST_QUOTA_BYTES\n    RUST_LOG              Log filter (default: warn)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sign in as a user
    Login {
        /// User id
        user: String,
    },

    /// Sign out
    Logout {
        /// Also delete the signed-in user's wishlist
        #[arg(long)]
        forget: bool,
    },

    /// Add a product
    Add(ItemArgs),

    /// Remove a product
    Remove {
        /// Product id
        product: String,

        #[arg(long)]
        size: Option<String>,
    },

    /// Add if absent, remove if present
    Toggle(ItemArgs),

    /// List items
    #[command(
        after_help = "EXAMPLES:\n    # Cheapest first\n    wishlist list --sort price --order asc\n\n    # Search by name or product id\n    wishlist list --search tee"
    )]
    List {
        /// Case-insensitive match on name or product id
        #[arg(long, default_value = "")]
        search: String,

        /// addedAt, name or price
        #[arg(long)]
        sort: Option<SortBy>,

        /// asc or desc
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// Totals for the current wishlist
    Summary,

    /// Remove items by id
    RemoveMany {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Remove everything
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Product and the optional snapshot fields shared by `add` and `toggle`
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ItemArgs {
    /// Product id
    pub product: String,

    #[arg(long)]
    pub size: Option<String>,

    /// Display name (defaults to the product id)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    /// Discount percentage
    #[arg(long)]
    pub discount: Option<f64>,

    /// Units in stock
    #[arg(long)]
    pub stock: Option<i64>,
}

impl ItemArgs {
    /// Snapshot from the item options, if any were given
    pub fn snapshot(&self) -> Option<ProductSnapshot> {
        if self.name.is_none() && self.price.is_none() && self.discount.is_none() && self.stock.is_none() {
            return None;
        }

        let name = self.name.clone().unwrap_or_else(|| self.product.clone());
        let mut snapshot = ProductSnapshot::new(name, self.price.unwrap_or(0.0));
        if let Some(discount) = self.discount {
            snapshot = snapshot.with_discount(discount);
        }
        if let Some(stock) = self.stock {
            snapshot = snapshot.with_inventory(stock);
        }
        Some(snapshot)
    }
}
