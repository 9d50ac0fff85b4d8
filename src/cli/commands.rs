//! Command execution against a file-backed wishlist.

use crate::args::Command;
use chrono::Utc;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use storefront::shared::{FeedbackError, UserInfo, WishlistConfig, WishlistItem};
use storefront::wishlist::{
    AlwaysConfirm, Confirm, Feedback, FeedbackSink, FeedbackVariant, FileStorage,
    HydrationGuard, PartitionStore, SessionReader, StorageSession, WishlistDeps,
    WishlistFacade, WishlistProvider, WishlistSummary,
};

/// Prints feedback to the terminal; destructive messages go to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn show(&self, feedback: &Feedback) -> Result<(), FeedbackError> {
        let line = format!("{}: {}", feedback.title, feedback.description);
        let written = match feedback.variant {
            FeedbackVariant::Destructive => writeln!(io::stderr().lock(), "{}", line),
            _ => writeln!(io::stdout().lock(), "{}", line),
        };
        written.map_err(|e| FeedbackError::new(e.to_string()))
    }
}

/// Ask on stdin; anything but y/yes declines
fn prompt_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!("[CLI] Could not read confirmation: {}", e);
            false
        }
    }
}

/// Run one command. `Ok(false)` means the wishlist refused the operation.
pub fn run(command: Command, config: WishlistConfig) -> Result<bool, Box<dyn Error>> {
    let storage = Arc::new(FileStorage::from_config(&config)?);
    let session = Arc::new(StorageSession::new(storage.clone(), &config));
    tracing::debug!(dir = %storage.dir().display(), "[CLI] Using storage directory");

    match command {
        Command::Login { user } => {
            let info = UserInfo {
                id: user.clone(),
                username: user.clone(),
                email: String::new(),
            };
            session.sign_in(&info, &format!("cli-{}", Utc::now().timestamp_millis()))?;
            println!("Signed in as {}", user);
            return Ok(true);
        }
        Command::Logout { forget } => {
            let current = session.session();
            if forget {
                if let Some(user_id) = current.user_id.as_deref() {
                    // Direct partition access outside any store; open a guard for it
                    let guard = HydrationGuard::new();
                    guard.open();
                    PartitionStore::new(storage.clone(), config.storage_key.clone(), guard)
                        .clear(user_id)?;
                    println!("Deleted wishlist for {}", user_id);
                }
            }
            session.sign_out()?;
            println!("Signed out");
            return Ok(true);
        }
        _ => {}
    }

    let confirm: Arc<dyn Confirm> = match command {
        Command::Clear { yes: true } => Arc::new(AlwaysConfirm),
        _ => Arc::new(prompt_stdin),
    };
    let mut provider = WishlistProvider::new(WishlistDeps::new(
        storage,
        session,
        Arc::new(ConsoleFeedback),
        confirm,
        config,
    ));
    provider.mount();
    let wishlist = provider.wishlist_mut();
    if let Some(error) = wishlist.error() {
        eprintln!("warning: {}", error);
    }

    let ok = match command {
        Command::Add(item) => {
            wishlist.add_to_wishlist(&item.product, item.size.as_deref(), item.snapshot())
        }
        Command::Remove { product, size } => wishlist.remove_from_wishlist(&product, size.as_deref()),
        Command::Toggle(item) => {
            wishlist
                .toggle_wishlist(&item.product, item.size.as_deref(), item.snapshot())
                .success
        }
        Command::List { search, sort, order } => {
            let items = wishlist.get_filtered_items(&search, sort.unwrap_or_default(), order.unwrap_or_default());
            print_items(&items);
            true
        }
        Command::Summary => {
            print_summary(&wishlist.summary());
            true
        }
        Command::RemoveMany { ids } => wishlist.remove_multiple_items(&ids),
        Command::Clear { .. } => wishlist.clear_wishlist(),
        Command::Login { .. } | Command::Logout { .. } => true,
    };
    Ok(ok)
}

fn print_items(items: &[WishlistItem]) {
    if items.is_empty() {
        println!("(no items)");
        return;
    }
    for item in items {
        let size = item.size_id.as_deref().unwrap_or("-");
        let (name, price) = item
            .product_data
            .as_ref()
            .map(|p| (p.name.as_str(), p.effective_price()))
            .unwrap_or(("", 0.0));
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{}",
            item.id,
            item.product_id,
            size,
            name,
            price,
            item.added_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_summary(summary: &WishlistSummary) {
    println!("Items:        {}", summary.active_items_count);
    println!("Total value:  {:.2}", summary.total_value);
    println!("Savings:      {:.2}", summary.total_savings);
    println!("Available:    {}", summary.available_items_count);
    println!("Unavailable:  {}", summary.unavailable_items_count);
}
