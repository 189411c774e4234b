//! Interactive console front end for the Shelfmark catalog.
//!
//! # Responsibility
//! - Parse launch options into a `CatalogConfig`.
//! - Seed sample items and run the numbered menu loop.
//! - Render core results; the core never prints.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use shelfmark_core::{
    default_log_level, init_logging, CatalogConfig, CatalogSession, ListingExt, NewItem,
    ResetPolicy,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "shelfmark", version, about = "Personal library catalog and lending tracker")]
struct Cli {
    /// Catalog database file.
    #[arg(long, default_value = shelfmark_core::config::DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Keep everything in memory instead of a file.
    #[arg(long, conflicts_with = "db")]
    memory: bool,

    /// Keep loan history when the session resets.
    #[arg(long)]
    keep_loans: bool,

    /// Skip inserting the sample items.
    #[arg(long)]
    no_seed: bool,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error; only meaningful together with `--log-dir`.
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,
}

impl Cli {
    fn catalog_config(&self) -> CatalogConfig {
        let config = if self.memory {
            CatalogConfig::in_memory()
        } else {
            CatalogConfig::file(self.db.clone())
        };
        let policy = if self.keep_loans {
            ResetPolicy::KeepLoans
        } else {
            ResetPolicy::ClearAll
        };
        config.with_reset_policy(policy)
    }

    /// Directory and level for file logging, when `--log-dir` was given.
    fn log_settings(&self) -> Option<(&Path, &str)> {
        let log_dir = self.log_dir.as_deref()?;
        let level = self.log_level.as_deref().unwrap_or(default_log_level());
        Some((log_dir, level))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some((log_dir, level)) = cli.log_settings() {
        init_logging(level, log_dir)
            .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    }

    let session = CatalogSession::initialize(cli.catalog_config())
        .context("cannot open the catalog storage")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    if !cli.no_seed {
        seed_samples(&session, &mut output)?;
        writeln!(output, "\nYour collection:")?;
        list_items(&session, &mut output)?;
    }

    run_menu(&session, &mut stdin.lock(), &mut output)?;

    session.close().context("failed to close the catalog")?;
    writeln!(output, "\nCatalog closed.")?;
    Ok(())
}

fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem::new(
            "Foraged & Found: A Guide to Pretending You Know About Mushrooms",
            "Oak Wavelength",
        )
        .year(2023)
        .rating(5)
        .featured(true)
        .attribute("Forest Green"),
        NewItem::new(
            "Small Batch: 50 Recipes You Will Never Actually Make",
            "Sage Moonbeam",
        )
        .year(2022)
        .rating(4)
        .featured(true)
        .attribute("Raw Linen"),
        NewItem::new(
            "The Artistic Toast: Advanced Avocado Techniques",
            "River Wildflower",
        )
        .year(2023)
        .rating(5)
        .featured(true)
        .attribute("Recycled Brown"),
        NewItem::new("Fermented Everything", "Jim Kombucha")
            .year(2021)
            .rating(3)
            .featured(true)
            .attribute("Denim"),
        NewItem::new(
            "The Deconstructed Sandwich: Making Simple Things Complicated",
            "Juniper Vinegar-Smith",
        )
        .year(2023)
        .rating(5)
        .featured(true)
        .attribute("Beige"),
    ]
}

fn seed_samples(session: &CatalogSession, output: &mut impl Write) -> Result<()> {
    let catalog = session.catalog()?;
    for item in sample_items() {
        match catalog.add_item(&item) {
            Ok(id) => writeln!(output, "Added item {id}")?,
            Err(err) => writeln!(output, "{}", render::error(&err))?,
        }
    }
    info!("event=seed module=cli status=ok");
    Ok(())
}

const MENU: &str = "
1. List all items
2. Search items by rating
3. Add a tag to an item
4. Lend an item
5. Record a return
6. Exit";

fn run_menu(
    session: &CatalogSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    loop {
        writeln!(output, "{MENU}")?;
        let Some(choice) = prompt(input, output, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => list_items(session, output)?,
            "2" => search_items(session, input, output)?,
            "3" => add_tag(session, input, output)?,
            "4" => borrow(session, input, output)?,
            "5" => return_loan(session, input, output)?,
            "6" => {
                writeln!(output, "\nThanks for browsing!")?;
                return Ok(());
            }
            _ => writeln!(output, "\nInvalid choice, try again!")?,
        }
    }
}

fn list_items(session: &CatalogSession, output: &mut impl Write) -> Result<()> {
    let (items, err) = session.catalog()?.list_items().or_empty();
    if let Some(err) = err {
        writeln!(output, "{}", render::error(&err))?;
    }
    for item in &items {
        writeln!(output, "{}", render::item(item))?;
    }
    Ok(())
}

fn search_items(
    session: &CatalogSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let Some(rating) = prompt_number::<i32>(input, output, "\nEnter the rating to match: ")?
    else {
        return Ok(());
    };

    let (items, err) = session.catalog()?.search_by_rating(rating).or_empty();
    if let Some(err) = err {
        writeln!(output, "{}", render::error(&err))?;
    }
    writeln!(output, "\nThese items match your rating:")?;
    for item in &items {
        writeln!(output, "{}", render::item(item))?;
    }
    Ok(())
}

fn add_tag(
    session: &CatalogSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let Some(item_id) = prompt_number::<i64>(input, output, "Item id to tag: ")? else {
        return Ok(());
    };
    let Some(label) = prompt(input, output, "Tag: ")? else {
        return Ok(());
    };

    match session.tags()?.add_tag(item_id, &label) {
        Ok(tag_id) => writeln!(output, "Added tag {tag_id} to item {item_id}")?,
        Err(err) => writeln!(output, "{}", render::error(&err))?,
    }
    Ok(())
}

fn borrow(
    session: &CatalogSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    show_ledger(session, output)?;
    let Some(item_id) = prompt_number::<i64>(input, output, "Item id to lend: ")? else {
        return Ok(());
    };
    let Some(borrower) = prompt(input, output, "Borrower name: ")? else {
        return Ok(());
    };
    let Some(date) = prompt(input, output, "Borrow date (MM/DD/YYYY): ")? else {
        return Ok(());
    };

    match session.loans()?.borrow(item_id, &borrower, &date) {
        Ok(loan_id) => writeln!(output, "Recorded loan {loan_id} for item {item_id}")?,
        Err(err) => writeln!(output, "{}", render::error(&err))?,
    }
    Ok(())
}

fn return_loan(
    session: &CatalogSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    show_ledger(session, output)?;
    let Some(loan_id) = prompt_number::<i64>(input, output, "Loan id being returned: ")? else {
        return Ok(());
    };
    let Some(date) = prompt(input, output, "Return date: ")? else {
        return Ok(());
    };

    match session.loans()?.return_loan(loan_id, &date) {
        Ok(()) => writeln!(output, "Recorded return of loan {loan_id}")?,
        Err(err) => writeln!(output, "{}", render::error(&err))?,
    }
    Ok(())
}

fn show_ledger(session: &CatalogSession, output: &mut impl Write) -> Result<()> {
    writeln!(output, "Current loans:")?;
    let (loans, err) = session.loans()?.list_loans().or_empty();
    if let Some(err) = err {
        writeln!(output, "{}", render::error(&err))?;
    }
    for loan in &loans {
        writeln!(output, "{}", render::loan(loan))?;
    }
    Ok(())
}

/// Reads one trimmed line; `None` on end of input.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Reads a number, re-prompting until it parses; `None` on end of input.
fn prompt_number<T: std::str::FromStr>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> Result<Option<T>> {
    loop {
        let Some(text) = prompt(input, output, message)? else {
            return Ok(None);
        };
        match text.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(output, "`{text}` is not a number, try again.")?,
        }
    }
}
