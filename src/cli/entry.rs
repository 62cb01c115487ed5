//! Handlers for the entry CRUD subcommands, plus the shared table
//! renderer and prompt helpers the menu reuses.

use crate::cli::CliContext;
use crate::constants;
use crate::core::store::Store;
use crate::models::entry::Entry;
use crate::util::datetime;
use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use dialoguer::{Confirm, Input, Password};
use serde::Serialize;
use std::io::Read;
use zeroize::Zeroizing;

fn parse_keyword(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("keyword cannot be empty".into());
    }
    Ok(s.to_string())
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Keyword to identify the secret later
    #[arg(value_parser = parse_keyword)]
    pub keyword: String,

    /// Read the secret from stdin instead of an interactive prompt
    #[arg(long)]
    pub from_stdin: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Keyword of the entry to update
    #[arg(value_parser = parse_keyword)]
    pub keyword: String,

    /// Read the secret from stdin instead of an interactive prompt
    #[arg(long)]
    pub from_stdin: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Keyword to show, or 'all' for every entry
    #[arg(value_parser = parse_keyword)]
    pub keyword: String,

    /// Show secrets even when settings conceal them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Show secrets even when settings conceal them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Keyword to remove, or 'all' for every entry
    #[arg(value_parser = parse_keyword)]
    pub keyword: String,

    /// Skip the delete-all confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct WipeArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Serialize)]
struct ListItem<'a> {
    keyword: &'a str,
    secret: String,
    updated_at: String,
}

pub fn run_add(ctx: &CliContext, args: AddArgs) -> Result<()> {
    if ctx.non_interactive && !args.from_stdin {
        bail!("--non-interactive requires --from-stdin for add");
    }
    let secret = read_secret(args.from_stdin, &args.keyword)?;
    let mut store = Store::load(&ctx.paths.db_file);
    let entry = store.insert(&args.keyword, &secret)?;
    println!(
        "Saved '{}' {}",
        entry.keyword,
        datetime::format_last_updated(entry.updated_at)
    );
    Ok(())
}

pub fn run_update(ctx: &CliContext, args: UpdateArgs) -> Result<()> {
    if ctx.non_interactive && !args.from_stdin {
        bail!("--non-interactive requires --from-stdin for update");
    }
    let secret = read_secret(args.from_stdin, &args.keyword)?;
    let mut store = Store::load(&ctx.paths.db_file);
    let entry = store.update(&args.keyword, &secret)?;
    println!(
        "Updated '{}' {}",
        entry.keyword,
        datetime::format_last_updated(entry.updated_at)
    );
    Ok(())
}

pub fn run_show(ctx: &CliContext, args: ShowArgs) -> Result<()> {
    let store = Store::load(&ctx.paths.db_file);
    if store.is_empty() {
        println!("No secrets have been saved.");
        return Ok(());
    }
    let conceal = ctx.settings.display.conceal_secrets && !args.reveal;
    // The wildcard is the literal "all"; other casings are ordinary
    // lookups (which cannot exist, since insert rejects them).
    if args.keyword == constants::RESERVED_KEYWORD {
        print_table(store.entries(), conceal);
        return Ok(());
    }
    let entry = store.get(&args.keyword)?;
    print_table(std::slice::from_ref(entry), conceal);
    Ok(())
}

pub fn run_list(ctx: &CliContext, args: ListArgs) -> Result<()> {
    if args.format != "table" && args.format != "json" {
        bail!("invalid format: {} (use table|json)", args.format);
    }
    let store = Store::load(&ctx.paths.db_file);
    let conceal = ctx.settings.display.conceal_secrets && !args.reveal;

    if args.format == "json" {
        let items: Vec<ListItem> = store
            .entries()
            .iter()
            .map(|entry| ListItem {
                keyword: &entry.keyword,
                secret: display_secret(&entry.secret, conceal),
                updated_at: entry.updated_at.to_rfc3339(),
            })
            .collect();
        let json = serde_json::to_string_pretty(&items).context("serialize list")?;
        println!("{}", json);
        return Ok(());
    }

    if store.is_empty() {
        println!("No secrets have been saved.");
        return Ok(());
    }
    print_table(store.entries(), conceal);
    Ok(())
}

pub fn run_remove(ctx: &CliContext, args: RemoveArgs) -> Result<()> {
    let mut store = Store::load(&ctx.paths.db_file);
    if args.keyword == constants::RESERVED_KEYWORD {
        if !confirm_wipe(ctx, args.yes)? {
            println!("Nothing deleted.");
            return Ok(());
        }
        store.remove_all()?;
        println!("All secrets deleted.");
        return Ok(());
    }
    let entry = store.remove(&args.keyword)?;
    println!("Deleted '{}'", entry.keyword);
    Ok(())
}

pub fn run_wipe(ctx: &CliContext, args: WipeArgs) -> Result<()> {
    if !confirm_wipe(ctx, args.yes)? {
        println!("Nothing deleted.");
        return Ok(());
    }
    Store::reset(&ctx.paths.db_file)?;
    println!("All secrets deleted.");
    Ok(())
}

fn confirm_wipe(ctx: &CliContext, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if ctx.non_interactive {
        bail!("--non-interactive requires --yes to delete every entry");
    }
    Confirm::new()
        .with_prompt("Delete every saved secret?")
        .default(false)
        .interact()
        .context("read confirmation")
}

fn read_secret(from_stdin: bool, keyword: &str) -> Result<Zeroizing<String>> {
    let secret = if from_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read secret from stdin")?;
        Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string())
    } else {
        Zeroizing::new(
            Password::new()
                .with_prompt(format!("Secret for '{}'", keyword))
                .allow_empty_password(false)
                .interact()
                .context("read secret from prompt")?,
        )
    };
    if secret.is_empty() {
        bail!("secret is empty");
    }
    if secret.len() > constants::MAX_SECRET_SIZE {
        bail!(
            "secret exceeds maximum size ({} bytes, max {} bytes)",
            secret.len(),
            constants::MAX_SECRET_SIZE
        );
    }
    Ok(secret)
}

/// Keep asking until the keyword is non-empty, not reserved, and not
/// already taken.
pub(crate) fn prompt_new_keyword(store: &Store) -> Result<String> {
    let mut prompt = String::from("Enter a unique keyword to identify this secret later");
    loop {
        let keyword: String = Input::new()
            .with_prompt(prompt.as_str())
            .allow_empty(true)
            .interact_text()
            .context("read keyword")?;
        if keyword.is_empty() {
            prompt = "The keyword can't be empty; enter another keyword".into();
            continue;
        }
        if keyword.eq_ignore_ascii_case(constants::RESERVED_KEYWORD) {
            prompt = format!(
                "The keyword can't be '{}'; enter another keyword",
                constants::RESERVED_KEYWORD
            );
            continue;
        }
        if store.get(&keyword).is_ok() {
            prompt = "A secret has already been saved with this keyword; enter another keyword"
                .into();
            continue;
        }
        return Ok(keyword);
    }
}

pub(crate) fn print_table(entries: &[Entry], conceal: bool) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Serial No.").add_attribute(Attribute::Bold),
        Cell::new("Keyword").add_attribute(Attribute::Bold),
        Cell::new("Password").add_attribute(Attribute::Bold),
        Cell::new("Last Updated").add_attribute(Attribute::Bold),
    ]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            format!("{}.", i + 1),
            entry.keyword.clone(),
            display_secret(&entry.secret, conceal),
            datetime::format_last_updated(entry.updated_at),
        ]);
    }
    println!("{}", table);
}

fn display_secret(secret: &str, conceal: bool) -> String {
    if conceal {
        mask(secret)
    } else {
        secret.to_string()
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
