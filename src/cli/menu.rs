//! The interactive menu loop.
//!
//! Mirrors the classic flow: pick an action, do a full load-mutate-save
//! round against the database, return to the menu. Validation problems
//! print a message and come back here; nothing short of Quit (or a broken
//! terminal) ends the process.

use crate::cli::{entry, CliContext};
use crate::constants;
use crate::core::store::{Store, StoreError};
use crate::util::password;
use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input, Password, Select};
use zeroize::Zeroizing;

const MENU_ITEMS: &[&str] = &[
    "Generate Password",
    "Save Password",
    "Update Password",
    "View Password",
    "Delete Password",
    "Quit",
];

pub fn run(ctx: &CliContext) -> Result<()> {
    if ctx.non_interactive {
        bail!("the menu needs a terminal; use the subcommands with --non-interactive");
    }
    loop {
        println!();
        let choice = Select::new()
            .with_prompt("What do you want to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact()
            .context("read menu choice")?;

        let result = match choice {
            0 => generate_password(ctx),
            1 => save_password(ctx),
            2 => update_password(ctx),
            3 => view_password(ctx),
            4 => delete_password(ctx),
            _ => return Ok(()),
        };

        if let Err(e) = result {
            eprintln!("error: {:#}", e);
        }
    }
}

fn conceal(ctx: &CliContext) -> bool {
    ctx.settings.display.conceal_secrets
}

fn generate_password(ctx: &CliContext) -> Result<()> {
    let length: usize = Input::new()
        .with_prompt(format!(
            "Length of the password to create ({}-{})",
            constants::MIN_PASSWORD_LENGTH,
            constants::MAX_PASSWORD_LENGTH
        ))
        .default(ctx.settings.generate.default_length)
        .validate_with(|n: &usize| {
            if password::length_in_bounds(*n) {
                Ok(())
            } else {
                Err(format!(
                    "must be between {} and {}",
                    constants::MIN_PASSWORD_LENGTH,
                    constants::MAX_PASSWORD_LENGTH
                ))
            }
        })
        .interact_text()
        .context("read length")?;

    let generated = password::generate(length);
    println!("\nThe generated password is: {}", generated);

    let save = Confirm::new()
        .with_prompt("Do you want to save this password?")
        .default(false)
        .interact()
        .context("read confirmation")?;
    if !save {
        return Ok(());
    }

    let mut store = Store::load(&ctx.paths.db_file);
    let keyword = entry::prompt_new_keyword(&store)?;
    store.insert(&keyword, &generated)?;
    println!("\nPassword saved successfully.");
    Ok(())
}

fn save_password(ctx: &CliContext) -> Result<()> {
    let secret = Zeroizing::new(
        Password::new()
            .with_prompt("Enter the password that you want to save")
            .allow_empty_password(false)
            .interact()
            .context("read secret")?,
    );
    let mut store = Store::load(&ctx.paths.db_file);
    let keyword = entry::prompt_new_keyword(&store)?;
    store.insert(&keyword, &secret)?;
    println!("\nPassword saved successfully.");
    Ok(())
}

fn update_password(ctx: &CliContext) -> Result<()> {
    let mut store = Store::load(&ctx.paths.db_file);
    if store.is_empty() {
        println!("\nNo password has been saved.");
        return Ok(());
    }
    entry::print_table(store.entries(), conceal(ctx));

    let keyword: String = Input::new()
        .with_prompt("Enter the keyword for the password that you want to update")
        .interact_text()
        .context("read keyword")?;
    if store.get(&keyword).is_err() {
        println!("\nNo password has been saved with this keyword.");
        return Ok(());
    }

    let secret = Zeroizing::new(
        Password::new()
            .with_prompt(format!("Enter a new password for '{}'", keyword))
            .allow_empty_password(false)
            .interact()
            .context("read secret")?,
    );
    store.update(&keyword, &secret)?;
    println!("\nPassword updated successfully.");
    Ok(())
}

fn view_password(ctx: &CliContext) -> Result<()> {
    let store = Store::load(&ctx.paths.db_file);
    if store.is_empty() {
        println!("\nNo password has been saved.");
        return Ok(());
    }
    let keyword: String = Input::new()
        .with_prompt(format!(
            "Enter the keyword for the password that you want to view ('{}' for every one)",
            constants::RESERVED_KEYWORD
        ))
        .interact_text()
        .context("read keyword")?;

    if keyword == constants::RESERVED_KEYWORD {
        entry::print_table(store.entries(), conceal(ctx));
        return Ok(());
    }
    match store.get(&keyword) {
        Ok(found) => entry::print_table(std::slice::from_ref(found), conceal(ctx)),
        Err(_) => println!("\nNo password has been saved with this keyword."),
    }
    Ok(())
}

fn delete_password(ctx: &CliContext) -> Result<()> {
    let mut store = Store::load(&ctx.paths.db_file);
    if store.is_empty() {
        println!("\nNo password has been saved.");
        return Ok(());
    }
    entry::print_table(store.entries(), conceal(ctx));

    let keyword: String = Input::new()
        .with_prompt(format!(
            "Enter the keyword for the password that you want to delete ('{}' for every one)",
            constants::RESERVED_KEYWORD
        ))
        .interact_text()
        .context("read keyword")?;

    if keyword == constants::RESERVED_KEYWORD {
        let confirmed = Confirm::new()
            .with_prompt("Delete every saved password?")
            .default(false)
            .interact()
            .context("read confirmation")?;
        if confirmed {
            store.remove_all()?;
            println!("\nPasswords deleted successfully.");
        }
        return Ok(());
    }

    match store.remove(&keyword) {
        Ok(_) => println!("\nPassword deleted successfully."),
        Err(StoreError::KeywordNotFound(_)) => {
            println!("\nNo password has been saved with this keyword.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
