//! The `generate` subcommand.

use crate::cli::{entry, CliContext};
use crate::constants;
use crate::core::store::Store;
use crate::util::password;
use anyhow::{bail, Context, Result};
use clap::Args;
use dialoguer::Confirm;

fn parse_length(s: &str) -> Result<usize, String> {
    let length: usize = s
        .parse()
        .map_err(|_| "length must be a whole number".to_string())?;
    if !password::length_in_bounds(length) {
        return Err(format!(
            "length must be between {} and {}",
            constants::MIN_PASSWORD_LENGTH,
            constants::MAX_PASSWORD_LENGTH
        ));
    }
    Ok(length)
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Password length (8-32; default from settings.toml)
    #[arg(long, value_parser = parse_length)]
    pub length: Option<usize>,

    /// Keyword to save the generated password under
    #[arg(long)]
    pub keyword: Option<String>,

    /// Print the password without offering to save it
    #[arg(long)]
    pub no_save: bool,
}

pub fn run(ctx: &CliContext, args: GenerateArgs) -> Result<()> {
    let length = args.length.unwrap_or(ctx.settings.generate.default_length);
    if !password::length_in_bounds(length) {
        bail!(
            "default_length {} in settings is out of bounds ({}-{})",
            length,
            constants::MIN_PASSWORD_LENGTH,
            constants::MAX_PASSWORD_LENGTH
        );
    }

    let generated = password::generate(length);
    println!("Generated password: {}", generated);

    if args.no_save {
        return Ok(());
    }

    let mut store = Store::load(&ctx.paths.db_file);
    let keyword = match args.keyword {
        Some(keyword) => keyword,
        None => {
            // Without --keyword there is nothing to save in script mode.
            if ctx.non_interactive {
                return Ok(());
            }
            let save = Confirm::new()
                .with_prompt("Save this password?")
                .default(false)
                .interact()
                .context("read confirmation")?;
            if !save {
                return Ok(());
            }
            entry::prompt_new_keyword(&store)?
        }
    };

    let saved = store.insert(&keyword, &generated)?;
    println!("Saved '{}'", saved.keyword);
    Ok(())
}
