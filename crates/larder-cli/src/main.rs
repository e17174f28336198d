use std::env;

use clap::Parser;
use cli::Args;
use insert::insert_package;
use larder_core::{
    config::{self, generate_default_config, set_db_path, CONFIG_PATH},
    error::ErrorContext,
    utils::{build_path, setup_required_paths},
    LarderResult,
};
use logging::setup_logging;
use remove::remove_packages;
use search::search_packages;
use state::AppState;
use update::{update_package, UpdateFields};
use utils::COLOR;

mod cli;
mod insert;
mod logging;
mod remove;
mod search;
mod state;
mod update;
mod utils;

fn handle_cli() -> LarderResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    if let Some(ref c) = args.config {
        let path = build_path(c)?;
        let path = if path.is_absolute() {
            path
        } else {
            env::current_dir()
                .with_context(|| "retrieving current directory".to_string())?
                .join(path)
        };

        let mut config_path = CONFIG_PATH.write().unwrap();
        *config_path = path;
    }

    match args.command {
        cli::Commands::DefConfig => generate_default_config()?,
        command => {
            config::init()?;

            if let Some(ref db_path) = args.database {
                set_db_path(db_path);
            }

            setup_required_paths()?;

            let state = AppState::new();

            match command {
                cli::Commands::Insert {
                    name,
                    version,
                    name_flag,
                    version_flag,
                    homepage,
                    maintainer,
                    email,
                    dependency,
                    standalone,
                    installed,
                    uninstalled,
                    dry_run,
                } => {
                    let name = name_flag.or(name);
                    let version = version_flag.or(version);
                    let as_dependency = dependency && !standalone;
                    let is_installed = installed || !uninstalled;

                    insert_package(
                        &state,
                        name,
                        version,
                        homepage,
                        maintainer,
                        email,
                        as_dependency,
                        is_installed,
                        dry_run,
                    )?;
                }
                cli::Commands::Update {
                    name,
                    version,
                    id,
                    new_name,
                    new_version,
                    homepage,
                    maintainer,
                    email,
                    dependency,
                    standalone,
                    installed,
                    uninstalled,
                } => {
                    let as_dependency = if dependency {
                        Some(true)
                    } else if standalone {
                        Some(false)
                    } else {
                        None
                    };
                    let is_installed = if installed {
                        Some(true)
                    } else if uninstalled {
                        Some(false)
                    } else {
                        None
                    };

                    update_package(
                        &state,
                        id,
                        name,
                        version,
                        UpdateFields {
                            name: new_name,
                            version: new_version,
                            homepage,
                            maintainer,
                            email,
                            as_dependency,
                            is_installed,
                        },
                    )?;
                }
                cli::Commands::Remove {
                    name,
                    version,
                    id,
                    dry_run,
                } => {
                    remove_packages(&state, id, name, version, dry_run)?;
                }
                cli::Commands::Search {
                    query,
                    version,
                    limit,
                } => {
                    search_packages(&state, query, version, limit)?;
                }
                cli::Commands::DefConfig => unreachable!(),
            }
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
