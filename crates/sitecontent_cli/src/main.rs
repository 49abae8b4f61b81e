//! Command-line entry for page content slots.
//!
//! # Responsibility
//! - Verify `sitecontent_core` linkage (`ping`).
//! - Inspect, reset and clean up content slots in the configured database.
//!
//! Database path comes from `sitecontent_core::db::resolve_db_path`.

use clap::{Parser, Subcommand};
use sitecontent_core::db::{open_db, resolve_db_path};
use sitecontent_core::{
    PageContentStore, PageDomain, SlotMaintenanceService, SlotStatus, SqliteSlotRepository,
};
use std::process::ExitCode;

/// Inspect and maintain editable page content slots.
#[derive(Debug, Parser)]
#[command(name = "sitecontent", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Commands {
    /// Print core linkage and version
    Ping,

    /// Print the current document of one page
    Show {
        /// achievements | career | faculty | teams
        #[arg(value_parser = parse_domain)]
        domain: PageDomain,
    },

    /// Restore compiled-in defaults for one page
    Reset {
        /// achievements | career | faculty | teams
        #[arg(value_parser = parse_domain)]
        domain: PageDomain,
    },

    /// List stored slots with their status
    Slots,

    /// Delete slots orphaned by a slot key version bump
    Purge,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Ping => {
            println!("sitecontent_core ping={}", sitecontent_core::ping());
            println!("sitecontent_core version={}", sitecontent_core::core_version());
            Ok(())
        }
        Commands::Show { domain } => with_slots(|slots| {
            let store = PageContentStore::open(domain, slots);
            let pretty = serde_json::to_string_pretty(store.data())
                .map_err(|err| format!("render failed: {err}"))?;
            println!("{pretty}");
            Ok(())
        }),
        Commands::Reset { domain } => with_slots(|slots| {
            let mut store = PageContentStore::open(domain, slots);
            let outcome = store.reset_to_default().map_err(|err| err.to_string())?;
            if !outcome.is_persisted() {
                return Err(format!("reset not persisted: {outcome:?}"));
            }
            println!("reset {} ({})", domain.as_str(), domain.slot_key());
            Ok(())
        }),
        Commands::Slots => with_slots(|slots| {
            let reports = SlotMaintenanceService::new(slots)
                .inventory()
                .map_err(|err| err.to_string())?;
            for report in reports {
                println!(
                    "{}\t{}\t{} bytes",
                    report.entry.slot_key,
                    status_label(report.status),
                    report.entry.byte_len
                );
            }
            Ok(())
        }),
        Commands::Purge => with_slots(|slots| {
            let purged = SlotMaintenanceService::new(slots)
                .purge_orphans()
                .map_err(|err| err.to_string())?;
            println!("purged {} slot(s)", purged.len());
            for slot_key in purged {
                println!("  {slot_key}");
            }
            Ok(())
        }),
    }
}

fn parse_domain(raw: &str) -> Result<PageDomain, String> {
    PageDomain::parse(raw).ok_or_else(|| {
        format!("unknown page domain `{raw}`; expected achievements|career|faculty|teams")
    })
}

fn with_slots(
    f: impl FnOnce(SqliteSlotRepository<'_>) -> Result<(), String>,
) -> Result<(), String> {
    let path = resolve_db_path();
    let conn = open_db(&path).map_err(|err| format!("open `{}` failed: {err}", path.display()))?;
    let slots = SqliteSlotRepository::try_new(&conn).map_err(|err| err.to_string())?;
    f(slots)
}

fn status_label(status: SlotStatus) -> String {
    match status {
        SlotStatus::Current(domain) => format!("current({})", domain.as_str()),
        SlotStatus::Orphaned {
            domain,
            current_version,
            ..
        } => format!("orphaned({} now v{current_version})", domain.as_str()),
        SlotStatus::Unrecognized => "unrecognized".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use sitecontent_core::PageDomain;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn domain_argument_is_parsed_case_insensitively() {
        let cli = Cli::try_parse_from(["sitecontent", "show", "Career"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Show {
                domain: PageDomain::Career
            }
        );

        let cli = Cli::try_parse_from(["sitecontent", "reset", "teams"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Reset {
                domain: PageDomain::Teams
            }
        );
    }

    #[test]
    fn unknown_domain_and_missing_domain_are_rejected() {
        let err = Cli::try_parse_from(["sitecontent", "show", "blog"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unknown page domain"));

        let err = Cli::try_parse_from(["sitecontent", "show"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_is_served_per_subcommand() {
        let err = Cli::try_parse_from(["sitecontent", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["sitecontent", "purge", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
