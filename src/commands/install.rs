//! Install and uninstall handlers

use anyhow::Result;

use crashcue::shell::{FlavorOutcome, FlavorReport};
use crashcue::theme::Theme;
use crashcue::{Config, Flavor};

use super::{format_report, shell_registry};

/// Install the hook into the selected flavors.
///
/// Per-flavor failures are reported, not returned; the command itself
/// succeeds once every flavor has been attempted.
#[cfg(not(tarpaulin_include))]
pub fn handle_install(flavor: Option<Flavor>) -> Result<()> {
    let config = Config::load()?;
    let mut registry = shell_registry(&config)?;
    let reports = registry.install(&Flavor::selected(flavor));
    print_reports(&reports);

    let changed = reports.iter().any(|r| {
        matches!(
            r.outcome,
            FlavorOutcome::Injected { .. } | FlavorOutcome::Updated { .. }
        )
    });
    if changed {
        println!();
        println!("Restart your shell to activate the hook.");
    }
    Ok(())
}

/// Remove the hook from the selected flavors.
#[cfg(not(tarpaulin_include))]
pub fn handle_uninstall(flavor: Option<Flavor>) -> Result<()> {
    let config = Config::load()?;
    let mut registry = shell_registry(&config)?;
    let reports = registry.uninstall(&Flavor::selected(flavor));
    print_reports(&reports);
    Ok(())
}

fn print_reports(reports: &[FlavorReport]) {
    let theme = Theme::detect();
    for report in reports {
        println!("{}", format_report(report, &theme));
    }
}
