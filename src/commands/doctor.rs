//! Doctor command handler
//!
//! Collects checks over the config, the bundled files and every flavor's
//! hook. Only `Fail` checks make the command exit non-zero.

use anyhow::Result;
use serde::Serialize;

use crashcue::assets::{AssetPaths, HelperScript};
use crashcue::shell::{FlavorStatus, Installation, TEMPLATE_VERSION};
use crashcue::theme::Theme;
use crashcue::{Config, Flavor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: String,
    pub severity: Severity,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Check {
    fn new(name: impl Into<String>, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity,
            detail: detail.into(),
            hint: None,
        }
    }

    fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// Run diagnostics and return the process exit code.
#[cfg(not(tarpaulin_include))]
pub fn handle(json: bool) -> Result<i32> {
    let mut checks = Vec::new();

    let config = match Config::load_effective(&super::workspace_dir()?) {
        Ok(config) => {
            checks.push(Check::new(
                "config",
                Severity::Ok,
                Config::config_path()?.display().to_string(),
            ));
            config
        }
        Err(e) => {
            checks.push(
                Check::new("config", Severity::Fail, format!("{:#}", e))
                    .hint("fix the file or run `crashcue config reset`"),
            );
            Config::default()
        }
    };

    let registry = super::shell_registry(&config)?;
    let statuses = registry.inspect(&Flavor::ALL);
    checks.extend(diagnose(&config, registry.assets(), &statuses));

    let failed = checks.iter().any(|c| c.severity == Severity::Fail);
    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        let theme = Theme::detect();
        for check in &checks {
            println!("{}", render_check(check, &theme));
        }
    }
    Ok(if failed { 1 } else { 0 })
}

/// Checks over bundled files, the configured sound and each flavor.
pub fn diagnose(config: &Config, assets: &AssetPaths, statuses: &[FlavorStatus]) -> Vec<Check> {
    let mut checks = Vec::new();

    for (name, path) in [
        ("powershell helper", assets.helper(HelperScript::PowerShell)),
        ("posix helper", assets.helper(HelperScript::Posix)),
        ("default sound", assets.default_sound()),
    ] {
        let display = path.display().to_string();
        checks.push(if path.is_file() {
            Check::new(name, Severity::Ok, display)
        } else {
            Check::new(name, Severity::Warn, format!("missing: {display}"))
                .hint("run `crashcue install` or `crashcue test` to restore it")
        });
    }

    if let Some(custom) = config.custom_sound() {
        if assets.resolve_sound(Some(custom)) == assets.default_sound() {
            checks.push(
                Check::new(
                    "custom sound",
                    Severity::Warn,
                    format!("{custom} not found, the default sound plays instead"),
                )
                .hint("run `crashcue config set-sound <path>` with an existing file"),
            );
        }
    }

    let mut any_installed = false;
    for status in statuses {
        any_installed |= status.is_installed();
        checks.push(flavor_check(status));
    }

    if !any_installed {
        checks.push(
            Check::new("shells", Severity::Warn, "no shell hook installed")
                .hint("run `crashcue install`"),
        );
    }

    checks
}

/// One check per flavor; the first problem found wins.
fn flavor_check(status: &FlavorStatus) -> Check {
    let name = status.flavor.name();
    if let Some(ref reason) = status.unavailable {
        return Check::new(name, Severity::Info, format!("not available: {reason}"));
    }

    let location = status.location.clone().unwrap_or_default();
    let Installation::Installed {
        version,
        outdated,
        blocks,
        helper,
        ..
    } = &status.installation
    else {
        return Check::new(
            name,
            Severity::Info,
            format!("not installed in {location}"),
        );
    };

    let version = version.map_or("untagged".to_string(), |v| format!("v{v}"));
    if *outdated {
        Check::new(
            name,
            Severity::Fail,
            format!("outdated hook ({version}, current v{TEMPLATE_VERSION}) in {location}"),
        )
        .hint("run `crashcue install` to upgrade it")
    } else if *blocks > 1 {
        Check::new(
            name,
            Severity::Fail,
            format!("{blocks} hook blocks in {location}"),
        )
        .hint("run `crashcue install` to collapse them into one")
    } else if helper.as_ref().is_some_and(|h| !h.is_file()) {
        Check::new(
            name,
            Severity::Fail,
            format!("hook in {location} points at a missing helper"),
        )
        .hint("run `crashcue install` to restore it")
    } else {
        Check::new(
            name,
            Severity::Ok,
            format!("installed ({version}) in {location}"),
        )
    }
}

fn render_check(check: &Check, theme: &Theme) -> String {
    let tag = match check.severity {
        Severity::Ok => theme.success_text("[ok]  "),
        Severity::Info => theme.secondary_text("[info]"),
        Severity::Warn => theme.warning_text("[warn]"),
        Severity::Fail => theme.error_text("[fail]"),
    };
    let mut line = format!("{} {}: {}", tag, check.name, check.detail);
    if let Some(ref hint) = check.hint {
        line.push_str(&format!("\n       {}", theme.secondary_text(hint)));
    }
    line
}
