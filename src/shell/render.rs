//! Block rendering
//!
//! Produces the exact text CrashCue injects between its markers. Only the
//! header (version tag and path bindings) varies; the hook logic is fixed
//! per syntax and refers to the bound variables.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::error::ShellError;
use super::flavor::{Flavor, Syntax};
use super::markers::{contains_marker, MARKER_END, MARKER_START};

/// Version of the block templates below. Bump when their text changes so
/// `crashcue doctor` can flag old installations.
pub const TEMPLATE_VERSION: u32 = 3;

/// Minimum gap between two cues.
pub const DEBOUNCE_MS: u32 = 300;

/// Prefix of the version tag line inside every block.
pub const VERSION_TAG: &str = "# crashcue-template: v";

const MANAGED_NOTE: &str = "# Managed by 'crashcue install'. Edits inside this block are overwritten.";

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^{}(\d+)\s*$", regex::escape(VERSION_TAG)))
        .expect("version tag pattern is valid")
});

/// Hook body for PowerShell profiles.
///
/// Overrides the global `prompt`; a prompt defined later in the profile wins.
const POWERSHELL_BODY: &str = r#"$global:CrashCueLastErrorCount = $Error.Count
$global:CrashCueLastTrigger = [DateTime]::MinValue

function global:Invoke-CrashCue {
    $now = Get-Date
    if (($now - $global:CrashCueLastTrigger).TotalMilliseconds -lt $global:CrashCueDebounceMs) {
        return
    }
    $global:CrashCueLastTrigger = $now
    try {
        if (Test-Path -LiteralPath $global:CrashCueHelper) {
            & $global:CrashCueHelper -Path $global:CrashCueSound *> $null
        }
    } catch {}
}

function global:prompt {
    $crashCueNativeFailed = ($null -ne $global:LASTEXITCODE) -and ($global:LASTEXITCODE -ne 0)
    $crashCueNewError = $Error.Count -gt $global:CrashCueLastErrorCount
    if ($crashCueNativeFailed) { Invoke-CrashCue }
    if ($crashCueNewError) { Invoke-CrashCue }
    $global:CrashCueLastErrorCount = $Error.Count
    $global:LASTEXITCODE = 0
    "PS $($executionContext.SessionState.Path.CurrentLocation)$('>' * ($nestedPromptLevel + 1)) "
}
"#;

/// Hook body for Bash rc files.
///
/// Runs first in PROMPT_COMMAND so `$?` is still the user's command status,
/// and returns that status for whatever runs after it.
const BASH_BODY: &str = r#"__crashcue_last_ms=0
__crashcue_now_ms() {
    if [ -n "${EPOCHREALTIME:-}" ]; then
        local us=${EPOCHREALTIME/[.,]/}
        echo $(( us / 1000 ))
    else
        echo $(( SECONDS * 1000 ))
    fi
}
__crashcue_prompt() {
    local status=$?
    if [ "$status" -ne 0 ]; then
        local now
        now=$(__crashcue_now_ms)
        if [ $(( now - __crashcue_last_ms )) -ge "$CRASHCUE_DEBOUNCE_MS" ]; then
            __crashcue_last_ms=$now
            if [ -f "$CRASHCUE_HELPER" ]; then
                ( sh "$CRASHCUE_HELPER" "$CRASHCUE_SOUND" >/dev/null 2>&1 & )
            fi
        fi
    fi
    return "$status"
}
case ";${PROMPT_COMMAND:-};" in
    *";__crashcue_prompt;"*) ;;
    *) PROMPT_COMMAND="__crashcue_prompt${PROMPT_COMMAND:+;$PROMPT_COMMAND}" ;;
esac
"#;

/// A rendered, marker-wrapped block ready for injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionBlock {
    pub flavor: Flavor,
    pub version: u32,
    pub helper: PathBuf,
    pub sound: PathBuf,
    text: String,
}

impl InjectionBlock {
    /// Full block text, markers included, without a trailing newline.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Render the block for `flavor`.
///
/// Fails for cmd (no text block) and when a path would smuggle a marker
/// into the body, which would break block matching.
pub fn render(
    flavor: Flavor,
    helper: &Path,
    sound: &Path,
    version: u32,
) -> Result<InjectionBlock, ShellError> {
    for path in [helper, sound] {
        if contains_marker(&path.to_string_lossy()) {
            return Err(ShellError::MarkerInPath(path.to_path_buf()));
        }
    }

    let text = match flavor.syntax() {
        Syntax::PowerShell => format!(
            "{MARKER_START}\n{VERSION_TAG}{version}\n{MANAGED_NOTE}\n\
             # Note: this block replaces the global prompt function.\n\
             $global:CrashCueHelper = {}\n\
             $global:CrashCueSound = {}\n\
             $global:CrashCueDebounceMs = {DEBOUNCE_MS}\n\
             {POWERSHELL_BODY}{MARKER_END}",
            powershell_quote(helper),
            powershell_quote(sound),
        ),
        Syntax::Bash => format!(
            "{MARKER_START}\n{VERSION_TAG}{version}\n{MANAGED_NOTE}\n\
             CRASHCUE_HELPER={}\n\
             CRASHCUE_SOUND={}\n\
             CRASHCUE_DEBOUNCE_MS={DEBOUNCE_MS}\n\
             {BASH_BODY}{MARKER_END}",
            bash_quote(helper),
            bash_quote(sound),
        ),
        Syntax::AutoRun => return Err(ShellError::NoBlock(flavor)),
    };

    Ok(InjectionBlock {
        flavor,
        version,
        helper: helper.to_path_buf(),
        sound: sound.to_path_buf(),
        text,
    })
}

/// Single-quoted PowerShell literal; embedded `'` are doubled.
pub fn powershell_quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', "''"))
}

/// Double-quoted Bash literal with forward slashes.
///
/// Backslashes become `/` (Git Bash accepts `C:/...`), then the characters
/// that stay special inside double quotes are escaped.
pub fn bash_quote(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let mut quoted = String::with_capacity(normalized.len() + 2);
    quoted.push('"');
    for c in normalized.chars() {
        if matches!(c, '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Template version tagged inside `block`, if any.
pub fn extract_version(block: &str) -> Option<u32> {
    VERSION_LINE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
