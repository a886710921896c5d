//! xtask - Build tasks for CrashCue
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use crashcue::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for CrashCue")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            // Neither flag means both
            let both = !man && !markdown;
            if both || man {
                generate_man_pages(&output)?;
            }
            if both || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Visible subcommands of `cmd`.
fn visible(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|c| !c.is_hide_set())
}

/// Arguments worth documenting (everything but help/version).
fn documented_args(cmd: &Command) -> impl Iterator<Item = &Arg> {
    cmd.get_arguments().filter(|a| {
        let id = a.get_id().as_str();
        id != "help" && id != "version" && !a.is_hide_set()
    })
}

/// Generate man pages using clap_mangen, one per (nested) subcommand
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    let name = cmd.get_name().to_string();
    write_man_page(&man_dir, &name, cmd)?;

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

fn write_man_page(dir: &Path, page: &str, cmd: Command) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    let path = dir.join(format!("{page}.1"));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());

    for sub in visible(&cmd) {
        write_man_page(dir, &format!("{page}-{}", sub.get_name()), sub.clone())?;
    }
    Ok(())
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut markdown = String::new();

    markdown.push_str("# CrashCue Command Reference\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    markdown.push_str("## Table of Contents\n\n");
    for sub in visible(&cmd) {
        let name = sub.get_name();
        markdown.push_str(&format!("- [{name}](#{bin}-{name})\n"));
    }
    markdown.push_str("\n---\n\n");

    markdown.push_str(&format!("## {bin}\n\n"));
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{about}\n\n"));
    }
    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str(&format!("```\n{long_about}\n```\n\n"));
    }

    for sub in visible(&cmd) {
        let title = format!("{bin} {}", sub.get_name());
        markdown.push_str(&format!("## {title}\n\n"));
        describe_command(&mut markdown, sub);

        for nested in visible(sub) {
            markdown.push_str(&format!("#### {title} {}\n\n", nested.get_name()));
            describe_command(&mut markdown, nested);
        }
        markdown.push_str("---\n\n");
    }

    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}

/// About text, arguments, options and long description of one command.
fn describe_command(markdown: &mut String, cmd: &Command) {
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{about}\n\n"));
    }

    let (positional, options): (Vec<&Arg>, Vec<&Arg>) =
        documented_args(cmd).partition(|a| a.is_positional());

    if !positional.is_empty() {
        markdown.push_str("**Arguments**\n\n");
        for arg in positional {
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            markdown.push_str(&format!(
                "- `<{}>`: {help}\n",
                arg.get_id().as_str().to_uppercase()
            ));
        }
        markdown.push('\n');
    }

    if !options.is_empty() {
        markdown.push_str("**Options**\n\n");
        for arg in options {
            let flag = match (arg.get_short(), arg.get_long()) {
                (Some(s), Some(l)) => format!("-{s}, --{l}"),
                (None, Some(l)) => format!("--{l}"),
                (Some(s), None) => format!("-{s}"),
                (None, None) => continue,
            };
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            markdown.push_str(&format!("- `{flag}`: {help}\n"));
        }
        markdown.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str(&format!("```\n{long_about}\n```\n\n"));
    }
}
