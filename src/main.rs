mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::ffi::OsString;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use librarian::inspect;
use librarian::render::{self, RenderMode};
use librarian::sandbox::{self, Availability};
use librarian::scan;
use librarian::{Config, DocBrowser, LibrarianError};
use output::Output;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LIBRARIAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::default()
        .with_doc_root(&cli.root)
        .with_runtime(&cli.runtime)
        .with_sandbox(!cli.no_sandbox);

    match sandbox::check(&config) {
        Availability::Local => {}
        Availability::Sandbox => {
            let args: Vec<OsString> = std::env::args_os().skip(1).collect();
            let output = sandbox::run_in_flatpak(&config, &args)
                .await
                .with_context(|| format!("Failed to run inside {}", config.runtime))?;

            std::io::stdout().write_all(&output.stdout)?;
            std::io::stderr().write_all(&output.stderr)?;
            std::process::exit(output.status);
        }
        Availability::Missing => return Err(LibrarianError::Unavailable(config.doc_root).into()),
    }

    let mut browser = DocBrowser::open(&config.doc_root)?;
    let out = Output::new(cli.json);

    match cli.command {
        Commands::List { dir } => {
            if let Some(dir) = dir {
                for segment in dir.split('/').filter(|s| !s.is_empty() && *s != ".") {
                    browser.enter(segment)?;
                }
            }
            out.listing(&browser, &browser.list())?;
        }
        Commands::Projects => {
            out.projects(&browser.projects())?;
        }
        Commands::Project { project } => {
            let summary = inspect::project_summary(browser.root(), &project)?;
            out.project(&summary)?;
        }
        Commands::Search { pattern, limit } => {
            let pb = output::spinner(!cli.json, "Searching file names...");
            let result = scan::search_by_name(&pattern, browser.root(), limit);
            pb.finish_and_clear();
            out.name_search(browser.root(), &pattern, &result)?;
        }
        Commands::Info { file } => {
            let path = browser.resolve_file(&file)?;
            let info = inspect::file_info(browser.root(), &path)?;
            out.file_info(&file, &info)?;
        }
        Commands::Show { file, raw, lines } => {
            show(&browser, &out, &file, raw, lines)?;
        }
        Commands::Cat { file } => {
            show(&browser, &out, &file, true, None)?;
        }
        Commands::Grep {
            pattern,
            ignore_case,
            limit,
            context,
        } => {
            let pb = output::spinner(!cli.json, "Searching file contents...");
            let result =
                scan::search_content(&pattern, browser.root(), ignore_case, limit, context);
            pb.finish_and_clear();
            out.content_search(&result?)?;
        }
    }

    Ok(())
}

fn show(
    browser: &DocBrowser,
    out: &Output,
    file: &str,
    raw: bool,
    lines: Option<usize>,
) -> Result<()> {
    let path = browser.resolve_file(file)?;
    if !path.is_file() {
        return Err(LibrarianError::NotAFile(file.to_string()).into());
    }

    let mode = if raw {
        RenderMode::Raw
    } else {
        RenderMode::from_path(&path)
    };
    let text = render::render(&path, raw);
    let text = match lines {
        Some(n) => render::head(&text, n),
        None => text.as_str(),
    };

    let shown = scan::relative_display(browser.root(), &path);
    out.rendered(&shown, mode, text)
}
