use clap::{Parser, Subcommand};
use std::path::PathBuf;

use librarian::config::{DEFAULT_DOC_ROOT, DEFAULT_RUNTIME};

#[derive(Parser)]
#[command(
    name = "librarian",
    about = "Browse and explore GNOME documentation from the terminal",
    after_help = "Examples:
  librarian list                          List the documentation root
  librarian projects                      List all available projects
  librarian project gtk4                  Summarize the GTK4 documentation
  librarian search Button                 Find files whose name matches 'Button'
  librarian info gtk4/class.Button.html   Show information about one file
  librarian show gtk4/index.html          Render HTML/Markdown as terminal text
  librarian cat gtk4/index.html           Print raw file contents
  librarian grep signal -i                Search inside the docs, ignoring case"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        env = "LIBRARIAN_DOC_ROOT",
        default_value = DEFAULT_DOC_ROOT,
        help = "Documentation root"
    )]
    pub root: PathBuf,

    #[arg(
        long,
        global = true,
        env = "LIBRARIAN_RUNTIME",
        default_value = DEFAULT_RUNTIME,
        help = "Flatpak runtime used when the root is not visible"
    )]
    pub runtime: String,

    #[arg(long, global = true, help = "Never re-run inside the Flatpak runtime")]
    pub no_sandbox: bool,

    #[arg(long, global = true, help = "Print structured results as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the contents of a documentation directory")]
    List {
        #[arg(help = "Directory relative to the root (default: the root)")]
        dir: Option<String>,
    },
    #[command(about = "List all available documentation projects")]
    Projects,
    #[command(about = "Summarize a documentation project")]
    Project {
        #[arg(help = "Name of the project (e.g., gtk4, libadwaita, glib)")]
        project: String,
    },
    #[command(about = "Search for files whose name matches a pattern")]
    Search {
        #[arg(help = "Search pattern (regex or substring)")]
        pattern: String,
        #[arg(long, short, default_value = "50", help = "Maximum number of results")]
        limit: usize,
    },
    #[command(about = "Show information about a file")]
    Info {
        #[arg(help = "Path to file (relative to the root)")]
        file: String,
    },
    #[command(about = "Render a documentation file as terminal-friendly text")]
    Show {
        #[arg(help = "Path to file (relative to the root)")]
        file: String,
        #[arg(long, short, help = "Print raw file contents without rendering")]
        raw: bool,
        #[arg(long = "lines", short = 'n', help = "Only print the first N lines")]
        lines: Option<usize>,
    },
    #[command(about = "Print a file's raw contents (same as show --raw)")]
    Cat {
        #[arg(help = "Path to file (relative to the root)")]
        file: String,
    },
    #[command(about = "Search inside documentation files")]
    Grep {
        #[arg(help = "Regex to search for")]
        pattern: String,
        #[arg(long, short, help = "Case insensitive matching")]
        ignore_case: bool,
        #[arg(long, short, default_value = "50", help = "Maximum number of matches")]
        limit: usize,
        #[arg(
            long,
            short = 'C',
            default_value = "0",
            help = "Lines of context around each match"
        )]
        context: usize,
    },
}
