use clap::{Parser, Subcommand};
use mdwikify::prompt::{AcceptAll, Prompter, TerminalPrompter};
use mdwikify::{config, install, output, wiki};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdwikify")]
#[command(about = "Turn a directory of Markdown files into a browsable wiki")]
#[command(long_about = "\
Turn a directory of Markdown files into a browsable wiki

Every directory that contains Markdown (at any depth) gets an index.md
listing its sub-sections and pages. The root also gets a navigation.md
menu, a config.json for the viewer, and the viewer itself (index.html).

Existing files are never overwritten. Delete one to regenerate it.

  wiki/
  ├── mdwikify.toml       # Optional settings (see 'mdwikify gen-config')
  ├── faq.md              # Root page: offered for the menu
  ├── projects/           # Section: offered for the menu, gets index.md
  │   └── design_notes/   # Nested section: gets index.md
  │       └── storage.md
  └── images/             # No Markdown below: ignored")]
#[command(version)]
struct Cli {
    /// Wiki root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install the viewer and generate indexes, config.json and navigation.md
    Build {
        /// Accept every menu suggestion without asking
        #[arg(long)]
        yes: bool,
        /// Do not download the viewer
        #[arg(long)]
        offline: bool,
    },
    /// Generate missing index.md files only
    Index,
    /// Show what would be generated without writing anything
    Check,
    /// Print a stock mdwikify.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { yes, offline } => {
            let wiki_config = load_config(&cli.root)?;
            if offline {
                println!("==> Skipping viewer install (offline)");
            } else {
                println!("==> Checking viewer in {}", cli.root.display());
                let result = install::install_viewer(&cli.root, &wiki_config);
                println!("{}", output::format_install_result(&result));
            }

            println!("==> Scanning {}", cli.root.display());
            let plan = wiki::plan_wiki(&cli.root, &wiki_config)?;

            println!("==> Generating wiki files");
            let mut prompter: Box<dyn Prompter> = if yes {
                Box::new(AcceptAll)
            } else {
                Box::new(TerminalPrompter::stdio())
            };
            let report = wiki::build_wiki(&plan, &wiki_config, prompter.as_mut())?;
            output::print_build_report(&report);
        }
        Command::Index => {
            let wiki_config = load_config(&cli.root)?;
            println!("==> Scanning {}", cli.root.display());
            let plan = wiki::plan_wiki(&cli.root, &wiki_config)?;
            let report = wiki::generate_indexes(&plan, &wiki_config)?;
            output::print_build_report(&report);
        }
        Command::Check => {
            let wiki_config = load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let plan = wiki::plan_wiki(&cli.root, &wiki_config)?;
            output::print_plan(&plan);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `mdwikify.toml` from the wiki root and size the scan pool from it.
fn load_config(root: &std::path::Path) -> Result<config::WikiConfig, config::ConfigError> {
    let wiki_config = config::load_config(root)?;
    init_thread_pool(&wiki_config.processing);
    Ok(wiki_config)
}

/// Size the rayon pool used for classifying directories.
///
/// `max_processes` can only lower the thread count below the core count.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
