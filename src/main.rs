use clap::{Parser, Subcommand};
use matbook::{config, generate, output, scan, watch};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matbook")]
#[command(version)]
#[command(about = "Static documentation generator for MATLAB textbook programs")]
#[command(long_about = "\
Static documentation generator for MATLAB textbook programs

Your filesystem is the data source. Files named under the textbook
convention are grouped into logical programs across formats and turned
into documentation pages plus a navigation index.

Drop folder structure:

  programs/
  ├── matbook.toml             # Generator config (optional)
  ├── README.md                # Introduction page source (optional)
  ├── Chapt1Exercise8.m        # Exercise program, chapter 1
  ├── Chapt3Exercise10.m       # One logical program in three formats:
  ├── Chapt3Exercise10.pdf     #   one index page, three detail pages
  ├── Chapt3Exercise10.tex
  ├── Chapt5Fig2a.m            # Figure program, variant a
  └── fermi.m                  # No convention match = utility program

Generated output:

  site/
  ├── docs/                    # One directory per chapter, one per program
  ├── static/                  # Copied originals, segmented by type tag
  └── sidebar.js               # Navigation index for the site shell

Supported formats: .m .tex .pdf .html .ipynb .txt — anything else is
skipped and reported. Filenames that don't match the convention but have
a supported extension are documented as utility programs.")]
struct Cli {
    /// Drop folder holding the program files
    #[arg(long, default_value = "programs", global = true)]
    source: PathBuf,

    /// Output directory for the generated site
    #[arg(long, default_value = "site", global = true)]
    output: PathBuf,

    /// Also scan subdirectories of the drop folder
    #[arg(long, global = true)]
    recursive: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one full generation pass (the default)
    Build,
    /// Rebuild automatically when the drop folder changes
    Watch,
    /// Remove everything a previous run generated
    Clean,
    /// Scan and report without writing any output
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::GenConfig::load(&cli.source, &cli.output, cli.recursive)?;

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => match generate::run(&config) {
            Ok(report) => {
                output::print_run_output(&report);
                println!("Site generated at {}", config.output.display());
            }
            // A missing drop folder is reported but does not fail the
            // process; callers watch the diagnostics, not the exit code.
            Err(generate::GenerateError::Scan(scan::ScanError::MissingRoot(path))) => {
                eprintln!("Source directory not found: {}", path.display());
                eprintln!("Nothing was generated.");
            }
            Err(e) => return Err(e.into()),
        },
        Command::Watch => watch::watch(&config)?,
        Command::Clean => {
            generate::clean(&config)?;
            println!("Cleaned {}", config.output.display());
        }
        Command::Check => {
            let manifest = scan::scan(&config.source, config.recursive)?;
            output::print_check_output(&manifest);
        }
    }

    Ok(())
}
