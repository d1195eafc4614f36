use anyhow::Result;
use clap::Parser;
use reapack::commands::{self, Config, Selection};
use std::path::PathBuf;

/// reapack - package manager for REAPER scripts, effects and extensions
///
/// Reads a repository index and installs package files into the REAPER
/// resource directory.
///
/// Examples:
///   reapack list --index index.json
///   reapack install Tools/hello.lua --index index.json
#[derive(Parser, Debug)]
#[command(author, version = env!("REAPACK_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Install root directory (defaults to the REAPER resource directory; also via REAPACK_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "REAPACK_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub install_root: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the newest version of a package
    Latest(LatestArgs),

    /// Install a package into the install root
    Install(InstallArgs),

    /// List the packages of an index
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct IndexArgs {
    /// Index document (JSON)
    #[arg(long = "index", short = 'i', value_name = "FILE")]
    pub index: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct SelectionArgs {
    /// Consider prerelease versions (also via REAPACK_PRERELEASES)
    #[arg(long = "prerelease", env = "REAPACK_PRERELEASES")]
    pub prerelease: bool,

    /// Accept prereleases of this version's release line (repeatable)
    #[arg(long = "pin", value_name = "VERSION")]
    pub pins: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct LatestArgs {
    /// Package as "Category/name" or a bare name
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    #[command(flatten)]
    pub index: IndexArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Report whether this installed version can be updated
    #[arg(long = "installed", value_name = "VERSION")]
    pub installed: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Package as "Category/name" or a bare name
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    #[command(flatten)]
    pub index: IndexArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Install exactly this version
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Show the newest prerelease instead of the newest stable version
    #[arg(long = "prerelease", env = "REAPACK_PRERELEASES")]
    pub prerelease: bool,
}

impl SelectionArgs {
    fn into_selection(self, version: Option<String>) -> Selection {
        Selection {
            version,
            prereleases: self.prerelease,
            pins: self.pins,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(reapack::runtime::RealRuntime, cli.install_root);

    match cli.command {
        Commands::Latest(args) => {
            let selection = args.selection.into_selection(None);
            commands::latest(
                &config,
                &args.index.index,
                &args.package,
                &selection,
                args.installed.as_deref(),
            )?
        }
        Commands::Install(args) => {
            let selection = args.selection.into_selection(args.version);
            commands::install(&config, &args.index.index, &args.package, &selection)?
        }
        Commands::List(args) => commands::list(&config, &args.index.index, args.prerelease)?,
    }
    Ok(())
}
