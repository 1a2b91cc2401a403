use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use splocli::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Inspect or refresh the local library cache
    Library(LibraryOptions),

    /// Follow every artist found in your local library
    Follow(FollowOptions),

    #[clap(about = "Create a randomized playlist from your local library")]
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Inspect or refresh the local library cache",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct LibraryOptions {
    /// Filter listed artists
    #[clap(long)]
    pub search: Option<String>,

    /// Subcommands under `library` (e.g., `update`)
    #[command(subcommand)]
    pub command: Option<LibrarySubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibrarySubcommand {
    /// Update the library cache
    Update(LibraryUpdateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryUpdateOpts {
    /// Force a full rescan (bypass cache validity checks)
    #[clap(long)]
    pub rescan: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FollowOptions {
    /// Force a full rescan (bypass cache validity checks)
    #[clap(long)]
    pub rescan: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist name
    #[clap(long, default_value = "Random Local Library Jams")]
    name: String,

    /// Playlist description
    #[clap(
        long,
        default_value = "Randomly generated playlist from my local music library."
    )]
    description: String,

    /// Make the playlist public
    #[clap(long)]
    public: bool,

    /// Maximum number of tracks to add
    #[clap(long, default_value_t = 10_000)]
    tracks: usize,

    /// Maximum number of songs per artist
    #[clap(long = "per-artist", default_value_t = 3)]
    per_artist: usize,

    /// Force a full rescan (bypass cache validity checks)
    #[clap(long)]
    rescan: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            if let Err(e) = config::validate_auth() {
                error!("{}", e);
            }
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Library(opt) => {
            if let Err(e) = config::validate() {
                error!("{}", e);
            }
            match opt.command {
                Some(LibrarySubcommand::Update(u)) => cli::update_library(u.rescan).await,
                None => cli::list_library(opt.search).await,
            }
        }
        Command::Follow(opt) => {
            if let Err(e) = config::validate() {
                error!("{}", e);
            }
            cli::follow(opt.rescan).await
        }
        Command::Playlist(opt) => {
            if let Err(e) = config::validate() {
                error!("{}", e);
            }
            cli::playlist(cli::PlaylistParams {
                name: opt.name,
                description: opt.description,
                public: opt.public,
                tracks: opt.tracks,
                per_artist: opt.per_artist,
                rescan: opt.rescan,
            })
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
