use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use spordiff::{cli, config, error};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  after_help = "Defaults to scanning Liked Songs (Saved Tracks) only.",
  styles=styles(),
)]
struct Cli {
    /// Scan other playlists excluding Liked Songs
    #[clap(short, long)]
    other: bool,

    /// Scan all playlists, including your Liked Songs (Saved Tracks)
    #[clap(short, long)]
    all: bool,

    /// Favourite playlists only (including Liked Songs), as listed in favourite-playlists.json
    #[clap(short, long)]
    favourites: bool,

    /// Print all playlists and exit
    #[clap(short, long)]
    print: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let options = cli::ScanOptions::from_flags(cli.other, cli.all, cli.favourites);
    if let Err(e) = cli::run(options, cli.print).await {
        error!("{}", e);
    }
}
