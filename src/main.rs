use std::path::PathBuf;

use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tierlistify::{
    cli::{self, TierListOptions},
    config, error,
    spotify::Credentials,
    utils, warning,
};

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
  styles=styles(),
)]
struct Cli {
    /// Playlist ID (also accepted as -pid)
    #[clap(long = "playlistid", value_name = "ID")]
    playlist_id: Option<String>,

    /// Playlist share URL (also accepted as -url)
    #[clap(long = "playlisturl", value_name = "URL")]
    playlist_url: Option<String>,

    /// Client ID of your Spotify app [env: SPOTIFY_API_AUTH_CLIENT_ID]
    #[clap(short = 'c', long = "clientid")]
    client_id: Option<String>,

    /// Secret key of your Spotify app [env: SPOTIFY_API_AUTH_CLIENT_SECRET]
    #[clap(short = 's', long = "secret")]
    secret: Option<String>,

    /// Only save the artwork of this track into album_artwork/
    #[clap(
        short = 't',
        long = "trackid",
        value_name = "ID",
        conflicts_with_all = ["playlist_id", "playlist_url"]
    )]
    track_id: Option<String>,

    /// Render the page from this template instead of the built-in one
    #[clap(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Where the artwork folder and the page are created
    #[clap(short = 'o', long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Do not open the page in the browser
    #[clap(long)]
    no_open: bool,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_args() -> Cli {
    let args = utils::expand_legacy_flags(std::env::args_os());
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn run(cli: Cli) -> tierlistify::Result<()> {
    let credentials = Credentials::resolve(cli.client_id, cli.secret)?;

    if let Some(track_id) = cli.track_id {
        cli::track_artwork(credentials, &track_id, &cli.output_dir)?;
        return Ok(());
    }

    let opts = TierListOptions {
        playlist_id: cli.playlist_id,
        playlist_url: cli.playlist_url,
        template: cli.template,
        output_dir: cli.output_dir,
        open: !cli.no_open,
    };
    cli::tier_list(credentials, &opts)?;
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = parse_args();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli) {
        error!("{}", e);
    }
}
