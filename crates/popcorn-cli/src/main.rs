use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, convert, search, watched};
use popcorn_config::PathManager;

mod commands;
mod expander;
mod logging;
mod output;
mod terminal;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "popcorn - search movies, keep a list of what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie database by title. Queries shorter than the configured minimum (3 letters by default) are rejected without contacting the API.")]
    Search {
        /// Title to search for (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show full details for one movie
    Show {
        /// IMDb id, e.g. tt1375666
        id: String,

        /// Print the whole plot instead of the first few words
        #[arg(long, action = ArgAction::SetTrue)]
        full_plot: bool,
    },
    /// Add a movie to your watched list
    #[command(long_about = "Fetch a movie's details and add it to your watched list with your own rating. Movies already on the list are left untouched.")]
    Add {
        /// IMDb id, e.g. tt1375666
        id: String,

        /// Your rating from 0 to 10 (prompts if omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=10))]
        rating: Option<u8>,
    },
    /// Remove a movie from your watched list
    Remove {
        /// IMDb id of the watched entry
        id: String,
    },
    /// List watched movies with averages
    Watched,
    /// Interactive search session
    #[command(long_about = "Start an interactive session. Type a query and press enter to search; typing a new query while a search is running cancels it. Type :help for the list of commands.")]
    Browse,
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert
        amount: f64,

        /// Source currency code (e.g. USD)
        #[arg(long, default_value = "USD")]
        from: String,

        /// Target currency code (e.g. EUR)
        #[arg(long)]
        to: String,
    },
    /// Manage configuration and the API key
    #[command(long_about = "Manage configuration and credentials. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    Clear {
        /// Clear the watched list and stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the OMDb API key
    #[command(long_about = "Store the OMDb API key in the credentials file. The POPCORN_OMDB_API_KEY environment variable, when set, takes precedence.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },

    /// Write a config file with default values
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = commands::load_config()
        .ok()
        .and_then(|c| c.logging.file)
        .map(|file| PathManager::default().log_file(&file));
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(query.join(" "), &output).await,
        Commands::Show { id, full_plot } => search::run_show(id, full_plot, &output).await,
        Commands::Add { id, rating } => watched::run_add(id, rating, &output).await,
        Commands::Remove { id } => watched::run_remove(id, &output).await,
        Commands::Watched => watched::run_watched(&output).await,
        Commands::Browse => browse::run_browse(&output).await,
        Commands::Convert { amount, from, to } => convert::run_convert(amount, from, to, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { all, watched, credentials } => clear::run_clear(all, watched, credentials, &output).await,
    }
}
