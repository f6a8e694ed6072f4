mod app_service;
mod display_types;
mod render;

use app_service::AppService;
use clap::{Args, Parser, Subcommand};
use marquee_core::config::Config;
use marquee_core::omdb::OmdbClient;
use marquee_ui::stores::{MovieState, SortOrder};
use std::sync::Arc;
use tracing::{debug, error, info};

/// marquee - search OMDb from the terminal.
#[derive(Parser)]
#[command(name = "marquee")]
struct Cli {
    /// Print the store snapshot as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search movies by title.
    Search {
        query: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show the stand-in "popular" listing.
    Popular {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show full details for one IMDb id.
    Details { imdb_id: String },
    /// List the genres present in a search's results.
    Genres { query: String },
}

/// Sort and filter preferences applied to the result list.
#[derive(Args)]
struct ViewArgs {
    /// `title` or `year` (newest first). Anything else sorts by title.
    #[arg(long, default_value = "title", env = "MARQUEE_SORT")]
    sort: String,

    /// Only show titles released in (or running during) this year.
    #[arg(long)]
    year: Option<String>,

    /// Only show this type: movie, series or episode.
    #[arg(long = "type")]
    movie_type: Option<String>,

    /// Only show titles tagged with this genre.
    #[arg(long)]
    genre: Option<String>,
}

impl ViewArgs {
    /// Store the preferences. Returns whether a genre filter was requested,
    /// since that needs genres looked up per result.
    fn apply(self, service: &AppService) -> bool {
        service.set_sort_order(SortOrder::from(self.sort.as_str()));
        if let Some(year) = self.year {
            service.set_movie_year(year);
        }
        if let Some(movie_type) = self.movie_type {
            service.set_movie_type(movie_type);
        }
        match self.genre {
            Some(genre) => {
                service.set_selected_genre(genre);
                true
            }
            None => false,
        }
    }
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    // Default to info level if RUST_LOG not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_state(state: &MovieState, json: bool, text: fn(&MovieState) -> String) {
    if json {
        match serde_json::to_string_pretty(state) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Failed to serialize state: {}", e),
        }
    } else {
        print!("{}", text(state));
    }
}

#[tokio::main]
async fn main() {
    configure_logging();
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!("Using OMDb endpoint {}", config.omdb_base_url);

    let client = OmdbClient::from_config(&config);
    let service = AppService::new(Arc::new(client), config.popular_term.clone());

    // Trace every store transition at debug level
    let mut updates = service.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let (loading, results, error) = {
                let state = updates.borrow_and_update();
                (state.loading, state.movies.len(), state.error.clone())
            };
            debug!(loading, results, error = ?error, "store updated");
        }
    });

    let render_view: fn(&MovieState) -> String = match cli.command {
        Command::Search { query, view } => {
            let needs_genres = view.apply(&service);
            service.search_movies(&query).await;
            if needs_genres {
                service.load_genres().await;
            }
            render::render_results
        }
        Command::Popular { view } => {
            let needs_genres = view.apply(&service);
            service.get_popular_movies().await;
            if needs_genres {
                service.load_genres().await;
            }
            render::render_results
        }
        Command::Details { imdb_id } => {
            service.get_movie_details(&imdb_id).await;
            render::render_detail
        }
        Command::Genres { query } => {
            service.search_movies(&query).await;
            service.load_genres().await;
            render::render_genres
        }
    };

    let state = service.snapshot();
    print_state(&state, cli.json, render_view);
    if state.has_error() {
        std::process::exit(1);
    }
}
