use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;

use catalog::{
    CatalogConfig, GenreId, MovieId, PosterSize, TmdbClient, genre_catalog, genre_label,
    poster_url,
};
use wizard::{DetailsLoader, Phase, SearchStatus, SelectionWizard, SwipeDirection};

/// RecoCine - find the right movie for tonight
#[derive(Parser)]
#[command(name = "reco-cine")]
#[command(about = "Genre-swipe movie recommendations from TMDB", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable genres
    Genres,

    /// Run a full wizard pass and print the ranked results
    Recommend {
        /// Genre ids to accept (up to 3, e.g. --accept 28 --accept 35)
        #[arg(long = "accept", required = true)]
        accept: Vec<GenreId>,

        /// Maximum runtime in minutes (10-300, step 10)
        #[arg(long, default_value = "120")]
        duration: u32,
    },

    /// Show details and watch offers for one movie
    Details {
        /// Catalog movie id
        #[arg(long)]
        movie_id: MovieId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Genres => handle_genres(),
        Commands::Recommend { accept, duration } => handle_recommend(accept, duration).await?,
        Commands::Details { movie_id } => handle_details(movie_id).await?,
    }

    Ok(())
}

fn catalog_client() -> Result<Arc<TmdbClient>> {
    let config = CatalogConfig::from_env()?;
    Ok(Arc::new(TmdbClient::new(config)))
}

/// Handle the 'genres' command
fn handle_genres() {
    println!("{}", "Selectable genres:".bold().blue());
    for genre in genre_catalog() {
        println!("  {:>6}  {}", genre.id.to_string().green(), genre.name);
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(accept: Vec<GenreId>, duration: u32) -> Result<()> {
    for id in &accept {
        if genre_label(*id).is_none() {
            return Err(anyhow!("unknown genre id {id} (see `reco-cine genres`)"));
        }
    }

    let client = catalog_client()?;
    let wizard = SelectionWizard::new(client);

    // Replay the accept list as swipe gestures; the deck runs back to
    // front, so acceptance order follows the deck, not the flag order.
    while wizard.phase() == Phase::PickingGenres {
        let Some(genre) = wizard.current_genre() else {
            break;
        };
        let direction = if accept.contains(&genre.id) {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        wizard.submit_genre_swipe(direction);
    }
    if wizard.phase() == Phase::PickingGenres {
        wizard
            .finish_genre_phase_early()
            .map_err(|e| anyhow!("{e}"))?;
    }

    let chosen: Vec<String> = wizard
        .chosen_genre_ids()
        .iter()
        .filter_map(|id| genre_label(*id))
        .map(str::to_string)
        .collect();
    println!(
        "{} {}",
        "Chosen genres:".bold(),
        chosen.join(", ")
    );

    wizard.set_duration(duration);
    println!("{} {} min", "Maximum runtime:".bold(), wizard.duration_minutes());

    let job = wizard
        .confirm_duration()
        .ok_or_else(|| anyhow!("search could not be armed"))?;
    wizard.run_search(job).await;

    match wizard.search_status() {
        Some(SearchStatus::Succeeded) => print_results(&wizard),
        Some(SearchStatus::Failed) => {
            println!("{}", "The catalog search failed; try again later.".red());
        }
        _ => {}
    }

    Ok(())
}

fn print_results(wizard: &SelectionWizard) {
    let results = wizard.results();
    if results.is_empty() {
        println!("{}", "No movies matched these criteria.".yellow());
        return;
    }

    println!("{}", "Recommendations:".bold().blue());
    for (rank, entry) in results.iter().enumerate() {
        let movie = &entry.movie;
        let genres = movie
            .genre_ids
            .iter()
            .filter_map(|id| genre_label(*id))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. {} [{}] - note {:.1}/10, {} genre match(es) (id {})",
            (rank + 1).to_string().green(),
            movie.title.bold(),
            genres,
            movie.vote_average,
            entry.genre_match_score,
            movie.id
        );
    }
}

/// Handle the 'details' command
async fn handle_details(movie_id: MovieId) -> Result<()> {
    let client = catalog_client()?;
    let loader = DetailsLoader::new(client);

    loader.open(movie_id).await?;
    let Some(active) = loader.active() else {
        return Err(anyhow!("no details available for movie {movie_id}"));
    };

    let details = &active.details;
    println!("{}", details.title.bold().blue());
    if let Some(date) = &details.release_date {
        println!("  Released: {date}");
    }
    if let Some(runtime) = details.runtime {
        println!("  Runtime: {runtime} min");
    }
    println!("  Rating: {:.1}/10", details.vote_average);
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        println!("  Genres: {}", names.join(", "));
    }
    if let Some(path) = &details.poster_path {
        println!("  Poster: {}", poster_url(path, PosterSize::W300));
    }
    if !details.overview.is_empty() {
        println!("\n{}", details.overview);
    }

    let providers = &active.providers;
    println!("\n{}", "Watch offers:".bold());
    print_offer_group("Streaming", &providers.flatrate);
    print_offer_group("Rent", &providers.rent);
    print_offer_group("Buy", &providers.buy);
    if !providers.has_any_offer() {
        println!("  {}", "No offers known in this region.".yellow());
    }

    Ok(())
}

fn print_offer_group(label: &str, entries: &[catalog::ProviderEntry]) {
    if entries.is_empty() {
        return;
    }
    let names: Vec<&str> = entries.iter().map(|p| p.provider_name.as_str()).collect();
    println!("  {}: {}", label.green(), names.join(", "));
}
