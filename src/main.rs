#[macro_use]
extern crate log;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cinefeed::api::TmdbClient;
use cinefeed::app::models::{MovieListKind, DEFAULT_POSTER_SIZE};
use cinefeed::app::{
    HomeEvent, HomeIntent, HomeReducer, HomeState, LoadStatus, PageLoader, StateStore,
};
use cinefeed::settings::CatalogSettings;

#[derive(Parser, Debug)]
#[command(name = "cinefeed", version, about = "List upcoming and popular movies from TMDB")]
struct Args {
    /// Lists to load (upcoming, popular, top_rated, now_playing); defaults to the configured lists
    #[arg(short, long = "list", value_parser = parse_list)]
    lists: Vec<MovieListKind>,

    /// Number of pages to load per list
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Only print movies whose title contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Response language, e.g. en-US
    #[arg(long)]
    language: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print poster URLs
    #[arg(long)]
    posters: bool,
}

fn parse_list(value: &str) -> Result<MovieListKind, String> {
    MovieListKind::from_path_segment(value).ok_or_else(|| format!("unknown list '{value}'"))
}

fn print_state(state: &HomeState, lists: &[MovieListKind], posters: bool) {
    let query = state.search_text.to_lowercase();
    for &list in lists {
        let paged = state.list(list);
        let next = if paged.has_more() {
            format!("next page {}", paged.next_page)
        } else {
            "last page".to_string()
        };
        println!("== {} ({} movies, {})", list, paged.len(), next);
        paged
            .items
            .iter()
            .filter(|movie| query.is_empty() || movie.display_title().to_lowercase().contains(&query))
            .for_each(|movie| {
                let adult = if movie.is_adult == Some(true) { " [adult]" } else { "" };
                let date = movie.release_date.as_deref().unwrap_or("????-??-??");
                println!("{:>8}  {}  {}{}", movie.id, date, movie.display_title(), adult);
                if posters {
                    if let Some(url) = movie.poster_url(DEFAULT_POSTER_SIZE) {
                        println!("{:>8}  {}", "", url);
                    }
                }
            });
    }
}

async fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut settings = CatalogSettings::load(args.config.as_deref())?;
    if let Some(language) = args.language {
        settings.language = language;
    }
    let lists = if args.lists.is_empty() {
        settings.lists.clone()
    } else {
        args.lists
    };

    let client = TmdbClient::new(
        settings.api_key.clone(),
        settings.language.clone(),
        settings.api_host.clone(),
        settings.request_timeout(),
    )?;
    if !client.has_api_key() {
        warn!(
            "no API key configured, set {} or api_key in {}",
            cinefeed::settings::API_KEY_VAR,
            CatalogSettings::default_path().display()
        );
    }
    let store = Arc::new(StateStore::default());
    store.subscribe(|state: &HomeState| {
        if state.load_status == LoadStatus::Failed {
            warn!("a page failed to load");
        }
    });
    let reducer = HomeReducer::new(Arc::clone(&store), PageLoader::new(Arc::new(client)));

    if let Some(search) = args.search {
        reducer
            .handle_intent(HomeIntent::UpdateSearchText(search))
            .await;
    }

    let mut failures = 0;
    let mut count_failures = |events: Vec<HomeEvent>| {
        failures += events
            .iter()
            .filter(|event| matches!(event, HomeEvent::LoadFailed(_)))
            .count();
    };

    count_failures(reducer.load_initial(&lists).await);
    for _ in 1..args.pages {
        for &list in &lists {
            if !store.current().list(list).has_more() {
                debug!("no more pages for {}", list);
                continue;
            }
            count_failures(reducer.handle_intent(HomeIntent::FetchList(list)).await);
        }
    }

    print_state(&store.current(), &lists, args.posters);
    if failures > 0 {
        error!("{} page(s) could not be loaded", failures);
    }
    Ok(failures == 0)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
