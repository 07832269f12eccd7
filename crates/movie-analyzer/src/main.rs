mod bootstrap;
mod render;

use anyhow::{Context, Result};
use movie_core::models::{MovieSortKey, StarSortKey};
use movie_core::settings::{Command, Settings};
use movie_data::analysis::{analyze_dataset, ReportOptions, SearchCriteria};
use movie_data::analyzer::MovieAnalyzer;
use movie_data::reader::load_movies;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Movie Analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Dataset: {}, format: {}",
        settings.dataset.display(),
        settings.format
    );

    let output = run(&settings)?;
    print!("{}", output);
    Ok(())
}

/// Execute the selected subcommand and return what should be printed.
fn run(settings: &Settings) -> Result<String> {
    let json = settings.is_json();

    match &settings.command {
        Command::Years => {
            let counts = load_analyzer(settings)?.count_by_year();
            if json {
                to_json(&counts)
            } else {
                Ok(render::year_counts(&counts))
            }
        }

        Command::Genres => {
            let counts = load_analyzer(settings)?.count_by_genre();
            if json {
                to_json(&counts)
            } else {
                Ok(render::genre_counts(&counts))
            }
        }

        Command::CoStars { limit } => {
            let mut counts = load_analyzer(settings)?.co_star_count();
            if let Some(limit) = limit {
                counts.truncate(*limit);
            }
            if json {
                to_json(&counts)
            } else {
                Ok(render::co_star_counts(&counts))
            }
        }

        Command::TopMovies { by, top } => {
            let key: MovieSortKey = by.parse()?;
            let analyzer = load_analyzer(settings)?;
            let titles = analyzer.top_movies(*top, key)?;
            if json {
                to_json(&titles)
            } else {
                let ranked = analyzer.ranked_movies(key);
                Ok(render::ranked_movies(&ranked[..titles.len()], key))
            }
        }

        Command::TopStars { by, top } => {
            let key: StarSortKey = by.parse()?;
            let analyzer = load_analyzer(settings)?;
            let names = analyzer.top_stars(*top, key)?;
            if json {
                to_json(&names)
            } else {
                let averages = analyzer.star_averages(key);
                Ok(render::star_averages(&averages[..names.len()], key))
            }
        }

        Command::Search {
            genre,
            min_rating,
            max_runtime,
        } => {
            let titles = load_analyzer(settings)?.search_movies(genre, *min_rating, *max_runtime);
            if json {
                to_json(&titles)
            } else {
                Ok(render::titles(&titles))
            }
        }

        Command::Report {
            top,
            genre,
            min_rating,
            max_runtime,
        } => {
            let options = ReportOptions {
                top_k: *top,
                co_star_limit: *top,
                search: SearchCriteria {
                    genre: genre.clone(),
                    min_rating: *min_rating,
                    max_runtime: *max_runtime,
                },
            };
            let report = analyze_dataset(&settings.dataset, &options)
                .with_context(|| format!("analysing {}", settings.dataset.display()))?;
            if json {
                to_json(&report)
            } else {
                Ok(render::report(&report))
            }
        }
    }
}

/// Load the configured dataset into an analyzer.
fn load_analyzer(settings: &Settings) -> Result<MovieAnalyzer> {
    let dataset = load_movies(&settings.dataset)
        .with_context(|| format!("loading {}", settings.dataset.display()))?;
    if dataset.rows_skipped > 0 {
        tracing::warn!(
            "{} of {} rows could not be parsed and were skipped",
            dataset.rows_skipped,
            dataset.rows_read
        );
    }
    Ok(MovieAnalyzer::new(dataset.movies))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
