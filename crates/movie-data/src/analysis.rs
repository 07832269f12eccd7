//! Full-report pipeline for the movie analyzer.
//!
//! Runs every query over one dataset and bundles the answers, plus timing
//! metadata, into a single serialisable [`AnalysisReport`].

use std::path::Path;

use chrono::Utc;
use movie_core::error::Result;
use movie_core::models::{MovieSortKey, StarSortKey};
use serde::Serialize;
use tracing::info;

use crate::aggregator::StarAverage;
use crate::analyzer::{CoStarCount, GenreCount, MovieAnalyzer, YearCount};
use crate::reader::load_movies;

// ── Options ───────────────────────────────────────────────────────────────────

/// Filter used for the report's search section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCriteria {
    pub genre: String,
    pub min_rating: f32,
    pub max_runtime: u32,
}

/// Knobs for [`build_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Length of each top-K list; clamped to what the dataset can supply.
    pub top_k: usize,
    /// Number of co-star pairs to keep.
    pub co_star_limit: usize,
    pub search: SearchCriteria,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            co_star_limit: 10,
            search: SearchCriteria {
                genre: "Drama".to_string(),
                min_rating: 8.0,
                max_runtime: 150,
            },
        }
    }
}

// ── Report types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of movies the queries ran over.
    pub movies_analyzed: usize,
    /// Dataset rows dropped by the loader, when the report came from a file.
    pub rows_skipped: usize,
    /// Wall-clock seconds spent loading the dataset.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent running the queries.
    pub query_time_seconds: f64,
}

/// Search filter and its matching titles.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSection {
    pub criteria: SearchCriteria,
    pub titles: Vec<String>,
}

/// The complete output of [`build_report`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub by_year: Vec<YearCount>,
    pub by_genre: Vec<GenreCount>,
    pub co_stars: Vec<CoStarCount>,
    pub longest_runtime: Vec<String>,
    pub longest_overview: Vec<String>,
    pub top_stars_by_rating: Vec<StarAverage>,
    pub top_stars_by_gross: Vec<StarAverage>,
    pub search: SearchSection,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run every query over `analyzer`.
pub fn build_report(analyzer: &MovieAnalyzer, options: &ReportOptions) -> Result<AnalysisReport> {
    let query_start = std::time::Instant::now();

    let by_year = analyzer.count_by_year();
    let by_genre = analyzer.count_by_genre();

    let mut co_stars = analyzer.co_star_count();
    co_stars.truncate(options.co_star_limit);

    let movie_k = options.top_k.min(analyzer.len());
    let longest_runtime = analyzer.top_movies(movie_k, MovieSortKey::Runtime)?;
    let longest_overview = analyzer.top_movies(movie_k, MovieSortKey::Overview)?;

    let mut top_stars_by_rating = analyzer.star_averages(StarSortKey::Rating);
    top_stars_by_rating.truncate(options.top_k);
    let mut top_stars_by_gross = analyzer.star_averages(StarSortKey::Gross);
    top_stars_by_gross.truncate(options.top_k);

    let criteria = options.search.clone();
    let titles = analyzer.search_movies(&criteria.genre, criteria.min_rating, criteria.max_runtime);

    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        movies_analyzed: analyzer.len(),
        rows_skipped: 0,
        load_time_seconds: 0.0,
        query_time_seconds: query_start.elapsed().as_secs_f64(),
    };

    Ok(AnalysisReport {
        metadata,
        by_year,
        by_genre,
        co_stars,
        longest_runtime,
        longest_overview,
        top_stars_by_rating,
        top_stars_by_gross,
        search: SearchSection { criteria, titles },
    })
}

/// Load the dataset at `path` and build its report.
pub fn analyze_dataset(path: &Path, options: &ReportOptions) -> Result<AnalysisReport> {
    let load_start = std::time::Instant::now();
    let dataset = load_movies(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let rows_skipped = dataset.rows_skipped;
    let analyzer = MovieAnalyzer::new(dataset.movies);
    let mut report = build_report(&analyzer, options)?;
    report.metadata.rows_skipped = rows_skipped;
    report.metadata.load_time_seconds = load_time;

    info!(
        "Analyzed {} movies from {} ({} rows skipped)",
        report.metadata.movies_analyzed,
        path.display(),
        rows_skipped
    );
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
