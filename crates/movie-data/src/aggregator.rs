//! Per-star aggregation of ratings and gross revenue.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use movie_core::models::{Movie, StarSortKey};
use serde::Serialize;

// ── Running totals ────────────────────────────────────────────────────────────

/// Running IMDB-rating total for one star.
#[derive(Debug, Clone, Default)]
pub struct RatingStats {
    pub sum: f64,
    pub count: u32,
}

impl RatingStats {
    pub fn add(&mut self, rating: f32) {
        self.sum += f64::from(rating);
        self.count += 1;
    }

    /// Arithmetic mean; `0.0` when nothing has been added.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / f64::from(self.count)
    }
}

/// Running gross total for one star, over movies with a known gross only.
#[derive(Debug, Clone, Default)]
pub struct GrossStats {
    pub sum: u64,
    pub count: u32,
}

impl GrossStats {
    pub fn add(&mut self, gross: u64) {
        self.sum += gross;
        self.count += 1;
    }

    /// Whole-dollar mean (integer division, truncated toward zero).
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum / u64::from(self.count)) as f64
    }
}

// ── StarAverage ───────────────────────────────────────────────────────────────

/// One row of a star ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarAverage {
    pub name: String,
    pub average: f64,
    /// Movies that contributed to `average`.
    pub movies: u32,
}

// ── StarAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that folds a movie list into per-star statistics.
pub struct StarAggregator;

impl StarAggregator {
    /// Rating totals for every star.
    ///
    /// A star listed in more than one slot of the same movie is counted once
    /// for that movie.
    pub fn by_rating(movies: &[Movie]) -> BTreeMap<String, RatingStats> {
        let mut map: BTreeMap<String, RatingStats> = BTreeMap::new();
        for movie in movies {
            for star in distinct_stars(movie) {
                map.entry(star.to_string())
                    .or_default()
                    .add(movie.imdb_rating);
            }
        }
        map
    }

    /// Gross totals for every star with at least one movie of known gross.
    ///
    /// Movies without a gross value contribute to neither sum nor count, so a
    /// star who only appears in such movies is absent from the result.
    pub fn by_gross(movies: &[Movie]) -> BTreeMap<String, GrossStats> {
        let mut map: BTreeMap<String, GrossStats> = BTreeMap::new();
        for movie in movies {
            let Some(gross) = movie.gross else {
                continue;
            };
            for star in distinct_stars(movie) {
                map.entry(star.to_string()).or_default().add(gross);
            }
        }
        map
    }

    /// Stars ranked under `key`: average descending, then name ascending.
    pub fn ranked(movies: &[Movie], key: StarSortKey) -> Vec<StarAverage> {
        let mut ranking: Vec<StarAverage> = match key {
            StarSortKey::Rating => Self::by_rating(movies)
                .into_iter()
                .map(|(name, stats)| StarAverage {
                    name,
                    average: stats.average(),
                    movies: stats.count,
                })
                .collect(),
            StarSortKey::Gross => Self::by_gross(movies)
                .into_iter()
                .map(|(name, stats)| StarAverage {
                    name,
                    average: stats.average(),
                    movies: stats.count,
                })
                .collect(),
        };
        ranking.sort_by(compare_ranked);
        ranking
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

fn compare_ranked(a: &StarAverage, b: &StarAverage) -> Ordering {
    b.average
        .total_cmp(&a.average)
        .then_with(|| a.name.cmp(&b.name))
}

/// The movie's stars with repeated names removed, in slot order.
fn distinct_stars(movie: &Movie) -> impl Iterator<Item = &str> {
    let mut seen: HashSet<&str> = HashSet::new();
    movie
        .stars
        .iter()
        .map(String::as_str)
        .filter(move |s| seen.insert(*s))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
