//! Query engine over an immutable, in-memory movie collection.

use std::collections::{BTreeMap, HashMap};

use movie_core::error::{MovieError, Result};
use movie_core::models::{Movie, MovieSortKey, StarPair, StarSortKey};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{StarAggregator, StarAverage};

// ── Result rows ───────────────────────────────────────────────────────────────

/// Number of movies released in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Number of movies listing one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Number of movies in which both stars of a pair appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoStarCount {
    pub pair: StarPair,
    pub count: usize,
}

// ── MovieAnalyzer ─────────────────────────────────────────────────────────────

/// Owns the loaded movies and answers the analytical queries.
///
/// The collection is fixed at construction; every query takes `&self` and
/// leaves it untouched, so a single analyzer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MovieAnalyzer {
    movies: Vec<Movie>,
}

impl MovieAnalyzer {
    /// Take ownership of `movies`, keeping their source order.
    pub fn new(movies: Vec<Movie>) -> Self {
        debug!("MovieAnalyzer: holding {} movies", movies.len());
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Movie count per release year, newest year first.
    pub fn count_by_year(&self) -> Vec<YearCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for movie in &self.movies {
            *counts.entry(movie.released_year).or_default() += 1;
        }
        counts
            .into_iter()
            .rev()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    }

    /// Movie count per genre; a movie counts once toward each genre it lists.
    ///
    /// Ordered by count descending, then genre ascending.
    pub fn count_by_genre(&self) -> Vec<GenreCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for genre in self.movies.iter().flat_map(|m| m.genres.iter()) {
            *counts.entry(genre.as_str()).or_default() += 1;
        }

        let mut result: Vec<GenreCount> = counts
            .into_iter()
            .map(|(genre, count)| GenreCount {
                genre: genre.to_string(),
                count,
            })
            .collect();
        result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
        result
    }

    /// How many movies each unordered pair of stars shares.
    ///
    /// Every movie contributes one count to each of its six star pairs.
    /// Ordered by count descending; equal counts keep ascending pair order.
    pub fn co_star_count(&self) -> Vec<CoStarCount> {
        let mut counts: BTreeMap<StarPair, usize> = BTreeMap::new();
        for pair in self.movies.iter().flat_map(|m| m.co_star_pairs()) {
            *counts.entry(pair).or_default() += 1;
        }

        let mut result: Vec<CoStarCount> = counts
            .into_iter()
            .map(|(pair, count)| CoStarCount { pair, count })
            .collect();
        // Stable sort over BTreeMap order leaves ties in pair order.
        result.sort_by(|a, b| b.count.cmp(&a.count));
        result
    }

    /// The `top_k` highest-ranked titles under `key`.
    ///
    /// Ties on the ranked value are broken by title ascending. Fails with
    /// [`MovieError::OutOfRange`] when `top_k` exceeds the movie count.
    pub fn top_movies(&self, top_k: usize, key: MovieSortKey) -> Result<Vec<String>> {
        let ranked = self.ranked_movies(key);
        take_top(ranked, top_k).map(|movies| movies.into_iter().map(|m| m.title.clone()).collect())
    }

    /// Every movie ordered under `key`, best first.
    pub fn ranked_movies(&self, key: MovieSortKey) -> Vec<&Movie> {
        let mut ranked: Vec<&Movie> = self.movies.iter().collect();
        match key {
            MovieSortKey::Runtime => ranked.sort_by(|a, b| {
                b.runtime
                    .cmp(&a.runtime)
                    .then_with(|| a.title.cmp(&b.title))
            }),
            MovieSortKey::Overview => ranked.sort_by(|a, b| {
                b.overview_len()
                    .cmp(&a.overview_len())
                    .then_with(|| a.title.cmp(&b.title))
            }),
        }
        ranked
    }

    /// The names of the `top_k` highest-ranked stars under `key`.
    ///
    /// Fails with [`MovieError::OutOfRange`] when `top_k` exceeds the number
    /// of eligible stars.
    pub fn top_stars(&self, top_k: usize, key: StarSortKey) -> Result<Vec<String>> {
        let ranked = self.star_averages(key);
        take_top(ranked, top_k).map(|stars| stars.into_iter().map(|s| s.name).collect())
    }

    /// Every eligible star with its average under `key`, best first.
    pub fn star_averages(&self, key: StarSortKey) -> Vec<StarAverage> {
        let ranking = StarAggregator::ranked(&self.movies, key);
        debug!(
            "MovieAnalyzer: ranked {} stars by {}",
            ranking.len(),
            key.as_str()
        );
        ranking
    }

    /// Titles listing `genre` with `imdb_rating >= min_rating` and
    /// `runtime <= max_runtime`, sorted ascending.
    pub fn search_movies(&self, genre: &str, min_rating: f32, max_runtime: u32) -> Vec<String> {
        let mut titles: Vec<String> = self
            .movies
            .iter()
            .filter(|m| {
                m.has_genre(genre) && m.imdb_rating >= min_rating && m.runtime <= max_runtime
            })
            .map(|m| m.title.clone())
            .collect();
        titles.sort();
        debug!(
            "MovieAnalyzer: search genre={} min_rating={} max_runtime={} matched {}",
            genre,
            min_rating,
            max_runtime,
            titles.len()
        );
        titles
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Keep the first `top_k` items, refusing requests past the end.
fn take_top<T>(mut ranked: Vec<T>, top_k: usize) -> Result<Vec<T>> {
    if top_k > ranked.len() {
        return Err(MovieError::OutOfRange {
            requested: top_k,
            available: ranked.len(),
        });
    }
    ranked.truncate(top_k);
    Ok(ranked)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
