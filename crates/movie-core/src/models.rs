use crate::error::{MovieError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of billed cast members recorded per movie.
pub const STARS_PER_MOVIE: usize = 4;

/// One validated row of the movie dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Series title; doubles as the tie-break key in title-ordered rankings.
    pub title: String,
    /// Year the movie was released.
    pub released_year: i32,
    /// Certificate earned by the movie (may be empty).
    pub certificate: String,
    /// Total runtime in minutes.
    pub runtime: u32,
    /// Genres in source order; never empty.
    pub genres: Vec<String>,
    /// Rating on the IMDB site.
    pub imdb_rating: f32,
    /// Short plot summary (may be empty).
    pub overview: String,
    /// Meta score, absent when the source column is empty.
    #[serde(default)]
    pub meta_score: Option<u32>,
    /// Name of the director.
    pub director: String,
    /// Billed cast in source order, not deduplicated.
    pub stars: [String; STARS_PER_MOVIE],
    /// Total number of votes.
    pub no_of_votes: u64,
    /// Gross revenue, absent when the source column is empty.
    #[serde(default)]
    pub gross: Option<u64>,
}

impl Movie {
    /// `true` when `genre` is one of this movie's genres (exact match).
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Length of the overview in characters.
    pub fn overview_len(&self) -> usize {
        self.overview.chars().count()
    }

    /// Every unordered pair of stars in this movie, six in total.
    pub fn co_star_pairs(&self) -> impl Iterator<Item = StarPair> + '_ {
        (0..STARS_PER_MOVIE).flat_map(move |i| {
            (i + 1..STARS_PER_MOVIE).map(move |j| StarPair::new(&self.stars[i], &self.stars[j]))
        })
    }
}

/// An unordered pair of cast members.
///
/// The two names are stored in ascending order so `{A, B}` and `{B, A}`
/// compare, hash and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StarPair(String, String);

impl StarPair {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    /// The lexicographically smaller name.
    pub fn first(&self) -> &str {
        &self.0
    }

    /// The lexicographically larger name.
    pub fn second(&self) -> &str {
        &self.1
    }
}

impl fmt::Display for StarPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.0, self.1)
    }
}

// ── Sort keys ─────────────────────────────────────────────────────────────────

/// Ranking criterion for movie titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieSortKey {
    /// Longest runtime first.
    Runtime,
    /// Longest overview text first.
    Overview,
}

impl FromStr for MovieSortKey {
    type Err = MovieError;

    /// Case-insensitive construction from `"runtime"` or `"overview"`.
    ///
    /// Returns [`MovieError::UnknownSortKey`] for anything else.
    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "runtime" => Ok(MovieSortKey::Runtime),
            "overview" => Ok(MovieSortKey::Overview),
            other => Err(MovieError::UnknownSortKey(other.to_string())),
        }
    }
}

impl MovieSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieSortKey::Runtime => "runtime",
            MovieSortKey::Overview => "overview",
        }
    }
}

/// Ranking criterion for stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarSortKey {
    /// Highest average IMDB rating first.
    Rating,
    /// Highest average gross first; movies without a gross are ignored.
    Gross,
}

impl FromStr for StarSortKey {
    type Err = MovieError;

    /// Case-insensitive construction from `"rating"` or `"gross"`.
    ///
    /// Returns [`MovieError::UnknownSortKey`] for anything else.
    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "rating" => Ok(StarSortKey::Rating),
            "gross" => Ok(StarSortKey::Gross),
            other => Err(MovieError::UnknownSortKey(other.to_string())),
        }
    }
}

impl StarSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StarSortKey::Rating => "rating",
            StarSortKey::Gross => "gross",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
