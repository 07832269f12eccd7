//! Plain-text rendering of query results.

use std::fmt::Write;

use movie_core::formatting::{format_gross, format_number, format_runtime};
use movie_core::models::{Movie, MovieSortKey, StarSortKey};
use movie_data::aggregator::StarAverage;
use movie_data::analysis::AnalysisReport;
use movie_data::analyzer::{CoStarCount, GenreCount, YearCount};

pub fn year_counts(counts: &[YearCount]) -> String {
    let mut out = String::new();
    for row in counts {
        let _ = writeln!(out, "{:>6}  {}", row.year, row.count);
    }
    out
}

pub fn genre_counts(counts: &[GenreCount]) -> String {
    let width = counts.iter().map(|c| c.genre.len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in counts {
        let _ = writeln!(out, "{:<width$}  {}", row.genre, row.count, width = width);
    }
    out
}

pub fn co_star_counts(counts: &[CoStarCount]) -> String {
    let mut out = String::new();
    for row in counts {
        let _ = writeln!(out, "{:>4}  {}", row.count, row.pair);
    }
    out
}

/// Numbered movie list annotated with the value it was ranked by.
pub fn ranked_movies(movies: &[&Movie], key: MovieSortKey) -> String {
    let mut out = String::new();
    for (i, movie) in movies.iter().enumerate() {
        let value = match key {
            MovieSortKey::Runtime => format_runtime(movie.runtime),
            MovieSortKey::Overview => format!("{} chars", movie.overview_len()),
        };
        let _ = writeln!(out, "{:>3}. {} ({})", i + 1, movie.title, value);
    }
    out
}

/// Numbered star list with each star's average under `key`.
pub fn star_averages(stars: &[StarAverage], key: StarSortKey) -> String {
    let mut out = String::new();
    for (i, star) in stars.iter().enumerate() {
        let value = match key {
            StarSortKey::Rating => format_number(star.average, 2),
            StarSortKey::Gross => format_gross(Some(star.average as u64)),
        };
        let _ = writeln!(
            out,
            "{:>3}. {} ({} over {} movies)",
            i + 1,
            star.name,
            value,
            star.movies
        );
    }
    out
}

pub fn titles(titles: &[String]) -> String {
    let mut out = String::new();
    for title in titles {
        let _ = writeln!(out, "{}", title);
    }
    out
}

fn numbered(titles: &[String]) -> String {
    let mut out = String::new();
    for (i, title) in titles.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, title);
    }
    out
}

/// All report sections, one after another.
pub fn report(report: &AnalysisReport) -> String {
    let meta = &report.metadata;
    let criteria = &report.search.criteria;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Movies analysed: {} ({} rows skipped)\n",
        meta.movies_analyzed, meta.rows_skipped
    );
    let _ = writeln!(out, "== Movies per year ==\n{}", year_counts(&report.by_year));
    let _ = writeln!(out, "== Movies per genre ==\n{}", genre_counts(&report.by_genre));
    let _ = writeln!(out, "== Frequent co-stars ==\n{}", co_star_counts(&report.co_stars));
    let _ = writeln!(out, "== Longest runtime ==\n{}", numbered(&report.longest_runtime));
    let _ = writeln!(out, "== Longest overview ==\n{}", numbered(&report.longest_overview));
    let _ = writeln!(
        out,
        "== Stars by average rating ==\n{}",
        star_averages(&report.top_stars_by_rating, StarSortKey::Rating)
    );
    let _ = writeln!(
        out,
        "== Stars by average gross ==\n{}",
        star_averages(&report.top_stars_by_gross, StarSortKey::Gross)
    );
    let _ = write!(
        out,
        "== {} rated >= {} under {} ==\n{}",
        criteria.genre,
        format_number(f64::from(criteria.min_rating), 1),
        format_runtime(criteria.max_runtime),
        titles(&report.search.titles)
    );
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use movie_core::models::StarPair;

    fn movie(title: &str, runtime: u32, overview: &str) -> Movie {
        Movie {
            title: title.to_string(),
            released_year: 1999,
            certificate: "R".to_string(),
            runtime,
            genres: vec!["Drama".to_string()],
            imdb_rating: 8.8,
            overview: overview.to_string(),
            meta_score: None,
            director: "D".to_string(),
            stars: ["A", "B", "C", "D"].map(str::to_string),
            no_of_votes: 1,
            gross: None,
        }
    }

    #[test]
    fn test_year_counts_one_line_per_year() {
        let out = year_counts(&[
            YearCount { year: 2004, count: 31 },
            YearCount { year: 1999, count: 2 },
        ]);
        assert_eq!(out, "  2004  31\n  1999  2\n");
    }

    #[test]
    fn test_genre_counts_aligns_names() {
        let out = genre_counts(&[
            GenreCount { genre: "Drama".to_string(), count: 724 },
            GenreCount { genre: "War".to_string(), count: 51 },
        ]);
        assert_eq!(out, "Drama  724\nWar    51\n");
    }

    #[test]
    fn test_co_star_counts_shows_pair() {
        let out = co_star_counts(&[CoStarCount {
            pair: StarPair::new("Robert De Niro", "Joe Pesci"),
            count: 4,
        }]);
        assert_eq!(out, "   4  Joe Pesci & Robert De Niro\n");
    }

    #[test]
    fn test_ranked_movies_runtime() {
        let fight_club = movie("Fight Club", 139, "An insomniac office worker.");
        let out = ranked_movies(&[&fight_club], MovieSortKey::Runtime);
        assert_eq!(out, "  1. Fight Club (2h 19m)\n");
        let out = ranked_movies(&[&fight_club], MovieSortKey::Overview);
        assert_eq!(out, "  1. Fight Club (27 chars)\n");
    }

    #[test]
    fn test_star_averages_formats_by_key() {
        let stars = vec![StarAverage {
            name: "A".to_string(),
            average: 1_234_567.0,
            movies: 3,
        }];
        assert_eq!(
            star_averages(&stars, StarSortKey::Gross),
            "  1. A ($1,234,567 over 3 movies)\n"
        );
        let stars = vec![StarAverage {
            name: "A".to_string(),
            average: 7.0,
            movies: 2,
        }];
        assert_eq!(
            star_averages(&stars, StarSortKey::Rating),
            "  1. A (7.00 over 2 movies)\n"
        );
    }

    #[test]
    fn test_titles_empty() {
        assert_eq!(titles(&[]), "");
    }
}
