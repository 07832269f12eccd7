//! CSV loading for the movie dataset.
//!
//! Reads the IMDB top-1000 layout (one header line, sixteen columns per row)
//! and converts each row into a [`Movie`]. Rows that cannot be converted are
//! logged and skipped; the rest are returned in source order.

use std::io::BufRead;
use std::path::Path;

use movie_core::error::{MovieError, Result};
use movie_core::models::{Movie, STARS_PER_MOVIE};
use regex::Regex;
use tracing::{debug, warn};

/// Number of columns every data row must provide.
pub const EXPECTED_COLUMNS: usize = 16;

// Column positions; column 0 (poster link) is ignored.
const COL_TITLE: usize = 1;
const COL_YEAR: usize = 2;
const COL_CERTIFICATE: usize = 3;
const COL_RUNTIME: usize = 4;
const COL_GENRE: usize = 5;
const COL_RATING: usize = 6;
const COL_OVERVIEW: usize = 7;
const COL_META_SCORE: usize = 8;
const COL_DIRECTOR: usize = 9;
const COL_FIRST_STAR: usize = 10;
const COL_VOTES: usize = 14;
const COL_GROSS: usize = 15;

// ── LoadedDataset ─────────────────────────────────────────────────────────────

/// Movies read from one file plus bookkeeping about the rows seen.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    /// Successfully parsed movies, in row order.
    pub movies: Vec<Movie>,
    /// Non-blank data rows encountered (header excluded).
    pub rows_read: usize,
    /// Rows dropped because they could not be parsed.
    pub rows_skipped: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every movie from the CSV file at `path`.
///
/// Fails only when the file cannot be read or has no header line; malformed
/// data rows are skipped with a warning.
pub fn load_movies(path: &Path) -> Result<LoadedDataset> {
    let file = std::fs::File::open(path).map_err(|source| MovieError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_movies(std::io::BufReader::new(file))?
        .ok_or_else(|| MovieError::EmptyDataset(path.to_path_buf()))?;

    debug!(
        "File {}: {} rows read, {} skipped, {} movies",
        path.display(),
        dataset.rows_read,
        dataset.rows_skipped,
        dataset.movies.len()
    );
    Ok(dataset)
}

/// Parse movies from any buffered source.
///
/// Returns `Ok(None)` when the source has no header line at all.
pub fn read_movies<R: BufRead>(reader: R) -> Result<Option<LoadedDataset>> {
    let parser = RowParser::new();
    let mut lines = reader.lines();

    if lines.next().transpose()?.is_none() {
        return Ok(None);
    }

    let mut dataset = LoadedDataset::default();
    for (index, line_result) in lines.enumerate() {
        // Header is line 1.
        let line_no = index + 2;
        let line = line_result?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        dataset.rows_read += 1;
        let fields = split_record(line);
        match parser.parse(&fields, line_no) {
            Ok(movie) => dataset.movies.push(movie),
            Err(e) => {
                warn!("Skipping row: {}", e);
                dataset.rows_skipped += 1;
            }
        }
    }

    Ok(Some(dataset))
}

/// Split one CSV line on commas that sit outside double quotes.
///
/// Surrounding quotes are removed and doubled quotes (`""`) inside a quoted
/// field become a single `"`.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(EXPECTED_COLUMNS);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

// ── RowParser ─────────────────────────────────────────────────────────────────

/// Converts split CSV fields into a [`Movie`].
pub struct RowParser {
    runtime_re: Regex,
}

impl Default for RowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RowParser {
    pub fn new() -> Self {
        Self {
            runtime_re: Regex::new(r"^\s*(\d+)\s*(?:min)?\s*$").expect("regex is valid"),
        }
    }

    /// Build a movie from the fields of data row `line`.
    pub fn parse(&self, fields: &[String], line: usize) -> Result<Movie> {
        if fields.len() < EXPECTED_COLUMNS {
            return Err(MovieError::MalformedRow {
                line,
                reason: format!(
                    "expected {} fields, found {}",
                    EXPECTED_COLUMNS,
                    fields.len()
                ),
            });
        }

        let title = fields[COL_TITLE].clone();
        if title.trim().is_empty() {
            return Err(invalid(line, "title", &title));
        }

        let genres: Vec<String> = fields[COL_GENRE]
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        if genres.is_empty() {
            return Err(invalid(line, "genre", &fields[COL_GENRE]));
        }

        let stars: [String; STARS_PER_MOVIE] =
            std::array::from_fn(|i| fields[COL_FIRST_STAR + i].clone());

        Ok(Movie {
            title,
            released_year: parse_number(&fields[COL_YEAR], line, "released year")?,
            certificate: fields[COL_CERTIFICATE].clone(),
            runtime: self.parse_runtime(&fields[COL_RUNTIME], line)?,
            genres,
            imdb_rating: parse_number(&fields[COL_RATING], line, "IMDB rating")?,
            overview: fields[COL_OVERVIEW].clone(),
            meta_score: parse_optional(&fields[COL_META_SCORE], line, "meta score")?,
            director: fields[COL_DIRECTOR].clone(),
            stars,
            no_of_votes: parse_number(&strip_grouping(&fields[COL_VOTES]), line, "vote count")?,
            gross: parse_optional(&fields[COL_GROSS], line, "gross")?,
        })
    }

    /// Extract minutes from values such as `"142 min"`.
    fn parse_runtime(&self, raw: &str, line: usize) -> Result<u32> {
        self.runtime_re
            .captures(raw)
            .and_then(|cap| cap[1].parse::<u32>().ok())
            .ok_or_else(|| invalid(line, "runtime", raw))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn invalid(line: usize, field: &'static str, value: &str) -> MovieError {
    MovieError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, line: usize, field: &'static str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| invalid(line, field, raw))
}

/// An empty column means the value is unknown, never zero.
fn parse_optional<T: std::str::FromStr>(
    raw: &str,
    line: usize,
    field: &'static str,
) -> Result<Option<T>> {
    let cleaned = strip_grouping(raw);
    if cleaned.trim().is_empty() {
        return Ok(None);
    }
    parse_number(&cleaned, line, field).map(Some)
}

/// Drop thousands separators and stray quotes, e.g. `"28,341,469"`.
fn strip_grouping(raw: &str) -> String {
    raw.chars().filter(|c| *c != ',' && *c != '"').collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "Poster_Link,Series_Title,Released_Year,Certificate,Runtime,Genre,\
IMDB_Rating,Overview,Meta_score,Director,Star1,Star2,Star3,Star4,No_of_Votes,Gross";

    const SHAWSHANK: &str = "https://img/1.jpg,The Shawshank Redemption,1994,A,142 min,Drama,9.3,\
\"Two imprisoned men bond over a number of years, finding solace.\",80,Frank Darabont,Tim Robbins,\
Morgan Freeman,Bob Gunton,William Sadler,2343110,\"28,341,469\"";

    const GODFATHER: &str = "https://img/2.jpg,The Godfather,1972,A,175 min,\"Crime, Drama\",9.2,\
\"An organized crime dynasty's aging patriarch transfers control.\",100,Francis Ford Coppola,\
Marlon Brando,Al Pacino,James Caan,Diane Keaton,1620367,\"134,966,411\"";

    const NO_NUMBERS: &str = "https://img/3.jpg,Drishyam,2013,U,160 min,\"Crime, Drama, Thriller\",\
8.3,A man goes to extreme lengths.,,Jeethu Joseph,Mohanlal,Meena,Asha Sharath,Ansiba,30722,";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn parse_line(line: &str) -> Result<Movie> {
        RowParser::new().parse(&split_record(line), 2)
    }

    // ── split_record ──────────────────────────────────────────────────────────

    #[test]
    fn test_split_record_plain_fields() {
        assert_eq!(split_record("a,b,,c"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_split_record_quoted_commas() {
        assert_eq!(
            split_record("x,\"Crime, Drama\",\"1,234\""),
            vec!["x", "Crime, Drama", "1,234"]
        );
    }

    #[test]
    fn test_split_record_escaped_quotes() {
        assert_eq!(
            split_record("\"He said \"\"run\"\"\",end"),
            vec!["He said \"run\"", "end"]
        );
    }

    #[test]
    fn test_split_record_trailing_empty_field() {
        let fields = split_record("a,b,");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2], "");
    }

    // ── RowParser ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_full_row() {
        let movie = parse_line(GODFATHER).unwrap();
        assert_eq!(movie.title, "The Godfather");
        assert_eq!(movie.released_year, 1972);
        assert_eq!(movie.certificate, "A");
        assert_eq!(movie.runtime, 175);
        assert_eq!(movie.genres, vec!["Crime", "Drama"]);
        assert_eq!(movie.imdb_rating, 9.2);
        assert!(movie.overview.starts_with("An organized crime"));
        assert_eq!(movie.meta_score, Some(100));
        assert_eq!(movie.director, "Francis Ford Coppola");
        assert_eq!(
            movie.stars,
            ["Marlon Brando", "Al Pacino", "James Caan", "Diane Keaton"].map(str::to_string)
        );
        assert_eq!(movie.no_of_votes, 1_620_367);
        assert_eq!(movie.gross, Some(134_966_411));
    }

    #[test]
    fn test_parse_overview_with_commas() {
        let movie = parse_line(SHAWSHANK).unwrap();
        assert_eq!(
            movie.overview,
            "Two imprisoned men bond over a number of years, finding solace."
        );
        assert_eq!(movie.gross, Some(28_341_469));
    }

    #[test]
    fn test_parse_empty_numbers_are_none() {
        let movie = parse_line(NO_NUMBERS).unwrap();
        assert_eq!(movie.meta_score, None);
        assert_eq!(movie.gross, None);
        assert_eq!(movie.genres, vec!["Crime", "Drama", "Thriller"]);
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = parse_line("a,b,c").unwrap_err();
        assert!(matches!(err, MovieError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_parse_invalid_year() {
        let line = GODFATHER.replace(",1972,", ",PG,");
        let err = parse_line(&line).unwrap_err();
        assert!(matches!(
            err,
            MovieError::InvalidField {
                field: "released year",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_invalid_runtime() {
        let line = GODFATHER.replace("175 min", "long");
        let err = parse_line(&line).unwrap_err();
        assert!(matches!(err, MovieError::InvalidField { field: "runtime", .. }));
    }

    #[test]
    fn test_parse_runtime_without_unit() {
        let line = GODFATHER.replace("175 min", "175");
        assert_eq!(parse_line(&line).unwrap().runtime, 175);
    }

    // ── load_movies ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_movies_keeps_row_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "movies.csv", &[HEADER, SHAWSHANK, GODFATHER, NO_NUMBERS]);

        let dataset = load_movies(&path).unwrap();
        let titles: Vec<&str> = dataset.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["The Shawshank Redemption", "The Godfather", "Drishyam"]);
        assert_eq!(dataset.rows_read, 3);
        assert_eq!(dataset.rows_skipped, 0);
    }

    #[test]
    fn test_load_movies_skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let bad_year = GODFATHER.replace(",1972,", ",PG,");
        let path = write_csv(
            dir.path(),
            "movies.csv",
            &[HEADER, SHAWSHANK, "broken,row", &bad_year, "", NO_NUMBERS],
        );

        let dataset = load_movies(&path).unwrap();
        assert_eq!(dataset.movies.len(), 2);
        assert_eq!(dataset.rows_read, 4);
        assert_eq!(dataset.rows_skipped, 2);
    }

    #[test]
    fn test_load_movies_header_only() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "movies.csv", &[HEADER]);
        let dataset = load_movies(&path).unwrap();
        assert!(dataset.movies.is_empty());
        assert_eq!(dataset.rows_read, 0);
    }

    #[test]
    fn test_load_movies_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "empty.csv", &[]);
        let err = load_movies(&path).unwrap_err();
        assert!(matches!(err, MovieError::EmptyDataset(p) if p == path));
    }

    #[test]
    fn test_load_movies_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let err = load_movies(&path).unwrap_err();
        assert!(matches!(err, MovieError::FileRead { .. }));
    }

    #[test]
    fn test_read_movies_handles_crlf() {
        let input = format!("{HEADER}\r\n{GODFATHER}\r\n");
        let dataset = read_movies(input.as_bytes()).unwrap().unwrap();
        assert_eq!(dataset.movies.len(), 1);
        assert_eq!(dataset.movies[0].gross, Some(134_966_411));
    }
}
