use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use luckyball_core::Draw;

/// The fixed schema every load normalizes to. "Power Play" is missing from
/// older eras of the source file; a missing schema column yields absent
/// values on every record instead of an error.
pub const EXPECTED_COLUMNS: [&str; 11] = [
    "Game Name",
    "Month",
    "Day",
    "Year",
    "Num1",
    "Num2",
    "Num3",
    "Num4",
    "Num5",
    "Powerball",
    "Power Play",
];

// Positions within EXPECTED_COLUMNS.
const COL_GAME: usize = 0;
const COL_MONTH: usize = 1;
const COL_DAY: usize = 2;
const COL_YEAR: usize = 3;
const COL_NUM1: usize = 4;
const COL_POWERBALL: usize = 9;
const COL_POWER_PLAY: usize = 10;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read draw history {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Parse the cached draw file into a draw table.
///
/// Fails only when the file cannot be opened or read as delimited text;
/// per-record problems (bad dates, blank cells) degrade to absent fields.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Draw>, HistoryError> {
    let path = path.as_ref();
    let read_err = |source| HistoryError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    // Map each schema column to its position in this file's header row, if
    // any; absent columns stay unmapped.
    let headers = reader.headers().map_err(read_err)?.clone();
    let columns: Vec<Option<usize>> = EXPECTED_COLUMNS
        .iter()
        .map(|name| headers.iter().position(|header| header.trim() == *name))
        .collect();

    let mut draws = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;

        let field = |schema_idx: usize| -> Option<&str> {
            columns[schema_idx]
                .and_then(|col| record.get(col))
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let mut primary = [None; 5];
        for (slot, schema_idx) in primary.iter_mut().zip(COL_NUM1..COL_NUM1 + 5) {
            *slot = parse_number(field(schema_idx));
        }

        draws.push(Draw {
            game: field(COL_GAME).unwrap_or_default().to_owned(),
            date: compose_date(field(COL_YEAR), field(COL_MONTH), field(COL_DAY)),
            primary,
            secondary: parse_number(field(COL_POWERBALL)),
            power_play: field(COL_POWER_PLAY).map(str::to_owned),
        });
    }

    log::debug!("loaded {} draws from {}", draws.len(), path.display());
    Ok(draws)
}

fn parse_number(value: Option<&str>) -> Option<u8> {
    value.and_then(|v| v.parse().ok())
}

/// Compose year/month/day cells into a date; anything that does not form a
/// valid calendar date is absent for that record only.
fn compose_date(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        year?.parse().ok()?,
        month?.parse().ok()?,
        day?.parse().ok()?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let temp_dir = std::env::temp_dir().join("luckyball_test_history");
        std::fs::create_dir_all(&temp_dir).expect("Failed to create temp directory");
        let path = temp_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    #[test]
    fn loads_the_full_schema() {
        let path = write_fixture(
            "full.csv",
            "Game Name,Month,Day,Year,Num1,Num2,Num3,Num4,Num5,Powerball,Power Play\n\
             Powerball,2,14,2024,5,23,31,44,68,12,3\n\
             Powerball,2,17,2024,1,9,16,52,69,26,2\n",
        );

        let draws = load(&path).expect("load should succeed");
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].game, "Powerball");
        assert_eq!(draws[0].date, NaiveDate::from_ymd_opt(2024, 2, 14));
        assert_eq!(
            draws[0].primary,
            [Some(5), Some(23), Some(31), Some(44), Some(68)]
        );
        assert_eq!(draws[0].secondary, Some(12));
        assert_eq!(draws[0].power_play.as_deref(), Some("3"));
    }

    #[test]
    fn missing_power_play_column_is_not_an_error() {
        let path = write_fixture(
            "no_power_play.csv",
            "Game Name,Month,Day,Year,Num1,Num2,Num3,Num4,Num5,Powerball\n\
             Powerball,6,3,2009,7,18,22,40,61,5\n",
        );

        let draws = load(&path).expect("older-era file should load");
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].power_play, None);
        assert_eq!(draws[0].secondary, Some(5));
    }

    #[test]
    fn invalid_date_is_absent_for_that_record_only() {
        let path = write_fixture(
            "bad_date.csv",
            "Game Name,Month,Day,Year,Num1,Num2,Num3,Num4,Num5,Powerball,Power Play\n\
             Powerball,2,30,2024,5,23,31,44,68,12,3\n\
             Powerball,3,1,2024,2,8,33,47,55,19,2\n",
        );

        let draws = load(&path).expect("load should succeed");
        assert_eq!(draws[0].date, None);
        assert_eq!(draws[0].secondary, Some(12), "record itself is kept");
        assert_eq!(draws[1].date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn blank_and_unparseable_cells_become_absent() {
        let path = write_fixture(
            "blanks.csv",
            "Game Name,Month,Day,Year,Num1,Num2,Num3,Num4,Num5,Powerball,Power Play\n\
             Powerball,1,2,2010,4,,x,41,60,,\n",
        );

        let draws = load(&path).expect("load should succeed");
        assert_eq!(
            draws[0].primary,
            [Some(4), None, None, Some(41), Some(60)]
        );
        assert_eq!(draws[0].secondary, None);
        assert_eq!(draws[0].power_play, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load("/nonexistent/powerball.csv");
        assert!(matches!(result, Err(HistoryError::Read { .. })));
    }
}
