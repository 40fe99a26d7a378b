//! Tabular query results and their text / JSON / CSV renderings.

use serde::Serialize;
use std::fmt;

use super::stats::round2;
use crate::error::Result;

/// One value in a result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Best-effort typing of CSV text: integer, then float, then text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else if let Ok(i) = trimmed.parse::<i64>() {
            Cell::Int(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                Cell::Float(f)
            } else {
                Cell::Text(trimmed.to_string())
            }
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{:.2}", x),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&String> for Cell {
    fn from(s: &String) -> Self {
        Cell::Text(s.clone())
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        if x.is_finite() {
            Cell::Float(round2(x))
        } else {
            Cell::Empty
        }
    }
}

macro_rules! int_cell {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Cell {
                fn from(i: $t) -> Self {
                    Cell::Int(i as i64)
                }
            }
        )*
    };
}

int_cell!(i32, i64, u8, u32, u64, usize);

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// A typed result row that knows its column names.
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: Cell,
}

/// The result of one query: ordered columns, rows and optional headline
/// metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub metrics: Vec<Metric>,
}

impl QueryTable {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            metrics: Vec::new(),
        }
    }

    pub fn from_rows<R: TableRow>(title: impl Into<String>, rows: &[R]) -> Self {
        let mut table = Self::new(title, R::COLUMNS);
        table.rows = rows.iter().map(TableRow::cells).collect();
        table
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.metrics.push(Metric {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Aligned text with a 1-based row index column.
    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.title);

        if self.rows.is_empty() {
            out.push_str("No data available.\n");
        } else {
            let rendered: Vec<Vec<String>> = self
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let mut cells = vec![(i + 1).to_string()];
                    cells.extend(row.iter().map(|c| c.to_string()));
                    cells
                })
                .collect();

            let mut header = vec!["#".to_string()];
            header.extend(self.columns.iter().cloned());

            let width_of = |s: &str| s.chars().count();
            let mut widths: Vec<usize> = header.iter().map(|h| width_of(h)).collect();
            for row in &rendered {
                for (i, cell) in row.iter().enumerate() {
                    if i < widths.len() {
                        widths[i] = widths[i].max(width_of(cell));
                    } else {
                        widths.push(width_of(cell));
                    }
                }
            }

            let line = |cells: &[String]| -> String {
                cells
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        let pad = widths[i].saturating_sub(width_of(c));
                        if i == 0 {
                            format!("{}{}", " ".repeat(pad), c)
                        } else {
                            format!("{}{}", c, " ".repeat(pad))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            };

            out.push_str(&line(&header));
            out.push('\n');
            let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            out.push_str(&"-".repeat(rule));
            out.push('\n');
            for row in &rendered {
                out.push_str(&line(row));
                out.push('\n');
            }
        }

        for metric in &self.metrics {
            out.push_str(&format!("{}: {}\n", metric.name, metric.value));
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Header row plus data rows; metrics are not part of the CSV.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| crate::error::CricketError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Rebuild a table from its CSV rendering.
    pub fn from_csv(title: impl Into<String>, text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(Cell::parse).collect());
        }
        Ok(Self {
            title: title.into(),
            columns,
            rows,
            metrics: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wins {
        team: &'static str,
        wins: u32,
    }

    impl TableRow for Wins {
        const COLUMNS: &'static [&'static str] = &["Team", "Wins"];

        fn cells(&self) -> Vec<Cell> {
            vec![self.team.into(), self.wins.into()]
        }
    }

    fn sample() -> QueryTable {
        QueryTable::from_rows(
            "Wins per team",
            &[
                Wins { team: "India", wins: 3 },
                Wins { team: "New Zealand", wins: 1 },
            ],
        )
    }

    #[test]
    fn test_render_text_is_one_indexed_and_aligned() {
        let text = sample().render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Wins per team");
        assert_eq!(lines[1], "#  Team         Wins");
        assert_eq!(lines[3], "1  India        3");
        assert_eq!(lines[4], "2  New Zealand  1");
    }

    #[test]
    fn test_render_empty_table() {
        let table = QueryTable::new("Nothing", &["A"]);
        assert!(table.is_empty());
        assert_eq!(table.render_text(), "Nothing\nNo data available.\n");
    }

    #[test]
    fn test_metrics_render_after_rows() {
        let text = sample().with_metric("Overall", 55.555).render_text();
        assert!(text.ends_with("Overall: 55.56\n"));
    }

    #[test]
    fn test_csv_round_trip_types_cells() {
        let csv = sample().to_csv().unwrap();
        assert_eq!(csv, "Team,Wins\nIndia,3\nNew Zealand,1\n");

        let table = QueryTable::from_csv("Wins per team", &csv).unwrap();
        assert_eq!(table.columns, vec!["Team", "Wins"]);
        assert_eq!(table.rows[0], vec![Cell::Text("India".into()), Cell::Int(3)]);
    }

    #[test]
    fn test_json_keeps_column_order() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["columns"][0], "Team");
        assert_eq!(value["rows"][1][0], "New Zealand");
        assert_eq!(value["rows"][1][1], 1);
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(Cell::from(2.0 / 3.0), Cell::Float(0.67));
        assert_eq!(Cell::from(f64::NAN), Cell::Empty);
        assert_eq!(Cell::from(None::<u32>), Cell::Empty);
        assert_eq!(Cell::from(Some(5_usize)), Cell::Int(5));
        assert_eq!(Cell::parse(" 4.50 "), Cell::Float(4.5));
        assert_eq!(Cell::parse(""), Cell::Empty);
        assert_eq!(Cell::parse("Runs"), Cell::Text("Runs".into()));
        assert_eq!(Cell::Float(4.5).to_string(), "4.50");
        assert_eq!(Cell::Empty.to_string(), "");
    }
}
