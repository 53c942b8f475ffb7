use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use clap::Parser;

use crate::grid::MovedColumn;

/// Inclusive index span given as `START:END` (or a single index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Header cell given as `COLUMN[:DEPTH]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTarget {
    pub column: usize,
    pub depth: usize,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// JSON data file with `columns` and `rows`
    data: PathBuf,

    #[clap(short = 'r', long, value_parser = parse_span, help = "rows to copy, START:END")]
    rows: Option<Span>,

    #[clap(
        short = 'c',
        long,
        value_parser = parse_span,
        help = "visible columns to copy, START:END"
    )]
    columns: Option<Span>,

    #[clap(
        long,
        value_parser = parse_header,
        conflicts_with_all = ["rows", "columns", "include_headers"],
        help = "copy a header cell instead, COLUMN[:DEPTH]"
    )]
    header: Option<HeaderTarget>,

    #[clap(short = 'H', long, help = "include column headers")]
    include_headers: bool,

    #[clap(short = 'f', long, help = "copy display-formatted values")]
    format_values: bool,

    #[clap(
        short = 'm',
        long = "move",
        value_parser = parse_move,
        help = "column move applied to the view, FROM:TO (repeatable)"
    )]
    moves: Vec<MovedColumn>,

    #[clap(long = "hide", help = "hide a model column (repeatable)")]
    hidden_columns: Vec<usize>,

    #[clap(short = 'y', long, help = "copy large selections without asking")]
    yes: bool,

    #[clap(long, help = "keep copied text in memory and print it")]
    memory_clipboard: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    data: PathBuf,
    rows: Option<Span>,
    columns: Option<Span>,
    header: Option<HeaderTarget>,
    include_headers: bool,
    format_values: bool,
    moves: Vec<MovedColumn>,
    hidden_columns: Vec<usize>,
    yes: bool,
    memory_clipboard: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from(ClapArgs::parse_from(itr))
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn rows(&self) -> Option<Span> {
        self.rows
    }

    pub fn columns(&self) -> Option<Span> {
        self.columns
    }

    pub fn header(&self) -> Option<HeaderTarget> {
        self.header
    }

    pub fn include_headers(&self) -> bool {
        self.include_headers
    }

    pub fn format_values(&self) -> bool {
        self.format_values
    }

    pub fn moves(&self) -> &[MovedColumn] {
        &self.moves
    }

    pub fn hidden_columns(&self) -> &[usize] {
        &self.hidden_columns
    }

    pub fn yes(&self) -> bool {
        self.yes
    }

    pub fn memory_clipboard(&self) -> bool {
        self.memory_clipboard
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            data: args.data,
            rows: args.rows,
            columns: args.columns,
            header: args.header,
            include_headers: args.include_headers,
            format_values: args.format_values,
            moves: args.moves,
            hidden_columns: args.hidden_columns,
            yes: args.yes,
            memory_clipboard: args.memory_clipboard,
        }
    }
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a valid index"))
}

fn parse_span(value: &str) -> Result<Span, String> {
    let (start, end) = match value.split_once(':') {
        Some((start, end)) => (parse_index(start)?, parse_index(end)?),
        None => {
            let index = parse_index(value)?;
            (index, index)
        }
    };
    Ok(Span {
        start: start.min(end),
        end: start.max(end),
    })
}

fn parse_header(value: &str) -> Result<HeaderTarget, String> {
    match value.split_once(':') {
        Some((column, depth)) => Ok(HeaderTarget {
            column: parse_index(column)?,
            depth: parse_index(depth)?,
        }),
        None => Ok(HeaderTarget {
            column: parse_index(value)?,
            depth: 0,
        }),
    }
}

fn parse_move(value: &str) -> Result<MovedColumn, String> {
    let (from, to) = value
        .split_once(':')
        .ok_or_else(|| format!("'{value}' is not a move, expected FROM:TO"))?;
    Ok(MovedColumn::new(parse_index(from)?, parse_index(to)?))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_data_only() {
        let args = CommandLineArgs::parse_from(["program", "data.json"]);
        assert_eq!(args.data(), Path::new("data.json"));
        assert_eq!(args.rows(), None);
        assert_eq!(args.header(), None);
        assert!(!args.include_headers());
        assert!(!args.yes());
        assert!(args.moves().is_empty());
    }

    #[test]
    fn test_parse_args_ranges_and_flags() {
        let args = CommandLineArgs::parse_from([
            "program", "data.json", "-r", "10:2", "--columns", "1", "-H", "-f", "-y",
            "--move", "0:2", "-m", "3:1", "--hide", "4", "--memory-clipboard",
        ]);
        assert_eq!(args.rows(), Some(Span { start: 2, end: 10 }));
        assert_eq!(args.columns(), Some(Span { start: 1, end: 1 }));
        assert!(args.include_headers());
        assert!(args.format_values());
        assert!(args.yes());
        assert!(args.memory_clipboard());
        assert_eq!(
            args.moves(),
            &[MovedColumn::new(0, 2), MovedColumn::new(3, 1)]
        );
        assert_eq!(args.hidden_columns(), &[4]);
    }

    #[test]
    fn test_parse_args_header() {
        let args = CommandLineArgs::parse_from(["program", "data.json", "--header", "3:1"]);
        assert_eq!(args.header(), Some(HeaderTarget { column: 3, depth: 1 }));

        let args = CommandLineArgs::parse_from(["program", "data.json", "--header", "2"]);
        assert_eq!(args.header(), Some(HeaderTarget { column: 2, depth: 0 }));
    }

    #[test]
    fn test_header_conflicts_with_ranges() {
        let result = ClapArgs::try_parse_from(["program", "data.json", "--header", "1", "-r", "0:3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_move_is_rejected() {
        assert!(parse_move("3").is_err());
        assert!(parse_move("a:b").is_err());
        assert!(parse_span("x").is_err());
    }
}
