//! Reading and writing truth tables in PLA format.
//!
//! # Format
//!
//! ```text
//! .i <input-width>
//! .o <output-width>
//! .ilb <input labels...>      # optional
//! .olb <output labels...>     # optional
//! .p <row-count>              # optional, informative only
//! <pattern> <output>
//! ...
//! .e
//! ```
//!
//! Patterns and outputs are spelled over `0`, `1` and `-` (don't-care).
//! Lines starting with `#` are comments. Everything after `.e` (or `.end`) is ignored;
//! a missing terminator is accepted.
//!
//! Rows keep their file order. When a completed table is written, explicit rows come
//! first in their original order, followed by the synthesized unspecified rows.

use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};

use crate::complete::Completer;
use crate::error::{Error, Position, Result};
use crate::table::CompleteTable;
use crate::types::{Pattern, Row};

/// Options for [`Pla::parse_with`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ParseOptions {
    /// Keep the first `.ilb`/`.olb` line and ignore repeats instead of failing
    /// with [`Error::AmbiguousLabel`].
    pub tolerate_duplicate_labels: bool,
}

impl ParseOptions {
    pub fn with_tolerate_duplicate_labels(mut self, tolerate: bool) -> Self {
        self.tolerate_duplicate_labels = tolerate;
        self
    }
}

/// A PLA document: dimensions, optional labels and rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pla {
    pub input_width: usize,
    pub output_width: usize,
    pub input_labels: Option<Vec<String>>,
    pub output_labels: Option<Vec<String>>,
    pub rows: Vec<Row>,
}

/// Label line seen while parsing, with the line it came from.
type Labels = Option<(usize, Vec<String>)>;

impl Pla {
    pub fn new(input_width: usize, output_width: usize) -> Self {
        Self {
            input_width,
            output_width,
            input_labels: None,
            output_labels: None,
            rows: Vec::new(),
        }
    }

    /// Document holding the rows of a completed table, without labels.
    pub fn from_table(table: &CompleteTable) -> Self {
        Self {
            input_width: table.input_width(),
            output_width: table.output_width(),
            input_labels: None,
            output_labels: None,
            rows: table.rows().to_vec(),
        }
    }

    /// Parses a document with default [`ParseOptions`].
    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_with(content, &ParseOptions::default())
    }

    pub fn parse_with(content: &str, options: &ParseOptions) -> Result<Self> {
        let mut input_width: Option<usize> = None;
        let mut output_width: Option<usize> = None;
        let mut input_labels: Labels = None;
        let mut output_labels: Labels = None;
        let mut declared_rows: Option<usize> = None;
        let mut rows = Vec::new();
        let mut terminated = false;

        let mut lines = content.lines().enumerate().map(|(i, line)| (i + 1, line.trim()));

        for (line_no, line) in lines.by_ref() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(directive) = line.strip_prefix('.') {
                let mut parts = directive.split_whitespace();
                let name = parts.next().unwrap_or("");
                let args: Vec<&str> = parts.collect();
                match name {
                    "i" => input_width = Some(parse_width(line_no, "i", input_width, &args)?),
                    "o" => output_width = Some(parse_width(line_no, "o", output_width, &args)?),
                    "ilb" => set_labels(&mut input_labels, "ilb", line_no, &args, options)?,
                    "olb" => set_labels(&mut output_labels, "olb", line_no, &args, options)?,
                    "p" => {
                        let count = match args.as_slice() {
                            [count] => count.parse::<usize>().ok(),
                            _ => None,
                        };
                        declared_rows =
                            Some(count.ok_or_else(|| Error::format(line_no, "malformed `.p` directive"))?);
                    }
                    "e" | "end" => {
                        terminated = true;
                        break;
                    }
                    _ => return Err(Error::format(line_no, format!("unsupported directive `.{}`", name))),
                }
                continue;
            }

            let (i, o) = match (input_width, output_width) {
                (Some(i), Some(o)) => (i, o),
                _ => return Err(Error::format(line_no, "row before `.i`/`.o` header")),
            };
            rows.push(parse_row(line_no, line, i, o)?);
        }

        if terminated {
            let trailing = lines.filter(|(_, line)| !line.is_empty()).count();
            if trailing > 0 {
                warn!("ignoring {} non-empty lines after `.e`", trailing);
            }
        } else {
            debug!("no `.e` terminator, read to end of input");
        }

        let input_width = input_width.ok_or_else(|| Error::Format {
            line: None,
            message: "missing `.i` header".to_string(),
        })?;
        let output_width = output_width.ok_or_else(|| Error::Format {
            line: None,
            message: "missing `.o` header".to_string(),
        })?;

        let input_labels = check_labels(input_labels, "input labels", input_width)?;
        let output_labels = check_labels(output_labels, "output labels", output_width)?;

        if let Some(declared) = declared_rows {
            if declared != rows.len() {
                warn!("`.p` declares {} rows, found {}", declared, rows.len());
            }
        }

        debug!(
            "parsed PLA: .i {} .o {}, {} rows",
            input_width,
            output_width,
            rows.len()
        );

        Ok(Self {
            input_width,
            output_width,
            input_labels,
            output_labels,
            rows,
        })
    }

    pub fn from_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse_with(&content, options)
    }

    pub fn load<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_with(&content, options)
    }

    /// Serializes the document in PLA format.
    pub fn to_pla_string(&self) -> String {
        self.to_string()
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self)?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Completes the rows over the full input space, keeping the labels.
    pub fn complete(&self, completer: &Completer) -> Result<Pla> {
        let table = completer.complete(&self.rows, self.input_width, self.output_width)?;
        Ok(Pla {
            input_width: self.input_width,
            output_width: self.output_width,
            input_labels: self.input_labels.clone(),
            output_labels: self.output_labels.clone(),
            rows: table.into_rows(),
        })
    }
}

impl fmt::Display for Pla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".i {}", self.input_width)?;
        writeln!(f, ".o {}", self.output_width)?;
        if let Some(labels) = &self.input_labels {
            writeln!(f, ".ilb {}", labels.join(" "))?;
        }
        if let Some(labels) = &self.output_labels {
            writeln!(f, ".olb {}", labels.join(" "))?;
        }
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        writeln!(f, ".e")
    }
}

impl FromStr for Pla {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pla::parse(s)
    }
}

/// Path of the completed table for `path`: `dir/name.pla` becomes `dir/name_complete.pla`.
pub fn completed_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_complete.{}", stem, ext.to_string_lossy()),
        None => format!("{}_complete", stem),
    };
    path.with_file_name(name)
}

/// Reads the PLA at `path`, completes it and writes the result to [`completed_path`].
///
/// Returns the path written.
pub fn complete_file<P: AsRef<Path>>(path: P, completer: &Completer, options: &ParseOptions) -> Result<PathBuf> {
    let path = path.as_ref();
    let pla = Pla::load(path, options)?;
    let completed = pla.complete(completer)?;
    let target = completed_path(path);
    completed.save(&target)?;
    info!(
        "{}: {} rows -> {}: {} rows",
        path.display(),
        pla.rows.len(),
        target.display(),
        completed.rows.len()
    );
    Ok(target)
}

fn parse_width(line: usize, directive: &str, previous: Option<usize>, args: &[&str]) -> Result<usize> {
    if previous.is_some() {
        return Err(Error::format(line, format!("duplicate `.{}` header", directive)));
    }
    let width = match args {
        [width] => width.parse::<usize>().ok(),
        _ => None,
    };
    match width {
        Some(width) if width > 0 => Ok(width),
        _ => Err(Error::format(
            line,
            format!("malformed `.{}` header: expected a positive width", directive),
        )),
    }
}

fn set_labels(
    slot: &mut Labels,
    directive: &'static str,
    line: usize,
    args: &[&str],
    options: &ParseOptions,
) -> Result<()> {
    if args.is_empty() {
        return Err(Error::format(line, format!("empty `.{}` directive", directive)));
    }
    if let Some((first, _)) = slot {
        if options.tolerate_duplicate_labels {
            warn!(
                "ignoring `.{}` at line {}, keeping the one at line {}",
                directive, line, first
            );
            return Ok(());
        }
        return Err(Error::AmbiguousLabel { directive, line });
    }
    *slot = Some((line, args.iter().map(|s| s.to_string()).collect()));
    Ok(())
}

fn check_labels(labels: Labels, what: &'static str, width: usize) -> Result<Option<Vec<String>>> {
    match labels {
        Some((line, labels)) if labels.len() != width => Err(Error::WidthMismatch {
            what,
            expected: width,
            found: labels.len(),
            at: Some(Position::Line(line)),
        }),
        Some((_, labels)) => Ok(Some(labels)),
        None => Ok(None),
    }
}

fn parse_row(line: usize, content: &str, input_width: usize, output_width: usize) -> Result<Row> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let [input, output] = fields.as_slice() else {
        return Err(Error::format(
            line,
            format!("expected `<pattern> <output>`, found {} fields", fields.len()),
        ));
    };

    for (what, token, expected) in [("pattern", input, input_width), ("output", output, output_width)] {
        let found = token.chars().count();
        if found != expected {
            return Err(Error::WidthMismatch {
                what,
                expected,
                found,
                at: Some(Position::Line(line)),
            });
        }
    }

    let input = input.parse::<Pattern>().map_err(|e| e.at_line(line))?;
    let output = output.parse::<Pattern>().map_err(|e| e.at_line(line))?;
    Ok(Row::new(input, output))
}
