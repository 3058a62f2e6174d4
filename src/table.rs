//! Frame table assembly and CSV rendering.
//!
//! # Layout
//!
//! ```text
//! FRAME_ID,R_0,G_0,B_0,R_1,G_1,B_1,...
//! 0,r0,g0,b0,r1,g1,b1,...
//! 1,...
//! ```
//!
//! Every data row carries `3 · lights + 1` integer fields. Fields are never
//! quoted: all values are base-10 integers.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::color::Rgb;
use crate::error::{SimulationError, SimulationResult};

/// Name of the first header column.
pub const FRAME_ID: &str = "FRAME_ID";

/// Field separator.
pub const DELIMITER: char = ',';

/// Header fields for `led_count` lights: `FRAME_ID, R_0, G_0, B_0, …`.
pub fn header(led_count: usize) -> Vec<String> {
    let mut fields = Vec::with_capacity(3 * led_count + 1);
    fields.push(String::from(FRAME_ID));
    for i in 0..led_count {
        fields.push(format!("R_{i}"));
        fields.push(format!("G_{i}"));
        fields.push(format!("B_{i}"));
    }
    fields
}

/// One data row: a frame index and a colour per light, in light order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRow {
    /// Frame index, starting at 0.
    pub frame: u32,
    /// Colour of light `i` at position `i`.
    pub colors: Vec<Rgb>,
}

impl FrameRow {
    /// Number of fields this row serialises to.
    pub fn field_count(&self) -> usize {
        3 * self.colors.len() + 1
    }

    fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.frame)?;
        for c in &self.colors {
            write!(out, "{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}", c.r, c.g, c.b)?;
        }
        Ok(())
    }

    /// The row as one delimited line.
    pub fn to_line(&self) -> String {
        // Fields are at most 10 digits for the frame and 2 per channel.
        let mut line = String::with_capacity(11 + 9 * self.colors.len());
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut line);
        line
    }
}

/// Join header fields and row fields into delimited lines, header first.
pub fn serialize(header: &[String], rows: &[FrameRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    let mut head = String::new();
    for (i, field) in header.iter().enumerate() {
        if i > 0 {
            head.push(DELIMITER);
        }
        head.push_str(field);
    }
    lines.push(head);
    lines.extend(rows.iter().map(FrameRow::to_line));
    lines
}

/// Complete animation table for a fixed number of lights.
///
/// Deserialisation goes through [`OutputTable::push_row`], so a table read
/// from JSON or any other serde format has the same row-width guarantee as
/// one built in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTable"))]
pub struct OutputTable {
    led_count: usize,
    rows: Vec<FrameRow>,
}

impl OutputTable {
    /// Empty table for `led_count` lights.
    pub fn new(led_count: usize) -> Self {
        Self::with_capacity(led_count, 0)
    }

    /// Empty table with room for `frames` rows.
    pub fn with_capacity(led_count: usize, frames: usize) -> Self {
        Self {
            led_count,
            rows: Vec::with_capacity(frames),
        }
    }

    /// Table from rows already known to carry `led_count` colours each.
    pub(crate) fn from_rows(led_count: usize, rows: Vec<FrameRow>) -> Self {
        debug_assert!(rows.iter().all(|r| r.colors.len() == led_count));
        Self { led_count, rows }
    }

    /// Append a row. Rejects rows that do not have one colour per light.
    pub fn push_row(&mut self, row: FrameRow) -> SimulationResult<()> {
        if row.colors.len() != self.led_count {
            return Err(SimulationError::row_width_mismatch(
                self.led_count,
                row.colors.len(),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of lights (column triplets).
    pub fn led_count(&self) -> usize {
        self.led_count
    }

    /// Number of data rows, excluding the header.
    pub fn frame_count(&self) -> usize {
        self.rows.len()
    }

    /// Fields per line: `3 · led_count + 1`.
    pub fn column_count(&self) -> usize {
        3 * self.led_count + 1
    }

    /// Header fields.
    pub fn header(&self) -> Vec<String> {
        header(self.led_count)
    }

    /// Data rows in frame order.
    pub fn rows(&self) -> &[FrameRow] {
        &self.rows
    }

    /// Header line followed by one line per frame.
    pub fn to_lines(&self) -> Vec<String> {
        serialize(&self.header(), &self.rows)
    }

    /// Write the table as newline-terminated CSV.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str(FRAME_ID)?;
        for i in 0..self.led_count {
            write!(out, "{DELIMITER}R_{i}{DELIMITER}G_{i}{DELIMITER}B_{i}")?;
        }
        out.write_char('\n')?;
        for row in &self.rows {
            row.write_to(out)?;
            out.write_char('\n')?;
        }
        Ok(())
    }
}

/// Unchecked wire form of [`OutputTable`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTable {
    led_count: usize,
    rows: Vec<FrameRow>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for OutputTable {
    type Error = SimulationError;

    fn try_from(raw: RawTable) -> SimulationResult<Self> {
        let mut table = Self::with_capacity(raw.led_count, raw.rows.len());
        for row in raw.rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl fmt::Display for OutputTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_csv(f)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
