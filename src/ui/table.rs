// Wed Oct 21 2026 - Alex

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use colored::*;
use std::cmp::max;

const DEFAULT_MAX_CELL: usize = 48;

/// Box-drawn preview of the first rows of a record batch.
pub struct BatchTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_cell: usize,
    use_color: bool,
}

impl BatchTable {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            max_cell: DEFAULT_MAX_CELL,
            use_color: true,
        }
    }

    pub fn with_max_cell(mut self, width: usize) -> Self {
        self.max_cell = width.max(4);
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Loads up to `limit` rows from `batch`. Nulls render as `null`.
    pub fn with_batch(mut self, batch: &RecordBatch, limit: usize) -> Result<Self, ArrowError> {
        let schema = batch.schema();
        self.headers = schema.fields().iter().map(|f| f.name().clone()).collect();

        let options = FormatOptions::default().with_null("null");
        let formatters = batch.columns()
            .iter()
            .map(|c| ArrayFormatter::try_new(c.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()?;

        self.rows = (0..batch.num_rows().min(limit))
            .map(|row| formatters.iter().map(|f| f.value(row).to_string()).collect())
            .collect();

        Ok(self)
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = max(widths[i], cell.chars().count());
            }
        }
        widths.into_iter().map(|w| w.min(self.max_cell)).collect()
    }

    pub fn build(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let widths = self.widths();
        let mut output = Vec::with_capacity(self.rows.len() + 4);

        output.push(line(&widths, '┌', '┬', '┐'));
        output.push(self.build_row(&self.headers, &widths, true));
        output.push(line(&widths, '├', '┼', '┤'));
        for row in &self.rows {
            output.push(self.build_row(row, &widths, false));
        }
        output.push(line(&widths, '└', '┴', '┘'));

        output.join("\n")
    }

    fn build_row(&self, cells: &[String], widths: &[usize], is_header: bool) -> String {
        let mut out = String::from("│");
        for (cell, &width) in cells.iter().zip(widths) {
            let text = format!("{:<width$}", truncate(cell, width), width = width);
            let text = if is_header && self.use_color {
                text.bold().to_string()
            } else {
                text
            };
            out.push(' ');
            out.push_str(&text);
            out.push_str(" │");
        }
        out
    }
}

impl Default for BatchTable {
    fn default() -> Self {
        Self::new()
    }
}

fn line(widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner: Vec<String> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, inner.join(&middle.to_string()), right)
}

/// Shortens `content` to at most `width` characters, ending in `...` when cut.
pub fn truncate(content: &str, width: usize) -> String {
    if content.chars().count() <= width {
        return content.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = content.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("disassembled_code", DataType::Utf8, true),
            Field::new("block_number", DataType::Int64, true),
        ]));
        RecordBatch::try_new(schema, vec![
            Arc::new(StringArray::from(vec![Some("PUSH1 0x80 PUSH1 0x40 MSTORE CALLVALUE"), None, Some("STOP")])),
            Arc::new(Int64Array::from(vec![1, 2, 3])),
        ]).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("STOP", 10), "STOP");
        assert_eq!(truncate("PUSH1 0x80 MSTORE", 10), "PUSH1 0...");
    }

    #[test]
    fn test_preview_limits_rows_and_width() {
        let table = BatchTable::new()
            .with_color(false)
            .with_max_cell(12)
            .with_batch(&batch(), 2)
            .unwrap()
            .build();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("disassemb..."));
        assert!(lines[3].contains("PUSH1 0x8..."));
        assert!(lines[4].contains("null"));
        assert!(!table.contains("STOP"));
    }
}
