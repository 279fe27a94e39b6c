//! Plain text tables with display-width aware column alignment.

use std::fmt;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_GAP: &str = "  ";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Column {
    header: String,
    align: Align,
    max_width: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: headers
                .into_iter()
                .map(|header| Column {
                    header: header.into(),
                    align: Align::Left,
                    max_width: None,
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Sets alignment of column `index`; out of range is ignored.
    #[must_use]
    pub fn align(mut self, index: usize, align: Align) -> Self {
        if let Some(column) = self.columns.get_mut(index) {
            column.align = align;
        }
        self
    }

    /// Truncates cells of column `index` to `width` display columns.
    #[must_use]
    pub fn max_width(mut self, index: usize, width: usize) -> Self {
        if let Some(column) = self.columns.get_mut(index) {
            column.max_width = Some(width.max(1));
        }
        self
    }

    /// Appends a row; missing cells render empty, extra cells are dropped.
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.columns.len())
            .map(Into::into)
            .collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, column: usize, value: &str) -> String {
        let collapsed = value.replace(['\n', '\r', '\t'], " ");
        match self.columns[column].max_width {
            Some(limit) => truncate(&collapsed, limit),
            None => collapsed,
        }
    }

    fn widths(&self, rendered: &[Vec<String>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rendered
                    .iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(column.header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn write_line(
        &self,
        f: &mut fmt::Formatter<'_>,
        cells: &[String],
        widths: &[usize],
    ) -> fmt::Result {
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let padding = " ".repeat(width.saturating_sub(cell.width()));
            match self.columns[i].align {
                Align::Left => {
                    line.push_str(cell);
                    line.push_str(&padding);
                }
                Align::Right => {
                    line.push_str(&padding);
                    line.push_str(cell);
                }
            }
        }
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, value)| self.cell(i, value))
                    .collect()
            })
            .collect();
        let widths = self.widths(&rendered);

        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        self.write_line(f, &headers, &widths)?;

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        self.write_line(f, &rule, &widths)?;

        for row in &rendered {
            self.write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

/// Cuts `value` to at most `limit` display columns, marking the cut.
#[must_use]
pub fn truncate(value: &str, limit: usize) -> String {
    if value.width() <= limit {
        return value.to_string();
    }

    let budget = limit.saturating_sub(ELLIPSIS.width().unwrap_or(1));
    let mut out = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(["ID", "NAME", "HOURS"]).align(2, Align::Right);
        table.push(["1", "Depot", "8.00"]);
        table.push(["12", "North yard", "10.5"]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "ID  NAME        HOURS");
        assert_eq!(lines[1], "--  ----------  -----");
        assert_eq!(lines[2], "1   Depot        8.00");
        assert_eq!(lines[3], "12  North yard   10.5");
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        let mut table = Table::new(["SITE", "X"]);
        table.push(["東京", "a"]);
        table.push(["Oslo", "b"]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "東京  a");
        assert_eq!(lines[3], "Oslo  b");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B"]);
        table.push(["only"]);
        assert_eq!(table.len(), 1);
        assert!(table.to_string().lines().nth(2).unwrap().starts_with("only"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long note here", 6), "a lon…");
        assert_eq!(truncate("東京都庁", 5), "東京…");
    }

    #[test]
    fn test_cells_are_single_line() {
        let mut table = Table::new(["NOTE"]).max_width(0, 20);
        table.push(["line one\nline two"]);
        assert!(table.to_string().contains("line one line two"));
    }
}
