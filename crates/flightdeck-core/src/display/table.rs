//! Plain text tables with padded columns.

use std::fmt;

const COLUMN_GAP: &str = "    ";

/// A header row plus data rows, rendered with every column padded to its
/// widest cell.
///
/// # Examples
///
/// ```rust
/// use flightdeck_core::display::Table;
///
/// let mut table = Table::new(["ID", "Name"]);
/// table.push_row(vec!["1".to_string(), "Heathrow".to_string()]);
/// table.push_row(vec!["12".to_string(), "Gatwick".to_string()]);
///
/// assert_eq!(
///     table.to_string(),
///     "ID    Name\n1     Heathrow\n12    Gatwick\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), String::new());
        }
        self.rows.push(row);
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let width = widths.get(i).copied().unwrap_or(0);
        line.push_str(&format!("{cell:<width$}"));
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_row(f, &self.headers, &widths)?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_renders_headers_only() {
        let table = Table::new(["ID", "Name", "Selected"]);
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "ID    Name    Selected\n");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B", "C"]);
        table.push_row(vec!["x".to_string()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.to_string(), "A    B    C\nx\n");
    }

    #[test]
    fn test_widths_count_characters_not_bytes() {
        let mut table = Table::new(["Name", "Code"]);
        table.push_row(vec!["Zürich".to_string(), "ZRH".to_string()]);
        let output = table.to_string();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Name      Code");
        assert_eq!(lines[1], "Zürich    ZRH");
    }
}
