//! Column-aligned tables for result listings.

/// Truncate `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// A plain-text table with left-aligned columns and rule lines.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_widths: Vec<Option<usize>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
            max_widths: vec![None; headers.len()],
        }
    }

    /// Cap a column's width; longer cells are truncated with `...`.
    pub fn with_max_width(mut self, column: usize, width: usize) -> Self {
        if let Some(slot) = self.max_widths.get_mut(column) {
            *slot = Some(width);
        }
        self
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: &[&str]) {
        let row = row
            .iter()
            .enumerate()
            .map(|(i, cell)| match self.max_widths.get(i).copied().flatten() {
                Some(max) => truncate(cell, max),
                None => cell.to_string(),
            })
            .collect();
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        let rule = "-".repeat(total);

        let mut lines = vec![rule.clone(), render_row(&self.headers, &widths), rule.clone()];
        lines.extend(self.rows.iter().map(|row| render_row(row, &widths)));
        lines.push(rule);
        lines.join("\n")
    }
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            format!("{:width$}", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Acme Tool", 40), "Acme Tool");
        assert_eq!(truncate(&"x".repeat(40), 40), "x".repeat(40));
    }

    #[test]
    fn truncate_cuts_long_text_to_max() {
        let long = "A".repeat(45);
        let cut = truncate(&long, 40);
        assert_eq!(cut.chars().count(), 40);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"A".repeat(37)));
    }

    #[test]
    fn table_empty_renders_headers() {
        let table = Table::new(&["Installed App", "Chocolatey Package"]);
        assert!(table.is_empty());
        let output = table.render();
        assert!(output.contains("Installed App"));
        assert!(output.contains("Chocolatey Package"));
    }

    #[test]
    fn table_aligns_columns() {
        let mut table = Table::new(&["App", "Package"]);
        table.add_row(&["Acme Tool", "acmetool"]);
        table.add_row(&["Git", "git"]);

        assert_eq!(table.row_count(), 2);
        let output = table.render();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], "App        Package");
        assert_eq!(lines[3], "Acme Tool  acmetool");
        assert_eq!(lines[4], "Git        git");
        assert_eq!(lines[0], lines[2]);
    }

    #[test]
    fn table_truncates_capped_column() {
        let mut table = Table::new(&["App", "Package"]).with_max_width(0, 10);
        table.add_row(&["A very long application name", "pkg"]);
        let output = table.render();
        assert!(output.contains("A very ..."));
        assert!(!output.contains("application"));
    }
}
