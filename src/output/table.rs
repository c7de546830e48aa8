//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

const EMPTY: &str = "Nothing to show.";

/// Rounded table with centered headers, for people
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return EMPTY.to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Borderless columns, one row per line, for `grep` and `awk`
pub fn format_plain<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return EMPTY.to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct Row {
        #[tabled(rename = "ORG ID")]
        id: String,
        #[tabled(rename = "NAME")]
        name: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "12".to_string(),
                name: "Acme".to_string(),
            },
            Row {
                id: "34".to_string(),
                name: "Globex".to_string(),
            },
        ]
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<Row> = vec![];
        assert_eq!(format_table(&rows), "Nothing to show.");
        assert_eq!(format_plain(&rows), "Nothing to show.");
    }

    #[test]
    fn test_rounded_table_has_headers_and_borders() {
        let output = format_table(&rows());

        assert!(output.contains("ORG ID"));
        assert!(output.contains("Globex"));
        assert!(output.contains('╭'));
    }

    #[test]
    fn test_plain_table_has_one_line_per_row() {
        let output = format_plain(&rows());

        assert_eq!(output.lines().count(), 3);
        assert!(!output.contains('│'));
        assert!(output.lines().nth(1).unwrap().contains("Acme"));
    }
}
