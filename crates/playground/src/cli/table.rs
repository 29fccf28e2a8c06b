//! Plain-text table rendering.

use playground_core::{Record, format_field_value, truncate_id};

/// Placeholder shown in cells without a value.
pub const EMPTY_CELL: &str = "Empty";

/// Builds one records-table row: the truncated id, then one cell per column.
pub fn record_row(record: &Record, columns: &[String]) -> Vec<String> {
    let mut row = vec![truncate_id(record.id())];
    row.extend(columns.iter().map(|column| {
        let text = format_field_value(record.field(column));
        if text.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            text
        }
    }));
    row
}

/// Renders `rows` under `headers` as left-aligned, space-padded columns.
///
/// When there are no rows a single "No records" line follows the header.
pub fn render(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);

    if rows.is_empty() {
        out.push_str("No records\n");
    }
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_columns_are_padded_to_widest_cell() {
        let table = render(
            &strings(&["Id", "Name"]),
            &[strings(&["r1", "Ada Lovelace"]), strings(&["r22", "Bo"])],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Id   Name");
        assert_eq!(lines[1], "---  ------------");
        assert_eq!(lines[2], "r1   Ada Lovelace");
        assert_eq!(lines[3], "r22  Bo");
    }

    #[test]
    fn test_record_row_truncates_long_ids() {
        let columns = strings(&["name", "phone"]);
        let record = Record::new("0123456789abcdefghijKLMNO").with_field("name", "Ada");

        let row = record_row(&record, &columns);
        assert_eq!(row, strings(&["0123456789abcdefghij...", "Ada", EMPTY_CELL]));

        let short = Record::new("c1").with_field("phone", "555");
        assert_eq!(record_row(&short, &columns), strings(&["c1", EMPTY_CELL, "555"]));
    }

    #[test]
    fn test_no_rows() {
        let table = render(&strings(&["Id"]), &[]);
        assert_eq!(table, "Id\n--\nNo records\n");
    }
}
