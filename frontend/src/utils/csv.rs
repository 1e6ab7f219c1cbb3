/// Shared CSV builder used by every export surface.
///
/// Output is RFC 4180 flavored: rows joined with `\n`, no trailing newline,
/// so exporting N rows always yields exactly N+1 lines (header included).
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = join_row(headers.iter().map(|h| (*h).to_string()));
    for row in rows {
        out.push('\n');
        out.push_str(&join_row(row.iter().cloned()));
    }
    out
}

fn join_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|field| escape_field(&field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field when it contains a comma, quote, or line break; embedded
/// quotes are doubled.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_has_header_plus_one_line_per_row() {
        let rows = vec![
            vec!["Ada".to_string(), "Engineering".to_string()],
            vec!["Grace".to_string(), "Research".to_string()],
            vec!["Linus".to_string(), "Platform".to_string()],
        ];
        let csv = build_csv(&["name", "department"], &rows);
        assert_eq!(csv.lines().count(), rows.len() + 1);
        assert!(csv.lines().next().unwrap().starts_with("name,department"));
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let csv = build_csv(&["name", "department"], &[]);
        assert_eq!(csv, "name,department");
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn comma_fields_stay_parseable() {
        let rows = vec![vec!["Doe, Jane".to_string(), "HR".to_string()]];
        let csv = build_csv(&["name", "department"], &rows);
        let data_line = csv.lines().nth(1).unwrap();
        assert_eq!(data_line, "\"Doe, Jane\",HR");
        // A quoted comma must not introduce an extra column.
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(escape_field("the \"big\" one"), "\"the \"\"big\"\" one\"");
    }

    #[test]
    fn newlines_force_quoting() {
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn plain_fields_pass_through_unquoted() {
        assert_eq!(escape_field("plain"), "plain");
    }
}
