//! Rendering of Rust values as SQL literal text.
//!
//! Queries built by this crate always execute with bound parameters; these
//! helpers exist for the places where literal text is unavoidable, such as
//! echoing a complete statement to the trace log or embedding a value in a
//! schema script. Text escaping follows the SQL convention of doubling
//! embedded single quotes.

use rusqlite::types::Value;

/// Renders the SQL `NULL` keyword.
pub fn null() -> String {
    "NULL".to_string()
}

/// Renders text as a quoted SQL literal, doubling embedded single quotes.
///
/// `None` renders as `NULL`, mirroring how an absent optional column is
/// stored.
pub fn text(data: Option<&str>) -> String {
    match data {
        Some(data) => format!("'{}'", data.replace('\'', "''")),
        None => null(),
    }
}

/// Renders a boolean as the SQL `TRUE` or `FALSE` keyword.
pub fn boolean(data: bool) -> String {
    if data { "TRUE" } else { "FALSE" }.to_string()
}

/// Renders an integer as a SQL literal.
pub fn integer(data: i64) -> String {
    data.to_string()
}

/// Renders a bound [`Value`] as SQL literal text.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => null(),
        Value::Integer(value) => integer(*value),
        Value::Real(value) => value.to_string(),
        Value::Text(value) => text(Some(value)),
        Value::Blob(blob) => {
            let hex: String = blob.iter().map(|b| format!("{:02X}", b)).collect();
            format!("X'{}'", hex)
        }
    }
}

/// Substitutes each `?` placeholder in `sql` with the literal rendering of
/// the corresponding bound value.
///
/// Used only for trace output; the builders never place user text in the
/// statement itself, so every `?` in `sql` is a genuine placeholder.
pub fn render_statement(sql: &str, params: &[Value]) -> String {
    let mut values = params.iter();
    let mut out = String::with_capacity(sql.len());
    for (idx, piece) in sql.split('?').enumerate() {
        if idx > 0 {
            match values.next() {
                Some(value) => out.push_str(&literal(value)),
                None => out.push('?'),
            }
        }
        out.push_str(piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Inverse of `text`, for round-trip checks.
    fn unquote(literal: &str) -> Option<String> {
        let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
        Some(inner.replace("''", "'"))
    }

    #[test]
    fn test_null() {
        assert_eq!(null(), "NULL");
        assert_eq!(text(None), null());
    }

    #[test]
    fn test_text_escapes_quotes() {
        assert_eq!(text(Some("feh")), "'feh'");
        assert_eq!(text(Some("it's")), "'it''s'");
        assert_eq!(text(Some("''")), "''''''");
        assert_eq!(text(Some("")), "''");
    }

    #[test]
    fn test_text_round_trip() {
        for input in ["plain", "it's", "'leading", "trailing'", "a''b", "'", ""] {
            let escaped = text(Some(input));
            assert_eq!(unquote(&escaped).as_deref(), Some(input));
        }
    }

    #[test]
    fn test_rendered_literal_parses_back() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        for input in ["plain", "it's", "'; DROP TABLE packages; --", "'''"] {
            let sql = format!("SELECT {}", text(Some(input)));
            let got: String = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
            assert_eq!(got, input);
        }
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(true), "TRUE");
        assert_eq!(boolean(false), "FALSE");
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(0), "0");
        assert_eq!(integer(-42), "-42");
        assert_eq!(integer(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_literal() {
        assert_eq!(literal(&Value::Null), "NULL");
        assert_eq!(literal(&Value::Integer(7)), "7");
        assert_eq!(literal(&Value::Text("o'clock".into())), "'o''clock'");
        assert_eq!(literal(&Value::Blob(vec![0xAB, 0x01])), "X'AB01'");
    }

    #[test]
    fn test_render_statement() {
        let params = vec![Value::Text("feh".into()), Value::Integer(1)];
        let rendered = render_statement(
            "SELECT * FROM packages WHERE name = ? AND installed = ?",
            &params,
        );
        assert_eq!(
            rendered,
            "SELECT * FROM packages WHERE name = 'feh' AND installed = 1"
        );
    }

    #[test]
    fn test_render_statement_without_params() {
        let rendered = render_statement("DELETE FROM packages", &[]);
        assert_eq!(rendered, "DELETE FROM packages");
    }
}
