// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
/// Blank lines are skipped; quoted fields may span lines.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                push_row(&mut rows, &mut row);
            }
            _ => field.push(ch),
        }
    }

    // Flush a last line without a trailing newline, even if quotes were unterminated.
    row.push(field);
    push_row(&mut rows, &mut row);

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    if row.len() == 1 && row[0].is_empty() {
        row.clear();
    } else {
        rows.push(take(row));
    }
}

/// First row as header, the rest as data. `None` for empty input.
pub fn split_header(mut rows: Vec<Vec<String>>) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    if rows.is_empty() { return None; }
    let header = rows.remove(0);
    Some((header, rows))
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line followed by every row.
pub fn write_table<W, H, I>(mut w: W, header: &[H], rows: I, sep: char) -> io::Result<usize>
where
    W: Write,
    H: AsRef<str>,
    I: IntoIterator<Item = Vec<String>>,
{
    write_row(&mut w, header, sep)?;
    let mut n = 0;
    for r in rows {
        write_row(&mut w, &r, sep)?;
        n += 1;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_survives_a_parse() {
        let rows = vec![
            row!["plain", "with,comma", "with \"quote\""],
            row!["multi\nline", "", "x"],
        ];
        let mut buf = Vec::new();
        let n = write_table(&mut buf, &["a", "b", "c"], rows.clone(), ',').unwrap();
        assert_eq!(n, 2);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("a,b,c\nplain,\"with,comma\",\"with \"\"quote\"\"\"\n"));

        let (header, parsed) = split_header(parse_rows(&text, ',')).unwrap();
        assert_eq!(header, ["a", "b", "c"]);
        assert_eq!(parsed, rows);
    }

    #[test]
    fn tsv_only_quotes_tabs() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a,b", "c\td"], '\t').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\t\"c\td\"\n");
    }

    #[test]
    fn parse_tolerates_crlf_and_blank_lines() {
        let rows = parse_rows("h1,h2\r\n1,2\r\n\r\n3,4", ',');
        assert_eq!(rows, vec![row!["h1", "h2"], row!["1", "2"], row!["3", "4"]]);
        assert!(split_header(parse_rows("", ',')).is_none());
    }
}
