use std::borrow::Cow;
use std::io::{self, Write};

use bqsample_bigquery::http::table::TableSchema;
use bqsample_bigquery::http::tabledata::list::{Tuple, Value};

const COLUMN_WIDTH: usize = 20;
const KEEP: usize = 17;

/// Cuts text longer than a column down to 17 characters followed by `...`.
pub fn ellipsize(text: &str) -> Cow<'_, str> {
    if text.chars().count() > COLUMN_WIDTH {
        let mut cut: String = text.chars().take(KEEP).collect();
        cut.push_str("...");
        Cow::Owned(cut)
    } else {
        Cow::Borrowed(text)
    }
}

pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(v) => v.clone(),
        Value::Array(cells) => {
            let items: Vec<String> = cells.iter().map(|c| cell_text(&c.v)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Struct(tuple) => {
            let items: Vec<String> = tuple.f.iter().map(|c| cell_text(&c.v)).collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

pub fn write_header(out: &mut dyn Write, schema: &TableSchema) -> io::Result<()> {
    for field in &schema.fields {
        write!(out, "{:<20}", ellipsize(&field.name))?;
    }
    writeln!(out)
}

/// One line per row, every cell left-aligned in a 20 character column.
pub fn write_rows(out: &mut dyn Write, rows: &[Tuple]) -> io::Result<()> {
    for row in rows {
        for cell in &row.f {
            write!(out, "{:<20}", ellipsize(&cell_text(&cell.v)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bqsample_bigquery::http::table::{TableFieldSchema, TableFieldType, TableSchema};
    use bqsample_bigquery::http::tabledata::list::{Cell, Tuple, Value};

    use crate::render::{cell_text, ellipsize, write_header, write_rows};

    fn cell(v: &str) -> Cell {
        Cell {
            v: Value::String(v.to_string()),
        }
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("hamlet"), "hamlet");
        assert_eq!(ellipsize("exactly_twenty_chars"), "exactly_twenty_chars");
        assert_eq!(ellipsize("twenty_one_characters"), "twenty_one_charac...");
        assert_eq!(ellipsize("twenty_one_characters").chars().count(), 20);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Value::Null), "null");
        assert_eq!(cell_text(&Value::Array(vec![cell("a"), cell("b")])), "[a, b]");
        assert_eq!(
            cell_text(&Value::Struct(Tuple {
                f: vec![cell("1"), Cell { v: Value::Null }]
            })),
            "{1, null}"
        );
    }

    #[test]
    fn test_write() {
        let schema = TableSchema {
            fields: vec![
                TableFieldSchema {
                    name: "word".to_string(),
                    data_type: TableFieldType::String,
                    ..Default::default()
                },
                TableFieldSchema {
                    name: "word_count".to_string(),
                    data_type: TableFieldType::Integer,
                    ..Default::default()
                },
            ],
        };
        let rows = vec![Tuple {
            f: vec![cell("the"), cell("27361")],
        }];
        let mut out = Vec::new();
        write_header(&mut out, &schema).unwrap();
        write_rows(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!("{:<20}{:<20}\n{:<20}{:<20}\n", "word", "word_count", "the", "27361")
        );
    }
}
