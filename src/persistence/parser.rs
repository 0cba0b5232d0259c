use crate::domain::TaskEntry;
use csv::{ReaderBuilder, Trim};
use log::debug;

/// Number of fields in a daily log row: complete, title, time, account
pub const FIELD_COUNT: usize = 4;

/// Parse daily log content into tasks.
///
/// Each line is `complete,title,time,account`. Rows with fewer than four fields are skipped.
/// Rows written with CSV quoting are decoded as CSV. Every other row is split on commas the
/// legacy way, so a title such as `"Dune" review` is kept as written.
pub fn parse_log_file(content: &str) -> Vec<TaskEntry> {
    let mut tasks = Vec::new();

    for (number, line) in content.lines().enumerate() {
        match parse_row(line) {
            Some(task) => tasks.push(task),
            None => debug!("Skipping malformed log row {}: {:?}", number + 1, line),
        }
    }

    tasks
}

/// Parse a single row, `None` if it has too few fields
fn parse_row(line: &str) -> Option<TaskEntry> {
    let fields = if has_quoted_fields(line) {
        decode_csv_row(line).unwrap_or_else(|| split_legacy(line))
    } else {
        split_legacy(line)
    };

    if fields.len() < FIELD_COUNT {
        return None;
    }

    let mut fields = fields.into_iter();
    let complete = fields.next()?;
    Some(TaskEntry {
        is_complete: complete == "1",
        title: fields.next()?,
        time: fields.next()?,
        account: fields.next()?,
    })
}

/// Legacy rows: plain comma split, every field trimmed
fn split_legacy(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

fn decode_csv_row(line: &str) -> Option<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next()? {
        Ok(record) => Some(record.iter().map(str::to_string).collect()),
        Err(e) => {
            debug!("Reading row as legacy after CSV error: {}", e);
            None
        }
    }
}

/// True when the row holds at least one quoted field and every field that opens with `"`
/// is one the writer could have produced: closed, followed by blanks only, and holding a
/// `,` or `""` that made quoting necessary.
fn has_quoted_fields(line: &str) -> bool {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let is_blank = |b: u8| b == b' ' || b == b'\t';
    let mut i = 0;
    let mut quoted_any = false;

    loop {
        if i < len && bytes[i] == b'"' {
            i += 1;
            let mut needed = false;
            let mut closed = false;

            while i < len {
                match bytes[i] {
                    b'"' if i + 1 < len && bytes[i + 1] == b'"' => {
                        needed = true;
                        i += 2;
                    }
                    b'"' => {
                        closed = true;
                        i += 1;
                        break;
                    }
                    b',' => {
                        needed = true;
                        i += 1;
                    }
                    _ => i += 1,
                }
            }

            if !closed || !needed {
                return false;
            }
            while i < len && is_blank(bytes[i]) {
                i += 1;
            }
            if i < len && bytes[i] != b',' {
                return false;
            }
            quoted_any = true;
        } else {
            while i < len && bytes[i] != b',' {
                i += 1;
            }
        }

        if i >= len {
            return quoted_any;
        }
        // past the separating comma
        i += 1;
    }
}
