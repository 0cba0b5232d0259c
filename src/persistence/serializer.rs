use super::files::LINE_ENDING;
use crate::domain::TaskEntry;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io;

/// Serialize tasks into daily log content, one `complete,title,time,account` row per task.
///
/// Rows are joined with the platform line ending and there is no trailing terminator.
/// With `quote` set, fields containing `,` or `"` are double-quoted; otherwise fields are
/// written verbatim (legacy format).
pub fn serialize_log_file(tasks: &[TaskEntry], quote: bool) -> io::Result<String> {
    let style = if quote {
        QuoteStyle::Necessary
    } else {
        QuoteStyle::Never
    };
    let terminator = if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(style)
        .terminator(terminator)
        .from_writer(Vec::new());

    for task in tasks {
        writer.write_record(row_fields(task))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut content =
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if content.ends_with(LINE_ENDING) {
        content.truncate(content.len() - LINE_ENDING.len());
    }
    Ok(content)
}

/// Fields of one row. Line breaks become spaces since the format is one row per line.
fn row_fields(task: &TaskEntry) -> [String; 4] {
    let complete = if task.is_complete { "1" } else { "0" };
    [
        complete.to_string(),
        single_line(&task.title),
        single_line(&task.time),
        single_line(&task.account),
    ]
}

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}
