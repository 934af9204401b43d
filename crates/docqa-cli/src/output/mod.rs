use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
pub mod views;

pub use views::{AskReport, FailedQuestion, TranscriptView};

/// A value that knows how to lay itself out as table rows.
pub trait TableView {
    fn headers(&self) -> Vec<&'static str>;

    fn rows(&self) -> Vec<Vec<String>>;

    /// Line printed above the table, if any.
    fn caption(&self) -> Option<String> {
        None
    }

    /// Printed instead of the table when there are no rows.
    fn empty_message(&self) -> &'static str {
        "(no rows)"
    }
}

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(value, table_options())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: TableView>(value: &T, options: table::TableOptions) -> String {
    let rows = value.rows();
    let body = if rows.is_empty() {
        value.empty_message().to_string()
    } else {
        table::render_table(&value.headers(), &rows, options)
    };
    match value.caption() {
        Some(caption) => format!("{caption}\n\n{body}"),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::{TableView, render};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    impl TableView for Example {
        fn headers(&self) -> Vec<&'static str> {
            vec!["id", "value"]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            vec![vec![self.id.to_string(), self.value.to_string()]]
        }
    }

    struct Empty;

    impl Serialize for Empty {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_unit()
        }
    }

    impl TableView for Empty {
        fn headers(&self) -> Vec<&'static str> {
            vec!["id"]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            Vec::new()
        }

        fn caption(&self) -> Option<String> {
            Some("nothing here".to_string())
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert_eq!(out, r#"{"id":"x","value":7}"#);
    }

    #[test]
    fn table_render_uses_view_headers() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id  value");
        assert_eq!(lines[2], "x   7");
    }

    #[test]
    fn empty_table_prints_caption_and_message() {
        let out = render(&Empty, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "nothing here\n\n(no rows)");
    }
}
