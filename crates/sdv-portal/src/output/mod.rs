//! Printing command results.
//!
//! `json` and `raw` serialize the response. `text` and `table` print a
//! screen view, or a column table for list commands.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

pub use table::{Column, Tabular};

/// Pretty JSON, or a single line for `raw`.
pub fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(if format == OutputFormat::Raw {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}

pub fn render_view<T, F>(value: &T, format: OutputFormat, view: F) -> anyhow::Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if format.is_machine() {
        render_json(value, format)
    } else {
        Ok(view(value))
    }
}

pub fn render_rows<R>(rows: &[R], format: OutputFormat) -> anyhow::Result<String>
where
    R: Serialize + Tabular,
{
    if format.is_machine() {
        return render_json(&rows, format);
    }
    let prefs = ui::prefs();
    Ok(table::render(
        rows,
        table::TableStyle {
            max_width: prefs.term_width,
            color: prefs.table_color,
        },
    ))
}

pub fn output_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_json(value, format)?);
    Ok(())
}

/// Print `value` through its screen view, or as JSON.
pub fn output_view<T, F>(value: &T, format: OutputFormat, view: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    println!("{}", render_view(value, format, view)?);
    Ok(())
}

/// Print a list as a column table, or as a JSON array.
pub fn output_rows<R>(rows: &[R], format: OutputFormat) -> anyhow::Result<()>
where
    R: Serialize + Tabular,
{
    println!("{}", render_rows(rows, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Serialize)]
    struct Signed {
        user: &'static str,
        auth_method: &'static str,
    }

    fn greet(signed: &Signed) -> String {
        format!("Signed in as {} via {}.", signed.user, signed.auth_method)
    }

    fn sarah() -> Signed {
        Signed {
            user: "Sarah Johnson",
            auth_method: "Google SSO",
        }
    }

    #[derive(Serialize)]
    struct Crf {
        id: &'static str,
        name: &'static str,
    }

    impl Tabular for Crf {
        const COLUMNS: &'static [Column] = &[Column::text("id"), Column::wide("name")];
        const EMPTY: &'static str = "No CRF files.";

        fn cells(&self) -> Vec<String> {
            vec![self.id.to_string(), self.name.to_string()]
        }
    }

    #[test]
    fn human_formats_print_the_view() {
        for format in [OutputFormat::Text, OutputFormat::Table] {
            assert_eq!(
                render_view(&sarah(), format, greet).unwrap(),
                "Signed in as Sarah Johnson via Google SSO."
            );
        }
    }

    #[test]
    fn json_keeps_field_names() {
        let out = render_view(&sarah(), OutputFormat::Json, greet).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["auth_method"], "Google SSO");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_is_one_line() {
        let out = render_view(&sarah(), OutputFormat::Raw, greet).unwrap();
        assert_eq!(out, r#"{"user":"Sarah Johnson","auth_method":"Google SSO"}"#);
    }

    #[test]
    fn rows_render_as_table_or_array() {
        let rows = [Crf {
            id: "CRF-001",
            name: "crf_template_v2.pdf",
        }];
        let table = render_rows(&rows, OutputFormat::Text).unwrap();
        assert!(table.starts_with("id       name"));
        assert!(table.ends_with("CRF-001  crf_template_v2.pdf"));

        let json = render_rows(&rows, OutputFormat::Raw).unwrap();
        assert_eq!(json, r#"[{"id":"CRF-001","name":"crf_template_v2.pdf"}]"#);
    }

    #[test]
    fn empty_list_prints_message_or_empty_array() {
        let rows: [Crf; 0] = [];
        assert_eq!(
            render_rows(&rows, OutputFormat::Table).unwrap(),
            "No CRF files."
        );
        assert_eq!(render_rows(&rows, OutputFormat::Raw).unwrap(), "[]");
    }
}
