//! Column tables for list commands (`users`, `crf-files`, `health`).
//!
//! A row type names its own columns through [`Tabular`]; nothing here looks
//! at JSON.

const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";

/// Narrowest a shrinkable column gets on a small terminal.
const MIN_SHRUNK: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
    /// Cells hold a status word and are colored by meaning.
    pub status: bool,
    /// Gives up width first when the terminal is too narrow.
    pub shrinkable: bool,
}

impl Column {
    #[must_use]
    pub const fn text(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
            status: false,
            shrinkable: false,
        }
    }

    #[must_use]
    pub const fn number(header: &'static str) -> Self {
        Self {
            align: Align::Right,
            ..Self::text(header)
        }
    }

    #[must_use]
    pub const fn status(header: &'static str) -> Self {
        Self {
            status: true,
            ..Self::text(header)
        }
    }

    /// Long free text such as URLs and titles.
    #[must_use]
    pub const fn wide(header: &'static str) -> Self {
        Self {
            shrinkable: true,
            ..Self::text(header)
        }
    }
}

/// A record that prints as one table row.
pub trait Tabular {
    const COLUMNS: &'static [Column];
    /// Printed instead of a table when there are no rows.
    const EMPTY: &'static str;

    /// One cell per entry of [`COLUMNS`](Self::COLUMNS).
    fn cells(&self) -> Vec<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TableStyle {
    pub max_width: Option<usize>,
    pub color: bool,
}

#[must_use]
pub fn render<R: Tabular>(rows: &[R], style: TableStyle) -> String {
    if rows.is_empty() {
        return R::EMPTY.to_string();
    }
    let columns = R::COLUMNS;
    let cells: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();

    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    if let Some(max_width) = style.max_width {
        shrink(&mut widths, columns, max_width);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join(
        columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| pad(&clip(column.header, width), width, column.align)),
    ));
    lines.push(join(widths.iter().map(|&width| "-".repeat(width))));
    for row in &cells {
        lines.push(join(columns.iter().zip(&widths).enumerate().map(
            |(index, (column, &width))| {
                let raw = row.get(index).map_or("-", String::as_str);
                let cell = pad(&clip(raw, width), width, column.align);
                match status_color(raw) {
                    Some(code) if style.color && column.status => {
                        format!("\u{1b}[{code}m{cell}\u{1b}[0m")
                    }
                    _ => cell,
                }
            },
        )));
    }
    lines.join("\n")
}

/// Take the overflow out of shrinkable columns, widest first.
fn shrink(widths: &mut [usize], columns: &[Column], max_width: usize) {
    let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    let mut overflow = total.saturating_sub(max_width);

    let mut order: Vec<usize> = (0..widths.len())
        .filter(|&index| columns[index].shrinkable)
        .collect();
    order.sort_by_key(|&index| std::cmp::Reverse(widths[index]));

    for index in order {
        if overflow == 0 {
            break;
        }
        let floor = columns[index].header.chars().count().max(MIN_SHRUNK);
        let give = widths[index].saturating_sub(floor).min(overflow);
        widths[index] -= give;
        overflow -= give;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn pad(value: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{value:<width$}"),
        Align::Right => format!("{value:>width$}"),
    }
}

fn join(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join("  ").trim_end().to_string()
}

fn status_color(word: &str) -> Option<&'static str> {
    match word.trim().to_ascii_lowercase().as_str() {
        "active" | "approved" | "healthy" | "ok" | "yes" | "granted" => Some(GREEN),
        "draft" | "pending" | "under-review" => Some(YELLOW),
        "on-hold" | "rejected" | "denied" | "inactive" | "no" | "unreachable" => Some(RED),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct SiteRow {
        site: &'static str,
        status: &'static str,
        patients: u32,
    }

    impl Tabular for SiteRow {
        const COLUMNS: &'static [Column] = &[
            Column::wide("site"),
            Column::status("status"),
            Column::number("patients"),
        ];
        const EMPTY: &'static str = "No sites.";

        fn cells(&self) -> Vec<String> {
            vec![
                self.site.to_string(),
                self.status.to_string(),
                self.patients.to_string(),
            ]
        }
    }

    fn sites() -> Vec<SiteRow> {
        vec![
            SiteRow {
                site: "Johns Hopkins Hospital",
                status: "active",
                patients: 120,
            },
            SiteRow {
                site: "Mayo Clinic",
                status: "pending",
                patients: 8,
            },
        ]
    }

    #[test]
    fn columns_are_aligned_by_kind() {
        let table = render(&sites(), TableStyle::default());
        assert_eq!(
            table,
            [
                "site                    status   patients",
                "----------------------  -------  --------",
                "Johns Hopkins Hospital  active        120",
                "Mayo Clinic             pending         8",
            ]
            .join("\n")
        );
    }

    #[test]
    fn empty_rows_print_the_row_type_message() {
        assert_eq!(render::<SiteRow>(&[], TableStyle::default()), "No sites.");
    }

    #[test]
    fn only_status_columns_are_colored() {
        let table = render(
            &sites(),
            TableStyle {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[32mactive "));
        assert!(table.contains("\u{1b}[33mpending\u{1b}[0m"));
        assert!(!table.contains("\u{1b}[32mJohns"));
    }

    #[test]
    fn narrow_terminal_clips_wide_columns_only() {
        let table = render(
            &sites(),
            TableStyle {
                max_width: Some(30),
                color: false,
            },
        );
        let rows: Vec<&str> = table.lines().collect();
        assert!(rows[2].starts_with("Johns Hopk…  active"));
        assert!(rows[2].ends_with("active        120"));
    }

    #[test]
    fn unknown_words_keep_their_text() {
        assert_eq!(status_color("completed"), None);
        assert_eq!(status_color(" On-Hold "), Some(RED));
    }
}
