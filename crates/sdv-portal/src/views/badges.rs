use chrono::{DateTime, Utc};
use sdv_core::enums::{FileStatus, SiteStatus, StudyStatus};

#[must_use]
pub const fn study_status(status: StudyStatus) -> &'static str {
    match status {
        StudyStatus::Active => "🟢",
        StudyStatus::Draft => "🟡",
        StudyStatus::Completed => "⚪",
        StudyStatus::OnHold => "🔴",
    }
}

#[must_use]
pub const fn site_status(status: SiteStatus) -> &'static str {
    match status {
        SiteStatus::Active => "🟢",
        SiteStatus::Pending => "🟡",
        SiteStatus::Inactive => "⚪",
    }
}

#[must_use]
pub const fn file_status(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Approved => "✅",
        FileStatus::Pending => "⏳",
        FileStatus::UnderReview => "🔍",
        FileStatus::Rejected => "❌",
    }
}

/// `🟢 ACTIVE`, `🔴 ON-HOLD`.
#[must_use]
pub fn study_status_label(status: StudyStatus) -> String {
    format!(
        "{} {}",
        study_status(status),
        status.as_str().to_uppercase()
    )
}

/// Bytes in the largest unit that keeps the value at or above one.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Kilobytes with two decimals, as the document browser shows them.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn size_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// `1/15/2024`
#[must_use]
pub fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}
