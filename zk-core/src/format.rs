// SPDX-License-Identifier: AGPL-3.0-or-later
//! Display formatting for sizes, dates and card ids

use chrono::{DateTime, Utc};
use rand::Rng;

/// Shown in place of a date when the folder holds no files
pub const NO_FILES_PLACEHOLDER: &str = "Нет файлов";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count on a base-1024 ladder, two decimals at most
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit < SIZE_UNITS.len() - 1 && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = (bytes as f64 / scale as f64 * 100.0).round() / 100.0;
    format!("{} {}", value, SIZE_UNITS[unit])
}

/// Short ru-RU date, `DD.MM.YYYY`
pub fn format_short_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Card identifier `YYYY.MM.DD.NNN` with a random three-digit suffix
pub fn card_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..1000);
    format!("{}.{:03}", now.format("%Y.%m.%d"), suffix)
}
