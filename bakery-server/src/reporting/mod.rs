//! PDF reporting
//!
//! Renders committed sales into documents: per-sale receipts and paginated
//! sales reports. Reporting is read-only — it formats stored sale records
//! and never touches stock or totals.

pub mod receipt;
pub mod sales_report;

pub use receipt::render_receipt;
pub use sales_report::render_sales_report;

use printpdf::Mm;

/// A4 page size
pub(crate) const PAGE_WIDTH: Mm = Mm(210.0);
pub(crate) const PAGE_HEIGHT: Mm = Mm(297.0);
/// Outer margin
pub(crate) const MARGIN: f32 = 18.0;

/// Format a Unix-millis timestamp for display
pub(crate) fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
