//! Report Handlers

use axum::http::{HeaderName, header};
use axum::{
    Extension,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::sale::SaleFilter;
use crate::db::repository::{SaleRepository, parse_record_id};
use crate::reporting::render_sales_report;
use crate::utils::{AppError, AppResult, time};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// `today` (default) or `all`
    #[serde(default)]
    pub view_mode: Option<String>,
}

/// GET /api/reports/sales — sales report PDF
///
/// `today`: the current day — admins get the whole shop, other staff only
/// their own sales. `all`: the complete history, admin only.
pub async fn sales_report(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> AppResult<([(HeaderName, String); 2], Vec<u8>)> {
    let view_mode = query.view_mode.as_deref().unwrap_or("today");
    let repo = SaleRepository::new(state.get_db());

    let (sales, title, subtitle) = match view_mode {
        "all" => {
            if !user.is_admin() {
                return Err(AppError::forbidden("Admin role required"));
            }
            let sales = repo.find_filtered(SaleFilter::default()).await?;
            (
                sales,
                "FULL SALES REPORT".to_string(),
                format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M")),
            )
        }
        _ => {
            let (start, end) = time::today_bounds_millis();
            let sold_by = if user.is_admin() {
                None
            } else {
                Some(parse_record_id("staff", &user.id).map_err(|_| {
                    AppError::internal(format!("Malformed staff id in token: {}", user.id))
                })?)
            };
            let sales = repo
                .find_filtered(SaleFilter {
                    from_millis: Some(start),
                    to_millis: Some(end),
                    sold_by,
                    ..Default::default()
                })
                .await?;
            let title = if user.is_admin() {
                "DAILY SALES REPORT"
            } else {
                "MY SALES TODAY"
            };
            (
                sales,
                title.to_string(),
                format!("Date: {}", Utc::now().format("%Y-%m-%d")),
            )
        }
    };

    let generated_by = format!("{} ({})", user.name, user.role);
    let bytes = render_sales_report(&title, &subtitle, &generated_by, &sales)?;

    let filename = format!(
        "sales-report-{}-{}.pdf",
        view_mode,
        Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
