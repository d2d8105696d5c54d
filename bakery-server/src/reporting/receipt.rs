//! Receipt rendering
//!
//! One sale, one page. Header, customer block, item lines, total.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::db::models::Sale;
use crate::utils::AppError;

use super::{MARGIN, PAGE_HEIGHT, PAGE_WIDTH, format_millis};

/// Render a purchase receipt for a committed sale.
pub fn render_receipt(sale: &Sale) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new("Receipt", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(format!("PDF font error: {e}")))?;

    let layer = doc.get_page(page).get_layer(layer);
    let left = MARGIN;
    let mut y = PAGE_HEIGHT.0 - MARGIN - 10.0;

    layer.use_text("PURCHASE RECEIPT", 20.0, Mm(65.0), Mm(y), &bold);
    y -= 14.0;

    let sale_id = sale
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = |layer: &printpdf::PdfLayerReference, text: &str, y: &mut f32| {
        layer.use_text(text, 11.0, Mm(left), Mm(*y), &font);
        *y -= 6.0;
    };

    line(&layer, &format!("Date: {}", format_millis(sale.created_at)), &mut y);
    line(&layer, &format!("Sale ID: {}", sale_id), &mut y);
    line(&layer, &format!("Customer: {}", sale.customer.name), &mut y);
    if let Some(tax_id) = &sale.customer.tax_id {
        line(&layer, &format!("Tax ID: {}", tax_id), &mut y);
    }
    if let Some(phone) = &sale.customer.phone {
        line(&layer, &format!("Phone: {}", phone), &mut y);
    }
    if let Some(address) = &sale.customer.address {
        line(&layer, &format!("Address: {}", address), &mut y);
    }
    line(
        &layer,
        &format!("Payment method: {}", sale.payment_method.as_str()),
        &mut y,
    );
    line(&layer, &format!("Sold by: {}", sale.sold_by_name), &mut y);

    y -= 6.0;
    layer.use_text("Products:", 12.0, Mm(left), Mm(y), &bold);
    y -= 7.0;

    for item in &sale.items {
        layer.use_text(
            format!(
                "{} x {} = ${:.2}",
                item.name, item.quantity, item.line_total
            ),
            11.0,
            Mm(left + 4.0),
            Mm(y),
            &font,
        );
        y -= 6.0;
    }

    y -= 8.0;
    layer.use_text(
        format!("Total: ${:.2}", sale.total),
        14.0,
        Mm(140.0),
        Mm(y),
        &bold,
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(format!("PDF rendering failed: {e}")))
}
