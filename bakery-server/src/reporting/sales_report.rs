//! Sales report rendering
//!
//! Summary block followed by one table row per sale, with the header
//! repeated after every page break.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    PdfPageIndex,
};

use crate::db::models::Sale;
use crate::sales::money;
use crate::utils::AppError;

use super::{MARGIN, PAGE_HEIGHT, PAGE_WIDTH, format_millis};

const ROW_HEIGHT: f32 = 7.0;
/// Below this the cursor wraps to a fresh page
const BOTTOM_LIMIT: f32 = 25.0;

/// Column layout: (header, x offset from left margin)
const COLUMNS: &[(&str, f32)] = &[
    ("Date/Time", 0.0),
    ("Customer", 38.0),
    ("Method", 76.0),
    ("Total", 102.0),
    ("Products", 126.0),
];

struct ReportWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl<'a> ReportWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        page: PdfPageIndex,
        layer: printpdf::PdfLayerIndex,
        font: IndirectFontRef,
        bold: IndirectFontRef,
    ) -> Self {
        Self {
            layer: doc.get_page(page).get_layer(layer),
            doc,
            font,
            bold,
            y: PAGE_HEIGHT.0 - MARGIN,
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, advance: f32) {
        self.layer
            .use_text(text, size, Mm(MARGIN + x), Mm(self.y), &self.font);
        self.y -= advance;
    }

    fn heading(&mut self, text: &str, size: f32, x: f32, advance: f32) {
        self.layer
            .use_text(text, size, Mm(MARGIN + x), Mm(self.y), &self.bold);
        self.y -= advance;
    }

    fn table_header(&mut self) {
        for (header, x) in COLUMNS {
            self.layer
                .use_text(*header, 9.0, Mm(MARGIN + x), Mm(self.y), &self.bold);
        }
        self.y -= ROW_HEIGHT;
    }

    /// Start a new page and repeat the table header
    fn page_break(&mut self) {
        let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT.0 - MARGIN;
        self.table_header();
    }

    fn row(&mut self, sale: &Sale) {
        if self.y < BOTTOM_LIMIT {
            self.page_break();
        }

        let products = sale
            .items
            .iter()
            .map(|i| format!("{} ({})", i.name, i.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        let products = truncate(&products, 48);

        let cells = [
            format_millis(sale.created_at),
            truncate(&sale.customer.name, 20),
            sale.payment_method.as_str().to_string(),
            format!("${:.2}", sale.total),
            products,
        ];

        for (cell, (_, x)) in cells.iter().zip(COLUMNS) {
            self.layer
                .use_text(cell.as_str(), 8.0, Mm(MARGIN + x), Mm(self.y), &self.font);
        }
        self.y -= ROW_HEIGHT;
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Render a sales report.
///
/// `title` and `subtitle` describe the period; `generated_by` names the
/// requesting staff member.
pub fn render_sales_report(
    title: &str,
    subtitle: &str,
    generated_by: &str,
    sales: &[Sale],
) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new("Sales report", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(format!("PDF font error: {e}")))?;

    let mut w = ReportWriter::new(&doc, page, layer, font, bold);

    w.heading("BAKERY POS", 18.0, 60.0, 9.0);
    w.heading(title, 14.0, 40.0, 7.0);
    w.text(subtitle, 10.0, 40.0, 7.0);
    w.text(&format!("Generated by: {generated_by}"), 9.0, 120.0, 10.0);

    if sales.is_empty() {
        w.text("No sales were found for the selected period.", 12.0, 30.0, 8.0);
    } else {
        // Summary block
        let total_revenue = money::to_f64(
            sales
                .iter()
                .map(|s| money::to_decimal(s.total))
                .sum::<rust_decimal::Decimal>(),
        );
        let transactions = sales.len();
        let average = if transactions > 0 {
            money::round2(total_revenue / transactions as f64)
        } else {
            0.0
        };

        w.heading("SUMMARY", 11.0, 0.0, 7.0);
        w.text(&format!("Total revenue: ${total_revenue:.2}"), 10.0, 0.0, 6.0);
        w.text(&format!("Transactions: {transactions}"), 10.0, 0.0, 6.0);
        w.text(&format!("Average per sale: ${average:.2}"), 10.0, 0.0, 10.0);

        w.table_header();
        for sale in sales {
            w.row(sale);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(format!("PDF rendering failed: {e}")))
}
