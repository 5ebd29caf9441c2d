//! PDF report exporter: fixed layout with a summary header followed by the
//! filtered transaction table, written as `relatorio_extrato_<ts>.pdf`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use extrato_core::{BankStatementData, FilterStats, Transaction, format_brl};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 14.0;
// Column x positions: Data, Descrição, Tipo, Valor.
const COLS: [f32; 4] = [14.0, 45.0, 130.0, 160.0];
const TABLE_TOP: f32 = 55.0;
const ROW_STEP: f32 = 7.0;
const PAGE_BOTTOM: f32 = 280.0;

/// Render and save the report. A no-op (`Ok(None)`) when the filtered set
/// is empty; there is nothing to render.
pub fn export_report(
    data: &BankStatementData,
    filtered: &[&Transaction],
    search_term: &str,
    stats: &FilterStats,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    if filtered.is_empty() {
        return Ok(None);
    }

    let bytes = render_report(data, filtered, search_term, stats)?;
    let name = format!("relatorio_extrato_{}.pdf", Utc::now().timestamp_millis());
    let path = out_dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("gravando {}", path.display()))?;
    Ok(Some(path))
}

/// Render the report into PDF bytes.
pub fn render_report(
    data: &BankStatementData,
    filtered: &[&Transaction],
    search_term: &str,
    stats: &FilterStats,
) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new("Relatório de Extrato", Mm(PAGE_W), Mm(PAGE_H), "Camada 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(page).get_layer(layer);

    let bank = if data.bank_name.is_empty() { "Banco" } else { &data.bank_name };
    let term = search_term.trim();
    let filter_label = if term.is_empty() { "Nenhum" } else { term };

    layer.use_text(
        format!("Relatório de Extrato: {bank}"),
        18.0,
        Mm(MARGIN),
        from_top(20.0),
        &bold,
    );
    layer.use_text(
        format!("Filtro de busca: {filter_label}"),
        12.0,
        Mm(MARGIN),
        from_top(30.0),
        &regular,
    );
    layer.use_text(
        format!("Total de itens: {}", stats.count),
        12.0,
        Mm(MARGIN),
        from_top(38.0),
        &regular,
    );
    layer.use_text(
        format!("Valor Total: R$ {}", format_brl(stats.total)),
        12.0,
        Mm(MARGIN),
        from_top(46.0),
        &regular,
    );

    let mut y = TABLE_TOP;
    draw_table_header(&layer, &bold, y);
    y += ROW_STEP + 1.0;

    for row in report_rows(filtered) {
        if y > PAGE_BOTTOM {
            let (next_page, next_layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Camada 1");
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = 20.0;
            draw_table_header(&layer, &bold, y);
            y += ROW_STEP + 1.0;
        }

        for (col, cell) in COLS.iter().zip(row.iter()) {
            layer.use_text(cell.clone(), 10.0, Mm(*col), from_top(y), &regular);
        }
        y += ROW_STEP;
    }

    let mut bytes = Vec::new();
    doc.save(&mut std::io::BufWriter::new(&mut bytes))
        .context("renderizando PDF do relatório")?;
    Ok(bytes)
}

/// Table cells for the filtered transactions, in filtered order. Values are
/// signed by the transaction tag, never by the stored amount.
pub fn report_rows(filtered: &[&Transaction]) -> Vec<[String; 4]> {
    filtered
        .iter()
        .map(|t| {
            [
                t.date.clone(),
                truncate(&t.description, 52),
                t.kind.label().to_string(),
                format!("{} R$ {}", t.kind.sign(), format_brl(t.amount)),
            ]
        })
        .collect()
}

fn draw_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    for (col, title) in COLS.iter().zip(["Data", "Descrição", "Tipo", "Valor"]) {
        layer.use_text(title, 10.0, Mm(*col), from_top(y), bold);
    }
}

// printpdf measures y from the bottom edge; the layout is stated from the top.
fn from_top(mm: f32) -> Mm {
    Mm(PAGE_H - mm)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
