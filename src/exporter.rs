//! Spreadsheet export of the ranked offer list.
//!
//! Fixed column order: name, price-before, price-current, discount label,
//! purchase link, score. The link is written verbatim so spreadsheet
//! applications render it as a clickable reference.

use crate::model::{ExportError, ScoredOffer};
use std::io::Write;

const HEADERS: [&str; 6] = [
    "Nombre",
    "Precio antes",
    "Precio actual",
    "Descuento",
    "Link de compra",
    "Score relevancia",
];

pub fn write_spreadsheet(offers: &[ScoredOffer], path: &str) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(&mut writer, offers)?;
    writer.flush()?;
    Ok(())
}

fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    offers: &[ScoredOffer],
) -> Result<(), ExportError> {
    writer.write_record(HEADERS)?;
    for offer in offers {
        let r = &offer.record;
        let score = format!("{:.6}", offer.score);
        writer.write_record([
            r.name.as_deref().unwrap_or(""),
            r.price_before.as_deref().unwrap_or(""),
            r.price_current.as_deref().unwrap_or(""),
            r.discount_label.as_deref().unwrap_or(""),
            r.purchase_link.as_deref().unwrap_or(""),
            score.as_str(),
        ])?;
    }
    Ok(())
}
