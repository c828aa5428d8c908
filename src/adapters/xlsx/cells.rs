use crate::domain::model::SheetRow;
use crate::domain::services::normalize::clean;
use crate::utils::error::{EtlError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Zero-based column index from a cell reference: `"C7"` → 2, `"AA1"` → 26.
/// Returns `None` when the reference does not start with uppercase letters.
pub fn column_index(reference: &str) -> Option<u32> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_uppercase())
        .collect();
    if letters.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for letter in letters {
        index = index
            .checked_mul(26)?
            .checked_add(u32::from(letter - b'A') + 1)?;
    }
    Some(index - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Shared,
    Inline,
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Value,
    Formula,
    InlineText,
}

#[derive(Debug)]
struct PendingCell {
    reference: String,
    kind: CellKind,
    value: String,
    formula: String,
    inline: String,
}

impl PendingCell {
    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let mut reference = String::new();
        let mut kind = CellKind::Literal;

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => reference = attr.unescape_value()?.into_owned(),
                b"t" => {
                    kind = match attr.value.as_ref() {
                        b"s" => CellKind::Shared,
                        b"inlineStr" => CellKind::Inline,
                        _ => CellKind::Literal,
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            reference,
            kind,
            value: String::new(),
            formula: String::new(),
            inline: String::new(),
        })
    }

    fn push(&mut self, target: Capture, text: &str) {
        match target {
            Capture::Value => self.value.push_str(text),
            Capture::Formula => self.formula.push_str(text),
            Capture::InlineText => self.inline.push_str(text),
        }
    }

    /// Resolves the cell to `(column, cleaned text)`.
    fn finish(self, shared_strings: &[String]) -> Result<(Option<u32>, String)> {
        let text = match self.kind {
            CellKind::Inline => self.inline,
            CellKind::Literal => self.value,
            CellKind::Shared => {
                let raw = self.value.trim();
                if raw.is_empty() {
                    String::new()
                } else {
                    let index: usize = raw.parse().map_err(|_| EtlError::InvalidCell {
                        reference: self.reference.clone(),
                        message: format!("shared string index '{}' is not a number", raw),
                    })?;
                    shared_strings
                        .get(index)
                        .cloned()
                        .ok_or_else(|| EtlError::InvalidCell {
                            reference: self.reference.clone(),
                            message: format!(
                                "shared string index {} out of range ({} strings)",
                                index,
                                shared_strings.len()
                            ),
                        })?
                }
            }
        };

        // 沒有值時退回公式文字，不做運算
        let text = if text.is_empty() && self.kind != CellKind::Inline && !self.formula.is_empty() {
            self.formula
        } else {
            text
        };

        Ok((column_index(&self.reference), clean(&text)))
    }
}

/// Reads every `<row>` of a worksheet into column-indexed, cleaned cell text.
pub fn extract_rows(xml: &[u8], shared_strings: &[String]) -> Result<Vec<SheetRow>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut rows = Vec::new();
    let mut row: Option<SheetRow> = None;
    let mut cell: Option<PendingCell> = None;
    let mut capture: Option<Capture> = None;
    let mut in_inline = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(SheetRow::new()),
                b"c" => cell = Some(PendingCell::from_start(&e)?),
                b"v" if cell.is_some() => capture = Some(Capture::Value),
                b"f" if cell.is_some() => capture = Some(Capture::Formula),
                b"is" if cell.is_some() => in_inline = true,
                b"rPh" => in_phonetic = true,
                b"t" if in_inline && !in_phonetic => capture = Some(Capture::InlineText),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(SheetRow::new()),
                b"c" => {
                    let pending = PendingCell::from_start(&e)?;
                    store_cell(row.as_mut(), pending, shared_strings)?;
                }
                _ => {}
            },
            Event::Text(e) => {
                if let (Some(target), Some(pending)) = (capture, cell.as_mut()) {
                    pending.push(target, &e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let (Some(target), Some(pending)) = (capture, cell.as_mut()) {
                    pending.push(target, &String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"f" | b"t" => capture = None,
                b"rPh" => in_phonetic = false,
                b"is" => in_inline = false,
                b"c" => {
                    if let Some(pending) = cell.take() {
                        store_cell(row.as_mut(), pending, shared_strings)?;
                    }
                }
                b"row" => {
                    if let Some(done) = row.take() {
                        rows.push(done);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!("Extracted {} worksheet rows", rows.len());
    Ok(rows)
}

fn store_cell(row: Option<&mut SheetRow>, pending: PendingCell, shared_strings: &[String]) -> Result<()> {
    let Some(row) = row else {
        return Ok(());
    };

    let reference = pending.reference.clone();
    match pending.finish(shared_strings)? {
        (Some(column), text) => row.insert(column, text),
        (None, _) => tracing::trace!("Skipping cell with unusable reference '{}'", reference),
    }
    Ok(())
}
