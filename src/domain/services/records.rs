use crate::domain::model::{JournalRecord, LegacyEntry, SheetRow, TransformResult};
use crate::domain::services::columns::{header_labels, ColumnAliases, ColumnMap, Field};
use crate::domain::services::normalize::{json_text, normalize_year};

/// Builds journal records from worksheet rows. The first row is the header row.
pub fn records_from_rows(rows: &[SheetRow], aliases: &ColumnAliases) -> TransformResult {
    let Some((header, body)) = rows.split_first() else {
        tracing::warn!("Worksheet has no rows");
        return TransformResult {
            records: Vec::new(),
            skipped_rows: 0,
        };
    };

    let columns = aliases.resolve(&header_labels(header));
    if columns.column(Field::Title).is_none() {
        tracing::warn!("No title column found in header row; every row will be skipped");
    }
    for field in columns.unmapped() {
        tracing::debug!("Field {} has no column and stays empty", field);
    }

    build_records(body, &columns)
}

pub fn build_records(rows: &[SheetRow], columns: &ColumnMap) -> TransformResult {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped_rows = 0;

    for row in rows {
        let title = columns.value(row, Field::Title);
        if title.is_empty() {
            skipped_rows += 1;
            continue;
        }

        records.push(JournalRecord {
            title,
            rating: columns.value(row, Field::Rating),
            issn: columns.value(row, Field::Issn),
            issn_online: columns.value(row, Field::IssnOnline),
            publisher: columns.value(row, Field::Publisher),
            for_code: columns.value(row, Field::ForCode),
            year: normalize_year(&columns.value(row, Field::Year)),
        });
    }

    sort_records(&mut records);
    TransformResult {
        records,
        skipped_rows,
    }
}

pub fn records_from_legacy(entries: &[LegacyEntry]) -> TransformResult {
    let mut records = Vec::with_capacity(entries.len());
    let mut skipped_rows = 0;

    for entry in entries {
        let title = json_text(entry.name.as_ref());
        if title.is_empty() {
            skipped_rows += 1;
            continue;
        }

        let mut rating = json_text(entry.rating.as_ref());
        if rating.is_empty() {
            rating = json_text(entry.rank.as_ref());
        }

        records.push(JournalRecord {
            title,
            rating,
            ..JournalRecord::default()
        });
    }

    sort_records(&mut records);
    TransformResult {
        records,
        skipped_rows,
    }
}

/// Case-insensitive by title. The sort is stable, so duplicate titles keep input order.
pub fn sort_records(records: &mut [JournalRecord]) {
    records.sort_by_cached_key(|r| r.title.to_lowercase());
}
