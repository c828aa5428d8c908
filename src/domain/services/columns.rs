use crate::domain::model::SheetRow;
use crate::domain::services::normalize::{clean, clean_opt};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Output fields filled from worksheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Rating,
    Issn,
    IssnOnline,
    Publisher,
    ForCode,
    Year,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Rating,
        Field::Issn,
        Field::IssnOnline,
        Field::Publisher,
        Field::ForCode,
        Field::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Rating => "rating",
            Field::Issn => "issn",
            Field::IssnOnline => "issn_online",
            Field::Publisher => "publisher",
            Field::ForCode => "for_code",
            Field::Year => "year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header aliases accepted for each field, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    table: Vec<(Field, Vec<String>)>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self::abdc()
    }
}

impl ColumnAliases {
    /// Header names used by the published ABDC list.
    pub fn abdc() -> Self {
        let table: [(Field, &[&str]); 7] = [
            (Field::Title, &["journal title", "title", "journal"]),
            (Field::Rating, &["2022 rating", "rating"]),
            (Field::Issn, &["issn"]),
            (
                Field::IssnOnline,
                &["issn online", "online issn", "eissn", "e-issn"],
            ),
            (Field::Publisher, &["publisher"]),
            (
                Field::ForCode,
                &["for", "for code", "for code(s)", "for1", "for 1"],
            ),
            (Field::Year, &["year inception", "year"]),
        ];

        Self {
            table: table
                .into_iter()
                .map(|(field, aliases)| {
                    (field, aliases.iter().map(|a| a.to_string()).collect())
                })
                .collect(),
        }
    }

    pub fn aliases(&self, field: Field) -> &[String] {
        self.table
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Replaces the aliases of one field. Blank aliases are dropped.
    pub fn set<I, S>(&mut self, field: Field, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases: Vec<String> = aliases
            .into_iter()
            .map(|a| clean(a.as_ref()).to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        match self.table.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = aliases,
            None => self.table.push((field, aliases)),
        }
    }

    /// Picks, for every field, the leftmost header matching one of its aliases.
    pub fn resolve(&self, headers: &BTreeMap<u32, String>) -> ColumnMap {
        let mut columns = BTreeMap::new();

        for (field, aliases) in &self.table {
            let accepted: HashSet<String> = aliases.iter().map(|a| a.to_lowercase()).collect();
            let found = headers
                .iter()
                .find(|(_, label)| accepted.contains(label.as_str()))
                .map(|(col, _)| *col);

            match found {
                Some(col) => {
                    tracing::debug!("Column {} mapped to field {}", col, field);
                    columns.insert(*field, col);
                }
                None => tracing::debug!("No header matches field {}", field),
            }
        }

        ColumnMap { columns }
    }
}

impl Validate for ColumnAliases {
    fn validate(&self) -> Result<()> {
        for field in Field::ALL {
            let joined = self.aliases(field).join(", ");
            validate_non_empty_string(&format!("columns.{}", field), &joined)?;
        }
        Ok(())
    }
}

/// Lowercased, cleaned header labels; columns with an empty header are left out.
pub fn header_labels(row: &SheetRow) -> BTreeMap<u32, String> {
    row.iter()
        .map(|(col, label)| (col, clean(label).to_lowercase()))
        .filter(|(_, label)| !label.is_empty())
        .collect()
}

/// Field → worksheet column, as resolved from the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<Field, u32>,
}

impl ColumnMap {
    pub fn column(&self, field: Field) -> Option<u32> {
        self.columns.get(&field).copied()
    }

    /// Cleaned cell text for `field`, empty when the field has no column.
    pub fn value(&self, row: &SheetRow, field: Field) -> String {
        match self.column(field) {
            Some(col) => clean_opt(row.get(col)),
            None => String::new(),
        }
    }

    pub fn unmapped(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.columns.contains_key(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(row: SheetRow) -> BTreeMap<u32, String> {
        header_labels(&row)
    }

    #[test]
    fn test_header_labels_lowercase_and_skip_empty() {
        let row = SheetRow::from([(0, " Journal  Title "), (1, ""), (2, "2022 RATING"), (3, "  ")]);
        let labels = header_labels(&row);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[&0], "journal title");
        assert_eq!(labels[&2], "2022 rating");
    }

    #[test]
    fn test_resolve_abdc_headers() {
        let labels = headers(SheetRow::from([
            (0, "Journal Title"),
            (1, "Publisher"),
            (2, "ISSN"),
            (3, "ISSN Online"),
            (4, "Year Inception"),
            (5, "FoR"),
            (6, "2022 rating"),
        ]));
        let map = ColumnAliases::abdc().resolve(&labels);

        assert_eq!(map.column(Field::Title), Some(0));
        assert_eq!(map.column(Field::Publisher), Some(1));
        assert_eq!(map.column(Field::Issn), Some(2));
        assert_eq!(map.column(Field::IssnOnline), Some(3));
        assert_eq!(map.column(Field::Year), Some(4));
        assert_eq!(map.column(Field::ForCode), Some(5));
        assert_eq!(map.column(Field::Rating), Some(6));
        assert!(map.unmapped().is_empty());
    }

    #[test]
    fn test_resolve_leftmost_match_wins() {
        let labels = headers(SheetRow::from([(1, "Journal"), (4, "Title")]));
        let map = ColumnAliases::abdc().resolve(&labels);

        assert_eq!(map.column(Field::Title), Some(1));
    }

    #[test]
    fn test_unmatched_field_yields_empty_values() {
        let labels = headers(SheetRow::from([(0, "Title")]));
        let map = ColumnAliases::abdc().resolve(&labels);
        let row = SheetRow::from([(0, "Alpha"), (1, "A")]);

        assert_eq!(map.column(Field::Rating), None);
        assert_eq!(map.value(&row, Field::Title), "Alpha");
        assert_eq!(map.value(&row, Field::Rating), "");
        assert!(map.unmapped().contains(&Field::Rating));
    }

    #[test]
    fn test_set_overrides_aliases() {
        let mut aliases = ColumnAliases::abdc();
        aliases.set(Field::Rating, ["  Quality   Rank ", ""]);

        assert_eq!(aliases.aliases(Field::Rating), ["quality rank".to_string()]);

        let labels = headers(SheetRow::from([(0, "Title"), (1, "Quality Rank"), (2, "Rating")]));
        let map = aliases.resolve(&labels);
        assert_eq!(map.column(Field::Rating), Some(1));
    }

    #[test]
    fn test_validate_rejects_empty_alias_list() {
        let mut aliases = ColumnAliases::abdc();
        assert!(aliases.validate().is_ok());

        aliases.set(Field::Title, Vec::<String>::new());
        assert!(aliases.validate().is_err());
    }
}
