// src/extract/layout.rs

//! Where each record field sits on the verification result page.
//!
//! The page renders two `table.table` elements: a registration summary
//! (values on rows 1 and 3, labels on rows 0 and 2) and a bilingual person
//! table whose rows carry `label-bn | value-bn | label-en | value-en`.
//! A layout change on the site should only need edits here.

use super::record::Field;

/// How a raw cell is turned into a record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// `<day> <month-name> <year>` → `DD/MM/YYYY`.
    Date,
    /// Free text, rewritten according to the configured normalize mode.
    Text,
    /// Free text ending in the Bangla country name.
    PlaceBn,
    /// Free text ending in the English country name.
    PlaceEn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub table: usize,
    pub row: usize,
    pub cell: usize,
    pub field: Field,
    pub transform: Transform,
}

const fn spec(table: usize, row: usize, cell: usize, field: Field, transform: Transform) -> FieldSpec {
    FieldSpec {
        table,
        row,
        cell,
        field,
        transform,
    }
}

/// Minimum number of result tables a page must carry to be read at all.
pub const REQUIRED_TABLES: usize = 2;

pub static BIRTH_RECORD_LAYOUT: &[FieldSpec] = &[
    // registration summary
    spec(0, 1, 0, Field::RegistrationDate, Transform::Date),
    spec(0, 1, 1, Field::RegistrationOffice, Transform::Text),
    spec(0, 1, 2, Field::IssueDate, Transform::Date),
    spec(0, 1, 3, Field::OfficeAddress, Transform::Text),
    spec(0, 3, 0, Field::DateOfBirth, Transform::Date),
    spec(0, 3, 1, Field::BirthNumber, Transform::Text),
    spec(0, 3, 2, Field::Sex, Transform::Text),
    // person details
    spec(1, 0, 1, Field::NameBn, Transform::Text),
    spec(1, 0, 3, Field::NameEn, Transform::Text),
    spec(1, 1, 1, Field::BirthPlaceBn, Transform::PlaceBn),
    spec(1, 1, 3, Field::BirthPlaceEn, Transform::PlaceEn),
    spec(1, 2, 1, Field::MotherNameBn, Transform::Text),
    spec(1, 2, 3, Field::MotherNameEn, Transform::Text),
    spec(1, 3, 1, Field::MotherNationalityBn, Transform::Text),
    spec(1, 3, 3, Field::MotherNationalityEn, Transform::Text),
    spec(1, 4, 1, Field::FatherNameBn, Transform::Text),
    spec(1, 4, 3, Field::FatherNameEn, Transform::Text),
    spec(1, 5, 1, Field::FatherNationalityBn, Transform::Text),
    spec(1, 5, 3, Field::FatherNationalityEn, Transform::Text),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layout_has_no_duplicate_fields_or_cells() {
        let fields: HashSet<_> = BIRTH_RECORD_LAYOUT.iter().map(|s| s.field.key()).collect();
        let cells: HashSet<_> = BIRTH_RECORD_LAYOUT
            .iter()
            .map(|s| (s.table, s.row, s.cell))
            .collect();
        assert_eq!(fields.len(), BIRTH_RECORD_LAYOUT.len());
        assert_eq!(cells.len(), BIRTH_RECORD_LAYOUT.len());
    }

    #[test]
    fn test_layout_stays_within_required_tables() {
        assert!(BIRTH_RECORD_LAYOUT
            .iter()
            .all(|s| s.table < REQUIRED_TABLES));
    }

    #[test]
    fn test_words_field_is_derived_not_read() {
        assert!(BIRTH_RECORD_LAYOUT
            .iter()
            .all(|s| s.field != Field::DateOfBirthInWords));
    }
}
