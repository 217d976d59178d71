// src/extract/record.rs

use serde::{Deserialize, Serialize};

/// A birth-registration entry scraped from the verification result page.
///
/// Every field is `None` on the degraded path (result tables missing) and
/// `Some` (possibly empty) otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_nationality_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_nationality_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_nationality_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_nationality_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth_in_words: Option<String>,
}

/// Names a single `BirthRecord` slot so layouts can be written as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RegistrationDate,
    RegistrationOffice,
    IssueDate,
    OfficeAddress,
    DateOfBirth,
    BirthNumber,
    Sex,
    NameBn,
    NameEn,
    BirthPlaceBn,
    BirthPlaceEn,
    MotherNameBn,
    MotherNameEn,
    MotherNationalityBn,
    MotherNationalityEn,
    FatherNameBn,
    FatherNameEn,
    FatherNationalityBn,
    FatherNationalityEn,
    DateOfBirthInWords,
}

impl Field {
    /// The serialized (camelCase) key, used in logs and anomalies.
    pub fn key(self) -> &'static str {
        match self {
            Field::RegistrationDate => "registrationDate",
            Field::RegistrationOffice => "registrationOffice",
            Field::IssueDate => "issueDate",
            Field::OfficeAddress => "officeAddress",
            Field::DateOfBirth => "dateOfBirth",
            Field::BirthNumber => "birthNumber",
            Field::Sex => "sex",
            Field::NameBn => "nameBn",
            Field::NameEn => "nameEn",
            Field::BirthPlaceBn => "birthPlaceBn",
            Field::BirthPlaceEn => "birthPlaceEn",
            Field::MotherNameBn => "motherNameBn",
            Field::MotherNameEn => "motherNameEn",
            Field::MotherNationalityBn => "motherNationalityBn",
            Field::MotherNationalityEn => "motherNationalityEn",
            Field::FatherNameBn => "fatherNameBn",
            Field::FatherNameEn => "fatherNameEn",
            Field::FatherNationalityBn => "fatherNationalityBn",
            Field::FatherNationalityEn => "fatherNationalityEn",
            Field::DateOfBirthInWords => "dateOfBirthInWords",
        }
    }
}

impl BirthRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: String) {
        *self.slot_mut(field) = Some(value);
    }

    /// `true` when the page carried a result (the birth number was read).
    pub fn has_result(&self) -> bool {
        self.birth_number.is_some()
    }

    /// `true` when no field at all is present.
    pub fn is_empty(&self) -> bool {
        *self == BirthRecord::default()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::RegistrationDate => &self.registration_date,
            Field::RegistrationOffice => &self.registration_office,
            Field::IssueDate => &self.issue_date,
            Field::OfficeAddress => &self.office_address,
            Field::DateOfBirth => &self.date_of_birth,
            Field::BirthNumber => &self.birth_number,
            Field::Sex => &self.sex,
            Field::NameBn => &self.name_bn,
            Field::NameEn => &self.name_en,
            Field::BirthPlaceBn => &self.birth_place_bn,
            Field::BirthPlaceEn => &self.birth_place_en,
            Field::MotherNameBn => &self.mother_name_bn,
            Field::MotherNameEn => &self.mother_name_en,
            Field::MotherNationalityBn => &self.mother_nationality_bn,
            Field::MotherNationalityEn => &self.mother_nationality_en,
            Field::FatherNameBn => &self.father_name_bn,
            Field::FatherNameEn => &self.father_name_en,
            Field::FatherNationalityBn => &self.father_nationality_bn,
            Field::FatherNationalityEn => &self.father_nationality_en,
            Field::DateOfBirthInWords => &self.date_of_birth_in_words,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::RegistrationDate => &mut self.registration_date,
            Field::RegistrationOffice => &mut self.registration_office,
            Field::IssueDate => &mut self.issue_date,
            Field::OfficeAddress => &mut self.office_address,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::BirthNumber => &mut self.birth_number,
            Field::Sex => &mut self.sex,
            Field::NameBn => &mut self.name_bn,
            Field::NameEn => &mut self.name_en,
            Field::BirthPlaceBn => &mut self.birth_place_bn,
            Field::BirthPlaceEn => &mut self.birth_place_en,
            Field::MotherNameBn => &mut self.mother_name_bn,
            Field::MotherNameEn => &mut self.mother_name_en,
            Field::MotherNationalityBn => &mut self.mother_nationality_bn,
            Field::MotherNationalityEn => &mut self.mother_nationality_en,
            Field::FatherNameBn => &mut self.father_name_bn,
            Field::FatherNameEn => &mut self.father_name_en,
            Field::FatherNationalityBn => &mut self.father_nationality_bn,
            Field::FatherNationalityEn => &mut self.father_nationality_en,
            Field::DateOfBirthInWords => &mut self.date_of_birth_in_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let mut record = BirthRecord::default();
        record.set(Field::BirthNumber, "19902692512345678".to_string());
        record.set(Field::DateOfBirthInWords, "Fifth of May Nineteen Ninety".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "birthNumber": "19902692512345678",
                "dateOfBirthInWords": "Fifth of May Nineteen Ninety",
            })
        );
    }

    #[test]
    fn test_empty_and_has_result() {
        let mut record = BirthRecord::default();
        assert!(record.is_empty());
        assert!(!record.has_result());

        record.set(Field::Sex, String::new());
        assert!(!record.is_empty());
        assert!(!record.has_result());

        record.set(Field::BirthNumber, "1".to_string());
        assert!(record.has_result());
        assert_eq!(record.get(Field::BirthNumber), Some("1"));
        assert_eq!(record.get(Field::NameEn), None);
    }
}
