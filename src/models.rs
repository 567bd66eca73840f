use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::ServiceType;
use crate::validation::is_unsupported_state_error;

/// Decodes a field, falling back to its default when it is `null` or of the wrong type.
///
/// Only malformed JSON fails; a mistyped field never discards its parent.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`], applied to each element so one bad entry does not drop the rest.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

// ============ Request ============

/// Payload posted to the screening endpoint.
///
/// Optional fields that are `None` or empty are left out of the JSON;
/// `services` and `documentCategoryCode` are always sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningRequest {
    #[serde(skip_serializing_if = "is_blank")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    /// Date of birth, in whatever format the service accepts.
    #[serde(skip_serializing_if = "is_blank")]
    pub date_of_births: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub id_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub ssn: Option<String>,
    pub services: Vec<ServiceType>,
    #[serde(skip_serializing_if = "is_blank")]
    pub driver_license_number: Option<String>,
    pub document_category_code: u32,
    #[serde(skip_serializing_if = "is_blank")]
    pub driver_license_issue_date: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub driver_license_expire_date: Option<String>,
    /// Caller-side reference echoed back in the transaction detail.
    #[serde(skip_serializing_if = "is_blank")]
    pub reference_id: Option<String>,
}

impl ScreeningRequest {
    /// Creates an empty request for the given services.
    pub fn new(services: impl IntoIterator<Item = ServiceType>) -> Self {
        Self {
            services: services.into_iter().collect(),
            ..Default::default()
        }
    }
}

// ============ Response ============

/// Outcome of one requested screening service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningResult {
    #[serde(
        rename = "serviceID",
        alias = "ServiceID",
        alias = "serviceId",
        deserialize_with = "lenient"
    )]
    pub service_id: String,
    #[serde(rename = "serviceName", alias = "ServiceName", deserialize_with = "lenient")]
    pub service_name: String,
    #[serde(
        rename = "serviceDescription",
        alias = "ServiceDescription",
        deserialize_with = "lenient"
    )]
    pub service_description: String,
    #[serde(alias = "Error", deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(alias = "Success", deserialize_with = "lenient")]
    pub success: bool,
    #[serde(alias = "Profiles", deserialize_with = "lenient_seq")]
    pub profiles: Vec<Profile>,
}

impl ScreeningResult {
    /// The known service this result belongs to, if the echoed id is recognised.
    pub fn service_type(&self) -> Option<ServiceType> {
        ServiceType::from_id(&self.service_id)
    }

    /// Whether the service returned at least one candidate profile.
    pub fn has_matches(&self) -> bool {
        !self.profiles.is_empty()
    }

    /// Whether the service declined because the requested state is not supported yet.
    pub fn is_unsupported_state(&self) -> bool {
        !self.success
            && self
                .error
                .as_deref()
                .is_some_and(is_unsupported_state_error)
    }
}

/// A candidate identity matched by the remote service.
///
/// Keys are accepted in camelCase or PascalCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "InternalId", deserialize_with = "lenient")]
    pub internal_id: Option<String>,
    #[serde(alias = "FirstName", deserialize_with = "lenient")]
    pub first_name: Option<String>,
    #[serde(alias = "MiddleName", deserialize_with = "lenient")]
    pub middle_name: Option<String>,
    #[serde(alias = "LastName", deserialize_with = "lenient")]
    pub last_name: Option<String>,
    #[serde(
        alias = "Aliases",
        deserialize_with = "lenient_seq",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub aliases: Vec<String>,
    #[serde(alias = "DateOfBirths", deserialize_with = "lenient")]
    pub date_of_births: Option<String>,
    #[serde(alias = "Address", deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(alias = "CountryName", deserialize_with = "lenient")]
    pub country_name: Option<String>,
    #[serde(alias = "CountryCode", deserialize_with = "lenient")]
    pub country_code: Option<String>,
    #[serde(alias = "Street1", deserialize_with = "lenient")]
    pub street1: Option<String>,
    #[serde(alias = "Street2", deserialize_with = "lenient")]
    pub street2: Option<String>,
    #[serde(alias = "City", deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(alias = "State", deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(alias = "ZipCode", deserialize_with = "lenient")]
    pub zip_code: Option<String>,
    #[serde(alias = "County", deserialize_with = "lenient")]
    pub county: Option<String>,
    #[serde(alias = "ConvictionType", deserialize_with = "lenient")]
    pub conviction_type: Option<String>,
    #[serde(alias = "Offenses", deserialize_with = "lenient_seq")]
    pub offenses: Vec<Offense>,
    #[serde(alias = "PhotoUrl", deserialize_with = "lenient")]
    pub photo_url: Option<String>,
    #[serde(alias = "Source", deserialize_with = "lenient")]
    pub source: Option<String>,
    #[serde(alias = "VerificationResult", deserialize_with = "lenient")]
    pub verification_result: Option<VerificationResult>,
    #[serde(alias = "DriversLicenseVerificationResult", deserialize_with = "lenient")]
    pub drivers_license_verification_result: Option<DriversLicenseVerificationResult>,
}

impl Profile {
    /// First, middle and last name joined by single spaces, skipping missing parts.
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Criminal record detail attached to a profile.
///
/// Keys are accepted in camelCase or PascalCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Offense {
    #[serde(alias = "Title", deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(alias = "Class", deserialize_with = "lenient")]
    pub class: Option<String>,
    #[serde(alias = "Code", deserialize_with = "lenient")]
    pub code: Option<String>,
    #[serde(alias = "Section", deserialize_with = "lenient")]
    pub section: Option<String>,
    #[serde(alias = "Description", deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(alias = "CaseNumber", deserialize_with = "lenient")]
    pub case_number: Option<String>,
    #[serde(alias = "Jurisdiction", deserialize_with = "lenient")]
    pub jurisdiction: Option<String>,
    #[serde(alias = "AgeOfVictim", deserialize_with = "lenient")]
    pub age_of_victim: Option<String>,
    #[serde(alias = "AdmissionDate", deserialize_with = "lenient")]
    pub admission_date: Option<String>,
    #[serde(alias = "ArrestingAgency", deserialize_with = "lenient")]
    pub arresting_agency: Option<String>,
    #[serde(alias = "Category", deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(alias = "ChargeFilingDate", deserialize_with = "lenient")]
    pub charge_filing_date: Option<String>,
    #[serde(alias = "ClosedDate", deserialize_with = "lenient")]
    pub closed_date: Option<String>,
    #[serde(alias = "Counts", deserialize_with = "lenient")]
    pub counts: Option<String>,
    #[serde(alias = "Court", deserialize_with = "lenient")]
    pub court: Option<String>,
    #[serde(alias = "DateConvicted", deserialize_with = "lenient")]
    pub date_convicted: Option<String>,
    #[serde(alias = "DateOfCrime", deserialize_with = "lenient")]
    pub date_of_crime: Option<String>,
    #[serde(alias = "DateOfWarrant", deserialize_with = "lenient")]
    pub date_of_warrant: Option<String>,
    #[serde(alias = "Disposition", deserialize_with = "lenient")]
    pub disposition: Option<String>,
    #[serde(alias = "DispositionDate", deserialize_with = "lenient")]
    pub disposition_date: Option<String>,
    #[serde(alias = "Facility", deserialize_with = "lenient")]
    pub facility: Option<String>,
    #[serde(alias = "PrisonerNumber", deserialize_with = "lenient")]
    pub prisoner_number: Option<String>,
    #[serde(alias = "RelationshipToVictim", deserialize_with = "lenient")]
    pub relationship_to_victim: Option<String>,
    #[serde(alias = "ReleaseDate", deserialize_with = "lenient")]
    pub release_date: Option<String>,
    #[serde(alias = "Sentence", deserialize_with = "lenient")]
    pub sentence: Option<String>,
    #[serde(alias = "SentenceDate", deserialize_with = "lenient")]
    pub sentence_date: Option<String>,
    #[serde(alias = "SexOfVictim", deserialize_with = "lenient")]
    pub sex_of_victim: Option<String>,
    #[serde(alias = "Subsection", deserialize_with = "lenient")]
    pub subsection: Option<String>,
    #[serde(alias = "WarrantDate", deserialize_with = "lenient")]
    pub warrant_date: Option<String>,
    #[serde(alias = "WarrantNumber", deserialize_with = "lenient")]
    pub warrant_number: Option<String>,
    #[serde(alias = "WeaponsUsed", deserialize_with = "lenient")]
    pub weapons_used: Option<String>,
}

// ============ Identity fraud ============

/// Identity fraud verification attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationResult {
    #[serde(deserialize_with = "lenient")]
    pub verified: bool,
    #[serde(deserialize_with = "lenient")]
    pub data: VerificationData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerificationData {
    #[serde(deserialize_with = "lenient")]
    pub workflow_outcome: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub primary_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub transaction_detail: TransactionDetail,
    #[serde(deserialize_with = "lenient")]
    pub address_verification_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub address_unit_mismatch_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub address_type_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub address_high_risk_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub driver_license_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub ssn_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub ssn_detail: SsnDetail,
    #[serde(deserialize_with = "lenient_seq")]
    pub ssn_finder_details: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub date_of_birth_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub ofac_validation: OfacValidation,
    #[serde(deserialize_with = "lenient_seq")]
    pub questions: Vec<Question>,
}

/// A `{code, message}` outcome pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningMessage {
    #[serde(deserialize_with = "lenient")]
    pub message: String,
    #[serde(deserialize_with = "lenient")]
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionDetail {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub date: String,
    #[serde(deserialize_with = "lenient")]
    pub customer_reference: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub errors: Vec<String>,
    #[serde(deserialize_with = "lenient_seq")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SsnDetail {
    #[serde(deserialize_with = "lenient")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient")]
    pub middle_initial: String,
    #[serde(deserialize_with = "lenient")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient")]
    pub street: String,
    #[serde(deserialize_with = "lenient")]
    pub city: String,
    #[serde(deserialize_with = "lenient")]
    pub state: String,
    #[serde(deserialize_with = "lenient")]
    pub zip_code: String,
    #[serde(deserialize_with = "lenient")]
    pub zip_plus_four: String,
    #[serde(deserialize_with = "lenient")]
    pub area_code: String,
    #[serde(deserialize_with = "lenient")]
    pub phone: String,
    #[serde(deserialize_with = "lenient")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub date_of_birth_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub reported_date: ScreeningDate,
    #[serde(deserialize_with = "lenient")]
    pub last_touched_date: ScreeningDate,
}

/// A date split into the string parts the service reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningDate {
    #[serde(deserialize_with = "lenient")]
    pub day: String,
    #[serde(deserialize_with = "lenient")]
    pub month: String,
    #[serde(deserialize_with = "lenient")]
    pub year: String,
}

impl ScreeningDate {
    /// Converts to a calendar date. A missing day defaults to the first of the month.
    ///
    /// Returns `None` if the year or month is missing or the date does not exist.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let year = self.year.trim().parse::<i32>().ok()?;
        let month = self.month.trim().parse::<u32>().ok()?;
        let day = match self.day.trim() {
            "" => 1,
            day => day.parse::<u32>().ok()?,
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfacValidation {
    #[serde(deserialize_with = "lenient")]
    pub ofac_validation_result: ScreeningMessage,
    #[serde(deserialize_with = "lenient")]
    pub ofac_record: String,
}

/// Knowledge-based verification question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub question_type: u32,
    #[serde(deserialize_with = "lenient_seq")]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn correct_answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(|answer| answer.is_correct)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Answer {
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub is_correct: bool,
}

// ============ Driver's license ============

/// Field-by-field match flags of a driver's-license verification.
///
/// `None` means the issuing state did not report on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriversLicenseVerificationResult {
    #[serde(deserialize_with = "lenient")]
    pub document_category_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_last_name_exact_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_last_name_fuzzy_primary_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_last_name_fuzzy_alternate_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_first_name_exact_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_first_name_fuzzy_primary_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_first_name_fuzzy_alternate_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_middle_name_exact_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_middle_name_fuzzy_primary_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_middle_name_fuzzy_alternate_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_middle_initial_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_birth_date_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub driver_license_issue_date_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub driver_license_expiration_date_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub driver_license_number_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub address_line1_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub address_line2_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub address_city_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub address_state_code_match: Option<bool>,
    #[serde(rename = "addressZIP5Match", deserialize_with = "lenient")]
    pub address_zip5_match: Option<bool>,
    #[serde(rename = "addressZIP4Match", deserialize_with = "lenient")]
    pub address_zip4_match: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub person_sex_code_match: Option<bool>,
}

impl DriversLicenseVerificationResult {
    fn flags(&self) -> [(&'static str, Option<bool>); 22] {
        [
            ("documentCategoryMatch", self.document_category_match),
            ("personLastNameExactMatch", self.person_last_name_exact_match),
            (
                "personLastNameFuzzyPrimaryMatch",
                self.person_last_name_fuzzy_primary_match,
            ),
            (
                "personLastNameFuzzyAlternateMatch",
                self.person_last_name_fuzzy_alternate_match,
            ),
            ("personFirstNameExactMatch", self.person_first_name_exact_match),
            (
                "personFirstNameFuzzyPrimaryMatch",
                self.person_first_name_fuzzy_primary_match,
            ),
            (
                "personFirstNameFuzzyAlternateMatch",
                self.person_first_name_fuzzy_alternate_match,
            ),
            ("personMiddleNameExactMatch", self.person_middle_name_exact_match),
            (
                "personMiddleNameFuzzyPrimaryMatch",
                self.person_middle_name_fuzzy_primary_match,
            ),
            (
                "personMiddleNameFuzzyAlternateMatch",
                self.person_middle_name_fuzzy_alternate_match,
            ),
            ("personMiddleInitialMatch", self.person_middle_initial_match),
            ("personBirthDateMatch", self.person_birth_date_match),
            (
                "driverLicenseIssueDateMatch",
                self.driver_license_issue_date_match,
            ),
            (
                "driverLicenseExpirationDateMatch",
                self.driver_license_expiration_date_match,
            ),
            ("driverLicenseNumberMatch", self.driver_license_number_match),
            ("addressLine1Match", self.address_line1_match),
            ("addressLine2Match", self.address_line2_match),
            ("addressCityMatch", self.address_city_match),
            ("addressStateCodeMatch", self.address_state_code_match),
            ("addressZIP5Match", self.address_zip5_match),
            ("addressZIP4Match", self.address_zip4_match),
            ("personSexCodeMatch", self.person_sex_code_match),
        ]
    }

    /// Wire names of the flags the issuing state explicitly reported as not matching.
    pub fn mismatched_fields(&self) -> Vec<&'static str> {
        self.flags()
            .into_iter()
            .filter(|(_, flag)| *flag == Some(false))
            .map(|(name, _)| name)
            .collect()
    }
}
