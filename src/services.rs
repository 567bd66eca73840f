use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

pub const SERVICE_DLDV: &str = "F1366C39-D0CD-458C-81F8-EFD7B0753A5B";
pub const SERVICE_IDENTI_FRAUD: &str = "211B428E-B8B5-4EB9-973D-106F013C371F";
pub const SERVICE_SEX_OFFENDER: &str = "3ACCF2A9-2E52-4675-B546-7C3676897C3C";
pub const SERVICE_CRIME_RECORD: &str = "80C1111D-6ACE-4820-A88C-284982013C33";
pub const SERVICE_PEP: &str = "4DF86C8E-B53E-49D6-B75D-C1F2FFCBC1E5";
pub const SERVICE_OFAC: &str = "D0F7EE7A-4CCA-4807-A779-F77EB1501EED";
pub const SERVICE_EVERY_POLITICIAN: &str = "C18ECBD7-907C-47AF-8871-1C6BB19838CA";

/// Screening products offered by the remote service.
///
/// Serializes as the service identifier the remote API expects in the
/// `services` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Driver's-license document verification (DLV).
    DriversLicense,
    /// Identity fraud check with knowledge-based questions.
    IdentiFraud,
    /// Sex-offender registry search.
    SexOffender,
    /// Criminal record search.
    CrimeRecord,
    /// Politically-exposed-person screening.
    Pep,
    /// Sanctions list (OFAC) screening.
    Ofac,
    /// Foreign officials list.
    EveryPolitician,
}

impl ServiceType {
    pub const ALL: [ServiceType; 7] = [
        ServiceType::DriversLicense,
        ServiceType::IdentiFraud,
        ServiceType::SexOffender,
        ServiceType::CrimeRecord,
        ServiceType::Pep,
        ServiceType::Ofac,
        ServiceType::EveryPolitician,
    ];

    /// The identifier the remote service uses for this product.
    pub fn id(self) -> &'static str {
        match self {
            ServiceType::DriversLicense => SERVICE_DLDV,
            ServiceType::IdentiFraud => SERVICE_IDENTI_FRAUD,
            ServiceType::SexOffender => SERVICE_SEX_OFFENDER,
            ServiceType::CrimeRecord => SERVICE_CRIME_RECORD,
            ServiceType::Pep => SERVICE_PEP,
            ServiceType::Ofac => SERVICE_OFAC,
            ServiceType::EveryPolitician => SERVICE_EVERY_POLITICIAN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ServiceType::DriversLicense => "drivers_license",
            ServiceType::IdentiFraud => "identi_fraud",
            ServiceType::SexOffender => "sex_offender",
            ServiceType::CrimeRecord => "crime_record",
            ServiceType::Pep => "pep",
            ServiceType::Ofac => "ofac",
            ServiceType::EveryPolitician => "every_politician",
        }
    }

    /// Maps an identifier echoed back by the service to a known product.
    ///
    /// Identifiers are compared as UUIDs, so casing and hyphenation
    /// differences are ignored.
    pub fn from_id(id: &str) -> Option<Self> {
        let wanted = Uuid::parse_str(id.trim()).ok()?;
        Self::ALL
            .into_iter()
            .find(|service| Uuid::parse_str(service.id()).ok() == Some(wanted))
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for ServiceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        ServiceType::from_id(&id)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown service id: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_uuids() {
        for service in ServiceType::ALL {
            assert!(Uuid::parse_str(service.id()).is_ok(), "{}", service.name());
            assert_eq!(ServiceType::from_id(service.id()), Some(service));
        }
        let mut ids: Vec<_> = ServiceType::ALL.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_from_id_ignores_case() {
        assert_eq!(
            ServiceType::from_id("d0f7ee7a-4cca-4807-a779-f77eb1501eed"),
            Some(ServiceType::Ofac)
        );
        assert_eq!(ServiceType::from_id("not-a-uuid"), None);
        assert_eq!(
            ServiceType::from_id("00000000-0000-0000-0000-000000000000"),
            None
        );
    }

    #[test]
    fn test_serializes_as_remote_id() {
        let json = serde_json::to_string(&vec![ServiceType::Pep]).unwrap();
        assert_eq!(json, r#"["4DF86C8E-B53E-49D6-B75D-C1F2FFCBC1E5"]"#);

        let back: Vec<ServiceType> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![ServiceType::Pep]);
    }
}
