use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a categorical field with a fixed set of display labels.
///
/// Parsing trims the input and ignores ASCII case; serialization always
/// emits the canonical label.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("unknown {} {:?}", stringify!($name), wanted))
            }
        }
    };
}

labelled_enum! {
    /// Institution category.
    InstitutionType {
        Private => "Private",
        Government => "Government",
        PublicPrivatePartnership => "Public-Private Partnership",
        DeemedUniversity => "Deemed University",
        PublicUniversity => "Public University",
        AutonomousInstitution => "Autonomous Institution",
        Other => "Other",
    }
}

labelled_enum! {
    /// Entrance exams an institution may accept.
    AcceptanceExam {
        JeeMain => "JEE Main",
        Neet => "NEET",
        Cat => "CAT",
        Mat => "MAT",
        Gate => "GATE",
        Clat => "CLAT",
        Saat => "SAAT",
        Bitsat => "BITSAT",
        Viteee => "VITEEE",
        Cet => "CET",
    }
}

labelled_enum! {
    /// Broad discipline taught by an institution.
    Discipline {
        Engineering => "engineering",
        Management => "management",
        Medical => "medical",
        Commerce => "commerce",
        Arts => "arts",
        Science => "science",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
    /// Postal code, digits only.
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    /// Years.
    pub duration: f64,
    #[serde(alias = "fee")]
    pub annual_fees: f64,
}

/// One `{name, required}` pair. Duplicated course names are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityCriterion {
    #[serde(alias = "course")]
    pub name: String,
    #[serde(alias = "eligibility")]
    pub required: String,
}

impl EligibilityCriterion {
    pub fn new(name: impl Into<String>, required: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: required.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placements {
    pub average_salary: f64,
    pub highest_salary: f64,
    /// Percentage, 0 to 100.
    pub placement_rate: f64,
}

/// The canonical institution record handed to persistence and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InstitutionType,
    pub location: Location,
    pub established_year: i32,
    pub accreditation: String,
    pub total_students: u64,
    pub admission_process: String,
    pub required_documents: Vec<String>,
    pub contact_info: ContactInfo,
    pub courses_offered: Vec<Course>,
    pub eligibility_criteria: Vec<EligibilityCriterion>,
    pub acceptance_exams: Vec<AcceptanceExam>,
    pub top_recruiters: Vec<String>,
    pub placements: Placements,
    pub image_url: String,
    /// 0 to 5.
    pub rating: f64,
    pub field_taught: Vec<Discipline>,
    /// Derived ranking value, recomputed on every normalization.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("  jee main ".parse::<AcceptanceExam>().unwrap(), AcceptanceExam::JeeMain);
        assert_eq!("Engineering".parse::<Discipline>().unwrap(), Discipline::Engineering);
        assert_eq!(
            "public-private partnership".parse::<InstitutionType>().unwrap(),
            InstitutionType::PublicPrivatePartnership
        );
        assert!("Polytechnic".parse::<InstitutionType>().is_err());
    }

    #[test]
    fn test_enums_serialize_as_labels() {
        let value = serde_json::to_value([AcceptanceExam::Viteee, AcceptanceExam::JeeMain]).unwrap();
        assert_eq!(value, serde_json::json!(["VITEEE", "JEE Main"]));

        let kind: InstitutionType = serde_json::from_str("\"Deemed University\"").unwrap();
        assert_eq!(kind, InstitutionType::DeemedUniversity);
    }

    #[test]
    fn test_eligibility_pair_accepts_generator_keys() {
        let pair: EligibilityCriterion =
            serde_json::from_str(r#"{"course": "MBA", "eligibility": "Graduation with any stream"}"#).unwrap();
        assert_eq!(pair, EligibilityCriterion::new("MBA", "Graduation with any stream"));
    }
}
