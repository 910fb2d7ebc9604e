//! Choices offered by the form's select inputs.
//!
//! The server treats these as free text; the enums exist so form code can
//! offer the same labels the site shows.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! select_options {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|option| option.label() == label)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

select_options!(CareType {
    PersonalCare => "Personal Care",
    Companionship => "Companionship",
    MedicationManagement => "Medication Management",
    MobilityAssistance => "Mobility Assistance",
    MealPreparation => "Meal Preparation",
    LightHousekeeping => "Light Housekeeping",
    RespiteCare => "Respite Care",
    LiveInCare => "Live-In Care",
    Other => "Other",
});

select_options!(Relationship {
    SonOrDaughter => "Son/Daughter",
    SpouseOrPartner => "Spouse/Partner",
    Sibling => "Sibling",
    OtherFamilyMember => "Other Family Member",
    Friend => "Friend",
    OneSelf => "Self",
    HealthcareProfessional => "Healthcare Professional",
    Other => "Other",
});

select_options!(Urgency {
    Immediately => "Immediately",
    WithinOneWeek => "Within 1 week",
    WithinTwoWeeks => "Within 2 weeks",
    WithinOneMonth => "Within 1 month",
    JustExploring => "Just exploring options",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_lookup() {
        assert_eq!(CareType::from_label("Live-In Care"), Some(CareType::LiveInCare));
        assert_eq!(Relationship::from_label("Self"), Some(Relationship::OneSelf));
        assert_eq!(Urgency::from_label("Within 2 weeks"), Some(Urgency::WithinTwoWeeks));
        assert_eq!(Urgency::from_label("Tomorrow"), None);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Urgency::JustExploring).unwrap();
        assert_eq!(json, "\"Just exploring options\"");
        assert_eq!(CareType::ALL.len(), 9);
        assert_eq!(Relationship::ALL.len(), 8);
    }
}
