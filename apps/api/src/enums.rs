//! Closed enumerations of the tracking domain.
//!
//! Every enum carries an explicit, total label table (`label()`) used both by
//! the list/dashboard DTOs and by the `/api/enums` catalog endpoints. Values
//! persist as their declaration-order small integer, so variant order is part
//! of the storage contract — append new members, never reorder.

use serde::{Deserialize, Serialize};

/// One catalog row exposed by the `/api/enums` endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct EnumItem {
    pub id: i16,
    pub name: &'static str,
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[repr(i16)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label, total over every member.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn catalog() -> Vec<EnumItem> {
                Self::ALL
                    .iter()
                    .map(|v| EnumItem {
                        id: *v as i16,
                        name: v.label(),
                    })
                    .collect()
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            /// Accepts the variant name (case-insensitive), its label, or its
            /// numeric id. Anything else is rejected, not defaulted.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant))
                        || s.eq_ignore_ascii_case($label)
                    {
                        return Ok($name::$variant);
                    }
                )+
                if let Ok(n) = s.parse::<i16>() {
                    $(
                        if n == $name::$variant as i16 {
                            return Ok($name::$variant);
                        }
                    )+
                }
                Err(format!("'{s}' is not a valid {}.", stringify!($name)))
            }
        }
    };
}

catalog_enum! {
    ApplicationStatus {
        Draft => "Draft",
        Applied => "Applied",
        Viewed => "Viewed",
        Shortlisted => "Shortlisted",
        InterviewScheduled => "Interview Scheduled",
        Interviewed => "Interviewed",
        OfferReceived => "Offer Received",
        OfferAccepted => "Offer Accepted",
        OfferDeclined => "Offer Declined",
        Rejected => "Rejected",
        Withdrawn => "Withdrawn",
        NoResponse => "No Response",
        NotInterested => "Not Interested",
    }
}

catalog_enum! {
    ActionType {
        Application => "Application",
        ApplicationUpdate => "Application Update",
        FollowUpEmail => "Follow Up Email",
        PhoneCall => "Phone Call",
        InterviewScheduled => "Interview Scheduled",
        InterviewCompleted => "Interview Completed",
        TechnicalTest => "Technical Test",
        TechnicalTestCompleted => "Technical Test Completed",
        OfferNegotiation => "Offer Negotiation",
        OfferAccepted => "Offer Accepted",
        OfferDeclined => "Offer Declined",
        None => "None",
    }
}

catalog_enum! {
    ContractType {
        FullTime => "Full Time",
        PartTime => "Part Time",
        Contract => "Contract",
        Temporary => "Temporary",
        Internship => "Internship",
        Freelance => "Freelance",
        Volunteer => "Volunteer",
        Remote => "Remote",
        OnSite => "On Site",
        Hybrid => "Hybrid",
        Other => "Other",
    }
}

catalog_enum! {
    JobSource {
        LinkedIn => "LinkedIn",
        Indeed => "Indeed",
        HiringCafe => "Hiring Cafe",
        CompanyWebsite => "Company Website",
        JobBoard => "Job Board",
        Referral => "Referral",
        Networking => "Networking",
        RecruitmentAgency => "Recruitment Agency",
        SocialMedia => "Social Media",
        Email => "Email",
        Other => "Other",
    }
}

catalog_enum! {
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

catalog_enum! {
    Currency {
        Eur => "EUR",
        Usd => "USD",
        Gbp => "GBP",
        Chf => "CHF",
        Cad => "CAD",
        Other => "Other",
    }
}

catalog_enum! {
    RejectionReason {
        NotQualified => "Not Qualified",
        Overqualified => "Overqualified",
        LackOfExperience => "Lack Of Experience",
        PositionFilled => "Position Filled",
        LackOfSkills => "Lack Of Skills",
        CulturalFit => "Cultural Fit",
        SalaryExpectation => "Salary Expectation",
        JobLocation => "Job Location",
        InternalCandidatePreferred => "Internal Candidate Preferred",
        CompanyReputation => "Company Reputation",
        ApplicationIncomplete => "Application Incomplete",
        NoResponse => "No Response",
        Other => "Other",
    }
}

impl ApplicationStatus {
    /// Statuses counted as an open pipeline (Applied through OfferReceived).
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Applied
                | ApplicationStatus::Viewed
                | ApplicationStatus::Shortlisted
                | ApplicationStatus::InterviewScheduled
                | ApplicationStatus::Interviewed
                | ApplicationStatus::OfferReceived
        )
    }

    /// Statuses indicating the employer responded. Everything except
    /// Draft/Applied/NoResponse/Withdrawn/NotInterested.
    pub fn is_response(self) -> bool {
        !matches!(
            self,
            ApplicationStatus::Draft
                | ApplicationStatus::Applied
                | ApplicationStatus::NoResponse
                | ApplicationStatus::Withdrawn
                | ApplicationStatus::NotInterested
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // Labels must be total and distinct per enum: a missing or duplicated
    // entry corrupts distributions and the enum catalog endpoints.
    fn assert_total_labels(items: Vec<EnumItem>, expected_len: usize) {
        assert_eq!(items.len(), expected_len);
        let names: HashSet<&str> = items.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), expected_len, "duplicate label");
        for item in &items {
            assert!(!item.name.is_empty());
        }
    }

    #[test]
    fn test_every_enum_member_has_a_label() {
        assert_total_labels(ApplicationStatus::catalog(), 13);
        assert_total_labels(ActionType::catalog(), 12);
        assert_total_labels(ContractType::catalog(), 11);
        assert_total_labels(JobSource::catalog(), 11);
        assert_total_labels(Priority::catalog(), 4);
        assert_total_labels(Currency::catalog(), 6);
        assert_total_labels(RejectionReason::catalog(), 13);
    }

    #[test]
    fn test_labels_humanize_camel_case() {
        assert_eq!(ApplicationStatus::InterviewScheduled.label(), "Interview Scheduled");
        assert_eq!(ActionType::TechnicalTestCompleted.label(), "Technical Test Completed");
        assert_eq!(ContractType::OnSite.label(), "On Site");
        assert_eq!(JobSource::RecruitmentAgency.label(), "Recruitment Agency");
    }

    #[test]
    fn test_from_str_accepts_name_label_and_id() {
        assert_eq!(
            "InterviewScheduled".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::InterviewScheduled
        );
        assert_eq!(
            "interview scheduled".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::InterviewScheduled
        );
        assert_eq!("4".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::InterviewScheduled);
        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
    }

    #[test]
    fn test_from_str_rejects_unknown_tokens() {
        assert!("bogus".parse::<ApplicationStatus>().is_err());
        assert!("99".parse::<Priority>().is_err());
        assert!("".parse::<JobSource>().is_err());
    }

    #[test]
    fn test_in_progress_set() {
        let expected = [
            ApplicationStatus::Applied,
            ApplicationStatus::Viewed,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::InterviewScheduled,
            ApplicationStatus::Interviewed,
            ApplicationStatus::OfferReceived,
        ];
        for status in ApplicationStatus::ALL {
            assert_eq!(status.is_in_progress(), expected.contains(status), "{status:?}");
        }
    }

    #[test]
    fn test_response_set_excludes_unanswered_statuses() {
        assert!(!ApplicationStatus::Draft.is_response());
        assert!(!ApplicationStatus::Applied.is_response());
        assert!(!ApplicationStatus::NoResponse.is_response());
        assert!(!ApplicationStatus::Withdrawn.is_response());
        assert!(!ApplicationStatus::NotInterested.is_response());
        assert!(ApplicationStatus::Viewed.is_response());
        assert!(ApplicationStatus::Rejected.is_response());
        assert!(ApplicationStatus::OfferAccepted.is_response());
    }
}
