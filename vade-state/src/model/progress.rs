use serde::{Deserialize, Serialize};

/// Onboarding flags returned by `GET /referral/progress`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_partner: bool,
    #[serde(default)]
    pub is_distributor: bool,
    #[serde(default)]
    pub has_purchased_book: bool,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Locked,
    Active,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChecklistStep {
    pub id: &'static str,
    pub title: &'static str,
    pub status: StepStatus,
}

impl OnboardingProgress {
    /// Derive the four-step checklist: verify, partner, distributor,
    /// mastery. Exactly one step is active until everything is complete.
    pub fn checklist(&self) -> [ChecklistStep; 4] {
        let verified = self.is_verified || self.is_partner;

        [
            ChecklistStep {
                id: "verify",
                title: "Account Verified",
                status: if verified {
                    StepStatus::Completed
                } else {
                    StepStatus::Active
                },
            },
            ChecklistStep {
                id: "partner",
                title: "Partner Status",
                status: if self.is_partner {
                    StepStatus::Completed
                } else if verified {
                    StepStatus::Active
                } else {
                    StepStatus::Locked
                },
            },
            ChecklistStep {
                id: "distributor",
                title: "Distributor Status",
                status: if self.is_distributor {
                    StepStatus::Completed
                } else if self.is_partner {
                    StepStatus::Active
                } else {
                    StepStatus::Locked
                },
            },
            ChecklistStep {
                id: "mastery",
                title: "Handbook Mastery",
                status: if self.has_purchased_book {
                    StepStatus::Completed
                } else if self.is_distributor {
                    StepStatus::Active
                } else {
                    StepStatus::Locked
                },
            },
        ]
    }

    pub fn completed_count(&self) -> usize {
        self.checklist()
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count()
    }

    pub fn percent_complete(&self) -> u8 {
        (self.completed_count() * 100 / 4) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::{OnboardingProgress, StepStatus};

    #[test]
    fn fresh_account_starts_at_verify() {
        let progress = OnboardingProgress::default();
        let steps = progress.checklist();

        assert_eq!(steps[0].status, StepStatus::Active);
        assert_eq!(steps[1].status, StepStatus::Locked);
        assert_eq!(steps[2].status, StepStatus::Locked);
        assert_eq!(steps[3].status, StepStatus::Locked);
        assert_eq!(progress.percent_complete(), 0);
    }

    #[test]
    fn partner_flag_implies_verification() {
        let progress = OnboardingProgress {
            is_partner: true,
            ..OnboardingProgress::default()
        };
        let steps = progress.checklist();

        assert_eq!(steps[0].status, StepStatus::Completed);
        assert_eq!(steps[1].status, StepStatus::Completed);
        assert_eq!(steps[2].status, StepStatus::Active);
        assert_eq!(progress.completed_count(), 2);
    }

    #[test]
    fn mastery_completes_the_checklist() {
        let progress = OnboardingProgress {
            is_verified: true,
            is_partner: true,
            is_distributor: true,
            has_purchased_book: true,
            ..OnboardingProgress::default()
        };

        assert!(
            progress
                .checklist()
                .iter()
                .all(|step| step.status == StepStatus::Completed)
        );
        assert_eq!(progress.percent_complete(), 100);
    }
}
