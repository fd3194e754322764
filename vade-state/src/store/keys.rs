/// Typed key schema for the session store.
///
/// Every key the agent ever writes is listed here so logout can wipe the
/// whole namespace without string bookkeeping. Suffixes carry their own
/// version where a policy change forced a re-gate (`sample_access_v2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKey {
    Token,
    DisplayName,
    ReferralCode,
    City,
    RegistrationEmail,
    SampleAccess,
    MasteryPulseShown,
    LastRank,
    LastReferralCount,
    LastPoints,
    LastRevenue,
}

impl SessionKey {
    pub const ALL: [SessionKey; 11] = [
        SessionKey::Token,
        SessionKey::DisplayName,
        SessionKey::ReferralCode,
        SessionKey::City,
        SessionKey::RegistrationEmail,
        SessionKey::SampleAccess,
        SessionKey::MasteryPulseShown,
        SessionKey::LastRank,
        SessionKey::LastReferralCount,
        SessionKey::LastPoints,
        SessionKey::LastRevenue,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::DisplayName => "user_name",
            SessionKey::ReferralCode => "ref",
            SessionKey::City => "user_city",
            SessionKey::RegistrationEmail => "reg_email",
            SessionKey::SampleAccess => "sample_access_v2",
            SessionKey::MasteryPulseShown => "mastery_pulse_shown",
            SessionKey::LastRank => "last_rank",
            SessionKey::LastReferralCount => "last_referral_count",
            SessionKey::LastPoints => "last_points",
            SessionKey::LastRevenue => "last_revenue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionKey;

    #[test]
    fn suffixes_are_unique() {
        for (i, a) in SessionKey::ALL.iter().enumerate() {
            for b in SessionKey::ALL.iter().skip(i + 1) {
                assert_ne!(a.suffix(), b.suffix());
            }
        }
    }

    #[test]
    fn sample_access_carries_schema_version() {
        assert_eq!(SessionKey::SampleAccess.suffix(), "sample_access_v2");
    }
}
