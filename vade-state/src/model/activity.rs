/// Action kinds forwarded to the remote ledger.
///
/// The point values here are display-only; the backend recomputes the
/// actual credit and is the sole source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Browsing,
    Registration,
    Purchase,
    Share,
    SampleView,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::Browsing,
        ActivityKind::Registration,
        ActivityKind::Purchase,
        ActivityKind::Share,
        ActivityKind::SampleView,
    ];

    /// Identifier the ledger expects in `log-activity` payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            ActivityKind::Browsing => "browsing",
            ActivityKind::Registration => "registration",
            ActivityKind::Purchase => "purchase",
            ActivityKind::Share => "share",
            // Historical casing, kept for ledger compatibility.
            ActivityKind::SampleView => "Sample View",
        }
    }

    /// Display-only point value (1 point = ₦100).
    pub fn display_points(self) -> f64 {
        match self {
            ActivityKind::Browsing => 0.1,
            ActivityKind::Registration => 0.1,
            ActivityKind::Purchase => 5.0,
            ActivityKind::Share => 0.5,
            ActivityKind::SampleView => 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityKind;

    #[test]
    fn point_table_matches_program_terms() {
        assert_eq!(ActivityKind::Browsing.display_points(), 0.1);
        assert_eq!(ActivityKind::Registration.display_points(), 0.1);
        assert_eq!(ActivityKind::Purchase.display_points(), 5.0);
    }

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(ActivityKind::Browsing.wire_name(), "browsing");
        assert_eq!(ActivityKind::SampleView.wire_name(), "Sample View");
    }
}
