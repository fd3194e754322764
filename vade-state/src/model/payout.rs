use serde::{Deserialize, Serialize};

/// Bank details submitted to `POST /referral/update-payout`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDetails {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
}

impl PayoutDetails {
    /// Inline validation performed before submission; the backend never
    /// sees a payload that fails these checks.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.account_name.trim().is_empty() {
            anyhow::bail!("account name is required");
        }

        let number = self.account_number.trim();
        if number.len() != 10 || !number.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("account number must be exactly 10 digits");
        }

        if self.bank_name.trim().is_empty() {
            anyhow::bail!("bank name is required");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PayoutDetails;

    fn valid_details() -> PayoutDetails {
        PayoutDetails {
            account_name: "Adebayo Okafor".to_owned(),
            account_number: "0123456789".to_owned(),
            bank_name: "First Bank".to_owned(),
        }
    }

    #[test]
    fn accepts_valid_details() {
        assert!(valid_details().validate().is_ok());
    }

    #[test]
    fn rejects_short_account_numbers() {
        let details = PayoutDetails {
            account_number: "12345".to_owned(),
            ..valid_details()
        };
        assert!(details.validate().is_err());
    }

    #[test]
    fn rejects_non_numeric_account_numbers() {
        let details = PayoutDetails {
            account_number: "01234abcde".to_owned(),
            ..valid_details()
        };
        assert!(details.validate().is_err());
    }

    #[test]
    fn rejects_blank_names() {
        let details = PayoutDetails {
            account_name: "   ".to_owned(),
            ..valid_details()
        };
        assert!(details.validate().is_err());
    }
}
