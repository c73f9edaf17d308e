//! Token-reward rules: ledger reasons, fixed amounts, and eligibility.
//!
//! Tokens are the internal reward currency; one token is worth one rupee
//! of discount at checkout. Balances are never mutated directly -- every
//! change is a signed ledger entry applied by `TokenRepo::apply`.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Tokens granted once on registration (or retroactively on first
/// dashboard visit for accounts that predate the bonus).
pub const WELCOME_BONUS: i32 = 150;

/// Tokens granted per successful referral.
pub const REFERRAL_REWARD: i32 = 100;

/// Tokens granted once for completing the onboarding survey.
pub const SURVEY_REWARD: i32 = 50;

/// Tokens granted for the first login of each UTC calendar day.
pub const DAILY_LOGIN_REWARD: i32 = 10;

/// Reason attached to every ledger entry.
///
/// The string values must match the CHECK constraint in
/// `20260301000004_create_token_transactions_table.sql`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenReason {
    Welcome,
    Referral,
    Survey,
    DailyLogin,
    Spend,
}

impl TokenReason {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenReason::Welcome => "welcome",
            TokenReason::Referral => "referral",
            TokenReason::Survey => "survey",
            TokenReason::DailyLogin => "daily_login",
            TokenReason::Spend => "spend",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "welcome" => Ok(TokenReason::Welcome),
            "referral" => Ok(TokenReason::Referral),
            "survey" => Ok(TokenReason::Survey),
            "daily_login" => Ok(TokenReason::DailyLogin),
            "spend" => Ok(TokenReason::Spend),
            other => Err(CoreError::Validation(format!(
                "Unknown token reason '{other}'"
            ))),
        }
    }

    /// The fixed credit amount for a self-service earn reason.
    ///
    /// Returns `None` for reasons that are never earned through the
    /// `/tokens/earn` endpoint (welcome and survey are granted by their
    /// own flows; spend is negative and computed from the order).
    pub fn earn_amount(self) -> Option<i32> {
        match self {
            TokenReason::Referral => Some(REFERRAL_REWARD),
            TokenReason::DailyLogin => Some(DAILY_LOGIN_REWARD),
            _ => None,
        }
    }
}

/// Whether a daily-login credit may be granted now, given the timestamp
/// of the most recent `daily_login` ledger entry.
///
/// At most one credit per UTC calendar day.
pub fn daily_login_eligible(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(last) => (last.year(), last.ordinal()) != (now.year(), now.ordinal()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reason_round_trip() {
        for reason in [
            TokenReason::Welcome,
            TokenReason::Referral,
            TokenReason::Survey,
            TokenReason::DailyLogin,
            TokenReason::Spend,
        ] {
            assert_eq!(TokenReason::parse(reason.as_str()).unwrap(), reason);
        }
        assert!(TokenReason::parse("airdrop").is_err());
    }

    #[test]
    fn test_earn_amounts() {
        assert_eq!(TokenReason::Referral.earn_amount(), Some(REFERRAL_REWARD));
        assert_eq!(
            TokenReason::DailyLogin.earn_amount(),
            Some(DAILY_LOGIN_REWARD)
        );
        assert_eq!(TokenReason::Welcome.earn_amount(), None);
        assert_eq!(TokenReason::Spend.earn_amount(), None);
    }

    #[test]
    fn test_daily_login_eligibility() {
        let morning = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2026, 3, 1, 22, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2026, 3, 2, 0, 5, 0).unwrap();

        assert!(daily_login_eligible(None, morning));
        // Same calendar day, even hours apart.
        assert!(!daily_login_eligible(Some(morning), evening));
        // Just past midnight counts as a new day.
        assert!(daily_login_eligible(Some(evening), next_day));
    }
}
