use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{errors::ConnectorError, utils::Error};

/// Card as supplied by the merchant. Every part is optional because a repeat
/// purchase against a stored card (hosted-data id) only carries the CVV.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub card_number: Option<Secret<String>>,
    pub card_exp_month: Option<Secret<String>>,
    pub card_exp_year: Option<Secret<String>>,
    pub card_cvc: Option<Secret<String>>,
}

impl Card {
    /// Card number with spaces and dashes removed, `None` when not given.
    pub fn get_card_number(&self) -> Option<Secret<String>> {
        self.card_number
            .as_ref()
            .map(|number| number.peek().replace([' ', '-'], ""))
            .filter(|number| !number.is_empty())
            .map(Secret::new)
    }

    pub fn has_number(&self) -> bool {
        self.card_number
            .as_ref()
            .is_some_and(|number| !number.peek().is_empty())
    }

    pub fn has_cvc(&self) -> bool {
        self.card_cvc
            .as_ref()
            .is_some_and(|cvc| !cvc.peek().is_empty())
    }

    /// Full validation of a card entered by the customer: number shape, Luhn
    /// checksum and an expiry that has not passed as of `today`.
    pub fn validate(&self, today: Date) -> Result<(), Error> {
        let number = self
            .get_card_number()
            .ok_or(ConnectorError::InvalidCardDetails {
                message: "The card number is required",
            })?;
        let number = number.peek();

        if !(12..=19).contains(&number.len()) || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(report!(ConnectorError::InvalidCardDetails {
                message: "Card number should have 12 to 19 digits",
            }));
        }

        if !luhn_checksum_is_valid(number) {
            return Err(report!(ConnectorError::InvalidCardDetails {
                message: "Card number is invalid",
            }));
        }

        let month = self.get_expiry_month()?;
        let year = self.get_expiry_year_4_digit()?;
        let current_month = u8::from(today.month());
        if year < today.year() || (year == today.year() && month < current_month) {
            return Err(report!(ConnectorError::InvalidCardDetails {
                message: "Card has expired",
            }));
        }

        Ok(())
    }

    pub fn get_expiry_month(&self) -> Result<u8, Error> {
        let month = self
            .card_exp_month
            .as_ref()
            .ok_or(ConnectorError::InvalidCardDetails {
                message: "The expiration date is required",
            })?
            .peek()
            .trim()
            .parse::<u8>()
            .change_context(ConnectorError::InvalidCardDetails {
                message: "The expiration month is not a number",
            })?;

        if (1..=12).contains(&month) {
            Ok(month)
        } else {
            Err(report!(ConnectorError::InvalidCardDetails {
                message: "The expiration month must be between 1 and 12",
            }))
        }
    }

    pub fn get_expiry_year_4_digit(&self) -> Result<i32, Error> {
        let year = self
            .card_exp_year
            .as_ref()
            .ok_or(ConnectorError::InvalidCardDetails {
                message: "The expiration date is required",
            })?
            .peek()
            .trim()
            .parse::<i32>()
            .change_context(ConnectorError::InvalidCardDetails {
                message: "The expiration year is not a number",
            })?;

        Ok(if year < 100 { 2000 + year } else { year })
    }

    /// Expiry month as `MM`.
    pub fn get_card_expiry_month_2_digit(&self) -> Result<Secret<String>, Error> {
        Ok(Secret::new(format!("{:02}", self.get_expiry_month()?)))
    }

    /// Expiry year as `YY`.
    pub fn get_expiry_year_2_digit(&self) -> Result<Secret<String>, Error> {
        Ok(Secret::new(format!(
            "{:02}",
            self.get_expiry_year_4_digit()?.rem_euclid(100)
        )))
    }
}

fn luhn_checksum_is_valid(number: &str) -> bool {
    let sum: u32 = number
        .bytes()
        .rev()
        .map(|byte| u32::from(byte - b'0'))
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}
