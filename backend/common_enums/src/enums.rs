/// The three-letter ISO 4217 currency code (e.g., "USD", "EUR") for the payment amount.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    AED,
    ARS,
    AUD,
    BHD,
    BRL,
    CAD,
    CHF,
    CLP,
    CNY,
    COP,
    CZK,
    DKK,
    EUR,
    GBP,
    HKD,
    HUF,
    INR,
    JPY,
    KRW,
    KWD,
    MXN,
    NOK,
    NZD,
    PEN,
    PLN,
    PYG,
    SEK,
    SGD,
    #[default]
    USD,
    UYU,
    ZAR,
}

impl Currency {
    /// Renders a minor-unit amount in major units with the currency's decimals, e.g. `1300` -> `13.00`.
    pub fn to_currency_base_unit(self, amount: u64) -> String {
        let exponent = self.number_of_digits_after_decimal_point();
        if exponent == 0 {
            return amount.to_string();
        }
        let divisor = 10_u64.pow(u32::from(exponent));
        format!(
            "{}.{:0width$}",
            amount / divisor,
            amount % divisor,
            width = usize::from(exponent)
        )
    }

    /// ISO 4217 numeric code, always three digits.
    pub fn iso_4217(self) -> &'static str {
        match self {
            Self::AED => "784",
            Self::ARS => "032",
            Self::AUD => "036",
            Self::BHD => "048",
            Self::BRL => "986",
            Self::CAD => "124",
            Self::CHF => "756",
            Self::CLP => "152",
            Self::CNY => "156",
            Self::COP => "170",
            Self::CZK => "203",
            Self::DKK => "208",
            Self::EUR => "978",
            Self::GBP => "826",
            Self::HKD => "344",
            Self::HUF => "348",
            Self::INR => "356",
            Self::JPY => "392",
            Self::KRW => "410",
            Self::KWD => "414",
            Self::MXN => "484",
            Self::NOK => "578",
            Self::NZD => "554",
            Self::PEN => "604",
            Self::PLN => "985",
            Self::PYG => "600",
            Self::SEK => "752",
            Self::SGD => "702",
            Self::USD => "840",
            Self::UYU => "858",
            Self::ZAR => "710",
        }
    }

    pub fn is_zero_decimal_currency(self) -> bool {
        matches!(self, Self::CLP | Self::JPY | Self::KRW | Self::PYG)
    }

    pub fn is_three_decimal_currency(self) -> bool {
        matches!(self, Self::BHD | Self::KWD)
    }

    pub fn number_of_digits_after_decimal_point(self) -> u8 {
        if self.is_zero_decimal_currency() {
            0
        } else if self.is_three_decimal_currency() {
            3
        } else {
            2
        }
    }
}

/// Outcome of a single transaction as reported by the gateway.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Failed,
    #[default]
    Pending,
}

impl TransactionStatus {
    pub fn is_terminal_status(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}
