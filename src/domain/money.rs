use {
    super::error::TripayError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Amount in the smallest currency unit. Rupiah has no minor unit, so for
/// IDR this is whole rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoneyAmount(i64);

impl MoneyAmount {
    pub fn new(minor_units: i64) -> Result<Self, TripayError> {
        if minor_units < 0 {
            return Err(TripayError::Validation(format!(
                "MoneyAmount cannot be negative, got: {minor_units}"
            )));
        }
        Ok(Self(minor_units))
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 4217 currency code as the host stores it, normalised to uppercase.
/// Tripay itself only settles in IDR; other codes are carried through so a
/// callback for such an invoice can still be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub const IDR: &'static str = "IDR";

    pub fn idr() -> Self {
        Self(Self::IDR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_idr(&self) -> bool {
        self.0 == Self::IDR
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Currency {
    type Error = TripayError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let code = s.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(TripayError::Validation(format!(
                "invalid currency code: {s:?}"
            )));
        }
        Ok(Self(code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    amount: MoneyAmount,
    currency: Currency,
}

impl Money {
    pub fn new(amount: MoneyAmount, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> MoneyAmount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}
