//! Payment status and method.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A value outside a closed set of names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// A status change the payment lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("payment cannot move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: PaymentStatus,
    pub to: PaymentStatus,
}

/// Payment lifecycle.
///
/// ```text
/// pending ──► processing ──► completed
///    │            │    └───► failed
///    └────────────┴────────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// No further transitions leave a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Move to `next` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] for any move not drawn above.
    pub fn transition(self, next: Self) -> Result<Self, InvalidTransition> {
        match (self, next) {
            (Self::Pending, Self::Processing)
            | (Self::Processing, Self::Completed | Self::Failed)
            | (Self::Pending | Self::Processing, Self::Cancelled) => Ok(next),
            _ => Err(InvalidTransition {
                from: self,
                to: next,
            }),
        }
    }

    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the payment is pending.
    pub fn start_processing(self) -> Result<Self, InvalidTransition> {
        self.transition(Self::Processing)
    }

    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the payment is processing.
    pub fn complete(self) -> Result<Self, InvalidTransition> {
        self.transition(Self::Completed)
    }

    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the payment is processing.
    pub fn fail(self) -> Result<Self, InvalidTransition> {
        self.transition(Self::Failed)
    }

    /// # Errors
    ///
    /// Returns [`InvalidTransition`] once the payment has settled.
    pub fn cancel(self) -> Result<Self, InvalidTransition> {
        self.transition(Self::Cancelled)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "payment status",
                value: value.to_string(),
            })
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Bkash,
    Rocket,
    Nagad,
    Card,
}

impl PaymentMethod {
    pub const ALL: [Self; 4] = [Self::Bkash, Self::Rocket, Self::Nagad, Self::Card];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bkash => "bkash",
            Self::Rocket => "rocket",
            Self::Nagad => "nagad",
            Self::Card => "card",
        }
    }

    /// Mobile wallets identify the payer by phone number.
    pub fn is_mobile_wallet(self) -> bool {
        !matches!(self, Self::Card)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "payment method",
                value: value.to_string(),
            })
    }
}
