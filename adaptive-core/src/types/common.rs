//! Miscellaneous common types used throughout the Adaptive Payments codebase.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Represents a key-value lookup keyed by `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Error returned when a wire token does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} value {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a fieldless enum whose variants map one-to-one to NVP wire tokens.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The token used for this value on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $token => Ok($name::$variant), )+
                    _ => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// What the Pay operation should do with the payment.
    #[derive(Default)]
    ActionType {
        /// Create and execute the payment in one call.
        #[default]
        Pay => "PAY",
        /// Create the payment only; execute later with ExecutePayment.
        Create => "CREATE",
        /// Pay the primary receiver now, secondary receivers later.
        PayPrimary => "PAY_PRIMARY",
    }
}

wire_enum! {
    /// Who pays the transaction fees.
    FeesPayer {
        Sender => "SENDER",
        PrimaryReceiver => "PRIMARYRECEIVER",
        EachReceiver => "EACHRECEIVER",
        SecondaryOnly => "SECONDARYONLY",
    }
}

wire_enum! {
    /// Classification of the funds sent to a receiver.
    PaymentType {
        Goods => "GOODS",
        Service => "SERVICE",
        Personal => "PERSONAL",
        CashAdvance => "CASHADVANCE",
        DigitalGoods => "DIGITALGOODS",
    }
}

wire_enum! {
    /// Level of detail requested in error responses.
    DetailLevel {
        ReturnAll => "ReturnAll",
    }
}

wire_enum! {
    /// Acknowledgement code in the response envelope.
    AckCode {
        Success => "Success",
        Failure => "Failure",
        Warning => "Warning",
        SuccessWithWarning => "SuccessWithWarning",
        FailureWithWarning => "FailureWithWarning",
    }
}

impl AckCode {
    pub fn is_success(&self) -> bool {
        matches!(self, AckCode::Success | AckCode::SuccessWithWarning)
    }
}

wire_enum! {
    /// Execution status of a payment created by Pay.
    PaymentExecStatus {
        Created => "CREATED",
        Completed => "COMPLETED",
        Incomplete => "INCOMPLETE",
        Error => "ERROR",
        ReversalError => "REVERSALERROR",
        Processing => "PROCESSING",
        Pending => "PENDING",
    }
}
