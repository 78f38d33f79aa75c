use serde::{Deserialize, Serialize};

/// Non-blocking warning raised by an otherwise successful operation.
///
/// Warnings are distinct from errors: the operation completes and persists,
/// but the caller must be told about the condition for visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Warning {
    /// No quoted amount and no priced service selection were available, so
    /// the case was created with a zero amount
    MissingPrice,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrice => write!(f, "missing price: case created with zero amount"),
        }
    }
}

/// Logs each warning attached to a completed operation
pub fn log_warnings(context: &str, warnings: &[Warning]) {
    for warning in warnings {
        tracing::warn!(context = context, warning = %warning, "operation completed with warning");
    }
}
