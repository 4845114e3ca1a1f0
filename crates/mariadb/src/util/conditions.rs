use chrono::Utc;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};
use std::fmt;

// Constants for condition types
pub const READY_CONDITION: &str = "Ready";
pub const BOOTSTRAPPED_CONDITION: &str = "Bootstrapped";

/// Condition kinds known to this crate.
///
/// Conditions are stored by their string type, so any other string is carried
/// through `Other` and tracked as an independent condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionType {
    Ready,
    Bootstrapped,
    Other(String),
}

impl ConditionType {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionType::Ready => READY_CONDITION,
            ConditionType::Bootstrapped => BOOTSTRAPPED_CONDITION,
            ConditionType::Other(type_) => type_,
        }
    }

    /// Whether a `True` status is final for this condition type.
    pub fn is_monotonic(&self) -> bool {
        matches!(self, ConditionType::Bootstrapped)
    }
}

impl From<&str> for ConditionType {
    fn from(type_: &str) -> Self {
        match type_ {
            READY_CONDITION => ConditionType::Ready,
            BOOTSTRAPPED_CONDITION => ConditionType::Bootstrapped,
            other => ConditionType::Other(other.to_string()),
        }
    }
}

impl From<&Condition> for ConditionType {
    fn from(condition: &Condition) -> Self {
        ConditionType::from(condition.type_.as_str())
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wire values of `Condition.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        }
    }
}

// Anything that is not exactly "True" or "False" reads as Unknown
impl From<&str> for ConditionStatus {
    fn from(status: &str) -> Self {
        match status {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Status reasons for conditions
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionReason {
    Provisioning,
    StatefulSetReady,
    StatefulSetNotReady,
    RestoreInProgress,
    RestoreComplete,
    RestoreFailed,
    Failed,
}

impl fmt::Display for ConditionReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConditionReason::Provisioning => write!(f, "Provisioning"),
            ConditionReason::StatefulSetReady => write!(f, "StatefulSetReady"),
            ConditionReason::StatefulSetNotReady => write!(f, "StatefulSetNotReady"),
            ConditionReason::RestoreInProgress => write!(f, "RestoreInProgress"),
            ConditionReason::RestoreComplete => write!(f, "RestoreComplete"),
            ConditionReason::RestoreFailed => write!(f, "RestoreFailed"),
            ConditionReason::Failed => write!(f, "Failed"),
        }
    }
}

/// Builds a condition stamped with the current time.
///
/// The timestamp only sticks when the upsert records a status flip or a new type.
pub fn new_condition(
    type_: ConditionType,
    status: ConditionStatus,
    reason: impl fmt::Display,
    message: impl Into<String>,
) -> Condition {
    Condition {
        type_: type_.as_str().to_string(),
        status: status.to_string(),
        reason: reason.to_string(),
        message: message.into(),
        last_transition_time: Time(Utc::now()),
        observed_generation: None,
    }
}

pub fn ready_condition(ready: bool, reason: impl fmt::Display, message: impl Into<String>) -> Condition {
    new_condition(ConditionType::Ready, ready.into(), reason, message)
}

pub fn bootstrapped_condition(
    bootstrapped: bool,
    reason: impl fmt::Display,
    message: impl Into<String>,
) -> Condition {
    new_condition(ConditionType::Bootstrapped, bootstrapped.into(), reason, message)
}
