use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;

use crate::util::conditions::{ConditionStatus, ConditionType};

/// Upserts new_condition by type into a copy of conditions and reports whether
/// anything changed.
///
/// A type seen for the first time is appended with the caller's LastTransitionTime.
/// For a known type the status flip, if any, brings the caller's LastTransitionTime
/// along; reason, message and observedGeneration are always refreshed.
///
/// Monotonic condition types are not checked here, callers go through
/// `MariaDBStatus::set_condition`.
pub(crate) fn set_status_condition(conditions: &[Condition], new_condition: Condition) -> (Vec<Condition>, bool) {
    let mut new_conditions = Vec::from(conditions);
    let mut changed = false;

    if let Some(existing) = new_conditions.iter_mut().find(|c| c.type_ == new_condition.type_) {
        if existing.status != new_condition.status {
            existing.status = new_condition.status;
            existing.last_transition_time = new_condition.last_transition_time;
            changed = true;
        }

        if existing.reason != new_condition.reason {
            existing.reason = new_condition.reason;
            changed = true;
        }

        if existing.message != new_condition.message {
            existing.message = new_condition.message;
            changed = true;
        }

        if existing.observed_generation != new_condition.observed_generation {
            existing.observed_generation = new_condition.observed_generation;
            changed = true;
        }
    } else {
        new_conditions.push(new_condition);
        changed = true;
    }

    (new_conditions, changed)
}

pub(crate) fn find_condition<'a>(conditions: &'a [Condition], condition_type: &ConditionType) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.type_ == condition_type.as_str())
}

/// Status of condition_type, `Unknown` when the type was never recorded
pub(crate) fn condition_status(conditions: &[Condition], condition_type: &ConditionType) -> ConditionStatus {
    find_condition(conditions, condition_type)
        .map(|c| ConditionStatus::from(c.status.as_str()))
        .unwrap_or(ConditionStatus::Unknown)
}

pub(crate) fn is_condition_true(conditions: &[Condition], condition_type: &ConditionType) -> bool {
    condition_status(conditions, condition_type) == ConditionStatus::True
}
