#[cfg(test)]
mod tests {
    use crate::api::v1alpha1::mariadb::{MariaDB, MariaDBSpec, MariaDBStatus};
    use crate::util::conditions::{
        new_condition, ConditionReason, ConditionStatus, ConditionType, BOOTSTRAPPED_CONDITION, READY_CONDITION,
    };
    use chrono::{TimeZone, Utc};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};
    use kube::core::ObjectMeta;
    use proptest::prelude::*;

    fn at(secs: i64) -> Time {
        Time(Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn condition(type_: ConditionType, status: ConditionStatus, reason: &str, message: &str, secs: i64) -> Condition {
        Condition {
            last_transition_time: at(secs),
            ..new_condition(type_, status, reason, message)
        }
    }

    fn mariadb() -> MariaDB {
        MariaDB {
            metadata: ObjectMeta {
                name: Some("mariadb".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            spec: MariaDBSpec::default(),
            status: None,
        }
    }

    #[test]
    fn empty_conditions_are_neither_ready_nor_bootstrapped() {
        let mut mdb = mariadb();
        assert!(!mdb.is_ready());
        assert!(!mdb.is_bootstrapped());

        mdb.status = Some(MariaDBStatus::default());
        assert!(!mdb.is_ready());
        assert!(!mdb.is_bootstrapped());
    }

    #[test]
    fn ready_condition_makes_instance_ready() {
        let mut mdb = mariadb();
        mdb.set_condition(condition(
            ConditionType::Ready,
            ConditionStatus::True,
            "AllPodsRunning",
            "3/3 ready",
            10,
        ));
        assert!(mdb.is_ready());
        assert!(!mdb.is_bootstrapped());
    }

    #[test]
    fn status_flip_records_time_of_second_write() {
        let mut mdb = mariadb();
        mdb.set_condition(condition(ConditionType::Ready, ConditionStatus::False, "Provisioning", "", 10));
        mdb.set_condition(condition(ConditionType::Ready, ConditionStatus::True, "StatefulSetReady", "", 20));

        let conditions = mdb.conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].status, "True");
        assert_eq!(conditions[0].last_transition_time, at(20));
        assert!(mdb.is_ready());
    }

    #[test]
    fn repeated_status_keeps_time_of_first_write() {
        let mut mdb = mariadb();
        assert!(mdb.set_condition(condition(ConditionType::Ready, ConditionStatus::True, "StatefulSetReady", "", 10)));
        assert!(!mdb.set_condition(condition(ConditionType::Ready, ConditionStatus::True, "StatefulSetReady", "", 20)));

        let conditions = mdb.conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].last_transition_time, at(10));
    }

    #[test]
    fn soft_deleted_instance_without_conditions() {
        let mut mdb = mariadb();
        mdb.metadata.deletion_timestamp = Some(at(30));

        assert!(mdb.is_being_deleted());
        assert!(!mdb.is_ready());
    }

    #[test]
    fn deletion_marker_is_independent_of_conditions() {
        let mut mdb = mariadb();
        mdb.set_condition(condition(ConditionType::Ready, ConditionStatus::True, "StatefulSetReady", "", 10));
        assert!(!mdb.is_being_deleted());

        mdb.metadata.deletion_timestamp = Some(at(30));
        assert!(mdb.is_being_deleted());
        assert!(mdb.is_ready());

        // condition writes stay legal while the resource is being deleted
        assert!(mdb.set_condition(condition(ConditionType::Ready, ConditionStatus::False, "Failed", "", 40)));
        assert!(mdb.is_being_deleted());
        assert!(!mdb.is_ready());
    }

    #[test]
    fn bootstrapped_never_goes_back() {
        let mut mdb = mariadb();
        mdb.set_condition(condition(
            ConditionType::Bootstrapped,
            ConditionStatus::False,
            &ConditionReason::RestoreInProgress.to_string(),
            "Restoring backup",
            10,
        ));
        mdb.set_condition(condition(
            ConditionType::Bootstrapped,
            ConditionStatus::True,
            &ConditionReason::RestoreComplete.to_string(),
            "Restored",
            20,
        ));
        assert!(mdb.is_bootstrapped());

        for status in [ConditionStatus::False, ConditionStatus::Unknown] {
            let changed = mdb.set_condition(condition(
                ConditionType::Bootstrapped,
                status,
                &ConditionReason::RestoreFailed.to_string(),
                "Restore failed",
                30,
            ));
            assert!(!changed);
        }

        let bootstrapped = &mdb.conditions()[0];
        assert!(mdb.is_bootstrapped());
        assert_eq!(bootstrapped.reason, "RestoreComplete");
        assert_eq!(bootstrapped.message, "Restored");
        assert_eq!(bootstrapped.last_transition_time, at(20));
    }

    #[test]
    fn unknown_condition_types_are_tracked_independently() {
        let status = MariaDBStatus::default()
            .with_condition(condition(ConditionType::Ready, ConditionStatus::True, "StatefulSetReady", "", 1))
            .with_condition(condition(
                ConditionType::from("PrimarySwitched"),
                ConditionStatus::Unknown,
                "Switching",
                "",
                2,
            ))
            .with_condition(condition(ConditionType::Ready, ConditionStatus::True, "StatefulSetReady", "ok", 3));

        let types: Vec<&str> = status.conditions.iter().map(|c| c.type_.as_str()).collect();
        assert_eq!(types, vec![READY_CONDITION, "PrimarySwitched"]);
        assert!(status.is_condition_true(&ConditionType::Ready));
        assert!(!status.is_condition_true(&ConditionType::Other("PrimarySwitched".to_string())));
        assert_eq!(
            status.condition(&ConditionType::Ready).map(|c| c.message.as_str()),
            Some("ok")
        );
    }

    const TYPES: [&str; 4] = [READY_CONDITION, BOOTSTRAPPED_CONDITION, "PrimarySwitched", "Backup"];
    const STATUSES: [ConditionStatus; 3] = [ConditionStatus::True, ConditionStatus::False, ConditionStatus::Unknown];
    const REASONS: [&str; 3] = ["Provisioning", "StatefulSetReady", "Failed"];

    proptest! {
        #[test]
        fn condition_sequences_uphold_status_invariants(
            writes in prop::collection::vec((0..TYPES.len(), 0..STATUSES.len(), 0..REASONS.len()), 0..40)
        ) {
            let mut status = MariaDBStatus::default();
            // type -> (status, last transition) as expected after each write
            let mut expected: Vec<(&str, ConditionStatus, i64)> = Vec::new();

            for (secs, (t, s, r)) in writes.into_iter().enumerate() {
                let secs = secs as i64;
                let type_ = TYPES[t];
                let new_status = STATUSES[s];
                status.set_condition(condition(ConditionType::from(type_), new_status, REASONS[r], "", secs));

                match expected.iter_mut().find(|(et, _, _)| *et == type_) {
                    None => expected.push((type_, new_status, secs)),
                    Some((_, current, time)) => {
                        let locked = type_ == BOOTSTRAPPED_CONDITION && *current == ConditionStatus::True;
                        if !locked && *current != new_status {
                            *current = new_status;
                            *time = secs;
                        }
                    }
                }

                prop_assert_eq!(status.conditions.len(), expected.len());
                for (condition, (type_, current, time)) in status.conditions.iter().zip(expected.iter()) {
                    prop_assert_eq!(condition.type_.as_str(), *type_);
                    prop_assert_eq!(ConditionStatus::from(condition.status.as_str()), *current);
                    prop_assert_eq!(condition.last_transition_time.0.timestamp(), *time);
                }
            }
        }

        #[test]
        fn bootstrapped_true_is_final(
            later in prop::collection::vec(0..STATUSES.len(), 0..20)
        ) {
            let mut status = MariaDBStatus::default().with_condition(condition(
                ConditionType::Bootstrapped,
                ConditionStatus::True,
                "RestoreComplete",
                "",
                0,
            ));

            for s in later {
                status.set_condition(condition(ConditionType::Bootstrapped, STATUSES[s], "Failed", "", 1));
                prop_assert!(status.is_condition_true(&ConditionType::Bootstrapped));
            }
        }

        #[test]
        fn deletion_ignores_condition_state(
            writes in prop::collection::vec((0..TYPES.len(), 0..STATUSES.len()), 0..20),
            deleted in any::<bool>()
        ) {
            let mut mdb = mariadb();
            if deleted {
                mdb.metadata.deletion_timestamp = Some(at(100));
            }
            for (t, s) in writes {
                mdb.set_condition(condition(ConditionType::from(TYPES[t]), STATUSES[s], "Provisioning", "", 1));
                prop_assert_eq!(mdb.is_being_deleted(), deleted);
            }
        }
    }
}
