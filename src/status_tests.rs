// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for status condition helpers.

#[cfg(test)]
mod tests {
    use crate::crd::{Condition, DNSNameResolverStatus};
    use crate::status::*;
    use chrono::{TimeZone, Utc};
    use kube::api::Patch;
    use serde_json::json;

    #[test]
    fn test_create_condition() {
        let condition = create_condition("Degraded", "True", "ResolutionFailed", "SERVFAIL");

        assert_eq!(condition.r#type, "Degraded");
        assert_eq!(condition.status, "True");
        assert_eq!(condition.reason, Some("ResolutionFailed".to_string()));
        assert_eq!(condition.message, Some("SERVFAIL".to_string()));
        assert!(condition.last_transition_time.is_some());
        assert!(condition.observed_generation.is_none());
    }

    #[test]
    fn test_create_condition_at_formats_time() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 8, 30, 0).unwrap();
        let condition = create_condition_at("Ready", "True", "BuildSucceeded", "done", now);

        assert_eq!(
            condition.last_transition_time.as_deref(),
            Some("2025-01-01T08:30:00Z")
        );
    }

    #[test]
    fn test_condition_changed_no_existing() {
        let new_cond = create_condition("Ready", "True", "BuildSucceeded", "done");
        assert!(condition_changed(None, &new_cond));
    }

    #[test]
    fn test_condition_changed_status_differs() {
        let existing = create_condition("Ready", "False", "BuildRunning", "building");
        let new_cond = create_condition("Ready", "True", "BuildRunning", "building");
        assert!(condition_changed(Some(&existing), &new_cond));
    }

    #[test]
    fn test_condition_unchanged_ignores_reason() {
        let existing = create_condition("Ready", "True", "A", "same");
        let new_cond = create_condition("Ready", "True", "B", "same");
        assert!(!condition_changed(Some(&existing), &new_cond));
    }

    #[test]
    fn test_find_condition() {
        let conditions = vec![
            create_condition("Building", "False", "PhaseSuperseded", ""),
            create_condition("Ready", "True", "BuildSucceeded", ""),
        ];

        assert_eq!(find_condition(&conditions, "Ready").unwrap().status, "True");
        assert!(find_condition(&conditions, "Failed").is_none());
        assert!(is_condition_true(&conditions, "Ready"));
        assert!(!is_condition_true(&conditions, "Building"));
        assert!(!is_condition_true(&conditions, "Failed"));
    }

    #[test]
    fn test_update_condition_adds_new() {
        let mut conditions = Vec::new();
        update_condition_in_memory(&mut conditions, "Degraded", "False", "ResolutionSucceeded", "ok");

        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].r#type, "Degraded");
    }

    #[test]
    fn test_update_condition_preserves_time_when_status_same() {
        let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 5, 0).unwrap();
        let mut conditions = Vec::new();

        update_condition_at(&mut conditions, "Degraded", "True", "ResolutionFailed", "first", t1);
        update_condition_at(&mut conditions, "Degraded", "True", "ResolutionFailed", "second", t2);

        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].message.as_deref(), Some("second"));
        assert_eq!(
            conditions[0].last_transition_time.as_deref(),
            Some("2025-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_update_condition_new_time_on_status_change() {
        let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 5, 0).unwrap();
        let mut conditions = Vec::new();

        update_condition_at(&mut conditions, "Degraded", "True", "ResolutionFailed", "x", t1);
        update_condition_at(&mut conditions, "Degraded", "False", "ResolutionSucceeded", "y", t2);

        assert_eq!(conditions[0].status, "False");
        assert_eq!(
            conditions[0].last_transition_time.as_deref(),
            Some("2025-01-01T00:05:00Z")
        );
    }

    #[test]
    fn test_conditions_equal_ignores_order_and_time() {
        let a = vec![
            create_condition_at("A", "True", "R", "m", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            create_condition("B", "False", "R", "m"),
        ];
        let b = vec![
            create_condition("B", "False", "R", "m"),
            create_condition("A", "True", "R", "m"),
        ];

        assert!(conditions_equal(&a, &b));
    }

    #[test]
    fn test_conditions_not_equal() {
        let a = vec![create_condition("A", "True", "R", "m")];
        let b = vec![create_condition("A", "False", "R", "m")];
        let c: Vec<Condition> = vec![];

        assert!(!conditions_equal(&a, &b));
        assert!(!conditions_equal(&a, &c));
    }

    #[test]
    fn test_status_merge_patch_wraps_status() {
        let patch = status_merge_patch(&DNSNameResolverStatus::default()).unwrap();

        match patch {
            Patch::Merge(body) => assert_eq!(body, json!({ "status": {} })),
            other => panic!("expected merge patch, got {other:?}"),
        }
    }
}
