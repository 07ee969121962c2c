// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::crd::BuildProgress;
    use crate::status_reasons::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_progress_has_a_distinct_reason() {
        let reasons: HashSet<_> = BuildProgress::ALL
            .into_iter()
            .map(reason_for_progress)
            .collect();

        assert_eq!(reasons.len(), BuildProgress::ALL.len());
        assert!(!reasons.contains(REASON_PHASE_SUPERSEDED));
    }

    #[test]
    fn test_reason_mapping() {
        assert_eq!(reason_for_progress(BuildProgress::Building), REASON_BUILD_RUNNING);
        assert_eq!(reason_for_progress(BuildProgress::Ready), REASON_BUILD_SUCCEEDED);
        assert_eq!(reason_for_progress(BuildProgress::Restarted), REASON_BUILD_RESTARTED);
    }

    #[test]
    fn test_condition_status_values() {
        assert_eq!(CONDITION_STATUS_TRUE, "True");
        assert_eq!(CONDITION_STATUS_FALSE, "False");
        assert_eq!(CONDITION_STATUS_UNKNOWN, "Unknown");
        assert_eq!(CONDITION_TYPE_DEGRADED, "Degraded");
    }
}
