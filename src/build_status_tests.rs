// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `MachineOSBuild` progress tracking.

#[cfg(test)]
mod tests {
    use crate::build_status::*;
    use crate::crd::*;
    use crate::status::find_condition;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use std::time::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + TimeDelta::seconds(secs)
    }

    fn spec(current: &str, desired: &str) -> MachineOSBuildSpec {
        MachineOSBuildSpec {
            machine_config_pool: MachineConfigPoolReference {
                name: "worker".into(),
            },
            build_inputs: BuildInputs::default(),
            current_config: current.into(),
            desired_config: desired.into(),
        }
    }

    #[test]
    fn test_needs_build_when_configs_differ() {
        assert!(spec("rendered-worker-a", "rendered-worker-b").needs_build());
        assert!(spec("", "rendered-worker-b").needs_build());
        assert!(!spec("rendered-worker-a", "rendered-worker-a").needs_build());
    }

    #[test]
    fn test_default_builder_is_openshift() {
        assert_eq!(
            MachineOSImageBuilderType::Default.effective(),
            MachineOSImageBuilderType::OpenShiftImageBuilder
        );
        assert_eq!(
            MachineOSImageBuilderType::PodImageBuilder.effective(),
            MachineOSImageBuilderType::PodImageBuilder
        );
    }

    #[test]
    fn test_progress_sets_exactly_one_true_condition() {
        let mut status = MachineOSBuildStatus::default();

        set_build_progress(&mut status, BuildProgress::Prepared, "inputs validated", at(0));
        set_build_progress(&mut status, BuildProgress::Building, "pod started", at(5));

        assert_eq!(status.conditions.len(), BuildProgress::ALL.len());
        let true_count = status
            .conditions
            .iter()
            .filter(|c| c.status == "True")
            .count();
        assert_eq!(true_count, 1);
        assert_eq!(current_progress(&status), Some(BuildProgress::Building));

        let building = find_condition(&status.conditions, "Building").unwrap();
        assert_eq!(building.reason.as_deref(), Some("BuildRunning"));
        assert_eq!(building.message.as_deref(), Some("pod started"));

        let prepared = find_condition(&status.conditions, "Prepared").unwrap();
        assert_eq!(prepared.status, "False");
    }

    #[test]
    fn test_start_time_set_once() {
        let mut status = MachineOSBuildStatus::default();

        set_build_progress(&mut status, BuildProgress::Prepared, "", at(0));
        set_build_progress(&mut status, BuildProgress::Building, "", at(5));

        assert_eq!(status.start_time, Some(at(0)));
        assert_eq!(status.end_time, None);
    }

    #[test]
    fn test_ready_sets_end_time() {
        let mut status = MachineOSBuildStatus::default();

        set_build_progress(&mut status, BuildProgress::Building, "", at(0));
        set_build_progress(&mut status, BuildProgress::Ready, "image pushed", at(600));

        assert_eq!(current_progress(&status), Some(BuildProgress::Ready));
        assert_eq!(status.end_time, Some(at(600)));
        assert_eq!(build_duration(&status), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_restart_begins_new_iteration() {
        let mut status = MachineOSBuildStatus::default();

        set_build_progress(&mut status, BuildProgress::Building, "", at(0));
        set_build_progress(&mut status, BuildProgress::Failed, "push denied", at(60));
        record_prior_build(&mut status, "worker-build-1", "push denied");
        set_build_progress(&mut status, BuildProgress::Restarted, "retrying", at(120));

        assert_eq!(current_progress(&status), Some(BuildProgress::Restarted));
        assert_eq!(status.start_time, Some(at(120)));
        assert_eq!(status.end_time, None);
        assert_eq!(build_duration(&status), None);
        assert_eq!(
            find_condition(&status.conditions, "Failed").unwrap().status,
            "False"
        );
        assert_eq!(status.build_history.len(), 1);
    }

    #[test]
    fn test_unchanged_condition_keeps_transition_time() {
        let mut status = MachineOSBuildStatus::default();

        set_build_progress(&mut status, BuildProgress::Building, "step 1", at(0));
        set_build_progress(&mut status, BuildProgress::Building, "step 2", at(30));

        let building = find_condition(&status.conditions, "Building").unwrap();
        assert_eq!(
            building.last_transition_time.as_deref(),
            Some("2025-03-01T12:00:00Z")
        );
        assert_eq!(building.message.as_deref(), Some("step 2"));
    }

    #[test]
    fn test_no_progress_without_conditions() {
        assert_eq!(current_progress(&MachineOSBuildStatus::default()), None);
    }

    #[test]
    fn test_build_history_has_set_semantics() {
        let mut status = MachineOSBuildStatus::default();

        record_prior_build(&mut status, "worker-build-1", "timeout");
        record_prior_build(&mut status, "worker-build-2", "");
        record_prior_build(&mut status, "worker-build-1", "interrupted by user");

        assert_eq!(
            status.build_history,
            vec![
                PriorMachineOSBuilds {
                    name: "worker-build-1".into(),
                    build_failure: "interrupted by user".into(),
                },
                PriorMachineOSBuilds {
                    name: "worker-build-2".into(),
                    build_failure: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_build_progress_round_trips_through_str() {
        for progress in BuildProgress::ALL {
            assert_eq!(progress.as_str().parse::<BuildProgress>().unwrap(), progress);
        }
        assert!("Queued".parse::<BuildProgress>().is_err());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(BuildProgress::Ready.is_terminal());
        assert!(BuildProgress::Failed.is_terminal());
        assert!(BuildProgress::Interrupted.is_terminal());
        assert!(!BuildProgress::Building.is_terminal());
        assert!(!BuildProgress::Restarted.is_terminal());
    }
}
