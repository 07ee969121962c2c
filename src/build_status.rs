// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Progress tracking for `MachineOSBuild` status.
//!
//! A build moves through the [`BuildProgress`] phases. Every phase is a condition
//! type in `status.conditions`; exactly one of them is `True` at a time, the rest
//! are `False`:
//!
//! ```text
//! Prepared -> Building -> Ready
//!                      -> Failed      -> Restarted -> Building -> ...
//!                      -> Interrupted -> Restarted -> Building -> ...
//! ```
//!
//! Failed and interrupted iterations are remembered in `status.buildHistory`.

use crate::crd::{
    BuildProgress, MachineOSBuildSpec, MachineOSBuildStatus, MachineOSImageBuilderType,
    PriorMachineOSBuilds,
};
use crate::status::{is_condition_true, update_condition_at};
use crate::status_reasons::{
    reason_for_progress, CONDITION_STATUS_FALSE, CONDITION_STATUS_TRUE, REASON_PHASE_SUPERSEDED,
};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

impl MachineOSBuildSpec {
    /// An image has to be built when the pool does not run the desired config yet.
    #[must_use]
    pub fn needs_build(&self) -> bool {
        self.current_config != self.desired_config
    }
}

impl MachineOSImageBuilderType {
    /// Resolve `Default` to the builder it stands for.
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            MachineOSImageBuilderType::Default => MachineOSImageBuilderType::OpenShiftImageBuilder,
            other => other,
        }
    }
}

/// Move the build to `progress`.
///
/// The condition for `progress` becomes `True` and every other phase `False`.
/// `Prepared` and `Building` record `startTime` if it is not set yet, `Restarted`
/// begins a new iteration (new `startTime`, no `endTime`) and the terminal phases
/// set `endTime`.
pub fn set_build_progress(
    status: &mut MachineOSBuildStatus,
    progress: BuildProgress,
    message: &str,
    now: DateTime<Utc>,
) {
    for phase in BuildProgress::ALL {
        if phase == progress {
            update_condition_at(
                &mut status.conditions,
                phase.as_str(),
                CONDITION_STATUS_TRUE,
                reason_for_progress(phase),
                message,
                now,
            );
        } else {
            update_condition_at(
                &mut status.conditions,
                phase.as_str(),
                CONDITION_STATUS_FALSE,
                REASON_PHASE_SUPERSEDED,
                &format!("Build is {progress}"),
                now,
            );
        }
    }

    match progress {
        BuildProgress::Prepared | BuildProgress::Building => {
            status.start_time.get_or_insert(now);
        }
        BuildProgress::Restarted => {
            status.start_time = Some(now);
            status.end_time = None;
        }
        BuildProgress::Ready | BuildProgress::Failed | BuildProgress::Interrupted => {
            status.end_time = Some(now);
        }
    }

    if progress.is_terminal() {
        info!("Build reached {}: {}", progress, message);
    } else {
        debug!("Build moved to {}: {}", progress, message);
    }
}

/// The phase whose condition is `True`, if any.
#[must_use]
pub fn current_progress(status: &MachineOSBuildStatus) -> Option<BuildProgress> {
    BuildProgress::ALL
        .into_iter()
        .find(|phase| is_condition_true(&status.conditions, phase.as_str()))
}

/// Remember a failed or interrupted build. Entries are unique by name; recording
/// the same name again replaces its failure message.
pub fn record_prior_build(status: &mut MachineOSBuildStatus, name: &str, build_failure: &str) {
    if let Some(existing) = status.build_history.iter_mut().find(|b| b.name == name) {
        existing.build_failure = build_failure.to_string();
        return;
    }

    debug!("Recording prior build {}", name);
    status.build_history.push(PriorMachineOSBuilds {
        name: name.to_string(),
        build_failure: build_failure.to_string(),
    });
}

/// Wall time between `startTime` and `endTime`.
#[must_use]
pub fn build_duration(status: &MachineOSBuildStatus) -> Option<Duration> {
    match (status.start_time, status.end_time) {
        (Some(start), Some(end)) => (end - start).to_std().ok(),
        _ => None,
    }
}
