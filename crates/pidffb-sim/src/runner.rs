//! Tick-by-tick scenario execution

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};

use pidffb_core::{Clock, NUM_AXES};
use pidffb_engine::{AxisTelemetry, ForceEngine};
use pidffb_pool::EffectPool;
use pidffb_protocol::ids::{BLOCK_LOAD_REPORT_ID, CREATE_NEW_EFFECT_REPORT_ID};
use pidffb_protocol::{
    encode_block_load, handle_create_new_effect, handle_output_report, pid_state,
    read_feature_report,
};

use crate::scenario::{Event, Scenario, TimedEvent};

/// Forces produced by one tick, after the output clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSample {
    pub tick: u64,
    pub time_ms: u64,
    pub forces: [i32; NUM_AXES],
}

/// Feature report bytes returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRead {
    pub time_ms: u64,
    pub report_id: u8,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub samples: Vec<TickSample>,
    pub feature_reads: Vec<FeatureRead>,
    /// Reports that failed to decode.
    pub dropped_reports: usize,
    /// Events scheduled after the final tick.
    pub skipped_events: usize,
    /// PID state input report after the final tick.
    pub pid_state: [u8; 3],
}

impl SimReport {
    /// Largest absolute force seen on each axis.
    pub fn peak(&self) -> [i32; NUM_AXES] {
        self.samples.iter().fold([0; NUM_AXES], |peak, sample| {
            let [px, py] = peak;
            let [x, y] = sample.forces;
            [px.max(x.saturating_abs()), py.max(y.saturating_abs())]
        })
    }
}

/// Runs a scenario against a fresh pool and engine.
///
/// Tick `n` happens at `n * sample_period_ms` milliseconds. Every event
/// with `at` at or before that time is applied before the tick's forces are
/// computed.
pub fn run_scenario(scenario: &Scenario) -> SimReport {
    let now = Rc::new(Cell::new(0_u64));
    let clock = {
        let now = Rc::clone(&now);
        move || now.get()
    };
    let mut pool = EffectPool::new(clock);
    let mut engine = ForceEngine::new(scenario.engine);
    let mut telemetry = AxisTelemetry::new();
    let mut report = SimReport::default();

    let period = u64::from(scenario.engine.sample_period_ms);
    let mut events = scenario.events.iter().peekable();

    info!(ticks = scenario.ticks, events = scenario.events.len(), "scenario started");

    for tick in 0..scenario.ticks {
        let time_ms = tick.saturating_mul(period);
        now.set(time_ms);

        while let Some(timed) = events.next_if(|e| e.at <= time_ms) {
            apply_event(&mut pool, &mut telemetry, timed, &mut report);
        }

        let mut forces = engine.compute_forces(&mut pool, &telemetry);
        if let Some(limit) = scenario.output_limit {
            forces = forces.map(|f| f.clamp(-limit, limit));
        }
        report.samples.push(TickSample {
            tick,
            time_ms,
            forces,
        });
    }

    report.skipped_events = events.count();
    if report.skipped_events > 0 {
        warn!(
            skipped = report.skipped_events,
            "events scheduled after the final tick were not applied"
        );
    }
    report.pid_state = pid_state(&pool);
    info!(
        dropped = report.dropped_reports,
        allocated = pool.allocated_count(),
        "scenario finished"
    );
    report
}

fn apply_event<C: Clock>(
    pool: &mut EffectPool<C>,
    telemetry: &mut AxisTelemetry,
    timed: &TimedEvent,
    report: &mut SimReport,
) {
    let at = timed.at;
    match &timed.event {
        Event::Output { report: bytes } => {
            if let Err(error) = handle_output_report(pool, bytes.as_bytes()) {
                warn!(at, %error, "output report dropped");
                report.dropped_reports = report.dropped_reports.saturating_add(1);
            }
        }
        Event::CreateEffect { effect_type } => {
            let request = [CREATE_NEW_EFFECT_REPORT_ID, *effect_type, 0x00, 0x00];
            match handle_create_new_effect(pool, &request) {
                Ok(block_load) => report.feature_reads.push(FeatureRead {
                    time_ms: at,
                    report_id: BLOCK_LOAD_REPORT_ID,
                    bytes: encode_block_load(&block_load).to_vec(),
                }),
                Err(error) => {
                    warn!(at, %error, "create effect dropped");
                    report.dropped_reports = report.dropped_reports.saturating_add(1);
                }
            }
        }
        Event::Position { x, y } => telemetry.update_position([*x, *y]),
        Event::Metrics {
            position,
            velocity,
            acceleration,
        } => telemetry.update_metrics(*position, *velocity, *acceleration),
        Event::Buttons { mask } => telemetry.update_buttons(*mask),
        Event::ReadFeature { report_id } => match read_feature_report(pool, *report_id) {
            Ok(bytes) => {
                debug!(at, report_id, "feature report read");
                report.feature_reads.push(FeatureRead {
                    time_ms: at,
                    report_id: *report_id,
                    bytes: bytes.to_vec(),
                });
            }
            Err(error) => {
                warn!(at, %error, "feature read dropped");
                report.dropped_reports = report.dropped_reports.saturating_add(1);
            }
        },
    }
}
