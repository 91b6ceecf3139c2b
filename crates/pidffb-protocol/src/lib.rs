//! USB HID PID force feedback report codec
//!
//! Inbound output and feature reports are decoded into [`OutputReport`] and
//! [`CreateNewEffect`] and applied to an [`EffectPool`](pidffb_pool::EffectPool);
//! outbound feature and input reports are encoded from the pool's report
//! values. Layouts are little-endian and packed, with the report id in
//! byte 0 and, for per-effect reports, the effect block index in byte 1.
//!
//! Nothing in this crate allocates or performs I/O.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod dispatch;
pub mod encode;
pub mod ids;
pub mod reader;
pub mod report;

pub use dispatch::{
    FEATURE_REPORT_LEN, apply, dispatch, handle_create_new_effect, handle_output_report,
    pid_state, read_feature_report,
};
pub use encode::{encode_block_load, encode_pid_state, encode_pool};
pub use reader::ReportReader;
pub use report::{CreateNewEffect, OutputReport};
