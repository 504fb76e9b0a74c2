//! Metric aggregators.
//!
//! Both aggregators are single-pass, synchronous computations over
//! already-materialized record collections supplied by the caller.

pub mod esg;
pub mod sla;
