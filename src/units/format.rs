//! Human-readable formatting of quantities and axis tick labels.
//!
//! Standalone quantities pick a display unit from their own magnitude.
//! Tick labels pick it from the axis range instead, so every label on an
//! axis shares one unit, and timestamp labels pick their resolution from
//! the visible extent (dates when days are visible, fractional seconds
//! when zoomed below a second).

use super::quantity::Quantity;
use super::unit::Unit;
use super::UnitKind;
use chrono::{TimeZone, Utc};
use log::warn;

const MEMORY_LADDER: &[Unit] = &[Unit::TIB, Unit::GIB, Unit::MIB, Unit::KIB, Unit::BYTE];

const TIMESPAN_LADDER: &[Unit] = &[
    Unit::YEAR,
    Unit::DAY,
    Unit::HOUR,
    Unit::MINUTE,
    Unit::SECOND,
    Unit::MILLISECOND,
    Unit::MICROSECOND,
    Unit::NANOSECOND,
];

/// Format a quantity with an automatically chosen display unit.
pub fn format_quantity(q: &Quantity) -> String {
    match q.kind() {
        UnitKind::Number => trim_decimal(q.base_value()),
        UnitKind::Memory => in_ladder_unit(q, MEMORY_LADDER, q.base_value().abs()),
        UnitKind::Timespan => in_ladder_unit(q, TIMESPAN_LADDER, q.base_value().abs()),
        UnitKind::Timestamp => format_timestamp(q.base_value(), 1.0),
        UnitKind::Percentage => format!("{} %", trim_decimal(q.base_value() * 100.0)),
        UnitKind::Address => format_address(q.base_value()),
    }
}

/// Format an axis tick label, choosing unit and resolution from the
/// visible range extent rather than the tick value itself.
pub fn format_tick_label(q: &Quantity, range_extent: &Quantity) -> String {
    match q.kind() {
        UnitKind::Memory => in_ladder_unit(q, MEMORY_LADDER, range_extent.base_value()),
        UnitKind::Timespan => in_ladder_unit(q, TIMESPAN_LADDER, range_extent.base_value()),
        UnitKind::Timestamp => format_timestamp(q.base_value(), range_extent.base_value()),
        _ => format_quantity(q),
    }
}

fn in_ladder_unit(q: &Quantity, ladder: &[Unit], magnitude: f64) -> String {
    let unit = ladder
        .iter()
        .find(|unit| magnitude >= unit.to_base())
        .or_else(|| ladder.last())
        .copied()
        .unwrap_or(q.unit());
    format!("{} {}", trim_decimal(q.base_value() / unit.to_base()), unit.symbol())
}

/// Format an epoch-seconds value at a resolution fitting `extent` seconds.
fn format_timestamp(epoch_seconds: f64, extent: f64) -> String {
    let secs = epoch_seconds.floor();
    let nanos = ((epoch_seconds - secs) * 1e9).round().min(999_999_999.0) as u32;
    let Some(datetime) = Utc.timestamp_opt(secs as i64, nanos).single() else {
        warn!("timestamp out of datetime range: {} s", epoch_seconds);
        return trim_decimal(epoch_seconds);
    };
    let pattern = if extent >= 3.0 * 86400.0 {
        "%Y-%m-%d"
    } else if extent >= 3.0 * 3600.0 {
        "%m-%d %H:%M"
    } else if extent >= 180.0 {
        "%H:%M"
    } else if extent >= 1.0 {
        "%H:%M:%S"
    } else {
        "%H:%M:%S%.3f"
    };
    datetime.format(pattern).to_string()
}

fn format_address(base: f64) -> String {
    format!("0x{:X}", base.max(0.0) as u64)
}

/// Fixed-point with trailing zeros trimmed, so computed tick values such
/// as `0.30000000000000004` print as `0.3`.
fn trim_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.6}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
