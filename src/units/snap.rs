//! Natural subdivision of quantity ranges.
//!
//! Axis ticks and histogram buckets should land on values a person would
//! pick: 250 ms, 15 min, 64 MiB. Given an upper limit on the bucket size,
//! each kind snaps down to the largest such value not exceeding the limit.
//! Consecutive candidates are never more than a factor 2 apart, so the
//! snapped extent always lies in `(limit/2, limit]` and the number of
//! buckets stays within a factor 2 of the requested maximum.

use super::quantity::Quantity;
use super::unit::{UnitKind, SECONDS_PER_YEAR};
use crate::utils::error::RangeError;

// Timespan tick candidates in seconds, from 1 s up to half a year.
// Below 1 s decimal snapping applies, above one year decimal multiples
// of a year. Each step is at most twice the previous one.
const TIMESPAN_TICKS: &[f64] = &[
    1.0,
    2.0,
    4.0,
    5.0,
    10.0,
    15.0,
    30.0,
    60.0,
    120.0,
    240.0,
    300.0,
    600.0,
    900.0,
    1800.0,
    3600.0,
    7200.0,
    14400.0,
    21600.0,
    43200.0,
    86400.0,
    172800.0,
    345600.0,
    604800.0,
    1209600.0,
    2419200.0,
    3024000.0,
    6048000.0,
    SECONDS_PER_YEAR / 4.0,
    SECONDS_PER_YEAR / 2.0,
];

/// Largest natural extent of `kind` not exceeding `limit`, in base units.
///
/// `limit` must be positive and finite.
pub(crate) fn snap_extent(kind: UnitKind, limit: f64) -> f64 {
    match kind.delta_kind() {
        UnitKind::Memory => snap_binary(limit),
        UnitKind::Timespan => snap_timespan(limit),
        _ => snap_decimal(limit),
    }
}

/// Largest `{1, 2, 2.5, 5} * 10^k` not exceeding `limit`.
fn snap_decimal(limit: f64) -> f64 {
    let decade = 10f64.powf(limit.log10().floor());
    let mantissa = limit / decade;
    let snapped = if mantissa >= 5.0 {
        5.0
    } else if mantissa >= 2.5 {
        2.5
    } else if mantissa >= 2.0 {
        2.0
    } else {
        1.0
    };
    snapped * decade
}

/// Largest power of two not exceeding `limit`.
fn snap_binary(limit: f64) -> f64 {
    2f64.powf(limit.log2().floor())
}

fn snap_timespan(limit: f64) -> f64 {
    if limit < 1.0 {
        return snap_decimal(limit);
    }
    if limit >= SECONDS_PER_YEAR {
        return snap_decimal(limit / SECONDS_PER_YEAR) * SECONDS_PER_YEAR;
    }
    TIMESPAN_TICKS
        .iter()
        .copied()
        .take_while(|tick| *tick <= limit)
        .last()
        .unwrap_or(1.0)
}

/// Align `q` down to a whole multiple of `extent`.
///
/// The result is expressed in `q`'s unit. `extent` must be a positive
/// quantity of `q`'s delta kind.
pub fn floor_quantize(q: &Quantity, extent: &Quantity) -> Quantity {
    let extent_base = extent.base_value();
    let aligned = (q.base_value() / extent_base).floor() * extent_base;
    Quantity::new(aligned / q.unit().to_base(), q.unit())
}

/// First natural bucket of the range `[start, end)` when subdividing into
/// at most `max_buckets` parts.
///
/// **Public** - the subdivision policy behind every axis
///
/// Returns the aligned bucket start (at or before `start`) and the bucket
/// extent. The extent depends only on the range's extent, never on where
/// `start` happens to fall, so tick density holds steady while panning.
///
/// # Errors
/// * `RangeError::KindMismatch` - `start` and `end` are of different kinds
/// * `RangeError::EmptyRange` - `start >= end`
/// * `RangeError::InvalidPixelExtent` - `max_buckets` is not positive
pub fn first_bucket(
    start: &Quantity,
    end: &Quantity,
    max_buckets: f64,
) -> Result<(Quantity, Quantity), RangeError> {
    if !(max_buckets > 0.0) {
        return Err(RangeError::InvalidPixelExtent(max_buckets));
    }
    let delta = end.checked_sub(start)?;
    if !(delta.base_value() > 0.0) {
        return Err(RangeError::EmptyRange {
            start: start.base_value(),
            end: end.base_value(),
        });
    }

    // A bucket may be up to twice the even split so the snap has a full
    // factor-2 window to land in.
    let max_extent = delta.base_value() * (2.0 / max_buckets);
    let extent_base = snap_extent(start.kind(), max_extent);

    let extent_unit = start.unit().delta_unit();
    let extent = Quantity::new(extent_base / extent_unit.to_base(), extent_unit);
    let aligned_start = floor_quantize(start, &extent);
    Ok((aligned_start, extent))
}
