//! Unit kinds and the fixed unit tables.
//!
//! Each kind has a base unit (byte, second, epoch second, unity) and a
//! small table of display units expressed as multipliers to that base.
//! Timestamp and timespan share the second as base so that deltas and
//! alignment math work across the two kinds.

use serde::{Deserialize, Serialize};

/// The physical kind of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Number,
    Memory,
    Timespan,
    Timestamp,
    Percentage,
    Address,
}

impl UnitKind {
    /// Kind of the difference between two quantities of this kind.
    ///
    /// Timestamps subtract to timespans; every other kind is closed
    /// under subtraction.
    pub fn delta_kind(self) -> UnitKind {
        match self {
            UnitKind::Timestamp => UnitKind::Timespan,
            kind => kind,
        }
    }
}

/// A display unit: kind, multiplier to the kind's base unit, symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    kind: UnitKind,
    to_base: f64,
    symbol: &'static str,
}

// Seconds per year follows the Julian convention of 8766 hours.
pub(crate) const SECONDS_PER_YEAR: f64 = 8766.0 * 3600.0;

impl Unit {
    pub const NUMBER: Unit = Unit::new(UnitKind::Number, 1.0, "");

    pub const BYTE: Unit = Unit::new(UnitKind::Memory, 1.0, "B");
    pub const KIB: Unit = Unit::new(UnitKind::Memory, 1024.0, "KiB");
    pub const MIB: Unit = Unit::new(UnitKind::Memory, 1024.0 * 1024.0, "MiB");
    pub const GIB: Unit = Unit::new(UnitKind::Memory, 1024.0 * 1024.0 * 1024.0, "GiB");
    pub const TIB: Unit = Unit::new(UnitKind::Memory, 1024.0 * 1024.0 * 1024.0 * 1024.0, "TiB");

    pub const NANOSECOND: Unit = Unit::new(UnitKind::Timespan, 1e-9, "ns");
    pub const MICROSECOND: Unit = Unit::new(UnitKind::Timespan, 1e-6, "\u{b5}s");
    pub const MILLISECOND: Unit = Unit::new(UnitKind::Timespan, 1e-3, "ms");
    pub const SECOND: Unit = Unit::new(UnitKind::Timespan, 1.0, "s");
    pub const MINUTE: Unit = Unit::new(UnitKind::Timespan, 60.0, "min");
    pub const HOUR: Unit = Unit::new(UnitKind::Timespan, 3600.0, "h");
    pub const DAY: Unit = Unit::new(UnitKind::Timespan, 86400.0, "d");
    pub const WEEK: Unit = Unit::new(UnitKind::Timespan, 604800.0, "wk");
    pub const YEAR: Unit = Unit::new(UnitKind::Timespan, SECONDS_PER_YEAR, "a");

    pub const EPOCH_NS: Unit = Unit::new(UnitKind::Timestamp, 1e-9, "epoch ns");
    pub const EPOCH_US: Unit = Unit::new(UnitKind::Timestamp, 1e-6, "epoch \u{b5}s");
    pub const EPOCH_MS: Unit = Unit::new(UnitKind::Timestamp, 1e-3, "epoch ms");
    pub const EPOCH_S: Unit = Unit::new(UnitKind::Timestamp, 1.0, "epoch s");

    /// Fraction where 1.0 means 100 %.
    pub const FRACTION: Unit = Unit::new(UnitKind::Percentage, 1.0, "");
    pub const PERCENT: Unit = Unit::new(UnitKind::Percentage, 0.01, "%");

    pub const ADDRESS: Unit = Unit::new(UnitKind::Address, 1.0, "");

    const fn new(kind: UnitKind, to_base: f64, symbol: &'static str) -> Self {
        Unit { kind, to_base, symbol }
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Multiplier converting a value in this unit to the kind's base unit.
    pub fn to_base(&self) -> f64 {
        self.to_base
    }

    /// Construct a quantity of `value` in this unit.
    pub fn quantity(self, value: f64) -> super::Quantity {
        super::Quantity::new(value, self)
    }

    /// The unit a delta between quantities in this unit is expressed in.
    ///
    /// Epoch units map to the timespan unit of the same resolution, all
    /// other units map to themselves.
    pub fn delta_unit(&self) -> Unit {
        match *self {
            Unit::EPOCH_NS => Unit::NANOSECOND,
            Unit::EPOCH_US => Unit::MICROSECOND,
            Unit::EPOCH_MS => Unit::MILLISECOND,
            Unit::EPOCH_S => Unit::SECOND,
            unit => unit,
        }
    }

    /// Look up a unit by the symbol used in recording files.
    ///
    /// Returns `None` for unrecognized symbols so callers can log and
    /// fall back instead of failing the load.
    pub fn parse(symbol: &str) -> Option<Unit> {
        let unit = match symbol {
            "" | "count" => Unit::NUMBER,
            "B" | "bytes" => Unit::BYTE,
            "KiB" => Unit::KIB,
            "MiB" => Unit::MIB,
            "GiB" => Unit::GIB,
            "TiB" => Unit::TIB,
            "ns" => Unit::NANOSECOND,
            "us" | "\u{b5}s" => Unit::MICROSECOND,
            "ms" => Unit::MILLISECOND,
            "s" => Unit::SECOND,
            "min" => Unit::MINUTE,
            "h" => Unit::HOUR,
            "d" => Unit::DAY,
            "epoch_ns" => Unit::EPOCH_NS,
            "epoch_us" => Unit::EPOCH_US,
            "epoch_ms" => Unit::EPOCH_MS,
            "epoch_s" => Unit::EPOCH_S,
            "%" | "percent" => Unit::PERCENT,
            "address" => Unit::ADDRESS,
            _ => return None,
        };
        Some(unit)
    }
}
