//! ==============================================================================
//! domain.rs - reading and limit records
//! ==============================================================================
//!
//! purpose:
//!     the two record shapes the service holds in memory, and the lenient
//!     parsers that turn an arbitrary request body into them.
//!
//! parsing policy:
//!     bodies are never rejected. a field that is missing, null, a string,
//!     or anything else that is not a json number falls back to its default
//!     (0 for readings, unset for limits). this is lossy on purpose: a
//!     publisher sending garbage still gets an acknowledgment.
//!     fields are decoded one at a time from raw json slices, so a number
//!     that overflows f64 (`1e400`) only defaults its own field. a body that
//!     is not a json object at all defaults every field.
//!
//! relationships:
//!     - used by: store.rs (holds one of each)
//!     - used by: server.rs (parses request bodies, serializes snapshots)
//!
//! ==============================================================================

use std::collections::HashMap;

use serde::Serialize;
use serde_json::value::RawValue;
use serde_json::Number;

/// the four metrics a publisher reports
pub const METRICS: [&str; 4] = ["current", "voltage", "power", "energy"];

/// last reading received from the publisher
///
/// values are kept as raw json numbers so an integer posted as `120`
/// comes back as `120`, not `120.0`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reading {
    /// amps
    pub current: Number,
    /// volts
    pub voltage: Number,
    /// watts
    pub power: Number,
    /// kilowatt hours
    pub energy: Number,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            current: Number::from(0),
            voltage: Number::from(0),
            power: Number::from(0),
            energy: Number::from(0),
        }
    }
}

impl Reading {
    /// build a reading from a raw request body
    ///
    /// every field not present as a json number becomes 0. an empty or
    /// unparseable body yields the all-zero reading.
    pub fn from_body(body: &[u8]) -> Self {
        let fields = body_object(body);
        Self {
            current: number_or_zero(&fields, "current"),
            voltage: number_or_zero(&fields, "voltage"),
            power: number_or_zero(&fields, "power"),
            energy: number_or_zero(&fields, "energy"),
        }
    }

    /// (name, value) pairs in metric order, lossy f64 for display
    pub fn values(&self) -> [(&'static str, f64); 4] {
        [
            (METRICS[0], as_f64(&self.current)),
            (METRICS[1], as_f64(&self.voltage)),
            (METRICS[2], as_f64(&self.power)),
            (METRICS[3], as_f64(&self.energy)),
        ]
    }
}

/// advisory thresholds, one per metric
///
/// stored and never enforced. `None` means unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LimitSet {
    pub current: Option<Number>,
    pub voltage: Option<Number>,
    pub power: Option<Number>,
    pub energy: Option<Number>,
}

impl LimitSet {
    /// build a limit set from a raw request body
    ///
    /// reads `<metric>_limit` keys. anything absent or non-numeric is
    /// stored as unset, so every call overwrites all four limits.
    pub fn from_body(body: &[u8]) -> Self {
        let fields = body_object(body);
        Self {
            current: number_or_unset(&fields, "current_limit"),
            voltage: number_or_unset(&fields, "voltage_limit"),
            power: number_or_unset(&fields, "power_limit"),
            energy: number_or_unset(&fields, "energy_limit"),
        }
    }

    /// number of limits currently set
    pub fn set_count(&self) -> usize {
        [&self.current, &self.voltage, &self.power, &self.energy]
            .iter()
            .filter(|l| l.is_some())
            .count()
    }
}

// ==============================================================================
// parse-with-default helpers
// ==============================================================================

/// top-level keys of a json object body, values left undecoded
type RawFields<'a> = HashMap<String, &'a RawValue>;

/// split a body into its raw fields, or none if it isn't a json object
fn body_object(body: &[u8]) -> RawFields<'_> {
    serde_json::from_slice(body).unwrap_or_default()
}

fn number_or_zero(fields: &RawFields<'_>, key: &str) -> Number {
    number_or_unset(fields, key).unwrap_or_else(|| Number::from(0))
}

/// the field as a json number, if it is one that fits
fn number_or_unset(fields: &RawFields<'_>, key: &str) -> Option<Number> {
    fields
        .get(key)
        .and_then(|raw| serde_json::from_str::<Number>(raw.get()).ok())
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(0.0)
}
