//! Schema descriptors and attribute coercion.
//!
//! A schema is a static, ordered table of `(property, descriptor)` entries.
//! Scalar descriptors read the attribute of the same name; composite
//! descriptors (`Object`, `Array`) read the projections of the children
//! assigned to the slot of the same name.

use serde_json::{Number, Value};
use tracing::warn;

/// Largest integer a JSON number round-trips exactly through an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ── Literals ──────────────────────────────────────────────────────────────

/// A constant usable in static schema tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Num(f64),
    Str(&'static str),
}

impl Literal {
    pub fn to_value(self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Num(n) => number_value(n),
            Literal::Str(s) => Value::from(s),
        }
    }

    /// The attribute text that selects this literal. `Null` has none.
    fn text(self) -> Option<String> {
        match self {
            Literal::Null => None,
            Literal::Bool(b) => Some(b.to_string()),
            Literal::Num(n) => Some(number_value(n).to_string()),
            Literal::Str(s) => Some(s.to_string()),
        }
    }
}

/// Converts an `f64` into a JSON number, using the integer representation
/// for integral values so that `3` and `3.0` project identically.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

// ── Coercers ──────────────────────────────────────────────────────────────

/// Casts an attribute's text into a JSON value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coercer {
    /// Set means `true`, except the text `false`.
    Boolean,
    /// Decimal number; empty text is `0`.
    Number,
    String,
    /// Inline JSON, e.g. `text-font='["Noto Sans Regular"]'`.
    Json,
    /// `"lon,lat"` into `[lon, lat]`.
    Coordinates,
    /// One of a fixed set of literals.
    Enum(&'static [Literal]),
    /// A style property whose type is not modelled yet.
    Unsupported,
}

impl Coercer {
    /// Coerces `raw` (`None` when the attribute is unset).
    ///
    /// Values that cannot be coerced are passed through as strings after a
    /// warning. Returns `None` only when the property must be omitted.
    pub fn coerce(self, key: &str, raw: Option<&str>) -> Option<Value> {
        let Some(text) = raw else {
            return Some(self.unset(key));
        };
        let value = match self {
            Coercer::Boolean => Value::Bool(text != "false"),
            Coercer::Number => coerce_number(key, text),
            Coercer::String => Value::from(text),
            Coercer::Json => serde_json::from_str(text).unwrap_or_else(|err| {
                warn!(key, value = text, %err, "attribute is not valid JSON");
                Value::from(text)
            }),
            Coercer::Coordinates => coerce_coordinates(key, text),
            Coercer::Enum(literals) => coerce_enum(literals, text),
            Coercer::Unsupported => {
                warn!("{key} not yet supported");
                Value::from(text)
            }
        };
        Some(value)
    }

    fn unset(self, key: &str) -> Value {
        match self {
            Coercer::Boolean => Value::Bool(false),
            Coercer::Number => Value::from(0),
            Coercer::Enum(literals) if !literals.contains(&Literal::Null) => {
                warn!("{key} must be one of {}", join_literals(literals));
                Value::Null
            }
            _ => Value::Null,
        }
    }
}

fn coerce_number(key: &str, text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => number_value(n),
        _ => {
            warn!(key, value = text, "attribute is not a number");
            Value::from(text)
        }
    }
}

fn coerce_coordinates(key: &str, text: &str) -> Value {
    let parsed: Vec<Option<f64>> = text
        .split(',')
        .take(2)
        .map(|part| part.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect();
    match parsed.as_slice() {
        [Some(lon), Some(lat)] => Value::Array(vec![number_value(*lon), number_value(*lat)]),
        _ => {
            warn!(key, value = text, "attribute is not a lon,lat pair");
            Value::from(text)
        }
    }
}

fn coerce_enum(literals: &[Literal], text: &str) -> Value {
    for literal in literals {
        if literal.text().as_deref() == Some(text) {
            return literal.to_value();
        }
    }
    warn!("{text} must be one of {}", join_literals(literals));
    Value::from(text)
}

fn join_literals(literals: &[Literal]) -> String {
    literals
        .iter()
        .map(|l| l.text().unwrap_or_else(|| "null".to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Descriptors ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Descriptor {
    /// Emitted verbatim.
    Literal(Literal),
    /// Coerced from the attribute of the same name. `optional` omits the
    /// property while the attribute is unset.
    Scalar { coercer: Coercer, optional: bool },
    /// Projection of the first assigned model child.
    Object,
    /// Projections of every assigned model child, in document order.
    Array,
}

impl Descriptor {
    pub fn is_composite(&self) -> bool {
        matches!(self, Descriptor::Object | Descriptor::Array)
    }
}

pub const fn optional(coercer: Coercer) -> Descriptor {
    Descriptor::Scalar { coercer, optional: true }
}

pub const fn required(coercer: Coercer) -> Descriptor {
    Descriptor::Scalar { coercer, optional: false }
}

pub const fn literal(value: &'static str) -> Descriptor {
    Descriptor::Literal(Literal::Str(value))
}

/// Coerces a scalar entry, applying the optional wrapper.
pub(crate) fn coerce_scalar(key: &str, coercer: Coercer, optional: bool, raw: Option<&str>) -> Option<Value> {
    if optional && raw.is_none() {
        return None;
    }
    coercer.coerce(key, raw)
}

// ── Schema ────────────────────────────────────────────────────────────────

pub type Entry = (&'static str, Descriptor);

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    entries: &'static [Entry],
}

impl Schema {
    pub const fn new(entries: &'static [Entry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [Entry] {
        self.entries
    }

    pub fn get(&self, key: &str) -> Option<&'static Descriptor> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, d)| d)
    }

    /// Whether changing attribute `name` can change the projection.
    pub fn observes(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Slot names, one per composite entry.
    pub fn slots(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().filter(|(_, d)| d.is_composite()).map(|(k, _)| *k)
    }

    /// The slot that receives children without a `slot` attribute: only
    /// defined when the schema has exactly one composite entry.
    pub fn implicit_slot(&self) -> Option<&'static str> {
        let mut slots = self.slots();
        match (slots.next(), slots.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}
