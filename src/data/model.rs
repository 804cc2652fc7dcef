use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// DimensionValue – one configuration-dimension cell
// ---------------------------------------------------------------------------

/// A numeric configuration value attached to a measurement.
/// Using `BTreeMap` / `BTreeSet` downstream so `DimensionValue` must be `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Integer(i64),
    Float(f64),
}

// -- Manual Eq/Ord so we can put DimensionValue in BTreeSet --

impl Eq for DimensionValue {}

impl PartialOrd for DimensionValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DimensionValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use DimensionValue::*;
        fn discriminant(v: &DimensionValue) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for DimensionValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            DimensionValue::Integer(i) => i.hash(state),
            DimensionValue::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Integer(i) => write!(f, "{i}"),
            DimensionValue::Float(v) if v.fract() == 0.0 && v.is_finite() => {
                write!(f, "{v:.0}")
            }
            DimensionValue::Float(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dimension – the configuration axes a benchmark run varies
// ---------------------------------------------------------------------------

/// An optional configuration field of a measurement; selects the filter
/// predicate and the grouping ("x") axis of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    CsrSize,
    NumNodes,
}

impl Dimension {
    pub const ALL: [Dimension; 2] = [Dimension::CsrSize, Dimension::NumNodes];

    /// Canonical column name, as the benchmark clients write it.
    pub fn column_name(&self) -> &'static str {
        match self {
            Dimension::CsrSize => "csr-size",
            Dimension::NumNodes => "num-nodes",
        }
    }

    /// Human-readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::CsrSize => "CSR size in bytes",
            Dimension::NumNodes => "cluster nodes",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csr-size" | "csr_size" => Ok(Dimension::CsrSize),
            "num-nodes" | "num_nodes" => Ok(Dimension::NumNodes),
            other => Err(format!(
                "unknown dimension '{other}' (expected csr-size or num-nodes)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one observation
// ---------------------------------------------------------------------------

/// A single benchmark observation (one row of a measurement file).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRecord {
    /// Elapsed time for one certificate issuance, in milliseconds.
    pub time_to_certificate: f64,
    /// Size in bytes of the CSR used for this run, when recorded.
    pub csr_size: Option<f64>,
    /// Number of cluster nodes participating, when recorded.
    pub num_nodes: Option<u32>,
}

impl MeasurementRecord {
    /// Value of the given configuration dimension, if recorded.
    pub fn dimension(&self, dim: Dimension) -> Option<DimensionValue> {
        match dim {
            Dimension::CsrSize => self.csr_size.map(DimensionValue::Float),
            Dimension::NumNodes => self
                .num_nodes
                .map(|n| DimensionValue::Integer(i64::from(n))),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the unified dataset
// ---------------------------------------------------------------------------

/// Every record from every measurement file, with pre-computed value sets
/// per dimension. Built once, never mutated; filtering yields a new value.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in file-concatenation order.
    pub records: Vec<MeasurementRecord>,
    /// For each dimension the sorted set of values seen in the data.
    pub unique_values: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl Dataset {
    /// Build the per-dimension value index from the loaded records.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<DimensionValue>> = BTreeMap::new();

        for rec in &records {
            for dim in Dimension::ALL {
                if let Some(val) = rec.dimension(dim) {
                    unique_values.entry(dim).or_default().insert(val);
                }
            }
        }
        Dataset {
            records,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
