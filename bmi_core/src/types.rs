//! Core domain types for the BMI tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Measurement units and user input
//! - Category bands and engine results
//! - Metabolic risk and recommendations
//! - History entries and trend points

use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Units
// ============================================================================

/// Unit the height was entered in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
    In,
}

impl HeightUnit {
    /// Convert a height in this unit to meters
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value / 100.0,
            HeightUnit::Ft => value * 0.3048,
            HeightUnit::In => value * 0.0254,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
            HeightUnit::In => "in",
        }
    }
}

impl FromStr for HeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "ft" | "foot" | "feet" => Ok(HeightUnit::Ft),
            "in" | "inch" | "inches" => Ok(HeightUnit::In),
            other => Err(Error::InvalidInput(format!("unknown height unit: {}", other))),
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit the weight was entered in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert a weight in this unit to kilograms
    pub fn to_kilograms(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * 0.453592,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            other => Err(Error::InvalidInput(format!("unknown weight unit: {}", other))),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(Error::InvalidInput(format!("unknown gender: {}", other))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Input
// ============================================================================

/// Raw measurement input as entered by the user
///
/// Numeric fields stay `None` until the user has typed something parseable.
/// Never persisted.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MeasurementInput {
    pub height: Option<f64>,
    pub height_unit: HeightUnit,
    pub weight: Option<f64>,
    pub weight_unit: WeightUnit,
    pub age: Option<u32>,
    pub gender: Gender,
}

impl MeasurementInput {
    /// Build an input from the text of the numeric fields
    ///
    /// Blank or unparseable text leaves the field absent.
    pub fn from_text(
        height: &str,
        height_unit: HeightUnit,
        weight: &str,
        weight_unit: WeightUnit,
        age: &str,
        gender: Gender,
    ) -> Self {
        Self {
            height: parse_number(height),
            height_unit,
            weight: parse_number(weight),
            weight_unit,
            age: parse_age(age),
            gender,
        }
    }

    /// Height normalized to meters, if present
    pub fn height_meters(&self) -> Option<f64> {
        self.height.map(|h| self.height_unit.to_meters(h))
    }

    /// Weight normalized to kilograms, if present
    pub fn weight_kilograms(&self) -> Option<f64> {
        self.weight.map(|w| self.weight_unit.to_kilograms(w))
    }
}

/// Parse a numeric text field; blank, non-numeric and non-finite text is absent
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse an age field, truncating fractional years
pub fn parse_age(text: &str) -> Option<u32> {
    parse_number(text)
        .filter(|age| *age >= 0.0 && *age <= u32::MAX as f64)
        .map(|age| age.trunc() as u32)
}

// ============================================================================
// Classification
// ============================================================================

/// A named half-open BMI band `[min, max)`
#[derive(Clone, Debug, PartialEq)]
pub struct BmiCategory {
    pub name: &'static str,
    pub min: f64,
    /// Exclusive upper bound; `f64::INFINITY` for the top band
    pub max: f64,
    pub display_range: &'static str,
    pub risk_factors: &'static [&'static str],
}

impl BmiCategory {
    pub fn contains(&self, bmi: f64) -> bool {
        bmi >= self.min && bmi < self.max
    }
}

/// Output of a successful BMI computation
#[derive(Clone, Debug, PartialEq)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub category: &'static BmiCategory,
    /// Normalized weight the BMI was computed from
    pub weight_kg: f64,
}

/// Coarse metabolic risk classification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Elevated,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetabolicRisk {
    pub level: RiskLevel,
    pub descriptions: &'static [&'static str],
}

/// A single static recommendation record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Everything derived from one input: result, risk, advice, gauge position
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment {
    pub result: BmiResult,
    pub risk: MetabolicRisk,
    /// Empty when age is absent
    pub recommendations: Vec<Recommendation>,
    /// Percentage (0-100) along the 15-40 BMI scale
    pub scale_position: f64,
}

// ============================================================================
// History Types
// ============================================================================

/// One committed BMI computation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub bmi: f64,
    /// Weight in kilograms, as entered (converted, never rounded)
    pub weight: f64,
    pub category: String,
    #[serde(default)]
    pub age: Option<u32>,
    pub gender: Gender,
}

/// A single point of the BMI trend line
#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    /// Short date label, e.g. `Oct 17`
    pub label: String,
    pub bmi: f64,
}
