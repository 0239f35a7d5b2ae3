//! BMI engine: unit normalization, categorization, risk and recommendations.
//!
//! Every function here is pure. Results are re-derived in full from the
//! input on every call; [`Engine`] only adds a single-entry cache on top.

use crate::tables::{self, bmi_categories};
use crate::{
    Assessment, BmiCategory, BmiResult, MeasurementInput, MetabolicRisk, Recommendation,
    RiskLevel,
};

/// Lower and upper ends of the BMI gauge
const SCALE_MIN: f64 = 15.0;
const SCALE_MAX: f64 = 40.0;

/// Compute BMI and category from raw input
///
/// Returns `None` ("not yet computable") when height or weight is absent,
/// zero, negative, or would produce a non-finite BMI.
///
/// The BMI is rounded to one decimal with round-half-away-from-zero and the
/// category is looked up on the rounded value, so the displayed number and
/// band always agree.
pub fn compute_bmi(input: &MeasurementInput) -> Option<BmiResult> {
    let height_m = input.height_meters().filter(|h| h.is_finite() && *h > 0.0)?;
    let weight_kg = input
        .weight_kilograms()
        .filter(|w| w.is_finite() && *w > 0.0)?;

    let raw = weight_kg / (height_m * height_m);
    if !raw.is_finite() {
        tracing::debug!("Discarding non-finite BMI for input {:?}", input);
        return None;
    }

    let bmi = round_one_decimal(raw);
    let category = category_for(bmi)?;

    Some(BmiResult {
        bmi,
        category,
        weight_kg,
    })
}

/// Find the band containing `bmi` (half-open, top band unbounded)
pub fn category_for(bmi: f64) -> Option<&'static BmiCategory> {
    bmi_categories().iter().find(|c| c.contains(bmi))
}

/// Round to one decimal place, halves away from zero
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify metabolic risk from the BMI value alone
pub fn metabolic_risk(bmi: f64) -> MetabolicRisk {
    let (level, descriptions) = if bmi >= 30.0 {
        (RiskLevel::High, tables::HIGH_RISKS)
    } else if bmi >= 25.0 {
        (RiskLevel::Moderate, tables::MODERATE_RISKS)
    } else if bmi < 18.5 {
        (RiskLevel::Elevated, tables::ELEVATED_RISKS)
    } else {
        (RiskLevel::Low, tables::LOW_RISKS)
    };

    MetabolicRisk {
        level,
        descriptions,
    }
}

/// Ordered recommendations for a BMI band, adjusted for age
///
/// - Normal band and `age > 40`: "Bone Health" goes before "Preventive Care"
/// - `age > 50`: "Age-Specific Screening" is appended last in every band
pub fn recommendations(bmi: f64, age: u32) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if bmi < 18.5 {
        recs.extend_from_slice(tables::UNDERWEIGHT_ADVICE);
    } else if bmi < 25.0 {
        recs.extend_from_slice(tables::NORMAL_ADVICE_HEAD);
        if age > 40 {
            recs.push(tables::BONE_HEALTH);
        }
        recs.extend_from_slice(tables::NORMAL_ADVICE_TAIL);
    } else if bmi < 30.0 {
        recs.extend_from_slice(tables::OVERWEIGHT_ADVICE);
    } else {
        recs.extend_from_slice(tables::OBESE_ADVICE);
    }

    if age > 50 {
        recs.push(tables::AGE_SCREENING);
    }

    recs
}

/// Position of `bmi` on the 15-40 gauge as a percentage, clamped to 0-100
pub fn scale_position(bmi: f64) -> f64 {
    if bmi < SCALE_MIN {
        0.0
    } else if bmi > SCALE_MAX {
        100.0
    } else {
        (bmi - SCALE_MIN) / (SCALE_MAX - SCALE_MIN) * 100.0
    }
}

/// Derive the full assessment for an input
///
/// Recommendations are left empty while age is absent.
pub fn assess(input: &MeasurementInput) -> Option<Assessment> {
    let result = compute_bmi(input)?;
    let risk = metabolic_risk(result.bmi);
    let recommendations = input
        .age
        .map(|age| recommendations(result.bmi, age))
        .unwrap_or_default();
    let scale_position = scale_position(result.bmi);

    tracing::debug!(
        "Assessed BMI {} ({}), risk {}",
        result.bmi,
        result.category.name,
        risk.level
    );

    Some(Assessment {
        result,
        risk,
        recommendations,
        scale_position,
    })
}

/// Engine front-end holding the last successful assessment
///
/// Caches the most recent `(input, assessment)` pair keyed by the exact
/// input. The cache never changes what is returned, only whether it is
/// recomputed.
#[derive(Debug, Default)]
pub struct Engine {
    last: Option<(MeasurementInput, Option<Assessment>)>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate an input, reusing the cached assessment for an identical input
    pub fn evaluate(&mut self, input: &MeasurementInput) -> Option<Assessment> {
        if let Some((cached_input, cached)) = &self.last {
            if cached_input == input {
                return cached.clone();
            }
        }

        let assessment = assess(input);
        self.last = Some((input.clone(), assessment.clone()));
        assessment
    }

    /// The assessment for the most recently evaluated input, if computable
    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last.as_ref().and_then(|(_, a)| a.as_ref())
    }

    /// The most recently evaluated input
    pub fn last_input(&self) -> Option<&MeasurementInput> {
        self.last.as_ref().map(|(input, _)| input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gender, HeightUnit, WeightUnit};

    fn input(height: f64, hu: HeightUnit, weight: f64, wu: WeightUnit) -> MeasurementInput {
        MeasurementInput {
            height: Some(height),
            height_unit: hu,
            weight: Some(weight),
            weight_unit: wu,
            age: None,
            gender: Gender::Male,
        }
    }

    fn titles(recs: &[Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_metric_scenario() {
        let result = compute_bmi(&input(180.0, HeightUnit::Cm, 75.0, WeightUnit::Kg)).unwrap();
        assert_eq!(result.bmi, 23.1);
        assert_eq!(result.category.name, "Normal Weight");
    }

    #[test]
    fn test_imperial_scenario() {
        let i = input(5.0, HeightUnit::Ft, 150.0, WeightUnit::Lbs);
        assert!((i.height_meters().unwrap() - 1.524).abs() < 1e-9);
        assert!((i.weight_kilograms().unwrap() - 68.04).abs() < 0.01);

        let result = compute_bmi(&i).unwrap();
        assert_eq!(result.bmi, 29.3);
        assert_eq!(result.category.name, "Overweight");
    }

    #[test]
    fn test_unit_invariance() {
        let metric = compute_bmi(&input(180.0, HeightUnit::Cm, 80.0, WeightUnit::Kg)).unwrap();
        let imperial =
            compute_bmi(&input(70.87, HeightUnit::In, 176.37, WeightUnit::Lbs)).unwrap();
        assert_eq!(metric.bmi, 24.7);
        assert_eq!(imperial.bmi, 24.7);
        assert_eq!(metric.category, imperial.category);
    }

    #[test]
    fn test_missing_or_zero_input_is_not_computable() {
        let mut i = input(180.0, HeightUnit::Cm, 75.0, WeightUnit::Kg);
        i.weight = None;
        assert!(compute_bmi(&i).is_none());

        let zero_height = input(0.0, HeightUnit::Cm, 75.0, WeightUnit::Kg);
        assert!(compute_bmi(&zero_height).is_none());

        let zero_weight = input(180.0, HeightUnit::Cm, 0.0, WeightUnit::Kg);
        assert!(compute_bmi(&zero_weight).is_none());

        let negative = input(-180.0, HeightUnit::Cm, 75.0, WeightUnit::Kg);
        assert!(compute_bmi(&negative).is_none());

        let nan = input(f64::NAN, HeightUnit::Cm, 75.0, WeightUnit::Kg);
        assert!(compute_bmi(&nan).is_none());
    }

    #[test]
    fn test_half_open_boundaries() {
        assert_eq!(category_for(18.4).unwrap().name, "Underweight");
        assert_eq!(category_for(18.5).unwrap().name, "Normal Weight");
        assert_eq!(category_for(24.9).unwrap().name, "Normal Weight");
        assert_eq!(category_for(25.0).unwrap().name, "Overweight");
        assert_eq!(category_for(30.0).unwrap().name, "Obese Class I");
        assert_eq!(category_for(35.0).unwrap().name, "Obese Class II");
        assert_eq!(category_for(40.0).unwrap().name, "Obese Class III");
    }

    #[test]
    fn test_top_band_is_unbounded() {
        assert_eq!(category_for(100.0).unwrap().name, "Obese Class III");
        assert_eq!(category_for(250.0).unwrap().name, "Obese Class III");

        // 100 kg at 90 cm is well past the old cap of 100
        let extreme = compute_bmi(&input(90.0, HeightUnit::Cm, 100.0, WeightUnit::Kg)).unwrap();
        assert!(extreme.bmi > 100.0);
        assert_eq!(extreme.category.name, "Obese Class III");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_one_decimal(2.25), 2.3);
        assert_eq!(round_one_decimal(-2.25), -2.3);
        assert_eq!(round_one_decimal(23.149), 23.1);
        assert_eq!(round_one_decimal(29.2947), 29.3);
    }

    #[test]
    fn test_metabolic_risk_levels() {
        assert_eq!(metabolic_risk(17.0).level, RiskLevel::Elevated);
        assert_eq!(metabolic_risk(18.5).level, RiskLevel::Low);
        assert_eq!(metabolic_risk(24.9).level, RiskLevel::Low);
        assert_eq!(metabolic_risk(25.0).level, RiskLevel::Moderate);
        assert_eq!(metabolic_risk(30.0).level, RiskLevel::High);
        assert_eq!(metabolic_risk(41.0).level, RiskLevel::High);

        let high = metabolic_risk(41.0);
        assert_eq!(high.descriptions.len(), 4);
        assert_eq!(high.descriptions[0], "High risk of metabolic syndrome");
    }

    #[test]
    fn test_obese_older_adult_gets_screening_last() {
        let risk = metabolic_risk(41.0);
        assert_eq!(risk.level, RiskLevel::High);

        let recs = recommendations(41.0, 55);
        assert_eq!(
            titles(&recs),
            vec![
                "Medical Supervision",
                "Structured Exercise Program",
                "Behavioral Support",
                "Set Realistic Goals",
                "Age-Specific Screening",
            ]
        );
    }

    #[test]
    fn test_bone_health_only_in_normal_band() {
        let normal = recommendations(22.0, 45);
        assert_eq!(
            titles(&normal),
            vec![
                "Maintain Current Weight",
                "Regular Exercise",
                "Bone Health",
                "Preventive Care",
            ]
        );

        let overweight = recommendations(27.0, 45);
        assert!(!titles(&overweight).contains(&"Bone Health"));

        let young = recommendations(22.0, 40);
        assert!(!titles(&young).contains(&"Bone Health"));
    }

    #[test]
    fn test_normal_band_over_fifty_gets_both_notes() {
        let recs = recommendations(22.0, 60);
        let t = titles(&recs);
        assert_eq!(t.len(), 5);
        assert_eq!(t[2], "Bone Health");
        assert_eq!(t[4], "Age-Specific Screening");
    }

    #[test]
    fn test_underweight_recommendations() {
        let recs = recommendations(17.0, 25);
        assert_eq!(
            titles(&recs),
            vec![
                "Increase Caloric Intake",
                "Strength Training",
                "Medical Consultation"
            ]
        );
    }

    #[test]
    fn test_scale_position() {
        assert_eq!(scale_position(10.0), 0.0);
        assert_eq!(scale_position(15.0), 0.0);
        assert_eq!(scale_position(27.5), 50.0);
        assert_eq!(scale_position(40.0), 100.0);
        assert_eq!(scale_position(55.0), 100.0);
    }

    #[test]
    fn test_assess_without_age_has_no_recommendations() {
        let assessment = assess(&input(180.0, HeightUnit::Cm, 75.0, WeightUnit::Kg)).unwrap();
        assert_eq!(assessment.result.bmi, 23.1);
        assert_eq!(assessment.risk.level, RiskLevel::Low);
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn test_assess_with_age() {
        let mut i = input(180.0, HeightUnit::Cm, 75.0, WeightUnit::Kg);
        i.age = Some(30);
        let assessment = assess(&i).unwrap();
        assert_eq!(assessment.recommendations.len(), 3);
    }

    #[test]
    fn test_engine_tracks_last_assessment() {
        let mut engine = Engine::new();
        assert!(engine.last_assessment().is_none());

        let i = input(180.0, HeightUnit::Cm, 75.0, WeightUnit::Kg);
        let first = engine.evaluate(&i).unwrap();
        let second = engine.evaluate(&i).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.last_assessment().unwrap().result.bmi, 23.1);

        let mut incomplete = i.clone();
        incomplete.height = None;
        assert!(engine.evaluate(&incomplete).is_none());
        assert!(engine.last_assessment().is_none());
        assert_eq!(engine.last_input(), Some(&incomplete));
    }
}
