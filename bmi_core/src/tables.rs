//! Static classification tables: category bands, risk text, recommendations.
//!
//! Built once on first use and never mutated afterwards.

use crate::types::*;
use once_cell::sync::Lazy;

/// BMI category bands, contiguous over `[0, ∞)`
static BMI_CATEGORIES: Lazy<Vec<BmiCategory>> = Lazy::new(|| {
    vec![
        BmiCategory {
            name: "Underweight",
            min: 0.0,
            max: 18.5,
            display_range: "< 18.5",
            risk_factors: &[
                "Malnutrition",
                "Weakened immune system",
                "Osteoporosis",
                "Anemia",
            ],
        },
        BmiCategory {
            name: "Normal Weight",
            min: 18.5,
            max: 25.0,
            display_range: "18.5 - 24.9",
            risk_factors: &["Lowest health risk", "Optimal metabolic function"],
        },
        BmiCategory {
            name: "Overweight",
            min: 25.0,
            max: 30.0,
            display_range: "25 - 29.9",
            risk_factors: &[
                "Increased cardiovascular risk",
                "Type 2 diabetes risk",
                "Hypertension",
                "Sleep apnea",
            ],
        },
        BmiCategory {
            name: "Obese Class I",
            min: 30.0,
            max: 35.0,
            display_range: "30 - 34.9",
            risk_factors: &[
                "High cardiovascular risk",
                "Type 2 diabetes",
                "Hypertension",
                "Joint problems",
                "Metabolic syndrome",
            ],
        },
        BmiCategory {
            name: "Obese Class II",
            min: 35.0,
            max: 40.0,
            display_range: "35 - 39.9",
            risk_factors: &[
                "Very high cardiovascular risk",
                "Severe metabolic complications",
                "Limited mobility",
                "Reduced quality of life",
            ],
        },
        BmiCategory {
            name: "Obese Class III",
            min: 40.0,
            max: f64::INFINITY,
            display_range: "≥ 40",
            risk_factors: &[
                "Extremely high health risk",
                "Severe chronic conditions",
                "Significantly reduced life expectancy",
            ],
        },
    ]
});

/// Get the category table in ascending band order
pub fn bmi_categories() -> &'static [BmiCategory] {
    &BMI_CATEGORIES
}

/// Look up a category by its display name
pub fn category_by_name(name: &str) -> Option<&'static BmiCategory> {
    BMI_CATEGORIES.iter().find(|c| c.name == name)
}

// ============================================================================
// Metabolic risk descriptions
// ============================================================================

pub(crate) const HIGH_RISKS: &[&str] = &[
    "High risk of metabolic syndrome",
    "Increased risk of type 2 diabetes",
    "Elevated cardiovascular disease risk",
    "Increased risk of certain cancers",
];

pub(crate) const MODERATE_RISKS: &[&str] = &[
    "Moderate metabolic risk",
    "Increased cardiovascular risk",
    "Monitor for metabolic changes",
];

pub(crate) const ELEVATED_RISKS: &[&str] = &[
    "Risk of nutritional deficiencies",
    "Weakened immune system",
    "Reduced bone density risk",
];

pub(crate) const LOW_RISKS: &[&str] = &[
    "Low metabolic disease risk",
    "Healthy weight range",
    "Optimal cardiovascular health markers",
];

// ============================================================================
// Recommendations
// ============================================================================

pub(crate) const UNDERWEIGHT_ADVICE: &[Recommendation] = &[
    Recommendation {
        title: "Increase Caloric Intake",
        description: "Focus on nutrient-dense foods with higher calories. Aim for 300-500 extra calories per day.",
        icon: "🍽️",
    },
    Recommendation {
        title: "Strength Training",
        description: "Build muscle mass through resistance exercises 3-4 times per week.",
        icon: "💪",
    },
    Recommendation {
        title: "Medical Consultation",
        description: "Consult a healthcare provider to rule out underlying conditions causing low weight.",
        icon: "👨‍⚕️",
    },
];

/// Normal-band advice up to the slot where the bone health note goes
pub(crate) const NORMAL_ADVICE_HEAD: &[Recommendation] = &[
    Recommendation {
        title: "Maintain Current Weight",
        description: "Continue your current healthy lifestyle. Focus on balanced nutrition and regular exercise.",
        icon: "✅",
    },
    Recommendation {
        title: "Regular Exercise",
        description: "150 minutes of moderate aerobic activity or 75 minutes of vigorous activity weekly.",
        icon: "🏃",
    },
];

pub(crate) const NORMAL_ADVICE_TAIL: &[Recommendation] = &[Recommendation {
    title: "Preventive Care",
    description: "Regular health screenings and maintain healthy lifestyle habits.",
    icon: "🩺",
}];

pub(crate) const BONE_HEALTH: Recommendation = Recommendation {
    title: "Bone Health",
    description: "Include weight-bearing exercises and ensure adequate calcium and vitamin D intake.",
    icon: "🦴",
};

pub(crate) const OVERWEIGHT_ADVICE: &[Recommendation] = &[
    Recommendation {
        title: "Weight Management",
        description: "Aim for gradual weight loss of 0.5-1 kg per week through caloric deficit of 500 calories/day.",
        icon: "📉",
    },
    Recommendation {
        title: "Increase Physical Activity",
        description: "Target 200-300 minutes of moderate activity weekly for weight management.",
        icon: "🚴",
    },
    Recommendation {
        title: "Dietary Modifications",
        description: "Reduce processed foods, increase vegetables, lean proteins, and whole grains.",
        icon: "🥗",
    },
    Recommendation {
        title: "Monitor Progress",
        description: "Track weight weekly and measure waist circumference monthly.",
        icon: "📊",
    },
];

pub(crate) const OBESE_ADVICE: &[Recommendation] = &[
    Recommendation {
        title: "Medical Supervision",
        description: "Consult healthcare providers for comprehensive weight management plan and metabolic screening.",
        icon: "🏥",
    },
    Recommendation {
        title: "Structured Exercise Program",
        description: "Begin with low-impact activities like walking or swimming. Gradually increase intensity.",
        icon: "🏊",
    },
    Recommendation {
        title: "Behavioral Support",
        description: "Consider working with a registered dietitian and behavioral therapist for sustainable changes.",
        icon: "🧠",
    },
    Recommendation {
        title: "Set Realistic Goals",
        description: "Aim for 5-10% weight loss initially. Small changes lead to significant health improvements.",
        icon: "🎯",
    },
];

pub(crate) const AGE_SCREENING: Recommendation = Recommendation {
    title: "Age-Specific Screening",
    description: "Regular cardiovascular and metabolic screening is important at your age.",
    icon: "🩺",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_categories() {
        assert_eq!(bmi_categories().len(), 6);
    }

    #[test]
    fn test_bands_are_contiguous() {
        let categories = bmi_categories();
        assert_eq!(categories[0].min, 0.0);
        for pair in categories.windows(2) {
            assert_eq!(
                pair[0].max, pair[1].min,
                "gap between {} and {}",
                pair[0].name, pair[1].name
            );
        }
        assert!(categories.last().unwrap().max.is_infinite());
    }

    #[test]
    fn test_every_category_has_risk_factors() {
        for category in bmi_categories() {
            assert!(!category.risk_factors.is_empty(), "{}", category.name);
        }
    }

    #[test]
    fn test_category_by_name() {
        let normal = category_by_name("Normal Weight").unwrap();
        assert_eq!(normal.min, 18.5);
        assert!(category_by_name("Skinny").is_none());
    }
}
