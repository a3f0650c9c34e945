use super::metrics::{AverageMetrics, ConsistencyMetrics, Insight, InsightCategory};

pub const DEEP_CHAMPION_POOL: usize = 8;
pub const NARROW_CHAMPION_POOL: usize = 2;
pub const CONSISTENT_KDA_STD_DEV: f64 = 1.0;
pub const INCONSISTENT_KDA_STD_DEV: f64 = 3.0;

/// How a metric is rendered inside an insight description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayScale {
    Raw,
    /// Ratio shown as a percentage.
    Percent,
}

impl DisplayScale {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Raw => value,
            Self::Percent => value * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Bound {
    AtLeast(f64),
    AtMost(f64),
}

impl Bound {
    fn matches(self, value: f64) -> bool {
        match self {
            Self::AtLeast(threshold) => value >= threshold,
            Self::AtMost(threshold) => value <= threshold,
        }
    }
}

/// One row of the insight table.
///
/// Templates carry a `{value}` placeholder filled with the scaled metric.
#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub category: InsightCategory,
    pub metric: fn(&AverageMetrics) -> f64,
    pub scale: DisplayScale,
    pub precision: usize,
    pub strength: Option<(f64, &'static str)>,
    pub weakness: (Bound, &'static str),
}

impl InsightRule {
    /// At most one insight; strength is checked first.
    pub fn evaluate(&self, averages: &AverageMetrics) -> Option<Insight> {
        let value = (self.metric)(averages);

        if let Some((threshold, template)) = self.strength
            && value >= threshold
        {
            return Some(self.insight(template, value, true));
        }

        let (bound, template) = self.weakness;
        bound
            .matches(value)
            .then(|| self.insight(template, value, false))
    }

    fn insight(&self, template: &str, value: f64, is_strength: bool) -> Insight {
        let shown = format!("{:.*}", self.precision, self.scale.apply(value));
        Insight {
            category: self.category,
            description: template.replace("{value}", &shown),
            value,
            is_strength,
        }
    }
}

pub static INSIGHT_RULES: [InsightRule; 7] = [
    InsightRule {
        category: InsightCategory::Combat,
        metric: |a| a.kda,
        scale: DisplayScale::Raw,
        precision: 1,
        strength: Some((
            3.0,
            "Strong KDA averaging {value}, effective at getting kills and staying alive",
        )),
        weakness: (
            Bound::AtMost(1.5),
            "Low KDA averaging {value}, dying too often relative to kill contribution",
        ),
    },
    InsightRule {
        category: InsightCategory::Combat,
        metric: |a| a.kill_participation,
        scale: DisplayScale::Percent,
        precision: 0,
        strength: Some((
            0.65,
            "High kill participation at {value}%, consistently involved in team fights",
        )),
        weakness: (
            Bound::AtMost(0.40),
            "Low kill participation at {value}%, missing team fights or playing too passively",
        ),
    },
    InsightRule {
        category: InsightCategory::Farming,
        metric: |a| a.cs_per_minute,
        scale: DisplayScale::Raw,
        precision: 1,
        strength: Some((7.5, "Strong farming at {value} CS/min")),
        weakness: (
            Bound::AtMost(5.5),
            "Low CS at {value} per minute, missing too much farm",
        ),
    },
    InsightRule {
        category: InsightCategory::Vision,
        metric: |a| a.vision_score_per_minute,
        scale: DisplayScale::Raw,
        precision: 2,
        strength: Some((1.2, "Excellent vision control at {value} score/min")),
        weakness: (
            Bound::AtMost(0.6),
            "Low vision score at {value} per minute, not warding enough",
        ),
    },
    InsightRule {
        category: InsightCategory::Combat,
        metric: |a| a.damage_share,
        scale: DisplayScale::Percent,
        precision: 0,
        strength: Some((0.28, "High team damage share at {value}%, carrying damage output")),
        weakness: (
            Bound::AtMost(0.15),
            "Low damage share at {value}%, not contributing enough damage",
        ),
    },
    InsightRule {
        category: InsightCategory::Objectives,
        metric: |a| a.objective_participation,
        scale: DisplayScale::Percent,
        precision: 0,
        strength: Some((0.60, "Strong objective participation at {value}%")),
        weakness: (
            Bound::AtMost(0.30),
            "Low objective participation at {value}%, missing dragon and baron fights",
        ),
    },
    InsightRule {
        category: InsightCategory::Deaths,
        metric: |a| a.deaths_per_minute,
        scale: DisplayScale::Raw,
        precision: 2,
        strength: None,
        weakness: (
            Bound::AtLeast(0.25),
            "High death rate at {value} per minute, positioning or decision making needs work",
        ),
    },
];

/// Splits the notable metrics of a player into `(strengths, weaknesses)`.
///
/// Table rules come first, in table order, then champion pool breadth and KDA consistency.
pub fn identify_insights(
    averages: &AverageMetrics,
    champion_pool_size: usize,
    consistency: &ConsistencyMetrics,
) -> (Vec<Insight>, Vec<Insight>) {
    let (mut strengths, mut weaknesses): (Vec<_>, Vec<_>) = INSIGHT_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(averages))
        .partition(|insight| insight.is_strength);

    let pool = champion_pool_size as f64;
    if champion_pool_size >= DEEP_CHAMPION_POOL {
        strengths.push(Insight {
            category: InsightCategory::ChampionPool,
            description: format!("Deep champion pool with {champion_pool_size} unique champions"),
            value: pool,
            is_strength: true,
        });
    } else if champion_pool_size <= NARROW_CHAMPION_POOL {
        weaknesses.push(Insight {
            category: InsightCategory::ChampionPool,
            description: format!("Narrow champion pool with only {champion_pool_size} champion(s)"),
            value: pool,
            is_strength: false,
        });
    }

    let kda_std_dev = consistency.kda_std_dev;
    if kda_std_dev < CONSISTENT_KDA_STD_DEV {
        strengths.push(Insight {
            category: InsightCategory::Consistency,
            description: format!("Very consistent KDA performance (stddev {kda_std_dev:.2})"),
            value: kda_std_dev,
            is_strength: true,
        });
    } else if kda_std_dev > INCONSISTENT_KDA_STD_DEV {
        weaknesses.push(Insight {
            category: InsightCategory::Consistency,
            description: format!(
                "Inconsistent performance with large KDA swings (stddev {kda_std_dev:.2})"
            ),
            value: kda_std_dev,
            is_strength: false,
        });
    }

    (strengths, weaknesses)
}
