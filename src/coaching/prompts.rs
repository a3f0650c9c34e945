use std::fmt;

use crate::analysis::{
    AverageMetrics, ChampionStats, ConsistencyMetrics, DisplayScale, Insight, MatchAnalysis,
    PlayerAnalysis, RoleStats,
};

/// Signed deltas inside this band count as unchanged.
pub const DELTA_DEAD_ZONE: f64 = 0.01;

/// One of the averaged metrics, as shown to the coach.
#[derive(Debug)]
pub struct TrackedMetric {
    pub label: &'static str,
    pub value: fn(&AverageMetrics) -> f64,
    pub scale: DisplayScale,
    pub precision: usize,
    pub lower_is_better: bool,
}

impl TrackedMetric {
    /// Display-scaled value of this metric.
    pub fn read(&self, averages: &AverageMetrics) -> f64 {
        self.scale.apply((self.value)(averages))
    }

    fn format(&self, scaled: f64) -> String {
        let unit = match self.scale {
            DisplayScale::Percent => "%",
            DisplayScale::Raw => "",
        };
        format!("{:.*}{unit}", self.precision, scaled)
    }
}

const fn tracked(
    label: &'static str,
    value: fn(&AverageMetrics) -> f64,
    scale: DisplayScale,
    precision: usize,
) -> TrackedMetric {
    TrackedMetric {
        label,
        value,
        scale,
        precision,
        lower_is_better: false,
    }
}

pub static TRACKED_METRICS: [TrackedMetric; 9] = [
    tracked("KDA", |a| a.kda, DisplayScale::Raw, 2),
    tracked(
        "Kill Participation",
        |a| a.kill_participation,
        DisplayScale::Percent,
        0,
    ),
    tracked("CS/min", |a| a.cs_per_minute, DisplayScale::Raw, 1),
    tracked("Damage/min", |a| a.damage_per_minute, DisplayScale::Raw, 0),
    tracked("Damage Share", |a| a.damage_share, DisplayScale::Percent, 0),
    tracked(
        "Vision Score/min",
        |a| a.vision_score_per_minute,
        DisplayScale::Raw,
        2,
    ),
    TrackedMetric {
        lower_is_better: true,
        ..tracked("Deaths/min", |a| a.deaths_per_minute, DisplayScale::Raw, 2)
    },
    tracked("Gold/min", |a| a.gold_per_minute, DisplayScale::Raw, 0),
    tracked(
        "Objective Participation",
        |a| a.objective_participation,
        DisplayScale::Percent,
        0,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaDirection {
    Improved,
    Regressed,
    Unchanged,
}

impl DeltaDirection {
    /// Classifies a delta already signed so that positive means better.
    pub fn classify(signed_delta: f64) -> Self {
        if signed_delta > DELTA_DEAD_ZONE {
            Self::Improved
        } else if signed_delta < -DELTA_DEAD_ZONE {
            Self::Regressed
        } else {
            Self::Unchanged
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improved => "improved",
            Self::Regressed => "regressed",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Change of one metric between two sessions, in display units.
#[derive(Debug, Clone, Copy)]
pub struct MetricDelta {
    pub metric: &'static TrackedMetric,
    pub previous: f64,
    pub current: f64,
    pub direction: DeltaDirection,
}

impl fmt::Display for MetricDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} ({})",
            self.metric.label,
            self.metric.format(self.previous),
            self.metric.format(self.current),
            self.direction.as_str()
        )
    }
}

pub fn compute_deltas(previous: &AverageMetrics, current: &AverageMetrics) -> Vec<MetricDelta> {
    TRACKED_METRICS
        .iter()
        .map(|metric| {
            let previous = metric.read(previous);
            let current = metric.read(current);
            let delta = current - previous;
            let signed = if metric.lower_is_better { -delta } else { delta };

            MetricDelta {
                metric,
                previous,
                current,
                direction: DeltaDirection::classify(signed),
            }
        })
        .collect()
}

const INITIAL_ROLE: &str = "You are an expert League of Legends coach. Your role is to analyze player statistics and provide actionable, specific advice to help them improve and climb the ranked ladder.";

const FOLLOW_UP_ROLE: &str = "You are an expert League of Legends coach conducting a follow-up session. You previously coached this player and now have new match data to assess their progress.";

const INITIAL_FORMAT: [&str; 4] = [
    "Summary (2-3 sentences assessing the player overall)",
    "Top 3 action items ranked by impact on climbing",
    "Specific advice for each identified weakness",
    "Champion and role recommendations based on their pool and performance",
];

const FOLLOW_UP_FORMAT: [&str; 5] = [
    "Progress assessment: what improved and what didn't since last session",
    "Acknowledge specific improvements",
    "Persistent weaknesses that need continued focus",
    "Updated top 3 action items based on new data",
    "Adjusted champion and role recommendations",
];

pub fn initial_system_prompt(analysis: &PlayerAnalysis) -> String {
    let mut out = String::new();
    out.push_str(INITIAL_ROLE);
    out.push_str("\n\n");

    write_profile(&mut out, analysis);
    write_averages(&mut out, &analysis.averages);
    write_consistency(&mut out, &analysis.consistency);
    write_insights(&mut out, "Strengths", &analysis.strengths);
    write_insights(&mut out, "Weaknesses", &analysis.weaknesses);
    write_champion_pool(&mut out, &analysis.champion_pool);
    write_roles(&mut out, &analysis.role_breakdown);
    write_matches(&mut out, &analysis.matches);
    write_response_format(&mut out, &INITIAL_FORMAT);

    out
}

pub fn follow_up_system_prompt(
    current: &PlayerAnalysis,
    previous: &PlayerAnalysis,
    previous_advice: &str,
) -> String {
    let mut out = String::new();
    out.push_str(FOLLOW_UP_ROLE);
    out.push_str("\n\n");

    write_profile(&mut out, current);
    write_averages(&mut out, &current.averages);
    write_consistency(&mut out, &current.consistency);
    write_insights(&mut out, "Current Strengths", &current.strengths);
    write_insights(&mut out, "Current Weaknesses", &current.weaknesses);
    write_champion_pool(&mut out, &current.champion_pool);
    write_roles(&mut out, &current.role_breakdown);
    write_matches(&mut out, &current.matches);

    out.push_str("## Previous Session\n\n### Previous Averages\n");
    write_metric_lines(&mut out, &previous.averages);

    out.push_str("### Progress Since Last Session\n");
    for delta in compute_deltas(&previous.averages, &current.averages) {
        out.push_str(&format!("- {delta}\n"));
    }
    out.push('\n');

    out.push_str("### Previous Coaching Advice\n");
    out.push_str(previous_advice);
    out.push_str("\n\n");

    write_response_format(&mut out, &FOLLOW_UP_FORMAT);
    out
}

pub fn user_prompt(is_follow_up: bool) -> &'static str {
    if is_follow_up {
        "This is a follow-up coaching session. Compare my progress since the last session and provide updated advice. What did I improve on? What still needs work? What should I focus on next?"
    } else {
        "Analyze my recent matches and provide coaching advice to help me climb ranked. Be specific and actionable."
    }
}

fn write_profile(out: &mut String, analysis: &PlayerAnalysis) {
    out.push_str("## Player Profile\n");
    out.push_str(&format!("- Riot ID: {}\n", analysis.riot_id()));
    if let Some(rank) = &analysis.rank {
        out.push_str(&format!("- Rank: {rank}\n"));
    }
    out.push_str(&format!(
        "- Win Rate: {:.0}% across {} matches\n\n",
        analysis.win_rate * 100.0,
        analysis.total_matches
    ));
}

fn write_averages(out: &mut String, averages: &AverageMetrics) {
    out.push_str("### Key Averages\n");
    write_metric_lines(out, averages);
}

fn write_metric_lines(out: &mut String, averages: &AverageMetrics) {
    for metric in &TRACKED_METRICS {
        out.push_str(&format!(
            "- {}: {}\n",
            metric.label,
            metric.format(metric.read(averages))
        ));
    }
    out.push('\n');
}

fn write_consistency(out: &mut String, consistency: &ConsistencyMetrics) {
    out.push_str(&format!(
        "### Consistency\n- KDA StdDev: {:.2}\n- CS/min StdDev: {:.2}\n- DPM StdDev: {:.0}\n\n",
        consistency.kda_std_dev, consistency.cs_per_min_std_dev, consistency.dpm_std_dev
    ));
}

fn write_insights(out: &mut String, label: &str, insights: &[Insight]) {
    if insights.is_empty() {
        return;
    }
    out.push_str(&format!("### {label}\n"));
    for insight in insights {
        out.push_str(&format!("- [{}] {}\n", insight.category, insight.description));
    }
    out.push('\n');
}

fn write_champion_pool(out: &mut String, pool: &[ChampionStats]) {
    if pool.is_empty() {
        return;
    }
    out.push_str("### Champion Pool\n");
    for c in pool {
        out.push_str(&format!(
            "- {}: {} games, {:.0}% WR, {:.2} avg KDA\n",
            c.champion_name,
            c.games_played,
            c.win_rate * 100.0,
            c.avg_kda
        ));
    }
    out.push('\n');
}

fn write_roles(out: &mut String, roles: &[RoleStats]) {
    if roles.is_empty() {
        return;
    }
    out.push_str("### Role Breakdown\n");
    for r in roles {
        out.push_str(&format!(
            "- {}: {} games, {:.0}% WR\n",
            r.role,
            r.games_played,
            r.win_rate * 100.0
        ));
    }
    out.push('\n');
}

fn write_matches(out: &mut String, matches: &[MatchAnalysis]) {
    if matches.is_empty() {
        return;
    }
    out.push_str("### Recent Matches\n");
    for m in matches {
        let metrics = &m.metrics;
        let result = if metrics.win { "Win" } else { "Loss" };
        out.push_str(&format!(
            "- {} {} ({result}): {:.1} KDA, {:.1} CS/min, {:.0} DPM [{}]",
            metrics.champion_name,
            metrics.role,
            metrics.kda,
            metrics.cs_per_minute,
            metrics.damage_per_minute,
            metrics.match_id
        ));
        if let Some(lane) = &m.lane_phase {
            out.push_str(&format!(
                " | @10: {:+} gold, {:+} CS vs lane, {} early deaths",
                lane.gold_diff_at_10, lane.cs_diff_at_10, lane.deaths_before_10
            ));
        }
        out.push('\n');
    }
    out.push('\n');
}

fn write_response_format(out: &mut String, items: &[&str]) {
    out.push_str("## Response Format\n");
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {item}\n", i + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RankSnapshot;

    fn averages(kda: f64, deaths_per_minute: f64) -> AverageMetrics {
        AverageMetrics {
            kda,
            kill_participation: 0.5,
            damage_per_minute: 650.0,
            damage_share: 0.22,
            cs_per_minute: 6.8,
            vision_score_per_minute: 0.9,
            deaths_per_minute,
            gold_per_minute: 400.0,
            objective_participation: 0.4,
        }
    }

    fn analysis(averages: AverageMetrics) -> PlayerAnalysis {
        PlayerAnalysis {
            puuid: "puuid".into(),
            game_name: "Chalop".into(),
            tag_line: "3012".into(),
            rank: Some(RankSnapshot {
                tier: "PLATINUM".into(),
                division: "IV".into(),
                league_points: 12,
            }),
            win_rate: 0.6,
            total_matches: 10,
            averages,
            consistency: ConsistencyMetrics::default(),
            role_breakdown: vec![],
            champion_pool: vec![],
            strengths: vec![],
            weaknesses: vec![],
            matches: vec![],
        }
    }

    fn direction(deltas: &[MetricDelta], label: &str) -> DeltaDirection {
        deltas
            .iter()
            .find(|d| d.metric.label == label)
            .map(|d| d.direction)
            .unwrap()
    }

    #[test]
    fn higher_kda_is_improved() {
        let deltas = compute_deltas(&averages(2.5, 0.2), &averages(3.5, 0.2));

        assert_eq!(direction(&deltas, "KDA"), DeltaDirection::Improved);
        assert_eq!(direction(&deltas, "Gold/min"), DeltaDirection::Unchanged);
    }

    #[test]
    fn fewer_deaths_is_improved() {
        let deltas = compute_deltas(&averages(3.0, 0.25), &averages(3.0, 0.15));

        assert_eq!(direction(&deltas, "Deaths/min"), DeltaDirection::Improved);

        let deltas = compute_deltas(&averages(3.0, 0.15), &averages(3.0, 0.25));
        assert_eq!(direction(&deltas, "Deaths/min"), DeltaDirection::Regressed);
    }

    #[test]
    fn dead_zone_hides_noise() {
        assert_eq!(DeltaDirection::classify(0.01), DeltaDirection::Unchanged);
        assert_eq!(DeltaDirection::classify(-0.01), DeltaDirection::Unchanged);
        assert_eq!(DeltaDirection::classify(0.02), DeltaDirection::Improved);
        assert_eq!(DeltaDirection::classify(-0.02), DeltaDirection::Regressed);
    }

    #[test]
    fn percent_deltas_are_compared_in_percent() {
        let mut current = averages(3.0, 0.2);
        current.kill_participation = 0.53;

        let deltas = compute_deltas(&averages(3.0, 0.2), &current);
        let kp = deltas
            .iter()
            .find(|d| d.metric.label == "Kill Participation")
            .unwrap();

        assert_eq!(kp.direction, DeltaDirection::Improved);
        assert_eq!(kp.to_string(), "Kill Participation: 50% -> 53% (improved)");
    }

    #[test]
    fn initial_prompt_has_profile_and_format() {
        let prompt = initial_system_prompt(&analysis(averages(3.0, 0.2)));

        assert!(prompt.contains("- Riot ID: Chalop#3012"));
        assert!(prompt.contains("- Rank: PLATINUM IV (12 LP)"));
        assert!(prompt.contains("- Win Rate: 60% across 10 matches"));
        assert!(prompt.contains("- KDA: 3.00"));
        assert!(prompt.contains("- Kill Participation: 50%"));
        assert!(prompt.contains("4. Champion and role recommendations"));
        assert!(!prompt.contains("Previous Session"));
    }

    #[test]
    fn follow_up_prompt_carries_previous_session() {
        let prompt = follow_up_system_prompt(
            &analysis(averages(3.5, 0.15)),
            &analysis(averages(2.5, 0.25)),
            "Stop dying before 10 minutes.",
        );

        assert!(prompt.contains("## Previous Session"));
        assert!(prompt.contains("- KDA: 2.50 -> 3.50 (improved)"));
        assert!(prompt.contains("- Deaths/min: 0.25 -> 0.15 (improved)"));
        assert!(prompt.contains("Stop dying before 10 minutes."));
        assert!(prompt.contains("5. Adjusted champion and role recommendations"));
    }

    #[test]
    fn user_prompt_depends_on_mode() {
        assert!(user_prompt(true).starts_with("This is a follow-up"));
        assert!(user_prompt(false).starts_with("Analyze my recent matches"));
    }
}
