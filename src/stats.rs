use crate::curve::{build_path, Bounds};
use crate::models::{ChartView, DisciplineView};
use crate::store::DayStore;

/// Number of most recent points drawn on the chart.
pub const CHART_WINDOW: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub cumulative: f64,
    pub deposit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisciplineStats {
    pub total: usize,
    pub percent: u32,
    pub best_green_streak: u32,
    pub best_red_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    InsufficientData,
    StrongConsistency,
    LosingStreak,
    StableProgress,
    Unstable,
}

impl Advice {
    pub fn message(self) -> &'static str {
        match self {
            Advice::InsufficientData => {
                "Track at least 5 days to get a practical discipline recommendation."
            }
            Advice::StrongConsistency => {
                "Strong consistency. Keep the same routine and protect your streak by limiting impulsive entries."
            }
            Advice::LosingStreak => {
                "Red streak is growing. Reduce position size for the next sessions and trade only A+ setups."
            }
            Advice::StableProgress => {
                "Progress is stable. Focus on avoiding single emotional days that break momentum."
            }
            Advice::Unstable => {
                "Discipline is unstable. Use a strict daily checklist and cap risk until score recovers."
            }
        }
    }
}

pub fn cumulative_series(store: &DayStore) -> Vec<SeriesPoint> {
    let mut cumulative = 0.0;
    store
        .all_sorted_by_date()
        .map(|(_, entry)| {
            cumulative += f64::from(entry.result);
            SeriesPoint {
                cumulative,
                deposit: entry.deposit,
            }
        })
        .collect()
}

pub fn build_chart(store: &DayStore) -> ChartView {
    build_chart_in(store, Bounds::default())
}

pub fn build_chart_in(store: &DayStore, bounds: Bounds) -> ChartView {
    let series = cumulative_series(store);
    let visible = &series[series.len().saturating_sub(CHART_WINDOW)..];

    let results: Vec<f64> = visible.iter().map(|point| point.cumulative).collect();
    let deposits: Vec<f64> = visible.iter().map(|point| point.deposit).collect();

    let min_result = results.iter().copied().fold(0.0, f64::min);
    let max_result = results.iter().copied().fold(1.0, f64::max);
    let max_deposit = deposits.iter().copied().fold(1.0, f64::max);

    let result_path = build_path(&results, min_result, max_result, bounds);
    let deposit_path = build_path(&deposits, 0.0, max_deposit, bounds);

    ChartView {
        result_glow_path: result_path.clone(),
        result_path,
        deposit_glow_path: deposit_path.clone(),
        deposit_path,
        result_bounds: (min_result, max_result),
        deposit_bounds: (0.0, max_deposit),
    }
}

pub fn discipline_stats(store: &DayStore) -> DisciplineStats {
    let mut stats = DisciplineStats::default();
    let mut greens = 0usize;
    let mut reds = 0usize;
    let mut green_run = 0u32;
    let mut red_run = 0u32;

    for (_, entry) in store.all_sorted_by_date() {
        if entry.result == 1 {
            greens += 1;
            green_run += 1;
            red_run = 0;
            stats.best_green_streak = stats.best_green_streak.max(green_run);
        } else {
            reds += 1;
            red_run += 1;
            green_run = 0;
            stats.best_red_streak = stats.best_red_streak.max(red_run);
        }
    }

    stats.total = greens + reds;
    if stats.total > 0 {
        stats.percent = (greens as f64 * 100.0 / stats.total as f64).round() as u32;
    }
    stats
}

pub fn advice(total: usize, percent: u32, best_green_streak: u32, best_red_streak: u32) -> Advice {
    if total < 5 {
        Advice::InsufficientData
    } else if percent >= 75 && best_green_streak >= 4 {
        Advice::StrongConsistency
    } else if best_red_streak >= 3 {
        Advice::LosingStreak
    } else if percent >= 60 {
        Advice::StableProgress
    } else {
        Advice::Unstable
    }
}

pub fn discipline_view(stats: DisciplineStats) -> DisciplineView {
    DisciplineView {
        percent: stats.percent,
        percent_label: format!("{}%", stats.percent),
        best_green_streak: stats.best_green_streak,
        best_red_streak: stats.best_red_streak,
        total: stats.total,
    }
}
