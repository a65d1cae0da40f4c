use crate::calendar::{render_grid, CalendarCursor};
use crate::editor::DayEditor;
use crate::models::JournalView;
use crate::stats::{advice, build_chart, discipline_stats, discipline_view};
use crate::store::DayStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Whole session state: entries, the calendar cursor and the open dialog.
#[derive(Debug, Clone)]
pub struct Journal {
    pub store: DayStore,
    pub cursor: CalendarCursor,
    pub editor: DayEditor,
}

impl Journal {
    pub fn new(store: DayStore, cursor: CalendarCursor) -> Self {
        Self {
            store,
            cursor,
            editor: DayEditor::default(),
        }
    }

    pub fn view(&self) -> JournalView {
        let cells = render_grid(self.cursor, &self.store, self.editor.selected_date_key());
        let stats = discipline_stats(&self.store);
        let advice = advice(
            stats.total,
            stats.percent,
            stats.best_green_streak,
            stats.best_red_streak,
        );

        JournalView {
            month_label: self.cursor.label(),
            cursor: self.cursor.view(),
            cells: cells.iter().map(|cell| cell.view()).collect(),
            chart: build_chart(&self.store),
            discipline: discipline_view(stats),
            advice: advice.message().to_string(),
            editor: self.editor.view(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub journal: Arc<Mutex<Journal>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, journal: Journal) -> Self {
        Self {
            data_path,
            journal: Arc::new(Mutex::new(journal)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeVariant;

    #[test]
    fn view_combines_calendar_chart_and_stats() {
        let mut store = DayStore::new();
        for day in 1..=5 {
            store
                .upsert(format!("2024-03-{day:02}"), OutcomeVariant::Positive, 10.0)
                .unwrap();
        }
        let mut journal = Journal::new(store, CalendarCursor::new(2024, 2));
        journal.editor.open("2024-03-02", &journal.store);

        let view = journal.view();
        assert_eq!(view.month_label, "March 2024");
        assert_eq!(view.cells.len(), 42);
        assert_eq!(view.cells[5].class, "day-btn pos selected");
        assert_eq!(view.discipline.percent_label, "100%");
        assert_eq!(view.discipline.best_green_streak, 5);
        assert!(view.advice.starts_with("Strong consistency."));
        assert!(view.editor.open);
        assert_eq!(view.editor.variant, "pos");
        assert!(view.chart.result_path.starts_with("M "));
    }
}
