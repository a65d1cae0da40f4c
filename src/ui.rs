use crate::models::{CellView, JournalView};

pub fn render_index(view: &JournalView) -> String {
    let editor = &view.editor;
    INDEX_HTML
        .replace("{{MONTH_LABEL}}", &escape(&view.month_label))
        .replace("{{GRID}}", &render_cells(&view.cells))
        .replace("{{RESULT_PATH}}", &view.chart.result_path)
        .replace("{{DEPOSIT_PATH}}", &view.chart.deposit_path)
        .replace("{{SCORE}}", &view.discipline.percent_label)
        .replace("{{GREEN_STREAK}}", &view.discipline.best_green_streak.to_string())
        .replace("{{RED_STREAK}}", &view.discipline.best_red_streak.to_string())
        .replace("{{ADVICE}}", &escape(&view.advice))
        .replace("{{MODAL_CLASS}}", if editor.open { "modal open" } else { "modal" })
        .replace("{{MODAL_HIDDEN}}", if editor.open { "false" } else { "true" })
        .replace("{{MODAL_DATE}}", &escape(editor.date_key.as_deref().unwrap_or("")))
        .replace("{{MODAL_DEPOSIT}}", &escape(&editor.deposit))
        .replace("{{MODAL_ERROR}}", &escape(&editor.message))
}

fn render_cells(cells: &[CellView]) -> String {
    cells
        .iter()
        .map(|cell| match (&cell.date_key, cell.day) {
            (Some(date_key), Some(day)) => format!(
                r#"<button type="button" class="{}" data-date="{}">{day}</button>"#,
                cell.class, date_key
            ),
            _ => format!(r#"<button type="button" class="{}" disabled></button>"#, cell.class),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Trading Journal</title>
  <style>
    :root {
      --bg: #0f1117;
      --card: #171a23;
      --ink: #e8e9ee;
      --muted: #8a8fa3;
      --pos: #2fbf71;
      --neg: #e5484d;
      --result: #f5c542;
      --deposit: #4aa8ff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .tracker {
      width: min(980px, 100%);
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .calendar-head {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .calendar-head form {
      margin: 0;
    }

    .nav-btn {
      background: transparent;
      border: 1px solid rgba(255, 255, 255, 0.15);
      color: var(--ink);
      border-radius: 999px;
      width: 36px;
      height: 36px;
      cursor: pointer;
    }

    .weekdays,
    #calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekdays span {
      text-align: center;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .day-btn {
      aspect-ratio: 1;
      border-radius: 10px;
      border: 1px solid rgba(255, 255, 255, 0.08);
      background: rgba(255, 255, 255, 0.04);
      color: var(--ink);
      cursor: pointer;
    }

    .day-btn.empty {
      visibility: hidden;
      cursor: default;
    }

    .day-btn.pos {
      background: var(--pos);
      color: #08140d;
    }

    .day-btn.pos-outline {
      border: 2px solid var(--pos);
    }

    .day-btn.neg {
      background: var(--neg);
    }

    .day-btn.selected {
      outline: 2px solid var(--result);
      outline-offset: 2px;
    }

    #chart {
      width: 100%;
      height: 260px;
    }

    .curve {
      fill: none;
      stroke-width: 3;
    }

    .curve.glow {
      stroke-width: 9;
      opacity: 0.25;
    }

    #result-path,
    #result-path-glow {
      stroke: var(--result);
    }

    #deposit-path,
    #deposit-path-glow {
      stroke: var(--deposit);
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .metric span {
      display: block;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .metric strong {
      font-size: 1.5rem;
    }

    #ai-advice-text {
      margin: 0;
      color: var(--muted);
    }

    .modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.6);
      display: none;
      place-items: center;
    }

    .modal.open {
      display: grid;
    }

    .modal-body {
      background: var(--card);
      border-radius: 18px;
      padding: 24px;
      width: min(360px, 92vw);
      display: grid;
      gap: 14px;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .field.error select,
    .field.error input {
      border-color: var(--neg);
    }

    .field select,
    .field input {
      padding: 10px;
      border-radius: 10px;
      border: 1px solid rgba(255, 255, 255, 0.15);
      background: var(--bg);
      color: var(--ink);
    }

    #modal-error {
      min-height: 1.2em;
      color: var(--neg);
      margin: 0;
    }

    .modal-actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
    }
  </style>
</head>
<body>
  <main class="tracker">
    <section class="card">
      <div class="calendar-head">
        <form method="post" action="/calendar/prev">
          <button class="nav-btn" id="month-prev" type="submit" aria-label="Previous month">&lsaquo;</button>
        </form>
        <strong id="month-label">{{MONTH_LABEL}}</strong>
        <form method="post" action="/calendar/next">
          <button class="nav-btn" id="month-next" type="submit" aria-label="Next month">&rsaquo;</button>
        </form>
      </div>
      <div class="weekdays">
        <span>Mon</span><span>Tue</span><span>Wed</span><span>Thu</span><span>Fri</span><span>Sat</span><span>Sun</span>
      </div>
      <div id="calendar-grid">
{{GRID}}
      </div>
    </section>

    <section class="card">
      <svg id="chart" viewBox="0 0 520 260" role="img" aria-label="Cumulative result and deposit">
        <path id="result-path-glow" class="curve glow" d="{{RESULT_PATH}}" />
        <path id="deposit-path-glow" class="curve glow" d="{{DEPOSIT_PATH}}" />
        <path id="result-path" class="curve" d="{{RESULT_PATH}}" />
        <path id="deposit-path" class="curve" d="{{DEPOSIT_PATH}}" />
      </svg>
      <div class="metrics">
        <div class="metric" id="discipline-score"><span>Discipline</span><strong>{{SCORE}}</strong></div>
        <div class="metric" id="best-green-streak"><span>Best green streak</span><strong>{{GREEN_STREAK}}</strong></div>
        <div class="metric" id="best-red-streak"><span>Best red streak</span><strong>{{RED_STREAK}}</strong></div>
      </div>
      <p id="ai-advice-text">{{ADVICE}}</p>
    </section>
  </main>

  <div class="{{MODAL_CLASS}}" id="day-modal" aria-hidden="{{MODAL_HIDDEN}}">
    <div class="modal-body" role="dialog" aria-modal="true">
      <strong id="modal-date">{{MODAL_DATE}}</strong>
      <label class="field" id="field-result">
        <span>Day type</span>
        <select id="modal-result">
          <option value="">Choose...</option>
          <option value="pos">Green</option>
          <option value="pos-outline">Green (outline)</option>
          <option value="neg">Red</option>
        </select>
      </label>
      <label class="field" id="field-deposit">
        <span>Deposit</span>
        <input id="modal-deposit" type="text" inputmode="decimal" value="{{MODAL_DEPOSIT}}" />
      </label>
      <p id="modal-error">{{MODAL_ERROR}}</p>
      <div class="modal-actions">
        <button type="button" class="nav-btn" id="modal-cancel" style="width:auto;padding:0 16px">Cancel</button>
        <button type="button" class="nav-btn" id="modal-save" style="width:auto;padding:0 16px">Save</button>
      </div>
    </div>
  </div>

  <script>
    const monthLabel = document.getElementById('month-label');
    const grid = document.getElementById('calendar-grid');
    const modal = document.getElementById('day-modal');
    const modalDate = document.getElementById('modal-date');
    const modalResult = document.getElementById('modal-result');
    const modalDeposit = document.getElementById('modal-deposit');
    const modalError = document.getElementById('modal-error');
    const fieldResult = document.getElementById('field-result');
    const fieldDeposit = document.getElementById('field-deposit');

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });
      if (!res.ok && res.status !== 422) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const setPath = (id, d) => document.getElementById(id).setAttribute('d', d);
    const setMetric = (id, text) => {
      document.querySelector(`#${id} strong`).textContent = text;
    };

    const render = (view) => {
      monthLabel.textContent = view.month_label;
      grid.innerHTML = '';
      view.cells.forEach((cell) => {
        const btn = document.createElement('button');
        btn.type = 'button';
        btn.className = cell.class;
        if (cell.date_key) {
          btn.textContent = String(cell.day);
          btn.dataset.date = cell.date_key;
        } else {
          btn.disabled = true;
        }
        grid.appendChild(btn);
      });

      setPath('result-path', view.chart.result_path);
      setPath('result-path-glow', view.chart.result_glow_path);
      setPath('deposit-path', view.chart.deposit_path);
      setPath('deposit-path-glow', view.chart.deposit_glow_path);
      setMetric('discipline-score', view.discipline.percent_label);
      setMetric('best-green-streak', String(view.discipline.best_green_streak));
      setMetric('best-red-streak', String(view.discipline.best_red_streak));
      document.getElementById('ai-advice-text').textContent = view.advice;

      const editor = view.editor;
      modal.classList.toggle('open', editor.open);
      modal.setAttribute('aria-hidden', String(!editor.open));
      modalDate.textContent = editor.date_key || '';
      modalResult.value = editor.variant;
      modalDeposit.value = editor.deposit;
      modalError.textContent = editor.message;
      fieldResult.classList.toggle('error', editor.variant_error);
      fieldDeposit.classList.toggle('error', editor.deposit_error);
    };

    const run = (promise) => promise.then(render).catch((err) => {
      modalError.textContent = err.message;
    });

    grid.addEventListener('click', (event) => {
      const date = event.target.dataset && event.target.dataset.date;
      if (date) {
        run(post('/api/editor/open', { date_key: date }));
      }
    });

    document.getElementById('month-prev').addEventListener('click', (event) => {
      event.preventDefault();
      run(post('/api/calendar/prev'));
    });

    document.getElementById('month-next').addEventListener('click', (event) => {
      event.preventDefault();
      run(post('/api/calendar/next'));
    });

    document.getElementById('modal-save').addEventListener('click', () => {
      run(
        post('/api/editor/save', {
          variant: modalResult.value,
          deposit: String(modalDeposit.value ?? '')
        }).then((body) => body.view || body)
      );
    });

    const dismiss = (reason) => run(post('/api/editor/dismiss', { reason }));

    document.getElementById('modal-cancel').addEventListener('click', () => dismiss('cancel'));
    modal.addEventListener('click', (event) => {
      if (event.target === modal) {
        dismiss('backdrop');
      }
    });
    document.addEventListener('keydown', (event) => {
      if (event.key === 'Escape' && modal.classList.contains('open')) {
        dismiss('escape');
      }
    });

    // Field edits refresh the markers only; typed text is left as is.
    const showMarkers = (view) => {
      modalError.textContent = view.editor.message;
      fieldResult.classList.toggle('error', view.editor.variant_error);
      fieldDeposit.classList.toggle('error', view.editor.deposit_error);
    };
    const editField = (body) => post('/api/editor/field', body).then(showMarkers).catch((err) => {
      modalError.textContent = err.message;
    });

    modalResult.addEventListener('change', () => editField({ variant: modalResult.value }));
    modalDeposit.addEventListener('input', () => editField({ deposit: modalDeposit.value }));

    fetch('/api/view').then((res) => res.json()).then(render);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarCursor;
    use crate::state::Journal;
    use crate::store::DayStore;

    #[test]
    fn page_contains_grid_and_stats() {
        let journal = Journal::new(DayStore::new(), CalendarCursor::new(2024, 2));
        let html = render_index(&journal.view());

        assert!(html.contains(r#"<strong id="month-label">March 2024</strong>"#));
        assert!(html.contains(r#"data-date="2024-03-31">31</button>"#));
        assert_eq!(html.matches("day-btn empty").count(), 11);
        assert!(html.contains("<strong>0%</strong>"));
        assert!(html.contains("Track at least 5 days"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn user_text_is_escaped() {
        assert_eq!(escape(r#"<b>"1&2"</b>"#), "&lt;b&gt;&quot;1&amp;2&quot;&lt;/b&gt;");
        assert_eq!(escape("{{ADVICE}}"), "&#123;&#123;ADVICE&#125;&#125;");
    }

    #[test]
    fn typed_placeholder_is_not_expanded() {
        let mut store = DayStore::new();
        let mut journal = Journal::new(DayStore::new(), CalendarCursor::new(2024, 2));
        journal.editor.open("2024-03-05", &store);
        journal.editor.set_deposit("{{MODAL_ERROR}}");
        assert!(journal.editor.save(&mut store).is_err());

        let html = render_index(&journal.view());
        assert!(html.contains(r#"value="&#123;&#123;MODAL_ERROR&#125;&#125;""#));
        assert!(html.contains(r#"<p id="modal-error">Choose day type and enter deposit amount.</p>"#));
    }

    #[test]
    fn each_field_edit_posts_only_that_field() {
        assert!(INDEX_HTML.contains("editField({ variant: modalResult.value })"));
        assert!(INDEX_HTML.contains("editField({ deposit: modalDeposit.value })"));
    }
}
