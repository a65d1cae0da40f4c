use serde::{Deserialize, Serialize};

/// How a tracked day went. `PositiveOutline` only changes the calendar styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeVariant {
    #[serde(rename = "pos")]
    Positive,
    #[serde(rename = "pos-outline")]
    PositiveOutline,
    #[serde(rename = "neg")]
    Negative,
}

impl OutcomeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeVariant::Positive => "pos",
            OutcomeVariant::PositiveOutline => "pos-outline",
            OutcomeVariant::Negative => "neg",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pos" => Some(OutcomeVariant::Positive),
            "pos-outline" => Some(OutcomeVariant::PositiveOutline),
            "neg" => Some(OutcomeVariant::Negative),
            _ => None,
        }
    }

    pub fn result(self) -> i8 {
        match self {
            OutcomeVariant::Negative => -1,
            _ => 1,
        }
    }
}

/// Parses numeric text the way a browser's `Number()` does: decimal with an
/// optional sign and exponent, `Infinity`, or unsigned `0x`/`0o`/`0b` integers.
///
/// Blank text is not a number here; callers decide what it means.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let prefixed = text.get(..2).map(str::to_ascii_lowercase);
    let radix = match prefixed.as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return parse_decimal(text),
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

fn parse_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    // std also accepts "inf" and "nan", which are not numbers to a browser
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub result: i8,
    pub variant: OutcomeVariant,
    pub deposit: f64,
}

impl DayEntry {
    pub fn new(variant: OutcomeVariant, deposit: f64) -> Self {
        Self {
            result: variant.result(),
            variant,
            deposit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenDayRequest {
    pub date_key: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct FieldEditRequest {
    pub variant: Option<String>,
    pub deposit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveDayRequest {
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub deposit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissReason {
    Cancel,
    Backdrop,
    Escape,
}

#[derive(Debug, Deserialize)]
pub struct DismissRequest {
    pub reason: DismissReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorView {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellView {
    pub day: Option<u32>,
    pub date_key: Option<String>,
    pub class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartView {
    pub result_path: String,
    pub result_glow_path: String,
    pub deposit_path: String,
    pub deposit_glow_path: String,
    pub result_bounds: (f64, f64),
    pub deposit_bounds: (f64, f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplineView {
    pub percent: u32,
    pub percent_label: String,
    pub best_green_streak: u32,
    pub best_red_streak: u32,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorView {
    pub open: bool,
    pub date_key: Option<String>,
    pub variant: String,
    pub deposit: String,
    pub variant_error: bool,
    pub deposit_error: bool,
    pub message: String,
}

/// Everything the page paints, computed in one pass over the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalView {
    pub month_label: String,
    pub cursor: CursorView,
    pub cells: Vec<CellView>,
    pub chart: ChartView,
    pub discipline: DisciplineView,
    pub advice: String,
    pub editor: EditorView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDayResponse {
    pub persisted: bool,
    pub view: JournalView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_like_browser_coercion() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-1"), Some(-1.0));
        assert_eq!(parse_number("0x1A"), Some(26.0));
        assert_eq!(parse_number("0B11"), Some(3.0));
        assert_eq!(parse_number("0o7"), Some(7.0));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("1e400"), Some(f64::INFINITY));

        for bad in ["", "0x", "0x1G", "-0x1A", "inf", "NaN", "abc", "12abc"] {
            assert_eq!(parse_number(bad), None, "{bad:?}");
        }
    }
}
