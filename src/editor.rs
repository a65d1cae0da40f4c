use crate::models::{parse_number, DismissReason, EditorView, OutcomeVariant};
use crate::store::DayStore;
use std::fmt;

/// Why a save was refused. Both checks always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub missing_variant: bool,
    pub invalid_deposit: bool,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match (self.missing_variant, self.invalid_deposit) {
            (true, true) => "Choose day type and enter deposit amount.",
            (true, false) => "Choose day type.",
            _ => "Enter deposit amount.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorForm {
    pub variant: String,
    pub deposit: String,
}

/// Modal dialog editing one date. Field values are kept raw, as typed.
#[derive(Debug, Clone, Default)]
pub struct DayEditor {
    open: bool,
    date_key: Option<String>,
    form: EditorForm,
    error: Option<ValidationError>,
    variant_error: bool,
    deposit_error: bool,
}

impl DayEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The date last opened. Stays set after close so the calendar can mark it.
    pub fn selected_date_key(&self) -> Option<&str> {
        self.date_key.as_deref()
    }

    pub fn form(&self) -> &EditorForm {
        &self.form
    }

    pub fn open(&mut self, date_key: impl Into<String>, store: &DayStore) {
        let date_key = date_key.into();
        self.form = match store.get(&date_key) {
            Some(entry) => EditorForm {
                variant: entry.variant.as_str().to_string(),
                deposit: entry.deposit.to_string(),
            },
            None => EditorForm::default(),
        };
        self.date_key = Some(date_key);
        self.clear_errors();
        self.open = true;
    }

    pub fn set_variant(&mut self, value: impl Into<String>) {
        self.form.variant = value.into();
        self.variant_error = false;
        self.error = None;
    }

    pub fn set_deposit(&mut self, value: impl Into<String>) {
        self.form.deposit = value.into();
        self.deposit_error = false;
        self.error = None;
    }

    pub fn validate(form: &EditorForm) -> Result<(OutcomeVariant, f64), ValidationError> {
        let variant = OutcomeVariant::parse(form.variant.trim());
        let deposit = parse_deposit(&form.deposit);

        match (variant, deposit) {
            (Some(variant), Some(deposit)) => Ok((variant, deposit)),
            (variant, deposit) => Err(ValidationError {
                missing_variant: variant.is_none(),
                invalid_deposit: deposit.is_none(),
            }),
        }
    }

    /// Validates the current form and writes it to `store`.
    ///
    /// Returns the saved date key. On failure the dialog stays open with the
    /// offending fields marked. Saving with the dialog closed is a no-op.
    pub fn save(&mut self, store: &mut DayStore) -> Result<Option<String>, ValidationError> {
        let Some(date_key) = self.date_key.clone().filter(|_| self.open) else {
            return Ok(None);
        };

        let (variant, deposit) = match Self::validate(&self.form) {
            Ok(valid) => valid,
            Err(err) => {
                self.variant_error = err.missing_variant;
                self.deposit_error = err.invalid_deposit;
                self.error = Some(err);
                return Err(err);
            }
        };

        // validate() only yields finite, non-negative deposits
        if store.upsert(date_key.clone(), variant, deposit).is_err() {
            let err = ValidationError {
                missing_variant: false,
                invalid_deposit: true,
            };
            self.deposit_error = true;
            self.error = Some(err);
            return Err(err);
        }

        self.clear_errors();
        self.open = false;
        Ok(Some(date_key))
    }

    /// Closes without saving. Escape only applies while the dialog is open.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        if !self.open {
            return false;
        }
        tracing::debug!(?reason, "day editor dismissed");
        self.open = false;
        true
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            open: self.open,
            date_key: self.date_key.clone(),
            variant: self.form.variant.clone(),
            deposit: self.form.deposit.clone(),
            variant_error: self.variant_error,
            deposit_error: self.deposit_error,
            message: self
                .error
                .map(|err| err.message().to_string())
                .unwrap_or_default(),
        }
    }

    fn clear_errors(&mut self) {
        self.error = None;
        self.variant_error = false;
        self.deposit_error = false;
    }
}

fn parse_deposit(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_number(raw).filter(|deposit| deposit.is_finite() && *deposit >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(variant: &str, deposit: &str) -> EditorForm {
        EditorForm {
            variant: variant.to_string(),
            deposit: deposit.to_string(),
        }
    }

    #[test]
    fn validation_reports_each_field() {
        assert_eq!(
            DayEditor::validate(&form("pos", " 25.5 ")),
            Ok((OutcomeVariant::Positive, 25.5))
        );
        assert_eq!(DayEditor::validate(&form("neg", "0")), Ok((OutcomeVariant::Negative, 0.0)));

        let both = DayEditor::validate(&form("", "")).unwrap_err();
        assert_eq!(both.message(), "Choose day type and enter deposit amount.");

        let variant = DayEditor::validate(&form("maybe", "10")).unwrap_err();
        assert_eq!(variant.message(), "Choose day type.");

        assert_eq!(
            DayEditor::validate(&form("neg", "0x1A")),
            Ok((OutcomeVariant::Negative, 26.0))
        );

        for bad in ["  ", "-1", "abc", "inf", "NaN", "Infinity", "1e400"] {
            let deposit = DayEditor::validate(&form("pos-outline", bad)).unwrap_err();
            assert!(!deposit.missing_variant);
            assert!(deposit.invalid_deposit);
            assert_eq!(deposit.message(), "Enter deposit amount.");
        }
    }

    #[test]
    fn open_prefills_from_existing_entry() {
        let mut store = DayStore::new();
        store.upsert("2024-03-05", OutcomeVariant::PositiveOutline, 40.0).unwrap();

        let mut editor = DayEditor::default();
        editor.open("2024-03-05", &store);
        assert!(editor.is_open());
        assert_eq!(editor.form(), &form("pos-outline", "40"));

        editor.open("2024-03-06", &store);
        assert_eq!(editor.form(), &EditorForm::default());
        assert_eq!(editor.selected_date_key(), Some("2024-03-06"));
    }

    #[test]
    fn failed_save_marks_fields_and_editing_clears_them() {
        let mut store = DayStore::new();
        let mut editor = DayEditor::default();
        editor.open("2024-03-05", &store);

        assert!(editor.save(&mut store).is_err());
        let view = editor.view();
        assert!(view.open);
        assert!(view.variant_error && view.deposit_error);
        assert_eq!(view.message, "Choose day type and enter deposit amount.");
        assert!(store.is_empty());

        editor.set_variant("neg");
        let view = editor.view();
        assert!(!view.variant_error);
        assert!(view.deposit_error);
        assert!(view.message.is_empty());

        // reopening clears any leftover marker
        editor.open("2024-03-05", &store);
        assert!(!editor.view().deposit_error);
    }

    #[test]
    fn successful_save_upserts_and_closes() {
        let mut store = DayStore::new();
        let mut editor = DayEditor::default();
        editor.open("2024-03-05", &store);
        editor.set_variant("neg");
        editor.set_deposit("15");

        assert_eq!(editor.save(&mut store), Ok(Some("2024-03-05".to_string())));
        assert!(!editor.is_open());
        let entry = store.get("2024-03-05").unwrap();
        assert_eq!(entry.result, -1);
        assert_eq!(entry.deposit, 15.0);
        assert_eq!(editor.selected_date_key(), Some("2024-03-05"));
    }

    #[test]
    fn dismiss_discards_edits() {
        let mut store = DayStore::new();
        let mut editor = DayEditor::default();
        editor.open("2024-03-05", &store);
        editor.set_variant("pos");
        editor.set_deposit("3");

        assert!(editor.dismiss(DismissReason::Backdrop));
        assert!(!editor.dismiss(DismissReason::Escape));
        assert_eq!(editor.save(&mut store), Ok(None));
        assert!(store.is_empty());
    }
}
