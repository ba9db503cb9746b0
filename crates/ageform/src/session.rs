//! A single user's editing session.
//!
//! A [`Session`] owns the form being edited and the records submitted so
//! far. The front-end feeds it [`Event`]s one at a time; each event mutates
//! the session and returns a [`View`] describing what to show next. There is
//! one real transition: submit snapshots the form into a record, appends it,
//! and replaces the form with fresh defaults.

use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::Result;
use crate::form::{default_state, DobBounds, FieldChange, FormLimits, FormState, Warning};
use crate::record::Record;
use crate::store::{CsvDownload, RecordStore};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A form field was edited.
    FieldChanged(FieldChange),
    /// The submit button was pressed.
    Submit,
    /// The download button was pressed.
    Download,
}

/// Everything the front-end needs to render after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Current form contents.
    pub form: FormState,
    /// Whether the kids dropdown is shown.
    pub kids_editable: bool,
    /// Date picker range.
    pub dob_bounds: DobBounds,
    /// Notice raised by the last change, if any.
    pub warning: Option<Warning>,
    /// Records in submission order.
    pub records: Vec<Record>,
    /// Whether the download button is offered.
    pub download_available: bool,
    /// File produced by a download event.
    pub download: Option<CsvDownload>,
}

/// Counters logged when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Records submitted so far.
    pub submitted: usize,
    /// Marital status warnings raised so far.
    pub warnings: usize,
}

/// Form and record store owned by one user.
#[derive(Debug)]
pub struct Session<C: Clock> {
    clock: C,
    config: Config,
    form: FormState,
    store: RecordStore,
    warnings: usize,
}

impl<C: Clock> Session<C> {
    /// Start a session with a default form and an empty store.
    #[must_use]
    pub fn new(clock: C, config: Config) -> Self {
        let form = default_state(&clock);
        info!("Session started on {}", form.dob);
        Self {
            clock,
            config,
            form,
            store: RecordStore::new(),
            warnings: 0,
        }
    }

    /// The form as currently edited.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Records submitted so far.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Session counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            submitted: self.store.len(),
            warnings: self.warnings,
        }
    }

    /// Widget limits as of today.
    #[must_use]
    pub fn limits(&self) -> FormLimits {
        self.config.form_limits(self.clock.today())
    }

    /// Handle one event and describe the resulting screen.
    ///
    /// # Errors
    ///
    /// Returns an error if a field value is outside its widget's range (the
    /// session is left unchanged) or if the CSV export fails.
    pub fn handle(&mut self, event: Event) -> Result<View> {
        let mut warning = None;
        let mut download = None;
        match event {
            Event::FieldChanged(change) => {
                let limits = self.limits();
                warning = self.form.apply(change, &limits)?;
                if warning.is_some() {
                    self.warnings += 1;
                }
            }
            Event::Submit => {
                self.submit();
            }
            Event::Download => {
                download = self.download()?;
            }
        }
        Ok(self.view(warning, download))
    }

    /// Submit the current form.
    ///
    /// Computes the exact age, appends the record, and resets every field to
    /// its default. Always succeeds.
    pub fn submit(&mut self) -> &Record {
        let today = self.clock.today();
        let record = Record::from_form(&self.form, today);
        info!(
            name = %record.name,
            age = %record.exact_age,
            "Submitted record #{}",
            self.store.len() + 1
        );
        self.store.append(record);
        self.form = default_state(&self.clock);
        debug!("Form reset to defaults");

        let records = self.store.records();
        &records[records.len() - 1]
    }

    /// The CSV download, or `None` while nothing has been submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if CSV serialization fails.
    pub fn download(&self) -> Result<Option<CsvDownload>> {
        let download = self.store.download(&self.config.export.file_name)?;
        if let Some(file) = &download {
            debug!("Prepared {} ({} bytes)", file.file_name, file.bytes.len());
        }
        Ok(download)
    }

    /// Describe the current screen without handling an event.
    #[must_use]
    pub fn current_view(&self) -> View {
        self.view(None, None)
    }

    fn view(&self, warning: Option<Warning>, download: Option<CsvDownload>) -> View {
        View {
            form: self.form.clone(),
            kids_editable: self.form.kids_editable(),
            dob_bounds: self.limits().dob,
            warning,
            records: self.store.records().to_vec(),
            download_available: !self.store.is_empty(),
            download,
        }
    }
}
