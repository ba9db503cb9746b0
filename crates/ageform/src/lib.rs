//! `ageform` - Personal details form with exact age calculation
//!
//! This library holds the form state, the exact-age calendar arithmetic, the
//! in-memory record store and its CSV export, and the session that ties them
//! together behind an event-driven interface.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod age;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod render;
pub mod session;
pub mod store;

pub use age::{calculate_exact_age, ExactAge};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use form::{default_state, FieldChange, FormState, MaritalStatus, Sex, Warning};
pub use logging::init_logging;
pub use record::Record;
pub use session::{Event, Session, View};
pub use store::{CsvDownload, RecordStore};
