//! Task properties missing from the generated `TasksPostRequestBodyData`.
//!
//! The upstream OpenAPI description leaves most writable task properties out
//! of the create-task schema. Each accessor here is a typed view onto one key
//! of [`TasksPostRequestBodyData::additional_data`]; no extra state is stored.
//!
//! | Accessor | Key | Type |
//! |----------|-----|------|
//! | `name` | `name` | text |
//! | `notes` | `notes` | text |
//! | `html_notes` | `html_notes` | text |
//! | `due_on` | `due_on` | text (`YYYY-MM-DD`) |
//! | `due_at` | `due_at` | text (RFC 3339) |
//! | `start_on` | `start_on` | text (`YYYY-MM-DD`) |
//! | `start_at` | `start_at` | text (RFC 3339) |
//! | `completed` | `completed` | boolean |
//! | `liked` | `liked` | boolean |
//! | `external_id` | `external` → `id` | text |
//!
//! A value stored under a key with the wrong JSON type reads as `None`.

use asana_abstractions::additional_data::{
    get_bool, get_nested_str, get_str, set_bool, set_nested_str, set_str,
};
use asana_abstractions::AdditionalDataHolder;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::generated::TasksPostRequestBodyData;

const EXTERNAL: &str = "external";
const EXTERNAL_ID: &str = "id";
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Macros generating getter / setter / builder triples.
// ---------------------------------------------------------------------------
macro_rules! text_field {
    (
        $(#[$attr:meta])*
        $getter:ident, $setter:ident, $with:ident => $key:literal
    ) => {
        $(#[$attr])*
        pub fn $getter(&self) -> Option<&str> {
            get_str(self.additional_data(), $key)
        }

        #[doc = concat!("Sets `", $key, "`, or removes it for `None`.")]
        pub fn $setter(&mut self, value: Option<String>) {
            set_str(self.additional_data_mut(), $key, value);
        }

        #[doc = concat!("Builder form of [`Self::", stringify!($setter), "`].")]
        #[must_use]
        pub fn $with(mut self, value: impl Into<String>) -> Self {
            self.$setter(Some(value.into()));
            self
        }
    };
}

macro_rules! bool_field {
    (
        $(#[$attr:meta])*
        $getter:ident, $setter:ident, $with:ident => $key:literal
    ) => {
        $(#[$attr])*
        pub fn $getter(&self) -> Option<bool> {
            get_bool(self.additional_data(), $key)
        }

        #[doc = concat!("Sets `", $key, "`, or removes it for `None`.")]
        pub fn $setter(&mut self, value: Option<bool>) {
            set_bool(self.additional_data_mut(), $key, value);
        }

        #[doc = concat!("Builder form of [`Self::", stringify!($setter), "`].")]
        #[must_use]
        pub fn $with(mut self, value: bool) -> Self {
            self.$setter(Some(value));
            self
        }
    };
}

impl TasksPostRequestBodyData {
    text_field! {
        /// Name of the task: usually a short sentence fragment that fits on
        /// one line in the UI, though it can be longer.
        name, set_name, with_name => "name"
    }

    text_field! {
        /// Free-form description of the task, as plain text.
        notes, set_notes, with_notes => "notes"
    }

    text_field! {
        /// Description of the task formatted as Asana rich-text HTML.
        html_notes, set_html_notes, with_html_notes => "html_notes"
    }

    text_field! {
        /// Date the task is due (`YYYY-MM-DD`). Mutually exclusive with `due_at`
        /// on the service side.
        due_on, set_due_on, with_due_on => "due_on"
    }

    text_field! {
        /// Date and time the task is due (RFC 3339, e.g. `2026-12-31T23:59:59Z`).
        due_at, set_due_at, with_due_at => "due_at"
    }

    text_field! {
        /// Date work on the task starts (`YYYY-MM-DD`).
        start_on, set_start_on, with_start_on => "start_on"
    }

    text_field! {
        /// Date and time work on the task starts (RFC 3339).
        start_at, set_start_at, with_start_at => "start_at"
    }

    bool_field! {
        /// Whether the task is marked complete.
        completed, set_completed, with_completed => "completed"
    }

    bool_field! {
        /// Whether the authorised user likes the task.
        liked, set_liked, with_liked => "liked"
    }

    /// Identifier of this task in an external system, stored as
    /// `{"external": {"id": ...}}`.
    pub fn external_id(&self) -> Option<&str> {
        get_nested_str(self.additional_data(), EXTERNAL, EXTERNAL_ID)
    }

    /// Sets `external.id`, or removes it for `None`.
    ///
    /// Other keys under `external` are preserved; `external` itself is removed
    /// once `id` was its last key.
    pub fn set_external_id(&mut self, value: Option<String>) {
        set_nested_str(self.additional_data_mut(), EXTERNAL, EXTERNAL_ID, value);
    }

    /// Builder form of [`Self::set_external_id`].
    #[must_use]
    pub fn with_external_id(mut self, value: impl Into<String>) -> Self {
        self.set_external_id(Some(value.into()));
        self
    }

    // -----------------------------------------------------------------------
    // Calendar views over the text fields
    // -----------------------------------------------------------------------

    /// [`Self::due_on`] parsed as a date; `None` if absent or malformed.
    pub fn due_on_date(&self) -> Option<NaiveDate> {
        self.due_on().and_then(parse_date)
    }

    /// Sets [`Self::due_on`] from a date.
    pub fn set_due_on_date(&mut self, value: Option<NaiveDate>) {
        self.set_due_on(value.map(format_date));
    }

    /// [`Self::start_on`] parsed as a date; `None` if absent or malformed.
    pub fn start_on_date(&self) -> Option<NaiveDate> {
        self.start_on().and_then(parse_date)
    }

    /// Sets [`Self::start_on`] from a date.
    pub fn set_start_on_date(&mut self, value: Option<NaiveDate>) {
        self.set_start_on(value.map(format_date));
    }

    /// [`Self::due_at`] parsed as a UTC timestamp; `None` if absent or malformed.
    pub fn due_at_time(&self) -> Option<DateTime<Utc>> {
        self.due_at().and_then(parse_time)
    }

    /// Sets [`Self::due_at`] from a UTC timestamp.
    pub fn set_due_at_time(&mut self, value: Option<DateTime<Utc>>) {
        self.set_due_at(value.map(format_time));
    }

    /// [`Self::start_at`] parsed as a UTC timestamp; `None` if absent or malformed.
    pub fn start_at_time(&self) -> Option<DateTime<Utc>> {
        self.start_at().and_then(parse_time)
    }

    /// Sets [`Self::start_at`] from a UTC timestamp.
    pub fn set_start_at_time(&mut self, value: Option<DateTime<Utc>>) {
        self.set_start_at(value.map(format_time));
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
