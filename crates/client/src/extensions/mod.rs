//! Hand-written additions to generated types.
//!
//! Each file adds inherent methods to one generated type. Generated files are
//! never edited, so regenerating the API surface leaves these intact.

mod tasks_post_request_body_data;
