//! folio Lead Intake
//!
//! Accepts contact-form submissions over HTTP, validates them and relays a
//! notification to the site owner over SMTP.
//!
//! # Modules
//!
//! - [`submission`] - Form validation and email composition
//! - [`mailer`] - Delivery seam and the SMTP implementation
//! - [`server`] - The axum endpoint

pub mod mailer;
pub mod server;
pub mod submission;

pub use mailer::{MailError, Mailer, SmtpMailer};
pub use server::{LEAD_PATH, LeadResponse, LeadState, ServerError, router, serve};
pub use submission::{LeadEmail, LeadForm, LeadSubmission};
