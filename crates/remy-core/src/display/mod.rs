//! Display formatting for recipes, listings and cooking sessions.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes get newtype wrappers. Everything renders as markdown so the CLI
//! renderer can style it or print it as plain text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers        │    │   Markdown      │
//! │ (Recipe, Step)  │───▶│ (StepCard, ...) │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: `RecipeSummaries` and `Transcript`
//! - [`results`]: `SaveResult` and `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp formatting
//! - [`step`]: the current-step card shown while cooking
//! - [`models`]: `Display` implementations for domain models
//!
//! ```rust
//! use remy_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Recipe imported".to_string());
//! assert_eq!(status.to_string(), "Success: Recipe imported\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod step;

pub use collections::{RecipeSummaries, Transcript};
pub use datetime::{LocalDateTime, Minutes};
pub use results::{DeleteResult, SaveResult};
pub use status::OperationStatus;
pub use step::StepCard;
