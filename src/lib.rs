//! Client for the openFDA drug label API, plus a deduplicating in-memory
//! [`Shelf`] for the drugs it returns.
//!
//! ```no_run
//! # async fn demo() -> Result<(), openfda_drug_label::DrugLabelError> {
//! use openfda_drug_label::{DrugLabelClient, Drug, Shelf};
//!
//! let client = DrugLabelClient::new("my-api-key")?;
//! let term = client.generic_search("brand_name", "Advil", true)?;
//! let response = client.search_request(&[term], 1).await?;
//!
//! let mut shelf = Shelf::new(20)?;
//! shelf.add_drug(Drug::from_response(&response)?)?;
//! let stats = shelf.shelf_stats();
//! # let _ = stats;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod error;

pub mod entities;
pub mod render;
pub mod sources;
pub mod transform;
pub mod utils;

pub use entities::batch::{make_drugs, make_drugs_with};
pub use entities::drug::Drug;
pub use entities::shelf::{DEFAULT_SHELF_CAPACITY, Shelf, ShelfStats};
pub use error::{DrugLabelError, RequestFailure};
pub use sources::openfda::{DEFAULT_BASE_URL, DrugLabelClient, LabelResponse};
pub use transform::drug::{RiskCategory, RiskScore};
pub use utils::query::{SearchTerm, build_term};
