//! OpenAPI 3.0.x/3.1.x spec loader, validator, and extractor.
//!
//! Loads a spec from a local `.json`/`.yaml`/`.yml` file or from an HTTP(S)
//! URL, checks its top-level structure, and extracts endpoint descriptors
//! and `components.schemas`. `$ref` pointers are left untouched.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod parser;
pub mod processor;
pub mod shared;

pub use error::{ErrorKind, SpecError};
pub use fetch::{FetchedSpec, HttpFetcher, SpecFetcher, FETCH_TIMEOUT};
pub use model::{Endpoint, Info, SpecDocument};
pub use parser::{validate_document, SpecFormat};
pub use processor::SpecProcessor;
pub use shared::SharedSpecProcessor;
