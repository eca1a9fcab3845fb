//! langsearch - relevance-ranked search over a small catalog of records.
//!
//! A catalog is a JSON array of flat objects (for example programming
//! languages with their name, type and designers). A query keeps the records
//! that contain every plain term and none of the `-`-prefixed terms, then
//! orders them so that exact hits in the earliest fields come first.
//!
//! # Quick start
//!
//! ```
//! use langsearch::{Catalog, Record};
//!
//! let catalog = Catalog::from_records(vec![
//!     Record::from_iter([("Name", "JavaScript"), ("Designed by", "Brendan Eich")]),
//!     Record::from_iter([("Name", "Java"), ("Designed by", "James Gosling")]),
//!     Record::from_iter([("Name", "Ruby"), ("Designed by", "Yukihiro Matsumoto")]),
//! ]);
//!
//! let results = catalog.search(Some("java -ruby"));
//! let names: Vec<_> = results.iter().filter_map(|r| r.get("Name")).collect();
//! assert_eq!(names, ["Java", "JavaScript"]);
//! ```

pub mod catalog;
pub mod cli;
pub mod data_source;
pub mod error;
pub mod matcher;
pub mod mcp;
pub mod query;
pub mod ranker;
pub mod record;
pub mod search;

pub use catalog::Catalog;
pub use data_source::DataSource;
pub use error::{Error, Result};
pub use query::ParsedQuery;
pub use record::Record;
