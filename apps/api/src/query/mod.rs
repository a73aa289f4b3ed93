//! Query layer: request parameter parsing plus the in-memory
//! filter/sort/paginate engine that the list endpoints run over the raw
//! record set.

pub mod engine;
pub mod params;

pub use engine::{list_page, PaginatedResult, Scope};
pub use params::{ListQuery, QueryParameters, SortKey};
