pub mod extract;
pub mod pagination;

pub use extract::{ApiPath, ApiQuery, JsonBody};
pub use pagination::{ListQuery, Page, Pagination};
