//! Wire types shared by the BMS server and its CLI client.

pub mod date;
pub mod models;
pub mod response;

pub use date::{parse_date, DateError, DATE_FORMAT};
pub use models::{Book, Collection};
pub use response::ApiResponse;
