pub mod date_key;

pub use date_key::{format_date_key, parse_date_key, shift_date_key, DATE_KEY_FORMAT};
