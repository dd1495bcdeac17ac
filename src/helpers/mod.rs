pub mod constants;
pub mod dates;
pub mod duration;
pub mod html;

pub use dates::{format_published_at, header_date};
pub use duration::convert_duration_to_time_string;
pub use html::html_to_text;
