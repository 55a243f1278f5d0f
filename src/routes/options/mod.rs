mod handler;
mod model;

pub use handler::get_options;
pub use model::{LANGUAGES, LOCATIONS, OptionsResponse};
