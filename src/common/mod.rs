pub mod db_errors;
pub mod handlebars;

pub use self::handlebars::get_handlebars;
