pub mod parse;
pub mod path;
