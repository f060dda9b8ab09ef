pub mod meltsfile;
pub mod output;
pub mod parse;
pub mod summary;
pub mod table;
