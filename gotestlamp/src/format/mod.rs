pub mod ansi;
pub mod colors;
pub mod console;
pub mod go_test_json;
pub mod terminal;
