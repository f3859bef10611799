pub mod go_profile;
pub mod model;
pub mod print;
pub mod table;
pub mod tree;
