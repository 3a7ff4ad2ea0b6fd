pub mod date_range;
pub mod gdu_table;
pub mod selector;
pub mod site;
