pub mod classify;
pub mod head_table;
