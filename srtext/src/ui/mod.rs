pub mod history_table;
pub mod output_format;
