pub mod api;
pub mod assets;
pub mod csv_export;
pub mod html_table;
pub mod models;
pub mod normalizer;
pub mod pipeline;
