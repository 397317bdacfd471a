pub mod commands;
pub mod config;
pub mod reporters;
pub mod store;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}
