pub use jot_repl as repl;
pub use jot_repl::cli;
pub use jot_repl::config;
pub use jot_repl::ui;

pub use jot_core as core;
pub use jot_core::list;
pub use jot_core::model;
pub use jot_core::parser;
pub use jot_core::services;
pub use jot_core::storage;
pub use jot_core::AppConfig;
