mod clipboard;
mod commands;
mod print;
mod setup;
mod shell;

pub use commands::run;
