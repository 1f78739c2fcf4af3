// ABOUTME: Subcommand implementations for the pacta binary
// ABOUTME: Agent servers, the interactive chat client, and environment checks

pub mod chat;
pub mod doctor;
pub mod serve;
