pub mod agent;
pub mod assets;
pub mod car;
pub mod collision;
pub mod config;
pub mod draw;
pub mod mask;
pub mod sensors;
pub mod session;
pub mod track;
