// ABOUTME: Records layer for multi-user scientific projects
// ABOUTME: Users, sessions, projects, audit logs, parameters and equipment taxonomies over sea-orm

pub mod access;
pub mod client;
pub mod config;
pub mod connector;
pub mod crypto;
pub mod entities;
pub mod error;
pub mod hierarchy;
pub mod managers;
pub mod migration;
pub mod seed;

#[cfg(test)]
mod integration_tests;

pub use access::{Access, RoleName};
pub use client::{Client, InstallOptions, Installer};
pub use config::{Backend, ConnectionConfig};
pub use connector::{Connector, Context, Record, Slot};
pub use error::{Error, Result};
pub use hierarchy::TreeNode;
pub use managers::{NewEquipment, NewParameter, NewUser, ParameterValue};
