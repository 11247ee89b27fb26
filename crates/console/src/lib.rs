//! Data layer of the quality-management console.
//!
//! Each screen of the console is backed by a [`view::ListView`] configured
//! through a [`view::ViewSpec`]. Views talk to the backend through
//! [`qms_client::ManagementApi`] and report outcomes as [`notice::Notice`]s.
//! Report views can also be exported to `.xlsx` workbooks via [`export`].

pub mod config;
pub mod context;
pub mod dashboard;
pub mod export;
pub mod login;
pub mod notice;
pub mod pallet;
pub mod relations;
pub mod view;
pub mod views;
