//! UI module - small widgets shared by the views and modals

pub mod components;
