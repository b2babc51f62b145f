//! UI module - reusable widgets shared by the views in `app`

pub mod components;
