//! Catalogue Reference Finder
//!
//! Loads one PDF reference catalogue into memory, indexes every line of its
//! text by page, and answers reference lookups with the page number and a
//! PNG rendering of that page. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `catalogue`: Index build, lookup policy and the swappable snapshot
//! - `document`: Backend-agnostic extraction/rasterization traits
//! - `formats`: MuPDF-backed PDF implementation of those traits
//! - `routes`: HTTP endpoints

pub mod catalogue;
pub mod config;
pub mod document;
pub mod formats;
pub mod mupdf;
pub mod routes;
pub mod state;
