//! Data layer for a music streaming front end backed by the YouTube Data API.
//!
//! - [`catalog`] talks to the catalog API and decodes its resources
//! - [`pages`] loads the data behind each page, in parallel where a page needs more
//!   than one query
//! - [`playback`] holds the one piece of shared client state: what is selected and
//!   whether it is playing
//! - [`config`] says where the API lives and which key to use

pub mod catalog;
pub mod config;
pub mod pages;
pub mod playback;
