//! Import/export codecs for gridnote documents.
//!
//! Codecs work on strings; reading and writing files is the host's job,
//! like every other piece of I/O.

pub mod csv;
