//! Nothing lives here; this crate exists only to host `tests/`.
