//! Backend type aliases.
//!
//! Training needs gradients, so the default backend wraps NdArray in
//! Autodiff. Everything in this crate is generic over the backend; these
//! aliases are just the CPU defaults callers reach for.

use burn::backend::{Autodiff, NdArray};

/// CPU training backend (NdArray with autodiff).
pub type CpuBackend = Autodiff<NdArray>;

/// CPU inference backend (no gradient tape), e.g. for sampling.
pub type CpuInnerBackend = NdArray;
