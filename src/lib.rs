pub mod bits;
pub mod hamming;
pub mod plane;
pub mod plane_file;
pub mod codec;
pub mod pipeline;
pub mod config;
pub mod error;
pub mod logging;

pub use bits::{BitVector, bits_of, byte_of};
pub use hamming::{Codeword, HammingQuad, ParityMode, parity_of, correct};
pub use plane::{PackedPlanes, PlaneBits, pack, unpack};
pub use plane_file::PlaneFileSet;
pub use codec::DecodeReport;
pub use error::{HammingError, Result};
