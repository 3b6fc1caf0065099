//! Decoders for the on-disk opacity formats.
//!
//! Every function here works on in-memory bytes or text and never touches
//! the filesystem, so the loaders in `opacity-table` own all I/O and error
//! context. Multi-byte values are little-endian.
//!
//! - [`raw`]: flat sequences of `f64` (`wlen.dat`, line-by-line samples)
//! - [`record`]: record-framed streams of one `f64` per record (k-table samples)
//! - [`kappa_info`]: the `kappa_g_info.dat` text header
//! - [`filename`]: the `sigma_<label>_<T>K_<P>bar.<ext>` naming grammar

pub mod error;
pub mod filename;
pub mod kappa_info;
pub mod raw;
pub mod record;

pub use error::{ParseError, ParseResult};
pub use filename::SampleFilename;
pub use kappa_info::{parse_kappa_g_info, KappaGInfo};
pub use raw::{decode_f64_array, encode_f64_array};
pub use record::{decode_g_point_rows, decode_record_stream, encode_record_stream, GPointRows};
