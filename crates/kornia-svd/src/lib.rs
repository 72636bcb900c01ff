#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

pub mod bidiag;
pub mod config;
pub mod error;
pub mod givens;
pub mod glam_ext;
pub mod matrix;
pub mod polar;
pub mod qr;
pub mod scalar;
pub mod svd2;
pub mod svd3;

mod types;

pub use config::SvdConfig;
pub use error::SvdError;
pub use givens::GivensRotation;
pub use glam_ext::{GlamPolar, GlamSvd, SvdExt};
pub use polar::{polar3, polar3_with_config};
pub use qr::givens_qr;
pub use scalar::Real;
pub use svd2::{polar2, polar2_full, svd2, svd2_full, Svd2};
pub use svd3::{svd3, svd3_with_config};
pub use types::{PolarSet, Svd2Set, Svd3Set, SvdSet};
