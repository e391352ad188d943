//! Normalisation of EXFOR records for the nuclear data database
//!
//! Everything needed to turn the loosely structured fields of an EXFOR index
//! row and its dataset into typed values with consistent units.
//!
//! - [Target] - Nuclide from the EXFOR target notation, e.g. `U-235-M`
//! - [Projectile] - Incident particle, collapsed to a single letter code
//! - [Quantity] - Supported measured quantities
//! - [extract_points()] - Normalised [Point]s from a dataset
//!
//! Energies are always converted to eV, and temperatures of
//! Maxwellian-averaged data to keV.
//!
//! # Quickstart example
//!
//! ```rust
//! # use x4tools_normalise::{parse_target, map_projectile, Quantity};
//! # use std::str::FromStr;
//! assert_eq!(parse_target("FE-56"), Some((26, 56, 0)));
//! assert_eq!(map_projectile("N"), Some("n"));
//! assert!(Quantity::from_str("SIG").is_ok());
//! assert!(Quantity::from_str("NU").is_err());
//! ```

mod element;
mod error;
mod extract;
mod numeric;
mod projectile;
mod quantity;
mod target;
mod units;

// flatten public API and inline the documentation
#[doc(inline)]
pub use element::{atomic_number, element_symbol, ELEMENTS};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use extract::{extract_points, ColumnLayout, Point};

#[doc(inline)]
pub use numeric::to_number;

#[doc(inline)]
pub use projectile::{map_projectile, Projectile};

#[doc(inline)]
pub use quantity::Quantity;

#[doc(inline)]
pub use target::{parse_target, IsomerState, Target};

#[doc(inline)]
pub use units::{energy_to_ev, kt_to_kev, EnergyUnit, BOLTZMANN_EV, BOLTZMANN_KEV};
