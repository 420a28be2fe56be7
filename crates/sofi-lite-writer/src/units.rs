// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversion from the host document's length unit
//!
//! The export target expects meters; the host document can be set to any
//! of the supported length units. The conversion factor is emitted once in
//! the export header (`let#conversion_factor`) and referenced from every
//! coordinate expression.

use sofi_lite_model::{ModelError, Result};

/// Host-document length unit
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnitSystem {
    Millimeters,
    Centimeters,
    Meters,
    Inches,
    Feet,
}

impl UnitSystem {
    /// Conversion factor from this unit to meters
    pub fn conversion_factor(self) -> f64 {
        match self {
            UnitSystem::Millimeters => scales::MILLIMETRE,
            UnitSystem::Centimeters => scales::CENTIMETRE,
            UnitSystem::Meters => scales::METRE,
            UnitSystem::Inches => scales::INCH,
            UnitSystem::Feet => scales::FOOT,
        }
    }

    /// Look up a host (Rhino) unit-system code
    ///
    /// Codes: 2 = millimeters, 3 = centimeters, 4 = meters, 8 = inches,
    /// 9 = feet. Anything else has no defined conversion.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            2 => Ok(UnitSystem::Millimeters),
            3 => Ok(UnitSystem::Centimeters),
            4 => Ok(UnitSystem::Meters),
            8 => Ok(UnitSystem::Inches),
            9 => Ok(UnitSystem::Feet),
            other => Err(ModelError::UnknownUnitSystem(other)),
        }
    }
}

/// Common unit scales for reference
pub mod scales {
    /// Meters to meters (identity)
    pub const METRE: f64 = 1.0;
    /// Millimeters to meters
    pub const MILLIMETRE: f64 = 0.001;
    /// Centimeters to meters
    pub const CENTIMETRE: f64 = 0.01;
    /// Inches to meters
    pub const INCH: f64 = 0.0254;
    /// Feet to meters
    pub const FOOT: f64 = 0.3048;
}
