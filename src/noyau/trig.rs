// src/noyau/trig.rs
//
// Trigonométrie en flottants, sensible au mode d’angle
// -------------------------------------------------
// - Conversion degrés <-> radians UNIQUEMENT aux bornes (entrée des sin/cos/tan,
//   sortie des asin/acos/atan) ; le calcul interne est toujours en radians.
// - csc/sec/cot : indéfinis si sin/cos/tan ~ 0 (tolérance 1e-10)

use super::erreur::ErreurCalc;

/// Sous ce seuil, sin/cos/tan sont considérés nuls (csc/sec/cot indéfinis).
pub const TOLERANCE_ZERO: f64 = 1e-10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }

    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    /// Angle saisi -> radians.
    pub fn vers_radians(self, angle: f64) -> f64 {
        match self {
            ModeAngle::Degres => angle.to_radians(),
            ModeAngle::Radians => angle,
        }
    }

    /// Radians -> angle affiché.
    pub fn depuis_radians(self, rad: f64) -> f64 {
        match self {
            ModeAngle::Degres => rad.to_degrees(),
            ModeAngle::Radians => rad,
        }
    }
}

pub fn asin(x: f64, mode: ModeAngle) -> Result<f64, ErreurCalc> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(ErreurCalc::domaine(
            "Domain error: arcsin requires -1 ≤ x ≤ 1",
        ));
    }
    Ok(mode.depuis_radians(x.asin()))
}

pub fn acos(x: f64, mode: ModeAngle) -> Result<f64, ErreurCalc> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(ErreurCalc::domaine(
            "Domain error: arccos requires -1 ≤ x ≤ 1",
        ));
    }
    Ok(mode.depuis_radians(x.acos()))
}

pub fn atan(x: f64, mode: ModeAngle) -> f64 {
    mode.depuis_radians(x.atan())
}

pub fn csc(rad: f64) -> Result<f64, ErreurCalc> {
    let s = rad.sin();
    if s.abs() < TOLERANCE_ZERO {
        return Err(ErreurCalc::domaine("Math error: csc undefined"));
    }
    Ok(1.0 / s)
}

pub fn sec(rad: f64) -> Result<f64, ErreurCalc> {
    let c = rad.cos();
    if c.abs() < TOLERANCE_ZERO {
        return Err(ErreurCalc::domaine("Math error: sec undefined"));
    }
    Ok(1.0 / c)
}

pub fn cot(rad: f64) -> Result<f64, ErreurCalc> {
    let t = rad.tan();
    if t.abs() < TOLERANCE_ZERO {
        return Err(ErreurCalc::domaine("Math error: cot undefined"));
    }
    Ok(1.0 / t)
}
