//! Fonctions scientifiques unaires + racine n-ième.
//!
//! Chaque fonction valide son domaine avant de calculer ; le résultat passe
//! ensuite par la même borne que l’évaluateur (|v| <= 1e15).

use super::erreur::ErreurCalc;
use super::eval::LIMITE_RESULTAT;
use super::format::format_nombre;
use super::trig::{self, ModeAngle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Csc,
    Sec,
    Cot,
    Sqrt,
    Ln,
    Log,
    Carre,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Csc => "csc",
            Fonction::Sec => "sec",
            Fonction::Cot => "cot",
            Fonction::Sqrt => "sqrt",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Carre => "square",
        }
    }

    /// Invite affichée tant que l’opérande est attendue (nom + parenthèse ouvrante).
    pub fn invite(self) -> &'static str {
        match self {
            Fonction::Sin => "sin(",
            Fonction::Cos => "cos(",
            Fonction::Tan => "tan(",
            Fonction::Asin => "sin⁻¹(",
            Fonction::Acos => "cos⁻¹(",
            Fonction::Atan => "tan⁻¹(",
            Fonction::Csc => "csc(",
            Fonction::Sec => "sec(",
            Fonction::Cot => "cot(",
            Fonction::Sqrt => "√(",
            Fonction::Ln => "ln(",
            Fonction::Log => "log(",
            Fonction::Carre => "sqr(",
        }
    }

    /// Texte d’historique : "sin(30)".
    pub fn libelle(self, x: f64) -> String {
        format!("{}{})", self.invite(), format_nombre(x))
    }

    pub fn appliquer(self, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalc> {
        let v = match self {
            Fonction::Sin => mode.vers_radians(x).sin(),
            Fonction::Cos => mode.vers_radians(x).cos(),
            Fonction::Tan => mode.vers_radians(x).tan(),
            Fonction::Asin => trig::asin(x, mode)?,
            Fonction::Acos => trig::acos(x, mode)?,
            Fonction::Atan => trig::atan(x, mode),
            Fonction::Csc => trig::csc(mode.vers_radians(x))?,
            Fonction::Sec => trig::sec(mode.vers_radians(x))?,
            Fonction::Cot => trig::cot(mode.vers_radians(x))?,
            Fonction::Sqrt => {
                if x < 0.0 {
                    return Err(ErreurCalc::domaine(
                        "Cannot calculate square root of negative number",
                    ));
                }
                x.sqrt()
            }
            Fonction::Ln => {
                if x <= 0.0 {
                    return Err(ErreurCalc::domaine(
                        "Cannot calculate ln of non-positive number",
                    ));
                }
                x.ln()
            }
            Fonction::Log => {
                if x <= 0.0 {
                    return Err(ErreurCalc::domaine(
                        "Cannot calculate log of non-positive number",
                    ));
                }
                x.log10()
            }
            Fonction::Carre => x * x,
        };
        verifier(v)
    }
}

/// Racine n-ième : valeur^(1/puissance).
/// Puissance entière impaire + valeur négative => racine réelle négative.
pub fn racine_n(valeur: f64, puissance: f64) -> Result<f64, ErreurCalc> {
    if puissance == 0.0 {
        return Err(ErreurCalc::domaine("Root power cannot be zero"));
    }

    let v = if valeur < 0.0 {
        let entiere = puissance.fract() == 0.0;
        if entiere && puissance % 2.0 == 0.0 {
            return Err(ErreurCalc::domaine(
                "Cannot calculate even root of negative number",
            ));
        }
        if !entiere {
            // racine non entière d’un négatif : pas de valeur réelle
            return Err(ErreurCalc::Calcul);
        }
        -(-valeur).powf(1.0 / puissance)
    } else {
        valeur.powf(1.0 / puissance)
    };
    verifier(v)
}

/// Texte d’historique : "3√(8)".
pub fn libelle_racine(puissance: f64, valeur: f64) -> String {
    format!("{}√({})", format_nombre(puissance), format_nombre(valeur))
}

fn verifier(v: f64) -> Result<f64, ErreurCalc> {
    if v.is_nan() {
        return Err(ErreurCalc::Calcul);
    }
    if v.is_infinite() || v.abs() > LIMITE_RESULTAT {
        return Err(ErreurCalc::Depassement);
    }
    Ok(v)
}
