// src/noyau/erreur.rs
//
// Erreurs du noyau : toutes récupérables, toutes affichables telles quelles.
// Le texte (Display) est exactement le message montré à l’utilisateur.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalc {
    #[error("Cannot divide by zero")]
    DivisionParZero,

    #[error("Number too large")]
    Depassement,

    /// Argument hors domaine (asin/acos, √, ln/log, csc/sec/cot, racine n-ième).
    #[error("{0}")]
    Domaine(String),

    /// Syntaxe incomplète ou invalide arrivée jusqu’à l’évaluateur.
    #[error("Error")]
    ExpressionInvalide,

    /// Résultat non fini d’une fonction scientifique.
    #[error("Math Error")]
    Calcul,
}

impl ErreurCalc {
    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalc::Domaine(msg.into())
    }
}
