//! Noyau: évaluation (pipeline réel)
//!
//! texte -> jetons -> RPN -> f64 -> vérification (dépassement, NaN)
//!
//! Aucun interpréteur générique : seuls les nombres, les cinq opérateurs,
//! les parenthèses et π / e passent le tokenizer.

use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::{eval_rpn, to_rpn};

/// Au-delà (en valeur absolue), un résultat est refusé.
pub const LIMITE_RESULTAT: f64 = 1e15;

/// API publique : évalue une expression infixe libre.
pub fn eval_expression(expr_str: &str) -> Result<f64, ErreurCalc> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::ExpressionInvalide);
    }

    let jetons = tokenize(s)?;
    eval_jetons(&jetons)
}

/// Évalue une suite de jetons déjà construite (utilisé par le moteur).
pub fn eval_jetons(jetons: &[Tok]) -> Result<f64, ErreurCalc> {
    let rpn = to_rpn(jetons)?;
    tracing::trace!(rpn = %format_tokens(&rpn), "RPN");

    let v = eval_rpn(&rpn)?;
    verifier_resultat(v)
}

/// NaN => expression invalide ; infini ou |v| > 1e15 => dépassement.
pub fn verifier_resultat(v: f64) -> Result<f64, ErreurCalc> {
    if v.is_nan() {
        return Err(ErreurCalc::ExpressionInvalide);
    }
    if v.is_infinite() || v.abs() > LIMITE_RESULTAT {
        return Err(ErreurCalc::Depassement);
    }
    Ok(v)
}
