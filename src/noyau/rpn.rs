// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur (f64)
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer sur une pile de flottants
//
// Règles:
// - Précédence : ^ > moins unaire > × ÷ > + −
// - ^ associatif à droite, le reste à gauche
// - Moins unaire : si '-' arrive quand on n’attend PAS une valeur => Tok::Neg
//   (préfixe : "-2^2" = -(2^2), "2*-3" = 2*(-3), "2^-1" = 2^(-1))
// - Plus unaire : ignoré

use super::erreur::ErreurCalc;
use super::jetons::{Operateur, Tok, PRECEDENCE_NEG};

fn precedence(t: &Tok) -> u8 {
    match t {
        Tok::Op(op) => op.precedence(),
        Tok::Neg => PRECEDENCE_NEG,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(1), Plus, Num(2), Fois, Num(3)]
///   rpn:    [Num(1), Num(2), Num(3), Fois, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une parenthèse fermée.
    // Sert à détecter les signes unaires.
    let mut prev_was_value = false;

    for &tok in tokens {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurCalc::ExpressionInvalide);
                }
                prev_was_value = true;
            }

            Tok::Op(Operateur::Plus) if !prev_was_value => {}

            Tok::Op(Operateur::Moins) | Tok::Neg if !prev_was_value => {
                // préfixe : ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Op(op) => {
                let p_tok = op.precedence();

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let doit_pop = if op.associatif_droite() {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            // Neg après une valeur : jamais produit par tokenize()
            Tok::Neg => return Err(ErreurCalc::ExpressionInvalide),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalc::ExpressionInvalide);
        }
        out.push(op);
    }

    Ok(out)
}

/// Applique un opérateur binaire.
/// - division par 0 (et 0 puissance négative) => DivisionParZero
pub fn appliquer(op: Operateur, a: f64, b: f64) -> Result<f64, ErreurCalc> {
    match op {
        Operateur::Plus => Ok(a + b),
        Operateur::Moins => Ok(a - b),
        Operateur::Fois => Ok(a * b),
        Operateur::Divise => {
            if b == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            Ok(a / b)
        }
        Operateur::Puissance => {
            if a == 0.0 && b < 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            Ok(a.powf(b))
        }
    }
}

/// Évalue une RPN. La pile doit finir avec exactement une valeur.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurCalc> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match *tok {
            Tok::Num(v) => st.push(v),

            Tok::Neg => {
                let a = st.pop().ok_or(ErreurCalc::ExpressionInvalide)?;
                st.push(-a);
            }

            Tok::Op(op) => {
                let b = st.pop().ok_or(ErreurCalc::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurCalc::ExpressionInvalide)?;
                st.push(appliquer(op, a, b)?);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurCalc::ExpressionInvalide),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurCalc::ExpressionInvalide),
    }
}
