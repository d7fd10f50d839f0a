// src/noyau/format.rs

use super::jetons::Operateur;

/// Longueur maximale d’un terme (saisie et affichage).
pub const MAX_CHIFFRES: usize = 15;

/// Décimales conservées avant nettoyage des zéros.
const DECIMALES: usize = 10;

/* ------------------------ Nombres ------------------------ */

/// Texte d’un nombre pour l’affichage, l’historique et la mémoire.
///
/// - entier : sans point ni zéros (2.0 -> "2")
/// - sinon : arrondi à 10 décimales, zéros finaux et point final retirés
/// - plus de 15 caractères : notation scientifique, 6 décimales (1e16 -> "1.000000e16")
pub fn format_nombre(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }

    let texte = if x.fract() == 0.0 {
        format!("{x:.0}")
    } else {
        let s = format!("{x:.prec$}", prec = DECIMALES);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    // -0 (ex: -1e-12 arrondi) => 0
    let texte = if texte == "-0" { "0".to_string() } else { texte };

    if texte.chars().count() > MAX_CHIFFRES {
        return format!("{x:.6e}");
    }
    texte
}

/* ------------------------ Expression ------------------------ */

/// Expression engagée + terme en cours, avec les symboles d’affichage (× ÷ − ^).
/// Transformation pure : rien n’est stocké sous cette forme.
pub fn format_expression(total: &[(String, Operateur)], terme: &str) -> String {
    let mut out = String::new();
    for (nombre, op) in total {
        out.push_str(nombre);
        out.push_str(op.symbole());
    }
    out.push_str(terme);
    out
}

/// Même chose avec les jetons internes (+ - * / **).
pub fn format_expression_interne(total: &[(String, Operateur)], terme: &str) -> String {
    let mut out = String::new();
    for (nombre, op) in total {
        out.push_str(nombre);
        out.push_str(op.jeton());
    }
    out.push_str(terme);
    out
}
