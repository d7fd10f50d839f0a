// src/noyau/jetons.rs

use std::f64::consts::{E, PI};

use super::erreur::ErreurCalc;

/// Opérateurs binaires de la calculatrice (ensemble fermé).
///
/// Le jeton interne (`jeton`) et le symbole affiché (`symbole`) sont séparés :
/// `*` et `**` ne se confondent jamais, la puissance est un seul opérateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl Operateur {
    /// Forme textuelle interne (infixe).
    pub fn jeton(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "*",
            Operateur::Divise => "/",
            Operateur::Puissance => "**",
        }
    }

    /// Symbole montré à l’utilisateur (jamais stocké).
    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "−",
            Operateur::Fois => "×",
            Operateur::Divise => "÷",
            Operateur::Puissance => "^",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operateur::Plus | Operateur::Moins => 1,
            Operateur::Fois | Operateur::Divise => 2,
            Operateur::Puissance => 4,
        }
    }

    pub fn associatif_droite(self) -> bool {
        matches!(self, Operateur::Puissance)
    }

    /// Caractère simple -> opérateur (accepte aussi les symboles d’affichage).
    /// `**` est reconnu par le tokenizer, pas ici.
    pub fn depuis_caractere(c: char) -> Option<Operateur> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' | '−' => Some(Operateur::Moins),
            '*' | '×' => Some(Operateur::Fois),
            '/' | '÷' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            _ => None,
        }
    }
}

/// Précédence du moins unaire : plus forte que × ÷, plus faible que ^.
pub const PRECEDENCE_NEG: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Operateur),

    // Moins unaire : n’apparaît qu’en sortie de to_rpn()
    Neg,

    LPar,
    RPar,
}

/// Tokenize une expression infixe.
/// Supporte:
/// - nombres décimaux, exposant optionnel (ex: 12, 0.5, .5, 1.2e-3)
/// - opérateurs + - * / ^ et ** (plus les symboles − × ÷)
/// - parenthèses ( )
/// - constantes π / pi et e
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // ** avant * (jeton de puissance sur deux caractères)
        if c == '*' && chars.get(i + 1) == Some(&'*') {
            out.push(Tok::Op(Operateur::Puissance));
            i += 2;
            continue;
        }
        if let Some(op) = Operateur::depuis_caractere(c) {
            out.push(Tok::Op(op));
            i += 1;
            continue;
        }

        if c == 'π' {
            out.push(Tok::Num(PI));
            i += 1;
            continue;
        }

        // Constantes nommées (insensible à la casse)
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            match mot.to_lowercase().as_str() {
                "pi" => out.push(Tok::Num(PI)),
                "e" => out.push(Tok::Num(E)),
                _ => {
                    tracing::debug!(mot = %mot, "identifiant inconnu");
                    return Err(ErreurCalc::ExpressionInvalide);
                }
            }
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }

            // exposant : e / E suivi d’un chiffre (signe optionnel)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let texte: String = chars[start..i].iter().collect();
            let v = texte
                .parse::<f64>()
                .map_err(|_| ErreurCalc::ExpressionInvalide)?;
            out.push(Tok::Num(v));
            continue;
        }

        tracing::debug!(caractere = %c, "caractère inattendu");
        return Err(ErreurCalc::ExpressionInvalide);
    }

    Ok(out)
}

/// Format utilitaire (logs) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Op(op) => op.jeton().to_string(),
            Tok::Neg => "neg".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
