// src/noyau/memoire.rs
//
// Registre mémoire (MC / MR / M+ / M-).
// `active` distingue "jamais utilisée" de "vaut zéro".
// Invariant : !active => valeur == 0.

use std::fmt;

use super::format::format_nombre;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
    active: bool,
}

impl Memoire {
    /// MC
    pub fn effacer(&mut self) {
        self.valeur = 0.0;
        self.active = false;
    }

    /// M+
    pub fn ajouter(&mut self, x: f64) {
        self.valeur += x;
        self.active = true;
    }

    /// M-
    pub fn soustraire(&mut self, x: f64) {
        self.valeur -= x;
        self.active = true;
    }

    /// MR : None tant que la mémoire n’a jamais été alimentée.
    pub fn rappel(&self) -> Option<f64> {
        self.active.then_some(self.valeur)
    }

    pub fn valeur(&self) -> f64 {
        self.valeur
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// "Memory: 8" si active, sinon vide.
    pub fn texte(&self) -> String {
        if self.active {
            format!("Memory: {}", format_nombre(self.valeur))
        } else {
            String::new()
        }
    }
}

/// Retour visuel ponctuel après M+ / M- (la durée d’affichage est l’affaire de la vue).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RetourMemoire {
    Ajout(f64),
    Retrait(f64),
}

impl fmt::Display for RetourMemoire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetourMemoire::Ajout(v) => write!(f, "M+: {}", format_nombre(*v)),
            RetourMemoire::Retrait(v) => write!(f, "M-: {}", format_nombre(*v)),
        }
    }
}
