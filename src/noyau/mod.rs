//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie des erreurs (messages affichables)
//! - jetons.rs     : opérateurs + tokenisation
//! - rpn.rs        : shunting-yard + évaluation RPN (f64)
//! - eval.rs       : pipeline complet + bornes du résultat
//! - format.rs     : affichage des nombres et des expressions
//! - trig.rs       : mode d’angle + csc/sec/cot
//! - fonctions.rs  : fonctions scientifiques + racine n-ième
//! - memoire.rs    : registre mémoire
//! - historique.rs : journal borné
//! - moteur.rs     : état, commandes, requêtes, instantané

pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod memoire;
pub mod moteur;
pub mod rpn;
pub mod trig;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::eval_expression;
pub use fonctions::Fonction;
pub use format::format_nombre;
pub use jetons::Operateur;
pub use moteur::{Commande, Constante, Moteur, Rendu};
pub use trig::ModeAngle;
