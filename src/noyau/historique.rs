// src/noyau/historique.rs
//
// Journal des calculs "<expression> = <résultat>", ordre chronologique,
// borné à MAX_HISTORIQUE (le plus ancien sort en premier).

use std::collections::VecDeque;

pub const MAX_HISTORIQUE: usize = 100;

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: VecDeque<String>,
}

impl Historique {
    pub fn ajouter(&mut self, expression: &str, resultat: &str) {
        let ligne = format!("{expression} = {resultat}");
        tracing::debug!(ligne = %ligne, "historique");

        self.entrees.push_back(ligne);
        while self.entrees.len() > MAX_HISTORIQUE {
            self.entrees.pop_front();
        }
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }

    /// Du plus ancien au plus récent.
    pub fn entrees(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entrees.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}
