//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter le moteur, le dernier instantané rendu et les retours visuels
//! temporisés (M+/M-, flash d’erreur).
//!
//! Contrats :
//! - Aucun calcul ici : tout passe par `Moteur::executer`.
//! - Le temps est fourni par l’appelant (secondes egui), jamais lu ici.

use crate::noyau::historique::Historique;
use crate::noyau::{Commande, ModeAngle, Moteur, Rendu};

/// Durée d’affichage du retour "M+: …" (s).
pub const DUREE_RETOUR_MEMOIRE: f64 = 1.0;

/// Durée du flash d’erreur (s).
pub const DUREE_FLASH_ERREUR: f64 = 1.5;

/// Réglages de démarrage (ligne de commande en natif, défauts en web).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reglages {
    pub mode_angle: ModeAngle,
    pub scientifique: bool,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    moteur: Moteur,

    // --- dernier instantané ---
    pub rendu: Rendu,

    // --- panneaux ---
    pub scientifique: bool,
    pub historique_ouvert: bool,

    // --- retours temporisés (texte, échéance) ---
    retour_memoire: Option<(String, f64)>,
    flash_erreur: Option<f64>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        tracing::info!(
            angle = reglages.mode_angle.libelle(),
            scientifique = reglages.scientifique,
            "démarrage"
        );

        let moteur = Moteur::new(reglages.mode_angle);
        let rendu = moteur.rendu();
        Self {
            moteur,
            rendu,
            scientifique: reglages.scientifique,
            historique_ouvert: false,
            retour_memoire: None,
            flash_erreur: None,
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// Transmet une commande au moteur et arme les retours visuels.
    pub fn commande(&mut self, cmd: Commande, maintenant: f64) {
        let rendu = self.moteur.executer(cmd);

        if let Some(r) = rendu.retour {
            self.retour_memoire = Some((r.to_string(), maintenant + DUREE_RETOUR_MEMOIRE));
        }
        self.flash_erreur = rendu
            .est_erreur
            .then_some(maintenant + DUREE_FLASH_ERREUR);

        self.rendu = rendu;
    }

    /// DEG <-> RAD
    pub fn basculer_mode_angle(&mut self, maintenant: f64) {
        let mode = self.moteur.mode_angle().bascule();
        self.commande(Commande::ModeAngle(mode), maintenant);
    }

    pub fn basculer_scientifique(&mut self) {
        self.scientifique = !self.scientifique;
    }

    pub fn basculer_historique(&mut self) {
        self.historique_ouvert = !self.historique_ouvert;
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn historique(&self) -> &Historique {
        self.moteur.historique()
    }

    /// Témoin "M" : la mémoire a été alimentée (même à zéro).
    pub fn memoire_active(&self) -> bool {
        self.moteur.memoire().active()
    }

    /// Ligne mémoire : le retour M+/M- prime tant qu’il n’a pas expiré.
    pub fn texte_memoire(&self, maintenant: f64) -> &str {
        match &self.retour_memoire {
            Some((texte, fin)) if maintenant < *fin => texte,
            _ => &self.rendu.memoire,
        }
    }

    pub fn flash_actif(&self, maintenant: f64) -> bool {
        self.flash_erreur.is_some_and(|fin| maintenant < fin)
    }

    /// Délai avant la prochaine expiration (pour programmer un repaint).
    pub fn prochaine_echeance(&self, maintenant: f64) -> Option<f64> {
        self.retour_memoire
            .as_ref()
            .map(|(_, fin)| *fin)
            .into_iter()
            .chain(self.flash_erreur)
            .filter(|fin| *fin > maintenant)
            .map(|fin| fin - maintenant)
            .reduce(f64::min)
    }
}
