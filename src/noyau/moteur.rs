//! Moteur d’expression (état + commandes + requêtes)
//!
//! Rôle :
//! - Construire une expression infixe à partir de touches (chiffres, opérateurs)
//! - L’évaluer (eval.rs), appliquer les fonctions scientifiques (fonctions.rs)
//! - Tenir la mémoire, l’historique, le mode d’angle
//! - Rendre un instantané (`Rendu`) après chaque commande
//!
//! Contrats :
//! - Aucune E/S, aucun minuteur, aucun rappel vers la vue.
//! - Une erreur n’est jamais bloquante : toute commande suivante commence par
//!   effacer l’erreur (voir `sortir_erreur`).
//! - Tant qu’une fonction attend son opérande, `terme` ne contient que cette opérande.

use std::f64::consts;
use std::mem;

use super::erreur::ErreurCalc;
use super::eval::eval_jetons;
use super::fonctions::{libelle_racine, racine_n, Fonction};
use super::format::{format_expression, format_expression_interne, format_nombre, MAX_CHIFFRES};
use super::historique::Historique;
use super::jetons::{Operateur, Tok};
use super::memoire::{Memoire, RetourMemoire};
use super::trig::ModeAngle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }
}

/// Machine à états des fonctions en attente.
///
/// Racine n-ième en deux temps : indice (PuissanceRacine), puis radicande (ValeurRacine).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EnAttente {
    #[default]
    Aucune,
    Operande(Fonction),
    PuissanceRacine,
    ValeurRacine(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Commande {
    Chiffre(char),
    Operateur(Operateur),
    Evaluer,
    Fonction(Fonction),
    RacinePersonnalisee,
    Constante(Constante),
    MemoireEffacer,
    MemoireRappel,
    MemoireAjouter,
    MemoireSoustraire,
    ChangerSigne,
    Pourcentage,
    Retour,
    Effacer,
    ModeAngle(ModeAngle),
    EffacerHistorique,
}

/// Instantané rendu après chaque commande.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendu {
    pub affichage: String,
    pub expression: String,
    pub memoire: String,
    pub est_erreur: bool,
    pub en_attente: bool,
    pub mode_angle: ModeAngle,

    /// Retour ponctuel M+/M- (la vue choisit la durée d’affichage).
    pub retour: Option<RetourMemoire>,
}

#[derive(Clone, Debug, Default)]
pub struct Moteur {
    // --- expression ---
    total: Vec<(String, Operateur)>, // termes engagés, chacun suivi de son opérateur
    terme: String,                   // terme en cours (ou message d’erreur)
    dernier_resultat: Option<f64>,   // valeur affichée non éditable (résultat, constante, MR)

    // --- fonctions ---
    attente: EnAttente,

    erreur: bool,

    memoire: Memoire,
    historique: Historique,
    mode_angle: ModeAngle,

    retour: Option<RetourMemoire>,
}

impl Moteur {
    pub fn new(mode_angle: ModeAngle) -> Self {
        Self {
            mode_angle,
            ..Self::default()
        }
    }

    /// Point d’entrée unique de la vue : applique la commande, rend l’instantané.
    pub fn executer(&mut self, cmd: Commande) -> Rendu {
        tracing::trace!(?cmd, "commande");
        self.retour = None;

        match cmd {
            Commande::Chiffre(c) => self.ajouter_chiffre(c),
            Commande::Operateur(op) => self.ajouter_operateur(op),
            Commande::Evaluer => self.evaluer(),
            Commande::Fonction(f) => self.appliquer_fonction(f),
            Commande::RacinePersonnalisee => self.racine_personnalisee(),
            Commande::Constante(k) => self.ajouter_constante(k),
            Commande::MemoireEffacer => self.memoire_effacer(),
            Commande::MemoireRappel => self.memoire_rappel(),
            Commande::MemoireAjouter => self.memoire_ajouter(),
            Commande::MemoireSoustraire => self.memoire_soustraire(),
            Commande::ChangerSigne => self.changer_signe(),
            Commande::Pourcentage => self.pourcentage(),
            Commande::Retour => self.retour_arriere(),
            Commande::Effacer => self.effacer(),
            Commande::ModeAngle(m) => self.set_mode_angle(m),
            Commande::EffacerHistorique => self.effacer_historique(),
        }

        self.rendu()
    }

    /* ------------------------ Saisie ------------------------ */

    /// Chiffre ou point décimal.
    pub fn ajouter_chiffre(&mut self, c: char) {
        self.sortir_erreur();

        if !(c.is_ascii_digit() || c == '.') {
            return;
        }

        // Un résultat affiché seul est remplacé, pas prolongé.
        if self.dernier_resultat.is_some()
            && self.total.is_empty()
            && self.attente == EnAttente::Aucune
        {
            self.terme.clear();
            self.dernier_resultat = None;
        }

        if c == '0' && self.terme == "0" {
            return;
        }

        if c == '.' {
            if self.terme.is_empty() {
                self.terme.push_str("0.");
                return;
            }
            if self.terme.contains('.') {
                return;
            }
        }

        if self.terme == "0" && c != '.' {
            self.terme.clear();
        }

        if self.terme.chars().count() < MAX_CHIFFRES {
            self.terme.push(c);
        }
    }

    pub fn ajouter_operateur(&mut self, op: Operateur) {
        if self.sortir_erreur() {
            return;
        }
        // pas d’opérateur au milieu d’une fonction en attente
        if self.attente != EnAttente::Aucune {
            return;
        }

        if !self.terme.is_empty() {
            let terme = mem::take(&mut self.terme);
            self.total.push((terme, op));
            self.dernier_resultat = None;
        } else if let Some(dernier) = self.total.last_mut() {
            // changement d’avis : on remplace l’opérateur final
            dernier.1 = op;
        } else if let Some(v) = self.dernier_resultat.take() {
            self.total.push((format_nombre(v), op));
        }
    }

    /* ------------------------ Évaluation ------------------------ */

    pub fn evaluer(&mut self) {
        if self.sortir_erreur() {
            return;
        }

        if self.attente != EnAttente::Aucune {
            self.executer_attente();
            return;
        }

        // vide, ou se termine par un opérateur : refus silencieux
        if self.terme.is_empty() {
            return;
        }

        let affichee = format_expression(&self.total, &self.terme);
        tracing::debug!(
            expression = %format_expression_interne(&self.total, &self.terme),
            "évaluation"
        );

        match self.jetons().and_then(|j| eval_jetons(&j)) {
            Ok(v) => {
                let texte = format_nombre(v);
                self.historique.ajouter(&affichee, &texte);
                self.dernier_resultat = Some(texte.parse::<f64>().unwrap_or(v));
                self.terme = texte;
                self.total.clear();
            }
            Err(e) => self.poser_erreur(e),
        }
    }

    /// Expression engagée + terme courant, sous forme de jetons.
    /// Le signe d’un terme reste un moins unaire : "-2**2" = -(2**2).
    fn jetons(&self) -> Result<Vec<Tok>, ErreurCalc> {
        let mut out = Vec::with_capacity(self.total.len() * 3 + 2);
        for (nombre, op) in &self.total {
            pousser_terme(&mut out, nombre)?;
            out.push(Tok::Op(*op));
        }
        pousser_terme(&mut out, &self.terme)?;
        Ok(out)
    }

    /* ------------------------ Fonctions ------------------------ */

    /// Terme saisi : application immédiate. Sinon : la fonction attend son opérande.
    pub fn appliquer_fonction(&mut self, f: Fonction) {
        if self.sortir_erreur() {
            return;
        }

        match self.attente {
            EnAttente::Aucune => {
                if self.terme.is_empty() {
                    self.attente = EnAttente::Operande(f);
                    return;
                }
                let Some(x) = self.valeur_terme() else {
                    self.poser_erreur(ErreurCalc::ExpressionInvalide);
                    return;
                };
                let calcul = f.appliquer(x, self.mode_angle);
                self.poser_resultat(calcul, &f.libelle(x));
            }

            // opérande pas encore saisie : on change de fonction
            EnAttente::Operande(_) if self.terme.is_empty() => {
                self.attente = EnAttente::Operande(f);
            }

            // seconde pression : équivaut à "="
            EnAttente::Operande(_) => self.executer_attente(),

            // racine n-ième en cours : à terminer ou annuler d’abord
            EnAttente::PuissanceRacine | EnAttente::ValeurRacine(_) => {}
        }
    }

    /// Touche ⁿ√ : demande l’indice (terme effacé), ou annule le flux en cours.
    pub fn racine_personnalisee(&mut self) {
        if self.sortir_erreur() {
            return;
        }

        self.attente = match self.attente {
            EnAttente::PuissanceRacine | EnAttente::ValeurRacine(_) => EnAttente::Aucune,
            EnAttente::Aucune | EnAttente::Operande(_) => EnAttente::PuissanceRacine,
        };
        self.terme.clear();
        self.dernier_resultat = None;
    }

    fn executer_attente(&mut self) {
        if self.terme.is_empty() {
            return;
        }
        let Some(x) = self.valeur_terme() else {
            self.poser_erreur(ErreurCalc::ExpressionInvalide);
            return;
        };

        let (calcul, libelle) = match self.attente {
            EnAttente::Aucune => return,
            EnAttente::Operande(f) => (f.appliquer(x, self.mode_angle), f.libelle(x)),
            EnAttente::PuissanceRacine => {
                tracing::trace!(indice = x, "indice de racine");
                self.attente = EnAttente::ValeurRacine(x);
                self.terme.clear();
                return;
            }
            EnAttente::ValeurRacine(n) => (racine_n(x, n), libelle_racine(n, x)),
        };

        self.attente = EnAttente::Aucune;
        self.poser_resultat(calcul, &libelle);
    }

    fn poser_resultat(&mut self, calcul: Result<f64, ErreurCalc>, libelle: &str) {
        match calcul {
            Ok(v) => {
                let texte = format_nombre(v);
                self.historique.ajouter(libelle, &texte);
                self.dernier_resultat = Some(v);
                self.terme = texte;
            }
            Err(e) => self.poser_erreur(e),
        }
    }

    pub fn ajouter_constante(&mut self, k: Constante) {
        self.sortir_erreur();

        let v = k.valeur();
        self.terme = format_nombre(v);
        self.dernier_resultat = Some(v);
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire_effacer(&mut self) {
        self.sortir_erreur();
        self.memoire.effacer();
    }

    pub fn memoire_rappel(&mut self) {
        self.sortir_erreur();
        if let Some(v) = self.memoire.rappel() {
            self.terme = format_nombre(v);
            self.dernier_resultat = Some(v);
        }
    }

    pub fn memoire_ajouter(&mut self) {
        self.sortir_erreur();
        if let Some(x) = self.valeur_terme() {
            self.memoire.ajouter(x);
            self.retour = Some(RetourMemoire::Ajout(self.memoire.valeur()));
        }
    }

    pub fn memoire_soustraire(&mut self) {
        self.sortir_erreur();
        if let Some(x) = self.valeur_terme() {
            self.memoire.soustraire(x);
            self.retour = Some(RetourMemoire::Retrait(self.memoire.valeur()));
        }
    }

    /* ------------------------ Édition du terme ------------------------ */

    /// ±
    pub fn changer_signe(&mut self) {
        if self.sortir_erreur() {
            return;
        }
        if self.terme == "0" || self.valeur_terme().is_none() {
            return;
        }

        if let Some(reste) = self.terme.strip_prefix('-') {
            self.terme = reste.to_string();
        } else {
            self.terme.insert(0, '-');
        }

        if self.dernier_resultat.is_some() {
            self.dernier_resultat = self.valeur_terme();
        }
    }

    pub fn pourcentage(&mut self) {
        if self.sortir_erreur() || self.terme.is_empty() {
            return;
        }
        match self.valeur_terme() {
            Some(x) => self.terme = format_nombre(x / 100.0),
            None => self.poser_erreur(ErreurCalc::ExpressionInvalide),
        }
    }

    /// DEL : annule la fonction en attente si aucune opérande n’est saisie.
    pub fn retour_arriere(&mut self) {
        if self.sortir_erreur() {
            return;
        }

        if self.terme.is_empty() {
            self.attente = EnAttente::Aucune;
            return;
        }

        // dernier_resultat conservé : "2+3=" DEL "+" reprend 5
        self.terme.pop();
        if self.terme == "-" {
            self.terme.clear();
        }
    }

    /// C : tout sauf mémoire, historique et mode d’angle.
    pub fn effacer(&mut self) {
        self.terme.clear();
        self.total.clear();
        self.dernier_resultat = None;
        self.erreur = false;
        self.attente = EnAttente::Aucune;
    }

    pub fn set_mode_angle(&mut self, mode: ModeAngle) {
        self.sortir_erreur();
        self.mode_angle = mode;
    }

    pub fn effacer_historique(&mut self) {
        self.sortir_erreur();
        self.historique.vider();
    }

    /* ------------------------ Erreurs ------------------------ */

    /// Efface l’erreur affichée (et tout l’état d’expression). Renvoie true si il y en avait une.
    fn sortir_erreur(&mut self) -> bool {
        if !self.erreur {
            return false;
        }
        self.effacer();
        true
    }

    fn poser_erreur(&mut self, e: ErreurCalc) {
        tracing::debug!(erreur = %e, "erreur de calcul");
        self.terme = e.to_string();
        self.erreur = true;
        self.attente = EnAttente::Aucune;
        self.dernier_resultat = None;
    }

    /// Valeur du terme courant, si c’est un nombre (jamais un message d’erreur).
    fn valeur_terme(&self) -> Option<f64> {
        if self.erreur || self.terme.is_empty() {
            return None;
        }
        self.terme.parse::<f64>().ok()
    }

    /* ------------------------ Requêtes ------------------------ */

    pub fn affichage_courant(&self) -> String {
        if self.terme.is_empty() {
            "0".to_string()
        } else {
            self.terme.clone()
        }
    }

    /// Ligne du haut : expression engagée (symboles d’affichage) + invite éventuelle.
    pub fn affichage_expression(&self) -> String {
        let base = format_expression(&self.total, "");
        match self.attente {
            EnAttente::Aucune => base,
            EnAttente::Operande(f) => format!("{base}{}", f.invite()),
            EnAttente::PuissanceRacine => format!("{base}ⁿ√( root power: "),
            EnAttente::ValeurRacine(n) => {
                format!("{base}ⁿ√( root power: {} ) value: ", format_nombre(n))
            }
        }
    }

    pub fn affichage_memoire(&self) -> String {
        self.memoire.texte()
    }

    pub fn est_erreur(&self) -> bool {
        self.erreur
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    pub fn memoire(&self) -> &Memoire {
        &self.memoire
    }

    pub fn mode_angle(&self) -> ModeAngle {
        self.mode_angle
    }

    #[cfg(test)]
    pub fn attente(&self) -> EnAttente {
        self.attente
    }

    #[cfg(test)]
    pub fn terme(&self) -> &str {
        &self.terme
    }

    /// Expression engagée sous sa forme interne ("5*2**").
    #[cfg(test)]
    pub fn expression_interne(&self) -> String {
        format_expression_interne(&self.total, "")
    }

    pub fn rendu(&self) -> Rendu {
        Rendu {
            affichage: self.affichage_courant(),
            expression: self.affichage_expression(),
            memoire: self.affichage_memoire(),
            est_erreur: self.erreur,
            en_attente: self.attente != EnAttente::Aucune,
            mode_angle: self.mode_angle,
            retour: self.retour,
        }
    }
}

fn pousser_terme(out: &mut Vec<Tok>, terme: &str) -> Result<(), ErreurCalc> {
    let magnitude = match terme.strip_prefix('-') {
        Some(reste) => {
            out.push(Tok::Op(Operateur::Moins));
            reste
        }
        None => terme,
    };
    let v = magnitude
        .parse::<f64>()
        .map_err(|_| ErreurCalc::ExpressionInvalide)?;
    out.push(Tok::Num(v));
    Ok(())
}
