// src/app.rs
//
// Calculatrice scientifique: module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc et Reglages (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB) + le clavier global

pub mod etat;
pub mod vue;

pub use etat::{AppCalc, Reglages};

use std::time::Duration;

use eframe::egui;

use crate::noyau::{Commande, Operateur};

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let maintenant = ctx.input(|i| i.time);

        for touche in lire_clavier(ctx) {
            match touche {
                Touche::Commande(cmd) => self.commande(cmd, maintenant),
                Touche::Historique => self.basculer_historique(),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui, maintenant);
        });
        self.fenetre_historique(ctx, maintenant);

        // retours temporisés : repaint à l’expiration, sinon egui dort
        if let Some(delai) = self.prochaine_echeance(maintenant) {
            ctx.request_repaint_after(Duration::from_secs_f64(delai));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Touche {
    Commande(Commande),
    Historique,
}

/// Événements clavier de la frame -> touches de la calculatrice.
fn lire_clavier(ctx: &egui::Context) -> Vec<Touche> {
    ctx.input(|i| {
        let mut out = Vec::new();
        for ev in &i.events {
            match ev {
                egui::Event::Text(t) => out.extend(t.chars().filter_map(touche_caractere)),
                egui::Event::Key {
                    key, pressed: true, ..
                } => out.extend(touche_speciale(*key)),
                _ => {}
            }
        }
        out
    })
}

fn touche_caractere(c: char) -> Option<Touche> {
    let cmd = match c {
        '0'..='9' | '.' => Commande::Chiffre(c),
        ',' => Commande::Chiffre('.'),
        '=' => Commande::Evaluer,
        '%' => Commande::Pourcentage,
        'h' | 'H' => return Some(Touche::Historique),
        _ => Commande::Operateur(Operateur::depuis_caractere(c)?),
    };
    Some(Touche::Commande(cmd))
}

fn touche_speciale(key: egui::Key) -> Option<Touche> {
    let cmd = match key {
        egui::Key::Enter => Commande::Evaluer,
        egui::Key::Backspace => Commande::Retour,
        egui::Key::Escape | egui::Key::Delete => Commande::Effacer,
        _ => return None,
    };
    Some(Touche::Commande(cmd))
}
