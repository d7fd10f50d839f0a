// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// - Écran : expression engagée (petit) + affichage courant (grand, à droite)
// - Ligne mémoire : "Memory: x", ou le retour "M+: x" pendant ~1 s
// - Pavé standard 4 colonnes, pavé scientifique optionnel au-dessus
// - Fenêtre Historique (liste + Clear)
//
// Aucune logique de calcul : chaque bouton devient une `Commande`.

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::historique::MAX_HISTORIQUE;
use crate::noyau::{Commande, Constante, Fonction, Operateur};

const TAILLE_TOUCHE: [f32; 2] = [64.0, 44.0];
const TAILLE_TOUCHE_SCI: [f32; 2] = [84.0, 34.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_barre(ui, maintenant);
        ui.add_space(4.0);

        self.ui_ecran(ui, maintenant);
        ui.add_space(6.0);

        if self.scientifique {
            self.ui_pave_scientifique(ui, maintenant);
            ui.add_space(6.0);
            ui.separator();
            ui.add_space(6.0);
        }

        self.ui_pave_standard(ui, maintenant);
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.horizontal(|ui| {
            let libelle = if self.scientifique {
                "Standard"
            } else {
                "Scientific"
            };
            if ui.button(libelle).clicked() {
                self.basculer_scientifique();
            }
            ui.toggle_value(&mut self.historique_ouvert, "History")
                .on_hover_text("h");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(self.rendu.mode_angle.libelle())
                    .on_hover_text("Angle mode")
                    .clicked()
                {
                    self.basculer_mode_angle(maintenant);
                }
            });
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        let visuals = ui.visuals();
        let fond = if self.flash_actif(maintenant) {
            visuals.error_fg_color.gamma_multiply(0.25)
        } else {
            visuals.extreme_bg_color
        };
        let couleur = if self.rendu.est_erreur {
            visuals.error_fg_color
        } else {
            visuals.strong_text_color()
        };
        let faible = visuals.weak_text_color();

        egui::Frame::group(ui.style()).fill(fond).show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                // ligne du haut : hauteur stable même vide
                let expression: &str = if self.rendu.expression.is_empty() {
                    " "
                } else {
                    &self.rendu.expression
                };
                // invite de fonction en attente : plus visible
                let teinte = if self.rendu.en_attente { couleur } else { faible };
                ui.label(egui::RichText::new(expression).monospace().color(teinte));

                ui.label(
                    egui::RichText::new(&self.rendu.affichage)
                        .monospace()
                        .size(32.0)
                        .color(couleur),
                );
            });
        });

        let memoire = self.texte_memoire(maintenant);
        ui.horizontal(|ui| {
            let temoin = if self.memoire_active() { "M" } else { " " };
            ui.label(egui::RichText::new(temoin).small().strong());
            ui.label(egui::RichText::new(if memoire.is_empty() { " " } else { memoire }).small());
        });
    }

    fn ui_pave_standard(&mut self, ui: &mut egui::Ui, t: f64) {
        egui::Grid::new("pave_standard")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "MC", Commande::MemoireEffacer, t);
                self.touche(ui, "MR", Commande::MemoireRappel, t);
                self.touche(ui, "M+", Commande::MemoireAjouter, t);
                self.touche(ui, "M−", Commande::MemoireSoustraire, t);
                ui.end_row();

                self.touche(ui, "C", Commande::Effacer, t);
                self.touche(ui, "DEL", Commande::Retour, t);
                self.touche(ui, "%", Commande::Pourcentage, t);
                self.operateur(ui, Operateur::Divise, t);
                ui.end_row();

                self.chiffres(ui, ['7', '8', '9'], t);
                self.operateur(ui, Operateur::Fois, t);
                ui.end_row();

                self.chiffres(ui, ['4', '5', '6'], t);
                self.operateur(ui, Operateur::Moins, t);
                ui.end_row();

                self.chiffres(ui, ['1', '2', '3'], t);
                self.operateur(ui, Operateur::Plus, t);
                ui.end_row();

                self.touche(ui, "±", Commande::ChangerSigne, t);
                self.chiffres(ui, ['0', '.'], t);
                self.touche(ui, "=", Commande::Evaluer, t);
                ui.end_row();
            });
    }

    fn ui_pave_scientifique(&mut self, ui: &mut egui::Ui, t: f64) {
        egui::Grid::new("pave_scientifique")
            .num_columns(3)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [
                    [Fonction::Sin, Fonction::Cos, Fonction::Tan],
                    [Fonction::Asin, Fonction::Acos, Fonction::Atan],
                    [Fonction::Csc, Fonction::Sec, Fonction::Cot],
                ] {
                    for f in ligne {
                        self.touche_sci(ui, libelle_fonction(f), Commande::Fonction(f), t);
                    }
                    ui.end_row();
                }

                self.touche_sci(ui, "√x", Commande::Fonction(Fonction::Sqrt), t);
                self.touche_sci(ui, "x²", Commande::Fonction(Fonction::Carre), t);
                self.touche_sci(ui, "ʸ√x", Commande::RacinePersonnalisee, t);
                ui.end_row();

                self.touche_sci(ui, "ln", Commande::Fonction(Fonction::Ln), t);
                self.touche_sci(ui, "log", Commande::Fonction(Fonction::Log), t);
                self.touche_sci(ui, "xʸ", Commande::Operateur(Operateur::Puissance), t);
                ui.end_row();

                self.touche_sci(ui, "π", Commande::Constante(Constante::Pi), t);
                self.touche_sci(ui, "e", Commande::Constante(Constante::E), t);
                ui.label("");
                ui.end_row();
            });
    }

    /* ------------------------ Historique ------------------------ */

    pub fn fenetre_historique(&mut self, ctx: &egui::Context, maintenant: f64) {
        if !self.historique_ouvert {
            return;
        }

        let mut ouvert = true;
        let mut vider = false;

        egui::Window::new("History")
            .open(&mut ouvert)
            .default_width(300.0)
            .show(ctx, |ui| {
                if self.historique().is_empty() {
                    ui.weak("No calculations yet");
                } else {
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for ligne in self.historique().entrees() {
                                ui.monospace(ligne);
                            }
                        });
                }
                ui.separator();
                ui.horizontal(|ui| {
                    vider = ui.button("Clear").clicked();
                    ui.weak(format!("{} / {MAX_HISTORIQUE}", self.historique().len()));
                });
            });

        if vider {
            self.commande(Commande::EffacerHistorique, maintenant);
        }
        self.historique_ouvert = ouvert;
    }

    /* ------------------------ Touches ------------------------ */

    fn touche(&mut self, ui: &mut egui::Ui, label: &str, cmd: Commande, t: f64) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(label));
        if resp.clicked() {
            self.commande(cmd, t);
        }
    }

    fn touche_sci(&mut self, ui: &mut egui::Ui, label: &str, cmd: Commande, t: f64) {
        let resp = ui.add_sized(TAILLE_TOUCHE_SCI, egui::Button::new(label));
        if resp.clicked() {
            self.commande(cmd, t);
        }
    }

    fn chiffres<const N: usize>(&mut self, ui: &mut egui::Ui, chiffres: [char; N], t: f64) {
        for c in chiffres {
            self.touche(ui, c.encode_utf8(&mut [0; 4]), Commande::Chiffre(c), t);
        }
    }

    fn operateur(&mut self, ui: &mut egui::Ui, op: Operateur, t: f64) {
        self.touche(ui, op.symbole(), Commande::Operateur(op), t);
    }
}

fn libelle_fonction(f: Fonction) -> &'static str {
    match f {
        Fonction::Asin => "sin⁻¹",
        Fonction::Acos => "cos⁻¹",
        Fonction::Atan => "tan⁻¹",
        autre => autre.nom(),
    }
}
