// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran en lecture seule : toute saisie passe par les règles de etat.rs
// - Clavier : chiffres . + - * / ( ) ; Enter ou = évalue ; Backspace ; Escape efface
// - Tactile : gros boutons
// - Libellés ASCII (sauf ×) : pas de police embarquée
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::fonctions::Fonction;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_reglages(ui);

                ui.add_space(6.0);
                self.ui_ecran(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    /// Clavier physique, lu une fois par frame (quel que soit le focus).
    pub fn capture_clavier(&mut self, ctx: &egui::Context) {
        let evenements = ctx.input(|i| i.events.clone());

        for ev in evenements {
            match ev {
                egui::Event::Text(texte) => {
                    for c in texte.chars() {
                        self.touche(c);
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => self.evalue(),
                    egui::Key::Backspace => self.efface_dernier(),
                    egui::Key::Escape => self.efface_tout(),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let resp = ui
                .add_sized([56.0, 26.0], egui::Button::new(self.mode.libelle()))
                .on_hover_text("Bascule degrés / radians");
            if resp.clicked() {
                self.bascule_mode();
            }

            let theme = if self.sombre { "Clair" } else { "Sombre" };
            if ui.button(theme).on_hover_text("Thème").clicked() {
                self.bascule_theme();
                self.applique_theme(ui.ctx());
            }

            ui.toggle_value(&mut self.historique_visible, "Historique");
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        let texte = if self.affichage().is_empty() {
            "0"
        } else {
            self.affichage()
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width(), 40.0),
                    egui::Layout::right_to_left(egui::Align::Center),
                    |ui| {
                        ui.label(egui::RichText::new(texte).monospace().size(26.0));
                    },
                );
            });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        use Touche::*;

        let lignes: [[(&str, Touche); 5]; 7] = [
            [
                ("sin", Fonc(Fonction::Sin)),
                ("cos", Fonc(Fonction::Cos)),
                ("tan", Fonc(Fonction::Tan)),
                ("log", Fonc(Fonction::Log)),
                ("ln", Fonc(Fonction::Ln)),
            ],
            [
                ("sqrt", Fonc(Fonction::Sqrt)),
                ("10^x", Fonc(Fonction::Pow10)),
                ("x^y", Puissance),
                ("n!", Factorielle),
                ("mod", Modulo),
            ],
            [
                ("(", Ouvre),
                (")", Ferme),
                ("PI", Constante("PI")),
                ("EPS", Constante("EPS")),
                ("+/-", Signe),
            ],
            [
                ("7", Chiffre('7')),
                ("8", Chiffre('8')),
                ("9", Chiffre('9')),
                ("/", Operateur('/')),
                ("DEL", Efface),
            ],
            [
                ("4", Chiffre('4')),
                ("5", Chiffre('5')),
                ("6", Chiffre('6')),
                ("×", Operateur('×')),
                ("C", EffaceTout),
            ],
            [
                ("1", Chiffre('1')),
                ("2", Chiffre('2')),
                ("3", Chiffre('3')),
                ("-", Operateur('-')),
                ("=", Egal),
            ],
            [
                ("0", Chiffre('0')),
                (".", Chiffre('.')),
                ("+", Operateur('+')),
                ("", Aucune),
                ("", Aucune),
            ],
        ];

        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in lignes {
                    for (label, touche) in ligne {
                        self.bouton(ui, label, touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche) {
        if matches!(touche, Touche::Aucune) {
            ui.label("");
            return;
        }

        let resp = ui.add_sized([58.0, 34.0], egui::Button::new(label));
        if resp.clicked() {
            self.applique(touche);
        }
    }

    fn applique(&mut self, touche: Touche) {
        match touche {
            Touche::Chiffre(c) => self.ajoute_chiffre(c),
            Touche::Operateur(op) => self.ajoute_operateur(op),
            Touche::Ouvre => self.ouvre_parenthese(),
            Touche::Ferme => self.ferme_parenthese(),
            Touche::Fonc(f) => self.ajoute_fonction(f),
            Touche::Constante(nom) => self.ajoute_constante(nom),
            Touche::Puissance => self.ajoute_puissance(),
            Touche::Factorielle => self.ajoute_factorielle(),
            Touche::Modulo => self.ajoute_modulo(),
            Touche::Signe => self.inverse_signe(),
            Touche::Efface => self.efface_dernier(),
            Touche::EffaceTout => self.efface_tout(),
            Touche::Egal => self.evalue(),
            Touche::Aucune => {}
        }
    }

    /// Panneau latéral : clic = rejouer l’expression.
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.heading("Historique");
        ui.add_space(4.0);

        if self.historique.est_vide() {
            ui.label("Aucun calcul");
            return;
        }

        if ui.button("Effacer l’historique").clicked() {
            self.historique.vide();
            return;
        }

        ui.separator();

        let mut choisi = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, e) in self.historique.entrees().iter().enumerate() {
                    let texte = format!("{}\n= {}", e.expression, e.resultat);
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()))
                        .on_hover_text("Rejouer");
                    if resp.clicked() {
                        choisi = Some(i);
                    }
                }
            });

        if let Some(i) = choisi {
            self.rejoue(i);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                let d = &self.demarche;
                Self::champ_demarche(ui, "Canon", "demarche_canon", &d.canon);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                Self::champ_demarche(ui, "Étapes", "demarche_etapes", &d.etapes);
                Self::champ_demarche(ui, "Note", "demarche_note", &d.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        let rows = contenu.lines().count().max(1);
        Self::champ_monospace(ui, id, contenu, rows);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}

#[derive(Clone, Copy, Debug)]
enum Touche {
    Chiffre(char),
    Operateur(char),
    Ouvre,
    Ferme,
    Fonc(Fonction),
    Constante(&'static str),
    Puissance,
    Factorielle,
    Modulo,
    Signe,
    Efface,
    EffaceTout,
    Egal,
    Aucune,
}
