// src/app.rs
//
// Calculatrice scientifique : module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + historique.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Persistance (eframe "persistence") : historique, mode d’angle, thème
//
// Le clavier est capté dans vue.rs (capture_clavier), une seule fois par frame.

pub mod etat;
pub mod historique;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;
use tracing::debug;

/// Clés de stockage (fichier natif / localStorage web).
const CLE_HISTORIQUE: &str = "calculatrice.historique";
const CLE_MODE: &str = "calculatrice.mode";
const CLE_SOMBRE: &str = "calculatrice.sombre";

impl AppCalc {
    /// Construit l’app en relisant l’état persisté (s’il existe).
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();

        if let Some(storage) = cc.storage {
            if let Some(h) = eframe::get_value(storage, CLE_HISTORIQUE) {
                app.historique = h;
            }
            if let Some(m) = eframe::get_value(storage, CLE_MODE) {
                app.mode = m;
            }
            if let Some(s) = eframe::get_value(storage, CLE_SOMBRE) {
                app.sombre = s;
            }
        }

        debug!(
            historique = app.historique.entrees().len(),
            mode = app.mode.libelle(),
            sombre = app.sombre,
            "état restauré"
        );
        app.applique_theme(&cc.egui_ctx);
        app
    }

    /// Visuels egui alignés sur `sombre` (seulement si différents).
    pub fn applique_theme(&self, ctx: &egui::Context) {
        if ctx.style().visuals.dark_mode != self.sombre {
            ctx.set_visuals(if self.sombre {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.capture_clavier(ctx);
        self.applique_theme(ctx);

        if self.historique_visible {
            egui::SidePanel::right("panneau_historique")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| {
                    self.ui_historique(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CLE_HISTORIQUE, &self.historique);
        eframe::set_value(storage, CLE_MODE, &self.mode);
        eframe::set_value(storage, CLE_SOMBRE, &self.sombre);
    }
}
