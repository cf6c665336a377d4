//! src/app/historique.rs
//!
//! Historique des calculs réussis (plus récent en tête).
//!
//! - borné à HISTORIQUE_MAX entrées (la plus ancienne tombe)
//! - une expression qui n’est qu’un entier (ex. "42") n’est pas retenue
//! - sérialisable (serde) : persisté par eframe entre deux sessions

use serde::{Deserialize, Serialize};

/// Nombre maximal d’entrées conservées.
pub const HISTORIQUE_MAX: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
}

/// Vrai si l’expression n’est qu’une suite de chiffres (rien à retenir).
fn est_entier_nu(expression: &str) -> bool {
    !expression.is_empty() && expression.chars().all(|c| c.is_ascii_digit())
}

impl Historique {
    /// Ajoute un calcul en tête. Retourne false si l’expression est ignorée.
    pub fn ajoute(&mut self, expression: &str, resultat: &str) -> bool {
        if est_entier_nu(expression) {
            return false;
        }

        self.entrees.insert(
            0,
            EntreeHistorique {
                expression: expression.to_string(),
                resultat: resultat.to_string(),
            },
        );
        self.entrees.truncate(HISTORIQUE_MAX);
        true
    }

    pub fn vide(&mut self) {
        self.entrees.clear();
    }

    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn est_vide(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Expression à rejouer dans l’entrée pour l’index donné.
    pub fn rejoue(&self, index: usize) -> Option<&str> {
        self.entrees.get(index).map(|e| e.expression.as_str())
    }
}
