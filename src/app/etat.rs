//! src/app/etat.rs
//!
//! État UI (sans vue) : entrée, écran, mode d’angle, thème, historique.
//!
//! Rôle : construire l’expression touche par touche (règles de saisie)
//! puis la confier au noyau. Aucune logique d’affichage ici.
//!
//! Contrats :
//! - L’entrée n’est jamais détruite par une erreur : l’écran montre
//!   SENTINELLE jusqu’à la touche suivante, qui restaure l’expression
//!   intacte puis s’y applique.
//! - Multiplication implicite à la saisie seulement (canon::ajoute_jeton).
//! - Toutes les actions sont déterministes et testables sans egui.

use tracing::{debug, info, warn};

use super::historique::Historique;
use crate::noyau::canon::{ajoute_jeton, est_operateur, CONSTANTES, MUL_AFFICHAGE};
use crate::noyau::eval::DemarcheNoyau;
use crate::noyau::fonctions::Fonction;
use crate::noyau::{eval_expression, ModeAngle};

/// Texte affiché à la place de l’entrée après un échec.
pub const SENTINELLE: &str = "Opération invalide";

/// Motifs retirés d’un bloc par efface_dernier().
const MOTIFS_BLOC: [&str; 9] = [
    "pow10(", "sqrt(", "sin(", "cos(", "tan(", "log(", "ln(", "EPS", "PI",
];

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- échec de la dernière évaluation ---
    pub invalide: bool,  // SENTINELLE à l’écran
    pub erreur: String,  // message détaillé (sous l’écran)

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres persistés ---
    pub mode: ModeAngle,
    pub sombre: bool,
    pub historique: Historique,

    // --- UX ---
    pub historique_visible: bool,
}

impl AppCalc {
    /// Ce que l’écran doit montrer.
    pub fn affichage(&self) -> &str {
        if self.invalide {
            SENTINELLE
        } else {
            &self.entree
        }
    }

    /// Touche suivant un échec : l’expression conservée redevient visible.
    fn restaure(&mut self) {
        if self.invalide {
            self.invalide = false;
            self.erreur.clear();
        }
    }

    fn dernier(&self) -> Option<char> {
        self.entree.chars().last()
    }

    /// Vrai si l’entrée se termine par un opérande (ni opérateur, ni '(').
    fn fin_operande(&self) -> bool {
        match self.dernier() {
            Some(c) => !est_operateur(c) && c != '(',
            None => false,
        }
    }

    /* ------------------------ Saisie ------------------------ */

    /// Chiffre ou point décimal.
    pub fn ajoute_chiffre(&mut self, c: char) {
        self.restaure();
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }

        // pas de chiffre collé à une constante
        if CONSTANTES.iter().any(|(nom, _)| self.entree.ends_with(nom)) {
            return;
        }

        if c == '.' {
            let nombre = self
                .entree
                .rsplit(|x: char| est_operateur(x) || x == '(' || x == ')')
                .next()
                .unwrap_or("");
            if nombre.contains('.') {
                return;
            }
        }

        self.entree.push(c);
    }

    /// + − × / : ignoré sur entrée vide, remplace un opérateur final.
    pub fn ajoute_operateur(&mut self, op: char) {
        self.restaure();
        let op = match op {
            '*' => MUL_AFFICHAGE,
            '+' | '-' | '×' | '/' => op,
            _ => return,
        };
        if self.entree.is_empty() {
            return;
        }

        if self.dernier().is_some_and(est_operateur) {
            self.entree.pop();
        }
        self.entree.push(op);
    }

    pub fn ouvre_parenthese(&mut self) {
        self.restaure();
        ajoute_jeton(&mut self.entree, "(");
    }

    /// ')' seulement s’il reste une parenthèse ouverte.
    pub fn ferme_parenthese(&mut self) {
        self.restaure();
        let ouvertes = self.entree.matches('(').count();
        let fermees = self.entree.matches(')').count();
        if ouvertes > fermees {
            self.entree.push(')');
        }
    }

    pub fn ajoute_fonction(&mut self, f: Fonction) {
        self.restaure();
        ajoute_jeton(&mut self.entree, &format!("{}(", f.nom()));
    }

    /// PI ou EPS (autre nom ignoré).
    pub fn ajoute_constante(&mut self, nom: &str) {
        self.restaure();
        if CONSTANTES.iter().any(|(n, _)| *n == nom) {
            ajoute_jeton(&mut self.entree, nom);
        }
    }

    /// x^y : ouvre l’exposant après un opérande.
    pub fn ajoute_puissance(&mut self) {
        self.restaure();
        if self.fin_operande() {
            self.entree.push_str("^(");
        }
    }

    /// n! : après un nombre ou un groupe parenthésé.
    pub fn ajoute_factorielle(&mut self) {
        self.restaure();
        if self.dernier().is_some_and(|c| c.is_ascii_digit() || c == ')') {
            self.entree.push('!');
        }
    }

    pub fn ajoute_modulo(&mut self) {
        self.restaure();
        if self.fin_operande() {
            self.entree.push('%');
        }
    }

    /// ± : inverse le signe du dernier nombre.
    pub fn inverse_signe(&mut self) {
        self.restaure();
        let debut = match debut_dernier_nombre(&self.entree) {
            Some(i) => i,
            None => return,
        };

        let avant: Vec<char> = self.entree[..debut].chars().rev().take(2).collect();
        let deja_negatif = match avant.as_slice() {
            ['-'] => true,
            ['-', c] => est_operateur(*c) || *c == '(',
            _ => false,
        };

        if deja_negatif {
            self.entree.remove(debut - 1);
        } else {
            self.entree.insert(debut, '-');
        }
    }

    /// Retour arrière : un nom de fonction ou de constante part d’un bloc.
    pub fn efface_dernier(&mut self) {
        self.restaure();
        for motif in MOTIFS_BLOC {
            if let Some(reste) = self.entree.strip_suffix(motif) {
                let n = reste.len();
                self.entree.truncate(n);
                return;
            }
        }
        self.entree.pop();
    }

    /// C : tout effacer (entrée, erreur, démarche).
    pub fn efface_tout(&mut self) {
        self.entree.clear();
        self.invalide = false;
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
    }

    /// Caractère venu du clavier physique.
    pub fn touche(&mut self, c: char) {
        match c {
            '0'..='9' | '.' => self.ajoute_chiffre(c),
            '+' | '-' | '*' | '/' => self.ajoute_operateur(c),
            '(' => self.ouvre_parenthese(),
            ')' => self.ferme_parenthese(),
            '=' => self.evalue(),
            _ => {}
        }
    }

    /* ------------------------ Évaluation ------------------------ */

    /// = : évalue via le noyau. Succès : le résultat remplace l’entrée et
    /// rejoint l’historique. Échec : entrée conservée, SENTINELLE à l’écran.
    pub fn evalue(&mut self) {
        self.restaure();
        let expression = self.entree.trim().to_string();
        if expression.is_empty() {
            return;
        }

        match eval_expression(&expression, self.mode) {
            Ok(ev) => {
                debug!(%expression, resultat = %ev.affichage, "calcul");
                self.historique.ajoute(&expression, &ev.affichage);
                self.entree = ev.affichage;
                self.demarche = ev.demarche;
            }
            Err(e) => {
                warn!(%expression, erreur = %e, "évaluation refusée");
                self.invalide = true;
                self.erreur = e.to_string();
                self.demarche = DemarcheNoyau::default();
            }
        }
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn bascule_mode(&mut self) {
        self.mode = self.mode.bascule();
        info!(mode = self.mode.libelle(), "mode d’angle");
    }

    pub fn bascule_theme(&mut self) {
        self.sombre = !self.sombre;
        info!(sombre = self.sombre, "thème");
    }

    /// Clic sur une entrée d’historique : l’expression revient dans l’entrée.
    pub fn rejoue(&mut self, index: usize) {
        if let Some(expr) = self.historique.rejoue(index) {
            self.entree = expr.to_string();
            self.invalide = false;
            self.erreur.clear();
        }
    }
}

/// Index (octets) du premier caractère du nombre final, s’il y en a un.
fn debut_dernier_nombre(s: &str) -> Option<usize> {
    let mut debut = None;
    for (i, c) in s.char_indices().rev() {
        if c.is_ascii_digit() || c == '.' {
            debut = Some(i);
        } else {
            break;
        }
    }
    debut
}
