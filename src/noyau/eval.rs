//! Noyau : évaluation (pipeline réel)
//!
//! canon -> jetons -> analyse (AST, une fois) -> évaluation post-ordre -> format
//!
//! Fonction pure : (texte, mode d’angle) -> valeur + affichage, ou erreur.
//! Le texte reçu n’est jamais modifié ; une erreur à n’importe quelle
//! profondeur interrompt tout (pas de résultat partiel).

use tracing::debug;

use super::analyse::analyse;
use super::canon::normalise;
use super::erreur::ErreurCalcul;
use super::expr::Etape;
use super::format::{format_etapes, format_expr_pretty, format_resultat};
use super::jetons::{format_tokens, tokenize};
use super::trig::ModeAngle;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub canon: String,
    pub jetons: String,
    pub arbre: String,
    pub etapes: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct Evaluation {
    pub valeur: f64,
    pub affichage: String,
    /// Applications de fonctions, dans l’ordre de résolution (intérieur d’abord).
    pub etapes: Vec<Etape>,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue une expression et retourne valeur, affichage et démarche.
pub fn eval_expression(expr_str: &str, mode: ModeAngle) -> Result<Evaluation, ErreurCalcul> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("Entrée vide"));
    }

    // 1) Forme canonique (glyphes, constantes)
    let canon = normalise(s);

    // 2) Jetons
    let jetons = tokenize(&canon)?;
    let jetons_txt = format_tokens(&jetons);

    // 3) AST (parenthèses vérifiées avant la descente)
    let arbre = analyse(&jetons)?;

    // 4) Évaluation : fonctions internes d’abord, valeurs finies seulement
    let mut etapes = Vec::new();
    let valeur = arbre.valeur(mode, &mut etapes)?;

    // 5) Affichage
    let affichage = format_resultat(valeur);
    debug!(
        entree = s,
        %canon,
        noeuds = arbre.taille(),
        valeur,
        %affichage,
        ?mode,
        "évaluation"
    );

    let demarche = DemarcheNoyau {
        canon,
        jetons: jetons_txt,
        arbre: format_expr_pretty(&arbre),
        etapes: format_etapes(&etapes),
        note: format!(
            "Pipeline: canon → jetons → AST → évaluation ({}) → affichage.",
            mode.libelle()
        ),
    };

    Ok(Evaluation {
        valeur,
        affichage,
        etapes,
        demarche,
    })
}

/// Raccourci (campagnes de tests) : seulement la valeur.
#[cfg(test)]
pub fn evaluer(expr_str: &str, mode: ModeAngle) -> Result<f64, ErreurCalcul> {
    eval_expression(expr_str, mode).map(|e| e.valeur)
}
