//! Noyau de calcul (flottants)
//!
//! Organisation interne :
//! - canon.rs     : forme canonique du texte + multiplication implicite (saisie)
//! - jetons.rs    : tokenisation
//! - analyse.rs   : descente récursive -> Expr (précédence, associativité)
//! - expr.rs      : AST + évaluation post-ordre (fonctions internes d’abord)
//! - fonctions.rs : bibliothèque à domaine vérifié (log, √, n!, mod, 10^x, trig)
//! - trig.rs      : mode d’angle + angles remarquables en degrés
//! - format.rs    : affichage du résultat + démarche
//! - erreur.rs    : Syntaxe / Domaine / Numerique
//! - eval.rs      : pipeline complet

pub mod analyse;
pub mod canon;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::eval_expression;
pub use trig::ModeAngle;
