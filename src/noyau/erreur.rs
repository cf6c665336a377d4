// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - Syntaxe   : entrée vide, parenthèses, suite d’opérateurs invalide
// - Domaine   : argument hors domaine d’une fonction (√-1, 0!, log 0…)
// - Numerique : valeur non finie (débordement, NaN, division par zéro)
//
// Toute erreur, à n’importe quelle profondeur, interrompt l’évaluation entière.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("erreur de domaine : {0}")]
    Domaine(#[from] ErreurDomaine),

    #[error("erreur numérique : {0}")]
    Numerique(#[from] ErreurNumerique),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurDomaine {
    #[error("tangente indéfinie")]
    TangenteIndefinie,

    #[error("logarithme d’un nombre négatif ou nul")]
    LogarithmeNonPositif,

    #[error("racine carrée d’un nombre négatif")]
    RacineNegative,

    #[error("factorielle d’un nombre négatif")]
    FactorielleNegative,

    #[error("factorielle d’un nombre non entier")]
    FactorielleNonEntiere,

    #[error("factorielle trop grande (max 100)")]
    FactorielleTropGrande,

    #[error("modulo : division par zéro")]
    ModuloParZero,

    #[error("exposant trop grand")]
    ExposantTropGrand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurNumerique {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    NonFini,
}

impl ErreurCalcul {
    /// Raccourci : erreur de syntaxe avec message.
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::Syntaxe(msg.into())
    }
}
