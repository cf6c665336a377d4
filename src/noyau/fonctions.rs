// src/noyau/fonctions.rs
//
// Bibliothèque de fonctions (flottants, domaine vérifié)
// ------------------------------------------------------
// Chaque opération reçoit des opérandes DÉJÀ évalués et renvoie
// soit une valeur, soit une ErreurDomaine. Aucune ne “corrige” un argument.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use super::erreur::ErreurDomaine;
use super::trig::{trig_degres, ModeAngle, TrigFn};

/// tan indéfinie si |cos(x)| est sous ce seuil.
pub const SEUIL_COS_TAN: f64 = 1e-10;

/// Plus grand n accepté par n!.
pub const FACTORIELLE_MAX: f64 = 100.0;

/// Garde-fou 10^x (au-delà : débordement double précision).
pub const EXPOSANT_MAX: f64 = 308.0;

/// Fonctions nommées (appel avec parenthèses : `nom(argument)`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Pow10,
}

impl Fonction {
    /// Identifiant texte -> fonction (noms déjà en minuscules).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Some(match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "log" => Fonction::Log,
            "ln" => Fonction::Ln,
            "sqrt" => Fonction::Sqrt,
            "pow10" => Fonction::Pow10,
            _ => return None,
        })
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "sqrt",
            Fonction::Pow10 => "pow10",
        }
    }

    /// Applique la fonction à un argument évalué.
    /// Trig : en mode degrés, table exacte puis conversion en radians.
    pub fn appliquer(self, x: f64, mode: ModeAngle) -> Result<f64, ErreurDomaine> {
        match self {
            Fonction::Sin => trig(TrigFn::Sin, x, mode),
            Fonction::Cos => trig(TrigFn::Cos, x, mode),
            Fonction::Tan => trig(TrigFn::Tan, x, mode),
            Fonction::Log => log10(x),
            Fonction::Ln => ln(x),
            Fonction::Sqrt => racine(x),
            Fonction::Pow10 => puissance_dix(x),
        }
    }
}

fn trig(f: TrigFn, x: f64, mode: ModeAngle) -> Result<f64, ErreurDomaine> {
    if mode == ModeAngle::Degres {
        if let Some(v) = trig_degres(f, x) {
            return v;
        }
    }

    let rad = mode.en_radians(x);
    match f {
        TrigFn::Sin => Ok(sinus(rad)),
        TrigFn::Cos => Ok(cosinus(rad)),
        TrigFn::Tan => tangente(rad),
    }
}

/* ------------------------ Trigonométrie (radians) ------------------------ */

pub fn sinus(rad: f64) -> f64 {
    rad.sin()
}

pub fn cosinus(rad: f64) -> f64 {
    rad.cos()
}

pub fn tangente(rad: f64) -> Result<f64, ErreurDomaine> {
    if rad.cos().abs() < SEUIL_COS_TAN {
        return Err(ErreurDomaine::TangenteIndefinie);
    }
    Ok(rad.tan())
}

/* ------------------------ Logarithmes ------------------------ */

pub fn log10(x: f64) -> Result<f64, ErreurDomaine> {
    if x <= 0.0 || x.is_nan() {
        return Err(ErreurDomaine::LogarithmeNonPositif);
    }
    Ok(x.log10())
}

pub fn ln(x: f64) -> Result<f64, ErreurDomaine> {
    if x <= 0.0 || x.is_nan() {
        return Err(ErreurDomaine::LogarithmeNonPositif);
    }
    Ok(x.ln())
}

/* ------------------------ Racine, puissance de 10 ------------------------ */

pub fn racine(x: f64) -> Result<f64, ErreurDomaine> {
    if x < 0.0 {
        return Err(ErreurDomaine::RacineNegative);
    }
    Ok(x.sqrt())
}

pub fn puissance_dix(x: f64) -> Result<f64, ErreurDomaine> {
    if x.abs() > EXPOSANT_MAX {
        return Err(ErreurDomaine::ExposantTropGrand);
    }
    Ok(10f64.powf(x))
}

/* ------------------------ Factorielle, modulo ------------------------ */

/// n! pour n entier dans [0, 100].
/// Produit entier exact (BigUint), puis UN seul arrondi vers f64.
pub fn factorielle(x: f64) -> Result<f64, ErreurDomaine> {
    if x < 0.0 {
        return Err(ErreurDomaine::FactorielleNegative);
    }
    if x.fract() != 0.0 {
        return Err(ErreurDomaine::FactorielleNonEntiere);
    }
    if x > FACTORIELLE_MAX {
        return Err(ErreurDomaine::FactorielleTropGrande);
    }

    let n = x as u32;
    let produit: BigUint = (2..=n).map(BigUint::from).product();
    produit
        .to_f64()
        .ok_or(ErreurDomaine::FactorielleTropGrande)
}

/// Reste flottant (signe du dividende), comme fmod.
pub fn modulo(a: f64, b: f64) -> Result<f64, ErreurDomaine> {
    if b == 0.0 {
        return Err(ErreurDomaine::ModuloParZero);
    }
    Ok(a % b)
}
