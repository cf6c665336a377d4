// src/noyau/trig.rs
//
// Trig : mode d’angle + angles remarquables (en degrés)
// -----------------------------------------------------
// - ModeAngle : degrés / radians, possédé par l’appelant (UI), persisté
// - Réduction modulo 360° d’un angle ENTIER en degrés
// - Table sur les multiples de 30° et 45° : sin 180° = 0 (et pas 1.2e-16),
//   tan 90° / 270° indéfinie
//
// Hors table : on rend None, l’appelant convertit en radians.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::erreur::ErreurDomaine;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    /// Angle saisi -> radians (identité en mode radians).
    pub fn en_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x * PI / 180.0,
            ModeAngle::Radians => x,
        }
    }

    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

/// Reconnaît les angles remarquables (en degrés).
///
/// Retour:
/// - Some(Ok(v))  si reconnu
/// - Some(Err(TangenteIndefinie)) pour tan(90° + k·180°)
/// - None si non reconnu (angle non entier, ou pas multiple de 30°/45°)
pub fn trig_degres(f: TrigFn, deg: f64) -> Option<Result<f64, ErreurDomaine>> {
    if !deg.is_finite() || deg.fract() != 0.0 {
        return None;
    }

    // rem_euclid exact sur un flottant entier ; résultat dans [0, 360)
    let a = deg.rem_euclid(360.0) as i64;

    let r3_2 = 3f64.sqrt() / 2.0;
    let r2_2 = 2f64.sqrt() / 2.0;
    let r3 = 3f64.sqrt();
    let r3_3 = 3f64.sqrt() / 3.0;

    // (sin, cos, tan) ; tan None = indéfinie
    let (s, c, t) = match a {
        0 => (0.0, 1.0, Some(0.0)),
        30 => (0.5, r3_2, Some(r3_3)),
        45 => (r2_2, r2_2, Some(1.0)),
        60 => (r3_2, 0.5, Some(r3)),
        90 => (1.0, 0.0, None),
        120 => (r3_2, -0.5, Some(-r3)),
        135 => (r2_2, -r2_2, Some(-1.0)),
        150 => (0.5, -r3_2, Some(-r3_3)),
        180 => (0.0, -1.0, Some(0.0)),
        210 => (-0.5, -r3_2, Some(r3_3)),
        225 => (-r2_2, -r2_2, Some(1.0)),
        240 => (-r3_2, -0.5, Some(r3)),
        270 => (-1.0, 0.0, None),
        300 => (-r3_2, 0.5, Some(-r3)),
        315 => (-r2_2, r2_2, Some(-1.0)),
        330 => (-0.5, r3_2, Some(-r3_3)),
        _ => return None,
    };

    Some(match f {
        TrigFn::Sin => Ok(s),
        TrigFn::Cos => Ok(c),
        TrigFn::Tan => t.ok_or(ErreurDomaine::TangenteIndefinie),
    })
}
