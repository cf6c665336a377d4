// src/noyau/format.rs

use super::expr::{Etape, Expr};

/// Chiffres significatifs pour un résultat non entier.
pub const CHIFFRES_SIGNIFICATIFS: usize = 3;

/* ------------------------ Résultat (affichage) ------------------------ */

/// Rend une valeur finie pour l’écran:
/// - entier  -> chiffres seuls, sans ".0" ni exposant (−0 -> "0")
/// - sinon   -> CHIFFRES_SIGNIFICATIFS chiffres significatifs
pub fn format_resultat(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    if v.fract() == 0.0 {
        // Display f64 n’utilise jamais d’exposant : se relit à l’identique
        return format!("{v}");
    }
    format_significatif(v, CHIFFRES_SIGNIFICATIFS)
}

/// `chiffres` chiffres significatifs, à la manière de toPrecision:
/// - notation fixe si l’exposant décimal e vérifie -6 <= e < chiffres (0.500, 12.3)
/// - notation scientifique sinon (1.23e+3, 1.50e-7)
pub fn format_significatif(v: f64, chiffres: usize) -> String {
    let p = chiffres.max(1);

    // exposant APRÈS arrondi (9.996 -> 1.00e1)
    let sci = format!("{:.*e}", p - 1, v);
    let (mantisse, exp) = match sci.split_once('e') {
        Some(m) => m,
        None => return sci,
    };
    let e: i32 = match exp.parse() {
        Ok(e) => e,
        Err(_) => return sci,
    };

    if e < -6 || e >= p as i32 {
        let signe = if e < 0 { '-' } else { '+' };
        format!("{mantisse}e{signe}{}", e.abs())
    } else {
        let decimales = (p as i32 - 1 - e) as usize;
        format!("{:.*}", decimales, v)
    }
}

/* ------------------------ Démarche ------------------------ */

/// Formate l’AST, parenthèses explicites sur chaque sous-opération.
pub fn format_expr_pretty(e: &Expr) -> String {
    pretty(e, true)
}

fn pretty(e: &Expr, racine: bool) -> String {
    use Expr::*;

    match e {
        Nombre(v) => v.to_string(),

        Binaire(op, a, b) => {
            let s = format!("{}{}{}", pretty(a, false), op.symbole(), pretty(b, false));
            if racine {
                s
            } else {
                format!("({s})")
            }
        }

        Neg(x) => {
            let s = format!("-{}", pretty(x, false));
            if racine {
                s
            } else {
                format!("({s})")
            }
        }

        Appel(f, x) => format!("{}({})", f.nom(), pretty(x, true)),

        Factorielle(x) => format!("{}!", pretty(x, false)),
    }
}

/// Une ligne par étape, dans l’ordre de résolution.
pub fn format_etapes(etapes: &[Etape]) -> String {
    etapes
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
