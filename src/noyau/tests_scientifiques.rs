//! Tests scientifiques (campagne) : propriétés attendues de l’évaluateur.
//!
//! - précédence / associativité (choix fixé : ^ à droite)
//! - domaines des fonctions (n!, √, log, mod, 10^x, tan)
//! - résolution intérieur d’abord (étapes instrumentées)
//! - affichage : entier sans décimales, 3 chiffres significatifs sinon
//! - entrées malformées : jamais de valeur “par défaut”
//!
//! Choix documentés :
//! - 2/0 -> Numerique(DivisionParZero) (détecté avant de produire l’infini)
//! - angles en degrés par défaut

use std::time::{Duration, Instant};

use super::erreur::{ErreurCalcul, ErreurDomaine, ErreurNumerique};
use super::eval::{eval_expression, evaluer};
use super::expr::Etape;
use super::fonctions::Fonction;
use super::format::format_resultat;
use super::trig::ModeAngle;

const DEG: ModeAngle = ModeAngle::Degres;
const RAD: ModeAngle = ModeAngle::Radians;

fn val(expr: &str, mode: ModeAngle) -> f64 {
    evaluer(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64) {
    let v = val(expr, mode);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} v={v} attendu={attendu}"
    );
}

fn assert_domaine(expr: &str, mode: ModeAngle, attendu: ErreurDomaine) {
    assert_eq!(
        evaluer(expr, mode),
        Err(ErreurCalcul::Domaine(attendu)),
        "expr={expr:?}"
    );
}

fn assert_syntaxe(expr: &str) {
    assert!(
        matches!(evaluer(expr, DEG), Err(ErreurCalcul::Syntaxe(_))),
        "expr={expr:?} devrait être une erreur de syntaxe, obtenu {:?}",
        evaluer(expr, DEG)
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn sci_precedence() {
    assert_eq!(val("2+3*4", DEG), 14.0);
    assert_eq!(val("(2+3)*4", DEG), 20.0);
    assert_eq!(val("10-4-3", DEG), 3.0);
    assert_eq!(val("64/4/2", DEG), 8.0);
    assert_eq!(val("2*3^2", DEG), 18.0);
}

#[test]
fn sci_puissance_associative_a_droite() {
    assert_eq!(val("2^3^2", DEG), 512.0);
    assert_eq!(val("(2^3)^2", DEG), 64.0);
}

#[test]
fn sci_moins_unaire() {
    assert_eq!(val("-2^2", DEG), -4.0);
    assert_eq!(val("(-2)^2", DEG), 4.0);
    assert_eq!(val("2^-1", DEG), 0.5);
    assert_eq!(val("3--2", DEG), 5.0);
    assert_eq!(val("-(1+2)*3", DEG), -9.0);
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle() {
    assert_eq!(val("5!", DEG), 120.0);
    assert_eq!(val("0!", DEG), 1.0);
    assert_eq!(val("(2+1)!", DEG), 6.0);
    assert_eq!(val("3!!", DEG), 720.0);
    assert_eq!(val("2^3!", DEG), 64.0);

    assert_domaine("(-1)!", DEG, ErreurDomaine::FactorielleNegative);
    assert_domaine("101!", DEG, ErreurDomaine::FactorielleTropGrande);
    assert_domaine("2.5!", DEG, ErreurDomaine::FactorielleNonEntiere);

    // -1! = -(1!) : le postfixe lie plus fort que le moins unaire
    assert_eq!(val("-1!", DEG), -1.0);
}

/* ------------------------ Racine, logs, 10^x, modulo ------------------------ */

#[test]
fn sci_racine() {
    assert_eq!(val("sqrt(9)", DEG), 3.0);
    assert_eq!(val("√(16)", DEG), 4.0);
    assert_domaine("sqrt(-1)", DEG, ErreurDomaine::RacineNegative);
}

#[test]
fn sci_logarithmes() {
    assert_proche("log(1000)", DEG, 3.0);
    assert_proche("ln(EPS^2)", DEG, 2.0);
    assert_domaine("log(0)", DEG, ErreurDomaine::LogarithmeNonPositif);
    assert_domaine("ln(-5)", DEG, ErreurDomaine::LogarithmeNonPositif);
}

#[test]
fn sci_puissance_de_dix() {
    assert_eq!(val("pow10(2)", DEG), 100.0);
    assert_domaine("pow10(309)", DEG, ErreurDomaine::ExposantTropGrand);

    let e = evaluer("pow10(309)", DEG).unwrap_err();
    assert!(e.to_string().contains("exposant trop grand"));
}

#[test]
fn sci_modulo() {
    assert_eq!(val("10%3", DEG), 1.0);
    assert_eq!(val("2+7%3", DEG), 3.0);
    assert_eq!(val("2*7%3", DEG), 2.0);
    assert_eq!(val("(4+6)%4", DEG), 2.0);
    assert_domaine("10%0", DEG, ErreurDomaine::ModuloParZero);
}

#[test]
fn sci_modulo_avant_puissance() {
    // le modulo prend ses opérandes adjacents avant toute autre opération
    assert_eq!(val("2^3%3", DEG), 1.0);
    assert_eq!(val("10%2^2", DEG), 0.0);
    assert_eq!(val("10%3^2", DEG), 1.0);
    assert_eq!(val("-7%3", DEG), -1.0);
    assert_domaine("2^3%0", DEG, ErreurDomaine::ModuloParZero);
}

#[test]
fn sci_plus_unaire() {
    assert_eq!(val("(+2)", DEG), 2.0);
    assert_eq!(val("2×(+3)", DEG), 6.0);
    assert_eq!(val("2++3", DEG), 5.0);
    assert_syntaxe("(+)");
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_trig_degres() {
    assert_proche("sin(90)", DEG, 1.0);
    assert_eq!(val("sin(180)", DEG), 0.0);
    assert_eq!(val("cos(60)", DEG), 0.5);
    assert_proche("tan(45)", DEG, 1.0);
    assert_proche("sin(10)", DEG, (10f64).to_radians().sin());
    assert_domaine("tan(90)", DEG, ErreurDomaine::TangenteIndefinie);
    assert_domaine("tan(270)", DEG, ErreurDomaine::TangenteIndefinie);
}

#[test]
fn sci_trig_radians() {
    assert_proche("sin(PI/2)", RAD, 1.0);
    assert_proche("cos(PI)", RAD, -1.0);
    assert_domaine("tan(PI/2)", RAD, ErreurDomaine::TangenteIndefinie);
    // 90 radians n’est pas une asymptote
    assert!(evaluer("tan(90)", RAD).is_ok());
}

#[test]
fn sci_mode_change_le_resultat() {
    let d = val("sin(30)", DEG);
    let r = val("sin(30)", RAD);
    assert_eq!(d, 0.5);
    assert!((r - 30f64.sin()).abs() < 1e-12);
}

/* ------------------------ Résolution intérieur d’abord ------------------------ */

#[test]
fn sci_resolution_interieur_d_abord() {
    let ev = eval_expression("sin(cos(0))", RAD).unwrap();
    assert_eq!(ev.etapes.len(), 2);

    // cos(0) = 1 est résolu AVANT que sin soit tenté, et sin reçoit 1
    match (&ev.etapes[0], &ev.etapes[1]) {
        (
            Etape::Appel {
                fonction: Fonction::Cos,
                argument: a0,
                resultat: r0,
            },
            Etape::Appel {
                fonction: Fonction::Sin,
                argument: a1,
                ..
            },
        ) => {
            assert_eq!(*a0, 0.0);
            assert_eq!(*r0, 1.0);
            assert_eq!(*a1, 1.0);
        }
        autre => panic!("ordre inattendu: {autre:?}"),
    }
    assert!((ev.valeur - 1f64.sin()).abs() < 1e-15);
}

#[test]
fn sci_resolution_profonde_ordre_total() {
    // sqrt(log(pow10(4))) : pow10 -> log -> sqrt
    let ev = eval_expression("sqrt(log(pow10(4)))", DEG).unwrap();
    let ordre: Vec<Fonction> = ev
        .etapes
        .iter()
        .filter_map(|e| match e {
            Etape::Appel { fonction, .. } => Some(*fonction),
            _ => None,
        })
        .collect();
    assert_eq!(ordre, vec![Fonction::Pow10, Fonction::Log, Fonction::Sqrt]);
    assert!((ev.valeur - 2.0).abs() < 1e-12);
}

#[test]
fn sci_erreur_interne_sans_resultat_partiel() {
    // l’erreur du sqrt interne interrompt toute l’évaluation
    assert_domaine("1+sin(sqrt(-4))", DEG, ErreurDomaine::RacineNegative);
    assert_domaine("(3%0)+100", DEG, ErreurDomaine::ModuloParZero);
}

/* ------------------------ Affichage ------------------------ */

#[test]
fn sci_formatage_idempotent_sur_entiers() {
    for expr in ["2+3*4", "5!", "20!", "pow10(15)", "-7*6", "2^52"] {
        let ev = eval_expression(expr, DEG).unwrap();
        let relu = val(&ev.affichage, DEG);
        assert_eq!(relu, ev.valeur, "expr={expr:?} affichage={}", ev.affichage);
        assert_eq!(format_resultat(relu), ev.affichage);
    }
}

#[test]
fn sci_formatage_trois_chiffres() {
    assert_eq!(eval_expression("1/3", DEG).unwrap().affichage, "0.333");
    assert_eq!(eval_expression("sin(10)", DEG).unwrap().affichage, "0.174");
    assert_eq!(eval_expression("14", DEG).unwrap().affichage, "14");
}

/* ------------------------ Entrées malformées ------------------------ */

#[test]
fn sci_entrees_malformees() {
    assert_syntaxe("2+(3*4");
    assert_syntaxe("");
    assert_syntaxe("2+");
    assert_syntaxe("2×÷3");
    assert_syntaxe("sin()");
    assert_syntaxe("sin(");
    assert_syntaxe("%3");
    assert_syntaxe("!");
    assert_syntaxe("1..2");
}

#[test]
fn sci_division_par_zero() {
    assert_eq!(
        evaluer("2/0", DEG),
        Err(ErreurCalcul::Numerique(ErreurNumerique::DivisionParZero))
    );
    assert_eq!(
        evaluer("1/(sin(180))", DEG),
        Err(ErreurCalcul::Numerique(ErreurNumerique::DivisionParZero))
    );
}

#[test]
fn sci_debordement() {
    assert_eq!(
        evaluer("100!*100!", DEG),
        Err(ErreurCalcul::Numerique(ErreurNumerique::NonFini))
    );
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_imbrication_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt(sqrt(...(65536)...)) x4 = 2, puis encapsulé dans des parenthèses
    let mut expr = "65536".to_string();
    for _ in 0..4 {
        expr = format!("sqrt({expr})");
        budget(t0, max);
    }
    for _ in 0..100 {
        expr = format!("({expr})");
        budget(t0, max);
    }
    assert_eq!(val(&expr, DEG), 2.0);
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..500 {
        if k > 0 {
            expr.push('+');
        }
        expr.push_str("0.5");
        budget(t0, max);
    }
    assert_eq!(val(&expr, DEG), 250.0);
}
