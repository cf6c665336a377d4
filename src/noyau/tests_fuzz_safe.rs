//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions générées TOUJOURS bien formées : seules les erreurs de domaine
//!   ou numériques sont acceptables (jamais Syntaxe)
//! - invariant clé : Ok => valeur finie et affichage = format_resultat(valeur)

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::eval::eval_expression;
use super::format::format_resultat;
use super::trig::ModeAngle;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(400)),
        3 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        4 => format!("(-{})", rng.pick(50)),
        _ => format!("{}", 30 * rng.pick(13)), // angles remarquables
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "PI".to_string(),
        1 => "EPS".to_string(),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(14) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}×{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}^{})", gen_nombre(rng)),
        6 => format!("({a}%{})", gen_expr(rng, depth - 1)),
        7 => format!("({a})!"),
        8 => format!("sin({a})"),
        9 => format!("cos({a})"),
        10 => format!("tan({a})"),
        11 => {
            if rng.coin() {
                format!("log({a})")
            } else {
                format!("ln({a})")
            }
        }
        12 => format!("sqrt({a})"),
        _ => format!("pow10({a})"),
    }
}

fn mode(rng: &mut Rng) -> ModeAngle {
    if rng.coin() {
        ModeAngle::Degres
    } else {
        ModeAngle::Radians
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let m = mode(&mut rng);

        let r1 = eval_expression(&expr, m);
        let r2 = eval_expression(&expr, m);

        match (r1, r2) {
            (Ok(a), Ok(b)) => {
                assert!(a.valeur.is_finite(), "expr={expr:?}");
                assert_eq!(a.valeur, b.valeur, "non déterministe: expr={expr:?}");
                assert_eq!(a.affichage, format_resultat(a.valeur));
                seen_ok += 1;
            }
            (Err(e1), Err(e2)) => {
                assert_eq!(e1, e2, "non déterministe: expr={expr:?}");
                assert!(
                    !matches!(e1, ErreurCalcul::Syntaxe(_)),
                    "expression bien formée refusée: expr={expr:?} err={e1}"
                );
                seen_err += 1;
            }
            (a, b) => panic!("non déterministe: expr={expr:?} {a:?} / {b:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_parenthese_retiree_donne_syntaxe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut testes = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let positions: Vec<usize> = expr
            .char_indices()
            .filter(|(_, c)| *c == ')')
            .map(|(i, _)| i)
            .collect();
        if positions.is_empty() {
            continue;
        }

        let i = positions[rng.pick(positions.len() as u32) as usize];
        let mut abime = expr.clone();
        abime.remove(i);

        assert!(
            matches!(
                eval_expression(&abime, ModeAngle::Degres),
                Err(ErreurCalcul::Syntaxe(_))
            ),
            "parenthèses déséquilibrées acceptées: {abime:?}"
        );
        testes += 1;
    }

    assert!(testes > 20, "trop peu d’expressions parenthésées: {testes}");
}

#[test]
fn fuzz_safe_entiers_se_relisent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);
    let mut vus = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let ev = match eval_expression(&expr, ModeAngle::Degres) {
            Ok(ev) => ev,
            Err(_) => continue,
        };
        if ev.valeur.fract() != 0.0 {
            continue;
        }

        let relu = eval_expression(&ev.affichage, ModeAngle::Degres)
            .unwrap_or_else(|e| panic!("affichage {:?} non relisible: {e}", ev.affichage));
        assert_eq!(relu.valeur, ev.valeur, "expr={expr:?}");
        vus += 1;
    }

    assert!(vus > 5, "trop peu de résultats entiers: {vus}");
}

#[test]
fn fuzz_safe_imbrication_profonde_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 200 niveaux de sin(cos(...)) : doit rester rapide et fini
    let mut expr = "0".to_string();
    for k in 0..200 {
        expr = if k % 2 == 0 {
            format!("cos({expr})")
        } else {
            format!("sin({expr})")
        };
    }

    let ev = eval_expression(&expr, ModeAngle::Radians).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);
    assert_eq!(ev.etapes.len(), 200);
    assert!(ev.valeur.is_finite());
}
