// src/noyau/expr.rs
//
// AST flottant, construit UNE fois par l’analyse, jeté après l’évaluation.
// - Nombre      : littéral (constantes déjà remplacées par canon)
// - Binaire     : + - * / ^ %
// - Neg         : moins unaire
// - Appel       : fonction nommée, un argument
// - Factorielle : postfixe !
//
// Évaluation = parcours post-ordre : l’argument d’une fonction est entièrement
// résolu (fonctions internes comprises) AVANT que la fonction soit appliquée.
// Chaque application est notée dans `etapes`, dans l’ordre où elle a lieu.
// Toute erreur, à n’importe quelle profondeur, remonte telle quelle (`?`).

use std::fmt;

use super::erreur::{ErreurCalcul, ErreurNumerique};
use super::fonctions::{factorielle, modulo, Fonction};
use super::trig::ModeAngle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
            Op::Mod => '%',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Binaire(Op, Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Appel(Fonction, Box<Expr>),
    Factorielle(Box<Expr>),
}

/// Une application de fonction / postfixe / modulo, avec opérandes déjà évalués.
#[derive(Clone, Debug, PartialEq)]
pub enum Etape {
    Appel {
        fonction: Fonction,
        argument: f64,
        resultat: f64,
    },
    Factorielle {
        argument: f64,
        resultat: f64,
    },
    Modulo {
        a: f64,
        b: f64,
        resultat: f64,
    },
}

impl fmt::Display for Etape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Etape::Appel {
                fonction,
                argument,
                resultat,
            } => write!(f, "{}({argument}) = {resultat}", fonction.nom()),
            Etape::Factorielle { argument, resultat } => write!(f, "{argument}! = {resultat}"),
            Etape::Modulo { a, b, resultat } => write!(f, "{a} % {b} = {resultat}"),
        }
    }
}

impl Expr {
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    /// Évalue l’arbre. Toute valeur non finie (intermédiaire comprise) est refusée.
    pub fn valeur(&self, mode: ModeAngle, etapes: &mut Vec<Etape>) -> Result<f64, ErreurCalcul> {
        use Expr::*;

        let v = match self {
            Nombre(v) => *v,

            Neg(x) => -x.valeur(mode, etapes)?,

            Binaire(op, a, b) => {
                let a = a.valeur(mode, etapes)?;
                let b = b.valeur(mode, etapes)?;
                match op {
                    Op::Add => a + b,
                    Op::Sub => a - b,
                    Op::Mul => a * b,
                    Op::Div => {
                        if b == 0.0 {
                            return Err(ErreurNumerique::DivisionParZero.into());
                        }
                        a / b
                    }
                    Op::Pow => a.powf(b),
                    Op::Mod => {
                        let r = modulo(a, b)?;
                        etapes.push(Etape::Modulo { a, b, resultat: r });
                        r
                    }
                }
            }

            Appel(fonction, x) => {
                let argument = x.valeur(mode, etapes)?;
                let r = fonction.appliquer(argument, mode)?;
                etapes.push(Etape::Appel {
                    fonction: *fonction,
                    argument,
                    resultat: r,
                });
                r
            }

            Factorielle(x) => {
                let argument = x.valeur(mode, etapes)?;
                let r = factorielle(argument)?;
                etapes.push(Etape::Factorielle {
                    argument,
                    resultat: r,
                });
                r
            }
        };

        fini(v)
    }

    /// Nombre de noeuds (garde-fou / tests).
    pub fn taille(&self) -> usize {
        use Expr::*;
        match self {
            Nombre(_) => 1,
            Neg(x) | Appel(_, x) | Factorielle(x) => 1 + x.taille(),
            Binaire(_, a, b) => 1 + a.taille() + b.taille(),
        }
    }
}

fn fini(v: f64) -> Result<f64, ErreurCalcul> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurNumerique::NonFini.into())
    }
}
